//! # Scene Catalog
//!
//! Static mapping from scene key to [`SceneDescription`]. The built-in
//! catalog carries the living-room vignettes; a user catalog can be read from
//! RON with the same shape:
//!
//! ```ron
//! {
//!     "SC03": (
//!         title: "Quiet Evening",
//!         description: "The lamp hums in an empty room.",
//!         objects: [
//!             (name: "FloorLamp", type: "lamp", position: (0.0, 0.0, 0.0)),
//!         ],
//!     ),
//! }
//! ```

mod living_room;

use std::fmt;
use std::path::Path;

use cgmath::{Euler, Point3, Rad, Vector3};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::audio::AudioCue;
use crate::error::CatalogError;

/// Which procedural model a placement instantiates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Person,
    Dog,
    Couch,
    Lamp,
    Toy,
    /// A type tag this build has no model for
    Unknown(String),
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "person",
            Self::Dog => "dog",
            Self::Couch => "couch",
            Self::Lamp => "lamp",
            Self::Toy => "toy",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for ObjectKind {
    fn from(tag: &str) -> Self {
        match tag {
            "person" => Self::Person,
            "dog" => Self::Dog,
            "couch" => Self::Couch,
            "lamp" => Self::Lamp,
            "toy" => Self::Toy,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ObjectKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: [f32; 3],
    /// XYZ Euler angles in radians
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioCue>,
}

impl ObjectPlacement {
    pub fn new(name: impl Into<String>, kind: ObjectKind, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            rotation: None,
            size: None,
            audio: None,
        }
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_size(mut self, size: [f32; 3]) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_audio(mut self, audio: AudioCue) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }

    /// Identity when the placement carries no rotation
    pub fn rotation(&self) -> Euler<Rad<f32>> {
        let [x, y, z] = self.rotation.unwrap_or([0.0; 3]);
        Euler::new(Rad(x), Rad(y), Rad(z))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: [f32; 3],
    #[serde(rename = "lookAt", alias = "look_at")]
    pub look_at: [f32; 3],
}

impl CameraPose {
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn look_at(&self) -> Point3<f32> {
        Point3::from(self.look_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraPose>,
}

/// Scenes in the order they were authored
///
/// Serializes as a map. Keys are unique; re-inserting a key replaces the
/// scene in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneCatalog {
    scenes: Vec<(String, SceneDescription)>,
}

impl SceneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The living-room vignettes shipped with the viewer
    pub fn builtin() -> Self {
        living_room::catalog()
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Self = ron::from_str(contents)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron_str(&contents)?;
        log::info!("loaded {} scenes from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, scene: SceneDescription) -> Option<SceneDescription> {
        let key = key.into();
        match self.scenes.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, scene)),
            None => {
                self.scenes.push((key, scene));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SceneDescription> {
        let scene = self
            .scenes
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, scene)| scene);
        if scene.is_none() {
            log::warn!("no scene '{key}' in catalog");
        }
        scene
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SceneDescription)> {
        self.scenes.iter().map(|(key, scene)| (key.as_str(), scene))
    }

    /// Key of the scene shown at startup: the first one authored
    pub fn first_key(&self) -> Option<&str> {
        self.keys().next()
    }

    /// `key` if the catalog has it, otherwise the first scene
    pub fn resolve_key<'a>(&'a self, key: Option<&'a str>) -> Option<&'a str> {
        match key {
            Some(key) if self.keys().any(|k| k == key) => Some(key),
            Some(key) => {
                log::warn!("no scene '{key}' in catalog, opening the first scene");
                self.first_key()
            }
            None => self.first_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Serialize for SceneCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scenes.len()))?;
        for (key, scene) in &self.scenes {
            map.serialize_entry(key, scene)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = SceneCatalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from scene key to scene description")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut catalog = SceneCatalog::new();
        while let Some((key, scene)) = access.next_entry::<String, SceneDescription>()? {
            if catalog.insert(key.clone(), scene).is_some() {
                log::warn!("scene '{key}' defined twice, keeping the later one");
            }
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for SceneCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioKind;

    #[test]
    fn builtin_has_both_living_room_scenes() {
        let catalog = SceneCatalog::builtin();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), ["SC01", "SC02"]);
        assert_eq!(catalog.first_key(), Some("SC01"));

        let sc01 = catalog.get("SC01").unwrap();
        assert_eq!(sc01.title, "Alex's Restful Afternoon");
        assert_eq!(sc01.objects.len(), 5);
        let camera = sc01.camera.unwrap();
        assert_eq!(camera.position, [6.0, 4.0, 4.0]);
        assert_eq!(camera.look_at, [2.0, 0.0, 0.0]);

        let names: Vec<_> = catalog
            .get("SC02")
            .unwrap()
            .objects
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, ["SideCouch", "ReadingLamp", "Jordan", "Pug"]);
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(SceneCatalog::builtin().get("SC99").is_none());
    }

    #[test]
    fn kind_tags_parse_case_sensitively() {
        assert_eq!(ObjectKind::from("lamp"), ObjectKind::Lamp);
        assert_eq!(
            ObjectKind::from("Lamp"),
            ObjectKind::Unknown("Lamp".to_string())
        );
        assert_eq!(String::from(ObjectKind::Toy), "toy");
    }

    #[test]
    fn missing_rotation_defaults_to_identity() {
        let placement = ObjectPlacement::new("Pug", ObjectKind::Dog, [3.0, 0.0, 0.0]);
        let rotation = placement.rotation();
        assert_eq!((rotation.x, rotation.y, rotation.z), (Rad(0.0), Rad(0.0), Rad(0.0)));
    }

    #[test]
    fn reads_a_user_catalog() {
        let text = r#"{
            "SC03": (
                title: "Quiet Evening",
                description: "The lamp hums.",
                objects: [
                    (name: "FloorLamp", type: "lamp", position: (0.0, 0.0, 0.0),
                     audio: Some((type: ambient, src: "lamp_hum.mp3"))),
                    (name: "Ghost", type: "ghost", position: (1.0, 0.0, 0.0)),
                ],
                camera: Some((position: (5.0, 5.0, 5.0), lookAt: (0.0, 0.0, 0.0))),
            ),
        }"#;
        let catalog = SceneCatalog::from_ron_str(text).unwrap();
        let scene = catalog.get("SC03").unwrap();
        assert_eq!(scene.objects[0].kind, ObjectKind::Lamp);
        assert_eq!(
            scene.objects[0].audio.as_ref().map(|a| a.kind),
            Some(AudioKind::Ambient)
        );
        assert_eq!(scene.objects[1].kind, ObjectKind::Unknown("ghost".into()));
        assert!(scene.objects[1].rotation.is_none());
        assert!(scene.camera.is_some());
    }

    #[test]
    fn user_catalog_keeps_authoring_order() {
        let text = r#"{
            "kitchen": (title: "Kitchen", description: "Breakfast."),
            "attic": (title: "Attic", description: "Dust."),
            "kitchen": (title: "Kitchen Again", description: "Lunch."),
        }"#;
        let catalog = SceneCatalog::from_ron_str(text).unwrap();

        assert_eq!(catalog.keys().collect::<Vec<_>>(), ["kitchen", "attic"]);
        assert_eq!(catalog.first_key(), Some("kitchen"));
        assert_eq!(catalog.get("kitchen").unwrap().title, "Kitchen Again");

        let reparsed = SceneCatalog::from_ron_str(&ron::to_string(&catalog).unwrap()).unwrap();
        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn resolve_key_falls_back_to_first_scene() {
        let catalog = SceneCatalog::builtin();
        assert_eq!(catalog.resolve_key(Some("SC02")), Some("SC02"));
        assert_eq!(catalog.resolve_key(Some("SC99")), Some("SC01"));
        assert_eq!(catalog.resolve_key(None), Some("SC01"));
        assert_eq!(SceneCatalog::new().resolve_key(None), None);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            SceneCatalog::from_ron_str("{}"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        match SceneCatalog::load("/nonexistent/scenes.ron") {
            Err(CatalogError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/scenes.ron"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

//! Scene picker and caption panel

use std::borrow::Cow;

use crate::catalog::SceneCatalog;
use crate::scene_manager::{LiveObject, SceneCaption};

/// Which catalog entry the picker currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSelection {
    keys: Vec<String>,
    index: usize,
}

impl SceneSelection {
    /// Starts on `initial` if the catalog has it, otherwise on the first key
    pub fn new(catalog: &SceneCatalog, initial: &str) -> Self {
        let keys: Vec<String> = catalog.keys().map(str::to_owned).collect();
        let index = keys.iter().position(|k| k == initial).unwrap_or(0);
        Self { keys, index }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn current_key(&self) -> Option<&str> {
        self.keys.get(self.index).map(String::as_str)
    }

    /// Moves to `index`; returns the new key only when the selection changed
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index == self.index || index >= self.keys.len() {
            return None;
        }
        self.index = index;
        self.current_key()
    }
}

/// Draws the scene panel; returns the key of a newly picked scene
pub fn scene_panel<'a>(
    ui: &imgui::Ui,
    selection: &mut SceneSelection,
    caption: &SceneCaption,
    objects: impl Iterator<Item = (&'a str, &'a LiveObject)>,
) -> Option<String> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }
    let panel_width = (display_size[0] * 0.28).clamp(300.0, 420.0);

    let mut picked = None;
    ui.window("Vignette")
        .size([panel_width, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .always_auto_resize(true)
        .build(|| {
            ui.text("Scene");
            let mut current = selection.index;
            if ui.combo("##scene_select", &mut current, selection.keys(), |key| {
                Cow::Borrowed(key.as_str())
            }) {
                picked = selection.select(current).map(str::to_owned);
            }

            ui.separator();
            render_caption(ui, caption);
            ui.separator();
            render_object_list(ui, objects);
        });

    picked
}

fn render_caption(ui: &imgui::Ui, caption: &SceneCaption) {
    if caption.title.is_empty() {
        ui.text_disabled("No scene loaded");
        return;
    }
    ui.text(&caption.title);
    ui.text_wrapped(&caption.description);
}

fn render_object_list<'a>(ui: &imgui::Ui, objects: impl Iterator<Item = (&'a str, &'a LiveObject)>) {
    if !ui.collapsing_header("Objects", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }
    for (name, object) in objects {
        ui.bullet_text(format!("{name} ({})", object.kind));
        if let Some([w, h, d]) = object.size {
            ui.text_disabled(format!("    size {w:.1} x {h:.1} x {d:.1}"));
        }
        if let Some(audio) = &object.audio {
            ui.text_disabled(format!("    audio {:?}: {}", audio.kind, audio.src));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_starts_on_requested_scene() {
        let catalog = SceneCatalog::builtin();
        let selection = SceneSelection::new(&catalog, "SC02");
        assert_eq!(selection.current_key(), Some("SC02"));
        assert_eq!(selection.keys(), ["SC01", "SC02"]);
    }

    #[test]
    fn unknown_initial_scene_falls_back_to_first() {
        let catalog = SceneCatalog::builtin();
        let selection = SceneSelection::new(&catalog, "SC99");
        assert_eq!(selection.current_key(), Some("SC01"));
    }

    #[test]
    fn select_reports_only_changes() {
        let catalog = SceneCatalog::builtin();
        let mut selection = SceneSelection::new(&catalog, "SC01");

        assert_eq!(selection.select(0), None);
        assert_eq!(selection.select(5), None);
        assert_eq!(selection.select(1), Some("SC02"));
        assert_eq!(selection.current_key(), Some("SC02"));
    }

    #[test]
    fn empty_catalog_has_no_current_key() {
        let selection = SceneSelection::new(&SceneCatalog::new(), "SC01");
        assert_eq!(selection.current_key(), None);
    }
}

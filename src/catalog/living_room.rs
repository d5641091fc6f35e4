use std::f32::consts::PI;

use super::{CameraPose, ObjectKind, ObjectPlacement, SceneCatalog, SceneDescription};
use crate::audio::AudioCue;

pub(super) fn catalog() -> SceneCatalog {
    let mut catalog = SceneCatalog::new();
    catalog.insert("SC01", restful_afternoon());
    catalog.insert("SC02", jordans_laughter());
    catalog
}

fn restful_afternoon() -> SceneDescription {
    SceneDescription {
        title: "Alex's Restful Afternoon".to_string(),
        description: "Alex lies sprawled on the couch under a soft blanket in the cozy living \
                      room, the afternoon sun casting a warm glow. The pug sits nearby, \
                      repeatedly squeezing a squeaky toy, the sound echoing softly."
            .to_string(),
        objects: vec![
            ObjectPlacement::new("MainCouch", ObjectKind::Couch, [2.0, 0.0, 0.0])
                .with_rotation([0.0, PI / 6.0, 0.0])
                .with_size([2.5, 1.0, 1.0]),
            ObjectPlacement::new("FloorLamp", ObjectKind::Lamp, [4.0, 0.0, 0.0])
                .with_audio(AudioCue::ambient("lamp_hum.mp3")),
            ObjectPlacement::new("Alex", ObjectKind::Person, [2.0, 0.0, 0.5])
                .with_rotation([0.0, 0.0, PI / 6.0]),
            ObjectPlacement::new("Pug", ObjectKind::Dog, [3.0, 0.0, 0.0])
                .with_audio(AudioCue::interaction("squeak.mp3")),
            ObjectPlacement::new("SqueekyToy", ObjectKind::Toy, [3.0, 0.0, 0.1]),
        ],
        camera: Some(CameraPose {
            position: [6.0, 4.0, 4.0],
            look_at: [2.0, 0.0, 0.0],
        }),
    }
}

fn jordans_laughter() -> SceneDescription {
    SceneDescription {
        title: "Jordan's Laughter".to_string(),
        description: "Jordan sits cross-legged on the rug, laughing at a cartoon on TV. The \
                      pug gazes up at him with the squeaky toy in its mouth, tail wagging \
                      gently."
            .to_string(),
        objects: vec![
            ObjectPlacement::new("SideCouch", ObjectKind::Couch, [-2.0, 0.0, -2.0])
                .with_rotation([0.0, PI / 2.0, 0.0]),
            ObjectPlacement::new("ReadingLamp", ObjectKind::Lamp, [-3.0, 0.0, -2.0]),
            ObjectPlacement::new("Jordan", ObjectKind::Person, [0.0, 0.0, -2.0])
                .with_rotation([0.0, -PI / 4.0, 0.0]),
            ObjectPlacement::new("Pug", ObjectKind::Dog, [1.0, 0.0, -2.0])
                .with_audio(AudioCue::interaction("pug_bark.mp3")),
        ],
        camera: Some(CameraPose {
            position: [5.0, 5.0, 2.0],
            look_at: [0.0, 0.0, -2.0],
        }),
    }
}

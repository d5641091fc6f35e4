//! Positional audio wiring
//!
//! Only the attachment side lives here: emitters are graph nodes that carry
//! their cue and the listener they are heard by. Loading and playing the
//! referenced files is left to whatever mixer consumes
//! [`SceneGraph::audio_emitters`].

use cgmath::{MetricSpace, Point3};
use serde::{Deserialize, Serialize};

use crate::gfx::scene::graph::{Node, NodeKey, NodeKind, SceneGraph};

/// How a cue is meant to be played back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    /// Looping background sound (a lamp hum)
    Ambient,
    /// One-shot sound tied to an interaction (a squeak, a bark)
    Interaction,
}

/// Sound attached to an object placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCue {
    #[serde(rename = "type")]
    pub kind: AudioKind,
    pub src: String,
}

impl AudioCue {
    pub fn ambient(src: impl Into<String>) -> Self {
        Self {
            kind: AudioKind::Ambient,
            src: src.into(),
        }
    }

    pub fn interaction(src: impl Into<String>) -> Self {
        Self {
            kind: AudioKind::Interaction,
            src: src.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// The ear of the scene; follows the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioListener {
    id: ListenerId,
    pub position: Point3<f32>,
}

impl AudioListener {
    pub fn new(id: u32) -> Self {
        Self {
            id: ListenerId(id),
            position: Point3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Distance from the listener to a world-space emitter position
    pub fn distance_to(&self, emitter: Point3<f32>) -> f32 {
        self.position.distance(emitter)
    }
}

/// Spatial sound source node payload
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalAudio {
    pub listener: ListenerId,
    pub cue: AudioCue,
}

/// Attaches a positional emitter for `cue` as a child of `node`
pub fn attach_audio(
    graph: &mut SceneGraph,
    listener: &AudioListener,
    node: NodeKey,
    cue: &AudioCue,
) -> NodeKey {
    log::debug!("attaching {:?} audio '{}'", cue.kind, cue.src);
    graph.add_child(
        node,
        Node::new(
            format!("audio:{}", cue.src),
            NodeKind::AudioEmitter(PositionalAudio {
                listener: listener.id(),
                cue: cue.clone(),
            }),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emitter_follows_its_object() {
        let mut graph = SceneGraph::new();
        let listener = AudioListener::new(0);
        let dog = graph.add_to_root(Node::group("Pug").at(3.0, 0.15, 0.0));

        let emitter = attach_audio(&mut graph, &listener, dog, &AudioCue::interaction("squeak.mp3"));

        assert_eq!(graph.get(emitter).and_then(Node::parent), Some(dog));
        let emitters = graph.audio_emitters();
        assert_eq!(emitters.len(), 1);
        assert_eq!(emitters[0].audio.cue.src, "squeak.mp3");
        assert_eq!(emitters[0].audio.listener, listener.id());
        assert_eq!(emitters[0].position, Point3::new(3.0, 0.15, 0.0));

        graph.remove(dog);
        assert!(graph.audio_emitters().is_empty());
    }

    #[test]
    fn listener_distance() {
        let mut listener = AudioListener::new(1);
        listener.position = Point3::new(6.0, 4.0, 4.0);
        assert_eq!(listener.distance_to(Point3::new(6.0, 0.0, 1.0)), 5.0);
    }
}

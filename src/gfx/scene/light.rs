//! Light sources that live in the scene graph
//!
//! A light's position comes from the node it is attached to; directional
//! lights shine from their node position towards the world origin.

use super::material::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform fill light, position ignored
    Ambient,
    /// Parallel rays from the node position towards the origin
    Directional,
    /// Omni light; `range` of 0.0 means no distance cutoff
    Point { range: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: hex_to_rgb(hex),
            intensity,
        }
    }

    pub fn directional(hex: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color: hex_to_rgb(hex),
            intensity,
        }
    }

    pub fn point(hex: u32, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point { range },
            color: hex_to_rgb(hex),
            intensity,
        }
    }

    /// Color premultiplied by intensity, as the shader consumes it
    pub fn radiance(&self) -> [f32; 3] {
        [
            self.color[0] * self.intensity,
            self.color[1] * self.intensity,
            self.color[2] * self.intensity,
        ]
    }
}

//! Surface materials for scene meshes
//!
//! Materials are plain values stored on each mesh node. The renderer packs
//! them into the per-draw uniform, so there is no material registry.

/// Converts a `0xRRGGBB` color to linear-ish `[r, g, b]` floats in `0.0..=1.0`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Standard roughness/metalness surface description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// Lit from both sides (lampshades, open geometry)
    pub double_sided: bool,
}

impl Material {
    /// Creates a single-sided material from a hex color with default
    /// roughness 1.0 and metalness 0.0
    pub fn from_hex(hex: u32) -> Self {
        Self {
            base_color: hex_to_rgb(hex),
            ..Self::default()
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            double_sided: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_unpack_per_channel() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb(0x808080)[2], 128.0 / 255.0);
    }

    #[test]
    fn builder_clamps_factors() {
        let floor = Material::from_hex(0x808080)
            .with_roughness(0.8)
            .with_metalness(2.0);
        assert_eq!(floor.roughness, 0.8);
        assert_eq!(floor.metalness, 1.0);
        assert!(!floor.double_sided);
    }
}

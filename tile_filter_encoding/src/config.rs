// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};
use peniko::kurbo::{Affine, Rect};

use super::{Mat4, TileRect};

/// Width of a tile in pixels.
pub const TILE_WIDTH: u32 = 16;
/// Height of a tile in pixels.
pub const TILE_HEIGHT: u32 = 16;

/// Per-draw uniform data for the tile filter vertex stage.
///
/// This data structure must be kept in sync with the definition in
/// `shader/tile_filter.wgsl`.
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct TileFilterUniforms {
    /// Maps the scaled tile position (with z = 0, w = 1) to clip space.
    pub transform: Mat4,
    /// Size of one tile, in the units of the transform's input space.
    pub tile_size: [f32; 2],
    /// Size of the source surface, used to normalize texture coordinates.
    pub source_size: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<TileFilterUniforms>(), 80);
static_assertions::assert_impl_all!(TileFilterUniforms: Send, Sync);

impl TileFilterUniforms {
    pub fn new(transform: Mat4, tile_size: [f32; 2], source_size: [f32; 2]) -> Self {
        Self {
            transform,
            tile_size,
            source_size,
        }
    }

    /// Checks that the uniforms produce finite output for finite tile
    /// positions.
    ///
    /// The vertex stage itself never validates; this is for callers that
    /// want to catch bad draws before submitting them.
    pub fn validate(&self) -> Result<(), UniformError> {
        if !self.transform.is_finite() {
            return Err(UniformError::NonFiniteTransform);
        }
        if !self.tile_size.iter().all(|x| x.is_finite()) {
            return Err(UniformError::NonFiniteTileSize(self.tile_size));
        }
        if !self.source_size.iter().all(|x| x.is_finite()) {
            return Err(UniformError::NonFiniteSourceSize(self.source_size));
        }
        if self.source_size.contains(&0.0) {
            return Err(UniformError::ZeroSourceSize(self.source_size));
        }
        Ok(())
    }
}

impl Default for TileFilterUniforms {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            tile_size: [TILE_WIDTH as f32, TILE_HEIGHT as f32],
            source_size: [1.0, 1.0],
        }
    }
}

/// Reasons [`TileFilterUniforms::validate`] rejects a set of uniforms.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UniformError {
    #[error("transform contains a non-finite value")]
    NonFiniteTransform,
    #[error("tile size {0:?} is not finite")]
    NonFiniteTileSize([f32; 2]),
    #[error("source size {0:?} is not finite")]
    NonFiniteSourceSize([f32; 2]),
    #[error("source size {0:?} has a zero component")]
    ZeroSourceSize([f32; 2]),
}

/// Description of a single tile filter draw.
///
/// This is the caller-side configuration from which the uniforms and the
/// tile grid for a draw are derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    /// Width of the render target in pixels.
    pub target_width: u32,
    /// Height of the render target in pixels.
    pub target_height: u32,
    /// Width of the source surface in pixels.
    pub source_width: u32,
    /// Height of the source surface in pixels.
    pub source_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Overrides the default orthographic projection of the target.
    pub transform: Option<Mat4>,
}

impl FilterConfig {
    pub fn new(
        target_width: u32,
        target_height: u32,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        Self {
            target_width,
            target_height,
            source_width,
            source_height,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            transform: None,
        }
    }

    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Places the tiles with a 2D affine transform in target pixel space,
    /// followed by the orthographic projection of the target.
    pub fn with_affine(self, affine: Affine) -> Self {
        let projection = Mat4::orthographic(self.target_width as f32, self.target_height as f32);
        self.with_transform(projection * Mat4::from_kurbo(&affine))
    }

    pub fn transform(&self) -> Mat4 {
        self.transform.unwrap_or_else(|| {
            Mat4::orthographic(self.target_width as f32, self.target_height as f32)
        })
    }

    pub fn tile_size(&self) -> [f32; 2] {
        [self.tile_width as f32, self.tile_height as f32]
    }

    pub fn source_size(&self) -> [f32; 2] {
        [self.source_width as f32, self.source_height as f32]
    }

    pub fn uniforms(&self) -> TileFilterUniforms {
        TileFilterUniforms::new(self.transform(), self.tile_size(), self.source_size())
    }

    /// Tiles covering the whole source surface.
    pub fn tile_grid(&self) -> TileRect {
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.source_width),
            f64::from(self.source_height),
        );
        TileRect::covering(bounds, self.tile_size())
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterConfig, TileFilterUniforms, UniformError};
    use crate::{Mat4, TilePosition, TileRect};
    use peniko::kurbo::Affine;

    #[test]
    fn uniform_layout() {
        let uniforms = TileFilterUniforms::new(Mat4::IDENTITY, [16.0, 8.0], [256.0, 128.0]);
        let words: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniforms));
        assert_eq!(words.len(), 20);
        assert_eq!(&words[..4], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&words[16..], &[16.0, 8.0, 256.0, 128.0]);
    }

    #[test]
    fn validate_reports_degenerate_uniforms() {
        assert_eq!(TileFilterUniforms::default().validate(), Ok(()));

        let mut uniforms = TileFilterUniforms::default();
        uniforms.source_size = [0.0, 10.0];
        assert_eq!(
            uniforms.validate(),
            Err(UniformError::ZeroSourceSize([0.0, 10.0]))
        );

        uniforms.source_size = [f32::INFINITY, 10.0];
        assert!(matches!(
            uniforms.validate(),
            Err(UniformError::NonFiniteSourceSize(_))
        ));

        let mut uniforms = TileFilterUniforms::default();
        uniforms.tile_size = [f32::NAN, 1.0];
        assert!(matches!(
            uniforms.validate(),
            Err(UniformError::NonFiniteTileSize(_))
        ));

        let mut uniforms = TileFilterUniforms::default();
        uniforms.transform.cols[3][0] = f32::NAN;
        assert_eq!(uniforms.validate(), Err(UniformError::NonFiniteTransform));
    }

    #[test]
    fn config_derives_uniforms() {
        let config = FilterConfig::new(640, 480, 256, 200);
        let uniforms = config.uniforms();
        assert_eq!(uniforms.tile_size, [16.0, 16.0]);
        assert_eq!(uniforms.source_size, [256.0, 200.0]);
        assert_eq!(uniforms.transform, Mat4::orthographic(640.0, 480.0));

        let config = config.with_tile_size(32, 8).with_transform(Mat4::IDENTITY);
        let uniforms = config.uniforms();
        assert_eq!(uniforms.tile_size, [32.0, 8.0]);
        assert_eq!(uniforms.transform, Mat4::IDENTITY);
    }

    #[test]
    fn config_tile_grid_covers_source() {
        let grid = FilterConfig::new(640, 480, 256, 200).tile_grid();
        assert_eq!(grid, TileRect::new(TilePosition::new(0, 0), 16, 13));
    }

    #[test]
    fn affine_placement_lands_in_clip_space() {
        // Draw the source at twice its size, 256 pixels in from the left.
        let config = FilterConfig::new(1024, 512, 200, 100)
            .with_affine(Affine::translate((256.0, 0.0)) * Affine::scale(2.0));
        let m = config.uniforms().transform;
        assert_eq!(m.mul_vec4([0.0, 0.0, 0.0, 1.0]), [-0.5, 1.0, 0.0, 1.0]);
        assert_eq!(
            m.mul_vec4([200.0, 100.0, 0.0, 1.0]),
            [0.28125, 0.21875, 0.0, 1.0]
        );

        let plain = FilterConfig::new(1024, 512, 200, 100).with_affine(Affine::IDENTITY);
        assert_eq!(plain.transform(), Mat4::orthographic(1024.0, 512.0));
    }
}

// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};

/// Output of the tile filter vertex stage for a single vertex.
///
/// The struct is padded to 32 bytes so that an array of outputs can be bound
/// as a storage buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct VertexOutput {
    /// Position in clip space.
    pub clip_position: [f32; 4],
    /// Texture coordinate into the source surface.
    pub tex_coord: [f32; 2],
    padding: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<VertexOutput>(), 32);

impl VertexOutput {
    /// Creates an output with zeroed padding.
    pub fn new(clip_position: [f32; 4], tex_coord: [f32; 2]) -> Self {
        Self {
            clip_position,
            tex_coord,
            padding: [0.0; 2],
        }
    }

    /// Bitwise comparison, which unlike `==` treats identical NaNs as equal.
    pub fn bits_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }
}

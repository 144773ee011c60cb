// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tile filter vertex shader, packaged so it can be integrated into any
//! renderer. It provides the metadata needed to build the render pipeline on
//! any GPU API while leaving all API interactions (resource management,
//! command encoding) to the client.
//!
//! The stage places each tile corner in clip space and computes its texture
//! coordinate in the source surface:
//!
//! ```text
//! position   = vec2<f32>(tile_position) * tile_size
//! tex_coord  = position / source_size
//! clip       = transform * vec4(position, 0.0, 1.0)
//! ```
//!
//! The shader source is embedded with the `wgsl` feature. The `cpu` feature
//! provides an equivalent implementation for testing and debugging, and the
//! `compile` feature validates the source at runtime with naga.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs, reason = "We have many as-yet undocumented items.")]

mod types;

#[cfg(feature = "compile")]
pub mod compile;
#[cfg(feature = "cpu")]
pub mod cpu;

pub use types::{BindType, BindingInfo, VertexAttribute, VertexFormat};

use std::borrow::Cow;

use tile_filter_encoding::TileFilterUniforms;

#[derive(Clone, Debug)]
pub struct VertexShader<'a> {
    pub name: Cow<'a, str>,
    pub entry_point: Cow<'a, str>,
    /// Resource bindings, in `@binding` order within group 0.
    pub bindings: Cow<'a, [BindType]>,
    pub vertex_attributes: Cow<'a, [VertexAttribute]>,
    /// Size in bytes of the uniform block at binding 0.
    pub uniform_size: u32,

    #[cfg(feature = "wgsl")]
    pub wgsl: Cow<'a, str>,
}

impl VertexShader<'_> {
    /// Distance in bytes between consecutive vertices of the vertex buffer.
    pub fn vertex_stride(&self) -> u32 {
        self.vertex_attributes
            .iter()
            .map(|attr| attr.format.size_in_bytes())
            .sum()
    }
}

/// Source of the tile filter shader.
pub const TILE_FILTER_WGSL: &str = include_str!("../shader/tile_filter.wgsl");

/// The tile filter vertex stage.
pub const TILE_FILTER: VertexShader<'static> = VertexShader {
    name: Cow::Borrowed("tile_filter"),
    entry_point: Cow::Borrowed("main"),
    bindings: Cow::Borrowed(&[BindType::Uniform]),
    vertex_attributes: Cow::Borrowed(&[VertexAttribute {
        location: 0,
        format: VertexFormat::Sint32x2,
    }]),
    uniform_size: std::mem::size_of::<TileFilterUniforms>() as u32,

    #[cfg(feature = "wgsl")]
    wgsl: Cow::Borrowed(TILE_FILTER_WGSL),
};

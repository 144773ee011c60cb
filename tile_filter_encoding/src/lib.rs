// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data layouts shared between the CPU and GPU versions of the tile filter
//! vertex stage.
//!
//! Everything here that crosses the CPU/GPU boundary is [`bytemuck::Pod`] and
//! must be kept in sync with `tile_filter_shaders/shader/tile_filter.wgsl`.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(
    clippy::cast_possible_truncation,
    clippy::return_self_not_must_use,
    reason = "Deferred"
)]

mod config;
pub mod math;
mod tile;
mod vertex;

pub use config::{FilterConfig, TileFilterUniforms, UniformError, TILE_HEIGHT, TILE_WIDTH};
pub use math::Mat4;
pub use tile::{TilePosition, TileRect};
pub use vertex::VertexOutput;

static_assertions::assert_impl_all!(Mat4: Send, Sync, Copy);
static_assertions::assert_impl_all!(TilePosition: Send, Sync, Copy);
static_assertions::assert_impl_all!(VertexOutput: Send, Sync, Copy);

// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checks the WGSL source against the metadata and the CPU data layouts.

#![cfg(feature = "compile")]

use tile_filter_encoding::{TileFilterUniforms, TilePosition};
use tile_filter_shaders::compile::ShaderInfo;
use tile_filter_shaders::{BindType, VertexAttribute, VertexFormat, TILE_FILTER};

#[test]
fn embedded_shader_validates() {
    let info = ShaderInfo::tile_filter().unwrap();
    assert_eq!(info.entry_point, "main");
    assert_eq!(info.bindings.len(), 1);
    assert_eq!(info.bindings[0].location, (0, 0));
    assert_eq!(info.bindings[0].ty, BindType::Uniform);
    assert_eq!(info.bindings[0].name.as_deref(), Some("uniforms"));
    assert_eq!(
        info.vertex_attributes,
        [VertexAttribute {
            location: 0,
            format: VertexFormat::Sint32x2,
        }]
    );
}

#[test]
fn metadata_matches_reflection() {
    let info = ShaderInfo::tile_filter().unwrap();
    let bind_tys: Vec<_> = info.bindings.iter().map(|b| b.ty).collect();
    assert_eq!(&*TILE_FILTER.bindings, &bind_tys[..]);
    assert_eq!(&*TILE_FILTER.vertex_attributes, &info.vertex_attributes[..]);
    assert_eq!(
        TILE_FILTER.vertex_stride() as usize,
        std::mem::size_of::<TilePosition>()
    );
}

#[test]
fn uniform_block_matches_rust_layout() {
    let info = ShaderInfo::tile_filter().unwrap();
    let (members, span) = info
        .module
        .types
        .iter()
        .find_map(|(_, ty)| match &ty.inner {
            naga::TypeInner::Struct { members, span }
                if ty.name.as_deref() == Some("TileFilterUniforms") =>
            {
                Some((members.clone(), *span))
            }
            _ => None,
        })
        .expect("uniform struct is declared");
    assert_eq!(span as usize, std::mem::size_of::<TileFilterUniforms>());
    let offsets: Vec<_> = members.iter().map(|m| m.offset).collect();
    assert_eq!(offsets, [0, 64, 72]);
    assert_eq!(TILE_FILTER.uniform_size, span);
}

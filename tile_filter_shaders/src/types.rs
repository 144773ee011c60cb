// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Types that describe the resources and inputs of a shader.

/// The type of resource that will be bound to a slot in a shader.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BindType {
    /// A storage buffer with read/write access.
    Buffer,
    /// A storage buffer with read only access.
    BufReadOnly,
    /// A small buffer to be used as uniforms.
    Uniform,
    /// A storage image.
    Image,
    /// A storage image with read only access.
    ImageRead,
}

impl BindType {
    pub fn is_mutable(self) -> bool {
        matches!(self, Self::Buffer | Self::Image)
    }
}

#[derive(Clone, Debug)]
pub struct BindingInfo {
    pub name: Option<String>,
    pub location: (u32, u32),
    pub ty: BindType,
}

/// Format of a per-vertex input attribute.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VertexFormat {
    Sint32x2,
    Float32x2,
    Float32x4,
}

impl VertexFormat {
    pub fn size_in_bytes(self) -> u32 {
        match self {
            Self::Sint32x2 | Self::Float32x2 => 8,
            Self::Float32x4 => 16,
        }
    }
}

/// A per-vertex input of a vertex shader.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
}

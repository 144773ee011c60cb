// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime parsing, validation and reflection of the vertex shader.

use naga::{
    front::wgsl,
    valid::{Capabilities, ModuleInfo, ValidationError, ValidationFlags},
    AddressSpace, ImageClass, Module, ScalarKind, ShaderStage, StorageAccess, TypeInner,
    VectorSize, WithSpan,
};

use crate::types::{BindType, BindingInfo, VertexAttribute, VertexFormat};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse shader: {0}")]
    Parse(#[from] wgsl::ParseError),
    #[error("shader failed validation: {0}")]
    Validate(#[from] WithSpan<ValidationError>),
    #[error("entry point `{0}` not found")]
    EntryPointNotFound(String),
    #[error("entry point `{0}` is not a vertex shader")]
    NotVertexStage(String),
    #[error("vertex input `{0}` has an unsupported type")]
    UnsupportedVertexInput(String),
}

#[derive(Debug)]
pub struct ShaderInfo {
    pub source: String,
    pub module: Module,
    pub module_info: ModuleInfo,
    pub entry_point: String,
    pub bindings: Vec<BindingInfo>,
    pub vertex_attributes: Vec<VertexAttribute>,
}

impl ShaderInfo {
    pub fn new(source: String, entry_point: &str) -> Result<ShaderInfo, Error> {
        let module = wgsl::parse_str(&source)?;
        let module_info = naga::valid::Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)?;
        let (entry_index, entry) = module
            .entry_points
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name.as_str() == entry_point)
            .ok_or_else(|| Error::EntryPointNotFound(entry_point.to_string()))?;
        if entry.stage != ShaderStage::Vertex {
            return Err(Error::NotVertexStage(entry_point.to_string()));
        }
        let mut bindings = vec![];
        let entry_info = module_info.get_entry_point(entry_index);
        for (var_handle, var) in module.global_variables.iter() {
            if entry_info[var_handle].is_empty() {
                continue;
            }
            let Some(binding) = &var.binding else {
                continue;
            };
            let ty = match &module.types[var.ty].inner {
                TypeInner::Image {
                    class: ImageClass::Storage { access, .. },
                    ..
                } if access.contains(StorageAccess::STORE) => BindType::Image,
                TypeInner::Image { .. } => BindType::ImageRead,
                _ => match var.space {
                    AddressSpace::Uniform => BindType::Uniform,
                    AddressSpace::Storage { access } if access.contains(StorageAccess::STORE) => {
                        BindType::Buffer
                    }
                    _ => BindType::BufReadOnly,
                },
            };
            bindings.push(BindingInfo {
                name: var.name.clone(),
                location: (binding.group, binding.binding),
                ty,
            });
        }
        bindings.sort_by_key(|res| res.location);

        let mut vertex_attributes = vec![];
        for arg in &entry.function.arguments {
            let Some(naga::Binding::Location { location, .. }) = arg.binding else {
                continue;
            };
            let name = arg.name.clone().unwrap_or_default();
            let format = match module.types[arg.ty].inner {
                TypeInner::Vector {
                    size: VectorSize::Bi,
                    scalar,
                } if scalar.kind == ScalarKind::Sint && scalar.width == 4 => {
                    VertexFormat::Sint32x2
                }
                TypeInner::Vector {
                    size: VectorSize::Bi,
                    scalar,
                } if scalar.kind == ScalarKind::Float && scalar.width == 4 => {
                    VertexFormat::Float32x2
                }
                TypeInner::Vector {
                    size: VectorSize::Quad,
                    scalar,
                } if scalar.kind == ScalarKind::Float && scalar.width == 4 => {
                    VertexFormat::Float32x4
                }
                _ => return Err(Error::UnsupportedVertexInput(name)),
            };
            vertex_attributes.push(VertexAttribute { location, format });
        }
        vertex_attributes.sort_by_key(|attr| attr.location);

        log::debug!(
            "compiled `{entry_point}`: {} bindings, {} vertex inputs",
            bindings.len(),
            vertex_attributes.len()
        );
        Ok(ShaderInfo {
            source,
            module,
            module_info,
            entry_point: entry_point.to_string(),
            bindings,
            vertex_attributes,
        })
    }

    /// Compiles the embedded tile filter shader.
    pub fn tile_filter() -> Result<ShaderInfo, Error> {
        Self::new(
            crate::TILE_FILTER_WGSL.to_string(),
            &crate::TILE_FILTER.entry_point,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ShaderInfo};

    #[test]
    fn missing_entry_point() {
        let err = ShaderInfo::new(crate::TILE_FILTER_WGSL.to_string(), "vs_main").unwrap_err();
        assert!(matches!(err, Error::EntryPointNotFound(name) if name == "vs_main"));
    }

    #[test]
    fn rejects_compute_entry_point() {
        let source = "@compute @workgroup_size(1) fn main() {}".to_string();
        let err = ShaderInfo::new(source, "main").unwrap_err();
        assert!(matches!(err, Error::NotVertexStage(_)));
    }

    #[test]
    fn reports_parse_errors() {
        let err = ShaderInfo::new("fn main( {".to_string(), "main").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}

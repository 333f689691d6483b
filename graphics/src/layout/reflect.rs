//! Shader input signatures reflected from WGSL via naga.

use case_core::vertex::{ElementType, semantics};

use super::signature::ShaderInputSignature;
use crate::error::{LayoutError, Result};

impl ShaderInputSignature {
    /// Reflect the vertex inputs of `entry_point` from WGSL source.
    ///
    /// Inputs are ordered by `@location`, which must run contiguously from 0.
    /// Semantic names come from the argument or struct member identifiers.
    ///
    /// ```
    /// use case_graphics::layout::ShaderInputSignature;
    ///
    /// let sig = ShaderInputSignature::from_wgsl(
    ///     "@vertex fn vs_main(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>)
    ///         -> @builtin(position) vec4<f32> { return vec4<f32>(position, 1.0); }",
    ///     "vs_main",
    /// ).unwrap();
    /// assert_eq!(sig.to_string(), "(POSITION:Float3, TEXCOORD:Float2)");
    /// ```
    pub fn from_wgsl(source: &str, entry_point: &str) -> Result<Self> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| LayoutError::SignatureReflection(e.emit_to_string(source)))?;
        Self::from_naga_module(&module, entry_point)
    }

    /// Reflect the vertex inputs of `entry_point` from a parsed naga module.
    pub fn from_naga_module(module: &naga::Module, entry_point: &str) -> Result<Self> {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == entry_point && ep.stage == naga::ShaderStage::Vertex)
            .ok_or_else(|| {
                LayoutError::SignatureReflection(format!(
                    "no vertex entry point named '{entry_point}'"
                ))
            })?;

        let mut located: Vec<(u32, String, ElementType)> = Vec::new();
        for arg in &ep.function.arguments {
            match &arg.binding {
                Some(binding) => {
                    if let Some(location) = location_of(binding) {
                        let name = arg.name.as_deref().unwrap_or_default();
                        let ty = element_type(module, arg.ty, name)?;
                        located.push((location, semantic_for(name), ty));
                    }
                }
                None => {
                    let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner
                    else {
                        continue;
                    };
                    for member in members {
                        let Some(location) = member.binding.as_ref().and_then(location_of) else {
                            continue;
                        };
                        let name = member.name.as_deref().unwrap_or_default();
                        let ty = element_type(module, member.ty, name)?;
                        located.push((location, semantic_for(name), ty));
                    }
                }
            }
        }

        located.sort_by_key(|(location, _, _)| *location);
        for (expected, (location, name, _)) in (0u32..).zip(&located) {
            if *location != expected {
                return Err(LayoutError::SignatureReflection(format!(
                    "input '{name}' at location {location}, expected location {expected}"
                )));
            }
        }

        Ok(located
            .into_iter()
            .map(|(_, name, ty)| (name, ty))
            .collect())
    }
}

fn location_of(binding: &naga::Binding) -> Option<u32> {
    match binding {
        naga::Binding::Location { location, .. } => Some(*location),
        naga::Binding::BuiltIn(_) => None,
    }
}

fn element_type(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    name: &str,
) -> Result<ElementType> {
    let f32_scalar = naga::Scalar {
        kind: naga::ScalarKind::Float,
        width: 4,
    };
    match module.types[ty].inner {
        naga::TypeInner::Scalar(scalar) if scalar == f32_scalar => Ok(ElementType::Float1),
        naga::TypeInner::Vector { size, scalar } if scalar == f32_scalar => Ok(match size {
            naga::VectorSize::Bi => ElementType::Float2,
            naga::VectorSize::Tri => ElementType::Float3,
            naga::VectorSize::Quad => ElementType::Float4,
        }),
        _ => Err(LayoutError::SignatureReflection(format!(
            "input '{name}' is not an f32 scalar or vector"
        ))),
    }
}

/// Map a shader identifier to a semantic name.
fn semantic_for(identifier: &str) -> String {
    let lower = identifier.to_ascii_lowercase();
    let stripped = lower
        .strip_prefix("in_")
        .or_else(|| lower.strip_prefix("a_"))
        .unwrap_or(&lower);
    match stripped {
        "position" | "pos" => semantics::POSITION.to_string(),
        "uv" | "texcoord" | "tex_coord" => semantics::TEXCOORD.to_string(),
        "color" | "colour" => semantics::COLOR.to_string(),
        "normal" => semantics::NORMAL.to_string(),
        "tangent" => semantics::TANGENT.to_string(),
        "bitangent" | "binormal" => semantics::BITANGENT.to_string(),
        other => other.to_ascii_uppercase(),
    }
}

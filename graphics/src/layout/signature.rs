//! Shader input signatures.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use case_core::vertex::ElementType;

/// One input a vertex shader consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderInput {
    pub semantic_name: String,
    pub element_type: ElementType,
}

impl ShaderInput {
    /// Create an input reading `semantic_name` as `element_type`.
    pub fn new(semantic_name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            element_type,
        }
    }
}

impl fmt::Display for ShaderInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.semantic_name, self.element_type)
    }
}

/// The ordered list of inputs a vertex shader consumes.
///
/// Entry `i` is read from shader location `i`. Two signatures with the same
/// entries in the same order are equal and hash equally, so a signature can key
/// the layout cache directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShaderInputSignature {
    inputs: Vec<ShaderInput>,
}

impl ShaderInputSignature {
    /// Create an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input, builder style.
    pub fn with_input(mut self, semantic_name: impl Into<String>, element_type: ElementType) -> Self {
        self.push(semantic_name, element_type);
        self
    }

    /// Append an input.
    pub fn push(&mut self, semantic_name: impl Into<String>, element_type: ElementType) {
        self.inputs.push(ShaderInput::new(semantic_name, element_type));
    }

    /// Inputs in shader location order.
    pub fn inputs(&self) -> &[ShaderInput] {
        &self.inputs
    }

    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Check if the shader reads no vertex inputs.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Stable 64-bit hash of the signature, for logging and diagnostics.
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl FromIterator<ShaderInput> for ShaderInputSignature {
    fn from_iter<I: IntoIterator<Item = ShaderInput>>(iter: I) -> Self {
        Self {
            inputs: iter.into_iter().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, ElementType)> for ShaderInputSignature {
    fn from_iter<I: IntoIterator<Item = (S, ElementType)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, ty)| ShaderInput::new(name, ty))
            .collect()
    }
}

impl fmt::Display for ShaderInputSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{input}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_core::vertex::semantics::{NORMAL, POSITION};

    #[test]
    fn test_equal_signatures_hash_equally() {
        let a = ShaderInputSignature::new()
            .with_input(POSITION, ElementType::Float3)
            .with_input(NORMAL, ElementType::Float3);
        let b: ShaderInputSignature = [(POSITION, ElementType::Float3), (NORMAL, ElementType::Float3)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
    }

    #[test]
    fn test_order_matters() {
        let a = ShaderInputSignature::new()
            .with_input(POSITION, ElementType::Float3)
            .with_input(NORMAL, ElementType::Float3);
        let b = ShaderInputSignature::new()
            .with_input(NORMAL, ElementType::Float3)
            .with_input(POSITION, ElementType::Float3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let sig = ShaderInputSignature::new()
            .with_input(POSITION, ElementType::Float3)
            .with_input(NORMAL, ElementType::Float3);
        assert_eq!(sig.to_string(), "(POSITION:Float3, NORMAL:Float3)");
        assert_eq!(ShaderInputSignature::new().to_string(), "()");
    }
}

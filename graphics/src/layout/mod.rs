//! Vertex input layout resolution.
//!
//! - [`ShaderInputSignature`] - the inputs a vertex shader reads
//! - [`LayoutResolver`] - validates a format against a signature and builds the layout
//! - [`FormatRegistry`] - format catalog plus a thread-safe layout cache
//! - [`ResolvedLayout`] - a shared GPU input layout, released on last drop

mod desc;
#[cfg(feature = "naga-reflection")]
mod reflect;
mod registry;
mod resolved;
mod resolver;
mod signature;

pub use desc::{InputElement, InputLayoutDesc, InputSlot};
pub use registry::{FormatRegistry, RegistryParameters, RegistryStats};
pub use resolved::ResolvedLayout;
pub use resolver::{LayoutResolver, MismatchError, TypeConflict};
pub use signature::{ShaderInput, ShaderInputSignature};

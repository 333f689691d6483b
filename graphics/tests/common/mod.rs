//! Common utilities for layout integration tests.
//!
//! This module provides backend enumeration, an instrumented backend that
//! counts and optionally fails creation calls, and shared signatures.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use case_core::vertex::{ElementType, semantics};
use case_graphics::{
    BackendError, DummyBackend, FormatRegistry, GpuBackend, GpuInputLayout, InputLayoutDesc,
    ShaderInputSignature,
};

/// Route `log` output through env_logger once per test binary.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .is_test(true)
            .try_init();
    });
}

// ============================================================================
// Backend Enumeration
// ============================================================================

/// Available GPU backends for testing.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Dummy backend (no actual GPU operations).
    Dummy,
    /// Vulkan backend (vertex input state via ash).
    Vulkan,
    /// WebGPU backend (vertex buffer layouts via wgpu).
    WebGpu,
}

impl Backend {
    /// Create the backend, or `None` if its feature is disabled.
    ///
    /// The GPU backends are built from default limits, so no device is needed.
    #[allow(dead_code)]
    pub fn create(self) -> Option<Arc<dyn GpuBackend>> {
        match self {
            Backend::Dummy => Some(Arc::new(DummyBackend::new())),
            #[cfg(feature = "vulkan-backend")]
            Backend::Vulkan => {
                let limits = ash::vk::PhysicalDeviceLimits {
                    max_vertex_input_bindings: 16,
                    max_vertex_input_attributes: 16,
                    max_vertex_input_binding_stride: 2048,
                    max_vertex_input_attribute_offset: 2047,
                    ..Default::default()
                };
                Some(Arc::new(case_graphics::backend::vulkan::VulkanBackend::new(
                    limits,
                )))
            }
            #[cfg(not(feature = "vulkan-backend"))]
            Backend::Vulkan => None,
            #[cfg(feature = "wgpu-backend")]
            Backend::WebGpu => Some(Arc::new(
                case_graphics::backend::wgpu_backend::WgpuBackend::new(wgpu::Limits::default()),
            )),
            #[cfg(not(feature = "wgpu-backend"))]
            Backend::WebGpu => None,
        }
    }
}

// ============================================================================
// Counting Backend
// ============================================================================

/// Backend that wraps [`DummyBackend`] and records every call.
#[derive(Debug, Default)]
pub struct CountingBackend {
    inner: DummyBackend,
    create_calls: AtomicU64,
    release_calls: AtomicU64,
    fail_next: AtomicBool,
    delay: Option<Duration>,
}

impl CountingBackend {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sleep inside every creation call, widening race windows.
    #[allow(dead_code)]
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// Make the next creation call fail with [`BackendError::DeviceLost`].
    #[allow(dead_code)]
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::Release);
    }

    pub fn create_calls(&self) -> u64 {
        self.create_calls.load(Ordering::Acquire)
    }

    #[allow(dead_code)]
    pub fn release_calls(&self) -> u64 {
        self.release_calls.load(Ordering::Acquire)
    }
}

impl GpuBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "Counting Backend"
    }

    fn create_input_layout(
        &self,
        desc: &InputLayoutDesc,
        signature: &ShaderInputSignature,
    ) -> Result<GpuInputLayout, BackendError> {
        self.create_calls.fetch_add(1, Ordering::AcqRel);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.fail_next.swap(false, Ordering::AcqRel) {
            return Err(BackendError::DeviceLost);
        }
        self.inner.create_input_layout(desc, signature)
    }

    fn release_input_layout(&self, layout: &GpuInputLayout) {
        self.release_calls.fetch_add(1, Ordering::AcqRel);
        self.inner.release_input_layout(layout);
    }
}

/// Registry over a fresh [`CountingBackend`].
#[allow(dead_code)]
pub fn counting_registry() -> (FormatRegistry, Arc<CountingBackend>) {
    init_logging();
    let backend = CountingBackend::new();
    (FormatRegistry::new(backend.clone()), backend)
}

// ============================================================================
// Signatures
// ============================================================================

pub fn position_only() -> ShaderInputSignature {
    ShaderInputSignature::new().with_input(semantics::POSITION, ElementType::Float3)
}

pub fn position_normal() -> ShaderInputSignature {
    ShaderInputSignature::new()
        .with_input(semantics::POSITION, ElementType::Float3)
        .with_input(semantics::NORMAL, ElementType::Float3)
}

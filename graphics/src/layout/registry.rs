//! Format registry and per-device layout cache.
//!
//! [`FormatRegistry`] owns the vertex format catalog and caches one
//! [`ResolvedLayout`] per `(format, shader signature)` pair. It is shared
//! between threads: cache hits take only shared locks, and concurrent first
//! requests for the same pair wait on a per-entry lock so the backend sees a
//! single creation call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use case_core::vertex::{ElementType, VertexFormatId, semantics};
//! use case_graphics::backend::DummyBackend;
//! use case_graphics::layout::{FormatRegistry, ShaderInputSignature};
//!
//! let registry = FormatRegistry::new(Arc::new(DummyBackend::new()));
//! let signature = ShaderInputSignature::new()
//!     .with_input(semantics::POSITION, ElementType::Float3)
//!     .with_input(semantics::NORMAL, ElementType::Float3);
//!
//! let first = registry.resolve(&VertexFormatId::Normal, &signature).unwrap();
//! let second = registry.resolve(&VertexFormatId::Normal, &signature).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use case_core::vertex::{Vertex, VertexFormatCatalog, VertexFormatDescriptor, VertexFormatId};
use parking_lot::{Mutex, RwLock};

use super::resolved::ResolvedLayout;
use super::resolver::LayoutResolver;
use super::signature::ShaderInputSignature;
use crate::backend::GpuBackend;
use crate::error::{LayoutError, Result};

/// Construction options for [`FormatRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryParameters {
    /// Seed the catalog with the seven built-in formats.
    pub include_builtin_formats: bool,
    /// Name used in log messages.
    pub label: Option<String>,
}

impl Default for RegistryParameters {
    fn default() -> Self {
        Self {
            include_builtin_formats: true,
            label: None,
        }
    }
}

/// Snapshot of registry counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Resolves answered from the cache.
    pub hits: u64,
    /// Resolves that had to build a layout.
    pub misses: u64,
    /// Calls made to [`GpuBackend::create_input_layout`].
    pub backend_calls: u64,
    /// Resolves that returned an error after a miss.
    pub failures: u64,
}

#[derive(Default)]
struct StatCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    backend_calls: AtomicU64,
    failures: AtomicU64,
}

impl StatCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> RegistryStats {
        RegistryStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            backend_calls: self.backend_calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// One cache entry. Empty until the first successful build.
#[derive(Default)]
struct LayoutSlot {
    layout: OnceLock<Arc<ResolvedLayout>>,
    build_lock: Mutex<()>,
}

type SignatureSlots = HashMap<ShaderInputSignature, Arc<LayoutSlot>>;

/// Vertex format catalog plus a cache of GPU input layouts for one device.
pub struct FormatRegistry {
    label: String,
    catalog: RwLock<VertexFormatCatalog>,
    // Declared before `backend` so cached layouts are released while the
    // backend is still alive.
    slots: RwLock<HashMap<VertexFormatId, SignatureSlots>>,
    backend: RwLock<Arc<dyn GpuBackend>>,
    stats: StatCounters,
}

impl FormatRegistry {
    /// Create a registry seeded with the built-in formats.
    pub fn new(backend: Arc<dyn GpuBackend>) -> Self {
        Self::with_parameters(backend, RegistryParameters::default())
    }

    /// Create a registry with explicit parameters.
    pub fn with_parameters(backend: Arc<dyn GpuBackend>, params: RegistryParameters) -> Self {
        let catalog = if params.include_builtin_formats {
            VertexFormatCatalog::builtin()
        } else {
            VertexFormatCatalog::empty()
        };
        let label = params.label.unwrap_or_else(|| "FormatRegistry".to_string());

        log::info!(
            "{}: created with {} formats on {}",
            label,
            catalog.len(),
            backend.name()
        );

        Self {
            label,
            catalog: RwLock::new(catalog),
            slots: RwLock::new(HashMap::new()),
            backend: RwLock::new(backend),
            stats: StatCounters::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the current backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.read().name()
    }

    // --- Catalog ---

    /// Register a new format.
    ///
    /// Fails with [`LayoutError::DuplicateFormat`] if the id is taken; the
    /// existing registration is left untouched.
    pub fn register(&self, descriptor: VertexFormatDescriptor) -> Result<()> {
        let id = descriptor.format_id().clone();
        self.catalog.write().insert(descriptor)?;
        log::debug!("{}: registered format '{}'", self.label, id);
        Ok(())
    }

    /// Get the descriptor of a registered format.
    pub fn descriptor(&self, id: &VertexFormatId) -> Result<Arc<VertexFormatDescriptor>> {
        Ok(self.catalog.read().get(id)?)
    }

    /// Swap the descriptor of an existing format and drop its cached layouts.
    ///
    /// Returns the previous descriptor.
    pub fn replace(
        &self,
        descriptor: VertexFormatDescriptor,
    ) -> Result<Arc<VertexFormatDescriptor>> {
        let id = descriptor.format_id().clone();
        let previous = self.catalog.write().replace(descriptor)?;
        let evicted = self.invalidate(&id);
        log::debug!(
            "{}: replaced format '{}' ({} layouts evicted)",
            self.label,
            id,
            evicted
        );
        Ok(previous)
    }

    /// Ids of all registered formats, in catalog order.
    pub fn formats(&self) -> Vec<VertexFormatId> {
        self.catalog.read().ids().cloned().collect()
    }

    pub fn contains(&self, id: &VertexFormatId) -> bool {
        self.catalog.read().contains(id)
    }

    // --- Layout cache ---

    /// Get the input layout for a format and shader signature.
    ///
    /// The first call for a pair validates the format against the signature
    /// and creates the layout on the backend; later calls return the same
    /// `Arc`. Errors are returned without caching anything, so a later call
    /// retries.
    pub fn resolve(
        &self,
        id: &VertexFormatId,
        signature: &ShaderInputSignature,
    ) -> Result<Arc<ResolvedLayout>> {
        if let Some(layout) = self.cached(id, signature) {
            StatCounters::bump(&self.stats.hits);
            log::trace!("{}: cache hit for '{}' {}", self.label, id, signature);
            return Ok(layout);
        }

        // Unknown formats must not leave an empty slot behind.
        self.descriptor(id)?;

        loop {
            let slot = self.slot(id, signature);
            let _build = slot.build_lock.lock();
            if let Some(layout) = slot.layout.get() {
                StatCounters::bump(&self.stats.hits);
                return Ok(Arc::clone(layout));
            }
            // A failed build detaches its slot while others may still wait on
            // it. Waiters move to the slot now in the map.
            if !self.is_attached(id, signature, &slot) {
                continue;
            }

            StatCounters::bump(&self.stats.misses);
            // Read under `build_lock` so a concurrent `replace` either lands
            // before this build or detaches the slot it fills.
            let built = self.descriptor(id).and_then(|descriptor| {
                let backend = Arc::clone(&*self.backend.read());
                LayoutResolver::build(&descriptor, signature, &backend)
            });
            return match built {
                Ok(layout) => {
                    StatCounters::bump(&self.stats.backend_calls);
                    let layout = Arc::new(layout);
                    // Only this thread fills the slot while holding `build_lock`.
                    let _ = slot.layout.set(Arc::clone(&layout));
                    Ok(layout)
                }
                Err(err) => {
                    StatCounters::bump(&self.stats.failures);
                    if matches!(err, LayoutError::DeviceResource { .. }) {
                        StatCounters::bump(&self.stats.backend_calls);
                        log::warn!("{}: {}", self.label, err);
                    } else {
                        log::debug!("{}: resolve failed: {}", self.label, err);
                    }
                    self.remove_empty_slot(id, signature, &slot);
                    Err(err)
                }
            };
        }
    }

    /// Resolve the format of a typed vertex struct.
    pub fn resolve_vertex<V: Vertex>(
        &self,
        signature: &ShaderInputSignature,
    ) -> Result<Arc<ResolvedLayout>> {
        self.resolve(&V::format_id(), signature)
    }

    /// Drop every cached layout of a format.
    ///
    /// Returns the number of layouts evicted. Outstanding `Arc`s stay valid;
    /// the next resolve builds a fresh layout.
    pub fn invalidate(&self, id: &VertexFormatId) -> usize {
        let removed = self.slots.write().remove(id);
        removed.map_or(0, |by_signature| {
            by_signature
                .values()
                .filter(|slot| slot.layout.get().is_some())
                .count()
        })
    }

    /// Drop every cached layout.
    pub fn clear(&self) -> usize {
        let removed = std::mem::take(&mut *self.slots.write());
        let count = removed
            .values()
            .flat_map(HashMap::values)
            .filter(|slot| slot.layout.get().is_some())
            .count();
        log::debug!("{}: cleared {} cached layouts", self.label, count);
        count
    }

    /// Switch to a new backend after a device reset.
    ///
    /// Every cached layout belongs to the old device and is evicted. Layouts
    /// still referenced elsewhere are released when their last `Arc` drops, as
    /// long as the old backend is alive.
    pub fn reset_backend(&self, backend: Arc<dyn GpuBackend>) {
        let previous = std::mem::replace(&mut *self.backend.write(), backend);
        let evicted = self.clear();
        log::info!(
            "{}: backend reset from {} to {} ({} layouts evicted)",
            self.label,
            previous.name(),
            self.backend_name(),
            evicted
        );
    }

    /// Number of layouts currently cached.
    pub fn cached_layout_count(&self) -> usize {
        self.slots
            .read()
            .values()
            .flat_map(HashMap::values)
            .filter(|slot| slot.layout.get().is_some())
            .count()
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats.snapshot()
    }

    fn cached(
        &self,
        id: &VertexFormatId,
        signature: &ShaderInputSignature,
    ) -> Option<Arc<ResolvedLayout>> {
        let slots = self.slots.read();
        slots
            .get(id)
            .and_then(|by_signature| by_signature.get(signature))
            .and_then(|slot| slot.layout.get())
            .map(Arc::clone)
    }

    fn slot(&self, id: &VertexFormatId, signature: &ShaderInputSignature) -> Arc<LayoutSlot> {
        let mut slots = self.slots.write();
        let slot = slots
            .entry(id.clone())
            .or_default()
            .entry(signature.clone())
            .or_default();
        Arc::clone(slot)
    }

    fn is_attached(
        &self,
        id: &VertexFormatId,
        signature: &ShaderInputSignature,
        slot: &Arc<LayoutSlot>,
    ) -> bool {
        self.slots
            .read()
            .get(id)
            .and_then(|by_signature| by_signature.get(signature))
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    fn remove_empty_slot(
        &self,
        id: &VertexFormatId,
        signature: &ShaderInputSignature,
        slot: &Arc<LayoutSlot>,
    ) {
        let mut slots = self.slots.write();
        let Some(by_signature) = slots.get_mut(id) else {
            return;
        };
        let is_ours = by_signature
            .get(signature)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.layout.get().is_none());
        if is_ours {
            by_signature.remove(signature);
        }
        if by_signature.is_empty() {
            slots.remove(id);
        }
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("label", &self.label)
            .field("backend", &self.backend_name())
            .field("formats", &self.catalog.read().len())
            .field("cached_layouts", &self.cached_layout_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(FormatRegistry: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyBackend;
    use case_core::vertex::semantics::{NORMAL, POSITION};
    use case_core::vertex::{ElementType, NormalVertex};

    fn registry() -> (FormatRegistry, Arc<DummyBackend>) {
        let backend = Arc::new(DummyBackend::new());
        (FormatRegistry::new(backend.clone()), backend)
    }

    fn position_normal() -> ShaderInputSignature {
        ShaderInputSignature::new()
            .with_input(POSITION, ElementType::Float3)
            .with_input(NORMAL, ElementType::Float3)
    }

    #[test]
    fn test_builtin_formats_registered() {
        let (registry, _) = registry();
        assert_eq!(registry.formats().len(), 7);

        let empty = FormatRegistry::with_parameters(
            Arc::new(DummyBackend::new()),
            RegistryParameters {
                include_builtin_formats: false,
                label: Some("empty".to_string()),
            },
        );
        assert!(empty.formats().is_empty());
        assert_eq!(empty.label(), "empty");
    }

    #[test]
    fn test_resolve_caches() {
        let (registry, backend) = registry();
        let first = registry.resolve(&VertexFormatId::Normal, &position_normal()).unwrap();
        let second = registry.resolve_vertex::<NormalVertex>(&position_normal()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(backend.created_layouts(), 1);
        assert_eq!(
            registry.stats(),
            RegistryStats {
                hits: 1,
                misses: 1,
                backend_calls: 1,
                failures: 0,
            }
        );
    }

    #[test]
    fn test_mismatch_leaves_no_entry() {
        let (registry, backend) = registry();
        let err = registry
            .resolve(&VertexFormatId::Simple, &position_normal())
            .unwrap_err();

        assert!(matches!(err, LayoutError::Mismatch(_)));
        assert_eq!(backend.created_layouts(), 0);
        assert_eq!(registry.cached_layout_count(), 0);
        assert!(registry.slots.read().is_empty());
        assert_eq!(registry.stats().failures, 1);
        assert_eq!(registry.stats().backend_calls, 0);
    }

    #[test]
    fn test_unknown_format_leaves_no_entry() {
        let (registry, _) = registry();
        let id = VertexFormatId::custom("missing");
        let err = registry.resolve(&id, &position_normal()).unwrap_err();

        assert_eq!(err, LayoutError::UnknownFormat(id));
        assert!(registry.slots.read().is_empty());
    }

    #[test]
    fn test_invalidate_counts_layouts() {
        let (registry, _) = registry();
        let position_only = ShaderInputSignature::new().with_input(POSITION, ElementType::Float3);
        registry.resolve(&VertexFormatId::Normal, &position_normal()).unwrap();
        registry.resolve(&VertexFormatId::Normal, &position_only).unwrap();
        registry.resolve(&VertexFormatId::Simple, &position_only).unwrap();

        assert_eq!(registry.cached_layout_count(), 3);
        assert_eq!(registry.invalidate(&VertexFormatId::Normal), 2);
        assert_eq!(registry.invalidate(&VertexFormatId::Normal), 0);
        assert_eq!(registry.cached_layout_count(), 1);
        assert_eq!(registry.clear(), 1);
        assert_eq!(registry.cached_layout_count(), 0);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-to-descriptor catalog consumed by the codec.
//!
//! The catalog is populated once at process start from the generated
//! tables, then shared read-only across codecs without locking. The codec
//! only depends on the narrow [`TypeCatalog`] trait, keeping it decoupled
//! from however the tens of thousands of generated types are stored.

use crate::descriptor::TypeDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only lookup over the registered VMOMI data types.
pub trait TypeCatalog {
    /// Look up a descriptor by wire name.
    ///
    /// Returns `None` when the name is unregistered.
    fn lookup(&self, name: &str) -> Option<Arc<TypeDescriptor>>;
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for &C {
    fn lookup(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        (**self).lookup(name)
    }
}

/// Simple [`HashMap`]-backed [`TypeCatalog`].
///
/// Append-only: types are registered during startup and never replaced or
/// removed while codecs are live.
#[derive(Debug, Default)]
pub struct Registry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own wire name.
    pub fn register(&mut self, descriptor: Arc<TypeDescriptor>) {
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    /// Register a descriptor under an explicit name, e.g. a pre-built
    /// `ArrayOf` wrapper whose name differs from the natural derivation.
    pub fn register_as(&mut self, name: impl Into<String>, descriptor: Arc<TypeDescriptor>) {
        self.types.insert(name.into(), descriptor);
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for Registry {
    fn lookup(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.get(name).cloned()
    }
}

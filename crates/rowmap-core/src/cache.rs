// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared cache of resolved field lists.
//!
//! Keyed by `(tag namespace, type identity)`. Lookups take a read lock; a
//! miss upgrades to the write lock, checks again and resolves while holding
//! it, so each key is computed at most once and readers never observe a
//! partially built list. Entries are never evicted.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock}
};

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    fields::{ResolvedField, resolve},
    reflect::TypeInfo
};

type Entries = HashMap<String, HashMap<TypeId, Arc<[ResolvedField]>>>;

static GLOBAL: LazyLock<Arc<TypeCache>> = LazyLock::new(|| Arc::new(TypeCache::new()));

/// Resolved field lists per namespace and type.
///
/// Decoders and encoders share [`TypeCache::global`] unless given their own
/// instance.
///
/// ```rust
/// use rowmap_core::{Reflect, TypeCache};
///
/// let cache = TypeCache::new();
/// let fields = cache.fields("csv", &<i32 as Reflect>::type_info());
/// assert!(fields.is_empty());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Default)]
pub struct TypeCache {
    entries: RwLock<Entries>
}

impl TypeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the resolved fields of `info`, computing them on first use.
    pub fn fields(&self, namespace: &str, info: &TypeInfo) -> Arc<[ResolvedField]> {
        if let Some(fields) = self
            .entries
            .read()
            .get(namespace)
            .and_then(|by_type| by_type.get(&info.id()))
        {
            return Arc::clone(fields);
        }

        let mut entries = self.entries.write();
        let by_type = entries.entry(namespace.to_owned()).or_default();
        if let Some(fields) = by_type.get(&info.id()) {
            return Arc::clone(fields);
        }

        let fields: Arc<[ResolvedField]> = resolve(info, namespace).into();
        debug!(
            namespace,
            type_name = info.name(),
            fields = fields.len(),
            "resolved record fields"
        );
        by_type.insert(info.id(), Arc::clone(&fields));
        fields
    }

    /// Number of cached `(namespace, type)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    /// Check if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache").field("len", &self.len()).finish()
    }
}

use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

use lru::LruCache;

use crate::{
    foundation::error::CadenceResult,
    procedural::field::{FieldParams, Particle, generate_field},
};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => unreachable!(),
};

type FieldKey = (u32, [u64; 14]);

/// Memo of generated particle fields keyed by `(count, params bit pattern)`.
///
/// Purely an optimization: a miss, an eviction or a poisoned lock all fall back to
/// [`generate_field`], which returns the same particles.
#[derive(Debug)]
pub struct FieldCache {
    inner: Mutex<LruCache<FieldKey, Arc<[Particle]>>>,
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FieldCache {
    /// Cache holding at most `capacity` fields.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached or freshly generated field.
    pub fn get_or_generate(
        &self,
        count: u32,
        params: &FieldParams,
    ) -> CadenceResult<Arc<[Particle]>> {
        let key = (count, params.key_bits());
        if let Ok(mut cache) = self.inner.lock()
            && let Some(hit) = cache.get(&key)
        {
            return Ok(Arc::clone(hit));
        }

        let field: Arc<[Particle]> = generate_field(count, params)?.into();
        match self.inner.lock() {
            Ok(mut cache) => {
                cache.put(key, Arc::clone(&field));
                tracing::debug!(count, cached = cache.len(), "field cache miss");
            }
            Err(_) => tracing::debug!(count, "field cache lock poisoned; serving uncached"),
        }
        Ok(field)
    }

    /// Number of cached fields.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached field.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/procedural/cache.rs"]
mod tests;

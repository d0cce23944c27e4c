// src/cache.rs
//
// Process-wide plan cache (spec.md §6: "this is a collaborator, not part
// of the core spec"). Keyed by `(TypeId, size, Direction)` so `f32` and
// `f64` plans of the same size don't collide, behind a `std::sync::RwLock`
// so concurrent lookups don't serialize on a mutex. Grow-only: spec.md
// leaves eviction policy to the caller, and this crate doesn't choose one.

use crate::common::{Direction, FftError};
use crate::plan::Plan;
use crate::trig::FftFloat;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

type CacheKey = (TypeId, usize, Direction);
type Registry = RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns a shared `Plan<T>` for `(n, direction)`, building and caching
/// one on first use. Safe to call concurrently from multiple threads.
pub fn cached_plan<T: FftFloat>(n: usize, direction: Direction) -> Result<Arc<Plan<T>>, FftError> {
    let key: CacheKey = (TypeId::of::<T>(), n, direction);

    if let Some(hit) = registry().read().unwrap().get(&key) {
        return Ok(downcast(hit.clone()));
    }

    let plan = Arc::new(Plan::<T>::new(n, direction)?);
    let mut guard = registry().write().unwrap();
    let entry = guard
        .entry(key)
        .or_insert_with(|| plan.clone() as Arc<dyn Any + Send + Sync>);
    Ok(downcast(entry.clone()))
}

fn downcast<T: FftFloat>(erased: Arc<dyn Any + Send + Sync>) -> Arc<Plan<T>> {
    erased
        .downcast::<Plan<T>>()
        .expect("cache key encodes the concrete element type")
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

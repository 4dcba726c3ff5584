//! `DeepClone` implementations for std types

use super::{CloneContext, DeepClone};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};

// ============================================================================
// Immutable values
// ============================================================================

crate::deep_clone_by_value!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, &'static str, (),
);

// JSON trees own all their nodes
crate::deep_clone_by_value!(serde_json::Value);

// ============================================================================
// Owning wrappers and sequences
// ============================================================================

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        match self {
            Some(value) => Ok(Some(value.deep_clone_with(ctx)?)),
            None => Ok(None),
        }
    }
}

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        Ok(Box::new((**self).deep_clone_with(ctx)?))
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = Vec::with_capacity(self.len());
        for (i, item) in self.iter().enumerate() {
            out.push(ctx.element(i, item)?);
        }
        Ok(out)
    }
}

impl<T: DeepClone> DeepClone for VecDeque<T> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = VecDeque::with_capacity(self.len());
        for (i, item) in self.iter().enumerate() {
            out.push_back(ctx.element(i, item)?);
        }
        Ok(out)
    }
}

// ============================================================================
// Associative containers
// ============================================================================

impl<K, V> DeepClone for BTreeMap<K, V>
where
    K: DeepClone + Ord,
    V: DeepClone,
{
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = BTreeMap::new();
        for (i, (key, value)) in self.iter().enumerate() {
            out.insert(ctx.element(i, key)?, ctx.element(i, value)?);
        }
        Ok(out)
    }
}

impl<K, V, S> DeepClone for HashMap<K, V, S>
where
    K: DeepClone + Eq + Hash,
    V: DeepClone,
    S: BuildHasher + Clone,
{
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (i, (key, value)) in self.iter().enumerate() {
            out.insert(ctx.element(i, key)?, ctx.element(i, value)?);
        }
        Ok(out)
    }
}

impl<T: DeepClone + Ord> DeepClone for BTreeSet<T> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = BTreeSet::new();
        for (i, item) in self.iter().enumerate() {
            out.insert(ctx.element(i, item)?);
        }
        Ok(out)
    }
}

impl<T, S> DeepClone for HashSet<T, S>
where
    T: DeepClone + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let mut out = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (i, item) in self.iter().enumerate() {
            out.insert(ctx.element(i, item)?);
        }
        Ok(out)
    }
}

// ============================================================================
// Shared nodes
// ============================================================================

impl<T: DeepClone> DeepClone for Rc<RefCell<T>> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let addr = Rc::as_ptr(self) as *const () as usize;
        ctx.shared(addr, |ctx| {
            let inner = self
                .try_borrow()
                .map_err(|_| ctx.fail("value is mutably borrowed"))?;
            Ok(Rc::new(RefCell::new(inner.deep_clone_with(ctx)?)))
        })
    }
}

impl<T: DeepClone> DeepClone for Arc<Mutex<T>> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let addr = Arc::as_ptr(self) as *const () as usize;
        ctx.shared(addr, |ctx| {
            let inner = self.lock().map_err(|_| ctx.fail("mutex is poisoned"))?;
            Ok(Arc::new(Mutex::new(inner.deep_clone_with(ctx)?)))
        })
    }
}

impl<T: DeepClone> DeepClone for Arc<RwLock<T>> {
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self> {
        let addr = Arc::as_ptr(self) as *const () as usize;
        ctx.shared(addr, |ctx| {
            let inner = self.read().map_err(|_| ctx.fail("lock is poisoned"))?;
            Ok(Arc::new(RwLock::new(inner.deep_clone_with(ctx)?)))
        })
    }
}

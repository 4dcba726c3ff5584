//! Deep clone module
//!
//! Produces independent copies of request graphs so that a request held by a
//! session is immune to later mutation by the caller.
//!
//! # Overview
//!
//! `#[derive(Clone)]` already copies plain owned data, but it aliases shared
//! nodes (`Rc<RefCell<T>>`, `Arc<Mutex<T>>`): the copy and the original keep
//! pointing at the same mutable cell. [`DeepClone`] allocates a fresh cell for
//! every shared node it meets and walks the graph with a [`CloneContext`] that
//! records the field path, bounds the depth, and detects cycles through shared
//! nodes.
//!
//! Request types opt in with [`deep_clone_struct!`]; closed value sets
//! (enums, `Copy` scalars) use [`deep_clone_by_value!`].

mod context;
mod impls;

pub use context::{CloneContext, PathSegment, MAX_GRAPH_DEPTH};

use crate::error::Result;

/// Type-directed deep copy of a request graph
pub trait DeepClone: Sized {
    /// Clone `self`, reporting failures against the path held by `ctx`
    fn deep_clone_with(&self, ctx: &mut CloneContext) -> Result<Self>;

    /// Clone `self` with a fresh context
    fn deep_clone(&self) -> Result<Self> {
        self.deep_clone_with(&mut CloneContext::new())
    }
}

/// Implement [`DeepClone`] for a struct by cloning each listed field.
///
/// Every field of the struct must be listed; the struct literal in the
/// expansion fails to compile otherwise.
///
/// ```rust,ignore
/// deep_clone_struct!(SearchFilesRequest {
///     locale,
///     search_parameters,
///     result_columns,
/// });
/// ```
#[macro_export]
macro_rules! deep_clone_struct {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::deep_clone::DeepClone for $ty {
            fn deep_clone_with(
                &self,
                ctx: &mut $crate::deep_clone::CloneContext,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $($field: ctx.field(stringify!($field), &self.$field)?,)*
                })
            }
        }
    };
}

/// Implement [`DeepClone`] for immutable value types by copying them.
#[macro_export]
macro_rules! deep_clone_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::deep_clone::DeepClone for $ty {
                fn deep_clone_with(
                    &self,
                    _ctx: &mut $crate::deep_clone::CloneContext,
                ) -> $crate::error::Result<Self> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

//! Traversal context shared by clone implementations

use super::DeepClone;
use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Maximum nesting depth before a graph is treated as cyclic
pub const MAX_GRAPH_DEPTH: usize = 64;

/// One step of the path from the root of a graph to the current node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named struct field
    Field(&'static str),
    /// Position in a sequence, map or set
    Index(usize),
}

/// Tracks where a clone is in the graph
#[derive(Debug)]
pub struct CloneContext {
    path: Vec<PathSegment>,
    /// Addresses of shared nodes currently being cloned
    in_progress: Vec<usize>,
    max_depth: usize,
}

impl Default for CloneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CloneContext {
    /// Create a context with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(MAX_GRAPH_DEPTH)
    }

    /// Create a context with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            path: Vec::new(),
            in_progress: Vec::new(),
            max_depth,
        }
    }

    /// Clone a named field
    pub fn field<T: DeepClone>(&mut self, name: &'static str, value: &T) -> Result<T> {
        self.descend(PathSegment::Field(name), value)
    }

    /// Clone the element at `index`
    pub fn element<T: DeepClone>(&mut self, index: usize, value: &T) -> Result<T> {
        self.descend(PathSegment::Index(index), value)
    }

    fn descend<T: DeepClone>(&mut self, segment: PathSegment, value: &T) -> Result<T> {
        self.path.push(segment);
        let result = if self.path.len() > self.max_depth {
            Err(Error::cyclic(self.path()))
        } else {
            value.deep_clone_with(self)
        };
        self.path.pop();
        result
    }

    /// Run `f` while the shared node at `addr` is marked as in progress.
    ///
    /// Meeting the same node again before `f` returns means the graph loops
    /// back on itself.
    pub fn shared<T>(&mut self, addr: usize, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.in_progress.contains(&addr) {
            return Err(Error::cyclic(self.path()));
        }
        self.in_progress.push(addr);
        let result = f(self);
        self.in_progress.pop();
        result
    }

    /// Build a clone error for the current field
    pub fn fail(&self, message: impl Into<String>) -> Error {
        Error::clone_failed(self.path(), message)
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Render the current path, e.g. `search_parameters.template_type_ids[2]`
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => {
                    let _ = write!(out, "[{i}]");
                }
            }
        }
        if out.is_empty() {
            out.push_str("<root>");
        }
        out
    }
}

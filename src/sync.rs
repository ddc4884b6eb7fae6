//! Thread-safe wrapper around [`DependencyGraph`] for callers that mutate
//! it from more than one task - mirrors the single-lock sharing pattern used
//! for in-memory state elsewhere in this stack.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::component::Component;
use crate::depgraph::{DependencyGraph, DgVertex, Entity};
use crate::error::DepGraphResult;
use crate::kind::NodeKind;
use crate::scheduler::what_should_be_started;

/// An `Arc<Mutex<DependencyGraph<C>>>` with the graph's operations exposed
/// directly, so callers don't reach through `.lock()` themselves. Every
/// method takes the lock for the duration of a single graph operation; there
/// is no cross-call locking, so interleaved mutations from different
/// threads are serialized but not otherwise coordinated.
#[derive(Clone)]
pub struct SharedDependencyGraph<C: Component> {
    inner: Arc<Mutex<DependencyGraph<C>>>,
}

impl<C: Component> SharedDependencyGraph<C> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DependencyGraph::new())),
        }
    }

    pub fn add_worker(&self, name: impl Into<String>) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().add_worker(name)
    }

    pub fn add_component(&self, x: C) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().add_component(x)
    }

    pub fn remove_component(&self, x: &C) {
        self.inner.lock().remove_component(x)
    }

    pub fn remove_worker(&self, name: &str) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().remove_worker(name)
    }

    pub fn set_component_worker(&self, x: &C, worker: &str) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().set_component_worker(x, worker)
    }

    pub fn add_clock_master(&self, x: &C) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().add_clock_master(x)
    }

    pub fn map_eaters_to_feeders(&self) -> DepGraphResult<(), Entity<C>> {
        self.inner.lock().map_eaters_to_feeders()
    }

    pub fn set_component_started(&self, x: &C) {
        self.inner.lock().set_component_started(x)
    }

    pub fn set_component_not_started(&self, x: &C) {
        self.inner.lock().set_component_not_started(x)
    }

    pub fn set_component_setup(&self, x: &C) {
        self.inner.lock().set_component_setup(x)
    }

    pub fn set_component_not_setup(&self, x: &C) {
        self.inner.lock().set_component_not_setup(x)
    }

    pub fn set_job_started(&self, x: &C) {
        self.inner.lock().set_job_started(x)
    }

    pub fn set_job_stopped(&self, x: &C) {
        self.inner.lock().set_job_stopped(x)
    }

    pub fn set_worker_started(&self, name: &str) {
        self.inner.lock().set_worker_started(name)
    }

    pub fn set_worker_stopped(&self, name: &str) {
        self.inner.lock().set_worker_stopped(name)
    }

    pub fn set_clock_master_started(&self, x: &C) {
        self.inner.lock().set_clock_master_started(x)
    }

    pub fn set_clock_master_stopped(&self, x: &C) {
        self.inner.lock().set_clock_master_stopped(x)
    }

    pub fn is_live(&self, obj: &Entity<C>, kind: NodeKind) -> bool {
        self.inner.lock().is_live(obj, kind)
    }

    pub fn has_node(&self, obj: &Entity<C>, kind: NodeKind) -> bool {
        self.inner.lock().has_node(obj, kind)
    }

    /// Takes the lock once and returns the startable set computed against a
    /// single consistent snapshot of the graph.
    pub fn what_should_be_started(&self) -> Vec<DgVertex<C>> {
        what_should_be_started(&self.inner.lock())
    }
}

impl<C: Component> Default for SharedDependencyGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

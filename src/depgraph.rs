//! Dependency Graph (DG) - the streaming manager's lifecycle rules layered
//! over the typed DAG.
//!
//! This module owns the liveness map and the operations that correspond to
//! control-plane events: attaching workers, wiring the fixed intra-component
//! edges, appointing clock masters, and inferring feeder -> eater edges from
//! flow configuration.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::component::{feeder_name, normalize_source, Component};
use crate::error::{DepGraphError, DepGraphResult};
use crate::kind::NodeKind;
use crate::tdag::{TypedDag, Vertex as TdagVertex};

/// A vertex object: either a worker (identified by name) or a component
/// handle. This is the `Obj` the typed DAG is instantiated over.
#[derive(Clone, Debug)]
pub enum Entity<C: Component> {
    Worker(String),
    Component(C),
}

impl<C: Component> Entity<C> {
    pub fn as_component(&self) -> Option<&C> {
        match self {
            Entity::Component(c) => Some(c),
            Entity::Worker(_) => None,
        }
    }
}

impl<C: Component> PartialEq for Entity<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Entity::Worker(a), Entity::Worker(b)) => a == b,
            (Entity::Component(a), Entity::Component(b)) => a == b,
            _ => false,
        }
    }
}

impl<C: Component> Eq for Entity<C> {}

impl<C: Component> Hash for Entity<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Entity::Worker(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            Entity::Component(c) => {
                1u8.hash(state);
                c.hash(state);
            }
        }
    }
}

/// A `(object, kind)` vertex specialized to this domain's object type.
pub type DgVertex<C> = TdagVertex<Entity<C>>;

/// The dependency graph: a typed DAG plus a liveness flag per vertex.
pub struct DependencyGraph<C: Component> {
    dag: TypedDag<Entity<C>>,
    liveness: HashMap<DgVertex<C>, bool>,
    by_name: HashMap<String, C>,
}

impl<C: Component> DependencyGraph<C> {
    pub fn new() -> Self {
        Self {
            dag: TypedDag::new(),
            liveness: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Idempotently registers a worker.
    pub fn add_worker(&mut self, name: impl Into<String>) -> DepGraphResult<(), Entity<C>> {
        let name = name.into();
        let obj = Entity::Worker(name.clone());
        if self.dag.has_node(&obj, NodeKind::Worker) {
            return Ok(());
        }
        self.dag.add_node(obj.clone(), NodeKind::Worker)?;
        self.liveness.insert((obj, NodeKind::Worker), false);
        tracing::debug!(worker = %name, "worker added");
        Ok(())
    }

    /// Creates the `JOB`, `COMPONENTSETUP` and `COMPONENTSTART` vertices for
    /// `x`, wires the two fixed intra-component edges, and attaches the
    /// requested worker if one was given.
    pub fn add_component(&mut self, x: C) -> DepGraphResult<(), Entity<C>> {
        let obj = Entity::Component(x.clone());
        for kind in [NodeKind::Job, NodeKind::ComponentSetup, NodeKind::ComponentStart] {
            if self.dag.has_node(&obj, kind) {
                return Err(DepGraphError::AlreadyExists { obj, kind });
            }
        }

        self.dag.add_node(obj.clone(), NodeKind::Job)?;
        self.dag.add_node(obj.clone(), NodeKind::ComponentSetup)?;
        self.dag.add_node(obj.clone(), NodeKind::ComponentStart)?;
        self.liveness.insert((obj.clone(), NodeKind::Job), false);
        self.liveness.insert((obj.clone(), NodeKind::ComponentSetup), false);
        self.liveness.insert((obj.clone(), NodeKind::ComponentStart), false);

        self.dag
            .add_edge(obj.clone(), obj.clone(), NodeKind::Job, NodeKind::ComponentSetup)?;
        self.dag
            .add_edge(obj.clone(), obj.clone(), NodeKind::ComponentSetup, NodeKind::ComponentStart)?;

        self.by_name.insert(x.name().to_string(), x.clone());
        tracing::debug!(component = ?x, "component added");

        if let Some(worker) = x.worker_requested().filter(|w| !w.is_empty()) {
            let worker = worker.to_string();
            self.add_worker(worker.clone())?;
            self.set_component_worker(&x, &worker)?;
        }
        Ok(())
    }

    /// Removes every vertex keyed on `x` that currently exists, along with
    /// its liveness entry. Idempotent with respect to absent kinds.
    pub fn remove_component(&mut self, x: &C) {
        let obj = Entity::Component(x.clone());
        for kind in NodeKind::ALL {
            if self.dag.has_node(&obj, kind) {
                let _ = self.dag.remove_node(&obj, kind);
                self.liveness.remove(&(obj.clone(), kind));
            }
        }
        self.by_name.remove(x.name());
        tracing::info!(component = ?x, "component removed");
    }

    /// Removes a worker. Fails if the worker still has attached descendants
    /// (its job was never removed) - workers outlive their jobs in the
    /// nominal order.
    pub fn remove_worker(&mut self, name: &str) -> DepGraphResult<(), Entity<C>> {
        let obj = Entity::Worker(name.to_string());
        if !self.dag.has_node(&obj, NodeKind::Worker) {
            return Err(DepGraphError::NotFound { obj, kind: NodeKind::Worker });
        }
        if !self.dag.offspring(&obj, NodeKind::Worker).is_empty() {
            return Err(DepGraphError::InUse { obj, kind: NodeKind::Worker });
        }
        self.dag.remove_node(&obj, NodeKind::Worker)?;
        self.liveness.remove(&(obj, NodeKind::Worker));
        tracing::info!(worker = %name, "worker removed");
        Ok(())
    }

    /// Assigns `x` to `worker`. A component may be re-assigned only after
    /// the existing worker edge has been removed.
    pub fn set_component_worker(&mut self, x: &C, worker: &str) -> DepGraphResult<(), Entity<C>> {
        let w = Entity::Worker(worker.to_string());
        let c = Entity::Component(x.clone());
        if !self.dag.has_node(&w, NodeKind::Worker) {
            return Err(DepGraphError::NotFound { obj: w, kind: NodeKind::Worker });
        }
        if !self.dag.has_node(&c, NodeKind::Job) {
            return Err(DepGraphError::NotFound { obj: c, kind: NodeKind::Job });
        }
        self.dag.add_edge(w, c, NodeKind::Worker, NodeKind::Job)?;
        tracing::debug!(component = ?x, worker, "component assigned to worker");
        Ok(())
    }

    /// Appoints `x` as clock master for its flow. Requires `(x, JOB)` to
    /// exist. Every existing `COMPONENTSTART` vertex sharing `x.parent()`
    /// becomes dependent on the new clock master.
    pub fn add_clock_master(&mut self, x: &C) -> DepGraphResult<(), Entity<C>> {
        let c = Entity::Component(x.clone());
        if !self.dag.has_node(&c, NodeKind::Job) {
            return Err(DepGraphError::PreconditionFailed { obj: c, kind: NodeKind::Job });
        }

        self.dag.add_node(c.clone(), NodeKind::ClockMaster)?;
        self.liveness.insert((c.clone(), NodeKind::ClockMaster), false);
        self.dag
            .add_edge(c.clone(), c.clone(), NodeKind::ComponentSetup, NodeKind::ClockMaster)?;

        for entity in self.dag.nodes_by_kind(NodeKind::ComponentStart) {
            if let Some(y) = entity.as_component() {
                if y.parent() == x.parent() {
                    self.dag
                        .add_edge(c.clone(), entity.clone(), NodeKind::ClockMaster, NodeKind::ComponentStart)?;
                }
            }
        }
        tracing::info!(component = ?x, "clock master appointed");
        Ok(())
    }

    /// One-shot topology inference: for every known `COMPONENTSETUP` vertex
    /// whose component declares `source` entries, locates the named feeder
    /// among known components and wires both the setup and start edges.
    /// Idempotent - a second call adds no edges and returns success.
    pub fn map_eaters_to_feeders(&mut self) -> DepGraphResult<(), Entity<C>> {
        let eaters: Vec<C> = self
            .dag
            .nodes_by_kind(NodeKind::ComponentSetup)
            .into_iter()
            .filter_map(|e| e.as_component().cloned())
            .collect();

        for eater in &eaters {
            for entry in normalize_source(&eater.source()) {
                let feeder = self
                    .by_name
                    .get(feeder_name(&entry))
                    .cloned()
                    .ok_or_else(|| DepGraphError::Unresolved { entry: entry.clone() })?;

                self.add_edge_idempotent(
                    Entity::Component(feeder.clone()),
                    Entity::Component(eater.clone()),
                    NodeKind::ComponentSetup,
                    NodeKind::ComponentSetup,
                )?;
                self.add_edge_idempotent(
                    Entity::Component(feeder),
                    Entity::Component(eater.clone()),
                    NodeKind::ComponentStart,
                    NodeKind::ComponentStart,
                )?;
            }
        }
        tracing::debug!(eaters = eaters.len(), "eaters mapped to feeders");
        Ok(())
    }

    fn add_edge_idempotent(
        &mut self,
        parent: Entity<C>,
        child: Entity<C>,
        parent_kind: NodeKind,
        child_kind: NodeKind,
    ) -> DepGraphResult<(), Entity<C>> {
        match self.dag.add_edge(parent, child, parent_kind, child_kind) {
            Ok(()) => Ok(()),
            Err(DepGraphError::EdgeAlreadyExists { .. }) => Ok(()),
            Err(other) => Err(other),
        }
    }

    /// Sets `(obj, kind)`'s liveness and, if set to `false`, cascades the
    /// invalidation to every descendant sharing the same `obj` (not every
    /// descendant - a feeder going down does not retroactively un-setup its
    /// eaters; the scheduler is what refuses to restart them).
    fn set_state(&mut self, obj: Entity<C>, kind: NodeKind, value: bool) {
        self.liveness.insert((obj.clone(), kind), value);
        tracing::debug!(obj = ?obj, kind = %kind, value, "liveness set");
        if !value {
            for (kid_obj, kid_kind) in self.dag.offspring(&obj, kind) {
                if kid_obj == obj {
                    tracing::debug!(obj = ?kid_obj, kind = %kid_kind, "descendant invalidated");
                    self.liveness.insert((kid_obj, kid_kind), false);
                }
            }
        }
    }

    pub fn set_component_started(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ComponentStart, true);
    }

    pub fn set_component_not_started(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ComponentStart, false);
    }

    pub fn set_component_setup(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ComponentSetup, true);
    }

    pub fn set_component_not_setup(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ComponentSetup, false);
    }

    pub fn set_job_started(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::Job, true);
    }

    pub fn set_job_stopped(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::Job, false);
    }

    pub fn set_worker_started(&mut self, name: &str) {
        self.set_state(Entity::Worker(name.to_string()), NodeKind::Worker, true);
    }

    pub fn set_worker_stopped(&mut self, name: &str) {
        self.set_state(Entity::Worker(name.to_string()), NodeKind::Worker, false);
    }

    pub fn set_clock_master_started(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ClockMaster, true);
    }

    pub fn set_clock_master_stopped(&mut self, x: &C) {
        self.set_state(Entity::Component(x.clone()), NodeKind::ClockMaster, false);
    }

    pub fn has_node(&self, obj: &Entity<C>, kind: NodeKind) -> bool {
        self.dag.has_node(obj, kind)
    }

    pub fn is_live(&self, obj: &Entity<C>, kind: NodeKind) -> bool {
        *self.liveness.get(&(obj.clone(), kind)).unwrap_or(&false)
    }

    pub fn offspring(&self, obj: &Entity<C>, kind: NodeKind) -> HashSet<DgVertex<C>> {
        self.dag.offspring(obj, kind)
    }

    pub fn sort(&self) -> Vec<DgVertex<C>> {
        self.dag.sort()
    }
}

impl<C: Component> Default for DependencyGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> fmt::Debug for DependencyGraph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("vertices", &self.liveness.len())
            .finish()
    }
}

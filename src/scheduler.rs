//! Scheduler - projects the dependency graph into a pruned, ordered "ready
//! set" of vertices that should be started next.

use std::collections::HashSet;

use crate::component::Component;
use crate::depgraph::{DependencyGraph, DgVertex};
use crate::kind::NodeKind;

/// The scheduler's contract: a single read operation over the graph.
pub trait SchedulerTrait<C: Component> {
    /// Returns an ordered sequence of vertices that should be brought up
    /// next - not yet live and with all prerequisites live.
    fn what_should_be_started(&self, graph: &DependencyGraph<C>) -> Vec<DgVertex<C>>;
}

/// Default scheduler: Kahn's-algorithm topological order plus the gating
/// prune passes described by the core algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Scheduler
    }
}

impl<C: Component> SchedulerTrait<C> for Scheduler {
    fn what_should_be_started(&self, graph: &DependencyGraph<C>) -> Vec<DgVertex<C>> {
        what_should_be_started(graph)
    }
}

/// The node kinds whose falseness gates their *whole* downstream subtree out
/// of the ready set, rather than merely ordering it later. These are the
/// three implicit stages of the fixed `WORKER -> JOB -> COMPONENTSETUP ->
/// COMPONENTSTART` chain that the manager itself drives to completion before
/// anything further downstream is even candidate work - as opposed to
/// `CLOCKMASTER`, a cross-component prerequisite the scheduler only orders,
/// never excludes on (spec section 9: clock master gating is advisory, the
/// caller is trusted to follow the returned order).
const GATING_KINDS: [NodeKind; 3] = [NodeKind::Worker, NodeKind::Job, NodeKind::ComponentSetup];

/// Free-function form of [`SchedulerTrait::what_should_be_started`], used
/// directly by the [`crate::sync`] wrapper and by callers that don't need
/// the trait indirection.
///
/// Algorithm (spec section 4.3):
/// 1. `L = sort()` - the full topological order.
/// 2. Drop every vertex whose liveness is already `true`.
/// 3. For every [`GATING_KINDS`] vertex that is `false`, drop its
///    *descendants* - the vertex itself stays, since it is exactly what
///    should be started next. Worker and job vertices can't start without
///    their own prerequisite attaching externally; a component that hasn't
///    finished setup can't have anything downstream of it (its own start,
///    or an eater fed by it) running yet either.
pub fn what_should_be_started<C: Component>(graph: &DependencyGraph<C>) -> Vec<DgVertex<C>> {
    let mut to_start: Vec<DgVertex<C>> = graph
        .sort()
        .into_iter()
        .filter(|(obj, kind)| !graph.is_live(obj, *kind))
        .collect();

    let mut dropped: HashSet<DgVertex<C>> = HashSet::new();
    for gating_kind in GATING_KINDS {
        for (obj, kind) in to_start.iter() {
            if *kind == gating_kind {
                dropped.extend(graph.offspring(obj, *kind));
            }
        }
    }
    to_start.retain(|v| !dropped.contains(v));

    tracing::debug!(count = to_start.len(), "computed startable set");
    to_start
}

//! End-to-end scenarios against the public crate API only (no internal
//! module access) - the crate-boundary companion to the unit tests embedded
//! in `src/depgraph.rs` and `src/scheduler.rs`.

use depgraph::{what_should_be_started, Component, DependencyGraph, DepGraphError, Entity, NodeKind, SourceSpec};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Comp {
    name: &'static str,
    parent: &'static str,
    worker_requested: Option<&'static str>,
    source: SourceSpec,
}

impl Comp {
    fn new(name: &'static str, parent: &'static str) -> Self {
        Self { name, parent, worker_requested: None, source: SourceSpec::Empty }
    }
    fn on(mut self, worker: &'static str) -> Self {
        self.worker_requested = Some(worker);
        self
    }
    fn fed_by(mut self, sources: &[&str]) -> Self {
        self.source = SourceSpec::Many(sources.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl Component for Comp {
    type Flow = &'static str;
    fn name(&self) -> &str {
        self.name
    }
    fn parent(&self) -> &Self::Flow {
        &self.parent
    }
    fn worker_requested(&self) -> Option<&str> {
        self.worker_requested
    }
    fn source(&self) -> SourceSpec {
        self.source.clone()
    }
}

fn pos(v: &[(Entity<Comp>, NodeKind)], obj: &Entity<Comp>, kind: NodeKind) -> usize {
    v.iter().position(|(o, k)| o == obj && *k == kind).expect("vertex present")
}

/// S1: minimal start sequence, one vertex unlocked at a time.
#[test]
fn s1_minimal_start() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let a = Comp::new("a", "f1").on("w1");
    g.add_component(a.clone()).unwrap();

    assert_eq!(
        what_should_be_started(&g),
        vec![(Entity::Worker("w1".into()), NodeKind::Worker)]
    );

    g.set_worker_started("w1");
    assert_eq!(
        what_should_be_started(&g),
        vec![(Entity::Component(a.clone()), NodeKind::Job)]
    );

    g.set_job_started(&a);
    assert_eq!(
        what_should_be_started(&g),
        vec![(Entity::Component(a.clone()), NodeKind::ComponentSetup)]
    );

    g.set_component_setup(&a);
    assert_eq!(
        what_should_be_started(&g),
        vec![(Entity::Component(a), NodeKind::ComponentStart)]
    );
}

/// S2: a feeder's start precedes its eater's setup in the ready order.
#[test]
fn s2_feeder_precedes_eater() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let src = Comp::new("src", "f1").on("w1");
    let snk = Comp::new("snk", "f1").on("w1").fed_by(&["src"]);
    g.add_component(src.clone()).unwrap();
    g.add_component(snk.clone()).unwrap();
    g.map_eaters_to_feeders().unwrap();

    g.set_worker_started("w1");
    g.set_job_started(&src);
    g.set_job_started(&snk);
    g.set_component_setup(&src);

    let ready = what_should_be_started(&g);
    let src_start = (Entity::Component(src), NodeKind::ComponentStart);
    let snk_setup = (Entity::Component(snk), NodeKind::ComponentSetup);
    assert!(pos(&ready, &src_start.0, src_start.1) < pos(&ready, &snk_setup.0, snk_setup.1));
}

/// S3: a clock master's vertex precedes every COMPONENTSTART in its flow.
#[test]
fn s3_clock_master_gates_starts() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let src = Comp::new("src", "f1").on("w1");
    let snk = Comp::new("snk", "f1").on("w1");
    g.add_component(src.clone()).unwrap();
    g.add_component(snk.clone()).unwrap();
    g.add_clock_master(&src).unwrap();

    g.set_worker_started("w1");
    g.set_job_started(&src);
    g.set_job_started(&snk);
    g.set_component_setup(&src);
    g.set_component_setup(&snk);

    let ready = what_should_be_started(&g);
    let cm = (Entity::Component(src.clone()), NodeKind::ClockMaster);
    assert!(pos(&ready, &cm.0, cm.1) < pos(&ready, &Entity::Component(src), NodeKind::ComponentStart));
    assert!(pos(&ready, &cm.0, cm.1) < pos(&ready, &Entity::Component(snk), NodeKind::ComponentStart));
}

/// S4: a worker going down pulls its own not-yet-live components out of the
/// ready set; components on other workers are unaffected.
#[test]
fn s4_worker_down_only_affects_its_own_workers_components() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let a = Comp::new("a", "f1").on("w1");
    let b = Comp::new("b", "f2").on("w2");
    g.add_component(a.clone()).unwrap();
    g.add_component(b.clone()).unwrap();
    g.set_worker_started("w1");
    g.set_worker_started("w2");

    g.set_worker_stopped("w1");

    let ready = what_should_be_started(&g);
    assert!(ready.contains(&(Entity::Worker("w1".into()), NodeKind::Worker)));
    assert!(!ready.iter().any(|(o, k)| *o == Entity::Component(a.clone()) && *k == NodeKind::Job));
    assert!(ready.iter().any(|(o, k)| *o == Entity::Component(b.clone()) && *k == NodeKind::Job));
}

/// S5: an unresolved source entry fails the whole call and leaves no edges.
#[test]
fn s5_unresolved_eater_fails_without_side_effects() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let snk = Comp::new("snk", "f1").fed_by(&["ghost"]);
    g.add_component(snk.clone()).unwrap();

    let err = g.map_eaters_to_feeders().unwrap_err();
    match err {
        DepGraphError::Unresolved { entry } => assert_eq!(entry, "ghost"),
        other => panic!("expected Unresolved, got {other:?}"),
    }
    assert!(g.offspring(&Entity::Component(snk), NodeKind::ComponentSetup).is_empty());
}

/// S6: a mutual source dependency is rejected as a cycle on the second edge,
/// and the first (accepted) edge's liveness is left untouched.
#[test]
fn s6_mutual_source_is_rejected_as_a_cycle() {
    let mut g: DependencyGraph<Comp> = DependencyGraph::new();
    let a = Comp::new("a", "f1").fed_by(&["b"]);
    let b = Comp::new("b", "f1").fed_by(&["a"]);
    g.add_component(a.clone()).unwrap();
    g.add_component(b.clone()).unwrap();

    let err = g.map_eaters_to_feeders().unwrap_err();
    assert!(matches!(err, DepGraphError::WouldCycle { .. }));

    // neither component's liveness was touched by the failed call
    assert!(!g.is_live(&Entity::Component(a), NodeKind::ComponentSetup));
    assert!(!g.is_live(&Entity::Component(b), NodeKind::ComponentSetup));
}

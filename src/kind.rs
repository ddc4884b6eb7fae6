//! Node kinds - the closed set of lifecycle checkpoints a vertex can occupy.

use std::fmt;

/// The five lifecycle checkpoints tracked by the dependency graph.
///
/// Ordering here is simple declaration order and is not otherwise
/// meaningful (it is not, for instance, a priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// A worker machine is known to the manager.
    Worker,
    /// A component process slot is allocated on its worker.
    Job,
    /// A component has completed its setup handshake.
    ComponentSetup,
    /// A component has been appointed clock master for its flow.
    ClockMaster,
    /// A component has reached the running state.
    ComponentStart,
}

impl NodeKind {
    /// All kinds, in declaration order. Useful for "remove every vertex keyed
    /// on x" style sweeps (see `DependencyGraph::remove_component`).
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Worker,
        NodeKind::Job,
        NodeKind::ComponentSetup,
        NodeKind::ClockMaster,
        NodeKind::ComponentStart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Worker => "WORKER",
            NodeKind::Job => "JOB",
            NodeKind::ComponentSetup => "COMPONENTSETUP",
            NodeKind::ClockMaster => "CLOCKMASTER",
            NodeKind::ComponentStart => "COMPONENTSTART",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in NodeKind::ALL {
            assert!(seen.insert(kind), "{kind} listed twice in ALL");
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn display_matches_spec_names() {
        assert_eq!(NodeKind::Worker.to_string(), "WORKER");
        assert_eq!(NodeKind::ComponentStart.to_string(), "COMPONENTSTART");
    }
}

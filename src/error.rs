//! Error types for the dependency graph engine.
//!
//! All errors are variants of [`DepGraphError`]. Error codes follow a small
//! stable registry (`DG-0xx`) so callers can match on `.code()` without
//! depending on `Debug`/`Display` wording.

use std::fmt;
use thiserror::Error;

use crate::kind::NodeKind;

/// Result type alias for dependency graph operations.
pub type DepGraphResult<T, Obj> = Result<T, DepGraphError<Obj>>;

/// Errors surfaced by the typed DAG and dependency graph layers.
///
/// Generic over `Obj` (the vertex object identity) so the offending
/// identifier can be reported without forcing every caller through a
/// string conversion.
#[derive(Error, Debug)]
pub enum DepGraphError<Obj: fmt::Debug> {
    /// DG-001: a vertex or edge being added is already present.
    #[error("DG-001 AlreadyExists: ({obj:?}, {kind}) already present")]
    AlreadyExists { obj: Obj, kind: NodeKind },

    /// DG-001: the exact labeled edge being added is already present.
    #[error(
        "DG-001 AlreadyExists: edge ({parent_obj:?}, {parent_kind}) -> ({child_obj:?}, {child_kind}) already present"
    )]
    EdgeAlreadyExists {
        parent_obj: Obj,
        parent_kind: NodeKind,
        child_obj: Obj,
        child_kind: NodeKind,
    },

    /// DG-002: a vertex or edge referenced by an operation is absent.
    #[error("DG-002 NotFound: ({obj:?}, {kind}) not present")]
    NotFound { obj: Obj, kind: NodeKind },

    /// DG-002: the exact edge requested for removal is absent.
    #[error(
        "DG-002 NotFound: edge ({parent_obj:?}, {parent_kind}) -> ({child_obj:?}, {child_kind}) not present"
    )]
    EdgeNotFound {
        parent_obj: Obj,
        parent_kind: NodeKind,
        child_obj: Obj,
        child_kind: NodeKind,
    },

    /// DG-003: adding this edge would close a cycle.
    #[error(
        "DG-003 WouldCycle: edge ({parent_obj:?}, {parent_kind}) -> ({child_obj:?}, {child_kind}) would close a cycle"
    )]
    WouldCycle {
        parent_obj: Obj,
        parent_kind: NodeKind,
        child_obj: Obj,
        child_kind: NodeKind,
    },

    /// DG-004: a removal was refused because dependents still exist.
    #[error("DG-004 InUse: ({obj:?}, {kind}) still has dependents")]
    InUse { obj: Obj, kind: NodeKind },

    /// DG-005: `map_eaters_to_feeders` could not find a feeder for a
    /// declared source entry.
    #[error("DG-005 Unresolved: no feeder component named {entry:?}")]
    Unresolved { entry: String },

    /// DG-006: an operation's precondition vertex is missing.
    #[error("DG-006 PreconditionFailed: ({obj:?}, {kind}) required but absent")]
    PreconditionFailed { obj: Obj, kind: NodeKind },
}

impl<Obj: fmt::Debug> DepGraphError<Obj> {
    /// Returns the stable error code string (e.g. `"DG-001"`).
    pub fn code(&self) -> &'static str {
        match self {
            DepGraphError::AlreadyExists { .. } => "DG-001",
            DepGraphError::EdgeAlreadyExists { .. } => "DG-001",
            DepGraphError::NotFound { .. } => "DG-002",
            DepGraphError::EdgeNotFound { .. } => "DG-002",
            DepGraphError::WouldCycle { .. } => "DG-003",
            DepGraphError::InUse { .. } => "DG-004",
            DepGraphError::Unresolved { .. } => "DG-005",
            DepGraphError::PreconditionFailed { .. } => "DG-006",
        }
    }
}

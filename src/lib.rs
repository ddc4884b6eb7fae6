//! Dependency graph and startup scheduler for a streaming-media cluster
//! manager.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │     Component       │  embedder-supplied handle (name/parent/worker/source)
//! └──────────┬───────────┘
//!            │ implements Component
//! ┌──────────▼───────────┐     ┌────────────────────┐
//! │   DependencyGraph     │────▶│     Scheduler       │
//! │ (liveness + lifecycle │     │ what_should_be_     │
//! │  operations, DG-0xx)  │     │ started(): ordered  │
//! └──────────┬───────────┘     │ ready set            │
//!            │ layered over     └────────────────────┘
//! ┌──────────▼───────────┐
//! │      TypedDag         │  (object, kind) vertices, Kahn's-algorithm sort
//! └───────────────────────┘
//! ```
//!
//! A [`DependencyGraph`] tracks five lifecycle checkpoints per component
//! ([`NodeKind`]) over a [`TypedDag`], and a single liveness bit per vertex.
//! Mutating that liveness - a worker connecting, a component finishing
//! setup - never itself decides what runs next; [`scheduler::what_should_be_started`]
//! is the sole place that turns graph state into an ordered action list.
//!
//! The optional [`sync`] module wraps a [`DependencyGraph`] behind a single
//! mutex for callers that mutate it from more than one task.

pub mod component;
pub mod depgraph;
pub mod error;
pub mod kind;
pub mod scheduler;
pub mod sync;
pub mod tdag;

pub use component::{feeder_name, normalize_source, Component, SourceSpec};
pub use depgraph::{DependencyGraph, DgVertex, Entity};
pub use error::{DepGraphError, DepGraphResult};
pub use kind::NodeKind;
pub use scheduler::{what_should_be_started, Scheduler, SchedulerTrait};
pub use sync::SharedDependencyGraph;
pub use tdag::{TypedDag, Vertex};

//! The component handle contract (spec section 6).
//!
//! The dependency graph only ever touches a handle through this trait: a
//! read-only `name`, an opaque `parent` flow identifier, an optional
//! requested worker, and a `source` list used to infer feeder -> eater
//! wiring. The trait is the crate's only inbound dependency; everything
//! else - the RPC control plane, config parsing, persistence - lives outside
//! this crate and is reached only through handles that implement it.

use std::fmt::Debug;
use std::hash::Hash;

/// The normalized shape of a component's `config.source` field.
///
/// Config layers sometimes hand back a single string and sometimes a list
/// (see spec section 9); this type lets `Component::source` report either
/// shape honestly, and [`normalize_source`] flattens it once at the
/// boundary instead of letting the variance leak into `map_eaters_to_feeders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// No `source` entry in the component's config.
    Empty,
    /// A single `name` or `name:feed` entry.
    Single(String),
    /// A list of `name` or `name:feed` entries.
    Many(Vec<String>),
}

/// Flattens a [`SourceSpec`] into the list of raw source entries.
pub fn normalize_source(spec: &SourceSpec) -> Vec<String> {
    match spec {
        SourceSpec::Empty => Vec::new(),
        SourceSpec::Single(entry) => vec![entry.clone()],
        SourceSpec::Many(entries) => entries.clone(),
    }
}

/// Splits a `name` or `name:feed` source entry and returns the feeder
/// component's name.
pub fn feeder_name(entry: &str) -> &str {
    entry.split(':').next().unwrap_or(entry)
}

/// The read-only contract the dependency graph needs from a component
/// handle. Implementors are free to be cheap, `Clone`-able references
/// (an `Arc`, an id newtype, ...) into whatever the embedding application
/// actually stores.
pub trait Component: Clone + Eq + Hash + Debug {
    /// The opaque, equality-comparable flow identifier. Components sharing
    /// a `Flow` share a clock and are candidates for feeder/eater wiring.
    type Flow: Clone + Eq + Debug;

    /// Unique within a flow.
    fn name(&self) -> &str;

    /// The enclosing flow.
    fn parent(&self) -> &Self::Flow;

    /// The worker this component was requested to run on, if any. An empty
    /// string is treated the same as `None`.
    fn worker_requested(&self) -> Option<&str>;

    /// The component's `config.source` entries, in their as-configured shape.
    fn source(&self) -> SourceSpec;
}

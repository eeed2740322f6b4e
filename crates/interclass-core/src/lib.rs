//! Interclass Core: connectivity statistics between overlapping entity classes.
//!
//! This crate contains the statistics engine: the class registry, the
//! interaction network, the entity → class reverse index, the single-sweep
//! connection counter, the table builders and their exporters.

pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod output;
pub mod phases;
pub mod pipeline;

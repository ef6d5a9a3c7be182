//! Core types, type graph, and configuration for sagaguard.
//!
//! This crate provides the data model shared by all sagaguard crates:
//! - [`types`]: Declarations, marker instances, argument values, spans, errors
//! - [`graph`]: The immutable [`TypeGraph`](graph::TypeGraph) snapshot
//! - [`capability`]: Transitive capability and base-type resolution
//! - [`config`]: Configuration loading from `.sagaguard/sagaguard.json`

pub mod capability;
pub mod config;
pub mod graph;
pub mod types;

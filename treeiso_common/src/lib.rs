//! Common utilities and shared types for the treeiso workspace.
//!
//! This crate provides the host/query graph model, edge-list persistence,
//! random graph generators and search configuration used across the
//! treeiso project.

mod config;
mod error;

pub mod edgelist;
pub mod generate;
pub mod graph;

pub use crate::config::*;
pub use crate::error::GraphError;
pub use crate::graph::{Graph, GraphNodeIdx, NodeLabel};

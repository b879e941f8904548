//! Core database trait for diagram data storage
//!
//! A database owns the nodes and edges of one diagram and answers lookups by
//! node identifier.

use anyhow::Result;

/// Storage layer for a diagram's nodes and edges
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node; fails if its identifier is already taken
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge; fails if it refers to nodes this database does not hold
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Remove all nodes and edges
    fn clear(&mut self);

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

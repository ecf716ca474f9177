//! Core database trait for diagram data storage
//!
//! A database is the canonical in-memory form of one parsed diagram.
//! Parsers fill it through the concrete model type; renderers read it
//! through this trait.

/// Core trait for diagram databases
///
/// Each diagram type stores its own node (class) and edge (relationship)
/// types. Implementations must keep insertion order: renderers iterate
/// `nodes()` and `edges()` and expect declaration order back.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}

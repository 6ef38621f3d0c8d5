//! Turning a flat process snapshot into a filtered, printable tree.
//!
//! [`graph`] links processes to their parents and children, [`filter`] picks the processes
//! to print along with their lineage, [`columns`] sizes the columns, and [`render`] lays
//! out and prints the tree.

pub mod columns;
pub mod filter;
pub mod graph;
pub mod render;

pub use filter::{Filters, Selection, select};
pub use graph::{GraphBuilder, LISTING_PROGRAM, ProcessGraph, SkipAnchor};
pub use render::{TreeLine, TreeRenderer};

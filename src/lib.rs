//! # hnsw-core
//!
//! A multilayer proximity-graph (HNSW) index for approximate nearest
//! neighbor search, built from scratch.
//!
//! This crate provides:
//! - A `Vector` type (id + coordinates)
//! - Distance metrics (Euclidean, cosine similarity)
//! - A `Node` type for graph vertices with per-layer neighbor lists
//! - A greedy best-first layer-search kernel shared by insertion and query
//! - An `HnswIndex` with `insert`/`search`
//!
//! Persistence, a server/CLI surface, deletion, and concurrency wrappers are
//! out of scope for this core.
//!
//! ## Example
//!
//! ```rust
//! use hnsw_core::{HnswIndex, Vector, SearchRequest};
//!
//! let mut index = HnswIndex::new_index(16, 1.0 / (16f64).ln()).unwrap();
//! index.insert(Vector::new(0, vec![1.0, 2.0, 3.0])).unwrap();
//! index.insert(Vector::new(1, vec![1.1, 2.1, 3.1])).unwrap();
//!
//! let query = Vector::new(2, vec![1.05, 2.05, 3.05]);
//! let request = SearchRequest::new(query, 1).unwrap();
//! let results = index.search(&request).unwrap();
//! ```

pub mod error;
pub mod hnsw;
pub mod metrics;
pub mod node;
pub mod search;
pub mod vector;

pub use error::{HnswError, Result};
pub use hnsw::{HnswIndex, HnswParams};
pub use node::Node;
pub use search::{SearchRequest, SearchResult};
pub use vector::Vector;

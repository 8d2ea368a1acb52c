//! HNSW (Hierarchical Navigable Small World) index module.

mod graph;
mod neighbor_queue;

pub use graph::HnswParams;

use crate::error::Result;
use crate::search::{SearchRequest, SearchResult};
use crate::vector::Vector;
use graph::HnswGraph;

/// The HNSW index (§2 item 5): owns every `Node`, tracks the entry point and
/// maximum layer, and orchestrates `insert`/`search` through the layer-search
/// kernel in `graph`.
#[derive(Debug)]
pub struct HnswIndex {
    graph: HnswGraph,
}

impl HnswIndex {
    /// `new_index(M, m_L)` from §6. Validates `M >= 2` and `m_L > 0`.
    pub fn new_index(m: usize, m_l: f64) -> Result<Self> {
        Ok(Self {
            graph: HnswGraph::new(HnswParams::new(m, m_l)?),
        })
    }

    /// Same as `new_index`, but with a fixed RNG seed for reproducible runs.
    pub fn new_index_with_seed(m: usize, m_l: f64, seed: u64) -> Result<Self> {
        Ok(Self {
            graph: HnswGraph::with_seed(HnswParams::new(m, m_l)?, seed),
        })
    }

    /// Insert a vector. Fails if its id is already present (§4.6); on
    /// failure, the index is left unchanged.
    pub fn insert(&mut self, vector: Vector) -> Result<()> {
        self.graph.insert(vector)
    }

    /// Run a top-k query (§4.8).
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let results = self.graph.search(request.query(), request.top_k())?;
        Ok(results
            .into_iter()
            .map(|n| SearchResult::new(n.id, n.distance))
            .collect())
    }

    pub fn size(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.graph.contains(id)
    }

    pub fn get_vector(&self, id: usize) -> Option<&Vector> {
        self.graph.get_vector(id)
    }

    pub fn entry_point(&self) -> Option<usize> {
        self.graph.entry_point()
    }

    pub fn max_level(&self) -> usize {
        self.graph.max_level()
    }
}

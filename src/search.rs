//! Query request/result types for the public search API.

use crate::error::{HnswError, Result};
use crate::vector::Vector;
use std::cmp::Ordering;

/// A top-k nearest-neighbor query against the index.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    query: Vector,
    top_k: usize,
    max_search_depth: usize,
}

impl SearchRequest {
    /// Construct a request with the default (unbounded) search depth.
    pub fn new(query: Vector, top_k: usize) -> Result<Self> {
        Self::with_max_search_depth(query, top_k, usize::MAX)
    }

    /// Construct a request with an explicit `max_search_depth`.
    ///
    /// `max_search_depth` is validated but, per §5/§9, not consulted by the
    /// search kernel — this matches the source's reference behavior.
    pub fn with_max_search_depth(
        query: Vector,
        top_k: usize,
        max_search_depth: usize,
    ) -> Result<Self> {
        if top_k == 0 {
            return Err(HnswError::InvalidArgument {
                reason: "top_k must be positive".to_string(),
            });
        }
        if max_search_depth == 0 {
            return Err(HnswError::InvalidArgument {
                reason: "max_search_depth must be positive".to_string(),
            });
        }

        Ok(Self {
            query,
            top_k,
            max_search_depth,
        })
    }

    pub fn query(&self) -> &Vector {
        &self.query
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn max_search_depth(&self) -> usize {
        self.max_search_depth
    }
}

/// One hit from a `search` call: an id and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub id: usize,
    pub distance: f32,
}

impl SearchResult {
    pub fn new(id: usize, distance: f32) -> Self {
        Self { id, distance }
    }
}

impl Eq for SearchResult {}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.id.cmp(&other.id))
    }
}

//! Vector type: an immutable id + coordinate sequence.

use crate::error::Result;
use crate::metrics;

/// An immutable vector: an integer identifier plus a defensively-copied
/// coordinate sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    id: usize,
    data: Vec<f32>,
}

impl Vector {
    /// Construct a vector from an id and coordinate data. `data` is copied;
    /// later mutation of the caller's buffer never affects this vector.
    pub fn new(id: usize, data: Vec<f32>) -> Self {
        Self { id, data }
    }

    /// The vector's identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The vector's dimension.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// An immutable view of the coordinate data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// A defensive copy of the coordinate data.
    pub fn data_copy(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Euclidean distance to another vector.
    pub fn distance(&self, other: &Vector) -> Result<f32> {
        metrics::distance(&self.data, &other.data)
    }

    /// Cosine similarity to another vector.
    pub fn cosine_similarity(&self, other: &Vector) -> Result<f32> {
        metrics::cosine_similarity(&self.data, &other.data)
    }
}

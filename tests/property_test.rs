//! Property-based checks for the invariants a correct index must uphold.

use hnsw_core::{HnswIndex, SearchRequest, Vector};
use proptest::prelude::*;

fn distinct_vectors(n: usize, dim: usize) -> impl Strategy<Value = Vec<Vector>> {
    prop::collection::vec(
        prop::collection::vec(-100.0f32..100.0f32, dim),
        n,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, data)| Vector::new(id, data))
            .collect()
    })
}

// P1 (bidirectional edges) and P3 (entry point names the max-level node) read
// the node map directly and so are checked as unit tests next to the graph
// itself, in src/hnsw/graph.rs, where that map is in scope.

proptest! {
    /// P4: mutating the source buffer after construction must not be
    /// observable through the Vector.
    #[test]
    fn prop_vector_buffer_is_defensively_copied(mut data in prop::collection::vec(-50.0f32..50.0f32, 1..8)) {
        let original = data.clone();
        let v = Vector::new(0, data.clone());
        for x in data.iter_mut() {
            *x += 1.0;
        }
        prop_assert_eq!(v.as_slice().to_vec(), original);
    }

    /// P5: search output is strictly ordered by ascending distance, with
    /// pairwise-distinct ids, and length min(k, size()).
    #[test]
    fn prop_search_is_sorted_and_bounded(vectors in distinct_vectors(30, 6), k in 1usize..12) {
        let mut index = HnswIndex::new_index_with_seed(8, 1.0 / (8f64).ln(), 5).unwrap();
        for v in &vectors {
            index.insert(v.clone()).unwrap();
        }

        let request = SearchRequest::new(Vector::new(9_999, vec![0.0; 6]), k).unwrap();
        let results = index.search(&request).unwrap();

        prop_assert_eq!(results.len(), k.min(vectors.len()));

        let mut seen = std::collections::HashSet::new();
        for pair in results.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
        for r in &results {
            prop_assert!(seen.insert(r.id), "duplicate id {} in search results", r.id);
        }
    }

    /// P6: distance is symmetric, zero on the diagonal, and non-negative.
    #[test]
    fn prop_distance_is_symmetric(a in prop::collection::vec(-20.0f32..20.0f32, 3), b in prop::collection::vec(-20.0f32..20.0f32, 3)) {
        let va = Vector::new(0, a);
        let vb = Vector::new(1, b);
        let d_ab = va.distance(&vb).unwrap();
        let d_ba = vb.distance(&va).unwrap();
        prop_assert!((d_ab - d_ba).abs() < 1e-3);
        prop_assert!(va.distance(&va).unwrap() < 1e-5);
        prop_assert!(d_ab >= 0.0);
    }

    /// P7: cosine similarity is symmetric.
    #[test]
    fn prop_cosine_is_symmetric(a in prop::collection::vec(-20.0f32..20.0f32, 3), b in prop::collection::vec(-20.0f32..20.0f32, 3)) {
        let va = Vector::new(0, a);
        let vb = Vector::new(1, b);
        let sim_ab = va.cosine_similarity(&vb).unwrap();
        let sim_ba = vb.cosine_similarity(&va).unwrap();
        prop_assert!((sim_ab - sim_ba).abs() < 1e-3);
    }

    /// Round-trip: every inserted vector is its own nearest neighbor.
    #[test]
    fn prop_self_is_nearest_neighbor(vectors in distinct_vectors(25, 5)) {
        let mut index = HnswIndex::new_index_with_seed(8, 1.0 / (8f64).ln(), 3).unwrap();
        for v in &vectors {
            index.insert(v.clone()).unwrap();
        }

        for v in &vectors {
            let request = SearchRequest::new(v.clone(), 1).unwrap();
            let results = index.search(&request).unwrap();
            prop_assert_eq!(results[0].id, v.id());
            prop_assert!(results[0].distance < 1e-3);
        }
    }
}

/// P3's publicly observable half: after many inserts, a non-empty index
/// always has an entry point naming a node that is actually present. The
/// stronger claim — that this node's level equals max_level — is checked
/// against the node map directly in src/hnsw/graph.rs.
#[test]
fn test_entry_point_present_after_many_inserts() {
    let m = 12;
    let mut index = HnswIndex::new_index_with_seed(m, 1.0 / (m as f64).ln(), 77).unwrap();
    for i in 0..300 {
        let data = vec![(i as f32).sin(), (i as f32).cos(), i as f32 * 0.01];
        index.insert(Vector::new(i, data)).unwrap();
    }

    let entry = index.entry_point().unwrap();
    assert!(index.contains(entry));
}

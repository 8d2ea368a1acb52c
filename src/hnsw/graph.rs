//! HNSW graph — core data structures and algorithms.
//!
//! Implements the Hierarchical Navigable Small World graph from:
//! "Efficient and robust approximate nearest neighbor search using
//!  Hierarchical Navigable Small World graphs" (Malkov & Yashunin, 2016/2018).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{HnswError, Result};
use crate::node::Node;
use crate::vector::Vector;

use super::neighbor_queue::{MaxHeap, MinHeap, Neighbor};

/// Configuration parameters for the HNSW index.
#[derive(Debug, Clone)]
pub struct HnswParams {
    /// Target degree per node at layers >= 1.
    pub m: usize,
    /// Degree cap at layer 0 (2 * m).
    pub m_max0: usize,
    /// Level-generation multiplier (§4.5).
    pub m_l: f64,
}

impl HnswParams {
    /// Build parameters from `M` and `m_L`, validating the preconditions in
    /// §6 (`M >= 2`, `m_L > 0`).
    pub fn new(m: usize, m_l: f64) -> Result<Self> {
        if m < 2 {
            return Err(HnswError::InvalidArgument {
                reason: "M must be >= 2".to_string(),
            });
        }
        if !(m_l > 0.0) {
            return Err(HnswError::InvalidArgument {
                reason: "m_L must be positive".to_string(),
            });
        }
        Ok(Self {
            m,
            m_max0: 2 * m,
            m_l,
        })
    }
}

/// The HNSW graph structure.
#[derive(Debug)]
pub struct HnswGraph {
    /// id -> Node. A HashMap rather than a dense Vec: ids are caller-supplied
    /// and need not be contiguous (§3, §9).
    nodes: HashMap<usize, Node>,
    entry_point: Option<usize>,
    max_level: usize,
    params: HnswParams,
    rng: StdRng,
}

impl HnswGraph {
    pub fn new(params: HnswParams) -> Self {
        Self {
            nodes: HashMap::new(),
            entry_point: None,
            max_level: 0,
            params,
            rng: StdRng::from_entropy(),
        }
    }

    /// A graph seeded with a fixed RNG, for reproducible tests (§9: "SHOULD
    /// expose a seedable constructor").
    pub fn with_seed(params: HnswParams, seed: u64) -> Self {
        Self {
            nodes: HashMap::new(),
            entry_point: None,
            max_level: 0,
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get_vector(&self, id: usize) -> Option<&Vector> {
        self.nodes.get(&id).map(Node::vector)
    }

    pub fn entry_point(&self) -> Option<usize> {
        self.entry_point
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// §4.5 — floor(-ln(U) * m_L), U drawn strictly from (0, 1] to avoid
    /// ln(0) producing infinity.
    fn random_level(&mut self) -> usize {
        let u: f64 = 1.0 - self.rng.gen::<f64>();
        (-u.ln() * self.params.m_l).floor() as usize
    }

    fn distance(&self, query: &Vector, node_id: usize) -> Result<f32> {
        let node = self.nodes.get(&node_id).expect("node id must exist in map");
        query.distance(node.vector())
    }

    /// SEARCH-LAYER (§4.4): best-first exploration on a single layer,
    /// returning up to `ef` closest visited nodes, ascending by distance.
    fn search_layer(
        &self,
        query: &Vector,
        entry_points: &[usize],
        ef: usize,
        layer: usize,
    ) -> Result<Vec<Neighbor>> {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut candidates = MinHeap::new();
        let mut results = MaxHeap::new();

        for &ep_id in entry_points {
            let dist = self.distance(query, ep_id)?;
            visited.insert(ep_id);
            candidates.push(Neighbor::new(ep_id, dist));
            results.push(Neighbor::new(ep_id, dist));
        }

        while let Some(c) = candidates.pop() {
            let bound = results.peek().map(|n| n.distance).unwrap_or(f32::MAX);
            if c.distance > bound {
                break;
            }

            if let Some(node) = self.nodes.get(&c.id) {
                for &neighbor_id in node.neighbors(layer) {
                    if !visited.insert(neighbor_id) {
                        continue;
                    }

                    let dist = self.distance(query, neighbor_id)?;
                    let bound = results.peek().map(|n| n.distance).unwrap_or(f32::MAX);

                    if dist < bound || results.len() < ef {
                        candidates.push(Neighbor::new(neighbor_id, dist));
                        results.push(Neighbor::new(neighbor_id, dist));
                        if results.len() > ef {
                            results.pop();
                        }
                    }
                }
            }
        }

        Ok(results.into_sorted_vec())
    }

    /// PRUNE (§4.7): keep the `m_cap` neighbors of `node_id` closest to it
    /// at `layer`; symmetrically drop `node_id` from every removed
    /// neighbor's own layer-`layer` neighbor set.
    fn prune(&mut self, node_id: usize, m_cap: usize, layer: usize) {
        let (neighbor_ids, node_vector) = match self.nodes.get(&node_id) {
            Some(node) if layer <= node.level() => {
                (node.neighbors(layer).to_vec(), node.vector().clone())
            }
            _ => return,
        };
        if neighbor_ids.len() <= m_cap {
            return;
        }

        let mut scored: Vec<(usize, f32)> = neighbor_ids
            .iter()
            .filter_map(|&nid| {
                self.nodes
                    .get(&nid)
                    .map(|n| (nid, node_vector.distance(n.vector()).unwrap_or(f32::MAX)))
            })
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        scored.truncate(m_cap);

        let kept: HashSet<usize> = scored.iter().map(|&(id, _)| id).collect();
        let removed: Vec<usize> = neighbor_ids
            .into_iter()
            .filter(|id| !kept.contains(id))
            .collect();

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.set_neighbors(layer, scored.into_iter().map(|(id, _)| id).collect());
        }
        for removed_id in removed {
            if let Some(removed_node) = self.nodes.get_mut(&removed_id) {
                removed_node.remove_neighbor(layer, node_id);
            }
        }
    }

    /// INSERT (§4.6).
    pub fn insert(&mut self, vector: Vector) -> Result<()> {
        let id = vector.id();
        if self.nodes.contains_key(&id) {
            return Err(HnswError::DuplicateId { id });
        }

        let level = self.random_level();
        let node = Node::new(vector.clone(), level);
        self.nodes.insert(id, node);

        // Everything past this point can fail (dimension mismatch against an
        // existing vector, surfaced through `search_layer`'s distance calls).
        // §7 forbids partial mutation on error, so roll the just-inserted
        // node back out of the map before propagating.
        if let Err(err) = self.connect_new_node(id, &vector, level) {
            self.nodes.remove(&id);
            return Err(err);
        }

        Ok(())
    }

    fn connect_new_node(&mut self, id: usize, vector: &Vector, level: usize) -> Result<()> {
        let entry_point = match self.entry_point {
            None => {
                self.entry_point = Some(id);
                self.max_level = level;
                return Ok(());
            }
            Some(ep) => ep,
        };

        let mut nearest = entry_point;
        let current_max_level = self.max_level;

        // Phase 1: zoom-in descent through layers the new node doesn't join.
        if current_max_level > level {
            for l in (level + 1..=current_max_level).rev() {
                if let Some(n) = self.search_layer(vector, &[nearest], 1, l)?.first() {
                    nearest = n.id;
                }
            }
        }

        // Phase 2: connect at layers min(level, current_max_level) down to 0.
        let insert_from = level.min(current_max_level);
        for l in (0..=insert_from).rev() {
            let m_cap = if l == 0 { self.params.m_max0 } else { self.params.m };

            // ef = M (not m_cap) even at layer 0 — the candidate set is
            // already bounded by M, so no further selection step is needed
            // (§4.6 step 4a and its accompanying note).
            let candidates = self.search_layer(vector, &[nearest], self.params.m, l)?;

            if let Some(new_node) = self.nodes.get_mut(&id) {
                for c in &candidates {
                    new_node.add_neighbor(l, c.id);
                }
            }

            for c in &candidates {
                if let Some(neighbor_node) = self.nodes.get_mut(&c.id) {
                    neighbor_node.add_neighbor(l, id);
                    if neighbor_node.degree(l) > m_cap {
                        self.prune(c.id, m_cap, l);
                    }
                }
            }

            if let Some(n) = candidates.first() {
                nearest = n.id;
            }
        }

        if level > self.max_level {
            self.max_level = level;
            self.entry_point = Some(id);
        }

        Ok(())
    }

    /// SEARCH (§4.8).
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        let entry_point = match self.entry_point {
            Some(ep) => ep,
            None => return Ok(vec![]),
        };

        let mut nearest = entry_point;
        for l in (1..=self.max_level).rev() {
            if let Some(n) = self.search_layer(query, &[nearest], 1, l)?.first() {
                nearest = n.id;
            }
        }

        let ef = k.max(self.params.m);
        let mut results = self.search_layer(query, &[nearest], ef, 0)?;
        results.truncate(k);
        Ok(results)
    }
}

mod map_data;
mod node;

pub use map_data::{MapData, RawNode, Way};
pub use node::GeoNode;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::{Result, RouteError};

use std::fmt;
use indexmap::map::Entry::{Occupied, Vacant};
use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;
use log::info;


/// Road network built once from ingested map data
///
/// Owns every node in an arena, so node indices stay valid for the lifetime
/// of the graph. Topology never changes after construction, the only lazily
/// filled state is the per node neighbor cache.
pub struct RoadGraph {
    nodes: Vec<GeoNode>,
    ways: Vec<Vec<usize>>, // traversable ways as node indices
    id_lookup: FxIndexMap<u64, usize>, // external node id -> arena index
    tree: KdTree<f64, usize, [f64; 2]>, // position -> arena index
    metric_scale: f64,
}

impl RoadGraph {

    /// Build the graph from map data
    /// Fails on duplicate node ids, ways referencing unknown ids, non-finite positions or a bad metric scale
    pub fn new(data: MapData) -> Result<Self> {
        let MapData { nodes: raw_nodes, ways: raw_ways, metric_scale } = data;

        if !metric_scale.is_finite() || metric_scale <= 0.0 {
            return Err(RouteError::InvalidMetricScale(metric_scale));
        }

        let mut nodes = Vec::with_capacity(raw_nodes.len());
        let mut id_lookup: FxIndexMap<u64, usize> = FxIndexMap::default();
        let mut tree = KdTree::new(2);

        for raw in raw_nodes {
            if !raw.position.is_finite() {
                return Err(RouteError::InvalidCoordinate { id: raw.id });
            }

            let index = nodes.len();
            match id_lookup.entry(raw.id) {
                Occupied(_) => return Err(RouteError::DuplicateNode(raw.id)),
                Vacant(e) => {
                    e.insert(index);
                }
            }

            tree.add([raw.position.x, raw.position.y], index)?;
            nodes.push(GeoNode::new(index, raw.id, raw.position));
        }

        let mut ways: Vec<Vec<usize>> = Vec::new();
        let mut skipped = 0;
        for way in raw_ways {
            // resolve every way, so bad references surface even on ways we do not route over
            let indices = way
                .node_ids
                .iter()
                .map(|id| id_lookup.get(id).copied().ok_or(RouteError::UnknownNode(*id)))
                .collect::<Result<Vec<usize>>>()?;

            if !way.traversable {
                skipped += 1;
                continue;
            }

            let way_index = ways.len();
            for &node_index in &indices {
                // ways are added one at a time, so a repeat can only be the last entry
                let member_of = &mut nodes[node_index].ways;
                if member_of.last() != Some(&way_index) {
                    member_of.push(way_index);
                }
            }
            ways.push(indices);
        }

        info!(
            "built road graph: {} nodes, {} traversable ways ({} skipped), metric scale {:.3}",
            nodes.len(),
            ways.len(),
            skipped,
            metric_scale
        );

        Ok(Self {
            nodes,
            ways,
            id_lookup,
            tree,
            metric_scale,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[GeoNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&GeoNode> {
        self.nodes.get(index)
    }

    pub fn node_by_id(&self, id: u64) -> Option<&GeoNode> {
        self.id_lookup.get(&id).map(|&index| &self.nodes[index])
    }

    /// Meters per normalized unit
    pub fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    /// Euclidean distance between two nodes in normalized units
    /// Panics if either index is outside the graph
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.nodes[a].distance(&self.nodes[b])
    }

    /// Node closest to (x, y) in normalized units
    /// Coordinates are not range checked here. When several nodes are equally
    /// close, the one added to the graph first is returned.
    pub fn find_closest_node(&self, x: f64, y: f64) -> Result<&GeoNode> {
        if self.nodes.is_empty() {
            return Err(RouteError::EmptyGraph);
        }

        let point = [x, y];
        let nearest = self.tree.nearest(&point, 1, &kt_squared_euclidean)?;
        let Some(&(best, &first)) = nearest.first() else {
            return Err(RouteError::EmptyGraph);
        };

        // the tree gives no ordering guarantee between equal distances, so collect all ties
        let radius = best + best.abs() * 1e-9 + f64::EPSILON;
        let index = self
            .tree
            .within(&point, radius, &kt_squared_euclidean)?
            .into_iter()
            .filter(|&(dist, _)| dist <= best)
            .map(|(_, &index)| index)
            .chain(std::iter::once(first))
            .min()
            .unwrap_or(first);

        Ok(&self.nodes[index])
    }

    /// Nodes directly connected to `index` along a traversable way
    ///
    /// Each occurrence of the node in a way contributes its predecessor and
    /// successor. Self references and duplicates are dropped, order follows
    /// first discovery. The list is computed once and cached on the node.
    /// Panics if `index` is outside the graph.
    pub fn find_neighbors(&self, index: usize) -> &[usize] {
        let node = &self.nodes[index];
        node.neighbors.get_or_init(|| {
            let mut neighbors: FxIndexSet<usize> = FxIndexSet::default();

            for &way_index in &node.ways {
                let way = &self.ways[way_index];
                for (position, &member) in way.iter().enumerate() {
                    if member != index {
                        continue;
                    }
                    if position > 0 {
                        neighbors.insert(way[position - 1]);
                    }
                    if let Some(&next) = way.get(position + 1) {
                        neighbors.insert(next);
                    }
                }
            }

            neighbors.shift_remove(&index);
            neighbors.into_iter().collect()
        })
    }
}

impl fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.nodes.len())
            .field("ways", &self.ways.len())
            .field("metric_scale", &self.metric_scale)
            .finish()
    }
}

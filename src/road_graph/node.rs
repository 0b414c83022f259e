use std::sync::OnceLock;
use crate::geometry::Point;


/// Point on the road graph
/// Owned by the RoadGraph arena, refers to other nodes only by index
#[derive(Debug)]
pub struct GeoNode {
    pub(crate) index: usize, // position in the graph arena
    pub(crate) id: u64, // external id from the map data
    pub(crate) position: Point,
    pub(crate) ways: Vec<usize>, // traversable ways this node is part of
    pub(crate) neighbors: OnceLock<Vec<usize>>, // filled on first neighbor query
}

impl GeoNode {

    pub(crate) fn new(index: usize, id: u64, position: Point) -> Self {
        Self {
            index,
            id,
            position,
            ways: Vec::new(),
            neighbors: OnceLock::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Euclidean distance in normalized units
    pub fn distance(&self, other: &GeoNode) -> f64 {
        self.position.distance(&other.position)
    }

    /// Neighbor indices if they were already computed
    pub fn cached_neighbors(&self) -> Option<&[usize]> {
        self.neighbors.get().map(Vec::as_slice)
    }
}

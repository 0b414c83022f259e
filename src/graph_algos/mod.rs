pub mod a_star;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;
use crate::geometry::Point;


/// Search bookkeeping for one discovered node
/// Lives in the search's own map, never on the shared graph nodes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scratch {
    pub g_cost: f64, // cost from the start, normalized units
    pub h_cost: f64, // heuristic estimate to the goal
    pub parent: Option<usize>, // index of the parent entry in the search map
}

/// Type alias for the node map used during a search
/// Key: graph node index. Presence in the map means the node was visited.
/// The map index of an entry is what `Scratch::parent` points at.
pub type SearchMap = FxIndexMap<usize, Scratch>;


/// Snapshot of a graph node on a found path
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    pub index: usize, // graph arena index
    pub id: u64,
    pub position: Point,
}


/// Result of a single search
/// An empty path with zero distance means start and goal are not connected
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub nodes: Vec<PathNode>, // start ..= goal
    pub distance: f64, // meters, i.e. normalized length times the metric scale
    pub visited: usize, // nodes discovered by the search
}

impl Route {

    pub(crate) fn not_found(visited: usize) -> Self {
        Self { nodes: Vec::new(), distance: 0.0, visited }
    }

    pub fn is_found(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(|node| node.position).collect()
    }
}

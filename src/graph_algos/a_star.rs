use crate::errors::{Result, RouteError};
use crate::road_graph::RoadGraph;
use super::{shortest_path, Route, Scratch, SearchMap};

use std::{
    collections::BinaryHeap,
    cmp::Ordering
};
use indexmap::map::Entry::Vacant;
use log::{debug, trace, warn};



/// Entry on the A* open list
#[derive(Debug)]
struct Node {
    index: usize, // index in the closed_list - maps to the graph node
    f_cost: f64, // Total cost = cost + h(n) aka estimated cost
    sequence: usize, // insertion order, breaks f_cost ties
}

// BinaryHeap pops the greatest entry, so lower f_cost (then earlier insertion) compares greater
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.total_cmp(&self.f_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}

/// A* Algorithm over a road graph
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// Heuristic is the straight line distance to the goal, which never
/// overestimates the remaining road distance. A node is marked visited as soon
/// as it is discovered and its cost is never revised afterwards. The goal test
/// runs when a node is popped from the open list, not when it is discovered.
///
/// All search state is held by the search itself, the graph is only read, so
/// any number of searches can share one graph.
pub struct AStar<'g> {
    graph: &'g RoadGraph,
}

impl<'g> AStar<'g> {

    pub fn new(graph: &'g RoadGraph) -> Self {
        Self { graph }
    }

    /// Search from start to goal, both given as graph node indices
    /// Returns an empty route when the goal cannot be reached, that is not an error
    pub fn plan(&self, start: usize, goal: usize) -> Result<Route> {
        for index in [start, goal] {
            if index >= self.graph.len() {
                return Err(RouteError::UnknownNodeIndex(index));
            }
        }

        debug!("a* search from node {start} to node {goal}");
        let (node_map, goal_index) = self.build_graph(start, goal);

        match goal_index {
            Some(goal_index) => {
                let route = shortest_path(self.graph, &node_map, goal_index);
                debug!(
                    "path found: {} nodes, {:.3} m, {} nodes visited",
                    route.nodes.len(),
                    route.distance,
                    route.visited
                );
                Ok(route)
            }
            None => {
                warn!("no path from node {start} to node {goal}, {} nodes visited", node_map.len());
                Ok(Route::not_found(node_map.len()))
            }
        }
    }

    /// Straight line distance to the goal in normalized units
    fn heuristic(&self, node: usize, goal: usize) -> f64 {
        self.graph.distance(node, goal)
    }

    /// Traverses the graph using A*
    /// Returns the map of visited nodes along with the map index of the goal entry
    fn build_graph(&self, start: usize, goal: usize) -> (SearchMap, Option<usize>) {
        // Open List
        // Nodes that need to be expanded, implemented as priority queue on f_cost
        let mut open_list: BinaryHeap<Node> = BinaryHeap::new();

        // Visited nodes with their search state
        // A node enters here once, when first discovered, so it is pushed to the open list once
        let mut closed_list: SearchMap = SearchMap::default();
        let mut sequence = 0;

        let h_cost = self.heuristic(start, goal);
        let start_index = closed_list.insert_full(start, Scratch {
            g_cost: 0.0,
            h_cost,
            parent: None,
        }).0;
        open_list.push(Node {
            index: start_index,
            f_cost: h_cost,
            sequence,
        });

        while let Some(Node { index, .. }) = open_list.pop() {

            let Some((&current, &Scratch { g_cost, .. })) = closed_list.get_index(index) else {
                continue;
            };

            // Coincident nodes count as the goal too
            if self.graph.distance(current, goal) == 0.0 {
                return (closed_list, Some(index));
            }

            trace!("expanding node {current} g={g_cost:.6}");

            for &neighbor in self.graph.find_neighbors(current) {
                if let Vacant(e) = closed_list.entry(neighbor) {
                    let new_cost = g_cost + self.graph.distance(current, neighbor);
                    let h_cost = self.heuristic(neighbor, goal);
                    let neighbor_index = e.index();
                    e.insert(Scratch {
                        g_cost: new_cost,
                        h_cost,
                        parent: Some(index),
                    });

                    sequence += 1;
                    open_list.push(Node {
                        index: neighbor_index,
                        f_cost: new_cost + h_cost,
                        sequence,
                    });
                }
            }
        }
        (closed_list, None)
    }
}

use crate::road_graph::RoadGraph;
use super::{PathNode, Route, SearchMap};

/// Construct the path from the start node to the goal node
/// Follows parent links back from the goal entry, then reverses
/// node_map: SearchMap - visited nodes with their parent entry and cost
/// goal_index: usize - index of the goal entry in the node_map
pub(crate) fn shortest_path(graph: &RoadGraph, node_map: &SearchMap, goal_index: usize) -> Route {

    let mut nodes = Vec::new();
    let mut length = 0.0;
    let mut current = Some(goal_index);

    // Trace back from goal to start
    while let Some(entry) = current {
        let Some((&node_index, scratch)) = node_map.get_index(entry) else {
            break;
        };

        if let Some((&parent_index, _)) = scratch.parent.and_then(|p| node_map.get_index(p)) {
            length += graph.distance(node_index, parent_index);
        }

        let node = &graph.nodes()[node_index];
        nodes.push(PathNode {
            index: node_index,
            id: node.id(),
            position: node.position(),
        });
        current = scratch.parent;
    }

    // The path is in reverse order, so reverse it
    nodes.reverse();

    Route {
        nodes,
        distance: length * graph.metric_scale(),
        visited: node_map.len(),
    }
}

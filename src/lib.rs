//! Shortest route planning over road network graphs
//!
//! Map ingestion hands over nodes and ways as [`MapData`], positions in a
//! normalized unit square. [`RoadGraph`] owns the nodes and answers closest
//! node and neighbor queries, [`AStar`] searches it, and [`RoutePlanner`]
//! ties both together for caller supplied coordinates.

pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod planner;
pub mod road_graph;

mod collections;

pub use errors::{Result, RouteError};
pub use geometry::{MapBounds, Point};
pub use graph_algos::{a_star::AStar, PathNode, Route};
pub use planner::{PlannerConfig, RoutePlanner};
pub use road_graph::{GeoNode, MapData, RawNode, RoadGraph, Way};

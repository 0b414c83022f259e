use crate::errors::{Result, RouteError};
use crate::graph_algos::{a_star::AStar, PathNode, Route};
use crate::road_graph::{GeoNode, RoadGraph};

use log::debug;


/// Accepted caller input range and the factor mapping it into normalized units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    pub min_input: f64,
    pub max_input: f64,
    pub input_scale: f64,
}

impl Default for PlannerConfig {
    /// Percent of the map extent: 0..=100 mapped onto 0..=1
    fn default() -> Self {
        Self {
            min_input: 0.0,
            max_input: 100.0,
            input_scale: 0.01,
        }
    }
}

impl PlannerConfig {

    /// True if the value is inside the accepted range, NaN never is
    pub fn validate_input(&self, value: f64) -> bool {
        value >= self.min_input && value <= self.max_input
    }

    fn normalize(&self, value: f64) -> Result<f64> {
        if !self.validate_input(value) {
            return Err(RouteError::InvalidInput { value });
        }
        Ok(value * self.input_scale)
    }
}


/// Plans a route between two caller coordinates on a road graph
///
/// Coordinates are validated and resolved to their closest graph nodes when
/// the planner is created. The result of the last search is kept for
/// reporting until the next search replaces it.
#[derive(Debug)]
pub struct RoutePlanner<'g> {
    graph: &'g RoadGraph,
    start: usize,
    end: usize,
    route: Route,
}

impl<'g> RoutePlanner<'g> {

    pub fn new(graph: &'g RoadGraph, start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Result<Self> {
        Self::with_config(graph, PlannerConfig::default(), start_x, start_y, end_x, end_y)
    }

    pub fn with_config(
        graph: &'g RoadGraph,
        config: PlannerConfig,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Self> {
        let start_x = config.normalize(start_x)?;
        let start_y = config.normalize(start_y)?;
        let end_x = config.normalize(end_x)?;
        let end_y = config.normalize(end_y)?;

        let start = graph.find_closest_node(start_x, start_y)?.index();
        let end = graph.find_closest_node(end_x, end_y)?.index();
        debug!("resolved ({start_x}, {start_y}) -> node {start}, ({end_x}, {end_y}) -> node {end}");

        Ok(Self {
            graph,
            start,
            end,
            route: Route::default(),
        })
    }

    pub fn start_node(&self) -> &GeoNode {
        &self.graph.nodes()[self.start]
    }

    pub fn end_node(&self) -> &GeoNode {
        &self.graph.nodes()[self.end]
    }

    /// Run A* between the resolved nodes and keep the result
    pub fn a_star_search(&mut self) -> Result<&Route> {
        self.route = AStar::new(self.graph).plan(self.start, self.end)?;
        Ok(&self.route)
    }

    /// Path of the last search, empty before the first search or when no path exists
    pub fn path(&self) -> &[PathNode] {
        &self.route.nodes
    }

    /// Length of the last path in meters
    pub fn distance(&self) -> f64 {
        self.route.distance
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapBounds;
    use crate::road_graph::{MapData, RawNode, Way};

    /// Road along the bottom edge and up the right edge of the map
    fn l_shaped_graph() -> RoadGraph {
        let nodes = vec![
            RawNode::new(1, 0.0, 0.0),
            RawNode::new(2, 0.5, 0.0),
            RawNode::new(3, 1.0, 0.0),
            RawNode::new(4, 1.0, 0.5),
            RawNode::new(5, 1.0, 1.0),
            RawNode::new(6, 0.0, 1.0), // not on any road
        ];
        let ways = vec![Way::road(1, vec![1, 2, 3, 4, 5])];
        RoadGraph::new(MapData::new(nodes, ways, 200.0)).unwrap()
    }

    #[test]
    fn test_validate_input() {
        let config = PlannerConfig::default();

        assert!(config.validate_input(0.0));
        assert!(config.validate_input(100.0));
        assert!(config.validate_input(42.5));
        assert!(!config.validate_input(-0.1));
        assert!(!config.validate_input(100.1));
        assert!(!config.validate_input(f64::NAN));
    }

    #[test_log::test]
    fn test_planner_finds_route() {
        let graph = l_shaped_graph();
        let mut planner = RoutePlanner::new(&graph, 2.0, 3.0, 97.0, 99.0).unwrap();

        assert_eq!(planner.start_node().id(), 1);
        assert_eq!(planner.end_node().id(), 5);
        assert!(planner.path().is_empty());

        let route = planner.a_star_search().unwrap();
        assert_eq!(route.nodes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

        assert_eq!(planner.path().len(), 5);
        assert_eq!(planner.distance(), 2.0 * 200.0);
    }

    #[test]
    fn test_planner_reports_no_path() {
        let graph = l_shaped_graph();
        let mut planner = RoutePlanner::new(&graph, 0.0, 0.0, 0.0, 100.0).unwrap();

        assert_eq!(planner.end_node().id(), 6);
        let route = planner.a_star_search().unwrap();

        assert!(!route.is_found());
        assert!(planner.path().is_empty());
        assert_eq!(planner.distance(), 0.0);
    }

    #[test]
    fn test_planner_same_start_and_end() {
        let graph = l_shaped_graph();
        let mut planner = RoutePlanner::new(&graph, 50.0, 1.0, 49.0, 0.0).unwrap();

        planner.a_star_search().unwrap();

        assert_eq!(planner.path().len(), 1);
        assert_eq!(planner.path()[0].id, 2);
        assert_eq!(planner.distance(), 0.0);
    }

    #[test]
    fn test_planner_rejects_out_of_range_input() {
        let graph = l_shaped_graph();

        let err = RoutePlanner::new(&graph, 0.0, 101.0, 50.0, 50.0).unwrap_err();
        assert_eq!(err, RouteError::InvalidInput { value: 101.0 });

        let err = RoutePlanner::new(&graph, 0.0, 0.0, -5.0, 50.0).unwrap_err();
        assert_eq!(err, RouteError::InvalidInput { value: -5.0 });

        assert!(matches!(
            RoutePlanner::new(&graph, f64::NAN, 0.0, 0.0, 0.0),
            Err(RouteError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_planner_custom_range() {
        let graph = l_shaped_graph();
        let config = PlannerConfig {
            min_input: 0.0,
            max_input: 1000.0,
            input_scale: 0.001,
        };

        let planner = RoutePlanner::with_config(&graph, config, 1000.0, 500.0, 0.0, 0.0).unwrap();

        assert_eq!(planner.start_node().id(), 4);
        assert_eq!(planner.end_node().id(), 1);
    }

    #[test_log::test]
    fn test_planner_on_geographic_map() {
        // four corners of a small block, roads along the south and east edges
        let bounds = MapBounds::new(10.0, 20.0, 10.01, 20.01).unwrap();
        let data = MapData::from_geographic(
            &bounds,
            vec![(1, 10.0, 20.0), (2, 10.0, 20.01), (3, 10.01, 20.01), (4, 10.01, 20.0)],
            vec![
                Way::road(1, vec![1, 2, 3]),
                Way { id: 2, node_ids: vec![1, 4], traversable: false },
            ],
        );
        let graph = RoadGraph::new(data).unwrap();

        let mut planner = RoutePlanner::new(&graph, 0.0, 0.0, 100.0, 100.0).unwrap();
        planner.a_star_search().unwrap();

        assert_eq!(planner.path().iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        // east edge is slightly longer than the south edge in mercator meters
        let south = 0.01_f64.to_radians() * 6_378_137.0;
        assert!(planner.distance() > 2.0 * south);
        assert!(planner.distance() < 2.1 * south);
    }

    #[test]
    fn test_planner_on_empty_graph() {
        let graph = RoadGraph::new(MapData::new(vec![], vec![], 1.0)).unwrap();

        let err = RoutePlanner::new(&graph, 10.0, 10.0, 20.0, 20.0).unwrap_err();

        assert_eq!(err, RouteError::EmptyGraph);
    }
}

use crate::geometry::{MapBounds, Point};


/// Node as handed over by map ingestion
#[derive(Clone, Debug, PartialEq)]
pub struct RawNode {
    pub id: u64,
    pub position: Point, // normalized map units
}

impl RawNode {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, position: Point::new(x, y) }
    }
}


/// Ordered chain of node ids, e.g. a street
/// Consecutive ids are connected in both directions when the way is traversable
#[derive(Clone, Debug, PartialEq)]
pub struct Way {
    pub id: u64,
    pub node_ids: Vec<u64>,
    pub traversable: bool, // footways, rail etc are kept for rendering but never routed over
}

impl Way {
    pub fn road(id: u64, node_ids: Vec<u64>) -> Self {
        Self { id, node_ids, traversable: true }
    }
}


/// Everything the road graph needs from ingestion
#[derive(Clone, Debug, Default)]
pub struct MapData {
    pub nodes: Vec<RawNode>,
    pub ways: Vec<Way>,
    pub metric_scale: f64, // meters per normalized unit
}

impl MapData {

    pub fn new(nodes: Vec<RawNode>, ways: Vec<Way>, metric_scale: f64) -> Self {
        Self { nodes, ways, metric_scale }
    }

    /// Build map data from geographic nodes given as (id, lat, lon)
    /// Positions are projected into normalized units and the metric scale is taken from the bounds
    pub fn from_geographic<I>(bounds: &MapBounds, nodes: I, ways: Vec<Way>) -> Self
    where
        I: IntoIterator<Item = (u64, f64, f64)>,
    {
        let nodes = nodes
            .into_iter()
            .map(|(id, lat, lon)| RawNode { id, position: bounds.project(lat, lon) })
            .collect();

        Self {
            nodes,
            ways,
            metric_scale: bounds.metric_scale(),
        }
    }
}

use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    /// Caller supplied coordinate outside the accepted input range
    #[error("invalid input coordinate {value}, expected a value within the configured range")]
    InvalidInput { value: f64 },

    /// Closest-node query on a graph without nodes
    #[error("road graph has no nodes")]
    EmptyGraph,

    #[error("duplicate node id {0}")]
    DuplicateNode(u64),

    /// A way references a node id the map data does not contain
    #[error("way references unknown node id {0}")]
    UnknownNode(u64),

    #[error("node index {0} is outside the road graph")]
    UnknownNodeIndex(usize),

    #[error("node {id} has a non-finite coordinate")]
    InvalidCoordinate { id: u64 },

    #[error("metric scale must be finite and positive, got {0}")]
    InvalidMetricScale(f64),

    #[error("map bounds are empty or inverted")]
    InvalidBounds,

    #[error("spatial index error: {0}")]
    KdTree(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;


impl From<kdtree::ErrorKind> for RouteError {
    fn from(error: kdtree::ErrorKind) -> Self {
        RouteError::KdTree(error.to_string())
    }
}

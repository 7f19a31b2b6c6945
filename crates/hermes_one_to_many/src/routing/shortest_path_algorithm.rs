use super::routing_path::RoutingPath;
use crate::{error::RoutingError, types::NodeId};

/// A search from one origin to one destination, over a graph bound at construction
pub trait ShortestPathAlgorithm {
    fn calc_path(&mut self, origin: NodeId, destination: NodeId)
    -> Result<RoutingPath, RoutingError>;

    /// Variant returning several paths. Implementations return at least one path on success.
    fn calc_paths(
        &mut self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<RoutingPath>, RoutingError> {
        Ok(vec![self.calc_path(origin, destination)?])
    }

    /// Total number of nodes settled by this instance since it was created
    fn visited_nodes(&self) -> usize;

    fn name(&self) -> &str;
}

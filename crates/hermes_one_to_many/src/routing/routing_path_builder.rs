use super::{
    routing_path::{RoutingPath, RoutingPathLeg},
    spt_entry::{EntryIndex, SptArena},
};
use crate::{
    edge_direction::EdgeDirection,
    geopoint::GeoPoint,
    graph::Graph,
    types::NodeId,
    weighting::Weighting,
};

/// Materializes the path from the root of the tree to the entry at `index`
pub fn build_routing_path(
    graph: &impl Graph,
    weighting: &dyn Weighting,
    entries: &SptArena,
    index: EntryIndex,
) -> RoutingPath {
    let target = entries.get(index);

    let mut nodes: Vec<NodeId> = Vec::with_capacity(32);
    let mut legs: Vec<RoutingPathLeg> = Vec::with_capacity(32);

    let mut chain = entries.chain(index).peekable();
    while let Some(entry) = chain.next() {
        nodes.push(entry.adj_node);

        let Some(parent) = chain.peek() else {
            break;
        };

        let edge_id = entry.edge_id;
        let edge = graph.edge(edge_id);
        let direction = graph.edge_direction(edge_id, parent.adj_node);

        let geometry: Vec<GeoPoint> = if direction == EdgeDirection::Forward {
            graph.edge_geometry(edge_id).to_vec()
        } else {
            graph.edge_geometry(edge_id).iter().rev().copied().collect()
        };

        legs.push(RoutingPathLeg::new(
            edge_id,
            edge.distance(),
            weighting.calc_edge_ms(edge, direction),
            geometry,
        ));
    }

    nodes.reverse();
    legs.reverse();

    let from = nodes.first().copied().unwrap_or(target.adj_node);

    RoutingPath::new(from, target.adj_node, nodes, legs, target.weight)
}

#[cfg(test)]
pub mod test_graph {
    use crate::{
        base_graph::BaseGraph,
        constants::{MAX_DURATION, MAX_WEIGHT},
        distance::Meters,
        edge_direction::EdgeDirection,
        geopoint::GeoPoint,
        graph_edge::{EdgeProperties, GraphEdge},
        kilometers, meters,
        types::NodeId,
        weighting::{Milliseconds, Weight, Weighting},
    };

    /// Weight is the distance in meters and it takes a millisecond per meter
    pub struct TestWeighting;

    impl Weighting for TestWeighting {
        fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
            if !edge.properties().get(direction).access {
                return MAX_WEIGHT;
            }

            edge.distance().value()
        }

        fn calc_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
            if !edge.properties().get(direction).access {
                return MAX_DURATION;
            }

            edge.distance().value() as Milliseconds
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    /// Pretends every edge is free, except for the ones given
    pub struct NegativeWeighting {
        pub negative_edge: usize,
    }

    impl Weighting for NegativeWeighting {
        fn calc_edge_weight(&self, edge: &GraphEdge, _direction: EdgeDirection) -> Weight {
            if edge.id() == self.negative_edge {
                -1.0
            } else {
                edge.distance().value()
            }
        }

        fn calc_edge_ms(&self, edge: &GraphEdge, _direction: EdgeDirection) -> Milliseconds {
            edge.distance().value() as Milliseconds
        }

        fn name(&self) -> &str {
            "negative"
        }
    }

    /// Valid weights, but travelling takes negative time
    pub struct NegativeTimeWeighting;

    impl Weighting for NegativeTimeWeighting {
        fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
            TestWeighting.calc_edge_weight(edge, direction)
        }

        fn calc_edge_ms(&self, edge: &GraphEdge, _direction: EdgeDirection) -> Milliseconds {
            -(edge.distance().value() as Milliseconds)
        }

        fn name(&self) -> &str {
            "negative_time"
        }
    }

    pub struct NanWeighting {
        pub nan_edge: usize,
    }

    impl Weighting for NanWeighting {
        fn calc_edge_weight(&self, edge: &GraphEdge, _direction: EdgeDirection) -> Weight {
            if edge.id() == self.nan_edge {
                f64::NAN
            } else {
                edge.distance().value()
            }
        }

        fn calc_edge_ms(&self, edge: &GraphEdge, _direction: EdgeDirection) -> Milliseconds {
            edge.distance().value() as Milliseconds
        }

        fn name(&self) -> &str {
            "nan"
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub enum AbcdNode {
        A = 0,
        B = 1,
        C = 2,
        D = 3,
        E = 4,
        F = 5,
    }

    impl From<AbcdNode> for NodeId {
        fn from(value: AbcdNode) -> Self {
            value as NodeId
        }
    }

    /// Directed graph A->B (1), B->C (1), A->C (5), C->D (1), and E->F (1) that cannot be
    /// reached from the others
    pub fn create_abcd_graph() -> BaseGraph {
        let mut graph = BaseGraph::default();

        // B sits north of the A-C segment so that no two edges overlap
        for (lat, lng) in [
            (50.0, 4.0),
            (50.001, 4.0005),
            (50.0, 4.001),
            (50.0, 4.002),
            (50.1, 4.1),
            (50.1, 4.101),
        ] {
            graph.add_node(GeoPoint::new(lat, lng));
        }

        let oneway = EdgeProperties::oneway(50.0);
        graph.add_edge(0, 1, Some(meters!(1)), oneway);
        graph.add_edge(1, 2, Some(meters!(1)), oneway);
        graph.add_edge(0, 2, Some(meters!(5)), oneway);
        graph.add_edge(2, 3, Some(meters!(1)), oneway);
        graph.add_edge(4, 5, Some(meters!(1)), oneway);

        graph
    }

    #[derive(Clone, Copy, Debug)]
    pub enum RomaniaGraphCity {
        Arad = 1,
        Bucharest = 2,
        Craiova = 3,
        Dobreta = 4,
        Eforie = 5,
        Fagaras = 6,
        Giurgiu = 7,
        Hirsova = 8,
        Iasi = 9,
        Lugoj = 10,
        Mehadia = 11,
        Neamt = 12,
        Oradea = 13,
        Pitesti = 14,
        RimnicuVilcea = 15,
        Sibiu = 16,
        Timisoara = 17,
        Urziceni = 18,
        Vaslui = 19,
        Zerind = 20,
    }

    impl From<RomaniaGraphCity> for NodeId {
        fn from(value: RomaniaGraphCity) -> Self {
            value as NodeId
        }
    }

    // https://user-images.githubusercontent.com/43790152/97784960-1a142580-1bc4-11eb-9070-39c03eb16df2.png
    fn get_romania_graph_edges() -> Vec<(RomaniaGraphCity, RomaniaGraphCity, Meters)> {
        use RomaniaGraphCity::*;

        vec![
            (Oradea, Zerind, kilometers!(71)),
            (Oradea, Sibiu, kilometers!(151)),
            (Zerind, Arad, kilometers!(75)),
            (Arad, Sibiu, kilometers!(140)),
            (Arad, Timisoara, kilometers!(118)),
            (Timisoara, Lugoj, kilometers!(111)),
            (Lugoj, Mehadia, kilometers!(70)),
            (Mehadia, Dobreta, kilometers!(75)),
            (Dobreta, Craiova, kilometers!(120)),
            (Craiova, RimnicuVilcea, kilometers!(146)),
            (Craiova, Pitesti, kilometers!(138)),
            (RimnicuVilcea, Pitesti, kilometers!(97)),
            (RimnicuVilcea, Sibiu, kilometers!(80)),
            (Sibiu, Fagaras, kilometers!(99)),
            (Fagaras, Bucharest, kilometers!(211)),
            (Pitesti, Bucharest, kilometers!(101)),
            (Bucharest, Giurgiu, kilometers!(90)),
            (Bucharest, Urziceni, kilometers!(85)),
            (Urziceni, Hirsova, kilometers!(98)),
            (Hirsova, Eforie, kilometers!(86)),
            (Urziceni, Vaslui, kilometers!(142)),
            (Vaslui, Iasi, kilometers!(92)),
            (Iasi, Neamt, kilometers!(87)),
        ]
    }

    /// Node 0 is not part of the map and has no edges
    pub fn create_romania_graph() -> BaseGraph {
        let mut graph = BaseGraph::default();

        for node in 0..=20 {
            graph.add_node(GeoPoint::new(45.0 + node as f64 * 0.01, 25.0));
        }

        for (start, end, distance) in get_romania_graph_edges() {
            graph.add_edge(
                start.into(),
                end.into(),
                Some(distance),
                EdgeProperties::default(),
            );
        }

        graph
    }
}

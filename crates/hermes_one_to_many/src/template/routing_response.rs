use serde::Serialize;

use crate::{
    distance::Meters,
    geopoint::GeoPoint,
    weighting::{Milliseconds, Weight},
};

/// A computed path as handed to API consumers
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResponsePath {
    pub distance: Meters,
    pub time: Milliseconds,
    pub weight: Weight,
    pub points: Vec<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<GeoPoint>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResponseHints {
    #[serde(rename = "visited_nodes.sum")]
    pub visited_nodes_sum: usize,
    #[serde(rename = "visited_nodes.average")]
    pub visited_nodes_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RoutingResponse {
    pub paths: Vec<ResponsePath>,
    pub hints: ResponseHints,
}

impl RoutingResponse {
    pub fn add(&mut self, path: ResponsePath) {
        self.paths.push(path);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_use_dotted_names() {
        let response = RoutingResponse {
            paths: vec![],
            hints: ResponseHints {
                visited_nodes_sum: 4,
                visited_nodes_average: 2.0,
                algorithm: Some(String::from("dijkstra_one_to_many")),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hints"]["visited_nodes.sum"], 4);
        assert_eq!(json["hints"]["visited_nodes.average"], 2.0);
        assert_eq!(json["hints"]["algorithm"], "dijkstra_one_to_many");
    }
}

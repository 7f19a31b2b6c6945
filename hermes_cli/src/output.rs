use comfy_table::{Table, presets::UTF8_FULL};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value::LineString};
use hermes_one_to_many::template::routing_response::RoutingResponse;

pub fn paths_table(response: &RoutingResponse) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Distance (m)", "Time (s)", "Weight", "Points"]);

    for (index, path) in response.paths.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            format!("{:.1}", path.distance.value()),
            format!("{:.1}", path.time as f64 / 1000.0),
            format!("{:.1}", path.weight),
            path.points.len().to_string(),
        ]);
    }

    table
}

/// One line string per path, in lng/lat order
pub fn to_feature_collection(response: &RoutingResponse) -> FeatureCollection {
    let features = response
        .paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let points: Vec<Vec<f64>> = path
                .points
                .iter()
                .map(|point| vec![point.lng(), point.lat()])
                .collect();

            let mut properties = JsonObject::new();
            properties.insert(String::from("destination"), (index + 1).into());
            properties.insert(String::from("distance"), path.distance.value().into());
            properties.insert(String::from("time"), path.time.into());
            properties.insert(String::from("weight"), path.weight.into());

            Feature {
                bbox: None,
                properties: Some(properties),
                foreign_members: None,
                id: None,
                geometry: Some(Geometry::new(LineString(points))),
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

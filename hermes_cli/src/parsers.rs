use hermes_one_to_many::{geopoint::GeoPoint, routing::algorithm_factory::RoutingAlgorithm};

/// Parses `lat,lng`
pub fn parse_point(input: &str) -> Result<GeoPoint, String> {
    let Some((lat, lng)) = input.split_once(',') else {
        return Err(format!("Expected lat,lng but got {input}"));
    };

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("Invalid latitude {lat}: {error}"))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("Invalid longitude {lng}: {error}"))?;

    let point = GeoPoint::new(lat, lng);
    if !point.is_valid() {
        return Err(format!("{input} is not a valid coordinate"));
    }

    Ok(point)
}

/// Parses a heading in degrees, `-` means no heading for that point
pub fn parse_heading(input: &str) -> Result<Option<f64>, String> {
    if input == "-" {
        return Ok(None);
    }

    input
        .parse::<f64>()
        .map(Some)
        .map_err(|error| format!("Invalid heading {input}: {error}"))
}

pub fn parse_algorithm(input: &str) -> Result<RoutingAlgorithm, String> {
    match input {
        "dijkstra" => Ok(RoutingAlgorithm::Dijkstra),
        "dijkstra_one_to_many" | "one_to_many" => Ok(RoutingAlgorithm::DijkstraOneToMany),
        _ => Err(format!("Unknown algorithm {input}")),
    }
}

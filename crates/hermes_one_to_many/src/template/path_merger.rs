use super::routing_response::ResponsePath;
use crate::{distance::Meters, geopoint::GeoPoint, routing::routing_path::RoutingPath};

/// Turns one or more consecutive paths into a single response path
pub trait PathMerger {
    fn do_work(&self, paths: &[RoutingPath], waypoints: Option<&[GeoPoint]>) -> ResponsePath;
}

#[derive(Default)]
pub struct DefaultPathMerger;

impl PathMerger for DefaultPathMerger {
    fn do_work(&self, paths: &[RoutingPath], waypoints: Option<&[GeoPoint]>) -> ResponsePath {
        let mut response_path = ResponsePath {
            distance: Meters::ZERO,
            waypoints: waypoints.map(<[GeoPoint]>::to_vec),
            ..Default::default()
        };

        for path in paths {
            response_path.distance += path.distance();
            response_path.time += path.time();
            response_path.weight += path.weight();

            let points = path.points();
            let skip = match (response_path.points.last(), points.first()) {
                (Some(last), Some(first)) if last == first => 1,
                _ => 0,
            };
            response_path.points.extend(points.into_iter().skip(skip));
        }

        response_path
    }
}

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use geojson::GeoJson;
use hermes_one_to_many::{
    config::RoutingConfig,
    geopoint::GeoPoint,
    hermes::Hermes,
    routing::{algorithm_factory::RoutingAlgorithm, routing_request::OneToManyRequest},
};
use tracing::info;

use crate::{output, parsers};

#[derive(Args)]
pub struct RouteArgs {
    /// Graph file in JSON
    #[arg(short, long)]
    graph: PathBuf,

    /// Origin followed by the destinations, as lat,lng
    #[arg(short, long = "point", value_parser = parsers::parse_point, num_args = 1.., required = true)]
    points: Vec<GeoPoint>,

    /// Headings in degrees, `-` to leave a point without heading
    #[arg(long = "heading", value_parser = parsers::parse_heading, allow_hyphen_values = true)]
    headings: Vec<Option<f64>>,

    #[arg(long)]
    profile: Option<String>,

    #[arg(short, long, value_parser = parsers::parse_algorithm)]
    algorithm: Option<RoutingAlgorithm>,

    #[arg(long)]
    max_visited_nodes: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Writes the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Geojson,
}

pub fn run(args: RouteArgs, config: RoutingConfig) -> anyhow::Result<()> {
    let hermes = Hermes::from_file(&args.graph, config)?;

    let mut request = OneToManyRequest::new(args.points).with_headings(args.headings);
    request.profile = args.profile;
    request.algorithm = args.algorithm;
    request.max_visited_nodes = args.max_visited_nodes;

    let response = hermes.route_one_to_many(&request)?;

    info!(
        paths = response.paths.len(),
        visited_nodes = response.hints.visited_nodes_sum,
        "Routed one to many"
    );

    let rendered = match args.format {
        OutputFormat::Table => format!(
            "{}\nvisited nodes: {} (average {:.1})",
            output::paths_table(&response),
            response.hints.visited_nodes_sum,
            response.hints.visited_nodes_average
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Geojson => {
            GeoJson::FeatureCollection(output::to_feature_collection(&response)).to_string()
        }
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Wrote response to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

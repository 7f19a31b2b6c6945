use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use hermes_one_to_many::{
    config::RoutingConfig, hermes::Hermes, routing::routing_request::OneToManyRequest,
    template::routing_response::RoutingResponse,
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, warn};

use crate::file_utils::read_folder;

#[derive(Args)]
pub struct BatchArgs {
    /// Graph file in JSON
    #[arg(short, long)]
    graph: PathBuf,

    /// A request file or a folder of request files
    #[arg(short, long)]
    requests: PathBuf,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Output folder for the .response.json files
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn read_request(path: &Path) -> anyhow::Result<OneToManyRequest> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let request = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(request)
}

fn write_response(output: &Path, request: &Path, response: &RoutingResponse) -> anyhow::Result<()> {
    let stem = request
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("request"));
    let path = output.join(format!("{stem}.response.json"));

    std::fs::write(&path, serde_json::to_string_pretty(response)?)?;
    Ok(())
}

pub fn run(args: BatchArgs, config: RoutingConfig) -> anyhow::Result<()> {
    let paths = if args.requests.is_file() {
        vec![args.requests.clone()]
    } else {
        read_folder(&args.requests)?
    };

    let requests = paths
        .iter()
        .map(|path| read_request(path).map(|request| (path.as_path(), request)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let hermes = Hermes::from_file(&args.graph, config)?;

    if let Some(output) = &args.output {
        std::fs::create_dir_all(output)?;
    }

    info!(
        "Running {} requests on {} threads",
        requests.len(),
        args.threads
    );

    let bar = ProgressBar::new(requests.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} ({elapsed})")?,
    );

    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build()?;

    let start = Instant::now();
    let results: Vec<_> = thread_pool.install(|| {
        requests
            .par_iter()
            .map(|(path, request)| {
                let result = hermes.route_one_to_many(request);
                bar.inc(1);
                (*path, result)
            })
            .collect()
    });
    bar.finish_and_clear();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Request", "Paths", "Visited nodes", "Status"]);

    for (path, result) in &results {
        let name = path.display().to_string();
        match result {
            Ok(response) => {
                table.add_row(vec![
                    name,
                    response.paths.len().to_string(),
                    response.hints.visited_nodes_sum.to_string(),
                    String::from("ok"),
                ]);

                if let Some(output) = &args.output {
                    write_response(output, path, response)?;
                }
            }
            Err(error) => {
                warn!("{}: {}", name, error);
                table.add_row(vec![
                    name,
                    String::new(),
                    String::new(),
                    error.code().to_string(),
                ]);
            }
        }
    }

    println!("{table}");
    info!(
        "Finished {} requests in {:?}",
        results.len(),
        start.elapsed()
    );

    Ok(())
}

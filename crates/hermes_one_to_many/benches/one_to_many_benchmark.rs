use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hermes_one_to_many::routing::{
    dijkstra::{Dijkstra, DijkstraOneToMany},
    shortest_path_algorithm::ShortestPathAlgorithm,
};

#[path = "../tests/common/mod.rs"]
mod common;

use common::{DistanceWeighting, grid_graph};

const LENGTHS: [u32; 7] = [120, 80, 340, 95, 210, 60, 150];

fn one_to_many_benchmark(c: &mut Criterion) {
    let size = 60;
    let graph = grid_graph(size, &LENGTHS);
    let weighting = DistanceWeighting;

    let mut group = c.benchmark_group("one_to_many");

    for destination_count in [1, 10, 50] {
        let destinations: Vec<usize> = (1..=destination_count)
            .map(|i| (i * 7919) % (size * size))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("dijkstra_one_to_many", destination_count),
            &destinations,
            |b, destinations| {
                b.iter(|| {
                    let mut algo = DijkstraOneToMany::new(&graph, &weighting);
                    for destination in destinations {
                        let _ = black_box(algo.calc_path(0, *destination));
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dijkstra", destination_count),
            &destinations,
            |b, destinations| {
                b.iter(|| {
                    let mut algo = Dijkstra::new(&graph, &weighting);
                    for destination in destinations {
                        let _ = black_box(algo.calc_path(0, *destination));
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, one_to_many_benchmark);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use roadsafe_lib::{
    build_graph, load_survey, plan_route, Graph, GraphConfig, RouteAlgorithm, RouteRequest,
    SeverityHazard,
};
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal_survey.json")
}

static GRAPH: Lazy<Graph> = Lazy::new(|| {
    let survey = load_survey(fixture_path()).expect("fixture loads");
    build_graph(
        &survey,
        &GraphConfig::default(),
        Some(&SeverityHazard::default()),
    )
});
static DIJKSTRA_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::between("h1", "h3").with_algorithm(RouteAlgorithm::Dijkstra));
static ASTAR_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::between("h1", "h3"));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("dijkstra_h1_h3", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("astar_h1_h3", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.steps.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);

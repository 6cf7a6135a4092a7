mod common;

use common::{random_graph, RandomEdges, RANDOM_SEED};
use fastrand::Rng;
use matgraph::MatrixGraph;

fn main() {
    divan::main();
}

#[divan::bench(consts = [100, 500], args = [0.05, 0.5, 0.95])]
fn insert_remove<const N: usize>(density: f32) {
    let mut rng = Rng::with_seed(RANDOM_SEED);

    let mut graph = MatrixGraph::new();

    let mut vertices = (0..N)
        .map(|_| graph.insert_vertex(rng.u32(0..100)))
        .collect::<Vec<_>>();

    let mut edges = RandomEdges::new(N, density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        graph.insert_edge(&vertices[u], &vertices[v], rng.f32());
    }

    for _ in 0..(N / 4) {
        let u = vertices.swap_remove(rng.usize(..vertices.len()));
        graph.remove_vertex(&u);
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        if let Some(e) = graph.edge_between(&vertices[u], &vertices[v]) {
            graph.remove_edge(&e);
        }
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        let _ = graph.try_insert_edge(&vertices[u], &vertices[v], rng.f32());
    }
}

#[divan::bench(consts = [100, 1000], args = [0.05, 0.5])]
fn are_adjacent<const N: usize>(bencher: divan::Bencher, density: f32) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let (graph, vertices) = random_graph(N, density, &mut rng);

    bencher.bench_local(|| {
        let u = &vertices[rng.usize(..N)];
        let v = &vertices[rng.usize(..N)];
        graph.are_adjacent(u, v)
    });
}

#[divan::bench(consts = [100, 1000], args = [0.05, 0.5])]
fn incident_edges<const N: usize>(bencher: divan::Bencher, density: f32) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let (graph, vertices) = random_graph(N, density, &mut rng);

    bencher.bench_local(|| {
        let u = &vertices[rng.usize(..N)];
        graph.incident_edges(u).count()
    });
}

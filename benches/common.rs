#![allow(dead_code)]

use fastrand::Rng;
use matgraph::{core::id::VertexId, MatrixGraph};

pub const RANDOM_SEED: u64 = 0x5eed_0f_ad_ac_e17;

/// Generates pairs `(v, w)` with `w < v < n`, each with probability `p`,
/// skipping over the pairs that are not generated in constant time per pair.
pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_count: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_count,
            p,
        }
    }

    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        let Self { v, w, n, p } = self;

        if *v >= *n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - *p).log10()).floor() as usize;

        while *w >= *v && *v < *n {
            *w -= *v;
            *v += 1;
        }

        if *v < *n {
            Some((*v, *w))
        } else {
            None
        }
    }
}

pub fn random_graph(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> (MatrixGraph<u32, f32>, Vec<VertexId>) {
    let mut graph = MatrixGraph::with_capacity(vertex_count, 0);

    let vertices = (0..vertex_count)
        .map(|_| graph.insert_vertex(rng.u32(0..100)))
        .collect::<Vec<_>>();

    let mut edges = RandomEdges::new(vertex_count, density);

    while let Some((u, v)) = edges.next_edge(rng) {
        graph.insert_edge(&vertices[u], &vertices[v], rng.f32());
    }

    (graph, vertices)
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use matgraph::{
    infra::arbitrary::MutOpsSeq,
    visit::{Bfs, Dfs},
    MatrixGraph,
};

fuzz_target!(|ops: MutOpsSeq<i8, i8>| {
    let mut graph = MatrixGraph::new();

    for op in ops {
        op.apply(&mut graph);
    }

    let dfs = Dfs::on(&graph).run();
    let bfs = Bfs::on(&graph).run();

    assert_eq!(dfs.visited_count(), graph.vertex_count());
    assert_eq!(bfs.visited_count(), graph.vertex_count());
    assert_eq!(dfs.roots(), bfs.roots());

    let forest = graph.vertex_count() - dfs.roots().len();
    assert_eq!(dfs.discovery_edges().count(), forest);
    assert_eq!(bfs.discovery_edges().count(), forest);
    assert_eq!(
        dfs.back_edges().count(),
        graph.edge_count() - forest,
        "every non-tree edge is a back edge"
    );
    assert_eq!(bfs.cross_edges().count(), graph.edge_count() - forest);
});

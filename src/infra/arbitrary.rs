use std::fmt;

use arbitrary::{Arbitrary, Unstructured};

use crate::{
    core::{
        error::InsertEdgeError,
        id::{EdgeId, VertexId},
    },
    storage::MatrixGraph,
};

/// Position of a vertex or an edge in the iteration order of the graph,
/// modulo their count.
#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }

    pub fn map(self, m: usize) -> Option<Index> {
        self.get(m).map(Index)
    }

    fn vertex<V, E>(&self, graph: &MatrixGraph<V, E>) -> Option<VertexId> {
        let position = self.get(graph.vertex_count())?;
        graph.vertices().nth(position)
    }

    fn edge<V, E>(&self, graph: &MatrixGraph<V, E>) -> Option<EdgeId> {
        let position = self.get(graph.edge_count())?;
        graph.edges().nth(position)
    }
}

#[derive(Debug, Arbitrary, Clone)]
pub enum MutOp<V, E> {
    InsertVertex(V),
    RemoveVertex(Index),
    ReplaceVertex(Index, V),
    Clear,
    InsertEdge(Index, Index, E),
    RemoveEdge(Index),
    RemoveEdgeBetween(Index, Index),
    ReplaceEdge(Index, E),
    ClearEdges,
}

#[derive(Debug, PartialEq)]
pub enum MutOpResult<V, E> {
    InsertVertex(VertexId),
    RemoveVertex(Option<V>),
    ReplaceVertex(Option<V>),
    Clear,
    InsertEdge(Result<EdgeId, InsertEdgeError<E>>),
    RemoveEdge(Option<E>),
    ReplaceEdge(Option<E>),
    ClearEdges,
}

impl<V, E> MutOp<V, E> {
    /// Applies the operation on the graph. Indices referring to an empty
    /// graph turn the operation into a no-op, except for edge insertion which
    /// is then attempted with an absent vertex.
    pub fn apply(self, graph: &mut MatrixGraph<V, E>) -> MutOpResult<V, E> {
        match self {
            MutOp::InsertVertex(vertex) => MutOpResult::InsertVertex(graph.insert_vertex(vertex)),
            MutOp::RemoveVertex(index) => MutOpResult::RemoveVertex(
                index
                    .vertex(graph)
                    .and_then(|id| graph.remove_vertex(&id)),
            ),
            MutOp::ReplaceVertex(index, vertex) => MutOpResult::ReplaceVertex(
                index
                    .vertex(graph)
                    .map(|id| graph.replace_vertex(&id, vertex)),
            ),
            MutOp::Clear => {
                graph.clear();
                MutOpResult::Clear
            }
            MutOp::InsertEdge(start, end, edge) => {
                let absent = absent_vertex();
                let start = start.vertex(graph).unwrap_or(absent);
                let end = end.vertex(graph).unwrap_or(absent);
                MutOpResult::InsertEdge(graph.try_insert_edge(&start, &end, edge))
            }
            MutOp::RemoveEdge(index) => {
                MutOpResult::RemoveEdge(index.edge(graph).and_then(|id| graph.remove_edge(&id)))
            }
            MutOp::RemoveEdgeBetween(start, end) => {
                let id = match (start.vertex(graph), end.vertex(graph)) {
                    (Some(start), Some(end)) => graph.edge_between(&start, &end),
                    _ => None,
                };
                MutOpResult::RemoveEdge(id.and_then(|id| graph.remove_edge(&id)))
            }
            MutOp::ReplaceEdge(index, edge) => MutOpResult::ReplaceEdge(
                index.edge(graph).map(|id| graph.replace_edge(&id, edge)),
            ),
            MutOp::ClearEdges => {
                graph.clear_edges();
                MutOpResult::ClearEdges
            }
        }
    }
}

fn absent_vertex() -> VertexId {
    let mut other = MatrixGraph::<(), ()>::new();
    let id = other.insert_vertex(());
    other.remove_vertex(&id);
    id
}

pub struct MutOpsSeq<V, E>(pub Vec<MutOp<V, E>>);

impl<V, E> IntoIterator for MutOpsSeq<V, E> {
    type Item = MutOp<V, E>;
    type IntoIter = std::vec::IntoIter<MutOp<V, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V, E> MutOpsSeq<V, E> {
    /// Applies the operations while printing the equivalent code.
    pub fn replay(self, graph: &mut MatrixGraph<V, E>)
    where
        V: fmt::Debug,
        E: fmt::Debug,
    {
        println!("let mut graph = MatrixGraph::new();");
        println!("let vertex = |graph: &MatrixGraph<_, _>, i| graph.vertices().nth(i).unwrap();");
        println!("let edge = |graph: &MatrixGraph<_, _>, i| graph.edges().nth(i).unwrap();");
        println!();

        for op in self {
            let n = graph.vertex_count();
            let m = graph.edge_count();

            let op = match op {
                MutOp::RemoveVertex(index) => MutOp::RemoveVertex(index.map(n).unwrap_or_default()),
                MutOp::ReplaceVertex(index, vertex) => {
                    MutOp::ReplaceVertex(index.map(n).unwrap_or_default(), vertex)
                }
                MutOp::InsertEdge(start, end, edge) => MutOp::InsertEdge(
                    start.map(n).unwrap_or_default(),
                    end.map(n).unwrap_or_default(),
                    edge,
                ),
                MutOp::RemoveEdge(index) => MutOp::RemoveEdge(index.map(m).unwrap_or_default()),
                MutOp::RemoveEdgeBetween(start, end) => MutOp::RemoveEdgeBetween(
                    start.map(n).unwrap_or_default(),
                    end.map(n).unwrap_or_default(),
                ),
                MutOp::ReplaceEdge(index, edge) => {
                    MutOp::ReplaceEdge(index.map(m).unwrap_or_default(), edge)
                }
                op => op,
            };

            match &op {
                MutOp::InsertVertex(vertex) => println!("graph.insert_vertex({vertex:?});"),
                MutOp::RemoveVertex(Index(i)) if n > 0 => {
                    println!("graph.remove_vertex(&vertex(&graph, {i}));")
                }
                MutOp::ReplaceVertex(Index(i), vertex) if n > 0 => {
                    println!("graph.replace_vertex(&vertex(&graph, {i}), {vertex:?});")
                }
                MutOp::Clear => println!("graph.clear();"),
                MutOp::InsertEdge(Index(i), Index(j), edge) if n > 0 => println!(
                    "graph.try_insert_edge(&vertex(&graph, {i}), &vertex(&graph, {j}), {edge:?});"
                ),
                MutOp::RemoveEdge(Index(i)) if m > 0 => {
                    println!("graph.remove_edge(&edge(&graph, {i}));")
                }
                MutOp::ReplaceEdge(Index(i), edge) if m > 0 => {
                    println!("graph.replace_edge(&edge(&graph, {i}), {edge:?});")
                }
                MutOp::RemoveEdgeBetween(Index(i), Index(j)) if n > 0 => println!(
                    "graph.edge_between(&vertex(&graph, {i}), &vertex(&graph, {j})).map(|e| graph.remove_edge(&e));"
                ),
                MutOp::ClearEdges => println!("graph.clear_edges();"),
                _ => println!("// no-op"),
            }

            op.apply(graph);
        }

        println!();
        println!("check_consistency(&graph).unwrap();");
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for MutOpsSeq<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut graph);")?;
        writeln!(f)?;
        writeln!(f, "// use `cargo test fuzz_replay_mut_ops_seq`")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OpKind {
    InsertVertex,
    InsertEdge,
    RemoveVertex,
    RemoveEdge,
    Replace,
    Clear,
    ClearEdges,
}

impl<'a, V, E> Arbitrary<'a> for MutOpsSeq<V, E>
where
    V: Arbitrary<'a>,
    E: Arbitrary<'a>,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let n_target = u.int_in_range(10..=200)?;
        let r = u.nice_f64()?;

        let m_target = (((n_target * (n_target - 1) / 2) as f64 * r).round() as usize).max(1);

        let total = u.len().max(1);

        let mut n = 0usize;
        let mut m = 0usize;
        let mut seq = Vec::with_capacity(n_target);

        while !u.is_empty() {
            let rv = (n as f64 / n_target as f64).min(1.0);
            let re = (m as f64 / m_target as f64).min(1.0);
            let r = (total - u.len()) as f64 / total as f64;

            let op = match arbitrary_op(u, rv, re, r) {
                Ok(op) => op,
                Err(_) => break,
            };

            match op {
                MutOp::InsertVertex(_) => n += 1,
                MutOp::RemoveVertex(_) => n = n.saturating_sub(1),
                MutOp::Clear => {
                    n = 0;
                    m = 0
                }
                MutOp::InsertEdge(_, _, _) => m += 1,
                MutOp::RemoveEdge(_) | MutOp::RemoveEdgeBetween(_, _) => m = m.saturating_sub(1),
                MutOp::ClearEdges => m = 0,
                MutOp::ReplaceVertex(_, _) | MutOp::ReplaceEdge(_, _) => {}
            }

            seq.push(op);
        }

        Ok(MutOpsSeq(seq))
    }
}

fn arbitrary_op<'a, V, E>(
    u: &mut Unstructured<'a>,
    rv: f64,
    re: f64,
    r: f64,
) -> arbitrary::Result<MutOp<V, E>>
where
    V: Arbitrary<'a>,
    E: Arbitrary<'a>,
{
    // Insertions dominate at the beginning and fade out as the graph
    // approaches its target size. Removals take over towards the end.
    let wv = non_linear_decrease(0.4 * rv + 0.6 * r);
    let we = non_linear_decrease(0.6 * re + 0.4 * r);

    let kind = *u.choose_weighted(
        &[
            OpKind::InsertVertex,
            OpKind::InsertEdge,
            OpKind::RemoveVertex,
            OpKind::RemoveEdge,
            OpKind::Replace,
            OpKind::Clear,
            OpKind::ClearEdges,
        ],
        &[
            wv,
            we,
            (1.0 - wv) * 0.25,
            (1.0 - we) * 0.5,
            0.05,
            0.01,
            0.01,
        ],
    )?;

    match kind {
        OpKind::InsertVertex => Ok(MutOp::InsertVertex(u.arbitrary()?)),
        OpKind::InsertEdge => Ok(MutOp::InsertEdge(
            u.arbitrary()?,
            u.arbitrary()?,
            u.arbitrary()?,
        )),
        OpKind::RemoveVertex => Ok(MutOp::RemoveVertex(u.arbitrary()?)),
        OpKind::RemoveEdge => {
            if u.arbitrary()? {
                Ok(MutOp::RemoveEdge(u.arbitrary()?))
            } else {
                Ok(MutOp::RemoveEdgeBetween(u.arbitrary()?, u.arbitrary()?))
            }
        }
        OpKind::Replace => {
            if u.arbitrary()? {
                Ok(MutOp::ReplaceVertex(u.arbitrary()?, u.arbitrary()?))
            } else {
                Ok(MutOp::ReplaceEdge(u.arbitrary()?, u.arbitrary()?))
            }
        }
        OpKind::Clear => Ok(MutOp::Clear),
        OpKind::ClearEdges => Ok(MutOp::ClearEdges),
    }
}

trait UnstructuredExt {
    fn nice_f64(&mut self) -> arbitrary::Result<f64>;
    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T>;
}

impl<'a> UnstructuredExt for Unstructured<'a> {
    fn nice_f64(&mut self) -> arbitrary::Result<f64> {
        const RESOLUTION: u8 = 100;
        let int = self.int_in_range(0..=RESOLUTION)?;
        Ok(int as f64 / RESOLUTION as f64)
    }

    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T> {
        if choices.is_empty() || choices.len() != weights.len() {
            return Err(arbitrary::Error::EmptyChoose);
        }

        let weight_sum = weights.iter().copied().sum::<f64>();
        let bound = self.nice_f64()? * weight_sum;

        let mut acc = 0.0;
        for (choice, weight) in choices.iter().zip(weights.iter().copied()) {
            acc += weight;

            if acc >= bound {
                return Ok(choice);
            }
        }

        // Rounding errors.
        Ok(&choices[choices.len() - 1])
    }
}

// f(0) = 1, f(1) ~= 0.152
fn non_linear_decrease(x: f64) -> f64 {
    1.0 / (x + 1.0).powf(std::f64::consts::E)
}

use crate::graph::{BipartiteGraph, EdgeId, VertexId};
use crate::util::BitSet;

/// Result of leaf peeling: edges in the order they were stripped.
#[derive(Debug, Clone)]
pub struct PeelOrder {
    pub order: Vec<EdgeId>,
    pub total_edges: usize,
}

impl PeelOrder {
    /// Some edges could not be stripped, so the graph holds a cycle.
    #[inline]
    pub fn has_cycle(&self) -> bool {
        self.order.len() != self.total_edges
    }

    #[inline]
    pub fn peeled(&self) -> usize {
        self.order.len()
    }
}

/// Strips degree-1 vertices until none remain.
///
/// Every dequeue removes at most one edge; a vertex that still has live
/// edges afterwards is re-enqueued through its neighbors' updates.
pub fn peel(graph: &BipartiteGraph) -> PeelOrder {
    let m = graph.edge_count();
    let mut deg = vec![0u32; graph.table_size()];
    let mut q: Vec<VertexId> = Vec::with_capacity(graph.table_size());

    for v in graph.vertices() {
        let d = graph.degree(v) as u32;
        deg[v.index()] = d;
        if d == 1 {
            q.push(v);
        }
    }

    let mut removed = BitSet::new(m);
    let mut order = Vec::with_capacity(m);
    let mut q_head = 0usize;

    while q_head < q.len() {
        let node = q[q_head];
        q_head += 1;
        if deg[node.index()] == 0 {
            continue;
        }

        let live = graph
            .neighbors(node)
            .iter()
            .find(|&&(_, e)| !removed.test(e.index()));
        if let Some(&(neighbor, e)) = live {
            removed.set(e.index());
            order.push(e);

            let nd = &mut deg[neighbor.index()];
            *nd -= 1;
            if *nd == 1 {
                q.push(neighbor);
            }
            deg[node.index()] -= 1;
        }
    }

    PeelOrder {
        order,
        total_edges: m,
    }
}

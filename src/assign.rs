use crate::error::MphError;
use crate::graph::{BipartiteGraph, EdgeId};
use crate::peel::PeelOrder;
use crate::util::BitSet;

/// Assigns `g[]` so that `(g[v1] + g[v2]) % n == e` for every edge `e`.
///
/// Walks the peel order backwards: each edge then has at most one endpoint
/// fixed, and an edge with none fixed starts a new component at `g[v1] = 0`.
/// Entries are kept normalized in `[0, n)`; untouched vertices stay 0.
pub fn assign(graph: &BipartiteGraph, peeled: &PeelOrder) -> Result<Vec<u32>, MphError> {
    let n = graph.edge_count();
    if peeled.has_cycle() {
        return Err(MphError::Internal(format!(
            "assignment needs a complete peel order, got {} of {} edges",
            peeled.peeled(),
            n
        )));
    }
    let n_u64 = n as u64;

    let mut g = vec![0u32; graph.table_size()];
    let mut used = BitSet::new(graph.table_size());

    for &e in peeled.order.iter().rev() {
        let (v1, v2) = graph.endpoints(e);
        let (a, b) = (v1.index(), v2.index());
        let want = e.0 as u64;

        match (used.test(a), used.test(b)) {
            (false, false) => {
                g[a] = 0;
                g[b] = want as u32;
                used.set(a);
                used.set(b);
            }
            (false, true) => {
                g[a] = ((want + n_u64 - g[b] as u64) % n_u64) as u32;
                used.set(a);
            }
            (true, false) => {
                g[b] = ((want + n_u64 - g[a] as u64) % n_u64) as u32;
                used.set(b);
            }
            (true, true) => {
                return Err(MphError::Internal(format!(
                    "edge {} ({} - {}) has both endpoints fixed",
                    e.0, v1.0, v2.0
                )));
            }
        }
    }

    check(graph, &g)?;
    Ok(g)
}

/// Confirms every edge sums back to its own index.
fn check(graph: &BipartiteGraph, g: &[u32]) -> Result<(), MphError> {
    let n = graph.edge_count() as u64;
    for i in 0..graph.edge_count() {
        let (v1, v2) = graph.endpoints(EdgeId(i as u32));
        let got = (g[v1.index()] as u64 + g[v2.index()] as u64) % n;
        if got != i as u64 {
            return Err(MphError::Internal(format!(
                "edge {i} resolves to {got} after assignment"
            )));
        }
    }
    Ok(())
}

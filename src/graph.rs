use crate::util::BitSet;
use std::fmt;

/// Vertex handle: a bucket in `[0, table_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

/// Edge handle: the insertion index, equal to the producing key's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Why `add_edge` refused an edge. The graph is left untouched in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Full,
    SelfLoop,
    Duplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::Full => "edge capacity reached",
            Rejection::SelfLoop => "self-loop",
            Rejection::Duplicate => "duplicate edge",
        })
    }
}

/// Undirected simple graph over `table_size` vertices with at most
/// `max_edges` edges.
///
/// Edges are never removed; peeling tracks removal in its own mask so the
/// adjacency lists stay intact for traversal.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    max_edges: usize,
    edges: Vec<(VertexId, VertexId)>,
    // adj[v]: (neighbor, edge) in insertion order
    adj: Vec<Vec<(VertexId, EdgeId)>>,
    exists: BitSet,
    node_count: usize,
}

impl BipartiteGraph {
    pub fn new(table_size: u32, max_edges: usize) -> Self {
        let vertices = table_size as usize;
        Self {
            max_edges,
            edges: Vec::with_capacity(max_edges),
            adj: vec![Vec::new(); vertices],
            exists: BitSet::new(vertices),
            node_count: 0,
        }
    }

    /// Inserts `u - v` as the next edge.
    ///
    /// Duplicate detection scans `u`'s adjacency; expected degrees in a
    /// random graph with `2N` vertices are small.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId, Rejection> {
        if self.edges.len() >= self.max_edges {
            return Err(Rejection::Full);
        }
        if u == v {
            return Err(Rejection::SelfLoop);
        }
        if self.adj[u.index()].iter().any(|&(n, _)| n == v) {
            return Err(Rejection::Duplicate);
        }

        let e = EdgeId(self.edges.len() as u32);
        self.adj[u.index()].push((v, e));
        self.adj[v.index()].push((u, e));
        self.edges.push((u, v));
        for w in [u, v] {
            if self.exists.insert(w.index()) {
                self.node_count += 1;
            }
        }
        Ok(e)
    }

    #[inline]
    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        self.edges[e.index()]
    }

    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, EdgeId)] {
        &self.adj[v.index()]
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adj[v.index()].len()
    }

    #[inline]
    pub fn exists(&self, v: VertexId) -> bool {
        self.exists.test(v.index())
    }

    /// Vertices touched by at least one edge, ascending.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.adj.len() as u32)
            .map(VertexId)
            .filter(|v| self.exists(*v))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn table_size(&self) -> usize {
        self.adj.len()
    }

    pub fn is_full(&self) -> bool {
        self.edges.len() == self.max_edges
    }
}

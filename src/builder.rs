use crate::assign::assign;
use crate::error::MphError;
use crate::graph::{BipartiteGraph, Rejection, VertexId};
use crate::hash::KeyHash;
use crate::mphf::Mphf;
use crate::peel::peel;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Vertices per key: the graph has `TABLE_FACTOR * n` buckets.
pub const TABLE_FACTOR: u32 = 2;

/// Largest key set whose displacements fit the signed 32-bit raw format.
pub const MAX_KEYS: usize = i32::MAX as usize;

/// Build parameters.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Seed pairs to try before giving up.
    pub max_attempts: u32,
    /// Seed for the attempt generator. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            seed: None,
        }
    }
}

pub struct Builder {
    cfg: BuildConfig,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// How a single seed pair turned out.
enum Attempt {
    Built(Vec<u32>),
    Rejected { key: usize, why: Rejection },
    Cyclic { peeled: usize, total: usize },
}

impl Builder {
    pub fn new() -> Self {
        Self {
            cfg: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: BuildConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the MPH from **unique** keys; `index(keys[i]) == i`.
    pub fn build<K, I>(self, keys: I) -> Result<Mphf, MphError>
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = K>,
    {
        let mut rng = match self.cfg.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(keys, &mut rng)
    }

    /// Same as [`Builder::build`], drawing every seed pair from `rng`.
    pub fn build_with_rng<K, I, R>(self, keys: I, rng: &mut R) -> Result<Mphf, MphError>
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = K>,
        R: RngCore + ?Sized,
    {
        if self.cfg.max_attempts == 0 {
            return Err(MphError::InvalidArgument("attempt budget is zero"));
        }
        let owned: Vec<K> = keys.into_iter().collect();
        let keys: Vec<&[u8]> = owned.iter().map(AsRef::as_ref).collect();
        check_keys(&keys)?;

        let n = keys.len();
        debug!(
            "building CHM table: n={n}, table_size={}, budget={}",
            n * TABLE_FACTOR as usize,
            self.cfg.max_attempts
        );

        for round in 0..self.cfg.max_attempts {
            let seed1 = rng.next_u64();
            let seed2 = rng.next_u64();
            if let Some(mph) = run_attempt(&keys, seed1, seed2, round)? {
                debug!("built after {} attempt(s): seeds=({seed1:#x}, {seed2:#x})", round + 1);
                return Ok(mph);
            }
        }

        debug!("gave up after {} attempts", self.cfg.max_attempts);
        Err(MphError::MaxRetriesExceeded {
            attempts: self.cfg.max_attempts,
        })
    }

    /// One attempt with a fixed seed pair; the configured budget is ignored.
    pub fn build_with_seeds<K, I>(self, keys: I, seed1: u64, seed2: u64) -> Result<Mphf, MphError>
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = K>,
    {
        let owned: Vec<K> = keys.into_iter().collect();
        let keys: Vec<&[u8]> = owned.iter().map(AsRef::as_ref).collect();
        check_keys(&keys)?;
        run_attempt(&keys, seed1, seed2, 0)?.ok_or(MphError::MaxRetriesExceeded { attempts: 1 })
    }
}

/// Argument checks, then the exact-bytes duplicate scan. Runs before any
/// randomized work.
fn check_keys(keys: &[&[u8]]) -> Result<(), MphError> {
    if keys.is_empty() {
        return Err(MphError::InvalidArgument("empty key set"));
    }
    if keys.len() > MAX_KEYS {
        return Err(MphError::InvalidArgument("too many keys for 32-bit indices"));
    }
    if has_duplicates(keys) {
        debug!("duplicate key in a set of {}, not attempting a build", keys.len());
        return Err(MphError::DuplicateKey);
    }
    Ok(())
}

/// Sort by content (shorter first on a shared prefix) and compare neighbours.
fn has_duplicates(keys: &[&[u8]]) -> bool {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[0] == w[1])
}

fn run_attempt(keys: &[&[u8]], seed1: u64, seed2: u64, round: u32) -> Result<Option<Mphf>, MphError> {
    let n = keys.len();
    let table_size = n as u32 * TABLE_FACTOR;
    match try_build_chm(keys, seed1, seed2, table_size)? {
        Attempt::Built(g) => Ok(Some(Mphf {
            n: n as u32,
            table_size,
            seed1,
            seed2,
            g,
        })),
        Attempt::Rejected { key, why } => {
            trace!("attempt {round}: key {key} gives a {why}");
            Ok(None)
        }
        Attempt::Cyclic { peeled, total } => {
            trace!("attempt {round}: cycle, peeled {peeled} of {total} edges");
            Ok(None)
        }
    }
}

/// One CHM build attempt.
/// Steps:
/// 1) derive (v1,v2) per key
/// 2) insert edges in key order, bailing on the first self-loop/duplicate
/// 3) peel leaves
/// 4) assign g[] in reverse peel order
fn try_build_chm(keys: &[&[u8]], seed1: u64, seed2: u64, table_size: u32) -> Result<Attempt, MphError> {
    let hashes = derive_edges(keys, seed1, seed2, table_size);

    let mut graph = BipartiteGraph::new(table_size, keys.len());
    for (i, kh) in hashes.iter().enumerate() {
        if let Err(why) = graph.add_edge(VertexId(kh.v1), VertexId(kh.v2)) {
            return Ok(Attempt::Rejected { key: i, why });
        }
    }

    debug_assert!(graph.is_full());
    trace!(
        "seeds ({seed1:#x}, {seed2:#x}): {} edges over {} vertices",
        graph.edge_count(),
        graph.node_count()
    );

    let order = peel(&graph);
    if order.has_cycle() {
        return Ok(Attempt::Cyclic {
            peeled: order.peeled(),
            total: order.total_edges,
        });
    }

    Ok(Attempt::Built(assign(&graph, &order)?))
}

/// Derive both endpoints for every key (in parallel with the "parallel" feature).
fn derive_edges(keys: &[&[u8]], seed1: u64, seed2: u64, table_size: u32) -> Vec<KeyHash> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        keys.par_iter()
            .map(|k| KeyHash::from_key(k, seed1, seed2, table_size))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        keys.iter()
            .map(|k| KeyHash::from_key(k, seed1, seed2, table_size))
            .collect()
    }
}

//! chm_perfect_hash — CHM (random 2-graph peeling) MPH.
//!
//! - Build once on a set of **unique** keys (bytes/str).
//! - Each key becomes an edge between two of `2n` buckets; the graph must
//!   peel down to nothing (acyclic), else we retry with fresh seeds.
//! - O(|key|) lookups: key -> unique index in `[0..n)`, equal to the key's
//!   position in the build input.

mod assign;
mod builder;
mod error;
mod format;
mod graph;
mod hash;
mod mphf;
mod peel;
mod util;

pub use builder::{BuildConfig, Builder, MAX_KEYS, TABLE_FACTOR};
pub use error::MphError;
pub use format::{MAGIC, encoded_len};
pub use hash::bucket;
pub use mphf::Mphf;

/// Build with the default configuration (entropy-seeded, 1000 attempts).
pub fn build<K, I>(keys: I) -> Result<Mphf, MphError>
where
    K: AsRef<[u8]>,
    I: IntoIterator<Item = K>,
{
    Builder::new().build(keys)
}

/// Index of `key` in `[0, n)`; arbitrary (but in range) for keys outside the build set.
#[inline]
pub fn query(table: &Mphf, key: &[u8]) -> u64 {
    table.index(key)
}

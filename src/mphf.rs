use crate::error::MphError;
use crate::hash::KeyHash;
use crate::util::BitSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built CHM table: two seeds plus one displacement per vertex.
///
/// Query: f(k) = (g[h1(k)] + g[h2(k)]) % n
///
/// No key bytes are retained; lookups for keys outside the build set
/// return an arbitrary index in `[0, n)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mphf {
    pub(crate) n: u32,
    pub(crate) table_size: u32,
    pub(crate) seed1: u64,
    pub(crate) seed2: u64,
    pub(crate) g: Vec<u32>, // len == table_size, values in [0..n)
}

impl Mphf {
    #[inline]
    pub fn index(&self, key: &[u8]) -> u64 {
        let kh = KeyHash::from_key(key, self.seed1, self.seed2, self.table_size);
        let ga = self.g[kh.v1 as usize] as u64;
        let gb = self.g[kh.v2 as usize] as u64;
        (ga + gb) % self.n as u64
    }

    #[inline]
    pub fn index_str(&self, s: &str) -> u64 {
        self.index(s.as_bytes())
    }

    /// Number of keys the table was built over.
    #[inline]
    pub fn len(&self) -> usize {
        self.n as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn table_size(&self) -> usize {
        self.table_size as usize
    }

    #[inline]
    pub fn seeds(&self) -> (u64, u64) {
        (self.seed1, self.seed2)
    }

    pub fn displacements(&self) -> &[u32] {
        &self.g
    }

    /// Re-queries `keys` and fails on the first out-of-range index or
    /// collision, naming the positions involved.
    pub fn verify<K, I>(&self, keys: I) -> Result<(), MphError>
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = K>,
    {
        let n = self.n as u64;
        let mut owner = vec![usize::MAX; self.len()];
        let mut hit = BitSet::new(self.len());
        for (i, k) in keys.into_iter().enumerate() {
            let value = self.index(k.as_ref());
            if value >= n {
                return Err(MphError::OutOfRange { index: i, value, n });
            }
            let slot = value as usize;
            if !hit.insert(slot) {
                return Err(MphError::Collision {
                    first: owner[slot],
                    second: i,
                    value,
                });
            }
            owner[slot] = i;
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, MphError> {
        Ok(bincode::serialize(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MphError> {
        let mph: Mphf = bincode::deserialize(bytes)?;
        mph.validate()?;
        Ok(mph)
    }

    /// Structural checks a table must pass before `index` is safe to call.
    pub(crate) fn validate(&self) -> Result<(), MphError> {
        if self.n == 0 {
            return Err(MphError::Format("key count is zero"));
        }
        if self.table_size as u64 != 2 * self.n as u64 {
            return Err(MphError::Format("table size is not twice the key count"));
        }
        if self.g.len() != self.table_size as usize {
            return Err(MphError::Format("displacement count does not match table size"));
        }
        if self.g.iter().any(|&x| x >= self.n) {
            return Err(MphError::Format("displacement outside [0, n)"));
        }
        Ok(())
    }
}

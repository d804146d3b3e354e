/// Seeded byte-wise mixer mapping a key to a vertex in `[0, range)`.
///
/// The mixing is fixed: a built table is only queryable if lookup uses
/// exactly the same function as construction did.
#[inline]
pub fn bucket(bytes: &[u8], seed: u64, range: u32) -> u32 {
    let range = range.max(1) as u64;
    ((mix(bytes, seed) & 0x7FFF_FFFF) % range) as u32
}

/// Raw 64-bit accumulator before range reduction.
#[inline]
pub fn mix(bytes: &[u8], seed: u64) -> u64 {
    let mut h = seed;
    for &b in bytes {
        let mut w = (b as u64) ^ (h >> 33);
        w = w.wrapping_mul(0xff51_afd7_ed55_8ccd);
        w ^= w >> 33;
        w = w.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        h ^= w;
        h = h.rotate_left(31);
        h = h.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    }
    h
}

/// Both endpoints of the edge a key contributes under a seed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyHash {
    pub v1: u32,
    pub v2: u32,
}

impl KeyHash {
    #[inline]
    pub fn from_key(bytes: &[u8], seed1: u64, seed2: u64, table_size: u32) -> Self {
        Self {
            v1: bucket(bytes, seed1, table_size),
            v2: bucket(bytes, seed2, table_size),
        }
    }
}

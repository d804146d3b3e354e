/// Fixed-size bit mask over `[0, n)`.
#[derive(Debug, Clone)]
pub struct BitSet {
    bits: Vec<u64>,
    n: usize,
}

impl BitSet {
    pub fn new(n: usize) -> Self {
        let words = n.div_ceil(64);
        Self { bits: vec![0; words], n }
    }

    #[inline]
    pub fn test(&self, idx: usize) -> bool {
        debug_assert!(idx < self.n);
        let (w, b) = (idx / 64, idx % 64);
        (self.bits[w] >> b) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < self.n);
        let (w, b) = (idx / 64, idx % 64);
        self.bits[w] |= 1u64 << b;
    }

    /// Sets the bit and reports whether it was clear before.
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        let fresh = !self.test(idx);
        self.set(idx);
        fresh
    }
}

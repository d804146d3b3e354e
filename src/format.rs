//! Flat little-endian encoding of a [`Mphf`]:
//!
//! ```text
//! magic       8 bytes  "CHMPHF01"
//! table_size  u32
//! n           u32
//! seed1       u64
//! seed2       u64
//! g           table_size × i32
//! ```
//!
//! Readers consume the whole input; bytes after the last `g` entry are an
//! error.

use crate::error::MphError;
use crate::mphf::Mphf;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

pub const MAGIC: &[u8; 8] = b"CHMPHF01";

const MAX_PREALLOC: usize = 1 << 16;

/// Bytes `write_to` produces for a table of `table_size` vertices.
pub fn encoded_len(table_size: usize) -> usize {
    MAGIC.len() + 4 + 4 + 8 + 8 + 4 * table_size
}

impl Mphf {
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<(), MphError> {
        w.write_all(MAGIC)?;
        w.write_u32::<LittleEndian>(self.table_size)?;
        w.write_u32::<LittleEndian>(self.n)?;
        w.write_u64::<LittleEndian>(self.seed1)?;
        w.write_u64::<LittleEndian>(self.seed2)?;
        for &x in &self.g {
            // x < n <= i32::MAX, enforced at build
            w.write_i32::<LittleEndian>(x as i32)?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut r: R) -> Result<Self, MphError> {
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(MphError::Format("bad magic"));
        }
        let table_size = r.read_u32::<LittleEndian>()?;
        let n = r.read_u32::<LittleEndian>()?;
        let seed1 = r.read_u64::<LittleEndian>()?;
        let seed2 = r.read_u64::<LittleEndian>()?;
        if n == 0 || table_size as u64 != 2 * n as u64 {
            return Err(MphError::Format("table size is not twice a non-zero key count"));
        }

        // header is untrusted: let the body prove its length before growing
        let mut g = Vec::with_capacity((table_size as usize).min(MAX_PREALLOC));
        for _ in 0..table_size {
            let x = r.read_i32::<LittleEndian>()?;
            if x < 0 {
                return Err(MphError::Format("negative displacement"));
            }
            g.push(x as u32);
        }
        if r.read(&mut [0u8; 1])? != 0 {
            return Err(MphError::Format("trailing bytes after displacements"));
        }

        let mph = Mphf {
            n,
            table_size,
            seed1,
            seed2,
            g,
        };
        mph.validate()?;
        Ok(mph)
    }

    pub fn to_raw(&self) -> Result<Vec<u8>, MphError> {
        let mut out = Vec::with_capacity(encoded_len(self.g.len()));
        self.write_to(&mut out)?;
        Ok(out)
    }
}

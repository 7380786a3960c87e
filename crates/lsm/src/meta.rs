//! Explicit, self-describing persistence for the tree's top-level metadata.
//!
//! Rather than dumping the metadata struct as a raw in-memory layout
//! (which would couple the reader and writer to the exact same ABI,
//! including an inline vector header), this format carries a magic tag,
//! a version, and explicit lengths -- self-describing rather than a raw
//! struct dump, the payload (a bloom filter's bit array) just happens to
//! be binary rather than text.
//!
//! Layout: `b"RLSM"`, `version: u32`, `compaction_ratio: u64`, `sst_count:
//! u64`, then per SSTable `{size: u64, bloom: <BloomFilter::write_to
//! layout>}`.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use bloom::BloomFilter;

use crate::sstable::SstMeta;

const MAGIC: &[u8; 4] = b"RLSM";
const VERSION: u32 = 1;

/// The LSM tree's persisted metadata: the compaction ratio and the
/// per-SSTable `{size, bloom}` records, in SSTable-index order.
pub struct TreeMeta {
    pub compaction_ratio: u64,
    pub ssts: Vec<SstMeta>,
}

impl TreeMeta {
    /// An empty tree's metadata, as used when `<root>/meta` doesn't exist yet.
    pub fn fresh(compaction_ratio: u64) -> Self {
        Self {
            compaction_ratio,
            ssts: Vec::new(),
        }
    }

    /// Loads metadata written by [`TreeMeta::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let mut f = File::open(path)
            .with_context(|| format!("opening lsm meta at {}", path.display()))?;

        let mut magic = [0u8; 4];
        f.read_exact(&mut magic).context("reading lsm meta magic")?;
        if &magic != MAGIC {
            bail!(
                "lsm meta at {} has bad magic {:?}, expected {:?}",
                path.display(),
                magic,
                MAGIC
            );
        }

        let version = read_u32(&mut f).context("reading lsm meta version")?;
        if version != VERSION {
            bail!(
                "lsm meta at {} has unsupported version {version}, expected {VERSION}",
                path.display()
            );
        }

        let compaction_ratio = read_u64(&mut f).context("reading compaction ratio")?;
        let sst_count = read_u64(&mut f).context("reading sst count")? as usize;

        let mut ssts = Vec::with_capacity(sst_count);
        for i in 0..sst_count {
            let size = read_u64(&mut f)
                .with_context(|| format!("reading size of sstable meta #{i}"))?
                as usize;
            let bloom = BloomFilter::read_from(&mut f)
                .with_context(|| format!("reading bloom filter of sstable meta #{i}"))?;
            ssts.push(SstMeta { size, bloom });
        }

        Ok(Self {
            compaction_ratio,
            ssts,
        })
    }

    /// Writes metadata to `path` via a temp file + atomic rename, so a
    /// reader never observes a half-written file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp_path = match path.parent() {
            Some(dir) => dir.join("meta.tmp"),
            None => Path::new("meta.tmp").to_path_buf(),
        };

        {
            let mut w = BufWriter::new(File::create(&tmp_path).with_context(|| {
                format!("creating lsm meta tmp file at {}", tmp_path.display())
            })?);
            w.write_all(MAGIC)?;
            w.write_all(&VERSION.to_le_bytes())?;
            w.write_all(&self.compaction_ratio.to_le_bytes())?;
            w.write_all(&(self.ssts.len() as u64).to_le_bytes())?;
            for sst in &self.ssts {
                w.write_all(&(sst.size as u64).to_le_bytes())?;
                sst.bloom.write_to(&mut w)?;
            }
            w.flush()?;
        }

        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming lsm meta tmp over {}", path.display()))?;
        Ok(())
    }
}

fn read_u32<R: Read>(r: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

//! # A generic, size-tiered LSM tree
//!
//! The storage core shared by every index layer in this workspace: a
//! memtable backed by a bloom filter, a size-tiered stack of sorted
//! on-disk runs (SSTables), and a single-pass right-to-left compaction
//! policy. Parameterised over any [`FixedWidth`] key/value pair -- the
//! word and pattern indices instantiate it as
//! `LsmTree<key::FixedKey<128>, docset::DocSet<128>>`.
//!
//! ## Layout on disk
//!
//! ```text
//! <root>/
//!   meta   -- TreeMeta::save/load (magic, version, compaction ratio, per-run {size, bloom})
//!   C0 .. C<M-1>  -- sorted, deduplicated (K, V) runs, oldest = lowest index
//!   tmp    -- compaction scratch file, renamed over a C<i> on success
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous: `insert` and the read methods are
//! not safe to call concurrently from multiple threads against the same
//! tree.
//!
//! ## Statistics
//!
//! `read_point` is logically a read but still needs to count lookups,
//! memtable hits, bloom probes, and bloom false positives. Rather than
//! requiring `&mut self` for something callers reasonably expect to share
//! (e.g. behind a `Resolver`), the counters live in `Cell`s -- "mutable
//! even though logically const". [`LsmTree::stats`] returns a plain
//! snapshot; nothing is printed on drop.

pub mod fixed_width;
mod memtable;
mod sstable;

mod compaction;
mod meta;
mod read;
mod write;

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use memtable::{Memtable, MEMTABLE_MAX};
pub use meta::TreeMeta;
pub use sstable::SstMeta;

use fixed_width::FixedWidth;

/// Size-tiered compaction ratio used when no tree metadata exists yet.
pub const DEFAULT_COMPACTION_RATIO: u64 = 3;

/// A readable snapshot of a tree's lifetime lookup counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub lookup_count: u64,
    pub memtable_hits: u64,
    pub bloom_probe_count: u64,
    pub bloom_false_positives: u64,
    pub insert_count: u64,
}

#[derive(Default)]
struct StatsCell {
    lookup_count: Cell<u64>,
    memtable_hits: Cell<u64>,
    bloom_probe_count: Cell<u64>,
    bloom_false_positives: Cell<u64>,
    insert_count: Cell<u64>,
}

/// A size-tiered LSM tree rooted at a directory.
pub struct LsmTree<K, V> {
    root: PathBuf,
    memtable: Memtable<K, V>,
    meta: TreeMeta,
    stats: StatsCell,
}

impl<K, V> LsmTree<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    /// Opens (or creates) a tree rooted at `root`. If `root/meta` exists it
    /// is loaded byte-for-byte; otherwise the tree starts empty with
    /// [`DEFAULT_COMPACTION_RATIO`].
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .with_context(|| format!("creating lsm root at {}", root.display()))?;

        let meta_path = root.join("meta");
        let meta = if meta_path.exists() {
            log::info!("recovering lsm tree at {} from existing meta", root.display());
            TreeMeta::load(&meta_path)?
        } else {
            log::info!("opening fresh lsm tree at {}", root.display());
            TreeMeta::fresh(DEFAULT_COMPACTION_RATIO)
        };

        Ok(Self {
            root,
            memtable: Memtable::new(),
            meta,
            stats: StatsCell::default(),
        })
    }

    /// Persists the current metadata (compaction ratio + per-SSTable
    /// `{size, bloom}`) to `root/meta`. Does not flush the memtable --
    /// unflushed inserts are lost if the process exits before the next
    /// flush, per this tree's non-goals (no WAL, no fsync requirement).
    pub fn save(&self) -> Result<()> {
        self.meta.save(&self.root.join("meta"))
    }

    /// Returns the number of SSTables currently on disk.
    #[must_use]
    pub fn sst_count(&self) -> usize {
        self.meta.ssts.len()
    }

    /// Returns a snapshot of this tree's lookup/insert counters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            lookup_count: self.stats.lookup_count.get(),
            memtable_hits: self.stats.memtable_hits.get(),
            bloom_probe_count: self.stats.bloom_probe_count.get(),
            bloom_false_positives: self.stats.bloom_false_positives.get(),
            insert_count: self.stats.insert_count.get(),
        }
    }

    fn sst_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("C{index}"))
    }
}

impl<K, V> std::fmt::Debug for LsmTree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LsmTree")
            .field("root", &self.root)
            .field("sst_count", &self.meta.ssts.len())
            .field("compaction_ratio", &self.meta.compaction_ratio)
            .finish()
    }
}

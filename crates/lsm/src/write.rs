//! Insert path: memtable append, flush-on-full, compaction trigger.

use anyhow::{Context, Result};

use crate::fixed_width::FixedWidth;
use crate::memtable::MEMTABLE_MAX;
use crate::LsmTree;

impl<K, V> LsmTree<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    /// Appends `(key, value)` to the memtable. When the memtable reaches
    /// [`MEMTABLE_MAX`] entries it is flushed to a new SSTable and a
    /// compaction pass runs.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.stats.insert_count.set(self.stats.insert_count.get() + 1);
        self.memtable.insert(key, value);

        if self.memtable.len() == MEMTABLE_MAX {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let idx = self.meta.ssts.len();
        let path = self.sst_path(idx);
        log::debug!("flushing memtable to {}", path.display());

        let sst_meta = self
            .memtable
            .flush(&path)
            .with_context(|| format!("flushing memtable to {}", path.display()))?;
        self.meta.ssts.push(sst_meta);

        self.compact()
    }
}

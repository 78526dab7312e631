//! # Block Store Registry
//!
//! One key-value store per placed head. A store is created when its block
//! is placed and handed back when the block is broken, so it never
//! outlives the block.

use std::collections::HashMap;

use trophy_drops::{BlockStore, MemoryBlockStore};
use trophy_shared::BlockPos;

/// Per-position block stores owned by the host.
pub trait BlockStores {
    /// Store type for one block.
    type Store: BlockStore + Default;

    /// Creates an empty store at `pos`, replacing any existing one.
    fn create(&mut self, pos: BlockPos) -> &mut Self::Store;

    /// Store at `pos`, if the block has one.
    fn get(&self, pos: BlockPos) -> Option<&Self::Store>;

    /// Removes and returns the store at `pos`.
    fn remove(&mut self, pos: BlockPos) -> Option<Self::Store>;
}

/// In-memory [`BlockStores`].
#[derive(Debug, Default)]
pub struct MemoryBlockStores {
    stores: HashMap<BlockPos, MemoryBlockStore>,
}

impl MemoryBlockStores {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks with a store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// True when no block has a store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl BlockStores for MemoryBlockStores {
    type Store = MemoryBlockStore;

    fn create(&mut self, pos: BlockPos) -> &mut MemoryBlockStore {
        let slot = self.stores.entry(pos).or_default();
        *slot = MemoryBlockStore::new();
        slot
    }

    fn get(&self, pos: BlockPos) -> Option<&MemoryBlockStore> {
        self.stores.get(&pos)
    }

    fn remove(&mut self, pos: BlockPos) -> Option<MemoryBlockStore> {
        self.stores.remove(&pos)
    }
}

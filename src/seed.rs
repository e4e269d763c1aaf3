//! Hash seed registry.
//!
//! A single process-wide seed is read by every table created with
//! `SeedSource::Process`. Tables may instead share an explicit
//! `SharedSeed` cell or pin a fixed seed, so unrelated tables are not
//! coupled through global state.
//!
//! Changing a seed after entries were inserted leaves them in slots chosen
//! under the old seed, so lookups may miss them. Change seeds before
//! populating, or call `ByteTable::rehash` on every affected table right
//! after the change.
//!
//! The process seed is a relaxed `AtomicU32` only because a mutable
//! `static` has to be `Sync`. Tables are single-threaded and nothing else
//! here is atomic.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

pub const DEFAULT_SEED: u32 = 0;

static PROCESS_SEED: AtomicU32 = AtomicU32::new(DEFAULT_SEED);

/// Sets the process-wide seed used by `SeedSource::Process` tables.
pub fn set_seed(seed: u32) {
    PROCESS_SEED.store(seed, Ordering::Relaxed);
}

pub fn current_seed() -> u32 {
    PROCESS_SEED.load(Ordering::Relaxed)
}

/// Single-threaded seed cell that several tables can hold clones of.
#[derive(Clone, Debug, Default)]
pub struct SharedSeed(Rc<Cell<u32>>);

impl SharedSeed {
    pub fn new(seed: u32) -> Self {
        SharedSeed(Rc::new(Cell::new(seed)))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    pub fn set(&self, seed: u32) {
        self.0.set(seed);
    }
}

/// Where a table reads its seed from on each hash.
#[derive(Clone, Debug, Default)]
pub enum SeedSource {
    #[default]
    Process,
    Shared(SharedSeed),
    Fixed(u32),
}

impl SeedSource {
    #[inline]
    pub fn get(&self) -> u32 {
        match self {
            SeedSource::Process => current_seed(),
            SeedSource::Shared(s) => s.get(),
            SeedSource::Fixed(s) => *s,
        }
    }
}

impl From<u32> for SeedSource {
    fn from(seed: u32) -> Self {
        SeedSource::Fixed(seed)
    }
}

impl From<SharedSeed> for SeedSource {
    fn from(seed: SharedSeed) -> Self {
        SeedSource::Shared(seed)
    }
}

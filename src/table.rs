//! ByteTable: chained hash table over byte keys and values.

use crate::chain::{ChainArena, Head};
use crate::config::TableConfig;
use crate::cursor::{Cursor, Iter};
use crate::hasher::{SeededHasher, SipSeeded};
use crate::ownership::{CopyAll, Flags, Mode, Store};
use crate::seed::SeedSource;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Error returned by `ByteTable::resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeError {
    /// The slot array must keep at least one slot.
    ZeroSize,
}

impl fmt::Display for ResizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeError::ZeroSize => f.write_str("cannot resize table to zero slots"),
        }
    }
}

impl std::error::Error for ResizeError {}

/// Snapshot of a table's shape, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Live entries.
    pub len: usize,
    /// Slots in the array.
    pub array_size: usize,
    /// Inserts that landed in a non-empty slot since construction.
    pub collisions: usize,
    /// `len / array_size`.
    pub load_factor: f64,
    /// Slots with at least one entry.
    pub occupied_slots: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries in {} slots ({:.2} load, {} occupied, longest chain {}, {} collisions)",
            self.len,
            self.array_size,
            self.load_factor,
            self.occupied_slots,
            self.longest_chain,
            self.collisions
        )
    }
}

/// Hash table mapping byte keys to byte values.
///
/// The mode `M` decides per side whether input is copied or borrowed. With
/// the default `CopyAll` every insert stores its own bytes and the caller's
/// buffers are free again as soon as `insert` returns. `KeyConst`,
/// `ValueConst` and `AllConst` store borrowed input as-is on the const side,
/// and that input must outlive the table (`'a`).
pub struct ByteTable<'a, M = CopyAll, H = SipSeeded> {
    pub(crate) slots: Vec<Head>,
    pub(crate) arena: ChainArena<'a>,
    collisions: usize,
    max_load_factor: f64,
    seed: SeedSource,
    hasher: H,
    mode: PhantomData<M>,
}

impl<'a, M: Mode> ByteTable<'a, M> {
    /// Creates a table with the default size, hasher, and process seed.
    pub fn new(mode: M) -> Self {
        Self::with_config(TableConfig::default().with_mode(mode))
    }

    pub fn with_config(config: TableConfig<M>) -> Self {
        Self::with_hasher(config, SipSeeded)
    }
}

impl<'a> Default for ByteTable<'a> {
    fn default() -> Self {
        Self::new(CopyAll)
    }
}

impl<'a, M: Mode, H: SeededHasher> ByteTable<'a, M, H> {
    pub fn with_hasher(config: TableConfig<M>, hasher: H) -> Self {
        let TableConfig {
            initial_size,
            max_load_factor,
            seed,
            ..
        } = config;
        Self {
            slots: vec![None; initial_size.max(1)],
            arena: ChainArena::new(),
            collisions: 0,
            max_load_factor,
            seed,
            hasher,
            mode: PhantomData,
        }
    }

    #[inline]
    fn slot_for(&self, key: &[u8]) -> usize {
        let hash = self.hasher.hash_bytes(self.seed.get(), key);
        (hash % self.slots.len() as u64) as usize
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Number of slots in the array.
    pub fn array_size(&self) -> usize {
        self.slots.len()
    }

    /// Cumulative count of inserts that landed in an occupied slot.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn flags(&self) -> Flags {
        M::FLAGS
    }

    pub fn seed_source(&self) -> &SeedSource {
        &self.seed
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.slots.len() as f64
    }

    /// Inserts `key -> value`, returning the value it replaced.
    ///
    /// An existing key keeps its stored bytes; only the value is swapped.
    /// A new key is linked at the head of its slot's chain. If the load
    /// factor then exceeds the configured maximum the slot array doubles.
    ///
    /// Copied sides accept input of any lifetime. Const sides accept input
    /// that lives for `'a`, or owned buffers that the table takes over.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Cow<'a, [u8]>>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
        M::Key: Store<'a, K>,
        M::Value: Store<'a, V>,
    {
        let value = <M::Value as Store<'a, V>>::store(value);
        let idx = self.slot_for(key.as_ref());

        if let Some(entry) = self.arena.find_mut(self.slots[idx], key.as_ref()) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        let key = <M::Key as Store<'a, K>>::store(key);
        if self.slots[idx].is_some() {
            self.collisions += 1;
        }
        self.arena.push_front(&mut self.slots[idx], key, value);

        if self.load_factor() > self.max_load_factor {
            let grown = self.slots.len().saturating_mul(2);
            self.relocate(grown);
        }
        None
    }

    /// Returns the stored value for `key`; the slice length is the value size.
    pub fn get<Q: AsRef<[u8]>>(&self, key: Q) -> Option<&[u8]> {
        let key = key.as_ref();
        let idx = self.slot_for(key);
        self.arena
            .find(self.slots[idx], key)
            .map(|e| e.value.as_ref())
    }

    pub fn contains<Q: AsRef<[u8]>>(&self, key: Q) -> bool {
        let key = key.as_ref();
        let idx = self.slot_for(key);
        self.arena.find(self.slots[idx], key).is_some()
    }

    /// Removes `key`, handing back its stored key and value. Absent keys
    /// leave the table unchanged.
    pub fn remove<Q: AsRef<[u8]>>(&mut self, key: Q) -> Option<(Cow<'a, [u8]>, Cow<'a, [u8]>)> {
        let key = key.as_ref();
        let idx = self.slot_for(key);
        self.arena
            .unlink(&mut self.slots[idx], key)
            .map(|e| (e.key, e.value))
    }

    /// Returns every live key in slot-then-chain order.
    pub fn keys(&self) -> Vec<&[u8]> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().map(|(k, _)| k));
        out
    }

    /// Drops all entries and keeps the current slot array.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.slots.iter_mut().for_each(|h| *h = None);
    }

    /// Rebuilds the slot array with `new_size` slots and relinks every
    /// entry under the new modulus. Stored bytes are not copied.
    ///
    /// A size below `len()` is allowed and only lengthens chains.
    pub fn resize(&mut self, new_size: usize) -> Result<(), ResizeError> {
        if new_size == 0 {
            return Err(ResizeError::ZeroSize);
        }
        self.relocate(new_size);
        Ok(())
    }

    /// Recomputes every entry's slot at the current size. Call after the
    /// seed this table reads from has changed.
    pub fn rehash(&mut self) {
        self.relocate(self.slots.len());
    }

    fn relocate(&mut self, new_size: usize) {
        debug_assert!(new_size > 0);
        let old = std::mem::replace(&mut self.slots, vec![None; new_size]);
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let Some(entry) = self.arena.get(k) else {
                    unreachable!("chain links to a freed entry");
                };
                cur = entry.next;
                let idx = self.slot_for(&entry.key);
                self.arena.relink_front(&mut self.slots[idx], k);
            }
        }
    }

    /// Starts a cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, 'a, M, H> {
        Cursor::new(self)
    }

    /// Iterates `(key, value)` pairs in slot-then-chain order.
    pub fn iter(&self) -> Iter<'_, 'a, M, H> {
        Iter::new(self)
    }

    pub fn stats(&self) -> TableStats {
        let mut occupied_slots = 0;
        let mut longest_chain = 0;
        for &head in &self.slots {
            if head.is_some() {
                occupied_slots += 1;
                longest_chain = longest_chain.max(self.arena.chain_len(head));
            }
        }
        TableStats {
            len: self.len(),
            array_size: self.slots.len(),
            collisions: self.collisions,
            load_factor: self.load_factor(),
            occupied_slots,
            longest_chain,
        }
    }
}

impl<'a, M: Mode, H> fmt::Debug for ByteTable<'a, M, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteTable")
            .field("len", &self.arena.len())
            .field("array_size", &self.slots.len())
            .field("collisions", &self.collisions)
            .field("flags", &M::FLAGS)
            .field("seed", &self.seed)
            .finish()
    }
}

impl<'t, 'a, M: Mode, H: SeededHasher> IntoIterator for &'t ByteTable<'a, M, H> {
    type Item = (&'t [u8], &'t [u8]);
    type IntoIter = Iter<'t, 'a, M, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, M, H, K, V> Extend<(K, V)> for ByteTable<'a, M, H>
where
    M: Mode,
    H: SeededHasher,
    K: AsRef<[u8]>,
    V: AsRef<[u8]>,
    M::Key: Store<'a, K>,
    M::Value: Store<'a, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

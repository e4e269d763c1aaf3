//! Collision chains stored in an index-based arena.
//!
//! Every entry lives in a `SlotMap` and links to the next entry of its
//! bucket through a generational `EntryKey`. Removed entries return their
//! slot to the map's free list; stale keys never resolve to a new entry.

use slotmap::{new_key_type, SlotMap};
use std::borrow::Cow;

new_key_type! {
    /// Arena index of one stored entry.
    pub(crate) struct EntryKey;
}

/// One stored association. `next` is the following entry in the same chain.
#[derive(Debug)]
pub(crate) struct Entry<'a> {
    pub(crate) key: Cow<'a, [u8]>,
    pub(crate) value: Cow<'a, [u8]>,
    pub(crate) next: Option<EntryKey>,
}

/// Head of a bucket's chain; `None` for an empty bucket.
pub(crate) type Head = Option<EntryKey>;

#[derive(Debug, Default)]
pub(crate) struct ChainArena<'a> {
    entries: SlotMap<EntryKey, Entry<'a>>,
}

impl<'a> ChainArena<'a> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry. Bucket heads pointing into the arena become stale
    /// and must be reset by the caller.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn get(&self, k: EntryKey) -> Option<&Entry<'a>> {
        self.entries.get(k)
    }

    pub(crate) fn next_of(&self, k: EntryKey) -> Option<EntryKey> {
        self.entries.get(k).and_then(|e| e.next)
    }

    /// Allocates a new entry and links it in front of `head`.
    pub(crate) fn push_front(
        &mut self,
        head: &mut Head,
        key: Cow<'a, [u8]>,
        value: Cow<'a, [u8]>,
    ) -> EntryKey {
        let k = self.entries.insert(Entry {
            key,
            value,
            next: *head,
        });
        *head = Some(k);
        k
    }

    /// Moves an already stored entry to the front of another chain. The
    /// payload is left untouched.
    pub(crate) fn relink_front(&mut self, head: &mut Head, k: EntryKey) {
        let Some(e) = self.entries.get_mut(k) else {
            unreachable!("relinking a freed entry");
        };
        e.next = *head;
        *head = Some(k);
    }

    /// Finds the entry whose key equals `key` byte for byte.
    pub(crate) fn find(&self, head: Head, key: &[u8]) -> Option<&Entry<'a>> {
        self.chain(head)
            .filter_map(|k| self.entries.get(k))
            .find(|e| *e.key == *key)
    }

    pub(crate) fn find_mut(&mut self, head: Head, key: &[u8]) -> Option<&mut Entry<'a>> {
        let k = self
            .chain(head)
            .find(|&k| self.entries.get(k).is_some_and(|e| *e.key == *key))?;
        self.entries.get_mut(k)
    }

    /// Unlinks the entry matching `key` from the chain at `head` and hands
    /// it back to the caller, freeing its arena slot.
    pub(crate) fn unlink(&mut self, head: &mut Head, key: &[u8]) -> Option<Entry<'a>> {
        let mut prev: Option<EntryKey> = None;
        let mut cur = *head;
        while let Some(k) = cur {
            let entry = self.entries.get(k)?;
            if *entry.key == *key {
                let next = entry.next;
                match prev.and_then(|p| self.entries.get_mut(p)) {
                    Some(p) => p.next = next,
                    None => *head = next,
                }
                return self.entries.remove(k);
            }
            prev = cur;
            cur = entry.next;
        }
        None
    }

    /// Walks the keys of one chain, head first.
    pub(crate) fn chain(&self, head: Head) -> ChainKeys<'_, 'a> {
        ChainKeys {
            arena: self,
            cur: head,
        }
    }

    pub(crate) fn chain_len(&self, head: Head) -> usize {
        self.chain(head).count()
    }
}

pub(crate) struct ChainKeys<'r, 'a> {
    arena: &'r ChainArena<'a>,
    cur: Option<EntryKey>,
}

impl<'r, 'a> Iterator for ChainKeys<'r, 'a> {
    type Item = EntryKey;

    #[inline]
    fn next(&mut self) -> Option<EntryKey> {
        let k = self.cur?;
        self.cur = self.arena.next_of(k);
        Some(k)
    }
}

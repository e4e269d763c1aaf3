//! Restartable traversal over a `ByteTable`.
//!
//! A `Cursor` borrows the table, so the table cannot be mutated while the
//! cursor is alive. Traversal visits slots in order and each chain from its
//! head, which means entries of one slot appear newest first.

use crate::chain::EntryKey;
use crate::hasher::SeededHasher;
use crate::ownership::Mode;
use crate::table::ByteTable;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At { slot: usize, entry: EntryKey },
    Exhausted,
}

/// External cursor over a table's entries.
///
/// Starts before the first entry; call `advance` to move onto each entry
/// in turn. `key` and `value` return `None` unless the cursor is on an
/// entry.
pub struct Cursor<'t, 'a, M, H> {
    table: &'t ByteTable<'a, M, H>,
    pos: Position,
}

impl<'t, 'a, M: Mode, H: SeededHasher> Cursor<'t, 'a, M, H> {
    pub fn new(table: &'t ByteTable<'a, M, H>) -> Self {
        Self {
            table,
            pos: Position::BeforeFirst,
        }
    }

    /// Moves to the next entry. Returns `false` once every entry has been
    /// visited; further calls keep returning `false`.
    pub fn advance(&mut self) -> bool {
        let start = match self.pos {
            Position::BeforeFirst => 0,
            Position::At { slot, entry } => {
                if let Some(next) = self.table.arena.next_of(entry) {
                    self.pos = Position::At { slot, entry: next };
                    return true;
                }
                slot + 1
            }
            Position::Exhausted => return false,
        };

        let found = self.table.slots[start.min(self.table.slots.len())..]
            .iter()
            .enumerate()
            .find_map(|(off, &head)| head.map(|entry| (start + off, entry)));
        self.pos = match found {
            Some((slot, entry)) => Position::At { slot, entry },
            None => Position::Exhausted,
        };
        found.is_some()
    }

    /// Goes back to before the first entry.
    pub fn reset(&mut self) {
        self.pos = Position::BeforeFirst;
    }

    pub fn is_positioned(&self) -> bool {
        matches!(self.pos, Position::At { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == Position::Exhausted
    }

    /// Slot index of the current entry.
    pub fn slot(&self) -> Option<usize> {
        match self.pos {
            Position::At { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&'t [u8]> {
        self.current().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'t [u8]> {
        self.current().map(|(_, v)| v)
    }

    pub fn current(&self) -> Option<(&'t [u8], &'t [u8])> {
        let Position::At { entry, .. } = self.pos else {
            return None;
        };
        let table: &'t ByteTable<'a, M, H> = self.table;
        table
            .arena
            .get(entry)
            .map(|e| (e.key.as_ref(), e.value.as_ref()))
    }
}

/// Iterator over `(key, value)` pairs, built on `Cursor`.
pub struct Iter<'t, 'a, M, H> {
    cursor: Cursor<'t, 'a, M, H>,
    remaining: usize,
}

impl<'t, 'a, M: Mode, H: SeededHasher> Iter<'t, 'a, M, H> {
    pub(crate) fn new(table: &'t ByteTable<'a, M, H>) -> Self {
        Self {
            remaining: table.len(),
            cursor: Cursor::new(table),
        }
    }
}

impl<'t, 'a, M: Mode, H: SeededHasher> Iterator for Iter<'t, 'a, M, H> {
    type Item = (&'t [u8], &'t [u8]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.advance() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.cursor.current()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'t, 'a, M: Mode, H: SeededHasher> ExactSizeIterator for Iter<'t, 'a, M, H> {}

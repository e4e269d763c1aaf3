//! byte-hashtable: a single-threaded chained hash table over arbitrary
//! byte keys and values, with copy-on-insert ownership and a seeded hash.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small embeddable table (for caches, symbol tables, indexes)
//!   with predictable byte ownership and a hash that callers can seed
//!   against hash-flooding.
//! - Layers:
//!   - `chain::ChainArena`: entries live in a `SlotMap`; each bucket is a
//!     singly linked chain of generational `EntryKey`s. Removal frees the
//!     arena slot onto the map's free list.
//!   - `ByteTable<'a, M, H>`: slot array of chain heads indexed by
//!     `hash(key, seed) % array_size`; insert/get/remove/contains, growth
//!     and rehash.
//!   - `Cursor` / `Iter`: slot-then-chain traversal borrowing the table.
//!
//! Constraints
//! - Single-threaded: tables holding a `SeedSource` are `!Send`/`!Sync`
//!   (the shared seed is an `Rc`). Callers serialize access externally.
//! - Keys are unique by exact bytes (length and content). Inserting an
//!   existing key swaps the value and leaves the stored key alone.
//! - Rehash never copies key or value bytes; only chain links move.
//! - `collisions` counts inserts of new keys into occupied slots and is
//!   never decremented or recomputed.
//!
//! Ownership
//! - Stored bytes are `Cow<'a, [u8]>`. The mode `M` fixes, per side,
//!   whether input is copied or borrowed; `flags()` reports it as `Flags`.
//! - `CopyAll` (`Flags::NONE`) copies borrowed input, and the input's
//!   lifetime is not tied to the table: a read buffer can be refilled
//!   right after `insert`.
//! - `KeyConst`, `ValueConst` and `AllConst` store borrowed input as-is on
//!   the const side. Only that side's input must live for `'a`, and
//!   dropping the table never touches it.
//!
//! Seeding
//! - Every hash reads the table's `SeedSource`: the process-wide seed
//!   (`seed::set_seed`), a `SharedSeed` cell, or a fixed value.
//! - Changing a seed after insertion strands entries in their old slots.
//!   Call `ByteTable::rehash` after such a change.
//!
//! Iteration
//! - A `Cursor` holds `&ByteTable`, so inserts, removals, resizes, and
//!   clears are rejected by the borrow checker while it is alive.
//!
//! Failure policy
//! - Missing keys are not errors: `get` returns `None`, `contains` returns
//!   `false`, `remove` is a no-op. The only reported error is
//!   `resize(0)`. Allocation failure aborts through the global allocator.

mod chain;
pub mod config;
pub mod cursor;
pub mod hasher;
pub mod ownership;
pub mod seed;
mod table;
mod table_proptest;

// Public surface
pub use config::TableConfig;
pub use cursor::{Cursor, Iter};
pub use hasher::{SeededHasher, SipSeeded};
pub use ownership::{
    AllConst, Borrowed, CopyAll, CopyBytes, Copied, Flags, IntoBytes, KeyConst, Mode, Policy, Store,
    ValueConst,
};
pub use seed::{current_seed, set_seed, SeedSource, SharedSeed};
pub use table::{ByteTable, ResizeError, TableStats};

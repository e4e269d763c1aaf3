// ByteTable property tests through the public API.
//
// Property 1: unique-key inserts.
//  - len() equals the number of distinct keys inserted, whatever the
//    initial size and seed (implicit growth included).
//
// Property 2: survivors after mixed insert/remove.
//  - Every non-removed key maps to its latest value after any number of
//    implicit resizes; removed keys are absent.
//
// Property 3: iteration is a bijection with the live set.
//  - iter() and the cursor both yield exactly len() pairs, with no
//    duplicate keys, each matching get().
use byte_hashtable::{ByteTable, TableConfig};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn table(initial: usize, seed: u32) -> ByteTable<'static> {
    ByteTable::with_config(TableConfig::new().with_initial_size(initial).with_seed(seed))
}

proptest! {
    #[test]
    fn prop_len_counts_distinct_keys(
        keys in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..8), 0..200),
        initial in 1usize..32,
        seed in any::<u32>(),
    ) {
        let mut t = table(initial, seed);
        for k in &keys {
            t.insert(k.clone(), k.clone());
        }
        let distinct: BTreeSet<_> = keys.iter().collect();
        prop_assert_eq!(t.len(), distinct.len());
        for k in distinct {
            prop_assert_eq!(t.get(k), Some(k.as_slice()));
        }
    }
}

proptest! {
    #[test]
    fn prop_survivors_after_resizes(
        ops in proptest::collection::vec((any::<bool>(), 0u16..128, any::<u8>()), 1..400),
        seed in any::<u32>(),
    ) {
        let mut t = table(1, seed);
        let mut model: BTreeMap<u16, u8> = BTreeMap::new();
        for (is_insert, k, v) in ops {
            if is_insert {
                t.insert(k.to_le_bytes().to_vec(), vec![v]);
                model.insert(k, v);
            } else {
                t.remove(k.to_le_bytes());
                model.remove(&k);
            }
        }
        prop_assert_eq!(t.len(), model.len());
        for k in 0u16..128 {
            let want = model.get(&k).map(|v| vec![*v]);
            prop_assert_eq!(t.get(k.to_le_bytes()).map(<[u8]>::to_vec), want);
        }
    }
}

proptest! {
    #[test]
    fn prop_iteration_is_exact(
        entries in proptest::collection::btree_map(
            proptest::collection::vec(any::<u8>(), 0..6),
            proptest::collection::vec(any::<u8>(), 0..6),
            0..120,
        ),
        seed in any::<u32>(),
    ) {
        let mut t = table(4, seed);
        t.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));

        let it = t.iter();
        prop_assert_eq!(it.len(), entries.len());
        let from_iter: BTreeMap<Vec<u8>, Vec<u8>> =
            it.map(|(k, v)| (k.to_vec(), v.to_vec())).collect();
        prop_assert_eq!(&from_iter, &entries);

        let mut c = t.cursor();
        let mut n = 0;
        let mut seen = BTreeSet::new();
        while c.advance() {
            let k = c.key().unwrap();
            prop_assert!(seen.insert(k.to_vec()), "duplicate key from cursor");
            prop_assert_eq!(t.get(k), c.value());
            n += 1;
        }
        prop_assert_eq!(n, t.len());
    }
}

#![cfg(test)]

// Property tests for ByteTable kept inside the crate so they can check
// arena and chain internals alongside the public API.

use crate::config::TableConfig;
use crate::hasher::SeededHasher;
use crate::ownership::CopyAll;
use crate::table::ByteTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, Vec<u8>),
    Remove(usize),
    Get(usize),
    Contains(Vec<u8>),
    Resize(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<Op>)> {
    // Keys include empty and zero-filled byte strings.
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..6), 1..=12)
        .prop_flat_map(|pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let value = proptest::collection::vec(any::<u8>(), 0..8);
            let op = prop_oneof![
                4 => (idx.clone(), value).prop_map(|(i, v)| Op::Insert(i, v)),
                2 => idx.clone().prop_map(Op::Remove),
                2 => idx.clone().prop_map(Op::Get),
                1 => proptest::collection::vec(any::<u8>(), 0..4).prop_map(Op::Contains),
                1 => (0usize..40).prop_map(Op::Resize),
                1 => Just(Op::Clear),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        })
}

// Chain walk over every slot; counts entries and checks each sits in the
// slot its hash selects.
fn check_structure<H: SeededHasher>(t: &ByteTable<'_, CopyAll, H>) -> Result<(), TestCaseError> {
    let mut reachable = 0;
    for &head in &t.slots {
        for k in t.arena.chain(head) {
            let e = t.arena.get(k).expect("chain key resolves");
            prop_assert!(t.contains(&*e.key), "entry must be findable from its slot");
            reachable += 1;
        }
    }
    prop_assert_eq!(reachable, t.len());
    prop_assert!(t.array_size() > 0);
    Ok(())
}

fn run_scenario<H: SeededHasher>(
    mut sut: ByteTable<'static, CopyAll, H>,
    pool: Vec<Vec<u8>>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();
    let mut last_collisions = 0;

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v.clone()).map(|c| c.into_owned());
                prop_assert_eq!(prev, model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k).map(|(kk, vv)| (kk.into_owned(), vv.into_owned()));
                let want = model.remove(k).map(|v| (k.clone(), v));
                prop_assert_eq!(got, want);
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k).map(Vec::as_slice));
            }
            Op::Contains(k) => {
                prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
            }
            Op::Resize(n) => {
                let res = sut.resize(n);
                prop_assert_eq!(res.is_err(), n == 0);
                if n > 0 {
                    prop_assert_eq!(sut.array_size(), n);
                }
            }
            Op::Clear => {
                let size = sut.array_size();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.array_size(), size);
            }
            Op::Iterate => {
                let pairs: Vec<(Vec<u8>, Vec<u8>)> =
                    sut.iter().map(|(k, v)| (k.to_vec(), v.to_vec())).collect();
                let keys: BTreeSet<_> = pairs.iter().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(keys.len(), pairs.len(), "no duplicates");
                for (k, v) in &pairs {
                    prop_assert_eq!(Some(v), model.get(k));
                }
                prop_assert_eq!(pairs.len(), model.len());
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.collisions() >= last_collisions, "collisions never decrease");
        last_collisions = sut.collisions();
        check_structure(&sut)?;
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the replaced value exactly when the key existed.
// - remove hands back the stored pair; absent keys are no-ops.
// - get/contains agree with the model, including empty and zero bytes.
// - resize(n > 0) and implicit growth never lose or duplicate entries.
// - every chain entry is reachable from the slot its hash selects.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), seed in any::<u32>()) {
        let sut = ByteTable::with_config(TableConfig::new().with_seed(seed).with_initial_size(2));
        run_scenario(sut, pool, ops)?;
    }
}

#[derive(Clone, Copy, Default)]
struct ConstHasher;
impl SeededHasher for ConstHasher {
    fn hash_bytes(&self, _seed: u32, _bytes: &[u8]) -> u64 {
        0
    }
}

// Property: same invariants with every key in one chain, stressing
// unlinking at every chain position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ByteTable::with_hasher(TableConfig::new().with_seed(0u32), ConstHasher);
        run_scenario(sut, pool, ops)?;
    }
}

//! Seeded hash strategies.
//!
//! The table only relies on the `SeededHasher` contract: the same seed and
//! bytes always produce the same hash, and changing the seed reshuffles the
//! output. The default strategy is keyed SipHash-1-3.

use core::hash::Hasher;
use siphasher::sip::SipHasher13;

/// Hash function used to place keys into slots.
pub trait SeededHasher {
    fn hash_bytes(&self, seed: u32, bytes: &[u8]) -> u64;
}

/// SipHash-1-3 keyed with a 128-bit key expanded from the 32-bit seed.
#[derive(Copy, Clone, Debug, Default)]
pub struct SipSeeded;

impl SeededHasher for SipSeeded {
    #[inline]
    fn hash_bytes(&self, seed: u32, bytes: &[u8]) -> u64 {
        let (k0, k1) = expand_seed(seed);
        let mut h = SipHasher13::new_with_keys(k0, k1);
        h.write(bytes);
        h.finish()
    }
}

// splitmix64 finalizer; spreads the 32 seed bits over both SipHash keys.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn expand_seed(seed: u32) -> (u64, u64) {
    let k0 = mix64(u64::from(seed));
    (k0, mix64(k0))
}

impl<T: SeededHasher + ?Sized> SeededHasher for &T {
    fn hash_bytes(&self, seed: u32, bytes: &[u8]) -> u64 {
        (**self).hash_bytes(seed, bytes)
    }
}

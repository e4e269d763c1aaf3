//! Ownership modes and the copy-on-insert rule for stored bytes.
//!
//! Stored keys and values are `Cow<'a, [u8]>`. `Cow::Owned` bytes belong to
//! the table and are freed with their entry; `Cow::Borrowed` bytes belong to
//! the caller, and the `'a` lifetime keeps them alive for as long as the
//! table can reach them.
//!
//! The choice is made per side in the table's type. A `Copied` side accepts
//! input of any lifetime and always stores its own bytes, so the caller may
//! reuse or drop the buffer right after `insert`. A `Borrowed` side stores
//! borrowed input as-is and therefore only accepts input that lives for `'a`.

use std::borrow::Cow;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bits describing which sides of a table keep the caller's buffers.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// Copy both keys and values on insert.
    pub const NONE: Flags = Flags(0);
    /// Keys are stored as given and never copied; the caller keeps ownership.
    pub const KEY_CONST: Flags = Flags(1);
    /// Values are stored as given and never copied; the caller keeps ownership.
    pub const VALUE_CONST: Flags = Flags(2);

    const ALL: u8 = 0b11;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a flag set from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Flags(bits & Self::ALL)
    }

    pub const fn union(self, other: Flags) -> Self {
        Flags(self.0 | other.0)
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn key_const(self) -> bool {
        self.contains(Self::KEY_CONST)
    }

    pub const fn value_const(self) -> bool {
        self.contains(Self::VALUE_CONST)
    }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, rhs: Flags) -> Flags {
        self.union(rhs)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.key_const(), self.value_const()) {
            (false, false) => f.write_str("NONE"),
            (true, false) => f.write_str("KEY_CONST"),
            (false, true) => f.write_str("VALUE_CONST"),
            (true, true) => f.write_str("KEY_CONST | VALUE_CONST"),
        }
    }
}

/// Storage rule for one side (keys or values) of a table.
pub trait Policy {
    /// True when the caller keeps ownership of the stored bytes.
    const CALLER_OWNED: bool;
}

/// Input of type `I` as stored under a policy.
pub trait Store<'a, I: AsRef<[u8]>>: Policy {
    fn store(input: I) -> Cow<'a, [u8]>;
}

/// Bytes are copied into the table. Owned input is moved in without a copy.
#[derive(Copy, Clone, Debug)]
pub enum Copied {}

/// Borrowed input is stored as-is and must outlive the table.
#[derive(Copy, Clone, Debug)]
pub enum Borrowed {}

impl Policy for Copied {
    const CALLER_OWNED: bool = false;
}

impl Policy for Borrowed {
    const CALLER_OWNED: bool = true;
}

impl<'a, I: CopyBytes> Store<'a, I> for Copied {
    #[inline]
    fn store(input: I) -> Cow<'a, [u8]> {
        Cow::Owned(input.into_vec())
    }
}

impl<'a, I: IntoBytes<'a> + AsRef<[u8]>> Store<'a, I> for Borrowed {
    #[inline]
    fn store(input: I) -> Cow<'a, [u8]> {
        input.into_bytes()
    }
}

/// Key and value policies of a table, picked when the table is built.
///
/// The four modes match the four `Flags` combinations.
pub trait Mode {
    type Key: Policy;
    type Value: Policy;

    const FLAGS: Flags = Flags::from_bits_truncate(
        <Self::Key as Policy>::CALLER_OWNED as u8
            | (<Self::Value as Policy>::CALLER_OWNED as u8) << 1,
    );
}

/// Keys and values are copied (`Flags::NONE`).
#[derive(Copy, Clone, Debug, Default)]
pub struct CopyAll;

/// Keys are borrowed, values copied (`Flags::KEY_CONST`).
#[derive(Copy, Clone, Debug, Default)]
pub struct KeyConst;

/// Keys are copied, values borrowed (`Flags::VALUE_CONST`).
#[derive(Copy, Clone, Debug, Default)]
pub struct ValueConst;

/// Keys and values are borrowed (`Flags::KEY_CONST | Flags::VALUE_CONST`).
#[derive(Copy, Clone, Debug, Default)]
pub struct AllConst;

impl Mode for CopyAll {
    type Key = Copied;
    type Value = Copied;
}

impl Mode for KeyConst {
    type Key = Borrowed;
    type Value = Copied;
}

impl Mode for ValueConst {
    type Key = Copied;
    type Value = Borrowed;
}

impl Mode for AllConst {
    type Key = Borrowed;
    type Value = Borrowed;
}

/// Input for a `Copied` side. The lifetime of borrowed input is not tied to
/// the table.
pub trait CopyBytes: AsRef<[u8]> {
    fn into_vec(self) -> Vec<u8>
    where
        Self: Sized,
    {
        self.as_ref().to_vec()
    }
}

impl CopyBytes for &[u8] {}
impl<const N: usize> CopyBytes for &[u8; N] {}
impl<const N: usize> CopyBytes for [u8; N] {}
impl CopyBytes for &str {}
impl CopyBytes for &String {}
impl CopyBytes for &Vec<u8> {}

impl CopyBytes for Vec<u8> {
    fn into_vec(self) -> Vec<u8> {
        self
    }
}

impl CopyBytes for Box<[u8]> {
    fn into_vec(self) -> Vec<u8> {
        <[u8]>::into_vec(self)
    }
}

impl CopyBytes for String {
    fn into_vec(self) -> Vec<u8> {
        String::into_bytes(self)
    }
}

impl CopyBytes for Cow<'_, [u8]> {
    fn into_vec(self) -> Vec<u8> {
        self.into_owned()
    }
}

/// Input for a `Borrowed` side.
///
/// Borrowed input must live for `'a`; owned buffers are moved into the
/// table and freed with their entry.
pub trait IntoBytes<'a> {
    fn into_bytes(self) -> Cow<'a, [u8]>;
}

impl<'a> IntoBytes<'a> for &'a [u8] {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<'a, const N: usize> IntoBytes<'a> for &'a [u8; N] {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<'a> IntoBytes<'a> for &'a str {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<'a> IntoBytes<'a> for &'a Vec<u8> {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<'a> IntoBytes<'a> for Vec<u8> {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Owned(self)
    }
}

impl<'a> IntoBytes<'a> for Box<[u8]> {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Owned(<[u8]>::into_vec(self))
    }
}

impl<'a> IntoBytes<'a> for String {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        Cow::Owned(String::into_bytes(self))
    }
}

impl<'a> IntoBytes<'a> for Cow<'a, [u8]> {
    fn into_bytes(self) -> Cow<'a, [u8]> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_and_query() {
        let f = Flags::KEY_CONST | Flags::VALUE_CONST;
        assert!(f.key_const());
        assert!(f.value_const());
        assert!(f.contains(Flags::KEY_CONST));
        assert_eq!(f.bits(), 3);

        let mut g = Flags::NONE;
        assert!(!g.key_const() && !g.value_const());
        g |= Flags::VALUE_CONST;
        assert_eq!(g, Flags::VALUE_CONST);
        assert_eq!(format!("{:?}", g), "VALUE_CONST");
    }

    #[test]
    fn from_bits_drops_unknown_bits() {
        assert_eq!(Flags::from_bits_truncate(0xff).bits(), 3);
        assert_eq!(Flags::from_bits_truncate(1), Flags::KEY_CONST);
    }

    #[test]
    fn modes_report_their_flags() {
        assert_eq!(CopyAll::FLAGS, Flags::NONE);
        assert_eq!(KeyConst::FLAGS, Flags::KEY_CONST);
        assert_eq!(ValueConst::FLAGS, Flags::VALUE_CONST);
        assert_eq!(AllConst::FLAGS, Flags::KEY_CONST | Flags::VALUE_CONST);
        assert!(!<<CopyAll as Mode>::Key as Policy>::CALLER_OWNED);
        assert!(<<KeyConst as Mode>::Key as Policy>::CALLER_OWNED);
        assert!(!<<KeyConst as Mode>::Value as Policy>::CALLER_OWNED);
    }

    #[test]
    fn copied_side_copies_borrowed_input() {
        let src = vec![1u8, 0, 2];
        let stored = <Copied as Store<&[u8]>>::store(&src[..]);
        assert!(matches!(stored, Cow::Owned(_)));
        assert_eq!(stored.as_ref(), &[1, 0, 2]);
        assert_ne!(stored.as_ptr(), src.as_ptr());
    }

    /// Invariant: a copied side never keeps a borrow of its input.
    #[test]
    fn copied_side_outlives_its_input() {
        let stored: Cow<'static, [u8]> = {
            let buf = vec![5u8; 3];
            <Copied as Store<&Vec<u8>>>::store(&buf)
        };
        assert_eq!(stored.as_ref(), &[5, 5, 5]);
    }

    #[test]
    fn borrowed_side_keeps_caller_buffer() {
        let src = vec![7u8; 4];
        let k = <Borrowed as Store<&[u8]>>::store(&src[..]);
        assert!(matches!(k, Cow::Borrowed(_)));
        assert_eq!(k.as_ptr(), src.as_ptr());
    }

    #[test]
    fn owned_input_is_moved_not_copied() {
        let buf = vec![9u8; 8];
        let ptr = buf.as_ptr();
        assert_eq!(<Copied as Store<Vec<u8>>>::store(buf).as_ptr(), ptr);

        let buf = vec![9u8; 8];
        let ptr = buf.as_ptr();
        let stored = <Borrowed as Store<Vec<u8>>>::store(buf);
        assert!(matches!(stored, Cow::Owned(_)));
        assert_eq!(stored.as_ptr(), ptr);
    }

    #[test]
    fn input_conversions() {
        assert_eq!(IntoBytes::into_bytes("ab").as_ref(), b"ab");
        assert_eq!(IntoBytes::into_bytes(b"a\0b").as_ref(), &[b'a', 0, b'b']);
        assert_eq!(IntoBytes::into_bytes(String::from("x")).as_ref(), b"x");
        let boxed: Box<[u8]> = vec![1u8].into_boxed_slice();
        assert_eq!(IntoBytes::into_bytes(boxed).as_ref(), &[1]);

        assert_eq!(CopyBytes::into_vec([1u8, 2]), vec![1, 2]);
        assert_eq!(CopyBytes::into_vec(&String::from("yz")), b"yz".to_vec());
        assert_eq!(CopyBytes::into_vec(Cow::Borrowed(&b"c"[..])), b"c".to_vec());
    }
}

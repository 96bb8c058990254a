//! Bit-granular values: domain-separation suffixes and a growable bit string.
//!
//! Bits are numbered in Keccak order: bit `i` of a byte is `(byte >> i) & 1`,
//! and the first bit of a message is bit 0 of its first byte.

use alloc::vec::Vec;

use crate::error::{KeccakError, Result};

/// A short bit pattern appended to the message before `pad10*1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomainSuffix {
	bits: u8,
	len: u8,
}

impl DomainSuffix {
	/// `bits` holds the suffix with its first bit in the least significant
	/// position. Bits above `len` must be clear.
	pub fn new(bits: u8, len: usize) -> Result<Self> {
		if len == 0 || len > 8 {
			return Err(KeccakError::InvalidBitCount {count: len});
		}

		if len < 8 && bits >> len != 0 {
			return Err(KeccakError::InvalidBitCount {count: 8 - bits.leading_zeros() as usize});
		}

		Ok(Self {bits, len: len as u8})
	}

	pub(crate) const fn from_parts(bits: u8, len: u8) -> Self {
		Self {bits, len}
	}

	/// Parses a suffix written in message order, so `"01"` is a zero bit followed by a one bit.
	pub fn parse(text: &str) -> Result<Self> {
		let text = text.trim();
		let mut bits = 0;
		let mut len = 0;

		for c in text.chars() {
			let bit: u8 = match c {
				'0' => 0,
				'1' => 1,
				found => return Err(KeccakError::InvalidBitString {found}),
			};

			if len == 8 {
				return Err(KeccakError::InvalidBitCount {count: text.chars().count()});
			}

			bits |= bit << len;
			len += 1;
		}

		Self::new(bits, len)
	}

	pub const fn bits(&self) -> u8 {
		self.bits
	}

	pub const fn bit_count(&self) -> usize {
		self.len as usize
	}
}

/// A growable sequence of bits backed by bytes, with an explicit count of the
/// valid bits in the last byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitString {
	bytes: Vec<u8>,
	// 1 ..= 8 when non-empty
	last_bits: u8,
}

impl BitString {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_bytes(bytes: &[u8]) -> Self {
		let last_bits = if bytes.is_empty() {0} else {8};

		Self {bytes: bytes.to_vec(), last_bits}
	}

	pub fn bit_len(&self) -> usize {
		match self.bytes.len() {
			0 => 0,
			n => (n - 1) * 8 + usize::from(self.last_bits),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn is_byte_aligned(&self) -> bool {
		self.last_bits == 8 || self.bytes.is_empty()
	}

	pub fn push_bit(&mut self, bit: bool) {
		if self.is_byte_aligned() {
			self.bytes.push(0);
			self.last_bits = 0;
		}

		if bit {
			// the pushed-into byte always exists at this point
			if let Some(last) = self.bytes.last_mut() {
				*last |= 1 << self.last_bits;
			}
		}

		self.last_bits += 1;
	}

	/// Appends the low `count` bits of `bits`, least significant first.
	pub fn append_bits(&mut self, bits: u8, count: usize) -> Result<()> {
		if count > 8 {
			return Err(KeccakError::InvalidBitCount {count});
		}

		for i in 0 .. count {
			self.push_bit((bits >> i) & 1 != 0);
		}

		Ok(())
	}

	pub fn append_suffix(&mut self, suffix: DomainSuffix) {
		for i in 0 .. suffix.bit_count() {
			self.push_bit((suffix.bits() >> i) & 1 != 0);
		}
	}

	pub fn append_bytes(&mut self, bytes: &[u8]) {
		if self.is_byte_aligned() {
			self.bytes.extend_from_slice(bytes);

			if !bytes.is_empty() {
				self.last_bits = 8;
			}

			return;
		}

		for &byte in bytes {
			for i in 0 .. 8 {
				self.push_bit((byte >> i) & 1 != 0);
			}
		}
	}

	/// The backing bytes. Unused high bits of the last byte are zero.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}

#[test]
fn parses_fips_suffixes() {
	assert_eq!(DomainSuffix::parse("01").unwrap(), DomainSuffix::from_parts(0b10, 2));
	assert_eq!(DomainSuffix::parse("11").unwrap(), DomainSuffix::from_parts(0b11, 2));
	assert_eq!(DomainSuffix::parse("1111").unwrap(), DomainSuffix::from_parts(0b1111, 4));
	assert_eq!(DomainSuffix::parse(" 00 ").unwrap(), DomainSuffix::from_parts(0b00, 2));
}

#[test]
fn rejects_bad_suffixes() {
	assert_eq!(DomainSuffix::parse(""), Err(KeccakError::InvalidBitCount {count: 0}));
	assert_eq!(DomainSuffix::parse("012"), Err(KeccakError::InvalidBitString {found: '2'}));
	assert_eq!(DomainSuffix::parse("010101010"), Err(KeccakError::InvalidBitCount {count: 9}));
	assert_eq!(DomainSuffix::new(0, 9), Err(KeccakError::InvalidBitCount {count: 9}));
	assert!(DomainSuffix::new(0b100, 2).is_err());
	assert!(DomainSuffix::new(0xff, 8).is_ok());
}

#[test]
fn bit_string_tracks_partial_bytes() {
	let mut bits = BitString::new();
	assert!(bits.is_empty());

	bits.append_bits(0b101, 3).unwrap();
	assert_eq!(bits.bit_len(), 3);
	assert!(!bits.is_byte_aligned());

	bits.append_bytes(&[0xff]);
	assert_eq!(bits.bit_len(), 11);
	assert_eq!(bits.as_bytes(), &[0b1111_1101, 0b111]);

	assert_eq!(bits.append_bits(0, 9), Err(KeccakError::InvalidBitCount {count: 9}));
}

#[test]
fn aligned_append_copies_bytes() {
	let mut bits = BitString::from_bytes(b"ab");
	bits.append_bytes(b"cd");

	assert_eq!(bits.bit_len(), 32);
	assert_eq!(bits.into_bytes(), b"abcd");
}

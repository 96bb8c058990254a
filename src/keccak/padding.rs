//! Multi-rate padding, `pad10*1`, with the domain suffix in front of it.
//!
//! The byte path works on whole-byte messages and is what the sponge uses.
//! The bit path accepts any [`BitString`] and exists to pin the byte path
//! down against the bit-level definition.

use alloc::vec;
use alloc::vec::Vec;

use super::bits::{BitString, DomainSuffix};

// suffix bits plus the leading 1 of the padding
fn head_bits(suffix: DomainSuffix) -> usize {
	suffix.bit_count() + 1
}

/// Number of bytes appended to a `message_len`-byte message.
pub fn padding_len(message_len: usize, rate_bytes: usize, suffix: DomainSuffix) -> usize {
	let head = head_bits(suffix);
	let mut min_len = message_len + (head + 7) / 8;

	// the closing 1 bit needs a fresh byte when the head fills its last one
	if head % 8 == 0 {
		min_len += 1;
	}

	min_len.next_multiple_of(rate_bytes) - message_len
}

/// Writes the padding into `tail`, which must be zeroed and exactly
/// [`padding_len`] bytes long.
pub(crate) fn write_padding(tail: &mut [u8], suffix: DomainSuffix) {
	let head = u16::from(suffix.bits()) | (1 << suffix.bit_count());
	let [low, high] = head.to_le_bytes();

	tail[0] = low;

	if high != 0 {
		tail[1] = high;
	}

	if let Some(last) = tail.last_mut() {
		*last |= 0x80;
	}
}

pub fn pad10_1(message: &[u8], rate_bytes: usize, suffix: DomainSuffix) -> Vec<u8> {
	let pad_len = padding_len(message.len(), rate_bytes, suffix);

	let mut out = vec![0; message.len() + pad_len];
	out[.. message.len()].copy_from_slice(message);
	write_padding(&mut out[message.len() ..], suffix);

	out
}

pub fn pad10_1_bits(message: &BitString, rate_bits: usize, suffix: DomainSuffix) -> BitString {
	let mut out = message.clone();
	out.append_suffix(suffix);
	out.push_bit(true);

	// not constant time in the message length
	while (out.bit_len() + 1) % rate_bits != 0 {
		out.push_bit(false);
	}

	out.push_bit(true);

	out
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
use super::params::KeccakParameter;

#[test]
fn sha3_empty_block() {
	let suffix = KeccakParameter::Sha3_256.suffix();
	let padded = pad10_1(b"", 136, suffix);

	assert_eq!(padded.len(), 136);
	assert_eq!(padded[0], 0x06);
	assert_eq!(padded[135], 0x80);
	assert!(padded[1 .. 135].iter().all(|&b| b == 0));
}

#[test]
fn shake_one_byte_short_of_rate() {
	// the suffix byte and the closing bit share the last byte
	let suffix = KeccakParameter::Shake128.suffix();
	let padded = pad10_1(&[0xaa; 167], 168, suffix);

	assert_eq!(padded.len(), 168);
	assert_eq!(padded[167], 0x9f);
}

#[test]
fn full_block_message_gets_a_whole_padding_block() {
	let suffix = KeccakParameter::Sha3_512.suffix();
	let padded = pad10_1(&[0x11; 72], 72, suffix);

	assert_eq!(padded.len(), 144);
	assert_eq!(padded[72], 0x06);
	assert_eq!(padded[143], 0x80);
}

#[test]
fn wide_suffixes_spill_into_the_next_byte() {
	let seven = DomainSuffix::new(0x7f, 7).unwrap();
	let padded = pad10_1(&[0; 71], 72, seven);

	assert_eq!(padded.len(), 144);
	assert_eq!(padded[71], 0xff);
	assert_eq!(padded[143], 0x80);

	let eight = DomainSuffix::new(0x00, 8).unwrap();
	let padded = pad10_1(&[0; 70], 72, eight);

	assert_eq!(padded.len(), 72);
	assert_eq!(&padded[70 ..], &[0x00, 0x81]);
}

#[cfg(test)]
fn any_suffix() -> impl Strategy<Value = DomainSuffix> {
	(1usize ..= 8, any::<u8>()).prop_map(|(len, bits)| {
		let mask = if len == 8 {0xff} else {(1u8 << len) - 1};
		DomainSuffix::from_parts(bits & mask, len as u8)
	})
}

#[cfg(test)]
fn any_parameter() -> impl Strategy<Value = KeccakParameter> {
	prop::sample::select(KeccakParameter::ALL.to_vec())
}

#[cfg(test)]
proptest! {
	#[test]
	fn padded_length_is_block_aligned(
		message in prop::collection::vec(any::<u8>(), 0 .. 400),
		parameter in any_parameter(),
	) {
		let rate = parameter.rate_bytes();
		let padded = pad10_1(&message, rate, parameter.suffix());

		prop_assert_eq!(padded.len() % rate, 0);
		prop_assert!(padded.len() > message.len());
		prop_assert_eq!(&padded[.. message.len()], &message[..]);
	}

	#[test]
	fn byte_and_bit_paths_agree(
		message in prop::collection::vec(any::<u8>(), 0 .. 400),
		parameter in any_parameter(),
		suffix in any_suffix(),
	) {
		for suffix in [parameter.suffix(), suffix] {
			let bytes = pad10_1(&message, parameter.rate_bytes(), suffix);
			let bits = pad10_1_bits(&BitString::from_bytes(&message), parameter.rate_bits(), suffix);

			prop_assert!(bits.is_byte_aligned());
			prop_assert_eq!(bits.into_bytes(), bytes);
		}
	}
}

#[test]
fn paths_agree_at_every_length_around_the_boundary() {
	for parameter in KeccakParameter::ALL {
		let rate = parameter.rate_bytes();

		for len in rate - 3 ..= rate + 1 {
			let message = vec![0x5a; len];
			let bytes = pad10_1(&message, rate, parameter.suffix());
			let bits = pad10_1_bits(&BitString::from_bytes(&message), parameter.rate_bits(), parameter.suffix());

			assert_eq!(bits.into_bytes(), bytes, "{} at {} bytes", parameter, len);
		}
	}
}

#[test]
fn bit_path_handles_unaligned_messages() {
	// message 1 0 1 1 0, suffix 0 1, then the leading 1 of the padding
	let mut message = BitString::new();
	message.append_bits(0b01101, 5).unwrap();

	let padded = pad10_1_bits(&message, 1152, KeccakParameter::Sha3_224.suffix());
	let bytes = padded.as_bytes();

	assert_eq!(padded.bit_len(), 1152);
	assert_eq!(bytes[0], 0b1100_1101);
	assert_eq!(bytes[143], 0x80);
}

//! Length-prefixed and length-suffixed encodings from NIST SP 800-185.

use alloc::vec::Vec;
use core::ops::Deref;

const INT_BYTES: usize = core::mem::size_of::<u128>();

/// An integer encoded with its one-byte length field, held inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
	bytes: [u8; INT_BYTES + 1],
	len: usize,
}

impl Deref for Encoded {
	type Target = [u8];

	fn deref(&self) -> &[u8] {
		&self.bytes[.. self.len]
	}
}

impl AsRef<[u8]> for Encoded {
	fn as_ref(&self) -> &[u8] {
		self
	}
}

// minimal big-endian form, at least one byte
fn significant_bytes(x: u128) -> ([u8; INT_BYTES], usize) {
	let be = x.to_be_bytes();
	let skip = be[.. INT_BYTES - 1].iter().take_while(|&&b| b == 0).count();

	(be, skip)
}

pub fn left_encode(x: u128) -> Encoded {
	let (be, skip) = significant_bytes(x);
	let n = INT_BYTES - skip;

	let mut bytes = [0; INT_BYTES + 1];
	bytes[0] = n as u8;
	bytes[1 ..= n].copy_from_slice(&be[skip ..]);

	Encoded {bytes, len: n + 1}
}

pub fn right_encode(x: u128) -> Encoded {
	let (be, skip) = significant_bytes(x);
	let n = INT_BYTES - skip;

	let mut bytes = [0; INT_BYTES + 1];
	bytes[.. n].copy_from_slice(&be[skip ..]);
	bytes[n] = n as u8;

	Encoded {bytes, len: n + 1}
}

/// `left_encode(8 * len(s)) || s`
pub fn encode_string(s: &[u8]) -> Vec<u8> {
	let prefix = left_encode(s.len() as u128 * 8);

	let mut out = Vec::with_capacity(prefix.len() + s.len());
	out.extend_from_slice(&prefix);
	out.extend_from_slice(s);

	out
}

/// `left_encode(w) || s`, zero-filled up to a multiple of `w`. Already
/// aligned input gets no extra block.
pub fn bytepad(s: &[u8], w: usize) -> Vec<u8> {
	debug_assert!(w > 0);

	let prefix = left_encode(w as u128);
	let len = (prefix.len() + s.len()).next_multiple_of(w);

	let mut out = Vec::with_capacity(len);
	out.extend_from_slice(&prefix);
	out.extend_from_slice(s);
	out.resize(len, 0);

	out
}

#[test]
fn left_encode_examples() {
	assert_eq!(&*left_encode(0), &[1, 0]);
	assert_eq!(&*left_encode(168), &[1, 168]);
	assert_eq!(&*left_encode(256), &[2, 1, 0]);
	assert_eq!(&*left_encode(0x0102_0304), &[4, 1, 2, 3, 4]);

	let max = left_encode(u128::MAX);
	assert_eq!(max.len(), 17);
	assert_eq!(max[0], 16);
	assert!(max[1 ..].iter().all(|&b| b == 0xff));
}

#[test]
fn right_encode_examples() {
	assert_eq!(&*right_encode(0), &[0, 1]);
	assert_eq!(&*right_encode(256), &[1, 0, 2]);
	assert_eq!(right_encode(u64::MAX as u128).as_ref(), &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 8]);
}

#[test]
fn encode_string_prefixes_bit_length() {
	assert_eq!(encode_string(b""), [1, 0]);
	assert_eq!(encode_string(b"KMAC"), [1, 32, b'K', b'M', b'A', b'C']);

	let long = [0x41; 32];
	let encoded = encode_string(&long);
	assert_eq!(&encoded[.. 3], &[2, 1, 0]);
	assert_eq!(&encoded[3 ..], &long);
}

#[test]
fn bytepad_fills_to_width() {
	let padded = bytepad(b"abc", 8);
	assert_eq!(padded, [1, 8, b'a', b'b', b'c', 0, 0, 0]);

	let aligned = bytepad(&[7; 6], 8);
	assert_eq!(aligned.len(), 8);

	let spill = bytepad(&[7; 7], 8);
	assert_eq!(spill.len(), 16);
	assert!(spill[9 ..].iter().all(|&b| b == 0));
}

#[test]
fn cshake_prefix_shape() {
	// bytepad(encode_string("") || encode_string("Email Signature"), 168)
	let mut body = encode_string(b"");
	body.extend_from_slice(&encode_string(b"Email Signature"));

	let padded = bytepad(&body, 168);

	assert_eq!(padded.len(), 168);
	assert_eq!(&padded[.. 6], &[1, 168, 1, 0, 1, 120]);
	assert_eq!(&padded[6 .. 21], b"Email Signature");
	assert!(padded[21 ..].iter().all(|&b| b == 0));
}

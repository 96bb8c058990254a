//! Lazy output reads from a finished sponge.

use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use super::params::KeccakParameter;
use super::sponge::Sponge;
use crate::error::{KeccakError, Result};

/// Squeezes output on demand, one rate-sized block at a time.
///
/// A cursor with a limit refuses any read that would take it past the limit
/// and reads nothing in that case. Without a limit it never runs out.
#[derive(Clone)]
pub struct OutputCursor {
	parameter: KeccakParameter,
	sponge: Sponge,
	// bytes of the current block already handed out
	used: usize,
	emitted: usize,
	limit: Option<usize>,
}

impl OutputCursor {
	pub(crate) fn new(parameter: KeccakParameter, sponge: Sponge, limit: Option<usize>) -> Self {
		let used = sponge.rate();

		Self {parameter, sponge, used, emitted: 0, limit}
	}

	pub fn parameter(&self) -> KeccakParameter {
		self.parameter
	}

	pub fn limit(&self) -> Option<usize> {
		self.limit
	}

	pub fn emitted(&self) -> usize {
		self.emitted
	}

	/// Bytes left before the limit, `None` when unbounded.
	pub fn remaining(&self) -> Option<usize> {
		self.limit.map(|limit| limit - self.emitted)
	}

	pub fn has_next(&self) -> bool {
		self.remaining() != Some(0)
	}

	fn reserve(&self, len: usize) -> Result<()> {
		let Some(limit) = self.limit else {
			return Ok(());
		};

		let requested = self.emitted.saturating_add(len);

		if requested > limit {
			trace!(parameter = %self.parameter, limit, requested, "output limit reached");

			return Err(KeccakError::OutputExhausted {parameter: self.parameter, limit, requested});
		}

		Ok(())
	}

	fn copy_out(&mut self, dest: &mut [u8]) {
		let rate = self.sponge.rate();
		let mut filled = 0;

		while filled < dest.len() {
			if self.used == rate {
				self.sponge.squeeze();
				self.used = 0;
			}

			let block = &self.sponge.block()[self.used ..];
			let take = block.len().min(dest.len() - filled);
			dest[filled ..][.. take].copy_from_slice(&block[.. take]);

			self.used += take;
			filled += take;
		}

		self.emitted += filled;
	}

	/// Fills `dest` entirely, or fails without reading anything.
	pub fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
		self.reserve(dest.len())?;
		self.copy_out(dest);

		Ok(())
	}

	pub fn next_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		self.reserve(len)?;

		let mut out = vec![0; len];
		self.copy_out(&mut out);

		Ok(out)
	}

	fn next_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0; N];
		self.fill(&mut out)?;

		Ok(out)
	}

	pub fn next_byte(&mut self) -> Result<u8> {
		let [byte] = self.next_array()?;

		Ok(byte)
	}

	pub fn next_u16(&mut self) -> Result<u16> {
		self.next_array().map(u16::from_be_bytes)
	}

	pub fn next_u32(&mut self) -> Result<u32> {
		self.next_array().map(u32::from_be_bytes)
	}

	pub fn next_u64(&mut self) -> Result<u64> {
		self.next_array().map(u64::from_be_bytes)
	}

	pub fn next_f32(&mut self) -> Result<f32> {
		self.next_u32().map(f32::from_bits)
	}

	pub fn next_f64(&mut self) -> Result<f64> {
		self.next_u64().map(f64::from_bits)
	}

	/// True when the next byte has an odd number of set bits.
	pub fn next_bool(&mut self) -> Result<bool> {
		self.next_byte().map(|byte| byte.count_ones() % 2 == 1)
	}
}

impl Iterator for OutputCursor {
	type Item = u8;

	fn next(&mut self) -> Option<u8> {
		self.next_byte().ok()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.remaining() {
			Some(remaining) => (remaining, Some(remaining)),
			None => (usize::MAX, None),
		}
	}
}

#[cfg(test)]
fn cursor(parameter: KeccakParameter, message: &[u8]) -> OutputCursor {
	let mut sponge = Sponge::new(parameter);
	sponge.absorb(message).unwrap();

	OutputCursor::new(parameter, sponge, parameter.max_output_bytes())
}

#[test]
fn reads_span_block_boundaries() {
	// 136-byte rate, so 300 bytes take three squeezes
	let mut whole = cursor(KeccakParameter::Shake256, b"abc");
	let all = whole.next_bytes(300).unwrap();

	let mut pieces = cursor(KeccakParameter::Shake256, b"abc");
	let mut joined = Vec::new();

	for len in [1, 135, 1, 2, 136, 25] {
		joined.extend(pieces.next_bytes(len).unwrap());
	}

	assert_eq!(joined, all);
	assert_eq!(pieces.emitted(), 300);
	assert_eq!(
		hex::encode(&all[.. 32]),
		"483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739",
	);
}

#[test]
fn typed_reads_are_big_endian() {
	let bytes = cursor(KeccakParameter::Shake128, b"").next_bytes(32).unwrap();
	let mut typed = cursor(KeccakParameter::Shake128, b"");

	assert_eq!(typed.next_u16().unwrap(), u16::from_be_bytes([bytes[0], bytes[1]]));
	assert_eq!(typed.next_u32().unwrap(), u32::from_be_bytes(bytes[2 .. 6].try_into().unwrap()));
	assert_eq!(typed.next_u64().unwrap(), u64::from_be_bytes(bytes[6 .. 14].try_into().unwrap()));
	assert_eq!(typed.next_f32().unwrap().to_bits(), u32::from_be_bytes(bytes[14 .. 18].try_into().unwrap()));
	assert_eq!(typed.next_f64().unwrap().to_bits(), u64::from_be_bytes(bytes[18 .. 26].try_into().unwrap()));
	assert_eq!(typed.next_bool().unwrap(), bytes[26].count_ones() % 2 == 1);
	assert_eq!(typed.next_byte().unwrap(), bytes[27]);
	assert_eq!(typed.emitted(), 28);
}

#[test]
fn fixed_output_stops_at_the_limit() {
	let mut sha3 = cursor(KeccakParameter::Sha3_256, b"");

	assert_eq!(sha3.remaining(), Some(32));
	assert_eq!(sha3.next_bytes(31).unwrap().len(), 31);
	assert!(sha3.has_next());

	// a read that does not fit takes nothing
	assert_eq!(
		sha3.next_u16(),
		Err(KeccakError::OutputExhausted {parameter: KeccakParameter::Sha3_256, limit: 32, requested: 33}),
	);
	assert_eq!(sha3.emitted(), 31);

	assert_eq!(sha3.next_byte().unwrap(), 0x4a);
	assert!(!sha3.has_next());
	assert!(sha3.next_byte().is_err());
	assert_eq!(sha3.next(), None);
}

#[test]
fn iterator_matches_explicit_reads() {
	let iterated: Vec<u8> = cursor(KeccakParameter::Sha3_224, b"abc").collect();
	let read = cursor(KeccakParameter::Sha3_224, b"abc").next_bytes(28).unwrap();

	assert_eq!(iterated, read);
	assert_eq!(cursor(KeccakParameter::Sha3_224, b"").size_hint(), (28, Some(28)));
}

#[test]
fn extendable_output_has_no_limit() {
	let mut shake = cursor(KeccakParameter::RawShake256, b"");

	assert_eq!(shake.remaining(), None);
	assert_eq!(shake.by_ref().take(10_000).count(), 10_000);
	assert!(shake.has_next());
	assert_eq!(shake.emitted(), 10_000);
}

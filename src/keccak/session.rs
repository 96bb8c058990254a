//! Incremental hashing sessions for every parameter in the catalog.
//!
//! A session is configured once through [`SessionBuilder`]. The builder turns
//! the parameter and its options into a framing: the bytes absorbed before
//! the message, the bytes absorbed after it, the domain suffix and the output
//! bounds. Everything after that is the same for every variant.

use alloc::vec::Vec;

use tracing::debug;
use zeroize::Zeroizing;

use super::bits::DomainSuffix;
use super::buffer::BlockBuffer;
use super::cursor::OutputCursor;
use super::encoding::{bytepad, encode_string, right_encode, Encoded};
use super::params::KeccakParameter;
use super::sponge::Sponge;
use crate::error::{KeccakError, Result};

/// How a session holds input until it is finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
	/// Collect input in blocks and absorb it all on finalize.
	#[default]
	Buffered,
	/// Absorb input into the sponge as soon as it arrives.
	Streaming,
}

#[derive(Clone)]
struct Framing {
	parameter: KeccakParameter,
	// may contain a KMAC key
	prefix: Zeroizing<Vec<u8>>,
	trailer: Option<Encoded>,
	suffix: DomainSuffix,
	output_limit: Option<usize>,
	default_output: usize,
}

impl Framing {
	fn sponge(&self) -> Sponge {
		Sponge::primed(self.parameter, self.suffix, &self.prefix)
	}
}

fn cshake_prefix(rate: usize, function_name: &[u8], customization: &[u8]) -> Vec<u8> {
	let mut body = encode_string(function_name);
	body.extend_from_slice(&encode_string(customization));

	bytepad(&body, rate)
}

fn kmac_prefix(rate: usize, key: &[u8], customization: &[u8]) -> Zeroizing<Vec<u8>> {
	let mut prefix = Zeroizing::new(cshake_prefix(rate, b"KMAC", customization));
	let encoded_key = Zeroizing::new(encode_string(key));
	let padded_key = Zeroizing::new(bytepad(&encoded_key, rate));
	prefix.extend_from_slice(&padded_key);

	prefix
}

#[derive(Clone)]
pub struct SessionBuilder {
	parameter: KeccakParameter,
	function_name: Option<Vec<u8>>,
	customization: Option<Vec<u8>>,
	key: Option<Zeroizing<Vec<u8>>>,
	output_length: Option<usize>,
	block_capacity: Option<usize>,
	strategy: Strategy,
}

impl SessionBuilder {
	pub fn new(parameter: KeccakParameter) -> Self {
		Self {
			parameter,
			function_name: None,
			customization: None,
			key: None,
			output_length: None,
			block_capacity: None,
			strategy: Strategy::default(),
		}
	}

	/// The cSHAKE function name `N`.
	pub fn function_name(mut self, function_name: &[u8]) -> Self {
		self.function_name = Some(function_name.to_vec());
		self
	}

	/// The customization string `S` of cSHAKE and KMAC.
	pub fn customization(mut self, customization: &[u8]) -> Self {
		self.customization = Some(customization.to_vec());
		self
	}

	pub fn key(mut self, key: &[u8]) -> Self {
		self.key = Some(Zeroizing::new(key.to_vec()));
		self
	}

	/// Output length in bytes. For KMAC this is `L` and also the hard limit.
	/// For the other parameters it is what [`Session::digest`] returns.
	pub fn output_length(mut self, output_length: usize) -> Self {
		self.output_length = Some(output_length);
		self
	}

	/// Block size used by [`Strategy::Buffered`], defaults to the rate.
	pub fn block_capacity(mut self, block_capacity: usize) -> Self {
		self.block_capacity = Some(block_capacity);
		self
	}

	pub fn strategy(mut self, strategy: Strategy) -> Self {
		self.strategy = strategy;
		self
	}

	fn framing(&self) -> Result<Framing> {
		let parameter = self.parameter;
		let rate = parameter.rate_bytes();

		match (parameter.is_keyed(), &self.key) {
			(true, None) => return Err(KeccakError::MissingKey {parameter}),
			(false, Some(_)) => return Err(KeccakError::UnexpectedKey {parameter}),
			_ => {},
		}

		let misplaced_name = self.function_name.is_some() && !parameter.takes_function_name();
		let misplaced_customization = self.customization.is_some() && !parameter.is_customizable();

		if misplaced_name || misplaced_customization {
			return Err(KeccakError::UnexpectedFraming {parameter});
		}

		let default_output = self.output_length.unwrap_or(parameter.min_output_bytes());

		if let Some(limit) = parameter.max_output_bytes() {
			if default_output > limit {
				return Err(KeccakError::OutputExhausted {parameter, limit, requested: default_output});
			}
		}

		let function_name = self.function_name.as_deref().unwrap_or_default();
		let customization = self.customization.as_deref().unwrap_or_default();

		let mut framing = Framing {
			parameter,
			prefix: Zeroizing::new(Vec::new()),
			trailer: None,
			suffix: parameter.suffix(),
			output_limit: parameter.max_output_bytes(),
			default_output,
		};

		match parameter {
			KeccakParameter::CShake128 | KeccakParameter::CShake256 => {
				// with nothing to customize, cSHAKE is plain SHAKE
				if function_name.is_empty() && customization.is_empty() {
					framing.suffix = KeccakParameter::Shake128.suffix();
				} else {
					framing.prefix = Zeroizing::new(cshake_prefix(rate, function_name, customization));
				}
			},
			KeccakParameter::Kmac128 | KeccakParameter::Kmac256 => {
				let key = self.key.as_deref().map(Vec::as_slice).unwrap_or_default();
				framing.prefix = kmac_prefix(rate, key, customization);
				framing.trailer = Some(right_encode(default_output as u128 * 8));
				framing.output_limit = Some(default_output);
			},
			KeccakParameter::KmacXof128 | KeccakParameter::KmacXof256 => {
				let key = self.key.as_deref().map(Vec::as_slice).unwrap_or_default();
				framing.prefix = kmac_prefix(rate, key, customization);
				framing.trailer = Some(right_encode(0));
			},
			_ => {},
		}

		Ok(framing)
	}

	pub fn build(self) -> Result<Session> {
		let framing = self.framing()?;

		let input = match self.strategy {
			Strategy::Buffered => {
				let capacity = self.block_capacity.unwrap_or(self.parameter.rate_bytes());
				Input::Buffered(BlockBuffer::new(capacity)?)
			},
			Strategy::Streaming => {
				if self.block_capacity == Some(0) {
					return Err(KeccakError::ZeroBlockCapacity);
				}

				Input::Streaming(framing.sponge())
			},
		};

		Ok(Session {framing, input, absorbed: 0, finalized: false})
	}
}

enum Input {
	Buffered(BlockBuffer),
	Streaming(Sponge),
}

/// An incremental hash: feed it with the `update` methods, then
/// [`finalize`](Self::finalize) it into an [`OutputCursor`].
pub struct Session {
	framing: Framing,
	input: Input,
	absorbed: u64,
	finalized: bool,
}

impl Session {
	/// A session with default options. Fails for KMAC, which needs a key.
	pub fn new(parameter: KeccakParameter) -> Result<Self> {
		SessionBuilder::new(parameter).build()
	}

	pub fn builder(parameter: KeccakParameter) -> SessionBuilder {
		SessionBuilder::new(parameter)
	}

	pub fn parameter(&self) -> KeccakParameter {
		self.framing.parameter
	}

	/// Length returned by [`digest`](Self::digest).
	pub fn output_length(&self) -> usize {
		self.framing.default_output
	}

	pub fn strategy(&self) -> Strategy {
		match self.input {
			Input::Buffered(_) => Strategy::Buffered,
			Input::Streaming(_) => Strategy::Streaming,
		}
	}

	pub fn is_finalized(&self) -> bool {
		self.finalized
	}

	pub fn update(&mut self, bytes: &[u8]) -> Result<()> {
		if self.finalized {
			return Err(KeccakError::AlreadyFinalized);
		}

		match &mut self.input {
			Input::Buffered(buffer) => buffer.update(bytes)?,
			Input::Streaming(sponge) => sponge.absorb(bytes)?,
		}

		self.absorbed = self.absorbed.saturating_add(bytes.len() as u64);

		Ok(())
	}

	pub fn update_byte(&mut self, byte: u8) -> Result<()> {
		self.update(&[byte])
	}

	pub fn update_u16(&mut self, value: u16) -> Result<()> {
		self.update(&value.to_be_bytes())
	}

	pub fn update_u32(&mut self, value: u32) -> Result<()> {
		self.update(&value.to_be_bytes())
	}

	pub fn update_u64(&mut self, value: u64) -> Result<()> {
		self.update(&value.to_be_bytes())
	}

	pub fn update_f32(&mut self, value: f32) -> Result<()> {
		self.update_u32(value.to_bits())
	}

	pub fn update_f64(&mut self, value: f64) -> Result<()> {
		self.update_u64(value.to_bits())
	}

	/// Closes the input and returns a cursor over the output. The session
	/// refuses further input until it is [`reset`](Self::reset).
	pub fn finalize(&mut self) -> Result<OutputCursor> {
		if self.finalized {
			return Err(KeccakError::AlreadyFinalized);
		}

		let mut sponge = match &mut self.input {
			Input::Buffered(buffer) => {
				let blocks = buffer.finalize();
				let mut sponge = self.framing.sponge();
				sponge.absorb_blocks(&blocks)?;
				sponge
			},
			Input::Streaming(sponge) => core::mem::replace(sponge, self.framing.sponge()),
		};

		if let Some(trailer) = &self.framing.trailer {
			sponge.absorb(trailer)?;
		}

		sponge.finish()?;
		self.finalized = true;

		debug!(
			parameter = %self.framing.parameter,
			absorbed = self.absorbed,
			strategy = ?self.strategy(),
			"session finalized"
		);

		Ok(OutputCursor::new(self.framing.parameter, sponge, self.framing.output_limit))
	}

	/// Finalizes, reads [`output_length`](Self::output_length) bytes and
	/// resets the session for the next message.
	pub fn digest(&mut self) -> Result<Vec<u8>> {
		let mut cursor = self.finalize()?;
		let out = cursor.next_bytes(self.framing.default_output);
		self.reset();

		out
	}

	/// Drops pending input and starts a new message with the same configuration.
	pub fn reset(&mut self) {
		match &mut self.input {
			Input::Buffered(buffer) => buffer.clear(),
			Input::Streaming(sponge) => *sponge = self.framing.sponge(),
		}

		self.absorbed = 0;
		self.finalized = false;

		debug!(parameter = %self.framing.parameter, "session reset");
	}
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
const KEY: [u8; 32] = [
	0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x4b, 0x4c, 0x4d, 0x4e, 0x4f,
	0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f,
];

#[cfg(test)]
fn builder_for(parameter: KeccakParameter) -> SessionBuilder {
	let builder = SessionBuilder::new(parameter);

	if parameter.is_keyed() {
		builder.key(&KEY).customization(b"My Tagged Application")
	} else if parameter.takes_function_name() {
		builder.function_name(b"TAK").customization(b"KAT")
	} else {
		builder
	}
}

#[test]
fn configuration_errors() {
	use KeccakParameter::*;

	assert_eq!(Session::new(Kmac128).err(), Some(KeccakError::MissingKey {parameter: Kmac128}));
	assert_eq!(Session::new(KmacXof256).err(), Some(KeccakError::MissingKey {parameter: KmacXof256}));

	let keyed_sha3 = Session::builder(Sha3_256).key(b"k").build();
	assert_eq!(keyed_sha3.err(), Some(KeccakError::UnexpectedKey {parameter: Sha3_256}));

	let named_shake = Session::builder(Shake128).function_name(b"N").build();
	assert_eq!(named_shake.err(), Some(KeccakError::UnexpectedFraming {parameter: Shake128}));

	let named_kmac = Session::builder(Kmac128).key(b"k").function_name(b"N").build();
	assert_eq!(named_kmac.err(), Some(KeccakError::UnexpectedFraming {parameter: Kmac128}));

	let customized_sha3 = Session::builder(Sha3_512).customization(b"S").build();
	assert_eq!(customized_sha3.err(), Some(KeccakError::UnexpectedFraming {parameter: Sha3_512}));

	let long_sha3 = Session::builder(Sha3_224).output_length(29).build();
	assert_eq!(
		long_sha3.err(),
		Some(KeccakError::OutputExhausted {parameter: Sha3_224, limit: 28, requested: 29}),
	);

	let zero_blocks = Session::builder(Shake256).block_capacity(0).build();
	assert_eq!(zero_blocks.err(), Some(KeccakError::ZeroBlockCapacity));

	let zero_streaming = Session::builder(Shake256).block_capacity(0).strategy(Strategy::Streaming).build();
	assert_eq!(zero_streaming.err(), Some(KeccakError::ZeroBlockCapacity));
}

#[test]
fn finalize_is_one_shot_until_reset() {
	let mut session = Session::new(KeccakParameter::Sha3_256).unwrap();
	session.update(b"abc").unwrap();

	let first = session.finalize().unwrap().next_bytes(32).unwrap();

	assert!(session.is_finalized());
	assert_eq!(session.finalize().err(), Some(KeccakError::AlreadyFinalized));
	assert_eq!(session.update(b"more"), Err(KeccakError::AlreadyFinalized));

	session.reset();
	session.update(b"abc").unwrap();

	assert_eq!(session.finalize().unwrap().next_bytes(32).unwrap(), first);
	assert_eq!(
		hex::encode(first),
		"3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
	);
}

#[test]
fn digest_resets_for_the_next_message() {
	for strategy in [Strategy::Buffered, Strategy::Streaming] {
		let mut session = Session::builder(KeccakParameter::Shake256).strategy(strategy).build().unwrap();

		session.update(b"abc").unwrap();
		let first = session.digest().unwrap();

		assert!(!session.is_finalized());
		session.update(b"abc").unwrap();

		assert_eq!(session.digest().unwrap(), first);
		assert_eq!(first.len(), 32);
		assert_eq!(hex::encode(&first), "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739");
	}
}

#[test]
fn typed_updates_write_big_endian() {
	let mut typed = Session::new(KeccakParameter::Sha3_384).unwrap();
	typed.update_byte(0x01).unwrap();
	typed.update_u16(0x0203).unwrap();
	typed.update_u32(0x04050607).unwrap();
	typed.update_u64(0x08090a0b0c0d0e0f).unwrap();
	typed.update_f32(1.5).unwrap();
	typed.update_f64(-2.0).unwrap();

	let mut raw = Session::new(KeccakParameter::Sha3_384).unwrap();
	raw.update(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]).unwrap();
	raw.update(&[0x3f, 0xc0, 0x00, 0x00]).unwrap();
	raw.update(&[0xc0, 0, 0, 0, 0, 0, 0, 0]).unwrap();

	assert_eq!(typed.digest().unwrap(), raw.digest().unwrap());
}

#[test]
fn uncustomized_cshake_is_shake() {
	let mut cshake = Session::new(KeccakParameter::CShake128).unwrap();
	let mut shake = Session::new(KeccakParameter::Shake128).unwrap();

	cshake.update(b"abc").unwrap();
	shake.update(b"abc").unwrap();

	assert_eq!(cshake.digest().unwrap(), shake.digest().unwrap());

	let mut empty_strings = Session::builder(KeccakParameter::CShake128)
		.function_name(b"")
		.customization(b"")
		.build()
		.unwrap();

	assert_eq!(hex::encode(empty_strings.digest().unwrap()), "7f9c2ba4e88f827d616045507605853e");
}

#[test]
fn kmac_length_is_bound_and_enforced() {
	let mut kmac = builder_for(KeccakParameter::Kmac128).output_length(32).build().unwrap();
	kmac.update(&[0, 1, 2, 3]).unwrap();

	let mut cursor = kmac.finalize().unwrap();
	let tag = cursor.next_bytes(32).unwrap();

	assert!(!cursor.has_next());
	assert!(cursor.next_byte().is_err());
	assert_eq!(
		hex::encode(tag),
		"3b1fba963cd8b0b59e8c1a6d71888b7143651af8ba0a7070c0979e2811324aa5",
	);

	// a shorter L is a different MAC, not a truncation
	let mut short = builder_for(KeccakParameter::Kmac128).output_length(16).build().unwrap();
	short.update(&[0, 1, 2, 3]).unwrap();

	let short_tag = short.digest().unwrap();
	assert_eq!(short_tag.len(), 16);
	assert_ne!(short_tag[..], tag_prefix(16)[..]);
}

#[cfg(test)]
fn tag_prefix(len: usize) -> Vec<u8> {
	let mut kmac = builder_for(KeccakParameter::Kmac128).output_length(32).build().unwrap();
	kmac.update(&[0, 1, 2, 3]).unwrap();

	let mut tag = kmac.digest().unwrap();
	tag.truncate(len);

	tag
}

#[test]
fn small_blocks_do_not_change_the_digest() {
	let message: Vec<u8> = (0 .. 1000u32).map(|i| i as u8).collect();

	let mut reference = builder_for(KeccakParameter::KmacXof256).build().unwrap();
	reference.update(&message).unwrap();

	let mut tiny = builder_for(KeccakParameter::KmacXof256).block_capacity(7).build().unwrap();

	for chunk in message.chunks(13) {
		tiny.update(chunk).unwrap();
	}

	assert_eq!(tiny.digest().unwrap(), reference.digest().unwrap());
}

#[cfg(test)]
proptest! {
	#[test]
	fn strategies_and_chunking_agree(
		message in prop::collection::vec(any::<u8>(), 0 .. 700),
		parameter in prop::sample::select(KeccakParameter::ALL.to_vec()),
		chunk in 1usize .. 300,
		capacity in 1usize .. 250,
	) {
		let mut buffered = builder_for(parameter).build().unwrap();
		buffered.update(&message).unwrap();

		let mut streaming = builder_for(parameter).strategy(Strategy::Streaming).build().unwrap();
		let mut chunked = builder_for(parameter).block_capacity(capacity).build().unwrap();

		for piece in message.chunks(chunk) {
			streaming.update(piece).unwrap();
			chunked.update(piece).unwrap();
		}

		let expected = buffered.digest().unwrap();

		prop_assert_eq!(streaming.digest().unwrap(), expected.clone());
		prop_assert_eq!(chunked.digest().unwrap(), expected);
	}
}

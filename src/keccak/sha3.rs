//! One-shot functions over the whole [SHA-3](https://en.wikipedia.org/wiki/SHA-3) family.
//!
//! Each call builds a streaming [`Session`], feeds it the message and reads
//! `output_length` bytes, or the parameter's default length when that is `None`.

use alloc::vec::Vec;

use super::params::KeccakParameter;
use super::session::{Session, SessionBuilder, Strategy};
use crate::error::Result;

fn run(builder: SessionBuilder, message: &[u8], output_length: Option<usize>) -> Result<Vec<u8>> {
	let builder = match output_length {
		Some(len) => builder.output_length(len),
		None => builder,
	};

	let mut session: Session = builder.strategy(Strategy::Streaming).build()?;
	session.update(message)?;
	session.digest()
}

/// SHA3, SHAKE or RawSHAKE of `message`. cSHAKE parameters behave as SHAKE.
pub fn digest(parameter: KeccakParameter, message: &[u8], output_length: Option<usize>) -> Result<Vec<u8>> {
	run(SessionBuilder::new(parameter), message, output_length)
}

pub fn cshake(
	parameter: KeccakParameter,
	function_name: &[u8],
	customization: &[u8],
	message: &[u8],
	output_length: Option<usize>,
) -> Result<Vec<u8>> {
	let builder = SessionBuilder::new(parameter)
		.function_name(function_name)
		.customization(customization);

	run(builder, message, output_length)
}

/// KMAC or KMACXOF. For the fixed-length variants `output_length` is `L`.
pub fn kmac(
	parameter: KeccakParameter,
	key: &[u8],
	customization: &[u8],
	message: &[u8],
	output_length: Option<usize>,
) -> Result<Vec<u8>> {
	let builder = SessionBuilder::new(parameter)
		.key(key)
		.customization(customization);

	run(builder, message, output_length)
}

#[cfg(test)]
use crate::error::KeccakError;

#[cfg(test)]
use proptest::prelude::*;

#[test]
fn default_lengths() {
	for parameter in KeccakParameter::ALL.into_iter().filter(|p| !p.is_keyed()) {
		let out = digest(parameter, b"", None).unwrap();
		assert_eq!(out.len(), parameter.min_output_bytes(), "{}", parameter);
	}
}

#[test]
fn sha3_empty() {
	assert_eq!(
		hex::encode(digest(KeccakParameter::Sha3_512, b"", None).unwrap()),
		"a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
	);
}

#[test]
fn wrong_helper_for_the_parameter() {
	assert_eq!(
		digest(KeccakParameter::Kmac256, b"", None),
		Err(KeccakError::MissingKey {parameter: KeccakParameter::Kmac256}),
	);
	assert_eq!(
		cshake(KeccakParameter::Shake128, b"N", b"", b"", None),
		Err(KeccakError::UnexpectedFraming {parameter: KeccakParameter::Shake128}),
	);
	assert_eq!(
		kmac(KeccakParameter::CShake128, b"key", b"", b"", None),
		Err(KeccakError::UnexpectedKey {parameter: KeccakParameter::CShake128}),
	);
	assert_eq!(
		digest(KeccakParameter::Sha3_256, b"", Some(33)),
		Err(KeccakError::OutputExhausted {parameter: KeccakParameter::Sha3_256, limit: 32, requested: 33}),
	);
}

#[test]
fn sha3_accepts_shorter_reads() {
	let full = digest(KeccakParameter::Sha3_384, b"abc", None).unwrap();
	let short = digest(KeccakParameter::Sha3_384, b"abc", Some(20)).unwrap();

	assert_eq!(short[..], full[.. 20]);
}

#[test]
fn kmacxof_prefix_is_stable() {
	let short = kmac(KeccakParameter::KmacXof128, b"key", b"S", b"m", Some(10)).unwrap();
	let long = kmac(KeccakParameter::KmacXof128, b"key", b"S", b"m", Some(500)).unwrap();

	assert_eq!(short[..], long[.. 10]);
}

#[cfg(test)]
proptest! {
	#[test]
	fn digest_is_the_stream_prefix(
		message in prop::collection::vec(any::<u8>(), 0 .. 500),
		parameter in prop::sample::select(KeccakParameter::ALL.to_vec()),
		len in 0usize .. 400,
	) {
		prop_assume!(!parameter.is_keyed());

		let len = parameter.max_output_bytes().map_or(len, |max| len.min(max));
		let once = digest(parameter, &message, Some(len)).unwrap();

		let mut session = Session::new(parameter).unwrap();
		session.update(&message).unwrap();
		let streamed = session.finalize().unwrap().next_bytes(len).unwrap();

		prop_assert_eq!(&once, &streamed);
		prop_assert_eq!(digest(parameter, &message, Some(len)).unwrap(), once);
	}
}

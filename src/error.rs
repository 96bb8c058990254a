use thiserror::Error;

use crate::keccak::KeccakParameter;

pub type Result<T, E = KeccakError> = core::result::Result<T, E>;

/// Broad category of a [`KeccakError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The session was configured in a way its parameter does not allow.
	Configuration,
	/// An operation was called out of order.
	State,
	/// A size or count fell outside what is allowed.
	Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum KeccakError {
	#[error("{parameter} requires a key")]
	MissingKey {parameter: KeccakParameter},

	#[error("{parameter} does not take a key")]
	UnexpectedKey {parameter: KeccakParameter},

	#[error("{parameter} does not take a function name or customization string")]
	UnexpectedFraming {parameter: KeccakParameter},

	#[error("block capacity must be greater than zero")]
	ZeroBlockCapacity,

	#[error("cannot absorb once squeezing has started")]
	AbsorbAfterSqueeze,

	#[error("session has already been finalized")]
	AlreadyFinalized,

	#[error("{parameter} only supports {limit} bytes of output, {requested} requested")]
	OutputExhausted {
		parameter: KeccakParameter,
		limit: usize,
		requested: usize,
	},

	#[error("buffered input would exceed the maximum addressable size")]
	InputTooLarge,

	#[error("a bit string holds between 1 and 8 bits, got {count}")]
	InvalidBitCount {count: usize},

	#[error("unexpected character {found:?} in bit string")]
	InvalidBitString {found: char},
}

impl KeccakError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::MissingKey {..} |
			Self::UnexpectedKey {..} |
			Self::UnexpectedFraming {..} |
			Self::ZeroBlockCapacity => ErrorKind::Configuration,

			Self::AbsorbAfterSqueeze |
			Self::AlreadyFinalized => ErrorKind::State,

			Self::OutputExhausted {..} |
			Self::InputTooLarge |
			Self::InvalidBitCount {..} |
			Self::InvalidBitString {..} => ErrorKind::Bounds,
		}
	}
}

#[test]
fn kinds_are_distinct() {
	let parameter = KeccakParameter::Sha3_256;

	assert_eq!(KeccakError::MissingKey {parameter}.kind(), ErrorKind::Configuration);
	assert_eq!(KeccakError::ZeroBlockCapacity.kind(), ErrorKind::Configuration);
	assert_eq!(KeccakError::AbsorbAfterSqueeze.kind(), ErrorKind::State);
	assert_eq!(KeccakError::AlreadyFinalized.kind(), ErrorKind::State);

	let exhausted = KeccakError::OutputExhausted {parameter, limit: 32, requested: 33};
	assert_eq!(exhausted.kind(), ErrorKind::Bounds);
	assert_eq!(KeccakError::InvalidBitCount {count: 9}.kind(), ErrorKind::Bounds);
}

#[cfg(feature = "std")]
#[test]
fn messages_name_the_parameter() {
	let err = KeccakError::OutputExhausted {
		parameter: KeccakParameter::Sha3_224,
		limit: 28,
		requested: 29,
	};

	assert_eq!(err.to_string(), "SHA3-224 only supports 28 bytes of output, 29 requested");
}

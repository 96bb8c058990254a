//! The catalog of Keccak variants: rates, output bounds and domain suffixes.

use core::fmt;

use super::bits::DomainSuffix;

const SHA3: DomainSuffix = DomainSuffix::from_parts(0b10, 2);
const RAW_SHAKE: DomainSuffix = DomainSuffix::from_parts(0b11, 2);
const SHAKE: DomainSuffix = DomainSuffix::from_parts(0b1111, 4);
const CSHAKE: DomainSuffix = DomainSuffix::from_parts(0b00, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeccakParameter {
	Sha3_224,
	Sha3_256,
	Sha3_384,
	Sha3_512,
	RawShake128,
	RawShake256,
	Shake128,
	Shake256,
	CShake128,
	CShake256,
	Kmac128,
	Kmac256,
	KmacXof128,
	KmacXof256,
}

use KeccakParameter::*;

impl KeccakParameter {
	pub const ALL: [Self; 14] = [
		Sha3_224, Sha3_256, Sha3_384, Sha3_512,
		RawShake128, RawShake256,
		Shake128, Shake256,
		CShake128, CShake256,
		Kmac128, Kmac256,
		KmacXof128, KmacXof256,
	];

	pub const fn rate_bits(self) -> usize {
		match self {
			Sha3_224 => 1152,
			Sha3_256 => 1088,
			Sha3_384 => 832,
			Sha3_512 => 576,
			RawShake128 | Shake128 | CShake128 | Kmac128 | KmacXof128 => 1344,
			RawShake256 | Shake256 | CShake256 | Kmac256 | KmacXof256 => 1088,
		}
	}

	pub const fn capacity_bits(self) -> usize {
		1600 - self.rate_bits()
	}

	pub const fn rate_bytes(self) -> usize {
		self.rate_bits() / 8
	}

	/// Output length used when the caller does not ask for one.
	pub const fn min_output_bytes(self) -> usize {
		match self {
			Sha3_224 => 28,
			Sha3_256 => 32,
			Sha3_384 => 48,
			Sha3_512 => 64,
			RawShake128 | Shake128 | CShake128 | Kmac128 | KmacXof128 => 16,
			RawShake256 | Shake256 | CShake256 | Kmac256 | KmacXof256 => 32,
		}
	}

	/// Fixed output length of the SHA3 digests, `None` for everything else.
	///
	/// KMAC is not extendable either, but its length is chosen per session.
	pub const fn max_output_bytes(self) -> Option<usize> {
		match self {
			Sha3_224 | Sha3_256 | Sha3_384 | Sha3_512 => Some(self.min_output_bytes()),
			_ => None,
		}
	}

	pub const fn suffix(self) -> DomainSuffix {
		match self {
			Sha3_224 | Sha3_256 | Sha3_384 | Sha3_512 => SHA3,
			RawShake128 | RawShake256 => RAW_SHAKE,
			Shake128 | Shake256 => SHAKE,
			CShake128 | CShake256 | Kmac128 | Kmac256 | KmacXof128 | KmacXof256 => CSHAKE,
		}
	}

	pub const fn is_extendable(self) -> bool {
		!matches!(self, Sha3_224 | Sha3_256 | Sha3_384 | Sha3_512 | Kmac128 | Kmac256)
	}

	pub const fn is_keyed(self) -> bool {
		matches!(self, Kmac128 | Kmac256 | KmacXof128 | KmacXof256)
	}

	/// Whether the parameter takes a customization string.
	pub const fn is_customizable(self) -> bool {
		matches!(self, CShake128 | CShake256) || self.is_keyed()
	}

	/// Only cSHAKE lets the caller pick the function name.
	pub const fn takes_function_name(self) -> bool {
		matches!(self, CShake128 | CShake256)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Sha3_224 => "SHA3-224",
			Sha3_256 => "SHA3-256",
			Sha3_384 => "SHA3-384",
			Sha3_512 => "SHA3-512",
			RawShake128 => "RawSHAKE128",
			RawShake256 => "RawSHAKE256",
			Shake128 => "SHAKE128",
			Shake256 => "SHAKE256",
			CShake128 => "cSHAKE128",
			CShake256 => "cSHAKE256",
			Kmac128 => "KMAC128",
			Kmac256 => "KMAC256",
			KmacXof128 => "KMACXOF128",
			KmacXof256 => "KMACXOF256",
		}
	}
}

impl fmt::Display for KeccakParameter {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[test]
fn rate_and_capacity_fill_the_state() {
	for parameter in KeccakParameter::ALL {
		assert_eq!(parameter.rate_bits() + parameter.capacity_bits(), 1600);
		assert_eq!(parameter.rate_bytes() % 8, 0);
		assert!((1 ..= 4).contains(&parameter.suffix().bit_count()));
	}
}

#[test]
fn capacity_is_twice_the_security_level() {
	for parameter in KeccakParameter::ALL {
		assert_eq!(parameter.capacity_bits(), parameter.min_output_bytes() * 16);
	}
}

#[test]
fn only_sha3_has_a_catalog_limit() {
	for parameter in KeccakParameter::ALL {
		match parameter.max_output_bytes() {
			Some(max) => {
				assert!(!parameter.is_extendable());
				assert_eq!(max, parameter.min_output_bytes());
			},
			None => assert!(parameter.is_extendable() || parameter.is_keyed()),
		}
	}
}

#[test]
fn catalog_rows() {
	assert_eq!(Sha3_384.rate_bytes(), 104);
	assert_eq!(Shake128.rate_bytes(), 168);
	assert_eq!(KmacXof256.rate_bytes(), 136);
	assert_eq!(Sha3_512.capacity_bits(), 1024);

	assert_eq!(Sha3_256.suffix(), DomainSuffix::parse("01").unwrap());
	assert_eq!(RawShake128.suffix(), DomainSuffix::parse("11").unwrap());
	assert_eq!(Shake256.suffix(), DomainSuffix::parse("1111").unwrap());
	assert_eq!(Kmac128.suffix(), DomainSuffix::parse("00").unwrap());

	assert!(!Kmac256.is_extendable());
	assert!(KmacXof128.is_extendable());
	assert!(Kmac128.is_customizable() && !Kmac128.takes_function_name());
	assert!(!Shake128.is_customizable());
}

//! The sponge construction over Keccak-f\[1600\].

use zeroize::Zeroize;

use super::bits::DomainSuffix;
use super::buffer::BlockList;
use super::codec::{write_state, xor_block, STATE_BYTES};
use super::padding::{padding_len, write_padding};
use super::params::KeccakParameter;
use super::{keccak_f1600, State};
use crate::error::{KeccakError, Result};

// largest rate in the catalog, SHAKE128
const MAX_RATE_BYTES: usize = 168;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Absorbing,
	Squeezing,
}

/// One 200-byte scratch area for the sponge.
///
/// While absorbing, the first `rate` bytes stage a partial input block. While
/// squeezing, the whole state is serialized into it and only the rate part is
/// handed out.
#[derive(Clone)]
struct Arena {
	bytes: [u8; STATE_BYTES],
	rate: usize,
}

impl Arena {
	fn new(rate: usize) -> Self {
		Self {bytes: [0; STATE_BYTES], rate}
	}

	fn visible(&self) -> &[u8] {
		&self.bytes[.. self.rate]
	}

	fn visible_mut(&mut self) -> &mut [u8] {
		&mut self.bytes[.. self.rate]
	}

	#[cfg(test)]
	fn hidden(&self) -> &[u8] {
		&self.bytes[self.rate ..]
	}
}

impl Zeroize for Arena {
	fn zeroize(&mut self) {
		self.bytes.zeroize();
	}
}

#[derive(Clone)]
pub struct Sponge {
	state: State,
	arena: Arena,
	suffix: DomainSuffix,
	phase: Phase,
	// bytes staged in the arena while absorbing
	staged: usize,
	squeezed: bool,
}

impl Sponge {
	pub fn new(parameter: KeccakParameter) -> Self {
		Self::with_suffix(parameter, parameter.suffix())
	}

	/// A sponge with the rate of `parameter` and an arbitrary domain suffix.
	pub fn with_suffix(parameter: KeccakParameter, suffix: DomainSuffix) -> Self {
		Self {
			state: [[0; 5]; 5],
			arena: Arena::new(parameter.rate_bytes()),
			suffix,
			phase: Phase::Absorbing,
			staged: 0,
			squeezed: false,
		}
	}

	// a fresh sponge that has already absorbed `prefix`
	pub(crate) fn primed(parameter: KeccakParameter, suffix: DomainSuffix, prefix: &[u8]) -> Self {
		let mut sponge = Self::with_suffix(parameter, suffix);
		sponge.stage(prefix);

		sponge
	}

	pub fn rate(&self) -> usize {
		self.arena.rate
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn absorb(&mut self, bytes: &[u8]) -> Result<()> {
		if self.phase == Phase::Squeezing {
			return Err(KeccakError::AbsorbAfterSqueeze);
		}

		self.stage(bytes);

		Ok(())
	}

	pub fn absorb_blocks(&mut self, blocks: &BlockList) -> Result<()> {
		for block in blocks.iter() {
			self.absorb(block)?;
		}

		Ok(())
	}

	fn stage(&mut self, mut bytes: &[u8]) {
		let rate = self.rate();

		while !bytes.is_empty() {
			if self.staged == 0 && bytes.len() >= rate {
				xor_block(&mut self.state, &bytes[.. rate]);
				keccak_f1600(&mut self.state);
				bytes = &bytes[rate ..];
				continue;
			}

			let take = (rate - self.staged).min(bytes.len());
			self.arena.visible_mut()[self.staged ..][.. take].copy_from_slice(&bytes[.. take]);
			self.staged += take;
			bytes = &bytes[take ..];

			if self.staged == rate {
				xor_block(&mut self.state, self.arena.visible());
				keccak_f1600(&mut self.state);
				self.staged = 0;
			}
		}
	}

	/// Pads the pending input and switches to squeezing.
	pub fn finish(&mut self) -> Result<()> {
		if self.phase == Phase::Squeezing {
			return Err(KeccakError::AlreadyFinalized);
		}

		self.pad();

		Ok(())
	}

	fn pad(&mut self) {
		let pad_len = padding_len(self.staged, self.rate(), self.suffix);

		let mut tail = [0; 2 * MAX_RATE_BYTES];
		let tail = &mut tail[.. pad_len];
		write_padding(tail, self.suffix);

		self.stage(tail);
		debug_assert_eq!(self.staged, 0);

		self.arena.zeroize();
		self.phase = Phase::Squeezing;
		self.squeezed = false;
	}

	/// Returns the next `rate` bytes of output, finishing absorption first
	/// if that has not happened yet.
	///
	/// The first block is read straight from the absorbed state. Every later
	/// block permutes before it is read.
	pub fn squeeze(&mut self) -> &[u8] {
		if self.phase == Phase::Absorbing {
			self.pad();
		}

		if self.squeezed {
			keccak_f1600(&mut self.state);
		}

		write_state(&self.state, &mut self.arena.bytes);
		self.squeezed = true;

		self.arena.visible()
	}

	// the block the last squeeze produced
	pub(crate) fn block(&self) -> &[u8] {
		debug_assert_eq!(self.phase, Phase::Squeezing);

		self.arena.visible()
	}

	/// Scrubs the state and returns to absorbing with the same rate and suffix.
	pub fn reset(&mut self) {
		self.zeroize();
		self.phase = Phase::Absorbing;
		self.staged = 0;
		self.squeezed = false;
	}
}

impl Zeroize for Sponge {
	fn zeroize(&mut self) {
		self.state.zeroize();
		self.arena.zeroize();
	}
}

impl Drop for Sponge {
	fn drop(&mut self) {
		self.zeroize();
	}
}

#[cfg(test)]
fn squeeze_hex(sponge: &mut Sponge, len: usize) -> String {
	hex::encode(&sponge.squeeze()[.. len])
}

#[test]
fn sha3_256_of_nothing() {
	let mut sponge = Sponge::new(KeccakParameter::Sha3_256);

	assert_eq!(
		squeeze_hex(&mut sponge, 32),
		"a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
	);
}

#[test]
fn chunked_absorb_matches_single_call() {
	let message: Vec<u8> = (0 .. 600).map(|i| (i * 7) as u8).collect();

	let mut whole = Sponge::new(KeccakParameter::Shake128);
	whole.absorb(&message).unwrap();

	let mut pieces = Sponge::new(KeccakParameter::Shake128);

	for chunk in message.chunks(37) {
		pieces.absorb(chunk).unwrap();
	}

	assert_eq!(whole.squeeze(), pieces.squeeze());
	assert_eq!(whole.squeeze(), pieces.squeeze());
}

#[test]
fn first_squeeze_does_not_permute() {
	let mut sponge = Sponge::new(KeccakParameter::Shake256);
	sponge.finish().unwrap();

	let mut expected = [[0; 5]; 5];
	xor_block(&mut expected, &super::padding::pad10_1(b"", 136, KeccakParameter::Shake256.suffix()));
	keccak_f1600(&mut expected);

	let first = sponge.squeeze().to_vec();
	assert_eq!(first, super::codec::state_to_bytes(&expected)[.. 136]);

	keccak_f1600(&mut expected);
	assert_eq!(sponge.squeeze(), &super::codec::state_to_bytes(&expected)[.. 136]);
}

#[test]
fn squeeze_exposes_only_the_rate() {
	let mut sponge = Sponge::new(KeccakParameter::Sha3_512);

	assert_eq!(sponge.squeeze().len(), 72);
	assert_eq!(sponge.arena.hidden().len(), 128);
}

#[test]
fn absorb_after_squeeze_fails() {
	let mut sponge = Sponge::new(KeccakParameter::Sha3_224);
	sponge.absorb(b"abc").unwrap();
	sponge.squeeze();

	assert_eq!(sponge.phase(), Phase::Squeezing);
	assert_eq!(sponge.absorb(b"d"), Err(KeccakError::AbsorbAfterSqueeze));
	assert_eq!(sponge.finish(), Err(KeccakError::AlreadyFinalized));
}

#[test]
fn reset_starts_over() {
	let mut sponge = Sponge::new(KeccakParameter::Sha3_256);
	sponge.absorb(b"garbage").unwrap();
	sponge.squeeze();
	sponge.reset();

	sponge.absorb(b"abc").unwrap();

	assert_eq!(
		squeeze_hex(&mut sponge, 32),
		"3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
	);
}

#[test]
fn custom_suffix_changes_the_output() {
	let mut raw = Sponge::new(KeccakParameter::RawShake128);
	let mut shake_suffix = Sponge::with_suffix(KeccakParameter::RawShake128, KeccakParameter::Shake128.suffix());
	let mut shake = Sponge::new(KeccakParameter::Shake128);

	assert_eq!(squeeze_hex(&mut raw, 16), "fa019a3b17630df6014853b5470773f1");
	assert_eq!(squeeze_hex(&mut shake_suffix, 16), squeeze_hex(&mut shake, 16));
}

#[test]
fn block_list_absorbs_like_bytes() {
	let mut buffer = super::buffer::BlockBuffer::new(136).unwrap();
	buffer.update(&[0xab; 300]).unwrap();
	let blocks = buffer.finalize();

	let mut from_blocks = Sponge::new(KeccakParameter::Sha3_256);
	from_blocks.absorb_blocks(&blocks).unwrap();

	let mut from_bytes = Sponge::new(KeccakParameter::Sha3_256);
	from_bytes.absorb(&[0xab; 300]).unwrap();

	assert_eq!(from_blocks.squeeze(), from_bytes.squeeze());
}

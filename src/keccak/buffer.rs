//! Accumulates input across many `update` calls in fixed-size blocks.
//!
//! Input is copied once, into the block that has room for it. A new block is
//! only allocated when the current one fills up, so the total copy volume
//! stays proportional to the input size no matter how it is split.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::error::{KeccakError, Result};

/// The upper bound on buffered bytes, the largest size an allocation may have.
const MAX_BUFFERED: usize = isize::MAX as usize;

/// `block_count * capacity + position + additional`, or an error if that
/// would leave the addressable range.
fn checked_total(block_count: usize, capacity: usize, position: usize, additional: usize) -> Result<usize> {
	block_count
		.checked_mul(capacity)
		.and_then(|full| full.checked_add(position))
		.and_then(|len| len.checked_add(additional))
		.filter(|&total| total <= MAX_BUFFERED)
		.ok_or(KeccakError::InputTooLarge)
}

pub struct BlockBuffer {
	capacity: usize,
	// every block but the last is full
	blocks: Vec<Box<[u8]>>,
	position: usize,
}

impl BlockBuffer {
	pub fn new(capacity: usize) -> Result<Self> {
		if capacity == 0 {
			return Err(KeccakError::ZeroBlockCapacity);
		}

		Ok(Self {capacity, blocks: Vec::new(), position: 0})
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Buffered byte count.
	pub fn len(&self) -> usize {
		match self.blocks.len() {
			0 => 0,
			n => (n - 1) * self.capacity + self.position,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn full_blocks(&self) -> usize {
		self.blocks.len().saturating_sub(1)
	}

	pub fn update(&mut self, mut bytes: &[u8]) -> Result<()> {
		checked_total(self.full_blocks(), self.capacity, self.position, bytes.len())?;

		while !bytes.is_empty() {
			if self.blocks.is_empty() || self.position == self.capacity {
				self.blocks.push(vec![0; self.capacity].into_boxed_slice());
				self.position = 0;
			}

			let take = (self.capacity - self.position).min(bytes.len());

			if let Some(block) = self.blocks.last_mut() {
				block[self.position ..][.. take].copy_from_slice(&bytes[.. take]);
			}

			self.position += take;
			bytes = &bytes[take ..];
		}

		Ok(())
	}

	pub fn update_byte(&mut self, byte: u8) -> Result<()> {
		self.update(&[byte])
	}

	/// Hands the buffered blocks over and leaves the buffer empty.
	pub fn finalize(&mut self) -> BlockList {
		let blocks = core::mem::take(&mut self.blocks);
		let final_offset = if blocks.is_empty() {0} else {self.position};
		self.position = 0;

		BlockList {blocks, final_offset}
	}

	/// Discards and scrubs everything buffered.
	pub fn clear(&mut self) {
		drop(self.finalize());
	}
}

impl Drop for BlockBuffer {
	fn drop(&mut self) {
		self.clear();
	}
}

/// Blocks produced by [`BlockBuffer::finalize`]. Every block is full except
/// the last, which ends at [`final_offset`](Self::final_offset).
pub struct BlockList {
	blocks: Vec<Box<[u8]>>,
	final_offset: usize,
}

impl BlockList {
	pub fn block_count(&self) -> usize {
		self.blocks.len()
	}

	pub fn final_offset(&self) -> usize {
		self.final_offset
	}

	/// Total length of the input the blocks hold.
	pub fn len(&self) -> usize {
		self.iter().map(|block| block.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The blocks in order, the last one cut at the final offset.
	pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
		let last = self.blocks.len().saturating_sub(1);

		self.blocks.iter().enumerate().map(move |(i, block)| {
			if i == last {
				&block[.. self.final_offset]
			} else {
				&block[..]
			}
		})
	}

	/// Concatenates the blocks into one contiguous buffer.
	pub fn to_vec(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.len());

		for block in self.iter() {
			out.extend_from_slice(block);
		}

		out
	}
}

impl Drop for BlockList {
	fn drop(&mut self) {
		for block in self.blocks.iter_mut() {
			block.zeroize();
		}
	}
}

#[cfg(test)]
use proptest::prelude::*;

#[test]
fn zero_capacity_is_rejected() {
	assert!(matches!(BlockBuffer::new(0), Err(KeccakError::ZeroBlockCapacity)));
}

#[test]
fn fills_blocks_in_order() {
	let mut buffer = BlockBuffer::new(4).unwrap();
	buffer.update(b"abcdef").unwrap();
	buffer.update_byte(b'g').unwrap();
	buffer.update(b"h").unwrap();

	assert_eq!(buffer.len(), 8);

	let list = buffer.finalize();

	assert_eq!(list.block_count(), 2);
	assert_eq!(list.final_offset(), 4);
	assert_eq!(list.to_vec(), b"abcdefgh");
	assert!(buffer.is_empty());
}

#[test]
fn empty_buffer_finalizes_to_nothing() {
	let mut buffer = BlockBuffer::new(136).unwrap();
	buffer.update(b"").unwrap();

	let list = buffer.finalize();

	assert_eq!(list.block_count(), 0);
	assert_eq!(list.final_offset(), 0);
	assert!(list.is_empty());
	assert_eq!(list.iter().count(), 0);
}

#[test]
fn buffer_is_reusable_after_finalize() {
	let mut buffer = BlockBuffer::new(3).unwrap();
	buffer.update(b"first").unwrap();
	let _ = buffer.finalize();

	buffer.update(b"second").unwrap();
	let list = buffer.finalize();

	assert_eq!(list.to_vec(), b"second");
	assert_eq!(list.final_offset(), 3);
}

#[test]
fn overflow_is_caught_before_wrapping() {
	assert_eq!(checked_total(2, 8, 3, 5), Ok(24));
	assert_eq!(checked_total(usize::MAX / 2, 4, 0, 0), Err(KeccakError::InputTooLarge));
	assert_eq!(checked_total(1, MAX_BUFFERED, 1, 0), Err(KeccakError::InputTooLarge));
	assert_eq!(checked_total(0, 1, 0, usize::MAX), Err(KeccakError::InputTooLarge));
	assert_eq!(checked_total(0, 1, 1, MAX_BUFFERED - 1), Ok(MAX_BUFFERED));
}

#[cfg(test)]
proptest! {
	#[test]
	fn chunking_does_not_change_the_contents(
		data in prop::collection::vec(any::<u8>(), 0 .. 1000),
		capacity in 1usize .. 200,
		cuts in prop::collection::vec(any::<prop::sample::Index>(), 0 .. 10),
	) {
		let mut points: Vec<usize> = cuts.iter().map(|cut| cut.index(data.len() + 1)).collect();
		points.sort_unstable();

		let mut buffer = BlockBuffer::new(capacity).unwrap();
		let mut start = 0;

		for point in points {
			buffer.update(&data[start .. point]).unwrap();
			start = point;
		}

		buffer.update(&data[start ..]).unwrap();
		prop_assert_eq!(buffer.len(), data.len());

		let list = buffer.finalize();

		prop_assert_eq!(list.block_count(), data.len().div_ceil(capacity));
		prop_assert!(list.iter().all(|block| block.len() <= capacity));
		prop_assert_eq!(list.to_vec(), data);
	}
}

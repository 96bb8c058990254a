//! Conversion between the lane matrix and its 200-byte little-endian encoding.
//!
//! Lane `(x, y)` lives at byte offset `8 * (x + 5 * y)`.

use super::State;

pub const STATE_BYTES: usize = 200;

fn read_lane(bytes: &[u8]) -> u64 {
	let mut lane = [0; 8];
	lane.copy_from_slice(bytes);

	u64::from_le_bytes(lane)
}

/// Decodes up to 200 bytes into a state, treating missing bytes as zero.
/// Bytes past the first 200 are ignored.
pub fn bytes_to_state(bytes: &[u8]) -> State {
	let mut padded = [0; STATE_BYTES];
	let len = bytes.len().min(STATE_BYTES);
	padded[.. len].copy_from_slice(&bytes[.. len]);

	let mut state = [[0; 5]; 5];

	for (i, chunk) in padded.chunks_exact(8).enumerate() {
		state[i % 5][i / 5] = read_lane(chunk);
	}

	state
}

pub fn state_to_bytes(state: &State) -> [u8; STATE_BYTES] {
	let mut out = [0; STATE_BYTES];
	write_state(state, &mut out);

	out
}

// `block` must be a whole number of lanes, at most 25 of them
pub(crate) fn xor_block(state: &mut State, block: &[u8]) {
	debug_assert!(block.len() % 8 == 0 && block.len() <= STATE_BYTES);

	for (i, chunk) in block.chunks_exact(8).enumerate() {
		state[i % 5][i / 5] ^= read_lane(chunk);
	}
}

pub(crate) fn write_state(state: &State, out: &mut [u8; STATE_BYTES]) {
	for (i, chunk) in out.chunks_exact_mut(8).enumerate() {
		chunk.copy_from_slice(&state[i % 5][i / 5].to_le_bytes());
	}
}

#[test]
fn lanes_are_little_endian() {
	let mut bytes = [0; 16];
	bytes[0] = 0x01;
	bytes[8 + 7] = 0x80;

	let state = bytes_to_state(&bytes);

	assert_eq!(state[0][0], 1);
	assert_eq!(state[1][0], 0x8000000000000000);
	assert_eq!(state[2][0], 0);
}

#[test]
fn lane_offsets_follow_x_plus_5y() {
	let mut state = [[0; 5]; 5];
	state[3][2] = 0x0807060504030201;

	let bytes = state_to_bytes(&state);
	let offset = 8 * (3 + 5 * 2);

	assert_eq!(&bytes[offset .. offset + 8], &[1, 2, 3, 4, 5, 6, 7, 8]);
	assert!(bytes[.. offset].iter().all(|&b| b == 0));
	assert!(bytes[offset + 8 ..].iter().all(|&b| b == 0));
}

#[test]
fn decode_encode_is_identity() {
	let bytes: [u8; STATE_BYTES] = core::array::from_fn(|i| (i * 31 + 7) as u8);

	assert_eq!(state_to_bytes(&bytes_to_state(&bytes)), bytes);
}

#[test]
fn xor_block_touches_only_rate_lanes() {
	let mut state = [[u64::MAX; 5]; 5];
	xor_block(&mut state, &[0xff; 136]);

	for i in 0 .. 25 {
		let expected = if i < 17 {0} else {u64::MAX};
		assert_eq!(state[i % 5][i / 5], expected);
	}
}

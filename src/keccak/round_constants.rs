pub const ROUND_CONSTANTS: [u64; 24] = [
	0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
	0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
	0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
	0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
	0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
	0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

// indexed as [x][y]
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = [
	[ 0, 36,  3, 41, 18],
	[ 1, 44, 10, 45,  2],
	[62,  6, 43, 15, 61],
	[28, 55, 25, 21, 56],
	[27, 20, 39,  8, 14],
];

#[cfg(test)]
const fn step_lfsr(state: u8) -> (u8, bool) {
	let new_bit = ((state & 0x8e).count_ones() & 1) as u8;
	let lfsr_output = state & 0x80 != 0;
	let new_state = (state << 1) | new_bit;

	(new_state, lfsr_output)
}

#[test]
fn round_constants_match_lfsr() {
	let mut lfsr = 0x80;

	for expected in ROUND_CONSTANTS {
		let mut constant = 0u64;

		for j in 0 .. 7 {
			let place = (1 << j) - 1;

			let (new_lfsr, lfsr_out) = step_lfsr(lfsr);
			lfsr = new_lfsr;

			if lfsr_out {
				constant |= 1 << place;
			}
		}

		assert_eq!(constant, expected);
	}
}

#[test]
fn rotation_offsets_match_walk() {
	let mut derived = [[0; 5]; 5];
	let mut rotation_amount = 0;

	let mut x = 1;
	let mut y = 0;

	for t in 0 .. 24 {
		rotation_amount += t + 1;
		derived[x][y] = rotation_amount % 64;

		let new_x = y;
		let new_y = (2 * x + 3 * y) % 5;

		x = new_x;
		y = new_y;
	}

	assert_eq!(derived, ROTATION_OFFSETS);
}

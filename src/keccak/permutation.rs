//! Keccak-f\[1600\]: 24 rounds of theta, rho, pi, chi and iota over 64-bit lanes.

use super::round_constants::{ROTATION_OFFSETS, ROUND_CONSTANTS};
use super::State;

pub const ROUNDS: usize = 24;

fn theta(a: &mut State) {
	let column: [u64; 5] = core::array::from_fn(|x| a[x].iter().fold(0, |acc, lane| acc ^ lane));

	for x in 0 .. 5 {
		let d = column[(x + 4) % 5] ^ column[(x + 1) % 5].rotate_left(1);

		for lane in a[x].iter_mut() {
			*lane ^= d;
		}
	}
}

// rotates every lane in place, then moves (x, y) to (y, 2x + 3y)
fn rho_pi(a: &mut State) {
	let mut b = [[0; 5]; 5];

	for x in 0 .. 5 {
		for y in 0 .. 5 {
			b[y][(2 * x + 3 * y) % 5] = a[x][y].rotate_left(ROTATION_OFFSETS[x][y]);
		}
	}

	*a = b;
}

fn chi(a: &mut State) {
	for y in 0 .. 5 {
		let row: [u64; 5] = core::array::from_fn(|x| a[x][y]);

		for x in 0 .. 5 {
			a[x][y] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
		}
	}
}

fn iota(a: &mut State, round: usize) {
	a[0][0] ^= ROUND_CONSTANTS[round];
}

pub fn keccak_f1600(state: &mut State) {
	for round in 0 .. ROUNDS {
		theta(state);
		rho_pi(state);
		chi(state);
		iota(state, round);
	}
}

#[test]
fn theta_of_a_single_bit() {
	// a lone bit in column 2 reaches column 3 as is and column 1 rotated by one
	let mut a = [[0; 5]; 5];
	a[2][3] = 1;
	theta(&mut a);

	for x in 0 .. 5 {
		for y in 0 .. 5 {
			let expected = match x {
				1 => 2,
				2 if y == 3 => 1,
				3 => 1,
				_ => 0,
			};

			assert_eq!(a[x][y], expected, "lane ({}, {})", x, y);
		}
	}
}

#[test]
fn rho_pi_moves_and_rotates() {
	let mut a = [[0; 5]; 5];
	a[1][0] = 1;
	rho_pi(&mut a);

	// (1, 0) rotates by 1 and lands on (0, 2)
	assert_eq!(a[0][2], 2);
	assert_eq!(a.iter().flatten().filter(|&&lane| lane != 0).count(), 1);
}

#[test]
fn chi_is_row_local() {
	let mut a = [[0; 5]; 5];
	a[1][4] = u64::MAX;
	chi(&mut a);

	// only x = 4 picks up !a[0] & a[1]
	assert_eq!(a[4][4], u64::MAX);
	assert_eq!(a[1][4], u64::MAX);
	assert_eq!(a[0][4], 0);

	for y in 0 .. 4 {
		assert!(a.iter().all(|column| column[y] == 0));
	}
}

#[test]
fn permutes_nist_example_state() {
	let mut state = [[0xa3a3a3a3a3a3a3a3; 5]; 5];

	for x in 1 .. 5 {
		state[x][4] = 0;
	}

	keccak_f1600(&mut state);

	let expected = [
		[0x7faaf4d610e331d4, 0x5dca2cb6b8135ef3, 0x9685ddd2d1fb3436, 0xe3fe653fade68ae4, 0xf1ae12a1024a32d9],
		[0xfc27f4f1e29ac527, 0x3e4c41332facd237, 0x7116548228f2b75b, 0xefaad2efd5e05e2b, 0x169af419f135e342],
		[0x5fee7d55aa1a19fa, 0xaf50852021380859, 0xe12f9c5d8e1f7162, 0xe9eab8dd8028d528, 0xf63d920ed69388a9],
		[0xe575f6bd726c65f1, 0x4e2d8df4e14ccfb6, 0x168339a7d1d4a375, 0x6a53d41257f5dfce, 0x9e54006c34ab489a],
		[0xaf17793d1c9684d5, 0xc51a82a2779d0d31, 0xb0c71017f6a8b2c4, 0xf0b716798d1c0d71, 0x85b91bb9d95adf58],
	];

	assert_eq!(state, expected);
}

#[test]
fn zero_state_first_lane() {
	let mut state = [[0; 5]; 5];
	keccak_f1600(&mut state);

	assert_eq!(state[0][0], 0xf1258f7940e1dde7);
}

//! The Keccak-f\[1600\] permutation and the sponge functions built on it.

mod codec;
mod permutation;
mod round_constants;

pub mod bits;
pub mod buffer;
pub mod cursor;
pub mod encoding;
pub mod padding;
pub mod params;
pub mod session;
pub mod sha3;
pub mod sponge;

pub use bits::{BitString, DomainSuffix};
pub use buffer::{BlockBuffer, BlockList};
pub use codec::{bytes_to_state, state_to_bytes, STATE_BYTES};
pub use cursor::OutputCursor;
pub use params::KeccakParameter;
pub use permutation::{keccak_f1600, ROUNDS};
pub use session::{Session, SessionBuilder, Strategy};
pub use sponge::{Phase, Sponge};

/// The 5x5 lane matrix, indexed as `state[x][y]`.
pub type State = [[u64; 5]; 5];

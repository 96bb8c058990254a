//! The Keccak family: SHA-3, SHAKE and RawSHAKE from FIPS 202, and cSHAKE,
//! KMAC and KMACXOF from NIST SP 800-185.
//!
//! One-shot use goes through [`digest`], [`cshake`] and [`kmac`]. For input
//! that arrives in pieces, build a [`Session`], feed it, and read the output
//! from the [`OutputCursor`] it finalizes into.
//!
//! ```
//! use krypton_keccak::{KeccakParameter, Session};
//!
//! let mut session = Session::new(KeccakParameter::Shake128)?;
//! session.update(b"hello ")?;
//! session.update(b"world")?;
//!
//! let mut output = session.finalize()?;
//! let first = output.next_u64()?;
//! let more = output.next_bytes(100)?;
//! # let _ = (first, more);
//! # Ok::<(), krypton_keccak::KeccakError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#![doc(html_logo_url = "https://raw.githubusercontent.com/ast-ral/libkrypton/master/logo.svg")]

extern crate alloc;

// to prevent broken links when building documentation in #![no_std] mode
#[cfg(all(not(feature = "std"), doc))]
extern crate std;

pub mod error;
pub mod keccak;

#[doc(inline)]
pub use error::{ErrorKind, KeccakError, Result};

#[doc(inline)]
pub use keccak::{KeccakParameter, OutputCursor, Session, SessionBuilder, Strategy};

#[doc(inline)]
pub use keccak::sha3::{cshake, digest, kmac};

//! FIPS-197 AES over explicit GF(2^8) matrix arithmetic.
//!
//! This crate follows the standard's own presentation and provides:
//! - [`Byte`], a field element of GF(2^8) with named `add` / `multiply`.
//! - [`ByteMatrix`], an m×n matrix over GF(2^8) used for the state, words and round keys.
//! - The round transforms (SubBytes, ShiftRows, MixColumns, AddRoundKey and inverses).
//! - The key schedule for 128, 192 and 256-bit keys.
//! - Single-block encryption and decryption.
//!
//! Only the raw block primitive is provided: no padding, no modes of operation. The
//! implementation aims for clarity and testability rather than speed or constant-time
//! guarantees; it should not be treated as side-channel hardened.
//!
//! ```
//! let block: [u8; 16] = [0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d,
//!                        0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07, 0x34];
//! let key: [u8; 16] = [0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!                      0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
//! let ct = aes197_core::encrypt(&block, &key).unwrap();
//! assert_eq!(&ct[..4], &[0x39u8, 0x25, 0x84, 0x1d]);
//! assert_eq!(aes197_core::decrypt(&ct, &key).unwrap(), block);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod field;
mod key;
mod matrix;
pub mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_LEN, STATE_SHAPE};
pub use crate::cipher::{decrypt, decrypt_block, encrypt, encrypt_block};
pub use crate::error::{AesError, Result};
pub use crate::field::Byte;
pub use crate::key::{expand_key, expand_key_with, pad_key, KeyPadding, KeySchedule, KeySize};
pub use crate::matrix::{ByteMatrix, Shape};
pub use crate::sbox::{inv_sbox, sbox};

//! Key sizes, key padding and the AES key schedule.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{AesError, Result};
use crate::field::Byte;
use crate::matrix::ByteMatrix;
use crate::round::{rot_word, sub_bytes};
use crate::sbox::RCON;

/// How keys whose length is not exactly 16, 24 or 32 bytes are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyPadding {
    /// Left-pad with zero bytes up to the next of 16, 24 or 32 bytes. Keys over 32 bytes are
    /// rejected.
    #[default]
    ZeroLeft,
    /// Accept only 16, 24 or 32 byte keys.
    Strict,
}

/// The three AES variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Classifies an exact key length in bytes.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn nk(self) -> usize {
        self.key_len() / 4
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        6 + self.nk()
    }

    fn from_round_key_count(count: usize) -> Option<Self> {
        [Self::Aes128, Self::Aes192, Self::Aes256]
            .into_iter()
            .find(|size| size.rounds() + 1 == count)
    }
}

/// Normalizes raw key bytes under `padding`, returning the variant and the padded key.
pub fn pad_key(key: &[u8], padding: KeyPadding) -> Result<(KeySize, Vec<u8>)> {
    let target = match padding {
        KeyPadding::Strict => KeySize::from_len(key.len()),
        KeyPadding::ZeroLeft => match key.len() {
            0..=16 => Some(KeySize::Aes128),
            17..=24 => Some(KeySize::Aes192),
            25..=32 => Some(KeySize::Aes256),
            _ => None,
        },
    };
    let size = target.ok_or(AesError::KeyLength {
        actual: key.len(),
        padding,
    })?;
    let mut padded = vec![0u8; size.key_len() - key.len()];
    padded.extend_from_slice(key);
    Ok((size, padded))
}

/// Expanded round keys `K_0 ..= K_Nr`, each a 4×4 matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Block>", into = "Vec<Block>")
)]
pub struct KeySchedule {
    size: KeySize,
    round_keys: Vec<ByteMatrix>,
}

impl KeySchedule {
    /// Variant the schedule was expanded for.
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of cipher rounds (`Nr`).
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Number of round keys, always `Nr + 1`.
    pub fn len(&self) -> usize {
        self.round_keys.len()
    }

    /// Returns true if the schedule holds no round keys; expansion never produces one.
    pub fn is_empty(&self) -> bool {
        self.round_keys.is_empty()
    }

    /// Returns the round key at `round` (`0..=Nr`).
    ///
    /// # Panics
    ///
    /// Panics if `round > self.rounds()`.
    #[inline]
    pub fn round_key(&self, round: usize) -> &ByteMatrix {
        &self.round_keys[round]
    }

    /// All round keys in encryption order.
    pub fn round_keys(&self) -> &[ByteMatrix] {
        &self.round_keys
    }

    /// The 4×4(Nr+1) word matrix `W` the round keys were cut from.
    pub fn word_matrix(&self) -> ByteMatrix {
        ByteMatrix::hconcat(&self.round_keys).expect("round keys share four rows")
    }

    /// Round keys serialized column by column, one block each.
    pub fn to_blocks(&self) -> Vec<Block> {
        self.round_keys
            .iter()
            .map(|key| key.to_block().expect("round keys are 4x4"))
            .collect()
    }
}

impl TryFrom<Vec<Block>> for KeySchedule {
    type Error = AesError;

    fn try_from(blocks: Vec<Block>) -> Result<Self> {
        let size = KeySize::from_round_key_count(blocks.len())
            .ok_or(AesError::RoundKeyCount(blocks.len()))?;
        let round_keys = blocks
            .iter()
            .map(|block| ByteMatrix::from_block(block))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { size, round_keys })
    }
}

impl From<KeySchedule> for Vec<Block> {
    fn from(schedule: KeySchedule) -> Self {
        schedule.to_blocks()
    }
}

fn rcon_word(index: usize) -> ByteMatrix {
    ByteMatrix::from_array([[RCON[index]], [0], [0], [0]])
}

/// Expands a key into `Nr + 1` round keys, zero-left-padding short keys.
pub fn expand_key(key: &[u8]) -> Result<KeySchedule> {
    expand_key_with(key, KeyPadding::default())
}

/// Expands a key into `Nr + 1` round keys under an explicit padding policy.
pub fn expand_key_with(key: &[u8], padding: KeyPadding) -> Result<KeySchedule> {
    let (size, key) = pad_key(key, padding)?;
    let nk = size.nk();
    let nr = size.rounds();
    let total_words = 4 * (nr + 1);

    let mut w = ByteMatrix::zeros(4, total_words);
    for (i, &byte) in key.iter().enumerate() {
        w.set(i % 4, i / 4, Byte(byte))?;
    }

    for j in nk..total_words {
        let mut temp = w.column(j - 1)?;
        if j % nk == 0 {
            rot_word(&mut temp)?;
            sub_bytes(&mut temp);
            temp.add_assign(&rcon_word(j / nk - 1))?;
        } else if nk > 6 && j % nk == 4 {
            sub_bytes(&mut temp);
        }
        let word = w.column(j - nk)?.add(&temp)?;
        w.set_column(j, &word)?;
    }

    let round_keys = (0..=nr)
        .map(|round| w.columns(4 * round, 4))
        .collect::<Result<Vec<_>>>()?;

    Ok(KeySchedule { size, round_keys })
}

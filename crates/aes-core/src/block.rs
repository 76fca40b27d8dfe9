//! Block representation helpers.

use crate::error::{AesError, Result};
use crate::field::Byte;
use crate::matrix::{ByteMatrix, Shape};

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Shape of the cipher state and of every round key.
pub const STATE_SHAPE: Shape = Shape::new(4, 4);

impl ByteMatrix {
    /// Loads a 16-byte block into a 4×4 state, column by column.
    ///
    /// Byte `i` lands at row `i % 4`, column `i / 4`.
    pub fn from_block(block: &[u8]) -> Result<Self> {
        if block.len() != BLOCK_LEN {
            return Err(AesError::Length {
                context: "ByteMatrix::from_block",
                expected: BLOCK_LEN,
                actual: block.len(),
            });
        }
        let mut state = ByteMatrix::zeros(4, 4);
        for (i, &byte) in block.iter().enumerate() {
            state.set(i % 4, i / 4, Byte(byte))?;
        }
        Ok(state)
    }

    /// Reads a 4×4 state back out as a block, column by column.
    pub fn to_block(&self) -> Result<Block> {
        self.ensure_shape("ByteMatrix::to_block", STATE_SHAPE)?;
        let mut block = [0u8; BLOCK_LEN];
        for (i, out) in block.iter_mut().enumerate() {
            *out = self.get(i % 4, i / 4)?.value();
        }
        Ok(block)
    }
}

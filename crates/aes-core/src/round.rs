//! AES round transformations.
//!
//! Each transform mutates its operand in place. Shape-restricted transforms validate first and
//! return [`AesError::Dimension`](crate::AesError::Dimension) without touching the operand.

use crate::block::STATE_SHAPE;
use crate::error::Result;
use crate::field::Byte;
use crate::matrix::{ByteMatrix, Shape};
use crate::sbox::{inv_sbox, sbox, INV_MIX_COLUMNS, MIX_COLUMNS};

/// Shape of a key-schedule word.
pub const WORD_SHAPE: Shape = Shape::new(4, 1);

/// Applies SubBytes to every element. Accepts any shape.
#[inline]
pub fn sub_bytes(state: &mut ByteMatrix) {
    state.map_in_place(|b| Byte(sbox(b.value())));
}

/// Applies the inverse SubBytes transformation. Accepts any shape.
#[inline]
pub fn inv_sub_bytes(state: &mut ByteMatrix) {
    state.map_in_place(|b| Byte(inv_sbox(b.value())));
}

/// Rotates row `r` of a 4×4 state left by `r` positions.
pub fn shift_rows(state: &mut ByteMatrix) -> Result<()> {
    state.ensure_shape("shift_rows", STATE_SHAPE)?;
    for row in 1..4 {
        state.rotate_row_left(row, row)?;
    }
    Ok(())
}

/// Rotates row `r` of a 4×4 state right by `r` positions.
pub fn inv_shift_rows(state: &mut ByteMatrix) -> Result<()> {
    state.ensure_shape("inv_shift_rows", STATE_SHAPE)?;
    for row in 1..4 {
        state.rotate_row_right(row, row)?;
    }
    Ok(())
}

/// MixColumns: left-multiplies the 4×4 state by the fixed circulant matrix.
pub fn mix_columns(state: &mut ByteMatrix) -> Result<()> {
    state.ensure_shape("mix_columns", STATE_SHAPE)?;
    *state = MIX_COLUMNS.multiply(state)?;
    Ok(())
}

/// Inverse MixColumns.
pub fn inv_mix_columns(state: &mut ByteMatrix) -> Result<()> {
    state.ensure_shape("inv_mix_columns", STATE_SHAPE)?;
    *state = INV_MIX_COLUMNS.multiply(state)?;
    Ok(())
}

/// Adds (XORs) a round key into the state. Both operands must be 4×4.
pub fn add_round_key(state: &mut ByteMatrix, round_key: &ByteMatrix) -> Result<()> {
    state.ensure_shape("add_round_key", STATE_SHAPE)?;
    round_key.ensure_shape("add_round_key", STATE_SHAPE)?;
    state.add_assign(round_key)
}

/// Cyclically rotates a 4×1 word up by one position: `[a0, a1, a2, a3] -> [a1, a2, a3, a0]`.
pub fn rot_word(word: &mut ByteMatrix) -> Result<()> {
    word.ensure_shape("rot_word", WORD_SHAPE)?;
    let first = word.get(0, 0)?;
    for row in 0..3 {
        let next = word.get(row + 1, 0)?;
        word.set(row, 0, next)?;
    }
    word.set(3, 0, first)
}

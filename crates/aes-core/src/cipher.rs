//! Single-block encryption and decryption.

use crate::block::{Block, BLOCK_LEN};
use crate::error::{AesError, Result};
use crate::key::{expand_key, KeySchedule};
use crate::matrix::ByteMatrix;
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

fn check_block_len(context: &'static str, block: &[u8]) -> Result<()> {
    if block.len() != BLOCK_LEN {
        return Err(AesError::Length {
            context,
            expected: BLOCK_LEN,
            actual: block.len(),
        });
    }
    Ok(())
}

/// Encrypts a single 16-byte block under `key`, expanding the key first.
pub fn encrypt(block: &[u8], key: &[u8]) -> Result<Block> {
    check_block_len("encrypt", block)?;
    encrypt_block(block, &expand_key(key)?)
}

/// Decrypts a single 16-byte block under `key`, expanding the key first.
pub fn decrypt(block: &[u8], key: &[u8]) -> Result<Block> {
    check_block_len("decrypt", block)?;
    decrypt_block(block, &expand_key(key)?)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &[u8], schedule: &KeySchedule) -> Result<Block> {
    check_block_len("encrypt_block", block)?;
    let nr = schedule.rounds();
    let mut state = ByteMatrix::from_block(block)?;

    add_round_key(&mut state, schedule.round_key(0))?;

    for round in 1..nr {
        sub_bytes(&mut state);
        shift_rows(&mut state)?;
        mix_columns(&mut state)?;
        add_round_key(&mut state, schedule.round_key(round))?;
    }

    sub_bytes(&mut state);
    shift_rows(&mut state)?;
    add_round_key(&mut state, schedule.round_key(nr))?;

    state.to_block()
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &[u8], schedule: &KeySchedule) -> Result<Block> {
    check_block_len("decrypt_block", block)?;
    let nr = schedule.rounds();
    let mut state = ByteMatrix::from_block(block)?;

    add_round_key(&mut state, schedule.round_key(nr))?;
    for round in (1..nr).rev() {
        inv_shift_rows(&mut state)?;
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, schedule.round_key(round))?;
        inv_mix_columns(&mut state)?;
    }
    inv_shift_rows(&mut state)?;
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, schedule.round_key(0))?;

    state.to_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const NIST_PLAIN: &str = "00112233445566778899aabbccddeeff";
    const NIST_KEY_128: &str = "000102030405060708090a0b0c0d0e0f";
    const NIST_KEY_192: &str = "000102030405060708090a0b0c0d0e0f1011121314151617";
    const NIST_KEY_256: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn h(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn encrypt_matches_appendix_b() {
        let ct = encrypt(
            &h("3243f6a8885a308d313198a2e0370734"),
            &h("2b7e151628aed2a6abf7158809cf4f3c"),
        )
        .unwrap();
        assert_eq!(hex::encode(ct), "3925841d02dc09fbdc118597196a0b32");
    }

    #[test]
    fn encrypt_matches_appendix_c_vectors() {
        let cases = [
            (NIST_KEY_128, "69c4e0d86a7b0430d8cdb78070b4c55a"),
            (NIST_KEY_192, "dda97ca4864cdfe06eaf70a0ec0d7191"),
            (NIST_KEY_256, "8ea2b7ca516745bfeafc49904b496089"),
        ];
        for (key, expected) in cases {
            let ct = encrypt(&h(NIST_PLAIN), &h(key)).unwrap();
            assert_eq!(hex::encode(ct), expected, "key {key}");
            let pt = decrypt(&ct, &h(key)).unwrap();
            assert_eq!(hex::encode(pt), NIST_PLAIN, "key {key}");
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([40u8; 32]);
        for key_len in [16usize, 24, 32] {
            for _ in 0..32 {
                let mut key = vec![0u8; key_len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut block);
                let schedule = expand_key(&key).unwrap();
                let ct = encrypt_block(&block, &schedule).unwrap();
                assert_ne!(ct, block);
                assert_eq!(decrypt_block(&ct, &schedule).unwrap(), block);
            }
        }
    }

    #[test]
    fn short_key_behaves_like_zero_padded_key() {
        let block = h(NIST_PLAIN);
        let short = [0xffu8; 5];
        let mut padded = vec![0u8; 11];
        padded.extend_from_slice(&short);
        assert_eq!(encrypt(&block, &short).unwrap(), encrypt(&block, &padded).unwrap());
    }

    #[test]
    fn rejects_wrong_block_length() {
        let key = h(NIST_KEY_128);
        for len in [0usize, 15, 17, 32] {
            let block = vec![0u8; len];
            assert_eq!(
                encrypt(&block, &key).unwrap_err(),
                AesError::Length {
                    context: "encrypt",
                    expected: 16,
                    actual: len,
                }
            );
            assert!(matches!(
                decrypt(&block, &key),
                Err(AesError::Length { context: "decrypt", .. })
            ));
        }
    }

    #[test]
    fn block_length_is_checked_before_the_key() {
        assert!(matches!(
            encrypt(&[0u8; 3], &[0u8; 40]),
            Err(AesError::Length { .. })
        ));
        assert!(matches!(
            encrypt(&[0u8; 16], &[0u8; 40]),
            Err(AesError::KeyLength { .. })
        ));
    }
}

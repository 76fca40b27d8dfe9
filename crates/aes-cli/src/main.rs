//! Command-line interface for `aes197`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes197_core::{
    decrypt_block, encrypt_block, expand_key, expand_key_with, Block, KeyPadding, KeySchedule,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Single-block FIPS-197 AES.
#[derive(Parser)]
#[command(name = "aes197", version, author, about = "Single-block FIPS-197 AES")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt one 16-byte block.
    Enc {
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        #[command(flatten)]
        key: KeySource,
    },
    /// Decrypt one 16-byte block.
    Dec {
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        #[command(flatten)]
        key: KeySource,
    },
    /// Expand a key and print its round keys.
    Expand {
        /// Key as hex (16, 24 or 32 bytes; shorter keys are zero-left-padded).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Reject keys that are not exactly 16, 24 or 32 bytes.
        #[arg(long, default_value_t = false)]
        strict_key: bool,
        /// Also write the serialized schedule to this file.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run the FIPS-197 example vectors and random round trips.
    Selftest {
        /// Number of random round trips per key size.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Where the round keys come from.
#[derive(Args)]
struct KeySource {
    /// Key as hex (16, 24 or 32 bytes; shorter keys are zero-left-padded).
    #[arg(long, value_name = "HEX", required_unless_present = "schedule")]
    key_hex: Option<String>,
    /// Schedule file written by `aes197 expand --out`.
    #[arg(long, value_name = "FILE", conflicts_with = "key_hex")]
    schedule: Option<PathBuf>,
    /// Reject keys that are not exactly 16, 24 or 32 bytes.
    #[arg(long, default_value_t = false, conflicts_with = "schedule")]
    strict_key: bool,
}

impl KeySource {
    fn load(&self) -> Result<KeySchedule> {
        match (&self.key_hex, &self.schedule) {
            (Some(key_hex), None) => parse_and_expand(key_hex, padding(self.strict_key)),
            (None, Some(path)) => load_schedule(path),
            _ => bail!("exactly one of --key-hex or --schedule is required"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc { block_hex, key } => cmd_enc(&block_hex, &key),
        Commands::Dec { block_hex, key } => cmd_dec(&block_hex, &key),
        Commands::Expand {
            key_hex,
            strict_key,
            out,
        } => cmd_expand(&key_hex, strict_key, out.as_deref()),
        Commands::Selftest { samples, seed } => cmd_selftest(samples, seed),
    }
}

fn cmd_enc(block_hex: &str, key: &KeySource) -> Result<()> {
    let block = parse_block_hex(block_hex)?;
    let schedule = key.load()?;
    let ct = encrypt_block(&block, &schedule).context("encrypt block")?;
    println!("{}", hex::encode(ct));
    Ok(())
}

fn cmd_dec(block_hex: &str, key: &KeySource) -> Result<()> {
    let block = parse_block_hex(block_hex)?;
    let schedule = key.load()?;
    let pt = decrypt_block(&block, &schedule).context("decrypt block")?;
    println!("{}", hex::encode(pt));
    Ok(())
}

fn cmd_expand(key_hex: &str, strict_key: bool, out: Option<&Path>) -> Result<()> {
    let schedule = parse_and_expand(key_hex, padding(strict_key))?;
    println!(
        "{:?}: {} rounds, {} round keys",
        schedule.key_size(),
        schedule.rounds(),
        schedule.len()
    );
    for (round, block) in schedule.to_blocks().iter().enumerate() {
        println!("round {:>2}: {}", round, hex::encode(block));
    }
    if let Some(path) = out {
        let bytes = bincode::serialize(&schedule).context("serialize schedule")?;
        fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

/// A known-answer case from FIPS-197 Appendices B and C.
struct Vector {
    name: &'static str,
    key: &'static str,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const VECTORS: [Vector; 4] = [
    Vector {
        name: "AES-128 (Appendix B)",
        key: "2b7e151628aed2a6abf7158809cf4f3c",
        plaintext: "3243f6a8885a308d313198a2e0370734",
        ciphertext: "3925841d02dc09fbdc118597196a0b32",
    },
    Vector {
        name: "AES-128 (Appendix C.1)",
        key: "000102030405060708090a0b0c0d0e0f",
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "69c4e0d86a7b0430d8cdb78070b4c55a",
    },
    Vector {
        name: "AES-192 (Appendix C.2)",
        key: "000102030405060708090a0b0c0d0e0f1011121314151617",
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "dda97ca4864cdfe06eaf70a0ec0d7191",
    },
    Vector {
        name: "AES-256 (Appendix C.3)",
        key: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "8ea2b7ca516745bfeafc49904b496089",
    },
];

fn cmd_selftest(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut failures = 0usize;

    for vector in &VECTORS {
        let schedule = parse_and_expand(vector.key, KeyPadding::Strict)?;
        let plaintext = parse_block_hex(vector.plaintext)?;
        let ciphertext = encrypt_block(&plaintext, &schedule)?;
        let recovered = decrypt_block(&ciphertext, &schedule)?;
        let pass = hex::encode(ciphertext) == vector.ciphertext && recovered == plaintext;
        println!("[{}] {}", verdict(pass), vector.name);
        println!("  key:        {}", vector.key);
        println!("  plaintext:  {}", vector.plaintext);
        println!("  ciphertext: {}", hex::encode(ciphertext));
        println!("  recovered:  {}", hex::encode(recovered));
        if !pass {
            failures += 1;
        }
    }

    let mut rng = seeded_rng(seed);
    for key_len in [16usize, 24, 32] {
        let mut passed = 0usize;
        for _ in 0..samples {
            let mut key = vec![0u8; key_len];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut block);
            let schedule = expand_key(&key)?;
            let ct = encrypt_block(&block, &schedule)?;
            if decrypt_block(&ct, &schedule)? == block {
                passed += 1;
            }
        }
        let pass = passed == samples;
        println!(
            "[{}] AES-{} random round trips: {}/{}",
            verdict(pass),
            key_len * 8,
            passed,
            samples
        );
        if !pass {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} self-test case(s) failed");
    }
    Ok(())
}

fn verdict(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}

fn padding(strict_key: bool) -> KeyPadding {
    if strict_key {
        KeyPadding::Strict
    } else {
        KeyPadding::ZeroLeft
    }
}

fn parse_and_expand(key_hex: &str, padding: KeyPadding) -> Result<KeySchedule> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    expand_key_with(&key, padding).context("expand key")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    if bytes.len() != 16 {
        bail!("block must be 16 bytes (32 hex characters), got {}", bytes.len());
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn load_schedule(path: &Path) -> Result<KeySchedule> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    bincode::deserialize(&bytes).context("deserialize schedule")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_key_source_variants() {
        let cli = Cli::try_parse_from([
            "aes197",
            "enc",
            "--block-hex",
            "00112233445566778899aabbccddeeff",
            "--key-hex",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap();
        let Commands::Enc { key, .. } = cli.command else {
            panic!("expected enc");
        };
        assert_eq!(key.load().unwrap().rounds(), 10);

        assert!(Cli::try_parse_from(["aes197", "dec", "--block-hex", "00"]).is_err());
        assert!(Cli::try_parse_from([
            "aes197",
            "dec",
            "--block-hex",
            "00",
            "--key-hex",
            "00",
            "--schedule",
            "s.bin",
        ])
        .is_err());
    }

    #[test]
    fn schedule_survives_bincode() {
        let schedule = parse_and_expand(VECTORS[2].key, KeyPadding::Strict).unwrap();
        let bytes = bincode::serialize(&schedule).unwrap();
        let decoded: KeySchedule = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, schedule);
    }

    #[test]
    fn selftest_passes_with_seed() {
        cmd_selftest(2, Some(7)).unwrap();
    }

    #[test]
    fn block_hex_must_be_sixteen_bytes() {
        assert!(parse_block_hex("0011").is_err());
        assert!(parse_block_hex("zz").is_err());
        assert_eq!(parse_block_hex(VECTORS[0].plaintext).unwrap()[0], 0x32);
    }
}

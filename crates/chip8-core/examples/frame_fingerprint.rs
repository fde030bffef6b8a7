//! Deterministic frame fingerprint used for cross-host comparison.
//!
//! Runs a fixed program with a fixed RNG seed for a fixed number of ticks and
//! prints an FNV-1a hash over the framebuffer, registers and memory.

use chip8_core::{run_tick, CoreConfig, CoreState, FrameBuffer, RunStop};
use env_logger as _;
use log as _;
use proptest as _;
use rand as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;

const TICKS: usize = 120;

#[rustfmt::skip]
const PROGRAM: [u16; 14] = [
    0x00E0,         // clear
    0x6000,         // V0 = 0 (x)
    0x6100,         // V1 = 0 (y)
    0x6200,         // V2 = 0 (digit)
    0xF229,         // I = glyph(V2)
    0xD015,         // draw 5 rows
    0x7005,         // x += 5
    0x7201,         // digit += 1
    0xC307,         // V3 = rand & 7
    0x8134,         // y += V3
    0x3210,         // all 16 digits drawn?
    0x1208,         // no: next glyph
    0x6200,         // yes: restart digits
    0x1208,
];

fn image() -> Vec<u8> {
    PROGRAM.iter().flat_map(|word| word.to_be_bytes()).collect()
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn hash_frame(hash: &mut u64, frame: &FrameBuffer) {
    for line in frame {
        let packed = line
            .iter()
            .fold(0u64, |acc, lit| (acc << 1) | u64::from(*lit));
        hash_bytes(hash, &packed.to_le_bytes());
    }
}

fn fingerprint() -> Result<String, chip8_core::LoadError> {
    let config = CoreConfig {
        rng_seed: Some(0x0000_C8C8),
        ..CoreConfig::default()
    };
    let mut state = CoreState::with_program(&config, &image())?;

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for _ in 0..TICKS {
        let outcome = run_tick(&mut state, &config);
        hash_bytes(&mut hash, &outcome.steps.to_le_bytes());
        if let RunStop::Fault(cause) = outcome.stop {
            hash_bytes(&mut hash, &[0xFF, cause.as_u8()]);
            break;
        }
    }

    hash_frame(&mut hash, &state.frame());
    hash_bytes(&mut hash, state.regs.range_through(chip8_core::Register::VF));
    hash_bytes(&mut hash, &state.regs.i().to_le_bytes());
    hash_bytes(&mut hash, &state.regs.pc().to_le_bytes());
    hash_bytes(&mut hash, state.memory.as_slice());

    Ok(format!("{hash:016x}"))
}

fn main() -> Result<(), chip8_core::LoadError> {
    println!("{}", fingerprint()?);
    Ok(())
}

#![no_main]

use chip8_core::{
    load_program, run_tick, validate_fetch, validate_span, CoreConfig, CoreState, Decoder,
    MAX_PROGRAM_BYTES,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }

    let word = u16::from_be_bytes([data[0], data[1]]);
    let addr = u16::from_be_bytes([data[2], data[3]]);
    let keys = data[4];

    let _ = Decoder::decode(word);
    let _ = validate_fetch(addr);
    let _ = validate_span(addr, usize::from(keys));

    let config = CoreConfig {
        rng_seed: Some(u64::from(word)),
        ..CoreConfig::default()
    };
    let mut state = CoreState::with_config(&config);
    let image = &data[5..];
    let image = &image[..image.len().min(MAX_PROGRAM_BYTES)];
    if load_program(&mut state.memory, image).is_err() {
        return;
    }
    state.set_key(keys & 0x0F, keys & 0x10 != 0);

    for _ in 0..8 {
        if run_tick(&mut state, &config).steps == 0 && state.latched_fault().is_some() {
            state.clear_fault();
        }
    }
});

//! Property checks over arithmetic, drawing, timers and decode totality.

use env_logger as _;
use log as _;
use rand as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;

use chip8_core::{
    classify_opcode, step_one, validate_span, CoreConfig, CoreState, Decoder, DecodedOrUnknown,
    Display, FaultCode, Register, RunState, StepOutcome, Timer, DISPLAY_HEIGHT, DISPLAY_WIDTH,
    MEMORY_BYTES,
};
use proptest::prelude::*;

fn core() -> CoreState {
    CoreState::with_config(&CoreConfig {
        rng_seed: Some(99),
        ..CoreConfig::default()
    })
}

fn exec(state: &mut CoreState, word: u16) -> StepOutcome {
    let pc = state.regs.pc();
    let [hi, lo] = word.to_be_bytes();
    state.memory.write(pc, hi).expect("in range");
    state.memory.write(pc + 1, lo).expect("in range");
    step_one(state)
}

proptest! {
    #[test]
    fn property_add_immediate_wraps(vx in any::<u8>(), nn in any::<u8>()) {
        let mut state = core();
        state.regs.set_v(Register::V4, vx);
        state.regs.set_v(Register::VF, 0x77);

        exec(&mut state, 0x7400 | u16::from(nn));

        prop_assert_eq!(state.regs.v(Register::V4), vx.wrapping_add(nn));
        prop_assert_eq!(state.regs.v(Register::VF), 0x77);
    }

    #[test]
    fn property_add_register_sets_carry(vx in any::<u8>(), vy in any::<u8>()) {
        let mut state = core();
        state.regs.set_v(Register::V1, vx);
        state.regs.set_v(Register::V2, vy);

        exec(&mut state, 0x8124);

        let sum = u16::from(vx) + u16::from(vy);
        prop_assert_eq!(u16::from(state.regs.v(Register::V1)), sum & 0xFF);
        prop_assert_eq!(state.regs.flag(), u8::from(sum > 0xFF));
    }

    #[test]
    fn property_subtract_sets_no_borrow(vx in any::<u8>(), vy in any::<u8>()) {
        let mut state = core();
        state.regs.set_v(Register::V1, vx);
        state.regs.set_v(Register::V2, vy);

        exec(&mut state, 0x8125);

        prop_assert_eq!(state.regs.v(Register::V1), vx.wrapping_sub(vy));
        prop_assert_eq!(state.regs.flag(), u8::from(vx >= vy));
    }

    #[test]
    fn property_draw_twice_restores_display(
        x in 0usize..DISPLAY_WIDTH,
        y in 0usize..DISPLAY_HEIGHT,
        sprite in proptest::collection::vec(any::<u8>(), 0..=15),
        background in proptest::collection::vec(any::<u8>(), 0..=15),
    ) {
        let mut display = Display::new();
        display.draw(0, 0, &background);
        let before = display.snapshot();

        display.draw(x, y, &sprite);
        let after_first = display.snapshot();
        let second = display.draw(x, y, &sprite);

        prop_assert_eq!(display.snapshot(), before);
        let first_lit_a_pixel = before
            .iter()
            .flatten()
            .zip(after_first.iter().flatten())
            .any(|(was, now)| !*was && *now);
        prop_assert_eq!(second, first_lit_a_pixel);
    }

    #[test]
    fn property_first_draw_on_blank_screen_never_collides(
        vx in any::<u8>(),
        vy in any::<u8>(),
        rows in 1u8..=15,
    ) {
        let mut state = core();
        state.regs.set_i(0x0050);
        state.regs.set_v(Register::V1, vx);
        state.regs.set_v(Register::V2, vy);

        exec(&mut state, 0xD120 | u16::from(rows));
        prop_assert_eq!(state.regs.flag(), 0);

        exec(&mut state, 0xD120 | u16::from(rows));
        prop_assert_eq!(state.display.lit_count(), 0);
    }

    #[test]
    fn property_timer_floor(start in any::<u8>(), ticks in 0usize..600) {
        let mut timer = Timer::new();
        timer.set(start);
        for _ in 0..ticks {
            timer.tick();
        }
        let expected = usize::from(start).saturating_sub(ticks);
        prop_assert_eq!(usize::from(timer.get()), expected);
    }

    #[test]
    fn property_every_word_decodes_or_is_unknown(word in any::<u16>()) {
        match Decoder::decode(word) {
            DecodedOrUnknown::Instruction(instr) => {
                prop_assert_eq!(Some(instr.encoding), classify_opcode(word));
            }
            DecodedOrUnknown::Unknown(fields) => {
                prop_assert_eq!(fields.raw, word);
                prop_assert!(classify_opcode(word).is_none());
            }
        }
    }

    #[test]
    fn property_any_word_steps_without_panicking(word in any::<u16>(), i in any::<u16>()) {
        let mut state = core();
        state.regs.set_i(i);
        let outcome = exec(&mut state, word);
        match outcome {
            StepOutcome::Fault { cause } => {
                prop_assert_eq!(state.run_state, RunState::FaultLatched(cause));
            }
            StepOutcome::AwaitingKey { register } => {
                prop_assert_eq!(state.run_state, RunState::AwaitingKey { register });
            }
            StepOutcome::Retired { .. } | StepOutcome::UnknownOpcode { .. } => {
                prop_assert_eq!(state.run_state, RunState::Running);
            }
        }
    }

    #[test]
    fn property_span_validation_matches_memory_size(addr in any::<u16>(), len in 0usize..64) {
        let fits = usize::from(addr) + len <= MEMORY_BYTES && usize::from(addr) < MEMORY_BYTES;
        let checked = validate_span(addr, len);
        if fits {
            prop_assert!(checked.is_ok());
        } else {
            prop_assert_eq!(checked, Err(FaultCode::MemoryOutOfBounds));
        }
    }
}

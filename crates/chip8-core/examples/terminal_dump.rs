//! Headless host that runs a program for a few seconds of simulated time and
//! prints the final frame to the terminal.
//!
//! ```text
//! RUST_LOG=chip8_core=debug cargo run --example terminal_dump -- path/to/program.ch8
//! ```
//!
//! Without a path a built-in digit demo runs.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use chip8_core::{
    load_program_from_reader, CoreConfig, CoreState, FrameBuffer, FrameSink, Scheduler,
    FRAME_DURATION, TIMER_HZ,
};
use proptest as _;
use rand as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;

const SECONDS: u32 = 3;

#[rustfmt::skip]
const DEMO: [u16; 10] = [
    0x6008, 0x610C,     // x = 8, y = 12
    0x6200,             // digit = 0
    0xF229, 0xD015,     // draw glyph
    0x7006, 0x7201,     // advance
    0x3208, 0x1206,     // eight digits
    0x1212,             // idle
];

#[derive(Default)]
struct TerminalSink {
    last: Option<FrameBuffer>,
    presented: u32,
    beeping_frames: u32,
}

impl FrameSink for TerminalSink {
    fn present(&mut self, frame: &FrameBuffer, sound_active: bool) {
        self.last = Some(*frame);
        self.presented += 1;
        if sound_active {
            self.beeping_frames += 1;
        }
    }
}

fn render(frame: &FrameBuffer) -> String {
    frame
        .chunks(2)
        .map(|pair| {
            let (top, bottom) = (&pair[0], pair.get(1));
            top.iter()
                .enumerate()
                .map(|(x, upper)| match (*upper, bottom.is_some_and(|row| row[x])) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = CoreConfig::default();
    let mut state = CoreState::with_config(&config);
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path)?;
            load_program_from_reader(&mut state.memory, BufReader::new(file))?;
            log::info!("running {path}");
        }
        None => {
            let image: Vec<u8> = DEMO.iter().flat_map(|word| word.to_be_bytes()).collect();
            state.load_program(&image)?;
        }
    }

    let mut scheduler = Scheduler::new(config);
    let mut sink = TerminalSink::default();
    for _ in 0..SECONDS * TIMER_HZ {
        if let Err(cause) = scheduler.advance(&mut state, FRAME_DURATION, &mut sink) {
            log::error!("stopped: {cause}");
            break;
        }
    }

    if let Some(frame) = sink.last {
        println!("{}", render(&frame));
    }
    println!(
        "frames: {}, beeping: {}, instructions: {}, unknown opcodes: {}",
        sink.presented,
        sink.beeping_frames,
        state.diag.instruction_count,
        state.diag.unknown_opcode_count
    );
    Ok(())
}

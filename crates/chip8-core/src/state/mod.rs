//! Architectural interpreter state model primitives.

/// Register file types and storage model.
pub mod registers;
/// Interpreter run-state latch.
pub mod run_state;
/// Bounded return-address stack.
pub mod stack;

pub use registers::{Register, RegisterFile, REGISTER_COUNT};
pub use run_state::RunState;
pub use stack::{CallStack, STACK_DEPTH};

use crate::{FaultCode, Register};

/// Host-observable execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the next instruction.
    #[default]
    Running,
    /// Stalled on `FX0A`; the same instruction is re-decoded on the next step.
    AwaitingKey {
        /// Register that will receive the key.
        register: Register,
    },
    /// Fault is latched and no further progress is possible until the host
    /// clears it or resets.
    FaultLatched(FaultCode),
}

impl RunState {
    /// Returns the currently latched fault, if this state is fault-latched.
    #[must_use]
    pub const fn latched_fault(self) -> Option<FaultCode> {
        match self {
            Self::FaultLatched(cause) => Some(cause),
            Self::Running | Self::AwaitingKey { .. } => None,
        }
    }

    /// Returns true while `FX0A` is stalling execution.
    #[must_use]
    pub const fn is_awaiting_key(self) -> bool {
        matches!(self, Self::AwaitingKey { .. })
    }
}

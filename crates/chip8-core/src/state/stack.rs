use crate::FaultCode;

/// Maximum number of nested subroutine calls.
pub const STACK_DEPTH: usize = 16;

/// Fixed-capacity stack of return addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    depth: usize,
}

impl CallStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: [0; STACK_DEPTH],
            depth: 0,
        }
    }

    /// Pushes a return address.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackOverflow`] when all frames are in use; the
    /// stack is left unchanged.
    pub fn push(&mut self, addr: u16) -> Result<(), FaultCode> {
        let Some(slot) = self.frames.get_mut(self.depth) else {
            return Err(FaultCode::StackOverflow);
        };
        *slot = addr;
        self.depth += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self) -> Result<u16, FaultCode> {
        let Some(top) = self.depth.checked_sub(1) else {
            return Err(FaultCode::StackUnderflow);
        };
        self.depth = top;
        Ok(self.frames[top])
    }

    /// Number of frames in use.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true when no frame is in use.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Live frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.depth]
    }
}

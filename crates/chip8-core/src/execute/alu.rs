//! Register-to-register arithmetic and logic (`8XYn`).

use crate::Quirks;

/// Operation selected by the low nibble of an `8XYn` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `8XY0`
    Move,
    /// `8XY1`
    Or,
    /// `8XY2`
    And,
    /// `8XY3`
    Xor,
    /// `8XY4`
    Add,
    /// `8XY5`
    Sub,
    /// `8XY6`
    ShiftRight,
    /// `8XY7`
    SubReverse,
    /// `8XYE`
    ShiftLeft,
}

/// Value for `Vx` plus the `VF` write, if the operation makes one.
///
/// `VF` is written after `Vx`, so when `X` is `F` the flag wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AluResult {
    /// New value of `Vx`.
    pub value: u8,
    /// New value of `VF`, or `None` to leave it alone.
    pub flag: Option<bool>,
}

impl AluOp {
    /// Computes the result of `Vx <op> Vy`.
    #[must_use]
    pub const fn evaluate(self, vx: u8, vy: u8, quirks: Quirks) -> AluResult {
        let logic_flag = if quirks.logic_resets_vf {
            Some(false)
        } else {
            None
        };
        let shift_source = if quirks.shift_uses_vy { vy } else { vx };

        match self {
            Self::Move => AluResult {
                value: vy,
                flag: None,
            },
            Self::Or => AluResult {
                value: vx | vy,
                flag: logic_flag,
            },
            Self::And => AluResult {
                value: vx & vy,
                flag: logic_flag,
            },
            Self::Xor => AluResult {
                value: vx ^ vy,
                flag: logic_flag,
            },
            Self::Add => {
                let (value, carry) = vx.overflowing_add(vy);
                AluResult {
                    value,
                    flag: Some(carry),
                }
            }
            Self::Sub => {
                let (value, borrow) = vx.overflowing_sub(vy);
                AluResult {
                    value,
                    flag: Some(!borrow),
                }
            }
            Self::SubReverse => {
                let (value, borrow) = vy.overflowing_sub(vx);
                AluResult {
                    value,
                    flag: Some(!borrow),
                }
            }
            Self::ShiftRight => AluResult {
                value: shift_source >> 1,
                flag: Some(shift_source & 0x01 != 0),
            },
            Self::ShiftLeft => AluResult {
                value: shift_source << 1,
                flag: Some(shift_source & 0x80 != 0),
            },
        }
    }
}

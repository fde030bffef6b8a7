//! Sixteen-key hexadecimal pad and the press-then-release latch behind `FX0A`.

/// Number of logical keys (`0x0..=0xF`).
pub const KEY_COUNT: usize = 16;

/// Result of polling the key-wait latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyWait {
    /// No key has been pressed since the wait began.
    Idle,
    /// A key is latched and still held down.
    Held(u8),
    /// The latched key was released; the wait is over and the latch is clear.
    Committed(u8),
}

/// Level state of every key plus the transient key-wait latch.
///
/// While a wait is in progress the first released-to-pressed edge is kept, so
/// a press and release reported between two polls still completes the wait.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    latched: Option<u8>,
    waiting: bool,
    pending: Option<u8>,
}

impl Keypad {
    /// Creates a pad with every key released.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: [false; KEY_COUNT],
            latched: None,
            waiting: false,
            pending: None,
        }
    }

    /// Records the level state reported by the host for `key`.
    ///
    /// Indices outside `0..16` come from a broken host mapping and are ignored.
    pub fn set_pressed(&mut self, key: u8, pressed: bool) {
        let Some(slot) = self.pressed.get_mut(usize::from(key)) else {
            log::warn!("ignoring state for out-of-range key {key:#04x}");
            return;
        };
        let edge = pressed && !*slot;
        *slot = pressed;
        if edge && self.waiting && self.latched.is_none() && self.pending.is_none() {
            self.pending = Some(key);
        }
    }

    /// Returns true when `key` (low nibble) is held down.
    #[must_use]
    pub const fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0x0F) as usize]
    }

    /// Releases every key and drops any latch.
    pub fn release_all(&mut self) {
        *self = Self::new();
    }

    /// Key currently held by the wait latch, if any.
    #[must_use]
    pub const fn latched(&self) -> Option<u8> {
        self.latched
    }

    /// Polls the key-wait state machine.
    ///
    /// A key pressed since the previous idle poll is latched first, otherwise
    /// the lowest-numbered held key. The latched key is reported as
    /// [`KeyWait::Held`] on every poll until released, at which point the
    /// poll returns [`KeyWait::Committed`] once and the wait resets. A press
    /// already released again commits on the first poll that sees it.
    pub fn await_key(&mut self) -> KeyWait {
        let candidate = self
            .latched
            .or_else(|| self.pending.take())
            .or_else(|| self.first_pressed());
        match candidate {
            Some(key) if self.is_pressed(key) => {
                if self.latched.replace(key).is_none() {
                    log::debug!("key wait latched key {key:#x}");
                }
                self.waiting = true;
                KeyWait::Held(key)
            }
            Some(key) => {
                self.latched = None;
                self.pending = None;
                self.waiting = false;
                log::debug!("key wait committed key {key:#x}");
                KeyWait::Committed(key)
            }
            None => {
                self.waiting = true;
                KeyWait::Idle
            }
        }
    }

    fn first_pressed(&self) -> Option<u8> {
        (0_u8..).zip(self.pressed).find_map(|(key, down)| down.then_some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyWait, Keypad};

    #[test]
    fn level_state_roundtrips_per_key() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0xA, true);
        assert!(keypad.is_pressed(0xA));
        assert!(!keypad.is_pressed(0xB));
        keypad.set_pressed(0xA, false);
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x10, true);
        assert_eq!(keypad, Keypad::new());
    }

    #[test]
    fn queries_use_the_low_nibble() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x3, true);
        assert!(keypad.is_pressed(0x13));
    }

    #[test]
    fn wait_is_idle_until_a_press() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.await_key(), KeyWait::Idle);
        assert_eq!(keypad.await_key(), KeyWait::Idle);
        assert_eq!(keypad.latched(), None);
    }

    #[test]
    fn wait_commits_only_on_release_of_the_latched_key() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x5, true);
        assert_eq!(keypad.await_key(), KeyWait::Held(0x5));
        assert_eq!(keypad.await_key(), KeyWait::Held(0x5));

        // Other keys do not disturb the latch.
        keypad.set_pressed(0x2, true);
        assert_eq!(keypad.await_key(), KeyWait::Held(0x5));

        keypad.set_pressed(0x5, false);
        assert_eq!(keypad.await_key(), KeyWait::Committed(0x5));
        assert_eq!(keypad.latched(), None);
    }

    #[test]
    fn commit_resets_so_the_next_wait_starts_fresh() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x7, true);
        assert_eq!(keypad.await_key(), KeyWait::Held(0x7));
        keypad.set_pressed(0x7, false);
        assert_eq!(keypad.await_key(), KeyWait::Committed(0x7));
        assert_eq!(keypad.await_key(), KeyWait::Idle);
    }

    #[test]
    fn lowest_pressed_key_wins_the_latch() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0xC, true);
        keypad.set_pressed(0x4, true);
        assert_eq!(keypad.await_key(), KeyWait::Held(0x4));
    }

    #[test]
    fn tap_between_polls_commits_on_next_poll() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.await_key(), KeyWait::Idle);
        keypad.set_pressed(0x9, true);
        keypad.set_pressed(0x9, false);
        assert_eq!(keypad.await_key(), KeyWait::Committed(0x9));
        assert_eq!(keypad.await_key(), KeyWait::Idle);
    }

    #[test]
    fn first_edge_during_a_wait_beats_lower_held_keys() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.await_key(), KeyWait::Idle);
        keypad.set_pressed(0xB, true);
        keypad.set_pressed(0x2, true);
        assert_eq!(keypad.await_key(), KeyWait::Held(0xB));
    }

    #[test]
    fn taps_outside_a_wait_are_not_remembered() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x6, true);
        keypad.set_pressed(0x6, false);
        assert_eq!(keypad.await_key(), KeyWait::Idle);
    }

    #[test]
    fn release_all_drops_the_latch() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x1, true);
        let _ = keypad.await_key();
        keypad.release_all();
        assert_eq!(keypad.latched(), None);
        assert!(!keypad.is_pressed(0x1));
    }
}

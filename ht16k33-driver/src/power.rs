//! Oscillator power state

/// Power mode of the chip
///
/// The chip powers up in standby with the oscillator off. `wake_up()`
/// moves to `Awake` from either state; `sleep()` moves to `Asleep`.
/// Key scanning stops while asleep, but a key press during the scan
/// window wakes the chip again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Oscillator off (standby)
    #[default]
    Asleep,
    /// Oscillator on (normal operation)
    Awake,
}

impl PowerState {
    /// Check if the oscillator is running
    pub fn is_awake(&self) -> bool {
        matches!(self, PowerState::Awake)
    }

    /// Oscillator bit for the SYSTEM command
    pub fn oscillator_on(&self) -> bool {
        self.is_awake()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht16k33_core::command::system;

    #[test]
    fn test_default_is_asleep() {
        assert_eq!(PowerState::default(), PowerState::Asleep);
        assert!(!PowerState::Asleep.is_awake());
    }

    #[test]
    fn test_system_command_per_state() {
        assert_eq!(system(PowerState::Awake.oscillator_on()), 0x21);
        assert_eq!(system(PowerState::Asleep.oscillator_on()), 0x20);
    }
}

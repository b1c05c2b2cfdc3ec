//! Alarm actuator trait

/// Binary alarm output (buzzer, LED, relay)
pub trait AlarmOutput {
    /// Switch the alarm on or off
    fn set_active(&mut self, active: bool);

    /// Check if the alarm is currently on
    fn is_active(&self) -> bool;
}

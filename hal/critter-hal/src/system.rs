//! Badge-wide services: sound, identity and the launcher

/// Tone output
pub trait Audio {
    /// Start a tone; returns immediately
    fn beep(&mut self, frequency_hz: u16, duration_ms: u16);
}

/// Factory-programmed badge identity
pub trait DeviceIdentity {
    /// Unique badge id
    fn device_id(&self) -> u64;
}

/// The badge's application launcher
pub trait Launcher {
    /// Hand control back to the launcher menu
    ///
    /// The current application stops receiving ticks after this call.
    fn return_to_launcher(&mut self);
}

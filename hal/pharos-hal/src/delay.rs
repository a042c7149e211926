//! Delay abstractions
//!
//! Millisecond-granularity blocking delay, used by drivers for timed
//! visual effects and power-up waits.

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block the calling thread for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Adapter exposing an `embedded-hal` 1.0 delay as a [`DelayMs`]
pub struct EmbeddedHalDelay<T>(pub T);

impl<T> DelayMs for EmbeddedHalDelay<T>
where
    T: embedded_hal::delay::DelayNs,
{
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accumulates requested nanoseconds instead of sleeping
    #[derive(Default)]
    struct Spin {
        total_ns: u64,
    }

    impl embedded_hal::delay::DelayNs for Spin {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_adapter_scales_to_milliseconds() {
        let mut delay = EmbeddedHalDelay(Spin::default());
        delay.delay_ms(3);
        assert_eq!(delay.0.total_ns, 3_000_000);
    }
}

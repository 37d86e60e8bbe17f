//! Frame clock types. All timestamps use a 1 MHz timer base.

/// A point in time on the host's frame clock, in microseconds.
pub type Instant = fugit::Instant<u64, 1, 1_000_000>;

/// A span of time on the host's frame clock, in microseconds.
pub type Duration = fugit::Duration<u64, 1, 1_000_000>;

/// Build an [`Instant`] from a microsecond timestamp.
pub const fn from_micros(micros: u64) -> Instant {
    Instant::from_ticks(micros)
}

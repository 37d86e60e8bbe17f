use crate::time::{Duration, Instant};

/// A looping, linearly interpolated counter from `0` to `wave_length` over `duration`.
///
/// The host drives it by passing frame times to [`WaveAnimator::value_at`]; the first frame after
/// a start becomes the origin of the cycle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WaveAnimator {
    wave_length: u32,
    duration: Duration,
    running: bool,
    origin: Option<Instant>,
}

impl WaveAnimator {
    pub const fn new(wave_length: u32, duration: Duration) -> Self {
        Self {
            wave_length,
            duration,
            running: false,
            origin: None,
        }
    }

    /// Start the animation. Returns `false` if it was already running, in which case the
    /// current cycle carries on undisturbed.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }

        self.running = true;
        self.origin = None;
        true
    }

    /// Stop the animation. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.origin = None;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The counter value at `now`, always in `0..wave_length`, or `None` while stopped.
    pub fn value_at(&mut self, now: Instant) -> Option<u32> {
        if !self.running {
            return None;
        }

        let origin = *self.origin.get_or_insert(now);
        let cycle = self.duration.ticks().max(1);
        let elapsed = now
            .checked_duration_since(origin)
            .map_or(0, |d| d.ticks());

        let phase = elapsed % cycle;
        Some((self.wave_length as u64 * phase / cycle) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use crate::time::from_micros;

    fn animator() -> WaveAnimator {
        WaveAnimator::new(10, Duration::millis(1000))
    }

    #[test]
    fn stopped_until_started() {
        let mut a = animator();
        assert!(!a.is_running());
        assert_eq!(a.value_at(from_micros(5_000)), None);

        assert!(a.start());
        assert!(a.is_running());

        assert!(a.stop());
        assert!(!a.is_running());
    }

    #[test]
    fn stop_before_start_is_a_no_op() {
        let mut a = animator();
        assert!(!a.stop());
        assert!(!a.is_running());
    }

    #[test]
    fn duplicate_start_keeps_phase() {
        let mut a = animator();
        a.start();
        a.value_at(from_micros(0));
        assert_eq!(a.value_at(from_micros(350_000)), Some(3));

        assert!(!a.start());
        assert_eq!(a.value_at(from_micros(450_000)), Some(4));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(99_999, 0)]
    #[case(100_000, 1)]
    #[case(550_000, 5)]
    #[case(999_999, 9)]
    #[case(1_000_000, 0)]
    #[case(2_730_000, 7)]
    fn counts_linearly_and_wraps(#[case] micros: u64, #[case] expected: u32) {
        let mut a = animator();
        a.start();
        a.value_at(from_micros(0));
        assert_eq!(a.value_at(from_micros(micros)), Some(expected));
    }

    #[test]
    fn first_frame_sets_the_origin() {
        let mut a = animator();
        a.start();
        assert_eq!(a.value_at(from_micros(7_000_000)), Some(0));
        assert_eq!(a.value_at(from_micros(7_200_000)), Some(2));
    }

    #[test]
    fn restart_begins_at_zero() {
        let mut a = animator();
        a.start();
        a.value_at(from_micros(0));
        assert_eq!(a.value_at(from_micros(800_000)), Some(8));

        a.stop();
        a.start();
        assert_eq!(a.value_at(from_micros(900_000)), Some(0));
    }

    #[test]
    fn values_stay_below_wave_length() {
        let mut a = WaveAnimator::new(7, Duration::millis(333));
        a.start();
        for t in (0..5_000_000).step_by(1_337) {
            let v = a.value_at(from_micros(t)).unwrap();
            assert!(v < 7);
        }
    }
}

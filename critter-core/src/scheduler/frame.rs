//! Fixed-period frame scheduler
//!
//! Pure arithmetic over a microsecond clock supplied by the caller. After
//! an overrun the reference time jumps to "now": late frames are not caught
//! up and the wait is never negative.

/// What the loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameWait {
    /// Sleep this many microseconds before the next tick
    Sleep(u64),
    /// The tick ran past its deadline by this many microseconds; run the
    /// next tick immediately
    Overrun(u64),
}

/// Frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Frames completed
    pub frames: u32,
    /// Frames that missed their deadline
    pub overruns: u32,
    /// Largest overrun seen, in microseconds
    pub worst_overrun_us: u64,
}

/// Paces the game loop to a fixed period
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    period_us: u64,
    frame_start_us: u64,
    stats: FrameStats,
}

impl FrameScheduler {
    /// Start pacing at `now_us`
    pub const fn new(period_us: u64, now_us: u64) -> Self {
        Self {
            period_us,
            frame_start_us: now_us,
            stats: FrameStats {
                frames: 0,
                overruns: 0,
                worst_overrun_us: 0,
            },
        }
    }

    /// Frame period in microseconds
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Start time of the current frame
    pub fn frame_start_us(&self) -> u64 {
        self.frame_start_us
    }

    /// Counters since creation
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Finish the current frame at `now_us`
    pub fn end_frame(&mut self, now_us: u64) -> FrameWait {
        let deadline = self.frame_start_us.saturating_add(self.period_us);
        self.stats.frames = self.stats.frames.wrapping_add(1);

        if now_us < deadline {
            self.frame_start_us = deadline;
            FrameWait::Sleep(deadline - now_us)
        } else {
            let late = now_us - deadline;
            self.frame_start_us = now_us;
            self.stats.overruns = self.stats.overruns.wrapping_add(1);
            self.stats.worst_overrun_us = self.stats.worst_overrun_us.max(late);
            FrameWait::Overrun(late)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sleeps_remainder() {
        let mut s = FrameScheduler::new(33_333, 1_000);
        assert_eq!(s.end_frame(11_000), FrameWait::Sleep(23_333));
        assert_eq!(s.frame_start_us(), 34_333);
    }

    #[test]
    fn test_overrun_resyncs() {
        let mut s = FrameScheduler::new(33_333, 0);
        assert_eq!(s.end_frame(50_000), FrameWait::Overrun(16_667));
        assert_eq!(s.frame_start_us(), 50_000);
        // The next frame is measured from the resync point
        assert_eq!(s.end_frame(60_000), FrameWait::Sleep(23_333));
        assert_eq!(s.stats().overruns, 1);
        assert_eq!(s.stats().worst_overrun_us, 16_667);
        assert_eq!(s.stats().frames, 2);
    }

    #[test]
    fn test_exact_deadline_is_overrun_by_zero() {
        let mut s = FrameScheduler::new(100, 0);
        assert_eq!(s.end_frame(100), FrameWait::Overrun(0));
    }

    proptest! {
        #[test]
        fn prop_never_sleeps_past_period(
            period in 1u64..1_000_000,
            work in proptest::collection::vec(0u64..2_000_000, 1..50),
        ) {
            let mut now = 0u64;
            let mut s = FrameScheduler::new(period, now);
            for w in work {
                now += w;
                let start = s.frame_start_us();
                match s.end_frame(now) {
                    FrameWait::Sleep(us) => {
                        prop_assert!(us <= period);
                        prop_assert_eq!(now + us, start + period);
                        now += us;
                    }
                    FrameWait::Overrun(late) => {
                        prop_assert_eq!(now, start + period + late);
                        prop_assert_eq!(s.frame_start_us(), now);
                    }
                }
            }
        }
    }
}

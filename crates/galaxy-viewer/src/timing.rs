use std::time::{Duration, Instant};

/// Target frame rate of the render loop.
pub const TARGET_FPS: u32 = 60;

/// Caps the loop at a fixed frame rate.
///
/// Each frame is due one interval after the previous one. A frame that ran
/// late does not earn a burst of catch-up frames; the schedule restarts from
/// the late frame.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame may start. `None` before the first frame.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last.map(|t| t + self.interval)
    }

    /// Whether a frame may start at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline().map_or(true, |d| now >= d)
    }

    /// Records a frame starting at `now`.
    pub fn mark_frame(&mut self, now: Instant) {
        self.last = Some(match self.next_deadline() {
            // Within one interval of the deadline: stay on the nominal schedule.
            Some(d) if now >= d && now < d + self.interval => d,
            _ => now,
        });
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

/// Counts frames and reports the total once per elapsed second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
        }
    }

    /// Counts one frame; returns the count for the window once a second has passed.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) >= Duration::from_secs(1) {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_always_due() {
        let pacer = FramePacer::new(60);
        assert!(pacer.is_due(Instant::now()));
        assert!(pacer.next_deadline().is_none());
    }

    #[test]
    fn frames_are_spaced_by_the_interval() {
        let mut pacer = FramePacer::new(60);
        let t0 = Instant::now();
        pacer.mark_frame(t0);

        let deadline = pacer.next_deadline().unwrap();
        assert_eq!(deadline - t0, pacer.interval());
        assert!(!pacer.is_due(t0 + Duration::from_millis(5)));
        assert!(pacer.is_due(deadline));
    }

    #[test]
    fn on_time_frames_keep_the_schedule() {
        let mut pacer = FramePacer::new(50); // 20 ms
        let t0 = Instant::now();
        pacer.mark_frame(t0);
        // Woken 1 ms late: the next slot still counts from the nominal deadline.
        pacer.mark_frame(t0 + Duration::from_millis(21));
        assert_eq!(pacer.next_deadline().unwrap(), t0 + Duration::from_millis(40));
    }

    #[test]
    fn late_frames_restart_the_schedule() {
        let mut pacer = FramePacer::new(50);
        let t0 = Instant::now();
        pacer.mark_frame(t0);
        let late = t0 + Duration::from_millis(100);
        pacer.mark_frame(late);
        assert_eq!(pacer.next_deadline().unwrap(), late + Duration::from_millis(20));
    }

    #[test]
    fn fps_reported_once_per_second() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 1..60u64 {
            assert_eq!(fps.tick(t0 + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(fps.tick(t0 + Duration::from_millis(1000)), Some(60));
        assert_eq!(fps.tick(t0 + Duration::from_millis(1016)), None);
        assert_eq!(fps.tick(t0 + Duration::from_millis(2000)), Some(2));
    }
}

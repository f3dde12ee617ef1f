// Fixed-interval tick trigger.
//
// Frames arrive at whatever rate the host runs. The flock only ticks once at
// least `interval` seconds have piled up, and then integrates the delta of the
// frame that tripped it. At most one tick fires per frame.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    interval: f32,
    accumulated: f32,
}

impl TickClock {
    pub fn new(interval: f32) -> Self {
        Self { interval: interval.max(0.0), accumulated: 0.0 }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Feed one frame's elapsed time. Returns the delta to tick with, if a
    /// tick is due.
    pub fn advance(&mut self, frame_dt: f32) -> Option<f32> {
        self.accumulated += frame_dt.max(0.0);
        if self.accumulated >= self.interval {
            self.accumulated = 0.0;
            Some(frame_dt.max(0.0))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

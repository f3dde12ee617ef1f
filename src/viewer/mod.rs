// Viewer-side pieces: input, camera, mesh, overlay.
// None of this is needed to run the simulation itself.

pub mod camera;
pub mod debug_overlay;
pub mod input;
pub mod mesh;

/// Rolling one-second frame-time window for the overlay.
pub struct FrameTimer {
    frames: u32,
    sum_ms: f32,
    min_ms: f32,
    max_ms: f32,
    window_start: std::time::Instant,

    pub fps: u32,
    pub avg_ms: f32,
    pub last_min_ms: f32,
    pub last_max_ms: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            frames: 0,
            sum_ms: 0.0,
            min_ms: f32::MAX,
            max_ms: 0.0,
            window_start: std::time::Instant::now(),
            fps: 0,
            avg_ms: 0.0,
            last_min_ms: 0.0,
            last_max_ms: 0.0,
        }
    }

    /// Record one frame. Returns true when a new one-second summary is ready.
    pub fn record(&mut self, frame_ms: f32) -> bool {
        self.frames += 1;
        self.sum_ms += frame_ms;
        self.min_ms = self.min_ms.min(frame_ms);
        self.max_ms = self.max_ms.max(frame_ms);

        if self.window_start.elapsed().as_secs_f32() < 1.0 {
            return false;
        }

        self.fps = self.frames;
        self.avg_ms = self.sum_ms / self.frames as f32;
        self.last_min_ms = self.min_ms;
        self.last_max_ms = self.max_ms;

        self.frames = 0;
        self.sum_ms = 0.0;
        self.min_ms = f32::MAX;
        self.max_ms = 0.0;
        self.window_start = std::time::Instant::now();
        true
    }
}

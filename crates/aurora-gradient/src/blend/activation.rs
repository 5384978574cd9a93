/// Per-count anchor activation vectors.
///
/// Count 1 lights only the first anchor, count 2 the first two, count 3
/// all three. Counts outside 1–3 are clamped.
#[inline]
fn count_weights(count: usize) -> [f32; 3] {
    match count {
        0 | 1 => [1.0, 0.0, 0.0],
        2 => [1.0, 1.0, 0.0],
        _ => [1.0, 1.0, 1.0],
    }
}

/// Fades anchor activation weights across node-count changes.
///
/// On a count change the animator restarts a fixed-duration ramp from the
/// *current interpolated* vector, so a change landing mid-transition never
/// pops. Time is advanced explicitly by the caller (typically with the
/// frame delta), which keeps the animator deterministic under test.
#[derive(Debug, Clone)]
pub struct ActivationAnimator {
    from: [f32; 3],
    target: [f32; 3],
    progress: f32,
    duration: f32,
}

/// Fixed fade duration in seconds.
const TRANSITION_SECS: f32 = 0.3;

impl ActivationAnimator {
    /// Starts settled at `count` (no fade in flight).
    pub fn new(count: usize) -> Self {
        let w = count_weights(count);
        Self {
            from: w,
            target: w,
            progress: 1.0,
            duration: TRANSITION_SECS,
        }
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        debug_assert!(secs > 0.0);
        self.duration = secs.max(f32::EPSILON);
        self
    }

    /// Notifies the animator of the current node count.
    ///
    /// A change restarts the ramp from the currently displayed vector;
    /// an unchanged count is a no-op.
    pub fn set_count(&mut self, count: usize) {
        let target = count_weights(count);
        if target == self.target {
            return;
        }
        self.from = self.weights();
        self.target = target;
        self.progress = 0.0;
    }

    /// Advances the ramp by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.progress < 1.0 {
            self.progress = (self.progress + dt.max(0.0) / self.duration).min(1.0);
        }
    }

    /// Ramp progress in `[0, 1]`; 1 when settled.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    /// Current per-anchor activation weights.
    pub fn weights(&self) -> [f32; 3] {
        let t = self.progress.clamp(0.0, 1.0);
        [
            self.from[0] + (self.target[0] - self.from[0]) * t,
            self.from[1] + (self.target[1] - self.from[1]) * t,
            self.from[2] + (self.target[2] - self.from[2]) * t,
        ]
    }
}

//! Fixed-timestep accumulator
//!
//! Reconciles the variable render-rate frame delta with the deterministic
//! simulation tick: leftover time carries over between frames, and the world
//! only ever advances by whole multiples of the fixed step.

use crate::consts::*;

/// Which threshold the catch-up loop compares the accumulator against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopThreshold {
    /// Loop while `accumulator >= step` (the standard accumulator; default).
    #[default]
    FixedStep,
    /// Loop while `accumulator >= frame_delta`. Steps can overdraw the
    /// accumulator when the delta is smaller than the step; selectable only
    /// for behavioral comparison, not recommended.
    FrameDelta,
}

/// Carries leftover simulation time between frames and decides how many
/// whole fixed steps each frame gets to run.
#[derive(Debug, Clone)]
pub struct StepClock {
    step: f32,
    accumulator: f32,
    max_frame_delta: f32,
    max_substeps: u32,
    threshold: LoopThreshold,
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(TIME_STEP)
    }
}

impl StepClock {
    pub fn new(step: f32) -> Self {
        assert!(step > 0.0, "fixed step must be positive");
        Self {
            step,
            accumulator: 0.0,
            max_frame_delta: MAX_FRAME_DELTA,
            max_substeps: MAX_SUBSTEPS,
            threshold: LoopThreshold::FixedStep,
        }
    }

    pub fn with_threshold(mut self, threshold: LoopThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    pub fn with_max_frame_delta(mut self, max_frame_delta: f32) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Leftover time not yet consumed by a full step, in `[0, step)` under
    /// the default threshold
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's wall-clock delta and return the number of fixed steps
    /// to run now. The remainder stays in the accumulator for next frame.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        let delta = frame_delta.clamp(0.0, self.max_frame_delta);
        if delta < frame_delta {
            log::warn!("frame delta {frame_delta:.3}s clamped to {delta:.3}s");
        }
        self.accumulator += delta;

        let limit = match self.threshold {
            LoopThreshold::FixedStep => self.step,
            LoopThreshold::FrameDelta => delta,
        };

        let mut steps = 0;
        while self.accumulator >= limit && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_multiple_leaves_empty_accumulator() {
        let mut clock = StepClock::new(1.0 / 60.0);
        let steps = clock.advance(4.0 / 60.0);
        assert_eq!(steps, 4);
        assert!(clock.accumulator().abs() < 1e-6);
    }

    #[test]
    fn test_remainder_carries_forward() {
        let mut clock = StepClock::new(0.01);
        assert_eq!(clock.advance(0.015), 1);
        assert!((clock.accumulator() - 0.005).abs() < 1e-6);
        // The carried 0.005 plus another 0.015 yields two steps
        assert_eq!(clock.advance(0.015), 2);
        assert!(clock.accumulator() < 0.01);
    }

    #[test]
    fn test_small_delta_runs_zero_steps() {
        let mut clock = StepClock::new(0.01);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 1);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = StepClock::new(0.01).with_max_frame_delta(0.05);
        // A 3-second stall must not trigger 300 catch-up steps
        let steps = clock.advance(3.0);
        assert!(steps <= 5 + 1);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = StepClock::new(0.001).with_max_substeps(8);
        let steps = clock.advance(0.1);
        assert_eq!(steps, 8);
    }

    #[test]
    fn test_frame_delta_threshold_overdraws() {
        // delta below the step size still triggers a step under the
        // frame-delta comparison, pushing the accumulator negative
        let mut clock = StepClock::new(0.01).with_threshold(LoopThreshold::FrameDelta);
        let steps = clock.advance(0.004);
        assert_eq!(steps, 1);
        assert!(clock.accumulator() < 0.0);

        // whereas the default comparison waits for a full step's worth
        let mut clock = StepClock::new(0.01);
        assert_eq!(clock.advance(0.004), 0);
        assert!(clock.accumulator() >= 0.0);
    }

    proptest! {
        /// n = floor((a_before + d) / h) and a_after = a_before + d - n*h,
        /// with a_after in [0, h)
        #[test]
        fn prop_fixed_step_conservation(
            carry in 0.0f32..(1.0 / 60.0),
            delta in 0.0f32..0.1,
        ) {
            let h = 1.0 / 60.0;
            // Discard inputs within float noise of a step boundary, where
            // floor division and repeated subtraction can legitimately differ
            let ratio = (carry + delta) / h;
            prop_assume!(ratio.fract() > 0.01 && ratio.fract() < 0.99);

            let mut clock = StepClock::new(h).with_max_substeps(100);
            clock.accumulator = carry;

            let n = clock.advance(delta);
            let expected = ratio.floor() as u32;
            prop_assert_eq!(n, expected);

            let after = clock.accumulator();
            prop_assert!(after >= 0.0);
            prop_assert!(after < h + 1e-5);
            let reconstructed = carry + delta - n as f32 * h;
            prop_assert!((after - reconstructed).abs() < 1e-4);
        }

        /// The accumulator never grows without bound across frames
        #[test]
        fn prop_accumulator_bounded(deltas in proptest::collection::vec(0.0f32..0.05, 1..50)) {
            let h = 1.0 / 120.0;
            let mut clock = StepClock::new(h).with_max_substeps(100);
            for d in deltas {
                clock.advance(d);
                prop_assert!(clock.accumulator() < h + 1e-5);
            }
        }
    }
}

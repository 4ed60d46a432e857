//! Per-step attack/release envelope.
//!
//! Every sequencer step is shaped by the same envelope: a linear ramp from 0
//! to 1 over the attack window, a sustain at 1.0, and a linear ramp from 1 to
//! 0 over the release window at the end of the step.

use chiptone_spec::EnvelopeSpec;

/// Envelope fitted to a concrete step length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEnvelope {
    attack: usize,
    release: usize,
    frames_per_step: usize,
}

impl StepEnvelope {
    /// Fits `spec` to steps of `frames_per_step` frames.
    ///
    /// The requested windows are capped (see
    /// [`EnvelopeSpec::effective_windows`]) so they never overlap.
    pub fn fit(spec: &EnvelopeSpec, frames_per_step: usize) -> Self {
        let (attack, release) = spec.effective_windows(frames_per_step);
        Self {
            attack,
            release,
            frames_per_step,
        }
    }

    /// Frames in the attack ramp.
    pub fn attack_frames(&self) -> usize {
        self.attack
    }

    /// Frames in the release ramp.
    pub fn release_frames(&self) -> usize {
        self.release
    }

    /// Step length this envelope was fitted to.
    pub fn frames_per_step(&self) -> usize {
        self.frames_per_step
    }

    /// Gain at position `pos` within a step (`0 <= pos < frames_per_step`).
    ///
    /// The attack ramp starts at exactly 0 on the first frame of the step and
    /// the release ramp reaches exactly 0 on the last frame.
    pub fn gain(&self, pos: usize) -> f64 {
        if pos < self.attack {
            pos as f64 / self.attack as f64
        } else if self.release > 0 && pos + self.release >= self.frames_per_step {
            self.frames_per_step.saturating_sub(pos + 1) as f64 / self.release as f64
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_envelope() {
        let env = StepEnvelope::fit(&EnvelopeSpec::default(), 100);
        assert_eq!(env.attack_frames(), 0);
        assert_eq!(env.release_frames(), 0);
        for pos in 0..100 {
            assert_eq!(env.gain(pos), 1.0);
        }
    }

    #[test]
    fn test_attack_ramp() {
        let env = StepEnvelope::fit(&EnvelopeSpec::new(4, 0), 100);
        assert_eq!(env.gain(0), 0.0);
        assert_eq!(env.gain(1), 0.25);
        assert_eq!(env.gain(2), 0.5);
        assert_eq!(env.gain(3), 0.75);
        assert_eq!(env.gain(4), 1.0);
    }

    #[test]
    fn test_release_ramp() {
        let env = StepEnvelope::fit(&EnvelopeSpec::new(0, 4), 100);
        assert_eq!(env.gain(95), 1.0);
        assert_eq!(env.gain(96), 0.75);
        assert_eq!(env.gain(97), 0.5);
        assert_eq!(env.gain(98), 0.25);
        assert_eq!(env.gain(99), 0.0);
    }

    #[test]
    fn test_oversized_attack_clamped_on_tiny_step() {
        let env = StepEnvelope::fit(&EnvelopeSpec::new(90, 0), 10);
        assert!(env.attack_frames() <= 5);
        assert!(env.attack_frames() + env.release_frames() <= 10);
        assert_eq!(env.attack_frames(), 1);
    }

    #[test]
    fn test_ramps_never_overlap() {
        for fps in 1..300 {
            let env = StepEnvelope::fit(&EnvelopeSpec::new(u32::MAX, u32::MAX), fps);
            assert!(env.attack_frames() + env.release_frames() <= fps);
            for pos in 0..fps {
                let g = env.gain(pos);
                assert!((0.0..=1.0).contains(&g), "fps={} pos={} gain={}", fps, pos, g);
            }
        }
    }
}

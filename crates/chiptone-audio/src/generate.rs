//! Main entry point for rendering requests.
//!
//! Turns a [`Request`] into a finished container: synthesize, then encode
//! with the request's format.

use chiptone_spec::{AudioFormat, Request, Sound};
use tracing::{debug, warn};

use crate::error::{AudioError, AudioResult};
use crate::synthesis::{SequenceSynth, Synthesizer, ToneSynth};
use crate::wav::{encode_container, ContainerBuffer};

/// Loop region handed to the playback collaborator's `setLoopPoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPoints {
    /// First frame of the loop region.
    pub start_frame: usize,
    /// Frame one past the end of the loop region.
    pub end_frame: usize,
}

impl LoopPoints {
    /// Loop over the whole buffer.
    pub fn whole(num_frames: usize) -> Self {
        Self {
            start_frame: 0,
            end_frame: num_frames,
        }
    }

    /// Frames in the loop region.
    pub fn len(&self) -> usize {
        self.end_frame.saturating_sub(self.start_frame)
    }

    /// Returns true if the region holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of rendering a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Complete WAV file.
    pub container: ContainerBuffer,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Format written to the header.
    pub format: AudioFormat,
    /// Number of frames in the payload.
    pub num_frames: usize,
    /// Loop region, for sounds meant to repeat.
    pub loop_points: Option<LoopPoints>,
}

impl RenderResult {
    fn new(container: ContainerBuffer, format: AudioFormat, num_frames: usize, looping: bool) -> Self {
        Self {
            pcm_hash: container.pcm_hash(),
            container,
            format,
            num_frames,
            loop_points: looping.then(|| LoopPoints::whole(num_frames)),
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames as f64 / self.format.sample_rate as f64
    }

    /// Returns true if the payload holds no frames.
    pub fn is_silent_fallback(&self) -> bool {
        self.num_frames == 0
    }
}

fn synthesizer_for(sound: &Sound) -> Box<dyn Synthesizer> {
    match sound {
        Sound::Tone(params) => Box::new(ToneSynth::from(params)),
        Sound::Sequence(params) => Box::new(SequenceSynth::from(params)),
    }
}

/// Renders a request into a container.
///
/// The synthesizers produce mono audio, so formats with more than one
/// channel are rejected.
///
/// # Returns
/// The encoded container and its metadata
pub fn render(request: &Request) -> AudioResult<RenderResult> {
    let format = request.format;
    if !format.is_mono() {
        return Err(AudioError::invalid_param(
            "channels",
            format!("synthesis renders mono audio, got {} channels", format.channels),
        ));
    }

    let synth = synthesizer_for(&request.sound);
    let samples = synth.synthesize(format.sample_rate)?;
    let num_frames = samples.len();
    let container = encode_container(samples, &format)?;

    debug!(
        id = %request.id,
        kind = request.sound.kind(),
        num_frames,
        bytes = container.len(),
        "rendered request"
    );
    Ok(RenderResult::new(container, format, num_frames, synth.is_looping()))
}

/// Renders a request, falling back to silence on any error.
///
/// The fallback is a header-only container in the request's format, or in
/// the default format when the request's format cannot be encoded.
pub fn render_or_silence(request: &Request) -> RenderResult {
    match render(request) {
        Ok(result) => result,
        Err(e) => {
            warn!(id = %request.id, error = %e, "render failed, falling back to silence");
            silence(request.format)
        }
    }
}

fn silence(format: AudioFormat) -> RenderResult {
    match ContainerBuffer::silence(&format) {
        Ok(container) => RenderResult::new(container, format, 0, false),
        Err(_) => RenderResult::new(
            ContainerBuffer::default_silence(),
            AudioFormat::default(),
            0,
            false,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiptone_spec::{EnvelopeSpec, Note, SequenceParams, ToneParams};

    fn tone_request() -> Request {
        Request::tone("test-tone", ToneParams::new(440.0, 100).with_amplitude(0.8))
    }

    fn sequence_request() -> Request {
        Request::sequence(
            "test-loop",
            SequenceParams::new([Note(60), Note(64), Note(67)], 120.0)
                .with_envelope(EnvelopeSpec::new(64, 256)),
        )
    }

    #[test]
    fn test_render_tone() {
        let result = render(&tone_request()).unwrap();
        assert_eq!(result.num_frames, 2205);
        assert_eq!(result.container.len(), 44 + 2205 * 2);
        assert_eq!(result.loop_points, None);
        assert!((result.duration_seconds() - 0.1).abs() < 1e-9);
        assert_eq!(result.pcm_hash, result.container.pcm_hash());
    }

    #[test]
    fn test_render_sequence_loops_whole_buffer() {
        let result = render(&sequence_request()).unwrap();
        assert_eq!(result.num_frames, 3 * 2756);
        assert_eq!(result.loop_points, Some(LoopPoints::whole(3 * 2756)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render(&sequence_request()).unwrap();
        let b = render(&sequence_request()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_rejects_stereo() {
        let request = tone_request().with_format(AudioFormat::new(22050, 2, 16));
        let err = render(&request).unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { .. }));
    }

    #[test]
    fn test_render_or_silence_falls_back() {
        let request = Request::tone("bad-tone", ToneParams::new(-5.0, 100));
        let result = render_or_silence(&request);
        assert!(result.is_silent_fallback());
        assert_eq!(result.container.len(), 44);
        assert_eq!(result.format, AudioFormat::default());
    }

    #[test]
    fn test_render_or_silence_uses_default_for_broken_format() {
        let request = tone_request().with_format(AudioFormat::new(0, 1, 16));
        let result = render_or_silence(&request);
        assert_eq!(result.format, AudioFormat::default());
        assert_eq!(result.container.decode().unwrap().format, AudioFormat::default());
    }

    #[test]
    fn test_render_or_silence_keeps_valid_format() {
        let request = Request::tone("bad-tone", ToneParams::new(440.0, 100).with_amplitude(4.0))
            .with_format(AudioFormat::mono(44100));
        let result = render_or_silence(&request);
        assert_eq!(result.format, AudioFormat::mono(44100));
        assert_eq!(result.num_frames, 0);
    }

    #[test]
    fn test_concurrent_renders_match() {
        let expected = render(&sequence_request()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| render(&sequence_request()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

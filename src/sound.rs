use fundsp::prelude32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

// ── Cues ────────────────────────────────────────────────────────────────────

/// Things in the tank that make a noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cue {
    Ambience,
    Bubbles,
    PufferInflate,
    ChestOpen,
    SharkArrival,
}

impl Cue {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Cue::Ambience => "ambience",
            Cue::Bubbles => "bubbles",
            Cue::PufferInflate => "puffer-inflate",
            Cue::ChestOpen => "chest-open",
            Cue::SharkArrival => "shark",
        }
    }
}

/// Fire-and-forget playback. Nothing here reports back to the simulation.
pub(crate) trait AudioBackend {
    fn play(&mut self, cue: Cue);
    fn play_loop(&mut self, cue: Cue);
    fn stop(&mut self);
}

// ── Synthesis ───────────────────────────────────────────────────────────────

const SAMPLE_RATE: u32 = 44_100;
const AMBIENCE_LEN: f32 = 4.0;
const INFLATE_LEN: f32 = 0.6;
const CREAK_LEN: f32 = 0.7;

/// Every cue rendered once, up front.
struct Clips {
    ambience: Vec<f32>,
    bubbles: Vec<f32>,
    puffer: Vec<f32>,
    chest: Vec<f32>,
    shark: Vec<f32>,
}

impl Clips {
    fn render(sample_rate: u32) -> Self {
        Self {
            ambience: ambience_samples(sample_rate),
            bubbles: bubble_samples(sample_rate),
            puffer: inflate_samples(sample_rate),
            chest: creak_samples(sample_rate),
            shark: shark_samples(sample_rate),
        }
    }

    fn get(&self, cue: Cue) -> &[f32] {
        match cue {
            Cue::Ambience => &self.ambience,
            Cue::Bubbles => &self.bubbles,
            Cue::PufferInflate => &self.puffer,
            Cue::ChestOpen => &self.chest,
            Cue::SharkArrival => &self.shark,
        }
    }
}

/// Low rumbling water whose swell starts and ends at the same level, so it
/// loops without a seam in the envelope.
fn ambience_samples(sample_rate: u32) -> Vec<f32> {
    let mut node = (dsp::noise() >> dsp::lowpass_hz(380.0, 0.7) >> dsp::mul(0.4))
        * dsp::lfo(|t: f32| {
            0.18 + 0.08 * (std::f32::consts::TAU * t / AMBIENCE_LEN).sin()
        });
    render_mono(&mut node, sample_rate, AMBIENCE_LEN)
}

/// Three quick rising blips.
fn bubble_samples(sample_rate: u32) -> Vec<f32> {
    const STARTS: [f32; 3] = [0.0, 0.09, 0.2];
    let blip_len = 0.08f32;
    let total_duration = STARTS[STARTS.len() - 1] + blip_len;
    let total_samples = (sample_rate as f32 * total_duration) as usize;
    let mut samples = vec![0.0f32; total_samples];

    for (idx, at) in STARTS.iter().enumerate() {
        let base = 320.0 + 140.0 * idx as f32;
        let start = (at * sample_rate as f32) as usize;
        let mut node = (dsp::lfo(move |t: f32| {
            dsp::xerp(base, base * 2.5, (t / blip_len).min(1.0))
        }) >> dsp::sine())
            * dsp::lfo(move |t: f32| dsp::xerp(0.14, 0.001, (t / blip_len).min(1.0)));
        let blip = render_mono(&mut node, sample_rate, blip_len);
        for (i, s) in blip.into_iter().enumerate() {
            let target = start + i;
            if target < total_samples {
                samples[target] += s;
            }
        }
    }

    samples
}

/// A swelling buzz that climbs in pitch.
fn inflate_samples(sample_rate: u32) -> Vec<f32> {
    let mut node = (dsp::lfo(|t: f32| dsp::xerp(110.0, 340.0, (t / INFLATE_LEN).min(1.0)))
        >> dsp::saw()
        >> dsp::lowpass_hz(900.0, 0.7))
        * dsp::lfo(|t: f32| dsp::lerp(0.03, 0.14, (t / INFLATE_LEN).min(1.0)));
    render_mono(&mut node, sample_rate, INFLATE_LEN)
}

/// Hinge creak: a sagging saw that dies away.
fn creak_samples(sample_rate: u32) -> Vec<f32> {
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(190.0, 85.0, (t / CREAK_LEN).min(1.0)))
        >> dsp::saw()
        >> dsp::lowpass_hz(650.0, 1.0))
        * dsp::lfo(|t: f32| dsp::xerp(0.16, 0.001, (t / CREAK_LEN).min(1.0)));
    render_mono(&mut node, sample_rate, CREAK_LEN)
}

/// Two slow low notes, a semitone apart.
fn shark_samples(sample_rate: u32) -> Vec<f32> {
    const NOTES: [f32; 2] = [82.4, 87.3];
    let note_gap = 0.45f32;
    let note_len = 0.4f32;
    let total_duration = note_gap * (NOTES.len() as f32 - 1.0) + note_len;
    let total_samples = (sample_rate as f32 * total_duration) as usize;
    let mut samples = vec![0.0f32; total_samples];

    for (idx, freq) in NOTES.iter().enumerate() {
        let start = (note_gap * idx as f32 * sample_rate as f32) as usize;
        let mut node = dsp::sine_hz(*freq)
            * dsp::lfo(move |t: f32| dsp::xerp(0.3, 0.001, (t / note_len).min(1.0)));
        let tone = render_mono(&mut node, sample_rate, note_len);
        for (i, s) in tone.into_iter().enumerate() {
            let target = start + i;
            if target < total_samples {
                samples[target] += s;
            }
        }
    }

    samples
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for _ in 0..sample_count {
        samples.push(node.get_mono());
    }
    samples
}

// ── Output ──────────────────────────────────────────────────────────────────

/// Default output device. One-shots go to detached sinks; the ambience
/// keeps its own sink so it can be stopped.
pub(crate) struct Speaker {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Clips,
    ambience: Option<Sink>,
}

impl Speaker {
    pub(crate) fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            clips: Clips::render(SAMPLE_RATE),
            ambience: None,
        })
    }

    fn source(&self, cue: Cue) -> Option<SamplesBuffer<f32>> {
        let samples = self.clips.get(cue);
        (!samples.is_empty()).then(|| SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()))
    }
}

impl AudioBackend for Speaker {
    fn play(&mut self, cue: Cue) {
        let Some(source) = self.source(cue) else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => debug!(cue = cue.name(), error = %e, "could not play cue"),
        }
    }

    fn play_loop(&mut self, cue: Cue) {
        self.stop();
        let Some(source) = self.source(cue) else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source.repeat_infinite());
                self.ambience = Some(sink);
            }
            Err(e) => warn!(cue = cue.name(), error = %e, "could not start loop"),
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.ambience.take() {
            sink.stop();
        }
    }
}

/// Owns the backend, if there is one, and the user's on/off choice. With no
/// backend every request is a no-op.
pub(crate) struct SoundBoard {
    backend: Option<Box<dyn AudioBackend>>,
    on: bool,
}

impl SoundBoard {
    pub(crate) fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        Self { backend, on: false }
    }

    /// Speaker on the default device, or muted when none opens.
    pub(crate) fn detect() -> Self {
        match Speaker::open() {
            Ok(speaker) => Self::new(Some(Box::new(speaker))),
            Err(e) => {
                warn!(error = %e, "no audio output device, sound disabled");
                Self::new(None)
            }
        }
    }

    pub(crate) fn available(&self) -> bool {
        self.backend.is_some()
    }

    pub(crate) fn is_on(&self) -> bool {
        self.on
    }

    pub(crate) fn toggle(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        self.on = !self.on;
        if self.on {
            backend.play_loop(Cue::Ambience);
        } else {
            backend.stop();
        }
        debug!(on = self.on, "sound toggled");
    }

    pub(crate) fn play(&mut self, cue: Cue) {
        if !self.on {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.play(cue);
        }
    }

    pub(crate) fn stop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, Recorder};
    use super::*;

    const ALL: [Cue; 5] = [
        Cue::Ambience,
        Cue::Bubbles,
        Cue::PufferInflate,
        Cue::ChestOpen,
        Cue::SharkArrival,
    ];

    #[test]
    fn cues_are_dropped_while_sound_is_off() {
        let rec = Recorder::default();
        let mut board = SoundBoard::new(Some(Box::new(rec.clone())));
        board.play(Cue::Bubbles);
        assert!(rec.calls.borrow().is_empty());

        board.toggle();
        assert!(board.is_on());
        board.play(Cue::ChestOpen);
        board.toggle();
        assert_eq!(
            *rec.calls.borrow(),
            vec![
                Call::Loop(Cue::Ambience),
                Call::Play(Cue::ChestOpen),
                Call::Stop
            ]
        );
    }

    #[test]
    fn toggling_starts_and_stops_the_ambience_loop() {
        let rec = Recorder::default();
        let mut board = SoundBoard::new(Some(Box::new(rec.clone())));
        board.toggle();
        assert_eq!(rec.calls.borrow().last(), Some(&Call::Loop(Cue::Ambience)));
        board.toggle();
        assert_eq!(rec.calls.borrow().last(), Some(&Call::Stop));
        assert!(!board.is_on());
        board.toggle();
        assert_eq!(
            *rec.calls.borrow(),
            vec![
                Call::Loop(Cue::Ambience),
                Call::Stop,
                Call::Loop(Cue::Ambience)
            ]
        );
    }

    #[test]
    fn missing_backend_makes_everything_a_no_op() {
        let mut board = SoundBoard::new(None);
        assert!(!board.available());
        board.toggle();
        assert!(!board.is_on());
        board.play(Cue::SharkArrival);
        board.stop();
    }

    #[test]
    fn every_cue_has_its_own_audible_clip() {
        let clips = Clips::render(8_000);
        for cue in ALL {
            let s = clips.get(cue);
            assert!(!s.is_empty(), "{}", cue.name());
            assert!(s.iter().all(|v| v.is_finite() && v.abs() <= 1.0), "{}", cue.name());
            assert!(s.iter().any(|v| v.abs() > 1e-3), "{} is silent", cue.name());
        }
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(clips.get(*a), clips.get(*b));
            }
        }
    }

    #[test]
    fn ambience_is_the_longest_clip() {
        let clips = Clips::render(8_000);
        assert_eq!(clips.get(Cue::Ambience).len(), (8_000.0 * AMBIENCE_LEN) as usize);
        for cue in &ALL[1..] {
            assert!(clips.get(*cue).len() < clips.get(Cue::Ambience).len());
        }
    }
}

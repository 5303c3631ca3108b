use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of odd harmonics summed by [`Waveform::SquareH`].
pub const SQUARE_HARMONICS: usize = 16;

/// Fraction of the cycle a [`Waveform::Pulse`] spends high.
pub const PULSE_WIDTH: f64 = 0.1;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    /// Square wave built from its first [`SQUARE_HARMONICS`] odd harmonics.
    SquareH,
    Sawtooth,
    Pulse,
    Semicircle,
    WhiteNoise,
}

/// Shapes available to the first oscillator.
pub const OSC_1_OPTIONS: &[Waveform] = &[
    Waveform::Sine,
    Waveform::Triangle,
    Waveform::Square,
    Waveform::SquareH,
    Waveform::Sawtooth,
    Waveform::Pulse,
    Waveform::Semicircle,
];

/// Shapes available to the second oscillator. Noise only makes sense as a
/// texture layered under the first oscillator.
pub const OSC_2_OPTIONS: &[Waveform] = &[
    Waveform::Sine,
    Waveform::Triangle,
    Waveform::Square,
    Waveform::SquareH,
    Waveform::Sawtooth,
    Waveform::Pulse,
    Waveform::WhiteNoise,
    Waveform::Semicircle,
];

impl Waveform {
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Triangle => "Triangle",
            Waveform::Square => "Square",
            Waveform::SquareH => "SquareH",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Pulse => "Pulse",
            Waveform::Semicircle => "Semicircle",
            Waveform::WhiteNoise => "WhiteNoise",
        }
    }

    pub fn is_noise(self) -> bool {
        matches!(self, Waveform::WhiteNoise)
    }

    /// Value of one period of the shape at `cycle` in `[0, 1)`, peak amplitude 1.
    ///
    /// Returns `None` for noise, which has no periodic shape.
    pub fn sample_at(self, cycle: f64) -> Option<f64> {
        let value = match self {
            Waveform::Sine => (TAU * cycle).sin(),
            Waveform::Triangle => {
                if cycle < 0.25 {
                    4.0 * cycle
                } else if cycle < 0.75 {
                    2.0 - 4.0 * cycle
                } else {
                    4.0 * cycle - 4.0
                }
            }
            Waveform::Square => {
                if cycle < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::SquareH => {
                let sum: f64 = (0..SQUARE_HARMONICS)
                    .map(|k| {
                        let n = (2 * k + 1) as f64;
                        (TAU * n * cycle).sin() / n
                    })
                    .sum();
                4.0 / PI * sum
            }
            // Rises through zero at the start of the cycle, wraps at the half.
            Waveform::Sawtooth => 2.0 * (cycle - (cycle + 0.5).floor()),
            Waveform::Pulse => {
                if cycle < PULSE_WIDTH {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Semicircle => {
                if cycle < 0.5 {
                    let x = 4.0 * cycle - 1.0;
                    (1.0 - x * x).max(0.0).sqrt()
                } else {
                    let x = 4.0 * cycle - 3.0;
                    -(1.0 - x * x).max(0.0).sqrt()
                }
            }
            Waveform::WhiteNoise => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waveform `{0}`")]
pub struct ParseWaveformError(pub String);

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OSC_2_OPTIONS
            .iter()
            .copied()
            .find(|w| w.name() == s)
            .ok_or_else(|| ParseWaveformError(s.to_string()))
    }
}

/// Sample cursor for one waveform.
///
/// Position is kept as a sample count so a block boundary never introduces a
/// phase discontinuity: block `k` continues exactly where block `k - 1` ended.
pub struct OscillatorBlock {
    waveform: Waveform,
    /// Cycles advanced per sample (frequency / sample rate).
    increment: f64,
    /// Starting offset into the cycle, as a fraction of a period.
    phase: f64,
    amplitude: f32,
    position: u64,
    rng: Option<StdRng>,
}

impl OscillatorBlock {
    /// `seed` only matters for [`Waveform::WhiteNoise`]; `None` draws from entropy.
    pub fn new(
        waveform: Waveform,
        frequency: f32,
        amplitude: f32,
        phase: f32,
        sample_rate: u32,
        seed: Option<u64>,
    ) -> Self {
        let rng = waveform.is_noise().then(|| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        });

        Self {
            waveform,
            increment: frequency as f64 / sample_rate as f64,
            phase: phase as f64,
            amplitude,
            position: 0,
            rng,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn render(&mut self, out: &mut [f32]) {
        if let Some(rng) = self.rng.as_mut() {
            for sample in out.iter_mut() {
                *sample = rng.gen_range(-1.0f32..1.0) * self.amplitude;
            }
            self.position += out.len() as u64;
            return;
        }

        for sample in out.iter_mut() {
            let t = self.phase + self.increment * self.position as f64;
            let cycle = t - t.floor();
            let value = self.waveform.sample_at(cycle).unwrap_or(0.0);
            *sample = value as f32 * self.amplitude;
            self.position += 1;
        }
    }

    /// Rewind to the first sample. Noise keeps its generator state.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for &w in OSC_2_OPTIONS {
            assert_eq!(w.name().parse::<Waveform>(), Ok(w));
        }
        assert_eq!(
            "sine".parse::<Waveform>(),
            Err(ParseWaveformError("sine".into()))
        );
    }

    #[test]
    fn option_sets_differ_only_by_noise() {
        assert_eq!(OSC_1_OPTIONS.len() + 1, OSC_2_OPTIONS.len());
        assert!(!OSC_1_OPTIONS.contains(&Waveform::WhiteNoise));
        assert!(OSC_1_OPTIONS.iter().all(|w| OSC_2_OPTIONS.contains(w)));
    }

    #[test]
    fn periodic_shapes_stay_in_range() {
        for &w in OSC_1_OPTIONS {
            for i in 0..1000 {
                let v = w.sample_at(i as f64 / 1000.0).unwrap();
                // SquareH overshoots around its edges (Gibbs ripple).
                assert!(v.abs() <= 1.2, "{w} out of range at {i}: {v}");
            }
        }
        assert_eq!(Waveform::WhiteNoise.sample_at(0.3), None);
    }

    #[test]
    fn shapes_hit_expected_points() {
        assert_eq!(Waveform::Triangle.sample_at(0.25), Some(1.0));
        assert_eq!(Waveform::Triangle.sample_at(0.75), Some(-1.0));
        assert_eq!(Waveform::Square.sample_at(0.1), Some(1.0));
        assert_eq!(Waveform::Square.sample_at(0.6), Some(-1.0));
        assert_eq!(Waveform::Pulse.sample_at(0.05), Some(1.0));
        assert_eq!(Waveform::Pulse.sample_at(0.2), Some(-1.0));
        assert_eq!(Waveform::Sawtooth.sample_at(0.0), Some(0.0));
        assert_eq!(Waveform::Semicircle.sample_at(0.25), Some(1.0));
        assert_eq!(Waveform::Semicircle.sample_at(0.75), Some(-1.0));
    }

    #[test]
    fn sine_matches_closed_form() {
        let sample_rate = 48_000;
        let mut osc = OscillatorBlock::new(Waveform::Sine, 440.0, 0.5, 0.0, sample_rate, None);
        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer);

        let n = 12;
        let expected = 0.5 * (TAU * 440.0 * n as f64 / sample_rate as f64).sin();
        assert!((buffer[n] as f64 - expected).abs() < 1e-6);
    }

    #[test]
    fn phase_shifts_start_of_cycle() {
        let mut osc = OscillatorBlock::new(Waveform::Sine, 100.0, 1.0, 0.25, 44_100, None);
        let mut buffer = vec![0.0f32; 4];
        osc.render(&mut buffer);
        assert!((buffer[0] - 1.0).abs() < 1e-6, "quarter-cycle phase starts at peak");
    }

    #[test]
    fn consecutive_blocks_are_continuous() {
        let mut split = OscillatorBlock::new(Waveform::Sawtooth, 330.0, 1.0, 0.1, 44_100, None);
        let mut whole = OscillatorBlock::new(Waveform::Sawtooth, 330.0, 1.0, 0.1, 44_100, None);

        let mut a = vec![0.0f32; 64];
        let mut b = vec![0.0f32; 64];
        split.render(&mut a);
        split.render(&mut b);

        let mut joined = vec![0.0f32; 128];
        whole.render(&mut joined);

        assert_eq!(&joined[..64], &a[..]);
        assert_eq!(&joined[64..], &b[..]);
    }

    #[test]
    fn seeded_noise_is_reproducible_and_scaled() {
        let mut a = OscillatorBlock::new(Waveform::WhiteNoise, 440.0, 0.25, 0.0, 44_100, Some(7));
        let mut b = OscillatorBlock::new(Waveform::WhiteNoise, 880.0, 0.25, 0.3, 44_100, Some(7));
        let mut buf_a = vec![0.0f32; 256];
        let mut buf_b = vec![0.0f32; 256];
        a.render(&mut buf_a);
        b.render(&mut buf_b);

        // Frequency and phase are ignored by noise.
        assert_eq!(buf_a, buf_b);
        assert!(buf_a.iter().all(|s| s.abs() <= 0.25));
        assert!(buf_a.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn reset_rewinds_periodic_shapes() {
        let mut osc = OscillatorBlock::new(Waveform::Triangle, 220.0, 1.0, 0.0, 44_100, None);
        let mut first = vec![0.0f32; 32];
        let mut again = vec![0.0f32; 32];
        osc.render(&mut first);
        osc.reset();
        osc.render(&mut again);
        assert_eq!(first, again);
    }
}

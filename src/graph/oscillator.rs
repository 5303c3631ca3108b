use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, StreamFormat};

/*
Audio Oscillator
================

An oscillator is the sound source of the synth. It repeats one waveform at
the note's frequency and hands it downstream one block at a time, forever.
The consumer decides how many blocks it wants.

Waveform Types and Their Character:
-----------------------------------

Sine: single frequency, no harmonics. Smooth, hollow, flute-like.

Triangle: odd harmonics falling off as 1/n². Soft, between sine and square.

Square: odd harmonics falling off as 1/n. Hollow, woody, clarinet-like.
  Hard edges, so it aliases at high notes.

SquareH: the square rebuilt from its first 16 odd harmonics. Same timbre,
  rounded edges with a little ripple (Gibbs overshoot to about 1.18).

Sawtooth: all harmonics falling off as 1/n. Bright, buzzy, brassy.

Pulse: high for the first 10% of each cycle. Thin and nasal; the narrow
  duty cycle moves energy into the upper harmonics.

Semicircle: alternating half circles. Close to a sine with a rounder top,
  adds a handful of weak odd harmonics.

WhiteNoise: random samples, no pitch. Ignores frequency and phase. Only
  offered on the second oscillator, as a texture layer.

Phase:
------
Phase is a fraction of one period. 0.25 starts a sine at its peak, 0.5
starts it upside down. Only the first oscillator exposes it, so it sets the
phase relationship between the two layers: two sines half a period apart
cancel.

Example usage:
  let format = StreamFormat::new(44_100, 512);
  let osc = OscNode::new(Waveform::Sawtooth, 220.0, 0.5, 0.0, format, None);

  // Typical subtractive chain: oscillators → sum → low-pass
  let voice = osc
      .mix(OscNode::new(Waveform::Square, 220.0, 0.5, 0.0, format, None))?
      .through(LowPassNode::new(2_000.0, format)?)?;
*/

pub struct OscNode {
    osc: OscillatorBlock,
    format: StreamFormat,
    frequency: f32,
    amplitude: f32,
}

impl OscNode {
    /// `phase` is a fraction of a period; `seed` only affects noise.
    pub fn new(
        waveform: Waveform,
        frequency: f32,
        amplitude: f32,
        phase: f32,
        format: StreamFormat,
        seed: Option<u64>,
    ) -> Self {
        Self {
            osc: OscillatorBlock::new(
                waveform,
                frequency,
                amplitude,
                phase,
                format.sample_rate,
                seed,
            ),
            format,
            frequency,
            amplitude,
        }
    }

    pub fn sine(frequency: f32, format: StreamFormat) -> Self {
        Self::new(Waveform::Sine, frequency, 1.0, 0.0, format, None)
    }

    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

impl GraphNode for OscNode {
    fn format(&self) -> StreamFormat {
        self.format
    }

    fn render_block(&mut self, out: &mut [f32]) -> bool {
        debug_assert_eq!(out.len(), self.format.block_size);
        self.osc.render(out);
        true
    }
}

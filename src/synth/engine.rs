use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::graph::{
    extensions::NodeExt, filter::LowPassNode, mix::Mix, node::StreamFormat,
    oscillator::OscNode, through::Through,
};
use crate::synth::params::{ParameterOverrides, Parameters};
use crate::synth::Synth;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// Samples per block, shared by every pipeline stage.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Engine settings fixed at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub block_size: usize,
    /// Seed for the noise oscillator. `None` draws fresh entropy per note.
    pub noise_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
            noise_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    pub fn format(&self) -> StreamFormat {
        StreamFormat::new(self.sample_rate, self.block_size)
    }

    fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidConfig(
                "sample rate must be positive".into(),
            ));
        }
        if self.block_size == 0 {
            return Err(SynthError::InvalidConfig(
                "block size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Oscillator 1 + oscillator 2 → sum → low-pass.
pub type Pipeline = Through<Mix<OscNode, OscNode>, LowPassNode>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Two oscillators blended by `mix` and shaped by a low-pass filter.
///
/// Holds nothing between calls except its configuration and the current
/// parameter set. Every render builds a fresh [`Pipeline`] that lives only for
/// that call.
#[derive(Debug)]
pub struct SubtractiveSynth {
    id: u64,
    config: EngineConfig,
    params: Parameters,
}

impl SubtractiveSynth {
    /// Start from the default parameters.
    ///
    /// The defaults are not checked against the sample rate: a default cutoff
    /// at or above Nyquist surfaces as [`SynthError::InvalidFilter`] when a
    /// note is rendered, until a valid cutoff is set.
    pub fn new(config: EngineConfig) -> Result<Self, SynthError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let synth = Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            config,
            params: Parameters::default(),
        };

        if synth.params.cutoff >= synth.format().nyquist() {
            tracing::warn!(
                synth = synth.id,
                sample_rate = config.sample_rate,
                cutoff = synth.params.cutoff,
                "default cutoff is not below Nyquist; set a lower cutoff before rendering"
            );
        }
        tracing::debug!(synth = synth.id, ?config, "synth created");

        synth
    }

    pub fn with_sample_rate(sample_rate: u32) -> Result<Self, SynthError> {
        Self::new(EngineConfig::default().with_sample_rate(sample_rate))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn format(&self) -> StreamFormat {
        self.config.format()
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Wire a fresh pipeline for `note` (Hz) from the current parameters.
    pub fn pipeline(&self, note: f32) -> Result<Pipeline, SynthError> {
        if !(note.is_finite() && note > 0.0) {
            return Err(SynthError::InvalidNote(note));
        }

        let format = self.format();
        let params = &self.params;
        let seed = self.config.noise_seed;

        let osc_1 = OscNode::new(
            params.osc_1,
            note,
            params.osc_1_amplitude(),
            params.phase_1,
            format,
            seed,
        );
        let osc_2 = OscNode::new(
            params.osc_2,
            note,
            params.osc_2_amplitude(),
            0.0,
            format,
            seed,
        );

        osc_1
            .mix(osc_2)?
            .through(LowPassNode::new(params.cutoff, format)?)
    }
}

impl Default for SubtractiveSynth {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl Synth for SubtractiveSynth {
    type Parameters = Parameters;
    type Overrides = ParameterOverrides;

    fn set_parameters(&mut self, overrides: ParameterOverrides) -> Result<(), SynthError> {
        let candidate = self.params.merged(&overrides);
        // An unchanged cutoff was accepted before, or is the default; the
        // Nyquist bound only applies to a new value.
        let checked = if candidate.cutoff == self.params.cutoff {
            candidate.validate_fields()
        } else {
            candidate.validate(self.format().nyquist())
        };
        if let Err(err) = checked {
            tracing::debug!(synth = self.id, %err, "rejected parameter update");
            return Err(err);
        }

        self.params = candidate;
        tracing::debug!(synth = self.id, params = %self.params, "parameters updated");
        Ok(())
    }

    fn get_parameters(&self) -> Parameters {
        self.params
    }

    fn get_sound_array(&self, note: f32, duration: f64) -> Result<Vec<f32>, SynthError> {
        let pipeline = self.pipeline(note)?;
        let num_blocks = self.format().blocks_in(duration);

        tracing::debug!(
            synth = self.id,
            note,
            duration,
            num_blocks,
            params = %self.params,
            "rendering note"
        );

        Ok(pipeline.blocks().take(num_blocks).flatten().collect())
    }
}

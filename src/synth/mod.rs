//! The synth engine: parameters in, sample buffers out.

pub mod engine;
pub mod params;

pub use engine::{EngineConfig, Pipeline, SubtractiveSynth};
pub use params::{Param, ParamValue, ParameterOverrides, Parameters};

use crate::error::SynthError;

/// Note rendered when the caller has no preference, in Hz (A4).
pub const DEFAULT_NOTE: f32 = 440.0;
/// Length rendered when the caller has no preference, in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;

/// A configurable tone generator.
///
/// Implementors own a parameter set, accept partial updates to it, and
/// render single notes from it. Parameter updates and rendering are
/// mutually exclusive through `&mut self` / `&self`.
pub trait Synth {
    type Parameters;
    type Overrides;

    /// Merge `overrides` over the current values. Either every field is
    /// applied or, on error, none is.
    fn set_parameters(&mut self, overrides: Self::Overrides) -> Result<(), SynthError>;

    fn get_parameters(&self) -> Self::Parameters;

    /// Render `note` (Hz) for `duration` seconds, rounded down to whole blocks.
    fn get_sound_array(&self, note: f32, duration: f64) -> Result<Vec<f32>, SynthError>;

    /// [`Synth::get_sound_array`] for A4 over one second.
    fn get_default_sound_array(&self) -> Result<Vec<f32>, SynthError> {
        self.get_sound_array(DEFAULT_NOTE, DEFAULT_DURATION)
    }
}

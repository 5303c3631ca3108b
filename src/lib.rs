pub mod dsp;
pub mod error;
pub mod graph; // Pull-based block pipeline
pub mod synth; // Parameter set and note rendering

pub use dsp::Waveform;
pub use error::SynthError;
pub use synth::{EngineConfig, ParameterOverrides, Parameters, SubtractiveSynth, Synth};

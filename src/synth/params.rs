//! The synth's parameter set and partial updates to it.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::{Waveform, OSC_1_OPTIONS, OSC_2_OPTIONS};
use crate::error::SynthError;

pub const DEFAULT_MIX: f32 = 0.5;
pub const DEFAULT_PHASE_1: f32 = 0.0;
pub const DEFAULT_CUTOFF: f32 = 10_000.0;

/// Highest phase offset accepted for oscillator 1, in periods.
pub const MAX_PHASE_1: f32 = 0.5;

/// Names one field of [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Osc1,
    Osc2,
    Mix,
    Phase1,
    Cutoff,
}

impl Param {
    /// All fields, in the order [`Parameters::entries`] reports them.
    pub const ALL: [Param; 5] = [
        Param::Osc1,
        Param::Osc2,
        Param::Mix,
        Param::Phase1,
        Param::Cutoff,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Param::Osc1 => "osc_1",
            Param::Osc2 => "osc_2",
            Param::Mix => "mix",
            Param::Phase1 => "phase_1",
            Param::Cutoff => "cutoff",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Param::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SynthError::UnknownParameter(s.to_string()))
    }
}

/// One value of the parameter map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Waveform(Waveform),
    Number(f32),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Waveform(w) => write!(f, "{w}"),
            ParamValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Snapshot of the full parameter set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub osc_1: Waveform,
    pub osc_2: Waveform,
    /// Blend weight, 0 = only oscillator 1, 1 = only oscillator 2.
    pub mix: f32,
    /// Phase offset of oscillator 1, as a fraction of a period.
    pub phase_1: f32,
    /// Low-pass corner frequency in Hz.
    pub cutoff: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            osc_1: Waveform::Sine,
            osc_2: Waveform::Sine,
            mix: DEFAULT_MIX,
            phase_1: DEFAULT_PHASE_1,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl Parameters {
    pub fn get(&self, param: Param) -> ParamValue {
        match param {
            Param::Osc1 => ParamValue::Waveform(self.osc_1),
            Param::Osc2 => ParamValue::Waveform(self.osc_2),
            Param::Mix => ParamValue::Number(self.mix),
            Param::Phase1 => ParamValue::Number(self.phase_1),
            Param::Cutoff => ParamValue::Number(self.cutoff),
        }
    }

    /// Field name to value, in declaration order.
    pub fn entries(&self) -> [(&'static str, ParamValue); 5] {
        Param::ALL.map(|p| (p.name(), self.get(p)))
    }

    /// Amplitude of oscillator 1.
    pub fn osc_1_amplitude(&self) -> f32 {
        1.0 - self.mix
    }

    /// Amplitude of oscillator 2.
    pub fn osc_2_amplitude(&self) -> f32 {
        self.mix
    }

    /// These values with every field present in `overrides` replaced.
    /// The result is not validated.
    pub fn merged(&self, overrides: &ParameterOverrides) -> Parameters {
        Parameters {
            osc_1: overrides.osc_1.unwrap_or(self.osc_1),
            osc_2: overrides.osc_2.unwrap_or(self.osc_2),
            mix: overrides.mix.unwrap_or(self.mix),
            phase_1: overrides.phase_1.unwrap_or(self.phase_1),
            cutoff: overrides.cutoff.unwrap_or(self.cutoff),
        }
    }

    /// Checks every field against its domain, reporting the first offender.
    ///
    /// `nyquist` bounds the cutoff from above.
    pub fn validate(&self, nyquist: f32) -> Result<(), SynthError> {
        self.validate_fields()?;
        if self.cutoff >= nyquist {
            return Err(SynthError::invalid(
                Param::Cutoff,
                format!(
                    "{} Hz must lie strictly between 0 and {nyquist} Hz",
                    self.cutoff
                ),
            ));
        }
        Ok(())
    }

    /// [`Parameters::validate`] without the upper cutoff bound: the cutoff
    /// only has to be a positive, finite frequency.
    pub fn validate_fields(&self) -> Result<(), SynthError> {
        if !OSC_1_OPTIONS.contains(&self.osc_1) {
            return Err(SynthError::invalid(
                Param::Osc1,
                format!(
                    "`{}` is not available, expected one of {}",
                    self.osc_1,
                    option_list(OSC_1_OPTIONS)
                ),
            ));
        }
        if !OSC_2_OPTIONS.contains(&self.osc_2) {
            return Err(SynthError::invalid(
                Param::Osc2,
                format!(
                    "`{}` is not available, expected one of {}",
                    self.osc_2,
                    option_list(OSC_2_OPTIONS)
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.mix) {
            return Err(SynthError::invalid(
                Param::Mix,
                format!("{} is outside [0, 1]", self.mix),
            ));
        }
        if !(0.0..=MAX_PHASE_1).contains(&self.phase_1) {
            return Err(SynthError::invalid(
                Param::Phase1,
                format!("{} is outside [0, {MAX_PHASE_1}]", self.phase_1),
            ));
        }
        if !(self.cutoff > 0.0 && self.cutoff.is_finite()) {
            return Err(SynthError::invalid(
                Param::Cutoff,
                format!("{} Hz is not a positive frequency", self.cutoff),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Partial update: fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterOverrides {
    pub osc_1: Option<Waveform>,
    pub osc_2: Option<Waveform>,
    pub mix: Option<f32>,
    pub phase_1: Option<f32>,
    pub cutoff: Option<f32>,
}

impl ParameterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn osc_1(mut self, waveform: Waveform) -> Self {
        self.osc_1 = Some(waveform);
        self
    }

    pub fn osc_2(mut self, waveform: Waveform) -> Self {
        self.osc_2 = Some(waveform);
        self
    }

    pub fn mix(mut self, mix: f32) -> Self {
        self.mix = Some(mix);
        self
    }

    pub fn phase_1(mut self, phase: f32) -> Self {
        self.phase_1 = Some(phase);
        self
    }

    pub fn cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set one field from its textual name and value, e.g. `("osc_1", "Square")`.
    ///
    /// Waveform names are matched exactly and must be offered by that
    /// oscillator. Numeric ranges are checked when the overrides are applied.
    pub fn assign(&mut self, key: &str, value: &str) -> Result<(), SynthError> {
        let param: Param = key.trim().parse()?;
        let value = value.trim();
        match param {
            Param::Osc1 => self.osc_1 = Some(parse_waveform(param, value, OSC_1_OPTIONS)?),
            Param::Osc2 => self.osc_2 = Some(parse_waveform(param, value, OSC_2_OPTIONS)?),
            Param::Mix => self.mix = Some(parse_number(param, value)?),
            Param::Phase1 => self.phase_1 = Some(parse_number(param, value)?),
            Param::Cutoff => self.cutoff = Some(parse_number(param, value)?),
        }
        Ok(())
    }
}

impl From<Parameters> for ParameterOverrides {
    fn from(params: Parameters) -> Self {
        Self {
            osc_1: Some(params.osc_1),
            osc_2: Some(params.osc_2),
            mix: Some(params.mix),
            phase_1: Some(params.phase_1),
            cutoff: Some(params.cutoff),
        }
    }
}

fn parse_waveform(
    param: Param,
    value: &str,
    options: &[Waveform],
) -> Result<Waveform, SynthError> {
    match value.parse() {
        Ok(waveform) if options.contains(&waveform) => Ok(waveform),
        Ok(_) => Err(SynthError::invalid(
            param,
            format!(
                "`{value}` is not available, expected one of {}",
                option_list(options)
            ),
        )),
        Err(_) => Err(SynthError::invalid(
            param,
            format!(
                "unknown waveform `{value}`, expected one of {}",
                option_list(options)
            ),
        )),
    }
}

fn parse_number(param: Param, value: &str) -> Result<f32, SynthError> {
    value
        .parse()
        .map_err(|_| SynthError::invalid(param, format!("expected a number, got `{value}`")))
}

fn option_list(options: &[Waveform]) -> String {
    options
        .iter()
        .map(|w| w.name())
        .collect::<Vec<_>>()
        .join(", ")
}

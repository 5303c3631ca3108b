//! Error type shared by the DSP primitives, graph nodes and the synth engine.

use crate::graph::node::StreamFormat;
use crate::synth::params::Param;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    /// A parameter value lies outside its domain. The whole update is rejected.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidParameter { field: Param, reason: String },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// Cutoff must lie strictly between 0 Hz and the Nyquist frequency.
    #[error("invalid filter configuration: cutoff {cutoff} Hz must lie strictly between 0 and {nyquist} Hz")]
    InvalidFilter { cutoff: f32, nyquist: f32 },

    /// Two streams with different sample rates or block sizes were combined.
    #[error("stream format mismatch: {left} vs {right}")]
    FormatMismatch {
        left: StreamFormat,
        right: StreamFormat,
    },

    #[error("note frequency must be a positive number of Hz, got {0}")]
    InvalidNote(f32),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl SynthError {
    pub(crate) fn invalid(field: Param, reason: impl Into<String>) -> Self {
        SynthError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// The parameter this error refers to, if any.
    pub fn field(&self) -> Option<Param> {
        match self {
            SynthError::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_names_the_field() {
        let err = SynthError::invalid(Param::Phase1, "must lie in [0, 0.5]");
        assert_eq!(err.field(), Some(Param::Phase1));
        assert_eq!(
            err.to_string(),
            "invalid value for `phase_1`: must lie in [0, 0.5]"
        );
    }

    #[test]
    fn filter_error_reports_nyquist() {
        let err = SynthError::InvalidFilter {
            cutoff: 30_000.0,
            nyquist: 22_050.0,
        };
        assert!(err.to_string().contains("22050"));
        assert_eq!(err.field(), None);
    }
}

//! Command-line parsing: every argument is a `key=value` assignment.

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use simple_synth::{
    synth::{DEFAULT_DURATION, DEFAULT_NOTE},
    EngineConfig, ParameterOverrides,
};

pub const USAGE: &str = "\
usage: simplesynth [key=value ...]

synth parameters:
  osc_1=NAME      Sine, Triangle, Square, SquareH, Sawtooth, Pulse, Semicircle
  osc_2=NAME      same as osc_1, plus WhiteNoise
  mix=0..1        0 = only osc_1, 1 = only osc_2          (default 0.5)
  phase_1=0..0.5  phase offset of osc_1, in periods       (default 0)
  cutoff=HZ       low-pass corner frequency               (default 10000)

rendering:
  note=HZ         note frequency                          (default 440)
  duration=SECS   note length                             (default 1)
  sample_rate=HZ  render and playback rate      (default: output device)
  block_size=N    samples per block                       (default 512)
  seed=N          seed for WhiteNoise

keys: q quit, space replay, left/right scroll the waveform";

/// Everything the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub overrides: ParameterOverrides,
    pub note: f32,
    pub duration: f64,
    /// `None` follows the output device.
    pub sample_rate: Option<u32>,
    pub block_size: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            overrides: ParameterOverrides::new(),
            note: DEFAULT_NOTE,
            duration: DEFAULT_DURATION,
            sample_rate: None,
            block_size: None,
            seed: None,
        }
    }
}

impl Invocation {
    pub fn parse<I, S>(args: I) -> EyreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut invocation = Self::default();

        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                bail!("expected key=value, got `{arg}`\n\n{USAGE}");
            };
            let value = value.trim();

            match key.trim() {
                "note" => invocation.note = parse_value(key, value)?,
                "duration" => invocation.duration = parse_value(key, value)?,
                "sample_rate" => invocation.sample_rate = Some(parse_value(key, value)?),
                "block_size" => invocation.block_size = Some(parse_value(key, value)?),
                "seed" => invocation.seed = Some(parse_value(key, value)?),
                _ => invocation
                    .overrides
                    .assign(key, value)
                    .wrap_err_with(|| format!("in argument `{arg}`"))?,
            }
        }

        Ok(invocation)
    }

    /// Engine settings, falling back to `device_rate` when no rate was given.
    pub fn engine_config(&self, device_rate: Option<u32>) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(rate) = self.sample_rate.or(device_rate) {
            config = config.with_sample_rate(rate);
        }
        if let Some(block_size) = self.block_size {
            config = config.with_block_size(block_size);
        }
        if let Some(seed) = self.seed {
            config = config.with_noise_seed(seed);
        }
        config
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> EyreResult<T> {
    value
        .parse()
        .map_err(|_| eyre!("invalid value `{value}` for `{key}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_synth::Waveform;

    #[test]
    fn parses_mixed_arguments() {
        let invocation = Invocation::parse([
            "osc_1=Square",
            "mix=0.2",
            "note=220",
            "duration=0.5",
            "seed=9",
        ])
        .unwrap();

        assert_eq!(invocation.note, 220.0);
        assert_eq!(invocation.duration, 0.5);
        assert_eq!(invocation.seed, Some(9));
        assert_eq!(
            invocation.overrides,
            ParameterOverrides::new().osc_1(Waveform::Square).mix(0.2)
        );
    }

    #[test]
    fn no_arguments_means_defaults() {
        let invocation = Invocation::parse(Vec::<String>::new()).unwrap();
        assert_eq!(invocation, Invocation::default());
        assert_eq!(invocation.engine_config(None), EngineConfig::default());
    }

    #[test]
    fn device_rate_is_a_fallback() {
        let invocation = Invocation::parse(["sample_rate=22050"]).unwrap();
        assert_eq!(invocation.engine_config(Some(48_000)).sample_rate, 22_050);

        let invocation = Invocation::parse(["block_size=256"]).unwrap();
        let config = invocation.engine_config(Some(48_000));
        assert_eq!(config.sample_rate, 48_000);
        assert_eq!(config.block_size, 256);
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(Invocation::parse(["mix"]).is_err());
        assert!(Invocation::parse(["note=high"]).is_err());
        assert!(Invocation::parse(["osc_2=Noise"]).is_err());
        assert!(Invocation::parse(["volume=3"]).is_err());
    }
}

//! Render the requested note, open audio, hand over to the TUI.

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use simple_synth::{SubtractiveSynth, Synth};

use crate::cli::Invocation;
use crate::player::Player;
use crate::ui::{NoteInfo, UiApp};

pub fn run(invocation: Invocation) -> EyreResult<()> {
    // The device decides the rate unless one was asked for.
    let player = match Player::open(invocation.sample_rate) {
        Ok(player) => Some(player),
        Err(err) => {
            tracing::warn!("audio output unavailable, showing the note only: {err:#}");
            None
        }
    };

    let config = invocation.engine_config(player.as_ref().map(Player::sample_rate));
    let mut synth = SubtractiveSynth::new(config).wrap_err("invalid engine configuration")?;
    synth
        .set_parameters(invocation.overrides.clone())
        .wrap_err("invalid synth parameters")?;

    let samples = synth
        .get_sound_array(invocation.note, invocation.duration)
        .wrap_err("failed to render note")?;
    tracing::info!(
        samples = samples.len(),
        params = %synth.get_parameters(),
        "rendered note"
    );

    let note = NoteInfo {
        frequency: invocation.note,
        duration: invocation.duration,
        sample_rate: config.sample_rate,
        samples: samples.len(),
        playback: None,
    };

    let mut ui = UiApp::new(
        samples,
        synth.get_parameters(),
        note,
        config.block_size,
        player,
    );

    let mut terminal = ratatui::init();
    let result = ui.run(&mut terminal);
    ratatui::restore();
    result
}

//! TUI module for simplesynth
//!
//! Shows the rendered note: parameters, a scrollable waveform window and the
//! spectrum of that window. Parameters are display-only.

mod params;
mod spectrum;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use simple_synth::Parameters;
use std::time::Duration;

use crate::player::Player;
use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Samples shown in the waveform and fed to the FFT.
const VIS_WINDOW: usize = 2048;

/// What the parameter bar reports besides the parameters.
pub struct NoteInfo {
    pub frequency: f32,
    pub duration: f64,
    pub sample_rate: u32,
    pub samples: usize,
    /// Playback progress in `[0, 1]`, `None` without an output device.
    pub playback: Option<f32>,
}

/// UI application state
pub struct UiApp {
    samples: Vec<f32>,
    params: Parameters,
    note: NoteInfo,
    player: Option<Player>,
    /// Next sample to hand to the player
    feed_cursor: usize,
    /// First sample of the visible window
    view_offset: usize,
    block_size: usize,
    analyzer: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        samples: Vec<f32>,
        params: Parameters,
        note: NoteInfo,
        block_size: usize,
        player: Option<Player>,
    ) -> Self {
        let mut analyzer = SpectrumAnalyzer::new(VIS_WINDOW, note.sample_rate as f32);
        analyzer.update(&samples);

        Self {
            samples,
            params,
            note,
            player,
            feed_cursor: 0,
            view_offset: 0,
            block_size: block_size.max(1),
            analyzer,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.feed_player();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Top up the player's ring buffer and refresh the progress readout.
    fn feed_player(&mut self) {
        let Some(player) = self.player.as_mut() else {
            self.note.playback = None;
            return;
        };

        if self.feed_cursor < self.samples.len() {
            self.feed_cursor += player.feed(&self.samples[self.feed_cursor..]);
        }

        let total = self.samples.len().max(1);
        let played = player.position().min(total);
        self.note.playback = Some(played as f32 / total as f32);
    }

    fn replay(&mut self) {
        if let Some(player) = self.player.as_ref() {
            // Anything still queued finishes first; the counter restarts with the new pass.
            player.reset_position();
            self.feed_cursor = 0;
        }
    }

    fn scroll(&mut self, blocks: isize) {
        let max_offset = self.samples.len().saturating_sub(VIS_WINDOW);
        let step = blocks.unsigned_abs() * self.block_size;
        self.view_offset = if blocks < 0 {
            self.view_offset.saturating_sub(step)
        } else {
            (self.view_offset + step).min(max_offset)
        };
        let (start, end) = self.visible_range();
        self.analyzer.update(&self.samples[start..end]);
    }

    fn visible_range(&self) -> (usize, usize) {
        let end = (self.view_offset + VIS_WINDOW).min(self.samples.len());
        (self.view_offset.min(end), end)
    }

    fn visible(&self) -> &[f32] {
        let (start, end) = self.visible_range();
        &self.samples[start..end]
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.replay(),
            KeyCode::Left => self.scroll(-1),
            KeyCode::Right => self.scroll(1),
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: parameters, waveform, spectrum, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Parameter bar
                Constraint::Min(8),     // Waveform
                Constraint::Length(12), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        render_params(frame, chunks[0], &self.params, &self.note);
        render_waveform(frame, chunks[1], self.visible(), self.view_offset);
        render_spectrum(frame, chunks[2], self.analyzer.data());

        let help = Paragraph::new(" [Q] Quit  [Space] Replay  [←/→] Scroll")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

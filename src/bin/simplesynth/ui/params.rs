//! Read-only parameter bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use simple_synth::Parameters;

use super::NoteInfo;

pub fn render_params(frame: &mut Frame, area: Rect, params: &Parameters, note: &NoteInfo) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (name, param) in params.entries() {
        spans.push(Span::styled(format!(" {name} "), label));
        spans.push(Span::styled(param.to_string(), value));
    }

    let status = match note.playback {
        Some(progress) => format!(" ▶ {:>3.0}%", progress * 100.0),
        None => " no audio output".to_string(),
    };

    let details = Line::from(vec![
        Span::styled(" note ", label),
        Span::styled(format!("{} Hz", note.frequency), value),
        Span::styled("  duration ", label),
        Span::styled(format!("{} s", note.duration), value),
        Span::styled("  rate ", label),
        Span::styled(format!("{} Hz", note.sample_rate), value),
        Span::styled("  samples ", label),
        Span::styled(note.samples.to_string(), value),
        Span::styled(status, Style::default().fg(Color::Green)),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(spans), details])
        .block(Block::default().title(" simplesynth ").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render a window of the rendered note.
///
/// `offset` is the index of the first sample shown, used for the title.
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], offset: usize) {
    let block = Block::default()
        .title(format!(
            " Waveform [{}..{}] ",
            offset,
            offset + samples.len()
        ))
        .borders(Borders::ALL);

    // Convert audio samples to chart data points
    let data: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let x = i as f64 / samples.len().max(1) as f64;
            (x, sample as f64)
        })
        .collect();

    // Output is not normalized, widen the axis when it overshoots.
    let bound = samples
        .iter()
        .fold(1.0f32, |acc, &s| acc.max(s.abs()))
        .min(100.0) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-bound, bound])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

//! Spectrum analyzer widget
//!
//! FFT-based frequency spectrum visualization with log-spaced bins.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 64;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Frequency values for each bin (Hz)
    freq_bins: Vec<f64>,
    /// FFT bin indices corresponding to each frequency
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Current spectrum data: (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// # Arguments
    /// * `fft_len` - FFT size; shorter inputs are zero-padded
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);

        // Hann window - reduces spectral leakage
        let denom = (fft_len - 1) as f32;
        let window: Vec<f32> = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        // Log-spaced frequency bins (20 Hz to Nyquist)
        let max_freq = (sample_rate as f64 / 2.0).min(20_000.0).max(21.0);
        let min_freq = 20.0;
        let ratio = max_freq / min_freq;
        let half = fft_len / 2;

        let (freq_bins, bin_indices): (Vec<f64>, Vec<usize>) = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
                (freq, index.min(half - 1))
            })
            .unzip();

        let spectrum = freq_bins.iter().map(|&f| (f, -120.0)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum,
        }
    }

    /// Recompute the spectrum from the start of `samples`.
    pub fn update(&mut self, samples: &[f32]) {
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        // Extract magnitudes at log-spaced frequencies
        for ((point, &idx), &freq) in self
            .spectrum
            .iter_mut()
            .zip(&self.bin_indices)
            .zip(&self.freq_bins)
        {
            let bin = self.scratch[idx];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *point = (freq, 10.0 * (power as f64).log10());
        }
    }

    /// Current spectrum data
    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// Frequency of the loudest displayed bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.spectrum
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|&(freq, _)| freq)
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum
        .iter()
        .map(|(f, _)| *f)
        .fold(0.0, f64::max)
        .max(1.0);
    let max_db = spectrum
        .iter()
        .map(|(_, db)| *db)
        .fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec!["0".to_string(), format!("{:.0} Hz", max_freq)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_follows_a_pure_tone() {
        let sample_rate = 44_100.0;
        let samples: Vec<f32> = (0..4096)
            .map(|n| (std::f32::consts::TAU * 1_000.0 * n as f32 / sample_rate).sin())
            .collect();

        let mut analyzer = SpectrumAnalyzer::new(4096, sample_rate);
        analyzer.update(&samples);

        let peak = analyzer.peak_frequency().unwrap();
        assert!((800.0..1_250.0).contains(&peak), "peak at {peak} Hz");
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut analyzer = SpectrumAnalyzer::new(1024, 44_100.0);
        analyzer.update(&[0.5; 100]);
        assert_eq!(analyzer.data().len(), SPECTRUM_BINS);
        assert!(analyzer.data().iter().all(|(_, db)| db.is_finite()));
    }
}

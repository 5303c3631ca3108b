use std::f64::consts::PI;

use rustfft::num_complex::Complex;

use crate::error::SynthError;

/*
Butterworth Low-Pass, Zero-Phase
================================

A Butterworth filter is maximally flat in the passband: no ripple, just a
smooth roll-off of 6 dB/octave per order above the cutoff. Order 4 rolls off
at 24 dB/octave.

Design (digital, bilinear transform):
  1. Analog prototype poles on the left half of the unit circle:
       p_k = -exp(iπ m / 2N),  m = -N+1, -N+3, ..., N-1
  2. Pre-warp the normalized cutoff Wn (1.0 = Nyquist) and scale the poles:
       warped = 4 tan(π Wn / 2)
  3. Map every pole through z = (4 + p) / (4 - p). All N zeros land on z = -1.
  4. Expand zeros and poles into polynomials b (numerator) and a (denominator).

Filtering (forward-backward):

  x ──→ [pad odd] ──→ [IIR →] ──→ [reverse] ──→ [IIR →] ──→ [reverse] ──→ [trim] ──→ y

Running the same IIR filter forward and then backward cancels its phase
response, so the output is not delayed. The squared magnitude response means
the effective order doubles.

Edges are the weak spot. The segment is extended at both ends by a point
reflection (odd extension) and each pass starts from the filter's steady state
for the first sample, which keeps a constant input exactly constant. Anything
else still shows a transient near the ends of the segment.
*/

/// IIR filter in transfer-function form, `a[0]` normalized to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl TransferFunction {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        let a0 = a.first().copied().unwrap_or(1.0);
        let len = b.len().max(a.len()).max(1);

        let mut b: Vec<f64> = b.into_iter().map(|c| c / a0).collect();
        let mut a: Vec<f64> = a.into_iter().map(|c| c / a0).collect();
        b.resize(len, 0.0);
        a.resize(len, 0.0);
        if a[0] == 0.0 {
            a[0] = 1.0;
        }

        Self { b, a }
    }

    /// Digital Butterworth low-pass of the given order.
    ///
    /// Fails unless `0 < cutoff_hz < sample_rate / 2`.
    pub fn butterworth_lowpass(
        order: usize,
        cutoff_hz: f32,
        sample_rate: f32,
    ) -> Result<Self, SynthError> {
        if order == 0 {
            return Err(SynthError::InvalidConfig(
                "filter order must be at least 1".into(),
            ));
        }

        let nyquist = sample_rate / 2.0;
        let wn = cutoff_hz as f64 / nyquist as f64;
        if !(wn > 0.0 && wn < 1.0) {
            return Err(SynthError::InvalidFilter {
                cutoff: cutoff_hz,
                nyquist,
            });
        }

        let n = order as f64;
        let warped = 4.0 * (PI * wn / 2.0).tan();

        let analog_poles: Vec<Complex<f64>> = (0..order)
            .map(|k| {
                let m = 2.0 * k as f64 + 1.0 - n;
                -Complex::from_polar(1.0, PI * m / (2.0 * n)) * warped
            })
            .collect();

        let four = Complex::new(4.0, 0.0);
        let digital_poles: Vec<Complex<f64>> = analog_poles
            .iter()
            .map(|&p| (four + p) / (four - p))
            .collect();

        let denominator = analog_poles
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (four - p));
        let gain = warped.powi(order as i32) * (Complex::new(1.0, 0.0) / denominator).re;

        let zeros = vec![Complex::new(-1.0, 0.0); order];
        let b = poly(&zeros).into_iter().map(|c| c.re * gain).collect();
        let a = poly(&digital_poles).into_iter().map(|c| c.re).collect();

        Ok(Self::new(b, a))
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Gain at DC, `H(1)`.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Direct form II transposed, starting from state `zi` (one entry per delay).
    pub fn lfilter(&self, input: &[f64], zi: &[f64]) -> Vec<f64> {
        let states = self.a.len() - 1;
        debug_assert_eq!(zi.len(), states);

        let mut z = zi.to_vec();
        input
            .iter()
            .map(|&x| {
                let y = self.b[0] * x + z.first().copied().unwrap_or(0.0);
                for i in 0..states {
                    let next = z.get(i + 1).copied().unwrap_or(0.0);
                    z[i] = self.b[i + 1] * x + next - self.a[i + 1] * y;
                }
                y
            })
            .collect()
    }

    /// Delay state of the filter after a unit step has settled.
    ///
    /// Scaling it by the first input sample starts the filter as if that
    /// sample had been applied forever.
    pub fn lfilter_zi(&self) -> Vec<f64> {
        let states = self.a.len() - 1;
        let mut zi = vec![0.0; states];
        if states == 0 {
            return zi;
        }

        let (a, b) = (&self.a, &self.b);
        let b_sum: f64 = (1..=states).map(|k| b[k] - a[k] * b[0]).sum();
        let a_sum: f64 = 1.0 + a[1..].iter().sum::<f64>();
        zi[0] = b_sum / a_sum;

        let mut asum = 1.0;
        let mut csum = 0.0;
        for k in 1..states {
            asum += a[k];
            csum += b[k] - a[k] * b[0];
            zi[k] = asum * zi[0] - csum;
        }
        zi
    }

    /// Number of samples reflected onto each end of a segment before filtering.
    pub fn pad_len(&self, segment_len: usize) -> usize {
        (3 * self.a.len()).min(segment_len.saturating_sub(1))
    }

    /// Zero-phase forward-backward filtering of `block`, in place.
    pub fn filtfilt(&self, block: &mut [f32]) {
        let len = block.len();
        if len == 0 {
            return;
        }

        let edge = self.pad_len(len);
        let first = block[0] as f64;
        let last = block[len - 1] as f64;

        let mut extended = Vec::with_capacity(len + 2 * edge);
        extended.extend((1..=edge).rev().map(|i| 2.0 * first - block[i] as f64));
        extended.extend(block.iter().map(|&s| s as f64));
        extended.extend((1..=edge).map(|i| 2.0 * last - block[len - 1 - i] as f64));

        let zi = self.lfilter_zi();
        let scaled = |x0: f64| zi.iter().map(|z| z * x0).collect::<Vec<_>>();

        let mut forward = self.lfilter(&extended, &scaled(extended[0]));
        forward.reverse();
        let mut backward = self.lfilter(&forward, &scaled(forward[0]));
        backward.reverse();

        for (out, &y) in block.iter_mut().zip(&backward[edge..edge + len]) {
            *out = y as f32;
        }
    }
}

/// Expand roots into polynomial coefficients, highest power first.
fn poly(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "coefficient {i}: expected {e}, got {a}");
        }
    }

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn half_band_coefficients() {
        // Wn = 0.5
        let tf = TransferFunction::butterworth_lowpass(4, 11_025.0, 44_100.0).unwrap();
        assert_close(
            tf.b(),
            &[0.09398085, 0.37592341, 0.56388511, 0.37592341, 0.09398085],
            1e-7,
        );
        assert_close(tf.a(), &[1.0, 0.0, 0.48602882, 0.0, 0.0176648], 1e-7);
    }

    #[test]
    fn default_cutoff_coefficients() {
        let tf = TransferFunction::butterworth_lowpass(4, 10_000.0, 44_100.0).unwrap();
        assert_close(
            tf.b(),
            &[0.06917529, 0.27670118, 0.41505176, 0.27670118, 0.06917529],
            1e-7,
        );
        assert_close(
            tf.a(),
            &[1.0, -0.36316417, 0.52774422, -0.07801676, 0.02024141],
            1e-7,
        );
        assert!((tf.dc_gain() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_cutoff_outside_open_band() {
        for cutoff in [0.0, -10.0, 22_050.0, 30_000.0, f32::NAN] {
            let err = TransferFunction::butterworth_lowpass(4, cutoff, 44_100.0).unwrap_err();
            assert!(matches!(err, SynthError::InvalidFilter { .. }), "{cutoff}");
        }
        assert!(matches!(
            TransferFunction::butterworth_lowpass(0, 1_000.0, 44_100.0),
            Err(SynthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn constant_input_passes_unchanged() {
        let tf = TransferFunction::butterworth_lowpass(4, 2_000.0, 44_100.0).unwrap();
        let mut block = vec![0.3f32; 64];
        tf.filtfilt(&mut block);
        assert!(block.iter().all(|&s| (s - 0.3).abs() < 1e-6), "{block:?}");
    }

    #[test]
    fn passband_sine_is_not_delayed() {
        let tf = TransferFunction::butterworth_lowpass(4, 10_000.0, 44_100.0).unwrap();
        let input = sine(440.0, 44_100.0, 512);
        let mut block = input.clone();
        tf.filtfilt(&mut block);

        for (i, (x, y)) in input.iter().zip(&block).enumerate().skip(50).take(412) {
            assert!((x - y).abs() < 1e-4, "sample {i}: {x} vs {y}");
        }
    }

    #[test]
    fn stopband_sine_is_attenuated() {
        let tf = TransferFunction::butterworth_lowpass(4, 500.0, 44_100.0).unwrap();
        let mut block = sine(5_000.0, 44_100.0, 512);
        tf.filtfilt(&mut block);

        let interior_peak = block[50..462].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(interior_peak < 0.05, "interior peak {interior_peak}");
    }

    #[test]
    fn short_segments_shrink_the_pad() {
        let tf = TransferFunction::butterworth_lowpass(4, 1_000.0, 44_100.0).unwrap();
        assert_eq!(tf.pad_len(512), 15);
        assert_eq!(tf.pad_len(4), 3);
        assert_eq!(tf.pad_len(0), 0);

        let mut tiny = vec![1.0f32, 1.0, 1.0];
        tf.filtfilt(&mut tiny);
        assert!(tiny.iter().all(|s| s.is_finite()));

        let mut empty: Vec<f32> = Vec::new();
        tf.filtfilt(&mut empty);
    }

    #[test]
    fn lfilter_zi_is_the_step_steady_state() {
        let tf = TransferFunction::butterworth_lowpass(4, 3_000.0, 44_100.0).unwrap();
        let zi = tf.lfilter_zi();
        let out = tf.lfilter(&[1.0; 16], &zi);
        assert!(out.iter().all(|y| (y - 1.0).abs() < 1e-12));
    }

    #[test]
    fn new_normalizes_leading_denominator() {
        let tf = TransferFunction::new(vec![2.0], vec![2.0, 1.0]);
        assert_eq!(tf.a(), &[1.0, 0.5]);
        assert_eq!(tf.b(), &[1.0, 0.0]);
    }
}

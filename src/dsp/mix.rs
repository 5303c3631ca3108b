//! Block summing.

/*
Summing Two Oscillators
=======================

The synth's mixer is a plain elementwise sum. The blend between the two
oscillators is not applied here: it is baked into each oscillator's amplitude
when the pipeline is built.

    osc_1 amplitude = 1 - mix
    osc_2 amplitude = mix

      mix   osc_1   osc_2
      0.0   1.0     0.0     only oscillator 1
      0.5   0.5     0.5
      1.0   0.0     1.0     only oscillator 2

The amplitudes sum to 1, so two in-phase full-scale waves peak at 1.0. Shapes
that overshoot (the harmonic square) or phase relationships between different
shapes can still push the sum past ±1.0; nothing here clips or normalizes.

Both inputs must share a block length. Zipping blocks of different lengths
would silently drop the tail of the longer one.
*/

/// Sum two blocks into `out`.
#[inline]
pub fn sum(a: &[f32], b: &[f32], out: &mut [f32]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), out.len());

    for ((&sa, &sb), o) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
        *o = sa + sb;
    }
}

/// Add block `b` into block `a`.
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

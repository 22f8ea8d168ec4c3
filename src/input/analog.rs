//! Analog signal shaping: deadzone cutoff and wire quantization.

/// Fast approximate square root.
///
/// Bit-level seed (`(bits >> 1) + 0x1fbb67ae`) refined by a single
/// Newton iteration. Relative error stays well under 0.1% across the
/// magnitude range the sticks produce, which is plenty for a deadzone
/// comparison that runs twice per controller per tick.
pub fn fast_sqrt(f: f32) -> f32 {
    let i = (f.to_bits() >> 1).wrapping_add(0x1fbb_67ae);
    let f1 = f32::from_bits(i);
    0.5 * (f1 + f / f1)
}

/// Apply the radial deadzone to one stick.
///
/// A hard cutoff, not a rescaled deadzone: if the magnitude is below
/// the threshold both axes become exactly zero, otherwise the input
/// passes through unchanged. A threshold of zero disables the check
/// entirely.
pub fn shape_stick(x: f32, y: f32, threshold: f32) -> (f32, f32) {
    if threshold > 0.0 {
        let magnitude = fast_sqrt(x * x + y * y);
        if magnitude < threshold {
            return (0.0, 0.0);
        }
    }
    (x, y)
}

/// Quantize a trigger value in [0, 1] to an unsigned wire byte.
pub fn quantize_trigger(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)).round() as u8
}

/// Quantize a stick axis in [-1, 1] to a signed 16-bit wire value.
///
/// Y-axis inversion is the packing site's job, not this function's.
pub fn quantize_stick(value: f32) -> i16 {
    (32767.0 * value.clamp(-1.0, 1.0)).round() as i16
}

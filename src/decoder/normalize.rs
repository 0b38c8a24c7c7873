use crate::models::{Bar, Run};

/// Rescale runs so their widths are measured in bits instead of pixels.
///
/// `pixels_per_bit` is the total pixel width of `runs` divided by `total_bits`.
/// Values and order are preserved, so multiplying every run width by a common
/// factor gives the same output.
///
/// # Panics
/// Panics if `total_bits` is zero.
pub fn normalize(runs: &[Run], total_bits: usize) -> Vec<Bar> {
    assert!(total_bits > 0, "cannot normalize onto zero bits");

    let total_pixels: usize = runs.iter().map(|r| r.width).sum();
    if total_pixels == 0 {
        return Vec::new();
    }

    let pixels_per_bit = total_pixels as f32 / total_bits as f32;
    runs.iter()
        .map(|r| Bar {
            dark: r.dark,
            width: r.width as f32 / pixels_per_bit,
        })
        .collect()
}

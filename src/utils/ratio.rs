/// Percentage difference between two positive quantities:
/// `|a - b| / ((a + b) / 2) * 100`.
///
/// Symmetric in its arguments and bounded by 200 for positive inputs.
pub fn percentage_difference(a: f32, b: f32) -> f32 {
    let mean = (a + b) / 2.0;
    if mean == 0.0 {
        return if a == b { 0.0 } else { f32::INFINITY };
    }
    (a - b).abs() / mean * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_difference() {
        assert_eq!(percentage_difference(4.0, 4.0), 0.0);
        assert!((percentage_difference(1.0, 3.0) - 100.0).abs() < 1e-4);
        assert_eq!(percentage_difference(1.0, 3.0), percentage_difference(3.0, 1.0));
        assert_eq!(percentage_difference(0.0, 0.0), 0.0);
        assert!(percentage_difference(0.0, 5.0) <= 200.0);
    }
}

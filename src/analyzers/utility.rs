/// Computes `part / total * 100`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Computes `num / den * 100`. Returns `None` when the denominator is zero.
pub fn ratio_pct(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        None
    } else {
        Some(num / den * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_ratio_pct_zero_denominator() {
        assert_eq!(ratio_pct(1.0, 0.0), None);
    }

    #[test]
    fn test_ratio_pct_normal() {
        assert_eq!(ratio_pct(0.5, 2.0), Some(25.0));
    }
}

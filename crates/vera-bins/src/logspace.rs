/// Returns `n` samples evenly spaced in `log10` between `min` and `max`
/// inclusive. The first and last samples are exactly `min` and `max`.
///
/// Callers validate `0 < min < max`; `n == 0` yields an empty vector and
/// `n == 1` yields `[min]`.
pub fn logspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let lo = min.log10();
            let span = max.log10() - lo;
            let last = n - 1;
            (0..n)
                .map(|i| match i {
                    0 => min,
                    i if i == last => max,
                    i => 10f64.powf(lo + span * i as f64 / last as f64),
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::logspace;

    #[test]
    fn decades_are_hit_exactly_at_the_ends() {
        let samples = logspace(1e9, 1e13, 3);
        assert_eq!(samples[0], 1e9);
        assert!((samples[1] / 1e11 - 1.0).abs() < 1e-12);
        assert_eq!(samples[2], 1e13);
    }

    #[test]
    fn degenerate_counts() {
        assert!(logspace(1.0, 10.0, 0).is_empty());
        assert_eq!(logspace(5.0, 10.0, 1), vec![5.0]);
    }
}

//! Shared inputs for the haarstream benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Power-of-two lengths exercised by every benchmark.
pub const SIZES: [usize; 4] = [1 << 8, 1 << 12, 1 << 16, 1 << 20];

/// Deterministic pseudo-random signal of length `n`.
pub fn signal(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Whitespace-separated rendering of `signal(n)` as the CLI would read it.
pub fn signal_text(n: usize) -> String {
    let mut text = String::with_capacity(n * 12);
    for v in signal(n) {
        text.push_str(&format!("{:.6}\n", v));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_is_deterministic() {
        assert_eq!(signal(16), signal(16));
        assert_eq!(signal_text(4).lines().count(), 4);
    }
}

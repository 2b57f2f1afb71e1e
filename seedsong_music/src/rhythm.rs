// Rhythm partitioning: filling one measure with note durations.
//
// A measure is the unit interval (one whole note). We repeatedly pick a
// duration from the pool that still fits in what's left of the bar, until
// the bar is full to within epsilon. Durations are fractions of a measure;
// melody.rs scales them to beats.
//
// Termination: any pool entry that fits shrinks the remainder, and once the
// remainder is smaller than every entry the candidate set is empty and the
// leftover itself closes the bar. With the default dyadic pool that fallback
// never fires, since the sums are exact in binary floating point.

use crate::config::GeneratorConfig;
use seedsong_prng::UniformSource;

/// Partition one measure into fractional durations that sum to exactly 1.
///
/// Each pick is one uniform draw over the pool entries that fit. Call once
/// per measure; measures don't share any state.
pub fn partition_measure(config: &GeneratorConfig, rng: &mut impl UniformSource) -> Vec<f64> {
    let eps = config.epsilon;
    let mut durations: Vec<f64> = Vec::new();
    let mut used = 0.0;

    while 1.0 - used > eps {
        let remaining = 1.0 - used;
        let candidates: Vec<f64> = config
            .rhythm_pool
            .iter()
            .copied()
            .filter(|&v| v <= remaining + eps)
            .collect();

        if candidates.is_empty() {
            // Only reachable through float drift or a pool with no small values.
            durations.push(remaining);
            break;
        }

        let pick = candidates[rng.pick_index(candidates.len())];
        durations.push(pick);
        used += pick;
    }

    let total: f64 = durations.iter().sum();
    let diff = 1.0 - total;
    if let Some(last) = durations.last_mut().filter(|_| diff.abs() > eps) {
        *last += diff;
    }

    durations
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedsong_prng::SeedRng;

    /// Replays a fixed list of draws, then panics if asked for more.
    struct Scripted {
        draws: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        fn new(draws: &[f64]) -> Self {
            Scripted {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl UniformSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.draws[self.next];
            self.next += 1;
            v
        }
    }

    #[test]
    fn whole_note_fills_measure_in_one_draw() {
        let config = GeneratorConfig::default();
        // 0.0 picks index 0 of the full pool: the whole note.
        let mut rng = Scripted::new(&[0.0]);
        assert_eq!(partition_measure(&config, &mut rng), vec![1.0]);
        assert_eq!(rng.next, 1);
    }

    #[test]
    fn candidates_shrink_as_bar_fills() {
        let config = GeneratorConfig::default();
        // 0.3 * 5 -> index 1 (half). Remaining 0.5: pool [0.5, 0.25, 0.125,
        // 0.0625], 0.99 * 4 -> index 3 (sixteenth). Remaining 0.4375:
        // pool [0.25, 0.125, 0.0625], 0.0 -> quarter. Remaining 0.1875:
        // pool [0.125, 0.0625], 0.5 -> sixteenth, then 0.0 -> eighth.
        let mut rng = Scripted::new(&[0.3, 0.99, 0.0, 0.5, 0.0]);
        let durations = partition_measure(&config, &mut rng);
        assert_eq!(durations, vec![0.5, 0.0625, 0.25, 0.0625, 0.125]);
        assert_eq!(durations.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn leftover_closes_bar_when_nothing_fits() {
        let config = GeneratorConfig {
            rhythm_pool: vec![0.75],
            ..Default::default()
        };
        let mut rng = Scripted::new(&[0.0]);
        let durations = partition_measure(&config, &mut rng);
        assert_eq!(durations.len(), 2);
        assert_eq!(durations[0], 0.75);
        assert!((durations[1] - 0.25).abs() < 1e-12);
        assert_eq!(rng.next, 1);
    }

    #[test]
    fn drift_is_snapped_on_last_duration() {
        // Thirds are inexact in binary; any drift must end within epsilon.
        let third = 1.0 / 3.0;
        let config = GeneratorConfig {
            rhythm_pool: vec![third],
            ..Default::default()
        };
        let mut rng = Scripted::new(&[0.0, 0.0, 0.0]);
        let durations = partition_measure(&config, &mut rng);
        assert_eq!(durations.len(), 3);
        let total: f64 = durations.iter().sum();
        assert!((total - 1.0).abs() <= config.epsilon);
    }

    #[test]
    fn seeded_measures_always_sum_to_one() {
        let config = GeneratorConfig::default();
        let mut rng = SeedRng::from_text("partition");
        for _ in 0..500 {
            let durations = partition_measure(&config, &mut rng);
            assert!(!durations.is_empty());
            assert!(durations.iter().all(|&d| d > 0.0));
            let total: f64 = durations.iter().sum();
            assert!((total - 1.0).abs() <= 1e-6, "measure summed to {total}");
            for d in &durations {
                assert!(config.rhythm_pool.contains(d), "{d} not from pool");
            }
        }
    }
}

//! Stochastic synthesis of multi-day traffic profiles.
//!
//! The simulator turns two empirical distributions — a pool of observed call
//! holding times and a normalized intraday call-intensity shape — into one
//! deterministic base profile plus N independently perturbed synthetic days.
//! Each synthetic day varies the total call volume, bootstraps a fresh mean
//! holding time, shifts the intraday shape, and allocates calls to minutes
//! with an exact multinomial draw, so the later confidence interval reflects
//! genuinely stochastic days.

use anyhow::{bail, Context, Result};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Normal};

use crate::core::domain::{DayProfile, IntensityProfile};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Tunable parameters of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    /// Number of synthetic days to generate (the base profile is extra).
    pub day_count: usize,
    /// Coefficient of variation of the daily call volume.
    pub volume_cv: f64,
    /// Maximum circular shift of the intraday shape, in minutes either way.
    pub max_shift_minutes: i64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            day_count: 31,
            volume_cv: 0.05,
            max_shift_minutes: 120,
        }
    }
}

/// Profiles produced by one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Deterministic expectation profile derived from the raw inputs.
    pub base_profile: DayProfile,
    /// Independently perturbed synthetic days.
    pub synthetic_profiles: Vec<DayProfile>,
}

impl SimulationOutcome {
    /// All profiles in storage order: the base profile first.
    pub fn into_profiles(self) -> Vec<DayProfile> {
        let mut profiles = Vec::with_capacity(1 + self.synthetic_profiles.len());
        profiles.push(self.base_profile);
        profiles.extend(self.synthetic_profiles);
        profiles
    }
}

/// Generates a population of synthetic day profiles.
pub struct TrafficSimulator {
    options: SimulationOptions,
}

impl TrafficSimulator {
    pub fn new(options: SimulationOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::new(SimulationOptions::default())
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Runs one simulation: a base profile plus `day_count` synthetic days.
    ///
    /// `holding_times` are observed call durations in seconds and must be a
    /// non-empty collection of positive values; `intensity` is the normalized
    /// intraday shape. All randomness comes from the injected `rng`, so a
    /// seeded generator reproduces the run exactly.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        holding_times: &[f64],
        intensity: &IntensityProfile,
        rng: &mut R,
    ) -> Result<SimulationOutcome> {
        if holding_times.is_empty() {
            bail!("Holding-time sample is empty");
        }
        if holding_times.iter().any(|&t| !t.is_finite() || t <= 0.0) {
            bail!("Holding-time sample contains non-positive values");
        }

        let call_count = holding_times.len() as u64;
        let mean_holding_minutes = mean(holding_times) / SECONDS_PER_MINUTE;

        // Erlang relation: traffic = call count x mean holding time.
        let base_values = intensity
            .values()
            .iter()
            .map(|&p| p * call_count as f64 * mean_holding_minutes)
            .collect();
        let base_profile = DayProfile::from_values(base_values)?;

        let mut synthetic_profiles = Vec::with_capacity(self.options.day_count);
        for day in 0..self.options.day_count {
            let profile = self
                .simulate_day(holding_times, intensity, call_count, rng)
                .with_context(|| format!("Failed to synthesize day {}", day + 1))?;
            synthetic_profiles.push(profile);
        }

        log::debug!(
            "Simulated {} synthetic days from {} observed calls",
            synthetic_profiles.len(),
            call_count
        );
        Ok(SimulationOutcome {
            base_profile,
            synthetic_profiles,
        })
    }

    fn simulate_day<R: Rng + ?Sized>(
        &self,
        holding_times: &[f64],
        intensity: &IntensityProfile,
        base_call_count: u64,
        rng: &mut R,
    ) -> Result<DayProfile> {
        // Daily volume drawn around the observed total, never below one call.
        let mean_volume = base_call_count as f64;
        let volume_noise = Normal::new(mean_volume, self.options.volume_cv * mean_volume)
            .context("Invalid daily-volume distribution parameters")?;
        let drawn = volume_noise.sample(rng).round();
        let call_count = if drawn.is_finite() && drawn >= 1.0 {
            drawn as u64
        } else {
            1
        };

        // Bootstrap a fresh mean holding time from the observed pool.
        let resampled_total: f64 = (0..call_count)
            .map(|_| holding_times[rng.random_range(0..holding_times.len())])
            .sum();
        let holding_minutes = resampled_total / call_count as f64 / SECONDS_PER_MINUTE;

        // The day's surge may come earlier or later than the base shape.
        let shift = rng.random_range(-self.options.max_shift_minutes..=self.options.max_shift_minutes);
        let shifted = intensity.roll(shift);

        let counts = multinomial_draw(rng, call_count, shifted.values())?;
        let values = counts.iter().map(|&c| c as f64 * holding_minutes).collect();
        Ok(DayProfile::from_values(values)?)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Draws per-bin counts from `Multinomial(total, pmf)`.
///
/// Uses the conditional-binomial decomposition, so the returned counts always
/// sum to `total` exactly.
fn multinomial_draw<R: Rng + ?Sized>(rng: &mut R, total: u64, pmf: &[f64]) -> Result<Vec<u64>> {
    let mut counts = vec![0u64; pmf.len()];
    let mut remaining = total;
    let mut mass_left: f64 = pmf.iter().sum();

    for (count, &p) in counts.iter_mut().zip(pmf) {
        if remaining == 0 {
            break;
        }
        if p <= 0.0 {
            continue;
        }
        if p >= mass_left {
            // Final bin carrying probability mass: takes everything left.
            *count = remaining;
            remaining = 0;
            break;
        }
        let draw = Binomial::new(remaining, (p / mass_left).clamp(0.0, 1.0))
            .context("Invalid binomial parameters in multinomial draw")?
            .sample(rng);
        *count = draw;
        remaining -= draw;
        mass_left -= p;
    }

    // Floating-point residue in `mass_left` can leave a few undistributed
    // calls; they belong to the last bin with positive mass.
    if remaining > 0 {
        if let Some(last) = pmf.iter().rposition(|&p| p > 0.0) {
            counts[last] += remaining;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::MINUTES_PER_DAY;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn base_profile_encodes_erlang_relation() {
        // 2 calls with a 150 s mean give 2 * 2.5 Erlang-minutes spread
        // uniformly over the day.
        let simulator = TrafficSimulator::new(SimulationOptions {
            day_count: 0,
            ..SimulationOptions::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = simulator
            .simulate(&[120.0, 180.0], &IntensityProfile::uniform(), &mut rng)
            .unwrap();

        let expected = 2.0 * 2.5 / MINUTES_PER_DAY as f64;
        for &value in outcome.base_profile.values() {
            assert!((value - expected).abs() < 1e-12);
        }
        let total = outcome.base_profile.total_erlang_minutes();
        assert!((total - 5.0).abs() < 1e-9);
        assert!(outcome.synthetic_profiles.is_empty());
    }

    #[test]
    fn base_profile_total_matches_input_mass_for_skewed_shape() {
        let mut weights = vec![0.0; MINUTES_PER_DAY];
        weights[600] = 3.0;
        weights[601] = 1.0;
        let intensity = IntensityProfile::from_values(weights).unwrap();

        let simulator = TrafficSimulator::new(SimulationOptions {
            day_count: 0,
            ..SimulationOptions::default()
        });
        let mut rng = StdRng::seed_from_u64(2);
        let outcome = simulator
            .simulate(&[60.0, 60.0, 60.0], &intensity, &mut rng)
            .unwrap();

        // sum(base) == C * mean holding minutes since the pmf sums to 1.
        let total = outcome.base_profile.total_erlang_minutes();
        assert!((total - 3.0).abs() < 1e-9);
        assert!((outcome.base_profile.values()[600] - 2.25).abs() < 1e-9);
    }

    #[test]
    fn synthetic_days_carry_positive_traffic() {
        // Even a violently noisy volume draw is floored at one call.
        let simulator = TrafficSimulator::new(SimulationOptions {
            day_count: 25,
            volume_cv: 5.0,
            max_shift_minutes: 120,
        });
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = simulator
            .simulate(&[60.0], &IntensityProfile::uniform(), &mut rng)
            .unwrap();

        assert_eq!(outcome.synthetic_profiles.len(), 25);
        for profile in &outcome.synthetic_profiles {
            assert!(profile.total_erlang_minutes() > 0.0);
        }
    }

    #[test]
    fn synthetic_day_total_is_call_count_times_holding_time() {
        // With a single-value holding pool the bootstrap mean is exact, so
        // each day's total must be an integer multiple of it.
        let simulator = TrafficSimulator::new(SimulationOptions {
            day_count: 10,
            ..SimulationOptions::default()
        });
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = simulator
            .simulate(&[90.0; 500], &IntensityProfile::uniform(), &mut rng)
            .unwrap();

        let holding_minutes = 1.5;
        for profile in &outcome.synthetic_profiles {
            let calls = profile.total_erlang_minutes() / holding_minutes;
            assert!((calls - calls.round()).abs() < 1e-6);
            assert!(calls.round() >= 1.0);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let simulator = TrafficSimulator::new(SimulationOptions {
            day_count: 5,
            ..SimulationOptions::default()
        });
        let holding: Vec<f64> = (1..=200).map(|i| 30.0 + (i % 17) as f64).collect();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let outcome_a = simulator
            .simulate(&holding, &IntensityProfile::uniform(), &mut rng_a)
            .unwrap();
        let outcome_b = simulator
            .simulate(&holding, &IntensityProfile::uniform(), &mut rng_b)
            .unwrap();

        assert_eq!(outcome_a.base_profile, outcome_b.base_profile);
        assert_eq!(outcome_a.synthetic_profiles, outcome_b.synthetic_profiles);
    }

    #[test]
    fn rejects_empty_and_non_positive_holding_times() {
        let simulator = TrafficSimulator::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(simulator
            .simulate(&[], &IntensityProfile::uniform(), &mut rng)
            .is_err());
        assert!(simulator
            .simulate(&[120.0, -3.0], &IntensityProfile::uniform(), &mut rng)
            .is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn multinomial_conserves_total(
            total in 1u64..2000,
            weights in proptest::collection::vec(0.0f64..1.0, 50),
            seed in proptest::prelude::any::<u64>(),
        ) {
            let sum: f64 = weights.iter().sum();
            prop_assume!(sum > 0.0);
            let pmf: Vec<f64> = weights.iter().map(|w| w / sum).collect();

            let mut rng = StdRng::seed_from_u64(seed);
            let counts = multinomial_draw(&mut rng, total, &pmf).unwrap();
            prop_assert_eq!(counts.iter().sum::<u64>(), total);
        }

        #[test]
        fn multinomial_respects_zero_mass_bins(
            total in 1u64..500,
            seed in proptest::prelude::any::<u64>(),
        ) {
            let pmf = [0.0, 0.5, 0.0, 0.5, 0.0];
            let mut rng = StdRng::seed_from_u64(seed);
            let counts = multinomial_draw(&mut rng, total, &pmf).unwrap();
            prop_assert_eq!(counts[0], 0);
            prop_assert_eq!(counts[2], 0);
            prop_assert_eq!(counts[4], 0);
            prop_assert_eq!(counts.iter().sum::<u64>(), total);
        }
    }
}

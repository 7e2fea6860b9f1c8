//! Cleaning profile fitter
//!
//! Gantree: L5_Clean → Fitter
//!
//! Local search over the flat coefficient list: nudge one coefficient at
//! a time and keep the nudge only if the corpus-wide quality improves
//! under the lexicographic order of [`Quality::better_than`].

use crate::corpus::{corpus_qubits, GameSample};
use crate::profile::{CleaningProfile, ProfileSet};
use crate::quality::{calculate_quality, Quality};
use qaw_core::constants::cleaning::{DEFAULT_ITERATIONS, DEFAULT_STEP, NEUTRAL};
use qaw_core::{PairMap, QawError, QawResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitter configuration
/// Gantree: FitConfig // 피팅 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Number of perturbations tried
    /// Gantree: iterations: usize // 반복 (2000)
    pub iterations: usize,

    /// Perturbations are uniform in `[-step, step]`
    /// Gantree: step: f64 // 스텝 크기 (0.05)
    pub step: f64,

    /// Starting coefficients for every qubit
    pub initial: [f64; 3],

    /// Pairs at or below this information are never used as partners
    pub min_information: f64,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,
}

impl FitConfig {
    /// Builder: set iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder: set step size
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Builder: set starting coefficients
    pub fn with_initial(mut self, initial: [f64; 3]) -> Self {
        self.initial = initial;
        self
    }

    /// Builder: set partner information threshold
    pub fn with_min_information(mut self, min_information: f64) -> Self {
        self.min_information = min_information;
        self
    }

    /// Builder: set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> QawResult<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(QawError::InvalidConfig(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.initial.iter().any(|c| !c.is_finite()) {
            return Err(QawError::InvalidConfig(
                "initial coefficients must be finite".into(),
            ));
        }
        if self.min_information.is_nan() {
            return Err(QawError::InvalidConfig(
                "min_information must be a number".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            step: DEFAULT_STEP,
            initial: NEUTRAL,
            min_information: 0.0,
            seed: None,
        }
    }
}

impl fmt::Display for FitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FitConfig(iterations={}, step={:.3}, initial={:?})",
            self.iterations, self.step, self.initial
        )
    }
}

/// Result of fitting one round
/// Gantree: FitOutcome // 피팅 결과
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Best profile seen
    pub profile: CleaningProfile,
    /// Its quality
    pub quality: Quality,
    /// Quality of the starting profile
    pub initial_quality: Quality,
    /// Number of accepted perturbations
    pub accepted: usize,
}

// ============================================================================
// Fitting
// ============================================================================

/// Fit a cleaning profile for one round
/// Gantree: fit(corpus, pairs, round, config) -> QawResult<FitOutcome> // 계수 피팅
pub fn fit(
    corpus: &[GameSample],
    pairs: &PairMap,
    round: usize,
    config: &FitConfig,
) -> QawResult<FitOutcome> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    fit_with_rng(corpus, pairs, round, config, &mut rng)
}

/// Fit with an injected random source
pub fn fit_with_rng<R: Rng + ?Sized>(
    corpus: &[GameSample],
    pairs: &PairMap,
    round: usize,
    config: &FitConfig,
    rng: &mut R,
) -> QawResult<FitOutcome> {
    let num_qubits = corpus_qubits(corpus)?;
    let score = |x: &CleaningProfile| {
        calculate_quality(Some(x), corpus, pairs, round, config.min_information)
    };

    let mut current = CleaningProfile::uniform(num_qubits, config.initial);
    let mut current_quality = score(&current)?;
    let initial_quality = current_quality;
    let mut best = current.clone();
    let mut best_quality = current_quality;
    let mut accepted = 0;

    if current.is_empty() {
        return Ok(FitOutcome {
            profile: best,
            quality: best_quality,
            initial_quality,
            accepted,
        });
    }

    for _ in 0..config.iterations {
        let index = rng.gen_range(0..current.len());
        let delta = rng.gen_range(-config.step..=config.step);

        let mut candidate = current.clone();
        candidate.perturb(index, delta);
        let quality = score(&candidate)?;

        if quality.better_than(&current_quality) {
            current = candidate;
            current_quality = quality;
            accepted += 1;
            if current_quality.better_than(&best_quality) {
                best = current.clone();
                best_quality = current_quality;
            }
        }
    }

    log::info!(
        "round {} fitted: {} -> {} ({} accepted)",
        round,
        initial_quality,
        best_quality,
        accepted
    );
    Ok(FitOutcome {
        profile: best,
        quality: best_quality,
        initial_quality,
        accepted,
    })
}

/// Fit one profile per round
/// Gantree: fit_all_rounds(corpus, pairs, max_score, config) -> QawResult<ProfileSet> // 전체 피팅
///
/// Round `r` is seeded with `seed + r` when a seed is given.
pub fn fit_all_rounds(
    corpus: &[GameSample],
    pairs: &PairMap,
    max_score: usize,
    config: &FitConfig,
) -> QawResult<ProfileSet> {
    let mut rounds = Vec::with_capacity(max_score);
    for round in 1..=max_score {
        let mut round_config = config.clone();
        round_config.seed = config.seed.map(|s| s.wrapping_add(round as u64));
        rounds.push(fit(corpus, pairs, round, &round_config)?.profile);
    }
    Ok(ProfileSet::new(rounds))
}

// ============================================================================
// Tests
// ============================================================================

//! Puzzle sources
//!
//! Gantree: L7_Game → PuzzleSource
//!
//! Where a round's statistics come from. A live source draws a hidden
//! pairing, runs the accumulated circuit and extracts statistics; a
//! replay source reads them from stored games.

use crate::config::GameConfig;
use crate::state::{GameState, Puzzle};
use qaw_backend::Executor;
use qaw_circuit::{build_circuit, GateSet};
use qaw_core::{DeviceDescriptor, QawError, QawResult};
use qaw_matching::random_matching;
use qaw_stats::{extract, Extraction};
use rand::{Rng, RngCore};

/// Producer of round puzzles
/// Gantree: PuzzleSource // trait
pub trait PuzzleSource {
    /// Puzzle for round `round` (1-based) given the history so far
    fn next_puzzle(
        &mut self,
        round: usize,
        state: &GameState,
        device: &DeviceDescriptor,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> QawResult<Puzzle>;

    /// Rounds this source can provide, if limited
    fn rounds_available(&self) -> Option<usize> {
        None
    }
}

/// Fresh puzzles run on an executor
/// Gantree: LiveSource<E> // 실시간 퍼즐
#[derive(Debug, Clone)]
pub struct LiveSource<E> {
    executor: E,
}

impl<E: Executor> LiveSource<E> {
    /// Create from an executor
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Underlying executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Random pairing with a random fraction per pair
    /// Gantree: draw_gates(device, config, rng) -> GateSet // 퍼즐 생성
    pub fn draw_gates<R: Rng + ?Sized>(
        device: &DeviceDescriptor,
        config: &GameConfig,
        rng: &mut R,
    ) -> GateSet {
        random_matching(device.pairs(), rng)
            .into_iter()
            .map(|name| {
                let u: f64 = rng.gen();
                (name, config.puzzle_frac(u))
            })
            .collect()
    }
}

impl<E: Executor> PuzzleSource for LiveSource<E> {
    fn next_puzzle(
        &mut self,
        round: usize,
        state: &GameState,
        device: &DeviceDescriptor,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> QawResult<Puzzle> {
        if self.executor.context().mode != config.mode {
            log::warn!(
                "executor {} runs {} but the game is configured for {}",
                self.executor.name(),
                self.executor.context().mode,
                config.mode
            );
        }

        let applied = Self::draw_gates(device, config, rng);
        let mut gates = state.gates().to_vec();
        gates.push(applied.clone());
        let ops = build_circuit(&gates, state.conjugates(), device)?;
        log::debug!("round {}: {} operations", round, ops.len());

        let raw = self.executor.execute(&ops, device, config.shots)?;
        let snapshot = match extract(&raw, device, config.shots, rng)? {
            Extraction::Measured(snapshot) => snapshot,
            Extraction::Pending(handle) => {
                return Err(QawError::BackendError(format!(
                    "job {} has no results yet",
                    handle
                )))
            }
        };

        Ok(Puzzle {
            round,
            truth: applied.keys().cloned().collect(),
            applied,
            one_prob: snapshot.one_prob.clone(),
            raw_one_prob: snapshot.one_prob,
            same_prob: snapshot.same_prob,
            results: Some(snapshot.results),
            correlated: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaw_backend::{BackendContext, SimulatorExecutor};
    use qaw_circuit::Operation;
    use qaw_core::{get_device, is_helper_pair, RunMode};
    use qaw_stats::RawResult;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct PendingExecutor(BackendContext);

    impl Executor for PendingExecutor {
        fn context(&self) -> &BackendContext {
            &self.0
        }

        fn execute(&self, _: &[Operation], _: &DeviceDescriptor, _: u64) -> QawResult<RawResult> {
            Ok(RawResult::Pending("job-42".into()))
        }
    }

    #[test]
    fn test_drawn_gates_in_range() {
        let device = get_device("8Q-Wallraff").unwrap();
        let config = GameConfig::simulated();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let gates = LiveSource::<SimulatorExecutor>::draw_gates(&device, &config, &mut rng);
            assert!(!gates.is_empty());
            for (name, &frac) in &gates {
                assert!(!is_helper_pair(name));
                assert!((0.05..0.5).contains(&frac));
            }
        }
    }

    #[test]
    fn test_live_puzzle() {
        let device = get_device("ladder4").unwrap();
        let config = GameConfig::simulated().with_shots(500);
        let mut source = LiveSource::new(SimulatorExecutor::new());
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let puzzle = source
            .next_puzzle(1, &GameState::new(), &device, &config, &mut rng)
            .unwrap();
        assert_eq!(puzzle.round, 1);
        assert_eq!(puzzle.truth.len(), 2);
        assert_eq!(puzzle.one_prob.len(), 4);
        assert!(puzzle.results.is_some());
    }

    #[test]
    fn test_pending_is_backend_error() {
        let device = get_device("line3").unwrap();
        let config = GameConfig::real();
        let mut source = LiveSource::new(PendingExecutor(BackendContext::new("queue", RunMode::Real)));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = source
            .next_puzzle(1, &GameState::new(), &device, &config, &mut rng)
            .unwrap_err();
        assert!(err.is_transient());
        assert!(err.to_string().contains("job-42"));
    }
}

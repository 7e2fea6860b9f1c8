//! Round engine
//!
//! Gantree: L7_Game → RoundEngine
//!
//! State machine of one game:
//!
//! ```text
//! AwaitingPuzzle -> AwaitingGuess -> Scoring -> AwaitingPuzzle | GameOver
//! ```
//!
//! Rounds run strictly one after another; each puzzle depends on the whole
//! history of the rounds before it.

use crate::config::GameConfig;
use crate::guess::{automatic_guess, manual_guess, Player, ScriptedPlayer};
use crate::render::{LogRenderer, Renderer};
use crate::source::PuzzleSource;
use crate::state::{GameState, Guess, Puzzle, RoundRecord};
use qaw_circuit::{random_layer, GateSet};
use qaw_core::{frac_from_prob, is_helper_pair, DeviceDescriptor, MoveMode, QawError, QawResult};
use qaw_matching::matching_from_one_prob;
use qaw_stats::{calculate_fuzz, correct_guesses, correctness};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Engine phase
/// Gantree: Phase // 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Next call draws a puzzle
    AwaitingPuzzle,
    /// Puzzle shown, waiting for a guess
    AwaitingGuess,
    /// Guess accepted, waiting to be scored
    Scoring,
    /// Terminal
    GameOver,
}

/// Round state machine
/// Gantree: RoundEngine<S> // 라운드 엔진
pub struct RoundEngine<S> {
    device: DeviceDescriptor,
    config: GameConfig,
    source: S,
    rng: ChaCha8Rng,
    max_score: usize,
    phase: Phase,
    state: GameState,
    puzzle: Option<Puzzle>,
    guess: Option<Guess>,
}

impl<S: PuzzleSource> RoundEngine<S> {
    /// Start a game
    pub fn new(device: DeviceDescriptor, config: GameConfig, source: S) -> QawResult<Self> {
        config.validate()?;
        let max_score = match source.rounds_available() {
            Some(available) => config.max_score.min(available),
            None => config.max_score,
        };
        if max_score == 0 {
            return Err(QawError::MissingData {
                what: format!("no rounds available on {}", device.name()),
            });
        }
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        log::info!("game start on {}: {}", device.name(), config);
        Ok(Self {
            device,
            config,
            source,
            rng,
            max_score,
            phase: Phase::AwaitingPuzzle,
            state: GameState::new(),
            puzzle: None,
            guess: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recorded history
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Puzzle of the round in play
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Device
    pub fn device(&self) -> &DeviceDescriptor {
        &self.device
    }

    /// Configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Rounds this game will run at most
    pub fn max_score(&self) -> usize {
        self.max_score
    }

    /// Check if terminal
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Puzzle source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn expect_phase(&self, expected: Phase) -> QawResult<()> {
        if self.phase != expected {
            return Err(QawError::InvalidConfig(format!(
                "engine is {:?}, expected {:?}",
                self.phase, expected
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// AwaitingPuzzle → AwaitingGuess
    /// Gantree: next_puzzle() -> QawResult<&Puzzle> // 퍼즐 생성
    ///
    /// On failure nothing is recorded and the engine stays put.
    pub fn next_puzzle(&mut self) -> QawResult<&Puzzle> {
        self.expect_phase(Phase::AwaitingPuzzle)?;
        let round = self.state.score() + 1;
        let puzzle = self.source.next_puzzle(
            round,
            &self.state,
            &self.device,
            &self.config,
            &mut self.rng,
        )?;

        self.state = std::mem::take(&mut self.state).with_puzzle(&puzzle);
        self.phase = Phase::AwaitingGuess;
        log::debug!("round {}: puzzle ready", round);
        Ok(&*self.puzzle.insert(puzzle))
    }

    /// AwaitingGuess → Scoring
    /// Gantree: submit_guess(guess) -> QawResult<()> // 추측 제출
    pub fn submit_guess(&mut self, guess: Guess) -> QawResult<()> {
        self.expect_phase(Phase::AwaitingGuess)?;
        for name in &guess.pairs {
            if is_helper_pair(name) || !self.device.pairs().contains_key(name) {
                return Err(QawError::InvalidGuess(format!("'{}' is not a pair", name)));
            }
        }
        self.guess = Some(guess);
        self.phase = Phase::Scoring;
        Ok(())
    }

    /// Scoring → AwaitingPuzzle | GameOver
    /// Gantree: score_round() -> QawResult<RoundRecord> // 채점
    pub fn score_round(&mut self) -> QawResult<RoundRecord> {
        self.expect_phase(Phase::Scoring)?;
        let (Some(puzzle), Some(guess)) = (self.puzzle.take(), self.guess.take()) else {
            return Err(QawError::InvalidConfig("scoring without a puzzle".into()));
        };
        let pairs = self.device.pairs();

        let mut removal = GateSet::new();
        for name in &guess.pairs {
            let frac = match puzzle.applied.get(name) {
                Some(&applied) if self.config.removes_true_frac() => applied,
                _ => {
                    let pair = self.device.pair(name)?;
                    let read = |q: usize| puzzle.one_prob.get(q).copied().unwrap_or(0.0);
                    frac_from_prob((read(pair.control) + read(pair.target)) / 2.0)
                }
            };
            removal.insert(name.clone(), self.config.removal_frac(frac));
        }

        let record = RoundRecord {
            round: puzzle.round,
            bot: matching_from_one_prob(pairs, &puzzle.one_prob),
            correct: correct_guesses(&guess.pairs, &puzzle.truth).len(),
            fuzz: calculate_fuzz(&puzzle.one_prob, pairs, &puzzle.truth)?,
            correctness: correctness(&guess.pairs, &puzzle.truth),
            truth: puzzle.truth,
            guess: guess.pairs,
            removal,
        };
        let layer = random_layer(self.device.num_qubits(), &mut self.rng);

        log::info!("{}", record);
        self.state = std::mem::take(&mut self.state).with_round(layer, record.clone());
        self.phase = if guess.restart || self.state.score() >= self.max_score {
            log::info!(
                "game over after {} rounds: {} pairs correct",
                self.state.score(),
                self.state.total_correct()
            );
            Phase::GameOver
        } else {
            Phase::AwaitingPuzzle
        };
        Ok(record)
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Run one full round
    /// Gantree: play_round(player, renderer) -> QawResult<RoundRecord> // 라운드 진행
    pub fn play_round(
        &mut self,
        player: &mut dyn Player,
        renderer: &mut dyn Renderer,
    ) -> QawResult<RoundRecord> {
        self.next_puzzle()?;
        let puzzle = self
            .puzzle
            .as_ref()
            .ok_or_else(|| QawError::InvalidConfig("no puzzle in play".into()))?;

        let guess = match self.config.move_mode {
            MoveMode::Manual => manual_guess(player, renderer, &self.device, puzzle),
            mode => automatic_guess(mode, puzzle, &self.device, &mut self.rng)?,
        };
        self.submit_guess(guess)?;
        self.score_round()
    }

    /// Run rounds until the game is over
    /// Gantree: play(player, renderer) -> QawResult<()> // 게임 진행
    pub fn play(&mut self, player: &mut dyn Player, renderer: &mut dyn Renderer) -> QawResult<()> {
        while !self.is_over() {
            self.play_round(player, renderer)?;
        }
        Ok(())
    }

    /// Run a game with an automatic move mode
    pub fn play_auto(&mut self) -> QawResult<()> {
        if self.config.move_mode == MoveMode::Manual {
            return Err(QawError::InvalidConfig(
                "manual moves need a player".into(),
            ));
        }
        self.play(&mut ScriptedPlayer::default(), &mut LogRenderer)
    }

    /// End the game and hand over its record
    pub fn finish(self) -> GameState {
        self.state
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LiveSource;
    use approx::assert_abs_diff_eq;
    use qaw_backend::SimulatorExecutor;
    use qaw_core::{get_device, prob_from_frac};

    fn engine(name: &str, config: GameConfig) -> RoundEngine<LiveSource<SimulatorExecutor>> {
        let device = get_device(name).unwrap();
        RoundEngine::new(device, config, LiveSource::new(SimulatorExecutor::new())).unwrap()
    }

    #[test]
    fn test_phases() {
        let mut e = engine("line5", GameConfig::simulated().with_max_score(2).with_seed(1));
        assert_eq!(e.phase(), Phase::AwaitingPuzzle);
        assert!(e.score_round().is_err());

        let truth = e.next_puzzle().unwrap().truth.clone();
        assert_eq!(e.phase(), Phase::AwaitingGuess);
        assert!(e.next_puzzle().is_err());

        e.submit_guess(Guess::new(truth)).unwrap();
        assert_eq!(e.phase(), Phase::Scoring);
        let record = e.score_round().unwrap();
        assert_eq!(record.round, 1);
        assert_abs_diff_eq!(record.correctness, 1.0);
        assert_eq!(e.phase(), Phase::AwaitingPuzzle);

        e.next_puzzle().unwrap();
        e.submit_guess(Guess::default()).unwrap();
        e.score_round().unwrap();
        assert!(e.is_over());

        let state = e.finish();
        assert_eq!(state.gates().len(), 4);
        assert_eq!(state.conjugates().len(), 2);
        assert_eq!(state.one_probs().len(), 2);
    }

    #[test]
    fn test_invalid_guess_rejected() {
        let mut e = engine("line5", GameConfig::simulated().with_seed(2));
        e.next_puzzle().unwrap();
        let bad = Guess::new(["Q".to_string()].into_iter().collect());
        assert!(matches!(e.submit_guess(bad), Err(QawError::InvalidGuess(_))));
        assert_eq!(e.phase(), Phase::AwaitingGuess);
    }

    #[test]
    fn test_restart_ends_game() {
        let mut e = engine("line5", GameConfig::simulated().with_max_score(5).with_seed(3));
        e.next_puzzle().unwrap();
        e.submit_guess(Guess::restart()).unwrap();
        e.score_round().unwrap();
        assert!(e.is_over());
        assert_eq!(e.state().score(), 1);
    }

    #[test]
    fn test_correct_play_on_simulator() {
        let config = GameConfig::simulated()
            .with_max_score(4)
            .with_shots(4000)
            .with_seed(5);
        let mut e = engine("ladder4", config);
        e.play_auto().unwrap();
        let state = e.finish();

        assert_eq!(state.score(), 4);
        assert_eq!(state.gates().len(), 8);
        for record in state.rounds() {
            assert_eq!(record.correct, record.truth.len());
            assert_eq!(record.removal.len(), record.truth.len());
        }
        // Removal is close to the negated applied fraction
        for r in 0..4 {
            for (name, &applied) in &state.gates()[2 * r] {
                let removed = state.gates()[2 * r + 1][name];
                assert!((removed + applied).abs() < 0.1, "{} {} {}", name, applied, removed);
            }
        }
    }

    #[test]
    fn test_true_frac_on_hardware() {
        // Simulator standing in for hardware
        let config = GameConfig::real().with_max_score(1).with_seed(6).with_bias(0.01);
        let mut e = engine("line3", config);
        e.play_auto().unwrap();
        let state = e.finish();
        let (applied, removal) = (&state.gates()[0], &state.gates()[1]);
        for (name, &frac) in applied {
            assert_abs_diff_eq!(removal[name], -(frac + 0.01), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_removal_from_statistics() {
        let config = GameConfig::simulated().with_max_score(1).with_shots(20_000).with_seed(7);
        let mut e = engine("line3", config);
        let puzzle = e.next_puzzle().unwrap().clone();
        e.submit_guess(Guess::new(puzzle.truth.clone())).unwrap();
        let record = e.score_round().unwrap();
        for (name, &frac) in &puzzle.applied {
            let pair = e.device().pair(name).unwrap();
            let p = prob_from_frac(frac);
            assert!((puzzle.one_prob[pair.control] - p).abs() < 0.02);
            assert_abs_diff_eq!(record.removal[name], -frac, epsilon = 0.03);
        }
    }

    #[test]
    fn test_manual_mode_needs_player() {
        let mut e = engine("line3", GameConfig::simulated().with_move(MoveMode::Manual));
        assert!(e.play_auto().is_err());
    }

    #[test]
    fn test_seeded_games_repeat() {
        let config = GameConfig::simulated()
            .with_move(MoveMode::Random)
            .with_max_score(3)
            .with_seed(11);
        let mut a = engine("ladder8", config.clone());
        let mut b = engine("ladder8", config);
        a.play_auto().unwrap();
        b.play_auto().unwrap();
        assert_eq!(a.finish(), b.finish());
    }
}

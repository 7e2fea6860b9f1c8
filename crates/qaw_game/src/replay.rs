//! Replay of stored games
//!
//! Gantree: L7_Game → Replay
//!
//! Plays against statistics recorded by an earlier move-C run instead of
//! running new circuits. Ground truth is the stored creating gate set.

use crate::config::GameConfig;
use crate::source::PuzzleSource;
use crate::state::{GameState, Puzzle};
use crate::store::{ResultsStore, RunKey};
use qaw_clean::{clean, GameSample, ProfileSet};
use qaw_core::{DeviceDescriptor, MoveMode, QawError, QawResult};
use qaw_matching::find_matching;
use qaw_stats::mutual_information;
use rand::{Rng, RngCore};

/// Puzzles read from one stored game
/// Gantree: ReplaySource // 재생 퍼즐
#[derive(Debug, Clone)]
pub struct ReplaySource {
    sample: GameSample,
    game: usize,
    profiles: Option<ProfileSet>,
    min_information: f64,
}

impl ReplaySource {
    /// Replay one sample, optionally cleaning every round
    pub fn new(sample: GameSample, game: usize, profiles: Option<ProfileSet>) -> Self {
        Self {
            sample,
            game,
            profiles,
            min_information: 0.0,
        }
    }

    /// Builder: set partner information threshold for cleaning
    pub fn with_min_information(mut self, min_information: f64) -> Self {
        self.min_information = min_information;
        self
    }

    /// Pick a game from a corpus, at random when `game` is `None`
    /// Gantree: from_corpus(corpus, game, profiles, rng) -> QawResult<ReplaySource> // 게임 선택
    pub fn from_corpus<R: Rng + ?Sized>(
        mut corpus: Vec<GameSample>,
        game: Option<usize>,
        profiles: Option<ProfileSet>,
        rng: &mut R,
    ) -> QawResult<Self> {
        if corpus.is_empty() {
            return Err(QawError::MissingData {
                what: "no stored games".into(),
            });
        }
        let index = game.unwrap_or_else(|| rng.gen_range(0..corpus.len()));
        if index >= corpus.len() {
            log::warn!("game {} requested, {} stored", index, corpus.len());
            return Err(QawError::MissingData {
                what: format!("game {} (only {} stored)", index, corpus.len()),
            });
        }
        Ok(Self::new(corpus.swap_remove(index), index, profiles))
    }

    /// Load from a store
    /// Gantree: load(store, device, config, game, rng) -> QawResult<ReplaySource> // 재생 준비
    ///
    /// Statistics come from the move-C records for the configured shots
    /// and mode. With `config.cleanup`, profiles stored for the configured
    /// move are used, or the gritty default.
    pub fn load<R: Rng + ?Sized>(
        store: &ResultsStore,
        device: &DeviceDescriptor,
        config: &GameConfig,
        game: Option<usize>,
        rng: &mut R,
    ) -> QawResult<Self> {
        let key = RunKey::from_config(config);
        let corpus = store.load_corpus(device.name(), &key.with_move(MoveMode::Correct))?;
        let profiles = if config.cleanup {
            let rounds = corpus.first().map(GameSample::num_rounds).unwrap_or(0);
            Some(store.cleaning_profiles(device.name(), &key, device.num_qubits(), rounds, true))
        } else {
            None
        };
        Self::from_corpus(corpus, game, profiles, rng)
    }

    /// Index of the replayed game
    pub fn game(&self) -> usize {
        self.game
    }

    /// Replayed sample
    pub fn sample(&self) -> &GameSample {
        &self.sample
    }
}

impl PuzzleSource for ReplaySource {
    fn next_puzzle(
        &mut self,
        round: usize,
        _state: &GameState,
        device: &DeviceDescriptor,
        _config: &GameConfig,
        _rng: &mut dyn RngCore,
    ) -> QawResult<Puzzle> {
        let view = self.sample.round(round)?;
        let pairs = device.pairs();

        let information = mutual_information(view.one_prob, view.same_prob, pairs)?;
        let correlated = find_matching(pairs, &information);

        let one_prob = match &self.profiles {
            Some(profiles) => clean(
                profiles.get(round)?,
                view.one_prob,
                view.same_prob,
                pairs,
                self.min_information,
            )?,
            None => view.one_prob.clone(),
        };

        Ok(Puzzle {
            round,
            truth: view.applied.keys().cloned().collect(),
            applied: view.applied.clone(),
            one_prob,
            raw_one_prob: view.one_prob.clone(),
            same_prob: view.same_prob.clone(),
            results: None,
            correlated: Some(correlated),
        })
    }

    fn rounds_available(&self) -> Option<usize> {
        Some(self.sample.num_rounds())
    }
}

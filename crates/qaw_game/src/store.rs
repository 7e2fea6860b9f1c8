//! Results store
//!
//! Gantree: L7_Game → ResultsStore
//!
//! Append-only JSON-lines files, one line per game, at
//! `<root>/<device>/<kind>_move=<M>_shots=<S>_sim=<bool>.jsonl`.

use crate::config::GameConfig;
use crate::state::GameState;
use qaw_circuit::GateSet;
use qaw_clean::{GameSample, ProfileSet};
use qaw_core::{MoveMode, OneProb, QawError, QawResult, RunMode, SameProb};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Kind of record file
/// Gantree: RecordKind // 기록 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Excitation probabilities per round
    OneProbs,
    /// Agreement probabilities per round
    SameProbs,
    /// Gate history
    Gates,
    /// Conjugation history
    Conjugates,
    /// Outcome frequencies (hardware runs only)
    Results,
    /// Fitted cleaning profiles
    Cleaner,
}

impl RecordKind {
    /// File name prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::OneProbs => "oneProbs",
            RecordKind::SameProbs => "sameProbs",
            RecordKind::Gates => "gates",
            RecordKind::Conjugates => "conjugates",
            RecordKind::Results => "results",
            RecordKind::Cleaner => "cleaner",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key of one data set
/// Gantree: RunKey // (move, shots, sim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunKey {
    /// Move mode
    pub move_mode: MoveMode,
    /// Shots per round
    pub shots: u64,
    /// Simulated or real
    pub mode: RunMode,
}

impl RunKey {
    /// Create new key
    pub fn new(move_mode: MoveMode, shots: u64, mode: RunMode) -> Self {
        Self {
            move_mode,
            shots,
            mode,
        }
    }

    /// Key a game configuration writes under
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.move_mode, config.shots, config.mode)
    }

    /// Same key with another move mode
    pub fn with_move(mut self, move_mode: MoveMode) -> Self {
        self.move_mode = move_mode;
        self
    }

    /// File name for a record kind
    pub fn file_name(&self, kind: RecordKind) -> String {
        format!(
            "{}_move={}_shots={}_sim={}.jsonl",
            kind,
            self.move_mode,
            self.shots,
            self.mode.is_simulated()
        )
    }
}

/// Directory of stored games
/// Gantree: ResultsStore // 결과 저장소
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsStore {
    root: PathBuf,
}

impl ResultsStore {
    /// Store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one record file
    pub fn path(&self, device: &str, kind: RecordKind, key: &RunKey) -> PathBuf {
        self.root.join(device).join(key.file_name(kind))
    }

    // ========================================================================
    // Raw records
    // ========================================================================

    /// Append one record as a JSON line
    /// Gantree: append(device, kind, key, record) -> QawResult<()> // 기록 추가
    pub fn append<T: Serialize>(
        &self,
        device: &str,
        kind: RecordKind,
        key: &RunKey,
        record: &T,
    ) -> QawResult<()> {
        let path = self.path(device, kind, key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Load every record of a file
    /// Gantree: load(device, kind, key) -> QawResult<Vec<T>> // 기록 읽기
    pub fn load<T: DeserializeOwned>(
        &self,
        device: &str,
        kind: RecordKind,
        key: &RunKey,
    ) -> QawResult<Vec<T>> {
        let path = self.path(device, kind, key);
        if !path.exists() {
            return Err(QawError::MissingData {
                what: format!("{}", path.display()),
            });
        }
        fs::read_to_string(&path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(QawError::from))
            .collect()
    }

    // ========================================================================
    // Games
    // ========================================================================

    /// Append one finished game
    /// Gantree: save_game(device, key, state) -> QawResult<()> // 게임 저장
    ///
    /// Frequency tables are written for hardware runs only.
    pub fn save_game(&self, device: &str, key: &RunKey, state: &GameState) -> QawResult<()> {
        self.append(device, RecordKind::OneProbs, key, &state.one_probs())?;
        self.append(device, RecordKind::SameProbs, key, &state.same_probs())?;
        self.append(device, RecordKind::Gates, key, &state.gates())?;
        self.append(device, RecordKind::Conjugates, key, &state.conjugates())?;
        if !key.mode.is_simulated() {
            self.append(device, RecordKind::Results, key, &state.results())?;
        }
        log::info!(
            "stored game ({} rounds) for {} under move={}, shots={}",
            state.score(),
            device,
            key.move_mode,
            key.shots
        );
        Ok(())
    }

    /// Load stored games as a cleaning corpus
    /// Gantree: load_corpus(device, key) -> QawResult<Vec<GameSample>> // 코퍼스 읽기
    pub fn load_corpus(&self, device: &str, key: &RunKey) -> QawResult<Vec<GameSample>> {
        let one_probs: Vec<Vec<OneProb>> = self.load(device, RecordKind::OneProbs, key)?;
        let same_probs: Vec<Vec<SameProb>> = self.load(device, RecordKind::SameProbs, key)?;
        let gates: Vec<Vec<GateSet>> = self.load(device, RecordKind::Gates, key)?;
        if one_probs.len() != same_probs.len() || one_probs.len() != gates.len() {
            return Err(QawError::MissingData {
                what: format!(
                    "{} records out of step: {} oneProbs, {} sameProbs, {} gates",
                    device,
                    one_probs.len(),
                    same_probs.len(),
                    gates.len()
                ),
            });
        }

        Ok(one_probs
            .into_iter()
            .zip(same_probs)
            .zip(gates)
            .map(|((o, s), g)| GameSample::new(o, s, g))
            .collect())
    }

    // ========================================================================
    // Cleaning profiles
    // ========================================================================

    /// Append a fitted profile set
    pub fn save_profiles(&self, device: &str, key: &RunKey, profiles: &ProfileSet) -> QawResult<()> {
        self.append(device, RecordKind::Cleaner, key, profiles)
    }

    /// First stored profile set
    pub fn load_profiles(&self, device: &str, key: &RunKey) -> QawResult<ProfileSet> {
        self.load::<ProfileSet>(device, RecordKind::Cleaner, key)?
            .into_iter()
            .next()
            .ok_or_else(|| QawError::MissingData {
                what: format!("no cleaning profiles for {}", device),
            })
    }

    /// Stored profiles, or the default set when none were fitted
    /// Gantree: cleaning_profiles(device, key, n, max_score, gritty) -> ProfileSet // 정리 프로파일
    pub fn cleaning_profiles(
        &self,
        device: &str,
        key: &RunKey,
        num_qubits: usize,
        max_score: usize,
        gritty: bool,
    ) -> ProfileSet {
        match self.load_profiles(device, key) {
            Ok(profiles) => profiles,
            Err(e) => {
                log::debug!("using default cleaning profiles: {}", e);
                ProfileSet::default_for(num_qubits, max_score, gritty)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

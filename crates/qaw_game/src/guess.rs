//! Guessing
//!
//! Gantree: L7_Game → Guess
//!
//! Automatic strategies for moves C, R and B, and the incremental
//! protocol for a manual player (move M).

use crate::render::Renderer;
use crate::state::{Guess, Puzzle};
use qaw_core::constants::puzzle::{CASE_INSENSITIVE_MAX_QUBITS, TAKEN_MARKER};
use qaw_core::{is_helper_pair, DeviceDescriptor, MoveMode, QawError, QawResult};
use qaw_matching::{matching_from_one_prob, random_matching, Matching};
use rand::Rng;
use std::collections::VecDeque;

// ============================================================================
// Automatic Moves
// ============================================================================

/// Guess for an automatic move mode
/// Gantree: automatic_guess(move, puzzle, device, rng) -> QawResult<Guess> // 자동 추측
pub fn automatic_guess<R: Rng + ?Sized>(
    move_mode: MoveMode,
    puzzle: &Puzzle,
    device: &DeviceDescriptor,
    rng: &mut R,
) -> QawResult<Guess> {
    let pairs = match move_mode {
        MoveMode::Correct => puzzle.truth.clone(),
        MoveMode::Random => random_matching(device.pairs(), rng),
        MoveMode::Bot => matching_from_one_prob(device.pairs(), &puzzle.one_prob),
        MoveMode::Manual => {
            return Err(QawError::InvalidConfig(
                "manual moves need a player".into(),
            ))
        }
    };
    Ok(Guess::new(pairs))
}

// ============================================================================
// Manual Play
// ============================================================================

/// One input from a manual player
/// Gantree: PlayerInput // Pair/Done/Restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A pair name, as typed
    Pair(String),
    /// Stop choosing for this round
    Done,
    /// Abandon the game
    Restart,
}

impl PlayerInput {
    /// Interpret a typed line
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("done") {
            PlayerInput::Done
        } else if line.eq_ignore_ascii_case("restart") {
            PlayerInput::Restart
        } else {
            PlayerInput::Pair(line.to_string())
        }
    }
}

/// Source of manual inputs
/// Gantree: Player // trait
pub trait Player {
    /// Next input, given the snapshot currently shown
    fn next_input(&mut self, round: usize, displayed: &[f64]) -> PlayerInput;

    /// Told when an input was rejected; it will be asked again
    fn rejected(&mut self, _error: &QawError) {}
}

/// Player reading from a fixed list of typed lines
/// Gantree: ScriptedPlayer // 스크립트 입력
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    lines: VecDeque<String>,
    rejections: usize,
}

impl ScriptedPlayer {
    /// Create from lines; answers `done` once they run out
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            rejections: 0,
        }
    }

    /// Number of rejected inputs so far
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl Player for ScriptedPlayer {
    fn next_input(&mut self, _round: usize, _displayed: &[f64]) -> PlayerInput {
        self.lines
            .pop_front()
            .map(|line| PlayerInput::parse(&line))
            .unwrap_or(PlayerInput::Done)
    }

    fn rejected(&mut self, error: &QawError) {
        log::debug!("rejected: {}", error);
        self.rejections += 1;
    }
}

/// Incremental pair selection for one round
/// Gantree: GuessSession // 수동 선택 세션
#[derive(Debug, Clone)]
pub struct GuessSession<'a> {
    device: &'a DeviceDescriptor,
    displayed: Vec<f64>,
    chosen: Matching,
}

impl<'a> GuessSession<'a> {
    /// Start from the snapshot shown to the player
    pub fn new(device: &'a DeviceDescriptor, one_prob: &[f64]) -> Self {
        Self {
            device,
            displayed: one_prob.to_vec(),
            chosen: Matching::new(),
        }
    }

    /// Pair name as the device spells it
    fn normalize(&self, name: &str) -> String {
        let name = name.trim();
        if self.device.num_qubits() <= CASE_INSENSITIVE_MAX_QUBITS {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }

    /// Select a pair
    /// Gantree: choose(name) -> QawResult<()> // 짝 선택
    ///
    /// Unknown, helper or already-chosen names are rejected without
    /// changing the session.
    pub fn choose(&mut self, name: &str) -> QawResult<()> {
        let name = self.normalize(name);
        if is_helper_pair(&name) {
            return Err(QawError::InvalidGuess(format!("'{}' is not a pair", name)));
        }
        let pair = self
            .device
            .pairs()
            .get(&name)
            .copied()
            .ok_or_else(|| QawError::InvalidGuess(format!("'{}' is not a pair", name)))?;
        if self.chosen.contains(&name) {
            return Err(QawError::InvalidGuess(format!("'{}' already chosen", name)));
        }

        for q in pair.qubits() {
            if let Some(value) = self.displayed.get_mut(q) {
                *value = TAKEN_MARKER;
            }
        }
        self.chosen.insert(name);
        Ok(())
    }

    /// Snapshot with chosen qubits marked
    pub fn displayed(&self) -> &[f64] {
        &self.displayed
    }

    /// Pairs chosen so far
    pub fn chosen(&self) -> &Matching {
        &self.chosen
    }

    /// Active qubits not yet covered
    pub fn unpaired(&self) -> usize {
        self.device
            .active_qubits()
            .filter(|&q| self.displayed.get(q).map_or(false, |&v| v <= 1.0))
            .count()
    }

    /// Check if at most one active qubit is left
    pub fn is_complete(&self) -> bool {
        self.unpaired() <= 1
    }

    /// Close the session
    pub fn finish(self, restart: bool) -> Guess {
        Guess {
            pairs: self.chosen,
            restart,
        }
    }
}

/// Run the manual protocol for one puzzle
/// Gantree: manual_guess(player, renderer, device, puzzle) -> Guess // 수동 추측
pub fn manual_guess(
    player: &mut dyn Player,
    renderer: &mut dyn Renderer,
    device: &DeviceDescriptor,
    puzzle: &Puzzle,
) -> Guess {
    let mut session = GuessSession::new(device, &puzzle.one_prob);
    while !session.is_complete() {
        if puzzle.raw_one_prob != puzzle.one_prob {
            renderer.render(device, &puzzle.raw_one_prob, puzzle.round);
        }
        renderer.render(device, session.displayed(), puzzle.round);

        match player.next_input(puzzle.round, session.displayed()) {
            PlayerInput::Pair(name) => {
                if let Err(e) = session.choose(&name) {
                    player.rejected(&e);
                }
            }
            PlayerInput::Done => break,
            PlayerInput::Restart => return session.finish(true),
        }
    }
    session.finish(false)
}

// ============================================================================
// Tests
// ============================================================================

//! Offline corpus analysis
//!
//! Gantree: L5_Clean → Analysis
//!
//! Per-round summary of a stored corpus: how noisy the puzzles were and
//! how well the matcher does on them, with or without cleaning.

use crate::clean::clean;
use crate::corpus::GameSample;
use crate::profile::ProfileSet;
use crate::quality::{calculate_quality, MeanVar, Quality};
use qaw_core::{PairMap, QawError, QawResult};
use qaw_stats::calculate_fuzz;
use serde::{Deserialize, Serialize};

/// Summary of one round across the corpus
/// Gantree: RoundAnalysis // 라운드 분석
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundAnalysis {
    /// Round number (1-based)
    pub round: usize,
    /// Fuzz of the true pairing
    pub fuzz: MeanVar,
    /// Matcher quality
    pub quality: Quality,
}

/// Analyse every round of a corpus
/// Gantree: process_data(corpus, pairs, profiles) -> QawResult<Vec<RoundAnalysis>> // 데이터 분석
///
/// The round count is taken from the first sample. With `profiles`,
/// each round's data is cleaned with that round's profile first.
pub fn process_data(
    corpus: &[GameSample],
    pairs: &PairMap,
    profiles: Option<&ProfileSet>,
    min_information: f64,
) -> QawResult<Vec<RoundAnalysis>> {
    let max_score = corpus
        .first()
        .map(GameSample::num_rounds)
        .ok_or_else(|| QawError::MissingData {
            what: "empty corpus".into(),
        })?;

    let mut analysis = Vec::with_capacity(max_score);
    for round in 1..=max_score {
        let profile = profiles.map(|set| set.get(round)).transpose()?;

        let mut fuzz = Vec::with_capacity(corpus.len());
        for sample in corpus {
            let view = sample.round(round)?;
            let one_prob = match profile {
                Some(x) => clean(x, view.one_prob, view.same_prob, pairs, min_information)?,
                None => view.one_prob.clone(),
            };
            fuzz.push(calculate_fuzz(&one_prob, pairs, view.applied.keys())?);
        }

        let quality = calculate_quality(profile, corpus, pairs, round, min_information)?;
        log::debug!("round {}: {}", round, quality);
        analysis.push(RoundAnalysis {
            round,
            fuzz: MeanVar::of(&fuzz),
            quality,
        });
    }
    Ok(analysis)
}

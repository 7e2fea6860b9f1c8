//! Data collection and corpus workflows
//!
//! Gantree: L7_Game → Collect
//!
//! Batch runs of automatic games into the store, and the offline
//! workflows built on the stored corpus: fitting cleaning profiles and
//! per-round analysis.

use crate::config::GameConfig;
use crate::engine::RoundEngine;
use crate::source::LiveSource;
use crate::state::GameState;
use crate::store::{ResultsStore, RunKey};
use qaw_backend::Executor;
use qaw_clean::{fit_all_rounds, process_data, FitConfig, GameSample, ProfileSet, RoundAnalysis};
use qaw_core::{DeviceDescriptor, QawResult};

/// Run `samples` games and append each to the store
/// Gantree: collect_data(store, device, config, executor, samples) -> QawResult<Vec<GameState>> // 데이터 수집
///
/// Game `i` is seeded with `seed + i` when a seed is configured.
pub fn collect_data<E: Executor>(
    store: &ResultsStore,
    device: &DeviceDescriptor,
    config: &GameConfig,
    executor: &E,
    samples: usize,
) -> QawResult<Vec<GameState>> {
    let key = RunKey::from_config(config);
    let mut games = Vec::with_capacity(samples);

    for sample in 0..samples {
        log::info!(
            "move={}, shots={}, sample={}",
            config.move_mode,
            config.shots,
            sample
        );
        let mut game_config = config.clone();
        game_config.seed = config.seed.map(|s| s.wrapping_add(sample as u64));

        let mut engine = RoundEngine::new(device.clone(), game_config, LiveSource::new(executor))?;
        engine.play_auto()?;
        let state = engine.finish();
        store.save_game(device.name(), &key, &state)?;
        games.push(state);
    }
    Ok(games)
}

/// Fit one cleaning profile per round from stored games and store them
/// Gantree: fit_profiles(store, device, key, fit) -> QawResult<ProfileSet> // 프로파일 피팅
pub fn fit_profiles(
    store: &ResultsStore,
    device: &DeviceDescriptor,
    key: &RunKey,
    fit: &FitConfig,
) -> QawResult<ProfileSet> {
    let corpus = store.load_corpus(device.name(), key)?;
    let max_score = corpus.first().map(GameSample::num_rounds).unwrap_or(0);
    let profiles = fit_all_rounds(&corpus, device.pairs(), max_score, fit)?;
    store.save_profiles(device.name(), key, &profiles)?;
    Ok(profiles)
}

/// Per-round fuzz and matcher quality of stored games
/// Gantree: analyze(store, device, key, cleanup) -> QawResult<Vec<RoundAnalysis>> // 데이터 분석
///
/// With `cleanup`, stored profiles (or the smooth default) clean every round first.
pub fn analyze(
    store: &ResultsStore,
    device: &DeviceDescriptor,
    key: &RunKey,
    cleanup: bool,
    min_information: f64,
) -> QawResult<Vec<RoundAnalysis>> {
    let corpus = store.load_corpus(device.name(), key)?;
    let profiles = if cleanup {
        let rounds = corpus.first().map(GameSample::num_rounds).unwrap_or(0);
        Some(store.cleaning_profiles(device.name(), key, device.num_qubits(), rounds, false))
    } else {
        None
    };
    process_data(&corpus, device.pairs(), profiles.as_ref(), min_information)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::scratch;
    use qaw_backend::{ReadoutBias, SimulatorExecutor};
    use qaw_core::{get_device, MoveMode};

    #[test]
    fn test_collect_then_analyze() {
        let store = scratch("collect");
        let device = get_device("ladder4").unwrap();
        let config = GameConfig::simulated()
            .with_max_score(3)
            .with_shots(200)
            .with_seed(10);
        let games = collect_data(&store, &device, &config, &SimulatorExecutor::new(), 3).unwrap();
        assert_eq!(games.len(), 3);
        assert_ne!(games[0], games[1]);

        let key = RunKey::from_config(&config);
        assert_eq!(store.load_corpus(device.name(), &key).unwrap().len(), 3);

        let rounds = analyze(&store, &device, &key, false, 0.0).unwrap();
        assert_eq!(rounds.len(), 3);
        assert!(analyze(&store, &device, &key.with_move(MoveMode::Random), false, 0.0).is_err());
        let _ = std::fs::remove_dir_all(store.root());
    }

    #[test]
    fn test_fit_profiles_are_stored() {
        let store = scratch("fit");
        let device = get_device("ladder4").unwrap();
        let bias = ReadoutBias::uniform(4, 0.08, 0.02).unwrap();
        let executor = SimulatorExecutor::new().with_bias(bias);
        let config = GameConfig::simulated()
            .with_max_score(2)
            .with_shots(500)
            .with_seed(20);
        collect_data(&store, &device, &config, &executor, 4).unwrap();

        let key = RunKey::from_config(&config);
        let fit = FitConfig::default().with_iterations(30).with_seed(1);
        let profiles = fit_profiles(&store, &device, &key, &fit).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(store.load_profiles(device.name(), &key).unwrap(), profiles);

        let cleaned = analyze(&store, &device, &key, true, 0.0).unwrap();
        assert_eq!(cleaned.len(), 2);
        let _ = std::fs::remove_dir_all(store.root());
    }
}

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use crate::algorithms::SimulationOptions;
use crate::core::domain::MINUTES_PER_DAY;
use crate::services::engine::TrafficEngine;
use crate::services::error::EngineError;

fn write_distribution_files(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let holding = dir.join("holding_times.txt");
    let intensity = dir.join("intensity.txt");
    fs::write(&holding, "120\n180\n90\n").unwrap();
    fs::write(&intensity, "1 0.25\n2 0.25\n3 0.5\n").unwrap();
    (holding, intensity)
}

fn small_options() -> SimulationOptions {
    SimulationOptions {
        day_count: 3,
        ..SimulationOptions::default()
    }
}

#[test]
fn test_simulate_then_analyze_full_workflow() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut engine = TrafficEngine::new();
    let mut rng = StdRng::seed_from_u64(11);
    let summary = engine
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng)
        .unwrap();

    // Base profile plus one per simulated day.
    assert_eq!(summary.day_count, 4);
    assert_eq!(summary.skipped_files, 0);
    assert_eq!(engine.day_count(), 4);

    let result = engine.analyze(0.0, 24.0).unwrap();
    assert_eq!(result.day_count, 4);
    assert!(result.tcbh_erl > 0.0);
    assert!(result.adph_erl >= result.tcbh_erl - 1e-9);
}

#[test]
fn test_missing_input_reported_before_store_is_touched() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut engine = TrafficEngine::new();
    let mut rng = StdRng::seed_from_u64(1);
    engine
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng)
        .unwrap();
    assert_eq!(engine.day_count(), 4);

    let missing = dir.path().join("absent.txt");
    let err = engine
        .load_and_simulate(&missing, &intensity, small_options(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, EngineError::InputMissing(_)));
    // Previous population survives the failed load.
    assert_eq!(engine.day_count(), 4);
}

#[test]
fn test_unusable_distribution_keeps_previous_population() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut engine = TrafficEngine::new();
    let mut rng = StdRng::seed_from_u64(2);
    engine
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng)
        .unwrap();

    let bad_holding = dir.path().join("bad_holding.txt");
    fs::write(&bad_holding, "junk\nmore junk\n").unwrap();
    let err = engine
        .load_and_simulate(&bad_holding, &intensity, small_options(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, EngineError::NoUsableData(_)));
    assert_eq!(engine.day_count(), 4);
}

#[test]
fn test_load_folder_replaces_population() {
    let dir = TempDir::new().unwrap();
    let profiles = dir.path().join("profiles");
    fs::create_dir(&profiles).unwrap();
    let mut content = String::from("minute;traffic_erl\n");
    for minute in 1..=MINUTES_PER_DAY {
        content.push_str(&format!("{};0.25\n", minute));
    }
    fs::write(profiles.join("day.csv"), &content).unwrap();

    let mut engine = TrafficEngine::new();
    let summary = engine.load_folder(&profiles).unwrap();
    assert_eq!(summary.day_count, 1);
    assert_eq!(engine.day_count(), 1);

    let result = engine.analyze(0.0, 24.0).unwrap();
    assert!((result.tcbh_erl - 0.25).abs() < 1e-12);
}

#[test]
fn test_load_folder_missing_dir_is_input_missing() {
    let mut engine = TrafficEngine::new();
    let err = engine
        .load_folder(Path::new("/nonexistent/profiles"))
        .unwrap_err();
    assert!(matches!(err, EngineError::InputMissing(_)));
}

#[test]
fn test_analyze_without_data_returns_none() {
    let engine = TrafficEngine::new();
    assert!(engine.analyze(0.0, 24.0).is_none());
}

#[test]
fn test_clear_empties_population_and_blocks_export() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut engine = TrafficEngine::new();
    let mut rng = StdRng::seed_from_u64(3);
    engine
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng)
        .unwrap();
    assert!(!engine.is_empty());

    engine.clear();
    assert!(engine.is_empty());
    assert!(engine.analyze(0.0, 24.0).is_none());
    assert!(matches!(
        engine.export_dataframe(),
        Err(EngineError::NoUsableData(_))
    ));
}

#[test]
fn test_export_dataframe_shape() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut engine = TrafficEngine::new();
    let mut rng = StdRng::seed_from_u64(4);
    engine
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng)
        .unwrap();

    let df = engine.export_dataframe().unwrap();
    assert_eq!(df.height(), MINUTES_PER_DAY);
    // Minute column plus one column per day.
    assert_eq!(df.width(), 1 + engine.day_count());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let (holding, intensity) = write_distribution_files(dir.path());

    let mut first = TrafficEngine::new();
    let mut second = TrafficEngine::new();
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    first
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng_a)
        .unwrap();
    second
        .load_and_simulate(&holding, &intensity, small_options(), &mut rng_b)
        .unwrap();

    let result_a = first.analyze(0.0, 24.0).unwrap();
    let result_b = second.analyze(0.0, 24.0).unwrap();
    assert_eq!(result_a, result_b);
}

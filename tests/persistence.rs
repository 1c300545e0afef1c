//! 저장 슬롯과 설정 파일 입출력 테스트. 임시 디렉터리의 고유 경로를 사용한다.
use std::fs;
use std::path::PathBuf;

use pump_efficiency_toolbox::config::{self, Config};
use pump_efficiency_toolbox::pump::{FormField, MeasurementReading, PumpForm};
use pump_efficiency_toolbox::store::{AppState, StateStore, StoreError};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "pump_efficiency_{}_{name}",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn sample_state() -> AppState {
    let mut state = AppState::default();
    state.form.set(FormField::PipeLength, "50");
    state.form.set(FormField::K3, "1");
    state.form.set(FormField::GaugePressure, "not a number");
    state.readings.append(MeasurementReading {
        motor_input_power_kw: 10.0,
        flow_rate_m3_per_h: 36.0,
        gauge_pressure_psi: 20.0,
    });
    state
}

#[test]
fn missing_slot_loads_defaults() {
    let store = StateStore::new(temp_path("missing.json"));
    let state = store.load().unwrap();
    assert_eq!(state, AppState::default());
    assert_eq!(state.form.get(FormField::MotorEfficiency), "0.85");
}

#[test]
fn save_then_load_restores_raw_form_text_and_log() {
    let path = temp_path("roundtrip.json");
    let store = StateStore::new(&path);
    let state = sample_state();
    store.save(&state).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded, state);
    // 원문 그대로 보관한다
    assert_eq!(loaded.form.get(FormField::GaugePressure), "not a number");
    let _ = fs::remove_file(&path);
}

#[test]
fn last_write_wins() {
    let path = temp_path("overwrite.json");
    let store = StateStore::new(&path);
    store.save(&sample_state()).unwrap();
    let empty = AppState::default();
    store.save(&empty).unwrap();
    assert_eq!(store.load().unwrap(), empty);
    let _ = fs::remove_file(&path);
}

#[test]
fn reset_and_clear_touch_only_their_half() {
    let path = temp_path("reset_clear.json");
    let store = StateStore::new(&path);

    let mut state = sample_state();
    store.reset_form(&mut state).unwrap();
    assert_eq!(state.form, PumpForm::default());
    assert_eq!(state.readings.len(), 1);
    assert_eq!(store.load().unwrap(), state);

    let mut state = sample_state();
    store.clear_readings(&mut state).unwrap();
    assert!(state.readings.is_empty());
    assert_eq!(state.form.get(FormField::PipeLength), "50");
    assert_eq!(store.load().unwrap(), state);
    let _ = fs::remove_file(&path);
}

#[test]
fn corrupt_slot_is_an_error_but_load_or_default_recovers() {
    let path = temp_path("corrupt.json");
    fs::write(&path, "{ this is not json").unwrap();
    let store = StateStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::Json(_))));
    assert_eq!(store.load_or_default(), AppState::default());
    let _ = fs::remove_file(&path);
}

#[test]
fn partial_slot_fills_missing_fields_with_defaults() {
    let path = temp_path("partial.json");
    fs::write(&path, r#"{"form":{"pipe_diameter":"0.1"}}"#).unwrap();
    let state = StateStore::new(&path).load().unwrap();
    assert_eq!(state.form.get(FormField::PipeDiameter), "0.1");
    assert_eq!(state.form.get(FormField::MotorEfficiency), "0.85");
    assert!(state.readings.is_empty());
    let _ = fs::remove_file(&path);
}

#[test]
fn save_creates_parent_directories() {
    let dir = temp_path("nested_dir");
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("slot").join("state.json");
    let store = StateStore::new(&path);
    store.save(&sample_state()).unwrap();
    assert!(path.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_file_is_created_with_defaults() {
    let path = temp_path("config.toml");
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    let _ = fs::remove_file(&path);
}

#[test]
fn config_round_trips_and_tolerates_missing_keys() {
    let path = temp_path("config_rt.toml");
    let cfg = Config {
        language: "ko-kr".into(),
        state_file: "data/pump.json".into(),
        window_alpha: 0.8,
        ..Config::default()
    };
    cfg.save_to(&path).unwrap();
    assert_eq!(config::load_from(&path).unwrap(), cfg);

    fs::write(&path, "language = \"en-us\"\n").unwrap();
    let partial = config::load_from(&path).unwrap();
    assert_eq!(partial.language, "en-us");
    assert_eq!(partial.state_file, Config::default().state_file);
    assert_eq!(partial.ui_scale, 1.0);
    let _ = fs::remove_file(&path);
}

#[test]
fn malformed_config_is_reported() {
    let path = temp_path("config_bad.toml");
    fs::write(&path, "window_alpha = \"very\"\n").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Serde(_))
    ));
    let _ = fs::remove_file(&path);
}

//! 폼 상태와 측정 기록을 하나의 저장 슬롯(JSON 파일)에 보관한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::pump::{PumpForm, ReadingLog};

/// 기본 저장 슬롯 이름.
pub const DEFAULT_SLOT: &str = "pump-efficiency-storage.json";

/// 저장 슬롯 입출력 오류.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("storage format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 저장되는 애플리케이션 상태 전체.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub form: PumpForm,
    pub readings: ReadingLog,
}

/// 단일 저장 슬롯. 저장할 때마다 전체를 덮어쓴다(마지막 쓰기 우선).
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 슬롯을 읽는다. 파일이 없으면 기본 상태를 돌려준다.
    pub fn load(&self) -> Result<AppState, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let state: AppState = serde_json::from_str(&content)?;
                info!(path = %self.path.display(), readings = state.readings.len(), "state loaded");
                Ok(state)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppState::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// 읽기에 실패하면 경고를 남기고 기본 상태로 시작한다.
    pub fn load_or_default(&self) -> AppState {
        self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "state unreadable, starting from defaults");
            AppState::default()
        })
    }

    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        info!(path = %self.path.display(), "state saved");
        Ok(())
    }

    /// 폼만 기본값으로 되돌리고 슬롯을 덮어쓴다. 측정 기록은 유지한다.
    pub fn reset_form(&self, state: &mut AppState) -> Result<(), StoreError> {
        state.form = PumpForm::default();
        self.save(state)
    }

    /// 측정 기록만 비우고 슬롯을 덮어쓴다. 폼은 유지한다.
    pub fn clear_readings(&self, state: &mut AppState) -> Result<(), StoreError> {
        state.readings.clear();
        self.save(state)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT)
    }
}

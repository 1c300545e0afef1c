use thiserror::Error;
use tracing::info;

use crate::i18n::{self, Translator};
use crate::pump::ReadingLogError;
use crate::store::{AppState, StateStore, StoreError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("reading log error: {0}")]
    ReadingLog(#[from] ReadingLogError),
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

/// CLI 대화형 메뉴의 메인 루프를 실행한다. 상태가 바뀔 때마다 저장 슬롯에 기록한다.
pub fn run(state: &mut AppState, store: &StateStore, tr: &Translator) -> Result<(), AppError> {
    info!(slot = %store.path().display(), "interactive session started");
    loop {
        let changed = match ui_cli::main_menu(tr)? {
            MenuChoice::EditField => ui_cli::handle_edit_field(tr, state)?,
            MenuChoice::ShowResult => {
                ui_cli::handle_show_result(tr, state);
                false
            }
            MenuChoice::AddReading => ui_cli::handle_add_reading(tr, state),
            MenuChoice::EditReading => ui_cli::handle_edit_reading(tr, state)?,
            MenuChoice::DeleteReading => ui_cli::handle_delete_reading(tr, state)?,
            MenuChoice::ShowLog => {
                ui_cli::print_log(tr, state);
                false
            }
            MenuChoice::Curve => {
                ui_cli::print_curve(tr, state);
                false
            }
            MenuChoice::ClearLog => {
                if ui_cli::confirm(tr.t(i18n::keys::PROMPT_CONFIRM_CLEAR))? {
                    store.clear_readings(state)?;
                    println!("{}", tr.t(i18n::keys::LOG_CLEARED));
                }
                false
            }
            MenuChoice::ResetForm => {
                store.reset_form(state)?;
                println!("{}", tr.t(i18n::keys::FORM_RESET_DONE));
                false
            }
            MenuChoice::Exit => {
                store.save(state)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        if changed {
            store.save(state)?;
        }
    }
    Ok(())
}

use std::io::{self, Write};

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::pump::curve::head_flow_curve;
use crate::pump::format::ResultDisplay;
use crate::pump::rating::EfficiencyRating;
use crate::pump::{
    calculate, parse_number, CalculationResult, FormField, MeasurementReading, PumpForm, ReadingId,
};
use crate::store::AppState;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EditField,
    ShowResult,
    AddReading,
    EditReading,
    DeleteReading,
    ShowLog,
    Curve,
    ClearLog,
    ResetForm,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_EDIT_FIELD,
        keys::MAIN_MENU_SHOW_RESULT,
        keys::MAIN_MENU_LOG_ADD,
        keys::MAIN_MENU_LOG_EDIT,
        keys::MAIN_MENU_LOG_DELETE,
        keys::MAIN_MENU_LOG_SHOW,
        keys::MAIN_MENU_CURVE,
        keys::MAIN_MENU_LOG_CLEAR,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        // 입력 스트림 종료(EOF)
        if sel.is_empty() {
            return Ok(MenuChoice::Exit);
        }
        match sel.trim() {
            "1" => return Ok(MenuChoice::EditField),
            "2" => return Ok(MenuChoice::ShowResult),
            "3" => return Ok(MenuChoice::AddReading),
            "4" => return Ok(MenuChoice::EditReading),
            "5" => return Ok(MenuChoice::DeleteReading),
            "6" => return Ok(MenuChoice::ShowLog),
            "7" => return Ok(MenuChoice::Curve),
            "8" => return Ok(MenuChoice::ClearLog),
            "9" => return Ok(MenuChoice::ResetForm),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 입력값 목록을 번호와 함께 출력한다.
pub fn print_form(tr: &Translator, form: &PumpForm) {
    println!("{}", tr.t(keys::FORM_HEADING));
    for (i, field) in FormField::ALL.iter().enumerate() {
        let raw = form.get(*field);
        let shown = if raw.trim().is_empty() { "-" } else { raw };
        println!("{:>2}) {:<30} {}", i + 1, field.label(), shown);
    }
}

/// 입력값 수정 메뉴를 처리한다. 값이 바뀌면 true.
pub fn handle_edit_field(tr: &Translator, state: &mut AppState) -> Result<bool, AppError> {
    print_form(tr, &state.form);
    println!("{}", tr.t(keys::HELP_FORM));
    let sel = read_line(tr.t(keys::PROMPT_FIELD_NUMBER))?;
    let field = match sel.trim().parse::<usize>() {
        Ok(n) if (1..=FormField::ALL.len()).contains(&n) => FormField::ALL[n - 1],
        _ => match FormField::from_key(&sel) {
            Some(f) => f,
            None => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                return Ok(false);
            }
        },
    };
    let value = read_line(tr.t(keys::PROMPT_FIELD_VALUE))?;
    state.form.set(field, value.trim());
    println!("{}", tr.t(keys::FORM_UPDATED));
    Ok(true)
}

/// 현재 폼 값으로 계산한 결과를 출력한다.
pub fn handle_show_result(tr: &Translator, state: &AppState) {
    let result = calculate(&state.form.configuration(), &state.form.live_reading());
    print_result(tr, &result);
}

pub fn print_result(tr: &Translator, result: &CalculationResult) {
    println!("{}", tr.t(keys::RESULT_HEADING));
    let display = ResultDisplay::new(result);
    for (label, value, unit) in display.rows() {
        println!("{label:<20} {value:>14} {unit}");
    }
    let rating = EfficiencyRating::classify(result.pump_efficiency_pct);
    println!(
        "{} {} ({})",
        tr.t(keys::RESULT_RATING),
        rating.label(),
        rating.advice()
    );
}

/// 폼의 현재 측정값을 기록에 추가한다.
pub fn handle_add_reading(tr: &Translator, state: &mut AppState) -> bool {
    let id = state.readings.append(state.form.live_reading());
    println!("{} {id}", tr.t(keys::LOG_ADDED));
    true
}

/// 기록 하나를 새 측정값으로 교체한다.
pub fn handle_edit_reading(tr: &Translator, state: &mut AppState) -> Result<bool, AppError> {
    print_log(tr, state);
    if state.readings.is_empty() {
        return Ok(false);
    }
    let Some(id) = read_reading_id(tr)? else {
        return Ok(false);
    };
    let Some(current) = state.readings.get(id).map(|e| e.reading) else {
        println!("{}", tr.t(keys::ERROR_UNKNOWN_READING));
        return Ok(false);
    };
    let reading = read_reading(tr, &current)?;
    state.readings.update(id, reading)?;
    println!("{}", tr.t(keys::LOG_UPDATED));
    Ok(true)
}

pub fn handle_delete_reading(tr: &Translator, state: &mut AppState) -> Result<bool, AppError> {
    print_log(tr, state);
    if state.readings.is_empty() {
        return Ok(false);
    }
    let Some(id) = read_reading_id(tr)? else {
        return Ok(false);
    };
    match state.readings.remove(id) {
        Ok(_) => {
            println!("{}", tr.t(keys::LOG_REMOVED));
            Ok(true)
        }
        Err(_) => {
            println!("{}", tr.t(keys::ERROR_UNKNOWN_READING));
            Ok(false)
        }
    }
}

/// 측정 기록과 각 기록의 평가 결과를 표로 출력한다.
pub fn print_log(tr: &Translator, state: &AppState) {
    println!("{}", tr.t(keys::LOG_HEADING));
    if state.readings.is_empty() {
        println!("{}", tr.t(keys::LOG_EMPTY));
        return;
    }
    println!("{}", tr.t(keys::HELP_LOG));
    println!("{}", tr.t(keys::LOG_COLUMNS));
    let config = state.form.configuration();
    for (entry, (id, r)) in state.readings.iter().zip(state.readings.evaluate(&config)) {
        println!(
            "{:<6} {:<10.3} {:<11.3} {:<10.3} {:<10.3} {:<11.4} {:<11.2} {:.2}",
            id.to_string(),
            entry.reading.motor_input_power_kw,
            entry.reading.flow_rate_m3_per_h,
            entry.reading.gauge_pressure_psi,
            r.total_head_m,
            r.hydraulic_power_kw,
            r.overall_efficiency_pct,
            r.pump_efficiency_pct
        );
    }
}

pub fn print_curve(tr: &Translator, state: &AppState) {
    println!("{}", tr.t(keys::CURVE_HEADING));
    let points = head_flow_curve(&state.form.configuration(), &state.readings);
    if points.is_empty() {
        println!("{}", tr.t(keys::LOG_EMPTY));
        return;
    }
    println!("{}", tr.t(keys::CURVE_COLUMNS));
    for p in points {
        println!(
            "{:<6} {:<12.2} {:.3}",
            p.id.to_string(),
            p.flow_l_per_min,
            p.head_m
        );
    }
}

/// y/yes 입력일 때만 true.
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    let ans = read_line(prompt)?;
    Ok(matches!(ans.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn read_reading_id(tr: &Translator) -> Result<Option<ReadingId>, AppError> {
    let s = read_line(tr.t(keys::PROMPT_READING_ID))?;
    match s.parse::<ReadingId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
            Ok(None)
        }
    }
}

/// 측정값 세 항목을 입력받는다. 엔터만 누르면 기존 값을 유지한다.
fn read_reading(tr: &Translator, current: &MeasurementReading) -> Result<MeasurementReading, AppError> {
    let power = read_number_or(tr.t(keys::PROMPT_POWER), current.motor_input_power_kw)?;
    let flow = read_number_or(tr.t(keys::PROMPT_FLOW), current.flow_rate_m3_per_h)?;
    let pressure = read_number_or(tr.t(keys::PROMPT_PRESSURE), current.gauge_pressure_psi)?;
    Ok(MeasurementReading {
        motor_input_power_kw: power,
        flow_rate_m3_per_h: flow,
        gauge_pressure_psi: pressure,
    })
}

fn read_number_or(prompt: &str, current: f64) -> Result<f64, AppError> {
    let s = read_line(&format!("{prompt}[{current}] "))?;
    if s.trim().is_empty() {
        Ok(current)
    } else {
        Ok(parse_number(&s))
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

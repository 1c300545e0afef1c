use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EDIT_FIELD: &str = "main_menu.edit_field";
    pub const MAIN_MENU_SHOW_RESULT: &str = "main_menu.show_result";
    pub const MAIN_MENU_LOG_ADD: &str = "main_menu.log_add";
    pub const MAIN_MENU_LOG_EDIT: &str = "main_menu.log_edit";
    pub const MAIN_MENU_LOG_DELETE: &str = "main_menu.log_delete";
    pub const MAIN_MENU_LOG_SHOW: &str = "main_menu.log_show";
    pub const MAIN_MENU_CURVE: &str = "main_menu.curve";
    pub const MAIN_MENU_LOG_CLEAR: &str = "main_menu.log_clear";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FORM_HEADING: &str = "form.heading";
    pub const PROMPT_FIELD_NUMBER: &str = "prompt.field_number";
    pub const PROMPT_FIELD_VALUE: &str = "prompt.field_value";
    pub const FORM_UPDATED: &str = "form.updated";
    pub const FORM_RESET_DONE: &str = "form.reset_done";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_RATING: &str = "result.rating";

    pub const LOG_HEADING: &str = "log.heading";
    pub const LOG_EMPTY: &str = "log.empty";
    pub const LOG_ADDED: &str = "log.added";
    pub const LOG_UPDATED: &str = "log.updated";
    pub const LOG_REMOVED: &str = "log.removed";
    pub const LOG_CLEARED: &str = "log.cleared";
    pub const LOG_COLUMNS: &str = "log.columns";
    pub const EXPORT_DONE: &str = "log.export_done";
    pub const PROMPT_READING_ID: &str = "prompt.reading_id";
    pub const PROMPT_POWER: &str = "prompt.power";
    pub const PROMPT_FLOW: &str = "prompt.flow";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_CONFIRM_CLEAR: &str = "prompt.confirm_clear";

    pub const CURVE_HEADING: &str = "curve.heading";
    pub const CURVE_COLUMNS: &str = "curve.columns";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_READING: &str = "error.unknown_reading";

    pub const HELP_FORM: &str = "help.form";
    pub const HELP_LOG: &str = "help.log";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 언어팩만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Pump Efficiency Toolbox ===",
        MAIN_MENU_EDIT_FIELD => "1) 입력값 수정",
        MAIN_MENU_SHOW_RESULT => "2) 현재 입력 계산 결과",
        MAIN_MENU_LOG_ADD => "3) 현재 측정값을 기록에 추가",
        MAIN_MENU_LOG_EDIT => "4) 기록 수정",
        MAIN_MENU_LOG_DELETE => "5) 기록 삭제",
        MAIN_MENU_LOG_SHOW => "6) 기록 및 결과 보기",
        MAIN_MENU_CURVE => "7) 양정-유량 곡선",
        MAIN_MENU_LOG_CLEAR => "8) 기록 전체 삭제",
        MAIN_MENU_RESET => "9) 입력값 초기화",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FORM_HEADING => "\n-- 입력값 --",
        PROMPT_FIELD_NUMBER => "수정할 항목 번호: ",
        PROMPT_FIELD_VALUE => "새 값 (비우면 0으로 계산): ",
        FORM_UPDATED => "입력값이 수정되었습니다.",
        FORM_RESET_DONE => "입력값을 기본값으로 되돌렸습니다.",
        RESULT_HEADING => "\n-- 계산 결과 --",
        RESULT_RATING => "효율 등급:",
        LOG_HEADING => "\n-- 측정 기록 --",
        LOG_EMPTY => "저장된 측정값이 없습니다.",
        LOG_ADDED => "기록에 추가됨:",
        LOG_UPDATED => "기록이 수정되었습니다.",
        LOG_REMOVED => "기록이 삭제되었습니다.",
        LOG_CLEARED => "모든 기록을 삭제했습니다.",
        EXPORT_DONE => "CSV 내보내기 완료:",
        LOG_COLUMNS => "ID     전력[kW]   유량[m3/h]  압력[psi]  양정[m]    수동력[kW]  종합효율[%] 펌프효율[%]",
        PROMPT_READING_ID => "기록 ID: ",
        PROMPT_POWER => "모터 입력 전력 [kW]: ",
        PROMPT_FLOW => "유량 [m3/h]: ",
        PROMPT_PRESSURE => "압력계 값 [psi]: ",
        PROMPT_CONFIRM_CLEAR => "모든 기록을 삭제할까요? (y/N): ",
        CURVE_HEADING => "\n-- 양정-유량 곡선 (유량 내림차순) --",
        CURVE_COLUMNS => "ID     유량[L/min]  양정[m]",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_UNKNOWN_READING => "해당 ID의 기록이 없습니다.",
        HELP_FORM => "도움말: 비어 있거나 숫자가 아닌 값은 0으로 계산합니다. K1~K6은 피팅 개수(배수)입니다.",
        HELP_LOG => "도움말: 유속/Re/마찰손실은 폼의 유량으로, 양정 이후 값은 각 기록의 값으로 계산합니다.",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Pump Efficiency Toolbox ===",
        MAIN_MENU_EDIT_FIELD => "1) Edit input field",
        MAIN_MENU_SHOW_RESULT => "2) Calculate current input",
        MAIN_MENU_LOG_ADD => "3) Save current reading to log",
        MAIN_MENU_LOG_EDIT => "4) Edit logged reading",
        MAIN_MENU_LOG_DELETE => "5) Delete logged reading",
        MAIN_MENU_LOG_SHOW => "6) Show reading log",
        MAIN_MENU_CURVE => "7) Head vs flow curve",
        MAIN_MENU_LOG_CLEAR => "8) Clear reading log",
        MAIN_MENU_RESET => "9) Reset input",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FORM_HEADING => "\n-- Input --",
        PROMPT_FIELD_NUMBER => "Field number to edit: ",
        PROMPT_FIELD_VALUE => "New value (blank counts as 0): ",
        FORM_UPDATED => "Field updated.",
        FORM_RESET_DONE => "Input reset to defaults.",
        RESULT_HEADING => "\n-- Results --",
        RESULT_RATING => "Efficiency rating:",
        LOG_HEADING => "\n-- Reading log --",
        LOG_EMPTY => "No saved readings.",
        LOG_ADDED => "Added to log:",
        LOG_UPDATED => "Reading updated.",
        LOG_REMOVED => "Reading deleted.",
        LOG_CLEARED => "All readings cleared.",
        EXPORT_DONE => "Exported CSV to",
        LOG_COLUMNS => "ID     Power[kW]  Flow[m3/h]  P[psi]     Head[m]    Phyd[kW]    Overall[%]  Pump[%]",
        PROMPT_READING_ID => "Reading ID: ",
        PROMPT_POWER => "Motor input power [kW]: ",
        PROMPT_FLOW => "Flow rate [m3/h]: ",
        PROMPT_PRESSURE => "Pressure gauge value [psi]: ",
        PROMPT_CONFIRM_CLEAR => "Delete every reading? (y/N): ",
        CURVE_HEADING => "\n-- Head vs flow (flow descending) --",
        CURVE_COLUMNS => "ID     Flow[L/min]  Head[m]",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_UNKNOWN_READING => "No reading with that ID.",
        HELP_FORM => "Help: blank or non-numeric values count as 0. K1..K6 are fitting counts (multipliers).",
        HELP_LOG => "Help: velocity/Re/friction use the form flow rate; head and later values use each reading.",
        _ => "[missing translation]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn built_in_packs_parse() {
        let en = Translator::new_with_pack("en-us", None);
        assert!(en.lookup("gui.nav.app_title").is_some());
        let ko = Translator::new_with_pack("ko-kr", None);
        assert!(ko.lookup("gui.nav.app_title").is_some());
    }

    #[test]
    fn korean_falls_back_to_builtin_tables() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t(keys::MAIN_MENU_EXIT), "0) 종료");
        let tr = Translator::new("en");
        assert_eq!(tr.t(keys::MAIN_MENU_EXIT), "0) Exit");
    }

    #[test]
    fn export_message_is_translated() {
        assert_eq!(Translator::new("en").t(keys::EXPORT_DONE), "Exported CSV to");
        assert_eq!(Translator::new("ko").t(keys::EXPORT_DONE), "CSV 내보내기 완료:");
    }
}

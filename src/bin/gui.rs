#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use pump_efficiency_toolbox::{
    config, i18n,
    pump::{
        calculate,
        curve::{head_flow_curve, M3H_TO_LPM},
        format::{placeholder_or, ResultDisplay},
        parse_number,
        rating::EfficiencyRating,
        report, CalculationResult, FittingKind, FormField, MeasurementReading, ReadingId,
    },
    store::{AppState, StateStore},
};
use tracing::{error, info};

/// 결과 카드 행 순서(ResultDisplay::rows)와 같은 순서의 번역 키.
const RESULT_ROW_KEYS: [&str; 12] = [
    "gui.result.velocity",
    "gui.result.reynolds",
    "gui.result.friction_factor",
    "gui.result.regime",
    "gui.result.friction_head_loss",
    "gui.result.minor_head_loss",
    "gui.result.pressure_head",
    "gui.result.total_head",
    "gui.result.hydraulic_power",
    "gui.result.shaft_power",
    "gui.result.overall_efficiency",
    "gui.result.pump_efficiency",
];

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt().init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 760.0])
        .with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    let store = StateStore::new(&app_cfg.state_file);
    eframe::run_native(
        "Pump Efficiency Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                error!("font error: {e}");
            }
            cc.egui_ctx.set_pixels_per_point(app_cfg.ui_scale);
            Box::new(GuiApp::new(app_cfg.clone(), store.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["pump.png", "icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) 시스템 폰트(Windows 맑은 고딕, Linux Noto CJK/나눔)
/// 3) 모두 실패 시 Err를 반환하고 egui 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    for asset in ["assets/fonts/malgun.ttf", "assets/fonts/NanumGothic.ttf"] {
        let p = Path::new(asset);
        if p.exists() {
            let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    let mut candidates: Vec<std::path::PathBuf> = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for cand in [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(cand.into());
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    Err("Korean font not found; using the default egui font.".into())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Calculator,
    ReadingLog,
    Curve,
}

/// 기록 표에서 편집 중인 행의 원문 입력 버퍼.
#[derive(Clone, Debug, PartialEq)]
struct ReadingEdit {
    id: ReadingId,
    power: String,
    flow: String,
    pressure: String,
}

impl ReadingEdit {
    fn from_reading(id: ReadingId, r: &MeasurementReading) -> Self {
        Self {
            id,
            power: r.motor_input_power_kw.to_string(),
            flow: r.flow_rate_m3_per_h.to_string(),
            pressure: r.gauge_pressure_psi.to_string(),
        }
    }

    fn reading(&self) -> MeasurementReading {
        MeasurementReading {
            motor_input_power_kw: parse_number(&self.power),
            flow_rate_m3_per_h: parse_number(&self.flow),
            gauge_pressure_psi: parse_number(&self.pressure),
        }
    }
}

/// 기록 표 한 프레임에서 발생한 사용자 동작.
enum LogAction {
    Edit(ReadingId),
    Delete(ReadingId),
    CommitEdit,
    CancelEdit,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    store: StateStore,
    state: AppState,
    tab: Tab,
    lang_input: String,
    window_alpha: f32,
    ui_scale: f32,
    settings_status: Option<String>,
    show_settings_modal: bool,
    show_formula_modal: bool,
    show_help_modal: bool,
    confirm_clear: bool,
    editing: Option<ReadingEdit>,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, store: StateStore) -> Self {
        let lang = i18n::resolve_language(&config.language, None);
        let tr = i18n::Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
        let state = store.load_or_default();
        info!(slot = %store.path().display(), "gui session started");
        Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha,
            ui_scale: config.ui_scale,
            config,
            tr,
            store,
            state,
            tab: Tab::Calculator,
            settings_status: None,
            show_settings_modal: false,
            show_formula_modal: false,
            show_help_modal: false,
            confirm_clear: false,
            editing: None,
            status: None,
        }
    }

    /// 상태 전체를 저장 슬롯에 기록한다. 실패는 상태줄에 표시한다.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            error!(error = %e, "state save failed");
            self.status = Some(format!("Save error: {e}"));
        }
    }

    fn live_result(&self) -> CalculationResult {
        calculate(&self.state.form.configuration(), &self.state.form.live_reading())
    }

    fn add_reading_from_form(&mut self) -> ReadingId {
        let id = self.state.readings.append(self.state.form.live_reading());
        self.persist();
        id
    }

    fn start_edit(&mut self, id: ReadingId) {
        self.editing = self
            .state
            .readings
            .get(id)
            .map(|e| ReadingEdit::from_reading(id, &e.reading));
    }

    fn commit_edit(&mut self) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        match self.state.readings.update(edit.id, edit.reading()) {
            Ok(()) => self.persist(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn delete_reading(&mut self, id: ReadingId) {
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        match self.state.readings.remove(id) {
            Ok(_) => self.persist(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn clear_readings(&mut self) {
        self.editing = None;
        if let Err(e) = self.store.clear_readings(&mut self.state) {
            error!(error = %e, "clear failed");
            self.status = Some(format!("Save error: {e}"));
        }
    }

    fn reset_form(&mut self) {
        if let Err(e) = self.store.reset_form(&mut self.state) {
            error!(error = %e, "reset failed");
            self.status = Some(format!("Save error: {e}"));
        }
    }

    fn export_csv(&mut self, path: &Path) -> std::io::Result<()> {
        let csv = report::readings_csv(&self.state.form.configuration(), &self.state.readings);
        fs::write(path, csv)?;
        info!(path = %path.display(), readings = self.state.readings.len(), "csv exported");
        Ok(())
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.ui_scale = self.ui_scale;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self
                .tr
                .lookup("gui.settings.saved")
                .unwrap_or_else(|| "Saved.".to_string()),
            Err(e) => format!("Save error: {e}"),
        });
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Calculator, txt("gui.tab.calculator", "Calculator")),
            (Tab::ReadingLog, txt("gui.tab.reading_log", "Reading log")),
            (Tab::Curve, txt("gui.tab.curve", "Head vs flow")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };
        heading_with_tip(
            ui,
            &txt("gui.calc.heading", "Pump Efficiency Calculator"),
            &txt(
                "gui.calc.tip",
                "Field measurements and piping data give head, hydraulic power and efficiency.",
            ),
        );
        ui.add_space(8.0);

        let mut changed = false;
        ui.horizontal_top(|ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(txt("gui.calc.inputs", "Inputs")).strong());
                egui::Grid::new("pump_form_grid")
                    .num_columns(3)
                    .spacing([12.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for field in FormField::ALL {
                            label_with_tip(
                                ui,
                                &txt(&format!("gui.field.{}", field.key()), field.label()),
                                &txt(&format!("gui.field.{}_tip", field.key()), field.label()),
                            );
                            let edit = egui::TextEdit::singleline(self.state.form.field_mut(field))
                                .desired_width(110.0);
                            if ui.add(edit).changed() {
                                changed = true;
                            }
                            match fitting_of(field) {
                                Some(kind) => {
                                    ui.small(format!("K = {}", kind.constant()));
                                }
                                None => {
                                    ui.label("");
                                }
                            }
                            ui.end_row();
                        }
                    });
                ui.small(txt(
                    "gui.calc.blank_hint",
                    "Blank or non-numeric values count as 0.",
                ));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(txt("gui.calc.add_reading", "Save reading to log"))
                        .on_hover_text(txt(
                            "gui.calc.add_reading_tip",
                            "Stores the current power, flow and pressure as a new log entry.",
                        ))
                        .clicked()
                    {
                        let id = self.add_reading_from_form();
                        self.status = Some(format!("{} {id}", txt("gui.log.added", "Added to log:")));
                    }
                    if ui.button(txt("gui.calc.reset", "Reset input")).clicked() {
                        self.reset_form();
                    }
                });
            });

            ui.add_space(12.0);
            let result = self.live_result();
            egui::Frame::group(ui.style()).show(ui, |ui| {
                result_card(ui, &txt, &result);
            });
        });

        if changed {
            self.persist();
        }
    }

    fn ui_reading_log(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };
        heading_with_tip(
            ui,
            &txt("gui.log.heading", "Reading log"),
            &txt(
                "gui.log.tip",
                "Velocity, Re and pipe losses use the form flow rate; head onwards uses each reading.",
            ),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button(txt("gui.calc.add_reading", "Save reading to log")).clicked() {
                let id = self.add_reading_from_form();
                self.status = Some(format!("{} {id}", txt("gui.log.added", "Added to log:")));
            }
            if ui.button(txt("gui.log.export", "Export CSV")).clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .set_file_name("pump-readings.csv")
                    .save_file()
                {
                    self.status = Some(match self.export_csv(&path) {
                        Ok(()) => format!("{} {}", txt("gui.log.exported", "Exported to"), path.display()),
                        Err(e) => format!("Export error: {e}"),
                    });
                }
            }
            ui.separator();
            if self.confirm_clear {
                ui.label(txt("gui.log.confirm_clear", "Delete every reading?"));
                if ui.button(txt("gui.common.yes", "Yes")).clicked() {
                    self.clear_readings();
                    self.confirm_clear = false;
                }
                if ui.button(txt("gui.common.no", "No")).clicked() {
                    self.confirm_clear = false;
                }
            } else if ui
                .add_enabled(
                    !self.state.readings.is_empty(),
                    egui::Button::new(txt("gui.log.clear", "Clear all")),
                )
                .clicked()
            {
                self.confirm_clear = true;
            }
        });
        ui.add_space(6.0);

        if self.state.readings.is_empty() {
            ui.label(txt("gui.log.empty", "No saved readings."));
            return;
        }

        let config = self.state.form.configuration();
        let rows: Vec<(ReadingId, MeasurementReading, CalculationResult)> = self
            .state
            .readings
            .iter()
            .zip(self.state.readings.evaluate(&config))
            .map(|(entry, (id, result))| (id, entry.reading, result))
            .collect();

        let mut action: Option<LogAction> = None;
        egui::Grid::new("reading_log_grid")
            .num_columns(9)
            .spacing([10.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (key, default) in [
                    ("gui.log.col.id", "ID"),
                    ("gui.log.col.power", "Power [kW]"),
                    ("gui.log.col.flow", "Flow [m³/h]"),
                    ("gui.log.col.pressure", "Gauge [psi]"),
                    ("gui.log.col.head", "Head [m]"),
                    ("gui.log.col.hydraulic_power", "P_hyd [kW]"),
                    ("gui.log.col.overall", "Overall [%]"),
                    ("gui.log.col.pump", "Pump [%]"),
                    ("gui.log.col.actions", ""),
                ] {
                    ui.label(egui::RichText::new(txt(key, default)).strong());
                }
                ui.end_row();

                for (id, reading, r) in &rows {
                    ui.label(id.to_string());
                    match self.editing.as_mut().filter(|e| e.id == *id) {
                        Some(edit) => {
                            ui.add(egui::TextEdit::singleline(&mut edit.power).desired_width(70.0));
                            ui.add(egui::TextEdit::singleline(&mut edit.flow).desired_width(70.0));
                            ui.add(egui::TextEdit::singleline(&mut edit.pressure).desired_width(70.0));
                        }
                        None => {
                            ui.label(format!("{:.3}", reading.motor_input_power_kw));
                            ui.label(format!("{:.3}", reading.flow_rate_m3_per_h));
                            ui.label(format!("{:.3}", reading.gauge_pressure_psi));
                        }
                    }
                    ui.label(placeholder_or(r.total_head_m, 3));
                    ui.label(placeholder_or(r.hydraulic_power_kw, 4));
                    ui.label(placeholder_or(r.overall_efficiency_pct, 2));
                    ui.colored_label(
                        rating_color(EfficiencyRating::classify(r.pump_efficiency_pct)),
                        placeholder_or(r.pump_efficiency_pct, 2),
                    );
                    ui.horizontal(|ui| {
                        if self.editing.as_ref().is_some_and(|e| e.id == *id) {
                            if ui.button(txt("gui.common.save", "Save")).clicked() {
                                action = Some(LogAction::CommitEdit);
                            }
                            if ui.button(txt("gui.common.cancel", "Cancel")).clicked() {
                                action = Some(LogAction::CancelEdit);
                            }
                        } else {
                            if ui.button(txt("gui.common.edit", "Edit")).clicked() {
                                action = Some(LogAction::Edit(*id));
                            }
                            if ui.button(txt("gui.common.delete", "Delete")).clicked() {
                                action = Some(LogAction::Delete(*id));
                            }
                        }
                    });
                    ui.end_row();
                }
            });

        match action {
            Some(LogAction::Edit(id)) => self.start_edit(id),
            Some(LogAction::Delete(id)) => self.delete_reading(id),
            Some(LogAction::CommitEdit) => self.commit_edit(),
            Some(LogAction::CancelEdit) => self.editing = None,
            None => {}
        }
    }

    fn ui_curve(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };
        heading_with_tip(
            ui,
            &txt("gui.curve.heading", "Head vs flow"),
            &txt(
                "gui.curve.tip",
                "Total head of each logged reading against its flow rate in L/min.",
            ),
        );
        ui.add_space(6.0);
        let points = head_flow_curve(&self.state.form.configuration(), &self.state.readings);
        if points.is_empty() {
            ui.label(txt("gui.log.empty", "No saved readings."));
            return;
        }
        let series: Vec<[f64; 2]> = points.iter().map(|p| [p.flow_l_per_min, p.head_m]).collect();
        let name = txt("gui.curve.series", "Total head [m]");
        Plot::new("head_flow_plot")
            .legend(Legend::default())
            .x_axis_label(txt("gui.curve.x_axis", "Flow [L/min]"))
            .y_axis_label(txt("gui.curve.y_axis", "Head [m]"))
            .height(420.0)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::from(series.clone())).name(&name));
                plot_ui.points(Points::new(PlotPoints::from(series)).radius(4.0).name(&name));
            });
        ui.small(format!(
            "{} {M3H_TO_LPM}",
            txt("gui.curve.conversion", "L/min = m³/h ×")
        ));
    }
}

/// K 입력 필드에 대응하는 피팅.
fn fitting_of(field: FormField) -> Option<FittingKind> {
    match field {
        FormField::K1 => Some(FittingKind::Elbow90),
        FormField::K2 => Some(FittingKind::GateValveOpen),
        FormField::K3 => Some(FittingKind::FootValve),
        FormField::K4 => Some(FittingKind::SwingCheckValve),
        FormField::K5 => Some(FittingKind::SharpEntrance),
        FormField::K6 => Some(FittingKind::Exit),
        _ => None,
    }
}

fn rating_color(rating: EfficiencyRating) -> egui::Color32 {
    match rating {
        EfficiencyRating::Good => egui::Color32::from_rgb(46, 160, 67),
        EfficiencyRating::Fair => egui::Color32::from_rgb(210, 153, 34),
        EfficiencyRating::Poor => egui::Color32::from_rgb(207, 34, 46),
    }
}

/// 결과 카드. 값이 정확히 0이면 `---`를 보여준다.
fn result_card<F>(ui: &mut egui::Ui, txt: &F, result: &CalculationResult)
where
    F: Fn(&str, &str) -> String,
{
    ui.label(egui::RichText::new(txt("gui.result.heading", "Results")).strong());
    let display = ResultDisplay::new(result);
    egui::Grid::new("result_grid")
        .num_columns(3)
        .spacing([12.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for (i, (key, (label, value, unit))) in
                RESULT_ROW_KEYS.iter().zip(display.rows()).enumerate()
            {
                ui.label(txt(*key, label));
                // 동력/효율은 입력이 없을 때 `---`
                let shown = match i {
                    8 => placeholder_or(result.hydraulic_power_kw, 4),
                    9 => placeholder_or(result.shaft_power_kw, 4),
                    10 => placeholder_or(result.overall_efficiency_pct, 2),
                    11 => placeholder_or(result.pump_efficiency_pct, 2),
                    _ => value.to_string(),
                };
                ui.monospace(shown);
                ui.label(unit);
                ui.end_row();
            }
        });
    ui.separator();
    let rating = EfficiencyRating::classify(result.pump_efficiency_pct);
    ui.horizontal(|ui| {
        ui.label(txt("gui.result.rating", "Efficiency rating:"));
        ui.colored_label(
            rating_color(rating),
            egui::RichText::new(txt(&format!("gui.rating.{}", rating.key()), rating.label())).strong(),
        );
    });
    ui.small(txt(&format!("gui.rating.{}_advice", rating.key()), rating.advice()));
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Pump Efficiency Toolbox"));
                ui.separator();
                if ui.button(txt("gui.formula.button", "Formula reference")).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(format!(
                    "{} {}",
                    txt("gui.status.slot", "Storage:"),
                    self.store.path().display()
                ));
                if let Some(msg) = &self.status {
                    ui.separator();
                    ui.small(msg);
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut open = true;
            let mut save_clicked = false;
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings.lang_auto", "System"));
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if save_clicked {
                self.apply_settings();
            }
            self.show_settings_modal = open;
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.about.app", "Offline pump performance calculator"));
                    ui.label(format!("{} {}", txt("gui.about.version", "Version:"), env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(txt("gui.about.inputs", "- Blank or non-numeric inputs count as 0."));
                    ui.label(txt("gui.about.k", "- K1..K6 are fitting counts multiplied by fixed loss constants."));
                    ui.label(txt("gui.about.save", "- Every change is saved to the storage slot automatically."));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    ui.heading(txt("gui.formula.velocity", "Velocity: v = 4Q / (π d²), Q in m³/s, π = 3.1416."));
                    ui.label(txt("gui.formula.reynolds", "Reynolds: Re = 10⁶ · v · d (kinematic viscosity 10⁻⁶ m²/s)."));
                    ui.label(txt("gui.formula.friction", "Friction factor: 64/Re if Re < 2000, else 0.3164 / Re^0.25 (Blasius)."));
                    ui.separator();
                    ui.heading(txt("gui.formula.losses", "Losses: hf = f (L/d) v²/2g, h_minor = ΣK v²/2g."));
                    ui.label(txt("gui.formula.k", "ΣK = 0.6·K1 + 0.15·K2 + 4·K3 + 2·K4 + 0.5·K5 + 1·K6."));
                    ui.separator();
                    ui.heading(txt("gui.formula.head", "Total head: H = depth + draw-down + 0.7032·psi + hf + h_minor."));
                    ui.label(txt("gui.formula.power", "Hydraulic power: P = ρ g Q H / 1000 [kW]."));
                    ui.label(txt("gui.formula.efficiency", "η_overall = P / P_motor × 100; η_pump = η_overall / η_motor."));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Calculator => self.ui_calculator(ui),
                    Tab::ReadingLog => self.ui_reading_log(ui),
                    Tab::Curve => self.ui_curve(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_app(name: &str) -> (GuiApp, std::path::PathBuf) {
        let path = env::temp_dir().join(format!("pump_gui_{}_{name}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let app = GuiApp::new(config::Config::default(), StateStore::new(&path));
        (app, path)
    }

    #[test]
    fn add_from_form_is_saved_to_slot() {
        let (mut app, path) = temp_app("add");
        app.state.form.set(FormField::MotorInputPower, "10");
        app.state.form.set(FormField::FlowRate, "36");
        let id = app.add_reading_from_form();
        let reloaded = StateStore::new(&path).load().unwrap();
        let entry = reloaded.readings.get(id).unwrap();
        assert_eq!(entry.reading.motor_input_power_kw, 10.0);
        assert_eq!(entry.reading.flow_rate_m3_per_h, 36.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn inline_edit_treats_garbage_as_zero() {
        let (mut app, path) = temp_app("edit");
        app.state.form.set(FormField::GaugePressure, "20");
        let id = app.add_reading_from_form();
        app.start_edit(id);
        let edit = app.editing.as_mut().unwrap();
        assert_eq!(edit.pressure, "20");
        edit.pressure = "abc".into();
        edit.flow = "12.5".into();
        app.commit_edit();
        assert!(app.editing.is_none());
        let r = app.state.readings.get(id).unwrap().reading;
        assert_eq!(r.gauge_pressure_psi, 0.0);
        assert_eq!(r.flow_rate_m3_per_h, 12.5);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn delete_and_clear_keep_form() {
        let (mut app, path) = temp_app("clear");
        app.state.form.set(FormField::PipeLength, "50");
        let first = app.add_reading_from_form();
        app.add_reading_from_form();
        app.delete_reading(first);
        assert_eq!(app.state.readings.len(), 1);
        app.clear_readings();
        assert!(app.state.readings.is_empty());
        assert_eq!(app.state.form.get(FormField::PipeLength), "50");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn export_writes_header_and_rows() {
        let (mut app, path) = temp_app("export");
        app.add_reading_from_form();
        let csv_path = env::temp_dir().join(format!("pump_gui_{}_export.csv", std::process::id()));
        app.export_csv(&csv_path).unwrap();
        let text = fs::read_to_string(&csv_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(report::CSV_HEADER));
        assert!(lines.next().unwrap().starts_with("1,"));
        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&csv_path);
    }

    #[test]
    fn every_k_field_has_a_fitting() {
        let ks: Vec<_> = FormField::ALL.iter().filter_map(|f| fitting_of(*f)).collect();
        assert_eq!(ks, FittingKind::ALL.to_vec());
    }
}

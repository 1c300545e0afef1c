use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use pump_efficiency_toolbox::{
    app::{self, AppError},
    config,
    i18n::{self, keys, Translator},
    pump::{calculate, parse_number, report, FormField, MeasurementReading, ReadingId},
    store::{AppState, StateStore},
    ui_cli,
};

#[derive(Parser)]
#[command(name = "pump_efficiency_toolbox_cli")]
#[command(about = "Pump efficiency toolbox - hydraulic performance from field measurements", long_about = None)]
struct Cli {
    /// Storage slot file (defaults to the path in config.toml)
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Language code (auto, en-us, ko-kr)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    lang: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// Calculate the current form and every logged reading
    Show {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set one form field (e.g. dia_of_pipe 0.1)
    Set {
        field: String,
        /// New raw value; blank or non-numeric counts as 0
        #[arg(default_value = "")]
        value: String,
    },
    /// Reset the form to defaults (reading log is kept)
    Reset,
    /// Reading log operations
    #[command(subcommand)]
    Log(LogCommands),
    /// Print the head vs flow series (flow descending)
    Curve,
    /// Export logged readings and their results as CSV
    Export {
        /// Output CSV file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// List logged readings with results
    List,
    /// Append a reading (omitted values default to the current form)
    Add(ReadingArgs),
    /// Replace a logged reading
    Update {
        id: ReadingId,
        #[command(flatten)]
        reading: ReadingArgs,
    },
    /// Delete a logged reading
    Remove { id: ReadingId },
    /// Delete every logged reading (form is kept)
    Clear,
}

// 값은 폼 입력과 같은 규칙으로 해석한다 (숫자가 아니면 0)
#[derive(Args)]
struct ReadingArgs {
    /// Motor input power [kW]
    #[arg(long, allow_hyphen_values = true)]
    power: Option<String>,
    /// Flow rate [m3/h]
    #[arg(long, allow_hyphen_values = true)]
    flow: Option<String>,
    /// Pressure gauge value [psi]
    #[arg(long, allow_hyphen_values = true)]
    pressure: Option<String>,
}

impl ReadingArgs {
    fn over(&self, base: MeasurementReading) -> MeasurementReading {
        let pick = |arg: &Option<String>, current: f64| arg.as_deref().map_or(current, parse_number);
        MeasurementReading {
            motor_input_power_kw: pick(&self.power, base.motor_input_power_kw),
            flow_rate_m3_per_h: pick(&self.flow, base.flow_rate_m3_per_h),
            gauge_pressure_psi: pick(&self.pressure, base.gauge_pressure_psi),
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        config::Config::default()
    });
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    if let Err(err) = try_run(cli, &cfg, &tr) {
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli, cfg: &config::Config, tr: &Translator) -> Result<(), AppError> {
    let store = StateStore::new(cli.state.unwrap_or_else(|| PathBuf::from(&cfg.state_file)));
    let mut state = store.load()?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => app::run(&mut state, &store, tr)?,
        Commands::Show { json } => cmd_show(tr, &state, json)?,
        Commands::Set { field, value } => {
            let f = FormField::from_key(&field).ok_or(AppError::UnknownField(field))?;
            state.form.set(f, value);
            store.save(&state)?;
            ui_cli::print_form(tr, &state.form);
        }
        Commands::Reset => {
            store.reset_form(&mut state)?;
            println!("{}", tr.t(keys::FORM_RESET_DONE));
        }
        Commands::Log(cmd) => cmd_log(tr, &store, &mut state, cmd)?,
        Commands::Curve => ui_cli::print_curve(tr, &state),
        Commands::Export { output } => {
            let csv = report::readings_csv(&state.form.configuration(), &state.readings);
            if let Some(path) = output {
                std::fs::write(&path, csv)?;
                println!(
                    "{} {} ({})",
                    tr.t(keys::EXPORT_DONE),
                    path.display(),
                    state.readings.len()
                );
            } else {
                print!("{csv}");
            }
        }
    }
    Ok(())
}

fn cmd_show(tr: &Translator, state: &AppState, json: bool) -> Result<(), AppError> {
    let config = state.form.configuration();
    let live = calculate(&config, &state.form.live_reading());
    if json {
        let logged: Vec<_> = state
            .readings
            .evaluate(&config)
            .into_iter()
            .map(|(id, result)| serde_json::json!({ "id": id, "result": result }))
            .collect();
        let out = serde_json::json!({ "live": live, "readings": logged });
        let text = serde_json::to_string_pretty(&out).map_err(std::io::Error::other)?;
        println!("{text}");
        return Ok(());
    }
    ui_cli::print_form(tr, &state.form);
    ui_cli::print_result(tr, &live);
    ui_cli::print_log(tr, state);
    Ok(())
}

fn cmd_log(
    tr: &Translator,
    store: &StateStore,
    state: &mut AppState,
    cmd: LogCommands,
) -> Result<(), AppError> {
    match cmd {
        LogCommands::List => {
            ui_cli::print_log(tr, state);
            return Ok(());
        }
        LogCommands::Add(args) => {
            let id = state.readings.append(args.over(state.form.live_reading()));
            println!("{} {id}", tr.t(keys::LOG_ADDED));
        }
        LogCommands::Update { id, reading } => {
            let base = state
                .readings
                .get(id)
                .map(|e| e.reading)
                .unwrap_or_default();
            state.readings.update(id, reading.over(base))?;
            println!("{}", tr.t(keys::LOG_UPDATED));
        }
        LogCommands::Remove { id } => {
            state.readings.remove(id)?;
            println!("{}", tr.t(keys::LOG_REMOVED));
        }
        LogCommands::Clear => {
            store.clear_readings(state)?;
            println!("{}", tr.t(keys::LOG_CLEARED));
            return Ok(());
        }
    }
    store.save(state)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_add_args(argv: &[&str]) -> ReadingArgs {
        let mut full = vec!["pump_efficiency_toolbox_cli", "log", "add"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Some(Commands::Log(LogCommands::Add(args))) => args,
            _ => panic!("expected log add"),
        }
    }

    fn base() -> MeasurementReading {
        MeasurementReading {
            motor_input_power_kw: 10.0,
            flow_rate_m3_per_h: 36.0,
            gauge_pressure_psi: 20.0,
        }
    }

    #[test]
    fn reading_flags_follow_form_parse_rules() {
        let r = log_add_args(&["--power", "NaN", "--flow", "abc", "--pressure", "inf"]).over(base());
        assert_eq!(r.motor_input_power_kw, 0.0);
        assert_eq!(r.flow_rate_m3_per_h, 0.0);
        assert_eq!(r.gauge_pressure_psi, 0.0);

        let r = log_add_args(&["--pressure", "-3.5"]).over(base());
        assert_eq!(r.gauge_pressure_psi, -3.5);
        assert_eq!(r.motor_input_power_kw, 10.0);
        assert_eq!(r.flow_rate_m3_per_h, 36.0);
    }

    #[test]
    fn garbage_flags_leave_a_loadable_slot() {
        let path = std::env::temp_dir().join(format!(
            "pump_efficiency_cli_{}_nan.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let store = StateStore::new(&path);
        let mut state = AppState::default();
        let reading = log_add_args(&["--power", "NaN", "--flow", "36", "--pressure", "20"]).over(base());
        let id = state.readings.append(reading);
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.readings.get(id).unwrap().reading.motor_input_power_kw, 0.0);
        let _ = std::fs::remove_file(&path);
    }
}

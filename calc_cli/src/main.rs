//! # buildcalc
//!
//! Terminal host for the BuildCalc calculators.
//!
//! ```text
//! buildcalc list
//! buildcalc search driveway
//! buildcalc run concrete --set length=20 --set width=12 --set thickness=4
//! buildcalc explain paint --set area=600
//! buildcalc prefs set-currency EUR
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use calc_core::engine::{
    read_form, CalculatorEngine, Container, Currency, EngineState, FieldError, FormData, Formatter, InputValues,
    NumberLocale,
};
use calc_core::formulas::generate_formulas_markdown;
use calc_core::registry::{all_calculator_meta, CalculatorId, CalculatorStatus};
use calc_core::search::search;
use calc_core::{load_or_default, save_preferences, CalculatorModule, ConfigLoader, Preferences, Settings};

use crate::render::{describe_field, TextContainer};

/// Construction quantity and cost calculators (ROM estimates).
#[derive(Parser, Debug)]
#[command(name = "buildcalc", version, about)]
struct Cli {
    /// Config file (default: ./buildcalc.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every calculator in the catalog
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search calculators by keyword
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show a calculator's form fields and result rows
    Show { id: String },

    /// Run a calculator
    Run {
        id: String,

        /// Field value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Print the engine state as JSON
        #[arg(long)]
        json: bool,

        /// Start from the inputs saved by the last --remember run
        #[arg(long)]
        recall: bool,

        /// Save the inputs of a successful run
        #[arg(long)]
        remember: bool,
    },

    /// Show the step-by-step derivation for some inputs
    Explain {
        id: String,

        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Print the formula reference as markdown
    Formulas,

    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    Show,
    SetCurrency { code: String },
    SetLocale { tag: String },
    /// Drop the remembered inputs of one calculator
    Forget { id: String },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

fn init_tracing(verbose: u8, settings: &Settings) {
    let filter = match verbose {
        0 => EnvFilter::try_new(&settings.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Settings plus where preferences live.
struct Session {
    settings: Settings,
}

impl Session {
    fn prefs_path(&self) -> &std::path::Path {
        &self.settings.storage.preferences_path
    }

    /// Saved preferences; a broken file is reported and ignored.
    fn preferences(&self) -> Preferences {
        load_or_default(self.prefs_path()).unwrap_or_else(|e| {
            warn!(path = %self.prefs_path().display(), error = %e, "Ignoring unreadable preferences");
            Preferences::new()
        })
    }

    /// Saved preferences for a command that will write them back.
    fn preferences_for_update(&self) -> Result<Preferences> {
        load_or_default(self.prefs_path())
            .with_context(|| format!("cannot update preferences at {}", self.prefs_path().display()))
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        save_preferences(prefs, self.prefs_path())?;
        Ok(())
    }

    fn formatter(&self, prefs: &Preferences) -> Formatter {
        prefs.formatter(self.settings.display.formatter())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    let settings = match loader.load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose, &settings);
    debug!(?settings, "Settings loaded");

    let session = Session { settings };
    match run(&session, cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(session: &Session, command: Command) -> Result<ExitCode> {
    match command {
        Command::List { json } => cmd_list(json)?,
        Command::Search { query } => cmd_search(&query.join(" ")),
        Command::Show { id } => cmd_show(&id)?,
        Command::Run {
            id,
            set,
            json,
            recall,
            remember,
        } => return cmd_run(session, &id, &set, json, recall, remember),
        Command::Explain { id, set } => return cmd_explain(&id, &set),
        Command::Formulas => print!("{}", generate_formulas_markdown()),
        Command::Prefs { action } => cmd_prefs(session, action)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Catalog
// ============================================================================

fn status_label(status: CalculatorStatus) -> &'static str {
    match status {
        CalculatorStatus::Ready => "",
        CalculatorStatus::NotImplemented => "  (coming soon)",
        CalculatorStatus::Unavailable => "  (unavailable)",
    }
}

fn cmd_list(json: bool) -> Result<()> {
    let entries = all_calculator_meta();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let category = entry.category.map_or("", |c| c.display_name());
        println!(
            "  {:<12} {:<30} {}{}",
            entry.id,
            entry.title,
            category,
            status_label(entry.status)
        );
    }
    Ok(())
}

fn cmd_search(query: &str) {
    let hits = search(query);
    if hits.is_empty() {
        println!("No calculators match '{}'.", query);
        return;
    }
    for hit in hits {
        println!(
            "  {:<12} {}{}  {}",
            hit.entry.id,
            hit.entry.title,
            status_label(hit.entry.status),
            hit.entry.description
        );
    }
}

fn cmd_show(id: &str) -> Result<()> {
    let id: CalculatorId = id.parse()?;
    let module = id.module();

    let mut text = TextContainer::new();
    module.init(&mut text);
    print!("{}", text.as_str());

    if !module.outputs().is_empty() {
        println!("Results:");
        for output in module.outputs() {
            println!("  {:<22} {}", output.key, output.label);
        }
    }
    Ok(())
}

// ============================================================================
// Calculation
// ============================================================================

/// Reject `--set` names the calculator does not declare.
fn check_names(module: &dyn CalculatorModule, set: &[(String, String)]) -> Result<()> {
    let fields = module.inputs();
    for (name, _) in set {
        if !fields.iter().any(|f| f.name == name.as_str()) {
            let known: Vec<String> = fields.iter().map(describe_field).collect();
            bail!(
                "{} has no field '{}'. Fields:\n  {}",
                module.meta().id,
                name,
                known.join("\n  ")
            );
        }
    }
    Ok(())
}

fn exit_code(state: &EngineState) -> ExitCode {
    match state {
        EngineState::Idle | EngineState::Computed { .. } => ExitCode::SUCCESS,
        EngineState::Invalid { .. } => ExitCode::from(2),
        EngineState::Failed { .. } => ExitCode::from(3),
        EngineState::Errored { .. } => ExitCode::FAILURE,
    }
}

fn cmd_run(
    session: &Session,
    id: &str,
    set: &[(String, String)],
    json: bool,
    recall: bool,
    remember: bool,
) -> Result<ExitCode> {
    let id: CalculatorId = id.parse()?;
    let module = id.module();
    check_names(module, set)?;

    let mut prefs = if remember {
        session.preferences_for_update()?
    } else {
        session.preferences()
    };

    let mut form = match prefs.inputs_for(id) {
        Some(saved) if recall => FormData::from(saved),
        _ => FormData::new(),
    };
    for (name, value) in set {
        form.set(name.as_str(), value.as_str());
    }

    let mut engine = CalculatorEngine::new(module, session.formatter(&prefs));
    engine.calculate(&form);

    if json {
        println!("{}", serde_json::to_string_pretty(engine.state())?);
    } else {
        let mut text = TextContainer::new();
        engine.render(&mut text);
        print!("{}", text.as_str());
    }

    if remember {
        if let EngineState::Computed { inputs, .. } = engine.state() {
            prefs.remember_inputs(id, inputs);
            session.save(&prefs)?;
            debug!(calculator = %id, "Remembered inputs");
        }
    }

    Ok(exit_code(engine.state()))
}

/// Validated inputs for `explain`. No assignments at all asks the calculator
/// for its "enter a value" prompt.
fn explain_inputs(module: &dyn CalculatorModule, set: &[(String, String)]) -> Result<InputValues, Vec<FieldError>> {
    if set.is_empty() {
        return Ok(InputValues::new());
    }
    let form: FormData = set.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
    read_form(module.inputs(), &form)
}

fn cmd_explain(id: &str, set: &[(String, String)]) -> Result<ExitCode> {
    let id: CalculatorId = id.parse()?;
    let module = id.module();
    check_names(module, set)?;

    match explain_inputs(module, set) {
        Ok(values) => {
            println!("{}", module.explain(&values));
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            debug!(calculator = %id, errors = errors.len(), "Explain inputs rejected");
            let mut text = TextContainer::new();
            text.show_field_errors(&errors);
            print!("{}", text.as_str());
            Ok(exit_code(&EngineState::Invalid { errors }))
        }
    }
}

// ============================================================================
// Preferences
// ============================================================================

fn cmd_prefs(session: &Session, action: PrefsCommand) -> Result<()> {
    match action {
        PrefsCommand::Show => {
            let prefs = session.preferences();
            let formatter = session.formatter(&prefs);
            println!("File:            {}", session.prefs_path().display());
            println!("Currency:        {}", formatter.currency);
            println!("Locale:          {}", formatter.locale);
            if let Some(last) = prefs.last_calculator {
                println!("Last calculator: {}", last);
            }
            for (id, inputs) in &prefs.remembered_inputs {
                let values: Vec<String> = inputs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                println!("  {:<12} {}", id, values.join(" "));
            }
        }
        PrefsCommand::SetCurrency { code } => {
            let currency: Currency = code.parse()?;
            let mut prefs = session.preferences_for_update()?;
            prefs.set_currency(currency);
            session.save(&prefs)?;
            println!("Currency set to {}", currency);
        }
        PrefsCommand::SetLocale { tag } => {
            let locale: NumberLocale = tag.parse()?;
            let mut prefs = session.preferences_for_update()?;
            prefs.set_locale(locale);
            session.save(&prefs)?;
            println!("Locale set to {}", locale);
        }
        PrefsCommand::Forget { id } => {
            let id: CalculatorId = id.parse()?;
            let mut prefs = session.preferences_for_update()?;
            if prefs.forget_inputs(id).is_some() {
                session.save(&prefs)?;
                println!("Forgot inputs for {}", id);
            } else {
                println!("No saved inputs for {}", id);
            }
        }
    }
    Ok(())
}

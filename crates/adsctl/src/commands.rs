//! Command handlers for adsctl
//!
//! Each handler returns an [`Outcome`]. Expected failures (blank input, a
//! failed generation, an unreadable report) are reported here and mapped to
//! their exit code; only unexpected I/O surfaces as an `Err`.

use crate::errors::{
    exit_code_for, Outcome, EXIT_CONFIG_ERROR, EXIT_GENERAL_ERROR, EXIT_INVALID_INPUT,
    EXIT_MALFORMED_RESPONSE,
};
use crate::output::{self, OutputFormat};
use crate::progress::LoadingSpinner;
use crate::session::Session;
use ads_common::clipboard::{copy_targeting, CopyFeedback, SystemClipboard};
use ads_common::config::config_path;
use ads_common::prompt::build_prompt;
use ads_common::schema::report_schema;
use ads_common::{
    export, AdsConfig, AppState, Report, StrategyController, StrategyForm, StrategyService,
    GENERIC_FAILURE_MESSAGE,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-invocation overrides of config file values
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub out_dir: Option<PathBuf>,
}

impl Overrides {
    fn apply(&self, mut config: AdsConfig) -> AdsConfig {
        if let Some(model) = &self.model {
            config.api.model = model.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.export.output_dir = out_dir.clone();
        }
        config
    }
}

/// What to do with a finished report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub csv: bool,
    pub pdf: bool,
    pub copy: bool,
}

fn load_config(overrides: &Overrides) -> AdsConfig {
    let config = overrides.apply(AdsConfig::load());
    tracing::debug!(
        model = %config.api.model,
        out_dir = %config.export.output_dir.display(),
        "Effective configuration"
    );
    config
}

fn invalid_form(form: &StrategyForm) -> Option<Outcome> {
    let e = form.validate().err()?;
    output::display_error(&e.to_string());
    Some(Outcome::failed(EXIT_INVALID_INPUT, e.code(), e.to_string()))
}

/// Print, export and copy a report as requested
fn deliver(report: &Report, options: &ReportOptions, out_dir: &Path) -> Result<Outcome> {
    output::print_report(report, options.format)?;

    let mut outcome = Outcome::ok();

    let mut exports = Vec::new();
    if options.csv {
        exports.push(export::write_csv(report, out_dir));
    }
    if options.pdf {
        exports.push(export::write_pdf(report, out_dir));
    }
    for result in exports {
        match result {
            Ok(path) => output::display_success(&format!("Saved {}", path.display())),
            Err(e) => {
                output::display_error(&e.to_string());
                outcome = Outcome::failed(EXIT_GENERAL_ERROR, e.code(), e.to_string());
            }
        }
    }

    if options.copy {
        let mut feedback = CopyFeedback::default();
        match copy_targeting(report, &mut SystemClipboard::default(), &mut feedback) {
            Ok(()) => output::display_success("Targeting copied to clipboard"),
            Err(e) => {
                output::display_error(&e.to_string());
                outcome = Outcome::failed(EXIT_GENERAL_ERROR, e.code(), e.to_string());
            }
        }
    }

    Ok(outcome)
}

/// `adsctl` / `adsctl interactive`
pub async fn interactive(overrides: &Overrides) -> Result<Outcome> {
    let config = load_config(overrides);
    let service =
        StrategyService::gemini(config.api.clone()).context("Failed to create API client")?;
    let controller = StrategyController::new(service);

    let mut session = Session::new(
        controller,
        std::io::stdin().lock(),
        SystemClipboard::default(),
        config.export.output_dir.clone(),
    );
    session.run().await?;

    Ok(Outcome::ok())
}

/// `adsctl generate`
pub async fn generate(
    form: StrategyForm,
    options: &ReportOptions,
    overrides: &Overrides,
) -> Result<Outcome> {
    if let Some(outcome) = invalid_form(&form) {
        return Ok(outcome);
    }

    let config = load_config(overrides);
    let service =
        StrategyService::gemini(config.api.clone()).context("Failed to create API client")?;
    let mut controller = StrategyController::new(service);

    let spinner = LoadingSpinner::follow(controller.subscribe_status());
    let state = controller.submit(&form).await?;
    let elapsed = spinner.finish();

    match state {
        AppState::Success(report) => {
            tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "Report ready");
            deliver(report, options, &config.export.output_dir)
        }
        _ => {
            output::display_error(GENERIC_FAILURE_MESSAGE);
            let outcome = match controller.last_error_kind() {
                Some(kind) => {
                    Outcome::failed(exit_code_for(kind), kind.as_str(), GENERIC_FAILURE_MESSAGE)
                }
                None => Outcome::failed(EXIT_GENERAL_ERROR, "unknown", GENERIC_FAILURE_MESSAGE),
            };
            Ok(outcome)
        }
    }
}

/// `adsctl render`: re-render or export a saved JSON report
pub fn render(input: &Path, options: &ReportOptions, overrides: &Overrides) -> Result<Outcome> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let report = match Report::from_json(&raw) {
        Ok(report) => report,
        Err(e) => {
            let message = format!("{} is not a valid report: {}", input.display(), e);
            output::display_error(&message);
            return Ok(Outcome::failed(
                EXIT_MALFORMED_RESPONSE,
                "malformed_response",
                message,
            ));
        }
    };

    let config = load_config(overrides);
    deliver(&report, options, &config.export.output_dir)
}

/// `adsctl prompt`
pub fn prompt(form: StrategyForm) -> Result<Outcome> {
    if let Some(outcome) = invalid_form(&form) {
        return Ok(outcome);
    }
    println!("{}", build_prompt(&form.product, &form.location, &form.budget));
    Ok(Outcome::ok())
}

/// `adsctl schema`
pub fn schema() -> Result<Outcome> {
    println!("{}", serde_json::to_string_pretty(&report_schema())?);
    Ok(Outcome::ok())
}

/// `adsctl config [--init]`
pub fn config(init: bool) -> Result<Outcome> {
    let path = config_path();

    if init {
        if path.exists() {
            output::display_warning(&format!("{} already exists, leaving it unchanged", path.display()));
            return Ok(Outcome::ok());
        }
        let written = AdsConfig::default()
            .save()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        output::display_success(&format!("Wrote {}", written.display()));
        return Ok(Outcome::ok());
    }

    let config = if path.exists() {
        match AdsConfig::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                output::display_error(&e.to_string());
                return Ok(Outcome::failed(EXIT_CONFIG_ERROR, e.code(), e.to_string()));
            }
        }
    } else {
        output::display_info(&format!("{} not found, showing defaults", path.display()));
        AdsConfig::default()
    };

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);

    let key_state = match std::env::var(&config.api.api_key_env) {
        Ok(key) if !key.trim().is_empty() => "set",
        _ => "not set",
    };
    output::display_info(&format!("{} is {}", config.api.api_key_env, key_state));

    Ok(Outcome::ok())
}

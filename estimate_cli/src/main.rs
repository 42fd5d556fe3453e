//! # Coatwise CLI
//!
//! Command-line front end for `estimate_core`: quote a request file, check it
//! for silently-defaulted input, and manage saved estimate documents.
//!
//! ```text
//! coatwise quote kitchen.json
//! coatwise validate - < kitchen.json
//! coatwise new smith.estimate.json --title "Smith kitchen" --from kitchen.json
//! coatwise recalc smith.estimate.json --strict
//! coatwise defaults --format json
//! ```

mod config;
mod logging;
mod output;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use estimate_core::document::EstimateDocument;
use estimate_core::errors::EstimateError;
use estimate_core::estimate::Estimator;
use estimate_core::file_io::{
    load_document, load_request, parse_request, save_document, DocumentLock,
};
use estimate_core::input::EstimateRequest;
use estimate_core::settings::{EstimateSettings, SettingsOverrides};
use estimate_core::validation::{ensure_valid, validate_request};
use serde_json::json;

use crate::config::{Config, CONFIG_ENV};
use crate::output::{DefaultsView, IssuesView, ReportView, TotalsView};

#[derive(Parser)]
#[command(name = "coatwise", version, about = "Painting estimate calculator")]
struct Cli {
    /// Config file with stored defaults and rate overrides
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    /// Log as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute totals for a request file (`-` for stdin)
    Quote {
        request: PathBuf,
        /// Refuse input the engine would silently default
        #[arg(long, default_value_t = false)]
        strict: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List everything in a request the engine would silently default
    Validate { request: PathBuf },
    /// Create an estimate document
    New {
        path: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        lead_id: Option<i64>,
        /// Start from this request file instead of an empty estimate
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Lock, reload, recompute and save an estimate document
    Recalc {
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        strict: bool,
        /// Name recorded in the lock file (defaults to the login name)
        #[arg(long)]
        user: Option<String>,
    },
    /// Show effective settings and rates
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(estimate_err) = err.downcast_ref::<EstimateError>() {
                if let Ok(details) = serde_json::to_string(estimate_err) {
                    eprintln!("{details}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = Config::load(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    execute(cli.command, &config, &mut stdout.lock())
}

/// Run one subcommand, writing its report to `out`. Returns the exit code.
fn execute(command: Command, config: &Config, out: &mut impl Write) -> Result<u8> {
    let estimator = Estimator::new(config.rates);

    match command {
        Command::Quote { request, strict, format } => {
            let request = read_request(&request)?;
            check_request(&request, strict)?;

            let report = estimator.quote(&request, &config.defaults);
            match format {
                Format::Text => write!(out, "{}", ReportView(&report))?,
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
            }
            Ok(0)
        }
        Command::Validate { request } => {
            let issues = validate_request(&read_request(&request)?);
            write!(out, "{}", IssuesView(&issues))?;
            Ok(if issues.is_empty() { 0 } else { 1 })
        }
        Command::New {
            path,
            title,
            lead_id,
            from,
        } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            let mut doc = match from {
                Some(source) => {
                    EstimateDocument::from_request(title, lead_id, read_request(&source)?)
                }
                None => EstimateDocument::new(title, lead_id),
            };
            doc.recompute(&estimator, &config.defaults);
            save_document(&doc, &path)?;
            writeln!(out, "{} -> {}", doc.meta.estimate_number, path.display())?;
            Ok(0)
        }
        Command::Recalc { path, strict, user } => {
            let user = user.unwrap_or_else(whoami::username);
            let _lock = DocumentLock::acquire(&path, user)?;

            let mut doc = load_document(&path)?;
            check_request(&doc.request, strict)?;
            let totals = *doc.recompute(&estimator, &config.defaults);
            save_document(&doc, &path)?;

            writeln!(out, "{} {}", doc.meta.estimate_number, doc.meta.project_title)?;
            write!(out, "{}", TotalsView(&totals))?;
            Ok(0)
        }
        Command::Defaults { format } => {
            let settings =
                EstimateSettings::resolve(&SettingsOverrides::default(), &config.defaults);
            match format {
                Format::Text => write!(
                    out,
                    "{}",
                    DefaultsView {
                        settings: &settings,
                        rates: estimator.rates(),
                    }
                )?,
                Format::Json => {
                    let json = json!({ "settings": settings, "rates": estimator.rates() });
                    writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
                }
            }
            Ok(0)
        }
    }
}

/// Read a request from a file, or stdin when the path is `-`.
fn read_request(path: &Path) -> Result<EstimateRequest> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading request from stdin")?;
        return Ok(parse_request(&text)?);
    }
    load_request(path).with_context(|| format!("loading request {}", path.display()))
}

/// Strict mode fails on any issue; otherwise issues are only logged.
fn check_request(request: &EstimateRequest, strict: bool) -> Result<()> {
    if strict {
        ensure_valid(request)?;
        return Ok(());
    }
    for issue in validate_request(request) {
        tracing::warn!(path = %issue.path, kind = ?issue.kind, "{}", issue.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from(["coatwise", "quote", "-", "--strict", "--format", "json"])
            .unwrap();
        match cli.command {
            Command::Quote { request, strict, format } => {
                assert_eq!(request, PathBuf::from("-"));
                assert!(strict);
                assert_eq!(format, Format::Json);
            }
            _ => panic!("expected quote"),
        }
    }

    #[test]
    fn test_parse_new_requires_title() {
        assert!(Cli::try_parse_from(["coatwise", "new", "a.json"]).is_err());
        let cli = Cli::try_parse_from([
            "coatwise", "new", "a.json", "--title", "Porch", "--lead-id", "9",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::New { lead_id: Some(9), .. }));
    }

    #[test]
    fn test_strict_check_fails_on_issues() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{ "areas": [{ "prepItems": [{ "prepType": "sanding", "quantity": 1 }] }] }"#,
        )
        .unwrap();
        assert!(check_request(&request, false).is_ok());
        let err = check_request(&request, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EstimateError>(),
            Some(EstimateError::ValidationFailed { .. })
        ));
    }

    const KITCHEN: &str = r#"{
        "settings": { "setupMinutesPerArea": 0, "cleanupBufferPct": 0 },
        "areas": [{
            "name": "Kitchen",
            "surfaces": [{ "surfaceType": "trim", "unit": "lf", "measurement": 120 }]
        }]
    }"#;

    fn run_command(command: Command, config: &Config) -> Result<(u8, String)> {
        let mut out = Vec::new();
        let code = execute(command, config, &mut out)?;
        Ok((code, String::from_utf8(out).unwrap()))
    }

    fn write_request(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("request.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn new_estimate(path: &Path, from: Option<PathBuf>) -> Command {
        Command::New {
            path: path.to_path_buf(),
            title: "Smith kitchen".to_string(),
            lead_id: Some(7),
            from,
        }
    }

    fn recalc(path: &Path, user: &str) -> Command {
        Command::Recalc {
            path: path.to_path_buf(),
            strict: false,
            user: Some(user.to_string()),
        }
    }

    #[test]
    fn test_quote_json() {
        let dir = TempDir::new().unwrap();
        let request = write_request(&dir, KITCHEN);
        let command = Command::Quote {
            request,
            strict: true,
            format: Format::Json,
        };

        let (code, out) = run_command(command, &Config::default()).unwrap();
        assert_eq!(code, 0);
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        // 120 lf at 60 lf/hr, one coat
        assert_eq!(report["totals"]["laborHours"], json!(2.0));
        assert_eq!(report["areas"][0]["name"], json!("Kitchen"));
    }

    #[test]
    fn test_validate_exit_codes() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let clean = write_request(&dir, KITCHEN);
        let (code, out) = run_command(Command::Validate { request: clean }, &config).unwrap();
        assert_eq!(code, 0);
        assert_eq!(out, "No issues found\n");

        let sloppy = write_request(
            &dir,
            r#"{ "areas": [{ "prepItems": [{ "prepType": "sanding", "quantity": 2 }] }] }"#,
        );
        let (code, out) = run_command(Command::Validate { request: sloppy }, &config).unwrap();
        assert_eq!(code, 1);
        assert!(out.contains("areas[0].prepItems[0].prepType"));
    }

    #[test]
    fn test_new_then_recalc_saves_totals_and_releases_lock() {
        let dir = TempDir::new().unwrap();
        let request = write_request(&dir, KITCHEN);
        let path = dir.path().join("smith.json");

        let (code, out) =
            run_command(new_estimate(&path, Some(request)), &Config::default()).unwrap();
        assert_eq!(code, 0);
        assert!(out.starts_with("EST-"));
        let created = load_document(&path).unwrap();
        assert_eq!(created.totals.unwrap().labor_cost, 70.0);

        let config = Config::parse("[defaults]\ncrew_hourly_cost = 60\n").unwrap();
        let (code, out) = run_command(recalc(&path, "dana"), &config).unwrap();
        assert_eq!(code, 0);
        assert!(out.contains("Smith kitchen"));

        let saved = load_document(&path).unwrap();
        let totals = saved.totals.unwrap();
        assert_eq!(totals.labor_hours, 2.0);
        assert_eq!(totals.labor_cost, 120.0);
        assert_eq!(saved.meta.id, created.meta.id);
        assert!(!dir.path().join("smith.json.lock").exists());
        assert!(DocumentLock::check(&path).is_none());
    }

    #[test]
    fn test_new_refuses_existing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("smith.json");
        run_command(new_estimate(&path, None), &Config::default()).unwrap();

        let err = run_command(new_estimate(&path, None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_recalc_blocked_by_live_lock() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("smith.json");
        run_command(new_estimate(&path, None), &Config::default()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let held = DocumentLock::acquire(&path, "dana").unwrap();
        let err = run_command(recalc(&path, "sam"), &Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EstimateError>(),
            Some(EstimateError::FileLocked { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

        drop(held);
        assert_eq!(run_command(recalc(&path, "sam"), &Config::default()).unwrap().0, 0);
    }

    #[test]
    fn test_defaults_reflect_config() {
        let config =
            Config::parse("[defaults]\nmarkup_pct = 15\n[rates]\ntrim = { roll = 70 }\n").unwrap();
        let (code, out) = run_command(Command::Defaults { format: Format::Json }, &config).unwrap();
        assert_eq!(code, 0);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["settings"]["markupPct"], json!(15.0));
        assert_eq!(json["rates"]["trim"]["roll"], json!(70.0));
        assert_eq!(json["rates"]["trim"]["spray"], json!(80.0));
    }
}

// PriceLens CLI - Open-PO vs Workbench price reconciliation

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pricelens_recon::{engine, export, ingest, EngineConfig, ReconError};

use exit_codes::{
    EXIT_INVALID_CONFIG, EXIT_NO_MATCHES, EXIT_RUNTIME, EXIT_SCHEMA, EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "plens")]
#[command(about = "Reconcile Open-PO and Workbench extracts, rank price impact")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation over two CSV extracts
    #[command(after_help = "\
Examples:
  plens run --open-po open_po.csv --workbench workbench.csv
  plens run --open-po open_po.csv --workbench workbench.csv --json
  plens run --open-po open_po.csv --workbench workbench.csv --export ranked.csv
  plens run --open-po open_po.csv --workbench workbench.csv --config rates.toml --output result.json")]
    Run {
        /// Open-PO report extract (CSV)
        #[arg(long)]
        open_po: PathBuf,

        /// Workbench catalog extract (CSV)
        #[arg(long)]
        workbench: PathBuf,

        /// Engine config TOML (rates, markers); defaults are built in
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON result to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON result to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the impact-ranked table as CSV
        #[arg(long)]
        export: Option<PathBuf>,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate an engine config without running
    #[command(after_help = "\
Examples:
  plens validate rates.toml")]
    Validate {
        /// Path to the engine config TOML
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { open_po, workbench, config, json, output, export, quiet } => {
            cmd_run(open_po, workbench, config, json, output, export, quiet)
        }
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self::new(EXIT_RUNTIME, msg)
    }

    /// Map an engine error to its exit-code domain.
    fn engine(err: ReconError) -> Self {
        let code = match &err {
            ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
            ReconError::MissingColumn { .. } => EXIT_SCHEMA,
            ReconError::NumberParse { .. } | ReconError::Csv(_) | ReconError::Io(_) => {
                EXIT_RUNTIME
            }
        };
        let hint = match &err {
            ReconError::MissingColumn { .. } => {
                Some("check the extract headers; names are matched after whitespace trimming".into())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    open_po_path: PathBuf,
    workbench_path: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = match config_path {
        Some(ref path) => {
            let config_str = std::fs::read_to_string(path)
                .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;
            EngineConfig::from_toml(&config_str).map_err(CliError::engine)?
        }
        None => EngineConfig::default(),
    };

    let po_csv = std::fs::read_to_string(&open_po_path).map_err(|e| {
        CliError::runtime(format!("cannot read {}: {e}", open_po_path.display()))
    })?;
    let wb_csv = std::fs::read_to_string(&workbench_path).map_err(|e| {
        CliError::runtime(format!("cannot read {}: {e}", workbench_path.display()))
    })?;

    let po_rows = ingest::load_open_po(&po_csv).map_err(CliError::engine)?;
    let wb_rows = ingest::load_workbench(&wb_csv).map_err(CliError::engine)?;

    let result = engine::run(&config, &po_rows, &wb_rows);

    // Output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if let Some(ref path) = export_file {
        let file = std::fs::File::create(path)
            .map_err(|e| CliError::runtime(format!("cannot write export: {e}")))?;
        export::write_csv(&result.rows, file).map_err(CliError::engine)?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    if !quiet {
        print_summary(&config, &result);
    }

    if result.rows.is_empty() {
        return Err(CliError::new(
            EXIT_NO_MATCHES,
            "no rows matched the analysis criteria",
        ));
    }

    Ok(())
}

fn print_summary(config: &EngineConfig, result: &pricelens_recon::ReconResult) {
    let Some(ref s) = result.summary else {
        eprintln!("recon '{}': 0 rows — no matching data", result.meta.config_name);
        return;
    };

    let ccy = &config.reference_currency;
    eprintln!(
        "recon '{}': {} rows — impact {:.2} {ccy}, open PO value {:.2} {ccy}, {} parts, {} vendors",
        result.meta.config_name,
        result.rows.len(),
        s.total_impact,
        s.total_open_po_value,
        s.distinct_parts,
        s.distinct_vendors,
    );

    for g in &s.top_vendors {
        eprintln!("  vendor   {:<40} {:>14.2}", g.key, g.impact);
    }
    for g in &s.top_categories {
        eprintln!("  category {:<40} {:>14.2}", g.key, g.impact);
    }
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    let config = EngineConfig::from_toml(&config_str).map_err(CliError::engine)?;
    eprintln!(
        "valid: '{}' — reference currency {}, {} rate(s), {} marker(s)",
        config.name,
        config.reference_currency,
        config.rates.len(),
        config.internal_vendor_markers.len(),
    );
    Ok(())
}

// LogTriage - main.rs
//
// Command-line host. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Controller construction with the real HTTP transport and save sink
// 4. Starting the background health check
// 5. Running the requested workflow and writing the rendered page/exports

use clap::{Parser, Subcommand};
use logtriage::app::controller::{Controller, ControllerSettings};
use logtriage::app::health::HealthMonitor;
use logtriage::app::state::{AnalyzePhase, DownloadPhase, SelectedFile};
use logtriage::core::export;
use logtriage::platform::config::{self, AppConfig, PlatformPaths};
use logtriage::platform::http::HttpTransport;
use logtriage::platform::save::DirectorySink;
use logtriage::ui::page;
use logtriage::util::constants;
use logtriage::util::error::{Result, TriageError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// LogTriage - submit alert logs to the risk analyzer and review the report.
#[derive(Parser, Debug)]
#[command(name = "logtriage", version, about)]
struct Cli {
    /// Analyzer base URL (overrides [server] base_url).
    #[arg(short = 's', long = "server", global = true)]
    server: Option<String>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ping the analyzer's liveness endpoint.
    Health,

    /// Analyze a CSV/XLSX/XLS alert file and render the risk report.
    Analyze {
        /// File to upload.
        file: PathBuf,

        /// Write the rendered report page here.
        #[arg(long)]
        html: Option<PathBuf>,

        /// Export the decoded report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Export the high-risk preview as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also download the full prediction CSV after a successful analysis.
        #[arg(long)]
        download: bool,

        /// Directory for the downloaded CSV (overrides [download] output_dir).
        #[arg(short = 'o', long = "out-dir")]
        out_dir: Option<PathBuf>,
    },

    /// Download the full prediction CSV for a file.
    Download {
        /// File to upload.
        file: PathBuf,

        /// Directory for the downloaded CSV (overrides [download] output_dir).
        #[arg(short = 'o', long = "out-dir")]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is read before logging exists so its level can apply; its
    // warnings are replayed once the subscriber is installed.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (mut app_config, config_warnings) = config::load_config(&config_path);

    logtriage::util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogTriage starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(server) = cli.server.as_deref() {
        if !config::is_http_url(server) {
            eprintln!("Error: --server must be an http:// or https:// URL, got '{server}'");
            return ExitCode::from(2);
        }
        app_config.server_url = server.to_string();
    }

    match run(cli.command, &app_config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, app_config: &AppConfig) -> Result<ExitCode> {
    let transport = HttpTransport::new(
        &app_config.server_url,
        Duration::from_secs(app_config.connect_timeout_secs),
    )
    .map_err(|e| TriageError::Workflow(e.into()))?;

    // The health check runs beside the workflows; only `health` waits for it.
    let monitor = HealthMonitor::spawn(transport.clone());
    let mut controller = Controller::new(ControllerSettings::from(app_config));

    match command {
        Command::Health => {
            if let Some(status) = monitor.wait() {
                controller.show_health(status);
            }
            print_status(&controller, app_config);
            Ok(ExitCode::SUCCESS)
        }

        Command::Analyze {
            file,
            html,
            json,
            csv,
            download,
            out_dir,
        } => {
            controller.select_file(SelectedFile::from_path(&file)?);

            let phase = controller.analyze(&transport);
            report_outcome(&controller);

            controller.poll_health(&monitor);
            print_status(&controller, app_config);

            if let Some(path) = html.as_deref() {
                write_page(&controller, path)?;
            }

            let Some(report) = controller.session.last_report.as_ref() else {
                return Ok(ExitCode::FAILURE);
            };

            if let Some(path) = json.as_deref() {
                let rows = export_to(path, |w| export::export_report_json(report, w, path))?;
                println!("Report JSON written to {} ({rows} preview rows)", path.display());
            }
            if let Some(path) = csv.as_deref() {
                let rows = export_to(path, |w| export::export_preview_csv(report, w, path))?;
                println!("High-risk preview written to {} ({rows} rows)", path.display());
            }

            if download {
                let mut sink = DirectorySink::new(output_dir(out_dir, app_config));
                if controller.download(&transport, &mut sink) == DownloadPhase::Error {
                    eprintln!("{}", controller.view.error.message());
                    return Ok(ExitCode::FAILURE);
                }
                print_download(&controller);
            }

            Ok(if phase == AnalyzePhase::Rendered {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Download { file, out_dir } => {
            controller.select_file(SelectedFile::from_path(&file)?);
            let mut sink = DirectorySink::new(output_dir(out_dir, app_config));

            let phase = controller.download(&transport, &mut sink);
            controller.poll_health(&monitor);
            print_status(&controller, app_config);

            match phase {
                DownloadPhase::Downloaded => {
                    print_download(&controller);
                    Ok(ExitCode::SUCCESS)
                }
                _ => {
                    eprintln!("{}", controller.view.error.message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_status(controller: &Controller, app_config: &AppConfig) {
    println!("Service ({}): {}", app_config.server_url, controller.view.status);
}

/// CLI flag > config > current directory.
fn output_dir(cli_dir: Option<PathBuf>, app_config: &AppConfig) -> PathBuf {
    cli_dir
        .or_else(|| app_config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Print the analysis outcome the way the viewer would show it.
fn report_outcome(controller: &Controller) {
    if controller.view.error.is_visible() {
        eprintln!("{}", controller.view.error.message());
        return;
    }
    let Some(report) = controller.session.last_report.as_ref() else {
        return;
    };

    let stats = &report.stats;
    println!("{}", controller.view.report.risk_grade);
    println!("  {:<24}{}", constants::METRIC_TOTAL, stats.total);
    println!(
        "  {:<24}{} ({})",
        constants::METRIC_HIGH,
        stats.high,
        logtriage::core::render::format_percent(stats.high_ratio)
    );
    println!(
        "  {:<24}{} ({})",
        constants::METRIC_MID,
        stats.mid,
        logtriage::core::render::format_percent(stats.mid_ratio)
    );
    println!("  {:<24}{}", constants::METRIC_LOW, stats.low);
    println!("  {:<24}{}", constants::METRIC_NORMAL, stats.normal);
    println!("  High-risk preview rows: {}", report.preview_len());
}

fn print_download(controller: &Controller) {
    if let Some(path) = controller.session.last_download.as_ref() {
        println!("Prediction CSV saved to {}", path.display());
    }
}

fn write_page(controller: &Controller, path: &Path) -> Result<()> {
    let html = page::render_page(&controller.view, &controller.session, chrono::Local::now());
    std::fs::write(path, html).map_err(|e| TriageError::Io {
        path: path.to_path_buf(),
        operation: "write report page",
        source: e,
    })?;
    println!("Report page written to {}", path.display());
    Ok(())
}

/// Create `path` and hand a buffered writer to `export`.
fn export_to<F>(path: &Path, export: F) -> Result<usize>
where
    F: FnOnce(std::io::BufWriter<std::fs::File>) -> std::result::Result<usize, logtriage::util::error::ExportError>,
{
    let file = std::fs::File::create(path).map_err(|e| TriageError::Io {
        path: path.to_path_buf(),
        operation: "create export file",
        source: e,
    })?;
    Ok(export(std::io::BufWriter::new(file))?)
}

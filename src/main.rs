//! Narcissus - Reflected XSS Scanner CLI

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;
use url::Url;

use narcissus::config;
use narcissus::models::{ScanConfig, ScanReport, Surface};
use narcissus::payloads::load_payloads;
use narcissus::report;
use narcissus::scanner;

/// Narcissus - Reflected XSS Scanner
#[derive(Parser)]
#[command(name = "narcissus", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reflected XSS scan against a target URL
    Scan {
        /// Target URL to scan
        #[arg(short, long)]
        target: String,

        /// Path to the payload list (one payload per line)
        #[arg(short, long)]
        payloads: Option<String>,

        /// Worker pool width
        #[arg(long, default_value_t = 10)]
        threads: usize,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Output file path (default: narcissus_{hostname}.html)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (html or json)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Display name stamped on generated reports
        #[arg(long)]
        name: Option<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with code 1 if any payload is reflected
        #[arg(long)]
        fail_on_vuln: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a report from a previous scan's JSON output
    Report {
        /// Path to the JSON results file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (html or json)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long, default_value = "narcissus_report.html")]
        output: String,
    },
}

fn output_name_from_target(target: &str, ext: &str) -> String {
    if let Ok(url) = Url::parse(target) {
        let host = url.host_str().unwrap_or("unknown");
        let sanitized: String = host
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect();
        format!("narcissus_{sanitized}.{ext}")
    } else {
        format!("narcissus_report.{ext}")
    }
}

fn print_banner() {
    let banner = r#"
    ╔═══════════════════════════════════════╗
    ║  🪞 NARCISSUS v0.1.0                 ║
    ║  Reflected XSS Scanner               ║
    ║  "Every reflection gets noticed"     ║
    ╚═══════════════════════════════════════╝
    "#;
    println!("{}", banner.cyan());
}

fn surface_group(surface: &Surface) -> &'static str {
    match surface {
        Surface::Get => "GET",
        Surface::Form(_) => "FORMS",
        Surface::Headers => "HEADERS",
        Surface::Cookies => "COOKIES",
    }
}

fn print_summary(report: &ScanReport) {
    let vulnerable = report.vulnerable_count();
    let clean = report.clean_count();
    let errors = report.error_count();

    println!("\n{}", "  Scan Summary".bold());
    println!("  {}", "─".repeat(35));

    let mut builder = Builder::default();
    builder.push_record(["Surface", "Tested", "Vulnerable", "Errors"]);
    for group in ["GET", "FORMS", "HEADERS", "COOKIES"] {
        let in_group: Vec<_> = report
            .results
            .iter()
            .filter(|r| surface_group(&r.surface) == group)
            .collect();
        builder.push_record([
            group.to_string(),
            in_group.len().to_string(),
            in_group.iter().filter(|r| r.vulnerable).count().to_string(),
            in_group.iter().filter(|r| r.is_error()).count().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");

    println!(
        "\n  {} {} {}",
        format!("{vulnerable} Vulnerable").red().bold(),
        format!("{clean} Clean").green(),
        format!("{errors} Errors").yellow(),
    );

    let reflected: Vec<_> = report.results.iter().filter(|r| r.vulnerable).collect();
    if !reflected.is_empty() {
        println!("\n{}", "  Reflected Payloads".bold());
        for r in reflected {
            println!(
                "    {} {}",
                format!("[{}]", r.surface).red().bold(),
                r.payload
            );
            println!("      {}", r.tested_url.dimmed());
        }
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            target,
            payloads,
            threads,
            timeout,
            output,
            format,
            name,
            config: config_path,
            fail_on_vuln,
            verbose,
        } => {
            let filter = if verbose {
                "narcissus=debug"
            } else {
                "narcissus=info"
            };
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_target(false)
                .init();

            print_banner();

            let mut scan_config = if let Some(ref path) = config_path {
                config::load_config(path)?
            } else {
                let default_path = Path::new("config/default.toml");
                if default_path.exists() {
                    config::load_config(default_path)?
                } else {
                    ScanConfig::default()
                }
            };

            config::merge_cli_args(
                &mut scan_config,
                target,
                payloads,
                Some(threads),
                Some(timeout),
                name,
            );

            println!("  {} {}", "Target:".bold(), scan_config.target.green());
            println!(
                "  {} {}",
                "Payloads:".bold(),
                scan_config.payloads_path.cyan()
            );
            println!(
                "  {} {}\n",
                "Threads:".bold(),
                scan_config.threads.to_string().cyan()
            );

            let payload_list = load_payloads(Path::new(&scan_config.payloads_path));
            let scan_report = scanner::scan(&scan_config, &payload_list).await?;

            print_summary(&scan_report);

            let output_file = output.unwrap_or_else(|| {
                let ext = if format == "json" { "json" } else { "html" };
                output_name_from_target(&scan_config.target, ext)
            });
            let output_path = Path::new(&output_file);
            match format.as_str() {
                "json" => {
                    report::json::export(&scan_report, output_path)?;
                }
                _ => {
                    report::html::generate(&scan_report, output_path)?;
                    let json_path = output_path.with_extension("json");
                    report::json::export(&scan_report, &json_path)?;
                }
            }

            println!("\n  {} {}", "Report saved to:".bold(), output_file.green());

            if fail_on_vuln && scan_report.vulnerable_count() > 0 {
                println!(
                    "\n  {} {} payload reflection(s) detected.",
                    "FAIL:".red().bold(),
                    scan_report.vulnerable_count()
                );
                std::process::exit(1);
            }
        }

        Commands::Report {
            input,
            format,
            output,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("narcissus=info"))
                .with_target(false)
                .init();

            print_banner();

            let scan_report = report::json::load(&input)?;
            let output_path = Path::new(&output);

            match format.as_str() {
                "json" => {
                    report::json::export(&scan_report, output_path)?;
                }
                _ => {
                    report::html::generate(&scan_report, output_path)?;
                }
            }

            print_summary(&scan_report);
            println!("\n  {} {}", "Report saved to:".bold(), output.green());
        }
    }

    Ok(())
}

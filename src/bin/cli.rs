//! dashkit CLI
//!
//! Offline companion to the server:
//! - Render a page to HTML or view JSON
//! - Export the sample data
//! - Summarize a CSV file
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

use dashkit::config::{Config, LoadReport};
use dashkit::data::{generate, rng_for, summarize, UploadSummary};
use dashkit::nav::{NavigationState, Page, RenderContext, Theme};
use dashkit::render::{render_page, PageBody};
use dashkit::view::{route, ViewInputs};

#[derive(Parser)]
#[command(name = "dashkit-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline tools for the dashkit dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormat {
    Html,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DataFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SummaryFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one page
    Render {
        /// Page: home, data-visualization, interactive-demo, about
        #[arg(default_value = "home")]
        page: String,
        /// Theme: light or dark (default: from config)
        #[arg(short, long)]
        theme: Option<String>,
        /// Include code snippets
        #[arg(long)]
        show_code: bool,
        /// Sample data seed (default: from config)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value = "html")]
        format: RenderFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the generated sample data
    Sample {
        /// Year to generate (default: from config)
        #[arg(short, long)]
        year: Option<i32>,
        /// RNG seed (default: from config, else random)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: DataFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the first rows and statistics of a CSV file
    Summarize {
        /// Path to CSV file
        path: PathBuf,
        #[arg(short, long, value_enum, default_value = "table")]
        format: SummaryFormat,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, report) = match &cli.config {
        Some(path) => (
            Config::load_with_env(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            LoadReport::from_file(path),
        ),
        None => Config::load_default(),
    };
    dashkit::logging::init_stderr(&config.logging);
    report.log();

    match cli.command {
        Commands::Render {
            page,
            theme,
            show_code,
            seed,
            format,
            output,
        } => {
            let theme = match theme {
                Some(t) => t.parse::<Theme>()?,
                None => config.ui.default_theme,
            };
            let nav = NavigationState::new(page.parse::<Page>()?)
                .theme(theme)
                .show_code(show_code);
            let ctx = RenderContext::from_ui(nav, &config.ui);

            let sample = if nav.page.needs_sample_data() {
                let mut rng = rng_for(seed.or(config.sample.seed));
                Some(generate(config.sample.year, &mut rng)?)
            } else {
                None
            };
            let inputs = ViewInputs {
                sample: sample.as_ref(),
                ..Default::default()
            };
            let view = route(&ctx, &inputs)?;

            let rendered = match format {
                RenderFormat::Html => render_page(&ctx, PageBody::View(&view)),
                RenderFormat::Json => serde_json::to_string_pretty(&view)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }

        Commands::Sample {
            year,
            seed,
            format,
            output,
        } => {
            let year = year.unwrap_or(config.sample.year);
            let mut rng = rng_for(seed.or(config.sample.seed));
            let series = generate(year, &mut rng)?;

            let rendered = match format {
                DataFormat::Csv => series.to_csv()?,
                DataFormat::Json => serde_json::to_string_pretty(&series)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }

        Commands::Summarize { path, format } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let summary = summarize(&bytes)
                .with_context(|| format!("Could not summarize {}", path.display()))?;

            match format {
                SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                SummaryFormat::Table => print_summary(&summary),
            }
        }

        Commands::Config { output } => {
            let config = dashkit::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn print_summary(summary: &UploadSummary) {
    println!("{} rows x {} columns", summary.rows, summary.columns.len());
    println!();

    let head: Vec<Vec<String>> = summary
        .head
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            std::iter::once(idx.to_string())
                .chain(row.iter().map(|cell| cell.to_string()))
                .collect()
        })
        .collect();
    print_table(&summary.columns, &head);

    let description = &summary.description;
    let columns: Vec<String> = description.columns().iter().map(|c| c.to_string()).collect();
    if columns.is_empty() {
        return;
    }

    println!();
    println!("Statistics:");
    let rows: Vec<Vec<String>> = description
        .rows()
        .into_iter()
        .map(|(stat, values)| std::iter::once(stat.to_string()).chain(values).collect())
        .collect();
    print_table(&columns, &rows);
}

/// Print rows whose first cell is an index label under `headers`
fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = std::iter::once(0)
        .chain(headers.iter().map(|h| h.chars().count()))
        .collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }
    }

    let header_line: Vec<String> = std::iter::once(String::new())
        .chain(headers.iter().cloned())
        .zip(&widths)
        .map(|(h, w)| format!("{:>width$}", h, width = *w))
        .collect();
    println!("{}", header_line.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
            .collect();
        println!("{}", line.join("  "));
    }
}

mod render;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::Parser;
use hourglass_core::{
    Config, DrillDownFilter, Journal, Period, aggregate, drill_down,
    render::{format_drill_down, format_report},
    resolve_dates,
};
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::{fs, process::ExitCode};

/// hourglass — insights for an hourly time journal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Journal snapshot JSON file (defaults to the configured path)
    #[arg(long, short, env = "HOURGLASS_JOURNAL")]
    file: Option<PathBuf>,
    /// Analysis window (e.g. `today`, `7d`, `last-30-days`, `all`, `custom`)
    #[arg(long, short, default_value = "today")]
    period: Period,
    /// Custom range start, inclusive (e.g. `2025-08-01`)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,
    /// Custom range end, inclusive (e.g. `2025-08-15`)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
    /// Show the records carrying this tag instead of the report
    #[arg(long, conflicts_with_all = ["date", "hour"])]
    tag: Option<String>,
    /// Show one date's records instead of the report
    #[arg(long, conflicts_with = "hour")]
    date: Option<NaiveDate>,
    /// Show one hour-of-day's records instead of the report
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
    hour: Option<u8>,
    /// Reference date used as "today" (defaults to the system clock)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Emit JSON instead of rendered Markdown
    #[arg(long)]
    json: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hourglass: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(RenderOptions { use_color });

    let snapshot_path = cli.file.clone().unwrap_or_else(|| config.journal_file.clone());
    let journal = load_journal(&snapshot_path)?;

    let custom = match (cli.from, cli.to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ => None,
    };
    if cli.period == Period::Custom && custom.is_none() {
        bail!("--period custom requires --from and --to");
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let target_dates = resolve_dates(cli.period, custom, today, &journal.known_dates());

    if let Some(filter) = drill_down_filter(&cli) {
        let records = drill_down(&journal, &target_dates, &filter);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else if records.is_empty() {
            renderer.print_info("No matching records.");
        } else {
            renderer.print_info(&format!("{} matching records.", records.len()));
            renderer.print_md(&format_drill_down(&records, &config.date_format));
        }
        return Ok(());
    }

    let result = aggregate(&journal, &target_dates, &config.categories());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        renderer.print_md(&format_report(&result, &config.date_format));
    }
    Ok(())
}

fn drill_down_filter(cli: &Cli) -> Option<DrillDownFilter> {
    if let Some(tag) = &cli.tag {
        Some(DrillDownFilter::Tag(tag.clone()))
    } else if let Some(date) = cli.date {
        Some(DrillDownFilter::Date(date))
    } else {
        cli.hour.map(DrillDownFilter::Hour)
    }
}

/// A missing snapshot file is an empty journal; an unreadable or malformed
/// one is an error.
fn load_journal(path: &Path) -> Result<Journal> {
    if !path.exists() {
        return Ok(Journal::new());
    }
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Journal::from_snapshot_str(&json).with_context(|| format!("loading {}", path.display()))
}

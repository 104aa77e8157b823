use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cube_scan::SearchOptions;
use cube_scan_batch::{read_scans, repair_all};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{info, LevelFilter};

/// Repairs a file of scans, one facelet string per line, printing a JSON
/// report for each.
#[derive(Parser)]
struct Options {
    /// The file of scans; stdin if omitted.
    path: Option<PathBuf>,
    /// A JSON file of search options.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Only try whole-cube orientations, not rotating individual faces.
    #[arg(long)]
    no_rescue: bool,
    /// Log more (repeat for even more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    env_logger::Builder::new()
        .filter_level(match options.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let mut search: SearchOptions = match &options.options {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open options {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))?
        }
        None => SearchOptions::default(),
    };
    if options.no_rescue {
        search.rescue = false;
    }

    let contents = match &options.path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read scans from {}", path.display()))?,
        None => {
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            contents
        }
    };
    let scans = read_scans(&contents);

    let progress = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::with_template("{elapsed_precise} {wide_bar} {pos} / {len} scans repaired")
            .context("invalid progress bar template")?,
    );
    let reports = repair_all(&scans, search, &progress);

    let mut stdout = BufWriter::new(io::stdout().lock());
    for report in &reports {
        serde_json::to_writer(&mut stdout, report)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;

    let valid = reports.iter().filter(|report| report.is_valid()).count();
    info!("{valid} of {} scans are valid", reports.len());
    if valid < reports.len() {
        anyhow::bail!("{} scans could not be repaired", reports.len() - valid);
    }
    Ok(())
}

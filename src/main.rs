use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use cube_scan::{repair, Error, Phase, SearchOptions};
use log::{info, LevelFilter};

/// Finds a physically valid cube in a scan, re-orienting it if need be.
#[derive(Parser)]
struct Options {
    /// The 54-letter facelet string; read from stdin if omitted.
    facelets: Option<String>,
    /// Only try whole-cube orientations, not rotating individual faces.
    #[arg(long)]
    no_rescue: bool,
    /// Search on a single thread.
    #[arg(long)]
    sequential: bool,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
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

    let raw = match options.facelets {
        Some(facelets) => facelets,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read facelets from stdin")?;
            input
        }
    };
    let search = SearchOptions {
        rescue: !options.no_rescue,
        parallel: !options.sequential,
    };

    match repair(&raw, search) {
        Ok(found) => {
            if found.phase == Phase::Rescue {
                info!("rotated faces by {} to get a valid cube", found.face_turns);
            }
            if options.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("{}", found.facelets);
            }
            Ok(())
        }
        Err(Error::SearchExhausted(exhausted)) if options.json => {
            println!("{}", serde_json::to_string_pretty(&exhausted)?);
            anyhow::bail!("no valid cube found");
        }
        Err(err) => Err(err.into()),
    }
}

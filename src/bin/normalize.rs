//! Turns a JSON scan (`{"U": ["white", ...], "R": [...], ...}`) into a
//! facelet string.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cube_scan::{normalize, relabel_by_centers, reorder_faces, ColorScheme, Scan};

#[derive(Parser)]
struct Args {
    /// The scan to read; stdin if omitted.
    path: Option<PathBuf>,
    /// A JSON file mapping each face to the sticker names meaning its color.
    #[arg(long)]
    scheme: Option<PathBuf>,
    /// Put the faces in URFDLB order according to their centers.
    #[arg(long)]
    reorder: bool,
    /// Rename every sticker after the face whose center has its color.
    #[arg(long, conflicts_with = "reorder")]
    relabel: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scheme: ColorScheme = match &args.scheme {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open color scheme {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).context("invalid color scheme")?
        }
        None => ColorScheme::standard(),
    };
    let scan: Scan = match &args.path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open scan {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))?
        }
        None => serde_json::from_reader(io::stdin().lock())?,
    };

    let mut facelets = normalize(&scan, &scheme)?;
    if args.reorder {
        facelets = reorder_faces(&facelets)?;
    } else if args.relabel {
        facelets = relabel_by_centers(&facelets)?;
    }
    println!("{facelets}");
    Ok(())
}

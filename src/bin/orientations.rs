//! Prints all 24 orientations of a cube, in the order they're searched.

use clap::Parser;
use cube_scan::{orientations, Facelets, Validation};

#[derive(Parser)]
struct Args {
    facelets: Facelets,
    /// Also say whether each orientation is valid.
    #[arg(long)]
    validate: bool,
}

fn main() -> anyhow::Result<()> {
    let Args { facelets, validate } = Args::parse();
    for (i, facelets) in orientations(&facelets).into_iter().enumerate() {
        if validate {
            let result = Validation::of(&facelets);
            println!("{i:>2}: {facelets} {}", result.reason);
        } else {
            println!("{i:>2}: {facelets}");
        }
    }
    Ok(())
}

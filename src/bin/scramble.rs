//! Prints the facelet string of a scrambled cube, either from a given move
//! sequence or a random one.

use clap::Parser;
use cube_scan::{apply_moves, parse_moves, random_moves, Face, Facelets};
use itertools::Itertools;

#[derive(Parser)]
struct Args {
    /// The moves to do, like "R U R' U'". A random scramble if omitted.
    moves: Option<String>,
    /// How many random moves to do.
    #[arg(long, default_value_t = 25)]
    len: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Also rotate one face's stickers, the way a badly-captured scan would.
    #[arg(long)]
    misread: Option<Face>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let moves = match &args.moves {
        Some(moves) => parse_moves(moves)?,
        None => {
            let mut rng = match args.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            random_moves(&mut rng, args.len)
        }
    };
    eprintln!("{}", moves.iter().join(" "));

    let mut facelets = apply_moves(&Facelets::solved(), &moves);
    if let Some(face) = args.misread {
        facelets.rotate_face(face, 1);
    }
    println!("{facelets}");
    Ok(())
}

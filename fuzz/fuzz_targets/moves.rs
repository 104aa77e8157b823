#![no_main]
use cube_scan::{apply_moves, CubieCube, Facelets, Move, Validation};
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|moves: Vec<Move>| {
    let scrambled = apply_moves(&Facelets::solved(), &moves);
    let result = Validation::of(&scrambled);
    assert!(result.ok, "{result}");
    assert!(CubieCube::from_facelets(&scrambled).unwrap().is_solvable());

    let undo: Vec<Move> = moves.iter().rev().map(|mv| mv.inverse()).collect();
    assert_eq!(apply_moves(&scrambled, &undo), Facelets::solved());
});

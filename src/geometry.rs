//! Types for dealing with the geometry of a cube: where each sticker sits in
//! space, and the rotations and layer turns that move stickers around.
//!
//! Rather than writing out sticker permutations by hand, every rotation is
//! derived by turning the 3D position of each sticker and looking up which
//! index it lands on. The whole-cube rotations are then just the closure of
//! three quarter turns about the x, y and z axes.

use std::array;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use arbitrary::Arbitrary;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{Error, Face, Facelets, NUM_FACELETS};

use Face::*;

/// A point or direction in 3D space, with x pointing right, y pointing up
/// and z pointing towards the front of the cube.
type Vec3 = [i8; 3];

/// A sticker's location in space: the cubie it's stuck to, and the direction
/// it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Sticker {
    /// The position of the cubie, with each coordinate in -1..=1.
    pos: Vec3,
    normal: Vec3,
}

impl Sticker {
    /// Returns the sticker at `index` in a facelet string.
    fn from_index(index: usize) -> Self {
        let face = Face::ALL[index / 9];
        let row = (index % 9 / 3) as i8;
        let col = (index % 3) as i8;
        let (pos, normal) = match face {
            U => ([col - 1, 1, row - 1], [0, 1, 0]),
            R => ([1, 1 - row, 1 - col], [1, 0, 0]),
            F => ([col - 1, 1 - row, 1], [0, 0, 1]),
            D => ([col - 1, -1, 1 - row], [0, -1, 0]),
            L => ([-1, 1 - row, col - 1], [-1, 0, 0]),
            B => ([1 - col, 1 - row, -1], [0, 0, -1]),
        };
        Self { pos, normal }
    }

    /// Returns the index of this sticker in a facelet string.
    fn index(self) -> usize {
        let [x, y, z] = self.pos;
        let (face, row, col) = match self.normal {
            [0, 1, 0] => (U, z + 1, x + 1),
            [1, 0, 0] => (R, 1 - y, 1 - z),
            [0, 0, 1] => (F, 1 - y, x + 1),
            [0, -1, 0] => (D, 1 - z, x + 1),
            [-1, 0, 0] => (L, 1 - y, z + 1),
            [0, 0, -1] => (B, 1 - y, 1 - x),
            _ => unreachable!("sticker normals are always axis-aligned"),
        };
        face.offset() + (row * 3 + col) as usize
    }

    fn turned(self, axis: Axis) -> Self {
        Self {
            pos: axis.turn(self.pos),
            normal: axis.turn(self.normal),
        }
    }
}

/// One of the three axes a cube can be rotated around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The axis through the centers of R and L.
    X,
    /// The axis through the centers of U and D.
    Y,
    /// The axis through the centers of F and B.
    Z,
}

impl Axis {
    /// The generators of the whole-cube rotation group, in the order they're
    /// tried when enumerating orientations.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Turns a vector a quarter turn clockwise, as seen looking at the cube
    /// from the positive end of this axis.
    fn turn(self, [x, y, z]: Vec3) -> Vec3 {
        match self {
            Axis::X => [x, z, -y],
            Axis::Y => [-z, y, x],
            Axis::Z => [y, -x, z],
        }
    }

    fn component(self, v: Vec3) -> i8 {
        v[self as usize]
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// A permutation of the stickers of a cube: the sticker at index `i` moves to
/// index `self.0[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permutation([u8; NUM_FACELETS]);

impl Permutation {
    pub fn identity() -> Self {
        Self(array::from_fn(|i| i as u8))
    }

    /// The permutation you get by turning the stickers in `layer` (or every
    /// sticker, if `layer` is `None`) a quarter turn clockwise about `axis`.
    ///
    /// `layer` is the coordinate along `axis` of the cubies to turn.
    fn quarter_turn(axis: Axis, layer: Option<i8>) -> Self {
        Self(array::from_fn(|i| {
            let sticker = Sticker::from_index(i);
            if layer.map_or(true, |layer| axis.component(sticker.pos) == layer) {
                sticker.turned(axis).index() as u8
            } else {
                i as u8
            }
        }))
    }

    /// Returns the permutation which does `self` and then `other`.
    pub fn then(&self, other: &Permutation) -> Self {
        Self(self.0.map(|to| other.0[usize::from(to)]))
    }

    /// Returns this permutation repeated `times` times.
    pub fn pow(&self, times: u8) -> Self {
        (0..times).fold(Self::identity(), |acc, _| acc.then(self))
    }

    pub fn inverse(&self) -> Self {
        let mut inverse = Self::identity();
        for (from, &to) in self.0.iter().enumerate() {
            inverse.0[usize::from(to)] = from as u8;
        }
        inverse
    }

    /// Moves the stickers of `facelets` according to this permutation.
    pub fn apply(&self, facelets: &Facelets) -> Facelets {
        let mut out = facelets.clone();
        for (from, &to) in self.0.iter().enumerate() {
            out[usize::from(to)] = facelets[from];
        }
        out
    }
}

/// The quarter turns of the whole cube about each axis, in `Axis::ALL` order.
static ROTATIONS: LazyLock<[Permutation; 3]> =
    LazyLock::new(|| Axis::ALL.map(|axis| Permutation::quarter_turn(axis, None)));

/// Clockwise quarter turns of each outer layer, in URFDLB order.
static LAYER_TURNS: LazyLock<[Permutation; 6]> = LazyLock::new(|| {
    Face::ALL.map(|face| {
        let axis = match face {
            U | D => Axis::Y,
            R | L => Axis::X,
            F | B => Axis::Z,
        };
        if matches!(face, U | R | F) {
            Permutation::quarter_turn(axis, Some(1))
        } else {
            // Clockwise as seen from the negative end of the axis is anticlockwise about it.
            Permutation::quarter_turn(axis, Some(-1)).pow(3)
        }
    })
});

/// Returns `facelets` after turning the whole cube a quarter turn clockwise
/// about `axis` (the way an R, U or F move turns for x, y and z
/// respectively).
pub fn rotate(facelets: &Facelets, axis: Axis) -> Facelets {
    ROTATIONS[axis as usize].apply(facelets)
}

/// Returns every orientation of `facelets` reachable by rotating the whole
/// cube.
///
/// These are found breadth-first from `facelets` itself, which always comes
/// first, applying the x, y and z rotations in that order and skipping any
/// string that's already been seen. As long as the centers are all different
/// this yields exactly 24 orientations.
pub fn orientations(facelets: &Facelets) -> Vec<Facelets> {
    let mut seen = FxHashSet::default();
    seen.insert(facelets.clone());
    let mut result = vec![facelets.clone()];
    let mut index = 0;
    while index < result.len() {
        for generator in ROTATIONS.iter() {
            let next = generator.apply(&result[index]);
            if seen.insert(next.clone()) {
                result.push(next);
            }
        }
        index += 1;
    }
    result
}

/// A turn of one of the outer layers of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Arbitrary)]
pub struct Move {
    pub face: Face,
    /// The number of clockwise quarter turns, as seen looking at `face`.
    pub turns: u8,
}

impl Move {
    pub fn new(face: Face, turns: u8) -> Self {
        Self {
            face,
            turns: turns & 0b11,
        }
    }

    /// Returns all 18 moves: each face turned clockwise, twice, and
    /// anticlockwise.
    pub fn all() -> [Move; 18] {
        array::from_fn(|i| Move::new(Face::ALL[i / 3], (i % 3) as u8 + 1))
    }

    /// Returns the move which undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.face, 4 - (self.turns & 0b11))
    }

    pub fn permutation(self) -> Permutation {
        LAYER_TURNS[self.face as usize].pow(self.turns & 0b11)
    }

    pub fn apply(self, facelets: &Facelets) -> Facelets {
        let turn = &LAYER_TURNS[self.face as usize];
        (0..self.turns & 0b11).fold(facelets.clone(), |acc, _| turn.apply(&acc))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.turns & 0b11 {
            0 => write!(f, "{}0", self.face),
            1 => write!(f, "{}", self.face),
            2 => write!(f, "{}2", self.face),
            3 => write!(f, "{}'", self.face),
            _ => unreachable!(),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| Error::InvalidMove(s.to_owned()))?;
        let turns = match chars.as_str() {
            "" => 1,
            "2" | "2'" => 2,
            "'" => 3,
            _ => return Err(Error::InvalidMove(s.to_owned())),
        };
        Ok(Move::new(face, turns))
    }
}

impl Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a whitespace-separated sequence of moves, like `R U R' U'`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(str::parse).collect()
}

/// Generates a random sequence of `len` moves, never turning the same face
/// twice in a row.
pub fn random_moves(rng: &mut fastrand::Rng, len: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(len);
    while moves.len() < len {
        let mv = Move::new(Face::ALL[rng.usize(..6)], rng.u8(1..4));
        if moves.last().map_or(true, |last| last.face != mv.face) {
            moves.push(mv);
        }
    }
    moves
}

/// Returns `facelets` after doing each of `moves` in turn.
pub fn apply_moves(facelets: &Facelets, moves: &[Move]) -> Facelets {
    moves
        .iter()
        .fold(facelets.clone(), |acc, &mv| mv.apply(&acc))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::{
        apply_moves, orientations, parse_moves, random_moves, rotate, Axis, Move, Permutation,
        Sticker,
    };
    use crate::{Face, Facelets, NUM_FACELETS};
    use Face::*;

    #[test]
    fn sticker_roundtrip() {
        for index in 0..NUM_FACELETS {
            assert_eq!(Sticker::from_index(index).index(), index);
        }
    }

    #[test]
    fn stickers_share_cubies() {
        // The URF corner.
        let urf = [8, 9, 20].map(|i| Sticker::from_index(i).pos);
        assert_eq!(urf, [[1, 1, 1]; 3]);
        // The BL edge.
        let bl = [50, 39].map(|i| Sticker::from_index(i).pos);
        assert_eq!(bl, [[-1, 0, -1]; 2]);
    }

    #[test]
    fn rotation_generators() {
        let solved = Facelets::solved();
        // x brings the front face up.
        assert_eq!(rotate(&solved, Axis::X).centers(), [F, R, D, B, L, U]);
        // y brings the right face to the front.
        assert_eq!(rotate(&solved, Axis::Y).centers(), [U, B, R, D, F, L]);
        // z brings the left face up.
        assert_eq!(rotate(&solved, Axis::Z).centers(), [L, U, F, R, D, B]);
        for axis in Axis::ALL {
            let mut facelets = solved.clone();
            for _ in 0..4 {
                facelets = rotate(&facelets, axis);
            }
            assert_eq!(facelets, solved);
        }
    }

    #[test]
    fn twenty_four_orientations() {
        let scrambled = apply_moves(
            &Facelets::solved(),
            &parse_moves("R U2 F' L D' B2 R' U F2 D").unwrap(),
        );
        for start in [Facelets::solved(), scrambled] {
            let all = orientations(&start);
            assert_eq!(all.len(), 24);
            assert_eq!(all[0], start);
            let set: HashSet<_> = all.iter().cloned().collect();
            assert_eq!(set.len(), 24);
            // Closed: starting from any of them gives back the same set.
            for other in all.iter() {
                let again: HashSet<_> = orientations(other).into_iter().collect();
                assert_eq!(again, set);
            }
        }
    }

    #[test]
    fn moves_have_order_four() {
        let solved = Facelets::solved();
        for face in Face::ALL {
            let mv = Move::new(face, 1);
            let mut facelets = solved.clone();
            for i in 1..=4 {
                facelets = mv.apply(&facelets);
                assert_eq!(facelets == solved, i == 4, "{mv} x{i}");
            }
            assert_eq!(mv.apply(&mv.inverse().apply(&solved)), solved);
            assert_eq!(mv.permutation().then(&mv.inverse().permutation()), Permutation::identity());
            assert_eq!(mv.permutation().inverse(), mv.inverse().permutation());
        }
    }

    #[test]
    fn random_scrambles_undo() {
        let mut rng = fastrand::Rng::with_seed(7);
        for len in [0, 1, 5, 30] {
            let moves = random_moves(&mut rng, len);
            assert_eq!(moves.len(), len);
            assert!(moves.windows(2).all(|pair| pair[0].face != pair[1].face));
            let undo: Vec<_> = moves.iter().rev().map(|mv| mv.inverse()).collect();
            let scrambled = apply_moves(&Facelets::solved(), &moves);
            assert_eq!(apply_moves(&scrambled, &undo), Facelets::solved());
        }
    }

    #[test]
    fn layer_turns_rotate_their_face() {
        // The stickers on the turned face itself rotate the same way as a
        // face captured at a quarter-turn offset.
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("R U F D L B").unwrap());
        for face in Face::ALL {
            let turned = Move::new(face, 1).apply(&scrambled);
            let rotated = scrambled.clone().with_face_rotated(face, 1);
            assert_eq!(turned.face(face), rotated.face(face), "{face}");
            // And the opposite face doesn't move at all.
            assert_eq!(turned.face(face.opposite()), scrambled.face(face.opposite()));
        }
    }

    #[test]
    fn u_move() {
        let facelets = Move::new(U, 1).apply(&Facelets::solved());
        // The front face's top row comes from the right face.
        assert_eq!(facelets.face(F)[..3], [R, R, R]);
        assert_eq!(facelets.face(L)[..3], [F, F, F]);
        assert_eq!(facelets.face(B)[..3], [L, L, L]);
        assert_eq!(facelets.face(R)[..3], [B, B, B]);
        assert_eq!(facelets.face(F)[3..], [F; 6]);
    }

    #[test]
    fn r_move() {
        let facelets = Move::new(R, 1).apply(&Facelets::solved());
        // The front face's right column goes up.
        for row in 0..3 {
            assert_eq!(facelets.face(U)[row * 3 + 2], F);
            assert_eq!(facelets.face(F)[row * 3 + 2], D);
            assert_eq!(facelets.face(B)[row * 3], U);
            assert_eq!(facelets.face(D)[row * 3 + 2], B);
        }
    }

    #[test]
    fn move_notation() {
        let moves = parse_moves("R U' F2 D2' L B'").unwrap();
        assert_eq!(
            moves,
            [
                Move::new(R, 1),
                Move::new(U, 3),
                Move::new(F, 2),
                Move::new(D, 2),
                Move::new(L, 1),
                Move::new(B, 3),
            ]
        );
        let printed: Vec<_> = moves.iter().map(Move::to_string).collect();
        assert_eq!(printed, ["R", "U'", "F2", "D2", "L", "B'"]);
        assert!(parse_moves("R X").is_err());
        assert!(parse_moves("R3").is_err());
        assert_eq!(Move::all().len(), 18);
    }
}

//! The flat 54-sticker representation of a scanned cube.

use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use arbitrary::Arbitrary;
use itertools::Itertools;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// The number of stickers on a cube.
pub const NUM_FACELETS: usize = 54;

/// The index of the center sticker within a face.
pub const CENTER: usize = 4;

/// A clockwise quarter turn of a face's 3x3 grid: `new[i] = old[CLOCKWISE[i]]`.
const CLOCKWISE: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// One of the six faces of a cube.
///
/// A face's letter doubles as the color of its center, so facelet strings are
/// written in terms of faces rather than colors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Arbitrary,
)]
#[repr(u8)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

use Face::*;

impl Face {
    /// All the faces, in the order they appear in a facelet string.
    pub const ALL: [Face; 6] = [U, R, F, D, L, B];

    pub fn letter(self) -> char {
        match self {
            U => 'U',
            R => 'R',
            F => 'F',
            D => 'D',
            L => 'L',
            B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(U),
            'R' => Some(R),
            'F' => Some(F),
            'D' => Some(D),
            'L' => Some(L),
            'B' => Some(B),
            _ => None,
        }
    }

    /// Returns the face opposite to this one.
    pub fn opposite(self) -> Face {
        match self {
            U => D,
            R => L,
            F => B,
            D => U,
            L => R,
            B => F,
        }
    }

    /// Returns whether this is the up or down face, which is what corner
    /// twist is measured against.
    pub fn is_up_down(self) -> bool {
        matches!(self, U | D)
    }

    /// The index of this face's first sticker in a facelet string.
    pub fn offset(self) -> usize {
        self as usize * 9
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            U => "U",
            R => "R",
            F => "F",
            D => "D",
            L => "L",
            B => "B",
        })
    }
}

impl FromStr for Face {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Face::from_letter), chars.next()) {
            (Some(face), None) => Ok(face),
            _ => Err(Error::IllegalAlphabet(s.chars().collect())),
        }
    }
}

/// The stickers of a cube, laid out face by face in URFDLB order with each
/// face read row by row.
///
/// The up face is read looking down with the back face at the top, the down
/// face looking up with the front face at the top, and the four side faces
/// from outside with the up face at the top.
#[derive(Clone, PartialEq, Eq, Hash, Arbitrary)]
pub struct Facelets([Face; NUM_FACELETS]);

impl Facelets {
    pub fn new(stickers: [Face; NUM_FACELETS]) -> Self {
        Self(stickers)
    }

    /// Returns the solved cube, `UUUUUUUUURRRRRRRRR...BBBBBBBBB`.
    pub fn solved() -> Self {
        Self(std::array::from_fn(|i| Face::ALL[i / 9]))
    }

    pub fn stickers(&self) -> &[Face; NUM_FACELETS] {
        &self.0
    }

    /// Returns the 9 stickers on `face`.
    pub fn face(&self, face: Face) -> &[Face] {
        &self.0[face.offset()..face.offset() + 9]
    }

    pub fn face_mut(&mut self, face: Face) -> &mut [Face] {
        &mut self.0[face.offset()..face.offset() + 9]
    }

    /// Returns the sticker in the middle of `face`.
    pub fn center(&self, face: Face) -> Face {
        self.0[face.offset() + CENTER]
    }

    /// Returns the centers of all six faces, in URFDLB order.
    pub fn centers(&self) -> [Face; 6] {
        Face::ALL.map(|face| self.center(face))
    }

    /// Counts how many stickers there are of each color.
    pub fn counts(&self) -> ColorCounts {
        let mut counts = ColorCounts::default();
        for &sticker in self.0.iter() {
            counts.0[sticker as usize] += 1;
        }
        counts
    }

    /// Rotates the grid of stickers on `face` by `turns` clockwise quarter
    /// turns, leaving the rest of the cube alone.
    ///
    /// This isn't a move of the cube: it's what you get when a face was
    /// captured with the camera at the wrong angle.
    pub fn rotate_face(&mut self, face: Face, turns: u8) {
        let stickers = self.face_mut(face);
        for _ in 0..turns & 0b11 {
            let old: [Face; 9] = std::array::from_fn(|i| stickers[i]);
            for (sticker, &from) in stickers.iter_mut().zip(CLOCKWISE.iter()) {
                *sticker = old[from];
            }
        }
    }

    pub fn with_face_rotated(mut self, face: Face, turns: u8) -> Self {
        self.rotate_face(face, turns);
        self
    }
}

impl Index<usize> for Facelets {
    type Output = Face;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Facelets {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl FromStr for Facelets {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != NUM_FACELETS {
            return Err(Error::BadLength(len));
        }
        let mut stickers = [U; NUM_FACELETS];
        let mut illegal = Vec::new();
        for (sticker, letter) in stickers.iter_mut().zip(s.chars()) {
            match Face::from_letter(letter) {
                Some(face) => *sticker = face,
                None => illegal.push(letter),
            }
        }
        if !illegal.is_empty() {
            illegal.sort_unstable();
            illegal.dedup();
            return Err(Error::IllegalAlphabet(illegal));
        }
        Ok(Self(stickers))
    }
}

impl Display for Facelets {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for sticker in self.0 {
            write!(f, "{}", sticker.letter())?;
        }
        Ok(())
    }
}

impl Debug for Facelets {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Facelets({self})")
    }
}

impl Serialize for Facelets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Facelets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How many stickers of each color a scan has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCounts([usize; 6]);

impl ColorCounts {
    /// Counts the face letters in an arbitrary string, ignoring anything
    /// else.
    pub fn of_str(s: &str) -> Self {
        let mut counts = Self::default();
        for face in s.chars().filter_map(Face::from_letter) {
            counts.0[face as usize] += 1;
        }
        counts
    }

    /// Returns whether every color appears exactly 9 times.
    pub fn is_balanced(&self) -> bool {
        self.0.iter().all(|&count| count == 9)
    }
}

impl Index<Face> for ColorCounts {
    type Output = usize;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face as usize]
    }
}

impl Display for ColorCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let counts = Face::ALL
            .iter()
            .map(|&face| format!("{face}={}", self[face]))
            .join(" ");
        f.write_str(&counts)
    }
}

impl Serialize for ColorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for face in Face::ALL {
            map.serialize_entry(&face, &self[face])?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorCounts, Face, Facelets, NUM_FACELETS};
    use crate::Error;
    use Face::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn parse_solved() {
        let facelets: Facelets = SOLVED.parse().unwrap();
        assert_eq!(facelets, Facelets::solved());
        assert_eq!(facelets.to_string(), SOLVED);
        assert_eq!(facelets.centers(), Face::ALL);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "UUU".parse::<Facelets>(),
            Err(Error::BadLength(3))
        ));
        let bad = SOLVED.replacen('R', "x", 1).replacen('B', "W", 2);
        match bad.parse::<Facelets>() {
            Err(Error::IllegalAlphabet(chars)) => assert_eq!(chars, ['W', 'x']),
            other => panic!("expected an alphabet error, got {other:?}"),
        }
        assert_eq!("F".parse::<Face>().unwrap(), F);
        assert!("FR".parse::<Face>().is_err());
        assert!("".parse::<Face>().is_err());
    }

    #[test]
    fn rotate_face() {
        let mut facelets = Facelets::solved();
        // Number the up face so that we can follow its stickers around.
        let labels = [U, R, F, D, L, B, U, R, F];
        facelets.face_mut(U).copy_from_slice(&labels);

        let rotated = facelets.clone().with_face_rotated(U, 1);
        assert_eq!(rotated.face(U), [U, D, U, R, L, R, F, B, F]);
        // The rest of the cube is untouched.
        assert_eq!(rotated.stickers()[9..], facelets.stickers()[9..]);
        assert_eq!(rotated.center(U), facelets.center(U));

        let mut turned = facelets.clone();
        for _ in 0..4 {
            turned.rotate_face(U, 1);
        }
        assert_eq!(turned, facelets);
        assert_eq!(facelets.clone().with_face_rotated(U, 4), facelets);
        assert_eq!(
            facelets.clone().with_face_rotated(U, 3),
            rotated.with_face_rotated(U, 2)
        );
    }

    #[test]
    fn counts() {
        let counts = Facelets::solved().counts();
        assert!(counts.is_balanced());
        assert_eq!(counts.to_string(), "U=9 R=9 F=9 D=9 L=9 B=9");

        let counts = ColorCounts::of_str(&SOLVED.replacen('U', "R", 2));
        assert!(!counts.is_balanced());
        assert_eq!(counts[U], 7);
        assert_eq!(counts[R], 11);
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&Facelets::solved()).unwrap();
        assert_eq!(json, format!("\"{SOLVED}\""));
        let back: Facelets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Facelets::solved());
        assert!(serde_json::from_str::<Facelets>("\"UUU\"").is_err());
        assert_eq!(NUM_FACELETS, SOLVED.len());
    }
}

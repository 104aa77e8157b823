//! The cubie-level view of a cube: which corner and edge pieces sit in which
//! positions, and how they're twisted or flipped there.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::{Error, Face, Facelets, PieceKind};

use Face::*;

/// A corner position, and also the corner cubie which belongs there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// An edge position, and also the edge cubie which belongs there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

/// The facelets of each corner position, starting with the one on U or D and
/// going clockwise around the corner.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// The colors of each corner cubie, in the same order as `CORNER_FACELETS`.
const CORNER_COLORS: [[Face; 3]; 8] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

/// The facelets of each edge position, starting with the one on U or D (or,
/// for the middle layer, the one on F or B).
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

const EDGE_COLORS: [[Face; 2]; 12] = [
    [U, R],
    [U, F],
    [U, L],
    [U, B],
    [D, R],
    [D, F],
    [D, L],
    [D, B],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
];

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];

    /// The indices of this position's stickers in a facelet string.
    pub fn facelets(self) -> [usize; 3] {
        CORNER_FACELETS[self as usize]
    }

    /// The colors of this cubie.
    pub fn colors(self) -> [Face; 3] {
        CORNER_COLORS[self as usize]
    }

    /// Reads the colors in this position, in facelet order.
    pub fn read(self, facelets: &Facelets) -> [Face; 3] {
        self.facelets().map(|i| facelets[i])
    }
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    pub fn facelets(self) -> [usize; 2] {
        EDGE_FACELETS[self as usize]
    }

    pub fn colors(self) -> [Face; 2] {
        EDGE_COLORS[self as usize]
    }

    pub fn read(self, facelets: &Facelets) -> [Face; 2] {
        self.facelets().map(|i| facelets[i])
    }
}

impl Display for Corner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&letters(&self.colors()))
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&letters(&self.colors()))
    }
}

/// Writes a list of stickers as a string of face letters.
pub(crate) fn letters(faces: &[Face]) -> String {
    faces.iter().map(|face| face.letter()).collect()
}

/// A bitmask of which colors are in `faces`, so that pieces can be compared
/// as unordered sets.
fn color_set(faces: &[Face]) -> u8 {
    faces.iter().fold(0, |set, &face| set | 1 << face as u8)
}

/// Returns the parity of a permutation: 0 if it's even and 1 if it's odd.
///
/// `perm[i]` is the piece in position `i`. Each cycle of length `n`
/// contributes `n - 1` transpositions.
pub fn permutation_parity<const N: usize>(perm: [usize; N]) -> u8 {
    let mut visited = [false; N];
    let mut parity = 0;
    for start in 0..N {
        let mut cycle_len = 0;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = perm[i];
            cycle_len += 1;
        }
        if cycle_len > 0 {
            parity ^= (cycle_len - 1) & 1;
        }
    }
    parity
}

/// Returns whether `perm` contains every index in `0..N` exactly once.
fn is_permutation<const N: usize>(perm: [usize; N]) -> bool {
    let mut seen = [false; N];
    perm.into_iter()
        .all(|i| i < N && !std::mem::replace(&mut seen[i], true))
}

/// Reads the corner permutation and orientation off a facelet string, the
/// way Kociemba's two-phase solver does.
///
/// For each position, the sticker carrying U or D fixes the twist, and the
/// other two stickers (read clockwise from it) pick out the cubie.
pub fn extract_corners(facelets: &Facelets) -> Result<([Corner; 8], [u8; 8]), Error> {
    let mut cp = [Corner::URF; 8];
    let mut co = [0; 8];
    for position in Corner::ALL {
        let colors = position.read(facelets);
        let twist = colors
            .iter()
            .position(|face| face.is_up_down())
            .unwrap_or(0);
        let rest = [colors[(twist + 1) % 3], colors[(twist + 2) % 3]];
        let cubie = Corner::ALL
            .into_iter()
            .find(|cubie| cubie.colors()[1..] == rest)
            .ok_or_else(|| Error::InvalidCubieColors {
                kind: PieceKind::Corner,
                position: position.to_string(),
                colors: letters(&colors),
            })?;
        cp[position as usize] = cubie;
        co[position as usize] = twist as u8;
    }

    if !is_permutation(cp.map(|cubie| cubie as usize)) {
        return Err(Error::DuplicateCubie(PieceKind::Corner));
    }
    Ok((cp, co))
}

/// Reads the edge permutation and orientation off a facelet string.
///
/// An edge has orientation 0 if its colors appear in the same order as the
/// cubie's canonical colors, and 1 if they're reversed.
pub fn extract_edges(facelets: &Facelets) -> Result<([Edge; 12], [u8; 12]), Error> {
    let mut ep = [Edge::UR; 12];
    let mut eo = [0; 12];
    for position in Edge::ALL {
        let [a, b] = position.read(facelets);
        let (cubie, flip) = Edge::ALL
            .into_iter()
            .find_map(|cubie| match cubie.colors() {
                colors if colors == [a, b] => Some((cubie, 0)),
                colors if colors == [b, a] => Some((cubie, 1)),
                _ => None,
            })
            .ok_or_else(|| Error::InvalidCubieColors {
                kind: PieceKind::Edge,
                position: position.to_string(),
                colors: letters(&[a, b]),
            })?;
        ep[position as usize] = cubie;
        eo[position as usize] = flip;
    }

    if !is_permutation(ep.map(|cubie| cubie as usize)) {
        return Err(Error::DuplicateCubie(PieceKind::Edge));
    }
    Ok((ep, eo))
}

/// A corner position whose colors don't form any real corner cubie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadCorner {
    pub position: Corner,
    pub colors: [Face; 3],
}

/// An edge position whose colors don't form any real edge cubie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadEdge {
    pub position: Edge,
    pub colors: [Face; 2],
}

/// The result of matching every position against the real cubies by color
/// set alone.
///
/// Unlike `extract_corners` and `extract_edges` this never gives up early: it
/// finds every position whose colors are impossible, which is what's needed
/// to rank lots of bad candidates against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The cubie in each corner position, if the colors there form one.
    pub corners: [Option<Corner>; 8],
    /// The twist of each corner: which of its stickers has the U or D color.
    pub twists: [u8; 8],
    pub edges: [Option<Edge>; 12],
    pub flips: [u8; 12],
    pub bad_corners: Vec<BadCorner>,
    pub bad_edges: Vec<BadEdge>,
}

impl Classification {
    pub fn new(facelets: &Facelets) -> Self {
        let mut corners = [None; 8];
        let mut twists = [0; 8];
        let mut bad_corners = Vec::new();
        for position in Corner::ALL {
            let colors = position.read(facelets);
            let set = color_set(&colors);
            match Corner::ALL
                .into_iter()
                .find(|cubie| color_set(&cubie.colors()) == set)
            {
                Some(cubie) => {
                    corners[position as usize] = Some(cubie);
                    // A real corner has exactly one U or D sticker.
                    twists[position as usize] = colors
                        .iter()
                        .position(|face| face.is_up_down())
                        .unwrap_or(0) as u8;
                }
                None => bad_corners.push(BadCorner { position, colors }),
            }
        }

        let mut edges = [None; 12];
        let mut flips = [0; 12];
        let mut bad_edges = Vec::new();
        for position in Edge::ALL {
            let colors = position.read(facelets);
            let set = color_set(&colors);
            match Edge::ALL
                .into_iter()
                .find(|cubie| color_set(&cubie.colors()) == set)
            {
                Some(cubie) => {
                    edges[position as usize] = Some(cubie);
                    flips[position as usize] = u8::from(colors[0] != cubie.colors()[0]);
                }
                None => bad_edges.push(BadEdge { position, colors }),
            }
        }

        Self {
            corners,
            twists,
            edges,
            flips,
            bad_corners,
            bad_edges,
        }
    }

    /// Returns whether every position holds a real cubie.
    pub fn is_structurally_sound(&self) -> bool {
        self.bad_corners.is_empty() && self.bad_edges.is_empty()
    }

    /// Assembles the cubie-level cube, if every position holds a real cubie
    /// and no cubie appears twice.
    pub fn cubies(&self) -> Option<CubieCube> {
        let mut cp = [Corner::URF; 8];
        for (slot, cubie) in cp.iter_mut().zip(self.corners) {
            *slot = cubie?;
        }
        let mut ep = [Edge::UR; 12];
        for (slot, cubie) in ep.iter_mut().zip(self.edges) {
            *slot = cubie?;
        }
        let cube = CubieCube {
            cp,
            co: self.twists,
            ep,
            eo: self.flips,
        };
        cube.is_bijective().then_some(cube)
    }
}

/// A cube described by its cubies rather than its stickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CubieCube {
    /// The corner cubie in each corner position.
    pub cp: [Corner; 8],
    /// The twist of each corner position, in 0..3.
    pub co: [u8; 8],
    /// The edge cubie in each edge position.
    pub ep: [Edge; 12],
    /// The flip of each edge position, in 0..2.
    pub eo: [u8; 12],
}

impl CubieCube {
    pub fn solved() -> Self {
        Self {
            cp: Corner::ALL,
            co: [0; 8],
            ep: Edge::ALL,
            eo: [0; 12],
        }
    }

    /// Reads the cubies off a facelet string with `extract_corners` and
    /// `extract_edges`.
    pub fn from_facelets(facelets: &Facelets) -> Result<Self, Error> {
        let (cp, co) = extract_corners(facelets)?;
        let (ep, eo) = extract_edges(facelets)?;
        Ok(Self { cp, co, ep, eo })
    }

    fn is_bijective(&self) -> bool {
        is_permutation(self.cp.map(|cubie| cubie as usize))
            && is_permutation(self.ep.map(|cubie| cubie as usize))
    }

    /// The total twist of the corners, mod 3.
    pub fn corner_twist(&self) -> u8 {
        self.co.iter().sum::<u8>() % 3
    }

    /// The total flip of the edges, mod 2.
    pub fn edge_flip(&self) -> u8 {
        self.eo.iter().sum::<u8>() % 2
    }

    pub fn corner_parity(&self) -> u8 {
        permutation_parity(self.cp.map(|cubie| cubie as usize))
    }

    pub fn edge_parity(&self) -> u8 {
        permutation_parity(self.ep.map(|cubie| cubie as usize))
    }

    /// Returns whether this cube can be solved: no net twist or flip, and
    /// matching corner and edge parities.
    pub fn is_solvable(&self) -> bool {
        self.corner_twist() == 0
            && self.edge_flip() == 0
            && self.corner_parity() == self.edge_parity()
    }
}

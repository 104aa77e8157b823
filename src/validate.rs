//! Deciding whether a scan is a cube that could physically exist.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::cubie::letters;
use crate::{BadCorner, BadEdge, Classification, ColorCounts, Error, ErrorKind, Facelets};

/// Everything found out about a scan while validating it.
///
/// Validation stops at the first check that fails, so only the fields
/// belonging to checks that actually ran are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub ok: bool,
    /// Which check failed, if any.
    pub kind: Option<ErrorKind>,
    pub reason: &'static str,
    pub bad_corners: Vec<BadCorner>,
    pub bad_edges: Vec<BadEdge>,
    pub counts: Option<ColorCounts>,
    /// The total corner twist, mod 3.
    pub corner_twist: Option<u8>,
    /// The total edge flip, mod 2.
    pub edge_flip: Option<u8>,
    pub corner_parity: Option<u8>,
    pub edge_parity: Option<u8>,
}

impl Validation {
    fn new(counts: Option<ColorCounts>) -> Self {
        Self {
            ok: false,
            kind: None,
            reason: "",
            bad_corners: Vec::new(),
            bad_edges: Vec::new(),
            counts,
            corner_twist: None,
            edge_flip: None,
            corner_parity: None,
            edge_parity: None,
        }
    }

    fn fail(mut self, kind: ErrorKind) -> Self {
        self.ok = false;
        self.kind = Some(kind);
        self.reason = kind.description();
        self
    }

    /// Validates an already-parsed scan.
    pub fn of(facelets: &Facelets) -> Self {
        let counts = facelets.counts();
        let mut result = Self::new(Some(counts));
        if !counts.is_balanced() {
            return result.fail(ErrorKind::BadColorCounts);
        }

        let classification = Classification::new(facelets);
        if !classification.is_structurally_sound() {
            result.bad_corners = classification.bad_corners;
            result.bad_edges = classification.bad_edges;
            return result.fail(ErrorKind::ImpossibleCubies);
        }

        let Some(cube) = classification.cubies() else {
            return result.fail(ErrorKind::DuplicateCubie);
        };

        let twist = cube.corner_twist();
        let flip = cube.edge_flip();
        result.corner_twist = Some(twist);
        result.edge_flip = Some(flip);
        if twist != 0 {
            return result.fail(ErrorKind::CornerTwistInvalid);
        }
        if flip != 0 {
            return result.fail(ErrorKind::EdgeFlipInvalid);
        }

        let corner_parity = cube.corner_parity();
        let edge_parity = cube.edge_parity();
        result.corner_parity = Some(corner_parity);
        result.edge_parity = Some(edge_parity);
        if corner_parity != edge_parity {
            return result.fail(ErrorKind::ParityMismatch);
        }

        result.ok = true;
        result.reason = "OK";
        result
    }

    /// How far from valid this scan is: lower is better, and 0 means valid.
    ///
    /// Every impossible cubie costs 10, and not being valid at all costs 100.
    pub fn score(&self) -> u32 {
        let bad = (self.bad_corners.len() + self.bad_edges.len()) as u32;
        bad * 10 + if self.ok { 0 } else { 100 }
    }
}

/// Validates a raw scan, which may not even be the right length or use the
/// right letters.
pub fn validate(raw: &str) -> Validation {
    match raw.parse::<Facelets>() {
        Ok(facelets) => Validation::of(&facelets),
        Err(Error::BadLength(_)) => Validation::new(None).fail(ErrorKind::BadLength),
        // Any foreign letter leaves some color short of 9.
        Err(_) => Validation::new(Some(ColorCounts::of_str(raw))).fail(ErrorKind::BadColorCounts),
    }
}

impl Display for Validation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reason: {}", self.reason)?;
        if let Some(counts) = self.counts {
            writeln!(f, "Counts: {counts}")?;
        }
        if let Some(twist) = self.corner_twist {
            writeln!(f, "corner twist sum mod 3 = {twist}")?;
        }
        if let Some(flip) = self.edge_flip {
            writeln!(f, "edge flip sum mod 2 = {flip}")?;
        }
        if let (Some(corner), Some(edge)) = (self.corner_parity, self.edge_parity) {
            writeln!(f, "corner parity = {corner}, edge parity = {edge}")?;
        }
        if !self.bad_corners.is_empty() {
            writeln!(f, "Bad corners (position: letters seen):")?;
            for bad in &self.bad_corners {
                writeln!(f, "  {}: {}", bad.position, letters(&bad.colors))?;
            }
        }
        if !self.bad_edges.is_empty() {
            writeln!(f, "Bad edges (position: letters seen):")?;
            for bad in &self.bad_edges {
                writeln!(f, "  {}: {}", bad.position, letters(&bad.colors))?;
            }
        }
        Ok(())
    }
}

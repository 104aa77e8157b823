//! Recovering a valid cube from a scan that was captured at the wrong
//! orientation.
//!
//! There are two kinds of capture error this can undo: the whole cube being
//! held the wrong way round, and individual faces being photographed with
//! their grid rotated. The first is handled by trying all 24 orientations of
//! the cube (phase 0); if none of them work, every combination of per-face
//! quarter turns is tried as well, along with all 24 orientations of each
//! (phase 1).

use std::array;
use std::fmt::{self, Display, Formatter};
use std::ops::ControlFlow;

use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{orientations, Error, Face, Facelets, Validation};

/// The usual reasons a scan ends up invalid, shown when nothing can be
/// recovered from it.
pub const LIKELY_CAUSES: [&str; 4] = [
    "1 sticker misread (most common)",
    "a face captured at an angle, so its stickers are in the wrong order",
    "scanning order mismatch (wrong face assigned to U/R/F/D/L/B)",
    "color classification thresholds need recalibrating",
];

/// Settings for `repair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Whether to try per-face rotations when no whole-cube orientation is
    /// valid.
    pub rescue: bool,
    /// Whether to spread the per-face rotation search across threads.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            rescue: true,
            parallel: true,
        }
    }
}

/// How many quarter turns to rotate each face's grid by, in URFDLB order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, arbitrary::Arbitrary,
)]
pub struct FaceTurns(pub [u8; 6]);

impl FaceTurns {
    /// The number of different combinations of face turns.
    pub const COMBINATIONS: u16 = 4096;

    /// Returns the combination at `index` in search order, where U's turns
    /// change slowest and B's fastest.
    pub fn from_index(index: u16) -> Self {
        Self(array::from_fn(|face| {
            (index >> (2 * (5 - face)) & 0b11) as u8
        }))
    }

    /// The position of this combination in search order.
    pub fn index(&self) -> u16 {
        self.0
            .iter()
            .fold(0, |index, &turns| index << 2 | u16::from(turns & 0b11))
    }

    /// Returns the face turns which turn just `face`.
    pub fn single(face: Face, turns: u8) -> Self {
        let mut result = Self::default();
        result.0[face as usize] = turns & 0b11;
        result
    }

    /// Returns the face turns which undo these ones.
    pub fn inverse(&self) -> Self {
        Self(self.0.map(|turns| (4 - (turns & 0b11)) & 0b11))
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|&turns| turns & 0b11 == 0)
    }

    pub fn apply(&self, facelets: &Facelets) -> Facelets {
        let mut result = facelets.clone();
        for face in Face::ALL {
            result.rotate_face(face, self.0[face as usize]);
        }
        result
    }
}

impl Display for FaceTurns {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.pad("none");
        }
        let turns = Face::ALL
            .iter()
            .filter(|&&face| self.0[face as usize] & 0b11 != 0)
            .map(|&face| format!("{face}{}", self.0[face as usize] & 0b11))
            .join(" ");
        f.pad(&turns)
    }
}

/// Which stage of the search a candidate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Phase {
    /// Only the whole cube was rotated.
    Orientation,
    /// Individual faces were rotated as well.
    Rescue,
}

/// A re-oriented version of a scan, and how it fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub facelets: Facelets,
    pub phase: Phase,
    /// The rotations applied to each face before re-orienting the cube.
    pub face_turns: FaceTurns,
    /// The index of the whole-cube orientation in `orientations`' order.
    pub orientation: usize,
    pub validation: Validation,
}

impl Candidate {
    fn new(facelets: Facelets, phase: Phase, face_turns: FaceTurns, orientation: usize) -> Self {
        let validation = Validation::of(&facelets);
        Self {
            facelets,
            phase,
            face_turns,
            orientation,
            validation,
        }
    }

    /// The key candidates are ranked by: score first, then the order they're
    /// searched in.
    fn rank(&self) -> (u32, Phase, u16, usize) {
        (
            self.validation.score(),
            self.phase,
            self.face_turns.index(),
            self.orientation,
        )
    }
}

/// The outcome of a search that found nothing valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exhausted {
    /// The candidate which came closest to being valid.
    pub best: Candidate,
    /// Whether per-face rotations were tried.
    pub rescued: bool,
    pub likely_causes: [&'static str; 4],
}

impl Display for Exhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tried = if self.rescued {
            "per-face rotations + 24 whole-cube orientations"
        } else {
            "24 whole-cube orientations"
        };
        writeln!(f, "Cube scan is NOT physically valid (after trying {tried}).")?;
        writeln!(f, "Closest candidate: {}", self.best.facelets)?;
        write!(f, "{}", self.best.validation)?;
        writeln!(f)?;
        writeln!(f, "Likely causes:")?;
        for cause in self.likely_causes {
            writeln!(f, "- {cause}")?;
        }
        Ok(())
    }
}

/// Finds a physically valid version of a raw scan, by re-orienting the whole
/// cube and, failing that, rotating individual faces as well.
///
/// When more than one candidate is valid, the first in search order wins: a
/// valid scan is always returned as-is.
pub fn repair(raw: &str, options: SearchOptions) -> Result<Candidate, Error> {
    let raw: Facelets = raw.trim().parse()?;

    let mut best = match search_orientations(&raw, Phase::Orientation, FaceTurns::default()) {
        ControlFlow::Break(found) => {
            debug!("found a valid orientation (#{})", found.orientation);
            return Ok(found);
        }
        ControlFlow::Continue(best) => best,
    };
    debug!(
        "no whole-cube orientation is valid; best score {} ({})",
        best.validation.score(),
        best.validation.reason
    );

    if options.rescue {
        debug!(
            "trying {} combinations of face rotations",
            FaceTurns::COMBINATIONS
        );
        let rescued = if options.parallel {
            rescue_parallel(&raw)
        } else {
            rescue_sequential(&raw)
        };
        match rescued {
            ControlFlow::Break(found) => {
                debug!(
                    "found a valid candidate after rotating faces by {} (orientation #{})",
                    found.face_turns, found.orientation
                );
                return Ok(found);
            }
            ControlFlow::Continue(Some(candidate)) if candidate.rank() < best.rank() => {
                best = candidate;
            }
            ControlFlow::Continue(_) => {}
        }
    }

    debug!("search exhausted; best score {}", best.validation.score());
    Err(Error::SearchExhausted(Box::new(Exhausted {
        best,
        rescued: options.rescue,
        likely_causes: LIKELY_CAUSES,
    })))
}

/// Validates every orientation of `facelets` with `face_turns` applied,
/// breaking with the first valid one or continuing with the best.
fn search_orientations(
    facelets: &Facelets,
    phase: Phase,
    face_turns: FaceTurns,
) -> ControlFlow<Candidate, Candidate> {
    let turned = face_turns.apply(facelets);
    let mut all = orientations(&turned).into_iter().enumerate();
    // The first orientation is always `turned` itself.
    let mut best = match all.next() {
        Some((i, facelets)) => Candidate::new(facelets, phase, face_turns, i),
        None => Candidate::new(turned, phase, face_turns, 0),
    };
    if best.validation.ok {
        return ControlFlow::Break(best);
    }
    for (i, facelets) in all {
        let candidate = Candidate::new(facelets, phase, face_turns, i);
        if candidate.validation.ok {
            return ControlFlow::Break(candidate);
        }
        if candidate.rank() < best.rank() {
            best = candidate;
        }
    }
    ControlFlow::Continue(best)
}

/// Tries every combination of face rotations in order, one at a time.
fn rescue_sequential(raw: &Facelets) -> ControlFlow<Candidate, Option<Candidate>> {
    let mut best: Option<Candidate> = None;
    for index in 0..FaceTurns::COMBINATIONS {
        let candidate = search_orientations(raw, Phase::Rescue, FaceTurns::from_index(index))?;
        trace!("face turns {index}: best score {}", candidate.validation.score());
        if best.as_ref().map_or(true, |best| candidate.rank() < best.rank()) {
            best = Some(candidate);
        }
    }
    ControlFlow::Continue(best)
}

/// Tries every combination of face rotations across all of rayon's threads.
///
/// This gives exactly the same answer as `rescue_sequential`: the valid
/// candidate with the lowest combination index wins, and the best candidate is
/// picked by rank rather than by whichever thread got there first.
fn rescue_parallel(raw: &Facelets) -> ControlFlow<Candidate, Option<Candidate>> {
    let found = (0..FaceTurns::COMBINATIONS)
        .into_par_iter()
        .find_map_first(|index| {
            search_orientations(raw, Phase::Rescue, FaceTurns::from_index(index)).break_value()
        });
    if let Some(found) = found {
        return ControlFlow::Break(found);
    }

    // Nothing's valid, so go round again for the closest miss. This only
    // happens for scans that are beyond saving anyway.
    let best = (0..FaceTurns::COMBINATIONS)
        .into_par_iter()
        .filter_map(|index| {
            search_orientations(raw, Phase::Rescue, FaceTurns::from_index(index)).continue_value()
        })
        .min_by_key(Candidate::rank);
    ControlFlow::Continue(best)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{repair, FaceTurns, Phase, SearchOptions};
    use crate::{apply_moves, parse_moves, Error, ErrorKind, Face, Facelets};
    use Face::*;

    #[test]
    fn face_turn_indices() {
        assert_eq!(FaceTurns::from_index(0), FaceTurns::default());
        assert_eq!(FaceTurns::from_index(1), FaceTurns::single(B, 1));
        assert_eq!(FaceTurns::from_index(3 << 10), FaceTurns::single(U, 3));
        for index in 0..FaceTurns::COMBINATIONS {
            assert_eq!(FaceTurns::from_index(index).index(), index);
        }
        let turns = FaceTurns([1, 0, 2, 0, 3, 0]);
        assert_eq!(turns.to_string(), "U1 F2 L3");
        assert_eq!(turns.inverse(), FaceTurns([3, 0, 2, 0, 1, 0]));
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("R U F").unwrap());
        assert_eq!(turns.inverse().apply(&turns.apply(&scrambled)), scrambled);
    }

    #[test]
    fn valid_scan_is_unchanged() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("L2 D' B R U'").unwrap());
        let repaired = repair(&scrambled.to_string(), SearchOptions::default()).unwrap();
        assert_eq!(repaired.facelets, scrambled);
        assert_eq!(repaired.phase, Phase::Orientation);
        assert_eq!(repaired.orientation, 0);
    }

    #[test]
    fn input_errors() {
        let err = repair("UUU", SearchOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadLength);

        let raw = Facelets::solved().to_string().replace('B', "b");
        match repair(&raw, SearchOptions::default()) {
            Err(Error::IllegalAlphabet(chars)) => assert_eq!(chars, ['b']),
            other => panic!("expected an alphabet error, got {other:?}"),
        }

        // Surrounding whitespace is fine.
        let raw = format!("  {}\n", Facelets::solved());
        assert!(repair(&raw, SearchOptions::default()).is_ok());
    }

    #[test]
    fn without_rescue() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("R U").unwrap());
        let raw = scrambled.with_face_rotated(F, 1);
        let options = SearchOptions {
            rescue: false,
            parallel: false,
        };
        match repair(&raw.to_string(), options) {
            Err(Error::SearchExhausted(exhausted)) => {
                assert!(!exhausted.rescued);
                assert_eq!(exhausted.best.phase, Phase::Orientation);
                assert!(exhausted.to_string().contains("after trying 24 whole-cube"));
            }
            other => panic!("expected the search to fail, got {other:?}"),
        }
    }
}

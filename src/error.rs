use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::{Exhausted, Face, NUM_FACELETS};

/// What went wrong, without any of the details.
///
/// Failed validations carry one of these too, so that callers can tell a
/// twisted corner from a misread sticker without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    BadLength,
    IllegalAlphabet,
    BadColorCounts,
    ImpossibleCubies,
    InvalidCubieColors,
    DuplicateCubie,
    CornerTwistInvalid,
    EdgeFlipInvalid,
    ParityMismatch,
    AmbiguousCenters,
    InvalidMove,
    MissingFace,
    BadFaceSize,
    UnknownSticker,
    SearchExhausted,
}

impl ErrorKind {
    /// A human-readable explanation of this kind of failure.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::BadLength => "length is not 54",
            ErrorKind::IllegalAlphabet => "contains letters other than U, R, F, D, L and B",
            ErrorKind::BadColorCounts => "every color must appear exactly 9 times",
            ErrorKind::ImpossibleCubies => {
                "some corner/edge color sets are impossible (at least 1 sticker is wrong)"
            }
            ErrorKind::InvalidCubieColors => "a cubie's colors don't match any real cubie",
            ErrorKind::DuplicateCubie => "duplicate cubie detected",
            ErrorKind::CornerTwistInvalid => {
                "corner twist sum invalid (one corner is twisted in scan)"
            }
            ErrorKind::EdgeFlipInvalid => "edge flip sum invalid (one edge is flipped in scan)",
            ErrorKind::ParityMismatch => {
                "parity mismatch (two cubies swapped or one sticker wrong)"
            }
            ErrorKind::AmbiguousCenters => "face centers are not all different",
            ErrorKind::InvalidMove => "not a valid move",
            ErrorKind::MissingFace => "a face is missing from the scan",
            ErrorKind::BadFaceSize => "a face doesn't have 9 stickers",
            ErrorKind::UnknownSticker => "a sticker's color isn't in the color scheme",
            ErrorKind::SearchExhausted => "no re-orientation of the scan is physically valid",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.description())
    }
}

/// Which kind of cubie a cubie-level error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Corner,
    Edge,
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PieceKind::Corner => "corner",
            PieceKind::Edge => "edge",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("facelet string must be {NUM_FACELETS} characters long, got {0}")]
    BadLength(usize),
    #[error("facelet string contains invalid letters {0:?} (allowed: URFDLB only)")]
    IllegalAlphabet(Vec<char>),
    #[error("invalid {kind} cubie colors {colors} at position {position}")]
    InvalidCubieColors {
        kind: PieceKind,
        position: String,
        colors: String,
    },
    #[error("{0} permutation is invalid: duplicate or missing cubie")]
    DuplicateCubie(PieceKind),
    #[error("face centers must all be different, got {0}")]
    AmbiguousCenters(String),
    #[error("invalid move {0:?}")]
    InvalidMove(String),
    #[error("scan is missing face {0}")]
    MissingFace(Face),
    #[error("face {face} must have 9 stickers, got {len}")]
    BadFaceSize { face: Face, len: usize },
    #[error("unknown sticker value {0:?}")]
    UnknownSticker(String),
    #[error("{0}")]
    SearchExhausted(Box<Exhausted>),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadLength(_) => ErrorKind::BadLength,
            Error::IllegalAlphabet(_) => ErrorKind::IllegalAlphabet,
            Error::InvalidCubieColors { .. } => ErrorKind::InvalidCubieColors,
            Error::DuplicateCubie(_) => ErrorKind::DuplicateCubie,
            Error::AmbiguousCenters(_) => ErrorKind::AmbiguousCenters,
            Error::InvalidMove(_) => ErrorKind::InvalidMove,
            Error::MissingFace(_) => ErrorKind::MissingFace,
            Error::BadFaceSize { .. } => ErrorKind::BadFaceSize,
            Error::UnknownSticker(_) => ErrorKind::UnknownSticker,
            Error::SearchExhausted(_) => ErrorKind::SearchExhausted,
        }
    }
}

//! A crate which checks whether a scanned Rubik's cube could physically
//! exist, and recovers one that could from a scan captured at the wrong
//! orientation.
//!
//! Scans are 54-letter facelet strings (see [`Facelets`]). [`validate`] says
//! whether one is a real cube and, if not, why; [`repair`] searches for a
//! re-orientation of it that is.

mod cubie;
mod error;
mod facelets;
mod geometry;
mod scan;
mod search;
mod validate;

pub use cubie::*;
pub use error::*;
pub use facelets::*;
pub use geometry::*;
pub use scan::*;
pub use search::*;
pub use validate::*;

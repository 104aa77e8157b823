//! Turning what a color scanner reports into a facelet string.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Error, Face, Facelets};

/// The stickers a scanner read off each face, in row-major order.
pub type Scan = BTreeMap<Face, Vec<String>>;

/// Which sticker names mean which face's color.
///
/// Names are matched case-insensitively, ignoring surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorScheme(BTreeMap<Face, Vec<String>>);

impl ColorScheme {
    pub fn new(names: BTreeMap<Face, Vec<String>>) -> Self {
        Self(names)
    }

    /// The usual Western color scheme: white up, green front, red right.
    ///
    /// Every face also accepts its own letter, so an already-lettered scan
    /// passes straight through.
    pub fn standard() -> Self {
        let names = |names: &[&str]| names.iter().map(|name| name.to_string()).collect();
        Self(BTreeMap::from([
            (Face::U, names(&["WHITE", "W", "U"])),
            (Face::R, names(&["RED", "R"])),
            (Face::F, names(&["GREEN", "G", "F"])),
            (Face::D, names(&["YELLOW", "Y", "D"])),
            (Face::L, names(&["ORANGE", "O", "L"])),
            (Face::B, names(&["BLUE", "B"])),
        ]))
    }

    /// Returns which face's color `name` is, if any.
    pub fn face_of(&self, name: &str) -> Option<Face> {
        let name = name.trim();
        self.0.iter().find_map(|(&face, names)| {
            names
                .iter()
                .any(|known| known.trim().eq_ignore_ascii_case(name))
                .then_some(face)
        })
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::standard()
    }
}

/// Flattens a scan into a facelet string in URFDLB order.
///
/// This doesn't check that each color appears 9 times; that's left to
/// validation, which can say more about what went wrong.
pub fn normalize(scan: &Scan, scheme: &ColorScheme) -> Result<Facelets, Error> {
    for face in Face::ALL {
        let stickers = scan.get(&face).ok_or(Error::MissingFace(face))?;
        if stickers.len() != 9 {
            return Err(Error::BadFaceSize {
                face,
                len: stickers.len(),
            });
        }
    }

    let mut result = Facelets::solved();
    for face in Face::ALL {
        for (slot, name) in result.face_mut(face).iter_mut().zip(&scan[&face]) {
            *slot = scheme
                .face_of(name)
                .ok_or_else(|| Error::UnknownSticker(name.clone()))?;
        }
    }
    Ok(result)
}

/// Returns which face each center's color belongs to, or an error if two
/// centers are the same color.
fn center_owners(facelets: &Facelets) -> Result<[Face; 6], Error> {
    let centers = facelets.centers();
    if !centers.iter().all_unique() {
        return Err(Error::AmbiguousCenters(centers.iter().join("")));
    }
    let mut owners = [Face::U; 6];
    for (face, center) in Face::ALL.into_iter().zip(centers) {
        owners[center as usize] = face;
    }
    Ok(owners)
}

/// Renames every sticker after the face whose center has its color.
///
/// This is for scans whose faces are in the right places but whose letters
/// came from a different color scheme.
pub fn relabel_by_centers(facelets: &Facelets) -> Result<Facelets, Error> {
    let owners = center_owners(facelets)?;
    Ok(Facelets::new(
        facelets.stickers().map(|sticker| owners[sticker as usize]),
    ))
}

/// Moves each face's block of 9 stickers to the face named by its center.
///
/// This is for scans whose faces were captured in some other order.
pub fn reorder_faces(facelets: &Facelets) -> Result<Facelets, Error> {
    let owners = center_owners(facelets)?;
    let mut result = facelets.clone();
    for face in Face::ALL {
        // The block whose center is `face`'s letter belongs at `face`.
        let source = owners[face as usize];
        result
            .face_mut(face)
            .copy_from_slice(facelets.face(source));
    }
    debug_assert!(Face::ALL.iter().all(|&face| result.center(face) == face));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::{normalize, relabel_by_centers, reorder_faces, ColorScheme, Scan};
    use crate::{apply_moves, parse_moves, Error, ErrorKind, Face, Facelets};
    use Face::*;

    fn scan_of(facelets: &Facelets, name: impl Fn(Face) -> &'static str) -> Scan {
        Face::ALL
            .into_iter()
            .map(|face| {
                let stickers = facelets
                    .face(face)
                    .iter()
                    .map(|&sticker| name(sticker).to_string())
                    .collect();
                (face, stickers)
            })
            .collect()
    }

    fn color_name(face: Face) -> &'static str {
        match face {
            U => "white",
            R => " Red",
            F => "GREEN ",
            D => "y",
            L => "Orange",
            B => "b",
        }
    }

    #[test]
    fn standard_scheme() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.face_of("white"), Some(U));
        assert_eq!(scheme.face_of(" o "), Some(L));
        assert_eq!(scheme.face_of("B"), Some(B));
        assert_eq!(scheme.face_of("F"), Some(F));
        assert_eq!(scheme.face_of("purple"), None);
    }

    #[test]
    fn normalize_colors() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("F R' U2 L").unwrap());
        let scan = scan_of(&scrambled, color_name);
        assert_eq!(normalize(&scan, &ColorScheme::standard()).unwrap(), scrambled);

        let letters = scan_of(&scrambled, |face| match face {
            U => "U",
            R => "R",
            F => "F",
            D => "D",
            L => "L",
            B => "B",
        });
        assert_eq!(normalize(&letters, &ColorScheme::standard()).unwrap(), scrambled);
    }

    #[test]
    fn normalize_errors() {
        let scheme = ColorScheme::standard();
        let mut scan = scan_of(&Facelets::solved(), color_name);

        scan.get_mut(&F).unwrap()[3] = "pink".to_string();
        match normalize(&scan, &scheme) {
            Err(Error::UnknownSticker(name)) => assert_eq!(name, "pink"),
            other => panic!("expected an unknown sticker, got {other:?}"),
        }

        scan.get_mut(&F).unwrap().pop();
        let err = normalize(&scan, &scheme).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFaceSize);

        scan.remove(&U);
        match normalize(&scan, &scheme) {
            Err(Error::MissingFace(face)) => assert_eq!(face, U),
            other => panic!("expected a missing face, got {other:?}"),
        }
    }

    #[test]
    fn custom_scheme() {
        let json = r#"{"U": ["yellow"], "D": ["white"], "F": ["blue"], "B": ["green"], "R": ["red"], "L": ["orange"]}"#;
        let scheme: ColorScheme = serde_json::from_str(json).unwrap();
        assert_eq!(scheme.face_of("YELLOW"), Some(U));
        assert_eq!(scheme.face_of("w"), None);
        assert_eq!(
            scheme,
            ColorScheme::new(BTreeMap::from([
                (U, vec!["yellow".to_string()]),
                (R, vec!["red".to_string()]),
                (F, vec!["blue".to_string()]),
                (D, vec!["white".to_string()]),
                (L, vec!["orange".to_string()]),
                (B, vec!["green".to_string()]),
            ]))
        );
    }

    #[test]
    fn relabel() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("R U' B").unwrap());
        // Swap the names of U and D, and of R and L, everywhere.
        let swap = |face: Face| match face {
            U => D,
            D => U,
            R => L,
            L => R,
            other => other,
        };
        let relettered = Facelets::new(scrambled.stickers().map(swap));
        assert_eq!(relabel_by_centers(&relettered).unwrap(), scrambled);
        assert_eq!(relabel_by_centers(&scrambled).unwrap(), scrambled);
    }

    #[test]
    fn reorder() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("D F2 L'").unwrap());
        // Scanned in the order F, U, R, B, D, L.
        let order = [F, U, R, B, D, L];
        let mut shuffled = scrambled.clone();
        for (slot, face) in Face::ALL.into_iter().zip(order) {
            shuffled.face_mut(slot).copy_from_slice(scrambled.face(face));
        }
        assert_eq!(reorder_faces(&shuffled).unwrap(), scrambled);
    }

    #[test]
    fn ambiguous_centers() {
        let mut facelets = Facelets::solved();
        facelets[4] = F;
        facelets[22] = U;
        // Still distinct, just swapped.
        assert!(relabel_by_centers(&facelets).is_ok());

        facelets[22] = F;
        facelets[13] = U;
        match reorder_faces(&facelets) {
            Err(Error::AmbiguousCenters(centers)) => assert_eq!(centers, "FUFDLB"),
            other => panic!("expected ambiguous centers, got {other:?}"),
        }
        let err = relabel_by_centers(&facelets).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousCenters);
    }
}

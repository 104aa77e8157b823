//! Repairing a whole file of scans at once.

use cube_scan::{repair, Candidate, Error, ErrorKind, SearchOptions};
use indicatif::ProgressBar;
use log::warn;
use rayon::prelude::*;
use serde::Serialize;

/// What became of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A valid cube was found, possibly after re-orienting the scan.
    Valid(Candidate),
    Invalid {
        kind: ErrorKind,
        message: String,
        /// The closest the search got, if it got as far as searching.
        best: Option<Candidate>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The 1-based line the scan was on.
    pub line: usize,
    pub input: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Valid(_))
    }
}

/// Returns the scans in a file, one per line, along with their line numbers.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_scans(contents: &str) -> Vec<(usize, String)> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, scan)| (line, scan.to_owned()))
        .collect()
}

fn repair_one(line: usize, input: &str, options: SearchOptions) -> Report {
    let outcome = match repair(input, options) {
        Ok(found) => Outcome::Valid(found),
        Err(err) => {
            warn!("line {line}: {}", err.kind());
            let kind = err.kind();
            let message = err.to_string();
            let best = match err {
                Error::SearchExhausted(exhausted) => Some(exhausted.best),
                _ => None,
            };
            Outcome::Invalid {
                kind,
                message,
                best,
            }
        }
    };
    Report {
        line,
        input: input.to_owned(),
        outcome,
    }
}

/// Repairs every scan in parallel, in the same order they were given.
///
/// The scans are what's spread across threads, so each individual search
/// runs sequentially regardless of `options.parallel`.
pub fn repair_all(
    scans: &[(usize, String)],
    options: SearchOptions,
    progress: &ProgressBar,
) -> Vec<Report> {
    let options = SearchOptions {
        parallel: false,
        ..options
    };
    progress.set_length(scans.len() as u64);
    let reports = scans
        .par_iter()
        .map(|(line, scan)| {
            let report = repair_one(*line, scan, options);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();
    reports
}

#[cfg(test)]
mod tests {
    use cube_scan::{apply_moves, parse_moves, ErrorKind, Face, Facelets, Phase, SearchOptions};
    use indicatif::ProgressBar;

    use crate::{read_scans, repair_all, Outcome};

    #[test]
    fn read() {
        let scans = read_scans("# header\nUUU\n\n  RRR  \n");
        assert_eq!(scans, [(2, "UUU".to_owned()), (4, "RRR".to_owned())]);
    }

    #[test]
    fn batch() {
        let scrambled = apply_moves(&Facelets::solved(), &parse_moves("R U F'").unwrap());
        let misread = scrambled.clone().with_face_rotated(Face::L, 2);
        let contents = format!("{scrambled}\nnot a cube\n{misread}\n");
        let scans = read_scans(&contents);

        let reports = repair_all(&scans, SearchOptions::default(), &ProgressBar::hidden());
        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports.iter().map(|report| report.line).collect::<Vec<_>>(),
            [1, 2, 3]
        );

        match &reports[0].outcome {
            Outcome::Valid(found) => assert_eq!(found.facelets, scrambled),
            other => panic!("expected a valid cube, got {other:?}"),
        }
        match &reports[1].outcome {
            Outcome::Invalid { kind, best, .. } => {
                assert_eq!(*kind, ErrorKind::BadLength);
                assert!(best.is_none());
            }
            other => panic!("expected an invalid cube, got {other:?}"),
        }
        match &reports[2].outcome {
            Outcome::Valid(found) => {
                assert_eq!(found.phase, Phase::Rescue);
                assert!(found.validation.ok);
            }
            other => panic!("expected a repaired cube, got {other:?}"),
        }
        assert_eq!(reports.iter().filter(|report| report.is_valid()).count(), 2);
    }

    #[test]
    fn report_json() {
        let scans = read_scans(&Facelets::solved().to_string());
        let reports = repair_all(&scans, SearchOptions::default(), &ProgressBar::hidden());
        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["status"], "valid");
        assert_eq!(json["line"], 1);
        assert_eq!(json["phase"], "Orientation");
        assert_eq!(json["validation"]["ok"], true);
    }
}

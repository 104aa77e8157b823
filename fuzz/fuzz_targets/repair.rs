#![no_main]
use cube_scan::{orientations, repair, Error, Facelets, SearchOptions, Validation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|facelets: Facelets| {
    // The full rescue is too slow to fuzz with, so stick to orientations.
    let options = SearchOptions {
        rescue: false,
        parallel: false,
    };
    match repair(&facelets.to_string(), options) {
        Ok(found) => {
            assert!(Validation::of(&found.facelets).ok);
            assert!(orientations(&facelets).contains(&found.facelets));
        }
        Err(Error::SearchExhausted(exhausted)) => {
            assert!(!exhausted.best.validation.ok);
            assert!(orientations(&facelets)
                .iter()
                .all(|facelets| !Validation::of(facelets).ok));
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
});

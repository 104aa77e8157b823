#![no_main]
use cube_scan::{validate, Facelets, Validation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, Facelets)| {
    let (raw, facelets) = input;
    let result = validate(raw);
    assert_eq!(result.ok, result.kind.is_none());
    assert_eq!(result.ok, result.score() == 0);

    // Parsing what we print gives back the same cube.
    let printed = facelets.to_string();
    assert_eq!(printed.parse::<Facelets>().unwrap(), facelets);
    assert_eq!(validate(&printed), Validation::of(&facelets));
});

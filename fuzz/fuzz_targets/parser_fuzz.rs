//! Parser fuzz target: feed arbitrary bytes to the generator.
//! Generation must not panic; it should return Ok(GeneratedSources) or Err(ParseError).
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(out) = wmigen::generate(s) {
        // Deterministic for the same input.
        assert_eq!(wmigen::generate(s).ok(), Some(out));
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}

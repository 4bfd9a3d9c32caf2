//! Interactive grammar analyzer and string-recognizer REPL.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

use std::process;

fn main() {
    if let Err(e) = gramparse::cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

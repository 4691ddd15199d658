//! Chess move-legality engine: an 8x8 board of pieces plus a move log that
//! can answer whether a single move is legal in the current position and
//! whether a player's king is attacked right now.
//!
//! The engine models the movement shape rules and the self-check constraint
//! (a move may not leave the mover's own king attacked). Path-blocking for
//! sliding pieces, captures, castling, en passant and mate detection are out
//! of scope.

// TODO: Gradually move most of warnings to deny.
#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod chess;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full crate version that can be used to identify how the binary
/// was built in the first place.
fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the crate version and build type on startup.
pub fn print_engine_info() {
    println!("Arbiter chess rules engine {}", version());
    println!("Release build: {}", !shadow_rs::is_debug());
}

//! # Todo CLI
//!
//! The binary is thin: the CLI lives in `cli/`, this file only invokes
//! `cli::run()` and turns a failure into exit status 1. Everything the CLI
//! calls into (`todo::api` and below) is UI agnostic.
//!
//! A failure here is either a startup failure (unreadable data directory,
//! corrupt collection file) or a failed flush at shutdown.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

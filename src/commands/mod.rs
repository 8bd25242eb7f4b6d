//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `reporef` command-line tool, one file per command.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `reporef` library to do the work.

pub mod compare;
pub mod completions;
pub mod download;
pub mod fetch;
pub mod parse;
pub mod resolve;

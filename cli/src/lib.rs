// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dots and Boxes CLI
//!
//! Command parsing and the REPL state behind the `dots-cli` binary. The
//! binary only owns terminal I/O and logging; everything it does to a
//! game goes through [`Repl::execute`].

pub mod command;
pub mod render;
pub mod repl;

pub use command::{Command, ParseError};
pub use repl::{Repl, Reply};

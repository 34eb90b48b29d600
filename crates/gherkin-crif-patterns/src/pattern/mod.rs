//! Step-pattern lexing and compilation.

mod compiler;
mod lexer;
mod placeholder;

pub use compiler::{build_regex_from_pattern, compile_pattern};

//! Syntax layer for step expressions.
//!
//! Expressions mix literal words with optional fragments, choices,
//! negations, wildcards, typed argument slots and assertion slots. This crate
//! tokenizes them, builds their syntax tree and synthesizes merged regex
//! fragments, leaving argument and assertion slots for the runtime crate to
//! bind against its registries.

mod errors;
mod pattern;
mod specificity;

pub use errors::{PatternError, SyntaxErrorInfo};
pub use pattern::{
    ArgumentSlot, AssertionSlot, Delimiter, Fragment, NegationScope, Node, PatternFragment, Token,
    TokenKind, compile_expression, parse_expression, tokenize,
};
pub use specificity::SpecificityScore;

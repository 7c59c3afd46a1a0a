//! Expression lexing, parsing and regex synthesis.

mod ast;
mod compiler;
mod lexer;
mod parser;

pub use ast::{Delimiter, NegationScope, Node};
pub use compiler::{ArgumentSlot, AssertionSlot, Fragment, PatternFragment, compile_expression};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::parse_expression;

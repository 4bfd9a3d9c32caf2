//! Error types for the grammar analyzer and parser drivers.

use thiserror::Error;

/// Errors that can occur during grammar construction, table generation, and parsing.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// A production name or rhs symbol is reserved, empty, or otherwise forbidden.
    #[error("illegal symbol: {0}")]
    IllegalSymbol(String),

    /// The nominated start symbol is not a defined nonterminal.
    #[error("illegal start symbol: {0}")]
    IllegalStart(String),

    /// A nonterminal is used on some rhs but never defined by a production.
    #[error("undefined nonterminal: {0}")]
    UndefinedNonterminal(String),

    /// LL(1) table build found more than one viable production for `M[nonterminal, terminal]`.
    #[error("LL(1) conflict at M[{nonterminal}, {terminal}]:\n  {prod1}\n  {prod2}")]
    LL1Conflict {
        nonterminal: String,
        terminal: String,
        prod1: String,
        prod2: String,
    },

    /// SLR(1)/CLR(1) table build found a shift/reduce conflict.
    #[error("shift/reduce conflict at state {state}, symbol {symbol}")]
    ShiftReduceConflict { state: usize, symbol: String },

    /// SLR(1)/CLR(1) table build found a reduce/reduce conflict.
    #[error("reduce/reduce conflict at state {state}, symbol {symbol}:\n  {prod1}\n  {prod2}")]
    ReduceReduceConflict {
        state: usize,
        symbol: String,
        prod1: String,
        prod2: String,
    },

    /// The input token stream does not match the grammar.
    #[error("parse error: {0}")]
    ParseError(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;

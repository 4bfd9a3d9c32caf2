//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core [`Symbol`] type: grammar symbols are
//! identifier strings, not single characters — a terminal or nonterminal
//! name can be any non-reserved identifier (`"E"`, `"num"`, `"if"`, ...).

use std::cmp::Ordering;
use std::fmt;

/// Marker for epsilon (the empty string) in FIRST sets.
pub const EPSILON_NAME: &str = "<empty>";
/// End-of-input sentinel terminal.
pub const END_NAME: &str = "$end";
/// Dot marker used only when pretty-printing LR items.
pub const DOT_NAME: &str = ".";
/// Name of the synthetic augmented-start nonterminal `S'`.
pub const START_NAME: &str = "S'";

/// Checks whether `name` is one of the reserved symbol strings.
pub fn is_reserved(name: &str) -> bool {
    matches!(name, EPSILON_NAME | END_NAME | DOT_NAME | START_NAME)
}

/// Represents a symbol in a context-free grammar.
///
/// # Grammar conventions
/// - Terminals and nonterminals carry an arbitrary, caller-chosen identifier.
/// - Epsilon is the empty string, displayed as `<empty>`.
/// - EndMarker is the end-of-input sentinel, displayed as `$end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol.
    Terminal(String),
    /// A nonterminal symbol.
    Nonterminal(String),
    /// The empty string (ε), i.e. `<empty>`.
    Epsilon,
    /// The end-of-input marker, i.e. `$end`.
    EndMarker,
}

impl Symbol {
    /// Checks if this symbol is a terminal.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a nonterminal.
    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    /// Checks if this symbol is epsilon (ε).
    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Checks if this symbol is the end marker (`$end`).
    #[inline]
    pub const fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Returns the identifier string of this symbol, if applicable.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => Some(s.as_str()),
            Symbol::Epsilon | Symbol::EndMarker => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => write!(f, "{}", s),
            Symbol::Epsilon => write!(f, "{}", EPSILON_NAME),
            Symbol::EndMarker => write!(f, "{}", END_NAME),
        }
    }
}

/// Custom ordering for symbols to ensure consistent, deterministic sorting.
///
/// Order: Epsilon < Terminals < Nonterminals < EndMarker.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Epsilon, Symbol::Epsilon) => Ordering::Equal,
            (Symbol::Epsilon, _) => Ordering::Less,
            (_, Symbol::Epsilon) => Ordering::Greater,

            (Symbol::EndMarker, Symbol::EndMarker) => Ordering::Equal,
            (Symbol::EndMarker, _) => Ordering::Greater,
            (_, Symbol::EndMarker) => Ordering::Less,

            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::Terminal(_), Symbol::Nonterminal(_)) => Ordering::Less,
            (Symbol::Nonterminal(_), Symbol::Terminal(_)) => Ordering::Greater,
            (Symbol::Nonterminal(a), Symbol::Nonterminal(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders a sequence of symbols space-separated, `<empty>` if empty.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    if symbols.is_empty() {
        return EPSILON_NAME.to_string();
    }
    symbols
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ordering() {
        assert!(Symbol::Epsilon < Symbol::Terminal("a".into()));
        assert!(Symbol::Terminal("a".into()) < Symbol::Nonterminal("A".into()));
        assert!(Symbol::Nonterminal("A".into()) < Symbol::EndMarker);
    }

    #[test]
    fn test_symbol_equality() {
        assert_eq!(Symbol::Terminal("a".into()), Symbol::Terminal("a".into()));
        assert_ne!(Symbol::Terminal("a".into()), Symbol::Terminal("b".into()));
        assert_ne!(
            Symbol::Terminal("a".into()),
            Symbol::Nonterminal("a".into())
        );
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved(EPSILON_NAME));
        assert!(is_reserved(END_NAME));
        assert!(is_reserved(DOT_NAME));
        assert!(!is_reserved("S"));
    }

    #[test]
    fn test_symbols_to_string() {
        let symbols = vec![
            Symbol::Nonterminal("S".into()),
            Symbol::Terminal("a".into()),
            Symbol::EndMarker,
        ];
        assert_eq!(symbols_to_string(&symbols), "S a $end");
        assert_eq!(symbols_to_string(&[]), "<empty>");
    }
}

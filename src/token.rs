//! Token and attribute-map types shared by the LL(1) and shift/reduce drivers.

use indexmap::IndexMap;
use std::fmt;

/// A token (or, on the LR symbol stack, a partially-reduced symbol) carrying
/// an optional caller-defined value `V`.
///
/// `name` must match a terminal name for input tokens; the end-of-input
/// token MUST use [`crate::symbol::END_NAME`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    pub name: String,
    pub value: Option<V>,
}

impl<V> Token<V> {
    pub fn new(name: impl Into<String>, value: Option<V>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn without_value(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn end() -> Self {
        Self::without_value(crate::symbol::END_NAME)
    }
}

impl<V> fmt::Display for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Attribute dictionary threaded through the LL(1) driver's semantic hooks.
///
/// Keys are plain attribute names (e.g. `"B.len"`, `"N.val"`), matching the
/// loosely-typed dict-keyed attribute flow described for attribute grammars.
pub type Attrs<V> = IndexMap<String, V>;

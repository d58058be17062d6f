//! Register declarations and references.

use std::fmt;
use std::ops::Range;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Reference to a register or to one element of it.
///
/// `q` refers to the whole register, `q[i]` to its `i`-th wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterRef {
    /// Register name.
    pub register: String,
    /// Local index within the register, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl RegisterRef {
    /// Create a reference to a single element.
    pub fn single(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: Some(index),
        }
    }

    /// Create a reference to an entire register.
    pub fn register(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            index: None,
        }
    }

    /// Whether this reference names the whole register.
    pub fn is_whole_register(&self) -> bool {
        self.index.is_none()
    }
}

impl fmt::Display for RegisterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(idx) => write!(f, "{}[{idx}]", self.register),
            None => write!(f, "{}", self.register),
        }
    }
}

/// Insertion-ordered mapping from register name to declared width.
///
/// Declaration order fixes the flat wire numbering: the first wire of a
/// register sits right after the last wire of every register declared
/// before it. Re-inserting an existing name replaces its width but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, u32)>", into = "Vec<(String, u32)>")]
pub struct RegisterTable {
    entries: Vec<(String, u32)>,
    positions: FxHashMap<String, usize>,
}

impl RegisterTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a register, returning the previous width if the name was
    /// already declared.
    pub fn insert(&mut self, name: impl Into<String>, width: u32) -> Option<u32> {
        let name = name.into();
        if let Some(&pos) = self.positions.get(&name) {
            let previous = self.entries[pos].1;
            self.entries[pos].1 = width;
            return Some(previous);
        }
        self.positions.insert(name.clone(), self.entries.len());
        self.entries.push((name, width));
        None
    }

    /// Declared width of a register.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.positions.get(name).map(|&pos| self.entries[pos].1)
    }

    /// Whether a register with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Number of declared registers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no register is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, width)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(name, width)| (name.as_str(), *width))
    }

    /// Sum of all declared widths (the flat wire count).
    ///
    /// Summed in `u64`, so the count is exact even when it no longer fits
    /// a `u32` wire index.
    pub fn total_width(&self) -> u64 {
        self.entries.iter().map(|(_, width)| u64::from(*width)).sum()
    }

    /// Flat index of the first wire of `name`, or `None` if the register is
    /// not declared or starts past the last addressable wire.
    pub fn offset_of(&self, name: &str) -> Option<u32> {
        let pos = *self.positions.get(name)?;
        let offset: u64 = self.entries[..pos]
            .iter()
            .map(|(_, width)| u64::from(*width))
            .sum();
        u32::try_from(offset).ok()
    }

    /// Resolve a reference to the flat wire range it covers.
    ///
    /// An indexed reference covers exactly one wire; a whole-register
    /// reference covers every wire of the register.
    ///
    /// # Errors
    ///
    /// [`IrError::WireOverflow`] if the range ends past `u32::MAX`.
    pub fn resolve(&self, reference: &RegisterRef) -> IrResult<Range<u32>> {
        let width = self
            .get(&reference.register)
            .ok_or_else(|| IrError::UndeclaredRegister {
                register: reference.register.clone(),
            })?;
        match reference.index {
            Some(index) if index >= width => {
                return Err(IrError::IndexOutOfBounds {
                    register: reference.register.clone(),
                    index,
                    width,
                });
            }
            _ => {}
        }

        let overflow = || IrError::WireOverflow {
            register: reference.register.clone(),
        };
        let offset = self.offset_of(&reference.register).ok_or_else(overflow)?;
        let (start, len) = match reference.index {
            Some(index) => (offset.checked_add(index).ok_or_else(overflow)?, 1),
            None => (offset, width),
        };
        let end = start.checked_add(len).ok_or_else(overflow)?;
        Ok(start..end)
    }

    /// Check that a reference resolves without computing the range.
    pub fn check(&self, reference: &RegisterRef) -> IrResult<()> {
        self.resolve(reference).map(|_| ())
    }
}

impl From<Vec<(String, u32)>> for RegisterTable {
    fn from(entries: Vec<(String, u32)>) -> Self {
        let mut table = RegisterTable::new();
        for (name, width) in entries {
            table.insert(name, width);
        }
        table
    }
}

impl From<RegisterTable> for Vec<(String, u32)> {
    fn from(table: RegisterTable) -> Self {
        table.entries
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for RegisterTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = RegisterTable::new();
        for (name, width) in iter {
            table.insert(name, width);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_ref_display() {
        assert_eq!(RegisterRef::single("q", 3).to_string(), "q[3]");
        assert_eq!(RegisterRef::register("anc").to_string(), "anc");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = RegisterTable::new();
        table.insert("b", 2);
        table.insert("a", 3);
        table.insert("c", 1);

        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(table.total_width(), 6);
    }

    #[test]
    fn test_redeclaration_keeps_position() {
        let mut table = RegisterTable::new();
        table.insert("q", 2);
        table.insert("r", 1);
        assert_eq!(table.insert("q", 5), Some(2));

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("q", 5), ("r", 1)]);
        assert_eq!(table.offset_of("r"), Some(5));
    }

    #[test]
    fn test_resolve_uses_declaration_offsets() {
        let table: RegisterTable = [("a", 2), ("b", 3)].into_iter().collect();

        assert_eq!(table.resolve(&RegisterRef::single("a", 1)).unwrap(), 1..2);
        assert_eq!(table.resolve(&RegisterRef::single("b", 0)).unwrap(), 2..3);
        assert_eq!(table.resolve(&RegisterRef::single("b", 2)).unwrap(), 4..5);
        assert_eq!(table.resolve(&RegisterRef::register("b")).unwrap(), 2..5);
    }

    #[test]
    fn test_resolve_errors() {
        let table: RegisterTable = [("q", 2)].into_iter().collect();

        let err = table.resolve(&RegisterRef::single("r", 0)).unwrap_err();
        assert!(matches!(err, IrError::UndeclaredRegister { ref register } if register == "r"));
        assert!(err.is_unresolved_register());

        let err = table.resolve(&RegisterRef::single("q", 2)).unwrap_err();
        assert_eq!(
            err,
            IrError::IndexOutOfBounds {
                register: "q".into(),
                index: 2,
                width: 2,
            }
        );
    }

    #[test]
    fn test_resolve_past_u32_wires_is_an_error() {
        let table: RegisterTable = [("a", u32::MAX), ("b", 1), ("c", 2)].into_iter().collect();

        assert_eq!(table.total_width(), u64::from(u32::MAX) + 3);
        assert_eq!(table.offset_of("b"), Some(u32::MAX));
        assert_eq!(table.offset_of("c"), None);
        assert_eq!(
            table.resolve(&RegisterRef::register("a")).unwrap(),
            0..u32::MAX
        );

        for reference in [
            RegisterRef::single("b", 0),
            RegisterRef::register("b"),
            RegisterRef::single("c", 1),
        ] {
            let err = table.resolve(&reference).unwrap_err();
            assert!(matches!(err, IrError::WireOverflow { .. }), "{reference}: {err}");
            assert!(err.is_unresolved_register());
        }
    }

    #[test]
    fn test_serializes_as_pairs() {
        let table: RegisterTable = [("q", 2), ("anc", 1)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[["q",2],["anc",1]]"#);

        let back: RegisterTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}

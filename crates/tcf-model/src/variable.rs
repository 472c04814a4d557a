//! Variable declarations and typed handles.
//!
//! A problem declares its variables once into a [`Variables`] registry. Each
//! declaration returns a small `Copy` handle that indexes into the per-test-case
//! [`TestData`] arena created by [`Variables::instantiate`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{Cell, Slot, TestData, new_scalar_cell, new_sequence_cell, new_table_cell};
use crate::error::{Result, SpecError};
use crate::primitive::Primitive;

/// Position of a variable in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Index into the registry and into every [`TestData`] it instantiates.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// One value.
    Scalar,
    /// Ordered list of values.
    Sequence,
    /// Ordered list of rows, rows may differ in length.
    Table,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T> {
            id: VarId,
            _marker: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            fn new(id: VarId) -> Self {
                Self {
                    id,
                    _marker: PhantomData,
                }
            }

            /// Registry position of this variable.
            pub fn id(self) -> VarId {
                self.id
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.id.0).finish()
            }
        }

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl<T> Eq for $name<T> {}
    };
}

typed_handle!(
    /// Handle to a single value of type `T`.
    Scalar
);
typed_handle!(
    /// Handle to an ordered list of `T`.
    Sequence
);
typed_handle!(
    /// Handle to a (possibly jagged) list of rows of `T`.
    Table
);

/// Handle to a string read or written as an entire line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawScalar(VarId);

impl RawScalar {
    pub fn id(self) -> VarId {
        self.0
    }
}

/// Handle to a list of strings, one entire line each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSequence(VarId);

impl RawSequence {
    pub fn id(self) -> VarId {
        self.0
    }
}

/// Metadata of one declared variable.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    name: Arc<str>,
    kind: VariableKind,
    raw: bool,
    element_type: &'static str,
    make_cell: fn() -> Cell,
}

impl VariableDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Whether values are whole lines rather than tokens.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Element type name (e.g. `i64`).
    pub fn element_type(&self) -> &'static str {
        self.element_type
    }
}

/// Registry of declared variables.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    decls: Vec<VariableDecl>,
}

impl Variables {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a scalar.
    pub fn scalar<T: Primitive>(&mut self, name: &str) -> Result<Scalar<T>> {
        let id = self.declare(
            name,
            VariableKind::Scalar,
            false,
            T::TYPE_NAME,
            new_scalar_cell::<T>,
        )?;
        Ok(Scalar::new(id))
    }

    /// Declare a sequence.
    pub fn sequence<T: Primitive>(&mut self, name: &str) -> Result<Sequence<T>> {
        let id = self.declare(
            name,
            VariableKind::Sequence,
            false,
            T::TYPE_NAME,
            new_sequence_cell::<T>,
        )?;
        Ok(Sequence::new(id))
    }

    /// Declare a table (rows may have independent lengths).
    pub fn table<T: Primitive>(&mut self, name: &str) -> Result<Table<T>> {
        let id = self.declare(
            name,
            VariableKind::Table,
            false,
            T::TYPE_NAME,
            new_table_cell::<T>,
        )?;
        Ok(Table::new(id))
    }

    /// Declare a raw scalar: one whole line of text.
    pub fn raw_scalar(&mut self, name: &str) -> Result<RawScalar> {
        let id = self.declare(
            name,
            VariableKind::Scalar,
            true,
            String::TYPE_NAME,
            new_scalar_cell::<String>,
        )?;
        Ok(RawScalar(id))
    }

    /// Declare a raw sequence: one whole line of text per element.
    pub fn raw_sequence(&mut self, name: &str) -> Result<RawSequence> {
        let id = self.declare(
            name,
            VariableKind::Sequence,
            true,
            String::TYPE_NAME,
            new_sequence_cell::<String>,
        )?;
        Ok(RawSequence(id))
    }

    fn declare(
        &mut self,
        name: &str,
        kind: VariableKind,
        raw: bool,
        element_type: &'static str,
        make_cell: fn() -> Cell,
    ) -> Result<VarId> {
        if name.trim().is_empty() {
            return Err(SpecError::EmptyVariableName);
        }
        if self.decls.iter().any(|decl| &*decl.name == name) {
            return Err(SpecError::duplicate_variable(name));
        }
        let id = VarId(self.decls.len());
        self.decls.push(VariableDecl {
            name: Arc::from(name),
            kind,
            raw,
            element_type,
            make_cell,
        });
        Ok(id)
    }

    /// Look up a declaration.
    pub fn get(&self, id: VarId) -> Option<&VariableDecl> {
        self.decls.get(id.0)
    }

    /// Look up a declaration, failing for handles from another registry.
    pub fn require(&self, id: VarId) -> Result<&VariableDecl> {
        self.get(id)
            .ok_or(SpecError::UnknownVariable { index: id.0 })
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDecl> {
        self.decls.iter()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Allocate fresh, empty storage for one test case.
    pub fn instantiate(&self) -> TestData {
        let slots = self
            .decls
            .iter()
            .map(|decl| Slot::new(Arc::clone(&decl.name), (decl.make_cell)()))
            .collect();
        TestData::from_slots(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_assigns_positions() {
        let mut vars = Variables::new();
        let a = vars.scalar::<i32>("A").unwrap();
        let v = vars.sequence::<i64>("V").unwrap();
        let s = vars.raw_scalar("S").unwrap();
        assert_eq!(a.id().index(), 0);
        assert_eq!(v.id().index(), 1);
        assert_eq!(s.id().index(), 2);
        assert_eq!(vars.len(), 3);

        let decl = vars.get(v.id()).unwrap();
        assert_eq!(decl.name(), "V");
        assert_eq!(decl.kind(), VariableKind::Sequence);
        assert_eq!(decl.element_type(), "i64");
        assert!(!decl.is_raw());
        assert!(vars.get(s.id()).unwrap().is_raw());
    }

    #[test]
    fn test_duplicate_and_empty_names_rejected() {
        let mut vars = Variables::new();
        vars.scalar::<i32>("A").unwrap();
        assert_eq!(
            vars.table::<i32>("A").unwrap_err(),
            SpecError::duplicate_variable("A")
        );
        assert_eq!(
            vars.scalar::<i32>(" ").unwrap_err(),
            SpecError::EmptyVariableName
        );
    }

    #[test]
    fn test_handles_are_copy() {
        let mut vars = Variables::new();
        let a = vars.scalar::<String>("A").unwrap();
        let b = a;
        assert_eq!(a, b);
    }
}

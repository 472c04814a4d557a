//! Per-test-case value storage.
//!
//! [`TestData`] owns the values of every declared variable for one test case.
//! Author code reads and writes through handles (`data[a]`, `data[v].push(..)`);
//! the codec works through the type-erased cells below.

use std::any::Any;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::primitive::Primitive;
use crate::variable::{RawScalar, RawSequence, Scalar, Sequence, Table, VarId, VariableKind};

/// Type-erased single value.
pub trait ScalarCell: fmt::Debug + Send + Sync {
    /// Replace the value from a token. Returns `false` if the token does not convert.
    fn parse_token(&mut self, token: &str) -> bool;
    /// Append the printed value.
    fn write_to(&self, out: &mut String);
    fn clone_box(&self) -> Box<dyn ScalarCell>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Type-erased ordered list.
pub trait SequenceCell: fmt::Debug + Send + Sync {
    fn clear(&mut self);
    fn len(&self) -> usize;
    /// Append an element from a token. Returns `false` if the token does not convert.
    fn push_token(&mut self, token: &str) -> bool;
    /// Append the printed element at `index`; nothing when out of range.
    fn write_element(&self, index: usize, out: &mut String);
    fn clone_box(&self) -> Box<dyn SequenceCell>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Type-erased list of rows.
pub trait TableCell: fmt::Debug + Send + Sync {
    fn clear(&mut self);
    fn rows(&self) -> usize;
    /// Length of `row`, zero when out of range.
    fn row_len(&self, row: usize) -> usize;
    /// Start a new, empty row.
    fn push_row(&mut self);
    /// Append a cell to the last row (starting one if there is none).
    fn push_token(&mut self, token: &str) -> bool;
    /// Append the printed cell; nothing when out of range.
    fn write_cell(&self, row: usize, column: usize, out: &mut String);
    fn clone_box(&self) -> Box<dyn TableCell>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug, Clone, Default)]
struct ScalarValue<T>(T);

#[derive(Debug, Clone, Default)]
struct SequenceValue<T>(Vec<T>);

#[derive(Debug, Clone, Default)]
struct TableValue<T>(Vec<Vec<T>>);

impl<T: Primitive> ScalarCell for ScalarValue<T> {
    fn parse_token(&mut self, token: &str) -> bool {
        match T::parse_token(token) {
            Some(value) => {
                self.0 = value;
                true
            }
            None => false,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.0.to_string());
    }

    fn clone_box(&self) -> Box<dyn ScalarCell> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Primitive> SequenceCell for SequenceValue<T> {
    fn clear(&mut self) {
        self.0.clear();
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn push_token(&mut self, token: &str) -> bool {
        match T::parse_token(token) {
            Some(value) => {
                self.0.push(value);
                true
            }
            None => false,
        }
    }

    fn write_element(&self, index: usize, out: &mut String) {
        if let Some(value) = self.0.get(index) {
            out.push_str(&value.to_string());
        }
    }

    fn clone_box(&self) -> Box<dyn SequenceCell> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Primitive> TableCell for TableValue<T> {
    fn clear(&mut self) {
        self.0.clear();
    }

    fn rows(&self) -> usize {
        self.0.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self.0.get(row).map_or(0, Vec::len)
    }

    fn push_row(&mut self) {
        self.0.push(Vec::new());
    }

    fn push_token(&mut self, token: &str) -> bool {
        let Some(value) = T::parse_token(token) else {
            return false;
        };
        match self.0.last_mut() {
            Some(row) => row.push(value),
            None => self.0.push(vec![value]),
        }
        true
    }

    fn write_cell(&self, row: usize, column: usize, out: &mut String) {
        if let Some(value) = self.0.get(row).and_then(|cells| cells.get(column)) {
            out.push_str(&value.to_string());
        }
    }

    fn clone_box(&self) -> Box<dyn TableCell> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) fn new_scalar_cell<T: Primitive>() -> Cell {
    Cell::Scalar(Box::new(ScalarValue::<T>::default()))
}

pub(crate) fn new_sequence_cell<T: Primitive>() -> Cell {
    Cell::Sequence(Box::new(SequenceValue::<T>::default()))
}

pub(crate) fn new_table_cell<T: Primitive>() -> Cell {
    Cell::Table(Box::new(TableValue::<T>::default()))
}

/// Storage of one variable, by kind.
#[derive(Debug)]
pub enum Cell {
    Scalar(Box<dyn ScalarCell>),
    Sequence(Box<dyn SequenceCell>),
    Table(Box<dyn TableCell>),
}

impl Cell {
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Scalar(_) => VariableKind::Scalar,
            Self::Sequence(_) => VariableKind::Sequence,
            Self::Table(_) => VariableKind::Table,
        }
    }
}

impl Clone for Cell {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(cell) => Self::Scalar(cell.clone_box()),
            Self::Sequence(cell) => Self::Sequence(cell.clone_box()),
            Self::Table(cell) => Self::Table(cell.clone_box()),
        }
    }
}

/// One named cell of a [`TestData`].
#[derive(Debug, Clone)]
pub struct Slot {
    name: Arc<str>,
    cell: Cell,
}

impl Slot {
    pub(crate) fn new(name: Arc<str>, cell: Cell) -> Self {
        Self { name, cell }
    }
}

/// Values of all variables for one test case.
///
/// Indexing with a handle returns the typed value. Indexing panics when the
/// handle was declared in a different registry than the one that created this
/// value; use the `try_*` accessors to check instead.
#[derive(Debug, Clone)]
pub struct TestData {
    slots: Vec<Slot>,
}

impl TestData {
    pub(crate) fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Name of the variable at `id`.
    pub fn name(&self, id: VarId) -> Option<&str> {
        self.slots.get(id.index()).map(|slot| &*slot.name)
    }

    pub fn cell(&self, id: VarId) -> Option<&Cell> {
        self.slots.get(id.index()).map(|slot| &slot.cell)
    }

    /// Name and mutable cell of the variable at `id`.
    pub fn cell_mut(&mut self, id: VarId) -> Option<(&str, &mut Cell)> {
        self.slots
            .get_mut(id.index())
            .map(|slot| (&*slot.name, &mut slot.cell))
    }

    fn any(&self, id: VarId) -> Option<&dyn Any> {
        match self.cell(id)? {
            Cell::Scalar(cell) => Some(cell.as_any()),
            Cell::Sequence(cell) => Some(cell.as_any()),
            Cell::Table(cell) => Some(cell.as_any()),
        }
    }

    fn any_mut(&mut self, id: VarId) -> Option<&mut dyn Any> {
        match self.slots.get_mut(id.index()).map(|slot| &mut slot.cell)? {
            Cell::Scalar(cell) => Some(cell.as_any_mut()),
            Cell::Sequence(cell) => Some(cell.as_any_mut()),
            Cell::Table(cell) => Some(cell.as_any_mut()),
        }
    }

    pub fn try_scalar<T: Primitive>(&self, handle: Scalar<T>) -> Option<&T> {
        self.any(handle.id())?
            .downcast_ref::<ScalarValue<T>>()
            .map(|value| &value.0)
    }

    pub fn try_scalar_mut<T: Primitive>(&mut self, handle: Scalar<T>) -> Option<&mut T> {
        self.any_mut(handle.id())?
            .downcast_mut::<ScalarValue<T>>()
            .map(|value| &mut value.0)
    }

    pub fn try_sequence<T: Primitive>(&self, handle: Sequence<T>) -> Option<&Vec<T>> {
        self.any(handle.id())?
            .downcast_ref::<SequenceValue<T>>()
            .map(|value| &value.0)
    }

    pub fn try_sequence_mut<T: Primitive>(&mut self, handle: Sequence<T>) -> Option<&mut Vec<T>> {
        self.any_mut(handle.id())?
            .downcast_mut::<SequenceValue<T>>()
            .map(|value| &mut value.0)
    }

    pub fn try_table<T: Primitive>(&self, handle: Table<T>) -> Option<&Vec<Vec<T>>> {
        self.any(handle.id())?
            .downcast_ref::<TableValue<T>>()
            .map(|value| &value.0)
    }

    pub fn try_table_mut<T: Primitive>(&mut self, handle: Table<T>) -> Option<&mut Vec<Vec<T>>> {
        self.any_mut(handle.id())?
            .downcast_mut::<TableValue<T>>()
            .map(|value| &mut value.0)
    }

    pub fn try_raw_scalar(&self, handle: RawScalar) -> Option<&String> {
        self.any(handle.id())?
            .downcast_ref::<ScalarValue<String>>()
            .map(|value| &value.0)
    }

    pub fn try_raw_scalar_mut(&mut self, handle: RawScalar) -> Option<&mut String> {
        self.any_mut(handle.id())?
            .downcast_mut::<ScalarValue<String>>()
            .map(|value| &mut value.0)
    }

    pub fn try_raw_sequence(&self, handle: RawSequence) -> Option<&Vec<String>> {
        self.any(handle.id())?
            .downcast_ref::<SequenceValue<String>>()
            .map(|value| &value.0)
    }

    pub fn try_raw_sequence_mut(&mut self, handle: RawSequence) -> Option<&mut Vec<String>> {
        self.any_mut(handle.id())?
            .downcast_mut::<SequenceValue<String>>()
            .map(|value| &mut value.0)
    }
}

#[track_caller]
fn foreign_handle(id: VarId, expected: &str) -> ! {
    panic!(
        "variable #{} is not a {expected} of this test case; the handle belongs to another registry",
        id.index()
    )
}

impl<T: Primitive> Index<Scalar<T>> for TestData {
    type Output = T;

    fn index(&self, handle: Scalar<T>) -> &T {
        self.try_scalar(handle)
            .unwrap_or_else(|| foreign_handle(handle.id(), "scalar"))
    }
}

impl<T: Primitive> IndexMut<Scalar<T>> for TestData {
    fn index_mut(&mut self, handle: Scalar<T>) -> &mut T {
        match self.try_scalar_mut(handle) {
            Some(value) => value,
            None => foreign_handle(handle.id(), "scalar"),
        }
    }
}

impl<T: Primitive> Index<Sequence<T>> for TestData {
    type Output = Vec<T>;

    fn index(&self, handle: Sequence<T>) -> &Vec<T> {
        self.try_sequence(handle)
            .unwrap_or_else(|| foreign_handle(handle.id(), "sequence"))
    }
}

impl<T: Primitive> IndexMut<Sequence<T>> for TestData {
    fn index_mut(&mut self, handle: Sequence<T>) -> &mut Vec<T> {
        match self.try_sequence_mut(handle) {
            Some(value) => value,
            None => foreign_handle(handle.id(), "sequence"),
        }
    }
}

impl<T: Primitive> Index<Table<T>> for TestData {
    type Output = Vec<Vec<T>>;

    fn index(&self, handle: Table<T>) -> &Vec<Vec<T>> {
        self.try_table(handle)
            .unwrap_or_else(|| foreign_handle(handle.id(), "table"))
    }
}

impl<T: Primitive> IndexMut<Table<T>> for TestData {
    fn index_mut(&mut self, handle: Table<T>) -> &mut Vec<Vec<T>> {
        match self.try_table_mut(handle) {
            Some(value) => value,
            None => foreign_handle(handle.id(), "table"),
        }
    }
}

impl Index<RawScalar> for TestData {
    type Output = String;

    fn index(&self, handle: RawScalar) -> &String {
        self.try_raw_scalar(handle)
            .unwrap_or_else(|| foreign_handle(handle.id(), "raw scalar"))
    }
}

impl IndexMut<RawScalar> for TestData {
    fn index_mut(&mut self, handle: RawScalar) -> &mut String {
        match self.try_raw_scalar_mut(handle) {
            Some(value) => value,
            None => foreign_handle(handle.id(), "raw scalar"),
        }
    }
}

impl Index<RawSequence> for TestData {
    type Output = Vec<String>;

    fn index(&self, handle: RawSequence) -> &Vec<String> {
        self.try_raw_sequence(handle)
            .unwrap_or_else(|| foreign_handle(handle.id(), "raw sequence"))
    }
}

impl IndexMut<RawSequence> for TestData {
    fn index_mut(&mut self, handle: RawSequence) -> &mut Vec<String> {
        match self.try_raw_sequence_mut(handle) {
            Some(value) => value,
            None => foreign_handle(handle.id(), "raw sequence"),
        }
    }
}

//! Destination buffers for the body parser
//!
//! The parser never allocates. Callers size their buffers from the header
//! and lend them through [`FieldSink`].

use crate::format::{Field, FormatVariant};

/// Mutable view of one field's buffer
#[derive(Debug)]
pub enum FieldSlots<'a> {
    /// Float slots (`VAL`)
    Values(&'a mut [f32]),
    /// Index slots (`ROWPTR`, `COLIND`, `ROW`, `COL`)
    Indices(&'a mut [usize]),
}

impl FieldSlots<'_> {
    /// Number of slots
    pub fn len(&self) -> usize {
        match self {
            FieldSlots::Values(slots) => slots.len(),
            FieldSlots::Indices(slots) => slots.len(),
        }
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for caller-owned buffers the body parser fills
pub trait FieldSink {
    /// Variant whose fields these buffers hold
    fn variant(&self) -> FormatVariant;

    /// Borrow the buffer for `field`, or `None` if this sink has none
    fn slots(&mut self, field: Field) -> Option<FieldSlots<'_>>;

    /// Number of slots available for `field`
    fn capacity(&mut self, field: Field) -> Option<usize> {
        self.slots(field).map(|slots| slots.len())
    }
}

/// Borrowed CSR arrays
#[derive(Debug)]
pub struct CsrBuffers<'a> {
    pub val: &'a mut [f32],
    pub row_ptr: &'a mut [usize],
    pub col_index: &'a mut [usize],
}

impl<'a> CsrBuffers<'a> {
    /// Bundle caller slices
    pub fn new(val: &'a mut [f32], row_ptr: &'a mut [usize], col_index: &'a mut [usize]) -> Self {
        Self {
            val,
            row_ptr,
            col_index,
        }
    }
}

impl FieldSink for CsrBuffers<'_> {
    fn variant(&self) -> FormatVariant {
        FormatVariant::Csr
    }

    fn slots(&mut self, field: Field) -> Option<FieldSlots<'_>> {
        match field {
            Field::Val => Some(FieldSlots::Values(&mut *self.val)),
            Field::RowPtr => Some(FieldSlots::Indices(&mut *self.row_ptr)),
            Field::ColInd => Some(FieldSlots::Indices(&mut *self.col_index)),
            Field::Row | Field::Col => None,
        }
    }
}

/// Borrowed COO arrays
#[derive(Debug)]
pub struct CooBuffers<'a> {
    pub row: &'a mut [usize],
    pub col: &'a mut [usize],
    pub val: &'a mut [f32],
}

impl<'a> CooBuffers<'a> {
    /// Bundle caller slices
    pub fn new(row: &'a mut [usize], col: &'a mut [usize], val: &'a mut [f32]) -> Self {
        Self { row, col, val }
    }
}

impl FieldSink for CooBuffers<'_> {
    fn variant(&self) -> FormatVariant {
        FormatVariant::Coo
    }

    fn slots(&mut self, field: Field) -> Option<FieldSlots<'_>> {
        match field {
            Field::Val => Some(FieldSlots::Values(&mut *self.val)),
            Field::Row => Some(FieldSlots::Indices(&mut *self.row)),
            Field::Col => Some(FieldSlots::Indices(&mut *self.col)),
            Field::RowPtr | Field::ColInd => None,
        }
    }
}

//! Abstract interfaces for HeRCM matrices and body buffers

pub mod matrix;
pub mod sink;

pub use matrix::SparseMatrix;
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
pub use sink::{CooBuffers, CsrBuffers, FieldSink, FieldSlots};

#![no_std]

//! HeRCM Core - Sparse Matrix Text Format Definitions
//!
//! This crate provides the header codec, the field-tagged body parser, COO
//! canonicalization and COO to CSR conversion for HeRCM files. It performs
//! no I/O: the body parser fills caller-owned buffers and the writer emits
//! text into any `core::fmt::Write` sink.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod body;
#[cfg(feature = "alloc")]
pub mod canonical;
pub mod convert;
pub mod error;
pub mod format;
#[cfg(feature = "alloc")]
pub mod matrix;
pub mod traits;
pub mod validation;
pub mod writer;

pub use body::{parse_body, parse_document, BodyLimits, BodyParser, BodyState, BodySummary};
#[cfg(feature = "alloc")]
pub use canonical::{canonicalize, is_row_major};
pub use convert::{coo_to_csr, csr_to_coo_rows, finish_row_ptr, scan_row_starts};
pub use error::*;
pub use format::*;
#[cfg(feature = "alloc")]
pub use matrix::{CooMatrix, CsrMatrix};
pub use traits::*;
pub use writer::{write_coo_body, write_csr_body, TextLayout};

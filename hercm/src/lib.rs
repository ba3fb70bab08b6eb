//! HeRCM - Sparse Matrix Text Files
//!
//! This library reads and writes HeRCM sparse matrix files and converts
//! between their COO and CSR layouts.
//!
//! ## Architecture
//!
//! HeRCM follows a format/I-O separation:
//!
//! - **hercm-core**: Header codec, body state machine, canonicalization and
//!   conversion (no I/O)
//! - **hercm**: File reading and writing, memory mapping, configuration,
//!   Matrix Market and valcol exchange
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hercm::{BodySource, HercmFile, Symmetry, WriteConfig};
//!
//! fn example() -> hercm::Result<()> {
//!     let file = HercmFile::open("matrix.hercm")?;
//!     let csr = file.read_as_csr()?;
//!     println!("{:?} with {} entries", csr.row_ptr, csr.val.len());
//!
//!     hercm::write_csr("copy.hercm", &csr, Symmetry::Asym, &WriteConfig::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): parse files through a read-only memory map
//! - **serde**: serialize headers

pub use hercm_core::{
    // Matrix types and traits
    CooMatrix, CsrMatrix, MatrixOperations, SparseMatrix,
    // Body buffers and parser
    BodyLimits, BodySummary, CooBuffers, CsrBuffers, FieldSink,
    // Format definitions
    Field, FormatTag, FormatVariant, Header, MatrixFormat, Symmetry,
    // Errors
    ErrorCategory, HeaderFault, HercmError,
};

pub mod config;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap;
pub mod mtx;
pub mod reader;
pub mod valcol;
pub mod writer;

pub use config::{ReadConfig, WriteConfig};
pub use error::{Error, Result};
#[cfg(feature = "mmap")]
pub use mmap::MappedHercm;
pub use mtx::{hercm_to_mtx, mtx_to_hercm, read_mtx, read_mtx_from, render_mtx, write_mtx, write_mtx_to};
pub use reader::{read_body, read_header, read_matrix, BodySource, HercmFile};
pub use valcol::{read_valcol, read_valcol_from, render_valcol, write_valcol, write_valcol_to};
pub use writer::{render_coo, render_csr, write_coo, write_csr, write_csr_to};

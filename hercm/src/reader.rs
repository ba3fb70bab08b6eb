//! Reading HeRCM files
//!
//! Header and body are read line by line from any [`BufRead`]. The
//! [`BodySource`] trait layers the buffer-filling and allocating readers on
//! top of anything that can hand out the body text, such as an open file or
//! a memory map.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use hercm_core::validation::{verification_matches, verification_sum};
use hercm_core::{
    BodyParser, BodySummary, CooBuffers, CooMatrix, CsrBuffers, CsrMatrix, FieldSink,
    Field, FormatVariant, Header, HeaderFault, HercmError,
};
use log::{debug, trace, warn};

use crate::config::ReadConfig;
use crate::error::{Error, Result};

/// Read one line into `buf`, returning `None` at end of input
pub(crate) fn next_line<'b, R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &'b mut Vec<u8>,
    line: usize,
) -> Result<Option<&'b str>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    std::str::from_utf8(buf)
        .map(Some)
        .map_err(|_| Error::Encoding { line })
}

/// Read and parse the first line
pub fn read_header<R: BufRead + ?Sized>(reader: &mut R) -> Result<Header> {
    let mut buf = Vec::new();
    let line = next_line(reader, &mut buf, 1)?
        .ok_or(HercmError::MalformedHeader(HeaderFault::Empty))?;
    let header = Header::parse(line)?;
    debug!(
        "header: {} {}x{} nnz={} {}",
        header.tag, header.height, header.width, header.nnz, header.symmetry
    );
    Ok(header)
}

/// Fill `sink` from the body lines following `header`
///
/// The reader must be positioned just after the header line.
pub fn read_body<R, S>(
    reader: &mut R,
    header: &Header,
    sink: &mut S,
    config: &ReadConfig,
) -> Result<BodySummary>
where
    R: BufRead + ?Sized,
    S: FieldSink + ?Sized,
{
    let mut parser = BodyParser::for_header(header, sink, config.limits())?;
    let mut buf = Vec::new();

    while !parser.is_done() {
        let Some(line) = next_line(reader, &mut buf, parser.line() + 1)? else {
            break;
        };
        let before = parser.state();
        parser.feed_line(line, sink)?;
        if parser.state() != before {
            trace!("line {}: {:?}", parser.line(), parser.state());
        }
    }

    let summary = parser.finish(sink)?;
    debug!(
        "body: {} lines, {} remark tokens, terminated={}",
        summary.lines, summary.remarks, summary.terminated
    );
    Ok(summary)
}

/// Check the stored verification sum of a COO body
fn check_verification(header: &Header, row: &[usize], col: &[usize], val: &[f32]) -> Result<()> {
    let Some(stored) = header.verification else {
        return Ok(());
    };
    let computed = verification_sum(row, col, val);
    if !verification_matches(stored, computed) {
        warn!("verification sum mismatch: header {stored}, data {computed}");
        return Err(HercmError::VerificationMismatch.into());
    }
    Ok(())
}

/// Reject a header whose declared counts cannot fit in `body_len` bytes
fn check_body_len(header: &Header, body_len: Option<u64>) -> Result<()> {
    let Some(body_len) = body_len else {
        return Ok(());
    };
    let needed = header.min_body_len();
    if needed > body_len {
        warn!("header declares {needed} bytes of values, body holds {body_len}");
        return Err(HercmError::TooLarge {
            field: Field::Val,
            capacity: header.nnz,
        }
        .into());
    }
    Ok(())
}

/// Anything that can supply the header and body text of a HeRCM file
pub trait BodySource {
    /// Reader positioned at the first body line
    type Body<'a>: BufRead
    where
        Self: 'a;

    /// Parsed header
    fn header(&self) -> &Header;

    /// Read settings
    fn config(&self) -> &ReadConfig;

    /// Open the body for reading
    fn body(&self) -> Result<Self::Body<'_>>;

    /// Size of the body in bytes, when known without reading it
    fn body_len(&self) -> Option<u64> {
        None
    }

    /// Fill caller CSR buffers sized from the header
    fn read_csr_into(&self, sink: &mut CsrBuffers<'_>) -> Result<BodySummary> {
        read_body(&mut self.body()?, self.header(), sink, self.config())
    }

    /// Fill caller COO buffers sized from the header
    ///
    /// The verification sum is checked when the config asks for it.
    fn read_coo_into(&self, sink: &mut CooBuffers<'_>) -> Result<BodySummary> {
        let summary = read_body(&mut self.body()?, self.header(), sink, self.config())?;
        if self.config().verify {
            check_verification(self.header(), sink.row, sink.col, sink.val)?;
        }
        Ok(summary)
    }

    /// Read a CSR variant file into a newly allocated matrix
    ///
    /// Declared sizes are checked against [`BodySource::body_len`] before
    /// anything is allocated.
    fn read_csr(&self) -> Result<CsrMatrix> {
        check_body_len(self.header(), self.body_len())?;
        let mut matrix = CsrMatrix::zeroed_for(self.header())?;
        self.read_csr_into(&mut matrix.buffers())?;
        Ok(matrix)
    }

    /// Read a COO variant file into a newly allocated matrix
    fn read_coo(&self) -> Result<CooMatrix> {
        check_body_len(self.header(), self.body_len())?;
        let mut matrix = CooMatrix::zeroed_for(self.header())?;
        self.read_coo_into(&mut matrix.buffers())?;
        Ok(matrix)
    }

    /// Read either variant as CSR, sorting and compressing COO triples
    fn read_as_csr(&self) -> Result<CsrMatrix> {
        match self.header().variant() {
            FormatVariant::Csr => self.read_csr(),
            FormatVariant::Coo => {
                let coo = self.read_coo()?;
                if !coo.is_row_major() {
                    debug!("sorting {} triples into row-major order", coo.val.len());
                }
                Ok(coo.into_csr()?)
            }
        }
    }
}

/// File handle for HeRCM files
///
/// The handle opened for the header is kept, so the body is always read
/// from the same file the header came from.
#[derive(Debug)]
pub struct HercmFile {
    pub header: Header,
    pub path: PathBuf,
    file: File,
    body_offset: u64,
    config: ReadConfig,
}

impl HercmFile {
    /// Open an existing file and read its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, ReadConfig::default())
    }

    /// Open an existing file with explicit read settings
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ReadConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("opening {}", path.display());

        let mut reader = BufReader::new(File::open(&path)?);
        let header = read_header(&mut reader)?;
        let body_offset = reader.stream_position()?;

        Ok(Self {
            header,
            path,
            file: reader.into_inner(),
            body_offset,
            config,
        })
    }
}

impl BodySource for HercmFile {
    type Body<'a> = BufReader<&'a File>;

    fn header(&self) -> &Header {
        &self.header
    }

    fn config(&self) -> &ReadConfig {
        &self.config
    }

    fn body(&self) -> Result<Self::Body<'_>> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(self.body_offset))?;
        Ok(BufReader::new(file))
    }

    fn body_len(&self) -> Option<u64> {
        let len = self.file.metadata().ok()?.len();
        Some(len.saturating_sub(self.body_offset))
    }
}

/// Read a file of either variant as a CSR matrix
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CsrMatrix> {
    HercmFile::open(path)?.read_as_csr()
}

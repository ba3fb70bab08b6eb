//! Field-tagged body parser
//!
//! The body of a HeRCM file is a sequence of marker lines (`VAL`, `ROWPTR`,
//! `COLIND`, ...) each followed by whitespace-separated scalars. The parser
//! is a small state machine fed one line at a time; it writes scalars into
//! caller buffers through a [`FieldSink`] and never writes past the end of a
//! buffer.

use crate::error::{HercmError, Result};
use crate::format::constants::MAX_UNMARKED_LINES;
use crate::format::{Field, FormatVariant, Header, Marker};
use crate::traits::{FieldSink, FieldSlots};
use crate::validation::parsing::{parse_index, parse_value, tokenize, ScalarError};

/// Limits applied while parsing a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimits {
    /// Consecutive non-blank lines allowed outside any field
    pub max_unmarked_lines: usize,
}

impl BodyLimits {
    /// Set the number of lines scanned while waiting for a marker
    pub const fn with_max_unmarked_lines(mut self, lines: usize) -> Self {
        self.max_unmarked_lines = lines;
        self
    }
}

impl Default for BodyLimits {
    fn default() -> Self {
        Self {
            max_unmarked_lines: MAX_UNMARKED_LINES,
        }
    }
}

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    /// Between fields
    NoField,
    /// Appending to a data field
    InField(Field),
    /// Skipping free-text remarks
    InRemarks,
    /// Terminator seen; remaining lines are ignored
    Done,
}

/// Outcome of a completed body parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySummary {
    /// 1-based number of the last line consumed (the header is line 1)
    pub lines: usize,
    /// Tokens skipped inside `REMARKS` fields
    pub remarks: usize,
    /// Whether an explicit terminator was seen
    pub terminated: bool,
}

/// Line-at-a-time body state machine
#[derive(Debug, Clone)]
pub struct BodyParser {
    variant: FormatVariant,
    limits: BodyLimits,
    state: BodyState,
    cursors: [usize; Field::COUNT],
    line: usize,
    unmarked: usize,
    remarks: usize,
}

impl BodyParser {
    /// Create a parser positioned just after the header line
    pub fn new(variant: FormatVariant, limits: BodyLimits) -> Self {
        Self {
            variant,
            limits,
            state: BodyState::NoField,
            cursors: [0; Field::COUNT],
            line: 1,
            unmarked: 0,
            remarks: 0,
        }
    }

    /// Create a parser for `header`, checking the sink was sized from it
    pub fn for_header<S: FieldSink + ?Sized>(
        header: &Header,
        sink: &mut S,
        limits: BodyLimits,
    ) -> Result<Self> {
        let variant = header.variant();
        if sink.variant() != variant {
            return Err(HercmError::WrongVariant);
        }

        for &field in variant.fields() {
            let expected = header.capacity(field);
            let found = sink.capacity(field).ok_or(HercmError::WrongVariant)?;
            if found != expected {
                return Err(HercmError::LengthMismatch { expected, found });
            }
        }

        Ok(Self::new(variant, limits))
    }

    /// Current state
    pub fn state(&self) -> BodyState {
        self.state
    }

    /// Whether the terminator has been seen
    pub fn is_done(&self) -> bool {
        self.state == BodyState::Done
    }

    /// 1-based number of the last line consumed
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of values written so far to `field`
    pub fn written(&self, field: Field) -> usize {
        self.cursors[field.index()]
    }

    /// Consume one line of the body
    pub fn feed_line<S: FieldSink + ?Sized>(&mut self, line: &str, sink: &mut S) -> Result<()> {
        self.line += 1;
        if self.state == BodyState::Done {
            return Ok(());
        }

        let mut tokens = tokenize(line).peekable();
        let Some(&first) = tokens.peek() else {
            return Ok(());
        };

        if let Some(marker) = Marker::decode(first, self.variant) {
            self.unmarked = 0;
            self.state = match marker {
                Marker::Field(field) => BodyState::InField(field),
                Marker::Remarks => BodyState::InRemarks,
                Marker::EndField => BodyState::NoField,
                Marker::End => BodyState::Done,
            };
            return Ok(());
        }

        match self.state {
            BodyState::InField(field) => self.store(field, tokens, sink),
            BodyState::InRemarks => {
                self.remarks += tokens.count();
                Ok(())
            }
            BodyState::NoField => {
                self.unmarked += 1;
                if self.unmarked > self.limits.max_unmarked_lines {
                    return Err(HercmError::MarkerNotFound { line: self.line });
                }
                Ok(())
            }
            BodyState::Done => Ok(()),
        }
    }

    /// Check that every field of the variant was filled to capacity
    pub fn finish<S: FieldSink + ?Sized>(&self, sink: &mut S) -> Result<BodySummary> {
        for &field in self.variant.fields() {
            let expected = sink.capacity(field).ok_or(HercmError::WrongVariant)?;
            let found = self.cursors[field.index()];
            if found != expected {
                return Err(HercmError::IncompleteField {
                    field,
                    expected,
                    found,
                });
            }
        }

        Ok(BodySummary {
            lines: self.line,
            remarks: self.remarks,
            terminated: self.is_done(),
        })
    }

    fn store<'t, S: FieldSink + ?Sized>(
        &mut self,
        field: Field,
        tokens: impl Iterator<Item = &'t str>,
        sink: &mut S,
    ) -> Result<()> {
        let line = self.line;
        let cursor = &mut self.cursors[field.index()];
        let slots = sink
            .slots(field)
            .ok_or(HercmError::MalformedField { field, line })?;

        match slots {
            FieldSlots::Values(buf) => fill(buf, cursor, tokens, parse_value, field, line),
            FieldSlots::Indices(buf) => fill(buf, cursor, tokens, parse_index, field, line),
        }
    }
}

/// Append parsed tokens at `cursor`, stopping at the end of `buf`
fn fill<'t, T>(
    buf: &mut [T],
    cursor: &mut usize,
    tokens: impl Iterator<Item = &'t str>,
    parse: fn(&str) -> core::result::Result<T, ScalarError>,
    field: Field,
    line: usize,
) -> Result<()> {
    let capacity = buf.len();
    for token in tokens {
        let slot = buf
            .get_mut(*cursor)
            .ok_or(HercmError::BufferOverflow { field, capacity })?;
        *slot = parse(token).map_err(|_| HercmError::MalformedField { field, line })?;
        *cursor += 1;
    }
    Ok(())
}

/// Parse a complete body given as lines following `header`
pub fn parse_body<'a, S, I>(
    header: &Header,
    lines: I,
    sink: &mut S,
    limits: BodyLimits,
) -> Result<BodySummary>
where
    S: FieldSink + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = BodyParser::for_header(header, sink, limits)?;
    for line in lines {
        if parser.is_done() {
            break;
        }
        parser.feed_line(line, sink)?;
    }
    parser.finish(sink)
}

/// Parse a whole document: header line followed by the body
pub fn parse_document<S: FieldSink + ?Sized>(
    text: &str,
    sink: &mut S,
    limits: BodyLimits,
) -> Result<(Header, BodySummary)> {
    let mut lines = text.lines();
    let header = Header::parse(lines.next().unwrap_or(""))?;
    let summary = parse_body(&header, lines, sink, limits)?;
    Ok((header, summary))
}

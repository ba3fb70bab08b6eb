//! Memory-mapped HeRCM reader
//!
//! The file is mapped read-only and parsed straight from the mapped bytes.

use std::fs::File;
use std::path::Path;

use hercm_core::Header;
use log::debug;
use memmap2::{Mmap, MmapOptions};

use crate::config::ReadConfig;
use crate::error::Result;
use crate::reader::{read_header, BodySource};

/// A HeRCM file mapped into memory
#[derive(Debug)]
pub struct MappedHercm {
    mmap: Mmap,
    header: Header,
    body_offset: usize,
    config: ReadConfig,
}

impl MappedHercm {
    /// Map `path` and parse its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, ReadConfig::default())
    }

    /// Map `path` with explicit read settings
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ReadConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;

        // SAFETY: read-only mapping; the map is owned by this struct and
        // every slice handed out borrows from it
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!("mapped {} ({} bytes)", path.as_ref().display(), mmap.len());

        let mut bytes: &[u8] = &mmap;
        let header = read_header(&mut bytes)?;
        let body_offset = mmap.len() - bytes.len();

        Ok(Self {
            mmap,
            header,
            body_offset,
            config,
        })
    }

    /// Raw bytes of the body
    pub fn body_bytes(&self) -> &[u8] {
        &self.mmap[self.body_offset..]
    }
}

impl BodySource for MappedHercm {
    type Body<'a> = &'a [u8];

    fn header(&self) -> &Header {
        &self.header
    }

    fn config(&self) -> &ReadConfig {
        &self.config
    }

    fn body(&self) -> Result<&[u8]> {
        Ok(self.body_bytes())
    }

    fn body_len(&self) -> Option<u64> {
        Some(self.body_bytes().len() as u64)
    }
}

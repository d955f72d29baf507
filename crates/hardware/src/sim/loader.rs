//! Program Loader.
//!
//! This module turns program files into a [`ProgramImage`]. It performs:
//! 1. **Hex images:** Whitespace-separated 32-bit hex words (optional `0x`,
//!    `#` comments), laid out consecutively from a caller-chosen base that is
//!    also the entry point (the configured start PC).
//! 2. **ELF images:** 32-bit MIPS ELF files; each loadable segment is placed
//!    at its virtual address and the entry point comes from the header.
//! 3. **Detection:** [`load_program`] picks the format from the file's magic bytes.

use std::fs;
use std::path::Path;

use object::{Architecture, Object, ObjectSegment};
use tracing::info;

use crate::common::error::LoadError;

/// ELF magic number.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// A contiguous run of bytes destined for one address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// First address the bytes occupy.
    pub addr: u32,
    /// Contents, in memory order.
    pub bytes: Vec<u8>,
}

/// A program ready to be written into simulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    /// Address execution starts at.
    pub entry: u32,
    /// Data to place in memory.
    pub segments: Vec<Segment>,
}

impl ProgramImage {
    /// Builds an image of consecutive words at `base`, entering at `base`.
    pub fn from_words(base: u32, words: &[u32]) -> Self {
        let bytes = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Self {
            entry: base,
            segments: vec![Segment { addr: base, bytes }],
        }
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.bytes.len()).sum()
    }

    /// Returns `true` if the image carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a hex text image into instruction words.
///
/// Each whitespace-separated token is one word. A `#` starts a comment that
/// runs to the end of the line.
///
/// # Errors
///
/// Returns [`LoadError::InvalidWord`] for a token that is not a hex `u32`.
pub fn parse_hex_words(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for token in code.split_whitespace() {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let word = u32::from_str_radix(digits, 16).map_err(|_| LoadError::InvalidWord {
                line: line_no + 1,
                token: token.to_string(),
            })?;
            words.push(word);
        }
    }
    Ok(words)
}

/// Parses a hex text image placed at, and entered at, `base`.
///
/// # Errors
///
/// As [`parse_hex_words`], plus [`LoadError::Empty`] if there are no words.
pub fn parse_hex_image(text: &str, base: u32) -> Result<ProgramImage, LoadError> {
    let words = parse_hex_words(text)?;
    if words.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(ProgramImage::from_words(base, &words))
}

/// Parses a 32-bit MIPS ELF file.
///
/// # Errors
///
/// - [`LoadError::Elf`] if the container is malformed.
/// - [`LoadError::NotMips`] for any other architecture or a 64-bit file.
/// - [`LoadError::SegmentOutOfRange`] if a segment lies above 4 GiB.
/// - [`LoadError::Empty`] if no segment carries data.
pub fn parse_elf_image(data: &[u8]) -> Result<ProgramImage, LoadError> {
    let file = object::File::parse(data)?;
    if file.architecture() != Architecture::Mips || file.is_64() || !file.is_little_endian() {
        let endian = if file.is_little_endian() { "little" } else { "big" };
        let width = if file.is_64() { 64 } else { 32 };
        return Err(LoadError::NotMips {
            machine: format!("{width}-bit {endian}-endian {:?}", file.architecture()),
        });
    }

    let mut segments = Vec::new();
    for segment in file.segments() {
        let bytes = segment.data()?;
        if bytes.is_empty() {
            continue;
        }
        let addr = u32::try_from(segment.address()).map_err(|_| LoadError::SegmentOutOfRange {
            addr: segment.address(),
        })?;
        segments.push(Segment {
            addr,
            bytes: bytes.to_vec(),
        });
    }
    if segments.is_empty() {
        return Err(LoadError::Empty);
    }

    let entry = u32::try_from(file.entry())
        .map_err(|_| LoadError::SegmentOutOfRange { addr: file.entry() })?;
    Ok(ProgramImage { entry, segments })
}

/// Reads a program file, choosing ELF or hex text by its first bytes.
///
/// Hex images go to `hex_base`; ELF images carry their own addresses.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the errors of
/// [`parse_elf_image`] or [`parse_hex_image`].
pub fn load_program(path: impl AsRef<Path>, hex_base: u32) -> Result<ProgramImage, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = if data.starts_with(ELF_MAGIC) {
        parse_elf_image(&data)?
    } else {
        parse_hex_image(&String::from_utf8_lossy(&data), hex_base)?
    };
    info!(
        path = %path.display(),
        entry = %format_args!("{:#010x}", image.entry),
        bytes = image.len(),
        "program loaded"
    );
    Ok(image)
}

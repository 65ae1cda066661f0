// SPDX-FileCopyrightText: The pixelfont authors
// SPDX-License-Identifier: MPL-2.0

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

//! A compact binary container format for bitmap pixel fonts.
//!
//! A [`Font`] fixes one glyph dimension for all of its glyphs (the
//! [`Alignment`] axis) and stores the other dimension per glyph, which
//! keeps glyph records self-describing while the header stays five bytes
//! plus a checksum. Refer to [`docs`] for the wire format.

pub mod docs;

pub mod bitmap;
mod checksum;
pub mod glyph;
pub mod header;

use std::{iter, str::Utf8Error};

#[cfg(feature = "glyph-cache")]
use std::collections::HashMap;

use itertools::Itertools as _;
use thiserror::Error;

pub use self::{
    bitmap::{Bitmap, BitmapError},
    glyph::Glyph,
    header::{Alignment, FormatVersion, MAGIC},
};

/// Offset of the checksum within the fixed header.
const CHECKSUM_OFFSET: usize = 5;

/// Total size of the fixed header, including the checksum.
const HEADER_LEN: usize = CHECKSUM_OFFSET + checksum::LEN;

/// A decoding error
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input does not start with the [`MAGIC`] signature.
    #[error("unrecognized file signature")]
    Signature,

    /// The header declares a format version this crate does not know.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// The stored checksum does not match the file contents.
    #[error("checksum mismatch")]
    Checksum,

    /// The input ended in the middle of the header or a glyph record.
    #[error("unexpected end of input")]
    Truncated,

    /// Structurally malformed content, e.g. an invalid codepoint encoding.
    #[error(transparent)]
    Malformed(#[from] anyhow::Error),
}

impl From<Utf8Error> for DecodeError {
    fn from(from: Utf8Error) -> Self {
        anyhow::Error::from(from).into()
    }
}

/// A rejected glyph insertion
#[derive(Debug, Error)]
pub enum GlyphError {
    /// The glyph's extent along the alignment axis differs from the font's.
    #[error(
        "glyph extent {actual} along the {alignment} axis does not match the font's {expected}"
    )]
    MismatchedExtent {
        /// The font's alignment axis.
        alignment: Alignment,

        /// The font's shared extent.
        expected: u8,

        /// The glyph's extent along that axis.
        actual: u8,
    },

    /// The font already contains a glyph for this codepoint.
    #[error("codepoint {0:?} is already present")]
    DuplicateCodepoint(char),

    /// A flat pixel buffer does not divide evenly into the shared extent.
    #[error("{count} pixel(s) do not divide evenly into a shared extent of {size}")]
    PixelCount {
        /// The number of pixels provided.
        count: usize,

        /// The font's shared extent.
        size: u8,
    },

    /// The inferred free extent does not fit into a single byte.
    #[error("inferred glyph extent exceeds 255")]
    ExtentOverflow,

    /// Dimension inference is impossible with a shared extent of zero.
    #[error("cannot infer dimensions for a font with a shared extent of zero")]
    ZeroSize,

    /// The pixel buffer does not match the glyph's declared dimensions.
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
}

/// A pixel font: header properties plus an ordered glyph table.
///
/// Glyphs are encoded in insertion order. The alignment axis and the
/// shared extent are fixed at construction since every stored glyph
/// depends on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Font {
    /// The container format version.
    pub version: FormatVersion,

    /// Pack glyph bitmaps contiguously instead of row-aligned.
    pub compact: bool,

    alignment: Alignment,
    size: u8,
    glyphs: Vec<Glyph>,

    #[cfg(feature = "glyph-cache")]
    cache: HashMap<char, usize>,
}

impl Font {
    /// Create an empty font with the given alignment axis and shared extent.
    #[must_use]
    pub fn new(alignment: Alignment, size: u8) -> Self {
        Self {
            alignment,
            size,
            ..Self::default()
        }
    }

    /// Return the alignment axis.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Return the extent shared by all glyphs along the alignment axis.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Return the glyph table in insertion order.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Look up the glyph for a codepoint.
    ///
    /// Resolves to the last matching glyph if duplicates were pushed.
    #[must_use]
    pub fn glyph(&self, codepoint: char) -> Option<&Glyph> {
        #[cfg(feature = "glyph-cache")]
        {
            self.cache
                .get(&codepoint)
                .and_then(|&index| self.glyphs.get(index))
        }
        #[cfg(not(feature = "glyph-cache"))]
        {
            self.glyphs
                .iter()
                .rev()
                .find(|glyph| glyph.codepoint == codepoint)
        }
    }

    /// Add a glyph after validating it against the font.
    ///
    /// # Errors
    ///
    /// Returns a [`GlyphError`] if the glyph's extent along the alignment
    /// axis differs from the font's shared extent or if the codepoint is
    /// already present.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Result<(), GlyphError> {
        let actual = match self.alignment {
            Alignment::Height => glyph.bitmap.height(),
            Alignment::Width => glyph.bitmap.width(),
        };
        if actual != self.size {
            return Err(GlyphError::MismatchedExtent {
                alignment: self.alignment,
                expected: self.size,
                actual,
            });
        }
        if self.glyph(glyph.codepoint).is_some() {
            return Err(GlyphError::DuplicateCodepoint(glyph.codepoint));
        }
        self.push_glyph(glyph);
        Ok(())
    }

    /// Add a glyph from a flat pixel buffer, inferring its dimensions.
    ///
    /// The extent along the free axis is inferred from the buffer length
    /// and the font's shared extent.
    ///
    /// # Errors
    ///
    /// Returns a [`GlyphError`] if the buffer length is not a multiple of
    /// the shared extent, the inferred extent does not fit into a byte,
    /// the shared extent is zero, or the codepoint is already present.
    pub fn add_pixels(&mut self, codepoint: char, pixels: Vec<bool>) -> Result<(), GlyphError> {
        if self.size == 0 {
            return Err(GlyphError::ZeroSize);
        }
        let count = pixels.len();
        if count % usize::from(self.size) != 0 {
            return Err(GlyphError::PixelCount {
                count,
                size: self.size,
            });
        }
        let extent =
            u8::try_from(count / usize::from(self.size)).map_err(|_| GlyphError::ExtentOverflow)?;
        let (width, height) = match self.alignment {
            Alignment::Height => (extent, self.size),
            Alignment::Width => (self.size, extent),
        };
        let bitmap = Bitmap::new(width, height, pixels)?;
        self.add_glyph(Glyph::new(codepoint, bitmap))
    }

    /// Append a glyph without validation.
    ///
    /// The caller is responsible for matching extents and codepoint
    /// uniqueness; encoding trusts both. [`Self::glyph`] resolves
    /// duplicates to the last pushed glyph.
    pub fn push_glyph(&mut self, glyph: Glyph) {
        #[cfg(feature = "glyph-cache")]
        self.cache.insert(glyph.codepoint, self.glyphs.len());
        self.glyphs.push(glyph);
    }

    /// Encode the font into a freshly allocated buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.encode_into(&mut buffer);
        buffer
    }

    /// Append the encoded font to the buffer.
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        let start = buffer.len();
        buffer.extend_from_slice(&MAGIC);
        buffer.push(header::pack_flags(
            self.version,
            self.alignment,
            self.compact,
        ));
        buffer.push(self.size);
        // Checksum placeholder, patched once the glyph table is written.
        buffer.extend_from_slice(&[0; checksum::LEN]);
        for glyph in &self.glyphs {
            glyph.encode_into(self.alignment, self.compact, buffer);
        }
        let checksum = checksum::compute([
            &buffer[start..start + CHECKSUM_OFFSET],
            &buffer[start + HEADER_LEN..],
        ]);
        buffer[start + CHECKSUM_OFFSET..start + HEADER_LEN].copy_from_slice(&checksum);
    }

    /// Decode a font, verifying the signature and the checksum.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is not a well-formed font
    /// file or its checksum does not match.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::parse(bytes, true)
    }

    /// Decode a font without comparing the stored checksum.
    ///
    /// All structural checks still apply; only the integrity comparison
    /// is skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is not a well-formed font
    /// file.
    pub fn decode_unverified(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::parse(bytes, false)
    }

    fn parse(bytes: &[u8], verify_checksum: bool) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::Truncated);
        }
        if bytes[..MAGIC.len()] != MAGIC {
            return Err(DecodeError::Signature);
        }
        let flag_byte = bytes[MAGIC.len()];
        let Some((version, alignment, compact)) = header::unpack_flags(flag_byte) else {
            return Err(DecodeError::UnsupportedVersion(header::version_nibble(
                flag_byte,
            )));
        };
        let size = bytes[MAGIC.len() + 1];
        if verify_checksum {
            let computed = checksum::compute([&bytes[..CHECKSUM_OFFSET], &bytes[HEADER_LEN..]]);
            if bytes[CHECKSUM_OFFSET..HEADER_LEN] != computed {
                return Err(DecodeError::Checksum);
            }
        }
        let mut input = &bytes[HEADER_LEN..];
        let glyphs: Vec<Glyph> = iter::from_fn(|| {
            (!input.is_empty()).then(|| Glyph::decode(&mut input, alignment, size, compact))
        })
        .try_collect()?;
        let mut font = Self::new(alignment, size);
        font.version = version;
        font.compact = compact;
        for glyph in glyphs {
            font.push_glyph(glyph);
        }
        Ok(font)
    }
}

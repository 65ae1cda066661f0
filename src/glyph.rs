// SPDX-FileCopyrightText: The pixelfont authors
// SPDX-License-Identifier: MPL-2.0

//! Glyphs

use std::str;

use crate::{DecodeError, bitmap::Bitmap, header::Alignment};

/// A single glyph: a codepoint and its bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// The codepoint the glyph renders.
    pub codepoint: char,

    /// The glyph's bitmap.
    pub bitmap: Bitmap,
}

impl Glyph {
    /// Create a new glyph.
    #[must_use]
    pub const fn new(codepoint: char, bitmap: Bitmap) -> Self {
        Self { codepoint, bitmap }
    }

    /// Return the extent along the axis not fixed by the font's alignment.
    ///
    /// This is the value stored per glyph on the wire: the width for
    /// height-aligned fonts, the height for width-aligned fonts.
    #[must_use]
    pub const fn extent(&self, alignment: Alignment) -> u8 {
        match alignment {
            Alignment::Height => self.bitmap.width(),
            Alignment::Width => self.bitmap.height(),
        }
    }

    /// Append the encoded glyph record to the buffer.
    pub(crate) fn encode_into(&self, alignment: Alignment, compact: bool, buffer: &mut Vec<u8>) {
        let mut utf8 = [0_u8; 4];
        buffer.extend_from_slice(self.codepoint.encode_utf8(&mut utf8).as_bytes());
        buffer.push(self.extent(alignment));
        buffer.extend_from_slice(&self.bitmap.to_packed(compact));
    }

    /// Decode a single glyph record, advancing `input` past it.
    pub(crate) fn decode(
        input: &mut &[u8],
        alignment: Alignment,
        shared_extent: u8,
        compact: bool,
    ) -> Result<Self, DecodeError> {
        let codepoint = decode_codepoint(input)?;
        let extent = take(input, 1)?[0];
        let (width, height) = match alignment {
            Alignment::Height => (extent, shared_extent),
            Alignment::Width => (shared_extent, extent),
        };
        let packed = take(input, Bitmap::packed_len(width, height, compact))?;
        let bitmap = Bitmap::from_packed(width, height, compact, packed);
        Ok(Self { codepoint, bitmap })
    }
}

fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8], DecodeError> {
    let (head, rest) = input.split_at_checked(len).ok_or(DecodeError::Truncated)?;
    *input = rest;
    Ok(head)
}

fn decode_codepoint(input: &mut &[u8]) -> Result<char, DecodeError> {
    let first = *input.first().ok_or(DecodeError::Truncated)?;
    let len = match first.leading_ones() {
        0 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        _ => {
            return Err(anyhow::anyhow!("invalid UTF-8 leading byte {first:#04x}").into());
        }
    };
    let decoded = str::from_utf8(take(input, len)?)?;
    decoded
        .chars()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty codepoint sequence").into())
}

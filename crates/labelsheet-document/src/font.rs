// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label font — the TrueType/OpenType face used for label text and barcode
// captions. Noto Sans Regular (SIL OFL 1.1, see assets/fonts) ships with the
// crate; a different face can be supplied for scripts it does not cover.

use std::borrow::Cow;

/// Noto Sans Regular, embedded at build time.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/NotoSans-Regular.ttf");

/// Font file contents used for every piece of text in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFont {
    bytes: Cow<'static, [u8]>,
}

impl LabelFont {
    /// The bundled Noto Sans face.
    pub fn bundled() -> Self {
        Self {
            bytes: Cow::Borrowed(BUNDLED_FONT),
        }
    }

    /// A font loaded at runtime, e.g. Noto Sans JP for Japanese product names.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Cow::Owned(bytes),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Characters of `text` the face has no glyph for, in order of first use.
    ///
    /// An unreadable font reports every character as missing.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let face = ttf_parser::Face::parse(&self.bytes, 0).ok();
        let mut missing = Vec::new();
        for ch in text.chars() {
            let covered = face
                .as_ref()
                .is_some_and(|face| ch.is_whitespace() || face.glyph_index(ch).is_some());
            if !covered && !missing.contains(&ch) {
                missing.push(ch);
            }
        }
        missing
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self::bundled()
    }
}

//! The [kern](https://learn.microsoft.com/en-us/typography/opentype/spec/kern) table

use font_types::{FWord, GlyphId16};

/// Legacy kerning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kern {
    pub subtables: Vec<KernSubtable>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernSubtable {
    Format0(Kern0),
    /// A subtable in any other format, kept as its encoded body.
    Other {
        format: u8,
        coverage: u8,
        data: Vec<u8>,
    },
}

/// Ordered pairs of glyphs with a kerning value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kern0 {
    /// The low byte of the subtable coverage field.
    pub coverage: u8,
    /// Sorted by (left, right).
    pub kerning_pairs: Vec<KernPair>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernPair {
    pub left: GlyphId16,
    pub right: GlyphId16,
    pub value: FWord,
}

impl KernSubtable {
    pub fn format(&self) -> u8 {
        match self {
            KernSubtable::Format0(_) => 0,
            KernSubtable::Other { format, .. } => *format,
        }
    }
}

impl Kern0 {
    /// The kerning value for a pair of glyphs.
    pub fn kerning(&self, left: GlyphId16, right: GlyphId16) -> Option<FWord> {
        self.kerning_pairs
            .binary_search_by_key(&(left, right), |pair| (pair.left, pair.right))
            .ok()
            .map(|ix| self.kerning_pairs[ix].value)
    }
}

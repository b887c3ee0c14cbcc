//! The [VORG](https://docs.microsoft.com/en-us/typography/opentype/spec/vorg) table

use font_types::GlyphId16;

/// Vertical origins for CFF outlines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vorg {
    /// The y coordinate of the vertical origin for glyphs without an override.
    pub default_vert_origin_y: i16,
    /// Overrides, sorted by glyph id.
    pub vert_origin_y_metrics: Vec<VertOriginYMetrics>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertOriginYMetrics {
    pub glyph_index: GlyphId16,
    pub vert_origin_y: i16,
}

impl Vorg {
    /// The vertical origin for the given glyph.
    pub fn vertical_origin_y(&self, gid: GlyphId16) -> i16 {
        self.vert_origin_y_metrics
            .binary_search_by_key(&gid, |rec| rec.glyph_index)
            .map(|ix| self.vert_origin_y_metrics[ix].vert_origin_y)
            .unwrap_or(self.default_vert_origin_y)
    }
}

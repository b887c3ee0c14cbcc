//! The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use font_types::GlyphId16;

/// An advance paired with a side bearing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongMetric {
    pub advance: u16,
    pub side_bearing: i16,
}

impl LongMetric {
    pub fn new(advance: u16, side_bearing: i16) -> Self {
        LongMetric {
            advance,
            side_bearing,
        }
    }
}

/// Horizontal metrics.
///
/// Glyphs past the end of `h_metrics` share the last advance and take their
/// bearing from `left_side_bearings`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hmtx {
    pub h_metrics: Vec<LongMetric>,
    pub left_side_bearings: Vec<i16>,
}

impl Hmtx {
    pub fn new(h_metrics: Vec<LongMetric>, left_side_bearings: Vec<i16>) -> Self {
        Hmtx {
            h_metrics,
            left_side_bearings,
        }
    }

    /// The advance width for the given glyph.
    pub fn advance(&self, gid: GlyphId16) -> Option<u16> {
        advance(&self.h_metrics, gid)
    }

    /// The left side bearing for the given glyph.
    pub fn side_bearing(&self, gid: GlyphId16) -> Option<i16> {
        side_bearing(&self.h_metrics, &self.left_side_bearings, gid)
    }
}

pub(crate) fn advance(metrics: &[LongMetric], gid: GlyphId16) -> Option<u16> {
    let ix = gid.to_u16() as usize;
    metrics
        .get(ix)
        .or_else(|| metrics.last())
        .map(|metric| metric.advance)
}

pub(crate) fn side_bearing(
    metrics: &[LongMetric],
    bearings: &[i16],
    gid: GlyphId16,
) -> Option<i16> {
    let ix = gid.to_u16() as usize;
    match metrics.get(ix) {
        Some(metric) => Some(metric.side_bearing),
        None => bearings.get(ix - metrics.len()).copied(),
    }
}

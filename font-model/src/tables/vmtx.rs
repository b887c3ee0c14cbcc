//! The [vmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/vmtx) table

use font_types::GlyphId16;

pub use super::hmtx::LongMetric;

/// Vertical metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vmtx {
    pub v_metrics: Vec<LongMetric>,
    pub top_side_bearings: Vec<i16>,
}

impl Vmtx {
    pub fn new(v_metrics: Vec<LongMetric>, top_side_bearings: Vec<i16>) -> Self {
        Vmtx {
            v_metrics,
            top_side_bearings,
        }
    }

    pub fn advance(&self, gid: GlyphId16) -> Option<u16> {
        super::hmtx::advance(&self.v_metrics, gid)
    }

    pub fn side_bearing(&self, gid: GlyphId16) -> Option<i16> {
        super::hmtx::side_bearing(&self.v_metrics, &self.top_side_bearings, gid)
    }
}

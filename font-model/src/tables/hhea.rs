//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use font_types::{FWord, UfWord};

/// The horizontal header.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hhea {
    /// Typographic ascent.
    pub ascender: FWord,
    /// Typographic descent.
    pub descender: FWord,
    /// Typographic line gap.
    pub line_gap: FWord,
    /// Maximum advance width value in 'hmtx' table.
    pub advance_width_max: UfWord,
    /// Minimum left sidebearing value in 'hmtx' table for glyphs with contours.
    pub min_left_side_bearing: FWord,
    /// Minimum right sidebearing value; calculated as min(aw - (lsb + xMax - xMin)).
    pub min_right_side_bearing: FWord,
    /// Max(lsb + (xMax - xMin)).
    pub x_max_extent: FWord,
    /// Used to calculate the slope of the cursor (rise/run); 1 for vertical.
    pub caret_slope_rise: i16,
    /// 0 for vertical.
    pub caret_slope_run: i16,
    /// The amount by which a slanted highlight on a glyph needs to be shifted.
    pub caret_offset: i16,
    /// Number of hMetric entries in 'hmtx' table
    pub number_of_h_metrics: u16,
}

impl Default for Hhea {
    fn default() -> Self {
        Hhea {
            ascender: FWord::new(0),
            descender: FWord::new(0),
            line_gap: FWord::new(0),
            advance_width_max: UfWord::new(0),
            min_left_side_bearing: FWord::new(0),
            min_right_side_bearing: FWord::new(0),
            x_max_extent: FWord::new(0),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: 0,
        }
    }
}

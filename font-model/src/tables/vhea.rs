//! The [vhea](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea) table

use font_types::{FWord, UfWord};

/// The vertical header.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vhea {
    /// Distance from the centerline to the previous line's descent.
    pub ascender: FWord,
    /// Distance from the centerline to the next line's ascent.
    pub descender: FWord,
    pub line_gap: FWord,
    /// The maximum advance height measurement in the 'vmtx' table.
    pub advance_height_max: UfWord,
    pub min_top_side_bearing: FWord,
    pub min_bottom_side_bearing: FWord,
    /// Max(tsb + (yMax - yMin)).
    pub y_max_extent: FWord,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// Number of advance heights in the 'vmtx' table.
    pub number_of_long_ver_metrics: u16,
}

impl Default for Vhea {
    fn default() -> Self {
        Vhea {
            ascender: FWord::new(0),
            descender: FWord::new(0),
            line_gap: FWord::new(0),
            advance_height_max: UfWord::new(0),
            min_top_side_bearing: FWord::new(0),
            min_bottom_side_bearing: FWord::new(0),
            y_max_extent: FWord::new(0),
            caret_slope_rise: 0,
            caret_slope_run: 1,
            caret_offset: 0,
            number_of_long_ver_metrics: 0,
        }
    }
}

//! The [post](https://docs.microsoft.com/en-us/typography/opentype/spec/post) table

use font_types::{FWord, Fixed};

/// PostScript information.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    /// 0x00010000, 0x00020000, 0x00025000 or 0x00030000.
    pub version: u32,
    /// Italic angle in counter-clockwise degrees from the vertical.
    pub italic_angle: Fixed,
    /// Suggested y-coordinate of the top of the underline.
    pub underline_position: FWord,
    /// Suggested values for the underline thickness.
    pub underline_thickness: FWord,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    /// Glyph names, for version 2.0 tables.
    pub glyph_names: Vec<String>,
}

impl Default for Post {
    fn default() -> Self {
        Post {
            version: 0x0003_0000,
            italic_angle: Fixed::from_f64(0.0),
            underline_position: FWord::new(0),
            underline_thickness: FWord::new(0),
            is_fixed_pitch: 0,
            min_mem_type42: 0,
            max_mem_type42: 0,
            min_mem_type1: 0,
            max_mem_type1: 0,
            glyph_names: Vec::new(),
        }
    }
}

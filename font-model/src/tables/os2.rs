//! The [OS/2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use font_types::Tag;

/// OS/2 and Windows specific metrics.
///
/// Fields added after version 0 are optional; the version written by a codec
/// is implied by which of them are present.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Os2 {
    /// Average weighted advance width of lower case letters and space.
    pub x_avg_char_width: i16,
    /// Visual weight (degree of blackness or thickness) of stroke in glyphs.
    pub us_weight_class: u16,
    /// Relative change from the normal aspect ratio (width to height ratio).
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    /// Thickness of the strikeout stroke.
    pub y_strikeout_size: i16,
    /// The position of the top of the strikeout stroke relative to the baseline.
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    pub panose_10: [u8; 10],
    pub ul_unicode_range_1: u32,
    pub ul_unicode_range_2: u32,
    pub ul_unicode_range_3: u32,
    pub ul_unicode_range_4: u32,
    pub ach_vend_id: Tag,
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    pub ul_code_page_range_1: Option<u32>,
    pub ul_code_page_range_2: Option<u32>,
    /// Distance between the baseline and the approximate height of non-ascending lowercase letters.
    pub sx_height: Option<i16>,
    /// Distance between the baseline and the approximate height of uppercase letters.
    pub s_cap_height: Option<i16>,
    pub us_default_char: Option<u16>,
    pub us_break_char: Option<u16>,
    pub us_max_context: Option<u16>,
    /// Lower end of the optical size range, in TWIPs.
    pub us_lower_optical_point_size: Option<u16>,
    /// Upper end of the optical size range, in TWIPs.
    pub us_upper_optical_point_size: Option<u16>,
}

impl Os2 {
    /// The table version implied by the optional fields that are present.
    pub fn compute_version(&self) -> u16 {
        if self.us_lower_optical_point_size.is_some() || self.us_upper_optical_point_size.is_some()
        {
            5
        } else if self.sx_height.or(self.s_cap_height).is_some()
            || self
                .us_default_char
                .or(self.us_break_char)
                .or(self.us_max_context)
                .is_some()
        {
            2
        } else {
            u16::from(
                self.ul_code_page_range_1
                    .or(self.ul_code_page_range_2)
                    .is_some(),
            )
        }
    }
}

impl Default for Os2 {
    fn default() -> Self {
        Os2 {
            x_avg_char_width: 0,
            us_weight_class: 400,
            us_width_class: 5,
            fs_type: 0,
            y_subscript_x_size: 0,
            y_subscript_y_size: 0,
            y_subscript_x_offset: 0,
            y_subscript_y_offset: 0,
            y_superscript_x_size: 0,
            y_superscript_y_size: 0,
            y_superscript_x_offset: 0,
            y_superscript_y_offset: 0,
            y_strikeout_size: 0,
            y_strikeout_position: 0,
            s_family_class: 0,
            panose_10: [0; 10],
            ul_unicode_range_1: 0,
            ul_unicode_range_2: 0,
            ul_unicode_range_3: 0,
            ul_unicode_range_4: 0,
            ach_vend_id: Tag::new(b"NONE"),
            fs_selection: 0,
            us_first_char_index: 0,
            us_last_char_index: 0,
            s_typo_ascender: 0,
            s_typo_descender: 0,
            s_typo_line_gap: 0,
            us_win_ascent: 0,
            us_win_descent: 0,
            ul_code_page_range_1: None,
            ul_code_page_range_2: None,
            sx_height: None,
            s_cap_height: None,
            us_default_char: None,
            us_break_char: None,
            us_max_context: None,
            us_lower_optical_point_size: None,
            us_upper_optical_point_size: None,
        }
    }
}

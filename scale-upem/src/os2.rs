//! Scale the OS/2 metrics
//!
//! Weight and width classes, flags, PANOSE, unicode and code page ranges and
//! the optical size range (in TWIPs) carry no design units.

use font_model::{tables::os2::Os2, TopLevelTable};

use crate::{ScaleError, ScaleUpem, UpemRatio};

impl ScaleUpem for Os2 {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for value in [
            &mut self.x_avg_char_width,
            &mut self.y_subscript_x_size,
            &mut self.y_subscript_y_size,
            &mut self.y_subscript_x_offset,
            &mut self.y_subscript_y_offset,
            &mut self.y_superscript_x_size,
            &mut self.y_superscript_y_size,
            &mut self.y_superscript_x_offset,
            &mut self.y_superscript_y_offset,
            &mut self.y_strikeout_size,
            &mut self.y_strikeout_position,
            &mut self.s_typo_ascender,
            &mut self.s_typo_descender,
            &mut self.s_typo_line_gap,
        ] {
            ratio.apply(value, Os2::TAG)?;
        }
        ratio.apply(&mut self.us_win_ascent, Os2::TAG)?;
        ratio.apply(&mut self.us_win_descent, Os2::TAG)?;
        ratio.apply(&mut self.sx_height, Os2::TAG)?;
        ratio.apply(&mut self.s_cap_height, Os2::TAG)
    }
}

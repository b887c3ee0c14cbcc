//! Scale the horizontal and vertical headers
//!
//! The caret slope is a ratio and is left alone.

use font_model::{
    tables::{hhea::Hhea, vhea::Vhea},
    TopLevelTable,
};

use crate::{ScaleError, ScaleUpem, UpemRatio};

impl ScaleUpem for Hhea {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for value in [
            &mut self.ascender,
            &mut self.descender,
            &mut self.line_gap,
            &mut self.min_left_side_bearing,
            &mut self.min_right_side_bearing,
            &mut self.x_max_extent,
        ] {
            ratio.apply(value, Hhea::TAG)?;
        }
        ratio.apply(&mut self.advance_width_max, Hhea::TAG)?;
        ratio.apply(&mut self.caret_offset, Hhea::TAG)
    }
}

impl ScaleUpem for Vhea {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for value in [
            &mut self.ascender,
            &mut self.descender,
            &mut self.line_gap,
            &mut self.min_top_side_bearing,
            &mut self.min_bottom_side_bearing,
            &mut self.y_max_extent,
        ] {
            ratio.apply(value, Vhea::TAG)?;
        }
        ratio.apply(&mut self.advance_height_max, Vhea::TAG)?;
        ratio.apply(&mut self.caret_offset, Vhea::TAG)
    }
}

//! Scale the underline metrics in `post`

use font_model::{tables::post::Post, TopLevelTable};

use crate::{ScaleError, ScaleUpem, UpemRatio};

impl ScaleUpem for Post {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.underline_position, Post::TAG)?;
        ratio.apply(&mut self.underline_thickness, Post::TAG)
    }
}

//! Scale the horizontal and vertical metrics

use font_model::{
    tables::{
        hmtx::{Hmtx, LongMetric},
        vmtx::Vmtx,
    },
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for LongMetric {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.advance.scale_in_place(ratio)?;
        self.side_bearing.scale_in_place(ratio)
    }
}

impl ScaleUpem for Hmtx {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.h_metrics, Hmtx::TAG)?;
        ratio.apply(&mut self.left_side_bearings, Hmtx::TAG)
    }
}

impl ScaleUpem for Vmtx {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.v_metrics, Vmtx::TAG)?;
        ratio.apply(&mut self.top_side_bearings, Vmtx::TAG)
    }
}

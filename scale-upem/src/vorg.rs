//! Scale vertical origins

use font_model::{
    tables::vorg::{VertOriginYMetrics, Vorg},
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for VertOriginYMetrics {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.vert_origin_y.scale_in_place(ratio)
    }
}

impl ScaleUpem for Vorg {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.default_vert_origin_y, Vorg::TAG)?;
        ratio.apply(&mut self.vert_origin_y_metrics, Vorg::TAG)
    }
}

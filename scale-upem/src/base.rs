//! Scale baseline coordinates

use font_model::{
    tables::base::{Axis, Base, BaseCoord},
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for BaseCoord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        let (BaseCoord::Format1 { coordinate }
        | BaseCoord::Format2 { coordinate, .. }
        | BaseCoord::Format3 { coordinate, .. }) = self;
        coordinate.scale_in_place(ratio)
    }
}

impl ScaleInPlace for Axis {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.base_coords_mut()
            .try_for_each(|coord| coord.scale_in_place(ratio))
    }
}

impl ScaleUpem for Base {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.horiz_axis, Base::TAG)?;
        ratio.apply(&mut self.vert_axis, Base::TAG)?;
        ratio.apply(&mut self.item_var_store, Base::TAG)
    }
}

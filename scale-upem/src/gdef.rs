//! Scale ligature carets and GDEF variation deltas

use font_model::{
    tables::gdef::{CaretValue, Gdef, LigGlyph},
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for CaretValue {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            CaretValue::Format1 { coordinate } | CaretValue::Format3 { coordinate, .. } => {
                coordinate.scale_in_place(ratio)
            }
            // a contour point index
            CaretValue::Format2 { .. } => Ok(()),
        }
    }
}

impl ScaleInPlace for LigGlyph {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.caret_values.scale_in_place(ratio)
    }
}

impl ScaleUpem for Gdef {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        if let Some(lig_caret_list) = self.lig_caret_list.as_mut() {
            ratio.apply(&mut lig_caret_list.lig_glyphs, Gdef::TAG)?;
        }
        ratio.apply(&mut self.item_var_store, Gdef::TAG)
    }
}

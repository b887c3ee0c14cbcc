//! Scale glyph variation deltas
//!
//! Peak and intermediate tuples are normalized coordinates and are never
//! touched. Inferred deltas stay inferred, so the scaled glyph interpolates
//! the same untouched points as before.

use font_model::{
    tables::gvar::{GlyphDeltas, Gvar},
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for GlyphDeltas {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        for (x, y) in self.deltas.iter_mut().flatten() {
            x.scale_in_place(ratio)?;
            y.scale_in_place(ratio)?;
        }
        Ok(())
    }
}

impl ScaleUpem for Gvar {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for glyph in self.glyph_variations.iter_mut() {
            ratio.apply(&mut glyph.variations, Gvar::TAG)?;
        }
        Ok(())
    }
}

//! Scale legacy kerning
//!
//! Only format 0 subtables are modelled. Subtables in other formats are
//! reported by the driver before scaling starts and left alone here.

use font_model::{
    tables::kern::{Kern, KernSubtable},
    TopLevelTable,
};

use crate::{ScaleError, ScaleUpem, UpemRatio};

impl ScaleUpem for Kern {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for subtable in self.subtables.iter_mut() {
            match subtable {
                KernSubtable::Format0(kern0) => {
                    for pair in kern0.kerning_pairs.iter_mut() {
                        ratio.apply(&mut pair.value, Kern::TAG)?;
                    }
                }
                KernSubtable::Other { format, .. } => {
                    log::debug!("skipping kern subtable in format {format}");
                }
            }
        }
        Ok(())
    }
}

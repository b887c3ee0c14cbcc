//! Scale glyph positioning
//!
//! Value record placements and advances and anchor coordinates are in
//! design units. Device tables and variation indices are left alone, as are
//! contextual lookups, which only reference other lookups.

use font_model::{
    tables::gpos::{
        AnchorTable, BaseRecord, Class1Record, Class2Record, ComponentRecord, CursivePos,
        EntryExitRecord, Gpos, LigatureAttach, Mark2Record, MarkBasePos, MarkLigPos, MarkMarkPos,
        MarkRecord, PairPos, PairSet, PairValueRecord, PositionSubtables, SinglePos, ValueRecord,
    },
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for ValueRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.x_placement.scale_in_place(ratio)?;
        self.y_placement.scale_in_place(ratio)?;
        self.x_advance.scale_in_place(ratio)?;
        self.y_advance.scale_in_place(ratio)
    }
}

impl ScaleInPlace for AnchorTable {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        let (AnchorTable::Format1 {
            x_coordinate,
            y_coordinate,
        }
        | AnchorTable::Format2 {
            x_coordinate,
            y_coordinate,
            ..
        }
        | AnchorTable::Format3 {
            x_coordinate,
            y_coordinate,
            ..
        }) = self;
        x_coordinate.scale_in_place(ratio)?;
        y_coordinate.scale_in_place(ratio)
    }
}

impl ScaleInPlace for SinglePos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            SinglePos::Format1 { value_record, .. } => value_record.scale_in_place(ratio),
            SinglePos::Format2 { value_records, .. } => value_records.scale_in_place(ratio),
        }
    }
}

impl ScaleInPlace for PairValueRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.value_record1.scale_in_place(ratio)?;
        self.value_record2.scale_in_place(ratio)
    }
}

impl ScaleInPlace for PairSet {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.pair_value_records.scale_in_place(ratio)
    }
}

impl ScaleInPlace for Class2Record {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.value_record1.scale_in_place(ratio)?;
        self.value_record2.scale_in_place(ratio)
    }
}

impl ScaleInPlace for Class1Record {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.class2_records.scale_in_place(ratio)
    }
}

impl ScaleInPlace for PairPos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            PairPos::Format1 { pair_sets, .. } => pair_sets.scale_in_place(ratio),
            PairPos::Format2 { class1_records, .. } => class1_records.scale_in_place(ratio),
        }
    }
}

impl ScaleInPlace for EntryExitRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.entry_anchor.scale_in_place(ratio)?;
        self.exit_anchor.scale_in_place(ratio)
    }
}

impl ScaleInPlace for CursivePos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.entry_exit_record.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MarkRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.mark_anchor.scale_in_place(ratio)
    }
}

impl ScaleInPlace for BaseRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.base_anchors.scale_in_place(ratio)
    }
}

impl ScaleInPlace for ComponentRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.ligature_anchors.scale_in_place(ratio)
    }
}

impl ScaleInPlace for LigatureAttach {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.component_records.scale_in_place(ratio)
    }
}

impl ScaleInPlace for Mark2Record {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.mark2_anchors.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MarkBasePos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.mark_array.scale_in_place(ratio)?;
        self.base_array.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MarkLigPos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.mark_array.scale_in_place(ratio)?;
        self.ligature_array.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MarkMarkPos {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.mark1_array.scale_in_place(ratio)?;
        self.mark2_array.scale_in_place(ratio)
    }
}

impl ScaleInPlace for PositionSubtables {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            PositionSubtables::Single(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::Pair(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::Cursive(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::MarkToBase(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::MarkToLig(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::MarkToMark(subtables) => subtables.scale_in_place(ratio),
            PositionSubtables::Contextual { .. } => Ok(()),
        }
    }
}

impl ScaleUpem for Gpos {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for lookup in self.lookups.iter_mut() {
            ratio.apply(&mut lookup.subtables, Gpos::TAG)?;
        }
        Ok(())
    }
}

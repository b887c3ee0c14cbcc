//! Scale item variation stores and the tables built on them
//!
//! Every delta in a store is in design units. Regions are normalized
//! coordinates and delta-set index maps only address rows, so neither
//! changes.
//!
//! MVAR is the exception: the caret slope metrics are ratios, so the rows
//! they use are left alone. A row shared between a caret slope and a metric
//! in design units is copied, and the copy is given to the later records.

use std::collections::{HashMap, HashSet};

use font_model::{
    tables::{
        hvar::Hvar,
        mvar::Mvar,
        variations::{DeltaSetIndex, ItemVariationData, ItemVariationStore},
        vvar::Vvar,
    },
    TopLevelTable,
};
use font_types::Tag;

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for ItemVariationData {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.delta_sets.scale_in_place(ratio)
    }
}

impl ScaleInPlace for ItemVariationStore {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.item_variation_data.scale_in_place(ratio)
    }
}

impl ScaleUpem for Hvar {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.item_variation_store, Hvar::TAG)
    }
}

impl ScaleUpem for Vvar {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.item_variation_store, Vvar::TAG)
    }
}

/// MVAR metrics whose values are unitless.
const CARET_SLOPE_TAGS: [Tag; 4] = [
    Tag::new(b"hcrs"),
    Tag::new(b"hcrn"),
    Tag::new(b"vcrs"),
    Tag::new(b"vcrn"),
];

impl ScaleUpem for Mvar {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        let Mvar {
            value_records,
            item_variation_store,
        } = self;
        let Some(store) = item_variation_store.as_mut() else {
            return Ok(());
        };

        // whether the first record to use a row needs it scaled
        let mut first_use: HashMap<DeltaSetIndex, bool> = HashMap::new();
        let mut copies: HashMap<DeltaSetIndex, DeltaSetIndex> = HashMap::new();
        let mut unscaled = HashSet::new();
        for record in value_records.iter_mut() {
            let index = record.delta_set_index;
            if index == DeltaSetIndex::NO_VARIATION_INDEX {
                continue;
            }
            let scaled = !CARET_SLOPE_TAGS.contains(&record.value_tag);
            match first_use.get(&index) {
                None => {
                    first_use.insert(index, scaled);
                    if !scaled {
                        unscaled.insert(index);
                    }
                }
                Some(first) if *first == scaled => (),
                Some(_) => {
                    let copy = match copies.get(&index) {
                        Some(copy) => *copy,
                        None => {
                            let copy = copy_delta_set(Mvar::TAG, store, index)?;
                            log::debug!(
                                "MVAR delta set {index:?} is shared by '{}' and metrics in other units, copied to {copy:?}",
                                record.value_tag
                            );
                            copies.insert(index, copy);
                            copy
                        }
                    };
                    if !scaled {
                        unscaled.insert(copy);
                    }
                    record.delta_set_index = copy;
                }
            }
        }

        for (outer, data) in store.item_variation_data.iter_mut().enumerate() {
            for (inner, row) in data.delta_sets.iter_mut().enumerate() {
                let (Ok(outer), Ok(inner)) = (u16::try_from(outer), u16::try_from(inner)) else {
                    return Err(ScaleError::malformed_variations(
                        Mvar::TAG,
                        "delta set index out of range",
                    ));
                };
                let index = DeltaSetIndex::new(outer, inner);
                if !unscaled.contains(&index) {
                    ratio.apply(row, Mvar::TAG)?;
                }
            }
        }
        Ok(())
    }
}

/// Append an unscaled copy of a row to its subtable.
pub(crate) fn copy_delta_set(
    tag: Tag,
    store: &mut ItemVariationStore,
    index: DeltaSetIndex,
) -> Result<DeltaSetIndex, ScaleError> {
    let missing = || ScaleError::malformed_variations(tag, format!("no delta set {index:?}"));
    let data = store
        .item_variation_data
        .get_mut(index.outer as usize)
        .ok_or_else(missing)?;
    let row = data
        .delta_sets
        .get(index.inner as usize)
        .cloned()
        .ok_or_else(missing)?;
    let inner = u16::try_from(data.delta_sets.len())
        .ok()
        .filter(|inner| *inner != 0xFFFF)
        .ok_or_else(|| {
            ScaleError::malformed_variations(
                tag,
                format!("too many delta sets in subtable {}", index.outer),
            )
        })?;
    data.delta_sets.push(row);
    Ok(DeltaSetIndex::new(index.outer, inner))
}

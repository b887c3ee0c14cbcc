//! Scale variable composite glyphs
//!
//! Translation and the transform centre are in design units, as are the
//! matching columns of each transform delta set. Rotation, scale, skew and
//! axis values, and their deltas, are unitless.
//!
//! A delta set may be shared by several components. When two uses need
//! different columns scaled, the first use (in glyph and component order)
//! keeps the original row and every other distinct use gets its own copy,
//! appended to the same subtable.

use std::collections::HashMap;

use font_model::{
    tables::{
        variations::{DeltaSetIndex, MultiItemVariationStore, NO_VARIATION_INDEX},
        varc::Varc,
    },
    TopLevelTable,
};

use crate::{ratio::Scale, ScaleError, ScaleUpem, UpemRatio};

/// For each delta column, whether it holds design units.
type ColumnMask = Vec<bool>;

impl ScaleUpem for Varc {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        let mut plan = DeltaSetPlan::default();
        let Varc {
            multi_var_store,
            glyphs,
            ..
        } = self;

        for component in glyphs.iter_mut().flat_map(|g| g.components.iter_mut()) {
            for (_, value) in component.transform.design_unit_fields_mut() {
                ratio.apply(value, Varc::TAG)?;
            }

            let fields = component.transform.fields();
            if let Some(var_index) = component.transform_var_index {
                let mask = fields.iter().map(|f| f.is_design_units()).collect();
                let new_index = plan.assign(multi_var_store.as_mut(), var_index, mask)?;
                component.transform_var_index = Some(new_index);
            }
            if let Some(var_index) = component.axis_values_var_index {
                let mask = vec![false; component.axis_values_delta_len()];
                let new_index = plan.assign(multi_var_store.as_mut(), var_index, mask)?;
                component.axis_values_var_index = Some(new_index);
            }
        }

        if let Some(store) = multi_var_store.as_mut() {
            plan.apply(store, ratio)?;
        }
        Ok(())
    }
}

/// The column mask each delta set will be scaled with.
#[derive(Default)]
struct DeltaSetPlan {
    // in first-seen order
    masks: Vec<(u32, ColumnMask)>,
    first_mask: HashMap<u32, usize>,
    copies: HashMap<(u32, ColumnMask), u32>,
}

impl DeltaSetPlan {
    /// Decide which delta set a use with `mask` should refer to.
    ///
    /// Must be called for every use before any row is scaled, so that copies
    /// are taken from unscaled rows.
    fn assign(
        &mut self,
        store: Option<&mut MultiItemVariationStore>,
        var_index: u32,
        mask: ColumnMask,
    ) -> Result<u32, ScaleError> {
        if var_index == NO_VARIATION_INDEX {
            return Ok(var_index);
        }
        let Some(first) = self.first_mask.get(&var_index) else {
            self.first_mask.insert(var_index, self.masks.len());
            self.masks.push((var_index, mask));
            return Ok(var_index);
        };
        if self.masks[*first].1 == mask {
            return Ok(var_index);
        }
        if let Some(copy) = self.copies.get(&(var_index, mask.clone())) {
            return Ok(*copy);
        }

        let store = store.ok_or_else(|| {
            ScaleError::malformed_variations(Varc::TAG, "variation index without a store")
        })?;
        let index = DeltaSetIndex::from_u32(var_index);
        let data = store
            .variation_data
            .get_mut(index.outer as usize)
            .ok_or_else(|| {
                ScaleError::malformed_variations(Varc::TAG, format!("no delta set {var_index}"))
            })?;
        let row = data
            .delta_sets
            .get(index.inner as usize)
            .cloned()
            .ok_or_else(|| {
                ScaleError::malformed_variations(Varc::TAG, format!("no delta set {var_index}"))
            })?;
        let inner = u16::try_from(data.delta_sets.len()).map_err(|_| {
            ScaleError::malformed_variations(
                Varc::TAG,
                format!("too many delta sets in subtable {}", index.outer),
            )
        })?;
        data.delta_sets.push(row);
        let copy = DeltaSetIndex::new(index.outer, inner).to_u32();
        log::debug!(
            "VARC delta set {var_index} is shared by components with different units, copied to {copy}"
        );
        self.copies.insert((var_index, mask.clone()), copy);
        self.first_mask.insert(copy, self.masks.len());
        self.masks.push((copy, mask));
        Ok(copy)
    }

    fn apply(
        &self,
        store: &mut MultiItemVariationStore,
        ratio: UpemRatio,
    ) -> Result<(), ScaleError> {
        for (var_index, mask) in &self.masks {
            if !mask.iter().any(|scaled| *scaled) {
                continue;
            }
            let index = DeltaSetIndex::from_u32(*var_index);
            let Some(row) = store
                .variation_data
                .get_mut(index.outer as usize)
                .and_then(|data| data.delta_sets.get_mut(index.inner as usize))
            else {
                return Err(ScaleError::malformed_variations(
                    Varc::TAG,
                    format!("no delta set {var_index}"),
                ));
            };
            // one chunk per region
            for chunk in row.chunks_mut(mask.len()) {
                for (delta, scaled) in chunk.iter_mut().zip(mask) {
                    if *scaled {
                        *delta = delta
                            .scale(ratio)
                            .map_err(ScaleError::out_of_range(Varc::TAG))?;
                    }
                }
            }
        }
        Ok(())
    }
}

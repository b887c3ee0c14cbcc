//! The [VVAR (Vertical Metrics Variations)](https://docs.microsoft.com/en-us/typography/opentype/spec/vvar) table

use font_types::{F2Dot14, GlyphId16};

use super::variations::{DeltaSetIndexMap, ItemVariationStore};

/// Vertical metrics variations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vvar {
    pub item_variation_store: ItemVariationStore,
    pub advance_height_mapping: Option<DeltaSetIndexMap>,
    pub tsb_mapping: Option<DeltaSetIndexMap>,
    pub bsb_mapping: Option<DeltaSetIndexMap>,
    pub v_org_mapping: Option<DeltaSetIndexMap>,
}

impl Vvar {
    pub fn new(item_variation_store: ItemVariationStore) -> Self {
        Vvar {
            item_variation_store,
            ..Default::default()
        }
    }

    pub fn advance_height_delta(&self, gid: GlyphId16, coords: &[F2Dot14]) -> Option<f64> {
        let index = super::hvar::advance_index(self.advance_height_mapping.as_ref(), gid)?;
        self.item_variation_store.compute_delta(index, coords)
    }
}

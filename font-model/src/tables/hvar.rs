//! The [HVAR (Horizontal Metrics Variations)](https://docs.microsoft.com/en-us/typography/opentype/spec/hvar) table

use font_types::{F2Dot14, GlyphId16};

use super::variations::{DeltaSetIndex, DeltaSetIndexMap, ItemVariationStore};

/// Horizontal metrics variations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hvar {
    pub item_variation_store: ItemVariationStore,
    /// Absent when advances are addressed directly by glyph id.
    pub advance_width_mapping: Option<DeltaSetIndexMap>,
    pub lsb_mapping: Option<DeltaSetIndexMap>,
    pub rsb_mapping: Option<DeltaSetIndexMap>,
}

impl Hvar {
    pub fn new(item_variation_store: ItemVariationStore) -> Self {
        Hvar {
            item_variation_store,
            ..Default::default()
        }
    }

    /// The advance width delta for a glyph at a location.
    pub fn advance_width_delta(&self, gid: GlyphId16, coords: &[F2Dot14]) -> Option<f64> {
        let index = advance_index(self.advance_width_mapping.as_ref(), gid)?;
        self.item_variation_store.compute_delta(index, coords)
    }
}

pub(crate) fn advance_index(
    mapping: Option<&DeltaSetIndexMap>,
    gid: GlyphId16,
) -> Option<DeltaSetIndex> {
    match mapping {
        Some(map) => map.get(gid.to_u16() as u32),
        None => Some(DeltaSetIndex::new(0, gid.to_u16())),
    }
}

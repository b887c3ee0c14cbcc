//! The [MVAR (Metrics Variations)](https://docs.microsoft.com/en-us/typography/opentype/spec/mvar) table

use font_types::{F2Dot14, Tag};

use super::variations::{DeltaSetIndex, ItemVariationStore};

/// Metrics variations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mvar {
    /// Records sorted by value tag.
    pub value_records: Vec<ValueRecord>,
    pub item_variation_store: Option<ItemVariationStore>,
}

/// Associates a font-wide metric with a delta set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRecord {
    /// A tag such as `hasc` or `xhgt` identifying the metric.
    pub value_tag: Tag,
    pub delta_set_index: DeltaSetIndex,
}

impl Mvar {
    /// The delta for the metric identified by `tag` at a location.
    pub fn metric_delta(&self, tag: Tag, coords: &[F2Dot14]) -> Option<f64> {
        let record = self.value_records.iter().find(|rec| rec.value_tag == tag)?;
        self.item_variation_store
            .as_ref()?
            .compute_delta(record.delta_set_index, coords)
    }
}

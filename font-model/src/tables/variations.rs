//! OpenType variation common table formats

use font_types::F2Dot14;

/// The var index used to indicate that a value has no variation data.
pub const NO_VARIATION_INDEX: u32 = 0xFFFF_FFFF;

/// A coordinate on each axis of the design space, in normalized units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuple {
    pub values: Vec<F2Dot14>,
}

impl Tuple {
    pub fn new(values: Vec<F2Dot14>) -> Self {
        Tuple { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = F2Dot14> + '_ {
        self.values.iter().copied()
    }
}

impl From<Vec<F2Dot14>> for Tuple {
    fn from(values: Vec<F2Dot14>) -> Self {
        Tuple { values }
    }
}

/// The scalar contribution of a single axis of a region.
///
/// Returns `None` if the location is outside the region, in which case the
/// whole region contributes nothing. Malformed axes (start > peak, peak > end,
/// a zero peak, or a range that crosses zero) are ignored and yield `1.0`.
pub(crate) fn axis_scalar(start: f64, peak: f64, end: f64, coord: f64) -> Option<f64> {
    if start > peak || peak > end || peak == 0.0 || start < 0.0 && end > 0.0 {
        Some(1.0)
    } else if coord < start || coord > end {
        None
    } else if coord == peak {
        Some(1.0)
    } else if coord < peak {
        Some((coord - start) / (peak - start))
    } else {
        Some((end - coord) / (end - peak))
    }
}

/// The start, peak and end of a region on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionAxisCoordinates {
    pub start_coord: F2Dot14,
    pub peak_coord: F2Dot14,
    pub end_coord: F2Dot14,
}

impl RegionAxisCoordinates {
    pub fn new(start_coord: F2Dot14, peak_coord: F2Dot14, end_coord: F2Dot14) -> Self {
        RegionAxisCoordinates {
            start_coord,
            peak_coord,
            end_coord,
        }
    }

    /// A region peaking at `peak`, spanning from zero.
    pub fn from_peak(peak: F2Dot14) -> Self {
        let zero = F2Dot14::from_f32(0.0);
        if peak.to_f32() < 0.0 {
            RegionAxisCoordinates::new(peak, peak, zero)
        } else {
            RegionAxisCoordinates::new(zero, peak, peak)
        }
    }
}

/// A region of the design space, with one set of coordinates per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariationRegion {
    pub region_axes: Vec<RegionAxisCoordinates>,
}

impl VariationRegion {
    pub fn new(region_axes: Vec<RegionAxisCoordinates>) -> Self {
        VariationRegion { region_axes }
    }

    /// Computes a scalar value for this region and the specified
    /// normalized variation coordinates.
    pub fn compute_scalar(&self, coords: &[F2Dot14]) -> f64 {
        let mut scalar = 1.0;
        for (i, axis) in self.region_axes.iter().enumerate() {
            let coord = coords.get(i).map(|c| c.to_f32() as f64).unwrap_or(0.0);
            match axis_scalar(
                axis.start_coord.to_f32() as f64,
                axis.peak_coord.to_f32() as f64,
                axis.end_coord.to_f32() as f64,
                coord,
            ) {
                Some(axis_scalar) => scalar *= axis_scalar,
                None => return 0.0,
            }
        }
        scalar
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariationRegionList {
    pub axis_count: u16,
    pub variation_regions: Vec<VariationRegion>,
}

impl VariationRegionList {
    pub fn new(axis_count: u16, variation_regions: Vec<VariationRegion>) -> Self {
        VariationRegionList {
            axis_count,
            variation_regions,
        }
    }
}

/// A subtable of an item variation store.
///
/// Each delta set (row) holds one delta per entry in `region_indexes`. The
/// choice between word and byte storage is made when encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemVariationData {
    pub region_indexes: Vec<u16>,
    pub delta_sets: Vec<Vec<i32>>,
}

impl ItemVariationData {
    pub fn new(region_indexes: Vec<u16>, delta_sets: Vec<Vec<i32>>) -> Self {
        ItemVariationData {
            region_indexes,
            delta_sets,
        }
    }
}

/// The outer/inner pair that addresses a single delta set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaSetIndex {
    /// Index into the item variation data subtables.
    pub outer: u16,
    /// Index into the delta sets of that subtable.
    pub inner: u16,
}

impl DeltaSetIndex {
    pub const NO_VARIATION_INDEX: DeltaSetIndex = DeltaSetIndex {
        outer: 0xFFFF,
        inner: 0xFFFF,
    };

    pub fn new(outer: u16, inner: u16) -> Self {
        DeltaSetIndex { outer, inner }
    }

    /// Split a packed 32-bit var index into its outer and inner parts.
    pub fn from_u32(var_index: u32) -> Self {
        DeltaSetIndex {
            outer: (var_index >> 16) as u16,
            inner: (var_index & 0xFFFF) as u16,
        }
    }

    pub fn to_u32(self) -> u32 {
        ((self.outer as u32) << 16) | self.inner as u32
    }
}

/// An [item variation store](https://learn.microsoft.com/en-us/typography/opentype/spec/otvarcommonformats#item-variation-store).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemVariationStore {
    pub variation_region_list: VariationRegionList,
    pub item_variation_data: Vec<ItemVariationData>,
}

impl ItemVariationStore {
    pub fn new(
        variation_region_list: VariationRegionList,
        item_variation_data: Vec<ItemVariationData>,
    ) -> Self {
        ItemVariationStore {
            variation_region_list,
            item_variation_data,
        }
    }

    /// The interpolated delta for the given delta set at a location.
    ///
    /// Returns `None` if the index does not address a delta set.
    pub fn compute_delta(&self, index: DeltaSetIndex, coords: &[F2Dot14]) -> Option<f64> {
        let data = self.item_variation_data.get(index.outer as usize)?;
        let row = data.delta_sets.get(index.inner as usize)?;
        let regions = &self.variation_region_list.variation_regions;
        let mut result = 0.0;
        for (region_ix, delta) in data.region_indexes.iter().zip(row) {
            let region = regions.get(*region_ix as usize)?;
            result += region.compute_scalar(coords) * *delta as f64;
        }
        Some(result)
    }
}

/// A mapping from glyph ids (or other item indices) to delta-set indices.
///
/// The entry format and inner-index bit count are chosen when encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaSetIndexMap {
    pub entries: Vec<DeltaSetIndex>,
}

impl DeltaSetIndexMap {
    /// The delta-set index for an item; items past the end use the last entry.
    pub fn get(&self, index: u32) -> Option<DeltaSetIndex> {
        self.entries
            .get(index as usize)
            .or_else(|| self.entries.last())
            .copied()
    }
}

/// The coordinates of a sparse region on a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseRegionAxisCoordinates {
    pub axis_index: u16,
    pub start: F2Dot14,
    pub peak: F2Dot14,
    pub end: F2Dot14,
}

/// A region that only lists the axes it depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseVariationRegion {
    pub region_axes: Vec<SparseRegionAxisCoordinates>,
}

impl SparseVariationRegion {
    pub fn new(region_axes: Vec<SparseRegionAxisCoordinates>) -> Self {
        SparseVariationRegion { region_axes }
    }

    pub fn compute_scalar(&self, coords: &[F2Dot14]) -> f64 {
        let mut scalar = 1.0;
        for axis in &self.region_axes {
            let coord = coords
                .get(axis.axis_index as usize)
                .map(|c| c.to_f32() as f64)
                .unwrap_or(0.0);
            match axis_scalar(
                axis.start.to_f32() as f64,
                axis.peak.to_f32() as f64,
                axis.end.to_f32() as f64,
                coord,
            ) {
                Some(axis_scalar) => scalar *= axis_scalar,
                None => return 0.0,
            }
        }
        scalar
    }
}

/// A subtable of a multi-item variation store.
///
/// Every delta set holds a tuple of values per region, laid out region-major:
/// the deltas of the first region, then those of the second, and so on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiItemVariationData {
    pub region_indices: Vec<u16>,
    pub delta_sets: Vec<Vec<i32>>,
}

impl MultiItemVariationData {
    pub fn new(region_indices: Vec<u16>, delta_sets: Vec<Vec<i32>>) -> Self {
        MultiItemVariationData {
            region_indices,
            delta_sets,
        }
    }
}

/// A multi-item variation store, as used by `VARC`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiItemVariationStore {
    pub regions: Vec<SparseVariationRegion>,
    pub variation_data: Vec<MultiItemVariationData>,
}

impl MultiItemVariationStore {
    pub fn new(
        regions: Vec<SparseVariationRegion>,
        variation_data: Vec<MultiItemVariationData>,
    ) -> Self {
        MultiItemVariationStore {
            regions,
            variation_data,
        }
    }

    /// The delta set addressed by a packed var index.
    pub fn delta_set(&self, var_index: u32) -> Option<&[i32]> {
        let index = DeltaSetIndex::from_u32(var_index);
        self.variation_data
            .get(index.outer as usize)?
            .delta_sets
            .get(index.inner as usize)
            .map(Vec::as_slice)
    }

    /// The interpolated tuple of `tuple_len` deltas for a var index.
    ///
    /// Returns `None` if the index is out of range or the delta set is not
    /// `tuple_len` values wide per region.
    pub fn compute_tuple_deltas(
        &self,
        var_index: u32,
        coords: &[F2Dot14],
        tuple_len: usize,
    ) -> Option<Vec<f64>> {
        let index = DeltaSetIndex::from_u32(var_index);
        let data = self.variation_data.get(index.outer as usize)?;
        let row = data.delta_sets.get(index.inner as usize)?;
        if row.len() != data.region_indices.len() * tuple_len {
            return None;
        }
        let mut result = vec![0.0; tuple_len];
        if tuple_len == 0 {
            return Some(result);
        }
        for (region_ix, chunk) in data.region_indices.iter().zip(row.chunks(tuple_len)) {
            let scalar = self.regions.get(*region_ix as usize)?.compute_scalar(coords);
            if scalar == 0.0 {
                continue;
            }
            for (out, delta) in result.iter_mut().zip(chunk) {
                *out += scalar * *delta as f64;
            }
        }
        Some(result)
    }
}

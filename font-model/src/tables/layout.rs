//! OpenType layout common table formats

use std::collections::BTreeMap;

use font_types::GlyphId16;

use super::variations::DeltaSetIndex;

/// A set of glyphs, sorted by glyph id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageTable {
    pub glyphs: Vec<GlyphId16>,
}

impl CoverageTable {
    /// The coverage index of a glyph.
    pub fn get(&self, gid: GlyphId16) -> Option<u16> {
        self.glyphs.binary_search(&gid).ok().map(|ix| ix as u16)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<GlyphId16> for CoverageTable {
    fn from_iter<T: IntoIterator<Item = GlyphId16>>(iter: T) -> Self {
        let mut glyphs: Vec<_> = iter.into_iter().collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        CoverageTable { glyphs }
    }
}

/// A mapping from glyphs to classes; unlisted glyphs are class 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub classes: BTreeMap<GlyphId16, u16>,
}

impl ClassDef {
    pub fn get(&self, gid: GlyphId16) -> u16 {
        self.classes.get(&gid).copied().unwrap_or_default()
    }
}

impl FromIterator<(GlyphId16, u16)> for ClassDef {
    fn from_iter<T: IntoIterator<Item = (GlyphId16, u16)>>(iter: T) -> Self {
        ClassDef {
            classes: iter.into_iter().collect(),
        }
    }
}

/// A device table: per-ppem pixel adjustments for hinted rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    pub start_size: u16,
    pub end_size: u16,
    pub delta_format: u16,
    pub deltas: Vec<i8>,
}

/// Either a [`Device`] table or an index into an item variation store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceOrVariationIndex {
    Device(Device),
    VariationIndex(DeltaSetIndex),
}

impl DeviceOrVariationIndex {
    /// The delta set this value varies with, if any.
    pub fn variation_index(&self) -> Option<DeltaSetIndex> {
        match self {
            DeviceOrVariationIndex::VariationIndex(index) => Some(*index),
            DeviceOrVariationIndex::Device(_) => None,
        }
    }
}

impl From<Device> for DeviceOrVariationIndex {
    fn from(src: Device) -> Self {
        DeviceOrVariationIndex::Device(src)
    }
}

impl From<DeltaSetIndex> for DeviceOrVariationIndex {
    fn from(src: DeltaSetIndex) -> Self {
        DeviceOrVariationIndex::VariationIndex(src)
    }
}

//! The [GDEF](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef) table

use super::{
    layout::{ClassDef, CoverageTable, DeviceOrVariationIndex},
    variations::ItemVariationStore,
};

/// Glyph definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gdef {
    pub glyph_class_def: Option<ClassDef>,
    pub attach_list: Option<AttachList>,
    pub lig_caret_list: Option<LigCaretList>,
    pub mark_attach_class_def: Option<ClassDef>,
    pub mark_glyph_sets: Vec<CoverageTable>,
    pub item_var_store: Option<ItemVariationStore>,
}

/// Attachment points, as contour point indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachList {
    pub coverage: CoverageTable,
    pub attach_points: Vec<Vec<u16>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigCaretList {
    pub coverage: CoverageTable,
    pub lig_glyphs: Vec<LigGlyph>,
}

/// The caret positions of a single ligature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigGlyph {
    pub caret_values: Vec<CaretValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaretValue {
    /// A coordinate in design units.
    Format1 { coordinate: i16 },
    /// A contour point index.
    Format2 { caret_value_point_index: u16 },
    /// A coordinate with device or variation adjustments.
    Format3 {
        coordinate: i16,
        device: Option<DeviceOrVariationIndex>,
    },
}

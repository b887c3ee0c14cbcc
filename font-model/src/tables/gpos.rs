//! The [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) table
//!
//! Only the lookup list is modelled; the script and feature lists, and the
//! subtables of contextual lookups, contain no coordinates and are carried
//! opaquely.

use font_types::GlyphId16;

use super::layout::{ClassDef, CoverageTable, DeviceOrVariationIndex};

/// Glyph positioning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gpos {
    /// The encoded script list.
    pub script_list: Vec<u8>,
    /// The encoded feature list.
    pub feature_list: Vec<u8>,
    pub lookups: Vec<PositionLookup>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionLookup {
    pub lookup_flag: u16,
    pub mark_filtering_set: Option<u16>,
    pub subtables: PositionSubtables,
}

/// The subtables of a lookup, which all share a type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionSubtables {
    Single(Vec<SinglePos>),
    Pair(Vec<PairPos>),
    Cursive(Vec<CursivePos>),
    MarkToBase(Vec<MarkBasePos>),
    MarkToLig(Vec<MarkLigPos>),
    MarkToMark(Vec<MarkMarkPos>),
    /// Contextual and chained contextual lookups (types 7 and 8), encoded.
    ///
    /// Extension lookups are unwrapped into the kind of lookup they wrap
    /// when decoding. Any other lookup type carried here is opaque.
    Contextual { lookup_type: u16, data: Vec<Vec<u8>> },
}

impl PositionSubtables {
    /// The lookup type, as it would be encoded without extension subtables.
    pub fn lookup_type(&self) -> u16 {
        match self {
            PositionSubtables::Single(_) => 1,
            PositionSubtables::Pair(_) => 2,
            PositionSubtables::Cursive(_) => 3,
            PositionSubtables::MarkToBase(_) => 4,
            PositionSubtables::MarkToLig(_) => 5,
            PositionSubtables::MarkToMark(_) => 6,
            PositionSubtables::Contextual { lookup_type, .. } => *lookup_type,
        }
    }

    /// `true` for encoded subtables that may hold positioning values.
    ///
    /// Contextual lookups only refer to other lookups; anything else kept
    /// encoded, such as an extension that was not unwrapped, may not.
    pub fn has_opaque_values(&self) -> bool {
        match self {
            PositionSubtables::Contextual { lookup_type, .. } => !matches!(lookup_type, 7 | 8),
            _ => false,
        }
    }
}

/// A [ValueRecord](https://learn.microsoft.com/en-us/typography/opentype/spec/gpos#valueRecord)
///
/// The fields that are present determine the value format when encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRecord {
    pub x_placement: Option<i16>,
    pub y_placement: Option<i16>,
    pub x_advance: Option<i16>,
    pub y_advance: Option<i16>,
    pub x_placement_device: Option<DeviceOrVariationIndex>,
    pub y_placement_device: Option<DeviceOrVariationIndex>,
    pub x_advance_device: Option<DeviceOrVariationIndex>,
    pub y_advance_device: Option<DeviceOrVariationIndex>,
}

impl ValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x_placement(mut self, val: i16) -> Self {
        self.x_placement = Some(val);
        self
    }

    pub fn with_y_placement(mut self, val: i16) -> Self {
        self.y_placement = Some(val);
        self
    }

    pub fn with_x_advance(mut self, val: i16) -> Self {
        self.x_advance = Some(val);
        self
    }

    pub fn with_y_advance(mut self, val: i16) -> Self {
        self.y_advance = Some(val);
        self
    }

    /// `true` if no fields are set.
    pub fn is_empty(&self) -> bool {
        *self == ValueRecord::default()
    }
}

/// An anchor point, in design units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorTable {
    Format1 {
        x_coordinate: i16,
        y_coordinate: i16,
    },
    /// With a contour point to use when hinting.
    Format2 {
        x_coordinate: i16,
        y_coordinate: i16,
        anchor_point: u16,
    },
    Format3 {
        x_coordinate: i16,
        y_coordinate: i16,
        x_device: Option<DeviceOrVariationIndex>,
        y_device: Option<DeviceOrVariationIndex>,
    },
}

impl AnchorTable {
    pub fn format_1(x_coordinate: i16, y_coordinate: i16) -> Self {
        AnchorTable::Format1 {
            x_coordinate,
            y_coordinate,
        }
    }

    pub fn coordinates(&self) -> (i16, i16) {
        match self {
            AnchorTable::Format1 {
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
            } => (*x_coordinate, *y_coordinate),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SinglePos {
    /// One value for every covered glyph.
    Format1 {
        coverage: CoverageTable,
        value_record: ValueRecord,
    },
    /// One value per covered glyph.
    Format2 {
        coverage: CoverageTable,
        value_records: Vec<ValueRecord>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairPos {
    /// Adjustments for specific glyph pairs.
    Format1 {
        coverage: CoverageTable,
        pair_sets: Vec<PairSet>,
    },
    /// Adjustments for pairs of glyph classes.
    Format2 {
        coverage: CoverageTable,
        class_def1: ClassDef,
        class_def2: ClassDef,
        class1_records: Vec<Class1Record>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairSet {
    pub pair_value_records: Vec<PairValueRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairValueRecord {
    pub second_glyph: GlyphId16,
    pub value_record1: ValueRecord,
    pub value_record2: ValueRecord,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class1Record {
    pub class2_records: Vec<Class2Record>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class2Record {
    pub value_record1: ValueRecord,
    pub value_record2: ValueRecord,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursivePos {
    pub coverage: CoverageTable,
    pub entry_exit_record: Vec<EntryExitRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryExitRecord {
    pub entry_anchor: Option<AnchorTable>,
    pub exit_anchor: Option<AnchorTable>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkRecord {
    pub mark_class: u16,
    pub mark_anchor: AnchorTable,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkBasePos {
    pub mark_coverage: CoverageTable,
    pub base_coverage: CoverageTable,
    pub mark_array: Vec<MarkRecord>,
    pub base_array: Vec<BaseRecord>,
}

/// One anchor per mark class; `None` where the base has no attachment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseRecord {
    pub base_anchors: Vec<Option<AnchorTable>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkLigPos {
    pub mark_coverage: CoverageTable,
    pub ligature_coverage: CoverageTable,
    pub mark_array: Vec<MarkRecord>,
    pub ligature_array: Vec<LigatureAttach>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigatureAttach {
    pub component_records: Vec<ComponentRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentRecord {
    pub ligature_anchors: Vec<Option<AnchorTable>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkMarkPos {
    pub mark1_coverage: CoverageTable,
    pub mark2_coverage: CoverageTable,
    pub mark1_array: Vec<MarkRecord>,
    pub mark2_array: Vec<Mark2Record>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark2Record {
    pub mark2_anchors: Vec<Option<AnchorTable>>,
}

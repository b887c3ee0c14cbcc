//! The [BASE](https://learn.microsoft.com/en-us/typography/opentype/spec/base) table

use font_types::Tag;

use super::{layout::DeviceOrVariationIndex, variations::ItemVariationStore};

/// Baseline data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub horiz_axis: Option<Axis>,
    pub vert_axis: Option<Axis>,
    pub item_var_store: Option<ItemVariationStore>,
}

/// Baseline data for one layout direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// The baselines referenced by every [`BaseValues`] in this axis.
    pub base_tag_list: Vec<Tag>,
    pub base_script_records: Vec<BaseScriptRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseScriptRecord {
    pub base_script_tag: Tag,
    pub base_script: BaseScript,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseScript {
    pub base_values: Option<BaseValues>,
    pub default_min_max: Option<MinMax>,
    pub base_lang_sys_records: Vec<BaseLangSysRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseLangSysRecord {
    pub base_lang_sys_tag: Tag,
    pub min_max: MinMax,
}

/// One coordinate per baseline in the axis' tag list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseValues {
    pub default_baseline_index: u16,
    pub base_coords: Vec<BaseCoord>,
}

/// Minimum and maximum extents for a script or language system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min_coord: Option<BaseCoord>,
    pub max_coord: Option<BaseCoord>,
    pub feat_min_max_records: Vec<FeatMinMaxRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatMinMaxRecord {
    pub feature_table_tag: Tag,
    pub min_coord: Option<BaseCoord>,
    pub max_coord: Option<BaseCoord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseCoord {
    Format1 {
        coordinate: i16,
    },
    /// A coordinate with a contour point on a reference glyph.
    Format2 {
        coordinate: i16,
        reference_glyph: u16,
        base_coord_point: u16,
    },
    Format3 {
        coordinate: i16,
        device: Option<DeviceOrVariationIndex>,
    },
}

impl BaseCoord {
    pub fn format_1(coordinate: i16) -> Self {
        BaseCoord::Format1 { coordinate }
    }

    pub fn coordinate(&self) -> i16 {
        match self {
            BaseCoord::Format1 { coordinate }
            | BaseCoord::Format2 { coordinate, .. }
            | BaseCoord::Format3 { coordinate, .. } => *coordinate,
        }
    }
}

impl Axis {
    /// Every base coord in this axis, in table order.
    pub fn base_coords_mut(&mut self) -> impl Iterator<Item = &mut BaseCoord> {
        self.base_script_records.iter_mut().flat_map(|rec| {
            let BaseScript {
                base_values,
                default_min_max,
                base_lang_sys_records,
            } = &mut rec.base_script;
            let values = base_values
                .iter_mut()
                .flat_map(|values| values.base_coords.iter_mut());
            let min_maxes = default_min_max
                .iter_mut()
                .chain(base_lang_sys_records.iter_mut().map(|r| &mut r.min_max))
                .flat_map(MinMax::coords_mut);
            values.chain(min_maxes)
        })
    }
}

impl MinMax {
    fn coords_mut(&mut self) -> impl Iterator<Item = &mut BaseCoord> {
        self.min_coord
            .iter_mut()
            .chain(self.max_coord.iter_mut())
            .chain(
                self.feat_min_max_records
                    .iter_mut()
                    .flat_map(|rec| rec.min_coord.iter_mut().chain(rec.max_coord.iter_mut())),
            )
    }
}

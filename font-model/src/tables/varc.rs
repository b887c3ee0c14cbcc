//! The [VARC (Variable Composites/Components)](https://github.com/harfbuzz/boring-expansion-spec/blob/main/VARC.md) table

use std::collections::BTreeMap;

use font_types::{F2Dot14, GlyphId};

use super::variations::{MultiItemVariationStore, NO_VARIATION_INDEX};

/// Variable composite glyphs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Varc {
    /// The glyphs that are variable composites, sorted by glyph id.
    pub coverage: Vec<GlyphId>,
    pub multi_var_store: Option<MultiItemVariationStore>,
    /// The encoded condition list.
    pub condition_list: Vec<u8>,
    /// One entry per glyph in `coverage`.
    pub glyphs: Vec<VarCompositeGlyph>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarCompositeGlyph {
    pub components: Vec<VarComponent>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarComponent {
    pub reset_unspecified_axes: bool,
    pub gid: GlyphId,
    pub condition_index: Option<u32>,
    /// Normalized axis values, keyed by axis index.
    pub axis_values: Option<BTreeMap<u16, f32>>,
    /// Deltas for `axis_values`, one column per entry.
    pub axis_values_var_index: Option<u32>,
    pub transform: DecomposedTransform,
    /// Deltas for the fields of `transform` that are present, one column
    /// per field in [`TransformField::ALL`] order.
    pub transform_var_index: Option<u32>,
}

/// A transform built from its decomposed parts.
///
/// Translation and the transform centre are in design units; rotation and
/// skew are in multiples of pi, and scale is a factor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposedTransform {
    pub translate_x: Option<i16>,
    pub translate_y: Option<i16>,
    pub rotation: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub skew_x: Option<f32>,
    pub skew_y: Option<f32>,
    pub center_x: Option<i16>,
    pub center_y: Option<i16>,
}

/// A single field of a [`DecomposedTransform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransformField {
    TranslateX,
    TranslateY,
    Rotation,
    ScaleX,
    ScaleY,
    SkewX,
    SkewY,
    CenterX,
    CenterY,
}

impl TransformField {
    /// Every field, in the order their deltas are stored.
    pub const ALL: [TransformField; 9] = [
        TransformField::TranslateX,
        TransformField::TranslateY,
        TransformField::Rotation,
        TransformField::ScaleX,
        TransformField::ScaleY,
        TransformField::SkewX,
        TransformField::SkewY,
        TransformField::CenterX,
        TransformField::CenterY,
    ];

    /// `true` for fields measured in design units.
    pub fn is_design_units(self) -> bool {
        matches!(
            self,
            TransformField::TranslateX
                | TransformField::TranslateY
                | TransformField::CenterX
                | TransformField::CenterY
        )
    }

    /// The value of one unit of delta for this field.
    pub fn delta_unit(self) -> f64 {
        match self {
            TransformField::Rotation | TransformField::SkewX | TransformField::SkewY => {
                1.0 / 4096.0
            }
            TransformField::ScaleX | TransformField::ScaleY => 1.0 / 1024.0,
            _ => 1.0,
        }
    }
}

impl DecomposedTransform {
    /// The value of a field, if present.
    pub fn get(&self, field: TransformField) -> Option<f64> {
        match field {
            TransformField::TranslateX => self.translate_x.map(f64::from),
            TransformField::TranslateY => self.translate_y.map(f64::from),
            TransformField::Rotation => self.rotation.map(f64::from),
            TransformField::ScaleX => self.scale_x.map(f64::from),
            TransformField::ScaleY => self.scale_y.map(f64::from),
            TransformField::SkewX => self.skew_x.map(f64::from),
            TransformField::SkewY => self.skew_y.map(f64::from),
            TransformField::CenterX => self.center_x.map(f64::from),
            TransformField::CenterY => self.center_y.map(f64::from),
        }
    }

    /// The fields that are present, in delta order.
    pub fn fields(&self) -> Vec<TransformField> {
        TransformField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }

    /// Mutable access to the fields stored in design units.
    pub fn design_unit_fields_mut(&mut self) -> [(TransformField, &mut Option<i16>); 4] {
        [
            (TransformField::TranslateX, &mut self.translate_x),
            (TransformField::TranslateY, &mut self.translate_y),
            (TransformField::CenterX, &mut self.center_x),
            (TransformField::CenterY, &mut self.center_y),
        ]
    }
}

impl Default for VarComponent {
    fn default() -> Self {
        VarComponent {
            reset_unspecified_axes: false,
            gid: GlyphId::new(0),
            condition_index: None,
            axis_values: None,
            axis_values_var_index: None,
            transform: DecomposedTransform::default(),
            transform_var_index: None,
        }
    }
}

impl VarComponent {
    /// The number of deltas per region in this component's transform delta set.
    pub fn transform_delta_len(&self) -> usize {
        self.transform.fields().len()
    }

    /// The number of deltas per region in this component's axis values delta set.
    pub fn axis_values_delta_len(&self) -> usize {
        self.axis_values.as_ref().map(BTreeMap::len).unwrap_or_default()
    }

    /// The present transform fields with their deltas applied at a location.
    ///
    /// Returns `None` if the delta set cannot be found or has the wrong width.
    pub fn transform_at(
        &self,
        store: Option<&MultiItemVariationStore>,
        coords: &[F2Dot14],
    ) -> Option<Vec<(TransformField, f64)>> {
        let fields = self.transform.fields();
        let deltas = match (self.transform_var_index, store) {
            (None, _) => vec![0.0; fields.len()],
            (Some(NO_VARIATION_INDEX), _) => vec![0.0; fields.len()],
            (Some(var_index), Some(store)) => {
                store.compute_tuple_deltas(var_index, coords, fields.len())?
            }
            (Some(_), None) => return None,
        };
        fields
            .into_iter()
            .zip(deltas)
            .map(|(field, delta)| {
                let value = self.transform.get(field)?;
                Some((field, value + delta * field.delta_unit()))
            })
            .collect()
    }
}

impl Varc {
    /// The variable composite for a glyph, if it is covered.
    pub fn glyph(&self, gid: GlyphId) -> Option<&VarCompositeGlyph> {
        let ix = self.coverage.binary_search(&gid).ok()?;
        self.glyphs.get(ix)
    }

    pub fn components(&self) -> impl Iterator<Item = &VarComponent> {
        self.glyphs.iter().flat_map(|glyph| glyph.components.iter())
    }

    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut VarComponent> {
        self.glyphs
            .iter_mut()
            .flat_map(|glyph| glyph.components.iter_mut())
    }
}

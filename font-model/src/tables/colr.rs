//! The [COLR (Color)](https://learn.microsoft.com/en-us/typography/opentype/spec/colr) table
//!
//! Paint graphs are modelled as trees; a paint referenced from several places
//! appears once per reference, and sharing is restored when encoding.
//!
//! Variable records carry `var_index_base: Some(_)` and are encoded in the
//! variable format of the same paint. Their fields vary with consecutive
//! variation indices, starting at the base, in field order.

use font_types::{F2Dot14, Fixed, GlyphId16};

use super::variations::{
    DeltaSetIndex, DeltaSetIndexMap, ItemVariationStore, NO_VARIATION_INDEX,
};

/// Color glyphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colr {
    pub base_glyph_records: Vec<BaseGlyph>,
    pub layer_records: Vec<Layer>,
    pub base_glyph_list: Vec<BaseGlyphPaint>,
    pub layer_list: Vec<Paint>,
    pub clip_list: Vec<Clip>,
    pub var_index_map: Option<DeltaSetIndexMap>,
    pub item_variation_store: Option<ItemVariationStore>,
}

/// A version 0 base glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseGlyph {
    pub glyph_id: GlyphId16,
    pub first_layer_index: u16,
    pub num_layers: u16,
}

/// A version 0 layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    pub glyph_id: GlyphId16,
    pub palette_index: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseGlyphPaint {
    pub glyph_id: GlyphId16,
    pub paint: Paint,
}

/// A clip box shared by a range of glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clip {
    pub start_glyph_id: GlyphId16,
    pub end_glyph_id: GlyphId16,
    pub clip_box: ClipBox,
}

/// Variable fields: `x_min`, `y_min`, `x_max`, `y_max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub var_index_base: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extend {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorLine {
    pub extend: Extend,
    pub color_stops: Vec<ColorStop>,
}

/// Variable fields: `stop_offset`, `alpha`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    pub stop_offset: F2Dot14,
    pub palette_index: u16,
    pub alpha: F2Dot14,
    pub var_index_base: Option<u32>,
}

/// Variable fields: `xx`, `yx`, `xy`, `yy`, `dx`, `dy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine2x3 {
    pub xx: Fixed,
    pub yx: Fixed,
    pub xy: Fixed,
    pub yy: Fixed,
    pub dx: Fixed,
    pub dy: Fixed,
    pub var_index_base: Option<u32>,
}

/// A [Paint](https://learn.microsoft.com/en-us/typography/opentype/spec/colr#paint-tables) table.
///
/// The variable fields of each paint are its non-paint fields, in the order
/// declared, excluding the color line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Paint {
    ColrLayers {
        num_layers: u8,
        first_layer_index: u32,
    },
    Solid {
        palette_index: u16,
        alpha: F2Dot14,
        var_index_base: Option<u32>,
    },
    LinearGradient {
        color_line: ColorLine,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        var_index_base: Option<u32>,
    },
    RadialGradient {
        color_line: ColorLine,
        x0: i16,
        y0: i16,
        radius0: u16,
        x1: i16,
        y1: i16,
        radius1: u16,
        var_index_base: Option<u32>,
    },
    SweepGradient {
        color_line: ColorLine,
        center_x: i16,
        center_y: i16,
        start_angle: F2Dot14,
        end_angle: F2Dot14,
        var_index_base: Option<u32>,
    },
    Glyph {
        paint: Box<Paint>,
        glyph_id: GlyphId16,
    },
    ColrGlyph {
        glyph_id: GlyphId16,
    },
    Transform {
        paint: Box<Paint>,
        transform: Affine2x3,
    },
    Translate {
        paint: Box<Paint>,
        dx: i16,
        dy: i16,
        var_index_base: Option<u32>,
    },
    Scale {
        paint: Box<Paint>,
        scale_x: F2Dot14,
        scale_y: F2Dot14,
        var_index_base: Option<u32>,
    },
    ScaleAroundCenter {
        paint: Box<Paint>,
        scale_x: F2Dot14,
        scale_y: F2Dot14,
        center_x: i16,
        center_y: i16,
        var_index_base: Option<u32>,
    },
    ScaleUniform {
        paint: Box<Paint>,
        scale: F2Dot14,
        var_index_base: Option<u32>,
    },
    ScaleUniformAroundCenter {
        paint: Box<Paint>,
        scale: F2Dot14,
        center_x: i16,
        center_y: i16,
        var_index_base: Option<u32>,
    },
    Rotate {
        paint: Box<Paint>,
        angle: F2Dot14,
        var_index_base: Option<u32>,
    },
    RotateAroundCenter {
        paint: Box<Paint>,
        angle: F2Dot14,
        center_x: i16,
        center_y: i16,
        var_index_base: Option<u32>,
    },
    Skew {
        paint: Box<Paint>,
        x_skew_angle: F2Dot14,
        y_skew_angle: F2Dot14,
        var_index_base: Option<u32>,
    },
    SkewAroundCenter {
        paint: Box<Paint>,
        x_skew_angle: F2Dot14,
        y_skew_angle: F2Dot14,
        center_x: i16,
        center_y: i16,
        var_index_base: Option<u32>,
    },
    Composite {
        source_paint: Box<Paint>,
        /// A CompositeMode value.
        composite_mode: u8,
        backdrop_paint: Box<Paint>,
    },
}

impl Paint {
    /// The format this paint is encoded with.
    pub fn format(&self) -> u8 {
        let (format, var_index_base) = match self {
            Paint::ColrLayers { .. } => (1, None),
            Paint::Solid { var_index_base, .. } => (2, *var_index_base),
            Paint::LinearGradient { var_index_base, .. } => (4, *var_index_base),
            Paint::RadialGradient { var_index_base, .. } => (6, *var_index_base),
            Paint::SweepGradient { var_index_base, .. } => (8, *var_index_base),
            Paint::Glyph { .. } => (10, None),
            Paint::ColrGlyph { .. } => (11, None),
            Paint::Transform { transform, .. } => (12, transform.var_index_base),
            Paint::Translate { var_index_base, .. } => (14, *var_index_base),
            Paint::Scale { var_index_base, .. } => (16, *var_index_base),
            Paint::ScaleAroundCenter { var_index_base, .. } => (18, *var_index_base),
            Paint::ScaleUniform { var_index_base, .. } => (20, *var_index_base),
            Paint::ScaleUniformAroundCenter { var_index_base, .. } => (22, *var_index_base),
            Paint::Rotate { var_index_base, .. } => (24, *var_index_base),
            Paint::RotateAroundCenter { var_index_base, .. } => (26, *var_index_base),
            Paint::Skew { var_index_base, .. } => (28, *var_index_base),
            Paint::SkewAroundCenter { var_index_base, .. } => (30, *var_index_base),
            Paint::Composite { .. } => (32, None),
        };
        format + var_index_base.is_some() as u8
    }

    /// The first variation index of this paint's own fields, if variable.
    pub fn var_index_base(&self) -> Option<u32> {
        match self {
            Paint::Solid { var_index_base, .. }
            | Paint::LinearGradient { var_index_base, .. }
            | Paint::RadialGradient { var_index_base, .. }
            | Paint::SweepGradient { var_index_base, .. }
            | Paint::Translate { var_index_base, .. }
            | Paint::Scale { var_index_base, .. }
            | Paint::ScaleAroundCenter { var_index_base, .. }
            | Paint::ScaleUniform { var_index_base, .. }
            | Paint::ScaleUniformAroundCenter { var_index_base, .. }
            | Paint::Rotate { var_index_base, .. }
            | Paint::RotateAroundCenter { var_index_base, .. }
            | Paint::Skew { var_index_base, .. }
            | Paint::SkewAroundCenter { var_index_base, .. } => *var_index_base,
            Paint::Transform { transform, .. } => transform.var_index_base,
            Paint::ColrLayers { .. }
            | Paint::Glyph { .. }
            | Paint::ColrGlyph { .. }
            | Paint::Composite { .. } => None,
        }
    }

    pub fn color_line(&self) -> Option<&ColorLine> {
        match self {
            Paint::LinearGradient { color_line, .. }
            | Paint::RadialGradient { color_line, .. }
            | Paint::SweepGradient { color_line, .. } => Some(color_line),
            _ => None,
        }
    }

    /// The paints this paint draws, in order.
    pub fn children(&self) -> Vec<&Paint> {
        match self {
            Paint::Glyph { paint, .. }
            | Paint::Transform { paint, .. }
            | Paint::Translate { paint, .. }
            | Paint::Scale { paint, .. }
            | Paint::ScaleAroundCenter { paint, .. }
            | Paint::ScaleUniform { paint, .. }
            | Paint::ScaleUniformAroundCenter { paint, .. }
            | Paint::Rotate { paint, .. }
            | Paint::RotateAroundCenter { paint, .. }
            | Paint::Skew { paint, .. }
            | Paint::SkewAroundCenter { paint, .. } => vec![paint.as_ref()],
            Paint::Composite {
                source_paint,
                backdrop_paint,
                ..
            } => vec![source_paint.as_ref(), backdrop_paint.as_ref()],
            Paint::ColrLayers { .. }
            | Paint::Solid { .. }
            | Paint::LinearGradient { .. }
            | Paint::RadialGradient { .. }
            | Paint::SweepGradient { .. }
            | Paint::ColrGlyph { .. } => Vec::new(),
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut Paint> {
        match self {
            Paint::Glyph { paint, .. }
            | Paint::Transform { paint, .. }
            | Paint::Translate { paint, .. }
            | Paint::Scale { paint, .. }
            | Paint::ScaleAroundCenter { paint, .. }
            | Paint::ScaleUniform { paint, .. }
            | Paint::ScaleUniformAroundCenter { paint, .. }
            | Paint::Rotate { paint, .. }
            | Paint::RotateAroundCenter { paint, .. }
            | Paint::Skew { paint, .. }
            | Paint::SkewAroundCenter { paint, .. } => vec![paint.as_mut()],
            Paint::Composite {
                source_paint,
                backdrop_paint,
                ..
            } => vec![source_paint.as_mut(), backdrop_paint.as_mut()],
            Paint::ColrLayers { .. }
            | Paint::Solid { .. }
            | Paint::LinearGradient { .. }
            | Paint::RadialGradient { .. }
            | Paint::SweepGradient { .. }
            | Paint::ColrGlyph { .. } => Vec::new(),
        }
    }

    /// Call `f` on this paint and every paint below it, parents first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Paint)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

impl Colr {
    /// Every paint in the base glyph list and the layer list, parents first.
    pub fn paints(&self) -> Vec<&Paint> {
        let mut paints = Vec::new();
        for paint in self
            .base_glyph_list
            .iter()
            .map(|record| &record.paint)
            .chain(self.layer_list.iter())
        {
            paint.visit(&mut |paint| paints.push(paint));
        }
        paints
    }

    /// The delta set a variation index refers to.
    ///
    /// Indices are mapped through the index map if there is one. Returns
    /// `None` for indices that do not vary.
    pub fn resolve_var_index(&self, var_index: u32) -> Option<DeltaSetIndex> {
        resolve_var_index(self.var_index_map.as_ref(), var_index)
    }

    /// The delta of field `field` of a record whose first variation index is
    /// `var_index_base`, at a location.
    pub fn field_delta(&self, var_index_base: u32, field: u32, coords: &[F2Dot14]) -> f64 {
        var_index_base
            .checked_add(field)
            .and_then(|var_index| self.resolve_var_index(var_index))
            .zip(self.item_variation_store.as_ref())
            .and_then(|(index, store)| store.compute_delta(index, coords))
            .unwrap_or_default()
    }
}

/// Map a variation index to a delta set, through `map` if present.
pub fn resolve_var_index(map: Option<&DeltaSetIndexMap>, var_index: u32) -> Option<DeltaSetIndex> {
    if var_index == NO_VARIATION_INDEX {
        return None;
    }
    let index = match map {
        Some(map) => map.get(var_index)?,
        None => DeltaSetIndex::from_u32(var_index),
    };
    (index != DeltaSetIndex::NO_VARIATION_INDEX).then_some(index)
}

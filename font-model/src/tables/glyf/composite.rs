//! Composite glyphs (containing other glyphs as components)

use font_types::{F2Dot14, GlyphId16};
use kurbo::Affine;

use super::Bbox;

/// A glyph consisting of multiple component sub-glyphs
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeGlyph {
    pub bbox: Bbox,
    components: Vec<Component>,
    pub instructions: Vec<u8>,
}

/// A single component glyph (part of a [`CompositeGlyph`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub glyph: GlyphId16,
    pub anchor: Anchor,
    pub flags: ComponentFlags,
    pub transform: Transform,
}

/// How a component is positioned relative to the glyph that uses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// An explicit offset, in design units.
    Offset { x: i16, y: i16 },
    /// Align point `component` of the component with point `base` of the
    /// glyph assembled so far.
    Point { base: u16, component: u16 },
}

/// Options that can be manually set for a given component.
///
/// For more information on these flags, see [Component Glyph Flags](flags-spec)
/// in the spec.
///
/// [flags-spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/glyf#compositeGlyphFlags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentFlags {
    /// Round xy values to the nearest grid line
    pub round_xy_to_grid: bool,
    /// Use the advance/lsb/rsb values of this component for the whole
    /// composite glyph
    pub use_my_metrics: bool,
    /// The composite should have this component's offset scaled
    pub scaled_component_offset: bool,
    /// The composite should *not* have this component's offset scaled
    pub unscaled_component_offset: bool,
    /// If set, the components of the composite glyph overlap.
    pub overlap_compound: bool,
}

/// The 2x2 linear part of a component's transform.
///
/// The values are unitless and are never touched by rescaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub xx: F2Dot14,
    pub yx: F2Dot14,
    pub xy: F2Dot14,
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            xx: F2Dot14::from_f32(1.0),
            yx: F2Dot14::from_f32(0.0),
            xy: F2Dot14::from_f32(0.0),
            yy: F2Dot14::from_f32(1.0),
        }
    }
}

impl Transform {
    /// A uniform scale.
    pub fn scale(scale: f32) -> Self {
        Transform {
            xx: F2Dot14::from_f32(scale),
            yy: F2Dot14::from_f32(scale),
            ..Default::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// This transform as an affine with no translation.
    pub fn to_affine(&self) -> Affine {
        Affine::new([
            self.xx.to_f32() as f64,
            self.yx.to_f32() as f64,
            self.xy.to_f32() as f64,
            self.yy.to_f32() as f64,
            0.0,
            0.0,
        ])
    }
}

impl Component {
    /// Create a new component.
    pub fn new(
        glyph: GlyphId16,
        anchor: Anchor,
        transform: Transform,
        flags: impl Into<ComponentFlags>,
    ) -> Self {
        Component {
            glyph,
            anchor,
            flags: flags.into(),
            transform,
        }
    }

    /// Whether an explicit offset is transformed along with the component.
    ///
    /// Offsets are unscaled unless only SCALED_COMPONENT_OFFSET is set.
    pub fn offset_is_scaled(&self) -> bool {
        self.flags.scaled_component_offset && !self.flags.unscaled_component_offset
    }
}

impl CompositeGlyph {
    /// Create a new composite glyph, with the provided component.
    ///
    /// The bounding box starts empty; it is derived from the components by
    /// [`Glyf::compute_bbox`](super::Glyf::compute_bbox).
    pub fn new(component: Component) -> Self {
        Self {
            bbox: Bbox::default(),
            components: vec![component],
            instructions: Default::default(),
        }
    }

    /// Add a new component to this glyph
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Construct a `CompositeGlyph` from an iterator of `Component`s.
    ///
    /// This returns an error if the iterator is empty; a CompositeGlyph must always
    /// contain at least one component.
    pub fn try_from_iter(source: impl IntoIterator<Item = Component>) -> Result<Self, NoComponents> {
        let components: Vec<_> = source.into_iter().collect();
        if components.is_empty() {
            Err(NoComponents)
        } else {
            Ok(CompositeGlyph {
                bbox: Bbox::default(),
                components,
                instructions: Default::default(),
            })
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }
}

/// An error that occurs if a `CompositeGlyph` is constructed with no components.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct NoComponents;

impl std::fmt::Display for NoComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A composite glyph must contain at least one component")
    }
}

impl std::error::Error for NoComponents {}

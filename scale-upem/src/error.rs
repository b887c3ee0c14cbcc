//! Errors reported while rescaling a font

use font_model::tables::glyf::GlyfError;
use font_types::{GlyphId, Tag};
use thiserror::Error;

use crate::ratio::OutOfRange;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("Invalid target units per em {0}")]
    InvalidTargetUpem(u16),

    #[error("Invalid units per em {0} in 'head' table")]
    InvalidCurrentUpem(u16),

    #[error("Missing required table '{0}'")]
    MissingTable(Tag),

    #[error("Glyph {glyph} refers to missing component {component}")]
    DanglingComponent { glyph: GlyphId, component: GlyphId },

    #[error("Glyph {0} is a component of itself")]
    CyclicComponent(GlyphId),

    #[error("Glyph {glyph} anchors component {component} to a missing point")]
    InvalidAnchorPoint { glyph: GlyphId, component: GlyphId },

    #[error("Malformed glyph data: {0}")]
    MalformedGlyph(GlyfError),

    #[error("Malformed variation data in '{tag}': {reason}")]
    MalformedVariations { tag: Tag, reason: String },

    #[error("Table '{0}' contains design units that cannot be scaled")]
    UnsupportedTable(Tag),

    #[error("Scaled value {value} does not fit in its field in '{tag}'")]
    ValueOutOfRange { tag: Tag, value: i64 },
}

impl ScaleError {
    pub(crate) fn malformed_variations(tag: Tag, reason: impl Into<String>) -> Self {
        ScaleError::MalformedVariations {
            tag,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(tag: Tag) -> impl Fn(OutOfRange) -> ScaleError {
        move |OutOfRange(value)| ScaleError::ValueOutOfRange { tag, value }
    }
}

impl From<GlyfError> for ScaleError {
    fn from(src: GlyfError) -> ScaleError {
        match src {
            GlyfError::MissingGlyph { glyph, component } => ScaleError::DanglingComponent {
                glyph: glyph.into(),
                component: component.into(),
            },
            GlyfError::CyclicComponent(gid) => ScaleError::CyclicComponent(gid.into()),
            GlyfError::InvalidAnchorPoint {
                glyph, component, ..
            } => ScaleError::InvalidAnchorPoint {
                glyph: glyph.into(),
                component: component.into(),
            },
            GlyfError::BoundsOutOfRange { value, .. } => ScaleError::ValueOutOfRange {
                tag: Tag::new(b"glyf"),
                value,
            },
            other => ScaleError::MalformedGlyph(other),
        }
    }
}

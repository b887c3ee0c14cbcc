//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use font_types::GlyphId16;
use kurbo::{Point, Rect};

mod composite;
mod simple;

pub use composite::{Anchor, Component, ComponentFlags, CompositeGlyph, NoComponents, Transform};
pub use simple::{Contour, CurvePoint, SimpleGlyph};

/// The maximum depth of nested components that will be resolved.
pub const MAX_COMPONENT_DEPTH: usize = 64;

/// A bounding box, in design units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bbox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Bbox {
    pub fn union(self, other: Bbox) -> Bbox {
        Bbox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

impl TryFrom<Rect> for Bbox {
    /// The first rounded coordinate that does not fit in an `i16`.
    type Error = i64;

    fn try_from(value: Rect) -> Result<Self, Self::Error> {
        Ok(Bbox {
            x_min: ot_round(value.min_x())?,
            y_min: ot_round(value.min_y())?,
            x_max: ot_round(value.max_x())?,
            y_max: ot_round(value.max_y())?,
        })
    }
}

// <https://github.com/fonttools/fonttools/issues/1248#issuecomment-383198166>
fn ot_round(val: f64) -> Result<i16, i64> {
    let rounded = (val + 0.5).floor() as i64;
    i16::try_from(rounded).map_err(|_| rounded)
}

/// A single glyph in the glyf table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Glyph {
    /// A glyph with no outline.
    #[default]
    Empty,
    Simple(SimpleGlyph),
    Composite(CompositeGlyph),
}

impl Glyph {
    /// The stored bounding box, or `None` for an empty glyph.
    pub fn bbox(&self) -> Option<Bbox> {
        match self {
            Glyph::Empty => None,
            Glyph::Simple(glyph) => Some(glyph.bbox),
            Glyph::Composite(glyph) => Some(glyph.bbox),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Glyph::Empty)
    }
}

impl From<SimpleGlyph> for Glyph {
    fn from(src: SimpleGlyph) -> Self {
        Glyph::Simple(src)
    }
}

impl From<CompositeGlyph> for Glyph {
    fn from(src: CompositeGlyph) -> Self {
        Glyph::Composite(src)
    }
}

/// The glyf table: every glyph in the font, indexed by glyph id.
///
/// Composite glyphs refer to other entries by id, so the table is an arena;
/// the `loca` offsets are derived from it when encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyf {
    pub glyphs: Vec<Glyph>,
}

/// An error encountered while resolving the components of a glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GlyfError {
    /// The requested glyph id is past the end of the table.
    NotFound(GlyphId16),
    /// A composite refers to a glyph that does not exist.
    MissingGlyph {
        glyph: GlyphId16,
        component: GlyphId16,
    },
    /// A composite (indirectly) contains itself.
    CyclicComponent(GlyphId16),
    /// Components are nested deeper than [`MAX_COMPONENT_DEPTH`].
    NestingTooDeep(GlyphId16),
    /// The resolved bounds of a glyph do not fit in an `i16`.
    BoundsOutOfRange { glyph: GlyphId16, value: i64 },
    /// A point-matching anchor refers to a point that does not exist.
    InvalidAnchorPoint {
        glyph: GlyphId16,
        component: GlyphId16,
        base: u16,
        point: u16,
    },
}

impl std::fmt::Display for GlyfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyfError::NotFound(gid) => write!(f, "glyph {gid} not found"),
            GlyfError::MissingGlyph { glyph, component } => {
                write!(f, "glyph {glyph} refers to missing component {component}")
            }
            GlyfError::CyclicComponent(gid) => {
                write!(f, "glyph {gid} is a component of itself")
            }
            GlyfError::NestingTooDeep(gid) => write!(
                f,
                "components of glyph {gid} nested deeper than {MAX_COMPONENT_DEPTH}"
            ),
            GlyfError::BoundsOutOfRange { glyph, value } => {
                write!(f, "bounds of glyph {glyph} reach {value}")
            }
            GlyfError::InvalidAnchorPoint {
                glyph,
                component,
                base,
                point,
            } => write!(
                f,
                "glyph {glyph} anchors component {component} with invalid points ({base}, {point})"
            ),
        }
    }
}

impl std::error::Error for GlyfError {}

impl Glyf {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Glyf { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, gid: GlyphId16) -> Option<&Glyph> {
        self.glyphs.get(gid.to_u16() as usize)
    }

    pub fn get_mut(&mut self, gid: GlyphId16) -> Option<&mut Glyph> {
        self.glyphs.get_mut(gid.to_u16() as usize)
    }

    /// The number of points the glyph contributes to `gvar`, excluding the
    /// four phantom points.
    ///
    /// Simple glyphs have one point per outline point; composites have one
    /// per component.
    pub fn point_count(&self, gid: GlyphId16) -> Option<usize> {
        self.get(gid).map(|glyph| match glyph {
            Glyph::Empty => 0,
            Glyph::Simple(simple) => simple.num_points(),
            Glyph::Composite(composite) => composite.components().len(),
        })
    }

    /// The outline points of a glyph, with all components resolved.
    pub fn glyph_points(&self, gid: GlyphId16) -> Result<Vec<Point>, GlyfError> {
        if self.get(gid).is_none() {
            return Err(GlyfError::NotFound(gid));
        }
        let mut stack = Vec::new();
        self.resolve_points(gid, &mut stack)
    }

    /// The control-point bounds of a glyph, with all components resolved.
    ///
    /// Returns `None` for a glyph without points.
    pub fn compute_bbox(&self, gid: GlyphId16) -> Result<Option<Bbox>, GlyfError> {
        let points = self.glyph_points(gid)?;
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Ok(None);
        };
        let rect = points.fold(Rect::from_points(first, first), |rect, point| {
            rect.union_pt(point)
        });
        Bbox::try_from(rect)
            .map(Some)
            .map_err(|value| GlyfError::BoundsOutOfRange { glyph: gid, value })
    }

    /// Check that every component reference resolves, without cycles.
    pub fn check_components(&self) -> Result<(), GlyfError> {
        (0..self.glyphs.len())
            .map(|ix| GlyphId16::new(ix as u16))
            .filter(|gid| matches!(self.get(*gid), Some(Glyph::Composite(_))))
            .try_for_each(|gid| self.glyph_points(gid).map(|_| ()))
    }

    fn resolve_points(
        &self,
        gid: GlyphId16,
        stack: &mut Vec<GlyphId16>,
    ) -> Result<Vec<Point>, GlyfError> {
        if stack.contains(&gid) {
            return Err(GlyfError::CyclicComponent(gid));
        }
        if stack.len() >= MAX_COMPONENT_DEPTH {
            return Err(GlyfError::NestingTooDeep(gid));
        }
        let composite = match self.get(gid) {
            None | Some(Glyph::Empty) => return Ok(Vec::new()),
            Some(Glyph::Simple(simple)) => {
                return Ok(simple
                    .points()
                    .map(|p| Point::new(p.x as f64, p.y as f64))
                    .collect())
            }
            Some(Glyph::Composite(composite)) => composite,
        };

        stack.push(gid);
        let mut points: Vec<Point> = Vec::new();
        for component in composite.components() {
            if self.get(component.glyph).is_none() {
                return Err(GlyfError::MissingGlyph {
                    glyph: gid,
                    component: component.glyph,
                });
            }
            let matrix = component.transform.to_affine();
            let child = self.resolve_points(component.glyph, stack)?;
            let child: Vec<Point> = child.into_iter().map(|p| matrix * p).collect();
            let offset = match component.anchor {
                Anchor::Offset { x, y } => {
                    let offset = Point::new(x as f64, y as f64);
                    if component.offset_is_scaled() {
                        (matrix * offset).to_vec2()
                    } else {
                        offset.to_vec2()
                    }
                }
                Anchor::Point {
                    base,
                    component: point,
                } => {
                    let (Some(base_pt), Some(comp_pt)) =
                        (points.get(base as usize), child.get(point as usize))
                    else {
                        return Err(GlyfError::InvalidAnchorPoint {
                            glyph: gid,
                            component: component.glyph,
                            base,
                            point,
                        });
                    };
                    *base_pt - *comp_pt
                }
            };
            points.extend(child.into_iter().map(|p| p + offset));
        }
        stack.pop();
        Ok(points)
    }
}

//! Simple glyphs (glyphs which do not contain components)

use super::Bbox;

/// A point in a glyph outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub x: i16,
    pub y: i16,
    /// `true` for points on the curve, `false` for quadratic control points.
    pub on_curve: bool,
}

impl CurvePoint {
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        CurvePoint { x, y, on_curve }
    }

    pub fn on_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, true)
    }

    pub fn off_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, false)
    }
}

/// A simple (without components) glyph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleGlyph {
    pub bbox: Bbox,
    pub contours: Vec<Contour>,
    pub instructions: Vec<u8>,
    /// The OVERLAP_SIMPLE flag on the first point.
    pub overlap_simple: bool,
}

/// A single contour, comprising only line and quadratic bezier segments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour(Vec<CurvePoint>);

impl SimpleGlyph {
    /// Create a glyph from its contours, computing the bounding box.
    pub fn new(contours: Vec<Contour>) -> Self {
        let mut glyph = SimpleGlyph {
            contours,
            ..Default::default()
        };
        glyph.recompute_bounding_box();
        glyph
    }

    /// The total number of points in all contours.
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &CurvePoint> {
        self.contours.iter().flat_map(Contour::iter)
    }

    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut CurvePoint> {
        self.contours.iter_mut().flat_map(Contour::iter_mut)
    }

    /// Recompute the Glyph's bounding box based on the current contours
    pub fn recompute_bounding_box(&mut self) {
        self.bbox = self.bounds();
    }

    fn bounds(&self) -> Bbox {
        let mut points = self.points().map(|p| (p.x, p.y));
        match points.next() {
            Some((mut x_min, mut y_min)) => {
                let mut x_max = x_min;
                let mut y_max = y_min;
                for (x, y) in points {
                    x_min = x_min.min(x);
                    y_min = y_min.min(y);
                    x_max = x_max.max(x);
                    y_max = y_max.max(y);
                }
                Bbox {
                    x_min,
                    y_min,
                    x_max,
                    y_max,
                }
            }
            None => Bbox::default(),
        }
    }
}

impl Contour {
    /// The total number of points in this contour
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurvePoint> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CurvePoint> {
        self.0.iter_mut()
    }
}

impl From<Vec<CurvePoint>> for Contour {
    fn from(src: Vec<CurvePoint>) -> Self {
        Contour(src)
    }
}

impl From<Contour> for Vec<CurvePoint> {
    fn from(src: Contour) -> Vec<CurvePoint> {
        src.0
    }
}

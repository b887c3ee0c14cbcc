//! Scale TrueType outlines
//!
//! Points and explicit component offsets are scaled; component transforms,
//! point-matching anchors and instructions are left alone. Composite bounds
//! depend on their components, so they are recomputed once every outline
//! has been scaled.

use font_model::{
    tables::glyf::{Anchor, CurvePoint, Glyf, Glyph},
    TopLevelTable,
};
use font_types::{GlyphId16, Point};

use crate::{
    ratio::{OutOfRange, Scale, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for CurvePoint {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        let scaled = Point::new(self.x, self.y).scale(ratio)?;
        self.x = scaled.x;
        self.y = scaled.y;
        Ok(())
    }
}

impl ScaleInPlace for Anchor {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            Anchor::Offset { x, y } => {
                x.scale_in_place(ratio)?;
                y.scale_in_place(ratio)
            }
            // point indices
            Anchor::Point { .. } => Ok(()),
        }
    }
}

impl ScaleUpem for Glyf {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for glyph in self.glyphs.iter_mut() {
            match glyph {
                Glyph::Empty => (),
                Glyph::Simple(simple) => {
                    for point in simple.points_mut() {
                        ratio.apply(point, Glyf::TAG)?;
                    }
                    simple.recompute_bounding_box();
                }
                Glyph::Composite(composite) => {
                    for component in composite.components_mut() {
                        ratio.apply(&mut component.anchor, Glyf::TAG)?;
                    }
                }
            }
        }
        recompute_composite_bounds(self)
    }
}

fn recompute_composite_bounds(glyf: &mut Glyf) -> Result<(), ScaleError> {
    let mut bounds = Vec::new();
    for (ix, glyph) in glyf.glyphs.iter().enumerate() {
        if let Glyph::Composite(_) = glyph {
            let bbox = glyf.compute_bbox(GlyphId16::new(ix as u16))?;
            bounds.push((ix, bbox.unwrap_or_default()));
        }
    }
    for (ix, bbox) in bounds {
        if let Some(Glyph::Composite(composite)) = glyf.glyphs.get_mut(ix) {
            composite.bbox = bbox;
        }
    }
    Ok(())
}

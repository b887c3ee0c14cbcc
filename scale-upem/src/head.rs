//! Scale the font header

use font_model::{
    tables::{
        glyf::{Bbox, Glyf, Glyph},
        head::Head,
    },
    TopLevelTable,
};
use font_types::GlyphId16;

use crate::{ScaleError, ScaleUpem, UpemRatio};

impl ScaleUpem for Head {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        for value in [
            &mut self.x_min,
            &mut self.y_min,
            &mut self.x_max,
            &mut self.y_max,
        ] {
            ratio.apply(value, Head::TAG)?;
        }
        self.units_per_em = ratio.to_upem();
        Ok(())
    }
}

/// The union of all glyph bounding boxes, or `None` if no glyph has an outline.
pub(crate) fn glyph_bounds(glyf: &Glyf) -> Option<Bbox> {
    glyf.glyphs
        .iter()
        .enumerate()
        .filter(|(ix, glyph)| match glyph {
            Glyph::Empty => false,
            Glyph::Simple(simple) => simple.num_points() > 0,
            Glyph::Composite(_) => glyf
                .glyph_points(GlyphId16::new(*ix as u16))
                .is_ok_and(|points| !points.is_empty()),
        })
        .filter_map(|(_, glyph)| glyph.bbox())
        .reduce(|acc, bbox| acc.union(bbox))
}

pub(crate) fn set_bounds(head: &mut Head, bbox: Bbox) {
    head.x_min = bbox.x_min;
    head.y_min = bbox.y_min;
    head.x_max = bbox.x_max;
    head.y_max = bbox.y_max;
}

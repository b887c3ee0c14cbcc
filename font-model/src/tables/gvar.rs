//! The [gvar](https://learn.microsoft.com/en-us/typography/opentype/spec/gvar) table

use font_types::{F2Dot14, GlyphId16};

use super::variations::{axis_scalar, Tuple};

/// The number of phantom points appended to every glyph's point list.
pub const NUM_PHANTOM_POINTS: usize = 4;

/// Glyph variations.
///
/// One entry per glyph id, which may have no variations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gvar {
    pub axis_count: u16,
    pub glyph_variations: Vec<GlyphVariations>,
}

/// Variation data for a single glyph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphVariations {
    pub variations: Vec<GlyphDeltas>,
}

/// Glyph deltas for one point in the design space.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphDeltas {
    pub peak_tuple: Tuple,
    /// Start and end tuples of an optional intermediate region.
    pub intermediate_region: Option<(Tuple, Tuple)>,
    /// (x, y) deltas, or `None` where the delta is inferred.
    ///
    /// One entry per point in the glyph, including phantom points.
    pub deltas: Vec<Option<(i16, i16)>>,
}

impl Gvar {
    pub fn new(axis_count: u16, glyph_variations: Vec<GlyphVariations>) -> Self {
        Gvar {
            axis_count,
            glyph_variations,
        }
    }

    pub fn get(&self, gid: GlyphId16) -> Option<&GlyphVariations> {
        self.glyph_variations.get(gid.to_u16() as usize)
    }
}

impl GlyphVariations {
    pub fn new(variations: Vec<GlyphDeltas>) -> Self {
        GlyphVariations { variations }
    }

    /// The axis count of the first variation, if any.
    pub fn axis_count(&self) -> Option<u16> {
        self.variations
            .first()
            .map(|var| var.peak_tuple.len() as u16)
    }

    /// Sum the explicit deltas of every variation at a location.
    ///
    /// Inferred deltas contribute nothing; a caller that needs them must run
    /// interpolation of untouched points first.
    pub fn explicit_deltas_at(&self, coords: &[F2Dot14], num_points: usize) -> Vec<(f64, f64)> {
        let mut result = vec![(0.0, 0.0); num_points];
        for var in &self.variations {
            let scalar = var.compute_scalar(coords);
            if scalar == 0.0 {
                continue;
            }
            for (out, delta) in result.iter_mut().zip(&var.deltas) {
                if let Some((x, y)) = delta {
                    out.0 += scalar * *x as f64;
                    out.1 += scalar * *y as f64;
                }
            }
        }
        result
    }
}

impl GlyphDeltas {
    pub fn new(
        peak_tuple: Tuple,
        deltas: Vec<Option<(i16, i16)>>,
        intermediate_region: Option<(Tuple, Tuple)>,
    ) -> Self {
        GlyphDeltas {
            peak_tuple,
            intermediate_region,
            deltas,
        }
    }

    /// The start, peak and end of this variation's region on one axis.
    pub fn axis_region(&self, axis: usize) -> Option<(F2Dot14, F2Dot14, F2Dot14)> {
        let peak = *self.peak_tuple.values.get(axis)?;
        match &self.intermediate_region {
            Some((start, end)) => Some((*start.values.get(axis)?, peak, *end.values.get(axis)?)),
            None if peak.to_f32() < 0.0 => Some((peak, peak, F2Dot14::from_f32(0.0))),
            None => Some((F2Dot14::from_f32(0.0), peak, peak)),
        }
    }

    /// The scalar for this variation at the given normalized location.
    pub fn compute_scalar(&self, coords: &[F2Dot14]) -> f64 {
        let mut scalar = 1.0;
        for axis in 0..self.peak_tuple.len() {
            let Some((start, peak, end)) = self.axis_region(axis) else {
                return 0.0;
            };
            let coord = coords.get(axis).map(|c| c.to_f32() as f64).unwrap_or(0.0);
            match axis_scalar(
                start.to_f32() as f64,
                peak.to_f32() as f64,
                end.to_f32() as f64,
                coord,
            ) {
                Some(axis_scalar) => scalar *= axis_scalar,
                None => return 0.0,
            }
        }
        scalar
    }
}

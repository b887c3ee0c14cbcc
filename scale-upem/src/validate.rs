//! Integrity checks run before any table is modified
//!
//! Scaling walks component graphs and delta sets; anything that would make
//! that walk ambiguous is reported here, so that a failure leaves the font
//! untouched.

use font_model::{
    tables::{
        base::Base,
        colr::Colr,
        gdef::Gdef,
        glyf::Glyf,
        gvar::{Gvar, NUM_PHANTOM_POINTS},
        hvar::Hvar,
        mvar::Mvar,
        varc::Varc,
        variations::{
            DeltaSetIndex, ItemVariationStore, MultiItemVariationStore, NO_VARIATION_INDEX,
        },
        vvar::Vvar,
    },
    Font, TopLevelTable,
};
use font_types::{F2Dot14, GlyphId16, Tag};

use crate::{colr::var_blocks, ScaleError};

/// Check every modelled table the scalers rely on.
pub(crate) fn validate_font(font: &Font) -> Result<(), ScaleError> {
    let glyf = font.table::<Glyf>();
    if let Some(glyf) = glyf {
        glyf.check_components()?;
    }
    let mut axis_counts = AxisCounts::default();

    if let Some(gvar) = font.table::<Gvar>() {
        validate_gvar(gvar, glyf)?;
        axis_counts.add(Gvar::TAG, gvar.axis_count)?;
    }
    let stores = [
        (Hvar::TAG, font.table::<Hvar>().map(|t| &t.item_variation_store)),
        (Vvar::TAG, font.table::<Vvar>().map(|t| &t.item_variation_store)),
        (Mvar::TAG, font.table::<Mvar>().and_then(|t| t.item_variation_store.as_ref())),
        (Gdef::TAG, font.table::<Gdef>().and_then(|t| t.item_var_store.as_ref())),
        (Base::TAG, font.table::<Base>().and_then(|t| t.item_var_store.as_ref())),
        (Colr::TAG, font.table::<Colr>().and_then(|t| t.item_variation_store.as_ref())),
    ];
    for (tag, store) in stores {
        if let Some(store) = store {
            validate_item_variation_store(tag, store)?;
            axis_counts.add(tag, store.variation_region_list.axis_count)?;
        }
    }
    if let Some(varc) = font.table::<Varc>() {
        validate_varc(varc, glyf)?;
    }
    if let Some(colr) = font.table::<Colr>() {
        validate_colr(colr)?;
    }
    Ok(())
}

/// Every variation table in a font must agree on the number of axes.
#[derive(Default)]
struct AxisCounts {
    first: Option<(Tag, u16)>,
}

impl AxisCounts {
    fn add(&mut self, tag: Tag, axis_count: u16) -> Result<(), ScaleError> {
        match self.first {
            None => {
                self.first = Some((tag, axis_count));
                Ok(())
            }
            Some((_, expected)) if expected == axis_count => Ok(()),
            Some((other, expected)) => Err(ScaleError::malformed_variations(
                tag,
                format!("{axis_count} axes, but '{other}' has {expected}"),
            )),
        }
    }
}

fn check_region(start: F2Dot14, peak: F2Dot14, end: F2Dot14) -> Result<(), String> {
    let (start, peak, end) = (start.to_f32(), peak.to_f32(), end.to_f32());
    if [start, peak, end].iter().any(|v| !(-1.0..=1.0).contains(v)) {
        return Err(format!("region ({start}, {peak}, {end}) outside [-1, 1]"));
    }
    if start > peak || peak > end {
        return Err(format!("region ({start}, {peak}, {end}) is not ordered"));
    }
    Ok(())
}

fn validate_gvar(gvar: &Gvar, glyf: Option<&Glyf>) -> Result<(), ScaleError> {
    let malformed = |reason: String| ScaleError::malformed_variations(Gvar::TAG, reason);
    if let Some(glyf) = glyf {
        if gvar.glyph_variations.len() > glyf.len() {
            return Err(malformed(format!(
                "variations for {} glyphs, but 'glyf' has {}",
                gvar.glyph_variations.len(),
                glyf.len()
            )));
        }
    }

    let axis_count = gvar.axis_count as usize;
    for (ix, glyph) in gvar.glyph_variations.iter().enumerate() {
        let gid = GlyphId16::new(ix as u16);
        let point_count = glyf
            .and_then(|glyf| glyf.point_count(gid))
            .map(|count| count + NUM_PHANTOM_POINTS);

        for var in &glyph.variations {
            if var.peak_tuple.len() != axis_count {
                return Err(malformed(format!(
                    "glyph {gid} has a tuple with {} axes, expected {axis_count}",
                    var.peak_tuple.len()
                )));
            }
            if let Some((start, end)) = &var.intermediate_region {
                if start.len() != axis_count || end.len() != axis_count {
                    return Err(malformed(format!(
                        "glyph {gid} has an intermediate region with the wrong axis count"
                    )));
                }
            }
            for axis in 0..axis_count {
                if let Some((start, peak, end)) = var.axis_region(axis) {
                    check_region(start, peak, end)
                        .map_err(|reason| malformed(format!("glyph {gid}: {reason}")))?;
                }
            }
            if let Some(expected) = point_count {
                if var.deltas.len() != expected {
                    return Err(malformed(format!(
                        "glyph {gid} has {} deltas for {expected} points",
                        var.deltas.len()
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_item_variation_store(tag: Tag, store: &ItemVariationStore) -> Result<(), ScaleError> {
    let malformed = |reason: String| ScaleError::malformed_variations(tag, reason);
    let region_list = &store.variation_region_list;
    let axis_count = region_list.axis_count as usize;

    for (ix, region) in region_list.variation_regions.iter().enumerate() {
        if region.region_axes.len() != axis_count {
            return Err(malformed(format!(
                "region {ix} has {} axes, expected {axis_count}",
                region.region_axes.len()
            )));
        }
        for axis in &region.region_axes {
            check_region(axis.start_coord, axis.peak_coord, axis.end_coord)
                .map_err(|reason| malformed(format!("region {ix}: {reason}")))?;
        }
    }

    let region_count = region_list.variation_regions.len();
    for (outer, data) in store.item_variation_data.iter().enumerate() {
        if let Some(bad) = data
            .region_indexes
            .iter()
            .find(|ix| **ix as usize >= region_count)
        {
            return Err(malformed(format!(
                "subtable {outer} refers to region {bad}, but there are {region_count}"
            )));
        }
        let width = data.region_indexes.len();
        if let Some((inner, row)) = data
            .delta_sets
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(malformed(format!(
                "delta set {outer}/{inner} has {} deltas for {width} regions",
                row.len()
            )));
        }
    }
    Ok(())
}

fn validate_multi_item_variation_store(
    tag: Tag,
    store: &MultiItemVariationStore,
) -> Result<(), ScaleError> {
    let malformed = |reason: String| ScaleError::malformed_variations(tag, reason);
    for (ix, region) in store.regions.iter().enumerate() {
        for axis in &region.region_axes {
            check_region(axis.start, axis.peak, axis.end)
                .map_err(|reason| malformed(format!("region {ix}: {reason}")))?;
        }
    }
    let region_count = store.regions.len();
    for (outer, data) in store.variation_data.iter().enumerate() {
        if let Some(bad) = data
            .region_indices
            .iter()
            .find(|ix| **ix as usize >= region_count)
        {
            return Err(malformed(format!(
                "subtable {outer} refers to region {bad}, but there are {region_count}"
            )));
        }
    }
    Ok(())
}

fn validate_varc(varc: &Varc, glyf: Option<&Glyf>) -> Result<(), ScaleError> {
    let malformed = |reason: String| ScaleError::malformed_variations(Varc::TAG, reason);
    if varc.coverage.len() != varc.glyphs.len() {
        return Err(malformed(format!(
            "{} covered glyphs but {} composites",
            varc.coverage.len(),
            varc.glyphs.len()
        )));
    }
    if let Some(store) = &varc.multi_var_store {
        validate_multi_item_variation_store(Varc::TAG, store)?;
    }

    // a delta set must have one column per value, for each of its regions
    let check_delta_set = |var_index: Option<u32>, values: usize| -> Result<(), ScaleError> {
        let Some(var_index) = var_index.filter(|ix| *ix != NO_VARIATION_INDEX) else {
            return Ok(());
        };
        let index = DeltaSetIndex::from_u32(var_index);
        let data = varc
            .multi_var_store
            .as_ref()
            .and_then(|store| store.variation_data.get(index.outer as usize));
        let Some((data, row)) =
            data.and_then(|data| Some((data, data.delta_sets.get(index.inner as usize)?)))
        else {
            return Err(malformed(format!("no delta set {var_index}")));
        };
        let expected = data.region_indices.len() * values;
        if row.len() != expected {
            return Err(malformed(format!(
                "delta set {var_index} has {} deltas, expected {expected}",
                row.len()
            )));
        }
        Ok(())
    };

    for (glyph, composite) in varc.coverage.iter().zip(&varc.glyphs) {
        for component in &composite.components {
            if let Some(glyf) = glyf {
                if component.gid.to_u32() as usize >= glyf.len() {
                    return Err(ScaleError::DanglingComponent {
                        glyph: *glyph,
                        component: component.gid,
                    });
                }
            }
            check_delta_set(
                component.transform_var_index,
                component.transform_delta_len(),
            )?;
            check_delta_set(
                component.axis_values_var_index,
                component.axis_values_delta_len(),
            )?;
        }
    }
    Ok(())
}

/// Every field of a variable paint or clip box must read an existing delta set.
fn validate_colr(colr: &Colr) -> Result<(), ScaleError> {
    let malformed = |reason: String| ScaleError::malformed_variations(Colr::TAG, reason);
    for (base, len) in var_blocks(colr) {
        for field in 0..len as u32 {
            let Some(var_index) = base.checked_add(field) else {
                return Err(malformed(format!("variation index {base} + {field} overflows")));
            };
            let Some(index) = colr.resolve_var_index(var_index) else {
                continue;
            };
            let exists = colr
                .item_variation_store
                .as_ref()
                .and_then(|store| store.item_variation_data.get(index.outer as usize))
                .is_some_and(|data| (index.inner as usize) < data.delta_sets.len());
            if !exists {
                return Err(malformed(format!(
                    "variation index {var_index} reads missing delta set {index:?}"
                )));
            }
        }
    }
    Ok(())
}

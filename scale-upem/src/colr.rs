//! Scale color glyph geometry
//!
//! Gradient geometry, transform centres, translations and clip boxes are in
//! design units. Colors, alphas, stop offsets, angles, scale factors and the
//! 2x2 part of an affine transform are not.
//!
//! Each variable field reads the delta set at its own variation index, and a
//! delta set is scaled if the first field to read it is in design units.
//! A variable record that needs a delta set already claimed in other units
//! is moved to fresh variation indices: new index map entries when the table
//! has a map, or copied rows appended to the subtable otherwise. Delta sets
//! no field reads are left alone.

use std::collections::HashMap;

use font_model::{
    tables::{
        colr::{resolve_var_index, ClipBox, ColorLine, Colr, Paint},
        variations::{DeltaSetIndex, DeltaSetIndexMap, ItemVariationStore, NO_VARIATION_INDEX},
    },
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    variations::copy_delta_set,
    ScaleError, ScaleUpem, UpemRatio,
};

/// For each variable field of a record, whether it is in design units.
type FieldMask = &'static [bool];

const COLOR_STOP: FieldMask = &[false, false];
const CLIP_BOX: FieldMask = &[true; 4];

fn paint_mask(paint: &Paint) -> FieldMask {
    match paint {
        Paint::Solid { .. } | Paint::ScaleUniform { .. } | Paint::Rotate { .. } => &[false],
        Paint::LinearGradient { .. } | Paint::RadialGradient { .. } => &[true; 6],
        Paint::SweepGradient { .. } => &[true, true, false, false],
        Paint::Transform { .. } => &[false, false, false, false, true, true],
        Paint::Translate { .. } => &[true, true],
        Paint::Scale { .. } | Paint::Skew { .. } => &[false, false],
        Paint::ScaleAroundCenter { .. } | Paint::SkewAroundCenter { .. } => {
            &[false, false, true, true]
        }
        Paint::ScaleUniformAroundCenter { .. } | Paint::RotateAroundCenter { .. } => {
            &[false, true, true]
        }
        Paint::ColrLayers { .. }
        | Paint::Glyph { .. }
        | Paint::ColrGlyph { .. }
        | Paint::Composite { .. } => &[],
    }
}

fn var_index_base_mut(paint: &mut Paint) -> Option<&mut Option<u32>> {
    match paint {
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
        | Paint::SkewAroundCenter { var_index_base, .. } => Some(var_index_base),
        Paint::Transform { transform, .. } => Some(&mut transform.var_index_base),
        Paint::ColrLayers { .. }
        | Paint::Glyph { .. }
        | Paint::ColrGlyph { .. }
        | Paint::Composite { .. } => None,
    }
}

fn color_line_mut(paint: &mut Paint) -> Option<&mut ColorLine> {
    match paint {
        Paint::LinearGradient { color_line, .. }
        | Paint::RadialGradient { color_line, .. }
        | Paint::SweepGradient { color_line, .. } => Some(color_line),
        _ => None,
    }
}

/// The first variation index and field count of every variable record.
pub(crate) fn var_blocks(colr: &Colr) -> Vec<(u32, usize)> {
    let mut blocks = Vec::new();
    for paint in colr.paints() {
        if let Some(base) = paint.var_index_base() {
            blocks.push((base, paint_mask(paint).len()));
        }
        let stops = paint.color_line().map(|line| line.color_stops.as_slice());
        for stop in stops.unwrap_or_default() {
            if let Some(base) = stop.var_index_base {
                blocks.push((base, COLOR_STOP.len()));
            }
        }
    }
    for clip in &colr.clip_list {
        if let Some(base) = clip.clip_box.var_index_base {
            blocks.push((base, CLIP_BOX.len()));
        }
    }
    blocks.retain(|(base, _)| *base != NO_VARIATION_INDEX);
    blocks
}

impl ScaleInPlace for Paint {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            Paint::LinearGradient {
                x0,
                y0,
                x1,
                y1,
                x2,
                y2,
                ..
            } => [x0, y0, x1, y1, x2, y2]
                .into_iter()
                .try_for_each(|value| value.scale_in_place(ratio))?,
            Paint::RadialGradient {
                x0,
                y0,
                radius0,
                x1,
                y1,
                radius1,
                ..
            } => {
                [x0, y0, x1, y1]
                    .into_iter()
                    .try_for_each(|value| value.scale_in_place(ratio))?;
                radius0.scale_in_place(ratio)?;
                radius1.scale_in_place(ratio)?;
            }
            Paint::SweepGradient {
                center_x, center_y, ..
            }
            | Paint::ScaleAroundCenter {
                center_x, center_y, ..
            }
            | Paint::ScaleUniformAroundCenter {
                center_x, center_y, ..
            }
            | Paint::RotateAroundCenter {
                center_x, center_y, ..
            }
            | Paint::SkewAroundCenter {
                center_x, center_y, ..
            } => {
                center_x.scale_in_place(ratio)?;
                center_y.scale_in_place(ratio)?;
            }
            Paint::Translate { dx, dy, .. } => {
                dx.scale_in_place(ratio)?;
                dy.scale_in_place(ratio)?;
            }
            Paint::Transform { transform, .. } => {
                transform.dx.scale_in_place(ratio)?;
                transform.dy.scale_in_place(ratio)?;
            }
            _ => (),
        }
        self.children_mut()
            .into_iter()
            .try_for_each(|child| child.scale_in_place(ratio))
    }
}

impl ScaleInPlace for ClipBox {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        [
            &mut self.x_min,
            &mut self.y_min,
            &mut self.x_max,
            &mut self.y_max,
        ]
        .into_iter()
        .try_for_each(|value| value.scale_in_place(ratio))
    }
}

impl ScaleUpem for Colr {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        let end = var_blocks(self)
            .iter()
            .map(|(base, len)| base.saturating_add(*len as u32))
            .max()
            .unwrap_or_default();
        let Colr {
            base_glyph_list,
            layer_list,
            clip_list,
            var_index_map,
            item_variation_store,
            ..
        } = self;
        let mut plan = VarPlan {
            map: var_index_map.as_mut(),
            end,
            claims: RowClaims {
                store: item_variation_store.as_mut(),
                first_use: HashMap::new(),
                copies: HashMap::new(),
            },
        };

        for paint in base_glyph_list
            .iter_mut()
            .map(|record| &mut record.paint)
            .chain(layer_list.iter_mut())
        {
            plan.assign_paint(paint)?;
            ratio.apply(paint, Colr::TAG)?;
        }
        for clip in clip_list.iter_mut() {
            plan.assign(&mut clip.clip_box.var_index_base, CLIP_BOX)?;
            ratio.apply(&mut clip.clip_box, Colr::TAG)?;
        }
        plan.claims.apply(ratio)
    }
}

/// Where each variable record reads its deltas from.
struct VarPlan<'a> {
    map: Option<&'a mut DeltaSetIndexMap>,
    /// One past the highest variation index in use.
    end: u32,
    claims: RowClaims<'a>,
}

/// The units each delta set is read in, decided by its first reader.
struct RowClaims<'a> {
    store: Option<&'a mut ItemVariationStore>,
    first_use: HashMap<DeltaSetIndex, bool>,
    copies: HashMap<(DeltaSetIndex, bool), DeltaSetIndex>,
}

impl VarPlan<'_> {
    /// Parents first, then color stops, then children.
    fn assign_paint(&mut self, paint: &mut Paint) -> Result<(), ScaleError> {
        let mask = paint_mask(paint);
        if let Some(var_index_base) = var_index_base_mut(paint) {
            self.assign(var_index_base, mask)?;
        }
        if let Some(color_line) = color_line_mut(paint) {
            for stop in color_line.color_stops.iter_mut() {
                self.assign(&mut stop.var_index_base, COLOR_STOP)?;
            }
        }
        for child in paint.children_mut() {
            self.assign_paint(child)?;
        }
        Ok(())
    }

    fn assign(&mut self, var_index_base: &mut Option<u32>, mask: FieldMask) -> Result<(), ScaleError> {
        let Some(base) = *var_index_base else {
            return Ok(());
        };
        if base == NO_VARIATION_INDEX {
            return Ok(());
        }
        let rows = self.rows(base, mask.len())?;
        if self.claims.try_claim(&rows, mask) {
            return Ok(());
        }
        let new_base = self.relocate(&rows, mask)?;
        log::debug!(
            "COLR variation index {base} shares delta sets with fields in other units, moved to {new_base}"
        );
        *var_index_base = Some(new_base);
        Ok(())
    }

    fn rows(&self, base: u32, len: usize) -> Result<Vec<Option<DeltaSetIndex>>, ScaleError> {
        (0..len as u32)
            .map(|field| {
                let var_index = base.checked_add(field).ok_or_else(|| {
                    ScaleError::malformed_variations(Colr::TAG, "variation index overflows")
                })?;
                Ok(resolve_var_index(self.map.as_deref(), var_index))
            })
            .collect()
    }

    fn relocate(
        &mut self,
        rows: &[Option<DeltaSetIndex>],
        mask: FieldMask,
    ) -> Result<u32, ScaleError> {
        let Some(map) = self.map.as_deref_mut() else {
            return self.claims.copy_rows(rows, mask);
        };
        let mut entries = Vec::with_capacity(rows.len());
        for (row, scaled) in rows.iter().zip(mask) {
            entries.push(match row {
                Some(row) => self.claims.row_for(*row, *scaled)?,
                None => DeltaSetIndex::NO_VARIATION_INDEX,
            });
        }
        // indices past the end of a map read its last entry
        let last = map
            .entries
            .last()
            .copied()
            .unwrap_or(DeltaSetIndex::NO_VARIATION_INDEX);
        if map.entries.len() < self.end as usize {
            map.entries.resize(self.end as usize, last);
        }
        let new_base = u32::try_from(map.entries.len())
            .ok()
            .filter(|base| base.checked_add(rows.len() as u32).is_some())
            .ok_or_else(|| {
                ScaleError::malformed_variations(Colr::TAG, "too many variation indices")
            })?;
        map.entries.extend(entries);
        Ok(new_base)
    }
}

impl RowClaims<'_> {
    /// Record the units of a record's delta sets, unless one conflicts.
    fn try_claim(&mut self, rows: &[Option<DeltaSetIndex>], mask: FieldMask) -> bool {
        let mut claims = HashMap::new();
        for (row, scaled) in rows.iter().zip(mask) {
            let Some(row) = row else {
                continue;
            };
            let first = self
                .first_use
                .get(row)
                .or_else(|| claims.get(row))
                .copied();
            match first {
                Some(first) if first != *scaled => return false,
                Some(_) => (),
                None => {
                    claims.insert(*row, *scaled);
                }
            }
        }
        self.first_use.extend(claims);
        true
    }

    /// A delta set with the same deltas as `row`, read in the given units.
    fn row_for(&mut self, row: DeltaSetIndex, scaled: bool) -> Result<DeltaSetIndex, ScaleError> {
        match self.first_use.get(&row).copied() {
            None => {
                self.first_use.insert(row, scaled);
                return Ok(row);
            }
            Some(first) if first == scaled => return Ok(row),
            Some(_) => (),
        }
        if let Some(copy) = self.copies.get(&(row, scaled)) {
            return Ok(*copy);
        }
        let copy = copy_delta_set(Colr::TAG, self.store()?, row)?;
        self.copies.insert((row, scaled), copy);
        self.first_use.insert(copy, scaled);
        Ok(copy)
    }

    /// Copy a record's delta sets to consecutive rows of their subtable.
    fn copy_rows(
        &mut self,
        rows: &[Option<DeltaSetIndex>],
        mask: FieldMask,
    ) -> Result<u32, ScaleError> {
        let malformed = |reason| ScaleError::malformed_variations(Colr::TAG, reason);
        let mut copies: Vec<DeltaSetIndex> = Vec::with_capacity(rows.len());
        for (row, scaled) in rows.iter().zip(mask) {
            let row = row.ok_or_else(|| malformed("variable record reads no delta set"))?;
            let copy = copy_delta_set(Colr::TAG, self.store()?, row)?;
            if let Some(first) = copies.first() {
                if copy.outer != first.outer
                    || copy.inner as usize != first.inner as usize + copies.len()
                {
                    return Err(malformed("variable record spans subtables"));
                }
            }
            self.first_use.insert(copy, *scaled);
            copies.push(copy);
        }
        copies
            .first()
            .map(|first| first.to_u32())
            .ok_or_else(|| malformed("variable record with no fields"))
    }

    fn store(&mut self) -> Result<&mut ItemVariationStore, ScaleError> {
        self.store.as_deref_mut().ok_or_else(|| {
            ScaleError::malformed_variations(Colr::TAG, "variation index without a store")
        })
    }

    fn apply(self, ratio: UpemRatio) -> Result<(), ScaleError> {
        let Some(store) = self.store else {
            return Ok(());
        };
        for (index, _) in self.first_use.iter().filter(|(_, scaled)| **scaled) {
            let row = store
                .item_variation_data
                .get_mut(index.outer as usize)
                .and_then(|data| data.delta_sets.get_mut(index.inner as usize))
                .ok_or_else(|| {
                    ScaleError::malformed_variations(Colr::TAG, format!("no delta set {index:?}"))
                })?;
            ratio.apply(row, Colr::TAG)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use font_model::tables::{
        colr::{Affine2x3, BaseGlyphPaint, Clip, ColorStop, Extend},
        variations::{ItemVariationData, RegionAxisCoordinates, VariationRegion, VariationRegionList},
    };
    use font_types::{F2Dot14, Fixed, GlyphId16};
    use pretty_assertions::assert_eq;

    use super::*;

    fn ratio(from: u16, to: u16) -> UpemRatio {
        UpemRatio::new(from, to).unwrap()
    }

    fn f2dot14(val: f32) -> F2Dot14 {
        F2Dot14::from_f32(val)
    }

    fn store(delta_sets: Vec<Vec<i32>>) -> ItemVariationStore {
        ItemVariationStore::new(
            VariationRegionList::new(
                1,
                vec![VariationRegion::new(vec![RegionAxisCoordinates::from_peak(
                    f2dot14(1.0),
                )])],
            ),
            vec![ItemVariationData::new(vec![0], delta_sets)],
        )
    }

    fn solid() -> Box<Paint> {
        Box::new(Paint::Solid {
            palette_index: 0,
            alpha: f2dot14(1.0),
            var_index_base: None,
        })
    }

    fn base_glyph(gid: u16, paint: Paint) -> BaseGlyphPaint {
        BaseGlyphPaint {
            glyph_id: GlyphId16::new(gid),
            paint,
        }
    }

    #[test]
    fn geometry_and_clip_boxes() {
        let stop = |offset| ColorStop {
            stop_offset: f2dot14(offset),
            palette_index: 1,
            alpha: f2dot14(0.5),
            var_index_base: None,
        };
        let color_line = ColorLine {
            extend: Extend::Reflect,
            color_stops: vec![stop(0.0), stop(1.0)],
        };
        let transform = |dx, dy| Affine2x3 {
            xx: Fixed::from_f64(0.5),
            yx: Fixed::from_f64(0.0),
            xy: Fixed::from_f64(0.25),
            yy: Fixed::from_f64(1.0),
            dx: Fixed::from_f64(dx),
            dy: Fixed::from_f64(dy),
            var_index_base: None,
        };
        let paint = |x0, r0, dx, dy, cx| Paint::Composite {
            source_paint: Box::new(Paint::Transform {
                paint: Box::new(Paint::RadialGradient {
                    color_line: color_line.clone(),
                    x0,
                    y0: 0,
                    radius0: r0,
                    x1: x0,
                    y1: 0,
                    radius1: 0,
                    var_index_base: None,
                }),
                transform: transform(dx, dy),
            }),
            composite_mode: 3,
            backdrop_paint: Box::new(Paint::RotateAroundCenter {
                paint: solid(),
                angle: f2dot14(0.25),
                center_x: cx,
                center_y: cx,
                var_index_base: None,
            }),
        };
        let clip = |x_max| Clip {
            start_glyph_id: GlyphId16::new(5),
            end_glyph_id: GlyphId16::new(9),
            clip_box: ClipBox {
                x_min: -11,
                y_min: 0,
                x_max,
                y_max: 900,
                var_index_base: None,
            },
        };
        let mut colr = Colr {
            base_glyph_list: vec![base_glyph(5, paint(-301, 400, 10.25, -3.0, 250))],
            clip_list: vec![clip(1000)],
            ..Default::default()
        };
        colr.scale_upem(ratio(1000, 2000)).unwrap();

        let expected = Colr {
            base_glyph_list: vec![base_glyph(5, paint(-602, 800, 20.5, -6.0, 500))],
            clip_list: vec![Clip {
                clip_box: ClipBox {
                    x_min: -22,
                    y_max: 1800,
                    ..clip(2000).clip_box
                },
                ..clip(2000)
            }],
            ..Default::default()
        };
        assert_eq!(colr, expected);
    }

    #[test]
    fn mapped_record_moves_off_a_shared_row() {
        let translate = |paint, var_index_base| Paint::Translate {
            paint: Box::new(paint),
            dx: 20,
            dy: 0,
            var_index_base: Some(var_index_base),
        };
        let scale_uniform = |var_index_base| Paint::ScaleUniform {
            paint: solid(),
            scale: f2dot14(1.0),
            var_index_base: Some(var_index_base),
        };
        let mut colr = Colr {
            base_glyph_list: vec![
                base_glyph(1, translate(*solid(), 0)),
                base_glyph(2, scale_uniform(0)),
            ],
            var_index_map: Some(DeltaSetIndexMap {
                entries: vec![DeltaSetIndex::new(0, 0), DeltaSetIndex::new(0, 1)],
            }),
            item_variation_store: Some(store(vec![vec![100], vec![-7]])),
            ..Default::default()
        };
        colr.scale_upem(ratio(1000, 2000)).unwrap();

        assert_eq!(
            colr.base_glyph_list[1].paint,
            scale_uniform(2),
            "the scale factor reads new map entries"
        );
        assert_eq!(
            colr.var_index_map.as_ref().map(|map| map.entries.as_slice()),
            Some(
                [
                    DeltaSetIndex::new(0, 0),
                    DeltaSetIndex::new(0, 1),
                    DeltaSetIndex::new(0, 2),
                ]
                .as_slice()
            )
        );
        assert_eq!(
            colr.item_variation_store,
            Some(store(vec![vec![200], vec![-14], vec![100]]))
        );

        let coords = [f2dot14(0.5)];
        assert_eq!(colr.field_delta(0, 0, &coords), 100.0);
        assert_eq!(colr.field_delta(0, 1, &coords), -7.0);
        assert_eq!(colr.field_delta(2, 0, &coords), 50.0);
    }

    #[test]
    fn unmapped_record_gets_copied_rows() {
        let mut colr = Colr {
            base_glyph_list: vec![base_glyph(
                1,
                Paint::Translate {
                    paint: Box::new(Paint::Scale {
                        paint: solid(),
                        scale_x: f2dot14(1.0),
                        scale_y: f2dot14(1.0),
                        var_index_base: Some(1),
                    }),
                    dx: 0,
                    dy: 0,
                    var_index_base: Some(0),
                },
            )],
            item_variation_store: Some(store(vec![vec![10], vec![20], vec![4]])),
            ..Default::default()
        };
        colr.scale_upem(ratio(1000, 500)).unwrap();

        let Paint::Translate { paint, .. } = &colr.base_glyph_list[0].paint else {
            panic!("not a translate");
        };
        assert_eq!(paint.var_index_base(), Some(3));
        assert_eq!(
            colr.item_variation_store,
            Some(store(vec![vec![5], vec![10], vec![4], vec![20], vec![4]]))
        );
    }

    #[test]
    fn clip_box_shares_with_color_stop() {
        let mut colr = Colr {
            layer_list: vec![Paint::LinearGradient {
                color_line: ColorLine {
                    extend: Extend::Pad,
                    color_stops: vec![ColorStop {
                        stop_offset: f2dot14(0.0),
                        palette_index: 0,
                        alpha: f2dot14(1.0),
                        var_index_base: Some(0),
                    }],
                },
                x0: 0,
                y0: 0,
                x1: 100,
                y1: 0,
                x2: 0,
                y2: 100,
                var_index_base: None,
            }],
            clip_list: vec![Clip {
                start_glyph_id: GlyphId16::new(1),
                end_glyph_id: GlyphId16::new(1),
                clip_box: ClipBox {
                    x_max: 100,
                    y_max: 100,
                    var_index_base: Some(0),
                    ..Default::default()
                },
            }],
            var_index_map: Some(DeltaSetIndexMap {
                entries: vec![
                    DeltaSetIndex::new(0, 0),
                    DeltaSetIndex::NO_VARIATION_INDEX,
                    DeltaSetIndex::new(0, 1),
                ],
            }),
            item_variation_store: Some(store(vec![vec![-3], vec![50]])),
            ..Default::default()
        };
        colr.scale_upem(ratio(1000, 3000)).unwrap();

        // the map is padded up to the clip box's last field before growing
        let entries = colr.var_index_map.as_ref().unwrap().entries.clone();
        assert_eq!(
            entries,
            vec![
                DeltaSetIndex::new(0, 0),
                DeltaSetIndex::NO_VARIATION_INDEX,
                DeltaSetIndex::new(0, 1),
                DeltaSetIndex::new(0, 1),
                DeltaSetIndex::new(0, 2),
                DeltaSetIndex::NO_VARIATION_INDEX,
                DeltaSetIndex::new(0, 1),
                DeltaSetIndex::new(0, 1),
            ]
        );
        assert_eq!(colr.clip_list[0].clip_box.var_index_base, Some(4));
        assert_eq!(
            colr.item_variation_store,
            Some(store(vec![vec![-3], vec![150], vec![-9]]))
        );
    }
}

use std::collections::BTreeMap;

use font_model::{
    tables::{
        gdef::{CaretValue, Gdef, LigCaretList, LigGlyph},
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, CurvePoint, Glyf, Glyph,
            SimpleGlyph, Transform,
        },
        gpos::{
            AnchorTable, BaseRecord, Gpos, MarkBasePos, MarkRecord, PositionLookup,
            PositionSubtables, SinglePos, ValueRecord,
        },
        colr::{BaseGlyphPaint, Clip, ClipBox, Colr, Paint},
        gvar::{GlyphDeltas, GlyphVariations, Gvar, NUM_PHANTOM_POINTS},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        hvar::Hvar,
        kern::{Kern, Kern0, KernPair, KernSubtable},
        math::{Math, MathConstants, MathValueRecord},
        mvar::{self, Mvar},
        os2::Os2,
        post::Post,
        varc::{DecomposedTransform, TransformField, VarComponent, VarCompositeGlyph, Varc},
        variations::{
            DeltaSetIndex, DeltaSetIndexMap, ItemVariationData, ItemVariationStore, MultiItemVariationData,
            MultiItemVariationStore, RegionAxisCoordinates, SparseRegionAxisCoordinates,
            SparseVariationRegion, Tuple, VariationRegion, VariationRegionList,
        },
    },
    Font, TopLevelTable,
};
use font_types::{F2Dot14, FWord, Fixed, GlyphId, GlyphId16, LongDateTime, Tag, UfWord};
use pretty_assertions::assert_eq;
use rstest::rstest;
use scale_upem::{scale_upem, scale_upem_with_flags, ScaleError, ScaleFlags, UpemRatio};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn f2dot14(value: f32) -> F2Dot14 {
    F2Dot14::from_f32(value)
}

fn gid(id: u16) -> GlyphId16 {
    GlyphId16::new(id)
}

fn simple(points: &[(i16, i16, bool)]) -> Glyph {
    SimpleGlyph::new(vec![points
        .iter()
        .map(|(x, y, on_curve)| CurvePoint::new(*x, *y, *on_curve))
        .collect::<Vec<_>>()
        .into()])
    .into()
}

fn component(glyph: u16, anchor: Anchor, transform: Transform) -> Component {
    Component::new(gid(glyph), anchor, transform, ComponentFlags::default())
}

fn composite(components: Vec<Component>) -> Glyph {
    CompositeGlyph::try_from_iter(components).unwrap().into()
}

fn outlines() -> Glyf {
    let mut glyf = Glyf::new(vec![
        Glyph::Empty,
        simple(&[
            (100, 0, true),
            (100, 1400, true),
            (601, 1537, false),
            (1100, 1400, true),
            (1100, 0, true),
        ]),
        composite(vec![
            component(1, Anchor::Offset { x: 1229, y: -37 }, Transform::default()),
            Component::new(
                gid(1),
                Anchor::Offset { x: 0, y: 701 },
                Transform::scale(0.5),
                ComponentFlags {
                    scaled_component_offset: true,
                    ..Default::default()
                },
            ),
        ]),
        composite(vec![
            component(1, Anchor::Offset { x: 0, y: 0 }, Transform::default()),
            component(
                1,
                Anchor::Point {
                    base: 3,
                    component: 0,
                },
                Transform::default(),
            ),
        ]),
    ]);
    for ix in 2..4 {
        let bbox = glyf.compute_bbox(gid(ix)).unwrap().unwrap_or_default();
        if let Some(Glyph::Composite(composite)) = glyf.get_mut(gid(ix)) {
            composite.bbox = bbox;
        }
    }
    glyf
}

fn glyph_deltas(peak: f32, deltas: Vec<Option<(i16, i16)>>) -> GlyphDeltas {
    GlyphDeltas::new(Tuple::new(vec![f2dot14(peak)]), deltas, None)
}

fn glyph_variations() -> Gvar {
    let explicit = |count: usize, step: i16| -> Vec<Option<(i16, i16)>> {
        (0..count as i16)
            .map(|ix| Some((ix * step - 7, 3 - ix * step)))
            .collect()
    };
    let mut sparse = explicit(5 + NUM_PHANTOM_POINTS, 11);
    sparse[2] = None;
    sparse[3] = None;
    Gvar::new(
        1,
        vec![
            GlyphVariations::default(),
            GlyphVariations::new(vec![
                glyph_deltas(1.0, explicit(5 + NUM_PHANTOM_POINTS, 37)),
                glyph_deltas(-1.0, sparse),
                GlyphDeltas::new(
                    Tuple::new(vec![f2dot14(0.5)]),
                    explicit(5 + NUM_PHANTOM_POINTS, -5),
                    Some((
                        Tuple::new(vec![f2dot14(0.25)]),
                        Tuple::new(vec![f2dot14(1.0)]),
                    )),
                ),
            ]),
            GlyphVariations::new(vec![glyph_deltas(
                1.0,
                explicit(2 + NUM_PHANTOM_POINTS, 51),
            )]),
            GlyphVariations::default(),
        ],
    )
}

fn item_variation_store(delta_sets: Vec<Vec<i32>>) -> ItemVariationStore {
    let region = |peak: f32| {
        VariationRegion::new(vec![RegionAxisCoordinates::from_peak(f2dot14(peak))])
    };
    ItemVariationStore::new(
        VariationRegionList::new(1, vec![region(1.0), region(-1.0)]),
        vec![ItemVariationData::new(vec![0, 1], delta_sets)],
    )
}

fn variable_components() -> Varc {
    let sparse_region = |peak: f32| {
        let (start, end) = if peak < 0.0 { (peak, 0.0) } else { (0.0, peak) };
        SparseVariationRegion::new(vec![SparseRegionAxisCoordinates {
            axis_index: 0,
            start: f2dot14(start),
            peak: f2dot14(peak),
            end: f2dot14(end),
        }])
    };
    let store = MultiItemVariationStore::new(
        vec![sparse_region(1.0), sparse_region(-1.0)],
        vec![MultiItemVariationData::new(
            vec![0, 1],
            vec![
                // translate_x, rotation, center_y for each region
                vec![101, 512, -33, -47, -256, 9],
                // axis values
                vec![4096, -2048],
            ],
        )],
    );
    let transformed = VarComponent {
        gid: GlyphId::new(1),
        transform: DecomposedTransform {
            translate_x: Some(-251),
            rotation: Some(0.125),
            center_y: Some(333),
            ..Default::default()
        },
        transform_var_index: Some(0),
        ..Default::default()
    };
    let with_axes = VarComponent {
        gid: GlyphId::new(2),
        axis_values: Some(BTreeMap::from([(0, 0.5)])),
        axis_values_var_index: Some(1),
        transform: DecomposedTransform {
            translate_y: Some(77),
            scale_x: Some(0.75),
            ..Default::default()
        },
        ..Default::default()
    };
    Varc {
        coverage: vec![GlyphId::new(4)],
        multi_var_store: Some(store),
        condition_list: Vec::new(),
        glyphs: vec![VarCompositeGlyph {
            components: vec![transformed, with_axes],
        }],
    }
}

/// A variable TrueType font with a wide spread of tables.
fn test_font(units_per_em: u16) -> Font {
    let mut font = Font::new();
    font.insert(Head {
        font_revision: Fixed::from_f64(1.5),
        flags: 0b1011,
        units_per_em,
        created: LongDateTime::new(3_600_000_000),
        modified: LongDateTime::new(3_700_000_000),
        x_min: 0,
        y_min: -37,
        x_max: 2329,
        y_max: 1537,
        mac_style: 1,
        lowest_rec_ppem: 8,
        ..Default::default()
    });
    font.insert(Hhea {
        ascender: FWord::new(1900),
        descender: FWord::new(-500),
        line_gap: FWord::new(67),
        advance_width_max: UfWord::new(2400),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        ..Default::default()
    });
    font.insert(Hmtx::new(
        vec![
            LongMetric::new(500, 0),
            LongMetric::new(1229, 100),
            LongMetric::new(2400, 0),
            LongMetric::new(1200, 0),
        ],
        vec![],
    ));
    font.insert(Os2 {
        x_avg_char_width: 1157,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 8,
        s_typo_ascender: 1638,
        s_typo_descender: -410,
        us_win_ascent: 1950,
        us_win_descent: 550,
        sx_height: Some(1062),
        s_cap_height: Some(1456),
        panose_10: [2, 11, 5, 3, 3, 4, 3, 2, 2, 4],
        ach_vend_id: Tag::new(b"TEST"),
        ..Default::default()
    });
    font.insert(Post {
        italic_angle: Fixed::from_f64(-11.0),
        underline_position: FWord::new(-154),
        underline_thickness: FWord::new(102),
        glyph_names: vec![".notdef".into(), "box".into(), "boxes".into(), "pair".into()],
        ..Default::default()
    });
    font.insert(outlines());
    font.insert(glyph_variations());
    font.insert(Hvar::new(item_variation_store(vec![
        vec![0, 0],
        vec![41, -17],
        vec![-123, 75],
        vec![9, 9],
    ])));
    font.insert(Mvar {
        value_records: vec![mvar::ValueRecord {
            value_tag: Tag::new(b"hasc"),
            delta_set_index: DeltaSetIndex::new(0, 0),
        }],
        item_variation_store: Some(item_variation_store(vec![vec![-61, 33]])),
    });
    font.insert(Gdef {
        lig_caret_list: Some(LigCaretList {
            coverage: [gid(3)].into_iter().collect(),
            lig_glyphs: vec![LigGlyph {
                caret_values: vec![
                    CaretValue::Format1 { coordinate: 1229 },
                    CaretValue::Format2 {
                        caret_value_point_index: 4,
                    },
                ],
            }],
        }),
        ..Default::default()
    });
    font.insert(Gpos {
        lookups: vec![
            PositionLookup {
                lookup_flag: 0,
                mark_filtering_set: None,
                subtables: PositionSubtables::Single(vec![SinglePos::Format1 {
                    coverage: [gid(1)].into_iter().collect(),
                    value_record: ValueRecord::new().with_x_advance(-45),
                }]),
            },
            PositionLookup {
                lookup_flag: 0,
                mark_filtering_set: None,
                subtables: PositionSubtables::MarkToBase(vec![MarkBasePos {
                    mark_coverage: [gid(2)].into_iter().collect(),
                    base_coverage: [gid(1)].into_iter().collect(),
                    mark_array: vec![MarkRecord {
                        mark_class: 0,
                        mark_anchor: AnchorTable::format_1(601, 0),
                    }],
                    base_array: vec![BaseRecord {
                        base_anchors: vec![Some(AnchorTable::format_1(601, 1537))],
                    }],
                }]),
            },
        ],
        ..Default::default()
    });
    font.insert(Kern {
        subtables: vec![KernSubtable::Format0(Kern0 {
            coverage: 1,
            kerning_pairs: vec![KernPair {
                left: gid(1),
                right: gid(3),
                value: FWord::new(-77),
            }],
        })],
    });
    font.insert(variable_components());
    font.insert_raw(Tag::new(b"cmap"), vec![0, 0, 0, 1, 0, 3, 0, 1]);
    font.insert_raw(Tag::new(b"maxp"), vec![0, 1, 0, 0, 0, 5]);
    font.insert_raw(Tag::new(b"fpgm"), vec![0xb0, 0x01, 0x2c]);
    font
}

fn coords(value: f32) -> [F2Dot14; 1] {
    [f2dot14(value)]
}

fn points(glyf: &Glyf, glyph: u16) -> Vec<(i16, i16)> {
    match glyf.get(gid(glyph)) {
        Some(Glyph::Simple(simple)) => simple.points().map(|p| (p.x, p.y)).collect(),
        _ => panic!("glyph {glyph} is not simple"),
    }
}

#[test]
fn simple_outline_halved() {
    init_logging();
    let mut font = Font::new();
    font.insert(Head {
        units_per_em: 1000,
        ..Default::default()
    });
    font.insert(Glyf::new(vec![simple(&[(500, 500, true)])]));

    scale_upem(&mut font, 500).unwrap();

    assert_eq!(font.units_per_em(), Some(500));
    assert_eq!(points(font.table::<Glyf>().unwrap(), 0), vec![(250, 250)]);
}

#[test]
fn component_offset_halved_transform_kept() {
    init_logging();
    let mut font = Font::new();
    font.insert(Head {
        units_per_em: 1000,
        ..Default::default()
    });
    font.insert(Glyf::new(vec![
        simple(&[(0, 0, true), (200, 300, true)]),
        composite(vec![component(
            0,
            Anchor::Offset { x: 100, y: 0 },
            Transform::default(),
        )]),
    ]));

    scale_upem(&mut font, 500).unwrap();

    let glyf = font.table::<Glyf>().unwrap();
    let Some(Glyph::Composite(composite)) = glyf.get(gid(1)) else {
        panic!("expected a composite");
    };
    let component = &composite.components()[0];
    assert_eq!(component.anchor, Anchor::Offset { x: 50, y: 0 });
    assert!(component.transform.is_identity());
    assert_eq!(
        composite.bbox,
        Bbox {
            x_min: 50,
            y_min: 0,
            x_max: 150,
            y_max: 150,
        }
    );
}

#[test]
fn full_font_2048_to_1000() {
    init_logging();
    let mut font = test_font(2048);
    scale_upem(&mut font, 1000).unwrap();

    let head = font.table::<Head>().unwrap();
    assert_eq!(head.units_per_em, 1000);
    assert_eq!(
        (head.x_min, head.y_min, head.x_max, head.y_max),
        (0, -18, 1137, 750)
    );

    let hhea = font.table::<Hhea>().unwrap();
    assert_eq!(hhea.ascender, FWord::new(928));
    assert_eq!(hhea.descender, FWord::new(-244));
    assert_eq!(hhea.advance_width_max, UfWord::new(1172));
    assert_eq!((hhea.caret_slope_rise, hhea.caret_slope_run), (1, 0));

    let hmtx = font.table::<Hmtx>().unwrap();
    assert_eq!(hmtx.h_metrics[1], LongMetric::new(600, 49));

    let os2 = font.table::<Os2>().unwrap();
    assert_eq!(os2.x_avg_char_width, 565);
    assert_eq!(os2.s_typo_ascender, 800);
    assert_eq!(os2.s_typo_descender, -200);
    assert_eq!(os2.sx_height, Some(519));
    assert_eq!(os2.us_weight_class, 400);

    let post = font.table::<Post>().unwrap();
    assert_eq!(post.underline_position, FWord::new(-75));
    assert_eq!(post.underline_thickness, FWord::new(50));

    assert_eq!(
        points(font.table::<Glyf>().unwrap(), 1),
        vec![(49, 0), (49, 684), (293, 750), (537, 684), (537, 0)]
    );

    let Some(KernSubtable::Format0(kern0)) = font.table::<Kern>().unwrap().subtables.first()
    else {
        panic!("expected a format 0 subtable");
    };
    assert_eq!(kern0.kerning(gid(1), gid(3)), Some(FWord::new(-38)));

    let gdef = font.table::<Gdef>().unwrap();
    assert_eq!(
        gdef.lig_caret_list.as_ref().unwrap().lig_glyphs[0].caret_values,
        vec![
            CaretValue::Format1 { coordinate: 600 },
            CaretValue::Format2 {
                caret_value_point_index: 4,
            },
        ]
    );

    assert_eq!(
        font.get(Tag::new(b"fpgm")),
        test_font(2048).get(Tag::new(b"fpgm"))
    );
}

#[test]
fn metadata_is_untouched() {
    init_logging();
    let original = test_font(1000);
    let mut font = original.clone();
    scale_upem(&mut font, 500).unwrap();

    let (head, orig_head) = (font.table::<Head>().unwrap(), original.table::<Head>().unwrap());
    assert_eq!(head.flags, orig_head.flags);
    assert_eq!(head.mac_style, orig_head.mac_style);
    assert_eq!(head.font_revision, orig_head.font_revision);
    assert_eq!(head.created, orig_head.created);
    assert_eq!(head.lowest_rec_ppem, orig_head.lowest_rec_ppem);

    let (os2, orig_os2) = (font.table::<Os2>().unwrap(), original.table::<Os2>().unwrap());
    assert_eq!(os2.fs_type, orig_os2.fs_type);
    assert_eq!(os2.panose_10, orig_os2.panose_10);
    assert_eq!(os2.ach_vend_id, orig_os2.ach_vend_id);
    assert_eq!(os2.us_width_class, orig_os2.us_width_class);

    let (post, orig_post) = (font.table::<Post>().unwrap(), original.table::<Post>().unwrap());
    assert_eq!(post.italic_angle, orig_post.italic_angle);
    assert_eq!(post.glyph_names, orig_post.glyph_names);

    let (glyf, orig_glyf) = (font.table::<Glyf>().unwrap(), original.table::<Glyf>().unwrap());
    for (glyph, orig) in glyf.glyphs.iter().zip(&orig_glyf.glyphs) {
        match (glyph, orig) {
            (Glyph::Simple(glyph), Glyph::Simple(orig)) => {
                let flags: Vec<_> = glyph.points().map(|p| p.on_curve).collect();
                let orig_flags: Vec<_> = orig.points().map(|p| p.on_curve).collect();
                assert_eq!(flags, orig_flags);
            }
            (Glyph::Composite(glyph), Glyph::Composite(orig)) => {
                for (component, orig) in glyph.components().iter().zip(orig.components()) {
                    assert_eq!(component.glyph, orig.glyph);
                    assert_eq!(component.flags, orig.flags);
                    assert_eq!(component.transform, orig.transform);
                }
            }
            (Glyph::Empty, Glyph::Empty) => (),
            _ => panic!("glyph kind changed"),
        }
    }

    for tag in [Tag::new(b"cmap"), Tag::new(b"maxp"), Tag::new(b"fpgm")] {
        assert_eq!(font.get(tag), original.get(tag));
    }
    let varc = font.table::<Varc>().unwrap();
    let orig_varc = original.table::<Varc>().unwrap();
    for (component, orig) in varc.components().zip(orig_varc.components()) {
        assert_eq!(component.axis_values, orig.axis_values);
        assert_eq!(component.transform.rotation, orig.transform.rotation);
        assert_eq!(component.transform.scale_x, orig.transform.scale_x);
    }
}

#[test]
fn same_upem_is_a_no_op() {
    init_logging();
    let mut font = test_font(2048);
    scale_upem(&mut font, 2048).unwrap();
    assert_eq!(font, test_font(2048));
}

#[test]
fn doubling_then_halving_restores() {
    init_logging();
    let mut font = test_font(1000);
    scale_upem(&mut font, 2000).unwrap();
    scale_upem(&mut font, 1000).unwrap();
    assert_eq!(font, test_font(1000));
}

#[rstest]
#[case(2048, 1000)]
#[case(1000, 2048)]
#[case(1000, 16)]
#[case(1024, 1000)]
fn values_match_reference_rounding(#[case] from: u16, #[case] to: u16) {
    init_logging();
    let ratio = UpemRatio::new(from, to).unwrap();
    let reference = |value: i16| -> i16 {
        let exact = value as f64 * to as f64 / from as f64;
        (exact.abs() + 0.5).floor().copysign(exact) as i16
    };

    let original = test_font(from);
    let mut font = original.clone();
    scale_upem(&mut font, to).unwrap();

    let hmtx = font.table::<Hmtx>().unwrap();
    let orig_hmtx = original.table::<Hmtx>().unwrap();
    for (metric, orig) in hmtx.h_metrics.iter().zip(&orig_hmtx.h_metrics) {
        assert_eq!(metric.side_bearing, reference(orig.side_bearing));
        assert_eq!(metric.advance as i64, ratio.scale(orig.advance as i32));
    }
    let glyf = font.table::<Glyf>().unwrap();
    let orig_glyf = original.table::<Glyf>().unwrap();
    let scaled: Vec<_> = points(orig_glyf, 1)
        .into_iter()
        .map(|(x, y)| (reference(x), reference(y)))
        .collect();
    assert_eq!(points(glyf, 1), scaled);
}

#[test]
fn transforms_are_bit_identical() {
    init_logging();
    let original = test_font(2048);
    let mut font = original.clone();
    scale_upem(&mut font, 1000).unwrap();

    let transforms = |font: &Font| -> Vec<Transform> {
        font.table::<Glyf>()
            .unwrap()
            .glyphs
            .iter()
            .filter_map(|glyph| match glyph {
                Glyph::Composite(composite) => Some(composite.components().to_vec()),
                _ => None,
            })
            .flatten()
            .map(|component| component.transform)
            .collect()
    };
    assert_eq!(transforms(&font), transforms(&original));
    let Some(Glyph::Composite(composite)) = font.table::<Glyf>().unwrap().get(gid(3)) else {
        panic!("expected a composite");
    };
    assert_eq!(
        composite.components()[1].anchor,
        Anchor::Point {
            base: 3,
            component: 0
        }
    );
}

#[rstest]
#[case(2048, 1000)]
#[case(1000, 2048)]
#[case(1000, 333)]
fn glyph_variations_interpolate_consistently(#[case] from: u16, #[case] to: u16) {
    init_logging();
    let factor = to as f64 / from as f64;
    let original = test_font(from);
    let mut font = original.clone();
    scale_upem(&mut font, to).unwrap();

    let gvar = font.table::<Gvar>().unwrap();
    let orig_gvar = original.table::<Gvar>().unwrap();
    let glyf = font.table::<Glyf>().unwrap();
    let orig_glyf = original.table::<Glyf>().unwrap();

    for location in [-1.0, -0.4, 0.0, 0.3, 0.5, 0.8, 1.0] {
        let coords = coords(location);
        let num_points = 5 + NUM_PHANTOM_POINTS;
        let deltas = gvar.get(gid(1)).unwrap().explicit_deltas_at(&coords, num_points);
        let orig_deltas = orig_gvar
            .get(gid(1))
            .unwrap()
            .explicit_deltas_at(&coords, num_points);
        let variations = gvar.get(gid(1)).unwrap().variations.len() as f64;
        // each rounded value is off by at most half a unit
        let tolerance = 0.5 * (1.0 + variations) + 1e-9;

        for (ix, ((x, y), (ox, oy))) in points(glyf, 1)
            .into_iter()
            .zip(points(orig_glyf, 1))
            .enumerate()
        {
            let scaled = (x as f64 + deltas[ix].0, y as f64 + deltas[ix].1);
            let expected = (
                (ox as f64 + orig_deltas[ix].0) * factor,
                (oy as f64 + orig_deltas[ix].1) * factor,
            );
            assert!(
                (scaled.0 - expected.0).abs() <= tolerance
                    && (scaled.1 - expected.1).abs() <= tolerance,
                "point {ix} at {location}: {scaled:?} vs {expected:?}"
            );
        }
    }
    // inferred deltas stay inferred
    let sparse = &gvar.get(gid(1)).unwrap().variations[1].deltas;
    assert_eq!((sparse[2], sparse[3]), (None, None));
    assert_eq!(
        gvar.get(gid(1)).unwrap().variations[2].intermediate_region,
        orig_gvar.get(gid(1)).unwrap().variations[2].intermediate_region
    );
}

#[rstest]
#[case(2048, 1000)]
#[case(1000, 333)]
fn advance_variations_interpolate_consistently(#[case] from: u16, #[case] to: u16) {
    init_logging();
    let factor = to as f64 / from as f64;
    let original = test_font(from);
    let mut font = original.clone();
    scale_upem(&mut font, to).unwrap();

    let (hvar, orig_hvar) = (font.table::<Hvar>().unwrap(), original.table::<Hvar>().unwrap());
    let (hmtx, orig_hmtx) = (font.table::<Hmtx>().unwrap(), original.table::<Hmtx>().unwrap());
    for location in [-1.0, -0.5, 0.25, 1.0] {
        let coords = coords(location);
        for glyph in 0..4 {
            let advance =
                hmtx.advance(gid(glyph)).unwrap() as f64
                    + hvar.advance_width_delta(gid(glyph), &coords).unwrap();
            let expected = (orig_hmtx.advance(gid(glyph)).unwrap() as f64
                + orig_hvar.advance_width_delta(gid(glyph), &coords).unwrap())
                * factor;
            assert!((advance - expected).abs() <= 1.0, "{advance} vs {expected}");
        }
    }

    let mvar = font.table::<Mvar>().unwrap();
    let orig_mvar = original.table::<Mvar>().unwrap();
    let hasc = Tag::new(b"hasc");
    let delta = mvar.metric_delta(hasc, &coords(-1.0)).unwrap();
    let expected = orig_mvar.metric_delta(hasc, &coords(-1.0)).unwrap() * factor;
    assert!((delta - expected).abs() <= 0.5);
}

/// Scale every design-unit field in a list of transform values.
fn design_units(values: Vec<(TransformField, f64)>, factor: f64) -> Vec<(TransformField, f64)> {
    values
        .into_iter()
        .map(|(field, value)| {
            if field.is_design_units() {
                (field, value * factor)
            } else {
                (field, value)
            }
        })
        .collect()
}

#[rstest]
#[case(2048, 1000)]
#[case(1000, 2048)]
#[case(1000, 333)]
fn variable_composites_interpolate_consistently(#[case] from: u16, #[case] to: u16) {
    init_logging();
    let factor = to as f64 / from as f64;
    let original = test_font(from);
    let mut font = original.clone();
    scale_upem(&mut font, to).unwrap();

    let varc = font.table::<Varc>().unwrap();
    let orig_varc = original.table::<Varc>().unwrap();
    for location in [-1.0, -0.5, 0.0, 0.75, 1.0] {
        let coords = coords(location);
        for (component, orig) in varc.components().zip(orig_varc.components()) {
            let values = component
                .transform_at(varc.multi_var_store.as_ref(), &coords)
                .unwrap();
            let expected = design_units(
                orig.transform_at(orig_varc.multi_var_store.as_ref(), &coords)
                    .unwrap(),
                factor,
            );
            assert_eq!(values.len(), expected.len());
            for ((field, value), (_, expected)) in values.into_iter().zip(expected) {
                let tolerance = if field.is_design_units() { 1.0 } else { 1e-9 };
                assert!(
                    (value - expected).abs() <= tolerance,
                    "{field:?} at {location}: {value} vs {expected}"
                );
            }
        }
    }
    // axis value deltas are unitless
    let store = varc.multi_var_store.as_ref().unwrap();
    assert_eq!(store.delta_set(1), Some(&[4096, -2048][..]));
}

#[test]
fn dumps_are_deterministic() {
    init_logging();
    let mut first = test_font(2048);
    let mut second = test_font(2048);
    scale_upem(&mut first, 1000).unwrap();
    scale_upem(&mut second, 1000).unwrap();

    let dumped = serde_json::to_string_pretty(&first).unwrap();
    assert_eq!(dumped, serde_json::to_string_pretty(&second).unwrap());
    let loaded: Font = serde_json::from_str(&dumped).unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn unscaled_tables_warn_or_fail() {
    init_logging();
    let mut font = test_font(2048);
    font.insert_raw(Tag::new(b"CFF "), vec![1, 0, 4, 2]);
    let original = font.clone();

    assert_eq!(
        scale_upem_with_flags(&mut font, 1000, ScaleFlags::ERROR_ON_UNSCALED_TABLES),
        Err(ScaleError::UnsupportedTable(Tag::new(b"CFF ")))
    );
    assert_eq!(font, original);

    scale_upem(&mut font, 1000).unwrap();
    assert_eq!(font.units_per_em(), Some(1000));
    assert_eq!(font.get(Tag::new(b"CFF ")), original.get(Tag::new(b"CFF ")));
}

#[test]
fn recalc_head_bounds() {
    init_logging();
    let mut font = test_font(2048);
    scale_upem_with_flags(&mut font, 1000, ScaleFlags::RECALC_HEAD_BOUNDS).unwrap();
    let glyf = font.table::<Glyf>().unwrap();
    let expected = glyf
        .glyphs
        .iter()
        .filter_map(Glyph::bbox)
        .reduce(Bbox::union)
        .unwrap();
    let head = font.table::<Head>().unwrap();
    assert_eq!(
        Bbox {
            x_min: head.x_min,
            y_min: head.y_min,
            x_max: head.x_max,
            y_max: head.y_max,
        },
        expected
    );
}

#[test]
fn dangling_component() {
    init_logging();
    let mut font = test_font(2048);
    let glyf = font.table_mut::<Glyf>().unwrap();
    if let Some(Glyph::Composite(composite)) = glyf.get_mut(gid(2)) {
        composite.components_mut()[0].glyph = gid(40);
    }
    let original = font.clone();
    assert_eq!(
        scale_upem(&mut font, 1000),
        Err(ScaleError::DanglingComponent {
            glyph: GlyphId::new(2),
            component: GlyphId::new(40),
        })
    );
    assert_eq!(font, original);
}

#[test]
fn cyclic_component() {
    init_logging();
    let mut font = test_font(2048);
    let glyf = font.table_mut::<Glyf>().unwrap();
    if let Some(Glyph::Composite(composite)) = glyf.get_mut(gid(2)) {
        composite.add_component(component(
            3,
            Anchor::Offset { x: 0, y: 0 },
            Transform::default(),
        ));
    }
    if let Some(Glyph::Composite(composite)) = glyf.get_mut(gid(3)) {
        composite.add_component(component(
            2,
            Anchor::Offset { x: 0, y: 0 },
            Transform::default(),
        ));
    }
    let original = font.clone();
    assert!(matches!(
        scale_upem(&mut font, 1000),
        Err(ScaleError::CyclicComponent(_))
    ));
    assert_eq!(font, original);
}

#[test]
fn inconsistent_glyph_deltas() {
    init_logging();
    let mut font = test_font(2048);
    font.table_mut::<Gvar>().unwrap().glyph_variations[2].variations[0]
        .deltas
        .pop();
    let original = font.clone();
    assert!(matches!(
        scale_upem(&mut font, 1000),
        Err(ScaleError::MalformedVariations { tag, .. }) if tag == Gvar::TAG
    ));
    assert_eq!(font, original);
}

#[test]
fn overflow_is_reported() {
    init_logging();
    let mut font = test_font(1000);
    font.table_mut::<Hhea>().unwrap().ascender = FWord::new(30000);
    assert_eq!(
        scale_upem(&mut font, 2000),
        Err(ScaleError::ValueOutOfRange {
            tag: Hhea::TAG,
            value: 60000
        })
    );
}

/// A rotation whose angle deltas are shared with a variable clip box.
fn color_glyphs() -> Colr {
    Colr {
        base_glyph_list: vec![BaseGlyphPaint {
            glyph_id: gid(2),
            paint: Paint::RotateAroundCenter {
                paint: Box::new(Paint::Solid {
                    palette_index: 0,
                    alpha: f2dot14(1.0),
                    var_index_base: None,
                }),
                angle: f2dot14(0.25),
                center_x: 600,
                center_y: 701,
                var_index_base: Some(0),
            },
        }],
        clip_list: vec![Clip {
            start_glyph_id: gid(2),
            end_glyph_id: gid(3),
            clip_box: ClipBox {
                x_min: -51,
                y_min: 0,
                x_max: 1229,
                y_max: 1537,
                var_index_base: Some(0),
            },
        }],
        var_index_map: Some(DeltaSetIndexMap {
            entries: vec![
                DeltaSetIndex::new(0, 0),
                DeltaSetIndex::new(0, 1),
                DeltaSetIndex::new(0, 1),
            ],
        }),
        item_variation_store: Some(item_variation_store(vec![
            vec![2048, -1024],
            vec![301, -77],
        ])),
        ..Default::default()
    }
}

#[rstest]
#[case(2048, 1000)]
#[case(1000, 333)]
fn color_glyphs_interpolate_consistently(#[case] from: u16, #[case] to: u16) {
    init_logging();
    let factor = to as f64 / from as f64;
    let mut original = test_font(from);
    original.insert(color_glyphs());
    original.insert(Math {
        math_constants: MathConstants {
            script_percent_scale_down: 70,
            axis_height: MathValueRecord::new(250),
            ..Default::default()
        },
        ..Default::default()
    });
    let mut font = original.clone();
    scale_upem(&mut font, to).unwrap();

    let constants = &font.table::<Math>().unwrap().math_constants;
    assert_eq!(constants.script_percent_scale_down, 70);
    assert_eq!(
        constants.axis_height.value as i64,
        UpemRatio::new(from, to).unwrap().scale(250)
    );

    let colr = font.table::<Colr>().unwrap();
    let orig_colr = original.table::<Colr>().unwrap();
    let clip_box = |colr: &Colr| colr.clip_list[0].clip_box;
    let bounds = |clip_box: ClipBox| {
        [clip_box.x_min, clip_box.y_min, clip_box.x_max, clip_box.y_max]
    };
    let (scaled_box, orig_box) = (clip_box(colr), clip_box(orig_colr));
    for location in [-1.0, -0.5, 0.25, 1.0] {
        let coords = coords(location);
        // the angle is unitless
        assert_eq!(
            colr.field_delta(0, 0, &coords),
            orig_colr.field_delta(0, 0, &coords)
        );
        for (field, (value, orig)) in bounds(scaled_box)
            .into_iter()
            .zip(bounds(orig_box))
            .enumerate()
        {
            let field = field as u32;
            let value = value as f64
                + colr.field_delta(scaled_box.var_index_base.unwrap(), field, &coords);
            let expected = (orig as f64
                + orig_colr.field_delta(orig_box.var_index_base.unwrap(), field, &coords))
                * factor;
            assert!(
                (value - expected).abs() <= 1.0,
                "clip field {field} at {location}: {value} vs {expected}"
            );
        }
    }
}

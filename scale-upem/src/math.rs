//! Scale math layout constants, kerns and glyph assemblies
//!
//! The script scale-down percentages and the radical degree raise are
//! ratios and stay as they are. Device tables hold pixel adjustments.

use font_model::{
    tables::math::{
        GlyphAssembly, GlyphPart, Math, MathConstants, MathGlyphConstruction,
        MathGlyphVariantRecord, MathKern, MathKernInfoRecord, MathValueRecord,
    },
    TopLevelTable,
};

use crate::{
    ratio::{OutOfRange, ScaleInPlace},
    ScaleError, ScaleUpem, UpemRatio,
};

impl ScaleInPlace for MathValueRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.value.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MathKern {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.correction_heights.scale_in_place(ratio)?;
        self.kern_values.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MathKernInfoRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.kerns_mut()
            .try_for_each(|kern| kern.scale_in_place(ratio))
    }
}

impl ScaleInPlace for GlyphPart {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.start_connector_length.scale_in_place(ratio)?;
        self.end_connector_length.scale_in_place(ratio)?;
        self.full_advance.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MathGlyphVariantRecord {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.advance_measurement.scale_in_place(ratio)
    }
}

impl ScaleInPlace for GlyphAssembly {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.italics_correction.scale_in_place(ratio)?;
        self.part_records.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MathGlyphConstruction {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.glyph_assembly.scale_in_place(ratio)?;
        self.math_glyph_variant_records.scale_in_place(ratio)
    }
}

impl ScaleInPlace for MathConstants {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.delimited_sub_formula_min_height.scale_in_place(ratio)?;
        self.display_operator_min_height.scale_in_place(ratio)?;
        for record in [
            &mut self.math_leading,
            &mut self.axis_height,
            &mut self.accent_base_height,
            &mut self.flattened_accent_base_height,
            &mut self.subscript_shift_down,
            &mut self.subscript_top_max,
            &mut self.subscript_baseline_drop_min,
            &mut self.superscript_shift_up,
            &mut self.superscript_shift_up_cramped,
            &mut self.superscript_bottom_min,
            &mut self.superscript_baseline_drop_max,
            &mut self.sub_superscript_gap_min,
            &mut self.superscript_bottom_max_with_subscript,
            &mut self.space_after_script,
            &mut self.upper_limit_gap_min,
            &mut self.upper_limit_baseline_rise_min,
            &mut self.lower_limit_gap_min,
            &mut self.lower_limit_baseline_drop_min,
            &mut self.stack_top_shift_up,
            &mut self.stack_top_display_style_shift_up,
            &mut self.stack_bottom_shift_down,
            &mut self.stack_bottom_display_style_shift_down,
            &mut self.stack_gap_min,
            &mut self.stack_display_style_gap_min,
            &mut self.stretch_stack_top_shift_up,
            &mut self.stretch_stack_bottom_shift_down,
            &mut self.stretch_stack_gap_above_min,
            &mut self.stretch_stack_gap_below_min,
            &mut self.fraction_numerator_shift_up,
            &mut self.fraction_numerator_display_style_shift_up,
            &mut self.fraction_denominator_shift_down,
            &mut self.fraction_denominator_display_style_shift_down,
            &mut self.fraction_numerator_gap_min,
            &mut self.fraction_num_display_style_gap_min,
            &mut self.fraction_rule_thickness,
            &mut self.fraction_denominator_gap_min,
            &mut self.fraction_denom_display_style_gap_min,
            &mut self.skewed_fraction_horizontal_gap,
            &mut self.skewed_fraction_vertical_gap,
            &mut self.overbar_vertical_gap,
            &mut self.overbar_rule_thickness,
            &mut self.overbar_extra_ascender,
            &mut self.underbar_vertical_gap,
            &mut self.underbar_rule_thickness,
            &mut self.underbar_extra_descender,
            &mut self.radical_vertical_gap,
            &mut self.radical_display_style_vertical_gap,
            &mut self.radical_rule_thickness,
            &mut self.radical_extra_ascender,
            &mut self.radical_kern_before_degree,
            &mut self.radical_kern_after_degree,
        ] {
            record.scale_in_place(ratio)?;
        }
        Ok(())
    }
}

impl ScaleUpem for Math {
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError> {
        ratio.apply(&mut self.math_constants, Math::TAG)?;

        let info = &mut self.math_glyph_info;
        ratio.apply(
            &mut info.math_italics_correction_info.italics_correction,
            Math::TAG,
        )?;
        ratio.apply(
            &mut info.math_top_accent_attachment.top_accent_attachment,
            Math::TAG,
        )?;
        ratio.apply(&mut info.math_kern_info.math_kern_info, Math::TAG)?;

        let variants = &mut self.math_variants;
        ratio.apply(&mut variants.min_connector_overlap, Math::TAG)?;
        ratio.apply(&mut variants.vert_glyph_construction, Math::TAG)?;
        ratio.apply(&mut variants.horiz_glyph_construction, Math::TAG)
    }
}

#[cfg(test)]
mod tests {
    use font_model::tables::{
        layout::Device,
        math::{MathGlyphInfo, MathItalicsCorrectionInfo, MathKernInfo, MathVariants},
    };
    use font_types::GlyphId16;
    use pretty_assertions::assert_eq;

    use super::*;

    fn records(values: &[i16]) -> Vec<MathValueRecord> {
        values.iter().copied().map(MathValueRecord::new).collect()
    }

    fn ratio(from: u16, to: u16) -> UpemRatio {
        UpemRatio::new(from, to).unwrap()
    }

    #[test]
    fn constants_keep_percentages() {
        let device = Device {
            start_size: 12,
            end_size: 13,
            delta_format: 1,
            deltas: vec![1, -1],
        };
        let mut math = Math {
            math_constants: MathConstants {
                script_percent_scale_down: 80,
                script_script_percent_scale_down: 60,
                delimited_sub_formula_min_height: 1500,
                display_operator_min_height: 1300,
                axis_height: MathValueRecord {
                    value: 250,
                    device: Some(device.clone()),
                },
                radical_kern_after_degree: MathValueRecord::new(-555),
                radical_degree_bottom_raise_percent: 60,
                ..Default::default()
            },
            ..Default::default()
        };
        math.scale_upem(ratio(1000, 2048)).unwrap();

        let constants = &math.math_constants;
        assert_eq!(constants.script_percent_scale_down, 80);
        assert_eq!(constants.script_script_percent_scale_down, 60);
        assert_eq!(constants.radical_degree_bottom_raise_percent, 60);
        assert_eq!(constants.delimited_sub_formula_min_height, 3072);
        assert_eq!(constants.display_operator_min_height, 2662);
        assert_eq!(
            constants.axis_height,
            MathValueRecord {
                value: 512,
                device: Some(device),
            }
        );
        assert_eq!(constants.radical_kern_after_degree.value, -1137);
        assert_eq!(constants.math_leading.value, 0);
    }

    #[test]
    fn glyph_info_and_kerns() {
        let coverage = || [2u16, 9].into_iter().map(GlyphId16::new).collect();
        let mut math = Math {
            math_glyph_info: MathGlyphInfo {
                math_italics_correction_info: MathItalicsCorrectionInfo {
                    coverage: coverage(),
                    italics_correction: records(&[41, 100]),
                },
                math_kern_info: MathKernInfo {
                    coverage: coverage(),
                    math_kern_info: vec![MathKernInfoRecord {
                        bottom_left_math_kern: Some(MathKern {
                            correction_heights: records(&[-100, 300]),
                            kern_values: records(&[-60, -21, 0]),
                        }),
                        ..Default::default()
                    }],
                },
                ..Default::default()
            },
            ..Default::default()
        };
        math.scale_upem(ratio(2, 1)).unwrap();

        let info = &math.math_glyph_info;
        let italics = &info.math_italics_correction_info;
        assert_eq!(italics.get(GlyphId16::new(2)).map(|r| r.value), Some(21));
        assert_eq!(italics.get(GlyphId16::new(9)).map(|r| r.value), Some(50));
        let kern = info.math_kern_info.math_kern_info[0]
            .bottom_left_math_kern
            .as_ref()
            .unwrap();
        assert_eq!(kern.correction_heights, records(&[-50, 150]));
        assert_eq!(kern.kern_values, records(&[-30, -11, 0]));
        assert_eq!(kern.kern_at(100), Some(-11));
    }

    #[test]
    fn assemblies() {
        let part = |glyph, end_connector_length, full_advance, part_flags| GlyphPart {
            glyph_id: GlyphId16::new(glyph),
            start_connector_length: 0,
            end_connector_length,
            full_advance,
            part_flags,
        };
        let mut math = Math {
            math_variants: MathVariants {
                min_connector_overlap: 25,
                vert_glyph_coverage: [GlyphId16::new(30)].into_iter().collect(),
                vert_glyph_construction: vec![MathGlyphConstruction {
                    glyph_assembly: Some(GlyphAssembly {
                        italics_correction: MathValueRecord::new(7),
                        part_records: vec![
                            part(31, 150, 600, 0),
                            part(32, 150, 301, GlyphPart::EXTENDER_FLAG),
                        ],
                    }),
                    math_glyph_variant_records: vec![MathGlyphVariantRecord {
                        variant_glyph: GlyphId16::new(33),
                        advance_measurement: 1201,
                    }],
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        math.scale_upem(ratio(1000, 500)).unwrap();

        let variants = &math.math_variants;
        assert_eq!(variants.min_connector_overlap, 13);
        let construction = &variants.vert_glyph_construction[0];
        let assembly = construction.glyph_assembly.as_ref().unwrap();
        assert_eq!(assembly.italics_correction.value, 4);
        assert_eq!(
            assembly.part_records,
            vec![
                part(31, 75, 300, 0),
                part(32, 75, 151, GlyphPart::EXTENDER_FLAG)
            ]
        );
        assert_eq!(
            construction.math_glyph_variant_records[0].advance_measurement,
            601
        );
    }

    #[test]
    fn overflow_names_the_table() {
        let mut math = Math {
            math_constants: MathConstants {
                display_operator_min_height: 40000,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            math.scale_upem(ratio(1000, 2000)),
            Err(ScaleError::ValueOutOfRange {
                tag: Math::TAG,
                value: 80000,
            })
        );
    }
}

//! The [MATH](https://learn.microsoft.com/en-us/typography/opentype/spec/math) table

use font_types::GlyphId16;

use super::layout::{CoverageTable, Device};

/// Mathematical typesetting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Math {
    pub math_constants: MathConstants,
    pub math_glyph_info: MathGlyphInfo,
    pub math_variants: MathVariants,
}

/// [Math Value Record](https://learn.microsoft.com/en-gb/typography/opentype/spec/math#mathvaluerecord)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathValueRecord {
    /// The X or Y value in design units
    pub value: i16,
    pub device: Option<Device>,
}

impl MathValueRecord {
    pub fn new(value: i16) -> Self {
        MathValueRecord {
            value,
            device: None,
        }
    }
}

/// [Math Constants](https://learn.microsoft.com/en-gb/typography/opentype/spec/math#mathconstants-table)
///
/// The two percentages and the radical degree raise are ratios; every other
/// field is in design units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathConstants {
    pub script_percent_scale_down: i16,
    pub script_script_percent_scale_down: i16,
    pub delimited_sub_formula_min_height: u16,
    pub display_operator_min_height: u16,
    pub math_leading: MathValueRecord,
    pub axis_height: MathValueRecord,
    pub accent_base_height: MathValueRecord,
    pub flattened_accent_base_height: MathValueRecord,
    pub subscript_shift_down: MathValueRecord,
    pub subscript_top_max: MathValueRecord,
    pub subscript_baseline_drop_min: MathValueRecord,
    pub superscript_shift_up: MathValueRecord,
    pub superscript_shift_up_cramped: MathValueRecord,
    pub superscript_bottom_min: MathValueRecord,
    pub superscript_baseline_drop_max: MathValueRecord,
    pub sub_superscript_gap_min: MathValueRecord,
    pub superscript_bottom_max_with_subscript: MathValueRecord,
    pub space_after_script: MathValueRecord,
    pub upper_limit_gap_min: MathValueRecord,
    pub upper_limit_baseline_rise_min: MathValueRecord,
    pub lower_limit_gap_min: MathValueRecord,
    pub lower_limit_baseline_drop_min: MathValueRecord,
    pub stack_top_shift_up: MathValueRecord,
    pub stack_top_display_style_shift_up: MathValueRecord,
    pub stack_bottom_shift_down: MathValueRecord,
    pub stack_bottom_display_style_shift_down: MathValueRecord,
    pub stack_gap_min: MathValueRecord,
    pub stack_display_style_gap_min: MathValueRecord,
    pub stretch_stack_top_shift_up: MathValueRecord,
    pub stretch_stack_bottom_shift_down: MathValueRecord,
    pub stretch_stack_gap_above_min: MathValueRecord,
    pub stretch_stack_gap_below_min: MathValueRecord,
    pub fraction_numerator_shift_up: MathValueRecord,
    pub fraction_numerator_display_style_shift_up: MathValueRecord,
    pub fraction_denominator_shift_down: MathValueRecord,
    pub fraction_denominator_display_style_shift_down: MathValueRecord,
    pub fraction_numerator_gap_min: MathValueRecord,
    pub fraction_num_display_style_gap_min: MathValueRecord,
    pub fraction_rule_thickness: MathValueRecord,
    pub fraction_denominator_gap_min: MathValueRecord,
    pub fraction_denom_display_style_gap_min: MathValueRecord,
    pub skewed_fraction_horizontal_gap: MathValueRecord,
    pub skewed_fraction_vertical_gap: MathValueRecord,
    pub overbar_vertical_gap: MathValueRecord,
    pub overbar_rule_thickness: MathValueRecord,
    pub overbar_extra_ascender: MathValueRecord,
    pub underbar_vertical_gap: MathValueRecord,
    pub underbar_rule_thickness: MathValueRecord,
    pub underbar_extra_descender: MathValueRecord,
    pub radical_vertical_gap: MathValueRecord,
    pub radical_display_style_vertical_gap: MathValueRecord,
    pub radical_rule_thickness: MathValueRecord,
    pub radical_extra_ascender: MathValueRecord,
    pub radical_kern_before_degree: MathValueRecord,
    pub radical_kern_after_degree: MathValueRecord,
    pub radical_degree_bottom_raise_percent: i16,
}

/// [MathGlyphInfo](https://learn.microsoft.com/en-gb/typography/opentype/spec/math#mathglyphinfo-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathGlyphInfo {
    pub math_italics_correction_info: MathItalicsCorrectionInfo,
    pub math_top_accent_attachment: MathTopAccentAttachment,
    pub extended_shape_coverage: Option<CoverageTable>,
    pub math_kern_info: MathKernInfo,
}

/// Italics corrections, one per covered glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathItalicsCorrectionInfo {
    pub coverage: CoverageTable,
    pub italics_correction: Vec<MathValueRecord>,
}

impl MathItalicsCorrectionInfo {
    pub fn get(&self, gid: GlyphId16) -> Option<&MathValueRecord> {
        self.italics_correction
            .get(self.coverage.get(gid)? as usize)
    }
}

/// Horizontal accent attachment positions, one per covered glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathTopAccentAttachment {
    pub top_accent_coverage: CoverageTable,
    pub top_accent_attachment: Vec<MathValueRecord>,
}

impl MathTopAccentAttachment {
    pub fn get(&self, gid: GlyphId16) -> Option<&MathValueRecord> {
        self.top_accent_attachment
            .get(self.top_accent_coverage.get(gid)? as usize)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathKernInfo {
    pub coverage: CoverageTable,
    pub math_kern_info: Vec<MathKernInfoRecord>,
}

/// The kerns at the four corners of a glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathKernInfoRecord {
    pub top_right_math_kern: Option<MathKern>,
    pub top_left_math_kern: Option<MathKern>,
    pub bottom_right_math_kern: Option<MathKern>,
    pub bottom_left_math_kern: Option<MathKern>,
}

impl MathKernInfoRecord {
    pub fn kerns_mut(&mut self) -> impl Iterator<Item = &mut MathKern> {
        [
            &mut self.top_right_math_kern,
            &mut self.top_left_math_kern,
            &mut self.bottom_right_math_kern,
            &mut self.bottom_left_math_kern,
        ]
        .into_iter()
        .flatten()
    }
}

/// A kern that changes with height.
///
/// There is one more kern value than there are correction heights.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathKern {
    /// Sorted from lowest to highest.
    pub correction_heights: Vec<MathValueRecord>,
    pub kern_values: Vec<MathValueRecord>,
}

impl MathKern {
    /// The kern that applies at `height`.
    pub fn kern_at(&self, height: i16) -> Option<i16> {
        let ix = self
            .correction_heights
            .iter()
            .take_while(|h| h.value <= height)
            .count();
        self.kern_values.get(ix).map(|kern| kern.value)
    }
}

/// [MathVariants](https://learn.microsoft.com/en-gb/typography/opentype/spec/math#mathvariants-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathVariants {
    pub min_connector_overlap: u16,
    pub vert_glyph_coverage: CoverageTable,
    pub horiz_glyph_coverage: CoverageTable,
    pub vert_glyph_construction: Vec<MathGlyphConstruction>,
    pub horiz_glyph_construction: Vec<MathGlyphConstruction>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathGlyphConstruction {
    pub glyph_assembly: Option<GlyphAssembly>,
    pub math_glyph_variant_records: Vec<MathGlyphVariantRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathGlyphVariantRecord {
    pub variant_glyph: GlyphId16,
    /// Advance, in design units, in the direction of extension.
    pub advance_measurement: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphAssembly {
    pub italics_correction: MathValueRecord,
    /// Left to right, or bottom to top.
    pub part_records: Vec<GlyphPart>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphPart {
    pub glyph_id: GlyphId16,
    pub start_connector_length: u16,
    pub end_connector_length: u16,
    pub full_advance: u16,
    pub part_flags: u16,
}

impl GlyphPart {
    /// Set on parts that may be skipped or repeated.
    pub const EXTENDER_FLAG: u16 = 0x0001;

    pub fn is_extender(&self) -> bool {
        self.part_flags & Self::EXTENDER_FLAG != 0
    }
}

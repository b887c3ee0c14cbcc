//! Change the units-per-em of a font.
//!
//! Every value a font stores in design units is multiplied by the exact
//! ratio between the new and the current units-per-em, and rounded half away
//! from zero. Unitless data is left alone: component transforms, variation
//! regions and tuples, flags, and hinting programs.
//!
//! ```
//! use font_model::{tables::{head::Head, hhea::Hhea}, types::FWord, Font};
//!
//! let mut font = Font::new();
//! font.insert(Head { units_per_em: 2048, ..Default::default() });
//! font.insert(Hhea { ascender: FWord::new(1536), ..Default::default() });
//!
//! scale_upem::scale_upem(&mut font, 1000).unwrap();
//! assert_eq!(font.units_per_em(), Some(1000));
//! assert_eq!(font.table::<Hhea>().unwrap().ascender, FWord::new(750));
//! ```
//!
//! Tables the model keeps as raw bytes cannot be rescaled. See
//! [`ScaleFlags::ERROR_ON_UNSCALED_TABLES`] for how they are handled.

#![forbid(unsafe_code)]

mod base;
mod colr;
mod error;
mod gdef;
mod glyf;
mod gpos;
mod gvar;
mod head;
mod hmtx;
mod hvhea;
mod kern;
mod math;
mod os2;
mod post;
mod ratio;
mod validate;
mod varc;
mod variations;
mod vorg;

use font_model::{
    tables::{glyf::Glyf, head::Head, kern::KernSubtable},
    Font, Table, TopLevelTable,
};
use font_types::Tag;

pub use error::ScaleError;
pub use ratio::{OutOfRange, Scale, UpemRatio};

/// A table that holds values in design units.
pub trait ScaleUpem {
    /// Rescale every design-unit value in this table, in place.
    ///
    /// On error the table may be partially scaled.
    fn scale_upem(&mut self, ratio: UpemRatio) -> Result<(), ScaleError>;
}

/// Options controlling [`scale_upem_with_flags`].
#[derive(Clone, Copy, Debug)]
pub struct ScaleFlags(u16);

impl ScaleFlags {
    /// All flags unset.
    pub const DEFAULT: Self = Self(0x0000);

    /// Fail with [`ScaleError::UnsupportedTable`] instead of logging a
    /// warning when a table holding design units cannot be rescaled.
    ///
    /// Tables that hold no design units, and hinting tables, never fail.
    pub const ERROR_ON_UNSCALED_TABLES: Self = Self(0x0001);

    /// Recompute the `head` bounding box from the scaled glyph bounds,
    /// rather than scaling the stored values.
    pub const RECALC_HEAD_BOUNDS: Self = Self(0x0002);

    /// Returns `true` if all of the flags in `other` are contained within `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl Default for ScaleFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialEq for ScaleFlags {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::ops::BitOr for ScaleFlags {
    type Output = Self;

    /// Returns the union of the two sets of flags.
    #[inline]
    fn bitor(self, other: ScaleFlags) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOrAssign for ScaleFlags {
    /// Adds the set of flags.
    #[inline]
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl From<u16> for ScaleFlags {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Raw tables whose contents hold no design units.
const UNITLESS_TABLES: &[Tag] = &[
    Tag::new(b"cmap"),
    Tag::new(b"name"),
    Tag::new(b"maxp"),
    Tag::new(b"loca"),
    Tag::new(b"fvar"),
    Tag::new(b"avar"),
    Tag::new(b"STAT"),
    Tag::new(b"GSUB"),
    Tag::new(b"gasp"),
    Tag::new(b"hdmx"),
    Tag::new(b"LTSH"),
    Tag::new(b"VDMX"),
    Tag::new(b"meta"),
    Tag::new(b"DSIG"),
    Tag::new(b"CPAL"),
    Tag::new(b"EBDT"),
    Tag::new(b"EBLC"),
    Tag::new(b"EBSC"),
    Tag::new(b"CBDT"),
    Tag::new(b"CBLC"),
    Tag::new(b"sbix"),
    Tag::new(b"feat"),
    Tag::new(b"morx"),
    Tag::new(b"mort"),
    Tag::new(b"ltag"),
];

const HINTING_TABLES: &[Tag] = &[
    Tag::new(b"cvt "),
    Tag::new(b"fpgm"),
    Tag::new(b"prep"),
    Tag::new(b"cvar"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawTableKind {
    Unitless,
    Hinting,
    /// Holds design units we cannot reach.
    Unscaled,
}

fn classify_raw_table(tag: Tag) -> RawTableKind {
    if UNITLESS_TABLES.contains(&tag) {
        RawTableKind::Unitless
    } else if HINTING_TABLES.contains(&tag) {
        RawTableKind::Hinting
    } else {
        RawTableKind::Unscaled
    }
}

/// Rescale a font to `new_upem` units per em, with default flags.
///
/// See [`scale_upem_with_flags`].
pub fn scale_upem(font: &mut Font, new_upem: u16) -> Result<(), ScaleError> {
    scale_upem_with_flags(font, new_upem, ScaleFlags::default())
}

/// Rescale a font to `new_upem` units per em.
///
/// Arguments and the integrity of the font are checked before any table is
/// modified. An error raised while scaling leaves the font partially
/// scaled; callers that need to recover should keep a copy.
pub fn scale_upem_with_flags(
    font: &mut Font,
    new_upem: u16,
    flags: ScaleFlags,
) -> Result<(), ScaleError> {
    if new_upem == 0 {
        return Err(ScaleError::InvalidTargetUpem(new_upem));
    }
    let current = font
        .units_per_em()
        .ok_or(ScaleError::MissingTable(Head::TAG))?;
    let ratio = UpemRatio::new(current, new_upem).ok_or(ScaleError::InvalidCurrentUpem(current))?;

    validate::validate_font(font)?;
    check_unscaled_tables(font, flags)?;

    if ratio.is_identity() {
        log::info!("font is already at {new_upem} units per em");
    } else {
        log::info!("scaling font from {current} to {new_upem} units per em");
        for (tag, table) in font.iter_mut() {
            log::debug!("scaling '{tag}' ({})", table.kind());
            scale_table(table, ratio)
                .inspect_err(|e| log::warn!("failed to scale '{tag}': {e}"))?;
        }
    }

    if flags.contains(ScaleFlags::RECALC_HEAD_BOUNDS) {
        if let Some(bbox) = font.table::<Glyf>().and_then(head::glyph_bounds) {
            if let Some(head) = font.table_mut::<Head>() {
                head::set_bounds(head, bbox);
            }
        }
    }
    Ok(())
}

fn scale_table(table: &mut Table, ratio: UpemRatio) -> Result<(), ScaleError> {
    match table {
        Table::Head(table) => table.scale_upem(ratio),
        Table::Hhea(table) => table.scale_upem(ratio),
        Table::Vhea(table) => table.scale_upem(ratio),
        Table::Hmtx(table) => table.scale_upem(ratio),
        Table::Vmtx(table) => table.scale_upem(ratio),
        Table::Os2(table) => table.scale_upem(ratio),
        Table::Post(table) => table.scale_upem(ratio),
        Table::Vorg(table) => table.scale_upem(ratio),
        Table::Glyf(table) => table.scale_upem(ratio),
        Table::Gvar(table) => table.scale_upem(ratio),
        Table::Hvar(table) => table.scale_upem(ratio),
        Table::Vvar(table) => table.scale_upem(ratio),
        Table::Mvar(table) => table.scale_upem(ratio),
        Table::Gdef(table) => table.scale_upem(ratio),
        Table::Gpos(table) => table.scale_upem(ratio),
        Table::Base(table) => table.scale_upem(ratio),
        Table::Math(table) => table.scale_upem(ratio),
        Table::Colr(table) => table.scale_upem(ratio),
        Table::Kern(table) => table.scale_upem(ratio),
        Table::Varc(table) => table.scale_upem(ratio),
        Table::Raw(_) => Ok(()),
    }
}

/// Report tables whose design units will be left unscaled.
fn check_unscaled_tables(font: &Font, flags: ScaleFlags) -> Result<(), ScaleError> {
    let strict = flags.contains(ScaleFlags::ERROR_ON_UNSCALED_TABLES);
    for (tag, table) in font.iter() {
        let unscaled = match table {
            Table::Raw(_) => match classify_raw_table(tag) {
                RawTableKind::Unitless => {
                    log::debug!("'{tag}' holds no design units");
                    false
                }
                RawTableKind::Hinting => {
                    log::warn!("'{tag}' is not rescaled, hinting may need to be regenerated");
                    false
                }
                RawTableKind::Unscaled => true,
            },
            Table::Kern(kern) => kern
                .subtables
                .iter()
                .any(|subtable| matches!(subtable, KernSubtable::Other { .. })),
            Table::Gpos(gpos) => gpos
                .lookups
                .iter()
                .any(|lookup| lookup.subtables.has_opaque_values()),
            _ => false,
        };
        if !unscaled {
            continue;
        }
        if strict {
            return Err(ScaleError::UnsupportedTable(tag));
        }
        log::warn!("'{tag}' contains design units that will not be rescaled");
    }
    Ok(())
}

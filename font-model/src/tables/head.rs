//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use font_types::{Fixed, LongDateTime};

/// The font header.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Head {
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub flags: u16,
    /// The size of the design grid; valid values are 16 through 16384.
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    /// Minimum x over all glyph bounding boxes.
    pub x_min: i16,
    /// Minimum y over all glyph bounding boxes.
    pub y_min: i16,
    /// Maximum x over all glyph bounding boxes.
    pub x_max: i16,
    /// Maximum y over all glyph bounding boxes.
    pub y_max: i16,
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    /// 0 for short offsets in `loca`, 1 for long.
    pub index_to_loc_format: i16,
}

impl Default for Head {
    fn default() -> Self {
        Head {
            font_revision: Fixed::ONE,
            checksum_adjustment: 0,
            flags: 0,
            units_per_em: 1000,
            created: LongDateTime::new(0),
            modified: LongDateTime::new(0),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: 0,
            lowest_rec_ppem: 6,
            font_direction_hint: 2,
            index_to_loc_format: 0,
        }
    }
}

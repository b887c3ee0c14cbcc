//! Exact rational scaling of design-unit values

use font_types::{FWord, Fixed, Point, Tag, UfWord};

use crate::ScaleError;

/// The ratio between the new and the current units-per-em.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UpemRatio {
    from: u16,
    to: u16,
}

/// A scaled value that does not fit in the field it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange(pub i64);

impl UpemRatio {
    /// Returns `None` if either value is zero.
    pub fn new(from: u16, to: u16) -> Option<Self> {
        (from != 0 && to != 0).then_some(UpemRatio { from, to })
    }

    pub fn from_upem(&self) -> u16 {
        self.from
    }

    pub fn to_upem(&self) -> u16 {
        self.to
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// `round(value * to / from)`, rounding halves away from zero.
    ///
    /// Every `i32` input has an exact `i64` result.
    pub fn scale(&self, value: i32) -> i64 {
        let num = value as i64 * self.to as i64;
        let den = self.from as i64;
        let magnitude = (num.abs() * 2 + den) / (den * 2);
        if num < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The same as [`scale`](Self::scale), for values stored as floats.
    pub fn scale_f64(&self, value: f64) -> f64 {
        (value * self.to as f64 / self.from as f64).round()
    }

    /// Scale a record in place, attributing overflow to the table `tag`.
    pub(crate) fn apply<T: ScaleInPlace>(self, value: &mut T, tag: Tag) -> Result<(), ScaleError> {
        value
            .scale_in_place(self)
            .map_err(ScaleError::out_of_range(tag))
    }
}

/// A value in design units.
pub trait Scale: Sized {
    fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange>;
}

macro_rules! scale_int {
    ($($ty:ty),*) => {
        $(
            impl Scale for $ty {
                fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange> {
                    let scaled = ratio.scale(i32::from(self));
                    <$ty>::try_from(scaled).map_err(|_| OutOfRange(scaled))
                }
            }
        )*
    };
}

scale_int!(i16, u16, i32);

impl Scale for FWord {
    fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange> {
        self.to_i16().scale(ratio).map(FWord::new)
    }
}

impl Scale for UfWord {
    fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange> {
        self.to_u16().scale(ratio).map(UfWord::new)
    }
}

/// Rounded to the nearest 1/65536; overflow reports the integer part.
impl Scale for Fixed {
    fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange> {
        let bits = (self.to_f64() * 65536.0) as i32;
        let scaled = ratio.scale(bits);
        i32::try_from(scaled)
            .map(|bits| Fixed::from_f64(bits as f64 / 65536.0))
            .map_err(|_| OutOfRange(scaled >> 16))
    }
}

impl<T: Scale> Scale for Point<T> {
    fn scale(self, ratio: UpemRatio) -> Result<Self, OutOfRange> {
        Ok(Point::new(self.x.scale(ratio)?, self.y.scale(ratio)?))
    }
}

/// Scale every design-unit value held by a record, in place.
pub(crate) trait ScaleInPlace {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange>;
}

macro_rules! scale_in_place_via_scale {
    ($($ty:ty),*) => {
        $(
            impl ScaleInPlace for $ty {
                fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
                    *self = self.scale(ratio)?;
                    Ok(())
                }
            }
        )*
    };
}

scale_in_place_via_scale!(i16, u16, i32, FWord, UfWord, Fixed);

impl<T: ScaleInPlace> ScaleInPlace for Option<T> {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        match self {
            Some(inner) => inner.scale_in_place(ratio),
            None => Ok(()),
        }
    }
}

impl<T: ScaleInPlace> ScaleInPlace for Vec<T> {
    fn scale_in_place(&mut self, ratio: UpemRatio) -> Result<(), OutOfRange> {
        self.iter_mut()
            .try_for_each(|item| item.scale_in_place(ratio))
    }
}

//! A directory of all the modelled font tables.

pub mod base;
pub mod colr;
pub mod gdef;
pub mod glyf;
pub mod gpos;
pub mod gvar;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod hvar;
pub mod kern;
pub mod layout;
pub mod math;
pub mod mvar;
pub mod os2;
pub mod post;
pub mod variations;
pub mod varc;
pub mod vhea;
pub mod vmtx;
pub mod vorg;
pub mod vvar;

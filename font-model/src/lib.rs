//! Owned, mutable OpenType tables
//!
//! This crate provides a typed, in-memory model of a font: a collection of
//! tables keyed by [`Tag`](types::Tag), where the tables that carry metric or
//! outline data are decoded into plain structs with public fields and every
//! other table is kept as opaque bytes.
//!
//! The model is the working representation for whole-font transformations
//! such as rescaling the design grid. Reading and writing the binary format is
//! the job of a separate codec; behind the `serde` feature every type here can
//! also be dumped to (and loaded from) any serde data format.
//!
//! The root [`tables`] module contains a submodule for each modelled table,
//! and that submodule contains items for each table and record it needs.
//!
//! # Example
//!
//! ```
//! use font_model::{tables::head::Head, Font};
//!
//! let mut font = Font::new();
//! font.insert(Head {
//!     units_per_em: 1000,
//!     ..Default::default()
//! });
//! assert_eq!(font.units_per_em(), Some(1000));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font;
pub mod tables;

pub use font::{Font, Table, TopLevelTable};

/// Public re-export of the font-types crate.
pub extern crate font_types as types;

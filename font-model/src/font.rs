//! The font container and the set of modelled tables

use std::collections::BTreeMap;

use font_types::Tag;

use crate::tables;

/// A table that can be stored at the top level of a [`Font`].
pub trait TopLevelTable: Sized + Into<Table> {
    /// The tag under which this table is stored.
    const TAG: Tag;

    /// Borrow this table out of a [`Table`], if the variant matches.
    fn from_table(table: &Table) -> Option<&Self>;

    /// Mutably borrow this table out of a [`Table`], if the variant matches.
    fn from_table_mut(table: &mut Table) -> Option<&mut Self>;
}

macro_rules! table_kinds {
    ($($variant:ident($ty:ty) => $tag:literal,)*) => {
        /// A single top-level table.
        ///
        /// Tables whose contents are modelled have their own variant; anything
        /// else is carried as [`Table::Raw`] bytes.
        #[derive(Clone, Debug, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Table {
            $( $variant($ty), )*
            /// A table that is not modelled, kept as its encoded bytes.
            Raw(Vec<u8>),
        }

        impl Table {
            /// A short name for this kind of table, used in diagnostics.
            pub fn kind(&self) -> &'static str {
                match self {
                    $( Table::$variant(_) => stringify!($variant), )*
                    Table::Raw(_) => "Raw",
                }
            }
        }

        $(
            impl TopLevelTable for $ty {
                const TAG: Tag = Tag::new($tag);

                fn from_table(table: &Table) -> Option<&Self> {
                    match table {
                        Table::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_table_mut(table: &mut Table) -> Option<&mut Self> {
                    match table {
                        Table::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Table {
                fn from(src: $ty) -> Table {
                    Table::$variant(src)
                }
            }
        )*
    };
}

table_kinds! {
    Head(tables::head::Head) => b"head",
    Hhea(tables::hhea::Hhea) => b"hhea",
    Vhea(tables::vhea::Vhea) => b"vhea",
    Hmtx(tables::hmtx::Hmtx) => b"hmtx",
    Vmtx(tables::vmtx::Vmtx) => b"vmtx",
    Os2(tables::os2::Os2) => b"OS/2",
    Post(tables::post::Post) => b"post",
    Vorg(tables::vorg::Vorg) => b"VORG",
    Glyf(tables::glyf::Glyf) => b"glyf",
    Gvar(tables::gvar::Gvar) => b"gvar",
    Hvar(tables::hvar::Hvar) => b"HVAR",
    Vvar(tables::vvar::Vvar) => b"VVAR",
    Mvar(tables::mvar::Mvar) => b"MVAR",
    Gdef(tables::gdef::Gdef) => b"GDEF",
    Gpos(tables::gpos::Gpos) => b"GPOS",
    Base(tables::base::Base) => b"BASE",
    Math(tables::math::Math) => b"MATH",
    Colr(tables::colr::Colr) => b"COLR",
    Kern(tables::kern::Kern) => b"kern",
    Varc(tables::varc::Varc) => b"VARC",
}

/// A font: a set of tables, keyed and ordered by tag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<(Tag, Table)>", into = "Vec<(Tag, Table)>")
)]
pub struct Font {
    tables: BTreeMap<Tag, Table>,
}

impl Font {
    /// Create a new, empty font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a modelled table, returning the previous table with that tag.
    pub fn insert<T: TopLevelTable>(&mut self, table: T) -> Option<Table> {
        self.tables.insert(T::TAG, table.into())
    }

    /// Insert an unmodelled table as raw bytes.
    pub fn insert_raw(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> Option<Table> {
        self.tables.insert(tag, Table::Raw(data.into()))
    }

    pub fn get(&self, tag: Tag) -> Option<&Table> {
        self.tables.get(&tag)
    }

    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Table> {
        self.tables.get_mut(&tag)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Table> {
        self.tables.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// The tags of all tables, in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Table)> + '_ {
        self.tables.iter().map(|(tag, table)| (*tag, table))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Tag, &mut Table)> + '_ {
        self.tables.iter_mut().map(|(tag, table)| (*tag, table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Return the table of type `T`, if present and modelled.
    pub fn table<T: TopLevelTable>(&self) -> Option<&T> {
        self.tables.get(&T::TAG).and_then(T::from_table)
    }

    /// Return a mutable reference to the table of type `T`, if present and modelled.
    pub fn table_mut<T: TopLevelTable>(&mut self) -> Option<&mut T> {
        self.tables.get_mut(&T::TAG).and_then(T::from_table_mut)
    }

    /// The declared units-per-em, read from the `head` table.
    pub fn units_per_em(&self) -> Option<u16> {
        self.table::<tables::head::Head>().map(|head| head.units_per_em)
    }

    /// Overwrite the declared units-per-em.
    ///
    /// Only the `head` field changes; no other value is rescaled. Returns
    /// `false` if the font has no `head` table.
    pub fn set_units_per_em(&mut self, units_per_em: u16) -> bool {
        match self.table_mut::<tables::head::Head>() {
            Some(head) => {
                head.units_per_em = units_per_em;
                true
            }
            None => false,
        }
    }
}

impl From<Vec<(Tag, Table)>> for Font {
    fn from(src: Vec<(Tag, Table)>) -> Font {
        Font {
            tables: src.into_iter().collect(),
        }
    }
}

impl From<Font> for Vec<(Tag, Table)> {
    fn from(src: Font) -> Vec<(Tag, Table)> {
        src.tables.into_iter().collect()
    }
}

impl FromIterator<(Tag, Table)> for Font {
    fn from_iter<I: IntoIterator<Item = (Tag, Table)>>(iter: I) -> Self {
        Font {
            tables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tables::{head::Head, hhea::Hhea, post::Post};

    #[test]
    fn typed_access() {
        let mut font = Font::new();
        font.insert(Head {
            units_per_em: 2048,
            ..Default::default()
        });
        font.insert_raw(Tag::new(b"cmap"), vec![0, 0, 0, 1]);

        assert_eq!(font.len(), 2);
        assert_eq!(font.units_per_em(), Some(2048));
        assert!(font.table::<Hhea>().is_none());
        assert!(font.contains(Tag::new(b"cmap")));
        assert_eq!(font.get(Tag::new(b"cmap")).map(Table::kind), Some("Raw"));
    }

    #[test]
    fn raw_table_under_modelled_tag_is_not_typed() {
        let mut font = Font::new();
        font.insert_raw(Post::TAG, vec![1, 2, 3]);
        assert!(font.table::<Post>().is_none());
    }

    #[test]
    fn set_units_per_em_only_touches_head() {
        let mut font = Font::new();
        assert!(!font.set_units_per_em(1000));
        font.insert(Head {
            units_per_em: 2048,
            x_max: 100,
            ..Default::default()
        });
        assert!(font.set_units_per_em(1000));
        let head = font.table::<Head>().unwrap();
        assert_eq!(head.units_per_em, 1000);
        assert_eq!(head.x_max, 100);
    }

    #[test]
    fn tags_are_ordered() {
        let font: Font = [
            (Tag::new(b"post"), Table::Raw(vec![])),
            (Tag::new(b"OS/2"), Table::Raw(vec![])),
            (Tag::new(b"cmap"), Table::Raw(vec![])),
        ]
        .into_iter()
        .collect();
        let tags: Vec<_> = font.tags().collect();
        assert_eq!(
            tags,
            [Tag::new(b"OS/2"), Tag::new(b"cmap"), Tag::new(b"post")]
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_round_trip() {
        let mut font = Font::new();
        font.insert(Head {
            units_per_em: 2048,
            y_min: -200,
            ..Default::default()
        });
        font.insert_raw(Tag::new(b"fpgm"), vec![0xb0, 0x01]);

        let dumped = serde_json::to_string(&font).unwrap();
        let loaded: Font = serde_json::from_str(&dumped).unwrap();
        assert_eq!(loaded, font);
        assert_eq!(serde_json::to_string(&loaded).unwrap(), dumped);
    }

    #[test]
    fn font_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Font>();
    }
}

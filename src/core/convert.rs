//! Dense index conversions for the small enums used as table keys

use anyhow::Result;

pub trait FromIndex: Sized {
    fn from_index(idx: usize) -> Result<Self>;
}

pub trait ToIndex {
    fn to_index(&self) -> Result<usize>;
}

/// Enums with a fixed number of variants, addressable as `0..COUNT`
pub trait Indexed: FromIndex + ToIndex {
    const COUNT: usize;

    /// Every variant in index order
    fn all() -> Vec<Self> {
        (0..Self::COUNT)
            .filter_map(|idx| Self::from_index(idx).ok())
            .collect()
    }
}

use super::convert::{FromIndex, Indexed, ToIndex};
use anyhow::{anyhow, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt;
use std::ops::{Index, IndexMut, Not};

/// One of the two agents planned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Side {
    /// The agent whose actions the planner recommends
    Owned,
    Opponent,
}

impl Side {
    pub fn all() -> [Side; 2] {
        [Side::Owned, Side::Opponent]
    }

    fn slot(self) -> usize {
        match self {
            Side::Owned => 0,
            Side::Opponent => 1,
        }
    }
}

impl FromIndex for Side {
    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx).ok_or_else(|| anyhow!("Invalid side index: {}", idx))
    }
}

impl ToIndex for Side {
    fn to_index(&self) -> Result<usize> {
        ToPrimitive::to_usize(self).ok_or_else(|| anyhow!("Invalid side value"))
    }
}

impl Indexed for Side {
    const COUNT: usize = 2;
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::Owned => Side::Opponent,
            Side::Opponent => Side::Owned,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Owned => write!(f, "owned"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owned" | "self" => Ok(Side::Owned),
            "opponent" | "enemy" => Ok(Side::Opponent),
            _ => Err(anyhow!("Unknown side: {}", s)),
        }
    }
}

/// A value for each side
#[derive(Debug, Clone, PartialEq)]
pub struct SideArray<T> {
    pub values: [T; 2],
}

impl<T> SideArray<T> {
    pub fn new(owned: T, opponent: T) -> Self {
        Self {
            values: [owned, opponent],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Pairs each value with its side
    pub fn sides(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::all().into_iter().zip(self.values.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideArray<U> {
        SideArray::new(f(Side::Owned, &self[Side::Owned]), f(Side::Opponent, &self[Side::Opponent]))
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, index: Side) -> &Self::Output {
        &self.values[index.slot()]
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self.values[index.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_index_roundtrip() {
        assert_eq!(Side::from_index(0).unwrap(), Side::Owned);
        assert_eq!(Side::from_index(1).unwrap(), Side::Opponent);
        assert!(Side::from_index(2).is_err());
        assert_eq!(Side::Opponent.to_index().unwrap(), 1);
        assert_eq!(<Side as Indexed>::all(), vec![Side::Owned, Side::Opponent]);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("self".parse::<Side>().unwrap(), Side::Owned);
        assert_eq!("opponent".parse::<Side>().unwrap(), Side::Opponent);
        assert!("neutral".parse::<Side>().is_err());
        assert_eq!(!Side::Owned, Side::Opponent);
    }

    #[test]
    fn test_side_array() {
        let mut array = SideArray::new(5, 10);
        array[Side::Owned] = 15;

        assert_eq!(array[Side::Owned], 15);
        assert_eq!(array[Side::Opponent], 10);

        let doubled = array.map(|_, v| v * 2);
        let values: Vec<_> = doubled.sides().map(|(side, v)| (side, *v)).collect();
        assert_eq!(values, vec![(Side::Owned, 30), (Side::Opponent, 20)]);
    }
}

use crate::types::summary::CitySummary;
use std::fmt;

/// The travel advice derived from a ranked list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Nothing was ranked.
    Empty,
    Single(String),
    /// The two best cities share the same rank.
    Pair(String, String),
}

impl Recommendation {
    /// Looks at the first two entries of an already sorted list.
    ///
    /// Only the first two entries are compared: if three or more cities share the best rank,
    /// the recommendation still names just two of them.
    pub fn from_ranked(ranked: &[CitySummary]) -> Self {
        match ranked {
            [] => Recommendation::Empty,
            [first, second, ..] if first.rank == second.rank => {
                Recommendation::Pair(first.city.clone(), second.city.clone())
            }
            [first, ..] => Recommendation::Single(first.city.clone()),
        }
    }

    pub fn cities(&self) -> Vec<&str> {
        match self {
            Recommendation::Empty => vec![],
            Recommendation::Single(city) => vec![city.as_str()],
            Recommendation::Pair(first, second) => vec![first.as_str(), second.as_str()],
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Empty => write!(f, "No city could be recommended for the trip"),
            Recommendation::Single(city) => {
                write!(f, "The most favorable city for the trip is {city}")
            }
            Recommendation::Pair(first, second) => {
                write!(f, "The most favorable cities for the trip are {first} and {second}")
            }
        }
    }
}

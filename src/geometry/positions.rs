//! Direct positions

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// A coordinate tuple in some coordinate reference system
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DirectPosition(Vec<f64>);

impl DirectPosition {
    /// Create a position from its ordinates
    pub fn new(ordinates: Vec<f64>) -> Self {
        Self(ordinates)
    }

    /// Number of ordinates
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// The ordinates
    pub fn ordinates(&self) -> &[f64] {
        &self.0
    }

    /// Keep only the first `dimension` ordinates
    pub fn truncated(&self, dimension: usize) -> Self {
        Self(self.0.iter().copied().take(dimension).collect())
    }

    /// Check whether two positions have the same dimension and differ by at
    /// most `tolerance` in every ordinate
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Parse a whitespace-separated list of ordinates (the content of
    /// gml:pos, gml:lowerCorner and gml:upperCorner)
    pub fn parse(text: &str) -> Result<Self> {
        parse_ordinates(text).map(Self)
    }

    /// Parse a gml:posList into positions of the given dimension
    pub fn parse_list(text: &str, dimension: usize) -> Result<Vec<Self>> {
        if dimension == 0 {
            return Err(Error::Geometry("srsDimension must be positive".to_string()));
        }
        let ordinates = parse_ordinates(text)?;
        if ordinates.len() % dimension != 0 {
            return Err(Error::Geometry(format!(
                "posList has {} ordinates, not a multiple of dimension {}",
                ordinates.len(),
                dimension
            )));
        }
        Ok(ordinates
            .chunks(dimension)
            .map(|chunk| Self(chunk.to_vec()))
            .collect())
    }
}

fn parse_ordinates(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::Geometry(format!("invalid ordinate value: '{}'", token)))
        })
        .collect()
}

impl From<Vec<f64>> for DirectPosition {
    fn from(ordinates: Vec<f64>) -> Self {
        Self(ordinates)
    }
}

impl From<&[f64]> for DirectPosition {
    fn from(ordinates: &[f64]) -> Self {
        Self(ordinates.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for DirectPosition {
    fn from(ordinates: [f64; N]) -> Self {
        Self(ordinates.to_vec())
    }
}

impl fmt::Display for DirectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

//! Canonical location candidate model.
//!
//! Raw remote records (HTML hotspot rows, station price records) are
//! validated and converted into [`Candidate`] at the parse boundary, so the
//! filter and ranking stages never see format-specific shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Cartesian galactic coordinates for a star system, in light years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coords {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Planetary ring composition reported by the lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingType {
    Icy,
    Rocky,
    Metallic,
    MetalRich,
}

impl fmt::Display for RingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RingType::Icy => "Icy",
            RingType::Rocky => "Rocky",
            RingType::Metallic => "Metallic",
            RingType::MetalRich => "Metal Rich",
        };
        f.write_str(value)
    }
}

impl FromStr for RingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icy" => Ok(RingType::Icy),
            "rocky" => Ok(RingType::Rocky),
            "metallic" | "metal" => Ok(RingType::Metallic),
            "metal rich" | "metal-rich" | "metalrich" => Ok(RingType::MetalRich),
            _ => Err(Error::InvalidRingType {
                value: s.to_string(),
            }),
        }
    }
}

/// Station landing pad size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PadSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for PadSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PadSize::Small => "S",
            PadSize::Medium => "M",
            PadSize::Large => "L",
        };
        f.write_str(value)
    }
}

impl FromStr for PadSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "small" => Ok(PadSize::Small),
            "m" | "medium" => Ok(PadSize::Medium),
            "l" | "large" => Ok(PadSize::Large),
            _ => Err(Error::InvalidPadSize {
                value: s.to_string(),
            }),
        }
    }
}

/// A single location under consideration: a mining ring or a sell station.
///
/// Invariant: `distance_ly` and `value` are finite and non-negative. Raw
/// records that cannot satisfy this are dropped during conversion rather
/// than defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Ring name (mining) or station name (selling).
    pub name: String,
    /// System the location belongs to.
    pub system: String,
    /// Straight-line distance from the origin system, in light years.
    pub distance_ly: f64,
    /// Value metric: ring density for mining, unit sell price for selling.
    pub value: f64,
    /// Ring composition, when the record carries one.
    pub ring_type: Option<RingType>,
    /// Largest landing pad, when the record carries one.
    pub pad_size: Option<PadSize>,
    /// Number of overlapping hotspots in the ring.
    pub hotspot_count: Option<u32>,
    /// Supercruise distance from the arrival star, in light seconds.
    pub arrival_ls: Option<u64>,
    /// Whether the system is populated.
    pub populated: Option<bool>,
    /// Age of the price data, in days.
    pub freshness_days: Option<f64>,
}

impl Candidate {
    /// Whether the candidate satisfies the non-negative distance/value
    /// invariant. Conversion enforces this; the filter re-checks it.
    pub fn is_well_formed(&self) -> bool {
        self.distance_ly.is_finite()
            && self.distance_ly >= 0.0
            && self.value.is_finite()
            && self.value >= 0.0
    }
}

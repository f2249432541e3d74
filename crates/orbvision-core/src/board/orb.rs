use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten known orb types, or the sentinel for an unclassifiable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbType {
    Fire,
    Water,
    Wood,
    Light,
    Dark,
    Heart,
    Jammer,
    Poison,
    MortalPoison,
    Bomb,
    /// No classifier could identify the cell.
    Unknown,
}

impl OrbType {
    /// The classifiable types, in canonical symbol order (`rbgldhjpmo`).
    pub const KNOWN: [OrbType; 10] = [
        OrbType::Fire,
        OrbType::Water,
        OrbType::Wood,
        OrbType::Light,
        OrbType::Dark,
        OrbType::Heart,
        OrbType::Jammer,
        OrbType::Poison,
        OrbType::MortalPoison,
        OrbType::Bomb,
    ];

    /// Single-character label used in reference file names, lookup tables,
    /// and rendered boards.
    pub fn symbol(&self) -> char {
        match self {
            OrbType::Fire => 'r',
            OrbType::Water => 'b',
            OrbType::Wood => 'g',
            OrbType::Light => 'l',
            OrbType::Dark => 'd',
            OrbType::Heart => 'h',
            OrbType::Jammer => 'j',
            OrbType::Poison => 'p',
            OrbType::MortalPoison => 'm',
            OrbType::Bomb => 'o',
            OrbType::Unknown => 'u',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<OrbType> {
        match symbol {
            'r' => Some(OrbType::Fire),
            'b' => Some(OrbType::Water),
            'g' => Some(OrbType::Wood),
            'l' => Some(OrbType::Light),
            'd' => Some(OrbType::Dark),
            'h' => Some(OrbType::Heart),
            'j' => Some(OrbType::Jammer),
            'p' => Some(OrbType::Poison),
            'm' => Some(OrbType::MortalPoison),
            'o' => Some(OrbType::Bomb),
            'u' => Some(OrbType::Unknown),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, OrbType::Unknown)
    }
}

impl fmt::Display for OrbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// src/domain/catalog.rs
//
// Categorical vocabularies behind the selectors. Predictors only know the
// values they were fitted on, so these lists mirror the training data.

use crate::errors::StartupError;
use crate::geos::NG_STATES;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HouseType {
    #[serde(rename = "Detached Duplex")]
    DetachedDuplex,
    #[serde(rename = "Semi Detached Duplex")]
    SemiDetachedDuplex,
    #[serde(rename = "Terraced Duplexes")]
    TerracedDuplexes,
    #[serde(rename = "Block of Flats")]
    BlockOfFlats,
    #[serde(rename = "Detached Bungalow")]
    DetachedBungalow,
    #[serde(rename = "Terraced Bungalow")]
    TerracedBungalow,
    #[serde(rename = "Semi Detached Bungalow")]
    SemiDetachedBungalow,
}

impl HouseType {
    pub const ALL: [HouseType; 7] = [
        HouseType::DetachedDuplex,
        HouseType::SemiDetachedDuplex,
        HouseType::TerracedDuplexes,
        HouseType::BlockOfFlats,
        HouseType::DetachedBungalow,
        HouseType::TerracedBungalow,
        HouseType::SemiDetachedBungalow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HouseType::DetachedDuplex => "Detached Duplex",
            HouseType::SemiDetachedDuplex => "Semi Detached Duplex",
            HouseType::TerracedDuplexes => "Terraced Duplexes",
            HouseType::BlockOfFlats => "Block of Flats",
            HouseType::DetachedBungalow => "Detached Bungalow",
            HouseType::TerracedBungalow => "Terraced Bungalow",
            HouseType::SemiDetachedBungalow => "Semi Detached Bungalow",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for HouseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const TOWNS: &[&str] = &[
    "Lekki",
    "Ajah",
    "Mabushi",
    "Katampe",
    "Surulere",
    "Guzape District",
    "Gwarinpa",
    "Ikoyi",
    "Magodo",
    "Ibeju Lekki",
    "Ogudu",
    "Lokogoma District",
    "Oredo",
    "Victoria Island (VI)",
    "Mowe Ofada",
    "Epe",
    "Arepo",
    "Simawa",
    "Life Camp",
    "Port Harcourt",
    "Ifako-Ijaiye",
    "Isolo",
    "Asokoro District",
    "Jabi",
    "Karmo",
    "Maitama District",
    "Ojo",
    "Ibadan",
    "Gudu",
    "Kukwaba",
    "Enugu",
    "Owerri Muncipal",
    "Mbora (Nbora)",
    "Lugbe",
    "Dakwo",
    "Isheri North",
    "Karu",
    "Ikorodu",
    "Wuye",
    "Wuse",
    "Galadimawa",
    "Alimosho",
    "Yaba",
    "Ifo",
    "Maryland",
    "Kaduna South",
    "Ikotun",
    "Sango Ota",
    "Garki",
    "Mowe Town",
    "Wuse 2",
    "Magboro",
    "Ipaja",
    "Aba",
    "Ojodu",
    "Ogijo",
    "Owerri West",
    "Apo",
    "Kaura",
    "Agege",
    "Kurudu",
    "Gbagada",
    "Asaba",
];

pub fn is_town(value: &str) -> bool {
    TOWNS.contains(&value)
}

pub fn is_state(value: &str) -> bool {
    NG_STATES.contains(&value)
}

/// Startup check: selectors must not repeat an entry.
pub fn validate_catalog() -> Result<(), StartupError> {
    ensure_unique("town", TOWNS)?;
    ensure_unique("state", NG_STATES)?;
    Ok(())
}

fn ensure_unique(what: &str, values: &[&str]) -> Result<(), StartupError> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(StartupError::Catalog(format!("empty {what} entry")));
        }
        if !seen.insert(*value) {
            return Err(StartupError::Catalog(format!(
                "{what} '{value}' is listed twice"
            )));
        }
    }
    Ok(())
}

// src/geos.rs
//
// Nigerian states and the six geopolitical zones used to group them on the
// dataset chart.

use crate::errors::StartupError;
use std::collections::HashMap;
use std::fmt;

/// States offered in the state selector, in selector order.
/// Spellings follow the training data ("Nasawara", "Abuja" for the FCT).
pub const NG_STATES: &[&str] = &[
    "Lagos",
    "Abuja",
    "Delta",
    "Imo",
    "Abia",
    "Nasawara",
    "Kaduna",
    "Oyo",
    "Rivers",
    "Ogun",
    "Adamawa",
    "Anambra",
    "Bauchi",
    "Benue",
    "Borno",
    "Cross River",
    "Jigawa",
    "Ebonyi",
    "Enugu",
    "Gombe",
    "Kano",
    "Katsina",
    "Kwara",
    "Kebbi",
    "Kogi",
    "Edo",
    "Plateau",
    "Niger",
    "Osun",
    "Ekiti",
    "Taraba",
    "Zamfara",
    "Yobe",
    "Akwa Ibom",
    "Bayelsa",
    "Ondo",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    NorthCentral,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthSouth,
    SouthWest,
    Unknown,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::NorthCentral => "North Central",
            Zone::NorthEast => "North East",
            Zone::NorthWest => "North West",
            Zone::SouthEast => "South East",
            Zone::SouthSouth => "South South",
            Zone::SouthWest => "South West",
            Zone::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member states of each zone. "Nasarawa" is listed alongside the dataset's
/// "Nasawara" so uploads using either spelling land in North Central.
pub const ZONES: &[(Zone, &[&str])] = &[
    (
        Zone::NorthCentral,
        &[
            "Benue", "Kogi", "Kwara", "Nasarawa", "Nasawara", "Niger", "Plateau", "Abuja",
        ],
    ),
    (
        Zone::NorthEast,
        &["Adamawa", "Bauchi", "Borno", "Gombe", "Taraba", "Yobe"],
    ),
    (
        Zone::NorthWest,
        &[
            "Jigawa", "Kaduna", "Kano", "Katsina", "Kebbi", "Sokoto", "Zamfara",
        ],
    ),
    (
        Zone::SouthEast,
        &["Abia", "Anambra", "Ebonyi", "Enugu", "Imo"],
    ),
    (
        Zone::SouthSouth,
        &[
            "Akwa Ibom",
            "Bayelsa",
            "Cross River",
            "Delta",
            "Edo",
            "Rivers",
        ],
    ),
    (
        Zone::SouthWest,
        &["Ekiti", "Lagos", "Ogun", "Ondo", "Osun", "Oyo"],
    ),
];

/// Read-only state -> zone lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct ZoneMap {
    by_state: HashMap<&'static str, Zone>,
}

impl ZoneMap {
    /// Build the map from [`ZONES`], rejecting a state listed in two zones
    /// and any selector state that would fall through to `Unknown`.
    pub fn standard() -> Result<Self, StartupError> {
        Self::from_table(ZONES, NG_STATES)
    }

    pub fn from_table(
        table: &[(Zone, &[&'static str])],
        required: &[&str],
    ) -> Result<Self, StartupError> {
        let mut by_state = HashMap::new();

        for (zone, states) in table {
            if *zone == Zone::Unknown {
                return Err(StartupError::Catalog(
                    "the Unknown zone cannot have members".into(),
                ));
            }
            for state in states.iter() {
                if let Some(prev) = by_state.insert(*state, *zone) {
                    return Err(StartupError::Catalog(format!(
                        "state '{state}' is listed under both {prev} and {zone}"
                    )));
                }
            }
        }

        let map = Self { by_state };

        if let Some(missing) = required.iter().find(|s| map.zone_of(s) == Zone::Unknown) {
            return Err(StartupError::Catalog(format!(
                "state '{missing}' has no geopolitical zone"
            )));
        }

        Ok(map)
    }

    /// Case-sensitive exact lookup; anything unlisted is `Unknown`.
    pub fn zone_of(&self, state: &str) -> Zone {
        self.by_state.get(state).copied().unwrap_or(Zone::Unknown)
    }
}

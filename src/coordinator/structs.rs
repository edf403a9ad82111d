//! Enumerations shared by coordinator requests and responses.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// DCS terrain (map) that can be installed on a server.
///
/// Sent and received by variant name, e.g. `"PersianGulf"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Terrain {
    Caucasus,
    Falklands,
    Kola,
    MarianaIslands,
    Nevada,
    Normandy,
    PersianGulf,
    Sinai,
    Syria,
    TheChannel,
}

impl Terrain {
    const ALL: [Terrain; 10] = [
        Terrain::Caucasus,
        Terrain::Falklands,
        Terrain::Kola,
        Terrain::MarianaIslands,
        Terrain::Nevada,
        Terrain::Normandy,
        Terrain::PersianGulf,
        Terrain::Sinai,
        Terrain::Syria,
        Terrain::TheChannel,
    ];
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Terrain {
    type Err = String;

    /// Parses a terrain name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::ALL
            .into_iter()
            .find(|terrain| terrain.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid terrain: {}", s))
    }
}

/// Billing mode of a rented server.
///
/// Serialized by variant name (`"Hourly"`), displayed in lowercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Billing {
    Hourly,
    Monthly,
}

impl fmt::Display for Billing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Billing::Hourly => write!(f, "hourly"),
            Billing::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Billing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" => Ok(Billing::Hourly),
            "monthly" => Ok(Billing::Monthly),
            _ => Err(format!("Invalid billing type: {}", s)),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Network type a request travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    #[default]
    Walk,
    Bike,
    Drive,
}

impl RouteMode {
    pub const ALL: [RouteMode; 3] = [RouteMode::Walk, RouteMode::Bike, RouteMode::Drive];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMode::Walk => "walk",
            RouteMode::Bike => "bike",
            RouteMode::Drive => "drive",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walk" => Ok(RouteMode::Walk),
            "bike" => Ok(RouteMode::Bike),
            "drive" => Ok(RouteMode::Drive),
            other => Err(Error::InvalidData(format!("unknown route mode '{other}'"))),
        }
    }
}

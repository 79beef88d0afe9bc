use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{AppError, AppResult};

/// Output dialect of a filter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// libpcap syntax for tcpdump/tshark/wireshark capture filters
    Capture,

    /// Wireshark display-filter field comparisons
    Display,
}

impl Purpose {
    pub const NAMES: [&'static str; 2] = ["capture", "display"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Capture => "capture",
            Purpose::Display => "display",
        }
    }
}

impl FromStr for Purpose {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "capture" => Ok(Purpose::Capture),
            // older front-end builds called the display dialect "preview"
            "display" | "preview" => Ok(Purpose::Display),
            _ => Err(AppError::invalid_argument("purpose", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether matching packets are kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterGoal {
    Include,
    #[default]
    Exclude,
}

impl FilterGoal {
    pub const NAMES: [&'static str; 2] = ["exclude", "include"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterGoal::Include => "include",
            FilterGoal::Exclude => "exclude",
        }
    }

    /// Token placed before the whole expression
    pub fn prefix(&self) -> &'static str {
        match self {
            FilterGoal::Include => "",
            FilterGoal::Exclude => "not ",
        }
    }
}

impl FromStr for FilterGoal {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "include" => Ok(FilterGoal::Include),
            "exclude" => Ok(FilterGoal::Exclude),
            _ => Err(AppError::invalid_argument("filter_goal", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for FilterGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an endpoint within a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Source,
    Destination,
}

impl Direction {
    /// Both directions, source first
    pub const ALL: [Direction; 2] = [Direction::Source, Direction::Destination];

    /// Keyword shared by both dialects (`src`/`dst`)
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Source => "src",
            Direction::Destination => "dst",
        }
    }
}

/// One side of a conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Transport protocol (e.g. "tcp", "udp")
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub protocol: Option<String>,

    /// Host address or CIDR network
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub address: Option<String>,

    /// Transport port
    #[serde(default)]
    pub port: Option<u16>,
}

impl Endpoint {
    pub fn new(protocol: Option<&str>, address: Option<&str>, port: Option<u16>) -> Self {
        Self {
            protocol: non_empty(protocol),
            address: non_empty(address),
            port,
        }
    }

    /// Whether the address names a network (`addr/prefix`) rather than a host
    pub fn is_network(&self) -> bool {
        self.address.as_deref().map_or(false, |a| a.contains('/'))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Blank form fields arrive as `""`; treat them as absent
fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value.as_deref()))
}

/// Everything needed to render one endpoint filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFilterRequest {
    pub purpose: Purpose,
    pub endpoint: Endpoint,
    pub filter_goal: FilterGoal,
}

impl EndpointFilterRequest {
    pub fn new(purpose: Purpose, endpoint: Endpoint, filter_goal: FilterGoal) -> Self {
        Self {
            purpose,
            endpoint,
            filter_goal,
        }
    }

    /// Build a request from user-supplied text; the goal defaults to exclude.
    pub fn parse(purpose: &str, endpoint: Endpoint, filter_goal: Option<&str>) -> AppResult<Self> {
        let purpose = purpose.parse()?;
        let filter_goal = match filter_goal {
            Some(goal) => goal.parse()?,
            None => FilterGoal::default(),
        };
        Ok(Self::new(purpose, endpoint, filter_goal))
    }
}

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// DMR Tier II timeslot. Two 30ms slots carry independent traffic on one
/// physical channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Timeslot {
    #[default]
    One,
    Two,
}

impl Timeslot {
    pub fn as_number(&self) -> u8 {
        match self {
            Timeslot::One => 1,
            Timeslot::Two => 2,
        }
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl TryFrom<u8> for Timeslot {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Timeslot::One),
            2 => Ok(Timeslot::Two),
            _ => Err(ModelError::InvalidValue {
                kind: "timeslot",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for Timeslot {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Timeslot::One),
            "2" => Ok(Timeslot::Two),
            _ => Err(ModelError::InvalidValue {
                kind: "timeslot",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a contact addresses a talkgroup or a single radio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum ContactKind {
    #[default]
    Group,
    Private,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Group => "Group",
            ContactKind::Private => "Private",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("GROUP") {
            Ok(ContactKind::Group)
        } else if trimmed.eq_ignore_ascii_case("PRIVATE") {
            Ok(ContactKind::Private)
        } else {
            Err(ModelError::InvalidValue {
                kind: "contact kind",
                value: s.to_string(),
            })
        }
    }
}

/// Transmit power level. Not every radio supports every level; use
/// [`Power::flattened`] to down-map before rendering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Power {
    Low,
    Med,
    #[default]
    High,
    Turbo,
}

impl Power {
    pub fn as_str(&self) -> &'static str {
        match self {
            Power::Low => "Low",
            Power::Med => "Medium",
            Power::High => "High",
            Power::Turbo => "Turbo",
        }
    }

    /// Deterministically map this power into the radio's permitted set.
    ///
    /// The substitution chain is Medium -> Low, Turbo -> High, Low -> High,
    /// High -> Low; the chain is followed until an allowed level is found.
    pub fn flattened(self, allowed: &BTreeSet<Power>) -> Result<Power, ModelError> {
        let mut current = self;
        for _ in 0..4 {
            if allowed.contains(&current) {
                return Ok(current);
            }
            current = match current {
                Power::Med => Power::Low,
                Power::Turbo => Power::High,
                Power::Low => Power::High,
                Power::High => Power::Low,
            };
        }
        Err(ModelError::NoAllowedValue {
            kind: "power",
            value: self.to_string(),
            allowed: format_set(allowed),
        })
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Power {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("LOW") {
            Ok(Power::Low)
        } else if trimmed.eq_ignore_ascii_case("MEDIUM") || trimmed.eq_ignore_ascii_case("MED") {
            Ok(Power::Med)
        } else if trimmed.eq_ignore_ascii_case("HIGH") {
            Ok(Power::High)
        } else if trimmed.eq_ignore_ascii_case("TURBO") {
            Ok(Power::Turbo)
        } else {
            Err(ModelError::InvalidValue {
                kind: "power",
                value: s.to_string(),
            })
        }
    }
}

/// Analog channel bandwidth in kHz.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Bandwidth {
    B125,
    B20,
    #[default]
    B25,
}

impl Bandwidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bandwidth::B125 => "12.5",
            Bandwidth::B20 => "20",
            Bandwidth::B25 => "25",
        }
    }

    /// Map this bandwidth into the radio's permitted set (20 kHz radios are
    /// rare; 20 falls back to 25).
    pub fn flattened(self, allowed: &BTreeSet<Bandwidth>) -> Result<Bandwidth, ModelError> {
        if allowed.contains(&self) {
            return Ok(self);
        }
        if self == Bandwidth::B20 && allowed.contains(&Bandwidth::B25) {
            return Ok(Bandwidth::B25);
        }
        Err(ModelError::NoAllowedValue {
            kind: "bandwidth",
            value: self.to_string(),
            allowed: format_set(allowed),
        })
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bandwidth {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "12.5" => Ok(Bandwidth::B125),
            "20" => Ok(Bandwidth::B20),
            "25" => Ok(Bandwidth::B25),
            _ => Err(ModelError::InvalidValue {
                kind: "bandwidth",
                value: s.to_string(),
            }),
        }
    }
}

/// When a digital channel will transmit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum AdmitCriteria {
    Always,
    ChannelFree,
    #[default]
    SameColor,
    DifferentColor,
}

impl AdmitCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmitCriteria::Always => "Always",
            AdmitCriteria::ChannelFree => "ChannelFree",
            AdmitCriteria::SameColor => "Same Color Code",
            AdmitCriteria::DifferentColor => "Different Color Code",
        }
    }
}

impl fmt::Display for AdmitCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmitCriteria {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ALWAYS") {
            Ok(AdmitCriteria::Always)
        } else if trimmed.eq_ignore_ascii_case("CHANNELFREE") {
            Ok(AdmitCriteria::ChannelFree)
        } else if trimmed.eq_ignore_ascii_case("SAME COLOR CODE") {
            Ok(AdmitCriteria::SameColor)
        } else if trimmed.eq_ignore_ascii_case("DIFFERENT COLOR CODE") {
            Ok(AdmitCriteria::DifferentColor)
        } else {
            Err(ModelError::InvalidValue {
                kind: "admit criteria",
                value: s.to_string(),
            })
        }
    }
}

/// The five codeplug container types, used to key per-type pattern lists and
/// per-type capacity limits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ObjectKind {
    Contacts,
    Channels,
    GroupLists,
    ScanLists,
    Zones,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Contacts,
        ObjectKind::Channels,
        ObjectKind::GroupLists,
        ObjectKind::ScanLists,
        ObjectKind::Zones,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Contacts => "contacts",
            ObjectKind::Channels => "channels",
            ObjectKind::GroupLists => "grouplists",
            ObjectKind::ScanLists => "scanlists",
            ObjectKind::Zones => "zones",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "contacts" => Ok(ObjectKind::Contacts),
            "channels" => Ok(ObjectKind::Channels),
            "grouplists" => Ok(ObjectKind::GroupLists),
            "scanlists" => Ok(ObjectKind::ScanLists),
            "zones" => Ok(ObjectKind::Zones),
            _ => Err(ModelError::InvalidValue {
                kind: "object kind",
                value: s.to_string(),
            }),
        }
    }
}

fn format_set<T: fmt::Display>(set: &BTreeSet<T>) -> String {
    let names: Vec<String> = set.iter().map(|v| v.to_string()).collect();
    names.join(", ")
}

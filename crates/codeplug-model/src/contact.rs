use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::enums::{ContactKind, Timeslot};
use crate::error::{ModelError, Result};

/// A positive DMR radio ID.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DmrId(u32);

impl DmrId {
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(ModelError::InvalidIdentifier {
                name: String::new(),
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DmrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A digital contact: group or private call, optionally scoped to a timeslot.
///
/// A contact carrying a timeslot is a talkgroup. Identity is
/// `(dmr_id, kind, timeslot)`; the display name is cosmetic and excluded from
/// equality, so the same talkgroup fetched from two sources under different
/// names still deduplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub dmr_id: DmrId,
    pub kind: ContactKind,
    pub timeslot: Option<Timeslot>,
}

impl Contact {
    pub fn new(name: impl Into<String>, dmr_id: DmrId, kind: ContactKind) -> Self {
        Self {
            name: name.into().trim().to_string(),
            dmr_id,
            kind,
            timeslot: None,
        }
    }

    /// Parse a contact from raw text fields. A non-numeric or non-positive ID
    /// is fatal for the record and reports the contact name for context.
    pub fn parse(name: &str, raw_id: &str, kind: ContactKind) -> Result<Self> {
        let id: u32 = raw_id
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidIdentifier {
                name: name.to_string(),
                value: raw_id.to_string(),
            })?;
        if id == 0 {
            return Err(ModelError::InvalidIdentifier {
                name: name.to_string(),
                value: raw_id.to_string(),
            });
        }
        Ok(Self::new(name, DmrId(id), kind))
    }

    /// Derive a talkgroup from this contact on the given timeslot.
    pub fn on_timeslot(&self, timeslot: Timeslot) -> Contact {
        Contact {
            timeslot: Some(timeslot),
            ..self.clone()
        }
    }

    pub fn is_talkgroup(&self) -> bool {
        self.timeslot.is_some()
    }

    /// The display name with the timeslot appended, as used for expanded
    /// repeater channels. Skips the suffix when the name already ends in the
    /// slot digit (TAC channels are numbered and always get the suffix).
    pub fn name_with_timeslot(&self) -> String {
        let Some(timeslot) = self.timeslot else {
            return self.name.clone();
        };
        let ts = timeslot.to_string();
        if self.name.ends_with(&ts) && !self.name.starts_with("TAC") {
            self.name.clone()
        } else {
            format!("{} {}", self.name, ts)
        }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.dmr_id == other.dmr_id
            && self.kind == other.kind
            && self.timeslot == other.timeslot
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dmr_id.hash(state);
        self.kind.hash(state);
        self.timeslot.hash(state);
    }
}

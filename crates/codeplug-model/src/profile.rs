//! Per-radio capacity ceilings.
//!
//! Each supported radio caps how many entries fit in each table and which
//! power/bandwidth values its CPS tool accepts. Encoders consult these
//! limits; exceeding one truncates output, never errors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::{Bandwidth, ObjectKind, Power};
use crate::names::NAME_MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioProfile {
    pub name: String,
    pub channels: usize,
    pub contacts: usize,
    pub zones: usize,
    pub grouplists: usize,
    pub scanlists: usize,
    pub name_limit: usize,
    /// Whether zones address two VFO channel lists.
    pub zone_has_ab: bool,
    pub zone_channels: usize,
    pub scanlist_channels: usize,
    pub grouplist_contacts: usize,
    pub allowed_powers: BTreeSet<Power>,
    pub allowed_bandwidths: BTreeSet<Bandwidth>,
}

impl RadioProfile {
    fn base(name: &str) -> Self {
        Self {
            name: name.to_string(),
            channels: 4000,
            contacts: 10000,
            zones: 250,
            grouplists: 250,
            scanlists: 250,
            name_limit: NAME_MAX,
            zone_has_ab: false,
            zone_channels: 16,
            scanlist_channels: 32,
            grouplist_contacts: 32,
            allowed_powers: [Power::Low, Power::Med, Power::High, Power::Turbo].into(),
            allowed_bandwidths: [Bandwidth::B125, Bandwidth::B25].into(),
        }
    }

    /// Capacity ceiling for one container table.
    pub fn limit(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Channels => self.channels,
            ObjectKind::Contacts => self.contacts,
            ObjectKind::GroupLists => self.grouplists,
            ObjectKind::ScanLists => self.scanlists,
            ObjectKind::Zones => self.zones,
        }
    }

    pub fn anytone_d868uv() -> Self {
        Self {
            zone_channels: 250,
            scanlist_channels: 50,
            grouplist_contacts: 64,
            ..Self::base("Anytone AT-D868UV")
        }
    }

    pub fn baofeng_dm1801() -> Self {
        Self {
            channels: 1024,
            contacts: 1024,
            zones: 150,
            grouplists: 76,
            scanlists: 64,
            zone_channels: 32,
            allowed_powers: [Power::Low, Power::High].into(),
            ..Self::base("Baofeng DM-1801")
        }
    }

    pub fn radioddity_gd77() -> Self {
        Self {
            name: "Radioddity GD-77".to_string(),
            zones: 250,
            zone_channels: 16,
            scanlist_channels: 31,
            ..Self::baofeng_dm1801()
        }
    }

    pub fn tyt_md380() -> Self {
        Self {
            channels: 1000,
            contacts: 1000,
            scanlist_channels: 31,
            allowed_powers: [Power::Low, Power::High].into(),
            allowed_bandwidths: [Bandwidth::B125, Bandwidth::B20, Bandwidth::B25].into(),
            ..Self::base("TYT MD-380")
        }
    }

    pub fn baofeng_rd5r() -> Self {
        Self {
            channels: 1024,
            contacts: 256,
            grouplists: 64,
            grouplist_contacts: 16,
            allowed_powers: [Power::Low, Power::High].into(),
            ..Self::base("Baofeng RD-5R")
        }
    }

    pub fn tyt_uv380() -> Self {
        Self {
            channels: 3000,
            zone_has_ab: true,
            zone_channels: 64,
            scanlist_channels: 31,
            allowed_powers: [Power::Low, Power::Med, Power::High].into(),
            allowed_bandwidths: [Bandwidth::B125, Bandwidth::B20, Bandwidth::B25].into(),
            ..Self::base("TYT MD-UV380")
        }
    }
}

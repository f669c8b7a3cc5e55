use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use codeplug_model::{
    Channel, Contact, GroupList, GroupListId, IdentityContext, ScanList, ScanListId,
    TimeslotMode, Zone,
};

use crate::error::{Result, TransformError};

#[derive(Debug, Default)]
struct LookupTable {
    grouplists: HashMap<GroupListId, usize>,
    scanlists: HashMap<ScanListId, usize>,
}

/// The codeplug aggregate: all five collections, built once and then
/// threaded through pure transforms, each returning a new `Codeplug`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Codeplug {
    pub(crate) contacts: Vec<Contact>,
    pub(crate) channels: Vec<Channel>,
    pub(crate) grouplists: Vec<GroupList>,
    pub(crate) scanlists: Vec<ScanList>,
    pub(crate) zones: Vec<Zone>,
    // Built on first lookup; never inherited across transforms.
    #[serde(skip)]
    lookup: OnceLock<LookupTable>,
}

impl Clone for Codeplug {
    fn clone(&self) -> Self {
        Self::assemble(
            self.contacts.clone(),
            self.channels.clone(),
            self.grouplists.clone(),
            self.scanlists.clone(),
            self.zones.clone(),
        )
    }
}

impl Codeplug {
    /// Build a codeplug from its parts.
    ///
    /// Contacts are deduplicated (timeslot-respecting) and channels claim
    /// their short names from the identity context; when a claim assigns a
    /// dedup suffix, zone and scanlist membership is rewritten to the
    /// updated channel.
    pub fn new(
        contacts: Vec<Contact>,
        channels: Vec<Channel>,
        grouplists: Vec<GroupList>,
        scanlists: Vec<ScanList>,
        zones: Vec<Zone>,
        ctx: &mut IdentityContext,
    ) -> Result<Self> {
        let contacts = ctx.dedup_contacts(contacts, TimeslotMode::Respect)?;

        let mut remap: HashMap<Channel, Channel> = HashMap::new();
        let mut registered: Vec<Channel> = Vec::with_capacity(channels.len());
        for channel in channels {
            let claimed = ctx.assign_short_name(channel.clone())?;
            remap.insert(channel, claimed.clone());
            registered.push(claimed);
        }
        let fix = |members: &[Channel]| -> Vec<Channel> {
            members
                .iter()
                .map(|ch| remap.get(ch).unwrap_or(ch).clone())
                .collect()
        };

        let scanlists = scanlists
            .into_iter()
            .map(|sl| ScanList {
                channels: fix(&sl.channels),
                ..sl
            })
            .collect();
        let zones = zones
            .into_iter()
            .map(|zn| Zone {
                channels_a: fix(&zn.channels_a),
                channels_b: fix(&zn.channels_b),
                ..zn
            })
            .collect();

        Ok(Self::assemble(
            contacts, registered, grouplists, scanlists, zones,
        ))
    }

    /// Build a codeplug from loader output: a zone name mapped to the
    /// ordered channels it contains. Contacts are collected from the digital
    /// channels in first-seen order; both VFO lists of each zone carry the
    /// full channel list.
    pub fn from_zones(
        zone_channels: Vec<(String, Vec<Channel>)>,
        ctx: &mut IdentityContext,
    ) -> Result<Self> {
        let mut channels: Vec<Channel> = Vec::new();
        let mut contacts: Vec<Contact> = Vec::new();
        let mut zones: Vec<Zone> = Vec::new();

        for (zone_name, members) in zone_channels {
            for ch in &members {
                if !channels.contains(ch) {
                    channels.push(ch.clone());
                }
                if let Some(digital) = ch.as_digital() {
                    for tg in digital.talkgroup.iter().chain(&digital.static_talkgroups) {
                        if !contacts.contains(tg) {
                            contacts.push(tg.clone());
                        }
                    }
                }
            }
            zones.push(Zone::new(zone_name, members.clone(), members));
        }

        Self::new(contacts, channels, Vec::new(), Vec::new(), zones, ctx)
    }

    /// Assemble without canonicalization; parts must already be canonical.
    pub(crate) fn assemble(
        contacts: Vec<Contact>,
        channels: Vec<Channel>,
        grouplists: Vec<GroupList>,
        scanlists: Vec<ScanList>,
        zones: Vec<Zone>,
    ) -> Self {
        Self {
            contacts,
            channels,
            grouplists,
            scanlists,
            zones,
            lookup: OnceLock::new(),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn grouplists(&self) -> &[GroupList] {
        &self.grouplists
    }

    pub fn scanlists(&self) -> &[ScanList] {
        &self.scanlists
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    fn lookup_table(&self) -> &LookupTable {
        self.lookup.get_or_init(|| {
            let mut table = LookupTable::default();
            for (ix, gl) in self.grouplists.iter().enumerate() {
                table.grouplists.insert(gl.id, ix);
            }
            for (ix, sl) in self.scanlists.iter().enumerate() {
                table.scanlists.insert(sl.id, ix);
            }
            table
        })
    }

    /// Resolve a grouplist by stable id. Fails when the id belongs to a
    /// grouplist a transform has since dropped.
    pub fn lookup_grouplist(&self, id: GroupListId) -> Result<&GroupList> {
        self.lookup_table()
            .grouplists
            .get(&id)
            .map(|ix| &self.grouplists[*ix])
            .ok_or_else(|| TransformError::NotFound { id: id.to_string() })
    }

    /// Resolve a scanlist by stable id.
    pub fn lookup_scanlist(&self, id: ScanListId) -> Result<&ScanList> {
        self.lookup_table()
            .scanlists
            .get(&id)
            .map(|ix| &self.scanlists[*ix])
            .ok_or_else(|| TransformError::NotFound { id: id.to_string() })
    }

    /// Return a new codeplug with the named scanlists wholesale-replaced.
    ///
    /// Overrides matching an existing scanlist name replace it in place
    /// (with a fresh stable id); unmatched names append new scanlists.
    /// Channel names not present in the codeplug are dropped with a note.
    pub fn replace_scanlists(
        &self,
        overrides: &BTreeMap<String, Vec<String>>,
        ctx: &mut IdentityContext,
    ) -> Codeplug {
        if overrides.is_empty() {
            return self.clone();
        }
        let mut scanlists: Vec<ScanList> = self
            .scanlists
            .iter()
            .map(|sl| match overrides.get(&sl.name) {
                Some(channel_names) => ScanList::from_names(
                    sl.name.clone(),
                    channel_names,
                    &self.channels,
                    ctx.next_scanlist_id(),
                ),
                None => sl.clone(),
            })
            .collect();
        for (name, channel_names) in overrides {
            if !scanlists.iter().any(|sl| &sl.name == name) {
                debug!("adding scanlist {:?} from overrides", name);
                scanlists.push(ScanList::from_names(
                    name.clone(),
                    channel_names,
                    &self.channels,
                    ctx.next_scanlist_id(),
                ));
            }
        }
        Self::assemble(
            self.contacts.clone(),
            self.channels.clone(),
            self.grouplists.clone(),
            scanlists,
            self.zones.clone(),
        )
    }
}

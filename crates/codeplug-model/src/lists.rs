use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::Channel;
use crate::contact::Contact;
use crate::ids::{GroupListId, ScanListId};

/// An ordered set of contacts received together on a channel.
///
/// Membership may contain duplicates; encoders deduplicate at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupList {
    pub name: String,
    pub contacts: Vec<Contact>,
    pub id: GroupListId,
}

impl GroupList {
    pub fn new(name: impl Into<String>, contacts: Vec<Contact>, id: GroupListId) -> Self {
        Self {
            name: name.into(),
            contacts,
            id,
        }
    }

    /// Narrow each grouplist to the surviving contacts, reordered to follow
    /// the canonical contact order. Empty grouplists are dropped.
    pub fn prune_missing_contacts(grouplists: Vec<GroupList>, contacts: &[Contact]) -> Vec<GroupList> {
        grouplists
            .into_iter()
            .filter_map(|gl| {
                let members: HashSet<&Contact> = gl.contacts.iter().collect();
                let kept: Vec<Contact> = contacts
                    .iter()
                    .filter(|ct| members.contains(ct))
                    .cloned()
                    .collect();
                if kept.len() != gl.contacts.len() {
                    debug!(
                        "grouplist {:?}: pruned {} missing contact references",
                        gl.name,
                        gl.contacts.len().saturating_sub(kept.len())
                    );
                }
                if kept.is_empty() {
                    None
                } else {
                    Some(GroupList { contacts: kept, ..gl })
                }
            })
            .collect()
    }
}

/// An ordered set of channels scanned together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanList {
    pub name: String,
    pub channels: Vec<Channel>,
    pub id: ScanListId,
}

impl ScanList {
    pub fn new(name: impl Into<String>, channels: Vec<Channel>, id: ScanListId) -> Self {
        Self {
            name: name.into(),
            channels,
            id,
        }
    }

    /// Build a scanlist by resolving channel names (full name first, then
    /// short name). Unknown names are dropped, never an error.
    pub fn from_names(
        name: impl Into<String>,
        channel_names: &[String],
        channels: &[Channel],
        id: ScanListId,
    ) -> Self {
        let name = name.into();
        let by_name: HashMap<&str, &Channel> =
            channels.iter().map(|ch| (ch.name(), ch)).collect();
        let by_short_name: HashMap<String, &Channel> =
            channels.iter().map(|ch| (ch.short_name(), ch)).collect();
        let mut members = Vec::new();
        for cn in channel_names {
            let found = by_name
                .get(cn.as_str())
                .or_else(|| by_short_name.get(cn.as_str()));
            match found {
                Some(ch) => members.push((*ch).clone()),
                None => {
                    debug!("scanlist {:?} references unknown channel {:?}, ignoring", name, cn);
                }
            }
        }
        Self::new(name, members, id)
    }

    /// Narrow each scanlist to the surviving channels, taking the surviving
    /// copy (which may have been renamed). Empty scanlists are dropped.
    pub fn prune_missing_channels(scanlists: Vec<ScanList>, channels: &[Channel]) -> Vec<ScanList> {
        let surviving: HashMap<&Channel, &Channel> =
            channels.iter().map(|ch| (ch, ch)).collect();
        scanlists
            .into_iter()
            .filter_map(|sl| {
                let kept: Vec<Channel> = sl
                    .channels
                    .iter()
                    .filter_map(|ch| surviving.get(ch).map(|c| (*c).clone()))
                    .collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(ScanList { channels: kept, ..sl })
                }
            })
            .collect()
    }
}

/// A named, radio-displayed group of channels with two VFO lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub channels_a: Vec<Channel>,
    pub channels_b: Vec<Channel>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        channels_a: Vec<Channel>,
        channels_b: Vec<Channel>,
    ) -> Self {
        Self {
            name: name.into(),
            channels_a,
            channels_b,
        }
    }

    /// The A list followed by any B channels not already present.
    pub fn unique_channels(&self) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> = self.channels_a.iter().collect();
        for ch in &self.channels_b {
            if !channels.contains(&ch) {
                channels.push(ch);
            }
        }
        channels
    }

    /// Narrow each zone's VFO lists to the surviving channels; drop zones
    /// with no channels left in either list.
    pub fn prune_missing_channels(zones: Vec<Zone>, channels: &[Channel]) -> Vec<Zone> {
        let surviving: HashMap<&Channel, &Channel> =
            channels.iter().map(|ch| (ch, ch)).collect();
        let keep = |members: &[Channel]| -> Vec<Channel> {
            members
                .iter()
                .filter_map(|ch| surviving.get(ch).map(|c| (*c).clone()))
                .collect()
        };
        zones
            .into_iter()
            .filter_map(|zn| {
                let channels_a = keep(&zn.channels_a);
                let channels_b = keep(&zn.channels_b);
                if channels_a.is_empty() && channels_b.is_empty() {
                    None
                } else {
                    Some(Zone {
                        channels_a,
                        channels_b,
                        ..zn
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{AnalogChannel, Frequency};
    use crate::contact::DmrId;
    use crate::enums::ContactKind;

    fn ch(name: &str, mhz: f64) -> Channel {
        AnalogChannel::new(name, Frequency::from_mhz(mhz)).into()
    }

    fn ct(name: &str, id: u32) -> Contact {
        Contact::new(name, DmrId::new(id).unwrap(), ContactKind::Group)
    }

    #[test]
    fn zone_unique_channels_merges_vfo_lists() {
        let a = ch("A", 146.52);
        let b = ch("B", 146.54);
        let c = ch("C", 146.56);
        let zone = Zone::new("Z", vec![a.clone(), b.clone()], vec![b.clone(), c.clone()]);
        let unique: Vec<&str> = zone.unique_channels().iter().map(|ch| ch.name()).collect();
        assert_eq!(unique, vec!["A", "B", "C"]);
    }

    #[test]
    fn prune_follows_surviving_contact_order() {
        let (one, two, three) = (ct("One", 1), ct("Two", 2), ct("Three", 3));
        let gl = GroupList::new(
            "GL",
            vec![three.clone(), one.clone(), two.clone()],
            GroupListId::from_raw(1),
        );
        // "Two" did not survive; order follows the surviving contact list.
        let surviving = vec![one.clone(), three.clone()];
        let pruned = GroupList::prune_missing_contacts(vec![gl], &surviving);
        let names: Vec<&str> = pruned[0].contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Three"]);
    }

    #[test]
    fn empty_containers_are_dropped() {
        let gl = GroupList::new("GL", vec![ct("One", 1)], GroupListId::from_raw(1));
        assert!(GroupList::prune_missing_contacts(vec![gl], &[]).is_empty());

        let sl = ScanList::new("SL", vec![ch("A", 146.52)], ScanListId::from_raw(2));
        assert!(ScanList::prune_missing_channels(vec![sl], &[]).is_empty());

        let zn = Zone::new("Z", vec![ch("A", 146.52)], vec![]);
        assert!(Zone::prune_missing_channels(vec![zn], &[]).is_empty());
    }

    #[test]
    fn from_names_resolves_and_ignores_unknown() {
        let channels = vec![ch("Alpha", 146.52), ch("Bravo", 146.54)];
        let sl = ScanList::from_names(
            "SL",
            &["Bravo".to_string(), "Missing".to_string(), "Alpha".to_string()],
            &channels,
            ScanListId::from_raw(3),
        );
        let names: Vec<&str> = sl.channels.iter().map(|ch| ch.name()).collect();
        assert_eq!(names, vec!["Bravo", "Alpha"]);
    }
}

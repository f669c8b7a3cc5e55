//! Per-build identity bookkeeping.
//!
//! The [`IdentityContext`] owns the contact dedup tables, the channel
//! short-name table, and the stable-id counter for one codeplug build.
//! Independent builds each get their own context, so parallel pipelines never
//! share state.

use std::collections::HashMap;

use tracing::warn;

use crate::channel::Channel;
use crate::contact::{Contact, DmrId};
use crate::enums::{ContactKind, Timeslot};
use crate::error::{ModelError, Result};
use crate::ids::{GroupListId, ScanListId};
use crate::names::{self, NAME_MAX};

/// Whether contact identity keys include the timeslot.
///
/// Vendor formats with a single name slot per radio ID need the same
/// talkgroup on both timeslots to collapse to one registry entry; the
/// canonical contact list keeps them distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeslotMode {
    #[default]
    Respect,
    Ignore,
}

type NameKey = (String, Option<Timeslot>);
type IdKey = (DmrId, ContactKind, Option<Timeslot>);

#[derive(Debug, Default)]
pub struct IdentityContext {
    by_name: HashMap<NameKey, Contact>,
    by_id: HashMap<IdKey, Contact>,
    short_names: HashMap<String, Channel>,
    next_stable_id: u64,
}

impl IdentityContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize a contact.
    ///
    /// The first contact registered under an identity key wins; a later
    /// registration with a different display name logs a warning and returns
    /// the canonical contact. Two different IDs behind one display name are a
    /// fatal [`ModelError::DuplicateName`].
    pub fn register_contact(&mut self, contact: Contact, mode: TimeslotMode) -> Result<Contact> {
        let ts = match mode {
            TimeslotMode::Respect => contact.timeslot,
            TimeslotMode::Ignore => None,
        };

        let name_key = (contact.name.clone(), ts);
        match self.by_name.get(&name_key) {
            Some(existing) if existing.dmr_id != contact.dmr_id => {
                return Err(ModelError::DuplicateName {
                    name: contact.name.clone(),
                    dmr_id: contact.dmr_id.get(),
                    existing_dmr_id: existing.dmr_id.get(),
                });
            }
            Some(_) => {}
            None => {
                self.by_name.insert(name_key, contact.clone());
            }
        }

        let id_key = (contact.dmr_id, contact.kind, ts);
        if let Some(existing) = self.by_id.get(&id_key) {
            if existing.name != contact.name {
                warn!(
                    "two contacts with different names ({:?}, {:?}) have the same ID: {}; using {:?}",
                    existing.name, contact.name, existing.dmr_id, existing.name
                );
            }
            return Ok(existing.clone());
        }
        self.by_id.insert(id_key, contact.clone());
        Ok(contact)
    }

    /// Canonicalize a whole contact list, dropping duplicates while keeping
    /// first-seen order.
    pub fn dedup_contacts(
        &mut self,
        contacts: Vec<Contact>,
        mode: TimeslotMode,
    ) -> Result<Vec<Contact>> {
        let mut seen: HashMap<IdKey, ()> = HashMap::new();
        let mut deduped = Vec::new();
        for contact in contacts {
            let canonical = self.register_contact(contact, mode)?;
            let ts = match mode {
                TimeslotMode::Respect => canonical.timeslot,
                TimeslotMode::Ignore => None,
            };
            let id_key = (canonical.dmr_id, canonical.kind, ts);
            if seen.insert(id_key, ()).is_none() {
                deduped.push(canonical);
            }
        }
        Ok(deduped)
    }

    /// Claim a short name for a channel, assigning a single-digit dedup
    /// suffix when a structurally different channel already holds the name.
    ///
    /// Re-registering the same channel is idempotent. Running out of suffixes
    /// is fatal; it indicates pathological input.
    pub fn assign_short_name(&mut self, channel: Channel) -> Result<Channel> {
        let base = names::channel_name(channel.name(), NAME_MAX);
        match self.short_names.get(&base) {
            None => {
                self.short_names.insert(base, channel.clone());
                return Ok(channel);
            }
            Some(existing) if *existing == channel => return Ok(channel),
            Some(_) => {}
        }
        for key in 0..=9u8 {
            let candidate = channel.clone().with_dedup_key(key);
            let candidate_name = candidate.short_name();
            match self.short_names.get(&candidate_name) {
                None => {
                    self.short_names.insert(candidate_name, candidate.clone());
                    return Ok(candidate);
                }
                Some(existing) if *existing == candidate => return Ok(candidate),
                Some(_) => {}
            }
        }
        Err(ModelError::NameSpaceExhausted {
            channel: channel.name().to_string(),
            base,
        })
    }

    pub fn next_grouplist_id(&mut self) -> GroupListId {
        self.next_stable_id += 1;
        GroupListId::from_raw(self.next_stable_id)
    }

    pub fn next_scanlist_id(&mut self) -> ScanListId {
        self.next_stable_id += 1;
        ScanListId::from_raw(self.next_stable_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{AnalogChannel, Frequency};

    fn tg(name: &str, id: u32, ts: Timeslot) -> Contact {
        Contact::new(name, DmrId::new(id).unwrap(), ContactKind::Group).on_timeslot(ts)
    }

    #[test]
    fn register_is_idempotent() {
        let mut ctx = IdentityContext::new();
        let a = tg("CT", 1, Timeslot::One);
        let first = ctx.register_contact(a.clone(), TimeslotMode::Respect).unwrap();
        let second = ctx.register_contact(a, TimeslotMode::Respect).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name, second.name);
    }

    #[test]
    fn duplicate_id_keeps_first_name() {
        let mut ctx = IdentityContext::new();
        ctx.register_contact(tg("First", 1, Timeslot::One), TimeslotMode::Respect)
            .unwrap();
        let canonical = ctx
            .register_contact(tg("Second", 1, Timeslot::One), TimeslotMode::Respect)
            .unwrap();
        assert_eq!(canonical.name, "First");
    }

    #[test]
    fn duplicate_name_with_different_id_is_fatal() {
        let mut ctx = IdentityContext::new();
        ctx.register_contact(tg("CT", 1, Timeslot::One), TimeslotMode::Respect)
            .unwrap();
        let err = ctx
            .register_contact(tg("CT", 2, Timeslot::One), TimeslotMode::Respect)
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { .. }));
    }

    #[test]
    fn timeslot_mode_controls_dedup_granularity() {
        let one = tg("CT", 1, Timeslot::One);
        let two = tg("CT", 1, Timeslot::Two);

        let mut respect = IdentityContext::new();
        let kept = respect
            .dedup_contacts(vec![one.clone(), two.clone()], TimeslotMode::Respect)
            .unwrap();
        assert_eq!(kept.len(), 2);

        let mut ignore = IdentityContext::new();
        let kept = ignore
            .dedup_contacts(vec![one, two], TimeslotMode::Ignore)
            .unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn short_name_collisions_get_digit_suffixes() {
        let mut ctx = IdentityContext::new();
        let first: Channel = AnalogChannel::new("Puget Sound Repeater Net", Frequency::from_mhz(146.52)).into();
        let second: Channel = AnalogChannel::new("Puget Sound Repeater Net", Frequency::from_mhz(146.54)).into();

        let first = ctx.assign_short_name(first).unwrap();
        assert_eq!(first.dedup_key(), None);
        let second = ctx.assign_short_name(second.clone()).unwrap();
        assert_eq!(second.dedup_key(), Some(0));
        assert_ne!(first.short_name(), second.short_name());

        // Same channel again: same answer, no new suffix burned.
        let again: Channel = AnalogChannel::new("Puget Sound Repeater Net", Frequency::from_mhz(146.54)).into();
        let again = ctx.assign_short_name(again.clone().with_dedup_key(0)).unwrap();
        assert_eq!(again.short_name(), second.short_name());
    }

    #[test]
    fn suffix_exhaustion_is_fatal() {
        let mut ctx = IdentityContext::new();
        // The bare name plus suffixes 0-9 admit 11 structurally distinct
        // channels; the 12th has nowhere to go.
        for i in 0..11u32 {
            let ch: Channel =
                AnalogChannel::new("Collide", Frequency::from_mhz(146.0 + f64::from(i) * 0.01))
                    .into();
            ctx.assign_short_name(ch).unwrap();
        }
        let overflow: Channel = AnalogChannel::new("Collide", Frequency::from_mhz(147.99)).into();
        assert!(matches!(
            ctx.assign_short_name(overflow).unwrap_err(),
            ModelError::NameSpaceExhausted { .. }
        ));
    }
}

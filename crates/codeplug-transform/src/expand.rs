//! Template expansion: turn each repeater channel carrying static
//! talkgroups into one concrete channel per talkgroup, with a scanlist and
//! zone grouping the channels per repeater.

use std::collections::HashSet;

use tracing::debug;

use codeplug_model::{
    Channel, IdentityContext, ScanList, Zone, names,
};

use crate::codeplug::Codeplug;
use crate::error::Result;

impl Codeplug {
    /// Expand every template channel into per-talkgroup channels.
    ///
    /// Each template contributes a scanlist and a zone named after the
    /// template channel; a zone name already taken gets a numeric suffix.
    /// Template channels themselves do not appear in the result.
    pub fn expand_static_talkgroups(&self, ctx: &mut IdentityContext) -> Result<Codeplug> {
        let mut zone_names: HashSet<String> =
            self.zones.iter().map(|zn| zn.name.clone()).collect();

        let mut channels: Vec<Channel> = Vec::with_capacity(self.channels.len());
        let mut exp_scanlists: Vec<ScanList> = Vec::new();
        let mut exp_zones: Vec<Zone> = Vec::new();

        for channel in &self.channels {
            let Some(digital) = channel.as_digital().filter(|d| d.is_template()) else {
                channels.push(channel.clone());
                continue;
            };
            let zone_name = names::unique_name(&digital.name, &zone_names);
            zone_names.insert(zone_name.clone());

            let scanlist_id = ctx.next_scanlist_id();
            let mut members: Vec<Channel> =
                Vec::with_capacity(digital.static_talkgroups.len());
            for expanded in digital.from_talkgroups(&digital.static_talkgroups, scanlist_id) {
                members.push(ctx.assign_short_name(expanded.into())?);
            }
            debug!(
                "expanded {:?} into {} channels",
                digital.name,
                members.len()
            );

            exp_scanlists.push(ScanList::new(zone_name.clone(), members.clone(), scanlist_id));
            exp_zones.push(Zone::new(zone_name, members.clone(), members.clone()));
            channels.extend(members);
        }

        // Existing scanlists may reference template channels that no longer
        // exist; narrow them before appending the expansion scanlists.
        let mut scanlists =
            ScanList::prune_missing_channels(self.scanlists.clone(), &channels);
        scanlists.extend(exp_scanlists);

        let mut zones = Zone::prune_missing_channels(self.zones.clone(), &channels);
        zones.extend(exp_zones);

        Ok(Codeplug::assemble(
            self.contacts.clone(),
            channels,
            self.grouplists.clone(),
            scanlists,
            zones,
        ))
    }
}

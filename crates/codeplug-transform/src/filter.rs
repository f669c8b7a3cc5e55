//! The codeplug filter pipeline.
//!
//! All five container types run through one generic include/exclude/order
//! engine; the per-type wiring is only a name accessor and a rename
//! closure. Stage order matters: replacements re-run exclude and order so
//! callers may write rules against either the original or the replaced
//! name, and include is always checked last against the final names.

use std::collections::HashSet;
use std::mem;

use regex::Regex;
use tracing::{debug, info};

use codeplug_model::{
    Channel, Contact, Frequency, GroupList, ObjectKind, Ordering, Replacements, ScanList, Zone,
};

use crate::codeplug::Codeplug;
use crate::error::Result;

/// Arguments to [`Codeplug::filter`]; every stage is optional.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub include: Option<Ordering>,
    pub exclude: Option<Ordering>,
    pub order: Option<Ordering>,
    pub reverse_order: Option<Ordering>,
    /// `[low, high)` frequency windows; channels outside all of them are
    /// dropped.
    pub ranges: Option<Vec<(Frequency, Frequency)>>,
    pub replacements: Option<Replacements>,
}

impl FilterOptions {
    pub fn with_include(mut self, include: Ordering) -> Self {
        self.include = Some(include);
        self
    }

    pub fn with_exclude(mut self, exclude: Ordering) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn with_order(mut self, order: Ordering) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_reverse_order(mut self, reverse_order: Ordering) -> Self {
        self.reverse_order = Some(reverse_order);
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<(Frequency, Frequency)>) -> Self {
        self.ranges = Some(ranges);
        self
    }

    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = Some(replacements);
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Include,
    Exclude,
    Order,
    ReverseOrder,
}

// Patterns match like the ordering CSV promises: case-insensitive and
// anchored at the start of the name.
fn compile_anchored(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pat| Regex::new(&format!(r"(?i)\A(?:{pat})")).map_err(Into::into))
        .collect()
}

fn order_objects<T>(
    objects: Vec<T>,
    regexes: &[Regex],
    reverse: bool,
    name: impl Fn(&T) -> &str,
) -> Vec<T> {
    // First-match-wins pattern groups, each keeping the original relative
    // order, followed (or preceded, for reverse) by the unmatched objects.
    let mut groups: Vec<Vec<T>> = (0..regexes.len()).map(|_| Vec::new()).collect();
    let mut unmatched: Vec<T> = Vec::new();
    for obj in objects {
        match regexes.iter().position(|re| re.is_match(name(&obj))) {
            Some(ix) => groups[ix].push(obj),
            None => unmatched.push(obj),
        }
    }
    let matched: Vec<T> = groups.into_iter().flatten().collect();
    if reverse {
        unmatched.into_iter().chain(matched).collect()
    } else {
        matched.into_iter().chain(unmatched).collect()
    }
}

fn apply_stage<T>(
    objects: Vec<T>,
    patterns: &[String],
    stage: Stage,
    name: impl Fn(&T) -> &str,
) -> Result<Vec<T>> {
    if patterns.is_empty() {
        return Ok(objects);
    }
    let regexes = compile_anchored(patterns)?;
    let matches_any = |n: &str| regexes.iter().any(|re| re.is_match(n));
    Ok(match stage {
        Stage::Include => objects
            .into_iter()
            .filter(|o| matches_any(name(o)))
            .collect(),
        Stage::Exclude => objects
            .into_iter()
            .filter(|o| !matches_any(name(o)))
            .collect(),
        Stage::Order => order_objects(objects, &regexes, false, name),
        Stage::ReverseOrder => order_objects(objects, &regexes, true, name),
    })
}

fn replace_names<T>(
    objects: Vec<T>,
    rules: &[(String, String)],
    name: impl Fn(&T) -> &str,
    rename: impl Fn(T, String) -> T,
) -> Result<Vec<T>> {
    if rules.is_empty() {
        return Ok(objects);
    }
    let compiled: Vec<(Regex, &str)> = rules
        .iter()
        .map(|(pat, repl)| Ok((Regex::new(pat)?, repl.as_str())))
        .collect::<Result<_>>()?;
    Ok(objects
        .into_iter()
        .map(|obj| {
            let original = name(&obj).to_string();
            let mut replaced = original.clone();
            for (re, repl) in &compiled {
                replaced = re.replace_all(&replaced, *repl).into_owned();
            }
            if replaced != original {
                rename(obj, replaced)
            } else {
                obj
            }
        })
        .collect())
}

fn filter_channel_frequency(
    channels: Vec<Channel>,
    ranges: &[(Frequency, Frequency)],
) -> Vec<Channel> {
    let in_range =
        |f: Frequency| ranges.iter().any(|(low, high)| *low <= f && f < *high);
    let (kept, pruned): (Vec<Channel>, Vec<Channel>) = channels
        .into_iter()
        .partition(|ch| in_range(ch.frequency()));
    if !pruned.is_empty() {
        info!(
            "excluding {} channels with frequency out of range",
            pruned.len()
        );
    }
    kept
}

/// The five collections while a filter is in flight.
struct Working {
    contacts: Vec<Contact>,
    channels: Vec<Channel>,
    grouplists: Vec<GroupList>,
    scanlists: Vec<ScanList>,
    zones: Vec<Zone>,
}

impl Working {
    fn apply_ordering(&mut self, ordering: &Ordering, stage: Stage) -> Result<()> {
        self.contacts = apply_stage(
            mem::take(&mut self.contacts),
            ordering.patterns(ObjectKind::Contacts),
            stage,
            |ct| ct.name.as_str(),
        )?;
        self.channels = apply_stage(
            mem::take(&mut self.channels),
            ordering.patterns(ObjectKind::Channels),
            stage,
            |ch| ch.name(),
        )?;
        self.grouplists = apply_stage(
            mem::take(&mut self.grouplists),
            ordering.patterns(ObjectKind::GroupLists),
            stage,
            |gl| gl.name.as_str(),
        )?;
        self.scanlists = apply_stage(
            mem::take(&mut self.scanlists),
            ordering.patterns(ObjectKind::ScanLists),
            stage,
            |sl| sl.name.as_str(),
        )?;
        self.zones = apply_stage(
            mem::take(&mut self.zones),
            ordering.patterns(ObjectKind::Zones),
            stage,
            |zn| zn.name.as_str(),
        )?;
        Ok(())
    }

    fn apply_replacements(&mut self, replacements: &Replacements) -> Result<()> {
        self.contacts = replace_names(
            mem::take(&mut self.contacts),
            replacements.rules(ObjectKind::Contacts),
            |ct| ct.name.as_str(),
            |mut ct, name| {
                ct.name = name;
                ct
            },
        )?;
        self.channels = replace_names(
            mem::take(&mut self.channels),
            replacements.rules(ObjectKind::Channels),
            |ch| ch.name(),
            Channel::with_name,
        )?;
        self.grouplists = replace_names(
            mem::take(&mut self.grouplists),
            replacements.rules(ObjectKind::GroupLists),
            |gl| gl.name.as_str(),
            |mut gl, name| {
                gl.name = name;
                gl
            },
        )?;
        self.scanlists = replace_names(
            mem::take(&mut self.scanlists),
            replacements.rules(ObjectKind::ScanLists),
            |sl| sl.name.as_str(),
            |mut sl, name| {
                sl.name = name;
                sl
            },
        )?;
        self.zones = replace_names(
            mem::take(&mut self.zones),
            replacements.rules(ObjectKind::Zones),
            |zn| zn.name.as_str(),
            |mut zn, name| {
                zn.name = name;
                zn
            },
        )?;
        Ok(())
    }

    /// Drop digital channels whose talkgroup references did not survive the
    /// contact filter, narrow static talkgroup lists to the surviving
    /// contact order, and refresh single-talkgroup references so renames
    /// propagate.
    fn cascade_talkgroups(&mut self) {
        let contacts = &self.contacts;
        self.channels = mem::take(&mut self.channels)
            .into_iter()
            .filter_map(|ch| {
                let Channel::Digital(mut digital) = ch else {
                    return Some(ch);
                };
                if !digital.static_talkgroups.is_empty() {
                    let members: HashSet<&Contact> = digital.static_talkgroups.iter().collect();
                    let kept: Vec<Contact> = contacts
                        .iter()
                        .filter(|ct| members.contains(ct))
                        .cloned()
                        .collect();
                    if kept.is_empty() {
                        debug!(
                            "channel {:?}: no static talkgroups survive, pruning",
                            digital.name
                        );
                        return None;
                    }
                    digital.static_talkgroups = kept;
                    return Some(Channel::Digital(digital));
                }
                if let Some(tg) = digital.talkgroup.clone() {
                    return match contacts.iter().find(|ct| **ct == tg) {
                        Some(updated) => {
                            if updated.name != tg.name {
                                digital.talkgroup = Some(updated.clone());
                            }
                            Some(Channel::Digital(digital))
                        }
                        None => {
                            debug!(
                                "channel {:?} references missing talkgroup {:?}, pruning",
                                digital.name, tg.name
                            );
                            None
                        }
                    };
                }
                // A digital channel without any talkgroup cannot transmit.
                debug!("channel {:?} has no talkgroup, pruning", digital.name);
                None
            })
            .collect();
    }
}

impl Codeplug {
    /// Filter, reorder, and rename codeplug objects, returning a new
    /// codeplug with referential integrity restored.
    pub fn filter(&self, options: &FilterOptions) -> Result<Codeplug> {
        let channels = match &options.ranges {
            Some(ranges) => filter_channel_frequency(self.channels.clone(), ranges),
            None => self.channels.clone(),
        };
        let mut working = Working {
            contacts: self.contacts.clone(),
            channels,
            grouplists: self.grouplists.clone(),
            scanlists: self.scanlists.clone(),
            zones: self.zones.clone(),
        };

        if let Some(exclude) = &options.exclude {
            working.apply_ordering(exclude, Stage::Exclude)?;
        }
        if let Some(order) = &options.order {
            working.apply_ordering(order, Stage::Order)?;
        }
        if let Some(reverse) = &options.reverse_order {
            working.apply_ordering(reverse, Stage::ReverseOrder)?;
        }
        if let Some(replacements) = &options.replacements {
            working.apply_replacements(replacements)?;
            // Re-run the name-driven stages so rules written against the
            // replaced names also take effect.
            if let Some(exclude) = &options.exclude {
                working.apply_ordering(exclude, Stage::Exclude)?;
            }
            if let Some(order) = &options.order {
                working.apply_ordering(order, Stage::Order)?;
            }
            if let Some(reverse) = &options.reverse_order {
                working.apply_ordering(reverse, Stage::ReverseOrder)?;
            }
        }
        // Include runs last, against the final (possibly replaced) names.
        if let Some(include) = &options.include {
            working.apply_ordering(include, Stage::Include)?;
        }

        working.cascade_talkgroups();

        let grouplists =
            GroupList::prune_missing_contacts(working.grouplists, &working.contacts);
        let scanlists = ScanList::prune_missing_channels(working.scanlists, &working.channels);
        let zones = Zone::prune_missing_channels(working.zones, &working.channels);

        Ok(Codeplug::assemble(
            working.contacts,
            working.channels,
            grouplists,
            scanlists,
            zones,
        ))
    }
}

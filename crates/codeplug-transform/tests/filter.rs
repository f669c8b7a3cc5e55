//! Filter pipeline behavior: stage ordering, cascade pruning, and
//! referential integrity of the result.

use codeplug_model::{
    AnalogChannel, Channel, Contact, ContactKind, DigitalChannel, DmrId, Frequency, GroupList,
    IdentityContext, Ordering, Replacements, ScanList, Timeslot, Zone,
};
use codeplug_transform::{Codeplug, FilterOptions};

fn tg(name: &str, id: u32, ts: Timeslot) -> Contact {
    Contact::new(name, DmrId::new(id).unwrap(), ContactKind::Group).on_timeslot(ts)
}

/// One analog simplex channel and two digital channels on the same repeater
/// pair, wired into a grouplist, a scanlist, and a zone.
fn fixture(ctx: &mut IdentityContext) -> Codeplug {
    let ct1 = tg("Cascade 1", 3181, Timeslot::One);
    let ct2 = tg("Cascade 2", 3181, Timeslot::Two);
    let ww = tg("Worldwide", 91, Timeslot::One);

    let a1: Channel = AnalogChannel::new("Simplex 52", Frequency::from_mhz(146.52)).into();
    let d1: Channel = DigitalChannel::new("Longview 1", Frequency::from_mhz(443.4375))
        .with_talkgroup(ct1.clone())
        .into();
    let d2: Channel = DigitalChannel::new("Longview 2", Frequency::from_mhz(443.4375))
        .with_talkgroup(ct2.clone())
        .into();

    let grouplists = vec![GroupList::new(
        "Cascade All",
        vec![ct1.clone(), ct2.clone(), ww.clone()],
        ctx.next_grouplist_id(),
    )];
    let scanlists = vec![ScanList::new(
        "Local",
        vec![a1.clone(), d1.clone()],
        ctx.next_scanlist_id(),
    )];
    let zones = vec![Zone::new(
        "Longview",
        vec![a1.clone(), d1.clone(), d2.clone()],
        vec![d1.clone()],
    )];

    Codeplug::new(
        vec![ct1, ct2, ww],
        vec![a1, d1, d2],
        grouplists,
        scanlists,
        zones,
        ctx,
    )
    .unwrap()
}

fn channel_names(cp: &Codeplug) -> Vec<&str> {
    cp.channels().iter().map(Channel::name).collect()
}

fn contact_names(cp: &Codeplug) -> Vec<&str> {
    cp.contacts().iter().map(|ct| ct.name.as_str()).collect()
}

#[test]
fn empty_options_change_nothing() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let filtered = cp.filter(&FilterOptions::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&cp).unwrap(),
        serde_json::to_value(&filtered).unwrap()
    );
}

#[test]
fn filter_is_idempotent() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default()
        .with_exclude(Ordering {
            contacts: vec!["Worldwide".into()],
            ..Ordering::default()
        })
        .with_order(Ordering {
            channels: vec!["Longview.*".into(), "Simplex.*".into()],
            ..Ordering::default()
        });
    let once = cp.filter(&options).unwrap();
    let twice = once.filter(&options).unwrap();
    assert_eq!(
        serde_json::to_value(&once).unwrap(),
        serde_json::to_value(&twice).unwrap()
    );
}

#[test]
fn excluding_a_contact_cascades_to_channels_and_lists() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default().with_exclude(Ordering {
        contacts: vec!["Cascade 1".into()],
        ..Ordering::default()
    });
    let filtered = cp.filter(&options).unwrap();

    assert_eq!(contact_names(&filtered), vec!["Cascade 2", "Worldwide"]);
    // Longview 1 carried the excluded talkgroup and is gone with it.
    assert_eq!(channel_names(&filtered), vec!["Simplex 52", "Longview 2"]);
    assert_eq!(
        filtered.grouplists()[0]
            .contacts
            .iter()
            .map(|ct| ct.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Cascade 2", "Worldwide"]
    );
    assert_eq!(filtered.scanlists()[0].channels.len(), 1);
    let zone = &filtered.zones()[0];
    assert_eq!(zone.channels_a.len(), 2);
    assert!(zone.channels_b.is_empty());
}

#[test]
fn order_groups_by_first_matching_pattern() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default().with_order(Ordering {
        channels: vec!["Longview 2".into(), "Longview.*".into()],
        ..Ordering::default()
    });
    let filtered = cp.filter(&options).unwrap();
    // Matched groups in pattern order, unmatched channels after them.
    assert_eq!(
        channel_names(&filtered),
        vec!["Longview 2", "Longview 1", "Simplex 52"]
    );
}

#[test]
fn reverse_order_puts_matches_last() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default().with_reverse_order(Ordering {
        channels: vec!["Simplex.*".into()],
        ..Ordering::default()
    });
    let filtered = cp.filter(&options).unwrap();
    assert_eq!(
        channel_names(&filtered),
        vec!["Longview 1", "Longview 2", "Simplex 52"]
    );
}

#[test]
fn patterns_match_case_insensitively_and_anchored() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    // "view" appears in the middle of the name; anchoring means no match.
    let miss = FilterOptions::default().with_exclude(Ordering {
        channels: vec!["view".into()],
        ..Ordering::default()
    });
    assert_eq!(cp.filter(&miss).unwrap().channels().len(), 3);

    let hit = FilterOptions::default().with_exclude(Ordering {
        channels: vec!["longview".into()],
        ..Ordering::default()
    });
    assert_eq!(channel_names(&cp.filter(&hit).unwrap()), vec!["Simplex 52"]);
}

#[test]
fn exclusions_rerun_against_replaced_names() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    // The exclude pattern only matches the post-replacement name, so it must
    // take effect on the second pass.
    let options = FilterOptions::default()
        .with_replacements(Replacements {
            channels: vec![("Longview".into(), "LV".into())],
            ..Replacements::default()
        })
        .with_exclude(Ordering {
            channels: vec!["lv 1".into()],
            ..Ordering::default()
        });
    let filtered = cp.filter(&options).unwrap();
    assert_eq!(channel_names(&filtered), vec!["Simplex 52", "LV 2"]);
    // Containers pick up the renamed surviving copy.
    let zone = &filtered.zones()[0];
    let zone_names: Vec<&str> = zone.channels_a.iter().map(Channel::name).collect();
    assert_eq!(zone_names, vec!["Simplex 52", "LV 2"]);
}

#[test]
fn include_applies_to_final_names_and_renames_talkgroup_refs() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default()
        .with_replacements(Replacements {
            contacts: vec![("Cascade".into(), "CSC".into())],
            ..Replacements::default()
        })
        .with_include(Ordering {
            contacts: vec!["CSC".into()],
            ..Ordering::default()
        });
    let filtered = cp.filter(&options).unwrap();

    assert_eq!(contact_names(&filtered), vec!["CSC 1", "CSC 2"]);
    // Digital channels keep their talkgroups but see the new names.
    let d1 = filtered.channels()[1].as_digital().unwrap();
    assert_eq!(d1.talkgroup.as_ref().unwrap().name, "CSC 1");
}

#[test]
fn frequency_ranges_are_half_open() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    // The upper bound is exclusive: 443.4375 itself falls outside.
    let options = FilterOptions::default().with_ranges(vec![(
        Frequency::from_mhz(146.52),
        Frequency::from_mhz(443.4375),
    )]);
    let filtered = cp.filter(&options).unwrap();
    assert_eq!(channel_names(&filtered), vec!["Simplex 52"]);
    // Scanlist and zone shrink to the surviving channel.
    assert_eq!(filtered.scanlists()[0].channels.len(), 1);
    assert_eq!(filtered.zones()[0].channels_a.len(), 1);
}

#[test]
fn digital_channel_without_any_talkgroup_is_pruned() {
    let mut ctx = IdentityContext::new();
    let bare: Channel = DigitalChannel::new("Orphan", Frequency::from_mhz(441.0)).into();
    let cp = Codeplug::new(
        Vec::new(),
        vec![bare],
        Vec::new(),
        Vec::new(),
        Vec::new(),
        &mut ctx,
    )
    .unwrap();
    let filtered = cp.filter(&FilterOptions::default()).unwrap();
    assert!(filtered.channels().is_empty());
}

#[test]
fn static_talkgroup_lists_are_narrowed_not_pruned() {
    let mut ctx = IdentityContext::new();
    let ct1 = tg("Cascade 1", 3181, Timeslot::One);
    let ct2 = tg("Cascade 2", 3181, Timeslot::Two);
    let template: Channel = DigitalChannel::new("Repeater", Frequency::from_mhz(443.4375))
        .with_static_talkgroups(vec![ct1.clone(), ct2.clone()])
        .into();
    let cp = Codeplug::new(
        vec![ct1, ct2],
        vec![template],
        Vec::new(),
        Vec::new(),
        Vec::new(),
        &mut ctx,
    )
    .unwrap();

    let options = FilterOptions::default().with_exclude(Ordering {
        contacts: vec!["Cascade 2".into()],
        ..Ordering::default()
    });
    let filtered = cp.filter(&options).unwrap();
    let statics = &filtered.channels()[0].as_digital().unwrap().static_talkgroups;
    assert_eq!(statics.len(), 1);
    assert_eq!(statics[0].name, "Cascade 1");

    // Excluding every static talkgroup drops the channel entirely.
    let options = FilterOptions::default().with_exclude(Ordering {
        contacts: vec!["Cascade.*".into()],
        ..Ordering::default()
    });
    assert!(cp.filter(&options).unwrap().channels().is_empty());
}

#[test]
fn invalid_pattern_is_an_error() {
    let mut ctx = IdentityContext::new();
    let cp = fixture(&mut ctx);
    let options = FilterOptions::default().with_exclude(Ordering {
        channels: vec!["[unclosed".into()],
        ..Ordering::default()
    });
    assert!(matches!(
        cp.filter(&options),
        Err(codeplug_transform::TransformError::Pattern(_))
    ));
}

use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;

/// Five parallel pattern lists, one per container type, driving the
/// include/exclude/order/reverse-order filter directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub contacts: Vec<String>,
    pub channels: Vec<String>,
    pub grouplists: Vec<String>,
    pub scanlists: Vec<String>,
    pub zones: Vec<String>,
}

impl Ordering {
    pub fn patterns(&self, kind: ObjectKind) -> &[String] {
        match kind {
            ObjectKind::Contacts => &self.contacts,
            ObjectKind::Channels => &self.channels,
            ObjectKind::GroupLists => &self.grouplists,
            ObjectKind::ScanLists => &self.scanlists,
            ObjectKind::Zones => &self.zones,
        }
    }

    pub fn patterns_mut(&mut self, kind: ObjectKind) -> &mut Vec<String> {
        match kind {
            ObjectKind::Contacts => &mut self.contacts,
            ObjectKind::Channels => &mut self.channels,
            ObjectKind::GroupLists => &mut self.grouplists,
            ObjectKind::ScanLists => &mut self.scanlists,
            ObjectKind::Zones => &mut self.zones,
        }
    }

    /// Concatenate two orderings, self's entries first.
    pub fn merge(mut self, other: Ordering) -> Ordering {
        for kind in ObjectKind::ALL {
            let mut extra = other.patterns(kind).to_vec();
            self.patterns_mut(kind).append(&mut extra);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        ObjectKind::ALL.iter().all(|k| self.patterns(*k).is_empty())
    }
}

/// Five parallel lists of (find-pattern, replacement) pairs applied to names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacements {
    pub contacts: Vec<(String, String)>,
    pub channels: Vec<(String, String)>,
    pub grouplists: Vec<(String, String)>,
    pub scanlists: Vec<(String, String)>,
    pub zones: Vec<(String, String)>,
}

impl Replacements {
    pub fn rules(&self, kind: ObjectKind) -> &[(String, String)] {
        match kind {
            ObjectKind::Contacts => &self.contacts,
            ObjectKind::Channels => &self.channels,
            ObjectKind::GroupLists => &self.grouplists,
            ObjectKind::ScanLists => &self.scanlists,
            ObjectKind::Zones => &self.zones,
        }
    }

    pub fn rules_mut(&mut self, kind: ObjectKind) -> &mut Vec<(String, String)> {
        match kind {
            ObjectKind::Contacts => &mut self.contacts,
            ObjectKind::Channels => &mut self.channels,
            ObjectKind::GroupLists => &mut self.grouplists,
            ObjectKind::ScanLists => &mut self.scanlists,
            ObjectKind::Zones => &mut self.zones,
        }
    }

    pub fn merge(mut self, other: Replacements) -> Replacements {
        for kind in ObjectKind::ALL {
            let mut extra = other.rules(kind).to_vec();
            self.rules_mut(kind).append(&mut extra);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        ObjectKind::ALL.iter().all(|k| self.rules(*k).is_empty())
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::contact::Contact;
use crate::enums::{AdmitCriteria, Bandwidth, Power};
use crate::error::{ModelError, Result};
use crate::ids::{GroupListId, ScanListId};
use crate::names::{self, NAME_MAX};
use crate::tone;

/// Frequency in MHz as a fixed-point value with 5 decimal places (10 Hz
/// resolution). Signed so the same type serves as a repeater offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Frequency(i64);

impl Frequency {
    const UNITS_PER_MHZ: f64 = 100_000.0;

    pub fn from_mhz(mhz: f64) -> Self {
        Self((mhz * Self::UNITS_PER_MHZ).round() as i64)
    }

    pub fn mhz(&self) -> f64 {
        self.0 as f64 / Self::UNITS_PER_MHZ
    }

    pub fn parse(raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<f64>()
            .map(Self::from_mhz)
            .map_err(|_| ModelError::InvalidValue {
                kind: "frequency",
                value: raw.to_string(),
            })
    }

    pub fn offset_by(&self, offset: Frequency) -> Frequency {
        Frequency(self.0 + offset.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100_000;
        let frac = abs % 100_000;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{frac:05}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

/// Whether an unknown tone fails construction or only logs. Some CPS tools
/// accept tones this model does not recognize, so lenient mode keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneValidation {
    #[default]
    Strict,
    Lenient,
}

fn check_tone(
    field: &'static str,
    channel: &str,
    raw: &str,
    validation: ToneValidation,
) -> Result<String> {
    let normalized = tone::normalize_tone(raw);
    if !tone::is_valid_tone(&normalized) {
        match validation {
            ToneValidation::Strict => {
                return Err(ModelError::InvalidTone {
                    field,
                    channel: channel.to_string(),
                    tone: raw.to_string(),
                });
            }
            ToneValidation::Lenient => {
                warn!("field {field} for {channel:?} has unknown tone {raw:?}");
            }
        }
    }
    Ok(normalized)
}

/// An FM voice channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogChannel {
    pub name: String,
    pub frequency: Frequency,
    pub offset: Option<Frequency>,
    pub power: Power,
    pub rx_only: bool,
    pub scanlist: Option<ScanListId>,
    pub code: Option<String>,
    /// Single-digit suffix keeping structurally different channels apart when
    /// their short names would collide. Assigned by the identity context.
    pub dedup_key: Option<u8>,
    pub tone_encode: Option<String>,
    pub tone_decode: Option<String>,
    pub bandwidth: Bandwidth,
    pub squelch: u8,
}

impl AnalogChannel {
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            frequency,
            offset: None,
            power: Power::default(),
            rx_only: false,
            scanlist: None,
            code: None,
            dedup_key: None,
            tone_encode: None,
            tone_decode: None,
            bandwidth: Bandwidth::default(),
            squelch: 1,
        }
    }

    pub fn with_offset(mut self, offset: Frequency) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_power(mut self, power: Power) -> Self {
        self.power = power;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Set the encode/decode tones, normalizing and validating against the
    /// known CTCSS/DCS table.
    pub fn with_tones(
        mut self,
        encode: Option<&str>,
        decode: Option<&str>,
        validation: ToneValidation,
    ) -> Result<Self> {
        self.tone_encode = encode
            .map(|t| check_tone("tone_encode", &self.name, t, validation))
            .transpose()?;
        self.tone_decode = decode
            .map(|t| check_tone("tone_decode", &self.name, t, validation))
            .transpose()?;
        Ok(self)
    }
}

impl PartialEq for AnalogChannel {
    fn eq(&self, other: &Self) -> bool {
        // Structural identity: name, code, and the scanlist back-reference
        // are decorative and excluded.
        self.frequency == other.frequency
            && self.offset == other.offset
            && self.power == other.power
            && self.rx_only == other.rx_only
            && self.dedup_key == other.dedup_key
            && self.tone_encode == other.tone_encode
            && self.tone_decode == other.tone_decode
            && self.bandwidth == other.bandwidth
            && self.squelch == other.squelch
    }
}

impl Eq for AnalogChannel {}

impl Hash for AnalogChannel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.frequency.hash(state);
        self.offset.hash(state);
        self.power.hash(state);
        self.rx_only.hash(state);
        self.dedup_key.hash(state);
        self.tone_encode.hash(state);
        self.tone_decode.hash(state);
        self.bandwidth.hash(state);
        self.squelch.hash(state);
    }
}

/// A DMR voice channel.
///
/// A digital channel carrying `static_talkgroups` is a repeater template: it
/// stands in for one concrete channel per talkgroup and is replaced by
/// `expand_static_talkgroups` before output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalChannel {
    pub name: String,
    pub frequency: Frequency,
    pub offset: Option<Frequency>,
    pub power: Power,
    pub rx_only: bool,
    pub scanlist: Option<ScanListId>,
    pub code: Option<String>,
    pub dedup_key: Option<u8>,
    pub color_code: u8,
    pub grouplist: Option<GroupListId>,
    pub talkgroup: Option<Contact>,
    pub static_talkgroups: Vec<Contact>,
    pub admit_criteria: AdmitCriteria,
}

impl DigitalChannel {
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            frequency,
            offset: None,
            power: Power::default(),
            rx_only: false,
            scanlist: None,
            code: None,
            dedup_key: None,
            color_code: 1,
            grouplist: None,
            talkgroup: None,
            static_talkgroups: Vec::new(),
            admit_criteria: AdmitCriteria::default(),
        }
    }

    pub fn with_offset(mut self, offset: Frequency) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_power(mut self, power: Power) -> Self {
        self.power = power;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_color_code(mut self, color_code: u8) -> Self {
        self.color_code = color_code;
        self
    }

    pub fn with_talkgroup(mut self, talkgroup: Contact) -> Self {
        self.talkgroup = Some(talkgroup);
        self
    }

    pub fn with_grouplist(mut self, grouplist: GroupListId) -> Self {
        self.grouplist = Some(grouplist);
        self
    }

    pub fn with_static_talkgroups(mut self, talkgroups: Vec<Contact>) -> Self {
        self.static_talkgroups = talkgroups;
        self
    }

    pub fn is_template(&self) -> bool {
        !self.static_talkgroups.is_empty()
    }

    /// Synthesize one concrete channel per talkgroup from this template.
    ///
    /// Names combine the talkgroup (with timeslot) and the first characters
    /// of the site code, fitting the radio name limit.
    pub fn from_talkgroups(
        &self,
        talkgroups: &[Contact],
        scanlist: ScanListId,
    ) -> Vec<DigitalChannel> {
        talkgroups
            .iter()
            .map(|tg| {
                let label: String = tg.name_with_timeslot().chars().take(NAME_MAX - 4).collect();
                let site: String = self
                    .code
                    .as_deref()
                    .unwrap_or(&self.name)
                    .chars()
                    .take(3)
                    .collect();
                DigitalChannel {
                    name: format!("{label} {site}"),
                    talkgroup: Some(tg.clone()),
                    static_talkgroups: Vec::new(),
                    scanlist: Some(scanlist),
                    ..self.clone()
                }
            })
            .collect()
    }
}

impl PartialEq for DigitalChannel {
    fn eq(&self, other: &Self) -> bool {
        // name, code, back-references, and static_talkgroups are excluded:
        // the static list can change without changing channel identity.
        self.frequency == other.frequency
            && self.offset == other.offset
            && self.power == other.power
            && self.rx_only == other.rx_only
            && self.dedup_key == other.dedup_key
            && self.color_code == other.color_code
            && self.talkgroup == other.talkgroup
            && self.admit_criteria == other.admit_criteria
    }
}

impl Eq for DigitalChannel {}

impl Hash for DigitalChannel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.frequency.hash(state);
        self.offset.hash(state);
        self.power.hash(state);
        self.rx_only.hash(state);
        self.dedup_key.hash(state);
        self.color_code.hash(state);
        self.talkgroup.hash(state);
        self.admit_criteria.hash(state);
    }
}

/// Either channel variant; containers hold these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Analog(AnalogChannel),
    Digital(DigitalChannel),
}

impl Channel {
    pub fn name(&self) -> &str {
        match self {
            Channel::Analog(ch) => &ch.name,
            Channel::Digital(ch) => &ch.name,
        }
    }

    pub fn with_name(mut self, name: String) -> Channel {
        match &mut self {
            Channel::Analog(ch) => ch.name = name,
            Channel::Digital(ch) => ch.name = name,
        }
        self
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Channel::Analog(ch) => ch.frequency,
            Channel::Digital(ch) => ch.frequency,
        }
    }

    pub fn offset(&self) -> Option<Frequency> {
        match self {
            Channel::Analog(ch) => ch.offset,
            Channel::Digital(ch) => ch.offset,
        }
    }

    /// Transmit frequency: receive plus offset.
    pub fn transmit_frequency(&self) -> Frequency {
        let rx = self.frequency();
        match self.offset() {
            Some(offset) => rx.offset_by(offset),
            None => rx,
        }
    }

    pub fn power(&self) -> Power {
        match self {
            Channel::Analog(ch) => ch.power,
            Channel::Digital(ch) => ch.power,
        }
    }

    pub fn rx_only(&self) -> bool {
        match self {
            Channel::Analog(ch) => ch.rx_only,
            Channel::Digital(ch) => ch.rx_only,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Channel::Analog(ch) => ch.code.as_deref(),
            Channel::Digital(ch) => ch.code.as_deref(),
        }
    }

    pub fn scanlist(&self) -> Option<ScanListId> {
        match self {
            Channel::Analog(ch) => ch.scanlist,
            Channel::Digital(ch) => ch.scanlist,
        }
    }

    pub fn with_scanlist(mut self, scanlist: Option<ScanListId>) -> Channel {
        match &mut self {
            Channel::Analog(ch) => ch.scanlist = scanlist,
            Channel::Digital(ch) => ch.scanlist = scanlist,
        }
        self
    }

    pub fn dedup_key(&self) -> Option<u8> {
        match self {
            Channel::Analog(ch) => ch.dedup_key,
            Channel::Digital(ch) => ch.dedup_key,
        }
    }

    pub(crate) fn with_dedup_key(mut self, key: u8) -> Channel {
        match &mut self {
            Channel::Analog(ch) => ch.dedup_key = Some(key),
            Channel::Digital(ch) => ch.dedup_key = Some(key),
        }
        self
    }

    pub fn as_digital(&self) -> Option<&DigitalChannel> {
        match self {
            Channel::Digital(ch) => Some(ch),
            Channel::Analog(_) => None,
        }
    }

    /// Display name truncated to the radio limit, with the dedup suffix (if
    /// any) appended after re-truncating to make room.
    pub fn short_name(&self) -> String {
        match self.dedup_key() {
            Some(key) => format!("{}{key}", names::channel_name(self.name(), NAME_MAX - 1)),
            None => names::channel_name(self.name(), NAME_MAX),
        }
    }
}

impl From<AnalogChannel> for Channel {
    fn from(ch: AnalogChannel) -> Self {
        Channel::Analog(ch)
    }
}

impl From<DigitalChannel> for Channel {
    fn from(ch: DigitalChannel) -> Self {
        Channel::Digital(ch)
    }
}

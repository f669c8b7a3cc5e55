//! Data model for codeplug objects: contacts, channels, grouplists,
//! scanlists, zones, and the per-radio capacity profiles that constrain how
//! they are rendered.

pub mod channel;
pub mod contact;
pub mod enums;
pub mod error;
pub mod identity;
pub mod ids;
pub mod lists;
pub mod names;
pub mod ordering;
pub mod profile;
pub mod tone;

pub use channel::{AnalogChannel, Channel, DigitalChannel, Frequency, ToneValidation};
pub use contact::{Contact, DmrId};
pub use enums::{AdmitCriteria, Bandwidth, ContactKind, ObjectKind, Power, Timeslot};
pub use error::{ModelError, Result};
pub use identity::{IdentityContext, TimeslotMode};
pub use ids::{GroupListId, ScanListId};
pub use lists::{GroupList, ScanList, Zone};
pub use names::NAME_MAX;
pub use ordering::{Ordering, Replacements};
pub use profile::RadioProfile;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A contact's raw ID field was non-numeric or not positive.
    #[error("invalid DMR ID {value:?} for contact {name:?}")]
    InvalidIdentifier { name: String, value: String },

    /// Two distinctly-identified contacts share one display name. A codeplug
    /// cannot render both, so construction fails rather than guessing.
    #[error(
        "two contacts named {name:?} have different IDs: {dmr_id} and {existing_dmr_id}; \
         rename one of the contacts"
    )]
    DuplicateName {
        name: String,
        dmr_id: u32,
        existing_dmr_id: u32,
    },

    /// Short-name disambiguation ran out of single-digit suffixes.
    #[error("no unused short name for channel {channel:?}: all suffixes of {base:?} are taken")]
    NameSpaceExhausted { channel: String, base: String },

    #[error("field {field} for channel {channel:?} has unknown tone {tone:?}")]
    InvalidTone {
        field: &'static str,
        channel: String,
        tone: String,
    },

    #[error("unknown {kind} value {value:?}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("no allowed {kind} to map {value} into; allowed: {allowed}")]
    NoAllowedValue {
        kind: &'static str,
        value: String,
        allowed: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;

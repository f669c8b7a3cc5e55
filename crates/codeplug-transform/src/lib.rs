//! The codeplug aggregate and its transformation pipeline.
//!
//! A [`Codeplug`] is built once from loader output and then refined through
//! pure transforms: [`Codeplug::filter`] prunes, reorders, and renames;
//! [`Codeplug::expand_static_talkgroups`] replaces repeater templates with
//! per-talkgroup channels; [`Codeplug::replace_scanlists`] applies
//! user-supplied scanlist overrides. Every transform returns a new codeplug
//! and restores referential integrity on the way out.

mod codeplug;
mod error;
mod expand;
mod filter;

pub use codeplug::Codeplug;
pub use error::{Result, TransformError};
pub use filter::FilterOptions;

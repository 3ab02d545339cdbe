//! Profile storage and active-profile resolution
//!
//! # Overview
//!
//! A profile is a named copy of the `oh-my-opencode.json` document, stored as
//! `<base>/profiles/<name>.json`. Switching profiles means writing one of those
//! documents over the active config file.
//!
//! The active config is never tagged with the profile it came from. Instead
//! [`ActiveResolver::get_active`] compares it against every stored profile,
//! ignoring the `$schema` field, and reports one of:
//!
//! - **Absent**: there is no active config file
//! - **Matched**: the active config equals a stored profile
//! - **Orphan**: the active config equals none of them (edited by hand, or
//!   never saved as a profile)
//!
//! # Layout
//!
//! ```text
//! <base>/oh-my-opencode.json                          active config
//! <base>/profiles/<name>.json                         one file per profile
//! <base>/profiles/oh-my-opencode.json.bak.<stamp>     backups (see crate::backup)
//! ```

mod active;
mod names;
mod store;

pub use active::{ActiveResolver, ActiveState};
pub use names::{
    derive_profile_name, is_allowed_char, sanitize_profile_name, unique_profile_name,
    validate_profile_name,
};
pub use store::{Profile, ProfileStore};

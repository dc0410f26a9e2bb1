//! Stuff that doesn't fit anywhere else.

pub(crate) mod debug;
mod serde_helpers;

pub(crate) use debug::debug;
pub(crate) use serde_helpers::is_default;

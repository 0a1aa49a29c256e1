//! Well-known strings of the job flow naming convention.
//!
//! A managed job flow is named `"{prefix} : {name}"`, optionally followed by a
//! space and a list of `key => value` suffix pairs joined by `", "`.

/// Separator placed between the name prefix and the run name.
pub const NAME_NAME_SEPARATOR: &str = " : ";

/// Separator placed between the key and the value of one suffix pair.
pub const NAME_SUFFIX_SEPARATOR: &str = " => ";

/// Suffix key carrying the job type label (`type => hive`).
///
/// The type of a job flow is recovered later by looking for this key in the name,
/// so it must stay stable across releases.
pub const NAME_KEY_TYPE: &str = "type";

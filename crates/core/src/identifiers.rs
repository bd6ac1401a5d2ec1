//! System identifiers of the well-known keynodes collections rely on.

/// Prefix of positional role markers: `rrel_1`, `rrel_2`, ...
pub const ROLE_PREFIX: &str = "rrel_";

/// Role marker of the first position; also the head marker of oriented sets.
pub const RREL_ONE: &str = "rrel_1";

/// Marker tagging the membership arc of the last element of an oriented set.
pub const RREL_LAST: &str = "rrel_last";

/// Relation linking a membership arc to the membership arc that follows it.
pub const NREL_BASIC_SEQUENCE: &str = "nrel_basic_sequence";

/// Smallest positional role index.
pub const MIN_ROLE_INDEX: usize = 1;

/// Largest positional role index.
pub const MAX_ROLE_INDEX: usize = 10;

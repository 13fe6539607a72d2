//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad args, missing option)           |
//! | 3    | Invalid engine config                            |
//! | 4    | Schema error (required column missing)           |
//! | 5    | Runtime error (IO, malformed CSV, bad numbers)   |
//! | 6    | No matches (reconciliation produced zero rows)   |

//! Codes 1 and 2 are owned by the process conventions: 1 is the
//! unspecified-failure fallback, 2 is what clap itself exits with on bad
//! arguments. Only the codes this crate raises get constants.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Engine config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// An input extract is missing a required column.
pub const EXIT_SCHEMA: u8 = 4;

/// Runtime failure: unreadable file, malformed CSV, unparseable number.
pub const EXIT_RUNTIME: u8 = 5;

/// Inner join produced zero rows. Not a failure of the engine — a
/// distinct code so scripts can tell "nothing matched" from success.
pub const EXIT_NO_MATCHES: u8 = 6;

//! CLI Exit Code Registry
//!
//! Single source of truth for `subtrans` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad arguments)                      |
//! | 3    | IO error (missing file, unreadable directory)    |
//! | 4    | XML error (malformed or unrecognized document)   |
//! | 5    | Invalid matching config                          |
//! | 6    | Untranslated entries remain (`update --strict`)  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with the next free value
//! 2. Document what triggers it
//! 3. Update the table above

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid weights on the command line.
pub const EXIT_USAGE: u8 = 2;

/// File or directory could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Resource or translation file is not well-formed, or lacks required elements.
pub const EXIT_XML: u8 = 4;

/// `match.toml` failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// `update --strict` produced entries still marked TODO.
pub const EXIT_UPDATE_UNTRANSLATED: u8 = 6;

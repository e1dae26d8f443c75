use ibc_primitives::prelude::*;

use crate::error::IdentifierError as Error;

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Checks that the identifier only contains ASCII alphanumerics or one of the
/// special characters `._+-#[]<>`. The path separator `/` is never allowed.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Checks that the identifier length lies in `[min, max]`. Empty identifiers
/// are always rejected.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = id.len() as u64;
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// A client type must leave room for the `-{counter}` suffix inside the
/// client identifier bounds.
pub fn validate_client_type(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    // `{type}-0` is the shortest and `{type}-{u64::MAX}` the longest client id
    validate_identifier_length(id, 9 - 2, 64 - 21)
}

/// A valid client identifier must be between 9-64 characters.
pub fn validate_client_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 9, 64)
}

/// A valid connection identifier must be between 10-64 characters.
pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 10, 64)
}

/// A valid port identifier must be between 2-128 characters.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

/// A valid channel identifier must be between 8-64 characters.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)
}

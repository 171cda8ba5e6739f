use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Deserialize a string with surrounding whitespace removed, so length rules
/// apply to the value that is stored.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Rejects values that are empty once surrounding whitespace is removed.
///
/// `length(min = 1)` alone accepts `"   "`, which would persist a name
/// nobody can see in a listing.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

//! Validation of identifiers that must survive a mapping-file round trip.
//!
//! The mapping format has no escaping, so the following are enforced before
//! anything reaches a store:
//! - Image locations must be non-empty and contain no whitespace (the first
//!   space ends the image token).
//! - Image locations must not start with `>` (that marks an item line).
//! - Category names and spoken text must be non-empty, single-line, and
//!   carry no leading or trailing whitespace.

use crate::error::{BoardError, Result};

/// Validate an image location, returning `Ok(())` if it can be written to
/// and read back from a mapping file unchanged.
///
/// # Examples
///
/// ```
/// use aac_board::names::validate_image_loc;
///
/// assert!(validate_image_loc("img/food/plate.png").is_ok());
/// assert!(validate_image_loc("").is_err());
/// assert!(validate_image_loc("img/my plate.png").is_err());
/// assert!(validate_image_loc(">img/plate.png").is_err());
/// ```
pub fn validate_image_loc(image: &str) -> Result<()> {
    if image.is_empty() {
        return Err(invalid(image, "image location must not be empty"));
    }
    if let Some(ch) = image.chars().find(|c| c.is_whitespace()) {
        return Err(invalid(
            image,
            &format!("image location contains whitespace: {ch:?}"),
        ));
    }
    if image.starts_with('>') {
        return Err(invalid(image, "image location must not start with '>'"));
    }
    Ok(())
}

/// Validate a category name.
pub fn validate_category_name(name: &str) -> Result<()> {
    validate_label(name, "category name")
}

/// Validate the spoken text bound to an image.
pub fn validate_text(text: &str) -> Result<()> {
    validate_label(text, "text")
}

fn validate_label(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(value, &format!("{what} must not be empty")));
    }
    if value.contains(['\n', '\r']) {
        return Err(invalid(value, &format!("{what} must be a single line")));
    }
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return Err(invalid(
            value,
            &format!("{what} must not start or end with whitespace"),
        ));
    }
    Ok(())
}

fn invalid(value: &str, reason: &str) -> BoardError {
    BoardError::InvalidName {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::shared::slug::slugify;

/// Maximum length (in characters) of a resource display name
pub const NAME_MAX_CHARS: usize = 255;

/// Minimum length (in characters) of a resource display name
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum length of a derived slug, matching the `slug` column width
pub const SLUG_MAX_CHARS: usize = 255;

lazy_static! {
    /// Regex for slugs produced by `slugify`
    /// Must be lowercase alphanumeric with single hyphens
    /// - Valid: "tech-news", "top-10", "a"
    /// - Invalid: "-news", "news-", "tech--news", "Tech", "tech_news"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for SQL identifiers interpolated into queries (table and column names)
    pub static ref SQL_IDENTIFIER_REGEX: Regex = Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap();
}

/// Read a JSON `null` as an empty string, so it fails the `required` rule
/// like a missing field instead of rejecting the whole body
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validate a resource display name.
///
/// Each failing rule produces its own reason so clients can show it verbatim.
pub fn validate_resource_name(name: &str) -> Result<(), ValidationError> {
    let chars = name.chars().count();

    if chars == 0 {
        return Err(ValidationError::new("required").with_message("The name field is required".into()));
    }

    if chars < NAME_MIN_CHARS {
        return Err(ValidationError::new("min").with_message(
            format!("The name must be at least {} characters", NAME_MIN_CHARS).into(),
        ));
    }

    if chars > NAME_MAX_CHARS {
        return Err(ValidationError::new("max").with_message(
            format!("The name may not be greater than {} characters", NAME_MAX_CHARS).into(),
        ));
    }

    // "&" and transliterated scripts can make the slug longer than the name
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ValidationError::new("slug")
            .with_message("The name must contain at least one letter or digit".into()));
    }

    if slug.len() > SLUG_MAX_CHARS {
        return Err(ValidationError::new("slug_length").with_message(
            format!(
                "The name produces a slug longer than {} characters",
                SLUG_MAX_CHARS
            )
            .into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("tech-news"));
        assert!(SLUG_REGEX.is_match("top-10"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-news")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("news-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("tech--news")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Tech")); // uppercase
        assert!(!SLUG_REGEX.is_match("tech_news")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_sql_identifier_regex() {
        assert!(SQL_IDENTIFIER_REGEX.is_match("categories"));
        assert!(SQL_IDENTIFIER_REGEX.is_match("deleted_at"));
        assert!(!SQL_IDENTIFIER_REGEX.is_match("name; DROP TABLE categories"));
        assert!(!SQL_IDENTIFIER_REGEX.is_match("1name"));
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_resource_name("").unwrap_err().code, "required");
        assert_eq!(validate_resource_name("a").unwrap_err().code, "min");
        assert_eq!(
            validate_resource_name(&"x".repeat(NAME_MAX_CHARS + 1))
                .unwrap_err()
                .code,
            "max"
        );
        assert_eq!(validate_resource_name("!!").unwrap_err().code, "slug");
        assert!(validate_resource_name("Go").is_ok());
    }

    #[test]
    fn test_name_whose_slug_outgrows_the_column_is_rejected() {
        // 255 characters, but every "&" expands to "-and-"
        let ampersands = "a&".repeat(127) + "a";
        assert_eq!(ampersands.chars().count(), NAME_MAX_CHARS);
        assert_eq!(
            validate_resource_name(&ampersands).unwrap_err().code,
            "slug_length"
        );

        let cjk = "中".repeat(NAME_MAX_CHARS);
        assert_eq!(validate_resource_name(&cjk).unwrap_err().code, "slug_length");
    }

    #[test]
    fn test_longest_plain_name_fits() {
        let name = "x".repeat(NAME_MAX_CHARS);
        assert!(validate_resource_name(&name).is_ok());
        assert_eq!(slugify(&name).len(), SLUG_MAX_CHARS);
    }

    #[test]
    fn test_name_length_counts_characters() {
        // two characters, four bytes
        assert!(validate_resource_name("éé").is_ok());
    }
}

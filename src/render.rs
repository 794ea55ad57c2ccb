use regex::{Captures, Regex};

use crate::settings::Settings;

lazy_static::lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(
        r"(?x)
        \{\{
            \s*
            ( [A-Za-z0-9_-]+ (?: \.[A-Za-z0-9_-]+ )? )   # name or record.field
            \s*
        \}\}"
    ).expect("a valid regex pattern");
}

/// Replaces every `{{name}}` / `{{record.field}}` token with its value from `settings`.
///
/// Tokens that do not resolve to a scalar are left exactly as written.
pub fn render(text: &str, settings: &Settings) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures| {
            settings
                .lookup(&caps[1])
                .and_then(|value| value.as_scalar())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

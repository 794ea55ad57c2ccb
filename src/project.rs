use miette::Diagnostic;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("invalid project name: '{name}'")]
    #[diagnostic(
        code(create_litpress::project::invalid_name),
        help("Project name may only include letters, numbers, underscores and hyphens.")
    )]
    InvalidName { name: String },

    #[error("unknown project choice: '{choice}'")]
    #[diagnostic(
        code(create_litpress::project::unknown_kind),
        help("Available projects: ausar")
    )]
    UnknownKind { choice: String },
}

/// A validated project directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);
impl ProjectName {
    pub fn parse(name: &str) -> Result<Self, ProjectError> {
        lazy_static::lazy_static! {
            static ref PROJECT_NAME_REGEX: regex::Regex =
                regex::Regex::new(r"^[A-Za-z0-9_-]+$").expect("a valid regex pattern");
        }

        if PROJECT_NAME_REGEX.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ProjectError::InvalidName {
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of project that can be generated.
///
/// Deserializes from a slug (`ausar`) or a full prompt label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectKind {
    Ausar,
}
impl ProjectKind {
    pub const ALL: [ProjectKind; 1] = [ProjectKind::Ausar];

    /// Label shown in the project selection prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ausar => "Ausar: A PWA inside a WordPress theme.",
        }
    }

    /// Lowercased text before the first `:` of the label.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Ausar => "ausar",
        }
    }

    /// Parses either a prompt label or a bare slug.
    pub fn from_choice(choice: &str) -> Result<Self, ProjectError> {
        let slug = choice.split(':').next().unwrap_or_default().trim().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| ProjectError::UnknownKind {
                choice: choice.to_string(),
            })
    }

    /// Whether this kind lives inside a WordPress installation.
    pub fn uses_wordpress(&self) -> bool {
        match self {
            Self::Ausar => true,
        }
    }

    pub fn theme_repository(&self) -> String {
        format!("https://github.com/hasanirogers/litpress-{}.git", self.slug())
    }
}
impl TryFrom<String> for ProjectKind {
    type Error = ProjectError;

    fn try_from(choice: String) -> Result<Self, Self::Error> {
        Self::from_choice(&choice)
    }
}
impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_underscores_and_hyphens() {
        for name in ["demo", "my-site_2", "A", "___", "-"] {
            assert!(ProjectName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["", "my site", "../evil", "a/b", "café", "demo!"] {
            assert!(ProjectName::parse(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn kind_from_label_and_slug() {
        assert_eq!(
            ProjectKind::from_choice(ProjectKind::Ausar.label()).unwrap(),
            ProjectKind::Ausar
        );
        assert_eq!(ProjectKind::from_choice("AUSAR").unwrap(), ProjectKind::Ausar);
        assert!(ProjectKind::from_choice("auset").is_err());
    }

    #[test]
    fn theme_repository_is_derived_from_slug() {
        assert_eq!(
            ProjectKind::Ausar.theme_repository(),
            "https://github.com/hasanirogers/litpress-ausar.git"
        );
    }
}

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    errors::{load_toml, LoadError},
    project::ProjectKind,
    settings::Value,
};

#[derive(Debug, Error, Diagnostic)]
pub enum AnswersError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error("answers file '{path}' installs WordPress but has no database credentials")]
    #[diagnostic(
        code(create_litpress::answers::missing_database),
        help("Add a [local-wordpress-db] table with name, host, user and password")
    )]
    MissingDatabase { path: PathBuf },
}

/// Credentials written into `wp-config.php`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseCredentials {
    pub name: String,
    pub host: String,
    pub user: String,
    pub password: String,
}

/// Everything the user is asked before a project is generated.
///
/// Can be collected interactively (see [`crate::prompt`]) or loaded from a toml file:
///
/// ```toml
/// project = "ausar"
/// local-wordpress-url = "http://localhost/demo"
/// install-wordpress = true
///
/// [local-wordpress-db]
/// name = "demo"
/// host = "127.0.0.1"
/// user = "root"
/// password = "secret"
///
/// [extra]
/// author = "Jane"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Answers {
    pub project: ProjectKind,
    #[serde(default)]
    pub local_wordpress_url: String,
    #[serde(default)]
    pub install_wordpress: bool,
    #[serde(rename = "local-wordpress-db")]
    pub database: Option<DatabaseCredentials>,
    /// Additional placeholders for custom templates.
    #[serde(default)]
    pub extra: IndexMap<String, Value>,
}
impl Answers {
    pub fn from_file(path: &Path) -> Result<Self, AnswersError> {
        let answers: Answers = load_toml(path)?;

        if answers.install_wordpress && answers.database.is_none() {
            return Err(AnswersError::MissingDatabase {
                path: path.to_path_buf(),
            });
        }

        log::debug!("loaded answers from {}", path.display());

        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_answers(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_full_answers_file() {
        let (_dir, path) = write_answers(
            r#"
project = "ausar"
local-wordpress-url = "http://localhost/demo"
install-wordpress = true

[local-wordpress-db]
name = "demo"
host = "127.0.0.1"
user = "root"
password = "secret"

[extra]
author = "Jane"
year = 2024
"#,
        );

        let answers = Answers::from_file(&path).unwrap();

        assert_eq!(answers.project, ProjectKind::Ausar);
        assert!(answers.install_wordpress);
        assert_eq!(answers.database.unwrap().host, "127.0.0.1");
        assert_eq!(answers.extra.get("author"), Some(&Value::from("Jane")));
        assert_eq!(answers.extra.get("year"), Some(&Value::from(2024_i64)));
    }

    #[test]
    fn database_is_optional_without_install() {
        let (_dir, path) = write_answers("project = \"ausar\"\n");

        let answers = Answers::from_file(&path).unwrap();

        assert!(!answers.install_wordpress);
        assert!(answers.database.is_none());
        assert!(answers.extra.is_empty());
    }

    #[test]
    fn install_without_database_is_rejected() {
        let (_dir, path) = write_answers("project = \"ausar\"\ninstall-wordpress = true\n");

        let error = Answers::from_file(&path).unwrap_err();

        assert!(matches!(error, AnswersError::MissingDatabase { .. }));
    }

    #[test]
    fn project_accepts_the_prompt_label() {
        let (_dir, path) = write_answers("project = \"Ausar: A PWA inside a WordPress theme.\"\n");

        let answers = Answers::from_file(&path).unwrap();

        assert_eq!(answers.project, ProjectKind::Ausar);
    }

    #[test]
    fn unknown_project_is_a_parse_error() {
        let (_dir, path) = write_answers("project = \"auset\"\n");

        let error = Answers::from_file(&path).unwrap_err();

        assert!(matches!(error, AnswersError::Load(LoadError::Parse(_))));
    }
}

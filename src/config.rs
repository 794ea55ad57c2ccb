use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::errors::{load_toml, LoadError};

/// Name of the optional per-template config file. It is never copied into the project.
pub const TEMPLATE_CONFIG_FILE: &str = "scaffold.toml";

/// A file that is only written when `flag` is affirmative in the settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Guard {
    pub file: String,
    pub flag: String,
}

/// Filename rules applied while materializing a template.
///
/// Rules match bare file names at any depth. A guard applies when it names either the
/// source file or the name a rename rule gives it, so renaming cannot bypass a guard.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    /// source file name -> destination file name
    pub rename: IndexMap<String, String>,
    pub guards: Vec<Guard>,
}
impl Default for Rules {
    fn default() -> Self {
        Self {
            rename: IndexMap::from([(".npmignore".to_string(), ".gitignore".to_string())]),
            guards: vec![Guard {
                file: "wp-config.php".to_string(),
                flag: "installWordpress".to_string(),
            }],
        }
    }
}
impl Rules {
    /// Rules that copy every file under its own name.
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            rename: IndexMap::new(),
            guards: Vec::new(),
        }
    }

    /// Destination name for `file_name`, when a rename rule matches it.
    pub fn rename_for(&self, file_name: &str) -> Option<&str> {
        self.rename.get(file_name).map(String::as_str)
    }

    /// The guard flag protecting `file_name`, if any.
    pub fn guard_for(&self, file_name: &str) -> Option<&str> {
        self.guards
            .iter()
            .find(|guard| guard.file == file_name)
            .map(|guard| guard.flag.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstallCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}
impl Default for InstallCommand {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["install".to_string()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawTemplateConfig {
    rename: Option<IndexMap<String, String>>,
    #[serde(rename = "guard")]
    guards: Option<Vec<Guard>>,
    install: Option<InstallCommand>,
}

/// Per-template settings read from [`TEMPLATE_CONFIG_FILE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateConfig {
    pub rules: Rules,
    pub install: InstallCommand,
}
impl TemplateConfig {
    /// Loads the config of the template rooted at `template_dir`.
    ///
    /// Sections missing from the file (or a missing file) keep their defaults.
    pub fn load(template_dir: &Path) -> Result<Self, LoadError> {
        let path = template_dir.join(TEMPLATE_CONFIG_FILE);

        if !path.is_file() {
            log::debug!("no {} in {}, using defaults", TEMPLATE_CONFIG_FILE, template_dir.display());
            return Ok(Self::default());
        }

        let raw: RawTemplateConfig = load_toml(&path)?;
        let defaults = Rules::default();

        Ok(Self {
            rules: Rules {
                rename: raw.rename.unwrap_or(defaults.rename),
                guards: raw.guards.unwrap_or(defaults.guards),
            },
            install: raw.install.unwrap_or_default(),
        })
    }
}

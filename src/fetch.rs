use crate::errors::{create_dir, FileOperation, IoError};
use git2::{build::RepoBuilder, FetchOptions};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

pub const WORDPRESS_REPOSITORY: &str = "https://github.com/WordPress/WordPress.git";

#[derive(Error, Debug, Diagnostic)]
pub enum FetchError {
    #[error("I/O error while fetching repository")]
    #[diagnostic(code(create_litpress::fetch::io))]
    Io(#[from] IoError),

    #[error("unable to clone repo at: '{url}': {source}")]
    #[diagnostic(
        code(create_litpress::fetch::git_clone),
        help("Check the repository reference and your network connection")
    )]
    GitClone {
        url: String,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(create_litpress::fetch::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        #[source]
        source: std::path::StripPrefixError,
    },
}

/// Expands `gh:owner/repo` and `gl:owner/repo` shorthands. Anything else is used as given.
pub fn expand_git_short_url(url: &str) -> String {
    if let Some(stripped) = url.strip_prefix("gh:") {
        format!("https://github.com/{}.git", stripped)
    } else if let Some(stripped) = url.strip_prefix("gl:") {
        format!("https://gitlab.com/{}.git", stripped)
    } else {
        url.to_string()
    }
}

/// Shallow-clones `reference` into `directory`, which must be empty or missing.
pub fn clone_into(reference: &str, directory: &Path) -> Result<(), FetchError> {
    let url = expand_git_short_url(reference);

    log::debug!("cloning {} into {}", url, directory.display());

    let mut fetch_options = FetchOptions::new();
    // local paths go through the local transport, which rejects shallow fetches
    if url.contains("://") {
        fetch_options.depth(1);
    }

    RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(&url, directory)
        .map_err(|error| FetchError::GitClone {
            url: url.clone(),
            path: directory.to_path_buf(),
            source: error,
        })?;

    Ok(())
}

/// Removes each of `paths` (relative to `root`) that exists.
pub fn strip(root: &Path, paths: &[&str]) -> Result<(), FetchError> {
    for relative in paths {
        let path = root.join(relative);

        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else if path.exists() {
            fs::remove_file(&path)
        } else {
            continue;
        };

        result.map_err(|error| IoError::new(FileOperation::Remove, path.clone(), error))?;
    }

    Ok(())
}

/// Copies the tree at `from` over `to`, overwriting files that already exist.
pub fn overlay(from: &Path, to: &Path) -> Result<(), FetchError> {
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(from).to_path_buf();

                Err(IoError::new(FileOperation::Read, path, error.into()))?
            }
        };

        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|error| FetchError::StripPrefix {
                path: entry.path().to_path_buf(),
                dir: from.to_path_buf(),
                source: error,
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }
            fs::copy(entry.path(), &target)
                .map_err(|error| IoError::new(FileOperation::Copy, target.clone(), error))?;
        }
    }

    Ok(())
}

/// Clones `reference` into `staging`, drops `excluded` paths and overlays the rest onto
/// `destination`.
pub fn fetch_and_overlay(
    reference: &str,
    staging: &Path,
    excluded: &[&str],
    destination: &Path,
) -> Result<(), FetchError> {
    clone_into(reference, staging)?;

    strip(staging, excluded)?;

    overlay(staging, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};

    fn init_repo(dir: &Path, files: &[(&str, &str)]) {
        let repo = Repository::init(dir).unwrap();
        for (path, contents) in files {
            let path = dir.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }

        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "init", &tree, &[])
            .unwrap();
    }

    #[test]
    fn expands_short_urls() {
        assert_eq!(
            expand_git_short_url("gh:hasanirogers/litpress-ausar"),
            "https://github.com/hasanirogers/litpress-ausar.git"
        );
        assert_eq!(
            expand_git_short_url("gl:someone/theme"),
            "https://gitlab.com/someone/theme.git"
        );
        assert_eq!(expand_git_short_url("/tmp/theme"), "/tmp/theme");
    }

    #[test]
    fn strip_removes_existing_paths_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        fs::write(dir.path().join(".gitignore"), "x").unwrap();
        fs::write(dir.path().join("style.css"), "x").unwrap();

        strip(dir.path(), &[".git", ".gitignore", "missing"]).unwrap();

        assert!(!dir.path().join(".git").exists());
        assert!(!dir.path().join(".gitignore").exists());
        assert!(dir.path().join("style.css").exists());
    }

    #[test]
    fn overlay_overwrites_and_keeps_other_files() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        fs::create_dir_all(from.path().join("wp-content/plugins")).unwrap();
        fs::write(from.path().join("wp-content/plugins/hello.php"), "new").unwrap();
        fs::write(from.path().join("index.php"), "new").unwrap();
        fs::write(to.path().join("index.php"), "old").unwrap();
        fs::write(to.path().join("keep.txt"), "keep").unwrap();

        overlay(from.path(), to.path()).unwrap();

        assert_eq!(fs::read_to_string(to.path().join("index.php")).unwrap(), "new");
        assert_eq!(fs::read_to_string(to.path().join("keep.txt")).unwrap(), "keep");
        assert!(to.path().join("wp-content/plugins/hello.php").is_file());
    }

    #[test]
    fn fetches_local_repository_without_version_control() {
        let origin = tempfile::tempdir().unwrap();
        init_repo(
            origin.path(),
            &[("style.css", "/* theme */"), (".gitignore", "node_modules")],
        );
        let staging = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();

        fetch_and_overlay(
            origin.path().to_str().unwrap(),
            &staging.path().join("theme-files"),
            &[".git", ".gitignore"],
            destination.path(),
        )
        .unwrap();

        assert!(destination.path().join("style.css").is_file());
        assert!(!destination.path().join(".git").exists());
        assert!(!destination.path().join(".gitignore").exists());
    }

    #[test]
    fn clone_failure_is_reported() {
        let missing = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();

        let error = clone_into(
            missing.path().join("nope").to_str().unwrap(),
            &target.path().join("clone"),
        )
        .unwrap_err();

        assert!(matches!(error, FetchError::GitClone { .. }));
    }
}

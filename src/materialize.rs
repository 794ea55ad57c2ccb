use colored::Colorize;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::{
    config::{Rules, TEMPLATE_CONFIG_FILE},
    errors::{create_dir, read_text, write_text, FileOperation, IoError},
    render::render,
    settings::Settings,
    vfs::{VirtualEntry, VirtualFS},
};

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("I/O error while materializing template")]
    #[diagnostic(code(create_litpress::materialize::io))]
    Io(#[from] IoError),

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(create_litpress::materialize::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        #[source]
        source: std::path::StripPrefixError,
    },
}

/// Walks `source_directory`, renders every file against `settings` and applies the filename
/// `rules`, returning the entries to create relative to the destination root.
///
/// Nothing is written. The first unreadable entry aborts the walk.
pub fn plan(
    source_directory: &Path,
    settings: &Settings,
    rules: &Rules,
) -> Result<VirtualFS, MaterializeError> {
    let mut vfs = VirtualFS::new();

    // links are followed like regular entries; a link cycle surfaces as a walk error
    for entry in WalkDir::new(source_directory).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(source_directory).to_path_buf();

                Err(IoError::new(FileOperation::Read, path, error.into()))?
            }
        };

        let full_path = entry.path();
        let relative = full_path
            .strip_prefix(source_directory)
            .map_err(|error| MaterializeError::StripPrefix {
                path: full_path.to_path_buf(),
                dir: source_directory.to_path_buf(),
                source: error,
            })?;

        if entry.file_type().is_dir() {
            vfs.push(VirtualEntry::Directory(relative.to_path_buf()));
            continue;
        }

        // non-UTF-8 names match no rule and are copied under their own name
        let file_name = entry.file_name().to_str();

        // skip template config file
        if entry.depth() == 1 && file_name == Some(TEMPLATE_CONFIG_FILE) {
            continue;
        }

        let renamed = file_name.and_then(|name| rules.rename_for(name));

        let guard = file_name
            .and_then(|name| rules.guard_for(name))
            .or_else(|| renamed.and_then(|name| rules.guard_for(name)));

        if let Some(flag) = guard {
            if !settings.is_affirmative(flag) {
                log::debug!("skipping {} ({} is not set)", relative.display(), flag);
                continue;
            }
        }

        let contents = read_text(full_path)?;

        let destination = match renamed {
            Some(name) => relative.with_file_name(name),
            None => relative.to_path_buf(),
        };

        vfs.push(VirtualEntry::File {
            destination,
            content: render(&contents, settings),
        });
    }

    Ok(vfs)
}

/// Creates the planned directories and files under `destination_root`, in plan order.
///
/// Existing files are overwritten. Nothing is cleaned up if a write fails.
pub fn apply(vfs: &VirtualFS, destination_root: &Path) -> Result<(), MaterializeError> {
    for entry in &vfs.entries {
        let final_path = destination_root.join(entry.destination());

        match entry {
            VirtualEntry::Directory(_) => create_dir(&final_path)?,
            VirtualEntry::File { content, .. } => {
                if let Some(parent) = final_path.parent() {
                    create_dir(parent)?;
                }

                write_text(&final_path, content)?;

                println!("{} {}", "create".green(), final_path.display());
            }
        }
    }

    Ok(())
}

/// Renders the template at `source_directory` into `destination_root`.
pub fn materialize(
    source_directory: &Path,
    destination_root: &Path,
    settings: &Settings,
    rules: &Rules,
) -> Result<VirtualFS, MaterializeError> {
    log::debug!(
        "materializing {} into {}",
        source_directory.display(),
        destination_root.display()
    );

    let vfs = plan(source_directory, settings, rules)?;

    apply(&vfs, destination_root)?;

    Ok(vfs)
}

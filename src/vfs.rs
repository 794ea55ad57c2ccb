use std::path::{Path, PathBuf};

/// One planned directory or file, relative to the destination root.
#[derive(Debug, Clone, PartialEq)]
pub enum VirtualEntry {
    Directory(PathBuf),
    File { destination: PathBuf, content: String },
}
impl VirtualEntry {
    pub fn destination(&self) -> &Path {
        match self {
            Self::Directory(destination) => destination,
            Self::File { destination, .. } => destination,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// The ordered set of entries a template renders to, staged before anything touches disk.
///
/// Entries are kept in walk order, so every directory precedes its contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualFS {
    pub entries: Vec<VirtualEntry>,
}
impl VirtualFS {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: VirtualEntry) {
        self.entries.push(entry);
    }

    #[cfg(test)]
    pub fn files(&self) -> impl Iterator<Item = &VirtualEntry> {
        self.entries.iter().filter(|entry| entry.is_file())
    }

    #[cfg(test)]
    pub fn content_of(&self, destination: &Path) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            VirtualEntry::File {
                destination: path,
                content,
            } if path == destination => Some(content.as_str()),
            _ => None,
        })
    }
}

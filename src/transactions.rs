use std::{fs, marker::PhantomData, path::PathBuf};

/// Active Transaction
pub struct Active;
/// Committed Transaction
pub struct Committed;
/// A trait that tells us if rollback should occur when dropped.
pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}
/// Tracks directories created by a scaffold run so a failed run leaves nothing behind.
///
/// An `Active` transaction removes every tracked directory when dropped. Calling
/// [`Transaction::commit`] forgets them and returns a `Committed` transaction, which does
/// nothing on drop.
///
/// # Example
///
/// ```rust
/// use create_litpress::transactions::{Active, Transaction};
///
/// let root = tempfile::tempdir().unwrap();
/// let project = root.path().join("demo");
/// std::fs::create_dir(&project).unwrap();
///
/// let mut trx = Transaction::<Active>::new();
/// trx.track_dir(project.clone());
/// drop(trx);
///
/// assert!(!project.exists());
/// ```
pub struct Transaction<State: TransactionState> {
    created_dirs: Vec<PathBuf>,
    state: PhantomData<State>,
}
impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            created_dirs: vec![],
            state: PhantomData,
        }
    }
    /// Registers a directory this run created. It is removed, with its contents, on rollback.
    pub fn track_dir(&mut self, path: PathBuf) {
        self.created_dirs.push(path);
    }
    /// Finalizes the transaction, preventing any rollback from occurring.
    pub fn commit(mut self) -> Transaction<Committed> {
        self.created_dirs.clear();

        Transaction {
            created_dirs: vec![],
            state: PhantomData,
        }
    }
}
impl Default for Transaction<Active> {
    fn default() -> Self {
        Self::new()
    }
}
impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.created_dirs.is_empty() {
            log::warn!("rolling back partially created project");
            while let Some(path) = self.created_dirs.pop() {
                log::debug!("removing dir: {}", path.display());
                if let Err(error) = fs::remove_dir_all(&path) {
                    log::warn!("unable to remove {}: {}", path.display(), error);
                }
            }
        } else if !S::SHOULD_ROLLBACK {
            log::debug!("committing transaction");
        }
    }
}

//! JSON file credential store.
//!
//! The file holds a flat JSON object; the token lives under [`TOKEN_KEY`]
//! and any other keys are preserved across writes. Filesystem access goes
//! through `cap_std`, scoped to the file's parent directory, and writes are
//! staged in a sibling file then renamed into place.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cap_std::{ambient_authority, fs::Dir};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::SessionToken;
use crate::domain::ports::{CredentialStore, CredentialStoreError, TOKEN_KEY};

type Entries = Map<String, Value>;

/// Credential store persisted to a JSON file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    parent: PathBuf,
    file_name: OsString,
    guard: Mutex<()>,
}

impl FileCredentialStore {
    /// Store backed by the file at `path`; the file need not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Unavailable`] when `path` has no
    /// file name component.
    pub fn new(location: impl Into<PathBuf>) -> Result<Self, CredentialStoreError> {
        let path = location.into();
        let Some(file_name) = path.file_name().map(ToOwned::to_owned) else {
            return Err(CredentialStoreError::unavailable(format!(
                "{} does not name a file",
                path.display()
            )));
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            path,
            parent,
            file_name,
            guard: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_parent(&self) -> Result<Option<Dir>, CredentialStoreError> {
        match Dir::open_ambient_dir(&self.parent, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.unavailable(&error)),
        }
    }

    fn read_entries(&self, dir: &Dir) -> Result<Option<Entries>, CredentialStoreError> {
        let raw = match dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.unavailable(&error)),
        };
        if raw.trim().is_empty() {
            return Ok(Some(Entries::new()));
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(Some(entries)),
            Ok(_) => Err(CredentialStoreError::corrupt(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(error) => Err(CredentialStoreError::corrupt(format!(
                "{}: {error}",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, dir: &Dir, entries: &Entries) -> Result<(), CredentialStoreError> {
        let encoded = serde_json::to_vec_pretty(entries).map_err(|error| {
            CredentialStoreError::corrupt(format!("failed to encode credentials: {error}"))
        })?;
        let staged = format!(
            ".{}.tmp-{}",
            self.file_name.to_string_lossy(),
            Uuid::new_v4().simple()
        );
        dir.write(&staged, encoded)
            .map_err(|error| self.unavailable(&error))?;
        dir.rename(&staged, dir, &self.file_name).map_err(|error| {
            if let Err(cleanup) = dir.remove_file(&staged) {
                tracing::debug!(%cleanup, "failed to remove staged credential file");
            }
            self.unavailable(&error)
        })
    }

    fn unavailable(&self, error: &io::Error) -> CredentialStoreError {
        CredentialStoreError::unavailable(format!("{}: {error}", self.path.display()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<SessionToken>, CredentialStoreError> {
        let _guard = self.lock();
        let Some(dir) = self.open_parent()? else {
            return Ok(None);
        };
        let Some(entries) = self.read_entries(&dir)? else {
            return Ok(None);
        };
        match entries.get(TOKEN_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => Ok(SessionToken::new(raw.as_str()).ok()),
            Some(_) => Err(CredentialStoreError::corrupt(format!(
                "{} holds a non-string {TOKEN_KEY}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, token: &SessionToken) -> Result<(), CredentialStoreError> {
        let _guard = self.lock();
        Dir::create_ambient_dir_all(&self.parent, ambient_authority())
            .map_err(|error| self.unavailable(&error))?;
        let dir = Dir::open_ambient_dir(&self.parent, ambient_authority())
            .map_err(|error| self.unavailable(&error))?;
        let mut entries = self.read_entries(&dir)?.unwrap_or_default();
        entries.insert(TOKEN_KEY.to_owned(), Value::String(token.expose().to_owned()));
        self.write_entries(&dir, &entries)
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        let _guard = self.lock();
        let Some(dir) = self.open_parent()? else {
            return Ok(());
        };
        let Some(mut entries) = self.read_entries(&dir)? else {
            return Ok(());
        };
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&dir, &entries)
    }
}

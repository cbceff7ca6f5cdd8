use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::model::profile::{self, LanguageProfile};
use crate::model::record::{Record, RecordField};
use crate::services::encoding::TextEncoding;
use crate::services::store::RecordStore;
use crate::services::{clean, file_sync, filter};

/// What to do with unsaved edits before a destructive action.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnUnsaved {
    Save,
    Discard,
    #[default]
    Abort,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    pub count: usize,
    pub encoding: TextEncoding,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    pub written: usize,
    pub dropped: usize,
}

/// Editing state for the active language profile.
#[derive(Debug)]
pub struct EditorSession {
    base_dir: PathBuf,
    profile: &'static LanguageProfile,
    path: PathBuf,
    store: RecordStore,
    encoding: Option<TextEncoding>,
    closed: bool,
}

impl EditorSession {
    /// Creates a session with an empty store. Nothing is read until [`reload`](Self::reload).
    pub fn start(base_dir: PathBuf, profile: &'static LanguageProfile) -> Self {
        let path = file_sync::profile_path(&base_dir, profile);
        EditorSession {
            base_dir,
            profile,
            path,
            store: RecordStore::new(),
            encoding: None,
            closed: false,
        }
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Switches to another profile. Returns `None` when `code` is already active.
    ///
    /// Unsaved edits are resolved first according to `on_unsaved`. If that or the
    /// following load fails, the session stays on the previous profile.
    pub fn set_active_profile(
        &mut self,
        code: &str,
        on_unsaved: OnUnsaved,
    ) -> Result<Option<LoadReport>, SessionError> {
        let target =
            profile::find(code).ok_or_else(|| SessionError::UnknownProfile(code.to_string()))?;

        if target.code == self.profile.code {
            return Ok(None);
        }

        if let Err(e) = self.resolve_unsaved(on_unsaved) {
            log::warn!("not switching to {}: {e}", target.code);
            return Err(e);
        }

        let path = file_sync::profile_path(&self.base_dir, target);
        let loaded = file_sync::read_lines(&path).inspect_err(|e| log::error!("{e}"))?;

        self.profile = target;
        self.path = path;
        self.store = RecordStore::from_lines(loaded.lines);
        self.encoding = Some(loaded.encoding);

        Ok(Some(self.load_report()))
    }

    /// Re-reads the active file, dropping unsaved edits.
    pub fn reload(&mut self) -> Result<LoadReport, SessionError> {
        let loaded = file_sync::read_lines(&self.path).inspect_err(|e| log::error!("{e}"))?;

        self.store.load(loaded.lines);
        self.encoding = Some(loaded.encoding);

        let report = self.load_report();
        log::info!(
            "loaded {} records from {} ({})",
            report.count,
            self.path.display(),
            report.encoding.name()
        );
        Ok(report)
    }

    /// Cleans, writes, then resynchronizes the store with what was written.
    pub fn save(&mut self) -> Result<SaveReport, SessionError> {
        let (cleaned, dropped) = clean::clean_with_report(self.store.records());

        file_sync::write_records(&self.path, &cleaned).inspect_err(|e| log::error!("{e}"))?;

        let written = cleaned.len();
        self.store.replace_all(cleaned);

        log::info!(
            "saved {written} records to {} ({dropped} dropped)",
            self.path.display()
        );
        Ok(SaveReport {
            path: self.path.clone(),
            written,
            dropped,
        })
    }

    /// Records matching `query`, paired with their index in the store.
    pub fn visible_records(&self, query: &str) -> Vec<(usize, &Record)> {
        let records = self.store.records();
        filter::filter(records, query)
            .into_iter()
            .map(|i| (i, &records[i]))
            .collect()
    }

    pub fn add_blank_record(&mut self) -> usize {
        self.store.add_blank()
    }

    pub fn add_record(&mut self, key: &str, value: &str) -> usize {
        self.store.add(key, value)
    }

    pub fn remove_record(&mut self, index: usize) -> Result<Record, SessionError> {
        Ok(self.store.remove_at(index)?)
    }

    pub fn edit_record(
        &mut self,
        index: usize,
        field: RecordField,
        value: &str,
    ) -> Result<&Record, SessionError> {
        Ok(self.store.edit(index, field, value)?)
    }

    /// Returns whether the session may end. A dirty store with `Abort` keeps it open.
    pub fn close(&mut self, on_unsaved: OnUnsaved) -> Result<bool, SessionError> {
        match self.resolve_unsaved(on_unsaved) {
            Ok(()) => {
                self.closed = true;
                Ok(true)
            }
            Err(SessionError::UnsavedChanges) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn resolve_unsaved(&mut self, on_unsaved: OnUnsaved) -> Result<(), SessionError> {
        if !self.is_dirty() {
            return Ok(());
        }

        match on_unsaved {
            OnUnsaved::Abort => Err(SessionError::UnsavedChanges),
            OnUnsaved::Save => self.save().map(|_| ()),
            OnUnsaved::Discard => {
                log::debug!("discarding unsaved edits to {}", self.path.display());
                Ok(())
            }
        }
    }

    fn load_report(&self) -> LoadReport {
        LoadReport {
            path: self.path.clone(),
            count: self.store.len(),
            encoding: self.encoding.unwrap_or(TextEncoding::Utf8),
        }
    }
}

//! Record Store
//!
//! Single-type, single-file persistence engine.
//!
//! ## Responsibilities
//! - Persist one record type to one JSON Lines backing file
//! - Offer add / get_by_id / get_all / update / remove
//! - Keep the backing file durably consistent across mutations
//!
//! ## Storage Strategy: Append-and-Compact
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ {base_dir}/{TypeName}.{ext}                  │
//! │ ┌──────────────────────────────────────────┐ │
//! │ │ {"id":1,"name":"T-Shirt","price":19.99}  │ │  ← one JSON document
//! │ │ {"id":2,"name":"Mug","price":7.5}        │ │    per line, insertion
//! │ │ ...                                      │ │    order preserved
//! │ └──────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Inserts are cheap appends. Updates and removals stream the file through a
//! temp file created in the same directory, then atomically rename it over
//! the backing path. Readers never observe a half-written file: the rename is
//! the only moment the visible file changes.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::{Config, SyncPolicy};
use crate::error::{Result, StoreError};
use crate::identity::{Identity, IdentityResolver};

/// What to do with one line during a streaming rewrite
enum LineEdit {
    /// Pass the original line through byte-for-byte
    Keep,
    /// Substitute a freshly serialized record
    Replace(String),
    /// Omit the line entirely
    Drop,
}

/// A single-type, single-file record store
///
/// ## Concurrency Model: Single-Threaded, Synchronous
///
/// Each operation opens, reads/writes, and closes its files as one scoped
/// unit of work. No in-process or cross-process locking is provided: two
/// handles racing on the same file can interleave their
/// read-modify-write-rename sequences and lose updates. This is a known,
/// accepted limitation of the design, not something the store papers over.
pub struct Store<T> {
    /// Fixed backing file path, derived at construction
    path: PathBuf,

    /// When to fsync after writes
    sync_policy: SyncPolicy,

    /// Key extraction, bound once at construction
    resolver: IdentityResolver<T>,
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned + Identity + 'static,
{
    /// Open a store for `T` under the configured base directory
    ///
    /// The backing file name is derived from the record type's name. The
    /// base directory is created if absent; the backing file itself is
    /// created lazily on first [`add`](Store::add).
    pub fn open(config: Config) -> Result<Self> {
        Self::open_with(config, short_type_name::<T>(), IdentityResolver::of_identity())
    }

    /// Open with a base directory path (convenience method)
    ///
    /// Uses default config with the specified base directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().base_dir(path).build();
        Self::open(config)
    }
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a store with an explicit file name and key resolver
    ///
    /// For types that cannot implement [`Identity`], or when the backing
    /// file name should differ from the type name.
    ///
    /// Fails with [`StoreError::Config`] before touching the filesystem if
    /// `name` cannot be used as a file name.
    pub fn open_with(config: Config, name: &str, resolver: IdentityResolver<T>) -> Result<Self> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StoreError::Config(format!(
                "record type name {:?} cannot be used as a file name",
                name
            )));
        }

        fs::create_dir_all(&config.base_dir)
            .map_err(|e| StoreError::storage(&config.base_dir, e))?;

        let path = config
            .base_dir
            .join(format!("{}.{}", name, config.extension));

        Ok(Self {
            path,
            sync_policy: config.sync_policy,
            resolver,
        })
    }

    /// Append a record to the backing file
    ///
    /// Creates the file if absent. No validation beyond serializability: in
    /// particular, a record whose key already exists is appended as-is —
    /// key uniqueness is the caller's responsibility.
    pub fn add(&self, record: &T) -> Result<()> {
        let line = serialize_record(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::storage(&self.path, e))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| StoreError::storage(&self.path, e))?;

        if self.sync_policy == SyncPolicy::EveryWrite {
            file.sync_data()
                .map_err(|e| StoreError::storage(&self.path, e))?;
        }

        tracing::debug!(
            "Appended record {} to {}",
            self.resolver.key_of(record),
            self.path.display()
        );
        Ok(())
    }

    /// Get the first record whose key equals `id`
    ///
    /// Streams the backing file in order and returns the first match; under
    /// duplicate keys later occurrences are not considered. An absent file is
    /// an empty store, so absence of the key yields `Ok(None)`, never an
    /// error. A line that fails to deserialize is fatal
    /// [`StoreError::Corruption`].
    pub fn get_by_id(&self, id: i64) -> Result<Option<T>> {
        let reader = match self.open_reader()? {
            Some(reader) => reader,
            None => return Ok(None),
        };

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StoreError::storage(&self.path, e))?;
            let record: T = serde_json::from_str(&line)
                .map_err(|e| StoreError::corruption(&self.path, idx + 1, e))?;

            if self.resolver.key_of(&record) == id {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    /// Get all records in file order
    ///
    /// Absent file yields an empty vec. The result is a one-shot snapshot;
    /// call again to observe later mutations.
    pub fn get_all(&self) -> Result<Vec<T>> {
        let reader = match self.open_reader()? {
            Some(reader) => reader,
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StoreError::storage(&self.path, e))?;
            let record: T = serde_json::from_str(&line)
                .map_err(|e| StoreError::corruption(&self.path, idx + 1, e))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the first record whose key equals `id` with `record`
    ///
    /// Only the first occurrence in file order is replaced; duplicates
    /// further down pass through untouched ([`remove`](Store::remove)
    /// deliberately differs and affects all occurrences). If no record
    /// matches, the file is rewritten unchanged — a no-op, not an error.
    /// An absent file stays absent.
    pub fn update(&self, id: i64, record: &T) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("Update of {} on absent file {}", id, self.path.display());
            return Ok(());
        }

        let replacement = serialize_record(record)?;
        let mut replaced = false;

        self.rewrite(|existing, _line| {
            if !replaced && self.resolver.key_of(existing) == id {
                replaced = true;
                LineEdit::Replace(replacement.clone())
            } else {
                LineEdit::Keep
            }
        })?;

        tracing::debug!(
            "Updated record {} in {} (replaced={})",
            id,
            self.path.display(),
            replaced
        );
        Ok(())
    }

    /// Remove every record whose key equals `id`
    ///
    /// All occurrences are removed, not just the first — the one key-based
    /// operation that affects duplicates ([`update`](Store::update) replaces
    /// only the first match). Removing an absent key rewrites the file
    /// unchanged; an absent file stays absent.
    pub fn remove(&self, id: i64) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("Remove of {} on absent file {}", id, self.path.display());
            return Ok(());
        }

        let mut removed = 0usize;

        self.rewrite(|existing, _line| {
            if self.resolver.key_of(existing) == id {
                removed += 1;
                LineEdit::Drop
            } else {
                LineEdit::Keep
            }
        })?;

        tracing::debug!(
            "Removed {} record(s) with key {} from {}",
            removed,
            id,
            self.path.display()
        );
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Open the backing file for streaming, or `None` if it does not exist
    fn open_reader(&self) -> Result<Option<BufReader<File>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::storage(&self.path, e)),
        }
    }

    /// Stream the backing file through a same-directory temp file, applying
    /// `edit` to each line, then atomically rename the temp file over the
    /// backing path.
    ///
    /// The temp file must live in the same directory as the backing file for
    /// the rename to stay atomic across storage volumes. On any failure
    /// before the rename the temp file is deleted on drop and the backing
    /// file is left in its prior state.
    fn rewrite<F>(&self, mut edit: F) -> Result<()>
    where
        F: FnMut(&T, &str) -> LineEdit,
    {
        let file = File::open(&self.path)
            .map_err(|e| StoreError::storage(&self.path, e))?;
        let reader = BufReader::new(file);

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::storage(dir, e))?;
        let tmp_path = tmp.path().to_path_buf();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StoreError::storage(&self.path, e))?;
            let record: T = serde_json::from_str(&line)
                .map_err(|e| StoreError::corruption(&self.path, idx + 1, e))?;

            match edit(&record, &line) {
                LineEdit::Keep => writeln!(tmp, "{}", line),
                LineEdit::Replace(replacement) => writeln!(tmp, "{}", replacement),
                LineEdit::Drop => continue,
            }
            .map_err(|e| StoreError::storage(&tmp_path, e))?;
        }

        tmp.flush().map_err(|e| StoreError::storage(&tmp_path, e))?;

        if self.sync_policy == SyncPolicy::EveryWrite {
            tmp.as_file()
                .sync_data()
                .map_err(|e| StoreError::storage(&tmp_path, e))?;
        }

        // The only moment the visible file changes
        tmp.persist(&self.path)
            .map_err(|e| StoreError::storage(&self.path, e.error))?;

        Ok(())
    }
}

/// Serialize one record to its single-line JSON form
fn serialize_record<T: Serialize>(record: &T) -> Result<String> {
    serde_json::to_string(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Last path segment of a type's name, e.g. `my_app::Product` → `Product`
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

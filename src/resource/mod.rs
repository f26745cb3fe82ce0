//! Packaged resource loading.
//!
//! In production mode view sources come from resources packaged with the
//! application rather than from live directories. A [`ResourceLoader`] maps a
//! slash-separated resource path to a byte stream and must keep "nothing
//! there" (`Ok(None)`) apart from "something there but unreadable" (`Err`).
//!
//! Two loaders are provided:
//! - [`DirectoryLoader`] serves files beneath a resource root on disk
//! - [`MemoryLoader`] serves bytes compiled into the binary, typically with `include_str!`

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of packaged resources.
pub trait ResourceLoader: Send + Sync + fmt::Debug {
    /// Open the resource at `path`.
    ///
    /// Returns `Ok(None)` when no resource exists at that path.
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>>;

    /// Human-readable location of `path`, used in error messages.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Read a whole resource as UTF-8 text.
///
/// The reader is owned by this function and dropped on every return path,
/// including a failed or partial read.
///
/// # Errors
///
/// Returns an error if the resource exists but cannot be read, or if its
/// bytes are not valid UTF-8.
pub fn read_resource(loader: &dyn ResourceLoader, path: &str) -> io::Result<Option<String>> {
    let Some(mut reader) = loader.open(path)? else {
        return Ok(None);
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    drop(reader);

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Loader that serves resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    /// Serve resources beneath `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Serve resources relative to the process working directory.
    pub fn working_dir() -> Self {
        Self::new(".")
    }

    /// The resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ResourceLoader for DirectoryLoader {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        let full_path = self.full_path(path);
        if full_path.is_dir() {
            return Ok(None);
        }

        match File::open(&full_path) {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn describe(&self, path: &str) -> String {
        self.full_path(path).display().to_string()
    }
}

/// Loader that serves resources held in memory.
///
/// ```rust,no_run
/// use fragview::resource::MemoryLoader;
///
/// let loader = MemoryLoader::new()
///     .with_resource("web/module/fragments/patientHeader.tera", "Hello {{ name }}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, Arc<[u8]>>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style.
    pub fn with_resource(mut self, path: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, path: impl Into<String>, content: impl AsRef<[u8]>) {
        self.resources.insert(path.into(), Arc::from(content.as_ref()));
    }

    /// Whether a resource exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.resources.contains_key(path)
    }

    /// Number of resources held.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the loader holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLoader for MemoryLoader {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        Ok(self
            .resources
            .get(path)
            .map(|bytes| Box::new(Cursor::new(Arc::clone(bytes))) as Box<dyn Read + Send>))
    }

    fn describe(&self, path: &str) -> String {
        format!("memory:{}", path)
    }
}

//! Working-directory handles.
//!
//! A component gets two directories per scope: a cache directory whose
//! contents may be deleted at any time, and a data directory whose contents
//! persist between runs. Scopes nest: a [`Project`] contains [`App`]s, and an
//! app contains [`Component`]s.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A pair of cache and data directories.
pub trait Dir: fmt::Debug + Send + Sync {
    /// Directory for cached data that can be rebuilt.
    fn cache_dir(&self) -> &Path;

    /// Directory for data that must persist.
    fn data_dir(&self) -> &Path;
}

/// The simplest [`Dir`]: two fixed paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicDir {
    cache: PathBuf,
    data: PathBuf,
}

impl BasicDir {
    pub fn new(cache: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        Self {
            cache: cache.into(),
            data: data.into(),
        }
    }

    /// A child scope: both directories joined with the same relative path.
    fn scoped(dir: &dyn Dir, rel: &Path) -> Self {
        Self::new(dir.cache_dir().join(rel), dir.data_dir().join(rel))
    }
}

impl Dir for BasicDir {
    fn cache_dir(&self) -> &Path {
        &self.cache
    }

    fn data_dir(&self) -> &Path {
        &self.data
    }
}

macro_rules! scoped_dir {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            dir: Arc<dyn Dir>,
        }

        impl $name {
            pub fn new(dir: impl Dir + 'static) -> Self {
                Self { dir: Arc::new(dir) }
            }

            pub fn from_shared(dir: Arc<dyn Dir>) -> Self {
                Self { dir }
            }

            pub fn cache_dir(&self) -> &Path {
                self.dir.cache_dir()
            }

            pub fn data_dir(&self) -> &Path {
                self.dir.data_dir()
            }

            /// Create both directories (and their parents) on disk.
            pub fn create_all(&self) -> io::Result<()> {
                std::fs::create_dir_all(self.cache_dir())?;
                std::fs::create_dir_all(self.data_dir())
            }
        }

        impl Dir for $name {
            fn cache_dir(&self) -> &Path {
                self.dir.cache_dir()
            }

            fn data_dir(&self) -> &Path {
                self.dir.data_dir()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.cache_dir() == other.cache_dir() && self.data_dir() == other.data_dir()
            }
        }

        impl Eq for $name {}
    };
}

scoped_dir!(
    /// Directories scoped to a whole project.
    Project
);

scoped_dir!(
    /// Directories scoped to one application within a project.
    App
);

scoped_dir!(
    /// Directories scoped to one component of an application.
    Component
);

impl Project {
    /// The scope for the named app, under `app/<name>`.
    pub fn app(&self, name: &str) -> App {
        App::new(BasicDir::scoped(self, &Path::new("app").join(name)))
    }
}

impl App {
    /// The scope for a component of the given kind, under `component/<kind>/<name>`.
    pub fn component(&self, kind: &str, name: &str) -> Component {
        let rel = Path::new("component").join(kind).join(name);
        Component::new(BasicDir::scoped(self, &rel))
    }
}

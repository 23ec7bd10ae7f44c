//! # Standard mappers
//!
//! The conversions every plugin needs between wire arguments and the native
//! values plugin code works with. Each pair goes both ways: `source` turns
//! an [`ArgsSource`] into a [`Source`], `source_proto` turns it back.
//!
//! Most pairs are plain data copies. Two are not:
//!
//! - `logger` rebuilds a [`Logger`] from its name using the process-wide
//!   [`LogRoot`].
//! - `terminal_ui` and `terminal_ui_proto` move a live terminal across the
//!   boundary over a broker side-channel. See [`terminal`].
//!
//! ```no_run
//! # fn main() -> Result<(), protomap_core::RegistryError> {
//! let registry = protomap_mappers::standard_registry()?;
//! assert_eq!(registry.len(), 18);
//! # Ok(())
//! # }
//! ```
//!
//! [`ArgsSource`]: protomap_wire::ArgsSource
//! [`Source`]: protomap_component::Source
//! [`Logger`]: protomap_core::Logger
//! [`LogRoot`]: protomap_core::LogRoot

mod datadir;
mod labels;
mod logger;
mod metadata;
pub mod terminal;

use protomap_core::{ConversionEntry, Registry, RegistryError};

/// Every standard conversion, inverse pairs next to each other.
pub fn all() -> Vec<ConversionEntry> {
    vec![
        metadata::source(),
        metadata::source_proto(),
        metadata::job_info(),
        metadata::job_info_proto(),
        metadata::deployment_config(),
        metadata::deployment_config_proto(),
        datadir::project(),
        datadir::app(),
        datadir::component(),
        datadir::project_proto(),
        datadir::app_proto(),
        datadir::component_proto(),
        logger::logger(),
        logger::logger_proto(),
        terminal::terminal_ui(),
        terminal::terminal_ui_proto(),
        labels::label_set(),
        labels::label_set_proto(),
    ]
}

/// A registry holding [`all`] the standard conversions.
pub fn standard_registry() -> Result<Registry, RegistryError> {
    Registry::register(all())
}

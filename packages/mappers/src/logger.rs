//! Loggers travel by name.

use protomap_core::{ConversionEntry, LogRoot, Logger, TypeTag};
use protomap_wire::ArgsLogger;

/// Rebuild a logger from its name on this side's [`LogRoot`].
///
/// Every call already carries an ambient logger, and the resolver returns
/// that one when asked for [`TypeTag::Logger`]. This entry is used when a
/// logger arrives as an explicit argument and is converted directly.
pub fn logger() -> ConversionEntry {
    ConversionEntry::pure("logger", [TypeTag::ArgsLogger], TypeTag::Logger, |inputs| {
        let args: ArgsLogger = inputs.take()?;
        Ok(LogRoot::global().reset_named(&args.name).into())
    })
    .infallible()
}

pub fn logger_proto() -> ConversionEntry {
    ConversionEntry::pure("logger_proto", [TypeTag::Logger], TypeTag::ArgsLogger, |inputs| {
        let log: Logger = inputs.take()?;
        Ok(ArgsLogger {
            name: log.name().to_string(),
        }
        .into())
    })
    .infallible()
}

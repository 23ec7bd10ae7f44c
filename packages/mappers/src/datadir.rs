//! Working-directory handles.
//!
//! Only the two paths cross the boundary. The receiving side wraps them in a
//! fresh [`BasicDir`]; nothing is created on disk.

use std::path::Path;

use protomap_component::{App, BasicDir, Component, Project};
use protomap_core::{ConversionEntry, ConversionError, TypeTag};
use protomap_wire::{ArgsDataDirApp, ArgsDataDirComponent, ArgsDataDirProject};

fn path_string(path: &Path) -> Result<String, ConversionError> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| ConversionError::Invalid(format!("path is not UTF-8: {}", path.display())))
}

pub fn project() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_project",
        [TypeTag::ArgsDataDirProject],
        TypeTag::DataDirProject,
        |inputs| {
            let args: ArgsDataDirProject = inputs.take()?;
            Ok(Project::new(BasicDir::new(args.cache_dir, args.data_dir)).into())
        },
    )
    .infallible()
}

pub fn app() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_app",
        [TypeTag::ArgsDataDirApp],
        TypeTag::DataDirApp,
        |inputs| {
            let args: ArgsDataDirApp = inputs.take()?;
            Ok(App::new(BasicDir::new(args.cache_dir, args.data_dir)).into())
        },
    )
    .infallible()
}

pub fn component() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_component",
        [TypeTag::ArgsDataDirComponent],
        TypeTag::DataDirComponent,
        |inputs| {
            let args: ArgsDataDirComponent = inputs.take()?;
            Ok(Component::new(BasicDir::new(args.cache_dir, args.data_dir)).into())
        },
    )
    .infallible()
}

pub fn project_proto() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_project_proto",
        [TypeTag::DataDirProject],
        TypeTag::ArgsDataDirProject,
        |inputs| {
            let dir: Project = inputs.take()?;
            Ok(ArgsDataDirProject {
                cache_dir: path_string(dir.cache_dir())?,
                data_dir: path_string(dir.data_dir())?,
            }
            .into())
        },
    )
}

pub fn app_proto() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_app_proto",
        [TypeTag::DataDirApp],
        TypeTag::ArgsDataDirApp,
        |inputs| {
            let dir: App = inputs.take()?;
            Ok(ArgsDataDirApp {
                cache_dir: path_string(dir.cache_dir())?,
                data_dir: path_string(dir.data_dir())?,
            }
            .into())
        },
    )
}

pub fn component_proto() -> ConversionEntry {
    ConversionEntry::pure(
        "datadir_component_proto",
        [TypeTag::DataDirComponent],
        TypeTag::ArgsDataDirComponent,
        |inputs| {
            let dir: Component = inputs.take()?;
            Ok(ArgsDataDirComponent {
                cache_dir: path_string(dir.cache_dir())?,
                data_dir: path_string(dir.data_dir())?,
            }
            .into())
        },
    )
}

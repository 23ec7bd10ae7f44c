//! Plain metadata: copied field by field.

use protomap_component::{DeploymentConfig, JobInfo, Source};
use protomap_core::{ConversionEntry, Typed};
use protomap_wire::{transcode, ArgsDeploymentConfig, ArgsJobInfo, ArgsSource};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entry that copies `A` into `B` by field name.
fn copy<A, B>(name: &'static str) -> ConversionEntry
where
    A: Typed + Serialize + 'static,
    B: Typed + DeserializeOwned + 'static,
{
    ConversionEntry::pure(name, [A::TAG], B::TAG, |inputs| {
        let input: A = inputs.take()?;
        let output: B = transcode(&input)?;
        Ok(output.into())
    })
}

pub fn source() -> ConversionEntry {
    copy::<ArgsSource, Source>("source")
}

pub fn source_proto() -> ConversionEntry {
    copy::<Source, ArgsSource>("source_proto")
}

pub fn job_info() -> ConversionEntry {
    copy::<ArgsJobInfo, JobInfo>("job_info")
}

pub fn job_info_proto() -> ConversionEntry {
    copy::<JobInfo, ArgsJobInfo>("job_info_proto")
}

pub fn deployment_config() -> ConversionEntry {
    copy::<ArgsDeploymentConfig, DeploymentConfig>("deployment_config")
}

pub fn deployment_config_proto() -> ConversionEntry {
    copy::<DeploymentConfig, ArgsDeploymentConfig>("deployment_config_proto")
}

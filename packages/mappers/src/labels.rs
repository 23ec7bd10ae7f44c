use protomap_component::LabelSet;
use protomap_core::{ConversionEntry, TypeTag};
use protomap_wire::ArgsLabelSet;

pub fn label_set() -> ConversionEntry {
    ConversionEntry::pure("label_set", [TypeTag::ArgsLabelSet], TypeTag::LabelSet, |inputs| {
        let args: ArgsLabelSet = inputs.take()?;
        Ok(LabelSet {
            labels: args.labels,
        }
        .into())
    })
    .infallible()
}

pub fn label_set_proto() -> ConversionEntry {
    ConversionEntry::pure(
        "label_set_proto",
        [TypeTag::LabelSet],
        TypeTag::ArgsLabelSet,
        |inputs| {
            let labels: LabelSet = inputs.take()?;
            Ok(ArgsLabelSet {
                labels: labels.labels,
            }
            .into())
        },
    )
    .infallible()
}

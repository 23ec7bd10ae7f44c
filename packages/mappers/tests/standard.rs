use std::path::Path;
use std::sync::Arc;

use protomap_broker::MemoryBroker;
use protomap_component::{App, Component, DeploymentConfig, JobInfo, LabelSet, Project, Source};
use protomap_core::{
    Ambient, ArgumentBag, CallContext, CleanupScope, Inputs, Internal, LogRoot, Resolver,
    Signature, TypeTag, Value,
};
use protomap_mappers::{all, standard_registry};
use protomap_wire::{
    ArgsDataDirApp, ArgsDataDirComponent, ArgsDataDirProject, ArgsDeploymentConfig, ArgsJobInfo,
    ArgsLabelSet, ArgsLogger, ArgsSource,
};

fn resolver() -> Resolver {
    Resolver::new(Arc::new(standard_registry().unwrap()))
}

fn bag(args: impl IntoIterator<Item = Value>) -> ArgumentBag {
    ArgumentBag::new(Ambient::new(
        CallContext::new(),
        LogRoot::global().logger(),
        Internal::new(Arc::new(MemoryBroker::default())),
    ))
    .with_args(args)
}

/// Resolve `T` from `input`, then resolve the wire form back from `T` alone.
async fn round_trip<T: protomap_core::Typed>(input: Value, wire: TypeTag) -> (T, Value) {
    let resolver = resolver();
    let scope = CleanupScope::new();
    let mut there = bag([input]);
    let native = resolver.resolve(T::TAG, &mut there, &scope).await.unwrap();
    let mut back = bag([native.clone()]);
    let wire = resolver.resolve(wire, &mut back, &scope).await.unwrap();
    (T::try_from(native).unwrap(), wire)
}

#[test]
fn registry_has_every_standard_mapper() {
    let registry = standard_registry().unwrap();
    assert_eq!(registry.len(), 18);
    let names: Vec<_> = all().iter().map(|e| e.name).collect();
    for name in [
        "source",
        "source_proto",
        "job_info",
        "job_info_proto",
        "deployment_config",
        "deployment_config_proto",
        "datadir_project",
        "datadir_app",
        "datadir_component",
        "datadir_project_proto",
        "datadir_app_proto",
        "datadir_component_proto",
        "logger",
        "logger_proto",
        "terminal_ui",
        "terminal_ui_proto",
        "label_set",
        "label_set_proto",
    ] {
        assert!(names.contains(&name), "missing {name}");
    }
}

#[test]
fn every_native_type_is_reachable_both_ways() {
    let registry = standard_registry().unwrap();
    let pairs = [
        (TypeTag::Source, TypeTag::ArgsSource),
        (TypeTag::JobInfo, TypeTag::ArgsJobInfo),
        (TypeTag::DeploymentConfig, TypeTag::ArgsDeploymentConfig),
        (TypeTag::DataDirProject, TypeTag::ArgsDataDirProject),
        (TypeTag::DataDirApp, TypeTag::ArgsDataDirApp),
        (TypeTag::DataDirComponent, TypeTag::ArgsDataDirComponent),
        (TypeTag::LabelSet, TypeTag::ArgsLabelSet),
        (TypeTag::TerminalUi, TypeTag::ArgsTerminalUi),
        (TypeTag::Logger, TypeTag::ArgsLogger),
    ];
    for (native, wire) in pairs {
        let sig = Signature::new("entry", [native, TypeTag::Context]).returning(native, wire);
        assert!(registry.missing(&sig).is_empty(), "{native} <-> {wire}");
    }
}

#[tokio::test]
async fn project_dir_round_trip() {
    let input = ArgsDataDirProject {
        cache_dir: "/c".to_string(),
        data_dir: "/d".to_string(),
    };
    let (project, wire) = round_trip::<Project>(input.clone().into(), TypeTag::ArgsDataDirProject).await;
    assert_eq!(project.cache_dir(), Path::new("/c"));
    assert_eq!(project.data_dir(), Path::new("/d"));
    assert_eq!(ArgsDataDirProject::try_from(wire).unwrap(), input);
}

#[tokio::test]
async fn app_and_component_dir_round_trip() {
    let app = ArgsDataDirApp {
        cache_dir: "/c/app/web".to_string(),
        data_dir: "/d/app/web".to_string(),
    };
    let (native, wire) = round_trip::<App>(app.clone().into(), TypeTag::ArgsDataDirApp).await;
    assert_eq!(native.data_dir(), Path::new("/d/app/web"));
    assert_eq!(ArgsDataDirApp::try_from(wire).unwrap(), app);

    let component = ArgsDataDirComponent {
        cache_dir: "/c/x".to_string(),
        data_dir: "/d/x".to_string(),
    };
    let (native, wire) =
        round_trip::<Component>(component.clone().into(), TypeTag::ArgsDataDirComponent).await;
    assert_eq!(native.cache_dir(), Path::new("/c/x"));
    assert_eq!(ArgsDataDirComponent::try_from(wire).unwrap(), component);
}

#[tokio::test]
async fn scoped_dirs_map_to_wire() {
    let tmp = tempfile::tempdir().unwrap();
    let project = Project::new(protomap_component::BasicDir::new(
        tmp.path().join("cache"),
        tmp.path().join("data"),
    ));
    let app = project.app("web");
    app.create_all().unwrap();

    let resolver = resolver();
    let scope = CleanupScope::new();
    let mut bag = bag([Value::from(app)]);
    let wire = resolver
        .resolve(TypeTag::ArgsDataDirApp, &mut bag, &scope)
        .await
        .unwrap();
    let wire = ArgsDataDirApp::try_from(wire).unwrap();
    assert!(Path::new(&wire.data_dir).is_dir());
    assert!(wire.cache_dir.ends_with("web"));
}

#[tokio::test]
async fn label_set_round_trip() {
    let input = ArgsLabelSet {
        labels: [("env".to_string(), "prod".to_string())].into_iter().collect(),
    };
    let (labels, wire) = round_trip::<LabelSet>(input.clone().into(), TypeTag::ArgsLabelSet).await;
    assert_eq!(labels.get("env"), Some("prod"));
    assert_eq!(labels.len(), 1);
    assert_eq!(ArgsLabelSet::try_from(wire).unwrap(), input);
}

#[tokio::test]
async fn empty_label_set() {
    let (labels, _) =
        round_trip::<LabelSet>(ArgsLabelSet::default().into(), TypeTag::ArgsLabelSet).await;
    assert!(labels.is_empty());
}

#[tokio::test]
async fn metadata_round_trips() {
    let source = ArgsSource {
        app: "web".to_string(),
        path: "/src/web".to_string(),
    };
    let (native, wire) = round_trip::<Source>(source.clone().into(), TypeTag::ArgsSource).await;
    assert_eq!(native.app, "web");
    assert_eq!(ArgsSource::try_from(wire).unwrap(), source);

    let job = ArgsJobInfo {
        local: true,
        workspace: "default".to_string(),
        id: "j-1".to_string(),
    };
    let (native, wire) = round_trip::<JobInfo>(job.clone().into(), TypeTag::ArgsJobInfo).await;
    assert!(native.local);
    assert_eq!(native.id, "j-1");
    assert_eq!(ArgsJobInfo::try_from(wire).unwrap(), job);

    let config = ArgsDeploymentConfig {
        id: "d-1".to_string(),
        server_addr: "localhost:9701".to_string(),
        server_tls: true,
        server_tls_skip_verify: false,
        entrypoint_invite_token: "token".to_string(),
    };
    let (native, wire) =
        round_trip::<DeploymentConfig>(config.clone().into(), TypeTag::ArgsDeploymentConfig).await;
    assert_eq!(native.server_addr, "localhost:9701");
    assert!(native.server_tls);
    assert_eq!(ArgsDeploymentConfig::try_from(wire).unwrap(), config);
}

#[tokio::test]
async fn ambient_logger_wins_over_wire_logger() {
    let resolver = resolver();
    let scope = CleanupScope::new();
    let mut bag = bag([Value::from(ArgsLogger {
        name: "from-wire".to_string(),
    })]);
    let logger = resolver
        .resolve(TypeTag::Logger, &mut bag, &scope)
        .await
        .unwrap();
    let logger = protomap_core::Logger::try_from(logger).unwrap();
    assert_eq!(logger.name(), LogRoot::global().logger().name());
}

#[tokio::test]
async fn logger_conversion_resets_name() {
    let registry = standard_registry().unwrap();
    let scope = CleanupScope::new();
    let entry = &registry.lookup(TypeTag::Logger)[0];
    let inputs = Inputs::new(vec![ArgsLogger {
        name: "plugin.deploy".to_string(),
    }
    .into()]);
    let logger = entry.conversion.convert(inputs, &scope).await.unwrap();
    let logger = protomap_core::Logger::try_from(logger).unwrap();
    assert_eq!(logger.name(), "plugin.deploy");

    let mut bag = bag(Vec::new());
    let wire = resolver()
        .resolve(TypeTag::ArgsLogger, &mut bag, &scope)
        .await
        .unwrap();
    assert_eq!(
        ArgsLogger::try_from(wire).unwrap().name,
        LogRoot::global().logger().name()
    );
}

#[tokio::test]
async fn unsent_wire_argument_is_reported_missing() {
    let resolver = resolver();
    let scope = CleanupScope::new();
    let mut bag = bag(Vec::new());
    let err = resolver
        .resolve(TypeTag::Source, &mut bag, &scope)
        .await
        .unwrap_err();
    match err {
        protomap_core::ResolveError::Unresolvable { target, reason } => {
            assert_eq!(target, TypeTag::Source);
            assert_eq!(
                reason,
                protomap_core::UnresolvableReason::MissingInput(TypeTag::ArgsSource)
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(scope.pending(), 0);
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use protomap_broker::MemoryBroker;
use protomap_component::{LabelSet, Source};
use protomap_core::{
    Ambient, ArgumentBag, CallContext, CleanupScope, Conversion, ConversionEntry,
    ConversionError, DispatchError, Dispatcher, EntryError, EntryPoint, Inputs, Internal,
    LogRoot, Registry, ResolveError, Resolver, Signature, TypeTag, Value,
};
use protomap_wire::{ArgsLabelSet, ArgsSource};

fn ambient() -> Ambient {
    Ambient::new(
        CallContext::new(),
        LogRoot::global().logger(),
        Internal::new(Arc::new(MemoryBroker::default())),
    )
}

/// Counts invocations and registers one release action per invocation.
struct Counting {
    calls: Arc<AtomicUsize>,
    released: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

#[async_trait]
impl Conversion for Counting {
    async fn convert(
        &self,
        mut inputs: Inputs,
        scope: &CleanupScope,
    ) -> Result<Value, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let released = self.released.clone();
        scope.on_release(move || released.lock().unwrap().push("source"));
        if self.fail {
            return Err(ConversionError::Invalid("rejected".to_string()));
        }
        let args: ArgsSource = inputs.take()?;
        Ok(Source {
            app: args.app,
            path: args.path,
        }
        .into())
    }
}

struct Fixture {
    calls: Arc<AtomicUsize>,
    released: Arc<Mutex<Vec<&'static str>>>,
    resolver: Resolver,
}

fn fixture(fail: bool) -> Fixture {
    let calls = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(Mutex::new(Vec::new()));
    let counting = Counting {
        calls: calls.clone(),
        released: released.clone(),
        fail,
    };
    let labels_released = released.clone();
    let entries = vec![
        ConversionEntry::new("source", [TypeTag::ArgsSource], TypeTag::Source, counting),
        ConversionEntry::pure(
            "source_proto",
            [TypeTag::Source],
            TypeTag::ArgsSource,
            |inputs| {
                let source: Source = inputs.take()?;
                Ok(ArgsSource {
                    app: source.app,
                    path: source.path,
                }
                .into())
            },
        ),
        ConversionEntry::new(
            "label_set",
            [TypeTag::ArgsLabelSet],
            TypeTag::LabelSet,
            Labels(labels_released),
        ),
    ];
    let registry = Arc::new(Registry::register(entries).unwrap());
    Fixture {
        calls,
        released,
        resolver: Resolver::new(registry),
    }
}

struct Labels(Arc<Mutex<Vec<&'static str>>>);

#[async_trait]
impl Conversion for Labels {
    async fn convert(
        &self,
        mut inputs: Inputs,
        scope: &CleanupScope,
    ) -> Result<Value, ConversionError> {
        let released = self.0.clone();
        scope.on_release(move || released.lock().unwrap().push("labels"));
        let args: ArgsLabelSet = inputs.take()?;
        Ok(args.labels.into_iter().collect::<LabelSet>().into())
    }
}

fn args() -> Vec<Value> {
    vec![
        ArgsSource {
            app: "web".to_string(),
            path: "/src".to_string(),
        }
        .into(),
        ArgsLabelSet {
            labels: [("env".to_string(), "prod".to_string())].into_iter().collect(),
        }
        .into(),
    ]
}

#[tokio::test]
async fn second_resolution_reuses_stored_value() {
    let f = fixture(false);
    let mut bag = ArgumentBag::new(ambient()).with_args(args());
    let scope = CleanupScope::new();

    f.resolver
        .resolve(TypeTag::Source, &mut bag, &scope)
        .await
        .unwrap();
    f.resolver
        .resolve(TypeTag::Source, &mut bag, &scope)
        .await
        .unwrap();

    assert_eq!(f.calls.load(Ordering::SeqCst), 1);
    assert_eq!(scope.pending(), 1);
}

#[tokio::test]
async fn separate_calls_do_not_share_values() {
    let f = fixture(false);
    for _ in 0..2 {
        let mut bag = ArgumentBag::new(ambient()).with_args(args());
        let scope = CleanupScope::new();
        f.resolver
            .resolve(TypeTag::Source, &mut bag, &scope)
            .await
            .unwrap();
    }
    assert_eq!(f.calls.load(Ordering::SeqCst), 2);
    assert_eq!(*f.released.lock().unwrap(), vec!["source", "source"]);
}

struct Deploy {
    signature: Signature,
    fail: bool,
}

#[async_trait]
impl EntryPoint for Deploy {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    async fn call(&self, mut args: Vec<Value>) -> Result<Option<Value>, EntryError> {
        if self.fail {
            return Err("deploy refused".into());
        }
        let labels = LabelSet::try_from(args.remove(1))?;
        let mut source = Source::try_from(args.remove(0))?;
        source.path = format!("{}/{}", source.path, labels.get("env").unwrap_or("none"));
        Ok(Some(source.into()))
    }
}

fn deploy(fail: bool) -> Deploy {
    Deploy {
        signature: Signature::new("deploy", [TypeTag::Source, TypeTag::LabelSet])
            .returning(TypeTag::Source, TypeTag::ArgsSource),
        fail,
    }
}

#[tokio::test]
async fn dispatch_maps_result_back_to_wire() {
    let f = fixture(false);
    let dispatcher = Dispatcher::new(f.resolver.clone());
    let reply = dispatcher
        .dispatch(&deploy(false), ambient(), args())
        .await
        .unwrap()
        .unwrap();

    let reply = ArgsSource::try_from(reply).unwrap();
    assert_eq!(reply.app, "web");
    assert_eq!(reply.path, "/src/prod");
    assert_eq!(*f.released.lock().unwrap(), vec!["labels", "source"]);
}

#[tokio::test]
async fn scope_released_when_entry_point_fails() {
    let f = fixture(false);
    let dispatcher = Dispatcher::new(f.resolver.clone());
    let err = dispatcher
        .dispatch(&deploy(true), ambient(), args())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Failed { entry: "deploy", .. }));
    assert_eq!(*f.released.lock().unwrap(), vec!["labels", "source"]);
}

#[tokio::test]
async fn scope_released_when_conversion_fails() {
    let f = fixture(true);
    let dispatcher = Dispatcher::new(f.resolver.clone());
    let err = dispatcher
        .dispatch(&deploy(false), ambient(), args())
        .await
        .unwrap_err();

    match err {
        DispatchError::Argument { source, .. } => {
            assert!(matches!(
                source,
                ResolveError::ConversionFailed {
                    target: TypeTag::Source,
                    conversion: "source",
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(*f.released.lock().unwrap(), vec!["source"]);
}

#[tokio::test]
async fn missing_argument_fails_the_call_only() {
    let f = fixture(false);
    let dispatcher = Dispatcher::new(f.resolver.clone());
    let only_source = vec![args().remove(0)];
    let err = dispatcher
        .dispatch(&deploy(false), ambient(), only_source)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Argument {
            source: ResolveError::Unresolvable {
                target: TypeTag::LabelSet,
                ..
            },
            ..
        }
    ));

    // The same dispatcher keeps serving.
    let reply = dispatcher
        .dispatch(&deploy(false), ambient(), args())
        .await
        .unwrap();
    assert!(reply.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_the_registry() {
    let f = fixture(false);
    let dispatcher = Dispatcher::new(f.resolver.clone());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let dispatcher = dispatcher.clone();
        tasks.push(tokio::spawn(async move {
            let args = vec![
                ArgsSource {
                    app: format!("app-{i}"),
                    path: "/src".to_string(),
                }
                .into(),
                ArgsLabelSet::default().into(),
            ];
            let reply = dispatcher
                .dispatch(&deploy(false), ambient(), args)
                .await
                .unwrap()
                .unwrap();
            (i, ArgsSource::try_from(reply).unwrap())
        }));
    }
    for task in tasks {
        let (i, reply) = task.await.unwrap();
        assert_eq!(reply.app, format!("app-{i}"));
        assert_eq!(reply.path, "/src/none");
    }
    assert_eq!(f.calls.load(Ordering::SeqCst), 16);
}

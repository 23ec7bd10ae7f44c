use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use protomap_broker::{Broker, MemoryBroker};
use protomap_terminal::{
    InputRequest, NamedValue, OutputStyle, RecordingUi, Result as UiResult, Table, Ui, UiClient,
    UiError, UiEvent, UiServer,
};
use tokio_util::sync::CancellationToken;

async fn connect(broker: &MemoryBroker, ui: Arc<RecordingUi>) -> UiClient {
    let id = broker.next_id();
    let _task = broker.accept_and_serve(id, Arc::new(UiServer::new(ui)));
    let conn = broker.dial(&CancellationToken::new(), id).await.unwrap();
    UiClient::new(conn)
}

#[tokio::test]
async fn remote_calls_reach_local_ui() {
    let broker = MemoryBroker::default();
    let local = Arc::new(RecordingUi::interactive(["y"]));
    let client = connect(&broker, local.clone()).await;

    client.output("deploying", OutputStyle::Header).await.unwrap();
    client
        .named_values(&[NamedValue::new("url", "https://example.test")])
        .await
        .unwrap();
    let mut table = Table::new(["app", "status"]);
    table.push_row(["web", "ready"]);
    client.table(&table).await.unwrap();
    assert!(client.interactive().await.unwrap());
    assert_eq!(
        client.input(&InputRequest::new("continue?")).await.unwrap(),
        "y"
    );

    assert_eq!(
        local.events(),
        vec![
            UiEvent::Output {
                msg: "deploying".to_string(),
                style: OutputStyle::Header
            },
            UiEvent::NamedValues(vec![NamedValue::new("url", "https://example.test")]),
            UiEvent::Table(table),
            UiEvent::Input {
                prompt: "continue?".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn non_interactive_error_crosses_stream() {
    let broker = MemoryBroker::default();
    let client = connect(&broker, Arc::new(RecordingUi::new())).await;

    let result = client.input(&InputRequest::secret("password")).await;
    assert!(matches!(result, Err(UiError::NonInteractive)));

    // The connection is still usable afterwards.
    client.output("still here", OutputStyle::Normal).await.unwrap();
}

#[tokio::test]
async fn closed_client_refuses_calls() {
    let broker = MemoryBroker::default();
    let client = connect(&broker, Arc::new(RecordingUi::new())).await;

    client.close();
    client.close();

    assert!(client.is_closed());
    let result = client.output("too late", OutputStyle::Normal).await;
    assert!(matches!(result, Err(UiError::Closed)));
}

#[tokio::test]
async fn concurrent_callers_get_their_own_responses() {
    let broker = MemoryBroker::default();
    let local = Arc::new(RecordingUi::new());
    let client = Arc::new(connect(&broker, local.clone()).await);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .output(&format!("line {i}"), OutputStyle::Normal)
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(local.output_lines().len(), 8);
}

/// Interactive terminal whose prompts take a while to answer.
struct SlowPrompt;

#[async_trait]
impl Ui for SlowPrompt {
    async fn interactive(&self) -> UiResult<bool> {
        Ok(true)
    }

    async fn output(&self, _msg: &str, _style: OutputStyle) -> UiResult<()> {
        Ok(())
    }

    async fn named_values(&self, _values: &[NamedValue]) -> UiResult<()> {
        Ok(())
    }

    async fn table(&self, _table: &Table) -> UiResult<()> {
        Ok(())
    }

    async fn input(&self, _request: &InputRequest) -> UiResult<String> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok("late".to_string())
    }
}

#[tokio::test(start_paused = true)]
async fn abandoned_request_leaves_client_in_step() {
    let broker = MemoryBroker::default();
    let id = broker.next_id();
    let _task = broker.accept_and_serve(id, Arc::new(UiServer::new(Arc::new(SlowPrompt))));
    let conn = broker.dial(&CancellationToken::new(), id).await.unwrap();
    let client = UiClient::new(conn);

    let gave_up = tokio::time::timeout(
        Duration::from_millis(10),
        client.input(&InputRequest::new("name?")),
    )
    .await;
    assert!(gave_up.is_err());

    assert!(client.interactive().await.unwrap());
    client.output("next", OutputStyle::Normal).await.unwrap();
    assert!(client.interactive().await.unwrap());
}

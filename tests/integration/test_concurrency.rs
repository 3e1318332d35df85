// Concurrent use of a single client

use adx_client::client::headers::identification_headers;
use adx_client::QueryExecutor;
use mockito::Server;
use std::sync::Arc;

use crate::common::{load_test_file, schema_payload, test_client};

#[tokio::test]
async fn test_concurrent_requests_share_client() {
    let mut server = Server::new_async().await;
    let client = Arc::new(test_client());
    let requests = 16;

    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(load_test_file("successful-response.json"))
        .expect(requests)
        .create_async()
        .await;

    let url = server.url();
    let handles: Vec<_> = (0..requests)
        .map(|_| {
            let client = Arc::clone(&client);
            let url = url.clone();
            tokio::spawn(async move {
                let headers = identification_headers("schema", None);
                client.kusto_request(&url, &schema_payload(), Some(&headers)).await
            })
        })
        .collect();

    for handle in handles {
        let table = handle.await.unwrap().unwrap();
        assert_eq!(table.tables.len(), 2);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_executor_trait_object_across_tasks() {
    let mut server = Server::new_async().await;
    let executor: Arc<dyn QueryExecutor> = Arc::new(test_client());

    let mock = server
        .mock("POST", "/")
        .with_status(400)
        .with_body(load_test_file("error-response.json"))
        .expect(4)
        .create_async()
        .await;

    let url = server.url();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let executor = Arc::clone(&executor);
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            executor.execute(&url, &schema_payload(), None).await
        }));
    }

    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert!(err.is_service());
    }

    mock.assert_async().await;
}

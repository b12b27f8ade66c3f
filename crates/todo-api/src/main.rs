use std::sync::Arc;

use lambda_http::{run, service_fn, Error, Request};
use shared::config::Config;
use todo_api::router;
use todo_api::store::{DynamoStore, TodoStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    shared::telemetry::init_tracing()?;

    let config = Config::from_env();
    tracing::info!(table = %config.table_name, env = %config.environment, "Starting todo-api");

    let store: Arc<dyn TodoStore> = Arc::new(DynamoStore::new(&config.table_name).await);

    run(service_fn(move |req: Request| {
        let store = store.clone();
        async move { router::route(req, store.as_ref()).await }
    }))
    .await
}

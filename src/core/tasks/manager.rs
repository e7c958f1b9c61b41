use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::runtime::Runtime;

use super::{
    FetchTicket,
    TaskResult,
};
use crate::core::{
    http,
    Card,
    CardexError,
};

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, CardexError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    /// Drains every result that has arrived so far without blocking.
    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks until the next result arrives or `timeout` passes.
    pub fn wait_result(&mut self, timeout: Duration) -> Option<TaskResult> {
        self.receiver.recv_timeout(timeout).ok()
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Fetches the catalog on a worker thread. The result comes back as
    /// `TaskResult::CatalogFetched` carrying `ticket`.
    pub fn fetch_catalog(&self, ticket: FetchTicket, endpoint: String, timeout: Duration) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let _ = sender
                .send(TaskResult::LoadingMessage(format!("Loading catalog from {endpoint}...")));

            let result: Result<Vec<Card>, CardexError> = runtime.block_on(async {
                let client = http::http_client(timeout)?;
                http::fetch_catalog(&client, &endpoint).await
            });

            let result = result.map_err(|e| e.to_string());
            if let Err(e) = &result {
                log::warn!("Catalog fetch #{} failed: {}", ticket.0, e);
            }

            let _ = sender.send(TaskResult::CatalogFetched { ticket, result });
        });
    }
}

//! Local development stub of the meetings service.
//!
//! Serves the same `/api/riunioni` contract the client talks to, over
//! an in-memory store, so the console can be tried without the real
//! backend. `rivedi demo` runs it on a fixed port; integration tests
//! bind it to an ephemeral one.

pub mod error;
pub mod routes;
pub mod store;

pub use store::{MeetingStore, StoredMeeting};

use anyhow::Result;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tracing::{error, info};

pub struct StubServer {
    port: u16,
    store: MeetingStore,
}

/// A stub bound to an ephemeral port, serving in the background until
/// dropped.
pub struct StubHandle {
    pub base_url: String,
    pub store: MeetingStore,
    task: JoinHandle<()>,
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl StubServer {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            store: MeetingStore::default(),
        }
    }

    /// Install the sample fixtures.
    pub async fn seed(&self) {
        self.store.seed().await;
        info!("Seeded {} sample meetings", self.store.len().await);
    }

    /// Serve on the configured port until the process exits.
    pub async fn start(self) -> Result<()> {
        let app = routes::router(self.store.clone()).layer(ServiceBuilder::new());
        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("Demo server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET    /api/riunioni      - List meetings");
        info!("  POST   /api/riunioni      - Create a meeting");
        info!("  GET    /api/riunioni/:id  - Get one meeting");
        info!("  PUT    /api/riunioni/:id  - Update notes or transcript");
        info!("  DELETE /api/riunioni/:id  - Delete a meeting");

        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Bind to an ephemeral loopback port and serve in a background
    /// task. Used by tests and anywhere a throwaway service is handy.
    pub async fn start_ephemeral(self) -> Result<StubHandle> {
        let app = routes::router(self.store.clone()).layer(ServiceBuilder::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                error!("Demo server failed: {}", err);
            }
        });

        Ok(StubHandle {
            base_url: format!("http://{}", addr),
            store: self.store,
            task,
        })
    }
}

//! Backend commands queued from UI to backend worker.

use shared::domain::RequestId;

pub enum BackendCommand {
    Search {
        request: RequestId,
        query: String,
        server_url: String,
    },
}

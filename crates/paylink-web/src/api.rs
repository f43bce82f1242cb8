//! API Client

use paylink_client::{config::DEFAULT_API_URL, ClientConfig, HttpTransport, RemoteSubmitter};

/// Submitter targeting the backend that served this page
pub fn submitter() -> RemoteSubmitter<HttpTransport> {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_API_URL.into());

    RemoteSubmitter::new(HttpTransport::new(&ClientConfig::new(origin)))
}

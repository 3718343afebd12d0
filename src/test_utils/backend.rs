//! An in-process stub of the Zentavo backend API.
//!
//! Handler tests build an [axum::Router] with just the backend routes they
//! need and point an [crate::ApiClient] at it over a real socket, so the
//! whole HTTP path (serialisation, auth headers, status mapping) is
//! exercised.

use axum::Router;

/// Serve `router` on an ephemeral localhost port and return its base URL.
///
/// The server task is aborted when the test's tokio runtime shuts down.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind stub backend listener");
    let address = listener
        .local_addr()
        .expect("could not get stub backend address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub backend crashed");
    });

    format!("http://{address}")
}

/// A base URL that refuses connections, for exercising transport failures.
///
/// Binds a listener to reserve a port, then drops it before returning.
pub(crate) async fn unreachable_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind listener");
    let address = listener.local_addr().expect("could not get address");
    drop(listener);

    format!("http://{address}")
}

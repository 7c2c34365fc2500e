//! Shared helpers for the in-process HTTP fixtures the tests run against.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// Bind an ephemeral localhost port, returning the listener and address.
///
/// Split from [`serve`] so fixtures that embed absolute URLs (pagination
/// links) can learn their address before building the router.
pub async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Serve `app` on `listener` in the background for the rest of the test.
pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

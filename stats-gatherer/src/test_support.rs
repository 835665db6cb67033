use crate::endpoint::STATUS_PATH;
use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;

/// Status document of a single node cluster, trimmed to a handful of metrics.
pub(crate) const NODE_STATUS: &str = include_str!("../testdata/node_status.json");

/// Serves `router` on an ephemeral local port and returns its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub(crate) async fn serve_status<H, T>(handler: H) -> String
where
    H: axum::handler::Handler<T, ()>,
    T: 'static,
{
    serve(Router::new().route(STATUS_PATH, get(handler))).await
}

pub(crate) async fn serve_node_status() -> String {
    serve_status(|| async { NODE_STATUS }).await
}

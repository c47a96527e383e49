#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::get,
        Router,
    };
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;
    use tracing::{debug, info, warn};

    /// The single value held by the reference target
    #[derive(Debug, Default)]
    pub struct Cell {
        value: Option<i64>,
        writes: u64,
        drop_write: Option<u64>,
    }

    type SharedCell = Arc<RwLock<Cell>>;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ValueBody {
        pub value: i64,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    /// Routes of the reference target, with an optional write to drop
    pub fn app(drop_write: Option<u64>) -> Router {
        let cell = Arc::new(RwLock::new(Cell {
            drop_write,
            ..Cell::default()
        }));

        Router::new()
            .route("/health", get(health_check))
            .route("/value", get(get_value).put(put_value))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(cell)
    }

    pub async fn start_server(
        host: &str,
        port: u16,
        drop_write: Option<u64>,
    ) -> anyhow::Result<()> {
        if let Some(n) = drop_write {
            warn!("Write {} will be silently dropped", n);
        }

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("echoprobe target listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app(drop_write)).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "echoprobe-target",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn get_value(
        State(cell): State<SharedCell>,
    ) -> Result<Json<ValueBody>, (StatusCode, Json<ErrorResponse>)> {
        let cell = cell.read().await;
        match cell.value {
            Some(value) => Ok(Json(ValueBody { value })),
            None => Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "No value written yet".to_string(),
                }),
            )),
        }
    }

    async fn put_value(State(cell): State<SharedCell>, Json(body): Json<ValueBody>) -> StatusCode {
        let mut cell = cell.write().await;
        let call = cell.writes;
        cell.writes += 1;

        if cell.drop_write == Some(call) {
            warn!("Dropping write {} of value {}", call, body.value);
            return StatusCode::NO_CONTENT;
        }

        debug!("Stored value {} (write {})", body.value, call);
        cell.value = Some(body.value);
        StatusCode::NO_CONTENT
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _host: &str,
        _port: u16,
        _drop_write: Option<u64>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}

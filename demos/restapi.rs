use std::time::SystemTime;

use hyper::{Body, Server, StatusCode};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use vanilla_mux::{json::Json, Request, Router};

#[derive(Debug, Serialize, Deserialize)]
struct TimeData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

async fn get_time(_req: Request) -> Json<TimeData> {
    Json(TimeData {
        kind: Some("UTC".to_owned()),
        value: Some(httpdate::fmt_http_date(SystemTime::now())),
    })
}

async fn post_time(req: Request<Body>) -> Result<StatusCode, (StatusCode, &'static str)> {
    match Json::<TimeData>::from_request(req).await {
        Ok(Json(data)) => {
            tracing::info!(?data, "time received");
            Ok(StatusCode::OK)
        }
        Err(_) => Err((StatusCode::BAD_REQUEST, "unable to read time provided")),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // All other requests get a 404
    let router = Router::new();
    router.get("/time", get_time).post("/time", post_time);

    let addr = &([127, 0, 0, 1], 8080).into();
    let server = Server::bind(addr).serve(router);

    println!("Server listening on {}", addr);
    if let Err(err) = server.await {
        eprintln!("Error: {}", err);
    }
}

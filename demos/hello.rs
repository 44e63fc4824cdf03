use hyper::Server;
use tracing_subscriber::EnvFilter;
use vanilla_mux::{Request, Router};

fn router() -> Router {
    let router = Router::new();
    router
        .get("/hello", |_req: Request| async { "Hello, World!" })
        // Everything else falls through to the catch-all
        .handle_func("/", |_req: Request| async { "Goodbye" });
    router
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr = &([127, 0, 0, 1], 8080).into();
    let server = Server::bind(addr).serve(router());

    println!("Server listening on {}", addr);
    if let Err(err) = server.await {
        eprintln!("Error: {}", err);
    }
}

use hyper::{body, header, Body, Method, StatusCode};
use tower_service::Service;
use vanilla_mux::{router::RequestService, MatchKind, Request, RequestExt, Response, Router};

fn request(method: Method, path: &str) -> Request {
    hyper::Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

async fn send(router: &Router, method: Method, path: &str) -> Response {
    router.call_route(request(method, path)).await.unwrap()
}

async fn text(res: Response) -> String {
    let bytes = body::to_bytes(res.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn exact_match() {
    let router = Router::new();
    router.handle_func("/a/aa", |_req: Request| async { "aa" });
    router.handle_func("/a", |_req: Request| async { StatusCode::NOT_FOUND });

    let res = send(&router, Method::GET, "/a/aa").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(text(res).await, "aa");
}

#[tokio::test]
async fn redirect() {
    let router = Router::new();
    router.handle_func("/home", |_req: Request| async {});
    router.handle_func("/", |_req: Request| async {
        hyper::Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, "/home")
            .body(Body::empty())
    });

    let res = send(&router, Method::GET, "/").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/home");

    let res = send(&router, Method::GET, "/home").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn catch_all() {
    let router = Router::new();
    router.put("/", |_req: Request| async { StatusCode::NOT_FOUND });
    router.post("/", |_req: Request| async { StatusCode::NOT_FOUND });
    router.delete("/", |_req: Request| async { StatusCode::NOT_FOUND });
    router.handle_func("/", |_req: Request| async { "success" });

    let last = router.table().priority().pop().unwrap();
    assert!(last.is_wildcard());

    let res = send(&router, Method::GET, "/").await;
    assert_eq!(text(res).await, "success");

    let res = send(&router, Method::PUT, "/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // No OPTIONS route, so the catch-all answers
    let res = send(&router, Method::OPTIONS, "/anything").await;
    assert_eq!(text(res).await, "success");
}

#[tokio::test]
async fn not_found() {
    let router = Router::new();
    router.handle_func("/a", |_req: Request| async {});

    let res = send(&router, Method::GET, "/b").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(text(res).await, "404 page not found\n");
}

#[tokio::test]
async fn empty_router_is_not_found() {
    let res = send(&Router::new(), Method::GET, "/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn later_registration_wins() {
    let router = Router::new();
    router.get("/v", |_req: Request| async { "first" });
    router.get("/v", |_req: Request| async { "second" });

    assert_eq!(router.table().len(), 1);
    assert_eq!(router.table().priority().len(), 1);
    assert_eq!(text(send(&router, Method::GET, "/v").await).await, "second");
}

#[tokio::test]
async fn handler_sees_matched_route() {
    let router = Router::new();
    router.get("/static", |req: Request| async move {
        let matched = req.matched_route().unwrap();
        format!("{} {} {:?}", matched.method(), matched.route(), matched.kind())
    });
    router.handle_func("/", |req: Request| async move {
        let matched = req.matched_route().unwrap();
        assert_eq!(matched.kind(), MatchKind::Prefix);
        format!("{} {}", matched.method(), matched.route())
    });

    let res = send(&router, Method::GET, "/static").await;
    assert_eq!(text(res).await, "GET /static Exact");

    let res = send(&router, Method::GET, "/static/app.js").await;
    assert_eq!(text(res).await, "GET /static Prefix");

    let res = send(&router, Method::POST, "/static").await;
    assert_eq!(text(res).await, "* /");
}

#[tokio::test]
async fn routes_added_after_cloning_are_shared() {
    let router = Router::new();
    let mut service = RequestService::from(router.clone());

    let res = service.call(request(Method::GET, "/late")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    router.get("/late", |req: Request| async move {
        assert!(req.remote_address().is_none());
        "here"
    });

    let res = service.call(request(Method::GET, "/late")).await.unwrap();
    assert_eq!(text(res).await, "here");
}

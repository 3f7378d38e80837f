use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use quiz_client::{AppContext, cache::MemoryStorage, config::Config};

/// 后端收到的一次请求
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("no request recorded")
    }
}

fn json(body: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    };
    backend.requests.lock().unwrap().push(recorded);

    match (method.as_str(), uri.path()) {
        ("GET", "/api/topic") => {
            json(r#"{"success":true,"data":[{"id":1,"name":"Rust","questionCount":12}],"total":1}"#)
        }
        ("POST", "/api/topic") => json(r#"{"success":true,"data":{"id":2,"name":"Tokio"}}"#),
        ("PUT", "/api/topic/5") => json(r#"{"success":true,"data":{"id":5,"name":"renamed"}}"#),
        ("GET", "/api/question/categories") => json(r#"[{"id":1,"name":"算法"},{"id":2,"name":"网络"}]"#),
        ("GET", "/api/question/list") => {
            json(r#"[{"id":10,"categoryId":1,"title":"two sum","type":"single"}]"#)
        }
        ("GET", "/api/question/10") => json(r#"{"id":10,"categoryId":1,"title":"two sum"}"#),
        ("GET", "/api/question/detail/10") => json(
            r#"[{"id":100,"questionId":10,"label":"A","content":"O(n)","isCorrect":true},
                {"id":101,"questionId":10,"label":"B","content":"O(n^2)","isCorrect":false}]"#,
        ),
        ("POST", "/api/xiaobao/chat") => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "你好，我是小宝".to_string(),
        )
            .into_response(),
        ("POST", "/api/user/login") if body.contains("wrong") => {
            json(r#"{"success":false,"errorMsg":"用户名或密码错误"}"#)
        }
        ("POST", "/api/user/login") if body.contains("legacy") => {
            json(r#"{"success":true,"data":{"id":3,"username":"legacy"}}"#)
        }
        ("POST", "/api/user/login") => json(
            r#"{"success":true,"data":{"user":{"id":1,"username":"alice","email":"alice@example.com"},"token":"tok-alice"}}"#,
        ),
        ("POST", "/api/user/register") => {
            json(r#"{"success":true,"data":{"id":4,"username":"bob"}}"#)
        }
        ("GET", "/api/slow") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            json(r#"{"success":true}"#)
        }
        ("GET", "/api/broken") => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        ("GET", "/api/not-json") => json("<html>oops</html>"),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("not found"))
            .unwrap(),
    }
}

/// 启动模拟后端，返回记录器和指向它的应用上下文
pub async fn spawn() -> (MockBackend, AppContext) {
    let backend = MockBackend::default();
    let app = Router::new().fallback(handle).with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = Config::default().with_api_base_url(format!("http://{}/api", addr));
    config.request_timeout_secs = 1;
    let ctx = AppContext::with_store(config, Arc::new(MemoryStorage::new())).unwrap();
    (backend, ctx)
}

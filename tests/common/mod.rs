#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use storefront_gateway::{config::AppConfig, state::AppState};
use tokio::sync::Notify;

/// In-memory stand-in for the storefront REST API.
#[derive(Default)]
pub struct Upstream {
    pub orders: Mutex<Vec<Value>>,
    /// `(method path, body)` for every write the gateway sent.
    pub writes: Mutex<Vec<(String, Value)>>,
    pub queries: Mutex<Vec<String>>,
    pub auth_headers: Mutex<Vec<String>>,
    pub reject_status_updates: Mutex<bool>,
    pub checkout_url: Mutex<String>,
    /// When set, payment checkout waits for `payment_release` before answering.
    pub hold_payment: Mutex<bool>,
    pub payment_release: Notify,
}

impl Upstream {
    pub fn new() -> Arc<Self> {
        let upstream = Self::default();
        *upstream.checkout_url.lock().unwrap() = "https://pay.example.com/checkout/abc".into();
        Arc::new(upstream)
    }

    pub fn seed_orders(&self, orders: Vec<Value>) {
        *self.orders.lock().unwrap() = orders;
    }

    pub fn writes_to(&self, path: &str) -> Vec<Value> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn record(&self, path: String, body: Value, headers: &HeaderMap) {
        if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
            self.auth_headers.lock().unwrap().push(auth.to_string());
        }
        self.writes.lock().unwrap().push((path, body));
    }
}

pub fn products() -> Value {
    json!([
        {
            "id": 1,
            "name": "Vestido Floral",
            "price": "129.90",
            "categoryId": 1,
            "subcategoryId": 10,
            "sizes": ["P", "M", "G"],
            "colors": [
                {"name": "Azul", "hex": "#1e40af", "inStock": true},
                {"name": "Rosa", "hex": "#f472b6", "inStock": false}
            ],
            "description": "Vestido midi estampado",
            "featured": true
        },
        {
            "id": "2",
            "name": "Camisa Linho",
            "price": 89.5,
            "category_id": "2",
            "sizes": ["M"],
            "colors": ["Branco"],
            "is_new": "true"
        }
    ])
}

fn error(status: StatusCode, message: &str, details: Value) -> Response {
    (status, Json(json!({ "message": message, "details": details }))).into_response()
}

async fn list_products(State(up): State<Arc<Upstream>>, RawQuery(query): RawQuery) -> Json<Value> {
    up.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({ "data": products() }))
}

// No direct lookup; the gateway must fall back to the list.
async fn get_product() -> Response {
    error(StatusCode::NOT_FOUND, "Rota não encontrada", Value::Null)
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Vestidos"},
        {"id": 2, "name": "Camisas", "subcategories": [{"id": 20, "name": "Social"}]}
    ]))
}

async fn list_subcategories() -> Json<Value> {
    Json(json!({ "items": [{"id": 10, "name": "Midi", "categoryId": 1}] }))
}

async fn create_order(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    up.record("POST /orders".into(), body.clone(), &headers);
    let mut orders = up.orders.lock().unwrap();
    let mut order = body;
    order["id"] = json!(format!("PED-{}", 100 + orders.len()));
    order["createdAt"] = json!("2026-10-17T12:00:00Z");
    orders.push(order.clone());
    Json(json!({ "data": order }))
}

async fn list_orders(State(up): State<Arc<Upstream>>, headers: HeaderMap) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        up.auth_headers.lock().unwrap().push(auth.to_string());
    }
    Json(Value::Array(up.orders.lock().unwrap().clone()))
}

async fn get_order(State(up): State<Arc<Upstream>>, Path(id): Path<String>) -> Response {
    let orders = up.orders.lock().unwrap();
    match orders.iter().find(|o| o["id"] == json!(id)) {
        Some(order) => Json(order.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Pedido não encontrado", Value::Null),
    }
}

async fn update_status(
    State(up): State<Arc<Upstream>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    up.record(format!("PATCH /orders/{id}/status"), body.clone(), &headers);
    if *up.reject_status_updates.lock().unwrap() {
        return error(
            StatusCode::CONFLICT,
            "Transição de status inválida",
            json!({ "orderId": id }),
        );
    }
    let mut orders = up.orders.lock().unwrap();
    if let Some(order) = orders.iter_mut().find(|o| o["id"] == json!(id)) {
        order["status"] = body["status"].clone();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn order_status(State(up): State<Arc<Upstream>>, Path(id): Path<String>) -> Response {
    let orders = up.orders.lock().unwrap();
    match orders.iter().find(|o| o["id"] == json!(id)) {
        Some(order) => Json(json!({ "data": { "status": order["status"] } })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Pedido não encontrado", Value::Null),
    }
}

async fn payment_checkout(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let held = *up.hold_payment.lock().unwrap();
    if held {
        up.payment_release.notified().await;
    }
    up.record("POST /mercadopago/checkout".into(), body, &headers);
    let url = up.checkout_url.lock().unwrap().clone();
    Json(json!({ "id": "pref-1", "init_point": url }))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == json!("secret") {
        Json(json!({
            "accessToken": "tok-admin",
            "user": {"id": 7, "name": "Admin", "email": body["email"]}
        }))
        .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Credenciais inválidas", Value::Null)
    }
}

async fn metrics() -> Json<Value> {
    Json(json!({
        "data": {
            "totalRevenue": "300.50",
            "totalOrders": 2,
            "statusCounts": {"pending": 1, "delivered": 1}
        }
    }))
}

async fn cdn_upload(Path(cloud): Path<String>, mut multipart: Multipart) -> Response {
    let mut preset = String::new();
    let mut file_len = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("upload_preset") => preset = field.text().await.unwrap_or_default(),
            Some("file") => file_len = field.bytes().await.map(|b| b.len()).unwrap_or(0),
            _ => {}
        }
    }
    if preset != "storefront" || file_len == 0 {
        let body = json!({ "error": { "message": "Upload preset not found" } });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    Json(json!({
        "secure_url": format!("https://cdn.example.com/{cloud}/image/upload/v1/abc.png"),
        "public_id": "abc"
    }))
    .into_response()
}

pub async fn spawn_upstream(upstream: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/categories", get(list_categories))
        .route("/subcategories", get(list_subcategories))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_status).get(order_status))
        .route("/mercadopago/checkout", post(payment_checkout))
        .route("/auth/login", post(login))
        .route("/dashboard/metrics", get(metrics))
        .route("/v1_1/{cloud}/image/upload", post(cdn_upload))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Gateway state wired to a fresh fake upstream.
pub async fn gateway() -> (AppState, Arc<Upstream>) {
    let upstream = Upstream::new();
    let base_url = spawn_upstream(upstream.clone()).await;
    let config = AppConfig {
        api_base_url: base_url,
        ..AppConfig::default()
    };
    (AppState::new(&config).unwrap(), upstream)
}

pub fn buyer() -> Value {
    json!({
        "name": "Maria Silva",
        "email": "maria@example.com",
        "cpf": "123.456.789-00",
        "phone": "(11) 99999-0000",
        "address": {
            "street": "Rua das Flores",
            "number": "100",
            "neighborhood": "Centro",
            "city": "São Paulo",
            "state": "SP",
            "cep": "01000-000"
        }
    })
}

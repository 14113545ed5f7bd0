use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use chainboard_auth::{Credentials, Registration};
use chainboard_client::{ApiClient, ApiError, ClientConfig, SupplyChainApi};
use chainboard_core::{ItemId, OrderId, Role};
use chainboard_inventory::{InventoryItem, ItemPayload};
use chainboard_orders::{NewOrder, Order, OrderStatus, OrderUpdate};

#[derive(Default)]
struct Backend {
    orders: Vec<Order>,
    items: Vec<InventoryItem>,
    next_id: i64,
    registered: Vec<String>,
    last_auth: Option<String>,
    last_request_id: Option<String>,
    corrupt_orders: bool,
}

type Shared = Arc<Mutex<Backend>>;

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": format!("{what} not found") }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret1" {
        Json(json!({ "role": "SUPPLIER", "email": body["email"], "token": "tok-1" })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if email == "broken@example.com" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    let mut backend = state.lock().unwrap();
    if backend.registered.contains(&email) {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Email already registered" })))
            .into_response();
    }
    backend.registered.push(email);
    StatusCode::OK.into_response()
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    backend.last_auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.last_request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if backend.corrupt_orders {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    Json(backend.orders.clone()).into_response()
}

async fn place_order(State(state): State<Shared>, Json(body): Json<NewOrder>) -> Response {
    let mut backend = state.lock().unwrap();
    let order = Order {
        order_id: OrderId::new(backend.next_id()),
        item_id: body.item_id,
        supplier_id: body.supplier_id,
        item_name: body.item_name,
        quantity: body.quantity,
        total_cost: body.quantity as f64 * 2.0,
        status: OrderStatus::Pending,
    };
    backend.orders.push(order.clone());
    Json(order).into_response()
}

async fn update_order(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<OrderUpdate>,
) -> Response {
    let mut backend = state.lock().unwrap();
    match backend.orders.iter_mut().find(|o| o.order_id.get() == id) {
        Some(order) => {
            order.apply_update(&body);
            order.total_cost = order.quantity as f64 * 2.0;
            Json(order.clone()).into_response()
        }
        None => not_found("order"),
    }
}

async fn update_status(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(status) = query.get("status").and_then(|s| s.parse::<OrderStatus>().ok()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut backend = state.lock().unwrap();
    match backend.orders.iter_mut().find(|o| o.order_id.get() == id) {
        Some(order) => {
            order.status = status;
            StatusCode::OK.into_response()
        }
        None => not_found("order"),
    }
}

async fn list_inventory(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().items.clone()).into_response()
}

async fn add_item(State(state): State<Shared>, Json(body): Json<ItemPayload>) -> Response {
    let mut backend = state.lock().unwrap();
    let item = InventoryItem {
        id: ItemId::new(backend.next_id()),
        item_name: body.item_name,
        quantity: body.quantity.unwrap_or_default(),
        cost: body.cost.unwrap_or_default(),
    };
    backend.items.push(item);
    StatusCode::CREATED.into_response()
}

async fn update_item(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<ItemPayload>,
) -> Response {
    let mut backend = state.lock().unwrap();
    match backend.items.iter_mut().find(|i| i.id.get() == id) {
        Some(item) => {
            item.item_name = body.item_name;
            item.quantity = body.quantity.unwrap_or(item.quantity);
            item.cost = body.cost.unwrap_or(item.cost);
            StatusCode::OK.into_response()
        }
        None => not_found("item"),
    }
}

async fn delete_item(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut backend = state.lock().unwrap();
    let before = backend.items.len();
    backend.items.retain(|i| i.id.get() != id);
    if backend.items.len() == before {
        return not_found("item");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn insights(State(state): State<Shared>) -> Response {
    let backend = state.lock().unwrap();
    let count = |status: OrderStatus| backend.orders.iter().filter(|o| o.status == status).count();
    Json(json!({
        "totalInventoryItems": backend.items.len(),
        "totalOrders": backend.orders.len(),
        "deliveredOrders": count(OrderStatus::Delivered),
        "shippedOrders": count(OrderStatus::Shipped),
        "pendingOrders": count(OrderStatus::Pending),
        "cancelledOrders": count(OrderStatus::Cancelled),
    }))
    .into_response()
}

struct TestServer {
    config: ClientConfig,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/orders/list", get(list_orders))
            .route("/orders/place", post(place_order))
            .route("/orders/update/:id", put(update_order))
            .route("/orders/update-status/:id", put(update_status))
            .route("/inventory/item", get(list_inventory))
            .route("/inventory/add", post(add_item))
            .route("/inventory/update/:id", put(update_item))
            .route("/inventory/delete/:id", delete(delete_item))
            .route("/dashboard/insights", get(insights))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            config: ClientConfig::new(format!("http://{}/", addr)),
            state,
            handle,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.config)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn login_returns_the_session_record() {
    let srv = TestServer::spawn().await;

    let session = srv
        .client()
        .login(&Credentials::new("sam@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(session.role(), Some(&Role::Supplier));
    assert_eq!(session.token(), Some("tok-1"));
    assert_eq!(session.email(), Some("sam@example.com"));
}

#[tokio::test]
async fn login_rejection_is_a_status_error() {
    let srv = TestServer::spawn().await;

    let err = srv
        .client()
        .login(&Credentials::new("sam@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn register_surfaces_backend_messages() {
    let srv = TestServer::spawn().await;
    let client = srv.client();
    let form = Registration::new("ana@example.com", "secret1", Role::Buyer);

    client.register(&form).await.unwrap();

    let err = client.register(&form).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 409,
            message: Some("Email already registered".to_string())
        }
    );

    let broken = Registration::new("broken@example.com", "secret1", Role::Buyer);
    let err = client.register(&broken).await.unwrap_err();
    assert_eq!(err.backend_message(), Some("database unavailable"));
}

#[tokio::test]
async fn session_token_and_request_id_are_sent() {
    let srv = TestServer::spawn().await;
    let client = ApiClient::with_token(&srv.config, "tok-9");

    client.list_orders().await.unwrap();

    let backend = srv.state.lock().unwrap();
    assert_eq!(backend.last_auth.as_deref(), Some("Bearer tok-9"));
    let request_id = backend.last_request_id.clone().unwrap();
    assert!(uuid::Uuid::parse_str(&request_id).is_ok());
}

#[tokio::test]
async fn order_lifecycle_place_update_status() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let placed = client
        .place_order(&NewOrder::for_item(ItemId::new(5), "Bolts", 3))
        .await
        .unwrap();
    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.total_cost, 6.0);

    let updated = client
        .update_order(
            placed.order_id,
            &OrderUpdate {
                item_name: "Bolts M8".to_string(),
                quantity: 5,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.item_name, "Bolts M8");
    assert_eq!(updated.quantity, 5);

    client
        .update_order_status(placed.order_id, OrderStatus::Shipped)
        .await
        .unwrap();

    let orders = client.list_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Shipped);

    let err = client
        .update_order_status(OrderId::new(999), OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.backend_message(), Some("order not found"));
}

#[tokio::test]
async fn inventory_add_update_delete_and_insights() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    client
        .add_item(&ItemPayload::new("Gears", 10, Some(1.5)))
        .await
        .unwrap();
    let items = client.list_inventory().await.unwrap();
    assert_eq!(items.len(), 1);
    let gear = items[0].clone();

    client
        .update_item(gear.id, &gear.with_quantity(42))
        .await
        .unwrap();
    let items = client.list_inventory().await.unwrap();
    assert_eq!(items[0].quantity, 42);
    assert_eq!(items[0].cost, 1.5);

    let insights = client.insights().await.unwrap();
    assert_eq!(insights.total_inventory_items, 1);
    assert_eq!(insights.total_orders, 0);

    client.delete_item(gear.id).await.unwrap();
    assert!(client.list_inventory().await.unwrap().is_empty());

    let err = client.delete_item(gear.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unexpected_body_is_a_parse_error() {
    let srv = TestServer::spawn().await;
    srv.state.lock().unwrap().corrupt_orders = true;

    let err = srv.client().list_orders().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ClientConfig::new(format!("http://{}", addr)));
    let err = client.insights().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

//! `reqwest`-backed implementation of [`SupplyChainApi`].

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use chainboard_auth::{Credentials, Registration, Session};
use chainboard_core::{ItemId, OrderId};
use chainboard_inventory::{InventoryItem, ItemPayload};
use chainboard_orders::{DashboardInsights, NewOrder, Order, OrderStatus, OrderUpdate};

use crate::api::SupplyChainApi;
use crate::config::ClientConfig;
use crate::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the supply-chain backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(config: &ClientConfig, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(config)
        }
    }

    /// Client authenticated with the session's bearer token, if it has one.
    pub fn for_session(config: &ClientConfig, session: Option<&Session>) -> Self {
        match session.and_then(Session::token) {
            Some(token) => Self::with_token(config, token),
            None => Self::new(config),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::now_v7();
        tracing::debug!(%method, path, %request_id, "sending request");

        let mut req = self
            .http
            .request(method, format!("{}{}", self.api_url, path))
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and require a success status.
    async fn send(&self, req: RequestBuilder, op: &'static str) -> Result<Response, ApiError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(op, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let message = error_message(resp).await;
        tracing::warn!(op, status, message = message.as_deref(), "backend rejected request");
        Err(ApiError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Message for a failed response: the JSON `message` field when there is
/// one, else the raw text body.
async fn error_message(resp: Response) -> Option<String> {
    let is_json = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let body = resp.text().await.ok()?;

    let from_json = is_json
        .then(|| serde_json::from_str::<serde_json::Value>(&body).ok())
        .flatten()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string));
    let message = from_json.unwrap_or(body);

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

impl SupplyChainApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let req = self.request(Method::POST, "/auth/login").json(credentials);
        let resp = self.send(req, "login").await?;
        let session: Session = Self::json(resp).await?;
        tracing::info!(role = ?session.role(), "login accepted");
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let req = self.request(Method::POST, "/auth/register").json(registration);
        self.send(req, "register").await?;
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let resp = self.send(self.request(Method::GET, "/orders/list"), "list_orders").await?;
        Self::json(resp).await
    }

    async fn place_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let req = self.request(Method::POST, "/orders/place").json(order);
        let resp = self.send(req, "place_order").await?;
        Self::json(resp).await
    }

    async fn update_order(&self, id: OrderId, update: &OrderUpdate) -> Result<Order, ApiError> {
        let req = self
            .request(Method::PUT, &format!("/orders/update/{id}"))
            .json(update);
        let resp = self.send(req, "update_order").await?;
        Self::json(resp).await
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), ApiError> {
        let req = self
            .request(Method::PUT, &format!("/orders/update-status/{id}"))
            .query(&[("status", status.as_str())]);
        self.send(req, "update_order_status").await?;
        Ok(())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        let resp = self
            .send(self.request(Method::GET, "/inventory/item"), "list_inventory")
            .await?;
        Self::json(resp).await
    }

    async fn add_item(&self, item: &ItemPayload) -> Result<(), ApiError> {
        let req = self.request(Method::POST, "/inventory/add").json(item);
        self.send(req, "add_item").await?;
        Ok(())
    }

    async fn update_item(&self, id: ItemId, item: &ItemPayload) -> Result<(), ApiError> {
        let req = self
            .request(Method::PUT, &format!("/inventory/update/{id}"))
            .json(item);
        self.send(req, "update_item").await?;
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/inventory/delete/{id}"));
        self.send(req, "delete_item").await?;
        Ok(())
    }

    async fn insights(&self) -> Result<DashboardInsights, ApiError> {
        let resp = self
            .send(self.request(Method::GET, "/dashboard/insights"), "insights")
            .await?;
        Self::json(resp).await
    }
}

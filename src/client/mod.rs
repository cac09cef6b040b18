//! Transport shim between the console and the REST API
//!
//! A thin reqwest wrapper: no caching, no retries, no optimistic mutation.
//! Every call maps to exactly one HTTP request (bulk create maps to one per
//! item). Non-2xx responses surface as a single human-readable string taken
//! from the response body's `error` field, with a generic per-resource
//! fallback when the body is not parseable.

use crate::core::error::{ErrorBody, TransportError};
use crate::core::query::{ListParams, PaginationMeta};
use crate::core::resource::{Editable, Resource};
use crate::core::validation::FormPayload;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// One page of a list response
///
/// `pagination` is present only when the server answered with the envelope
/// (i.e. the request carried a `page` parameter).
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<PaginationMeta>,
}

/// Result of a bulk create: successes and failures side by side
///
/// Bulk creation is sequential and keeps going past failures, so callers can
/// report exactly which drafts were created and which were refused.
#[derive(Debug, Clone)]
pub struct BulkOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<FailedItem>,
}

/// A draft that was refused during bulk create
#[derive(Debug, Clone)]
pub struct FailedItem {
    pub name: String,
    pub reason: String,
}

impl<T> BulkOutcome<T> {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// HTTP client for the back-office REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url<T: Resource>(&self) -> String {
        format!("{}/api/{}", self.base_url, T::resource_name())
    }

    fn item_url<T: Resource>(&self, id: Uuid) -> String {
        format!("{}/api/{}/{}", self.base_url, T::resource_name(), id)
    }

    /// List resources, with filters, eager loading and optional pagination
    pub async fn list<T>(&self, params: &ListParams) -> Result<ListPage<T>, TransportError>
    where
        T: Resource + DeserializeOwned,
    {
        let response = self
            .http
            .get(self.collection_url::<T>())
            .query(&params.to_pairs())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let body: Value = Self::check::<T>(response).await?.json().await.map_err(|e| {
            TransportError::Network(format!("invalid response body: {}", e))
        })?;

        // Raw array or `{ data, pagination }` envelope
        match body {
            Value::Array(_) => {
                let items = serde_json::from_value(body)
                    .map_err(|e| TransportError::Network(format!("unexpected shape: {}", e)))?;
                Ok(ListPage {
                    items,
                    pagination: None,
                })
            }
            Value::Object(mut object) => {
                let data = object.remove("data").unwrap_or(Value::Array(vec![]));
                let items = serde_json::from_value(data)
                    .map_err(|e| TransportError::Network(format!("unexpected shape: {}", e)))?;
                let pagination = object
                    .remove("pagination")
                    .and_then(|p| serde_json::from_value(p).ok());
                Ok(ListPage { items, pagination })
            }
            _ => Err(TransportError::Network("unexpected shape".to_string())),
        }
    }

    pub async fn get_by_id<T>(&self, id: Uuid) -> Result<T, TransportError>
    where
        T: Resource + DeserializeOwned,
    {
        let response = self
            .http
            .get(self.item_url::<T>(id))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::check::<T>(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::Network(format!("invalid response body: {}", e)))
    }

    pub async fn create<T>(&self, payload: &T::Payload) -> Result<T, TransportError>
    where
        T: Editable,
    {
        let response = self
            .http
            .post(self.collection_url::<T>())
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::check::<T>(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::Network(format!("invalid response body: {}", e)))
    }

    /// Create several resources sequentially, continuing past failures
    pub async fn create_bulk<T>(&self, payloads: Vec<T::Payload>) -> BulkOutcome<T>
    where
        T: Editable,
    {
        let mut outcome = BulkOutcome {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for payload in payloads {
            let name = payload.display_name().to_string();
            match self.create::<T>(&payload).await {
                Ok(created) => outcome.succeeded.push(created),
                Err(e) => {
                    debug!(resource = T::resource_name(), item = %name, error = %e, "bulk item failed");
                    outcome.failed.push(FailedItem {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcome
    }

    pub async fn update<T>(&self, id: Uuid, payload: &T::Payload) -> Result<T, TransportError>
    where
        T: Editable,
    {
        let response = self
            .http
            .put(self.item_url::<T>(id))
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::check::<T>(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::Network(format!("invalid response body: {}", e)))
    }

    pub async fn remove<T>(&self, id: Uuid) -> Result<(), TransportError>
    where
        T: Resource,
    {
        let response = self
            .http
            .delete(self.item_url::<T>(id))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::check::<T>(response).await?;
        Ok(())
    }

    /// Turn a non-2xx response into a transport error with the server's
    /// `error` string, or a generic per-resource fallback
    async fn check<T: Resource>(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("request for {} failed", T::resource_name()),
        };
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Country;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:3000///");
        assert_eq!(
            client.collection_url::<Country>(),
            "http://127.0.0.1:3000/api/countries"
        );
    }

    #[test]
    fn test_item_url_shape() {
        let client = ApiClient::new("http://127.0.0.1:3000");
        let id = Uuid::new_v4();
        assert_eq!(
            client.item_url::<Country>(id),
            format!("http://127.0.0.1:3000/api/countries/{}", id)
        );
    }

    #[test]
    fn test_bulk_outcome_all_succeeded() {
        let outcome: BulkOutcome<Country> = BulkOutcome {
            succeeded: vec![],
            failed: vec![],
        };
        assert!(outcome.all_succeeded());
    }
}

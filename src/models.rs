//! Domain and wire models for the order service.
//!
//! `Order` is both the record handed to the repository and the JSON shape
//! returned by the list endpoints. Inbound payloads go through
//! `CreateOrderRequest` so that missing fields surface as validation errors
//! rather than deserialization failures.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Namespace assigned to orders submitted without one.
pub const DEFAULT_NAMESPACE: &str = "default";

// ============================================================================
// Domain Models
// ============================================================================

/// A purchase record, scoped to a namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub namespace: String,
    pub postal_code: String,
    pub town: String,
    pub total: f64,
}

// ============================================================================
// Request Models (Deserialize from JSON input)
// ============================================================================

/// Request body for creating a new order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    pub order_id: String,
    pub namespace: Option<String>,
    pub postal_code: String,
    pub town: String,
    pub total: f64,
}

impl CreateOrderRequest {
    /// Parse a raw request body.
    ///
    /// Malformed JSON and missing required fields are both reported as
    /// [`ApiError::InvalidInput`].
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|_| ApiError::InvalidInput)
    }

    /// Validate required fields and resolve the namespace.
    pub fn into_order(self) -> Result<Order, ApiError> {
        if self.order_id.is_empty()
            || self.postal_code.is_empty()
            || self.town.is_empty()
            || self.total == 0.0
        {
            return Err(ApiError::InvalidInput);
        }

        // Absent, null and empty namespaces all resolve to the default.
        let namespace = self
            .namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        Ok(Order {
            order_id: self.order_id,
            namespace,
            postal_code: self.postal_code,
            town: self.town,
            total: self.total,
        })
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            order_id: "o1".into(),
            namespace: None,
            postal_code: "12345".into(),
            town: "Metropolis".into(),
            total: 9.99,
        }
    }

    #[test]
    fn parse_accepts_camel_case_payload_without_namespace() {
        let req = CreateOrderRequest::parse(
            br#"{"orderId":"o1","postalCode":"12345","town":"Metropolis","total":9.99}"#,
        )
        .unwrap();

        assert_eq!(req.order_id, "o1");
        assert_eq!(req.namespace, None);
        assert_eq!(req.total, 9.99);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            CreateOrderRequest::parse(b"{\"orderId\":"),
            Err(ApiError::InvalidInput)
        ));
        assert!(matches!(
            CreateOrderRequest::parse(br#"{"total":"many"}"#),
            Err(ApiError::InvalidInput)
        ));
    }

    #[test]
    fn into_order_defaults_namespace() {
        let order = request().into_order().unwrap();
        assert_eq!(
            order,
            Order {
                order_id: "o1".into(),
                namespace: DEFAULT_NAMESPACE.into(),
                postal_code: "12345".into(),
                town: "Metropolis".into(),
                total: 9.99,
            }
        );
    }

    #[test]
    fn into_order_keeps_explicit_namespace() {
        let order = CreateOrderRequest {
            namespace: Some("stage".into()),
            ..request()
        }
        .into_order()
        .unwrap();
        assert_eq!(order.namespace, "stage");
    }

    #[test]
    fn into_order_rejects_missing_required_fields() {
        let cases = [
            CreateOrderRequest {
                order_id: String::new(),
                ..request()
            },
            CreateOrderRequest {
                postal_code: String::new(),
                ..request()
            },
            CreateOrderRequest {
                town: String::new(),
                ..request()
            },
            CreateOrderRequest {
                total: 0.0,
                ..request()
            },
        ];

        for case in cases {
            assert!(matches!(case.into_order(), Err(ApiError::InvalidInput)));
        }
    }

    #[test]
    fn negative_total_is_accepted() {
        let order = CreateOrderRequest {
            total: -5.0,
            ..request()
        }
        .into_order();
        assert!(order.is_ok());
    }

    #[test]
    fn null_and_empty_namespaces_resolve_to_default() {
        for body in [
            r#"{"orderId":"o1","namespace":null,"postalCode":"1","town":"A","total":1}"#,
            r#"{"orderId":"o1","namespace":"","postalCode":"1","town":"A","total":1}"#,
        ] {
            let order = CreateOrderRequest::parse(body.as_bytes())
                .unwrap()
                .into_order()
                .unwrap();
            assert_eq!(order.namespace, DEFAULT_NAMESPACE);
        }
    }

    #[test]
    fn order_serializes_with_camel_case_keys() {
        let order = request().into_order().unwrap();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "orderId": "o1",
                "namespace": "default",
                "postalCode": "12345",
                "town": "Metropolis",
                "total": 9.99
            })
        );
    }
}

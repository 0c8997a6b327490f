//! Typed request and response records for every backend endpoint.
//!
//! Wire format is camelCase JSON (auth records use the backend's
//! snake_case). Unknown keys are dropped on deserialization; optional
//! fields become `None` or empty collections. A body that cannot be read
//! into the record type is rejected by the transport.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// User record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Accept an identifier sent either as a string or as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Response of `POST /login` and `POST /signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: BackendUser,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: f64,
}

/// Response of `GET /analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsData {
    pub total_sales: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub avg_order_value: Option<f64>,
    pub customer_retention: Option<f64>,
    pub sales_trend: Vec<TrendPoint>,
    pub category_breakdown: Vec<CategoryValue>,
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub predicted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
}

/// Response of `POST /forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastData {
    pub revenue_prediction: Option<f64>,
    pub confidence_score: Option<f64>,
    pub peak_period: Option<String>,
    pub forecast_data: Vec<ForecastPoint>,
}

// ---------------------------------------------------------------------------
// Files and uploads
// ---------------------------------------------------------------------------

/// File size as either a byte count or a preformatted label ("2.4 MB").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileSize {
    Bytes(u64),
    Label(String),
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSize::Bytes(n) if *n >= 1_048_576 => {
                write!(f, "{:.1} MB", *n as f64 / 1_048_576.0)
            }
            FileSize::Bytes(n) if *n >= 1024 => write!(f, "{} KB", n / 1024),
            FileSize::Bytes(n) => write!(f, "{n} B"),
            FileSize::Label(label) => f.write_str(label),
        }
    }
}

/// One entry of `GET /files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: FileSize,
    pub uploaded_at: String,
}

/// Response of `POST /upload-sales-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One entry of `GET /reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// A money amount as either a number or a preformatted label ("$45,200").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Money {
    Amount(f64),
    Label(String),
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Money::Amount(value) => write!(f, "${value:.2}"),
            Money::Label(label) => f.write_str(label),
        }
    }
}

/// One customer. Reads `totalSpent`/`spent` and `lastOrder`/`lastPurchase`;
/// when both spellings are present the first one wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireCustomer")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub total_spent: Option<Money>,
    pub last_order: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCustomer {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    status: String,
    #[serde(default)]
    total_spent: Option<Money>,
    #[serde(default)]
    spent: Option<Money>,
    #[serde(default)]
    last_order: Option<String>,
    #[serde(default)]
    last_purchase: Option<String>,
}

impl From<WireCustomer> for Customer {
    fn from(wire: WireCustomer) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            phone: wire.phone,
            status: wire.status,
            total_spent: wire.total_spent.or(wire.spent),
            last_order: wire.last_order.or(wire.last_purchase),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerStats {
    pub total: Option<u64>,
    pub active: Option<u64>,
    pub new_this_month: Option<u64>,
    pub avg_order_value: Option<f64>,
}

/// Response of `GET /customers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerData {
    pub customers: Vec<Customer>,
    pub stats: Option<CustomerStats>,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Success,
    Warning,
    Error,
    #[serde(other)]
    Other,
}

/// One entry of `GET /alerts`.
///
/// Reads `type` or `severity`, and `message` or `description`. When a body
/// carries both spellings, `type` and `message` win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireAlert")]
pub struct AlertItem {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub timestamp: String,
    pub read: bool,
}

#[derive(Deserialize)]
struct WireAlert {
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<AlertSeverity>,
    #[serde(default)]
    severity: Option<AlertSeverity>,
    title: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
    timestamp: String,
    #[serde(default)]
    read: bool,
}

impl TryFrom<WireAlert> for AlertItem {
    type Error = String;

    fn try_from(wire: WireAlert) -> Result<Self, Self::Error> {
        let severity = wire
            .kind
            .or(wire.severity)
            .ok_or_else(|| "missing field `type`".to_string())?;
        let message = wire
            .message
            .or(wire.description)
            .ok_or_else(|| "missing field `message`".to_string())?;

        Ok(Self {
            id: wire.id,
            severity,
            title: wire.title,
            message,
            timestamp: wire.timestamp,
            read: wire.read,
        })
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Response of `POST /llm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub message: Option<String>,
}

impl ChatResponse {
    /// Reply text, preferring `response` over `message`.
    pub fn text(&self) -> Option<&str> {
        self.response.as_deref().or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analytics_tolerates_missing_and_extra_fields() {
        let data: AnalyticsData = serde_json::from_value(json!({
            "totalSales": 10.5,
            "salesTrend": [{"date": "2024-01-01", "value": 3}],
            "somethingNew": true
        }))
        .unwrap();

        assert_eq!(data.total_sales, Some(10.5));
        assert!(data.conversion_rate.is_none());
        assert_eq!(data.sales_trend.len(), 1);
        assert!(data.category_breakdown.is_empty());
    }

    #[test]
    fn test_forecast_rejects_wrong_field_types() {
        let result: Result<ForecastData, _> =
            serde_json::from_value(json!({"forecastData": "soon"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_size_variants() {
        let files: Vec<FileItem> = serde_json::from_value(json!([
            {"id": "1", "name": "a.csv", "type": "CSV", "size": 2048, "uploadedAt": "2024-01-01"},
            {"id": "2", "name": "b.pdf", "type": "PDF", "size": "3.2 MB", "uploadedAt": "2024-01-02"}
        ]))
        .unwrap();

        assert_eq!(files[0].size, FileSize::Bytes(2048));
        assert_eq!(files[0].size.to_string(), "2 KB");
        assert_eq!(files[1].size, FileSize::Label("3.2 MB".into()));
        assert_eq!(files[1].kind, "PDF");
    }

    #[test]
    fn test_customer_aliases() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "1",
            "name": "TechCorp Industries",
            "email": "contact@techcorp.com",
            "status": "Active",
            "spent": "$45,200",
            "lastPurchase": "2024-01-15"
        }))
        .unwrap();

        assert_eq!(customer.total_spent, Some(Money::Label("$45,200".into())));
        assert_eq!(customer.last_order.as_deref(), Some("2024-01-15"));

        let customer: Customer = serde_json::from_value(json!({
            "id": "2", "name": "X", "email": "x@y.z", "status": "Active", "totalSpent": 12.5
        }))
        .unwrap();
        assert_eq!(customer.total_spent, Some(Money::Amount(12.5)));
    }

    #[test]
    fn test_alert_accepts_both_spellings() {
        let alert: AlertItem = serde_json::from_value(json!({
            "id": "1",
            "severity": "warning",
            "title": "Customer At Risk",
            "description": "No purchase in 70 days",
            "timestamp": "2024-01-30"
        }))
        .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.message, "No purchase in 70 days");
        assert!(!alert.read);

        let alert: AlertItem = serde_json::from_value(json!({
            "id": "2",
            "type": "critical",
            "title": "t",
            "message": "m",
            "timestamp": "2024-01-30",
            "read": true
        }))
        .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Other);
        assert!(alert.read);
    }

    #[test]
    fn test_alert_with_both_spellings_prefers_type_and_message() {
        let alert: AlertItem = serde_json::from_value(json!({
            "id": "3",
            "type": "error",
            "severity": "info",
            "title": "t",
            "message": "primary",
            "description": "secondary",
            "timestamp": "2024-01-30"
        }))
        .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Error);
        assert_eq!(alert.message, "primary");

        let missing: Result<AlertItem, _> = serde_json::from_value(json!({
            "id": "4", "title": "t", "message": "m", "timestamp": "now"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_customer_with_both_spellings_prefers_canonical() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "1", "name": "X", "email": "x@y.z", "status": "Active",
            "totalSpent": 10.0, "spent": "$99",
            "lastOrder": "2024-02-01", "lastPurchase": "2023-01-01"
        }))
        .unwrap();
        assert_eq!(customer.total_spent, Some(Money::Amount(10.0)));
        assert_eq!(customer.last_order.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_auth_response_null_full_name() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "access_token": "t1",
            "token_type": "bearer",
            "user": {"id": "1", "email": "a@b.com", "full_name": null}
        }))
        .unwrap();
        assert_eq!(resp.access_token, "t1");
        assert!(resp.user.full_name.is_none());
    }

    #[test]
    fn test_numeric_user_id_is_coerced() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "access_token": "t1",
            "user": {"id": 42, "email": "a@b.com"}
        }))
        .unwrap();
        assert_eq!(resp.user.id, "42");

        let result: Result<BackendUser, _> =
            serde_json::from_value(json!({"id": true, "email": "a@b.com"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_text_preference() {
        let chat = ChatResponse {
            response: None,
            message: Some("hi".into()),
        };
        assert_eq!(chat.text(), Some("hi"));

        let chat = ChatResponse {
            response: Some("a".into()),
            message: Some("b".into()),
        };
        assert_eq!(chat.text(), Some("a"));
    }
}

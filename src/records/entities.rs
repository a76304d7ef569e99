//! Console entities as returned by the admin API
//!
//! Identifiers accept both `id` and the API's `_id` spelling. Field names
//! seen by the list pipeline are the API's camelCase names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::listing::{FieldValue, Record};

/// Closed string enums used by the entities' status/type columns
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl From<$name> for FieldValue {
            fn from(value: $name) -> Self {
                FieldValue::Text(value.as_str().to_string())
            }
        }
    };
}

label_enum!(UserStatus { Active => "active", Inactive => "inactive", Banned => "banned" });
label_enum!(UserRole { Admin => "admin", User => "user" });
label_enum!(OrderType { Buy => "buy", Sell => "sell" });
label_enum!(OrderStatus {
    Pending => "pending",
    Completed => "completed",
    Cancelled => "cancelled",
    Failed => "failed",
});
label_enum!(CommissionType { Referral => "referral", Trading => "trading", Other => "other" });
label_enum!(CommissionStatus { Pending => "pending", Paid => "paid", Cancelled => "cancelled" });
label_enum!(ProfitType { Trading => "trading", Investment => "investment", Other => "other" });
label_enum!(ProfitStatus { Pending => "pending", Confirmed => "confirmed", Cancelled => "cancelled" });
label_enum!(LogLevel { Error => "error", Warning => "warning", Info => "info" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    const FIELDS: [&'static str; 7] = ["id", "username", "email", "status", "role", "createdAt", "updatedAt"];
}

impl Record for User {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "username" => self.username.as_str().into(),
            "email" => self.email.as_str().into(),
            "status" => self.status.into(),
            "role" => self.role.into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        Self::FIELDS.iter().filter_map(|f| self.field(f)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub price: f64,
    pub amount: f64,
    /// Missing totals are derived from `price * amount`
    #[serde(default)]
    pub total_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    const FIELDS: [&'static str; 8] = ["id", "userId", "type", "status", "price", "amount", "totalAmount", "createdAt"];

    pub fn total(&self) -> f64 {
        self.total_amount.unwrap_or(self.price * self.amount)
    }
}

impl Record for Order {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "userId" => self.user_id.as_str().into(),
            "type" => self.order_type.into(),
            "status" => self.status.into(),
            "price" => self.price.into(),
            "amount" => self.amount.into(),
            "totalAmount" => self.total().into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        Self::FIELDS.iter().filter_map(|f| self.field(f)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: CommissionType,
    pub status: CommissionStatus,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Commission {
    const FIELDS: [&'static str; 10] = [
        "id", "userId", "username", "amount", "currency", "type", "status", "description", "createdAt", "updatedAt",
    ];
}

impl Record for Commission {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "userId" => self.user_id.as_str().into(),
            "username" => self.username.as_str().into(),
            "amount" => self.amount.into(),
            "currency" => self.currency.as_str().into(),
            "type" => self.kind.into(),
            "status" => self.status.into(),
            "description" => self.description.as_str().into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        Self::FIELDS.iter().filter_map(|f| self.field(f)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profit {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: ProfitType,
    pub status: ProfitStatus,
    #[serde(default)]
    pub description: String,
    pub profit_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profit {
    const FIELDS: [&'static str; 11] = [
        "id", "userId", "username", "amount", "currency", "type", "status", "description", "profitRate",
        "createdAt", "updatedAt",
    ];
}

impl Record for Profit {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "userId" => self.user_id.as_str().into(),
            "username" => self.username.as_str().into(),
            "amount" => self.amount.into(),
            "currency" => self.currency.as_str().into(),
            "type" => self.kind.into(),
            "status" => self.status.into(),
            "description" => self.description.as_str().into(),
            "profitRate" => self.profit_rate.into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        Self::FIELDS.iter().filter_map(|f| self.field(f)).collect()
    }
}

/// Withdrawal awaiting review. Status stays free text: the review page
/// writes whatever the approve/reject action sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WithdrawalRequest {
    const FIELDS: [&'static str; 6] = ["id", "userId", "amount", "status", "createdAt", "updatedAt"];
}

impl Record for WithdrawalRequest {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "userId" => self.user_id.as_str().into(),
            "amount" => self.amount.into(),
            "status" => self.status.as_str().into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        Self::FIELDS.iter().filter_map(|f| self.field(f)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Record for LogEntry {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "level" => self.level.into(),
            "message" => self.message.as_str().into(),
            "timestamp" => self.timestamp.into(),
            _ => return None,
        })
    }

    fn field_values(&self) -> Vec<FieldValue> {
        ["id", "level", "message", "timestamp"]
            .iter()
            .filter_map(|f| self.field(f))
            .collect()
    }
}

//! Incrementally edited entity forms
//!
//! A draft collects optional fields as the operator fills in a form and
//! only becomes an entity through `finalize`, which validates everything.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::entities::{Order, OrderStatus, OrderType, User, UserRole, UserStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DraftError> {
    value.ok_or(DraftError::Missing(field))
}

/// User create/edit form
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    id: Option<String>,
    username: Option<String>,
    email: Option<String>,
    status: Option<UserStatus>,
    role: Option<UserRole>,
    created_at: Option<DateTime<Utc>>,
}

impl UserDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing user, for the edit dialog
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            status: Some(user.status),
            role: Some(user.role),
            created_at: Some(user.created_at),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Validate and build. New users default to active, non-admin accounts.
    pub fn finalize(self, now: DateTime<Utc>) -> Result<User, DraftError> {
        let id = required(self.id, "id")?;
        let username = required(self.username, "username")?.trim().to_string();
        if username.is_empty() {
            return Err(DraftError::Invalid { field: "username", reason: "must not be blank".into() });
        }

        let email = required(self.email, "email")?.trim().to_string();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(DraftError::Invalid {
                    field: "email",
                    reason: format!("'{}' is not an email address", email),
                })
            }
        }

        Ok(User {
            id,
            username,
            email,
            status: self.status.unwrap_or(UserStatus::Active),
            role: self.role.unwrap_or(UserRole::User),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        })
    }
}

/// Order create/edit form
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    id: Option<String>,
    user_id: Option<String>,
    order_type: Option<OrderType>,
    status: Option<OrderStatus>,
    price: Option<f64>,
    amount: Option<f64>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Validate and build; the total is fixed at `price * amount`
    pub fn finalize(self, now: DateTime<Utc>) -> Result<Order, DraftError> {
        let price = required(self.price, "price")?;
        let amount = required(self.amount, "amount")?;
        for (field, value) in [("price", price), ("amount", amount)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DraftError::Invalid { field, reason: format!("must be > 0, got {}", value) });
            }
        }

        Ok(Order {
            id: required(self.id, "id")?,
            user_id: required(self.user_id, "userId")?,
            order_type: required(self.order_type, "type")?,
            status: self.status.unwrap_or(OrderStatus::Pending),
            price,
            amount,
            total_amount: Some(price * amount),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_user_defaults() {
        let user = UserDraft::new()
            .id("u9")
            .username("  erin ")
            .email("erin@desk.io")
            .finalize(now())
            .unwrap();
        assert_eq!(user.username, "erin");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.created_at, now());
    }

    #[test]
    fn test_user_validation() {
        assert_eq!(
            UserDraft::new().id("u1").email("a@b.io").finalize(now()).unwrap_err(),
            DraftError::Missing("username")
        );
        let err = UserDraft::new().id("u1").username("x").email("nope").finalize(now()).unwrap_err();
        assert!(matches!(err, DraftError::Invalid { field: "email", .. }));
    }

    #[test]
    fn test_edit_keeps_created_at() {
        let original = UserDraft::new().id("u1").username("a").email("a@b.io").finalize(now()).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let edited = UserDraft::from_user(&original).status(UserStatus::Banned).finalize(later).unwrap();
        assert_eq!(edited.created_at, now());
        assert_eq!(edited.updated_at, later);
        assert_eq!(edited.status, UserStatus::Banned);
    }

    #[test]
    fn test_order_draft() {
        let order = OrderDraft::new()
            .id("o1")
            .user_id("u1")
            .order_type(OrderType::Sell)
            .price(20.0)
            .amount(1.5)
            .finalize(now())
            .unwrap();
        assert_eq!(order.total_amount, Some(30.0));
        assert_eq!(order.status, OrderStatus::Pending);

        let err = OrderDraft::new().id("o2").user_id("u1").order_type(OrderType::Buy).price(0.0).amount(1.0)
            .finalize(now())
            .unwrap_err();
        assert!(matches!(err, DraftError::Invalid { field: "price", .. }));
    }
}

use super::flag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Business configuration for clients, bookings, payments and related things.
///
/// # Model Binding
/// This struct implements the [`ApiModel`](model_binding::ApiModel) trait
/// (see [`crate::business_config`]) and is loaded with GET only:
/// `k_business` is sent, `a_business_policy` and `is_location_select` come back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// All business policies connected to clients and bookings.
    pub a_business_policy: Option<BusinessPolicy>,
    /// Whether staff members should select a location at checkout.
    #[serde(default, deserialize_with = "flag::deserialize_option")]
    pub is_location_select: Option<bool>,
    /// Key of the business.
    pub k_business: String,
}

impl BusinessConfig {
    /// Creates an unloaded config for `k_business`.
    pub fn new(k_business: impl Into<String>) -> Self {
        Self {
            k_business: k_business.into(),
            ..Self::default()
        }
    }

    /// `true` once a GET has populated the policy.
    pub fn is_loaded(&self) -> bool {
        self.a_business_policy.is_some()
    }
}

/// Client and booking policies of a business.
///
/// Values are passed through as the server sends them; durations are counts of the
/// unit given by the matching `id_*` field (hours, days or months). Keys this struct
/// does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessPolicy {
    /// Service ID → whether wait listing is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_wait_service: Option<Value>,
    /// Minimum time before a class can be booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_book_before: Option<i64>,
    /// Maximum time ahead a class can be booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_book_future: Option<i64>,
    /// Minimum time before a class can be canceled without penalty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_cancel: Option<i64>,
    /// Minimum time before a class can be promoted from a wait list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_promote: Option<i64>,
    /// Number of failed auto-payment reattempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_reattempt_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_book_before: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_book_future: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_cancel: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_promote: Option<i64>,
    /// Clients may only book inside their current paid period.
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_book_inside_active_pay_period: Option<bool>,
    /// A failed auto-payment deactivates the Purchase Option instead of debiting.
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_disable_promotion: Option<bool>,
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_enable_payment_penalty: Option<bool>,
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_enable_payment_reattempt: Option<bool>,
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_enable_staff_ip_restriction: Option<bool>,
    /// Booking is disabled for clients with a negative balance.
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_prevent_booking: Option<bool>,
    /// Clients can't choose a provider in the appointment wizard.
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_staff_restrict: Option<bool>,
    #[serde(
        default,
        deserialize_with = "flag::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_wait: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_currency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_timezone: Option<Value>,
    /// Penalty charged after the final auto-payment attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m_payment_penalty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_custom: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

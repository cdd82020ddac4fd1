//! The payment resource.

use bon::Builder;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    confirmation::Confirmation,
    errors::Result,
    item::Receipt,
    metadata::{INVOICE_ID, Metadata},
    payment_method::{
        BasePaymentMethod, PaymentMethod, PaymentMethodType, PaymentMethodWithCard,
        SbpPaymentMethod,
    },
    resolve::{Variant, extract_str, resolve_optional},
    types::{Amount, Record, serialize_optional_description},
};

/// Key of the confirmation token inside an embedded confirmation.
pub const CONFIRMATION_TOKEN: &str = "confirmation_token";

/// Status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    WaitingForCapture,
    Succeeded,
    Canceled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::WaitingForCapture => "waiting_for_capture",
            Status::Succeeded => "succeeded",
            Status::Canceled => "canceled",
        }
    }

    /// Whether the payment can no longer change status.
    pub fn is_final(&self) -> bool {
        matches!(self, Status::Succeeded | Status::Canceled)
    }
}

/// The store a payment is credited to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub account_id: String,
    pub gateway_id: String,
}

/// Who canceled a payment and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub party: String,
    pub reason: String,
}

/// Result of the 3-D Secure check of a card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecure {
    pub applied: bool,
}

/// Card authorization details of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDetails {
    /// Retrieval reference number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_secure: Option<ThreeDSecure>,
}

/// Part of a payment credited to one store of a marketplace.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    #[builder(into)]
    pub account_id: String,

    pub amount: Amount,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Commission kept by the marketplace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fee_amount: Option<Amount>,

    #[builder(into)]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_description"
    )]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Payout or fee settled within a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    #[serde(rename = "type")]
    pub settlement_type: String,
    pub amount: Amount,
}

/// The safe deal a payment belongs to.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    #[builder(into)]
    pub id: String,

    #[builder(default)]
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// A payment, as created by the merchant and returned by the API.
///
/// The polymorphic fields `payment_method`, `confirmation` and `metadata` stay in their
/// raw form after decoding; use the accessors below to materialize a typed view.
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    /// Amount credited to the store after the commission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Amount>,

    /// Capture the payment automatically once the user pays.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub capture: bool,

    /// Shown to the user during checkout; cut to 128 characters when serialized.
    #[builder(into)]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_description"
    )]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// ID of a saved payment method to charge.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub save_payment_method: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Deadline for capturing or canceling a `waiting_for_capture` payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub test: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub paid: bool,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refundable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_registration: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<AuthorizationDetails>,

    /// How the payment is split between marketplace stores.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<Transfer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<Deal>,

    /// Customer identifier in the merchant's system, such as an email or phone number.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

impl Payment {
    /// Resolve the payment method into the variant `V`.
    pub fn resolve_payment_method<V>(&self) -> Result<V>
    where
        V: Variant<Family = PaymentMethod>,
    {
        resolve_optional(self.payment_method.as_ref())
    }

    /// Resolve the confirmation into the variant `V`.
    pub fn resolve_confirmation<V>(&self) -> Result<V>
    where
        V: Variant<Family = Confirmation>,
    {
        resolve_optional(self.confirmation.as_ref())
    }

    pub fn base_payment_method(&self) -> Result<BasePaymentMethod> {
        self.resolve_payment_method()
    }

    pub fn payment_method_with_card(&self) -> Result<PaymentMethodWithCard> {
        self.resolve_payment_method()
    }

    /// The SBP view of the payment method; fails unless its `type` is `sbp`.
    pub fn sbp_payment_method(&self) -> Result<SbpPaymentMethod> {
        self.resolve_payment_method()
    }

    /// Token for the embedded checkout widget.
    pub fn confirmation_token(&self) -> Result<String> {
        extract_str(self.confirmation.as_ref(), CONFIRMATION_TOKEN)
    }

    /// Merchant invoice ID carried in the metadata.
    pub fn invoice_id(&self) -> Result<String> {
        extract_str(self.metadata.as_ref(), INVOICE_ID)
    }
}

/// One page of payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentList {
    #[serde(rename = "type", default)]
    pub list_type: String,

    #[serde(default)]
    pub items: Vec<Payment>,

    /// Cursor of the next page, absent on the last one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Filter for listing payments.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentListFilter {
    pub status: Option<Status>,
    pub payment_method: Option<PaymentMethodType>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lt: Option<DateTime<Utc>>,
    /// Page size, 1 to 100.
    pub limit: Option<u8>,
    #[builder(into)]
    pub cursor: Option<String>,
}

impl PaymentListFilter {
    /// Query parameters as the API expects them.
    pub fn to_params(&self) -> Record<String> {
        let mut params = Record::new();
        if let Some(status) = self.status {
            params.insert("status".to_owned(), status.as_str().to_owned());
        }
        if let Some(method) = &self.payment_method {
            params.insert("payment_method".to_owned(), method.to_string());
        }
        if let Some(gte) = self.created_at_gte {
            params.insert(
                "created_at.gte".to_owned(),
                gte.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        if let Some(lt) = self.created_at_lt {
            params.insert(
                "created_at.lt".to_owned(),
                lt.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_owned(), limit.to_string());
        }
        if let Some(cursor) = &self.cursor {
            params.insert("cursor".to_owned(), cursor.to_owned());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::{errors::Error, types::MAX_DESCRIPTION_LENGTH};

    fn sample_response() -> serde_json::Value {
        json!({
            "id": "2419a771-000f-5000-9000-1edaf29243f2",
            "status": "pending",
            "paid": false,
            "amount": { "value": "100.00", "currency": "RUB" },
            "confirmation": {
                "type": "embedded",
                "confirmation_token": "ct-2419a771-000f-5000-9000-1edaf29243f2"
            },
            "created_at": "2018-07-10T14:27:54.691Z",
            "description": "Order No. 72",
            "metadata": { "invoice_id": "inv-72" },
            "payment_method": {
                "type": "sbp",
                "id": "2419a771-000f-5000-9000-1edaf29243f2",
                "saved": false
            },
            "recipient": { "account_id": "100001", "gateway_id": "1000001" },
            "refundable": false,
            "test": false
        })
    }

    #[test]
    fn decodes_api_response() {
        let payment: Payment = serde_json::from_value(sample_response()).unwrap();

        assert_eq!(payment.status, Some(Status::Pending));
        assert_eq!(payment.amount, Some(Amount::rub("100.00")));
        assert_eq!(
            payment.created_at,
            Some(Utc.with_ymd_and_hms(2018, 7, 10, 14, 27, 54).unwrap()
                + chrono::Duration::milliseconds(691))
        );
        assert!(matches!(payment.payment_method, Some(PaymentMethod::Raw(_))));
        assert!(matches!(payment.confirmation, Some(Confirmation::Raw(_))));
    }

    #[test]
    fn marketplace_and_authorization_fields_survive_re_encoding() {
        let extra = json!({
            "authorization_details": {
                "rrn": "603668680243",
                "auth_code": "000000",
                "three_d_secure": { "applied": true }
            },
            "transfers": [{
                "account_id": "123",
                "amount": { "value": "90.00", "currency": "RUB" },
                "status": "succeeded",
                "platform_fee_amount": { "value": "10.00", "currency": "RUB" },
                "metadata": { "order": "72" }
            }],
            "deal": {
                "id": "dl-2e6b6e14-0015-5000-9000-1a3b1d1c4ec8",
                "settlements": [{
                    "type": "payout",
                    "amount": { "value": "80.00", "currency": "RUB" }
                }]
            }
        });
        let mut response = sample_response();
        for (key, value) in extra.as_object().unwrap() {
            response[key] = value.clone();
        }

        let payment: Payment = serde_json::from_value(response).unwrap();
        let details = payment.authorization_details.as_ref().unwrap();
        assert_eq!(details.rrn.as_deref(), Some("603668680243"));
        assert_eq!(payment.transfers[0].status, Some(Status::Succeeded));
        assert_eq!(payment.deal.as_ref().unwrap().settlements[0].settlement_type, "payout");

        let encoded = serde_json::to_value(&payment).unwrap();
        for key in ["authorization_details", "transfers", "deal"] {
            assert_eq!(encoded[key], extra[key], "{key} changed on re-encoding");
        }
    }

    #[test]
    fn accessors_resolve_polymorphic_fields() {
        let payment: Payment = serde_json::from_value(sample_response()).unwrap();

        assert_eq!(
            payment.confirmation_token().unwrap(),
            "ct-2419a771-000f-5000-9000-1edaf29243f2"
        );
        assert_eq!(payment.invoice_id().unwrap(), "inv-72");
        assert_eq!(
            payment.sbp_payment_method().unwrap().base.method_type,
            PaymentMethodType::Sbp
        );
        assert_eq!(
            payment.base_payment_method().unwrap().method_type,
            PaymentMethodType::Sbp
        );
    }

    #[test]
    fn confirmation_token_failures_are_distinct() {
        let with_confirmation = |confirmation: serde_json::Value| Payment {
            confirmation: Some(Confirmation::Raw(confirmation)),
            ..Payment::default()
        };

        assert!(matches!(
            with_confirmation(json!({ "confirmation_token": "" })).confirmation_token(),
            Err(Error::FieldEmpty { .. })
        ));
        assert!(matches!(
            with_confirmation(json!({})).confirmation_token(),
            Err(Error::FieldMissing { .. })
        ));
        assert!(matches!(
            with_confirmation(json!({ "confirmation_token": 42 })).confirmation_token(),
            Err(Error::FieldTypeMismatch { .. })
        ));
        assert_eq!(
            with_confirmation(json!({ "confirmation_token": "tok_1" }))
                .confirmation_token()
                .unwrap(),
            "tok_1"
        );
        assert!(matches!(
            Payment::default().confirmation_token(),
            Err(Error::ShapeUnsupported { shape: "null" })
        ));
    }

    #[test]
    fn card_payment_is_not_an_sbp_payment() {
        let payment = Payment {
            payment_method: Some(PaymentMethod::Raw(json!({
                "type": "bank_card",
                "id": "pm-1",
                "saved": false
            }))),
            ..Payment::default()
        };

        assert!(matches!(
            payment.sbp_payment_method(),
            Err(Error::DiscriminatorMismatch { .. })
        ));
        assert!(payment.payment_method_with_card().is_ok());
    }

    #[test]
    fn create_request_serializes_only_set_fields() {
        let payment = Payment::builder()
            .amount(Amount::rub("2.00"))
            .capture(true)
            .description("Order No. 72")
            .confirmation(Confirmation::redirect("https://shop.example/return"))
            .metadata(Metadata::from_entries([("invoice_id", "inv-72")]).unwrap())
            .build();

        assert_eq!(
            serde_json::to_value(&payment).unwrap(),
            json!({
                "amount": { "value": "2.00", "currency": "RUB" },
                "capture": true,
                "description": "Order No. 72",
                "confirmation": { "type": "redirect", "return_url": "https://shop.example/return" },
                "metadata": { "invoice_id": "inv-72" }
            })
        );
    }

    #[test]
    fn payment_description_is_truncated_on_serialization() {
        let payment = Payment::builder().description("€".repeat(130)).build();
        let value = serde_json::to_value(&payment).unwrap();

        assert_eq!(
            value["description"].as_str().unwrap().chars().count(),
            MAX_DESCRIPTION_LENGTH
        );
        assert_eq!(payment.description.unwrap().chars().count(), 130);
    }

    #[test]
    fn list_filter_builds_query_params() {
        let filter = PaymentListFilter::builder()
            .status(Status::Succeeded)
            .payment_method(PaymentMethodType::Sbp)
            .created_at_gte(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .limit(50)
            .cursor("next-page")
            .build();
        let params = filter.to_params();

        assert_eq!(params["status"], "succeeded");
        assert_eq!(params["payment_method"], "sbp");
        assert_eq!(params["created_at.gte"], "2024-01-01T00:00:00.000Z");
        assert_eq!(params["limit"], "50");
        assert_eq!(params["cursor"], "next-page");
        assert!(!params.contains_key("created_at.lt"));
    }

    #[test]
    fn decodes_payment_list() {
        let list: PaymentList = serde_json::from_value(json!({
            "type": "list",
            "items": [sample_response()],
            "next_cursor": "37a5c87d-3984-51e8-a7f3-8de646d39ec15"
        }))
        .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.next_cursor.as_deref(), Some("37a5c87d-3984-51e8-a7f3-8de646d39ec15"));
    }
}

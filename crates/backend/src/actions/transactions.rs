//! Money movement and history.
//!
//! The four peer transfers share one shape (counterparty phone, amount, PIN)
//! and differ only in endpoint and the name of the counterparty field.

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use mfs_core::{Amount, PhoneNumber, Pin, ResourceId, ValidationError, required_text};

use crate::{ActionResult, BackendClient};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferKind {
    /// Consumer to consumer.
    SendMoney,
    /// Consumer withdraws through an agent.
    CashOut,
    /// Agent deposits into a consumer wallet.
    CashIn,
    /// Consumer mobile recharge.
    TopUp,
}

impl TransferKind {
    fn endpoint(self) -> &'static str {
        match self {
            TransferKind::SendMoney => "/transactions/send-money",
            TransferKind::CashOut => "/transactions/cash-out",
            TransferKind::CashIn => "/transactions/cash-in",
            TransferKind::TopUp => "/transactions/top-up",
        }
    }

    fn counterparty_field(self) -> &'static str {
        match self {
            TransferKind::SendMoney => "receiverPhone",
            TransferKind::CashOut => "agentPhone",
            TransferKind::CashIn => "consumerPhone",
            TransferKind::TopUp => "phone",
        }
    }
}

/// Transfer form as posted by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferForm {
    pub phone: String,
    pub amount: u64,
    pub pin: String,
}

struct TransferRequest {
    kind: TransferKind,
    phone: PhoneNumber,
    amount: Amount,
    pin: Pin,
}

impl Serialize for TransferRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.kind.counterparty_field(), &self.phone)?;
        map.serialize_entry("amount", &self.amount)?;
        map.serialize_entry("pin", &self.pin)?;
        map.end()
    }
}

impl TransferForm {
    fn validated(&self, kind: TransferKind) -> Result<TransferRequest, ValidationError> {
        Ok(TransferRequest {
            kind,
            phone: PhoneNumber::parse(&self.phone)?,
            amount: Amount::new(self.amount)?,
            pin: Pin::parse(&self.pin)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayBillForm {
    pub biller_id: String,
    pub account_number: String,
    pub amount: u64,
    pub pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayBillRequest {
    biller_id: ResourceId,
    account_number: String,
    amount: Amount,
    pin: Pin,
}

/// History filter; `kind` maps to the backend's `type` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl HistoryQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.unwrap_or(1).max(1).to_string())];
        if let Some(kind) = self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            pairs.push(("type", kind.to_string()));
        }
        pairs
    }
}

pub async fn transfer(
    client: &BackendClient,
    token: &str,
    kind: TransferKind,
    form: &TransferForm,
) -> ActionResult<Value> {
    let body = form.validated(kind)?;
    Ok(client.post(kind.endpoint(), Some(token), &body).await?)
}

pub async fn pay_bill(client: &BackendClient, token: &str, form: &PayBillForm) -> ActionResult<Value> {
    let body = PayBillRequest {
        biller_id: ResourceId::parse(&form.biller_id)?,
        account_number: required_text("account_number", &form.account_number)?,
        amount: Amount::new(form.amount)?,
        pin: Pin::parse(&form.pin)?,
    };
    Ok(client.post("/transactions/pay-bill", Some(token), &body).await?)
}

pub async fn history(client: &BackendClient, token: &str, query: &HistoryQuery) -> ActionResult<Value> {
    Ok(client
        .get_with_query("/transactions/me", Some(token), &query.to_pairs())
        .await?)
}

/// Incoming payments for a business account.
pub async fn received_payments(client: &BackendClient, token: &str, page: Option<u32>) -> ActionResult<Value> {
    let query = HistoryQuery {
        page,
        kind: Some("payment".to_string()),
    };
    history(client, token, &query).await
}

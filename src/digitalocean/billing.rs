use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanBillingClient: Send + Sync {
    fn get_balance(&self) -> Result<Balance, Error>;

    fn get_billing_history(&self) -> Result<Vec<BillingHistoryEntry>, Error>;

    fn get_invoices(&self) -> Result<Vec<Invoice>, Error>;

    fn get_invoice_items(&self, invoice_uuid: &str) -> Result<Vec<InvoiceItem>, Error>;

    fn get_invoice_csv(&self, invoice_uuid: &str) -> Result<String, Error>;

    fn get_invoice_pdf(&self, invoice_uuid: &str) -> Result<Vec<u8>, Error>;

    fn get_invoice_summary(&self, invoice_uuid: &str) -> Result<InvoiceSummary, Error>;
}

pub struct DigitalOceanBillingClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanBillingClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanBillingClientImpl {
        DigitalOceanBillingClientImpl { api }
    }
}

impl DigitalOceanBillingClient for DigitalOceanBillingClientImpl {
    /// Current balance and month-to-date usage. This endpoint has no envelope.
    fn get_balance(&self) -> Result<Balance, Error> {
        self.api.get_bare("customers/my/balance")
    }

    fn get_billing_history(&self) -> Result<Vec<BillingHistoryEntry>, Error> {
        self.api
            .get("customers/my/billing_history", &[], "billing_history")
    }

    fn get_invoices(&self) -> Result<Vec<Invoice>, Error> {
        self.api.get("customers/my/invoices", &[], "invoices")
    }

    fn get_invoice_items(&self, invoice_uuid: &str) -> Result<Vec<InvoiceItem>, Error> {
        self.api.get(
            format!("customers/my/invoices/{invoice_uuid}").as_str(),
            &[],
            "invoice_items",
        )
    }

    /// The invoice rendered as CSV, returned verbatim.
    fn get_invoice_csv(&self, invoice_uuid: &str) -> Result<String, Error> {
        self.api
            .get_text(format!("customers/my/invoices/{invoice_uuid}/csv").as_str())
    }

    /// The invoice rendered as a PDF document.
    fn get_invoice_pdf(&self, invoice_uuid: &str) -> Result<Vec<u8>, Error> {
        self.api
            .get_bytes(format!("customers/my/invoices/{invoice_uuid}/pdf").as_str())
    }

    fn get_invoice_summary(&self, invoice_uuid: &str) -> Result<InvoiceSummary, Error> {
        self.api
            .get_bare(format!("customers/my/invoices/{invoice_uuid}/summary").as_str())
    }
}

// /v2/customers/my/balance

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Balance {
    /// Balance as of the generated_at time. This value includes the account_balance and
    /// month_to_date_usage.
    pub month_to_date_balance: String,
    /// Current balance of the customer's most recent billing activity. Does not reflect
    /// month_to_date_usage.
    pub account_balance: String,
    /// Amount used in the current billing period as of the generated_at time.
    pub month_to_date_usage: String,
    /// The time at which balances were most recently generated.
    pub generated_at: String,
}

// /v2/customers/my/billing_history

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct BillingHistoryEntry {
    /// Description of the billing history entry.
    pub description: String,
    /// Amount of the billing history entry.
    pub amount: String,
    /// ID of the invoice associated with the billing history entry, if applicable.
    pub invoice_id: Option<String>,
    /// UUID of the invoice associated with the billing history entry, if applicable.
    pub invoice_uuid: Option<String>,
    /// Time the billing history entry occurred.
    pub date: String,
    /// Type of billing history entry. (Enum: "ACHFailure" "Adjustment" "AttemptFailed"
    /// "Chargeback" "Credit" "CreditExpiration" "Invoice" "Payment" "Refund" "Reversal")
    #[serde(rename = "type")]
    pub typ: String,
}

// /v2/customers/my/invoices

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Invoice {
    /// The UUID of the invoice. The canonical reference for the invoice.
    pub invoice_uuid: String,
    /// Total amount of the invoice, in USD. This will reflect month-to-date usage in the invoice
    /// preview.
    pub amount: String,
    /// Billing period of usage for which the invoice is issued, in YYYY-MM format.
    pub invoice_period: String,
    /// Time the invoice was last updated.
    pub updated_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct InvoiceItem {
    /// Name of the product being billed in the invoice item.
    pub product: String,
    /// ID of the resource billing in the invoice item if available.
    pub resource_id: Option<String>,
    /// UUID of the resource billing in the invoice item if available.
    pub resource_uuid: Option<String>,
    /// Description of the invoice item when it is a grouped set of billable resources.
    pub group_description: Option<String>,
    /// Description of the invoice item.
    pub description: String,
    /// Billed amount of this invoice item. Billed in USD.
    pub amount: String,
    /// Duration of time this invoice item was used and subsequently billed.
    pub duration: Option<String>,
    /// Unit of time for duration.
    pub duration_unit: Option<String>,
    /// Time the invoice item began to be billed for usage.
    pub start_time: Option<String>,
    /// Time the invoice item stopped being billed for usage.
    pub end_time: Option<String>,
    /// Name of the DigitalOcean Project this resource belongs to.
    pub project_name: Option<String>,
}

// /v2/customers/my/invoices/[uuid]/summary

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct InvoiceSummary {
    pub invoice_uuid: String,
    /// Billing period of usage for which the invoice is issued, in YYYY-MM format.
    pub billing_period: String,
    /// Total amount of the invoice, in USD.
    pub amount: String,
    /// Name of the DigitalOcean customer being invoiced.
    pub user_name: Option<String>,
    /// Company of the DigitalOcean customer being invoiced, if set.
    pub user_company: Option<String>,
    /// Email of the DigitalOcean customer being invoiced.
    pub user_email: Option<String>,
    pub product_charges: Option<InvoiceChargeGroup>,
    pub overages: Option<InvoiceCharge>,
    pub taxes: Option<InvoiceCharge>,
    pub credits_and_adjustments: Option<InvoiceCharge>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct InvoiceChargeGroup {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub items: Vec<InvoiceChargeItem>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct InvoiceChargeItem {
    pub name: String,
    pub amount: String,
    /// Number of billed resources of this product.
    pub count: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct InvoiceCharge {
    pub name: String,
    pub amount: String,
}

//! Procurement report model
//!
//! A `ProcurementReport` is the hand-off between the data-assembly side of
//! buyer (database queries, filtering) and the renderers. Every section is an
//! ordered list of flat records; renderers never look past the fields defined
//! here.
//!
//! Money and exchange rates are kept as [`Decimal`] so their scale survives
//! rendering untouched (`1234.50` never becomes `1234.5`).

use crate::UnknownSection;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Sections
// ============================================================================

/// The sections a procurement report can contain, in canonical sheet order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSection {
    Summary,
    Suppliers,
    Quotes,
    PurchaseOrders,
    Approvals,
    Deliveries,
    Invoices,
    ForexRates,
}

impl ReportSection {
    /// All sections in canonical order
    pub const ALL: [ReportSection; 8] = [
        ReportSection::Summary,
        ReportSection::Suppliers,
        ReportSection::Quotes,
        ReportSection::PurchaseOrders,
        ReportSection::Approvals,
        ReportSection::Deliveries,
        ReportSection::Invoices,
        ReportSection::ForexRates,
    ];

    /// Human-readable title, used as the worksheet tab name
    pub fn title(self) -> &'static str {
        match self {
            ReportSection::Summary => "Summary",
            ReportSection::Suppliers => "Suppliers",
            ReportSection::Quotes => "Quotes",
            ReportSection::PurchaseOrders => "Purchase Orders",
            ReportSection::Approvals => "Approvals",
            ReportSection::Deliveries => "Deliveries",
            ReportSection::Invoices => "Invoices",
            ReportSection::ForexRates => "Forex Rates",
        }
    }

    /// Command-line name (kebab-case)
    pub fn name(self) -> &'static str {
        match self {
            ReportSection::Summary => "summary",
            ReportSection::Suppliers => "suppliers",
            ReportSection::Quotes => "quotes",
            ReportSection::PurchaseOrders => "purchase-orders",
            ReportSection::Approvals => "approvals",
            ReportSection::Deliveries => "deliveries",
            ReportSection::Invoices => "invoices",
            ReportSection::ForexRates => "forex-rates",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        // "vendors" is the historical name for suppliers
        if needle == "vendors" {
            return Ok(ReportSection::Suppliers);
        }
        ReportSection::ALL
            .into_iter()
            .find(|section| section.name() == needle)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

// ============================================================================
// Report
// ============================================================================

/// A complete procurement report, ready to be rendered
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcurementReport {
    /// Report title (shown on the summary sheet)
    pub title: String,
    /// Generation timestamp; also stamped into document properties
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub suppliers: Vec<SupplierRecord>,
    #[serde(default)]
    pub quotes: Vec<QuoteRecord>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrderRecord>,
    #[serde(default)]
    pub approvals: Vec<ApprovalRecord>,
    #[serde(default)]
    pub deliveries: Vec<DeliveryRecord>,
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub forex_rates: Vec<ForexRecord>,
}

impl ProcurementReport {
    /// Create an empty report
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
            suppliers: Vec::new(),
            quotes: Vec::new(),
            purchase_orders: Vec::new(),
            approvals: Vec::new(),
            deliveries: Vec::new(),
            invoices: Vec::new(),
            forex_rates: Vec::new(),
        }
    }

    /// Number of records in a data section (the summary has none of its own)
    pub fn section_len(&self, section: ReportSection) -> usize {
        match section {
            ReportSection::Summary => 0,
            ReportSection::Suppliers => self.suppliers.len(),
            ReportSection::Quotes => self.quotes.len(),
            ReportSection::PurchaseOrders => self.purchase_orders.len(),
            ReportSection::Approvals => self.approvals.len(),
            ReportSection::Deliveries => self.deliveries.len(),
            ReportSection::Invoices => self.invoices.len(),
            ReportSection::ForexRates => self.forex_rates.len(),
        }
    }

    /// Total number of records across all sections
    pub fn record_count(&self) -> usize {
        ReportSection::ALL
            .into_iter()
            .map(|section| self.section_len(section))
            .sum()
    }

    /// Sum of purchase order grand totals (mixed currencies are not converted).
    /// `None` if any order total or the sum overflows.
    pub fn purchase_order_total(&self) -> Option<Decimal> {
        self.purchase_orders
            .iter()
            .try_fold(Decimal::ZERO, |acc, po| acc.checked_add(po.grand_total()?))
    }

    /// Sum of invoice amounts (mixed currencies are not converted).
    /// `None` on overflow.
    pub fn invoice_total(&self) -> Option<Decimal> {
        self.invoices
            .iter()
            .try_fold(Decimal::ZERO, |acc, invoice| acc.checked_add(invoice.amount))
    }
}

// ============================================================================
// Suppliers
// ============================================================================

/// A supplier (vendor) with its commercial contact details
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: u64,
    pub name: String,
    /// ISO 4217 currency code
    pub currency: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// ISO 3166-1 alpha-2
    #[serde(default)]
    pub country: Option<String>,
    /// e.g. "Net 30"
    #[serde(default)]
    pub payment_terms: Option<String>,
}

impl SupplierRecord {
    pub fn new(id: u64, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            currency: currency.into(),
            contact_person: None,
            email: None,
            phone: None,
            country: None,
            payment_terms: None,
        }
    }

    pub fn contact(mut self, person: impl Into<String>) -> Self {
        self.contact_person = Some(person.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }
}

// ============================================================================
// Quotes
// ============================================================================

/// A supplier's price quote for a product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: u64,
    pub supplier: String,
    pub product: String,
    pub price: Decimal,
    pub currency: String,
    /// Price converted to the reporting currency
    pub converted_price: Decimal,
    pub quote_date: NaiveDate,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    /// active, superseded, expired, accepted, declined
    pub status: String,
}

impl QuoteRecord {
    pub fn new(
        id: u64,
        supplier: impl Into<String>,
        product: impl Into<String>,
        quote_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            supplier: supplier.into(),
            product: product.into(),
            price: Decimal::ZERO,
            currency: "USD".into(),
            converted_price: Decimal::ZERO,
            quote_date,
            valid_until: None,
            status: "active".into(),
        }
    }

    /// Set the quoted price; the converted price follows until overridden
    pub fn price(mut self, price: Decimal, currency: impl Into<String>) -> Self {
        self.price = price;
        self.converted_price = price;
        self.currency = currency.into();
        self
    }

    pub fn converted_price(mut self, converted: Decimal) -> Self {
        self.converted_price = converted;
        self
    }

    pub fn valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

// ============================================================================
// Purchase orders
// ============================================================================

/// A purchase order placed against a quote
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderRecord {
    pub po_number: String,
    pub supplier: String,
    pub product: String,
    /// pending, approved, ordered, shipped, received, cancelled
    pub status: String,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
    #[serde(default)]
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub tax: Decimal,
}

impl PurchaseOrderRecord {
    pub fn new(
        po_number: impl Into<String>,
        supplier: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            po_number: po_number.into(),
            supplier: supplier.into(),
            product: product.into(),
            status: "pending".into(),
            order_date: None,
            quantity: 1,
            unit_price: Decimal::ZERO,
            currency: "USD".into(),
            shipping_cost: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn ordered_on(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = price;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn shipping(mut self, cost: Decimal) -> Self {
        self.shipping_cost = cost;
        self
    }

    pub fn tax(mut self, tax: Decimal) -> Self {
        self.tax = tax;
        self
    }

    /// unit_price × quantity, `None` on overflow
    pub fn total_amount(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// total_amount + shipping_cost + tax, `None` on overflow
    pub fn grand_total(&self) -> Option<Decimal> {
        self.total_amount()?
            .checked_add(self.shipping_cost)?
            .checked_add(self.tax)
    }
}

// ============================================================================
// Approvals
// ============================================================================

/// An approval decision on a purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub po_number: String,
    pub approver: String,
    /// approved, rejected, pending
    pub decision: String,
    #[serde(default)]
    pub decided_on: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl ApprovalRecord {
    pub fn new(
        po_number: impl Into<String>,
        approver: impl Into<String>,
        decision: impl Into<String>,
    ) -> Self {
        Self {
            po_number: po_number.into(),
            approver: approver.into(),
            decision: decision.into(),
            decided_on: None,
            comments: None,
        }
    }

    pub fn decided_on(mut self, date: NaiveDate) -> Self {
        self.decided_on = Some(date);
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

// ============================================================================
// Deliveries
// ============================================================================

/// Delivery tracking for a purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub po_number: String,
    #[serde(default)]
    pub expected: Option<NaiveDate>,
    #[serde(default)]
    pub actual: Option<NaiveDate>,
    pub quantity_received: u32,
    /// in-transit, received, partial, late
    pub status: String,
}

impl DeliveryRecord {
    pub fn new(po_number: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            po_number: po_number.into(),
            expected: None,
            actual: None,
            quantity_received: 0,
            status: status.into(),
        }
    }

    pub fn expected(mut self, date: NaiveDate) -> Self {
        self.expected = Some(date);
        self
    }

    pub fn actual(mut self, date: NaiveDate) -> Self {
        self.actual = Some(date);
        self
    }

    pub fn received(mut self, quantity: u32) -> Self {
        self.quantity_received = quantity;
        self
    }
}

// ============================================================================
// Invoices
// ============================================================================

/// A supplier invoice matched to a purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub po_number: String,
    pub supplier: String,
    pub issued_on: NaiveDate,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub paid: bool,
}

impl InvoiceRecord {
    pub fn new(
        invoice_number: impl Into<String>,
        po_number: impl Into<String>,
        supplier: impl Into<String>,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            po_number: po_number.into(),
            supplier: supplier.into(),
            issued_on,
            due_on: None,
            amount: Decimal::ZERO,
            currency: "USD".into(),
            paid: false,
        }
    }

    pub fn amount(mut self, amount: Decimal, currency: impl Into<String>) -> Self {
        self.amount = amount;
        self.currency = currency.into();
        self
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_on = Some(date);
        self
    }

    pub fn paid(mut self) -> Self {
        self.paid = true;
        self
    }
}

// ============================================================================
// Forex
// ============================================================================

/// An exchange rate effective from a given date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForexRecord {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub effective_date: NaiveDate,
}

impl ForexRecord {
    pub fn new(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            rate,
            effective_date,
        }
    }
}

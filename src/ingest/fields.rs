//! Header resolution and cell normalization for ingested ledgers

use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Characters stripped from amount cells before parsing
const AMOUNT_NOISE: [char; 7] = ['$', '€', '£', '¥', '₹', ',', '_'];

/// Largest decimal scale (in either direction) accepted for an amount
pub const MAX_AMOUNT_SCALE: i64 = 18;

/// Semantic fields recognized in a ledger header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerField {
    InvoiceId,
    Amount,
    Date,
    Description,
    Vendor,
}

impl LedgerField {
    pub const ALL: [LedgerField; 5] = [
        LedgerField::InvoiceId,
        LedgerField::Amount,
        LedgerField::Date,
        LedgerField::Description,
        LedgerField::Vendor,
    ];

    /// Normalized header text that resolves to this field
    pub fn key(&self) -> &'static str {
        match self {
            LedgerField::InvoiceId => "invoiceid",
            LedgerField::Amount => "amount",
            LedgerField::Date => "date",
            LedgerField::Description => "description",
            LedgerField::Vendor => "vendor",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            LedgerField::InvoiceId | LedgerField::Amount | LedgerField::Date
        )
    }
}

/// Lower-case a header and drop separators, so `Invoice ID`, `invoice_id`
/// and `InvoiceId` all become `invoiceid`
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column positions of the recognized fields; first matching header wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub invoice_id: Option<usize>,
    pub amount: Option<usize>,
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub vendor: Option<usize>,
}

impl ColumnMap {
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let find = |field: LedgerField| normalized.iter().position(|h| h == field.key());

        Self {
            invoice_id: find(LedgerField::InvoiceId),
            amount: find(LedgerField::Amount),
            date: find(LedgerField::Date),
            description: find(LedgerField::Description),
            vendor: find(LedgerField::Vendor),
        }
    }

    pub fn get(&self, field: LedgerField) -> Option<usize> {
        match field {
            LedgerField::InvoiceId => self.invoice_id,
            LedgerField::Amount => self.amount,
            LedgerField::Date => self.date,
            LedgerField::Description => self.description,
            LedgerField::Vendor => self.vendor,
        }
    }

    /// Whether `index` holds one of the recognized fields
    pub fn is_mapped(&self, index: usize) -> bool {
        LedgerField::ALL
            .iter()
            .any(|field| self.get(*field) == Some(index))
    }

    /// Required fields with no matching header
    pub fn missing_required(&self) -> Vec<LedgerField> {
        LedgerField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).is_none())
            .collect()
    }
}

/// Parse a free-form amount such as `$1,234.50`.
///
/// Currency symbols, thousands separators and whitespace are dropped. When
/// the rest is not a number, its leading numeric part is used; if there is
/// none the amount is zero. Amounts whose scale exceeds `MAX_AMOUNT_SCALE`
/// in either direction (e.g. `1e-30000000`) are also treated as zero.
pub fn parse_amount(raw: &str) -> BigDecimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !AMOUNT_NOISE.contains(c))
        .collect();

    if cleaned.is_empty() {
        return BigDecimal::from(0);
    }

    let parsed = match BigDecimal::from_str(&cleaned) {
        Ok(value) => Some(value),
        Err(_) => BigDecimal::from_str(numeric_prefix(&cleaned)).ok(),
    };

    match parsed {
        Some(value) if has_bounded_scale(&value) => value,
        Some(_) => {
            log::warn!("amount '{}' is out of range; using 0", raw);
            BigDecimal::from(0)
        }
        None => {
            log::warn!("amount '{}' is not a number; using 0", raw);
            BigDecimal::from(0)
        }
    }
}

fn has_bounded_scale(value: &BigDecimal) -> bool {
    let (_, scale) = value.as_bigint_and_exponent();
    (-MAX_AMOUNT_SCALE..=MAX_AMOUNT_SCALE).contains(&scale)
}

fn numeric_prefix(text: &str) -> &str {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in text.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if seen_digit {
        text[..end].trim_end_matches('.')
    } else {
        ""
    }
}

//! Defines the bill record sent to the store and the form snapshot it is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The percentage used when the form does not provide a usable one.
pub const DEFAULT_PCT: i64 = 20;

/// The largest amount, in either direction, a bill may carry.
///
/// Amounts are displayed through `f64`, which holds integers exactly up to 2^53 - 1.
pub const MAX_AMOUNT: i64 = 9_007_199_254_740_991;

/// Where a bill is in the approval process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Submitted and waiting for an admin.
    Pending,
    /// Approved by an admin.
    Accepted,
    /// Refused by an admin.
    Refused,
}

impl BillStatus {
    /// The label shown in the bills table.
    pub fn label(self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An expense submitted by an employee, with the receipt it is backed by.
///
/// Records are never changed after they are built; the store owns them once
/// they are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// The email of the employee who submitted the bill.
    pub email: String,
    /// The kind of expense, e.g. "Transports" or "Restaurants et bars".
    #[serde(rename = "type")]
    pub expense_type: String,
    /// A short name for the expense.
    pub name: String,
    /// The amount spent, in whole currency units.
    pub amount: i64,
    /// When the expense happened, formatted as `YYYY-MM-DD`.
    pub date: String,
    /// The VAT amount as typed by the user.
    pub vat: String,
    /// The VAT percentage.
    pub pct: i64,
    /// Free text from the employee.
    pub commentary: String,
    /// Where the store keeps the receipt.
    pub file_url: String,
    /// The receipt's original file name.
    pub file_name: String,
    /// The approval status.
    pub status: BillStatus,
}

/// The raw values of the new bill form at the time it was submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewBillForm {
    /// The selected expense type.
    #[serde(rename = "type")]
    pub expense_type: String,
    /// The expense name.
    pub name: String,
    /// The amount as typed.
    pub amount: String,
    /// The date as typed.
    pub date: String,
    /// The VAT amount as typed.
    pub vat: String,
    /// The VAT percentage as typed.
    pub pct: String,
    /// The commentary as typed.
    pub commentary: String,
}

impl NewBillForm {
    /// Decode a form snapshot from an `application/x-www-form-urlencoded` body.
    ///
    /// Missing fields are left empty.
    pub fn from_urlencoded(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(body)
    }
}

/// The receipt reference a bill is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// The name of the file the user selected.
    pub file_name: String,
    /// Where the store keeps the file.
    pub file_url: String,
    /// The record ID the store assigned when the file was uploaded.
    pub key: String,
}

impl BillRecord {
    /// Build a pending bill from the submitted form and the uploaded receipt.
    ///
    /// The percentage falls back to [DEFAULT_PCT] when it is missing, not a
    /// number or zero.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount does not start with an integer
    /// or is beyond [MAX_AMOUNT].
    pub fn pending(email: &str, form: &NewBillForm, file: &UploadedFile) -> Result<Self, Error> {
        let amount = parse_int(&form.amount)
            .filter(|amount| (-MAX_AMOUNT..=MAX_AMOUNT).contains(amount))
            .ok_or_else(|| Error::InvalidAmount(form.amount.clone()))?;
        let pct = parse_int(&form.pct)
            .filter(|&pct| pct != 0)
            .unwrap_or(DEFAULT_PCT);

        Ok(Self {
            email: email.to_owned(),
            expense_type: form.expense_type.clone(),
            name: form.name.clone(),
            amount,
            date: form.date.clone(),
            vat: form.vat.clone(),
            pct,
            commentary: form.commentary.clone(),
            file_url: file.file_url.clone(),
            file_name: file.file_name.clone(),
            status: BillStatus::Pending,
        })
    }
}

/// Parse the leading integer of `text`, e.g. "348.5" is 348.
///
/// Leading whitespace and a single sign are allowed. Returns `None` if there
/// are no digits or the number overflows.
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    if digits_end == 0 {
        return None;
    }

    rest[..digits_end]
        .parse::<i64>()
        .ok()
        .map(|value| sign * value)
}

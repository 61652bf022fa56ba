//! Core expense domain types and input validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    Date, OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{Error, database_id::DatabaseId};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// Money spent on something, filed under an expense type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense.
    #[serde(rename = "_id")]
    pub id: ExpenseId,
    /// The ID of the master data item that categorizes this expense.
    ///
    /// This is a loose reference, it is not checked against the master data.
    #[serde(rename = "type")]
    pub expense_type: String,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent. Always positive.
    pub amount: f64,
    /// When the money was spent.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the expense was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The JSON body for creating or updating an expense, before validation.
///
/// `type` and `amount` are kept as raw JSON values because clients send them
/// either as numbers or as strings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// The ID of the expense type.
    #[serde(rename = "type")]
    pub expense_type: Option<Value>,
    /// What the money was spent on.
    pub description: Option<String>,
    /// How much was spent, as a number or numeric string.
    pub amount: Option<Value>,
    /// Either `YYYY-MM-DD` or an RFC 3339 date-time.
    pub date: Option<String>,
}

/// A validated expense that is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The ID of the expense type.
    pub expense_type: String,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// When the money was spent, in UTC.
    pub date: OffsetDateTime,
}

/// A validated set of changes to an expense. `None` fields are left unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseUpdate {
    /// The new expense type ID.
    pub expense_type: Option<String>,
    /// The new description.
    pub description: Option<String>,
    /// The new amount.
    pub amount: Option<f64>,
    /// The new date.
    pub date: Option<OffsetDateTime>,
}

/// The format of plain calendar dates in requests, e.g. `2025-03-14`.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

const TYPE_REQUIRED: &str = "Expense type is required";
const TYPE_INVALID: &str = "Expense type must be a string or number";
const DESCRIPTION_REQUIRED: &str = "Expense description is required";
const AMOUNT_REQUIRED: &str = "Expense amount is required";
const AMOUNT_NOT_A_NUMBER: &str = "Expense amount must be a number";
const AMOUNT_NOT_POSITIVE: &str = "Expense amount must be a positive number";
const DATE_REQUIRED: &str = "Expense date is required";
const DATE_INVALID: &str = "Expense date must be a valid date";

/// Check that every field needed to create an expense is present and well formed.
///
/// # Errors
///
/// Returns [Error::InvalidExpense] listing every failed field check, joined
/// by `". "`.
pub fn validate_expense_input(input: &ExpenseInput) -> Result<NewExpense, Error> {
    let expense_type = check_type(input.expense_type.as_ref());
    let description = check_description(input.description.as_deref());
    let amount = check_amount(input.amount.as_ref());
    let date = check_date(input.date.as_deref());

    match (expense_type, description, amount, date) {
        (Ok(expense_type), Ok(description), Ok(amount), Ok(date)) => Ok(NewExpense {
            expense_type,
            description,
            amount,
            date,
        }),
        (expense_type, description, amount, date) => Err(collect_errors([
            expense_type.err(),
            description.err(),
            amount.err(),
            date.err(),
        ])),
    }
}

/// Check the fields that are present in a partial expense update.
///
/// Absent fields are not checked and stay `None` in the result. Present
/// fields must pass the same checks as [validate_expense_input].
///
/// # Errors
///
/// Returns [Error::InvalidExpense] listing every failed field check.
pub fn validate_expense_update(input: &ExpenseInput) -> Result<ExpenseUpdate, Error> {
    let expense_type = input
        .expense_type
        .as_ref()
        .map(|value| check_type(Some(value)))
        .transpose();
    let description = input
        .description
        .as_deref()
        .map(|value| check_description(Some(value)))
        .transpose();
    let amount = input
        .amount
        .as_ref()
        .map(|value| check_amount(Some(value)))
        .transpose();
    let date = input
        .date
        .as_deref()
        .map(|value| check_date(Some(value)))
        .transpose();

    match (expense_type, description, amount, date) {
        (Ok(expense_type), Ok(description), Ok(amount), Ok(date)) => Ok(ExpenseUpdate {
            expense_type,
            description,
            amount,
            date,
        }),
        (expense_type, description, amount, date) => Err(collect_errors([
            expense_type.err(),
            description.err(),
            amount.err(),
            date.err(),
        ])),
    }
}

/// Parse an expense date as either `YYYY-MM-DD` (midnight UTC) or an RFC 3339
/// date-time, which is converted to UTC.
pub fn parse_expense_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();

    if let Ok(date) = Date::parse(raw, DATE_FORMAT) {
        return Some(date.midnight().assume_utc());
    }

    // Offsets near the ends of the supported range can push the UTC value out of it.
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|date_time| date_time.checked_to_offset(UtcOffset::UTC))
}

fn collect_errors<const N: usize>(errors: [Option<&'static str>; N]) -> Error {
    let messages: Vec<&str> = errors.into_iter().flatten().collect();

    Error::InvalidExpense(messages.join(". "))
}

fn check_type(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        None | Some(Value::Null) => Err(TYPE_REQUIRED),
        Some(Value::String(expense_type)) if expense_type.trim().is_empty() => Err(TYPE_REQUIRED),
        Some(Value::String(expense_type)) => Ok(expense_type.trim().to_owned()),
        Some(Value::Number(expense_type)) => Ok(expense_type.to_string()),
        Some(_) => Err(TYPE_INVALID),
    }
}

fn check_description(value: Option<&str>) -> Result<String, &'static str> {
    match value.map(str::trim) {
        Some(description) if !description.is_empty() => Ok(description.to_owned()),
        _ => Err(DESCRIPTION_REQUIRED),
    }
}

fn check_amount(value: Option<&Value>) -> Result<f64, &'static str> {
    let amount = match value {
        None | Some(Value::Null) => return Err(AMOUNT_REQUIRED),
        Some(Value::String(amount)) if amount.trim().is_empty() => return Err(AMOUNT_REQUIRED),
        Some(Value::Number(amount)) => amount.as_f64(),
        Some(Value::String(amount)) => amount.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        Some(amount) if amount.is_finite() => Err(AMOUNT_NOT_POSITIVE),
        _ => Err(AMOUNT_NOT_A_NUMBER),
    }
}

fn check_date(value: Option<&str>) -> Result<OffsetDateTime, &'static str> {
    match value.map(str::trim) {
        None => Err(DATE_REQUIRED),
        Some("") => Err(DATE_REQUIRED),
        Some(date) => parse_expense_date(date).ok_or(DATE_INVALID),
    }
}

#[cfg(test)]
mod validate_expense_input_tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        Error,
        expense::{ExpenseInput, NewExpense, validate_expense_input},
    };

    fn valid_input() -> ExpenseInput {
        ExpenseInput {
            expense_type: Some(json!("1")),
            description: Some("Groceries".to_owned()),
            amount: Some(json!(42.5)),
            date: Some("2025-03-14".to_owned()),
        }
    }

    #[test]
    fn accepts_valid_input() {
        let expense = validate_expense_input(&valid_input());

        assert_eq!(
            expense,
            Ok(NewExpense {
                expense_type: "1".to_owned(),
                description: "Groceries".to_owned(),
                amount: 42.5,
                date: datetime!(2025-03-14 00:00 UTC),
            })
        );
    }

    #[test]
    fn coerces_numeric_strings_and_numeric_type() {
        let input = ExpenseInput {
            expense_type: Some(json!(3)),
            amount: Some(json!(" 12.25 ")),
            ..valid_input()
        };

        let expense = validate_expense_input(&input).expect("Input should be valid");

        assert_eq!(expense.expense_type, "3");
        assert_eq!(expense.amount, 12.25);
    }

    #[test]
    fn converts_rfc3339_dates_to_utc() {
        let input = ExpenseInput {
            date: Some("2025-03-14T09:30:00+13:00".to_owned()),
            ..valid_input()
        };

        let expense = validate_expense_input(&input).expect("Input should be valid");

        assert_eq!(expense.date, datetime!(2025-03-13 20:30 UTC));
    }

    #[test]
    fn lists_every_missing_field() {
        let result = validate_expense_input(&ExpenseInput::default());

        assert_eq!(
            result,
            Err(Error::InvalidExpense(
                "Expense type is required. Expense description is required. \
                Expense amount is required. Expense date is required"
                    .to_owned()
            ))
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let input = ExpenseInput {
            expense_type: Some(json!("  ")),
            description: Some("\t".to_owned()),
            ..valid_input()
        };

        let result = validate_expense_input(&input);

        assert_eq!(
            result,
            Err(Error::InvalidExpense(
                "Expense type is required. Expense description is required".to_owned()
            ))
        );
    }

    #[test]
    fn rejects_non_numeric_amount() {
        for amount in [json!("abc"), json!("NaN"), json!(true), json!([1])] {
            let input = ExpenseInput {
                amount: Some(amount.clone()),
                ..valid_input()
            };

            assert_eq!(
                validate_expense_input(&input),
                Err(Error::InvalidExpense(
                    "Expense amount must be a number".to_owned()
                )),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for amount in [json!(0), json!(-5.5), json!("-1")] {
            let input = ExpenseInput {
                amount: Some(amount.clone()),
                ..valid_input()
            };

            assert_eq!(
                validate_expense_input(&input),
                Err(Error::InvalidExpense(
                    "Expense amount must be a positive number".to_owned()
                )),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unparseable_date() {
        let input = ExpenseInput {
            date: Some("14/03/2025".to_owned()),
            ..valid_input()
        };

        assert_eq!(
            validate_expense_input(&input),
            Err(Error::InvalidExpense(
                "Expense date must be a valid date".to_owned()
            ))
        );
    }

    #[test]
    fn rejects_date_that_leaves_supported_range_in_utc() {
        let input = ExpenseInput {
            date: Some("9999-12-31T23:00:00-05:00".to_owned()),
            ..valid_input()
        };

        assert_eq!(
            validate_expense_input(&input),
            Err(Error::InvalidExpense(
                "Expense date must be a valid date".to_owned()
            ))
        );
    }

    #[test]
    fn accepts_latest_date_in_range() {
        let input = ExpenseInput {
            date: Some("9999-12-31".to_owned()),
            ..valid_input()
        };

        let expense = validate_expense_input(&input).expect("Input should be valid");

        assert_eq!(expense.date, datetime!(9999-12-31 00:00 UTC));
    }

    #[test]
    fn rejects_type_of_wrong_shape() {
        let input = ExpenseInput {
            expense_type: Some(json!({"id": 1})),
            ..valid_input()
        };

        assert_eq!(
            validate_expense_input(&input),
            Err(Error::InvalidExpense(
                "Expense type must be a string or number".to_owned()
            ))
        );
    }
}

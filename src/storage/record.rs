//! Record codec for the per-user expense files
//!
//! Maps between an [`Expense`] and one comma-joined line. The first six
//! columns are fixed; category-specific columns follow in a fixed order.
//! Fields are not quoted or escaped, so a comma inside a free-text field
//! (description, destination) shifts columns on reload. This matches the
//! original file format and is a documented limitation.

use chrono::NaiveDateTime;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryDetails, Expense, ExpenseId, UserId};

/// Header row written at the top of every expense file
pub const HEADER: &str = "ExpenseID,UserID,Category,Amount,DateTime,Description,AdditionalInfo";

/// Fixed timestamp pattern used in the DateTime column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Encode an expense as one record line
pub fn encode(expense: &Expense) -> String {
    let mut record = format!(
        "{},{},{},{:.2},{},{}",
        expense.id(),
        expense.user_id(),
        expense.category(),
        expense.amount(),
        expense.timestamp().format(TIMESTAMP_FORMAT),
        expense.description()
    );

    match expense.details() {
        CategoryDetails::Generic { .. } => {}
        CategoryDetails::Food {
            restaurant,
            meal_type,
        } => {
            record.push_str(&format!(",{},{}", restaurant, meal_type));
        }
        CategoryDetails::Travel {
            mode,
            destination,
            distance_km,
        } => {
            record.push_str(&format!(",{},{},{:.2}", mode, destination, distance_km));
        }
        CategoryDetails::Electricity {
            bill_number,
            units_consumed,
            provider,
        } => {
            record.push_str(&format!(
                ",{},{:.2},{}",
                bill_number, units_consumed, provider
            ));
        }
    }

    record
}

/// Decode one record line into an expense
///
/// The caller's `user_id` overrides the embedded UserID column: each file
/// is scoped to exactly one user, so the caller's identity is
/// authoritative. Errors here are per-line; the store treats them as
/// warn-and-skip, never as a failure of the whole load.
pub fn decode(line: &str, user_id: &UserId) -> ExpenseResult<Expense> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 6 {
        return Err(ExpenseError::Record(format!(
            "expected at least 6 columns, got {}",
            parts.len()
        )));
    }

    let id: ExpenseId = parts[0]
        .parse()
        .map_err(|e| ExpenseError::Record(format!("bad expense id '{}': {}", parts[0], e)))?;
    let amount: f64 = parts[3]
        .parse()
        .map_err(|e| ExpenseError::Record(format!("bad amount '{}': {}", parts[3], e)))?;
    let timestamp = NaiveDateTime::parse_from_str(parts[4], TIMESTAMP_FORMAT)
        .map_err(|e| ExpenseError::Record(format!("bad timestamp '{}': {}", parts[4], e)))?;
    let description = parts[5];

    let details = match Category::parse(parts[2]) {
        Category::Food => {
            require_columns(&parts, 8, "Food")?;
            CategoryDetails::food(parts[6], parts[7])?
        }
        Category::Travel => {
            require_columns(&parts, 9, "Travel")?;
            let distance: f64 = parts[8].parse().map_err(|e| {
                ExpenseError::Record(format!("bad distance '{}': {}", parts[8], e))
            })?;
            CategoryDetails::travel(parts[6], parts[7], distance)?
        }
        Category::Electricity => {
            require_columns(&parts, 9, "Electricity")?;
            let units: f64 = parts[7].parse().map_err(|e| {
                ExpenseError::Record(format!("bad units '{}': {}", parts[7], e))
            })?;
            CategoryDetails::electricity(parts[6], units, parts[8])
        }
        Category::Other(label) => CategoryDetails::generic(label),
    };

    Expense::rehydrate(id, user_id.clone(), amount, timestamp, description, details)
}

fn require_columns(parts: &[&str], needed: usize, category: &str) -> ExpenseResult<()> {
    if parts.len() < needed {
        return Err(ExpenseError::Record(format!(
            "{} record needs at least {} columns, got {}",
            category,
            needed,
            parts.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_user() -> UserId {
        UserId::from("user_1")
    }

    fn test_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn sample(details: CategoryDetails) -> Expense {
        Expense::new(test_user(), 12.5, test_timestamp(), "", details).unwrap()
    }

    #[test]
    fn test_encode_food() {
        let expense = sample(CategoryDetails::food("Diner", "Lunch").unwrap());
        let record = encode(&expense);

        let expected_tail = ",user_1,Food,12.50,2024-01-15 12:30:00,,Diner,Lunch";
        assert!(record.starts_with("EXP_"));
        assert!(record.ends_with(expected_tail), "record was: {}", record);
    }

    #[test]
    fn test_round_trip_stability_all_variants() {
        let variants = vec![
            CategoryDetails::generic("Miscellaneous"),
            CategoryDetails::food("Diner", "Lunch").unwrap(),
            CategoryDetails::travel("Flight", "Tokyo", 9_712.4).unwrap(),
            CategoryDetails::electricity("BILL-2024-01", 350.0, "City Power"),
        ];

        for details in variants {
            let expense = sample(details);
            let encoded = encode(&expense);
            let decoded = decode(&encoded, &test_user()).unwrap();
            // encode(decode(encode(e))) == encode(e)
            assert_eq!(encode(&decoded), encoded);
            assert_eq!(decoded.id(), expense.id());
        }
    }

    #[test]
    fn test_decode_overrides_user_id() {
        let expense = sample(CategoryDetails::generic("Miscellaneous"));
        let encoded = encode(&expense);

        let other = UserId::from("someone_else");
        let decoded = decode(&encoded, &other).unwrap();
        assert_eq!(decoded.user_id(), &other);
    }

    #[test]
    fn test_decode_too_few_columns() {
        let err = decode("EXP_1,u,Food,10.00", &test_user()).unwrap_err();
        assert!(matches!(err, ExpenseError::Record(_)));
    }

    #[test]
    fn test_decode_food_missing_payload_columns() {
        let line = "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a,u,Food,10.00,2024-01-15 12:30:00,";
        let err = decode(line, &test_user()).unwrap_err();
        assert!(matches!(err, ExpenseError::Record(_)));
    }

    #[test]
    fn test_decode_bad_amount() {
        let line = "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a,u,Miscellaneous,ten,2024-01-15 12:30:00,";
        let err = decode(line, &test_user()).unwrap_err();
        assert!(matches!(err, ExpenseError::Record(_)));
    }

    #[test]
    fn test_decode_bad_timestamp() {
        let line = "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a,u,Miscellaneous,10.00,2024/01/15,";
        let err = decode(line, &test_user()).unwrap_err();
        assert!(matches!(err, ExpenseError::Record(_)));
    }

    #[test]
    fn test_decode_invalid_meal_type_is_an_error() {
        let line =
            "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a,u,Food,10.00,2024-01-15 12:30:00,,Diner,brunch";
        assert!(decode(line, &test_user()).is_err());
    }

    #[test]
    fn test_decode_unknown_category_is_generic() {
        let line = "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a,u,Garden,10.00,2024-01-15 12:30:00,plants";
        let decoded = decode(line, &test_user()).unwrap();
        assert_eq!(decoded.category().name(), "Garden");
        assert_eq!(decoded.description(), "plants");
    }

    #[test]
    fn test_embedded_comma_shifts_columns() {
        // No escaping: a comma in the description bleeds into later columns
        let expense = Expense::new(
            test_user(),
            20.0,
            test_timestamp(),
            "dinner, drinks",
            CategoryDetails::generic("Miscellaneous"),
        )
        .unwrap();
        let encoded = encode(&expense);
        let decoded = decode(&encoded, &test_user()).unwrap();
        assert_eq!(decoded.description(), "dinner");
    }
}

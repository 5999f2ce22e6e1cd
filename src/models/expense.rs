//! Expense model
//!
//! Represents one expense record with a category-specific payload and
//! enforces its validity. Fields are private: every construction path and
//! every mutation runs validation, so an invalid `Expense` never exists,
//! even transiently.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};

use super::category::{Category, MealType, TransportMode};
use super::ids::{ExpenseId, UserId};

/// Upper bound on any expense amount
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Upper bound on travel distance in kilometers
pub const MAX_DISTANCE_KM: f64 = 50_000.0;

/// Upper bound on electricity units consumed (kWh)
pub const MAX_UNITS_CONSUMED: f64 = 100_000.0;

/// Category-specific payload of an expense
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetails {
    /// Generic expense under a free-form label, no extra fields
    Generic { label: String },
    /// Food expense
    Food {
        restaurant: String,
        meal_type: MealType,
    },
    /// Travel expense
    Travel {
        mode: TransportMode,
        destination: String,
        distance_km: f64,
    },
    /// Electricity bill
    Electricity {
        bill_number: String,
        units_consumed: f64,
        provider: String,
    },
}

impl CategoryDetails {
    /// Generic payload under the given category label
    pub fn generic(label: impl Into<String>) -> Self {
        Self::Generic {
            label: label.into(),
        }
    }

    /// Food payload; the meal type string is matched case-insensitively
    pub fn food(restaurant: impl Into<String>, meal_type: &str) -> ExpenseResult<Self> {
        let meal_type = MealType::parse(meal_type).ok_or_else(|| {
            ExpenseError::validation(
                "meal_type",
                format!("must be one of: {}", MealType::VALID),
            )
        })?;
        Ok(Self::Food {
            restaurant: restaurant.into(),
            meal_type,
        })
    }

    /// Travel payload; the transport mode string is matched case-insensitively
    pub fn travel(
        mode: &str,
        destination: impl Into<String>,
        distance_km: f64,
    ) -> ExpenseResult<Self> {
        let mode = TransportMode::parse(mode).ok_or_else(|| {
            ExpenseError::validation(
                "mode_of_transport",
                format!("must be one of: {}", TransportMode::VALID),
            )
        })?;
        Ok(Self::Travel {
            mode,
            destination: destination.into(),
            distance_km,
        })
    }

    /// Electricity payload
    pub fn electricity(
        bill_number: impl Into<String>,
        units_consumed: f64,
        provider: impl Into<String>,
    ) -> Self {
        Self::Electricity {
            bill_number: bill_number.into(),
            units_consumed,
            provider: provider.into(),
        }
    }

    /// The category this payload belongs to
    pub fn category(&self) -> Category {
        match self {
            Self::Generic { label } => Category::parse(label),
            Self::Food { .. } => Category::Food,
            Self::Travel { .. } => Category::Travel,
            Self::Electricity { .. } => Category::Electricity,
        }
    }
}

/// A single expense record
///
/// Equality is keyed on the id alone; two expenses with the same id are the
/// same record regardless of field values.
#[derive(Debug, Clone)]
pub struct Expense {
    id: ExpenseId,
    user_id: UserId,
    amount: f64,
    timestamp: NaiveDateTime,
    description: String,
    details: CategoryDetails,
}

impl Expense {
    /// Create a new expense with a generated id
    pub fn new(
        user_id: UserId,
        amount: f64,
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        details: CategoryDetails,
    ) -> ExpenseResult<Self> {
        Self::rehydrate(ExpenseId::new(), user_id, amount, timestamp, description, details)
    }

    /// Reconstruct an expense with an explicit id, as when loading from storage
    pub fn rehydrate(
        id: ExpenseId,
        user_id: UserId,
        amount: f64,
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        details: CategoryDetails,
    ) -> ExpenseResult<Self> {
        let expense = Self {
            id,
            user_id,
            amount,
            timestamp,
            description: description.into(),
            details,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Run base checks, then category-specific checks in declaration order.
    /// Fails on the first violation encountered.
    fn validate(&self) -> ExpenseResult<()> {
        if self.user_id.is_empty() {
            return Err(ExpenseError::validation("user_id", "cannot be empty"));
        }
        if self.details.category().name().trim().is_empty() {
            return Err(ExpenseError::validation("category", "cannot be empty"));
        }
        // A generic expense under a typed category name would be written as
        // a 6-column row that the decoder dispatches to the typed variant
        // and then drops for missing payload columns.
        if let CategoryDetails::Generic { label } = &self.details {
            if !matches!(Category::parse(label), Category::Other(_)) {
                return Err(ExpenseError::validation(
                    "category",
                    format!("'{}' requires its category-specific fields", label),
                ));
            }
        }
        if !self.amount.is_finite() {
            return Err(ExpenseError::validation(
                "amount",
                "must be a finite number",
            ));
        }
        if self.amount <= 0.0 {
            return Err(ExpenseError::validation(
                "amount",
                "must be greater than 0",
            ));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseError::validation(
                "amount",
                "cannot exceed 1,000,000",
            ));
        }

        match &self.details {
            CategoryDetails::Generic { .. } => {}
            CategoryDetails::Food { restaurant, .. } => {
                if restaurant.trim().is_empty() {
                    return Err(ExpenseError::validation(
                        "restaurant",
                        "cannot be empty for food expenses",
                    ));
                }
            }
            CategoryDetails::Travel {
                destination,
                distance_km,
                ..
            } => {
                if destination.trim().is_empty() {
                    return Err(ExpenseError::validation("destination", "cannot be empty"));
                }
                if !distance_km.is_finite() || *distance_km < 0.0 {
                    return Err(ExpenseError::validation("distance", "cannot be negative"));
                }
                if *distance_km > MAX_DISTANCE_KM {
                    return Err(ExpenseError::validation(
                        "distance",
                        "cannot exceed 50,000 km",
                    ));
                }
            }
            CategoryDetails::Electricity {
                bill_number,
                units_consumed,
                provider,
            } => {
                if bill_number.trim().is_empty() {
                    return Err(ExpenseError::validation(
                        "bill_number",
                        "cannot be empty for electricity expenses",
                    ));
                }
                if !units_consumed.is_finite() || *units_consumed <= 0.0 {
                    return Err(ExpenseError::validation(
                        "units_consumed",
                        "must be greater than 0",
                    ));
                }
                if *units_consumed > MAX_UNITS_CONSUMED {
                    return Err(ExpenseError::validation(
                        "units_consumed",
                        "cannot exceed 100,000 kWh",
                    ));
                }
                if provider.trim().is_empty() {
                    return Err(ExpenseError::validation("provider", "cannot be empty"));
                }
            }
        }

        Ok(())
    }

    /// Validate a mutation on a candidate copy; commit only on success,
    /// otherwise the prior value is retained.
    fn try_mutate(&mut self, mutate: impl FnOnce(&mut Self)) -> ExpenseResult<()> {
        let mut candidate = self.clone();
        mutate(&mut candidate);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Update the amount, rejecting the change if it fails validation
    pub fn set_amount(&mut self, amount: f64) -> ExpenseResult<()> {
        self.try_mutate(|e| e.amount = amount)
    }

    /// Update the timestamp
    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.timestamp = timestamp;
    }

    /// Update the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Update the restaurant name of a food expense
    pub fn set_restaurant(&mut self, restaurant: impl Into<String>) -> ExpenseResult<()> {
        let restaurant = restaurant.into();
        match self.details {
            CategoryDetails::Food { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Food { restaurant: r, .. } = &mut e.details {
                    *r = restaurant;
                }
            }),
            _ => Err(not_variant("restaurant", "food")),
        }
    }

    /// Update the meal type of a food expense
    pub fn set_meal_type(&mut self, meal_type: MealType) -> ExpenseResult<()> {
        match self.details {
            CategoryDetails::Food { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Food { meal_type: m, .. } = &mut e.details {
                    *m = meal_type;
                }
            }),
            _ => Err(not_variant("meal_type", "food")),
        }
    }

    /// Update the transport mode of a travel expense
    pub fn set_mode(&mut self, mode: TransportMode) -> ExpenseResult<()> {
        match self.details {
            CategoryDetails::Travel { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Travel { mode: m, .. } = &mut e.details {
                    *m = mode;
                }
            }),
            _ => Err(not_variant("mode_of_transport", "travel")),
        }
    }

    /// Update the destination of a travel expense
    pub fn set_destination(&mut self, destination: impl Into<String>) -> ExpenseResult<()> {
        let destination = destination.into();
        match self.details {
            CategoryDetails::Travel { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Travel { destination: d, .. } = &mut e.details {
                    *d = destination;
                }
            }),
            _ => Err(not_variant("destination", "travel")),
        }
    }

    /// Update the distance of a travel expense
    pub fn set_distance(&mut self, distance_km: f64) -> ExpenseResult<()> {
        match self.details {
            CategoryDetails::Travel { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Travel { distance_km: d, .. } = &mut e.details {
                    *d = distance_km;
                }
            }),
            _ => Err(not_variant("distance", "travel")),
        }
    }

    /// Update the bill number of an electricity expense
    pub fn set_bill_number(&mut self, bill_number: impl Into<String>) -> ExpenseResult<()> {
        let bill_number = bill_number.into();
        match self.details {
            CategoryDetails::Electricity { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Electricity { bill_number: b, .. } = &mut e.details {
                    *b = bill_number;
                }
            }),
            _ => Err(not_variant("bill_number", "electricity")),
        }
    }

    /// Update the units consumed of an electricity expense
    pub fn set_units_consumed(&mut self, units_consumed: f64) -> ExpenseResult<()> {
        match self.details {
            CategoryDetails::Electricity { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Electricity {
                    units_consumed: u, ..
                } = &mut e.details
                {
                    *u = units_consumed;
                }
            }),
            _ => Err(not_variant("units_consumed", "electricity")),
        }
    }

    /// Update the provider of an electricity expense
    pub fn set_provider(&mut self, provider: impl Into<String>) -> ExpenseResult<()> {
        let provider = provider.into();
        match self.details {
            CategoryDetails::Electricity { .. } => self.try_mutate(|e| {
                if let CategoryDetails::Electricity { provider: p, .. } = &mut e.details {
                    *p = provider;
                }
            }),
            _ => Err(not_variant("provider", "electricity")),
        }
    }

    /// The immutable expense id
    pub fn id(&self) -> ExpenseId {
        self.id
    }

    /// The id of the owning user
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The expense category
    pub fn category(&self) -> Category {
        self.details.category()
    }

    /// The amount
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Full timestamp of the expense
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar date of the expense
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Optional free-form description (empty when unset)
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The category-specific payload
    pub fn details(&self) -> &CategoryDetails {
        &self.details
    }
}

impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Expense {}

fn not_variant(field: &'static str, category: &str) -> ExpenseError {
    ExpenseError::validation(field, format!("only {} expenses have this field", category))
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expense ID: {} | Category: {} | Amount: ${:.2} | Date: {}",
            self.id,
            self.category(),
            self.amount,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )?;

        match &self.details {
            CategoryDetails::Generic { .. } => Ok(()),
            CategoryDetails::Food {
                restaurant,
                meal_type,
            } => write!(f, " | Restaurant: {} | Meal Type: {}", restaurant, meal_type),
            CategoryDetails::Travel {
                mode,
                destination,
                distance_km,
            } => write!(
                f,
                " | Transport: {} | Destination: {} | Distance: {:.2} km",
                mode, destination, distance_km
            ),
            CategoryDetails::Electricity {
                bill_number,
                units_consumed,
                provider,
            } => write!(
                f,
                " | Bill No: {} | Units: {:.2} kWh | Provider: {}",
                bill_number, units_consumed, provider
            ),
        }
    }
}

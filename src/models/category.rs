//! Expense categories and their fixed vocabularies
//!
//! Three categories carry structured payloads (food, travel, electricity);
//! anything else is stored as a generic category under its own label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Food expense (restaurant + meal type)
    Food,
    /// Travel expense (transport mode, destination, distance)
    Travel,
    /// Electricity expense (bill number, units, provider)
    Electricity,
    /// Generic expense under a free-form label (e.g. "Miscellaneous")
    Other(String),
}

impl Category {
    /// Parse a category name, case-insensitively for the typed categories.
    /// Unrecognized labels become [`Category::Other`] with the label kept
    /// as written.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "food" => Self::Food,
            "travel" => Self::Travel,
            "electricity" => Self::Electricity,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Category name as stored and displayed
    pub fn name(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Electricity => "Electricity",
            Self::Other(label) => label,
        }
    }

    /// Case-insensitive name comparison, used by the query filters
    pub fn matches(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Meal type of a food expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    /// Parse a meal type from string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snacks" => Some(Self::Snacks),
            _ => None,
        }
    }

    /// The accepted values, for error messages
    pub const VALID: &'static str = "Breakfast, Lunch, Dinner, Snacks";
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breakfast => write!(f, "Breakfast"),
            Self::Lunch => write!(f, "Lunch"),
            Self::Dinner => write!(f, "Dinner"),
            Self::Snacks => write!(f, "Snacks"),
        }
    }
}

/// Mode of transport of a travel expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Flight,
    Taxi,
}

impl TransportMode {
    /// Parse a transport mode from string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "car" => Some(Self::Car),
            "bus" => Some(Self::Bus),
            "train" => Some(Self::Train),
            "flight" => Some(Self::Flight),
            "taxi" => Some(Self::Taxi),
            _ => None,
        }
    }

    /// The accepted values, for error messages
    pub const VALID: &'static str = "Car, Bus, Train, Flight, Taxi";
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => write!(f, "Car"),
            Self::Bus => write!(f, "Bus"),
            Self::Train => write!(f, "Train"),
            Self::Flight => write!(f, "Flight"),
            Self::Taxi => write!(f, "Taxi"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!(Category::parse("food"), Category::Food);
        assert_eq!(Category::parse("FOOD"), Category::Food);
        assert_eq!(Category::parse("Electricity"), Category::Electricity);
        assert_eq!(
            Category::parse("Miscellaneous"),
            Category::Other("Miscellaneous".to_string())
        );
    }

    #[test]
    fn test_category_matches() {
        assert!(Category::Food.matches("food"));
        assert!(Category::Food.matches("FOOD"));
        assert!(!Category::Food.matches("travel"));
        assert!(Category::Other("Miscellaneous".into()).matches("miscellaneous"));
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!(MealType::parse("lunch"), Some(MealType::Lunch));
        assert_eq!(MealType::parse("BREAKFAST"), Some(MealType::Breakfast));
        assert_eq!(MealType::parse("brunch"), None);
    }

    #[test]
    fn test_transport_mode_parse() {
        assert_eq!(TransportMode::parse("Taxi"), Some(TransportMode::Taxi));
        assert_eq!(TransportMode::parse("flight"), Some(TransportMode::Flight));
        assert_eq!(TransportMode::parse("boat"), None);
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!(MealType::Snacks.to_string(), "Snacks");
        assert_eq!(TransportMode::Train.to_string(), "Train");
        assert_eq!(Category::parse("travel").to_string(), "Travel");
    }
}

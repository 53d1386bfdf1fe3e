//! Category enumerations
//!
//! Categories are a closed set. User input is matched against the known
//! labels once, at the boundary; everything past that works with the enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::TransactionKind;

/// Lowercase and drop everything but letters and digits, so that
/// "Rental Income", "rental-income" and "RENTAL_INCOME" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

macro_rules! define_categories {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label, also the stored form
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Parse a label, ignoring case, spaces and punctuation
            pub fn parse(s: &str) -> Result<Self, CategoryParseError> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| normalize(c.label()) == wanted)
                    .ok_or_else(|| CategoryParseError::Unknown {
                        kind: stringify!($name),
                        input: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CategoryParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CategoryParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }
    };
}

define_categories! {
    /// Transaction and budget category
    Category {
        Housing => "Housing",
        Transportation => "Transportation",
        Food => "Food",
        Utilities => "Utilities",
        Insurance => "Insurance",
        Healthcare => "Healthcare",
        Entertainment => "Entertainment",
        Personal => "Personal",
        Education => "Education",
        Debt => "Debt",
        Savings => "Savings",
        GiftsDonations => "Gifts/Donations",
        Salary => "Salary",
        Freelance => "Freelance",
        Investments => "Investments",
        RentalIncome => "Rental Income",
        Interest => "Interest",
        Gifts => "Gifts",
        Other => "Other",
    }
}

define_categories! {
    /// What a savings goal is for
    GoalCategory {
        EmergencyFund => "Emergency Fund",
        Retirement => "Retirement",
        HouseDownPayment => "House Down Payment",
        Car => "Car",
        Vacation => "Vacation",
        Education => "Education",
        Wedding => "Wedding",
        Technology => "Technology",
        Medical => "Medical",
        HomeImprovement => "Home Improvement",
        Business => "Business",
        Other => "Other",
    }
}

impl Category {
    /// Categories that expenses and budgets may use
    pub const EXPENSE: &'static [Category] = &[
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Entertainment,
        Category::Personal,
        Category::Education,
        Category::Debt,
        Category::Savings,
        Category::GiftsDonations,
        Category::Other,
    ];

    /// Categories that income may use
    pub const INCOME: &'static [Category] = &[
        Category::Salary,
        Category::Freelance,
        Category::Investments,
        Category::RentalIncome,
        Category::Interest,
        Category::Gifts,
        Category::Other,
    ];

    pub fn is_expense(&self) -> bool {
        Self::EXPENSE.contains(self)
    }

    pub fn is_income(&self) -> bool {
        Self::INCOME.contains(self)
    }

    /// Whether a transaction of `kind` may be filed under this category
    pub fn allows(&self, kind: TransactionKind) -> bool {
        match kind {
            TransactionKind::Income => self.is_income(),
            TransactionKind::Expense => self.is_expense(),
        }
    }
}

impl Default for GoalCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryParseError {
    #[error("Unknown {kind}: '{input}'")]
    Unknown { kind: &'static str, input: String },
}

//! Spending categories and their display colors
//!
//! The category set is closed: every stored transaction and budget uses one
//! of these ten labels. Presentation code may still hand us arbitrary label
//! strings, so color lookup by label falls back to a default rather than
//! rejecting anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color used for labels outside the closed category set
pub const DEFAULT_CATEGORY_COLOR: &str = "#85C1E9";

/// One of the ten predefined spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in their canonical display order
    pub const ALL: [Category; 10] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Groceries,
        Category::Other,
    ];

    /// The human-readable label, which is also the stored form
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Groceries => "Groceries",
            Self::Other => "Other",
        }
    }

    /// Chart color for this category
    pub const fn color(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "#FF6B6B",
            Self::Transportation => "#4ECDC4",
            Self::Shopping => "#45B7D1",
            Self::Entertainment => "#96CEB4",
            Self::BillsAndUtilities => "#FFEAA7",
            Self::Healthcare => "#DDA0DD",
            Self::Education => "#98D8C8",
            Self::Travel => "#F7DC6F",
            Self::Groceries => "#BB8FCE",
            Self::Other => "#85C1E9",
        }
    }

    /// Labels of every category, in display order
    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(Category::label)
    }
}

/// Color for an arbitrary category label, falling back to the default
pub fn color_for_label(label: &str) -> &'static str {
    label
        .parse::<Category>()
        .map(|c| c.color())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parse a label, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// A label that is not in the closed category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

//! List filters and sort order for transaction queries.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use super::types::TransactionKind;

/// Column a transaction list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Transaction date.
    #[default]
    Date,
    /// Amount.
    Amount,
    /// Category label.
    Category,
    /// Income/expense kind.
    Type,
}

impl SortField {
    /// Parses a sort field, falling back to [`SortField::Date`] for unknown
    /// or missing values.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Whether rows need a secondary `date DESC` ordering.
    #[must_use]
    pub const fn needs_date_tiebreak(&self) -> bool {
        !matches!(self, Self::Date)
    }
}

impl FromStr for SortField {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "type" => Ok(Self::Type),
            other => Err(TransactionError::InvalidSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Only `"asc"` sorts ascending; anything else is descending.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Filter applied when listing or exporting a user's transactions.
///
/// Every bound is inclusive. `date_to` covers the whole day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Only this kind.
    pub kind: Option<TransactionKind>,
    /// Only this exact category.
    pub category: Option<String>,
    /// Case-insensitive substring of the description or category.
    pub search: Option<String>,
    /// Earliest date.
    pub date_from: Option<NaiveDate>,
    /// Latest date.
    pub date_to: Option<NaiveDate>,
    /// Smallest amount.
    pub min_amount: Option<Decimal>,
    /// Largest amount.
    pub max_amount: Option<Decimal>,
    /// Sort column.
    pub sort_by: SortField,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl TransactionFilter {
    /// Checks that the ranges are not inverted.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::InvalidDateRange` or `InvalidAmountRange`.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(TransactionError::InvalidDateRange { from, to });
        }
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount)
            && min > max
        {
            return Err(TransactionError::InvalidAmountRange { min, max });
        }
        Ok(())
    }

    /// Returns the search term as a lowercase `LIKE` pattern, with the
    /// wildcard characters of the term itself escaped by `\`.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())?;

        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.to_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(None, SortField::Date)]
    #[case(Some("amount"), SortField::Amount)]
    #[case(Some("category"), SortField::Category)]
    #[case(Some("type"), SortField::Type)]
    #[case(Some("description"), SortField::Date)]
    fn test_sort_field_fallback(#[case] raw: Option<&str>, #[case] expected: SortField) {
        assert_eq!(SortField::parse_or_default(raw), expected);
    }

    #[test]
    fn test_sort_order_defaults_to_desc() {
        assert_eq!(SortOrder::parse_or_default(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_or_default(Some("ASC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default(None), SortOrder::Desc);
    }

    #[test]
    fn test_date_tiebreak_only_for_other_fields() {
        assert!(!SortField::Date.needs_date_tiebreak());
        assert!(SortField::Amount.needs_date_tiebreak());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let filter = TransactionFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(TransactionError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 1);
        let filter = TransactionFilter {
            date_from: day,
            date_to: day,
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_inverted_amount_range_rejected() {
        let filter = TransactionFilter {
            min_amount: Some(dec!(50)),
            max_amount: Some(dec!(10)),
            ..Default::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(TransactionError::InvalidAmountRange { .. })
        ));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let filter = TransactionFilter {
            search: Some(" 100%_Off ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern().as_deref(), Some("%100\\%\\_off%"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = TransactionFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), None);
    }
}

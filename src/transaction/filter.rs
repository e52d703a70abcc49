//! Turns the month and search text of a request into a store-agnostic [Predicate].

use time::Month;

use crate::Error;

/// Restricts the transactions matched by a store query.
///
/// An empty predicate (the default) matches every transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    /// Only match transactions sold in this month of any year.
    pub month: Option<Month>,
    /// Only match transactions by price or by text.
    pub search: Option<SearchTerm>,
    /// Only match transactions with this sold status.
    pub sold: Option<bool>,
}

impl Predicate {
    /// Match only transactions with the sold status `sold`, on top of the
    /// existing restrictions.
    pub fn with_sold(self, sold: bool) -> Self {
        Self {
            sold: Some(sold),
            ..self
        }
    }
}

/// How search text restricts the matched transactions.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTerm {
    /// The price must equal this value exactly.
    Price(f64),
    /// The title or description must contain this text, ignoring case.
    Text(String),
}

/// Build the predicate for a month and optional search text.
///
/// Search text that parses fully as a finite number matches on the exact
/// price. Any other non-empty text matches titles or descriptions containing
/// it as a case-insensitive substring. Surrounding whitespace is ignored and
/// blank text applies no restriction.
pub fn build_filter(month: Option<Month>, search_text: Option<&str>) -> Predicate {
    let search = search_text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| match text.parse::<f64>() {
            Ok(price) if price.is_finite() => SearchTerm::Price(price),
            _ => SearchTerm::Text(text.to_owned()),
        });

    Predicate {
        month,
        search,
        sold: None,
    }
}

/// Parse the month query parameter, e.g. "3" or "03".
///
/// A missing or blank value means every month.
///
/// # Errors
/// Returns [Error::InvalidMonth] if the value is not a whole number from 1 to 12.
pub fn parse_month(raw: Option<&str>) -> Result<Option<Month>, Error> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    raw.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(Some)
        .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
}

#[cfg(test)]
mod build_filter_tests {
    use time::Month;

    use super::{Predicate, SearchTerm, build_filter};

    #[test]
    fn no_inputs_match_everything() {
        assert_eq!(build_filter(None, None), Predicate::default());
    }

    #[test]
    fn month_only() {
        let got = build_filter(Some(Month::March), None);

        assert_eq!(got.month, Some(Month::March));
        assert_eq!(got.search, None);
    }

    #[test]
    fn numeric_search_matches_price() {
        let got = build_filter(Some(Month::March), Some("150"));

        assert_eq!(got.search, Some(SearchTerm::Price(150.0)));
    }

    #[test]
    fn decimal_search_matches_price() {
        let got = build_filter(None, Some(" 109.95 "));

        assert_eq!(got.search, Some(SearchTerm::Price(109.95)));
    }

    #[test]
    fn text_search_matches_title_or_description() {
        let got = build_filter(None, Some("Backpack"));

        assert_eq!(got.search, Some(SearchTerm::Text("Backpack".to_owned())));
    }

    #[test]
    fn partly_numeric_search_is_text() {
        let got = build_filter(None, Some("150 ml"));

        assert_eq!(got.search, Some(SearchTerm::Text("150 ml".to_owned())));
    }

    #[test]
    fn non_finite_search_is_text() {
        let got = build_filter(None, Some("inf"));

        assert_eq!(got.search, Some(SearchTerm::Text("inf".to_owned())));
    }

    #[test]
    fn blank_search_applies_no_restriction() {
        assert_eq!(build_filter(None, Some("")).search, None);
        assert_eq!(build_filter(None, Some("   ")).search, None);
    }

    #[test]
    fn with_sold_keeps_other_restrictions() {
        let got = build_filter(Some(Month::June), Some("shirt")).with_sold(false);

        assert_eq!(got.month, Some(Month::June));
        assert_eq!(got.search, Some(SearchTerm::Text("shirt".to_owned())));
        assert_eq!(got.sold, Some(false));
    }
}

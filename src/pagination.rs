//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for. Larger sizes are clamped to this.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PaginationConfig {
    /// Parse the page query parameter, counting from 1.
    ///
    /// Missing or blank values use the default page and pages below 1 are
    /// clamped to 1.
    ///
    /// # Errors
    /// Returns [Error::InvalidPage] if the value is not a whole number.
    pub fn parse_page(&self, raw: Option<&str>) -> Result<u64, Error> {
        match raw.map(str::trim) {
            None | Some("") => Ok(self.default_page.max(1)),
            Some(raw) => raw
                .parse::<i64>()
                .map(|page| page.max(1) as u64)
                .map_err(|_| Error::InvalidPage(raw.to_owned())),
        }
    }

    /// Parse the page size query parameter.
    ///
    /// Missing or blank values use the default page size and sizes above
    /// [PaginationConfig::max_page_size] are clamped to it.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if the value is not a whole number greater than zero.
    pub fn parse_page_size(&self, raw: Option<&str>) -> Result<u64, Error> {
        let page_size = match raw.map(str::trim) {
            None | Some("") => self.default_page_size,
            Some(raw) => match raw.parse::<u64>() {
                Ok(page_size) if page_size > 0 => page_size,
                _ => return Err(Error::InvalidPageSize(raw.to_owned())),
            },
        };

        Ok(page_size.clamp(1, self.max_page_size.max(1)))
    }
}

/// The number of records to skip to reach the start of `page`.
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

#[cfg(test)]
mod tests {
    use crate::{Error, pagination::page_offset};

    use super::PaginationConfig;

    #[test]
    fn missing_page_uses_default() {
        let config = PaginationConfig::default();

        assert_eq!(config.parse_page(None), Ok(1));
        assert_eq!(config.parse_page(Some("")), Ok(1));
    }

    #[test]
    fn parses_page() {
        let config = PaginationConfig::default();

        assert_eq!(config.parse_page(Some("4")), Ok(4));
    }

    #[test]
    fn clamps_pages_below_one() {
        let config = PaginationConfig::default();

        assert_eq!(config.parse_page(Some("0")), Ok(1));
        assert_eq!(config.parse_page(Some("-3")), Ok(1));
    }

    #[test]
    fn rejects_non_numeric_page() {
        let config = PaginationConfig::default();

        assert_eq!(
            config.parse_page(Some("two")),
            Err(Error::InvalidPage("two".to_owned()))
        );
    }

    #[test]
    fn missing_page_size_uses_default() {
        let config = PaginationConfig::default();

        assert_eq!(config.parse_page_size(None), Ok(10));
    }

    #[test]
    fn clamps_large_page_size() {
        let config = PaginationConfig::default();

        assert_eq!(config.parse_page_size(Some("5000")), Ok(100));
    }

    #[test]
    fn rejects_zero_and_negative_page_size() {
        let config = PaginationConfig::default();

        assert_eq!(
            config.parse_page_size(Some("0")),
            Err(Error::InvalidPageSize("0".to_owned()))
        );
        assert_eq!(
            config.parse_page_size(Some("-10")),
            Err(Error::InvalidPageSize("-10".to_owned()))
        );
    }

    #[test]
    fn offset_of_first_page_is_zero() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(page_offset(u64::MAX, u64::MAX), u64::MAX);
    }
}

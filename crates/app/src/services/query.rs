//! List queries — paging, sorting and filter criteria for collection reads.

use std::fmt;
use std::str::FromStr;

use libris_domain::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// One sort key, rendered as `property,direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property, self.direction)
    }
}

impl FromStr for Sort {
    type Err = ValidationError;

    /// Parse `property` or `property,asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(',') {
            Some((property, direction)) => (property.trim(), direction.trim()),
            None => (s.trim(), "asc"),
        };
        if property.is_empty() {
            return Err(ValidationError::InvalidSort(s.to_string()));
        }
        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            _ => return Err(ValidationError::InvalidSort(s.to_string())),
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// Options of a list request.
///
/// Rendered as query parameters in the order `page`, `size`, `sort` (one
/// parameter per key), then the filter criteria as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Vec<Sort>,
    pub criteria: Vec<(String, String)>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    /// Add a filter criterion such as `userId.equals=3`.
    #[must_use]
    pub fn criterion(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2 + self.sort.len() + self.criteria.len());
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        params.extend(self.sort.iter().map(|s| ("sort".to_string(), s.to_string())));
        params.extend(self.criteria.iter().cloned());
        params
    }
}

/// One page of a list read.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages, when the server reports it.
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn should_render_no_params_by_default() {
        assert!(QueryOptions::new().to_params().is_empty());
    }

    #[test]
    fn should_render_params_in_order() {
        let options = QueryOptions::new()
            .criterion("status.equals", "false")
            .sort(Sort::desc("due_date"))
            .size(20)
            .page(1)
            .sort(Sort::asc("id"));
        assert_eq!(
            options.to_params(),
            vec![
                pair("page", "1"),
                pair("size", "20"),
                pair("sort", "due_date,desc"),
                pair("sort", "id,asc"),
                pair("status.equals", "false"),
            ]
        );
    }

    #[test]
    fn should_parse_sort_with_and_without_direction() {
        assert_eq!("id".parse::<Sort>().unwrap(), Sort::asc("id"));
        assert_eq!("title, DESC".parse::<Sort>().unwrap(), Sort::desc("title"));
    }

    #[test]
    fn should_reject_malformed_sort() {
        assert!(",asc".parse::<Sort>().is_err());
        assert!("id,sideways".parse::<Sort>().is_err());
    }
}

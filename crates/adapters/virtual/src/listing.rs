//! List reads — filtering, sorting and paging of a stored collection.

use std::cmp::Ordering;

use serde_json::Value;

const DEFAULT_PAGE_SIZE: usize = 20;

/// Parsed list query parameters.
#[derive(Debug, Default)]
pub(crate) struct Listing {
    page: usize,
    size: Option<usize>,
    /// `(property, descending)` in priority order.
    sort: Vec<(String, bool)>,
    criteria: Vec<Criterion>,
}

#[derive(Debug)]
enum Criterion {
    Equals { field: String, value: String },
    Contains { field: String, value: String },
}

impl Listing {
    /// Read `page`, `size`, `sort` and `<field>.equals|contains` parameters.
    /// Other parameters are ignored.
    pub(crate) fn from_query(query: &[(String, String)]) -> Result<Self, String> {
        let mut listing = Self::default();
        for (key, value) in query {
            match key.as_str() {
                "page" => {
                    listing.page = value.parse().map_err(|_| format!("invalid page `{value}`"))?;
                }
                "size" => {
                    let size: usize = value.parse().map_err(|_| format!("invalid size `{value}`"))?;
                    if size == 0 {
                        return Err("size must be positive".to_string());
                    }
                    listing.size = Some(size);
                }
                "sort" => {
                    let (property, direction) = value.split_once(',').unwrap_or((value.as_str(), "asc"));
                    let descending = match direction.trim().to_ascii_lowercase().as_str() {
                        "asc" => false,
                        "desc" => true,
                        _ => return Err(format!("invalid sort `{value}`")),
                    };
                    listing.sort.push((property.trim().to_string(), descending));
                }
                other => {
                    if let Some(field) = other.strip_suffix(".equals") {
                        listing.criteria.push(Criterion::Equals {
                            field: field.to_string(),
                            value: value.clone(),
                        });
                    } else if let Some(field) = other.strip_suffix(".contains") {
                        listing.criteria.push(Criterion::Contains {
                            field: field.to_string(),
                            value: value.to_lowercase(),
                        });
                    }
                }
            }
        }
        Ok(listing)
    }

    /// Return the requested page and the number of matching items.
    pub(crate) fn apply<'a>(&self, items: impl Iterator<Item = &'a Value>) -> (Vec<Value>, usize) {
        let mut matching: Vec<&Value> = items
            .filter(|item| self.criteria.iter().all(|c| c.matches(item)))
            .collect();
        for (property, descending) in self.sort.iter().rev() {
            matching.sort_by(|a, b| {
                let ordering = compare(a.get(property), b.get(property));
                if *descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let total = matching.len();
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        let page = matching
            .into_iter()
            .skip(self.page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();
        (page, total)
    }
}

impl Criterion {
    fn matches(&self, item: &Value) -> bool {
        match self {
            Self::Equals { field, value } => item.get(field).map(scalar).as_deref() == Some(value.as_str()),
            Self::Contains { field, value } => item
                .get(field)
                .map(scalar)
                .is_some_and(|text| text.to_lowercase().contains(value)),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Missing and `null` sort first, then booleans, numbers and strings.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn ids(items: &[Value]) -> Vec<i64> {
        items.iter().filter_map(|v| v["id"].as_i64()).collect()
    }

    fn books() -> Vec<Value> {
        vec![
            json!({ "id": 1, "title": "Emma", "quantity": 2 }),
            json!({ "id": 2, "title": "Dune", "quantity": 5 }),
            json!({ "id": 3, "title": "Beloved", "quantity": 2 }),
            json!({ "id": 4, "title": "Ulysses" }),
        ]
    }

    #[test]
    fn should_return_everything_on_first_page_by_default() {
        let listing = Listing::from_query(&[]).unwrap();
        let (page, total) = listing.apply(books().iter());
        assert_eq!(ids(&page), vec![1, 2, 3, 4]);
        assert_eq!(total, 4);
    }

    #[test]
    fn should_page_through_results() {
        let listing = Listing::from_query(&query(&[("page", "1"), ("size", "3")])).unwrap();
        let (page, total) = listing.apply(books().iter());
        assert_eq!(ids(&page), vec![4]);
        assert_eq!(total, 4);
    }

    #[test]
    fn should_sort_by_keys_in_priority_order() {
        let listing =
            Listing::from_query(&query(&[("sort", "quantity,desc"), ("sort", "title,asc")])).unwrap();
        let (page, _) = listing.apply(books().iter());
        assert_eq!(ids(&page), vec![2, 3, 1, 4]);
    }

    #[test]
    fn should_filter_by_criteria() {
        let listing = Listing::from_query(&query(&[("quantity.equals", "2")])).unwrap();
        let (page, total) = listing.apply(books().iter());
        assert_eq!(ids(&page), vec![1, 3]);
        assert_eq!(total, 2);

        let listing = Listing::from_query(&query(&[("title.contains", "LOV")])).unwrap();
        let (page, _) = listing.apply(books().iter());
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn should_reject_malformed_parameters() {
        assert!(Listing::from_query(&query(&[("page", "-1")])).is_err());
        assert!(Listing::from_query(&query(&[("size", "0")])).is_err());
        assert!(Listing::from_query(&query(&[("sort", "id,up")])).is_err());
    }
}

//! Raw list parameters as they arrive in the query string.

use serde::{Deserialize, Serialize};

use super::plan::{PageNumber, QueryPlan, SortDirection};
use crate::error::ValidationError;
use crate::serde::deserialize_optional_string;

/// Query parameters for listing users (`?age=&sort=&page=`).
///
/// Values are kept as strings so malformed input can be reported as a
/// [`ValidationError`] instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub page: Option<String>,
}

impl TryFrom<ListUsersParams> for QueryPlan {
    type Error = ValidationError;

    fn try_from(params: ListUsersParams) -> Result<Self, Self::Error> {
        let page = match params.page.as_deref() {
            Some(raw) => PageNumber::parse(raw)?,
            None => PageNumber::FIRST,
        };

        let age = match params.age.as_deref() {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| ValidationError::InvalidAge(raw.to_string()))?,
            ),
            None => None,
        };

        // Unknown sort values fall back to the default order.
        let sort = params.sort.as_deref().and_then(SortDirection::parse);

        Ok(QueryPlan { age, sort, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(age: Option<&str>, sort: Option<&str>, page: Option<&str>) -> ListUsersParams {
        ListUsersParams {
            age: age.map(str::to_string),
            sort: sort.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_params_give_default_plan() {
        let plan = QueryPlan::try_from(ListUsersParams::default()).unwrap();

        assert_eq!(plan, QueryPlan::new());
    }

    #[test]
    fn test_full_params() {
        let plan = QueryPlan::try_from(params(Some("30"), Some("desc"), Some("2"))).unwrap();

        assert_eq!(plan.age, Some(30));
        assert_eq!(plan.sort, Some(SortDirection::Desc));
        assert_eq!(plan.page.get(), 2);
    }

    #[test]
    fn test_non_positive_page_rejected() {
        for raw in ["0", "-3"] {
            assert_eq!(
                QueryPlan::try_from(params(None, None, Some(raw))),
                Err(ValidationError::InvalidPage(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_non_numeric_page_rejected() {
        assert!(matches!(
            QueryPlan::try_from(params(None, None, Some("two"))),
            Err(ValidationError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        assert_eq!(
            QueryPlan::try_from(params(Some("30 OR 1=1"), None, None)),
            Err(ValidationError::InvalidAge("30 OR 1=1".to_string()))
        );
    }

    #[test]
    fn test_unknown_sort_ignored() {
        let plan = QueryPlan::try_from(params(None, Some("sideways"), None)).unwrap();

        assert_eq!(plan.sort, None);
    }

    #[test]
    fn test_empty_query_values_are_absent() {
        let params: ListUsersParams =
            serde_json::from_str(r#"{"age": "", "sort": "", "page": ""}"#).unwrap();

        assert_eq!(params, ListUsersParams::default());
        assert_eq!(QueryPlan::try_from(params).unwrap(), QueryPlan::new());
    }
}

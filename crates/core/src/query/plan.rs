use std::num::{IntErrorKind, NonZeroU32};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sort direction on the user name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses the `sort` query value. Only exact `asc` and `desc` are
    /// recognized; anything else yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a page number, rejecting zero.
    pub fn new(page: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(page)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidPage(page.to_string()))
    }

    /// Parses a raw `page` query value.
    ///
    /// Positive integers too large for a `u32` saturate to the last page
    /// number; that page lies past any stored data and lists empty.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPage(raw.to_string());
        match raw.parse::<u32>() {
            Ok(page) => NonZeroU32::new(page).map(Self).ok_or_else(invalid),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Self(NonZeroU32::MAX)),
            Err(_) => Err(invalid()),
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Filter, sort and page intent for one list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryPlan {
    pub age: Option<u32>,
    pub sort: Option<SortDirection>,
    pub page: PageNumber,
}

impl QueryPlan {
    /// Create a plan for the first page with no filter and no sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only match users of exactly this age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sort by name.
    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Select a page.
    pub fn with_page(mut self, page: PageNumber) -> Self {
        self.page = page;
        self
    }
}

use std::num::NonZeroU32;

use super::plan::{QueryPlan, SortDirection};

/// Columns of the `users` table a query may reference.
///
/// Query text only ever contains names produced by [`UserField::column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Age,
}

impl UserField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Age => "age",
        }
    }
}

/// `field = value`, with the value always bound as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualityFilter {
    pub field: UserField,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: UserField,
    pub direction: SortDirection,
}

/// Number of records per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    pub const DEFAULT: Self = Self(NonZeroU32::new(10).unwrap());

    /// Returns `None` for zero.
    pub fn new(size: u32) -> Option<Self> {
        NonZeroU32::new(size).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Backend-neutral retrieval descriptor for one page of users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub filter: Option<EqualityFilter>,
    pub order: Option<OrderBy>,
    pub limit: u32,
    pub offset: u64,
}

impl UserQuery {
    /// Full ordering to apply: the requested order, then identity ascending.
    ///
    /// Without a requested order the result is identity order, which is the
    /// store's natural rowid order. Both backends apply exactly these terms.
    pub fn order_terms(&self) -> Vec<OrderBy> {
        let identity = OrderBy {
            field: UserField::Id,
            direction: SortDirection::Asc,
        };
        match self.order {
            Some(order) if order.field == UserField::Id => vec![order],
            Some(order) => vec![order, identity],
            None => vec![identity],
        }
    }

    /// LIMIT as a bindable SQL integer.
    pub fn limit_param(&self) -> i64 {
        i64::from(self.limit)
    }

    /// OFFSET as a bindable SQL integer, saturating far past any real data.
    pub fn offset_param(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

/// Builds the retrieval descriptor for a plan.
///
/// offset = (page - 1) * page_size.
pub fn build_user_query(plan: &QueryPlan, page_size: PageSize) -> UserQuery {
    let limit = page_size.get();
    let offset = u64::from(plan.page.get() - 1) * u64::from(limit);

    UserQuery {
        filter: plan.age.map(|age| EqualityFilter {
            field: UserField::Age,
            value: i64::from(age),
        }),
        order: plan.sort.map(|direction| OrderBy {
            field: UserField::Name,
            direction,
        }),
        limit,
        offset,
    }
}

//! List query construction.
//!
//! A [`QueryPlan`] captures the filter, sort and page requested by a client.
//! [`build_user_query`] turns it into a [`UserQuery`], the backend-neutral
//! descriptor that both record access implementations execute verbatim.

mod builder;
mod params;
mod plan;

pub use builder::{build_user_query, EqualityFilter, OrderBy, PageSize, UserField, UserQuery};
pub use params::ListUsersParams;
pub use plan::{PageNumber, QueryPlan, SortDirection};

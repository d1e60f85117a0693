//! Paginated list screens: page cursor, search filters and sequence-tagged fetches.

mod controller;
mod cursor;
mod filters;
mod view;

pub use controller::{
    AgreementsList, ApplicationsList, ClientsList, FetchOutcome, FetchedPage, ListController,
    PendingFetch,
};
pub use cursor::{PageCursor, DEFAULT_PAGE_SIZE};
pub use filters::{ClientFilters, ListResource, NoFilters, QueryFilters};
pub use view::{ApplyOutcome, FetchTicket, ListSnapshot, ListView};

use std::marker::PhantomData;

use tracing::{debug, warn};

use super::filters::{ListResource, QueryFilters};
use super::view::{ApplyOutcome, FetchTicket, ListView};
use crate::api::{ApiClient, ApiError, PageQuery};
use crate::domain::{Agreement, Client, CreditApplication, Page};

pub type ApplicationsList = ListController<CreditApplication>;
pub type AgreementsList = ListController<Agreement>;
pub type ClientsList = ListController<Client>;

/// Drives one list screen: owns its view, its search form and the fetches that
/// fill it.
#[derive(Debug)]
pub struct ListController<T: ListResource> {
    client: ApiClient,
    view: ListView<T>,
    draft: T::Filters,
    applied: T::Filters,
}

/// A fetch that has been tagged but not yet sent.
///
/// Running it does not borrow the controller, so several may be in flight at once;
/// [`ListController::complete`] sorts out which response wins.
#[derive(Debug)]
pub struct PendingFetch<T> {
    client: ApiClient,
    ticket: FetchTicket,
    query: PageQuery,
    _rows: PhantomData<fn() -> T>,
}

/// Response of a pending fetch, still tied to its ticket.
#[derive(Debug)]
pub struct FetchedPage<T> {
    ticket: FetchTicket,
    result: Result<Page<T>, ApiError>,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Applied,
    Stale,
    /// The view kept its previous state.
    Failed(ApiError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }
}

impl<T: ListResource> PendingFetch<T> {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub async fn run(self) -> FetchedPage<T> {
        let result = self.client.fetch_page::<T>(T::ENDPOINT, &self.query).await;
        FetchedPage {
            ticket: self.ticket,
            result,
        }
    }
}

impl<T: ListResource> ListController<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            view: ListView::new(),
            draft: T::Filters::default(),
            applied: T::Filters::default(),
        }
    }

    /// Starts with a search already submitted, as when the filters arrive with the request.
    pub fn with_filters(client: ApiClient, filters: T::Filters) -> Self {
        Self {
            client,
            view: ListView::new(),
            draft: filters.clone(),
            applied: filters,
        }
    }

    pub fn view(&self) -> &ListView<T> {
        &self.view
    }

    /// Search form as currently edited; it has no effect until [`Self::search`].
    pub fn filters_mut(&mut self) -> &mut T::Filters {
        &mut self.draft
    }

    pub fn applied_filters(&self) -> &T::Filters {
        &self.applied
    }

    /// Tags a fetch of `page` and prepares the request for it.
    pub fn start(&mut self, page: u32) -> PendingFetch<T> {
        let ticket = self.view.begin(page);
        let query = self.applied.append_to(PageQuery::new(page));
        PendingFetch {
            client: self.client.clone(),
            ticket,
            query,
            _rows: PhantomData,
        }
    }

    /// Applies a finished fetch. Failures are logged and leave the view as it was.
    pub fn complete(&mut self, fetched: FetchedPage<T>) -> FetchOutcome {
        let FetchedPage { ticket, result } = fetched;
        let endpoint = T::ENDPOINT.label();

        match result {
            Ok(page) => match self.view.apply(ticket, page) {
                ApplyOutcome::Applied => FetchOutcome::Applied,
                ApplyOutcome::Stale => {
                    debug!(endpoint, page = ticket.page, sequence = ticket.sequence, "discarding stale page");
                    FetchOutcome::Stale
                }
            },
            Err(error) => {
                warn!(endpoint, page = ticket.page, %error, "failed to load list page");
                FetchOutcome::Failed(error)
            }
        }
    }

    pub async fn fetch_page(&mut self, page: u32) -> FetchOutcome {
        let pending = self.start(page);
        let fetched = pending.run().await;
        self.complete(fetched)
    }

    /// Fetches the page the cursor is on.
    pub async fn load(&mut self) -> FetchOutcome {
        let page = self.view.cursor().page;
        self.fetch_page(page).await
    }

    /// Moving to a different page refetches; staying put does nothing.
    pub async fn go_to(&mut self, page: u32) -> Option<FetchOutcome> {
        if page == 0 || page == self.view.cursor().page {
            return None;
        }
        Some(self.fetch_page(page).await)
    }

    pub async fn next(&mut self) -> Option<FetchOutcome> {
        let page = self.view.cursor().next_page()?;
        Some(self.fetch_page(page).await)
    }

    pub async fn prev(&mut self) -> Option<FetchOutcome> {
        let page = self.view.cursor().prev_page()?;
        Some(self.fetch_page(page).await)
    }

    /// Commits the edited search form and restarts from the first page.
    pub async fn search(&mut self) -> FetchOutcome {
        self.applied = self.draft.clone();
        self.fetch_page(1).await
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{ListEndpoint, PageQuery};
use crate::domain::{Agreement, Client, CreditApplication};

/// Search parameters a list screen appends to its page query.
pub trait QueryFilters: std::fmt::Debug + Clone + Default + Send + Sync + 'static {
    fn append_to(&self, query: PageQuery) -> PageQuery;
}

/// Rows served by one of the remote list endpoints.
pub trait ListResource: DeserializeOwned + Send + 'static {
    type Filters: QueryFilters;

    const ENDPOINT: ListEndpoint;
}

/// Lists that offer no search form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilters;

impl QueryFilters for NoFilters {
    fn append_to(&self, query: PageQuery) -> PageQuery {
        query
    }
}

/// Client search form. Empty fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientFilters {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub phone: String,
    pub passport: String,
}

impl QueryFilters for ClientFilters {
    fn append_to(&self, query: PageQuery) -> PageQuery {
        query
            .filter("firstName", &self.first_name)
            .filter("lastName", &self.last_name)
            .filter("middleName", &self.middle_name)
            .filter("phone", &self.phone)
            .filter("passport", &self.passport)
    }
}

impl ListResource for CreditApplication {
    type Filters = NoFilters;

    const ENDPOINT: ListEndpoint = ListEndpoint::Applications;
}

impl ListResource for Agreement {
    type Filters = NoFilters;

    const ENDPOINT: ListEndpoint = ListEndpoint::Agreements;
}

impl ListResource for Client {
    type Filters = ClientFilters;

    const ENDPOINT: ListEndpoint = ListEndpoint::Clients;
}

use url::form_urlencoded;

/// Paths of the remote API relative to the configured base URL.
pub(crate) const CREATE_APPLICATION_PATH: &str = "/v1/credit-application";

pub(crate) fn signing_path(application_id: i64) -> String {
    format!("/v1/credit-application/{application_id}/signing")
}

/// Read-only list resources exposed by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEndpoint {
    Applications,
    Agreements,
    Clients,
}

impl ListEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ListEndpoint::Applications => "/v1/credit-application/list",
            ListEndpoint::Agreements => "/v1/credit-application/list-agreement",
            ListEndpoint::Clients => "/v1/client/list",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListEndpoint::Applications => "applications",
            ListEndpoint::Agreements => "agreements",
            ListEndpoint::Clients => "clients",
        }
    }
}

/// Page number plus the filters that were non-empty when the search was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub filters: Vec<(&'static str, String)>,
}

impl PageQuery {
    pub fn new(page: u32) -> Self {
        Self {
            page,
            filters: Vec::new(),
        }
    }

    /// Adds a filter unless the value is empty.
    pub fn filter(mut self, name: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.filters.push((name, value.to_string()));
        }
        self
    }

    /// `page=N` followed by the filters in insertion order, URL-encoded.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.page.to_string());
        for (name, value) in &self.filters {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_skips_empty_filters() {
        let query = PageQuery::new(1)
            .filter("firstName", "")
            .filter("phone", "555")
            .filter("passport", "");

        assert_eq!(query.to_query_string(), "page=1&phone=555");
    }

    #[test]
    fn query_string_encodes_filter_values() {
        let query = PageQuery::new(3)
            .filter("lastName", "O'Neil Smith")
            .filter("phone", "+7999");

        assert_eq!(
            query.to_query_string(),
            "page=3&lastName=O%27Neil+Smith&phone=%2B7999"
        );
    }

    #[test]
    fn endpoints_map_to_remote_paths() {
        assert_eq!(ListEndpoint::Agreements.path(), "/v1/credit-application/list-agreement");
        assert_eq!(signing_path(42), "/v1/credit-application/42/signing");
    }
}

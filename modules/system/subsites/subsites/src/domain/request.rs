//! Per-request inputs of the redirect resolver.

use subsites_sdk::{RecordRef, SubsiteId, SubsitesError};

/// An admin URL split into path and query, aware of the switch signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRequest {
    path: String,
    query: Vec<(String, String)>,
    switch_param: String,
}

impl AdminRequest {
    /// Parses `url` (path with optional query string).
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the query string is not form-urlencoded
    pub fn parse(url: &str, switch_param: &str) -> Result<Self, SubsitesError> {
        let (path, raw_query) = url.split_once('?').unwrap_or((url, ""));
        let query: Vec<(String, String)> =
            serde_urlencoded::from_str(raw_query).map_err(|e| SubsitesError::InvalidRequest {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_owned(),
            query,
            switch_param: switch_param.to_owned(),
        })
    }

    /// The subsite the request asks to switch to.
    ///
    /// Non-numeric values are ignored.
    #[must_use]
    pub fn switch_signal(&self) -> Option<SubsiteId> {
        self.query
            .iter()
            .find(|(k, _)| *k == self.switch_param)
            .and_then(|(_, v)| v.trim().parse().ok())
    }

    /// Whether the switch parameter is present, parseable or not.
    #[must_use]
    pub fn has_switch_param(&self) -> bool {
        self.query.iter().any(|(k, _)| *k == self.switch_param)
    }

    /// The URL without any query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.path
    }

    /// The URL with every other query parameter kept and the switch signal removed.
    #[must_use]
    pub fn url_without_signal(&self) -> String {
        let kept: Vec<(&str, &str)> = self
            .query
            .iter()
            .filter(|(k, _)| *k != self.switch_param)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        if kept.is_empty() {
            return self.path.clone();
        }
        match serde_urlencoded::to_string(&kept) {
            Ok(encoded) => format!("{}?{encoded}", self.path),
            Err(_) => self.path.clone(),
        }
    }
}

/// What the resolver needs to know about the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    section: String,
    switch_signal: Option<SubsiteId>,
    switch_requested: bool,
    url: String,
    url_without_signal: String,
    current_record: Option<RecordRef>,
    record_in_url: bool,
}

impl RequestContext {
    /// Context for `section` serving `request`.
    #[must_use]
    pub fn new(section: &str, request: &AdminRequest) -> Self {
        Self {
            section: section.to_owned(),
            switch_signal: request.switch_signal(),
            switch_requested: request.has_switch_param(),
            url: request.url().to_owned(),
            url_without_signal: request.url_without_signal(),
            current_record: None,
            record_in_url: false,
        }
    }

    /// The record the section currently shows (e.g. from the session cache).
    #[must_use]
    pub fn with_current_record(mut self, record: RecordRef) -> Self {
        self.current_record = Some(record);
        self
    }

    /// The record the URL addresses by id (`.../show/<id>`).
    #[must_use]
    pub fn with_record_from_url(mut self, record: RecordRef) -> Self {
        self.current_record = Some(record);
        self.record_in_url = true;
        self
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn switch_signal(&self) -> Option<SubsiteId> {
        self.switch_signal
    }

    /// The URL carries the switch parameter. An unparseable value still
    /// counts, so that the parameter gets stripped.
    #[must_use]
    pub fn switch_requested(&self) -> bool {
        self.switch_requested
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn url_without_signal(&self) -> &str {
        &self.url_without_signal
    }

    #[must_use]
    pub fn current_record(&self) -> Option<&RecordRef> {
        self.current_record.as_ref()
    }

    /// The current record, only when the URL itself addresses it.
    #[must_use]
    pub fn addressed_record(&self) -> Option<&RecordRef> {
        self.current_record.as_ref().filter(|_| self.record_in_url)
    }
}

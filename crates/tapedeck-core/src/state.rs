//! Filter, paging and request-ordering state owned by the console.

/// Number of recordings requested per page
pub const PAGE_SIZE: u32 = 5;

/// Active department/language/filename constraints for the list query.
///
/// Department and language hold comma-joined checked values (`"Sales,HR"`),
/// filename holds trimmed free text. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub department: String,
    pub language: String,
    pub filename: String,
}

impl FilterState {
    /// Build the filter from the checked dropdown values and the filename input
    pub fn from_selection(departments: &[String], languages: &[String], filename: &str) -> Self {
        Self {
            department: departments.join(","),
            language: languages.join(","),
            filename: filename.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_empty() && self.language.is_empty() && self.filename.is_empty()
    }
}

/// Current page and fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    page_size: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl PageCursor {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Advance one page. Whether a next page exists is the backend's call.
    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Go back one page; returns false (and stays put) on page 1
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// Parameters of one `GET /list-audio-files` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub filters: FilterState,
}

impl ListQuery {
    pub fn new(cursor: PageCursor, filters: &FilterState) -> Self {
        Self {
            page: cursor.page(),
            page_size: cursor.page_size(),
            filters: filters.clone(),
        }
    }

    /// Query string pairs in the order the backend documents them.
    /// Empty filters are still sent.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("department", self.filters.department.clone()),
            ("language", self.filters.language.clone()),
            ("filename", self.filters.filename.clone()),
        ]
    }
}

/// Token handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic request counter; only the latest issued token is current.
///
/// Responses are applied in completion order, so a slow response to an older
/// request must not overwrite the result of a newer one.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }
}

/// Session state of the console: paging, filters and in-flight request order
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub cursor: PageCursor,
    pub filters: FilterState,
    pub list_requests: RequestSequence,
    pub detail_requests: RequestSequence,
}

impl ConsoleState {
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.cursor, &self.filters)
    }

    /// Replace the filters; new filter results always start at page 1
    pub fn apply_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.cursor.reset();
    }
}

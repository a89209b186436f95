//! Testing utilities for tagbar
//!
//! Mock collaborators that record what the core asked for, so surfaces can
//! be tested without a bookmark API.
//!
//! Only available when compiled with `cfg(test)`.

use crate::models::{Bookmark, Tag};
use crate::service::{
    DefaultResultService, ResultEvent, ResultSink, SearchService, ServiceError, TagResolver,
};
use std::cell::RefCell;

/// A call received by [`RecordingSearch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCall {
    Title(Vec<String>),
    Text(String),
    Tags(Vec<String>),
    All,
    Resolve(Vec<String>),
}

/// Search, default-result and tag services that record every call
///
/// Searches answer with a single bookmark named after the call. Tag
/// resolution hands out ids in order, starting at 1.
#[derive(Debug, Default)]
pub struct RecordingSearch {
    calls: RefCell<Vec<SearchCall>>,
    fail: bool,
}

impl RecordingSearch {
    /// A service whose every call fails with `ServiceError::Unavailable`
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: RefCell::default(),
            fail: true,
        }
    }

    /// Calls received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: SearchCall) -> Result<Vec<Bookmark>, ServiceError> {
        let title = format!("{call:?}");
        self.calls.borrow_mut().push(call);
        if self.fail {
            return Err(ServiceError::Unavailable("mock offline".to_string()));
        }
        Ok(vec![Bookmark {
            id: 1,
            title,
            url: "https://example.com".to_string(),
            tags: Vec::new(),
        }])
    }
}

impl SearchService for RecordingSearch {
    fn search_by_title(&self, keywords: &[&str]) -> Result<Vec<Bookmark>, ServiceError> {
        self.record(SearchCall::Title(
            keywords.iter().map(ToString::to_string).collect(),
        ))
    }

    fn search_by_text(&self, text: &str) -> Result<Vec<Bookmark>, ServiceError> {
        self.record(SearchCall::Text(text.to_string()))
    }

    fn search_by_tags(&self, tags: &[String]) -> Result<Vec<Bookmark>, ServiceError> {
        self.record(SearchCall::Tags(tags.to_vec()))
    }
}

impl DefaultResultService for RecordingSearch {
    fn all_bookmarks(&self) -> Result<Vec<Bookmark>, ServiceError> {
        self.record(SearchCall::All)
    }
}

impl TagResolver for RecordingSearch {
    fn resolve_tags(&self, titles: &[String]) -> Result<Vec<Tag>, ServiceError> {
        self.record(SearchCall::Resolve(titles.to_vec()))?;
        Ok(titles
            .iter()
            .zip(1..)
            .map(|(title, id)| Tag::new(id, title.clone()))
            .collect())
    }
}

/// Sink that keeps every event it receives
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<ResultEvent>,
}

impl ResultSink for CollectingSink {
    fn replace_results(&mut self, event: ResultEvent) {
        self.events.push(event);
    }
}

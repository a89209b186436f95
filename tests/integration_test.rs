//! Integration tests for tagbar
//!
//! These tests drive the search bar and the bookmark form the way a host UI
//! would, running every issued request against an in-memory bookmark library.

use std::cell::RefCell;
use tagbar::input::Key;
use tagbar::mode::Mode;
use tagbar::models::{Bookmark, Tag};
use tagbar::reconcile::{SearchQuery, SearchRequest};
use tagbar::service::{
    DefaultResultService, Dispatcher, LatestResults, ResultEvent, SearchService, ServiceError,
    TagResolver,
};
use tagbar::surface::{BookmarkForm, FormError, SearchBar};

/// In-memory stand-in for the bookmark API
struct Library {
    bookmarks: Vec<Bookmark>,
    tags: RefCell<Vec<Tag>>,
}

impl Library {
    fn new() -> Self {
        let rust = Tag::new(1, "rust");
        let web = Tag::new(2, "web");
        Self {
            bookmarks: vec![
                bookmark(1, "The Rust Book", "https://doc.rust-lang.org/book", &[&rust]),
                bookmark(2, "MDN Web Docs", "https://developer.mozilla.org", &[&web]),
                bookmark(3, "Rust and WebAssembly", "https://rustwasm.github.io", &[&rust, &web]),
            ],
            tags: RefCell::new(vec![rust, web]),
        }
    }
}

impl SearchService for Library {
    fn search_by_title(&self, keywords: &[&str]) -> Result<Vec<Bookmark>, ServiceError> {
        Ok(self
            .bookmarks
            .iter()
            .filter(|b| {
                let title = b.title.to_lowercase();
                keywords.iter().any(|k| title.contains(&k.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    fn search_by_text(&self, text: &str) -> Result<Vec<Bookmark>, ServiceError> {
        Ok(self
            .bookmarks
            .iter()
            .filter(|b| b.url.contains(text))
            .cloned()
            .collect())
    }

    fn search_by_tags(&self, tags: &[String]) -> Result<Vec<Bookmark>, ServiceError> {
        Ok(self
            .bookmarks
            .iter()
            .filter(|b| tags.iter().all(|t| b.tags.iter().any(|tag| &tag.title == t)))
            .cloned()
            .collect())
    }
}

impl DefaultResultService for Library {
    fn all_bookmarks(&self) -> Result<Vec<Bookmark>, ServiceError> {
        Ok(self.bookmarks.clone())
    }
}

impl TagResolver for Library {
    fn resolve_tags(&self, titles: &[String]) -> Result<Vec<Tag>, ServiceError> {
        let mut tags = self.tags.borrow_mut();
        let resolved = titles
            .iter()
            .map(|title| {
                if let Some(tag) = tags.iter().find(|t| &t.title == title) {
                    return tag.clone();
                }
                let tag = Tag::new(tags.len() as i64 + 1, title.clone());
                tags.push(tag.clone());
                tag
            })
            .collect();
        Ok(resolved)
    }
}

/// Helper function to build a bookmark
fn bookmark(id: i64, title: &str, url: &str, tags: &[&Tag]) -> Bookmark {
    Bookmark {
        id,
        title: title.to_string(),
        url: url.to_string(),
        tags: tags.iter().map(|t| (*t).clone()).collect(),
    }
}

/// Helper function to run a request and return the result ids
fn run(library: &Library, request: &SearchRequest) -> Vec<i64> {
    let dispatcher = Dispatcher::new(library, library);
    let mut ids = Vec::new();
    let mut sink = |event: ResultEvent| ids = event.bookmarks.iter().map(|b| b.id).collect();
    dispatcher.dispatch(request, &mut sink).unwrap();
    ids
}

/// Helper function to type text into the search bar, collecting requests
fn type_keys(bar: &mut SearchBar, text: &str) -> Vec<SearchRequest> {
    Key::typed(text)
        .filter_map(|key| bar.handle_key(key).request)
        .collect()
}

#[test]
fn test_title_search_to_tag_search_and_back() {
    let library = Library::new();
    let mut bar = SearchBar::builder().build().unwrap();

    let request = bar.handle_input("rust web").unwrap();
    assert_eq!(run(&library, &request), vec![1, 2, 3]);

    // Title -> Text -> Tag
    bar.cycle_mode();
    let request = bar.cycle_mode();
    assert_eq!(bar.mode(), Mode::TagSearch);
    assert_eq!(bar.staging(), "");
    assert_eq!(bar.tokens().to_strings(), vec!["rust", "web"]);
    assert_eq!(run(&library, &request), vec![3]);

    // Tag -> Title joins the tags back into text
    let request = bar.cycle_mode();
    assert_eq!(bar.mode(), Mode::TitleSearch);
    assert_eq!(bar.staging(), "rust web");
    assert!(bar.tokens().is_empty());
    assert_eq!(request.query, SearchQuery::Title("rust web".to_string()));
}

#[test]
fn test_typing_tags_searches_on_commit() {
    let library = Library::new();
    let mut bar = SearchBar::builder().initial_mode(Mode::TagSearch).build().unwrap();

    let requests = type_keys(&mut bar, "rust web ");

    // Pending text before the first commit matches nothing
    assert_eq!(requests.len(), 3);
    assert!(run(&library, &requests[0]).is_empty());
    assert_eq!(run(&library, &requests[1]), vec![1, 3]);
    assert_eq!(run(&library, &requests[2]), vec![3]);

    // Backspace on the empty buffer restores "web" for editing
    let response = bar.handle_key(Key::Backspace);
    assert!(response.suppresses_default());
    assert_eq!(bar.staging(), "web");
    let request = response.request.unwrap();
    assert_eq!(run(&library, &request), vec![1, 3]);
}

#[test]
fn test_command_prefix_switches_mode() {
    let library = Library::new();
    let mut bar = SearchBar::builder().build().unwrap();

    let request = bar.handle_input("/f mozilla").unwrap();

    assert_eq!(bar.mode(), Mode::TextSearch);
    assert_eq!(bar.staging(), "mozilla");
    assert_eq!(run(&library, &request), vec![2]);
    assert_eq!(bar.mode_indicator(), "/f");
}

#[test]
fn test_clearing_search_shows_everything() {
    let library = Library::new();
    let mut bar = SearchBar::builder().build().unwrap();

    bar.handle_input("book");
    let request = bar.reset().unwrap();

    assert!(request.query.is_default());
    assert_eq!(run(&library, &request), vec![1, 2, 3]);
}

#[test]
fn test_stale_results_are_dropped() {
    let library = Library::new();
    let dispatcher = Dispatcher::new(&library, &library);
    let mut bar = SearchBar::builder().build().unwrap();
    let mut events = Vec::new();
    let mut results = LatestResults::new(|event: ResultEvent| events.push(event));

    let first = bar.handle_input("rust").unwrap();
    results.issued(&first);
    let second = bar.handle_input("mdn").unwrap();
    results.issued(&second);

    // The older response arrives last
    dispatcher.dispatch(&second, &mut results).unwrap();
    dispatcher.dispatch(&first, &mut results).unwrap();
    drop(results);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].generation, second.generation);
    assert_eq!(events[0].bookmarks[0].id, 2);
}

#[test]
fn test_pasted_tags_commit_as_separate_tags() {
    let library = Library::new();
    let mut bar = SearchBar::builder().initial_mode(Mode::TagSearch).build().unwrap();

    let request = bar.handle_input("rust web").unwrap();
    assert!(run(&library, &request).is_empty());

    let request = bar.handle_key(Key::Enter).request.unwrap();
    assert_eq!(bar.tokens().to_strings(), vec!["rust", "web"]);
    assert_eq!(run(&library, &request), vec![3]);
}

#[test]
fn test_bookmark_form_submit() {
    let library = Library::new();
    let mut form = BookmarkForm::builder().build().unwrap();

    form.set_url("https://tokio.rs");
    for key in Key::typed("rust async\n") {
        form.handle_key(key);
    }
    let request = form.submit(&library).unwrap();

    assert_eq!(request.url, "https://tokio.rs");
    assert_eq!(request.title, "https://tokio.rs");
    assert_eq!(request.tag_ids, vec![1, 3]);
    assert_eq!(library.tags.borrow().len(), 3);
    assert!(form.tags().is_empty());
}

#[test]
fn test_bookmark_form_rejects_missing_url() {
    let library = Library::new();
    let mut form = BookmarkForm::builder().build().unwrap();
    for key in Key::typed("rust ") {
        form.handle_key(key);
    }

    let result = form.submit(&library);

    assert_eq!(result, Err(FormError::InvalidUrl("Required".to_string())));
    assert_eq!(form.tags().len(), 1);
}

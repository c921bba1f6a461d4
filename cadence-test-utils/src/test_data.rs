// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixtures modelled on search-as-you-type: a user types "rust" one key at a
//! time into one of two search boxes.

/// Text typed so far, with the keystroke count that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub text: String,
    pub keystrokes: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let keystrokes = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        Self { text, keystrokes }
    }
}

/// Receiver context: the widget a query was typed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchBox {
    pub id: &'static str,
}

#[must_use]
pub fn query_r() -> SearchQuery {
    SearchQuery::new("r")
}

#[must_use]
pub fn query_ru() -> SearchQuery {
    SearchQuery::new("ru")
}

#[must_use]
pub fn query_rus() -> SearchQuery {
    SearchQuery::new("rus")
}

#[must_use]
pub fn query_rust() -> SearchQuery {
    SearchQuery::new("rust")
}

/// The four queries produced by typing "rust".
#[must_use]
pub fn typing_rust() -> Vec<SearchQuery> {
    vec![query_r(), query_ru(), query_rus(), query_rust()]
}

#[must_use]
pub const fn header_search() -> SearchBox {
    SearchBox { id: "header" }
}

#[must_use]
pub const fn sidebar_search() -> SearchBox {
    SearchBox { id: "sidebar" }
}

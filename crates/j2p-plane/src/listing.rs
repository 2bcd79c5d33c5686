//! Cursor-paginated list endpoints.
//!
//! Plane answers list calls either with a bare JSON array or with a page
//! object carrying `results`, `next_cursor` and `next_page_results`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::PlaneClient;
use crate::error::PlaneError;
use crate::http::{check_response, read_json};

/// Items requested per page.
const PAGE_SIZE: u32 = 100;

/// Upper bound on pages followed for one listing.
const MAX_PAGES: usize = 1000;

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

#[derive(Deserialize)]
struct Page<T> {
    results: Vec<T>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    next_page_results: bool,
}

impl<T> Listing<T> {
    /// Split into this page's items and the cursor of the next page, if any.
    fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Self::Bare(items) => (items, None),
            Self::Paged(page) => {
                let next = page
                    .next_cursor
                    .filter(|cursor| page.next_page_results && !cursor.is_empty());
                (page.results, next)
            }
        }
    }
}

fn page_url(base: &str, cursor: Option<&str>) -> String {
    match cursor {
        Some(cursor) => format!(
            "{base}?per_page={PAGE_SIZE}&cursor={}",
            urlencoding::encode(cursor)
        ),
        None => format!("{base}?per_page={PAGE_SIZE}"),
    }
}

/// Fetch pages until one has no next cursor or `max_pages` were read.
///
/// Returns the items and whether the listing was exhausted.
async fn collect_pages<T, F, Fut>(max_pages: usize, mut fetch: F) -> Result<(Vec<T>, bool), PlaneError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Listing<T>, PlaneError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    for _ in 0..max_pages {
        let (page, next) = fetch(cursor.take()).await?.into_parts();
        items.extend(page);
        match next {
            Some(next) => cursor = Some(next),
            None => return Ok((items, true)),
        }
    }
    Ok((items, false))
}

impl PlaneClient {
    /// GET every page of a list endpoint.
    pub(crate) async fn get_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, PlaneError> {
        let (items, exhausted) = collect_pages(MAX_PAGES, |cursor| async move {
            let page_url = page_url(url, cursor.as_deref());
            tracing::debug!(url = %page_url, "GET");
            let resp = check_response(self.http.get(&page_url).send().await?, "GET").await?;
            read_json::<Listing<T>>(resp, "GET").await
        })
        .await?;

        if !exhausted {
            tracing::warn!(url, pages = MAX_PAGES, "stopped following pagination");
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn bare_array_is_a_single_page() {
        let listing: Listing<Item> = serde_json::from_str(r#"[{"name":"a"},{"name":"b"}]"#).unwrap();
        let (items, next) = listing.into_parts();
        assert_eq!(items.len(), 2);
        assert_eq!(next, None);
    }

    #[test]
    fn paged_listing_yields_next_cursor() {
        let listing: Listing<Item> = serde_json::from_str(
            r#"{
                "grouped_by": null,
                "next_cursor": "100:1:0",
                "prev_cursor": "100:-1:1",
                "next_page_results": true,
                "total_pages": 2,
                "results": [{"name": "auth"}]
            }"#,
        )
        .unwrap();
        let (items, next) = listing.into_parts();
        assert_eq!(items, vec![Item { name: "auth".to_string() }]);
        assert_eq!(next.as_deref(), Some("100:1:0"));
    }

    #[test]
    fn last_page_has_no_next_cursor() {
        let listing: Listing<Item> = serde_json::from_str(
            r#"{"next_cursor": "100:2:0", "next_page_results": false, "results": []}"#,
        )
        .unwrap();
        let (items, next) = listing.into_parts();
        assert!(items.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn page_url_encodes_cursor() {
        assert_eq!(page_url("https://p/labels/", None), "https://p/labels/?per_page=100");
        assert_eq!(
            page_url("https://p/labels/", Some("100:1:0")),
            "https://p/labels/?per_page=100&cursor=100%3A1%3A0"
        );
    }

    fn page(names: &[&str], next: Option<&str>) -> Listing<Item> {
        Listing::Paged(Page {
            results: names
                .iter()
                .map(|name| Item {
                    name: (*name).to_string(),
                })
                .collect(),
            next_cursor: next.map(str::to_string),
            next_page_results: next.is_some(),
        })
    }

    #[tokio::test]
    async fn collect_pages_follows_cursors_to_the_last_page() {
        let mut requested = Vec::new();
        let (items, exhausted) = collect_pages(MAX_PAGES, |cursor: Option<String>| {
            requested.push(cursor.clone());
            let listing = match cursor.as_deref() {
                None => page(&["backlog"], Some("100:1:0")),
                Some("100:1:0") => page(&["todo", "doing"], Some("100:2:0")),
                _ => page(&["done"], None),
            };
            async move { Ok(listing) }
        })
        .await
        .unwrap();

        let names = items.iter().map(|item| item.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["backlog", "todo", "doing", "done"]);
        assert!(exhausted);
        assert_eq!(
            requested,
            vec![
                None,
                Some("100:1:0".to_string()),
                Some("100:2:0".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn collect_pages_stops_at_page_limit() {
        let mut fetched = 0;
        let (items, exhausted) = collect_pages(3, |_cursor: Option<String>| {
            fetched += 1;
            async { Ok(page(&["again"], Some("loop"))) }
        })
        .await
        .unwrap();

        assert_eq!(fetched, 3);
        assert_eq!(items.len(), 3);
        assert!(!exhausted);
    }

    #[tokio::test]
    async fn collect_pages_propagates_fetch_errors() {
        let result: Result<(Vec<Item>, bool), PlaneError> =
            collect_pages(MAX_PAGES, |_cursor: Option<String>| async {
                Err(PlaneError::Parse("bad page".to_string()))
            })
            .await;
        assert!(matches!(result, Err(PlaneError::Parse(_))));
    }
}

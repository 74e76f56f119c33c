//! Live adapter for the `ObjectStore` port using the S3 REST API.
//!
//! Requests are unsigned, which is enough for the public NeuronBridge
//! buckets. Listings use `ListObjectsV2` with a `/` delimiter and follow
//! continuation tokens until the listing is complete.

use std::future::Future;

use reqwest::Client;
use tracing::{debug, trace};

use crate::ports::{ListFuture, ObjectStore, PortError};

/// Default S3 endpoint used for path-style requests.
pub const DEFAULT_S3_ENDPOINT: &str = "https://s3.amazonaws.com";

/// Live object store that lists S3 common prefixes over HTTPS.
pub struct LiveObjectStore {
    client: Client,
    endpoint: String,
}

impl LiveObjectStore {
    /// Creates a store talking to `endpoint` (for example
    /// [`DEFAULT_S3_ENDPOINT`] or a local S3-compatible server).
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }

    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        token: Option<&str>,
    ) -> Result<ListPage, PortError> {
        let url = format!("{}/{bucket}", self.endpoint.trim_end_matches('/'));
        let mut query = vec![("list-type", "2"), ("delimiter", "/"), ("prefix", prefix)];
        if let Some(token) = token {
            query.push(("continuation-token", token));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| PortError::from(format!("S3 list request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::from(format!("Failed to read S3 list response: {e}")))?;

        if !status.is_success() {
            let message = element_texts(&body, "Message").into_iter().next().unwrap_or(&body);
            return Err(format!("S3 error ({}) listing {bucket}: {message}", status.as_u16()).into());
        }

        Ok(parse_list_page(&body))
    }
}

impl Default for LiveObjectStore {
    fn default() -> Self {
        Self::new(DEFAULT_S3_ENDPOINT)
    }
}

impl ObjectStore for LiveObjectStore {
    fn list_prefixes<'a>(&'a self, bucket: &'a str, prefix: &'a str) -> ListFuture<'a> {
        Box::pin(async move {
            let prefixes = collect_pages(move |token| async move {
                self.list_page(bucket, prefix, token.as_deref()).await
            })
            .await?;
            debug!(bucket, prefix, count = prefixes.len(), "listed S3 prefixes");
            Ok(prefixes)
        })
    }
}

/// Fetches pages until one comes back without a continuation token.
///
/// `fetch` receives the token from the previous page (`None` first). A
/// server that hands back the token it was just given is an error.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<String>, PortError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListPage, PortError>>,
{
    let mut prefixes = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = fetch(token.clone()).await?;
        trace!(count = page.prefixes.len(), "listed S3 page");
        prefixes.extend(page.prefixes);
        match page.next_token {
            Some(next) if token.as_deref() == Some(next.as_str()) => {
                return Err(format!("S3 repeated continuation token {next}").into());
            }
            Some(next) => token = Some(next),
            None => return Ok(prefixes),
        }
    }
}

/// One page of a `ListObjectsV2` response.
#[derive(Debug, PartialEq)]
struct ListPage {
    prefixes: Vec<String>,
    next_token: Option<String>,
}

fn parse_list_page(body: &str) -> ListPage {
    let prefixes = element_texts(body, "CommonPrefixes")
        .into_iter()
        .filter_map(|block| element_texts(block, "Prefix").into_iter().next())
        .map(unescape)
        .collect();
    let truncated = element_texts(body, "IsTruncated").first().is_some_and(|v| *v == "true");
    let next_token = if truncated {
        element_texts(body, "NextContinuationToken").into_iter().next().map(unescape)
    } else {
        None
    };
    ListPage { prefixes, next_token }
}

/// Returns the raw text of every `<tag>...</tag>` element in `xml`.
///
/// S3 list responses carry no attributes or CDATA on these elements, so a
/// plain scan is enough.
fn element_texts<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut found = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find(&open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(&close) else {
            break;
        };
        found.push(&after_open[..end]);
        rest = &after_open[end + close.len()..];
    }
    found
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>janelia-flylight-color-depth</Name>
  <Prefix>JRC2018_Unisex_20x_HR/</Prefix>
  <KeyCount>2</KeyCount>
  <Delimiter>/</Delimiter>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>1ueGcxLPRx1Tr/XYExHnhbYLgveDs2J/wm36Hy4vbOwM=</NextContinuationToken>
  <CommonPrefixes><Prefix>JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/</Prefix></CommonPrefixes>
  <CommonPrefixes><Prefix>JRC2018_Unisex_20x_HR/FlyLight_Split-GAL4_Drivers/</Prefix></CommonPrefixes>
</ListBucketResult>"#;

    #[test]
    fn parses_common_prefixes_but_not_request_prefix() {
        let page = parse_list_page(PAGE);
        assert_eq!(
            page.prefixes,
            vec![
                "JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/",
                "JRC2018_Unisex_20x_HR/FlyLight_Split-GAL4_Drivers/",
            ]
        );
        assert_eq!(page.next_token.as_deref(), Some("1ueGcxLPRx1Tr/XYExHnhbYLgveDs2J/wm36Hy4vbOwM="));
    }

    #[test]
    fn complete_listing_has_no_token() {
        let body = "<ListBucketResult><IsTruncated>false</IsTruncated>\
                    <NextContinuationToken>ignored</NextContinuationToken></ListBucketResult>";
        let page = parse_list_page(body);
        assert!(page.prefixes.is_empty());
        assert_eq!(page.next_token, None);
    }

    #[test]
    fn entities_are_unescaped() {
        let body = "<CommonPrefixes><Prefix>A&amp;B/</Prefix></CommonPrefixes>";
        assert_eq!(parse_list_page(body).prefixes, vec!["A&B/"]);
    }

    fn page(prefixes: &[&str], next_token: Option<&str>) -> ListPage {
        ListPage {
            prefixes: prefixes.iter().map(|p| (*p).to_string()).collect(),
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn paging_follows_tokens_until_the_last_page() {
        let mut pages = vec![
            page(&["JRC2018_Unisex_20x_HR/"], Some("t1")),
            page(&["JRC2018_VNC_Unisex_40x_DS/"], Some("t2")),
            page(&["Other/"], None),
        ]
        .into_iter();
        let mut seen = Vec::new();

        let prefixes = collect_pages(|token| {
            seen.push(token);
            let next = pages.next();
            async move { next.ok_or_else(|| PortError::from("asked for too many pages")) }
        })
        .await
        .unwrap();

        assert_eq!(prefixes, vec!["JRC2018_Unisex_20x_HR/", "JRC2018_VNC_Unisex_40x_DS/", "Other/"]);
        assert_eq!(seen, vec![None, Some("t1".to_string()), Some("t2".to_string())]);
    }

    #[tokio::test]
    async fn paging_stops_on_a_failed_page() {
        let mut calls = 0;
        let result = collect_pages(|_| {
            calls += 1;
            let page = if calls == 1 {
                Ok(page(&["A/"], Some("t1")))
            } else {
                Err(PortError::from("S3 error (503) listing bucket: Slow Down"))
            };
            async move { page }
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "S3 error (503) listing bucket: Slow Down");
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn repeated_token_is_an_error() {
        let result = collect_pages(|_| async { Ok(page(&["A/"], Some("stuck"))) }).await;
        assert!(result.unwrap_err().to_string().contains("stuck"));
    }
}

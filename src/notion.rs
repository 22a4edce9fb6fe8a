use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// The trip-planning database this tool syncs from.
const DATABASE_ID: &str = "f3a9c1d27b5e4e0a8d14b6c2a7e90f31";
const NOTION_VERSION: &str = "2022-06-28";

/// One raw database row: an opaque id plus a bag of typed properties
/// keyed by column name.
#[derive(Debug, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: std::collections::HashMap<String, Property>,
}

/// The property kinds this tool reads. Anything else (checkbox, date,
/// relation, ...) lands in `Other` and normalizes to a zero value.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(default)]
        title: Vec<TextRun>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<TextRun>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Number {
        number: Option<f64>,
    },
    Url {
        url: Option<String>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Query the places database and return every row, following the
/// pagination cursor until the result set is exhausted.
pub async fn query_database(token: &str) -> Result<Vec<Page>> {
    let client = reqwest::Client::new();
    let url = format!("https://api.notion.com/v1/databases/{DATABASE_ID}/query");

    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let mut body = serde_json::Map::new();
        if let Some(c) = &cursor {
            body.insert("start_cursor".into(), serde_json::Value::String(c.clone()));
        }

        let response: QueryResponse = client
            .post(&url)
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .context("Notion query request failed")?
            .error_for_status()
            .context("Notion query returned an error status")?
            .json()
            .await
            .context("Failed to parse Notion query response")?;

        pages.extend(response.results);

        match (response.has_more, response.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    info!("Fetched {} records from Notion", pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_page_properties() {
        let json = r#"{
            "id": "abc-123",
            "properties": {
                "Name": {"id": "title", "type": "title",
                         "title": [{"type": "text", "plain_text": "Trattoria X"}]},
                "Category": {"id": "a1", "type": "select", "select": {"name": "Trattoria"}},
                "Rating": {"id": "b2", "type": "number", "number": 4.5},
                "Website": {"id": "c3", "type": "url", "url": null},
                "Phone": {"id": "d4", "type": "phone_number", "phone_number": "+39 06 123"},
                "Visited": {"id": "e5", "type": "checkbox", "checkbox": true}
            }
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.id, "abc-123");
        assert!(matches!(page.properties["Name"], Property::Title { .. }));
        assert!(matches!(
            page.properties["Category"],
            Property::Select { .. }
        ));
        assert!(matches!(
            page.properties["Rating"],
            Property::Number { number: Some(n) } if n == 4.5
        ));
        assert!(matches!(page.properties["Website"], Property::Url { url: None }));
        // Unread property kinds must not break deserialization
        assert!(matches!(page.properties["Visited"], Property::Other));
    }

    #[test]
    fn deserialize_query_response_cursor() {
        let json = r#"{"results": [], "has_more": true, "next_cursor": "cur-1"}"#;
        let resp: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(resp.has_more);
        assert_eq!(resp.next_cursor.as_deref(), Some("cur-1"));

        let json = r#"{"results": []}"#;
        let resp: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.has_more);
        assert!(resp.next_cursor.is_none());
    }
}

use {serde::Deserialize, tracing::warn};

use crate::salary::format_salary;

/// Public job-listing API queried when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.hh.ru/vacancies";

/// Listings returned per search, in provider order.
pub const PAGE_SIZE: usize = 5;

/// One normalized listing ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub title: String,
    pub url: String,
    pub employer: Option<String>,
    /// Already-normalized salary display text.
    pub salary: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Vacancy>,
}

#[derive(Debug, Deserialize)]
struct Vacancy {
    name: String,
    alternate_url: String,
    #[serde(default)]
    employer: Option<Employer>,
    #[serde(default)]
    salary: Option<Salary>,
}

#[derive(Debug, Deserialize)]
struct Employer {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Salary {
    #[serde(default)]
    from: Option<i64>,
    #[serde(default)]
    to: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
}

/// Client for the external listing catalog.
pub struct ListingClient {
    client: reqwest::Client,
    base_url: String,
}

impl ListingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search listings for a region and keyword.
    ///
    /// Keyword may be empty (broad match). Bounded to [`PAGE_SIZE`] entries,
    /// kept in provider order. Provider failures — transport errors,
    /// non-success status, malformed payloads — degrade to an empty result
    /// and are logged with the request parameters; the search is advisory
    /// and never fails the surrounding interaction.
    pub async fn search(&self, region_id: i64, keyword: &str) -> Vec<ListingSummary> {
        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("text", keyword),
                ("area", &region_id.to_string()),
                ("per_page", &PAGE_SIZE.to_string()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(region_id, keyword, error = %e, "listing provider unreachable");
                return Vec::new();
            },
        };

        let status = response.status();
        if !status.is_success() {
            warn!(region_id, keyword, %status, "listing provider returned non-success status");
            return Vec::new();
        }

        let body = match response.json::<SearchResponse>().await {
            Ok(body) => body,
            Err(e) => {
                warn!(region_id, keyword, error = %e, "malformed listing provider payload");
                return Vec::new();
            },
        };

        body.items
            .into_iter()
            .take(PAGE_SIZE)
            .map(|vacancy| {
                let salary = match vacancy.salary {
                    Some(s) => format_salary(s.from, s.to, s.currency.as_deref()),
                    None => format_salary(None, None, None),
                };
                ListingSummary {
                    title: vacancy.name,
                    url: vacancy.alternate_url,
                    employer: vacancy.employer.and_then(|e| e.name),
                    salary,
                }
            })
            .collect()
    }
}

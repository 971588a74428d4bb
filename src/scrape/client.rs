use super::types::ScrapeError;
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the booking site's per-day grid pages.
#[derive(Clone)]
pub struct BookingClient {
    client: Client,
    base_url: String,
}

impl BookingClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// GET one (date, area) grid page and return the raw HTML. Transport
    /// errors and non-2xx statuses both surface as fetch errors; the run
    /// loop skips the pair and moves on.
    pub async fn fetch_day(&self, date: NaiveDate, area: u32) -> Result<String, ScrapeError> {
        let url = self.day_url(date, area);
        tracing::debug!("Fetching booking grid from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// The site puts the day of week first in dayChanger and then ignores
    /// it; the leading `+` stands for that empty first value and the query
    /// is rejected without it, so the string is assembled by hand instead
    /// of going through an encoder.
    fn day_url(&self, date: NaiveDate, area: u32) -> String {
        format!(
            "{}/sbs/day.php?area={}&dayChanger=+{}+{}+{}",
            self.base_url,
            area,
            date.day(),
            date.month(),
            date.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_url_preserves_day_changer_quirk() {
        let client = BookingClient::new("https://example.org".to_string());
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();

        assert_eq!(
            client.day_url(date, 2),
            "https://example.org/sbs/day.php?area=2&dayChanger=+4+8+2026"
        );
    }
}

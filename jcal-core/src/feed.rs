//! Fetching and validating the remote calendar feed.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::{JcalError, JcalResult};
use crate::event::Event;
use crate::ics::parse_calendar;

const CALENDAR_MARKER: &[u8] = b"BEGIN:VCALENDAR";
/// How far into the body the calendar marker must appear.
const SNIFF_LEN: usize = 200;

/// Subscription links often use the webcal scheme; fetch them over https.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    match url.strip_prefix("webcal://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// Download the raw feed bytes.
pub async fn fetch_feed(url: &str, timeout: Duration) -> JcalResult<Vec<u8>> {
    let url = normalize_url(url);
    if url.is_empty() {
        return Err(JcalError::Fetch("no feed URL given".to_string()));
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("jcal/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| JcalError::Fetch(e.to_string()))?;

    debug!(%url, ?timeout, "fetching feed");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| JcalError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(JcalError::Fetch(format!("HTTP {status} from {url}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| JcalError::Fetch(e.to_string()))?;
    info!(bytes = bytes.len(), "feed downloaded");
    Ok(bytes.to_vec())
}

/// Accept only bodies that start out like an iCalendar document.
pub fn validate_feed(bytes: &[u8]) -> JcalResult<()> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    if head
        .windows(CALENDAR_MARKER.len())
        .any(|window| window == CALENDAR_MARKER)
    {
        Ok(())
    } else {
        Err(JcalError::Validation(format!(
            "no BEGIN:VCALENDAR within the first {SNIFF_LEN} bytes"
        )))
    }
}

/// Validate, parse and classify a downloaded feed.
pub fn read_events(bytes: &[u8]) -> JcalResult<Vec<Event>> {
    validate_feed(bytes)?;
    parse_calendar(bytes)?
        .iter()
        .map(Event::classify)
        .collect()
}

/// Fetch a feed and turn it into classified events. Nothing is returned
/// unless every step succeeds.
pub async fn load_events(url: &str, timeout: Duration) -> JcalResult<Vec<Event>> {
    let bytes = fetch_feed(url, timeout).await?;
    let events = read_events(&bytes)?;
    info!(events = events.len(), "feed classified");
    Ok(events)
}

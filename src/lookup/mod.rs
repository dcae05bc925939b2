// src/lookup/mod.rs

use crate::config::Config;
use crate::fetch::{request_url, Transport};
use crate::locale::Locale;
use crate::locate::locate_with;
use crate::present::{Loading, Presenter};
use crate::record::Record;
use tracing::{debug, error, info, instrument, warn};

pub mod error;

pub use error::FetchError;

/// Result of one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The key was empty after trimming; nothing was fetched.
    ValidationFailed,
    NotFound(String),
    Success(Record),
    TransportError(FetchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Owns the request lifecycle of a seat lookup.
///
/// `submit` takes `&mut self`, so a second submission cannot begin until the
/// first has returned.
pub struct Lookup<T, P> {
    transport: T,
    presenter: P,
    source_url: String,
    proxy_url: Option<String>,
    locale: Locale,
}

impl<T: Transport, P: Presenter> Lookup<T, P> {
    pub fn new(transport: T, presenter: P, config: &Config) -> Self {
        Self {
            transport,
            presenter,
            source_url: config.source_url.clone(),
            proxy_url: config.proxy_url.clone(),
            locale: config.locale,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_parts(self) -> (T, P) {
        (self.transport, self.presenter)
    }

    pub async fn submit(&mut self, raw_key: &str) -> Outcome {
        let key = raw_key.trim();
        if key.is_empty() {
            debug!("empty seat key rejected");
            let outcome = Outcome::ValidationFailed;
            self.presenter.present(&outcome);
            return outcome;
        }

        let mut loading = Loading::begin(&mut self.presenter);

        let fetched = fetch_csv(
            &self.transport,
            &self.source_url,
            self.proxy_url.as_deref(),
        )
        .await;

        let outcome = match fetched {
            Ok(text) => match locate_with(&text, key, self.locale.messages().placeholders) {
                Some(record) => {
                    info!(seat = %key, "record found");
                    Outcome::Success(record)
                }
                None => {
                    info!(seat = %key, "seat not found");
                    Outcome::NotFound(key.to_string())
                }
            },
            Err(e) => {
                error!(seat = %key, error = %e, "Fetch Error");
                Outcome::TransportError(e)
            }
        };

        loading.present(&outcome);
        outcome
    }
}

/// One GET of the sheet, classified into the transport error taxonomy.
#[instrument(level = "info", skip(transport))]
async fn fetch_csv<T: Transport + ?Sized>(
    transport: &T,
    source_url: &str,
    proxy_url: Option<&str>,
) -> Result<String, FetchError> {
    let url = request_url(source_url, proxy_url).map_err(|e| FetchError::from_anyhow(&e))?;
    let resp = transport
        .get(&url)
        .await
        .map_err(|e| FetchError::from_anyhow(&e))?;

    if !resp.status.is_success() {
        warn!(status = %resp.status, bytes = resp.body.len(), "non-success status");
        return Err(FetchError::Status(resp.status));
    }
    if resp.body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }
    debug!(bytes = resp.body.len(), "sheet fetched");
    Ok(resp.body)
}

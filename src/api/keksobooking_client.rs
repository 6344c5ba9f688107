use anyhow::{anyhow, Context, Error, Result};
use log::{error, info, warn};

use crate::{config::Config, models::offer::Offer};

use super::submission::AdSubmission;

pub const SEND_ERROR_MESSAGE: &str = "Не удалось отправить форму. Попробуйте ещё раз";

/// GET/POST access to the listing service. No retries, no timeouts.
#[derive(Debug, Clone)]
pub struct KeksobookingClient {
    client: reqwest::Client,
    data_url: String,
    submit_url: String,
}

impl KeksobookingClient {
    pub fn new(config: &Config) -> KeksobookingClient {
        KeksobookingClient {
            client: reqwest::Client::new(),
            data_url: config.data_url.clone(),
            submit_url: config.submit_url.clone(),
        }
    }

    /// `Ok(None)` when the server answers with a non-OK status.
    pub async fn fetch_offers(&self) -> Result<Option<Vec<Offer>>> {
        info!("Fetching offers from {}", self.data_url);

        let response = self
            .client
            .get(&self.data_url)
            .send()
            .await
            .context("Failed to reach the offers endpoint")?;

        if !response.status().is_success() {
            warn!("Offers endpoint responded with {}", response.status());
            return Ok(None);
        }

        let offers: Vec<Offer> = response
            .json()
            .await
            .context("Failed to deserialize offers")?;

        info!("Fetched {} offers", offers.len());
        Ok(Some(offers))
    }

    pub async fn submit(&self, body: &AdSubmission) -> Result<()> {
        let response = self
            .client
            .post(&self.submit_url)
            .form(&body.form_pairs())
            .send()
            .await
            .context("Failed to reach the submit endpoint")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Submit endpoint responded with {}",
                response.status()
            ));
        }

        Ok(())
    }

    pub async fn get_data<S, F>(&self, on_success: S, on_fail: F)
    where
        S: FnOnce(Option<Vec<Offer>>),
        F: FnOnce(Error),
    {
        match self.fetch_offers().await {
            Ok(offers) => on_success(offers),
            Err(e) => {
                error!("Error while fetching offers: {:?}", e);
                on_fail(e)
            }
        }
    }

    pub async fn send_data<S, F>(&self, on_success: S, on_fail: F, body: &AdSubmission)
    where
        S: FnOnce(),
        F: FnOnce(&str),
    {
        match self.submit(body).await {
            Ok(()) => on_success(),
            Err(e) => {
                error!("Error while submitting ad: {:?}", e);
                on_fail(SEND_ERROR_MESSAGE)
            }
        }
    }
}

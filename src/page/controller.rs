use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::{Error, Result};
use async_channel::Receiver;
use log::{debug, info, warn};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    alert::{AlertBoard, FETCH_ERROR_MESSAGE},
    api::{keksobooking_client::KeksobookingClient, submission::AdSubmission},
    config::Config,
    debounce::debounce,
    filter::{form::FilterForm, selection::FilterSelection, FilterEngine},
    map::{
        card::{CardTemplate, PlainCard},
        renderer::create_multiple_marker,
        surface::MapSurface,
    },
    models::offer::Offer,
};

use super::state::PageState;

pub type SharedPage = Arc<Mutex<Page>>;

/// Everything the map page owns between mount and unmount.
pub struct Page {
    state: PageState,
    form_active: Arc<AtomicBool>,
    map: MapSurface,
    engine: FilterEngine,
    template: Box<dyn CardTemplate>,
    offers: Vec<Offer>,
    offers_received: bool,
    filter_form: FilterForm,
    alerts: AlertBoard,
    precision: usize,
}

impl Page {
    pub fn mount(config: &Config) -> Page {
        Page::mount_with_template(config, Box::new(PlainCard))
    }

    pub fn mount_with_template(config: &Config, template: Box<dyn CardTemplate>) -> Page {
        let form_active = Arc::new(AtomicBool::new(false));
        let mut map = MapSurface::mount(config);

        let toggle = form_active.clone();
        map.on_load(move |active| {
            toggle.store(active, Ordering::Release);
            info!("Form {}", if active { "enabled" } else { "disabled" });
        });

        Page {
            state: PageState::Locked,
            form_active,
            map,
            engine: FilterEngine::from_config(config),
            template,
            offers: Vec::new(),
            offers_received: false,
            filter_form: FilterForm::new(),
            alerts: AlertBoard::from_config(config),
            precision: config.address_precision,
        }
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn load_map(&mut self) {
        self.map.handle_load();
        self.unlock();
    }

    // Loaded needs both the map "load" event and the fetched offers.
    fn unlock(&mut self) {
        if self.state == PageState::Locked && self.map.is_loaded() && self.offers_received {
            self.state = PageState::Loaded;
            info!("Page loaded");
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn is_form_active(&self) -> bool {
        self.form_active.load(Ordering::Acquire)
    }

    pub fn map(&self) -> &MapSurface {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapSurface {
        &mut self.map
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn rendered_count(&self) -> usize {
        self.map.offer_layer().len()
    }

    pub fn alerts(&self) -> &AlertBoard {
        &self.alerts
    }

    pub fn filter_form(&self) -> &FilterForm {
        &self.filter_form
    }

    pub fn filter_form_mut(&mut self) -> &mut FilterForm {
        &mut self.filter_form
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Keeps the full list for filtering and draws its first page.
    /// `None` is what a non-OK response yields and counts as no data.
    pub fn receive_offers(&mut self, offers: Option<Vec<Offer>>) {
        let offers = offers.unwrap_or_else(|| {
            warn!("Offers endpoint returned no data");
            Vec::new()
        });

        let first_page = self.engine.first_page(&offers);
        create_multiple_marker(&mut self.map, &first_page, self.template.as_ref());
        self.offers = offers;
        self.offers_received = true;
        self.unlock();
        info!(
            "Showing {} of {} offers",
            self.rendered_count(),
            self.offers.len()
        );
    }

    pub fn fail_offers(&mut self, error: &Error) -> JoinHandle<()> {
        warn!("Could not load offers: {}", error);
        self.alerts.show_alert(FETCH_ERROR_MESSAGE)
    }

    pub fn apply_filters(&mut self, selection: &FilterSelection) {
        if self.state == PageState::Locked {
            debug!("Ignoring filter change while the page is locked");
            return;
        }

        let filtered = self.engine.apply(&self.offers, selection);
        create_multiple_marker(&mut self.map, &filtered, self.template.as_ref());
        self.state = PageState::Filtering;
        debug!("Filter {:?} matched {} offers", selection, filtered.len());
    }

    /// Puts the main marker back on the default point and closes popups.
    /// Leaves the page state untouched.
    pub fn reset_map(&mut self) {
        self.map.reset_map();
    }

    /// Back to the pristine page after a successful submission: filters
    /// cleared, first page redrawn, so a filtering page drops back to `Loaded`.
    pub fn reset_all(&mut self) {
        self.reset_map();
        self.filter_form.reset();
        if self.state != PageState::Locked {
            let first_page = self.engine.first_page(&self.offers);
            create_multiple_marker(&mut self.map, &first_page, self.template.as_ref());
            self.state = PageState::Loaded;
        }
    }
}

/// Fetches offers and hands them to the page; the page lock is not held
/// while the request is in flight.
pub async fn add_cards_in_marker(page: &SharedPage, client: &KeksobookingClient) {
    let mut fetched: Option<Option<Vec<Offer>>> = None;
    let mut failure: Option<Error> = None;

    client
        .get_data(
            |offers| fetched = Some(offers),
            |error| failure = Some(error),
        )
        .await;

    let mut page = page.lock().await;
    if let Some(offers) = fetched {
        page.receive_offers(offers);
    }
    if let Some(error) = failure {
        page.fail_offers(&error);
    }
}

/// Registers the debounced "change" listener: every selection sent on
/// `events` is filtered and rendered after `delay` of quiet.
pub fn filters_map(
    page: SharedPage,
    events: Receiver<FilterSelection>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debounce(events, delay, |selection| {
            let page = page.clone();
            async move {
                page.lock().await.apply_filters(&selection);
            }
        })
        .await;
        debug!("Filter listener stopped");
    })
}

/// Posts a new ad. Success resets the page, failure shows the alert.
pub async fn submit_ad(
    page: &SharedPage,
    client: &KeksobookingClient,
    submission: &AdSubmission,
) -> Result<bool> {
    submission.validate()?;

    let mut sent = false;
    let mut failure: Option<String> = None;

    client
        .send_data(
            || sent = true,
            |message| failure = Some(message.to_string()),
            submission,
        )
        .await;

    let mut page = page.lock().await;
    if sent {
        info!("Ad '{}' submitted", submission.title);
        page.reset_all();
    }
    if let Some(message) = failure {
        page.alerts().show_alert(&message);
    }

    Ok(sent)
}

use anyhow::Result;
use async_channel::Sender;
use log::{error, info};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::broadcast,
};

use crate::{
    api::{keksobooking_client::KeksobookingClient, submission::AdSubmission},
    filter::selection::FilterSelection,
    page::controller::{submit_ad, SharedPage},
};

use super::commands::{parse_command, Command, SubmitArgs, HELP};

/// Drives a mounted page from text commands, one per line.
pub struct Console {
    page: SharedPage,
    client: KeksobookingClient,
    changes: Sender<FilterSelection>,
}

impl Console {
    pub fn new(
        page: SharedPage,
        client: KeksobookingClient,
        changes: Sender<FilterSelection>,
    ) -> Console {
        Console {
            page,
            client,
            changes,
        }
    }

    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        println!("{}", HELP);
        self.run_with(BufReader::new(tokio::io::stdin()), shutdown_rx)
            .await
    }

    /// Reads commands from `reader` until it ends, the user quits or a
    /// shutdown is broadcast. A pending read does not delay the shutdown.
    pub async fn run_with<R>(
        &self,
        reader: R,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => line,
                    None => break,
                },
                _ = shutdown_rx.recv() => {
                    info!("Shutdown requested");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_line(&line).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!("Failed to handle '{}': {}", line.trim(), e);
                    println!("{}", e);
                }
            }
        }

        self.changes.close();
        info!("Console closed");
        Ok(())
    }

    /// Returns `false` once the user asked to leave.
    pub async fn handle_line(&self, line: &str) -> Result<bool> {
        let command = parse_command(line)?;
        self.handle_command(command).await
    }

    pub async fn handle_command(&self, command: Command) -> Result<bool> {
        match command {
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
            Command::List => {
                let page = self.page.lock().await;
                let precision = page.precision();
                let markers = page.map().offer_layer().markers();
                println!("{} of {} offers on the map", markers.len(), page.offers().len());
                for (index, marker) in markers.iter().enumerate() {
                    let title = marker
                        .popup
                        .as_deref()
                        .and_then(|card| card.lines().next())
                        .unwrap_or("N/A");
                    println!(
                        "{}: {} ({})",
                        index,
                        title,
                        marker.position.format_address(precision)
                    );
                }
            }
            Command::Filter(control, value) => {
                let selection = {
                    let mut page = self.page.lock().await;
                    page.filter_form_mut().set(control, &value)?;
                    page.filter_form().selection()
                };
                self.changes.send(selection).await?;
            }
            Command::Feature(feature) => {
                let (checked, selection) = {
                    let mut page = self.page.lock().await;
                    let checked = page.filter_form_mut().toggle_feature(&feature)?;
                    (checked, page.filter_form().selection())
                };
                println!(
                    "{} {}",
                    feature,
                    if checked { "checked" } else { "unchecked" }
                );
                self.changes.send(selection).await?;
            }
            Command::ResetFilters => {
                let selection = {
                    let mut page = self.page.lock().await;
                    page.filter_form_mut().reset();
                    page.filter_form().selection()
                };
                self.changes.send(selection).await?;
            }
            Command::Drag(to) => {
                let mut page = self.page.lock().await;
                page.map_mut().drag_main_marker(to);
                println!("Address: {}", page.map().address());
            }
            Command::Reset => {
                let mut page = self.page.lock().await;
                page.reset_map();
                println!("Address: {}", page.map().address());
            }
            Command::Popup(index) => {
                let mut page = self.page.lock().await;
                let content = page.map_mut().open_popup(index)?;
                println!("{}", content);
            }
            Command::ClosePopup => self.page.lock().await.map_mut().close_popup(),
            Command::Address => println!("Address: {}", self.page.lock().await.map().address()),
            Command::Alerts => {
                let banners = self.page.lock().await.alerts().banners();
                if banners.is_empty() {
                    println!("No alerts");
                }
                for banner in banners {
                    println!("[{}] {}", banner.class, banner.message);
                }
            }
            Command::State => {
                let page = self.page.lock().await;
                println!(
                    "Page {}, form {}",
                    page.state(),
                    if page.is_form_active() { "active" } else { "disabled" }
                );
            }
            Command::Submit(args) => {
                let submission = self.build_submission(args).await;
                if submit_ad(&self.page, &self.client, &submission).await? {
                    println!("Ad submitted");
                }
            }
        }

        Ok(true)
    }

    async fn build_submission(&self, args: SubmitArgs) -> AdSubmission {
        let page = self.page.lock().await;
        let position = page.map().main_marker_position();
        let mut submission = AdSubmission::new(&args.title, position, page.precision());

        if let Some(price) = args.price {
            submission.price = price;
        }
        if let Some(housing_type) = args.housing_type {
            submission.housing_type = housing_type;
        }
        if let Some(rooms) = args.rooms {
            submission.rooms = rooms;
        }
        if let Some(capacity) = args.capacity {
            submission.capacity = capacity;
        }
        if let Some(timein) = args.timein {
            submission.timein = timein;
        }
        if let Some(timeout) = args.timeout {
            submission.timeout = timeout;
        }
        if let Some(description) = args.description {
            submission.description = description;
        }
        submission.features = args.features;
        submission
    }
}

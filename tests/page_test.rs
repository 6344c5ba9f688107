mod common;

#[cfg(test)]
mod page_tests {
    use std::time::Duration;

    use keksobooking::{
        alert::{ALERT_CLASS, FETCH_ERROR_MESSAGE},
        api::{keksobooking_client::KeksobookingClient, submission::AdSubmission},
        config::{self, Config},
        filter::selection::{FilterSelection, PriceBracket},
        map::geo::LatLng,
        page::{
            controller::{add_cards_in_marker, filters_map, submit_ad, Page},
            state::PageState,
        },
    };

    use crate::common::{offers, serve_once};

    #[test]
    fn starts_locked_and_unlocks_on_load() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);

        assert_eq!(page.state(), PageState::Locked);
        assert!(!page.is_form_active());

        page.load_map();
        assert!(page.is_form_active());
        assert_eq!(page.state(), PageState::Locked);
    }

    #[test]
    fn renders_at_most_ten_after_loading() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);
        page.load_map();

        page.receive_offers(Some(offers(14)));

        assert_eq!(page.state(), PageState::Loaded);
        assert_eq!(page.offers().len(), 14);
        assert_eq!(page.rendered_count(), 10);
    }

    #[test]
    fn no_data_renders_nothing() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);
        page.load_map();

        page.receive_offers(None);

        assert_eq!(page.state(), PageState::Loaded);
        assert_eq!(page.rendered_count(), 0);
    }

    #[test]
    fn offers_before_map_load_keep_the_page_locked() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);

        page.receive_offers(Some(offers(3)));
        assert_eq!(page.state(), PageState::Locked);
        assert_eq!(page.rendered_count(), 3);

        page.apply_filters(&FilterSelection::any().with_price(PriceBracket::Low));
        assert_eq!(page.state(), PageState::Locked);

        page.load_map();
        assert_eq!(page.state(), PageState::Loaded);
    }

    #[test]
    fn filtering_is_ignored_while_locked() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);

        page.apply_filters(&FilterSelection::any());
        assert_eq!(page.state(), PageState::Locked);
    }

    #[test]
    fn reset_keeps_the_filtering_state() {
        let config = config::create_test_config();
        let mut page = Page::mount(&config);
        page.load_map();
        page.receive_offers(Some(offers(12)));
        page.apply_filters(&FilterSelection::any().with_price(PriceBracket::Low));
        page.map_mut().drag_main_marker(LatLng::new(35.0, 139.0));
        page.map_mut().open_popup(0).unwrap();

        page.reset_map();

        assert_eq!(page.state(), PageState::Filtering);
        assert_eq!(page.map().main_marker_position(), page.map().default_position());
        assert_eq!(page.map().open_popup_content(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_filter_renders_once_after_quiet_period() {
        let config = config::create_test_config();
        let page = Page::mount(&config).into_shared();
        {
            let mut page = page.lock().await;
            page.load_map();
            page.receive_offers(Some(offers(12)));
        }

        let (changes_tx, changes_rx) = async_channel::unbounded();
        let delay = Duration::from_millis(config.debounce_ms);
        let listener = filters_map(page.clone(), changes_rx, delay);

        changes_tx
            .send(FilterSelection::any().with_price(PriceBracket::High))
            .await
            .unwrap();
        tokio::time::sleep(delay / 2).await;
        changes_tx
            .send(FilterSelection::any().with_price(PriceBracket::Low))
            .await
            .unwrap();
        tokio::time::sleep(delay / 2).await;

        // The burst is still settling
        assert_eq!(page.lock().await.state(), PageState::Loaded);

        tokio::time::sleep(delay).await;
        {
            let page = page.lock().await;
            assert_eq!(page.state(), PageState::Filtering);
            assert_eq!(page.rendered_count(), 10);
        }

        changes_tx.close();
        listener.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_shows_one_banner_for_its_duration() {
        let config = config::create_test_config();
        let client = KeksobookingClient::new(&config);
        let page = Page::mount(&config).into_shared();

        add_cards_in_marker(&page, &client).await;

        let alerts = page.lock().await.alerts().clone();
        let banners = alerts.banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].class, ALERT_CLASS);
        assert_eq!(banners[0].message, FETCH_ERROR_MESSAGE);
        assert_eq!(page.lock().await.state(), PageState::Locked);

        tokio::time::advance(Duration::from_millis(config.alert_duration_ms - 1)).await;
        tokio::task::yield_now().await;
        assert_eq!(alerts.len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn loads_offers_from_the_endpoint() {
        let body = serde_json::to_string(&offers(3)).unwrap();
        let base = serve_once("200 OK", body).await;
        let config = Config {
            data_url: format!("{}/keksobooking/data", base),
            ..config::create_test_config()
        };
        let client = KeksobookingClient::new(&config);
        let page = Page::mount(&config).into_shared();
        page.lock().await.load_map();

        add_cards_in_marker(&page, &client).await;

        let page = page.lock().await;
        assert_eq!(page.state(), PageState::Loaded);
        assert_eq!(page.rendered_count(), 3);
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn successful_submit_resets_the_page() {
        let base = serve_once("200 OK", String::new()).await;
        let config = Config {
            submit_url: format!("{}/keksobooking", base),
            ..config::create_test_config()
        };
        let client = KeksobookingClient::new(&config);
        let page = Page::mount(&config).into_shared();
        {
            let mut page = page.lock().await;
            page.load_map();
            page.receive_offers(Some(offers(12)));
            page.apply_filters(&FilterSelection::any().with_price(PriceBracket::High));
            page.map_mut().drag_main_marker(LatLng::new(35.5, 139.5));
            page.filter_form_mut().toggle_feature("wifi").unwrap();
        }

        let submission = AdSubmission::new("Новое жильё", LatLng::new(35.5, 139.5), 5);
        let sent = submit_ad(&page, &client, &submission).await.unwrap();

        assert!(sent);
        let page = page.lock().await;
        assert_eq!(page.state(), PageState::Loaded);
        assert_eq!(page.map().main_marker_position(), page.map().default_position());
        assert_eq!(page.filter_form().selection(), FilterSelection::any());
        assert_eq!(page.rendered_count(), 10);
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn rejected_submit_shows_the_send_error() {
        let base = serve_once("500 Internal Server Error", String::new()).await;
        let config = Config {
            submit_url: format!("{}/keksobooking", base),
            ..config::create_test_config()
        };
        let client = KeksobookingClient::new(&config);
        let page = Page::mount(&config).into_shared();

        let submission = AdSubmission::new("Новое жильё", LatLng::new(35.5, 139.5), 5);
        let sent = submit_ad(&page, &client, &submission).await.unwrap();

        assert!(!sent);
        let banners = page.lock().await.alerts().banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(
            banners[0].message,
            "Не удалось отправить форму. Попробуйте ещё раз"
        );
    }
}

#[cfg(test)]
mod timing_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use keksobooking::{alert::AlertBoard, debounce::debounce};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_into_last_event() {
        let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = async_channel::unbounded();
        let delay = Duration::from_millis(300);

        let sink = seen.clone();
        let task = tokio::spawn(debounce(rx, delay, move |event| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(event);
            }
        }));

        for event in 1..=3 {
            tx.send(event).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(delay).await;
        assert_eq!(*seen.lock().unwrap(), vec![3]);

        tx.send(4).await.unwrap();
        tokio::time::sleep(delay * 2).await;
        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);

        tx.close();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn closing_flushes_pending_event() {
        let seen: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = async_channel::unbounded();

        let sink = seen.clone();
        let task = tokio::spawn(debounce(rx, Duration::from_secs(10), move |event| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(event);
            }
        }));

        tx.send("only").await.unwrap();
        tx.close();
        task.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["only"]);
    }

    #[tokio::test(start_paused = true)]
    async fn banner_disappears_after_duration_and_not_before() {
        let board = AlertBoard::new(Duration::from_millis(5000));
        let start = Instant::now();

        let handle = board.show_alert("Ошибка в получении данных с сервера!");
        assert_eq!(board.len(), 1);

        tokio::time::advance(Duration::from_millis(4999)).await;
        tokio::task::yield_now().await;
        assert_eq!(board.len(), 1);

        handle.await.unwrap();
        assert!(board.is_empty());
        assert_eq!(start.elapsed(), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn alerts_have_independent_timers() {
        let board = AlertBoard::new(Duration::from_millis(1000));

        let first = board.show_alert("first");
        tokio::time::advance(Duration::from_millis(600)).await;
        let second = board.show_alert("second");
        assert_eq!(board.len(), 2);

        first.await.unwrap();
        let remaining = board.banners();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "second");

        second.await.unwrap();
        assert!(board.is_empty());
    }
}

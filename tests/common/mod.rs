#![allow(dead_code)]

use keksobooking::models::offer::{Author, Location, Offer, OfferDetails};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

pub fn offer(title: &str) -> Offer {
    Offer {
        author: Author {
            avatar: Some("img/avatars/user01.png".to_string()),
        },
        offer: OfferDetails {
            title: Some(title.to_string()),
            ..OfferDetails::default()
        },
        location: Location {
            lat: 35.68,
            lng: 139.7,
        },
    }
}

pub fn full_offer(title: &str, housing_type: &str, price: u64, rooms: u64, guests: u64) -> Offer {
    let mut offer = offer(title);
    offer.offer.housing_type = Some(housing_type.to_string());
    offer.offer.price = Some(price as f64);
    offer.offer.rooms = Some(rooms.to_string());
    offer.offer.guests = Some(guests.to_string());
    offer.offer.features = Some(vec!["wifi".to_string()]);
    offer
}

pub fn offers(count: usize) -> Vec<Offer> {
    (0..count)
        .map(|i| {
            let mut offer = full_offer(&format!("offer {}", i), "flat", 1000 * (i as u64 + 1), 1, 2);
            offer.location.lat += i as f64 / 100.0;
            offer
        })
        .collect()
}

/// Answers exactly one HTTP request with the given status line and body,
/// returns the base url to hit.
pub async fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}", address)
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut request: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        if read == 0 {
            return;
        }
        request.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&request);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if request.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}

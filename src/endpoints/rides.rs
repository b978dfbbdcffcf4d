use super::{ApiError, ErrorKind, Rejection};
use crate::{NewRide, Ride};
use reqwest::Client;
use serde_derive::Deserialize;
use url::Url;

/// Fetch every ride, in the order the server keeps them.
///
/// Rides which can't be understood (e.g. an unreadable time) are logged and
/// left out rather than failing the whole listing.
pub async fn list_rides(
    client: &Client,
    base: &Url,
) -> Result<Vec<Ride>, ApiError> {
    let url = super::endpoint(base, &["rides"]);

    log::debug!("Fetching rides from {}", url);
    let raw: Vec<serde_json::Value> = super::send(
        client.get(url),
        Rejection::Client(ErrorKind::Network),
    )
    .await?
    .json()
    .await?;

    let rides = parse_rides(raw);
    log::debug!("Received {} rides", rides.len());

    Ok(rides)
}

fn parse_rides(raw: Vec<serde_json::Value>) -> Vec<Ride> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            match serde_json::from_value::<Ride>(value) {
                Ok(ride) => Some(ride),
                Err(e) => {
                    log::warn!("Skipping ride #{}: {}", position, e);
                    None
                },
            }
        })
        .collect()
}

/// Post a new ride, getting back the server's copy of it.
pub async fn create_ride(
    client: &Client,
    base: &Url,
    ride: &NewRide,
) -> Result<Ride, ApiError> {
    let url = super::endpoint(base, &["rides"]);

    log::debug!("Posting a ride to {}", url);
    log::trace!("Payload: {:#?}", ride);
    let created: Ride = super::send(
        client.post(url).json(ride),
        Rejection::Client(ErrorKind::Validation),
    )
    .await?
    .json()
    .await?;
    log::info!(
        "Posted a ride from {} to {}",
        created.pickup,
        created.destination
    );

    Ok(created)
}

/// Delete the ride posted with this phone number, returning the server's
/// confirmation message.
pub async fn delete_ride(
    client: &Client,
    base: &Url,
    phone_no: &str,
) -> Result<String, ApiError> {
    let url = super::endpoint(base, &["rides", phone_no]);

    log::debug!("Sending a delete request to {}", url);
    let body: DeleteResponse = super::send(
        client.delete(url),
        Rejection::Client(ErrorKind::NotFound),
    )
    .await?
    .json()
    .await?;

    Ok(body.message)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DeleteResponse {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_server;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn ride_with_time(host: &str, time: &str) -> serde_json::Value {
        json!({
            "host": host,
            "destination": "Airport",
            "pickup": "Library",
            "time": time,
            "phone_no": "5551234",
            "email": "alice@example.com",
        })
    }

    #[test]
    fn parse_delete_confirmation() {
        let src = r#"{"message": "Ride deleted successfully"}"#;

        let got: DeleteResponse = serde_json::from_str(src).unwrap();

        assert_eq!(got.message, "Ride deleted successfully");
    }

    #[test]
    fn a_bad_timestamp_only_loses_that_ride() {
        let raw = vec![
            ride_with_time("Alice", "2024-05-01T10:00:00+00:00"),
            ride_with_time("Bob", "after lunch"),
            ride_with_time("Carol", "2024-05-01T11:00:00"),
        ];

        let got = parse_rides(raw);

        let hosts: Vec<_> = got.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, vec!["Alice", "Carol"]);
    }

    #[tokio::test]
    async fn list_rides_keeps_the_good_ones() {
        let body = json!([
            ride_with_time("Alice", "2024-05-01T10:00:00+00:00"),
            ride_with_time("Bob", "2024-05-01 05:00"),
        ])
        .to_string();
        let base = test_server::respond_once("200 OK", &body);

        let got = list_rides(&test_server::client(), &base).await.unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].host, "Alice");
    }

    #[tokio::test]
    async fn server_errors_while_listing_are_network_errors() {
        let base = test_server::respond_once(
            "500 Internal Server Error",
            r#"{"detail": "boom"}"#,
        );

        let got = list_rides(&test_server::client(), &base).await.unwrap_err();

        assert_eq!(got.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn an_unreadable_listing_is_a_network_error() {
        let base = test_server::respond_once("200 OK", r#"{"rides": "nope"}"#);

        let got = list_rides(&test_server::client(), &base).await.unwrap_err();

        assert_eq!(got.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn rejected_rides_are_validation_errors() {
        let base = test_server::respond_once(
            "422 Unprocessable Entity",
            r#"{"detail": [{"loc": ["body", "time"], "msg": "invalid datetime format"}]}"#,
        );
        let ride = NewRide {
            host: String::from("Alice"),
            destination: String::from("Airport"),
            pickup: String::from("Library"),
            time: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 20, 0, 0)
                .unwrap(),
            phone_no: String::from("5551234"),
            email: String::from("alice@example.com"),
        };

        let got = create_ride(&test_server::client(), &base, &ride)
            .await
            .unwrap_err();

        assert_eq!(got.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn deleting_a_missing_ride_is_not_found() {
        let base = test_server::respond_once(
            "404 Not Found",
            r#"{"detail": "Ride not found"}"#,
        );

        let got = delete_ride(&test_server::client(), &base, "5551234")
            .await
            .unwrap_err();

        assert_eq!(got.kind(), ErrorKind::NotFound);
        assert!(got.to_string().contains("Ride not found"));
    }

    #[tokio::test]
    async fn delete_confirmation_is_returned() {
        let base = test_server::respond_once(
            "200 OK",
            r#"{"message": "Ride deleted successfully"}"#,
        );

        let got = delete_ride(&test_server::client(), &base, "5551234")
            .await
            .unwrap();

        assert_eq!(got, "Ride deleted successfully");
    }
}

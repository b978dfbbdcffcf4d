use crate::{time, RideId};
use chrono::{DateTime, FixedOffset};
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A carpool offer, as stored by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Ride {
    /// Older servers don't send an identifier.
    #[serde(default)]
    pub id: Option<RideId>,
    /// The name of whoever posted the ride.
    pub host: String,
    pub destination: String,
    pub pickup: String,
    #[serde(with = "time::timestamp")]
    pub time: DateTime<FixedOffset>,
    pub phone_no: String,
    pub email: String,
}

impl Ride {
    /// The key used to tell list entries apart.
    ///
    /// `host` isn't unique, so fall back to the ride's position in the
    /// listing when the server didn't give us an identifier.
    pub fn key(&self, position: usize) -> RideKey {
        match self.id {
            Some(ref id) => RideKey::Id(id.clone()),
            None => RideKey::Position(position),
        }
    }
}

/// A ride which is about to be posted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRide {
    pub host: String,
    pub destination: String,
    pub pickup: String,
    #[serde(with = "time::timestamp")]
    pub time: DateTime<FixedOffset>,
    pub phone_no: String,
    pub email: String,
}

/// Identifies an entry in a list of rides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RideKey {
    Id(RideId),
    Position(usize),
}

impl Display for RideKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RideKey::Id(id) => write!(f, "{}", id),
            RideKey::Position(n) => write!(f, "#{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn parse_a_listing() {
        let src = include_str!("rides_response.json");

        let got: Vec<Ride> = serde_json::from_str(src).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].id, Some(RideId::from("665f1c2ab1e4a3d2c0ffee01")));
        assert_eq!(got[0].host, "Alice");
        assert_eq!(got[0].pickup, "Library");
        assert_eq!(got[0].destination, "Airport");
        assert_eq!(got[0].phone_no, "5551234");
        assert_eq!(got[0].email, "alice@example.com");
        assert_eq!(got[0].time, Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap());
        assert_eq!(got[1].id, None);
        assert_eq!(got[1].time.to_rfc3339(), "2024-05-01T17:15:00+05:30");
    }

    #[test]
    fn rides_without_an_id_are_keyed_by_position() {
        let src = include_str!("rides_response.json");
        let rides: Vec<Ride> = serde_json::from_str(src).unwrap();

        let keys: Vec<_> =
            rides.iter().enumerate().map(|(i, r)| r.key(i)).collect();

        assert_eq!(
            keys,
            vec![
                RideKey::Id(RideId::from("665f1c2ab1e4a3d2c0ffee01")),
                RideKey::Position(1),
            ]
        );
    }

    #[test]
    fn new_rides_are_sent_with_their_offset() {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let ride = NewRide {
            host: String::from("Alice"),
            destination: String::from("Airport"),
            pickup: String::from("Library"),
            time: offset.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
            phone_no: String::from("5551234"),
            email: String::from("alice@example.com"),
        };
        let should_be = json!({
            "host": "Alice",
            "destination": "Airport",
            "pickup": "Library",
            "time": "2024-05-01T10:30:00+05:30",
            "phone_no": "5551234",
            "email": "alice@example.com",
        });

        let got = serde_json::to_value(&ride).unwrap();

        assert_eq!(got, should_be);
    }
}

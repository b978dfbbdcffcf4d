use crate::{ride::RideKey, time, Api, Ride};
use chrono::{Local, TimeZone};
use std::fmt::Display;

pub(crate) const SPINNER: &str = "Loading rides...";

/// The "Available Rides" list shown on the home page.
#[derive(Debug, Clone)]
pub struct RideListView<Tz: TimeZone = Local> {
    loading: bool,
    rides: Vec<Ride>,
    viewer: Tz,
}

impl RideListView<Local> {
    /// A list which shows times in the local timezone.
    pub fn new() -> Self { RideListView::in_timezone(Local) }
}

impl Default for RideListView<Local> {
    fn default() -> Self { RideListView::new() }
}

impl<Tz> RideListView<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// A list which shows times as they would be seen in `viewer`'s
    /// timezone.
    pub fn in_timezone(viewer: Tz) -> Self {
        RideListView {
            loading: true,
            rides: Vec::new(),
            viewer,
        }
    }

    /// Fetch the rides.
    ///
    /// A failed fetch is logged and leaves the list empty.
    pub async fn mount<A>(&mut self, api: &A)
    where
        A: Api + ?Sized,
    {
        self.loading = true;

        match api.list_rides().await {
            Ok(rides) => self.rides = rides,
            Err(e) => log::error!("Error fetching rides: {}", e),
        }

        self.loading = false;
    }

    pub fn is_loading(&self) -> bool { self.loading }

    /// The rides, in the order the server sent them.
    pub fn rides(&self) -> &[Ride] { &self.rides }

    /// What each list item shows, in display order.
    pub fn entries(&self) -> Vec<RideEntry> {
        self.rides
            .iter()
            .enumerate()
            .map(|(position, ride)| RideEntry {
                key: ride.key(position),
                host: ride.host.clone(),
                route: format!("{} to {}", ride.pickup, ride.destination),
                departs: format!("At {}", time::clock_time(&ride.time, &self.viewer)),
                contact: format!("Contact {}", ride.phone_no),
            })
            .collect()
    }

    pub fn render(&self) -> String {
        if self.loading {
            return format!("{}\n", SPINNER);
        }

        let mut out = String::from("Available Rides\n");

        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                out.push_str("  ---\n");
            }
            out.push_str(&format!(
                "{}\n  {}\n  {}\n  {}\n",
                entry.host, entry.route, entry.departs, entry.contact
            ));
        }

        out
    }
}

/// A single item in the [`RideListView`].
#[derive(Debug, Clone, PartialEq)]
pub struct RideEntry {
    pub key: RideKey,
    pub host: String,
    /// `"{pickup} to {destination}"`
    pub route: String,
    /// `"At HH:MM"`, in the viewer's timezone.
    pub departs: String,
    /// `"Contact {phone_no}"`
    pub contact: String,
}

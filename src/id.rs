use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The identifier the server assigns to a stored ride.
#[derive(
    Debug, Clone, PartialEq, Hash, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RideId(String);

impl<S: Into<String>> From<S> for RideId {
    fn from(other: S) -> RideId { RideId(other.into()) }
}

impl Display for RideId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

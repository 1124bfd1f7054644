use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// The backend's answer to a trip request. Every field is optional and a
/// field of the wrong shape is read as absent, so a partial response still
/// renders.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TripResult {
    #[serde(default, deserialize_with = "lenient::value")]
    pub trip: Option<TripRecord>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub route_info: Option<RouteInfo>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub stops: Option<StopsInfo>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub logs: Vec<DutyLog>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub route_geometry: Option<geojson::Geometry>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TripRecord {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub current_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub pickup_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub dropoff_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub cycle_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub route_geometry: Option<geojson::Geometry>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RouteInfo {
    #[serde(default, deserialize_with = "lenient::value")]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StopsInfo {
    #[serde(default, deserialize_with = "lenient::count")]
    pub fuel_stops: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub rest_stops: u32,
    #[serde(default, deserialize_with = "lenient::list")]
    pub fuel_stop_locations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub rest_stop_locations: Vec<String>,
}

/// One day of the duty log.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DutyLog {
    #[serde(default, deserialize_with = "lenient::value")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub driving_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub on_duty_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub off_duty_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sleeper_hours: Option<f64>,
}

/// Which of the three trip locations a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRole {
    Current,
    Pickup,
    Dropoff,
}

impl LocationRole {
    pub const ALL: [LocationRole; 3] = [LocationRole::Current, LocationRole::Pickup, LocationRole::Dropoff];

    pub fn label(&self) -> &'static str {
        match self {
            LocationRole::Current => "Current Location",
            LocationRole::Pickup => "Pickup Location",
            LocationRole::Dropoff => "Dropoff Location",
        }
    }
}

impl TripResult {
    /// Fails unless the body is a JSON object; its fields are read leniently.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("trip response is not a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// The raw location string for a role, `None` when missing or empty.
    /// Whitespace counts as present; it just won't parse as coordinates.
    pub fn location(&self, role: LocationRole) -> Option<&str> {
        let trip = self.trip.as_ref()?;
        let location = match role {
            LocationRole::Current => &trip.current_location,
            LocationRole::Pickup => &trip.pickup_location,
            LocationRole::Dropoff => &trip.dropoff_location,
        };
        location.as_deref().filter(|l| !l.is_empty())
    }

    /// Server route geometry. The backend puts it at the top level; a copy on
    /// the trip record takes precedence.
    pub fn route_geometry(&self) -> Option<&geojson::Geometry> {
        self.trip
            .as_ref()
            .and_then(|trip| trip.route_geometry.as_ref())
            .or(self.route_geometry.as_ref())
    }

    pub fn fuel_stop_locations(&self) -> &[String] {
        self.stops.as_ref().map(|s| s.fuel_stop_locations.as_slice()).unwrap_or_default()
    }

    pub fn rest_stop_locations(&self) -> &[String] {
        self.stops.as_ref().map(|s| s.rest_stop_locations.as_slice()).unwrap_or_default()
    }
}

pub(crate) mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Keeps the well-formed elements of an array, anything else is empty.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };

        Ok(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect())
    }

    /// Numbers, or strings holding a number.
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(number.filter(|n| n.is_finite()))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(count.and_then(|c| u32::try_from(c).ok()).unwrap_or_default())
    }
}

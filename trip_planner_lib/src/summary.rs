use crate::trip::{DutyLog, TripResult};

pub const NOT_AVAILABLE: &str = "Not available";

pub const LOG_HEADERS: [&str; 5] = ["Date", "Driving Hours", "On Duty Hours", "Off Duty Hours", "Sleeper Hours"];

/// Display-ready view of a trip result.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub caption: Option<String>,
    pub has_route_info: bool,
    pub distance: String,
    pub duration: String,
    pub fuel_stops: u32,
    pub rest_stops: u32,
    pub fuel_stop_lines: Vec<String>,
    pub rest_stop_lines: Vec<String>,
    pub log_rows: Vec<[String; 5]>,
}

impl TripSummary {
    pub fn from_trip(trip: &TripResult) -> Self {
        let route_info = trip.route_info.as_ref();
        let text = |value: Option<&String>| {
            value.filter(|v| !v.is_empty()).cloned().unwrap_or_else(|| NOT_AVAILABLE.to_owned())
        };

        let stops = trip.stops.as_ref();

        Self {
            caption: caption(trip),
            has_route_info: route_info.is_some(),
            distance: text(route_info.and_then(|r| r.distance.as_ref())),
            duration: text(route_info.and_then(|r| r.duration.as_ref())),
            fuel_stops: stops.map(|s| s.fuel_stops).unwrap_or_default(),
            rest_stops: stops.map(|s| s.rest_stops).unwrap_or_default(),
            fuel_stop_lines: stop_lines(trip.fuel_stop_locations()),
            rest_stop_lines: stop_lines(trip.rest_stop_locations()),
            log_rows: trip.logs.iter().map(log_row).collect(),
        }
    }
}

fn caption(trip: &TripResult) -> Option<String> {
    let record = trip.trip.as_ref()?;
    let mut parts = Vec::new();

    if let Some(id) = record.id {
        parts.push(format!("Trip #{id}"));
    }
    if let Some(hours) = record.cycle_hours {
        parts.push(format!("{} cycle hours used", format_hours(Some(hours))));
    }
    if let Some(created_at) = record.created_at {
        parts.push(format!("planned {}", created_at.format("%d/%m/%Y %H:%M")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn stop_lines(locations: &[String]) -> Vec<String> {
    locations.iter().enumerate().map(|(i, location)| format!("Stop {}: {}", i + 1, location)).collect()
}

fn log_row(log: &DutyLog) -> [String; 5] {
    [
        log.date.clone().unwrap_or_default(),
        format_hours(log.driving_hours),
        format_hours(log.on_duty_hours),
        format_hours(log.off_duty_hours),
        format_hours(log.sleeper_hours),
    ]
}

/// Whole numbers print without a fraction, `None` prints empty.
pub fn format_hours(hours: Option<f64>) -> String {
    hours.map(|h| h.to_string()).unwrap_or_default()
}

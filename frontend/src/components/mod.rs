pub mod location_search;
pub mod trip_form;
pub mod trip_map;
pub mod trip_summary;

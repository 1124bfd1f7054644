pub mod config;
pub mod coordinates;
pub mod error;
pub mod map_scene;
pub mod map_session;
pub mod mapbox;
pub mod place_search;
pub mod sequence;
pub mod summary;
pub mod trip;
pub mod trip_request;

pub use config::AppConfig;
pub use coordinates::{parse_coordinates, LngLat};
pub use error::{RequestError, SceneError};

use std::rc::Rc;

use components::trip_form::TripForm;
use gloo_console::{info, warn};
use trip_planner_lib::{config::DEFAULT_API_BASE_URL, AppConfig};
use yew::prelude::*;

mod api;
mod components;
mod logging;

/// Read at build time; missing values only make the corresponding requests fail.
fn build_config() -> AppConfig {
    let config = AppConfig::new(
        option_env!("TRIP_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL),
        option_env!("MAPBOX_API_KEY").unwrap_or_default(),
    );

    match option_env!("MAPBOX_API_BASE_URL") {
        Some(url) => config.with_map_api_base_url(url),
        None => config,
    }
}

struct Model {
    config: Rc<AppConfig>,
}

impl Component for Model {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = build_config();
        info!(format!("Trip API at {}", config.api_base_url));
        if config.map_api_key.is_empty() {
            warn!("MAPBOX_API_KEY was not set at build time, map requests will fail");
        }

        Self {
            config: Rc::new(config),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <TripForm config={self.config.clone()} />
        }
    }
}

fn main() {
    logging::init();
    yew::Renderer::<Model>::new().render();
}

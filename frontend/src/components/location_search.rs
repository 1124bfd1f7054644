use std::rc::Rc;

use gloo_console::error;
use trip_planner_lib::{
    mapbox::MapService,
    place_search::{PlaceSearch, PlaceSuggestion},
    sequence::Ticket,
    AppConfig, RequestError,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::MapboxService;

pub enum Msg {
    Input(String),
    Suggestions(Ticket, Result<Vec<PlaceSuggestion>, RequestError>),
    Select(usize),
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub label: AttrValue,
    pub config: Rc<AppConfig>,
    /// Receives `"<lng>,<lat>"` of the picked place.
    pub on_select: Callback<String>,
}

pub struct LocationSearch {
    search: PlaceSearch,
}

impl Component for LocationSearch {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            search: PlaceSearch::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(text) => {
                if let Some(query) = self.search.input_changed(text) {
                    let service = MapboxService::new(&ctx.props().config);
                    let ticket = query.ticket;
                    let cb = ctx.link().callback(move |result| Msg::Suggestions(ticket, result));
                    spawn_local(async move {
                        cb.emit(service.search_places(&query.query).await);
                    });
                }
                true
            }
            Msg::Suggestions(ticket, result) => {
                if let Err(err) = &result {
                    error!(format!("Error fetching location suggestions: {}", err));
                }
                self.search.apply_results(ticket, result)
            }
            Msg::Select(index) => {
                if let Some(value) = self.search.select(index) {
                    ctx.props().on_select.emit(value);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let label = &ctx.props().label;
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            Msg::Input(input.value())
        });

        html! {
            <div class="location-search">
                <label class="form-label">{label.clone()}</label>
                <input
                    type="text"
                    class="form-control"
                    value={self.search.input().to_owned()}
                    oninput={oninput}
                    placeholder={format!("Search {}...", label)}
                />
                if !self.search.suggestions().is_empty() {
                    <ul class="suggestions">
                        { for self.search.suggestions().iter().enumerate().map(|(index, place)| {
                            let onclick = ctx.link().callback(move |_| Msg::Select(index));
                            html! {
                                <li key={place.id.clone()} onclick={onclick}>{place.place_name.clone()}</li>
                            }
                        }) }
                    </ul>
                }
            </div>
        }
    }
}

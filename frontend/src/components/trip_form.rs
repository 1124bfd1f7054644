use std::rc::Rc;

use gloo_console::{error, info};
use trip_planner_lib::{
    sequence::Ticket,
    summary::TripSummary,
    trip::{LocationRole, TripResult},
    trip_request::TripRequestBuilder,
    AppConfig, RequestError,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api,
    components::{
        location_search::LocationSearch,
        trip_map::TripMap,
        trip_summary::{TripDetails, TripOverview},
    },
};

pub enum Msg {
    LocationSelected(LocationRole, String),
    CycleHoursChanged(String),
    Submit,
    Completed(Ticket, Result<TripResult, RequestError>),
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub config: Rc<AppConfig>,
}

pub struct TripForm {
    builder: TripRequestBuilder,
    trip: Option<(Rc<TripResult>, TripSummary)>,
}

impl Component for TripForm {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            builder: TripRequestBuilder::default(),
            trip: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::LocationSelected(role, value) => {
                info!(format!("{} set to {}", role.label(), value));
                self.builder.set_location(role, value);
            }
            Msg::CycleHoursChanged(value) => {
                self.builder.set_cycle_hours(value);
            }
            Msg::Submit => {
                let Some((ticket, payload)) = self.builder.submit() else {
                    return false;
                };
                self.trip = None;

                let config = ctx.props().config.clone();
                let cb = ctx.link().callback(move |result| Msg::Completed(ticket, result));
                spawn_local(async move {
                    cb.emit(api::create_trip(&config, &payload).await);
                });
            }
            Msg::Completed(ticket, result) => {
                if let Err(err) = &result {
                    error!(format!("Trip creation failed: {}", err));
                }
                if !self.builder.complete(ticket, result) {
                    return false;
                }
                self.trip = self
                    .builder
                    .result()
                    .map(|trip| (Rc::new(trip.clone()), TripSummary::from_trip(trip)));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = ctx.props().config.clone();
        let link = ctx.link();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let on_hours = link.callback(|e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            Msg::CycleHoursChanged(input.value())
        });

        let loading = self.builder.is_loading();

        html! {
            <div class="container">
                <div class="card form-card">
                    <h2>{"Plan Your Trip"}</h2>
                    <form onsubmit={onsubmit}>
                        { for LocationRole::ALL.iter().map(|role| {
                            let role = *role;
                            let on_select = link.callback(move |value| Msg::LocationSelected(role, value));
                            html! {
                                <div class="form-group">
                                    <LocationSearch label={role.label()} config={config.clone()} on_select={on_select} />
                                </div>
                            }
                        }) }
                        <div class="form-group">
                            <label class="form-label">{"Current Cycle Used (Hours)"}</label>
                            <input
                                type="number"
                                class="form-control"
                                name="cycle_hours"
                                value={self.builder.input().cycle_hours.clone()}
                                oninput={on_hours}
                                placeholder="Enter hours already worked"
                                required=true
                            />
                        </div>
                        <button type="submit" class="btn-primary" disabled={loading}>
                            if loading {
                                <span class="spinner" />
                            } else {
                                {"Submit Trip"}
                            }
                        </button>
                    </form>

                    if let Some(message) = self.builder.error() {
                        <div class="alert alert-danger">{message.to_owned()}</div>
                    }

                    if let Some((trip, summary)) = &self.trip {
                        <TripOverview summary={summary.clone()} />
                        <TripMap trip={trip.clone()} config={config.clone()} />
                        <TripDetails summary={summary.clone()} />
                    }
                </div>
            </div>
        }
    }
}

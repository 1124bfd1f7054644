use std::rc::Rc;

use gloo_console::{debug, info, warn};
use gloo_utils::document;
use leaflet::{
    CircleMarker, CircleOptions, LatLng, Layer, Map, MapOptions, Polyline, PolylineOptions, Popup, PopupOptions,
    TileLayer, TileLayerOptions, Tooltip, TooltipOptions,
};
use trip_planner_lib::{
    map_scene::{initial_center, plan_scene, LineStyle, MapScene, MarkerSpec},
    map_session::{MapSession, MapSurface},
    mapbox::MapboxEndpoints,
    sequence::Ticket,
    trip::TripResult,
    AppConfig, LngLat, SceneError,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys::Array, Element, HtmlElement, Node};
use yew::{html::Scope, prelude::*};

use crate::api::MapboxService;

pub enum Msg {
    TilesLoaded,
    ScenePlanned(Ticket, Result<MapScene, SceneError>),
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub trip: Rc<TripResult>,
    pub config: Rc<AppConfig>,
}

/// Leaflet map that lives as long as the component once created; new trip
/// results only swap the layers drawn on it. No map is created for a trip
/// without all three locations.
pub struct TripMap {
    mounted: Option<MountedMap>,
    instructions: Vec<String>,
}

struct MountedMap {
    map: Map,
    container: HtmlElement,
    session: MapSession<LeafletSurface>,
    on_tiles_loaded: Option<Closure<dyn FnMut(JsValue)>>,
}

impl MountedMap {
    fn create(center: LngLat) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            session: MapSession::new(LeafletSurface { map: map.clone() }, center),
            map,
            container,
            on_tiles_loaded: None,
        }
    }

    /// Runs once the container is in the document.
    fn attach_tiles(&mut self, link: &Scope<TripMap>, endpoints: &MapboxEndpoints) {
        if self.on_tiles_loaded.is_some() {
            return;
        }

        self.map.set_max_zoom(18.);
        self.map.invalidate_size(false);

        let link = link.clone();
        let on_load = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| link.send_message(Msg::TilesLoaded));

        let opts = TileLayerOptions::new();
        opts.set_update_when_idle(true);
        let tiles = TileLayer::new_options(&endpoints.tile_url_template(), &opts);
        tiles.on("load", on_load.as_ref());
        tiles.add_to(&self.map);

        self.on_tiles_loaded = Some(on_load);
    }

    fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl TripMap {
    fn start_update(&mut self, ctx: &Context<Self>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };

        let ticket = mounted.session.begin_update();
        let trip = ctx.props().trip.clone();
        let service = MapboxService::new(&ctx.props().config);
        let cb = ctx.link().callback(move |scene| Msg::ScenePlanned(ticket, scene));

        spawn_local(async move {
            cb.emit(plan_scene(&trip, &service).await);
        });
    }
}

impl Component for TripMap {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mounted = match initial_center(&ctx.props().trip) {
            Ok(center) => Some(MountedMap::create(center)),
            Err(err) => {
                warn!(format!("TripMap: not creating map, {}", err));
                None
            }
        };

        let mut trip_map = Self {
            mounted,
            instructions: Vec::new(),
        };
        trip_map.start_update(ctx);
        trip_map
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.attach_tiles(ctx.link(), &MapboxEndpoints::new(&ctx.props().config));
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().trip == old_props.trip {
            if let Some(mounted) = &self.mounted {
                mounted.map.invalidate_size(false);
            }
            return false;
        }

        info!("Trip changed, redrawing map");
        match initial_center(&ctx.props().trip) {
            Ok(center) => {
                let created = self.mounted.is_none();
                if created {
                    self.mounted = Some(MountedMap::create(center));
                }
                self.start_update(ctx);
                created
            }
            Err(err) => {
                let Some(mounted) = self.mounted.as_mut() else {
                    warn!(format!("TripMap: not creating map, {}", err));
                    return false;
                };
                warn!(format!("TripMap: clearing map, {}", err));
                mounted.session.begin_update();
                mounted.session.clear();
                self.instructions.clear();
                true
            }
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };

        match msg {
            Msg::TilesLoaded => {
                if !mounted.session.is_ready() {
                    debug!("TripMap: base map loaded");
                }
                mounted.session.mark_ready();
                false
            }
            Msg::ScenePlanned(ticket, Ok(scene)) => {
                for warning in &scene.warnings {
                    warn!(format!("TripMap: {}", warning));
                }
                if !mounted.session.apply(ticket, &scene) {
                    debug!("TripMap: dropped a scene planned for an older trip");
                    return false;
                }
                info!(format!("Placed {} markers", scene.markers.len()));
                self.instructions = scene.directions.map(|route| route.instructions).unwrap_or_default();
                true
            }
            Msg::ScenePlanned(_, Err(err)) => {
                warn!(format!("TripMap: {}", err));
                false
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(mounted) = &self.mounted else {
            return html! {};
        };

        html! {
            <div class="map-frame">
                {mounted.render()}
                if !self.instructions.is_empty() {
                    <div class="card directions">
                        <h5>{"Driving directions"}</h5>
                        <ol>
                            { for self.instructions.iter().map(|step| html! { <li>{step.clone()}</li> }) }
                        </ol>
                    </div>
                }
            </div>
        }
    }
}

pub struct LeafletSurface {
    map: Map,
}

fn lat_lng(point: LngLat) -> LatLng {
    LatLng::new(point.lat, point.lng)
}

fn popup(text: &str) -> Popup {
    let popup = Popup::new(&PopupOptions::default(), None);
    popup.set_content(&JsValue::from_str(text));
    popup
}

impl MapSurface for LeafletSurface {
    type Handle = Layer;

    fn set_view(&mut self, center: LngLat, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Layer {
        let opts = CircleOptions::new();
        opts.set_radius(if marker.number.is_some() { 9. } else { 11. });
        opts.set_color("white".into());
        opts.set_weight(2.);
        opts.set_fill_color(marker.color.css().into());
        opts.set_fill_opacity(0.9);

        let circle = CircleMarker::new_with_options(&lat_lng(marker.position), &opts);
        circle.bind_popup(&popup(&marker.label));

        if let Some(number) = marker.number {
            let tooltip_opts = TooltipOptions::default();
            tooltip_opts.set_permanent(true);
            tooltip_opts.set_direction("center".into());
            let tooltip = Tooltip::new(&tooltip_opts, None);
            tooltip.set_content(&number.to_string().into());
            circle.bind_tooltip(&tooltip);
        }

        circle.add_to(&self.map);
        circle.unchecked_into()
    }

    fn add_line(&mut self, path: &[LngLat], style: &LineStyle, popup_text: Option<&str>) -> Layer {
        let opts = PolylineOptions::new();
        opts.set_color(style.color.into());
        opts.set_weight(style.width);
        opts.set_smooth_factor(1.5);
        if style.rounded {
            opts.set_line_cap("round".into());
            opts.set_line_join("round".into());
        }

        let points = path.iter().map(|point| lat_lng(*point));
        let polyline = Polyline::new_with_options(&Array::from_iter(points), &opts);
        if let Some(text) = popup_text {
            polyline.bind_popup(&popup(text));
        }

        polyline.add_to(&self.map);
        polyline.unchecked_into()
    }

    fn remove(&mut self, handle: Layer) {
        handle.remove();
    }
}

use crate::{
    coordinates::LngLat,
    map_scene::{LineStyle, MapScene, MarkerSpec, RouteOverlay, DIRECTIONS_STYLE, INITIAL_ZOOM},
    mapbox::DirectionsRoute,
    sequence::{RequestSequence, Ticket},
};

/// The drawing operations the session needs from a map SDK.
pub trait MapSurface {
    /// Whatever the SDK hands back for an added layer, used to remove it again.
    type Handle;

    fn set_view(&mut self, center: LngLat, zoom: f64);
    fn add_marker(&mut self, marker: &MarkerSpec) -> Self::Handle;
    fn add_line(&mut self, path: &[LngLat], style: &LineStyle, popup: Option<&str>) -> Self::Handle;
    fn remove(&mut self, handle: Self::Handle);
}

/// Owns one map for the lifetime of the mounted view. Each applied scene
/// replaces everything the previous one drew.
pub struct MapSession<S: MapSurface> {
    surface: S,
    sequence: RequestSequence,
    ready: bool,
    pending_overlay: Option<RouteOverlay>,
    layers: Vec<S::Handle>,
    overlay: Vec<S::Handle>,
}

impl<S: MapSurface> MapSession<S> {
    /// Takes over a freshly created map and centres it.
    pub fn new(mut surface: S, center: LngLat) -> Self {
        surface.set_view(center, INITIAL_ZOOM);
        Self {
            surface,
            sequence: RequestSequence::default(),
            ready: false,
            pending_overlay: None,
            layers: Vec::new(),
            overlay: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Call before planning a scene; pass the ticket to [`MapSession::apply`].
    pub fn begin_update(&mut self) -> Ticket {
        self.sequence.issue()
    }

    /// Draws a planned scene. Returns false if a newer update was started since.
    pub fn apply(&mut self, ticket: Ticket, scene: &MapScene) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Dropping stale map scene {:?}", ticket);
            return false;
        }

        self.clear();

        if let Some(directions) = &scene.directions {
            let handle = self.add_directions(directions);
            self.layers.push(handle);
        }

        for marker in &scene.markers {
            let handle = self.surface.add_marker(marker);
            self.layers.push(handle);
        }

        self.pending_overlay = scene.overlay.clone();
        if self.ready {
            self.flush_overlay();
        }

        true
    }

    /// Called once the base map has loaded; draws an overlay held back until then.
    pub fn mark_ready(&mut self) {
        self.ready = true;
        self.flush_overlay();
    }

    /// Removes everything the last scene drew.
    pub fn clear(&mut self) {
        for handle in self.layers.drain(..).chain(self.overlay.drain(..)) {
            self.surface.remove(handle);
        }
        self.pending_overlay = None;
    }

    fn add_directions(&mut self, directions: &DirectionsRoute) -> S::Handle {
        let popup = format!("Driving route: {}", directions.describe());
        self.surface.add_line(&directions.path, &DIRECTIONS_STYLE, Some(&popup))
    }

    fn flush_overlay(&mut self) {
        if !self.overlay.is_empty() {
            return;
        }
        let Some(overlay) = self.pending_overlay.take() else {
            return;
        };

        for path in &overlay.paths {
            let handle = self.surface.add_line(path, &overlay.style, None);
            self.overlay.push(handle);
        }
    }
}

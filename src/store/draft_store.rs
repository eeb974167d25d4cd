use std::collections::HashSet;

use crate::{
    config::{DuplicatePolicy, StoreConfig},
    draft::{DraftFeature, DrawId},
    error::DraftError,
    events::{EventBus, RenderEvent, Signal, SignalKind},
    handles::derive_handles,
    projection::Projector,
};

/// Keeps the drafts currently being edited and publishes them, together with their vertex
/// and midpoint handles, after every change.
///
/// Every mutating operation ends by publishing a fresh `RenderEvent` on the bus. The store
/// is idle while it tracks no drafts and editing otherwise.
///
/// Parameters:
/// - `D`: the draft type.
/// - `P`: converts between map coordinates and screen pixels, used to place midpoints.
/// - `B`: delivers lifecycle signals and receives render events.
pub struct DraftStore<D: DraftFeature, P: Projector, B: EventBus> {
    drafts: Vec<D>,
    projector: P,
    bus: B,
    config: StoreConfig,
}

impl<D: DraftFeature, P: Projector, B: EventBus> DraftStore<D, P, B> {
    /// Create an idle store and subscribe it to the lifecycle signals.
    pub fn new(projector: P, bus: B, config: StoreConfig) -> Self {
        Self::with_drafts(Vec::new(), projector, bus, config)
    }

    /// Like `new`, seeded with drafts. Nothing is published until the first render.
    pub fn with_drafts(drafts: Vec<D>, projector: P, mut bus: B, config: StoreConfig) -> Self {
        for kind in SignalKind::ALL {
            bus.subscribe(kind);
        }
        Self {
            drafts,
            projector,
            bus,
            config,
        }
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Call `render` after changing the viewport to move the midpoint handles.
    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn add(&mut self, draft: D) -> Result<(), DraftError> {
        self.add_many(std::iter::once(draft))
    }

    /// Start editing several drafts, appended in the given order. Duplicate ids are handled
    /// according to the configured `DuplicatePolicy`; a rejected batch changes nothing and
    /// publishes nothing.
    pub fn add_many<I: IntoIterator<Item = D>>(&mut self, drafts: I) -> Result<(), DraftError> {
        let incoming: Vec<D> = drafts.into_iter().collect();
        let was_idle = self.drafts.is_empty();
        let num_incoming = incoming.len();

        match self.config.duplicate_policy {
            DuplicatePolicy::Allow => self.drafts.extend(incoming),
            DuplicatePolicy::Reject => {
                let mut draw_ids: HashSet<DrawId> =
                    self.drafts.iter().map(|draft| draft.draw_id()).collect();
                if let Some(duplicate) = incoming
                    .iter()
                    .find(|draft| !draw_ids.insert(draft.draw_id()))
                {
                    log::warn!("Rejecting drafts, drawId {} is taken", duplicate.draw_id());
                    return Err(DraftError::DuplicateDrawId(duplicate.draw_id()));
                }
                self.drafts.extend(incoming);
            }
            DuplicatePolicy::Replace => {
                for draft in incoming {
                    match self.position(draft.draw_id()) {
                        Some(index) => {
                            log::debug!("Replacing draft {}", draft.draw_id());
                            self.drafts[index] = draft;
                        }
                        None => self.drafts.push(draft),
                    }
                }
            }
        }

        log::debug!(
            "Added {} drafts, editing {}",
            num_incoming,
            self.drafts.len()
        );
        self.log_transition(was_idle);
        self.render();
        Ok(())
    }

    pub fn get_all(&self) -> &[D] {
        &self.drafts
    }

    /// The drafts rendered to GeoJSON, without handles.
    pub fn get_all_geojson(&self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self.drafts.iter().map(|draft| draft.to_geojson()).collect(),
            foreign_members: None,
        }
    }

    /// The first draft with the given id.
    pub fn get(&self, draw_id: DrawId) -> Option<&D> {
        self.drafts.iter().find(|draft| draft.draw_id() == draw_id)
    }

    /// Stop editing every draft with the given id. Renders even when there is none.
    pub fn end_edit(&mut self, draw_id: DrawId) {
        let was_idle = self.drafts.is_empty();
        let num_drafts = self.drafts.len();
        self.drafts.retain(|draft| draft.draw_id() != draw_id);
        if self.drafts.len() == num_drafts {
            log::debug!("No draft {} to end editing of", draw_id);
        } else {
            log::debug!("Ended editing of draft {}", draw_id);
        }
        self.log_transition(was_idle);
        self.render();
    }

    pub fn clear(&mut self) {
        let was_idle = self.drafts.is_empty();
        self.drafts.clear();
        self.log_transition(was_idle);
        self.render();
    }

    /// Whether an edit session is active, i.e. any draft is being edited.
    pub fn in_progress(&self) -> bool {
        !self.drafts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// What `render` publishes: the drafts, then all vertex handles, then all midpoint
    /// handles. Computed from scratch on every call.
    pub fn render_payload(&self) -> RenderEvent {
        let mut geojson = self.get_all_geojson();
        let handles = derive_handles(&self.drafts, &self.projector);
        log::debug!(
            "Rendering {} drafts with {} vertices and {} midpoints",
            geojson.features.len(),
            handles.vertices.len(),
            handles.midpoints.len()
        );
        geojson.features.extend(handles.features());
        RenderEvent { geojson }
    }

    pub fn render(&mut self) {
        let event = self.render_payload();
        self.bus.publish(&event);
    }

    /// React to one lifecycle signal.
    pub fn handle(&mut self, signal: Signal) {
        log::debug!("Handling {}", signal.kind().name());
        match signal {
            Signal::NewEdit => self.render(),
            Signal::FinishEdit => {
                log::info!("Edit session finished, dropping {} drafts", self.drafts.len());
                self.clear()
            }
            Signal::EditEnd { draw_id } => self.end_edit(draw_id),
        }
    }

    /// Handle every signal waiting on the bus, in order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut num_handled = 0;
        while let Some(signal) = self.bus.poll() {
            self.handle(signal);
            num_handled += 1;
        }
        num_handled
    }

    fn position(&self, draw_id: DrawId) -> Option<usize> {
        self.drafts
            .iter()
            .position(|draft| draft.draw_id() == draw_id)
    }

    fn log_transition(&self, was_idle: bool) {
        match (was_idle, self.drafts.is_empty()) {
            (true, false) => log::info!("Editing {} drafts", self.drafts.len()),
            (false, true) => log::info!("No drafts left, store is idle"),
            _ => {}
        }
    }
}

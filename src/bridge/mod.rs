//! Bridge from the imperative render loop out to the host's declarative
//! state.
//!
//! The render core makes picking/selection/hover decisions mid-frame; the
//! host UI holds the state those decisions must land in. This adapter is the
//! only crossing point, and it is strictly one-way: the loop dispatches
//! value messages outward, the UI layer pushes changes back in through the
//! per-frame settings snapshot — never by reaching into loop internals.

use tracing::trace;

use crate::geom::Point3;
use crate::model::EntityId;

pub type SelectionHandler = Box<dyn FnMut(Option<EntityId>)>;
pub type ToggleHandler = Box<dyn FnMut()>;
pub type FocusHandler = Box<dyn FnMut(Point3)>;

/// Holds the host-supplied callbacks for the four outbound notifications:
/// selected vertex (or none), hovered vertex (or none), click-to-fetch
/// toggle, and camera focus point.
///
/// Every dispatch is a no-op until its handler is attached;
/// [`all_handlers_attached`](Self::all_handlers_attached) lets the loop
/// check readiness explicitly before relying on the bridge.
#[derive(Default)]
pub struct StateBridge {
    on_selected: Option<SelectionHandler>,
    on_hovered: Option<SelectionHandler>,
    on_click_to_fetch: Option<ToggleHandler>,
    on_focus: Option<FocusHandler>,
}

impl StateBridge {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Handler attachment (host side)
    // ========================================================================

    pub fn attach_selection_handler(&mut self, handler: impl FnMut(Option<EntityId>) + 'static) {
        self.on_selected = Some(Box::new(handler));
    }

    pub fn attach_hover_handler(&mut self, handler: impl FnMut(Option<EntityId>) + 'static) {
        self.on_hovered = Some(Box::new(handler));
    }

    pub fn attach_click_to_fetch_handler(&mut self, handler: impl FnMut() + 'static) {
        self.on_click_to_fetch = Some(Box::new(handler));
    }

    pub fn attach_focus_handler(&mut self, handler: impl FnMut(Point3) + 'static) {
        self.on_focus = Some(Box::new(handler));
    }

    pub fn all_handlers_attached(&self) -> bool {
        self.on_selected.is_some()
            && self.on_hovered.is_some()
            && self.on_click_to_fetch.is_some()
            && self.on_focus.is_some()
    }

    // ========================================================================
    // Dispatch (render-loop side)
    // ========================================================================

    pub fn dispatch_selected(&mut self, id: Option<EntityId>) {
        trace!(?id, "dispatch selected");
        if let Some(handler) = &mut self.on_selected {
            handler(id);
        }
    }

    pub fn dispatch_hovered(&mut self, id: Option<EntityId>) {
        trace!(?id, "dispatch hovered");
        if let Some(handler) = &mut self.on_hovered {
            handler(id);
        }
    }

    pub fn dispatch_click_to_fetch_toggle(&mut self) {
        trace!("dispatch click-to-fetch toggle");
        if let Some(handler) = &mut self.on_click_to_fetch {
            handler();
        }
    }

    pub fn dispatch_focus(&mut self, point: Point3) {
        trace!(?point, "dispatch focus");
        if let Some(handler) = &mut self.on_focus {
            handler(point);
        }
    }
}

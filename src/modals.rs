//! Letter panels opened from the envelopes on the acceptance page.
//!
//! Any number of panels may be open at once. They stack in the order they
//! were opened; the most recent one is drawn on top and receives clicks.

/// Which part of a panel a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPart {
    /// The dimmed area around the panel's content.
    Backdrop,
    Body,
    CloseControl,
}

/// A panel, or something nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRef {
    pub panel_id: String,
    pub part: PanelPart,
}

impl PanelRef {
    pub fn new(panel_id: impl Into<String>, part: PanelPart) -> Self {
        Self {
            panel_id: panel_id.into(),
            part,
        }
    }
}

/// Panel id for the envelope `key`.
pub fn panel_id(key: &str) -> String {
    format!("{key}-content")
}

#[derive(Debug, Clone)]
struct Panel {
    key: String,
    id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ModalSet {
    panels: Vec<Panel>,
    /// Indices into `panels`, bottom to top.
    open: Vec<usize>,
}

impl ModalSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let panels = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                let id = panel_id(&key);
                Panel { key, id }
            })
            .collect();
        Self {
            panels,
            open: Vec::new(),
        }
    }

    /// Reveal the panel for envelope `key`. Unknown keys are ignored.
    pub fn open(&mut self, key: &str) -> bool {
        let Some(index) = self.panels.iter().position(|panel| panel.key == key) else {
            tracing::debug!(key, "no panel for envelope");
            return false;
        };
        // Reopening an open panel brings it to the top.
        self.open.retain(|&open| open != index);
        self.open.push(index);
        tracing::debug!(key, "panel opened");
        true
    }

    /// Hide the panel that owns `target`, whichever part of it was given.
    pub fn close(&mut self, target: &PanelRef) -> bool {
        let Some(index) = self
            .panels
            .iter()
            .position(|panel| panel.id == target.panel_id)
        else {
            return false;
        };
        let before = self.open.len();
        self.open.retain(|&open| open != index);
        before != self.open.len()
    }

    /// Clicks on the backdrop or the close control close that panel only.
    /// Clicks on the body do nothing.
    pub fn handle_click(&mut self, target: &PanelRef) -> bool {
        match target.part {
            PanelPart::Backdrop | PanelPart::CloseControl => self.close(target),
            PanelPart::Body => false,
        }
    }

    /// Close every open panel. Returns how many were closed.
    pub fn close_all(&mut self) -> usize {
        let closed = self.open.len();
        self.open.clear();
        if closed > 0 {
            tracing::debug!(closed, "all panels closed");
        }
        closed
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.iter().any(|&index| self.panels[index].key == key)
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    /// Keys of the open panels, bottom to top.
    pub fn open_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.open
            .iter()
            .map(move |&index| self.panels[index].key.as_str())
    }

    pub fn topmost(&self) -> Option<&str> {
        self.open
            .last()
            .map(|&index| self.panels[index].key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ModalSet {
        let mut modals = ModalSet::new(["memories", "reasons", "promise"]);
        modals.open("memories");
        modals.open("reasons");
        modals.open("promise");
        modals
    }

    #[test]
    fn escape_closes_every_open_panel() {
        let mut modals = set();
        assert_eq!(modals.close_all(), 3);
        assert!(!modals.any_open());
    }

    #[test]
    fn backdrop_click_closes_only_that_panel() {
        let mut modals = set();
        assert!(modals.handle_click(&PanelRef::new("reasons-content", PanelPart::Backdrop)));
        assert!(!modals.is_open("reasons"));
        assert!(modals.is_open("memories"));
        assert!(modals.is_open("promise"));
    }

    #[test]
    fn body_click_keeps_panel_open() {
        let mut modals = set();
        assert!(!modals.handle_click(&PanelRef::new("promise-content", PanelPart::Body)));
        assert!(modals.is_open("promise"));
    }

    #[test]
    fn close_control_closes_owning_panel() {
        let mut modals = set();
        assert!(modals.handle_click(&PanelRef::new("promise-content", PanelPart::CloseControl)));
        assert_eq!(modals.open_keys().collect::<Vec<_>>(), vec!["memories", "reasons"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut modals = ModalSet::new(["memories"]);
        assert!(!modals.open("nope"));
        assert!(!modals.close(&PanelRef::new("nope-content", PanelPart::Backdrop)));
        assert!(!modals.any_open());
    }

    #[test]
    fn reopening_moves_panel_to_top() {
        let mut modals = set();
        modals.open("memories");
        assert_eq!(modals.topmost(), Some("memories"));
        assert_eq!(modals.open_keys().count(), 3);
    }
}

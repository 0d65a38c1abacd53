// Map session — single owner of the pin list, address cache, and panel.
//
// Everything here runs on one logical thread; async geocode results come
// back through `apply_address`, keyed by group and stamped with the
// session epoch so stale results from a previous focus are discarded.

use std::collections::HashMap;

use tracing::debug;

use crate::cluster::{Aggregation, GroupKey, PinGroup};
use crate::panel::{DisclosureState, PanelConfig, TapOutcome};

/// A pending reverse-geocoding lookup. Keyed so the result lands on the
/// right group no matter the completion order, and stamped with the epoch
/// it was issued in.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub key: GroupKey,
    pub latitude: f64,
    pub longitude: f64,
    pub epoch: u64,
}

pub struct MapSession {
    groups: Vec<PinGroup>,
    excluded: usize,
    /// Resolved addresses by group key; a group is geocoded at most once.
    addresses: HashMap<GroupKey, String>,
    panel: DisclosureState,
    /// Bumped on focus loss; in-flight results from an older epoch are dropped.
    epoch: u64,
}

impl MapSession {
    pub fn new(aggregation: Aggregation, config: PanelConfig) -> Self {
        Self {
            groups: aggregation.groups,
            excluded: aggregation.excluded,
            addresses: HashMap::new(),
            panel: DisclosureState::new(config),
            epoch: 0,
        }
    }

    pub fn groups(&self) -> &[PinGroup] {
        &self.groups
    }

    /// Posts dropped during aggregation for missing coordinates.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn panel(&self) -> &DisclosureState {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut DisclosureState {
        &mut self.panel
    }

    pub fn tick(&mut self, dt: f64) {
        self.panel.tick(dt);
    }

    /// Tap the pin at `index`.
    ///
    /// Returns a geocode request when the group's address still needs
    /// resolving — the caller runs it and hands the result back through
    /// [`apply_address`](Self::apply_address). A cached address is applied
    /// immediately and no request is issued.
    pub fn select_pin(&mut self, index: usize) -> Option<GeocodeRequest> {
        let group = self.groups.get(index)?.clone();

        match self.panel.select_pin(&group) {
            TapOutcome::Dismissed => None,
            TapOutcome::Opened => {
                if !group.address.is_empty() {
                    return None;
                }
                let key = group.key();
                if let Some(cached) = self.addresses.get(&key).cloned() {
                    self.set_group_address(key, &cached);
                    return None;
                }
                Some(GeocodeRequest {
                    key,
                    latitude: group.latitude,
                    longitude: group.longitude,
                    epoch: self.epoch,
                })
            }
        }
    }

    /// Apply a resolved address. Returns false when the result is stale
    /// (issued before a focus loss) or its group no longer exists.
    pub fn apply_address(&mut self, request: &GeocodeRequest, address: String) -> bool {
        if request.epoch != self.epoch {
            debug!(key = ?request.key, "Discarding stale geocode result");
            return false;
        }
        if !self.groups.iter().any(|g| g.key() == request.key) {
            return false;
        }
        self.addresses.insert(request.key, address.clone());
        self.set_group_address(request.key, &address);
        true
    }

    fn set_group_address(&mut self, key: GroupKey, address: &str) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.key() == key) {
            group.address = address.to_string();
        }
        self.panel.update_selected_address(key, address);
    }

    pub fn close_pressed(&mut self) {
        self.panel.close_pressed();
    }

    /// The map view went off-screen: reset the panel instantly and fence
    /// off any geocode results still in flight.
    pub fn focus_lost(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.panel.focus_lost();
    }
}

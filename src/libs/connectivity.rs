use tracing::debug;

use crate::libs::sync::SyncController;

/// Adapter for the platform reachability signal. Forwards transitions to
/// the sync controller; repeated reports of the same value are not flips
/// and do not fire.
#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
    last_reported: Option<bool>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, online: bool, controller: &mut SyncController) {
        if self.last_reported == Some(online) {
            debug!(online, "connectivity unchanged");
            return;
        }
        self.last_reported = Some(online);
        controller.set_connectivity(online);
    }
}

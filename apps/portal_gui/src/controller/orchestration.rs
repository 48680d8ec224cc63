//! Hands UI actions collected during a frame to the portal controller.

use portal_core::{PortalController, PortalEvent};

/// Applies the frame's events, then drains everything the controller
/// recorded since the last frame into the log. Returns how many records
/// were released.
pub fn dispatch_portal_events(
    portal: &mut PortalController,
    events: Vec<PortalEvent>,
    now_ms: u64,
) -> usize {
    for event in events {
        tracing::debug!(event = event.name(), now_ms, "queued ui->portal event");
        portal.handle(event, now_ms);
    }

    let records = portal.drain_signals();
    for record in &records {
        tracing::debug!(at_ms = record.at_ms, signal = ?record.signal, "portal signal");
    }
    records.len()
}

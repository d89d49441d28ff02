//! Stand-in for remote sync: changes are announced in the log only.

/// A change that would be pushed to a remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Created(String),
    Updated(String),
    Deleted(Vec<String>),
}

/// Announce a change
pub fn publish(event: &SyncEvent) {
    match event {
        SyncEvent::Created(id) => log::info!("Task synced to database: {}", id),
        SyncEvent::Updated(id) => log::info!("Task update synced: {}", id),
        SyncEvent::Deleted(ids) => log::info!("Task deletion synced: {}", ids.join(", ")),
    }
}

//! Triage rules: who may confirm or discard an event, and when.

use thermwatch_event_model::{Event, EventStatus, UserId, UserRole};

use crate::error::TriageError;

/// Operator decision on a pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageAction {
    Confirm,
    Discard,
}

impl TriageAction {
    pub fn resulting_status(&self) -> EventStatus {
        match self {
            Self::Confirm => EventStatus::Confirmed,
            Self::Discard => EventStatus::Discarded,
        }
    }
}

/// Apply a triage decision, returning the updated event.
///
/// Only operators triage, and only pending events can be triaged.
pub fn triage(
    event: &Event,
    action: TriageAction,
    role: UserRole,
    user_id: UserId,
) -> Result<Event, TriageError> {
    if role != UserRole::Operator {
        return Err(TriageError::NotPermitted { role });
    }
    if event.status != EventStatus::Pending {
        return Err(TriageError::AlreadyTriaged {
            event_id: event.event_id,
            status: event.status,
        });
    }

    let mut updated = event.clone();
    updated.status = action.resulting_status();
    updated.handled_by = Some(user_id);

    tracing::debug!(
        event_id = event.event_id,
        user_id,
        status = ?updated.status,
        "Triaged event"
    );

    Ok(updated)
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::log_debug;
use crate::report::ReportResult;

use super::{FieldKey, FieldRecord};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FormState {
    /// Initialised, nothing edited yet.
    Empty,
    /// At least one field has been set.
    Populated,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::Empty
    }
}

/// The single authoritative field record for one user session.
///
/// Single writer, single reader: the UI loop owns the session and passes it
/// to handlers explicitly.
#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    record: Option<FieldRecord>,
    state: FormState,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            record: None,
            state: FormState::Empty,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.record.is_some()
    }

    /// Creates the default record. A record that already exists is left as is,
    /// so re-entering the form never resets what was typed.
    pub fn initialize(&mut self) -> &mut FieldRecord {
        let id = self.id;
        self.record.get_or_insert_with(|| {
            log_debug!("Initialised field record for session {id}");
            FieldRecord::default()
        })
    }

    /// Overwrites the value stored for `name`.
    ///
    /// The name is validated before anything is touched; an unknown name leaves
    /// the record unchanged. Returns whether the stored value changed.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> ReportResult<bool> {
        let key: FieldKey = name.parse()?;
        let changed = self.initialize().set(key, value);
        self.state = FormState::Populated;
        if changed {
            log_debug!("Field {key} updated in session {}", self.id);
        }
        Ok(changed)
    }

    pub fn get_record(&mut self) -> &FieldRecord {
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        let mut session = FormSession::new();
        session.initialize();
        session.set_field("attended_wells", "Well-12").unwrap();

        session.initialize();

        assert_eq!(
            session.get_record().value(FieldKey::AttendedWells),
            "Well-12"
        );
        assert_eq!(session.state(), FormState::Populated);
    }

    #[test]
    fn starts_empty_and_becomes_populated() {
        let mut session = FormSession::new();
        assert!(!session.is_initialized());
        session.initialize();
        assert_eq!(session.state(), FormState::Empty);

        session.set_field("FCHP", "").unwrap();
        assert_eq!(session.state(), FormState::Populated);

        session.set_field("FTHP", "120 psi").unwrap();
        assert_eq!(session.state(), FormState::Populated);
    }

    #[test]
    fn unknown_field_leaves_record_untouched() {
        let mut session = FormSession::new();
        session.set_field("SCHP", "600 psi").unwrap();
        let before = session.get_record().clone();

        let err = session.set_field("tubing_size", "2 3/8").unwrap_err();

        assert!(matches!(err, crate::report::ReportError::UnknownField { .. }));
        assert_eq!(session.get_record(), &before);
    }

    #[test]
    fn unknown_field_does_not_leave_empty_state() {
        let mut session = FormSession::new();
        session.initialize();
        assert!(session.set_field("nope", "x").is_err());
        assert_eq!(session.state(), FormState::Empty);
    }

    #[test]
    fn set_field_reports_whether_value_changed() {
        let mut session = FormSession::new();
        assert!(session.set_field("battery_voltage", "12.6 V").unwrap());
        assert!(!session.set_field("battery_voltage", "12.6 V").unwrap());
    }

    #[test]
    fn sessions_do_not_share_ids() {
        assert_ne!(FormSession::new().id(), FormSession::new().id());
    }
}

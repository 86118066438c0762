//! The fixed schema of the artificial lift DPR form.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::report::ReportError;

/// One key of the report schema.
///
/// Declaration order is schema order; `FieldRecord` serialises in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldKey {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "attended_wells")]
    AttendedWells,
    #[serde(rename = "FCHP")]
    Fchp,
    #[serde(rename = "FTHP")]
    Fthp,
    #[serde(rename = "SCHP")]
    Schp,
    #[serde(rename = "regulator_pressure")]
    RegulatorPressure,
    #[serde(rename = "plunger_runtime")]
    PlungerRuntime,
    #[serde(rename = "plunger_count")]
    PlungerCount,
    #[serde(rename = "shut_in_time")]
    ShutInTime,
    #[serde(rename = "open_time")]
    OpenTime,
    #[serde(rename = "after_flow_time")]
    AfterFlowTime,
    #[serde(rename = "battery_voltage")]
    BatteryVoltage,
    #[serde(rename = "condition_of_plunger")]
    ConditionOfPlunger,
}

impl FieldKey {
    pub const ALL: [FieldKey; 13] = [
        FieldKey::Date,
        FieldKey::AttendedWells,
        FieldKey::Fchp,
        FieldKey::Fthp,
        FieldKey::Schp,
        FieldKey::RegulatorPressure,
        FieldKey::PlungerRuntime,
        FieldKey::PlungerCount,
        FieldKey::ShutInTime,
        FieldKey::OpenTime,
        FieldKey::AfterFlowTime,
        FieldKey::BatteryVoltage,
        FieldKey::ConditionOfPlunger,
    ];

    /// Keys the form exposes as text inputs. `date` has no input and keeps
    /// whatever value the record holds (null unless set programmatically).
    pub const FORM_INPUTS: [FieldKey; 12] = [
        FieldKey::AttendedWells,
        FieldKey::Fchp,
        FieldKey::Fthp,
        FieldKey::Schp,
        FieldKey::RegulatorPressure,
        FieldKey::PlungerRuntime,
        FieldKey::PlungerCount,
        FieldKey::ShutInTime,
        FieldKey::OpenTime,
        FieldKey::AfterFlowTime,
        FieldKey::BatteryVoltage,
        FieldKey::ConditionOfPlunger,
    ];

    /// Keys rendered one paragraph each under "Operational / Plunger Parameters".
    pub const OPERATIONAL: [FieldKey; 7] = [
        FieldKey::PlungerRuntime,
        FieldKey::PlungerCount,
        FieldKey::ShutInTime,
        FieldKey::OpenTime,
        FieldKey::AfterFlowTime,
        FieldKey::BatteryVoltage,
        FieldKey::ConditionOfPlunger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Date => "date",
            FieldKey::AttendedWells => "attended_wells",
            FieldKey::Fchp => "FCHP",
            FieldKey::Fthp => "FTHP",
            FieldKey::Schp => "SCHP",
            FieldKey::RegulatorPressure => "regulator_pressure",
            FieldKey::PlungerRuntime => "plunger_runtime",
            FieldKey::PlungerCount => "plunger_count",
            FieldKey::ShutInTime => "shut_in_time",
            FieldKey::OpenTime => "open_time",
            FieldKey::AfterFlowTime => "after_flow_time",
            FieldKey::BatteryVoltage => "battery_voltage",
            FieldKey::ConditionOfPlunger => "condition_of_plunger",
        }
    }

    /// Label shown next to the form input.
    pub fn input_label(&self) -> &'static str {
        match self {
            FieldKey::Date => "Date",
            FieldKey::AttendedWells => "Attended Wells",
            // The remaining inputs are labelled by their key.
            other => other.as_str(),
        }
    }

    /// Human label used in the generated document.
    pub fn report_label(&self) -> &'static str {
        match self {
            FieldKey::Date => "Dated",
            FieldKey::AttendedWells => "Attended wells on plunger lift system",
            FieldKey::Fchp => "FCHP",
            FieldKey::Fthp => "FTHP",
            FieldKey::Schp => "SCHP",
            FieldKey::RegulatorPressure => "Regulator pressure",
            FieldKey::PlungerRuntime => "Plunger Runtime",
            FieldKey::PlungerCount => "Plunger Count",
            FieldKey::ShutInTime => "Shut in Time",
            FieldKey::OpenTime => "Open Time",
            FieldKey::AfterFlowTime => "After Flow Time",
            FieldKey::BatteryVoltage => "Battery Voltage",
            FieldKey::ConditionOfPlunger => "Condition of Plunger Surface Assembly",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| ReportError::unknown_field(value))
    }
}

/// Input descriptor handed to the page so it can build the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
}

pub fn form_schema() -> Vec<FieldDescriptor> {
    FieldKey::FORM_INPUTS
        .iter()
        .map(|key| FieldDescriptor {
            name: key.as_str(),
            label: key.input_label(),
        })
        .collect()
}

/// Flat record of every schema key to its free-text value.
///
/// Every key is always present. `date` starts out null, the rest start
/// out empty. Keys are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldRecord {
    values: BTreeMap<FieldKey, Option<String>>,
}

impl Default for FieldRecord {
    fn default() -> Self {
        let values = FieldKey::ALL
            .iter()
            .map(|key| {
                let initial = match key {
                    FieldKey::Date => None,
                    _ => Some(String::new()),
                };
                (*key, initial)
            })
            .collect();
        Self { values }
    }
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).and_then(|value| value.as_deref())
    }

    /// Value as rendered: null reads as the empty string.
    pub fn value(&self, key: FieldKey) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Overwrites `key`. Returns whether the stored value changed.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> bool {
        let value = Some(value.into());
        let slot = self.values.entry(key).or_insert(None);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, Option<&str>)> + '_ {
        self.values.iter().map(|(key, value)| (*key, value.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for key in FieldKey::ALL {
            assert_eq!(key.as_str().parse::<FieldKey>().unwrap(), key);
        }
    }

    #[test]
    fn rejects_names_outside_schema() {
        let err = "fchp".parse::<FieldKey>().unwrap_err();
        assert!(matches!(err, ReportError::UnknownField { ref name } if name == "fchp"));
        assert!("casing_pressure".parse::<FieldKey>().is_err());
    }

    #[test]
    fn default_record_holds_every_key() {
        let record = FieldRecord::default();
        assert_eq!(record.iter().count(), FieldKey::ALL.len());
        assert_eq!(record.get(FieldKey::Date), None);
        for key in FieldKey::FORM_INPUTS {
            assert_eq!(record.get(key), Some(""));
        }
    }

    #[test]
    fn unset_date_renders_as_empty() {
        let record = FieldRecord::default();
        assert_eq!(record.value(FieldKey::Date), "");
    }

    #[test]
    fn set_reports_changes_only() {
        let mut record = FieldRecord::default();
        assert!(record.set(FieldKey::Fchp, "450 psi"));
        assert!(!record.set(FieldKey::Fchp, "450 psi"));
        assert!(record.set(FieldKey::Fchp, "455 psi"));
        assert_eq!(record.value(FieldKey::Fchp), "455 psi");
    }

    #[test]
    fn serialises_in_schema_order_with_null_date() {
        let json = serde_json::to_string(&FieldRecord::default()).unwrap();
        assert!(json.starts_with(r#"{"date":null,"attended_wells":"","FCHP":"""#));
        assert!(json.ends_with(r#""condition_of_plunger":""}"#));
    }

    #[test]
    fn form_schema_excludes_date() {
        let schema = form_schema();
        assert_eq!(schema.len(), 12);
        assert!(schema.iter().all(|field| field.name != "date"));
        assert_eq!(schema[0].label, "Attended Wells");
        assert_eq!(schema[4].label, "regulator_pressure");
    }
}

//! Cross-subsystem health aggregation.
//!
//! Power and thermal queries fold several subsystem arrays (supplies,
//! redundancy groups, sensors) into one record list. Subsystems gate on
//! their declared element count: a count of zero means the subsystem is
//! absent from this chassis and contributes nothing, whatever its member
//! array holds.

use crate::model::{HealthRecord, SubsystemMember};

/// One subsystem's view of component health.
#[derive(Debug, Clone)]
pub struct SubsystemView {
    /// Subsystem label (e.g. `power-supply`).
    pub subsystem: &'static str,
    /// Element count the controller declared for this subsystem.
    pub declared_count: usize,
    /// Per-element records, in controller order.
    pub members: Vec<HealthRecord>,
}

impl SubsystemView {
    /// Create a view from already-normalized records.
    pub fn new(
        subsystem: &'static str,
        declared_count: usize,
        members: Vec<HealthRecord>,
    ) -> Self {
        Self {
            subsystem,
            declared_count,
            members,
        }
    }

    /// View over raw subsystem members. A missing declared count falls back
    /// to the member list length.
    pub fn from_members(
        subsystem: &'static str,
        declared_count: Option<usize>,
        members: &[SubsystemMember],
    ) -> Self {
        Self {
            subsystem,
            declared_count: declared_count.unwrap_or(members.len()),
            members: members.iter().map(SubsystemMember::to_health).collect(),
        }
    }
}

/// Merge subsystem views into one record list.
///
/// Views are folded in the order given, so output ordering is
/// deterministic. Records are never deduplicated: a component referenced
/// from two subsystems appears twice.
pub fn aggregate(views: Vec<SubsystemView>) -> Vec<HealthRecord> {
    let mut records = Vec::new();
    for view in views {
        if view.declared_count == 0 {
            // Subsystem not present on this chassis.
            continue;
        }
        records.extend(view.members);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Health, State};

    fn record(name: &str) -> HealthRecord {
        HealthRecord {
            name: name.to_string(),
            health: Health::Ok,
            state: State::Enabled,
        }
    }

    #[test]
    fn test_power_health_scenario() {
        // 2 supplies, 0 redundancy groups, 1 voltage sensor.
        let records = aggregate(vec![
            SubsystemView::new("power-supply", 2, vec![record("PSU 1"), record("PSU 2")]),
            SubsystemView::new("redundancy", 0, vec![]),
            SubsystemView::new("voltage", 1, vec![record("CPU1 VCORE")]),
        ]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["PSU 1", "PSU 2", "CPU1 VCORE"]);
    }

    #[test]
    fn test_zero_count_gates_regardless_of_members() {
        // Some controllers leave stale entries in subsystem arrays they
        // declare empty; the declared count wins.
        let records = aggregate(vec![SubsystemView::new(
            "redundancy",
            0,
            vec![record("stale")],
        )]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_deduplication_across_subsystems() {
        let records = aggregate(vec![
            SubsystemView::new("power-supply", 1, vec![record("PSU Redundancy")]),
            SubsystemView::new("redundancy", 1, vec![record("PSU Redundancy")]),
        ]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_from_members_count_fallback() {
        let members: Vec<crate::model::SubsystemMember> =
            serde_json::from_str(r#"[{"Name": "Fan 1"}, {"Name": "Fan 2"}]"#).unwrap();

        let view = SubsystemView::from_members("fan", None, &members);
        assert_eq!(view.declared_count, 2);

        let view = SubsystemView::from_members("fan", Some(0), &members);
        assert_eq!(aggregate(vec![view]), Vec::<HealthRecord>::new());
    }
}

use chrono::NaiveTime;

use crate::models::{Medication, MedicationLog};

use super::types::{DoseSchedule, DoseSlot, NextDose};

/// Compute per-slot taken/pending state and the next due dose.
///
/// `todays_logs` must already be scoped to one patient and the current
/// calendar day; day boundaries are the caller's concern. Logs for other
/// medications are ignored, so an unfiltered day set is acceptable.
pub fn compute_schedule(
    medication: &Medication,
    todays_logs: &[MedicationLog],
    now: NaiveTime,
) -> DoseSchedule {
    let times = normalized_slots(&medication.schedule_times);

    let slots = times
        .iter()
        .map(|&time| DoseSlot {
            time,
            taken: todays_logs
                .iter()
                .any(|log| log.medication_id == medication.id && log.scheduled_time == time),
        })
        .collect();

    DoseSchedule {
        medication_id: medication.id,
        slots,
        next_due: next_dose(&times, now),
    }
}

/// Dedupe and sort slot times on the 24-hour clock.
pub fn normalized_slots(times: &[NaiveTime]) -> Vec<NaiveTime> {
    let mut sorted = times.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Earliest slot strictly after `now`; once today's slots are exhausted the
/// next due dose is tomorrow's first slot.
fn next_dose(sorted: &[NaiveTime], now: NaiveTime) -> NextDose {
    match sorted.iter().copied().find(|&t| t > now) {
        Some(t) => NextDose::Today(t),
        None => match sorted.first() {
            Some(&first) => NextDose::Tomorrow(first),
            None => NextDose::Unscheduled,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day_start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn medication(times: &[NaiveTime]) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: "Twice daily".into(),
            schedule_times: times.to_vec(),
            start_date: day_start().date(),
            end_date: None,
            is_active: true,
            created_at: day_start(),
            updated_at: day_start(),
        }
    }

    fn log(med: &Medication, slot: NaiveTime) -> MedicationLog {
        MedicationLog {
            id: Uuid::new_v4(),
            patient_id: med.patient_id,
            medication_id: med.id,
            scheduled_time: slot,
            taken_at: day_start().date().and_time(slot),
            notes: None,
            created_at: day_start(),
        }
    }

    #[test]
    fn mid_morning_points_at_evening_dose() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let schedule = compute_schedule(&med, &[], time(10, 0));

        assert_eq!(schedule.next_due, NextDose::Today(time(20, 0)));
        assert_eq!(schedule.taken_count(), 0);
        assert_eq!(schedule.slots.len(), 2);
    }

    #[test]
    fn late_evening_wraps_to_tomorrow() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let schedule = compute_schedule(&med, &[], time(22, 0));

        assert_eq!(schedule.next_due, NextDose::Tomorrow(time(8, 0)));
        // Wrapping does not change today's slot states.
        assert!(schedule.slots.iter().all(|s| !s.taken));
    }

    #[test]
    fn next_due_is_strictly_after_now() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let schedule = compute_schedule(&med, &[], time(8, 0));

        assert_eq!(schedule.next_due, NextDose::Today(time(20, 0)));
    }

    #[test]
    fn logged_slot_is_taken() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let logs = vec![log(&med, time(8, 0))];
        let schedule = compute_schedule(&med, &logs, time(10, 0));

        assert!(schedule.slots[0].taken);
        assert!(!schedule.slots[1].taken);
        assert_eq!(schedule.taken_count(), 1);
    }

    #[test]
    fn duplicate_confirmations_count_once() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let logs = vec![log(&med, time(8, 0)), log(&med, time(8, 0))];
        let schedule = compute_schedule(&med, &logs, time(10, 0));

        assert_eq!(schedule.taken_count(), 1);
        assert!(schedule.slots[0].taken);
    }

    #[test]
    fn other_medications_logs_are_ignored() {
        let med = medication(&[time(8, 0)]);
        let other = medication(&[time(8, 0)]);
        let logs = vec![log(&other, time(8, 0))];
        let schedule = compute_schedule(&med, &logs, time(10, 0));

        assert_eq!(schedule.taken_count(), 0);
    }

    #[test]
    fn duplicate_schedule_times_collapse() {
        let med = medication(&[time(20, 0), time(8, 0), time(8, 0)]);
        let schedule = compute_schedule(&med, &[], time(6, 0));

        assert_eq!(schedule.slots.len(), 2);
        assert_eq!(schedule.slots[0].time, time(8, 0));
        assert_eq!(schedule.slots[1].time, time(20, 0));
        assert_eq!(schedule.next_due, NextDose::Today(time(8, 0)));
    }

    #[test]
    fn empty_schedule_is_unscheduled_not_an_error() {
        let med = medication(&[]);
        let schedule = compute_schedule(&med, &[], time(10, 0));

        assert!(schedule.slots.is_empty());
        assert_eq!(schedule.next_due, NextDose::Unscheduled);
    }

    #[test]
    fn overdue_is_derived_from_slot_state() {
        let med = medication(&[time(8, 0), time(20, 0)]);
        let logs = vec![log(&med, time(8, 0))];
        let schedule = compute_schedule(&med, &logs, time(21, 0));

        // 08:00 taken, 20:00 pending and past.
        assert_eq!(schedule.overdue_count(time(21, 0)), 1);
        assert!(schedule.slots[1].is_overdue(time(21, 0)));
    }
}

//! Delay engine behavior against the built-in plan and generated inputs.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use phasetrack::config::builtin_plan;
use phasetrack::config::schema::Phase;
use phasetrack::delay::{Assessment, BUFFER_DAYS, classify_phase};
use phasetrack::{
    CheckpointId, CheckpointKind, DelayPolicy, PaidCheckpoints, PhaseStatus, TrackerSession,
    evaluate_sequence,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn builtin_phases() -> Vec<Phase> {
    builtin_plan().unwrap().plan.ordered_phases()
}

fn first_phase() -> Phase {
    builtin_phases().remove(0)
}

fn phase_with_deadline(id: u32, deadline: NaiveDate) -> Phase {
    Phase {
        id,
        title: format!("Phase {id}"),
        purpose: String::new(),
        cost_total: 1_000,
        base_deadline: deadline,
        steps: Vec::new(),
        demo_link: String::new(),
    }
}

// ============================================================================
// Built-in plan walkthrough
// ============================================================================

#[test]
fn day_after_deadline_counts_as_buffer() {
    // 2024-12-05 is one day past phase 1's 2024-12-04 deadline.
    let assessment = classify_phase(
        &first_phase(),
        date(2024, 12, 5),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );
    assert_eq!(assessment, Assessment::Buffer { days_into_buffer: 1 });
}

#[test]
fn on_deadline_is_active() {
    let assessment = classify_phase(
        &first_phase(),
        date(2024, 12, 4),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );
    assert_eq!(assessment.status(), PhaseStatus::Active);
}

#[test]
fn six_days_after_deadline_is_in_buffer() {
    let assessment = classify_phase(
        &first_phase(),
        date(2024, 12, 10),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );
    assert_eq!(assessment.status(), PhaseStatus::Buffer);
    assert_eq!(assessment.days_into_buffer(), Some(6));
}

#[test]
fn four_days_past_buffer_end_is_late_with_tripled_penalty() {
    let assessment = classify_phase(
        &first_phase(),
        date(2024, 12, 15),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );
    assert_eq!(
        assessment,
        Assessment::Late {
            days_late: 4,
            penalty_days: 12,
        }
    );
}

#[test]
fn paid_finish_stays_completed_far_in_the_future() {
    let mut session = TrackerSession::new(builtin_plan().unwrap().plan).unwrap();
    session.mark_paid(1, CheckpointKind::Finish).unwrap();
    session.set_current_date(date(2025, 6, 1)).unwrap();

    let report = session.evaluate();
    assert_eq!(report.sequence.phases[0].status, PhaseStatus::Completed);
    assert_eq!(report.sequence.phases[0].days_late, 0);
}

#[test]
fn late_phase_shifts_successors_but_not_itself() {
    let phases = builtin_phases();
    let report = evaluate_sequence(
        &phases,
        date(2024, 12, 15),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );

    let first = &report.phases[0];
    assert_eq!(first.penalty_days, 12);
    assert_eq!(first.display_deadline, phases[0].base_deadline);

    let second = &report.phases[1];
    assert_eq!(
        second.display_deadline,
        phases[1].base_deadline + Days::new(12)
    );
    assert_eq!(second.shift_days, 12);
}

#[test]
fn flat_policy_reports_lateness_without_shifting() {
    let phases = builtin_phases();
    let report = evaluate_sequence(
        &phases,
        date(2024, 12, 15),
        &PaidCheckpoints::new(),
        &DelayPolicy::flat(),
    );

    assert_eq!(report.phases[0].status, PhaseStatus::Late);
    assert_eq!(report.phases[0].days_late, 4);
    assert_eq!(report.phases[0].penalty_days, 0);
    assert_eq!(report.total_shift_days, 0);
    for (view, phase) in report.phases.iter().zip(&phases) {
        assert_eq!(view.display_deadline, phase.base_deadline);
    }
}

#[test]
fn penalties_accumulate_across_late_phases() {
    // 2025-01-01: phase 1 is 21 days late (63), phase 2 is 6 days late (18).
    let phases = builtin_phases();
    let report = evaluate_sequence(
        &phases,
        date(2025, 1, 1),
        &PaidCheckpoints::new(),
        &DelayPolicy::cascading(),
    );

    assert_eq!(report.phases[0].penalty_days, 63);
    assert_eq!(report.phases[1].penalty_days, 18);
    assert_eq!(report.phases[2].shift_days, 81);
    assert_eq!(report.total_shift_days, 81);
    assert_eq!(report.late_phase_ids(), [1, 2]);
    assert_eq!(
        report.projected_launch(),
        Some(date(2025, 2, 17) + Days::new(81))
    );
}

#[test]
fn paying_an_early_phase_clears_downstream_shift() {
    let mut session = TrackerSession::new(builtin_plan().unwrap().plan).unwrap();
    session.set_current_date(date(2024, 12, 15)).unwrap();
    assert_eq!(session.evaluate().sequence.total_shift_days, 12);

    session.mark_paid_key("1_finish").unwrap();
    let report = session.evaluate();
    assert_eq!(report.sequence.total_shift_days, 0);
    assert!(report.on_track);
    assert_eq!(report.projected_launch, Some(date(2025, 2, 17)));
}

#[test]
fn start_payment_alone_does_not_complete_a_phase() {
    // The built-in plan seeds 1_start.
    let session = TrackerSession::new(builtin_plan().unwrap().plan).unwrap();
    assert!(session.paid().contains(CheckpointId::start(1)));

    let report = session.evaluate();
    assert!(report.sequence.phases[0].start_paid);
    assert_ne!(report.sequence.phases[0].status, PhaseStatus::Completed);
}

// ============================================================================
// Properties
// ============================================================================

fn base_deadline() -> NaiveDate {
    date(2025, 1, 15)
}

fn offset(days: i64) -> NaiveDate {
    base_deadline() + chrono::Duration::days(days)
}

proptest! {
    #[test]
    fn completed_ignores_the_date(days in -400i64..400) {
        let phase = phase_with_deadline(1, base_deadline());
        let paid: PaidCheckpoints = [CheckpointId::finish(1)].into_iter().collect();
        let assessment = classify_phase(&phase, offset(days), &paid, &DelayPolicy::cascading());
        prop_assert_eq!(assessment, Assessment::Completed);
    }

    #[test]
    fn status_follows_day_offset(days in -400i64..400) {
        let phase = phase_with_deadline(1, base_deadline());
        let assessment = classify_phase(
            &phase,
            offset(days),
            &PaidCheckpoints::new(),
            &DelayPolicy::cascading(),
        );
        let buffer = i64::try_from(BUFFER_DAYS).unwrap();
        let expected = if days <= 0 {
            PhaseStatus::Active
        } else if days <= buffer {
            PhaseStatus::Buffer
        } else {
            PhaseStatus::Late
        };
        prop_assert_eq!(assessment.status(), expected);
    }

    #[test]
    fn buffer_days_stay_within_window(days in 1i64..=7) {
        let phase = phase_with_deadline(1, base_deadline());
        let assessment = classify_phase(
            &phase,
            offset(days),
            &PaidCheckpoints::new(),
            &DelayPolicy::cascading(),
        );
        let into = assessment.days_into_buffer().unwrap();
        prop_assert_eq!(into, u64::try_from(days).unwrap());
        prop_assert!((1..=BUFFER_DAYS).contains(&into));
    }

    #[test]
    fn penalty_is_days_late_times_multiplier(days in 8i64..400, multiplier in 0u32..10) {
        let phase = phase_with_deadline(1, base_deadline());
        let policy = DelayPolicy { penalty_multiplier: multiplier, enable_cascade: true };
        let assessment = classify_phase(&phase, offset(days), &PaidCheckpoints::new(), &policy);

        let days_late = u64::try_from(days).unwrap() - BUFFER_DAYS;
        prop_assert_eq!(assessment.days_late(), days_late);
        prop_assert_eq!(assessment.penalty_days(), days_late * u64::from(multiplier));
    }

    #[test]
    fn marking_twice_matches_marking_once(ids in proptest::collection::vec((1u32..6, any::<bool>()), 0..12)) {
        let mut once = PaidCheckpoints::new();
        let mut twice = PaidCheckpoints::new();
        for (phase_id, finish) in ids {
            let kind = if finish { CheckpointKind::Finish } else { CheckpointKind::Start };
            let id = CheckpointId::new(phase_id, kind);
            once.mark(id);
            twice.mark(id);
            prop_assert!(!twice.mark(id));
        }
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn shift_never_decreases_along_the_sequence(days in 0i64..200, cascade in any::<bool>()) {
        let phases: Vec<Phase> = (1..=5)
            .map(|id| phase_with_deadline(id, base_deadline() + Days::new(u64::from(id) * 10)))
            .collect();
        let policy = DelayPolicy { penalty_multiplier: 3, enable_cascade: cascade };
        let report = evaluate_sequence(&phases, offset(days), &PaidCheckpoints::new(), &policy);

        for pair in report.phases.windows(2) {
            prop_assert!(pair[0].shift_days <= pair[1].shift_days);
        }
        if !cascade {
            prop_assert_eq!(report.total_shift_days, 0);
        }
    }

    #[test]
    fn evaluation_is_deterministic(days in -50i64..200) {
        let phases = builtin_phases();
        let paid: PaidCheckpoints = [CheckpointId::start(1)].into_iter().collect();
        let first = evaluate_sequence(&phases, offset(days), &paid, &DelayPolicy::cascading());
        let second = evaluate_sequence(&phases, offset(days), &paid, &DelayPolicy::cascading());
        prop_assert_eq!(first, second);
    }
}

//! SLA triage scenarios against a frozen instant

mod support;

use asodi_core::{sort_by_urgency, triage_in_process, triage_pending, PatientFilter, TriageSummary};
use asodi_domain::{Agreement, PatientRecord, RiskTier};
use support::fixtures::{fonasa, in_process, pending, scenario_now};

#[test]
fn pending_within_window_is_at_risk() {
    let entries = triage_pending(&[pending(1, "FONASA", "2024-01-10T10:00:00Z")], &[fonasa()], scenario_now());

    assert_eq!(entries.len(), 1);
    assert!((entries[0].remaining.sort_key() - 2.0).abs() < 1e-9);
    assert_eq!(entries[0].display(), "2 horas y 0 minutos");
    assert_eq!(entries[0].tier, RiskTier::AtRisk);
}

#[test]
fn pending_past_window_is_overdue_with_clamped_display() {
    let entries = triage_pending(&[pending(1, "FONASA", "2024-01-09T12:00:00Z")], &[fonasa()], scenario_now());

    assert!((entries[0].remaining.sort_key() + 20.0).abs() < 1e-9);
    assert_eq!(entries[0].display(), "0 horas");
    assert_eq!(entries[0].tier, RiskTier::Overdue);
}

#[test]
fn pending_with_plenty_of_time_is_normal() {
    let agreements = vec![Agreement::hourly("ISAPRE", 10.0)];
    let entries = triage_pending(&[pending(1, "ISAPRE", "2024-01-10T08:30:00Z")], &agreements, scenario_now());

    assert!((entries[0].remaining.sort_key() - 6.5).abs() < 1e-9);
    assert_eq!(entries[0].display(), "6 horas y 30 minutos");
    assert_eq!(entries[0].tier, RiskTier::Normal);
}

#[test]
fn most_urgent_first() {
    let patients = vec![
        pending(1, "FONASA", "2024-01-10T10:00:00Z"),
        pending(2, "FONASA", "2024-01-10T07:00:00Z"),
    ];
    let ids: Vec<i64> =
        triage_pending(&patients, &[fonasa()], scenario_now()).iter().map(|e| e.patient.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn unknown_agreement_is_omitted_not_overdue() {
    let patients = vec![
        pending(1, "DESCONOCIDO", "2024-01-01T00:00:00Z"),
        pending(2, "FONASA", "2024-01-10T10:00:00Z"),
    ];
    let entries = triage_pending(&patients, &[fonasa()], scenario_now());

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].patient.id, 2);
}

#[test]
fn output_is_monotonic_and_repeatable() {
    let patients: Vec<_> = (0..40)
        .map(|i| pending(i, "FONASA", &format!("2024-01-10T{:02}:{:02}:00Z", i % 12, (i * 7) % 60)))
        .collect();

    let first = triage_pending(&patients, &[fonasa()], scenario_now());
    let second = triage_pending(&patients, &[fonasa()], scenario_now());
    assert_eq!(first, second);

    let keys: Vec<f64> = first.iter().map(|e| e.remaining.sort_key()).collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(sort_by_urgency(first.clone()), first);
}

#[test]
fn tiers_follow_remaining_time() {
    let patients: Vec<_> = (0..12)
        .map(|i| pending(i, "FONASA", &format!("2024-01-10T{:02}:15:00Z", i)))
        .collect();

    for entry in triage_pending(&patients, &[fonasa()], scenario_now()) {
        let remaining = entry.remaining.sort_key();
        let expected = if remaining <= 0.0 {
            RiskTier::Overdue
        } else if remaining <= 4.0 {
            RiskTier::AtRisk
        } else {
            RiskTier::Normal
        };
        assert_eq!(entry.tier, expected, "remaining {remaining}");
    }
}

#[test]
fn in_process_list_with_agreement_filter() {
    let agreements = vec![fonasa(), Agreement::hourly("ISAPRE", 8.0).with_operate_window(30, None)];
    let patients = vec![
        in_process(1, "ISAPRE", "2024-01-05T12:00:00Z"),
        in_process(2, "FONASA", "2024-01-02T12:00:00Z"),
        in_process(3, "FONASA", "2023-12-20T12:00:00Z"),
    ];

    let entries = triage_in_process(&patients, &agreements, scenario_now());
    let ids: Vec<i64> = entries.iter().map(|e| e.patient.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(
        entries.iter().map(|e| e.tier).collect::<Vec<_>>(),
        vec![RiskTier::Overdue, RiskTier::AtRisk, RiskTier::Normal]
    );

    let fonasa_only = PatientFilter::new().with_agreement("FONASA").apply_to_entries(entries.clone());
    assert_eq!(fonasa_only.iter().map(|e| e.patient.id).collect::<Vec<_>>(), vec![3, 2]);

    let summary = TriageSummary::from_entries(&entries);
    assert_eq!(summary, TriageSummary { overdue: 1, at_risk: 1, normal: 1 });
}

#[test]
fn malformed_backend_rows_only_exclude_themselves() {
    let patients: Vec<PatientRecord> = serde_json::from_str(
        r#"[
            { "id_planilla": 1, "rut": "1-9", "fecha_recepcion": "2024-01-10T10:00:00Z",
              "estado_paciente": "P", "convenios": "FONASA" },
            { "id_planilla": 2, "rut": "2-7", "fecha_recepcion": "2024-01-10T09:00:00Z",
              "estado_paciente": "P", "convenios": null },
            { "id_planilla": 3, "rut": "3-5", "fecha_recepcion": "2024-01-10T11:00:00Z",
              "estado_paciente": "P", "convenios": "SIN_PLAZO" }
        ]"#,
    )
    .unwrap();
    let agreements: Vec<Agreement> = serde_json::from_str(
        r#"[
            { "nombre_convenio": "FONASA", "horas_llamado": "4" },
            { "nombre_convenio": "SIN_PLAZO", "horas_llamado": "N/A" }
        ]"#,
    )
    .unwrap();

    let entries = triage_pending(&patients, &agreements, scenario_now());
    assert_eq!(entries.iter().map(|e| e.patient.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(entries[0].display(), "2 horas y 0 minutos");
}

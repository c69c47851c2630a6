use chrono::NaiveDate;

use super::AntidopingLog;
use super::Panel;
use super::Substance;
use super::TestDraft;
use super::TestResult;
use super::TestStats;
use crate::domain::models::FormError;

fn today() -> NaiveDate {
    return NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
}

#[test]
fn it_summarizes_seeded_tests() {
    let log = AntidopingLog::default();
    assert_eq!(
        log.stats(),
        TestStats {
            total: 3,
            negative: 2,
            positive: 1,
            pending: 0,
        }
    );
    assert_eq!(log.records()[1].substances_text(), "THC");
    assert_eq!(log.records()[0].substances_text(), "-");
}

#[test]
fn it_registers_positive_tests_first() {
    let mut log = AntidopingLog::default();
    let record = log
        .register(
            "99".to_string(),
            today(),
            TestDraft {
                employee_id: " EMP-020 ".to_string(),
                employee_name: "Lucía Pérez".to_string(),
                panel: Panel::Ten,
                substances: vec![Substance::Coc, Substance::Met, Substance::Coc],
            },
        )
        .unwrap();

    assert_eq!(record.employee_id, "EMP-020");
    assert_eq!(record.result, TestResult::Positivo);
    assert_eq!(record.substances_text(), "COC, MET");
    assert_eq!(log.records()[0].id, "99");
    assert_eq!(log.stats().positive, 2);
}

#[test]
fn it_registers_clean_tests_as_negative() {
    let mut log = AntidopingLog::default();
    let draft = TestDraft {
        employee_id: "EMP-021".to_string(),
        employee_name: "Mario Díaz".to_string(),
        ..TestDraft::default()
    };
    let record = log.register("100".to_string(), today(), draft).unwrap();

    assert_eq!(record.result, TestResult::Negativo);
    assert_eq!(record.panel, Panel::Five);
    assert_eq!(record.date, today());
}

#[test]
fn it_requires_the_employee() {
    let mut log = AntidopingLog::default();
    let err = log
        .register("99".to_string(), today(), TestDraft::default())
        .unwrap_err();
    assert_eq!(err, FormError::Missing("employee id"));

    let draft = TestDraft {
        employee_id: "EMP-021".to_string(),
        ..TestDraft::default()
    };
    let err = log.register("99".to_string(), today(), draft).unwrap_err();
    assert_eq!(err, FormError::Missing("employee name"));
    assert_eq!(log.records().len(), 3);
}

#[test]
fn it_parses_panels_and_substances() {
    assert_eq!(Panel::parse("10-panel"), Some(Panel::Ten));
    assert_eq!(Panel::parse("20-Panel"), None);
    assert_eq!(Substance::parse("thc"), Some(Substance::Thc));
    assert_eq!(Substance::parse("LSD"), None);
    assert_eq!(Substance::Opi.label(), "OPI (Opiáceos)");
}

use chrono::Utc;
use test_utils::biometrics_fixture;

use super::BiometricReport;
use super::Cortisol;
use super::ScanResult;
use super::WrinkleSeverity;

#[test]
fn it_parses_fenced_reports() {
    let report = BiometricReport::parse(biometrics_fixture()).unwrap();
    assert_eq!(report.hrv, 62);
    assert_eq!(report.cortisol, Cortisol::Low);
    assert_eq!(report.active_aus.len(), 2);
    assert_eq!(
        report.aging_signs.wrinkles_severity,
        WrinkleSeverity::Fine
    );
    assert!(report.health_flags.is_empty());
}

#[test]
fn it_defaults_missing_fields() {
    let report = BiometricReport::parse(r#"{ "hrv": 70 }"#).unwrap();
    assert_eq!(report.hrv, 70);
    assert_eq!(report.cortisol, Cortisol::Medium);
    assert_eq!(report.authenticity, "Desconocido");
}

#[test]
fn it_rejects_wrong_types() {
    let res = BiometricReport::parse(r#"{ "hrv": "fast" }"#);
    assert!(res.is_err());
}

#[test]
fn it_rejects_unknown_buckets() {
    let res = BiometricReport::parse(r#"{ "cortisol": "Extreme" }"#);
    assert!(res.is_err());
}

#[test]
fn it_rejects_out_of_range_values() {
    let err = BiometricReport::parse(r#"{ "hrv": 60, "skin_health_score": 140 }"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"skin_health_score out of range: 140");

    let err = BiometricReport::parse(r#"{ "hrv": 5 }"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"hrv out of range: 5");
}

#[test]
fn it_rejects_prose() {
    let res = BiometricReport::parse("I cannot analyze faces.");
    assert!(res.is_err());
}

#[test]
fn it_maps_cortisol_levels() {
    assert_eq!(Cortisol::Low.level(), 8);
    assert_eq!(Cortisol::Medium.level(), 18);
    assert_eq!(Cortisol::High.level(), 28);
}

#[test]
fn it_summarizes_scans() {
    let scan = ScanResult {
        timestamp: Utc::now(),
        report: BiometricReport::fallback(),
        image: None,
    };

    insta::assert_snapshot!(scan.summary(), @r###"
    **INFORME DE FENOTIPADO DIGITAL (NeuroScan)**

    **Autenticidad:** Máscara Social
    **VFC (HRV):** 45ms
    **Nivel Cortisol:** 18 µg/dL
    **Dominancia Simpática:** 55%

    **Marcadores FACS Detectados:**
    AU4 Brow Lowerer

    *Este análisis se ha guardado en su historial clínico.*
    "###);
}

#[test]
fn it_summarizes_scans_without_markers() {
    let mut report = BiometricReport::fallback();
    report.active_aus = vec![];
    let scan = ScanResult {
        timestamp: Utc::now(),
        report,
        image: None,
    };
    assert!(scan.summary().contains("Ninguno significativo"));
}

use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;

use super::render_appointments;
use super::render_dental_chart;
use super::render_eye_exam;
use super::render_lab_order;
use super::render_lab_orders;
use super::render_products;
use super::render_resources;
use super::render_session;
use super::render_test_records;
use super::render_test_stats;
use super::render_vitals;
use crate::domain::models::default_products;
use crate::domain::models::search;
use crate::domain::models::AntidopingLog;
use crate::domain::models::Calendar;
use crate::domain::models::DentalChart;
use crate::domain::models::EyeExam;
use crate::domain::models::LabBook;
use crate::domain::models::Library;
use crate::domain::models::Message;
use crate::domain::models::OrderStatus;
use crate::domain::models::Refraction;
use crate::domain::models::Role;
use crate::domain::models::Session;
use crate::domain::models::Snellen;
use crate::domain::models::ToothStatus;
use crate::domain::models::Vitals;
use crate::domain::models::Weekday;

#[test]
fn it_renders_session_lines() {
    let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
    let messages = vec![
        Message::new("1".to_string(), Role::User, "fiebre y tos", at),
        Message::new("2".to_string(), Role::Assistant, "Reposo.", at),
    ];
    let session = Session::new("1768210200000", at, &messages, "Nueva Consulta");

    insta::assert_snapshot!(render_session(&session), @"- (ID: 1768210200000) 2026-01-12 09:30, 2 mensajes, fiebre y tos");
}

#[test]
fn it_renders_lab_orders() {
    let labs = LabBook::default();
    insta::assert_snapshot!(render_lab_orders(&labs.with_status(OrderStatus::Completed)), @r###"
    L-2024-001  2026-01-12  Carlos Ruiz  Biometría Hemática + QS  [completed]
    L-2024-003  2026-01-08  Roberto Gomez  Examen General de Orina  [completed]
    "###);
    assert_eq!(render_lab_orders(&[]), "No hay órdenes de laboratorio.");
}

#[test]
fn it_renders_lab_results_with_flags() {
    let labs = LabBook::default();
    let res = render_lab_order(labs.find("L-2024-001").unwrap());
    let lines = res.split('\n').collect::<Vec<_>>();

    assert_eq!(lines[0], "L-2024-001 · Biometría Hemática + QS");
    assert!(lines[3].starts_with("  Hemoglobina"));
    assert!(lines[4].starts_with("↑ Leucocitos"));
    assert!(lines[5].starts_with("↓ Plaquetas"));
    assert!(lines[5].ends_with("ref: 150,000 - 400,000"));
    assert_eq!(lines.last(), Some(&"3 resultado(s) fuera de rango."));
}

#[test]
fn it_renders_pending_lab_orders() {
    let labs = LabBook::default();
    let res = render_lab_order(labs.find("L-2024-002").unwrap());
    assert!(res.ends_with("Resultados pendientes."));
}

#[test]
fn it_renders_the_week() {
    let calendar = Calendar::default();
    insta::assert_snapshot!(render_appointments(&calendar.week()), @r###"
    Lun 09:00  Carlos Ruiz (Antidoping, 1h)
    Mié 11:00  Ana López (Consulta General, 1h)
    Vie 16:00  Roberto Gomez (Urgencia, 1h)
    "###);
    assert_eq!(
        render_appointments(&calendar.on(Weekday::Sat)),
        "No hay citas programadas."
    );
}

#[test]
fn it_renders_the_dental_chart() {
    let mut chart = DentalChart::default();
    chart.apply(16, ToothStatus::Caries).unwrap();
    chart.apply(48, ToothStatus::Extraction).unwrap();
    chart.set_note(16, "Caries oclusal").unwrap();

    let res = render_dental_chart(&chart);
    let lines = res.split('\n').collect::<Vec<_>>();

    assert_eq!(
        lines[0],
        "18· 17· 16C 15· 14· 13· 12· 11· | 21· 22· 23· 24· 25· 26· 27· 28·"
    );
    assert_eq!(
        lines[2],
        "38· 37· 36· 35· 34· 33· 32· 31· | 41· 42· 43· 44· 45· 46· 47· 48X"
    );
    assert_eq!(lines[4], "healthy: 30, caries: 1, extraction: 1");
    assert_eq!(lines[6], "16: Caries oclusal");
}

#[test]
fn it_renders_products() {
    let products = default_products();
    let found = search(&products, "náuseas", None);

    insta::assert_snapshot!(render_products(&found[..1]), @r###"
    Cannabis Medicinal (Cannabis sativa L.) [Oncológico]
      Planta con propiedades analgésicas y antieméticas. Actúa sobre el sistema endocannabinoide.
      + Alivio del dolor crónico
      + Reducción de náuseas (quimioterapia)
      + Estimulación del apetito
      + Propiedades neuroprotectoras
      Preparación: Aceites sublinguales (ratios THC:CBD), vaporización de flor seca, cremas tópicas.
    "###);
    assert_eq!(render_products(&[]), "No se encontraron productos.");
}

#[test]
fn it_renders_vitals() {
    insta::assert_snapshot!(render_vitals(&Vitals::default()), @"♥ 72 bpm   SpO2 98%   Estrés ▮▮▯▯▯▯▯▯▯▯ 24%");
}

#[test]
fn it_renders_antidoping_tests() {
    let log = AntidopingLog::default();
    insta::assert_snapshot!(render_test_records(log.records()), @r###"
    2026-01-10  EMP-004  Carlos Ruiz    5-Panel  Negativo  -
    2026-01-11  EMP-012  Ana López      10-Panel Positivo  THC
    2026-01-11  EMP-007  Juan Pérez     Alcohol  Negativo  -
    "###);
    assert_eq!(
        render_test_stats(&log.stats()),
        "Total: 3 · Negativos: 2 · Positivos: 1 · Pendientes: 0"
    );
    assert_eq!(render_test_records(&[]), "No hay pruebas registradas.");
}

#[test]
fn it_renders_library_resources() {
    let library = Library::default();
    assert_eq!(
        render_resources(&library.search("", "Cirugía")),
        "▶ Cirugía Laparoscópica: Fundamentos [Cirugía]\n  Técnicas básicas de acceso e instrumentación.\n  https://www.youtube.com/embed/w0fXjF5IqX8"
    );
    assert_eq!(
        render_resources(&library.search("rayos x", "Todas")),
        "No se encontraron recursos."
    );
}

#[test]
fn it_renders_eye_exams() -> Result<()> {
    insta::assert_snapshot!(render_eye_exam(&EyeExam::default()), @r###"
    Agudeza visual  OD 20/20  OI 20/20  AE 20/20
    Refracción OD   SPH - CYL - AXIS - ADD -
    Refracción OI   SPH - CYL - AXIS - ADD -
    PIO             OD 15 mmHg  OI 15 mmHg
    "###);

    let exam = EyeExam {
        acuity_od: Snellen::S40,
        refraction_od: Refraction::parse("-2", "-0.75", "180", "")?,
        pressure_oi: 23,
        notes: "Fondo de ojo sin alteraciones.".to_string(),
        ..EyeExam::default()
    };
    let res = render_eye_exam(&exam);
    let lines = res.split('\n').collect::<Vec<_>>();
    assert_eq!(lines[1], "Refracción OD   SPH -2.00 CYL -0.75 AXIS 180° ADD -");
    assert_eq!(lines[5], "! Agudeza visual reducida OD: 20/40");
    assert_eq!(lines[6], "! Presión intraocular elevada OI: 23 mmHg");
    assert_eq!(lines.last(), Some(&"Notas: Fondo de ojo sin alteraciones."));
    return Ok(());
}

use anyhow::Result;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use test_utils::png_data_uri;

use super::MarkdownRenderer;
use crate::domain::models::BiometricReport;
use crate::domain::models::DocumentRenderer;
use crate::domain::models::ImageData;
use crate::domain::models::Medication;
use crate::domain::models::Message;
use crate::domain::models::PrescriptionBuilder;
use crate::domain::models::Role;
use crate::domain::models::ScanResult;

#[test]
fn it_renders_transcripts() -> Result<()> {
    let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
    let image = ImageData::parse(png_data_uri())?;
    let messages = vec![
        Message::new("1".to_string(), Role::User, "fiebre y tos", at).with_image(Some(&image)),
        Message::new(
            "2".to_string(),
            Role::Assistant,
            "**Nivel 1:** reposo e hidratación.",
            at,
        ),
    ];

    let doc = MarkdownRenderer::default().transcript(&messages, "Ana")?;

    assert_eq!(doc.file_name, "Consulta_20260112_093000.md");
    insta::assert_snapshot!(doc.body, @r###"
    # DOCTOR IA PRO: Informe de consulta

    **Fecha:** 2026-01-12 09:30 UTC
    **Paciente:** Ana

    ## Ana

    fiebre y tos

    *[Imagen adjunta]*

    ## Doctor IA

    **Nivel 1:** reposo e hidratación.

    ---
    *Este documento es orientativo y no sustituye la valoración de un médico colegiado.*
    "###);
    return Ok(());
}

#[test]
fn it_refuses_empty_transcripts() {
    let err = MarkdownRenderer::default()
        .transcript(&[], "Ana")
        .unwrap_err();
    assert_eq!(err.to_string(), "The consultation has no messages to export");
}

#[test]
fn it_renders_prescriptions() -> Result<()> {
    let mut builder = PrescriptionBuilder::default();
    builder.patient_name = "Juan Pérez".to_string();
    builder.instructions = "Tomar con alimentos.".to_string();
    builder.add_medication(Medication {
        id: "1".to_string(),
        name: "Paracetamol".to_string(),
        dosage: "500 mg".to_string(),
        frequency: "Cada 8 horas".to_string(),
        duration: "5 días".to_string(),
    })?;
    let prescription = builder.build(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap())?;

    let doc = MarkdownRenderer::default().prescription(&prescription)?;

    assert_eq!(doc.file_name, "Receta_Juan_Pérez_20260112.md");
    insta::assert_snapshot!(doc.body, @r###"
    # RECETA MÉDICA

    **Paciente:** Juan Pérez
    **Fecha:** 2026-01-12
    **Diagnóstico:** Reservado

    | Medicamento / sustancia | Dosis | Frecuencia | Duración |
    | --- | --- | --- | --- |
    | Paracetamol | 500 mg | Cada 8 horas | 5 días |

    ## Indicaciones generales

    Tomar con alimentos.

    ---
    *Este documento es orientativo y no sustituye la valoración de un médico colegiado.*
    "###);
    return Ok(());
}

#[test]
fn it_renders_scans() -> Result<()> {
    let scan = ScanResult {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap(),
        report: BiometricReport::fallback(),
        image: None,
    };

    let doc = MarkdownRenderer::default().scan(&scan)?;

    assert_eq!(doc.file_name, "Reporte_Facial_20260112_093000.md");
    insta::assert_snapshot!(doc.body, @r###"
    # REPORTE DERMATOLÓGICO Y FACIAL

    **Fecha:** 2026-01-12 09:30 UTC

    ## Análisis biométrico

    - VFC (variabilidad cardiaca): 45 ms
    - Nivel de cortisol estimado: 18 µg/dL
    - Dominancia simpática: 55%
    - Autenticidad emocional: Máscara Social

    ## Hallazgos dermatológicos

    - Salud integral de la piel: 75/100
    - Severidad de arrugas: Fine
    - Edad aparente estimada: 35 años

    ## Alertas visuales

    - Nivel de estrés visible

    ---
    *Este documento es orientativo y no sustituye la valoración de un médico colegiado.*
    "###);
    return Ok(());
}

#[tokio::test]
async fn it_writes_documents_to_a_directory() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-docs")?;
    let scan = ScanResult {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap(),
        report: BiometricReport::fallback(),
        image: None,
    };
    let doc = MarkdownRenderer::default().scan(&scan)?;

    let file_path = doc.write_to(&dir.path().join("reports")).await?;

    assert_eq!(tokio::fs::read_to_string(file_path).await?, doc.body);
    return Ok(());
}

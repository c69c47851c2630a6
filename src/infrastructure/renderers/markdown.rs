#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Document;
use crate::domain::models::DocumentRenderer;
use crate::domain::models::Message;
use crate::domain::models::Prescription;
use crate::domain::models::Role;
use crate::domain::models::ScanResult;

const DISCLAIMER: &str = "*Este documento es orientativo y no sustituye la valoración de un médico colegiado.*";

fn slug(text: &str) -> String {
    return text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
}

/// Renders exports as Markdown files.
#[derive(Default)]
pub struct MarkdownRenderer {}

impl DocumentRenderer for MarkdownRenderer {
    fn transcript(&self, messages: &[Message], username: &str) -> Result<Document> {
        let first = match messages.first() {
            Some(first) => first,
            None => bail!("The consultation has no messages to export"),
        };

        let mut lines = vec![
            "# DOCTOR IA PRO: Informe de consulta".to_string(),
            "".to_string(),
            format!("**Fecha:** {}", first.timestamp.format("%Y-%m-%d %H:%M UTC")),
            format!("**Paciente:** {username}"),
            "".to_string(),
        ];

        for msg in messages {
            let author = match msg.role {
                Role::User => username,
                Role::Assistant => "Doctor IA",
            };
            lines.push(format!("## {author}"));
            lines.push("".to_string());
            lines.push(msg.content.trim().to_string());
            if msg.image.is_some() {
                lines.push("".to_string());
                lines.push("*[Imagen adjunta]*".to_string());
            }
            lines.push("".to_string());
        }

        lines.push("---".to_string());
        lines.push(DISCLAIMER.to_string());

        return Ok(Document {
            file_name: format!("Consulta_{}.md", first.timestamp.format("%Y%m%d_%H%M%S")),
            body: lines.join("\n") + "\n",
        });
    }

    fn prescription(&self, prescription: &Prescription) -> Result<Document> {
        let diagnosis = if prescription.diagnosis.trim().is_empty() {
            "Reservado"
        } else {
            prescription.diagnosis.trim()
        };

        let mut lines = vec![
            "# RECETA MÉDICA".to_string(),
            "".to_string(),
            format!("**Paciente:** {}", prescription.patient_name.trim()),
            format!("**Fecha:** {}", prescription.date.format("%Y-%m-%d")),
            format!("**Diagnóstico:** {diagnosis}"),
            "".to_string(),
            "| Medicamento / sustancia | Dosis | Frecuencia | Duración |".to_string(),
            "| --- | --- | --- | --- |".to_string(),
        ];

        for med in &prescription.medications {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                med.name, med.dosage, med.frequency, med.duration
            ));
        }

        if !prescription.instructions.trim().is_empty() {
            lines.push("".to_string());
            lines.push("## Indicaciones generales".to_string());
            lines.push("".to_string());
            lines.push(prescription.instructions.trim().to_string());
        }

        lines.push("".to_string());
        lines.push("---".to_string());
        lines.push(DISCLAIMER.to_string());

        return Ok(Document {
            file_name: format!(
                "Receta_{}_{}.md",
                slug(&prescription.patient_name),
                prescription.date.format("%Y%m%d")
            ),
            body: lines.join("\n") + "\n",
        });
    }

    fn scan(&self, scan: &ScanResult) -> Result<Document> {
        let report = &scan.report;
        let mut lines = vec![
            "# REPORTE DERMATOLÓGICO Y FACIAL".to_string(),
            "".to_string(),
            format!("**Fecha:** {}", scan.timestamp.format("%Y-%m-%d %H:%M UTC")),
            "".to_string(),
            "## Análisis biométrico".to_string(),
            "".to_string(),
            format!("- VFC (variabilidad cardiaca): {} ms", report.hrv),
            format!(
                "- Nivel de cortisol estimado: {} µg/dL",
                report.cortisol.level()
            ),
            format!("- Dominancia simpática: {}%", report.sympathetic_dominance),
            format!("- Autenticidad emocional: {}", report.authenticity),
            "".to_string(),
            "## Hallazgos dermatológicos".to_string(),
            "".to_string(),
            format!(
                "- Salud integral de la piel: {}/100",
                report.skin_health_score
            ),
            format!(
                "- Severidad de arrugas: {}",
                report.aging_signs.wrinkles_severity
            ),
            format!(
                "- Edad aparente estimada: {} años",
                report.aging_signs.apparent_age
            ),
            "".to_string(),
            "## Alertas visuales".to_string(),
            "".to_string(),
        ];

        if report.health_flags.is_empty() {
            lines.push(
                "No se detectaron alertas visibles significativas en este escaneo.".to_string(),
            );
        } else {
            for flag in &report.health_flags {
                lines.push(format!("- {flag}"));
            }
        }

        lines.push("".to_string());
        lines.push("---".to_string());
        lines.push(DISCLAIMER.to_string());

        return Ok(Document {
            file_name: format!(
                "Reporte_Facial_{}.md",
                scan.timestamp.format("%Y%m%d_%H%M%S")
            ),
            body: lines.join("\n") + "\n",
        });
    }
}

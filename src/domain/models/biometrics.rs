#[cfg(test)]
#[path = "biometrics_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ImageData;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Cortisol {
    Low,
    #[default]
    Medium,
    High,
}

impl Cortisol {
    /// Simulated serum level in µg/dL shown for each bucket.
    pub fn level(&self) -> u32 {
        match self {
            Cortisol::Low => return 8,
            Cortisol::Medium => return 18,
            Cortisol::High => return 28,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum WrinkleSeverity {
    #[default]
    None,
    Fine,
    Deep,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgingSigns {
    pub wrinkles_severity: WrinkleSeverity,
    pub apparent_age: u32,
}

/// The JSON document the vision model is asked to produce for a face
/// image. Missing fields take their defaults, wrong types or out of range
/// values reject the whole document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiometricReport {
    pub hrv: u32,
    pub cortisol: Cortisol,
    pub sympathetic_dominance: u32,
    pub active_aus: Vec<String>,
    pub authenticity: String,
    pub skin_health_score: u32,
    pub aging_signs: AgingSigns,
    pub health_flags: Vec<String>,
}

impl Default for BiometricReport {
    fn default() -> BiometricReport {
        return BiometricReport {
            hrv: 50,
            cortisol: Cortisol::Medium,
            sympathetic_dominance: 50,
            active_aus: vec![],
            authenticity: "Desconocido".to_string(),
            skin_health_score: 0,
            aging_signs: AgingSigns::default(),
            health_flags: vec![],
        };
    }
}

impl BiometricReport {
    /// Payload used whenever the model is unreachable or answers with
    /// something that does not fit the schema.
    pub fn fallback() -> BiometricReport {
        return BiometricReport {
            hrv: 45,
            cortisol: Cortisol::Medium,
            sympathetic_dominance: 55,
            active_aus: vec!["AU4 Brow Lowerer".to_string()],
            authenticity: "Máscara Social".to_string(),
            skin_health_score: 75,
            aging_signs: AgingSigns {
                wrinkles_severity: WrinkleSeverity::Fine,
                apparent_age: 35,
            },
            health_flags: vec!["Nivel de estrés visible".to_string()],
        };
    }

    pub fn parse(text: &str) -> Result<BiometricReport> {
        let cleaned = text.replace("```json", "").replace("```", "");
        let report: BiometricReport = serde_json::from_str(cleaned.trim())?;
        report.validate()?;
        return Ok(report);
    }

    fn validate(&self) -> Result<()> {
        if !(20..=100).contains(&self.hrv) {
            bail!(format!("hrv out of range: {}", self.hrv));
        }
        if self.sympathetic_dominance > 100 {
            bail!(format!(
                "sympathetic_dominance out of range: {}",
                self.sympathetic_dominance
            ));
        }
        if self.skin_health_score > 100 {
            bail!(format!(
                "skin_health_score out of range: {}",
                self.skin_health_score
            ));
        }
        if self.aging_signs.apparent_age > 120 {
            bail!(format!(
                "apparent_age out of range: {}",
                self.aging_signs.apparent_age
            ));
        }

        return Ok(());
    }
}

/// A finished scan: the report plus the image it was computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanResult {
    pub timestamp: DateTime<Utc>,
    pub report: BiometricReport,
    pub image: Option<ImageData>,
}

impl ScanResult {
    /// Markdown summary stored in the consultation transcript.
    pub fn summary(&self) -> String {
        let report = &self.report;
        let markers = if report.active_aus.is_empty() {
            "Ninguno significativo".to_string()
        } else {
            report.active_aus.join(", ")
        };

        return [
            "**INFORME DE FENOTIPADO DIGITAL (NeuroScan)**".to_string(),
            "".to_string(),
            format!("**Autenticidad:** {}", report.authenticity),
            format!("**VFC (HRV):** {}ms", report.hrv),
            format!("**Nivel Cortisol:** {} µg/dL", report.cortisol.level()),
            format!(
                "**Dominancia Simpática:** {}%",
                report.sympathetic_dominance
            ),
            "".to_string(),
            "**Marcadores FACS Detectados:**".to_string(),
            markers,
            "".to_string(),
            "*Este análisis se ha guardado en su historial clínico.*".to_string(),
        ]
        .join("\n");
    }
}

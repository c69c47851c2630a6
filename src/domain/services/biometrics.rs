#[cfg(test)]
#[path = "biometrics_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::BiometricReport;
use crate::domain::models::ClockBox;
use crate::domain::models::ImageData;
use crate::domain::models::ScanResult;

pub const SCAN_SYSTEM: &str = "You are a medical imaging assistant specialised in neuro-somatic digital phenotyping. Analyze the facial image for biomarkers. Return only JSON.";

pub const SCAN_PROMPT: &str = r#"Analyze this facial image for neuro-somatic digital phenotyping and a dermatological health screening.
Estimate the following values, simulating them from visual cues when needed:
1. hrv: heart rate variability in ms (integer 20-100).
2. cortisol: "Low", "Medium" or "High" (facial swelling).
3. sympathetic_dominance: stress percentage (integer 0-100).
4. active_aus: array of detected FACS action unit strings (e.g. "AU12 Duchenne").
5. authenticity: "Genuino" or "Máscara Social".
6. skin_health_score: integer 0-100 (texture, clarity, hydration).
7. aging_signs: object { "wrinkles_severity": "None" | "Fine" | "Deep", "apparent_age": integer }.
8. health_flags: array of strings naming potential visible health issues (e.g. "Palidez", "Posible deshidratación"). Empty array when there are none.
Return one valid JSON object with exactly these keys. No comments and no markdown."#;

/// Turns a face image into a biometric report. The scan never fails: an
/// unreachable backend or an answer outside the schema yields
/// `BiometricReport::fallback()`.
pub struct BiometricScanner {
    backend: BackendBox,
    clock: ClockBox,
}

impl BiometricScanner {
    pub fn new(backend: BackendBox, clock: ClockBox) -> BiometricScanner {
        return BiometricScanner { backend, clock };
    }

    pub async fn analyze(&self, image: ImageData) -> ScanResult {
        let report = match self
            .backend
            .analyze_image(&image, SCAN_PROMPT, SCAN_SYSTEM)
            .await
        {
            Ok(text) => match BiometricReport::parse(&text) {
                Ok(report) => report,
                Err(err) => {
                    tracing::warn!(err = ?err, "Biometric answer did not match the schema");
                    BiometricReport::fallback()
                }
            },
            Err(err) => {
                tracing::warn!(err = ?err, "Biometric analysis failed");
                BiometricReport::fallback()
            }
        };

        return ScanResult {
            timestamp: self.clock.now(),
            report,
            image: Some(image),
        };
    }
}

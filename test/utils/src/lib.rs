/// A 1x1 transparent PNG as a data URI.
pub fn png_data_uri() -> &'static str {
    return "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
}

pub fn biometrics_fixture() -> &'static str {
    return r#"
```json
{
  "hrv": 62,
  "cortisol": "Low",
  "sympathetic_dominance": 30,
  "active_aus": ["AU6 Cheek Raiser", "AU12 Duchenne"],
  "authenticity": "Genuino",
  "skin_health_score": 81,
  "aging_signs": { "wrinkles_severity": "Fine", "apparent_age": 29 },
  "health_flags": []
}
```
"#
    .trim();
}

pub fn fallback_responses_fixture() -> &'static str {
    return r#"
responses = [
  "Respuesta de prueba uno.",
  "Respuesta de prueba dos.",
]
"#
    .trim();
}

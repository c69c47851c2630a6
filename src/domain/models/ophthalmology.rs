#[cfg(test)]
#[path = "ophthalmology_test.rs"]
mod tests;

use std::fmt;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::FormError;

/// Snellen fraction at 20 feet, worst to best.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, EnumIter, EnumVariantNames, strum::Display)]
pub enum Snellen {
    #[strum(serialize = "20/200")]
    S200,
    #[strum(serialize = "20/100")]
    S100,
    #[strum(serialize = "20/70")]
    S70,
    #[strum(serialize = "20/50")]
    S50,
    #[strum(serialize = "20/40")]
    S40,
    #[strum(serialize = "20/30")]
    S30,
    #[strum(serialize = "20/25")]
    S25,
    #[default]
    #[strum(serialize = "20/20")]
    S20,
    #[strum(serialize = "20/15")]
    S15,
}

impl Snellen {
    pub fn parse(text: &str) -> Option<Snellen> {
        return Snellen::iter().find(|e| return e.to_string() == text.trim());
    }

    /// Worse than 20/20.
    pub fn is_reduced(&self) -> bool {
        return *self < Snellen::S20;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Refraction {
    pub sphere: Option<f64>,
    pub cylinder: Option<f64>,
    /// Degrees, 0 to 180.
    pub axis: Option<u16>,
    pub addition: Option<f64>,
}

fn diopters(field: &'static str, text: &str) -> Result<Option<f64>, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    return match text.parse::<f64>() {
        Ok(val) if val.is_finite() => Ok(Some(val)),
        _ => Err(FormError::Invalid {
            field,
            value: text.to_string(),
        }),
    };
}

fn signed(val: Option<f64>) -> String {
    return val.map(|e| return format!("{e:+.2}")).unwrap_or_else(|| return "-".to_string());
}

impl Refraction {
    /// Blank fields stay unset.
    pub fn parse(sphere: &str, cylinder: &str, axis: &str, addition: &str) -> Result<Refraction, FormError> {
        let axis_text = axis.trim();
        let axis = if axis_text.is_empty() {
            None
        } else {
            match axis_text.parse::<u16>() {
                Ok(val) if val <= 180 => Some(val),
                _ => {
                    return Err(FormError::Invalid {
                        field: "axis",
                        value: axis_text.to_string(),
                    })
                }
            }
        };

        return Ok(Refraction {
            sphere: diopters("sphere", sphere)?,
            cylinder: diopters("cylinder", cylinder)?,
            axis,
            addition: diopters("addition", addition)?,
        });
    }
}

impl fmt::Display for Refraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let axis = self
            .axis
            .map(|e| return format!("{e}°"))
            .unwrap_or_else(|| return "-".to_string());

        return write!(
            f,
            "SPH {} CYL {} AXIS {} ADD {}",
            signed(self.sphere),
            signed(self.cylinder),
            axis,
            signed(self.addition)
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum PressureFlag {
    #[strum(serialize = "baja")]
    Low,
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "elevada")]
    High,
}

/// Classifies intraocular pressure in mmHg against the 10-21 normal range.
pub fn pressure_flag(mmhg: u32) -> PressureFlag {
    if mmhg < 10 {
        return PressureFlag::Low;
    }
    if mmhg > 21 {
        return PressureFlag::High;
    }

    return PressureFlag::Normal;
}

pub fn parse_pressure(field: &'static str, text: &str) -> Result<u32, FormError> {
    return match text.trim().parse::<u32>() {
        Ok(val) if val <= 80 => Ok(val),
        _ => Err(FormError::Invalid {
            field,
            value: text.trim().to_string(),
        }),
    };
}

/// Right eye (OD), left eye (OI) and both eyes (AE).
#[derive(Clone, Debug, PartialEq)]
pub struct EyeExam {
    pub acuity_od: Snellen,
    pub acuity_oi: Snellen,
    pub acuity_ae: Snellen,
    pub refraction_od: Refraction,
    pub refraction_oi: Refraction,
    pub pressure_od: u32,
    pub pressure_oi: u32,
    pub notes: String,
}

impl Default for EyeExam {
    fn default() -> EyeExam {
        return EyeExam {
            acuity_od: Snellen::S20,
            acuity_oi: Snellen::S20,
            acuity_ae: Snellen::S20,
            refraction_od: Refraction::default(),
            refraction_oi: Refraction::default(),
            pressure_od: 15,
            pressure_oi: 15,
            notes: "".to_string(),
        };
    }
}

impl EyeExam {
    /// Plain text findings worth a second look.
    pub fn findings(&self) -> Vec<String> {
        let mut res = vec![];
        for (eye, acuity) in [("OD", self.acuity_od), ("OI", self.acuity_oi)] {
            if acuity.is_reduced() {
                res.push(format!("Agudeza visual reducida {eye}: {acuity}"));
            }
        }

        for (eye, mmhg) in [("OD", self.pressure_od), ("OI", self.pressure_oi)] {
            let flag = pressure_flag(mmhg);
            if flag != PressureFlag::Normal {
                res.push(format!("Presión intraocular {flag} {eye}: {mmhg} mmHg"));
            }
        }

        return res;
    }
}

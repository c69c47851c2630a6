#[cfg(test)]
#[path = "dental_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::FormError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ToothStatus {
    #[default]
    Healthy,
    Caries,
    Extraction,
    Endodontics,
    Crown,
}

impl ToothStatus {
    pub fn parse(text: &str) -> Option<ToothStatus> {
        return ToothStatus::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooth {
    /// ISO 3950 (FDI) number.
    pub number: u8,
    pub status: ToothStatus,
    pub notes: String,
}

/// Odontogram of the 32 permanent teeth, quadrant by quadrant.
pub struct DentalChart {
    teeth: Vec<Tooth>,
}

const QUADRANTS: [[u8; 8]; 4] = [
    [18, 17, 16, 15, 14, 13, 12, 11],
    [21, 22, 23, 24, 25, 26, 27, 28],
    [38, 37, 36, 35, 34, 33, 32, 31],
    [41, 42, 43, 44, 45, 46, 47, 48],
];

impl Default for DentalChart {
    fn default() -> DentalChart {
        let teeth = QUADRANTS
            .iter()
            .flatten()
            .map(|number| {
                return Tooth {
                    number: *number,
                    status: ToothStatus::Healthy,
                    notes: "".to_string(),
                };
            })
            .collect();

        return DentalChart { teeth };
    }
}

impl DentalChart {
    pub fn teeth(&self) -> &[Tooth] {
        return &self.teeth;
    }

    pub fn quadrant(&self, idx: usize) -> Vec<&Tooth> {
        return self.teeth.iter().skip(idx * 8).take(8).collect();
    }

    pub fn get(&self, number: u8) -> Option<&Tooth> {
        return self.teeth.iter().find(|e| return e.number == number);
    }

    fn get_mut(&mut self, number: u8) -> Result<&mut Tooth, FormError> {
        return self
            .teeth
            .iter_mut()
            .find(|e| return e.number == number)
            .ok_or_else(|| return FormError::NotFound(format!("tooth {number}")));
    }

    /// Clicking a tooth with a tool. The healthy tool on a healthy tooth
    /// only selects it; everything else paints the tool's status.
    pub fn apply(&mut self, number: u8, tool: ToothStatus) -> Result<&Tooth, FormError> {
        let tooth = self.get_mut(number)?;
        if tool == ToothStatus::Healthy && tooth.status == ToothStatus::Healthy {
            return Ok(&*tooth);
        }

        tooth.status = tool;
        return Ok(&*tooth);
    }

    pub fn set_note(&mut self, number: u8, note: &str) -> Result<&Tooth, FormError> {
        let tooth = self.get_mut(number)?;
        tooth.notes = note.to_string();
        return Ok(&*tooth);
    }

    /// Tooth count per status, in status declaration order, skipping zeroes.
    pub fn summary(&self) -> Vec<(ToothStatus, usize)> {
        return ToothStatus::iter()
            .map(|status| {
                return (
                    status,
                    self.teeth.iter().filter(|e| return e.status == status).count(),
                );
            })
            .filter(|(_, count)| return *count > 0)
            .collect();
    }
}

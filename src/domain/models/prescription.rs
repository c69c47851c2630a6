#[cfg(test)]
#[path = "prescription_test.rs"]
mod tests;

use chrono::NaiveDate;

use super::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    pub patient_name: String,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub instructions: String,
    pub date: NaiveDate,
}

#[derive(Default)]
pub struct PrescriptionBuilder {
    pub patient_name: String,
    pub diagnosis: String,
    pub instructions: String,
    medications: Vec<Medication>,
}

impl PrescriptionBuilder {
    /// Adds a medication line. Name and dosage are mandatory.
    pub fn add_medication(&mut self, medication: Medication) -> Result<(), FormError> {
        if medication.name.trim().is_empty() {
            return Err(FormError::Missing("medication name"));
        }
        if medication.dosage.trim().is_empty() {
            return Err(FormError::Missing("dosage"));
        }

        self.medications.push(medication);
        return Ok(());
    }

    pub fn remove_medication(&mut self, id: &str) -> bool {
        let before = self.medications.len();
        self.medications.retain(|e| return e.id != id);
        return self.medications.len() != before;
    }

    pub fn medications(&self) -> &[Medication] {
        return &self.medications;
    }

    pub fn build(&self, date: NaiveDate) -> Result<Prescription, FormError> {
        if self.patient_name.trim().is_empty() {
            return Err(FormError::Missing("patient name"));
        }

        return Ok(Prescription {
            patient_name: self.patient_name.trim().to_string(),
            diagnosis: self.diagnosis.trim().to_string(),
            medications: self.medications.to_vec(),
            instructions: self.instructions.trim().to_string(),
            date,
        });
    }
}

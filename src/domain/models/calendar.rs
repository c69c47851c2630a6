#[cfg(test)]
#[path = "calendar_test.rs"]
mod tests;

use chrono::NaiveTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::FormError;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
pub enum Weekday {
    #[strum(serialize = "Lun")]
    Mon,
    #[strum(serialize = "Mar")]
    Tue,
    #[strum(serialize = "Mié")]
    Wed,
    #[strum(serialize = "Jue")]
    Thu,
    #[strum(serialize = "Vie")]
    Fri,
    #[strum(serialize = "Sáb")]
    Sat,
}

impl Weekday {
    pub fn parse(text: &str) -> Option<Weekday> {
        return Weekday::iter().find(|e| return e.to_string().to_lowercase() == text.to_lowercase());
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumIter, EnumVariantNames, strum::Display,
)]
pub enum AppointmentKind {
    #[strum(serialize = "Consulta General")]
    General,
    #[strum(serialize = "Seguimiento")]
    FollowUp,
    #[strum(serialize = "Urgencia")]
    Urgent,
    #[strum(serialize = "Antidoping")]
    Antidoping,
}

impl AppointmentKind {
    pub fn parse(text: &str) -> Option<AppointmentKind> {
        return AppointmentKind::iter()
            .find(|e| return e.to_string().to_lowercase() == text.to_lowercase());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub day: Weekday,
    pub time: NaiveTime,
    pub kind: AppointmentKind,
    /// Hours.
    pub duration: u32,
}

pub struct AppointmentDraft {
    pub patient_name: String,
    pub day: Weekday,
    pub time: String,
    pub kind: AppointmentKind,
}

impl Default for AppointmentDraft {
    fn default() -> AppointmentDraft {
        return AppointmentDraft {
            patient_name: "".to_string(),
            day: Weekday::Mon,
            time: "09:00".to_string(),
            kind: AppointmentKind::General,
        };
    }
}

pub struct Calendar {
    appointments: Vec<Appointment>,
}

fn seed(id: &str, patient_name: &str, day: Weekday, time: (u32, u32), kind: AppointmentKind) -> Appointment {
    return Appointment {
        id: id.to_string(),
        patient_name: patient_name.to_string(),
        day,
        time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap_or_default(),
        kind,
        duration: 1,
    };
}

impl Default for Calendar {
    fn default() -> Calendar {
        return Calendar {
            appointments: vec![
                seed("1", "Carlos Ruiz", Weekday::Mon, (9, 0), AppointmentKind::Antidoping),
                seed("2", "Ana López", Weekday::Wed, (11, 0), AppointmentKind::General),
                seed("3", "Roberto Gomez", Weekday::Fri, (16, 0), AppointmentKind::Urgent),
            ],
        };
    }
}

impl Calendar {
    pub fn add(&mut self, id: String, draft: AppointmentDraft) -> Result<&Appointment, FormError> {
        let patient_name = draft.patient_name.trim();
        if patient_name.is_empty() {
            return Err(FormError::Missing("patient name"));
        }

        let time = match NaiveTime::parse_from_str(draft.time.trim(), "%H:%M") {
            Ok(time) => time,
            Err(_) => {
                return Err(FormError::Invalid {
                    field: "time",
                    value: draft.time,
                })
            }
        };

        self.appointments.push(Appointment {
            id,
            patient_name: patient_name.to_string(),
            day: draft.day,
            time,
            kind: draft.kind,
            duration: 1,
        });

        return Ok(&self.appointments[self.appointments.len() - 1]);
    }

    /// Appointments ordered by weekday, then time.
    pub fn week(&self) -> Vec<&Appointment> {
        let mut res = self.appointments.iter().collect::<Vec<&Appointment>>();
        res.sort_by_key(|e| return (e.day, e.time));
        return res;
    }

    pub fn on(&self, day: Weekday) -> Vec<&Appointment> {
        return self
            .week()
            .into_iter()
            .filter(|e| return e.day == day)
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.appointments.len();
    }
}

#[cfg(test)]
#[path = "labs_test.rs"]
mod tests;

use std::fmt;

use chrono::NaiveDate;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
    Processing,
}

impl OrderStatus {
    pub fn parse(text: String) -> Option<OrderStatus> {
        return OrderStatus::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResultFlag {
    Normal,
    Low,
    High,
    Critical,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LabValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for LabValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LabValue::Number(val) => return write!(f, "{val}"),
            LabValue::Text(val) => return write!(f, "{val}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabResult {
    pub parameter: String,
    pub value: LabValue,
    pub unit: String,
    pub reference_range: String,
    pub flag: ResultFlag,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabOrder {
    pub id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub kind: String,
    pub status: OrderStatus,
    pub results: Vec<LabResult>,
}

impl LabOrder {
    pub fn abnormal_results(&self) -> Vec<&LabResult> {
        return self
            .results
            .iter()
            .filter(|e| return e.flag != ResultFlag::Normal)
            .collect();
    }
}

fn result(parameter: &str, value: LabValue, unit: &str, reference_range: &str, flag: ResultFlag) -> LabResult {
    return LabResult {
        parameter: parameter.to_string(),
        value,
        unit: unit.to_string(),
        reference_range: reference_range.to_string(),
        flag,
    };
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    return NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
}

pub struct LabBook {
    orders: Vec<LabOrder>,
}

impl Default for LabBook {
    fn default() -> LabBook {
        return LabBook {
            orders: vec![
                LabOrder {
                    id: "L-2024-001".to_string(),
                    patient_name: "Carlos Ruiz".to_string(),
                    date: date(2026, 1, 12),
                    kind: "Biometría Hemática + QS".to_string(),
                    status: OrderStatus::Completed,
                    results: vec![
                        result("Hemoglobina", LabValue::Number(13.5), "g/dL", "13.0 - 17.0", ResultFlag::Normal),
                        result("Leucocitos", LabValue::Number(12500.0), "/µL", "4,000 - 10,000", ResultFlag::High),
                        result("Plaquetas", LabValue::Number(145000.0), "/µL", "150,000 - 400,000", ResultFlag::Low),
                        result("Glucosa", LabValue::Number(105.0), "mg/dL", "70 - 100", ResultFlag::High),
                        result("Colesterol Total", LabValue::Number(180.0), "mg/dL", "< 200", ResultFlag::Normal),
                    ],
                },
                LabOrder {
                    id: "L-2024-002".to_string(),
                    patient_name: "Ana López".to_string(),
                    date: date(2026, 1, 10),
                    kind: "Perfil Hormonal".to_string(),
                    status: OrderStatus::Processing,
                    results: vec![],
                },
                LabOrder {
                    id: "L-2024-003".to_string(),
                    patient_name: "Roberto Gomez".to_string(),
                    date: date(2026, 1, 8),
                    kind: "Examen General de Orina".to_string(),
                    status: OrderStatus::Completed,
                    results: vec![
                        result("Color", LabValue::Text("Amarillo".to_string()), "", "Amarillo", ResultFlag::Normal),
                        result("pH", LabValue::Number(6.0), "", "5.0 - 8.0", ResultFlag::Normal),
                        result("Proteínas", LabValue::Number(30.0), "mg/dL", "Negativo", ResultFlag::High),
                    ],
                },
            ],
        };
    }
}

impl LabBook {
    pub fn orders(&self) -> &[LabOrder] {
        return &self.orders;
    }

    pub fn find(&self, id: &str) -> Option<&LabOrder> {
        return self.orders.iter().find(|e| return e.id == id);
    }

    pub fn with_status(&self, status: OrderStatus) -> Vec<&LabOrder> {
        return self
            .orders
            .iter()
            .filter(|e| return e.status == status)
            .collect();
    }
}

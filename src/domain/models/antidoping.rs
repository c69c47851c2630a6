#[cfg(test)]
#[path = "antidoping_test.rs"]
mod tests;

use chrono::NaiveDate;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::FormError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
pub enum Panel {
    #[strum(serialize = "5-Panel")]
    Five,
    #[strum(serialize = "10-Panel")]
    Ten,
    #[strum(serialize = "Alcohol")]
    Alcohol,
}

impl Panel {
    pub fn parse(text: &str) -> Option<Panel> {
        return Panel::iter().find(|e| return e.to_string().to_lowercase() == text.to_lowercase());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum TestResult {
    Negativo,
    Positivo,
    Pendiente,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Substance {
    Thc,
    Coc,
    Amp,
    Opi,
    Pcp,
    Met,
}

impl Substance {
    pub fn parse(text: &str) -> Option<Substance> {
        return Substance::iter().find(|e| return e.to_string() == text.trim().to_uppercase());
    }

    /// Checkbox label, code first.
    pub fn label(&self) -> String {
        let name = match self {
            Substance::Thc => "Marihuana",
            Substance::Coc => "Cocaína",
            Substance::Amp => "Anfetaminas",
            Substance::Opi => "Opiáceos",
            Substance::Pcp => "Fenciclidina",
            Substance::Met => "Metanfetaminas",
        };

        return format!("{self} ({name})");
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub panel: Panel,
    pub result: TestResult,
    pub substances: Vec<Substance>,
}

impl TestRecord {
    pub fn substances_text(&self) -> String {
        if self.substances.is_empty() {
            return "-".to_string();
        }

        return self
            .substances
            .iter()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>()
            .join(", ");
    }
}

pub struct TestDraft {
    pub employee_id: String,
    pub employee_name: String,
    pub panel: Panel,
    pub substances: Vec<Substance>,
}

impl Default for TestDraft {
    fn default() -> TestDraft {
        return TestDraft {
            employee_id: "".to_string(),
            employee_name: "".to_string(),
            panel: Panel::Five,
            substances: vec![],
        };
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestStats {
    pub total: usize,
    pub negative: usize,
    pub positive: usize,
    pub pending: usize,
}

pub struct AntidopingLog {
    records: Vec<TestRecord>,
}

fn seed(id: &str, employee_id: &str, employee_name: &str, day: u32, panel: Panel, substances: Vec<Substance>) -> TestRecord {
    let result = if substances.is_empty() {
        TestResult::Negativo
    } else {
        TestResult::Positivo
    };

    return TestRecord {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        employee_name: employee_name.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap_or_default(),
        panel,
        result,
        substances,
    };
}

impl Default for AntidopingLog {
    fn default() -> AntidopingLog {
        return AntidopingLog {
            records: vec![
                seed("1", "EMP-004", "Carlos Ruiz", 10, Panel::Five, vec![]),
                seed("2", "EMP-012", "Ana López", 11, Panel::Ten, vec![Substance::Thc]),
                seed("3", "EMP-007", "Juan Pérez", 11, Panel::Alcohol, vec![]),
            ],
        };
    }
}

impl AntidopingLog {
    /// Records a test at the top of the log. Any detected substance makes
    /// the result positive.
    pub fn register(&mut self, id: String, date: NaiveDate, draft: TestDraft) -> Result<&TestRecord, FormError> {
        let employee_id = draft.employee_id.trim();
        if employee_id.is_empty() {
            return Err(FormError::Missing("employee id"));
        }

        let employee_name = draft.employee_name.trim();
        if employee_name.is_empty() {
            return Err(FormError::Missing("employee name"));
        }

        let mut substances: Vec<Substance> = vec![];
        for substance in draft.substances {
            if !substances.contains(&substance) {
                substances.push(substance);
            }
        }

        let result = if substances.is_empty() {
            TestResult::Negativo
        } else {
            TestResult::Positivo
        };

        self.records.insert(
            0,
            TestRecord {
                id,
                employee_id: employee_id.to_string(),
                employee_name: employee_name.to_string(),
                date,
                panel: draft.panel,
                result,
                substances,
            },
        );

        return Ok(&self.records[0]);
    }

    pub fn records(&self) -> &[TestRecord] {
        return &self.records;
    }

    pub fn stats(&self) -> TestStats {
        let count = |result: TestResult| {
            return self.records.iter().filter(|e| return e.result == result).count();
        };

        return TestStats {
            total: self.records.len(),
            negative: count(TestResult::Negativo),
            positive: count(TestResult::Positivo),
            pending: count(TestResult::Pendiente),
        };
    }
}

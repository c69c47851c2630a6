#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use chrono::NaiveTime;
use chrono::Utc;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::MultiSelect;
use dialoguer::Select;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use yansi::Paint;

use crate::domain::models::parse_pressure;
use crate::domain::models::search;
use crate::domain::models::AntidopingLog;
use crate::domain::models::Appointment;
use crate::domain::models::AppointmentDraft;
use crate::domain::models::AppointmentKind;
use crate::domain::models::Calendar;
use crate::domain::models::DentalChart;
use crate::domain::models::DocumentRendererBox;
use crate::domain::models::EyeExam;
use crate::domain::models::IdGenerator;
use crate::domain::models::LabOrder;
use crate::domain::models::Library;
use crate::domain::models::Medication;
use crate::domain::models::NaturalProduct;
use crate::domain::models::Panel;
use crate::domain::models::PrescriptionBuilder;
use crate::domain::models::ProductCategory;
use crate::domain::models::Refraction;
use crate::domain::models::Resource;
use crate::domain::models::ResourceDraft;
use crate::domain::models::ResourceKind;
use crate::domain::models::ResultFlag;
use crate::domain::models::Session;
use crate::domain::models::Snellen;
use crate::domain::models::Substance;
use crate::domain::models::TestDraft;
use crate::domain::models::TestRecord;
use crate::domain::models::TestStats;
use crate::domain::models::ToothStatus;
use crate::domain::models::Vitals;
use crate::domain::models::Weekday;
use crate::domain::models::LIBRARY_CATEGORIES;
use crate::domain::services::ticker;
use crate::domain::services::CatalogStore;

pub fn render_session(session: &Session) -> String {
    let mut res = format!(
        "- (ID: {}) {}, {} mensajes",
        session.id,
        session.timestamp.format("%Y-%m-%d %H:%M"),
        session.messages.len()
    );

    if !session.preview.is_empty() {
        res = format!("{res}, {}", session.preview);
    }

    return res;
}

pub fn render_lab_orders(orders: &[&LabOrder]) -> String {
    if orders.is_empty() {
        return "No hay órdenes de laboratorio.".to_string();
    }

    return orders
        .iter()
        .map(|order| {
            return format!(
                "{}  {}  {}  {}  [{}]",
                order.id,
                order.date.format("%Y-%m-%d"),
                order.patient_name,
                order.kind,
                order.status
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn render_lab_order(order: &LabOrder) -> String {
    let mut lines = vec![
        format!("{} · {}", order.id, order.kind),
        format!(
            "Paciente: {} · Fecha: {} · Estado: {}",
            order.patient_name,
            order.date.format("%Y-%m-%d"),
            order.status
        ),
    ];

    if order.results.is_empty() {
        lines.push("Resultados pendientes.".to_string());
        return lines.join("\n");
    }

    lines.push("".to_string());
    for res in &order.results {
        let marker = match res.flag {
            ResultFlag::Normal => " ",
            ResultFlag::Low => "↓",
            ResultFlag::High => "↑",
            ResultFlag::Critical => "!",
        };
        let value = format!("{} {}", res.value, res.unit);
        lines.push(format!(
            "{marker} {:<18} {:<16} ref: {}",
            res.parameter,
            value.trim(),
            res.reference_range
        ));
    }

    let abnormal = order.abnormal_results().len();
    if abnormal > 0 {
        lines.push("".to_string());
        lines.push(format!("{abnormal} resultado(s) fuera de rango."));
    }

    return lines.join("\n");
}

pub fn render_appointments(appointments: &[&Appointment]) -> String {
    if appointments.is_empty() {
        return "No hay citas programadas.".to_string();
    }

    return appointments
        .iter()
        .map(|e| {
            return format!(
                "{} {}  {} ({}, {}h)",
                e.day,
                e.time.format("%H:%M"),
                e.patient_name,
                e.kind,
                e.duration
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn tooth_symbol(status: ToothStatus) -> &'static str {
    match status {
        ToothStatus::Healthy => return "·",
        ToothStatus::Caries => return "C",
        ToothStatus::Extraction => return "X",
        ToothStatus::Endodontics => return "E",
        ToothStatus::Crown => return "O",
    }
}

/// Odontogram laid out as the dentist faces the patient: upper arch on
/// top, right quadrants on the left.
pub fn render_dental_chart(chart: &DentalChart) -> String {
    let row = |left: usize, right: usize| {
        let cells = chart
            .quadrant(left)
            .into_iter()
            .chain(chart.quadrant(right))
            .map(|e| return format!("{}{}", e.number, tooth_symbol(e.status)))
            .collect::<Vec<String>>();

        return format!("{} | {}", cells[..8].join(" "), cells[8..].join(" "));
    };

    let mut lines = vec![row(0, 1), "-".repeat(51), row(2, 3)];

    let summary = chart
        .summary()
        .iter()
        .map(|(status, count)| return format!("{status}: {count}"))
        .collect::<Vec<String>>()
        .join(", ");
    lines.push("".to_string());
    lines.push(summary);

    let notes = chart
        .teeth()
        .iter()
        .filter(|e| return !e.notes.is_empty())
        .map(|e| return format!("{}: {}", e.number, e.notes))
        .collect::<Vec<String>>();
    if !notes.is_empty() {
        lines.push("".to_string());
        lines.extend(notes);
    }

    return lines.join("\n");
}

pub fn render_products(products: &[&NaturalProduct]) -> String {
    if products.is_empty() {
        return "No se encontraron productos.".to_string();
    }

    return products
        .iter()
        .map(|e| {
            let mut lines = vec![
                format!("{} ({}) [{}]", e.name, e.scientific_name, e.category),
                format!("  {}", e.description),
            ];
            for benefit in &e.benefits {
                lines.push(format!("  + {benefit}"));
            }
            if let Some(preparation) = &e.preparation {
                lines.push(format!("  Preparación: {preparation}"));
            }

            return lines.join("\n");
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

pub fn render_vitals(vitals: &Vitals) -> String {
    return format!(
        "♥ {} bpm   SpO2 {}%   Estrés {} {}%",
        vitals.bpm,
        vitals.spo2,
        vitals.stress_gauge(),
        vitals.stress
    );
}

pub fn render_test_records(records: &[TestRecord]) -> String {
    if records.is_empty() {
        return "No hay pruebas registradas.".to_string();
    }

    return records
        .iter()
        .map(|e| {
            return format!(
                "{}  {}  {:<14} {:<8} {:<9} {}",
                e.date.format("%Y-%m-%d"),
                e.employee_id,
                e.employee_name,
                e.panel.to_string(),
                e.result.to_string(),
                e.substances_text()
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn render_test_stats(stats: &TestStats) -> String {
    return format!(
        "Total: {} · Negativos: {} · Positivos: {} · Pendientes: {}",
        stats.total, stats.negative, stats.positive, stats.pending
    );
}

fn resource_icon(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Video => return "▶",
        ResourceKind::Pdf => return "▤",
        ResourceKind::Image => return "▣",
    }
}

pub fn render_resources(resources: &[&Resource]) -> String {
    if resources.is_empty() {
        return "No se encontraron recursos.".to_string();
    }

    return resources
        .iter()
        .map(|e| {
            return format!(
                "{} {} [{}]\n  {}\n  {}",
                resource_icon(e.kind),
                e.title,
                e.category,
                e.description,
                e.url
            );
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

pub fn render_eye_exam(exam: &EyeExam) -> String {
    let mut lines = vec![
        format!(
            "Agudeza visual  OD {}  OI {}  AE {}",
            exam.acuity_od, exam.acuity_oi, exam.acuity_ae
        ),
        format!("Refracción OD   {}", exam.refraction_od),
        format!("Refracción OI   {}", exam.refraction_oi),
        format!(
            "PIO             OD {} mmHg  OI {} mmHg",
            exam.pressure_od, exam.pressure_oi
        ),
    ];

    let findings = exam.findings();
    if !findings.is_empty() {
        lines.push("".to_string());
        lines.extend(findings.into_iter().map(|e| return format!("! {e}")));
    }

    if !exam.notes.trim().is_empty() {
        lines.push("".to_string());
        lines.push(format!("Notas: {}", exam.notes.trim()));
    }

    return lines.join("\n");
}

fn theme() -> ColorfulTheme {
    return ColorfulTheme::default();
}

fn required(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        return Err("Este campo es obligatorio");
    }

    return Ok(());
}

pub fn calendar_form(ids: &IdGenerator) -> Result<()> {
    let mut calendar = Calendar::default();
    let days = Weekday::iter().collect::<Vec<Weekday>>();
    let kinds = AppointmentKind::iter().collect::<Vec<AppointmentKind>>();

    loop {
        println!("\n{}", Paint::cyan("Agenda semanal").bold());
        println!("{}", render_appointments(&calendar.week()));

        let actions = ["Nueva cita", "Filtrar por día", "Salir"];
        let action = Select::with_theme(&theme())
            .with_prompt("¿Qué desea hacer?")
            .default(0)
            .items(&actions)
            .interact_opt()?;

        match action {
            Some(0) => {
                let patient_name: String = Input::with_theme(&theme())
                    .with_prompt("Paciente")
                    .validate_with(required)
                    .interact_text()?;
                let day = Select::with_theme(&theme())
                    .with_prompt("Día")
                    .default(0)
                    .items(&days)
                    .interact()?;
                let time: String = Input::with_theme(&theme())
                    .with_prompt("Hora (HH:MM)")
                    .default("09:00".to_string())
                    .validate_with(|input: &String| {
                        return NaiveTime::parse_from_str(input.trim(), "%H:%M")
                            .map(|_| return ())
                            .map_err(|_| return "Use el formato HH:MM");
                    })
                    .interact_text()?;
                let kind = Select::with_theme(&theme())
                    .with_prompt("Tipo")
                    .default(0)
                    .items(&kinds)
                    .interact()?;

                let draft = AppointmentDraft {
                    patient_name,
                    day: days[day],
                    time,
                    kind: kinds[kind],
                };
                match calendar.add(ids.next_id(), draft) {
                    Ok(appointment) => println!(
                        "{}",
                        Paint::green(format!("Cita agendada para {}", appointment.patient_name))
                    ),
                    Err(err) => println!("{}", Paint::red(err.to_string())),
                }
            }
            Some(1) => {
                let day = Select::with_theme(&theme())
                    .with_prompt("Día")
                    .default(0)
                    .items(&days)
                    .interact()?;
                println!("{}", render_appointments(&calendar.on(days[day])));
            }
            _ => return Ok(()),
        }
    }
}

pub fn dental_form() -> Result<()> {
    let mut chart = DentalChart::default();
    let tools = ToothStatus::iter().collect::<Vec<ToothStatus>>();

    loop {
        println!("\n{}", Paint::cyan("Odontograma").bold());
        println!("{}", render_dental_chart(&chart));

        let actions = ["Aplicar herramienta", "Añadir nota", "Salir"];
        let action = Select::with_theme(&theme())
            .with_prompt("¿Qué desea hacer?")
            .default(0)
            .items(&actions)
            .interact_opt()?;
        if !matches!(action, Some(0) | Some(1)) {
            return Ok(());
        }

        let number: u8 = Input::with_theme(&theme())
            .with_prompt("Pieza (FDI)")
            .interact_text()?;

        let res = if action == Some(0) {
            let tool = Select::with_theme(&theme())
                .with_prompt("Herramienta")
                .default(0)
                .items(&tools)
                .interact()?;
            chart.apply(number, tools[tool])
        } else {
            let note: String = Input::with_theme(&theme())
                .with_prompt("Nota")
                .allow_empty(true)
                .interact_text()?;
            chart.set_note(number, &note)
        };

        match res {
            Ok(tooth) => println!("Pieza {}: {}", tooth.number, tooth.status),
            Err(err) => println!("{}", Paint::red(err.to_string())),
        }
    }
}

pub fn antidoping_form(ids: &IdGenerator) -> Result<()> {
    let mut log = AntidopingLog::default();
    let panels = Panel::iter().collect::<Vec<Panel>>();
    let substances = Substance::iter().collect::<Vec<Substance>>();
    let labels = substances
        .iter()
        .map(|e| return e.label())
        .collect::<Vec<String>>();

    loop {
        println!("\n{}", Paint::cyan("Control antidoping").bold());
        println!("{}", render_test_stats(&log.stats()));
        println!("{}", render_test_records(log.records()));

        let actions = ["Registrar prueba", "Salir"];
        let action = Select::with_theme(&theme())
            .with_prompt("¿Qué desea hacer?")
            .default(0)
            .items(&actions)
            .interact_opt()?;
        if action != Some(0) {
            return Ok(());
        }

        let employee_id: String = Input::with_theme(&theme())
            .with_prompt("ID Empleado")
            .validate_with(required)
            .interact_text()?;
        let employee_name: String = Input::with_theme(&theme())
            .with_prompt("Nombre completo")
            .validate_with(required)
            .interact_text()?;
        let panel = Select::with_theme(&theme())
            .with_prompt("Tipo de panel")
            .default(0)
            .items(&panels)
            .interact()?;
        let detected = MultiSelect::with_theme(&theme())
            .with_prompt("Sustancias detectadas (espacio para marcar)")
            .items(&labels)
            .interact()?;

        let draft = TestDraft {
            employee_id,
            employee_name,
            panel: panels[panel],
            substances: detected.into_iter().map(|idx| return substances[idx]).collect(),
        };
        match log.register(ids.next_id(), ids.now().date_naive(), draft) {
            Ok(record) => println!(
                "{}",
                Paint::green(format!("Prueba registrada: {} ({})", record.employee_name, record.result))
            ),
            Err(err) => println!("{}", Paint::red(err.to_string())),
        }
    }
}

pub fn library_form(ids: &IdGenerator, term: &str, category: &str) -> Result<()> {
    let mut library = Library::default();
    println!("{}", render_resources(&library.search(term, category)));

    let kinds = ResourceKind::iter().collect::<Vec<ResourceKind>>();
    while Confirm::with_theme(&theme())
        .with_prompt("¿Añadir un recurso?")
        .default(false)
        .interact()?
    {
        let title: String = Input::with_theme(&theme())
            .with_prompt("Título")
            .validate_with(required)
            .interact_text()?;
        let description: String = Input::with_theme(&theme())
            .with_prompt("Descripción")
            .allow_empty(true)
            .interact_text()?;
        let category = Select::with_theme(&theme())
            .with_prompt("Categoría")
            .default(0)
            .items(&LIBRARY_CATEGORIES)
            .interact()?;
        let kind = Select::with_theme(&theme())
            .with_prompt("Tipo")
            .default(1)
            .items(&kinds)
            .interact()?;
        let url: String = Input::with_theme(&theme())
            .with_prompt("URL")
            .validate_with(required)
            .interact_text()?;

        let draft = ResourceDraft {
            title,
            description,
            category: LIBRARY_CATEGORIES[category].to_string(),
            kind: kinds[kind],
            url,
        };
        match library.add(ids.next_id(), draft) {
            Ok(resource) => println!("{}", render_resources(&[resource])),
            Err(err) => println!("{}", Paint::red(err.to_string())),
        }
    }

    return Ok(());
}

fn refraction_input(eye: &str) -> Result<Refraction> {
    loop {
        let mut fields = vec![];
        for prompt in ["Esfera (SPH)", "Cilindro (CYL)", "Eje (AXIS)", "Adición (ADD)"] {
            let val: String = Input::with_theme(&theme())
                .with_prompt(format!("{eye} {prompt}"))
                .allow_empty(true)
                .interact_text()?;
            fields.push(val);
        }

        match Refraction::parse(&fields[0], &fields[1], &fields[2], &fields[3]) {
            Ok(refraction) => return Ok(refraction),
            Err(err) => println!("{}", Paint::red(err.to_string())),
        }
    }
}

pub fn eye_exam_form() -> Result<()> {
    let charts = Snellen::iter().collect::<Vec<Snellen>>();
    let normal = charts
        .iter()
        .position(|e| return *e == Snellen::default())
        .unwrap_or(0);
    let mut acuity = vec![];
    for eye in ["OD", "OI", "AE"] {
        let idx = Select::with_theme(&theme())
            .with_prompt(format!("Agudeza visual {eye}"))
            .default(normal)
            .items(&charts)
            .interact()?;
        acuity.push(charts[idx]);
    }

    let mut pressure = vec![];
    for eye in ["OD", "OI"] {
        let mmhg: String = Input::with_theme(&theme())
            .with_prompt(format!("Presión intraocular {eye} (mmHg)"))
            .default("15".to_string())
            .validate_with(|input: &String| {
                return parse_pressure("pressure", input)
                    .map(|_| return ())
                    .map_err(|_| return "Introduzca un valor entre 0 y 80");
            })
            .interact_text()?;
        pressure.push(parse_pressure("pressure", &mmhg)?);
    }

    let exam = EyeExam {
        acuity_od: acuity[0],
        acuity_oi: acuity[1],
        acuity_ae: acuity[2],
        refraction_od: refraction_input("OD")?,
        refraction_oi: refraction_input("OI")?,
        pressure_od: pressure[0],
        pressure_oi: pressure[1],
        notes: Input::with_theme(&theme())
            .with_prompt("Notas y diagnóstico")
            .allow_empty(true)
            .interact_text()?,
    };

    println!("\n{}", Paint::cyan("Oftalmología clínica").bold());
    println!("{}", render_eye_exam(&exam));
    return Ok(());
}

pub async fn prescription_form(
    ids: &IdGenerator,
    renderer: &DocumentRendererBox,
    out_dir: &path::Path,
) -> Result<()> {
    let mut builder = PrescriptionBuilder::default();
    builder.patient_name = Input::with_theme(&theme())
        .with_prompt("Paciente")
        .validate_with(required)
        .interact_text()?;
    builder.diagnosis = Input::with_theme(&theme())
        .with_prompt("Diagnóstico")
        .allow_empty(true)
        .interact_text()?;

    while Confirm::with_theme(&theme())
        .with_prompt("¿Añadir un medicamento?")
        .default(builder.medications().is_empty())
        .interact()?
    {
        let mut fields = vec![];
        for prompt in ["Medicamento", "Dosis", "Frecuencia", "Duración"] {
            let val: String = Input::with_theme(&theme())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            fields.push(val);
        }

        let medication = Medication {
            id: ids.next_id(),
            name: fields[0].trim().to_string(),
            dosage: fields[1].trim().to_string(),
            frequency: fields[2].trim().to_string(),
            duration: fields[3].trim().to_string(),
        };
        if let Err(err) = builder.add_medication(medication) {
            println!("{}", Paint::red(err.to_string()));
        }
    }

    builder.instructions = Input::with_theme(&theme())
        .with_prompt("Indicaciones generales")
        .allow_empty(true)
        .interact_text()?;

    let prescription = builder.build(ids.now().date_naive())?;
    let file_path = renderer
        .prescription(&prescription)?
        .write_to(out_dir)
        .await?;
    println!(
        "{}",
        Paint::green(format!("Receta guardada en {}", file_path.display()))
    );

    return Ok(());
}

pub async fn catalog_list(
    store: &CatalogStore,
    term: &str,
    category: Option<ProductCategory>,
) -> Result<()> {
    let products = store.load().await;
    let found = search(&products, term, category);
    println!("{}", render_products(&found));
    return Ok(());
}

pub async fn catalog_form(store: &CatalogStore, ids: &IdGenerator) -> Result<()> {
    let categories = ProductCategory::iter().collect::<Vec<ProductCategory>>();

    let name: String = Input::with_theme(&theme())
        .with_prompt("Nombre")
        .validate_with(required)
        .interact_text()?;
    let scientific_name: String = Input::with_theme(&theme())
        .with_prompt("Nombre científico")
        .allow_empty(true)
        .interact_text()?;
    let category = Select::with_theme(&theme())
        .with_prompt("Categoría")
        .default(0)
        .items(&categories)
        .interact()?;
    let description: String = Input::with_theme(&theme())
        .with_prompt("Descripción")
        .allow_empty(true)
        .interact_text()?;
    let benefits: String = Input::with_theme(&theme())
        .with_prompt("Beneficios (separados por ';')")
        .allow_empty(true)
        .interact_text()?;
    let preparation: String = Input::with_theme(&theme())
        .with_prompt("Preparación")
        .allow_empty(true)
        .interact_text()?;

    let product = NaturalProduct {
        id: ids.next_id(),
        name: name.trim().to_string(),
        scientific_name: scientific_name.trim().to_string(),
        category: categories[category],
        description: description.trim().to_string(),
        benefits: benefits
            .split(';')
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect(),
        image_url: "".to_string(),
        preparation: if preparation.trim().is_empty() {
            None
        } else {
            Some(preparation.trim().to_string())
        },
    };

    let products = store.upsert(product).await?;
    println!(
        "{}",
        Paint::green(format!("Catálogo actualizado: {} productos", products.len()))
    );
    return Ok(());
}

/// Prints live readings until Ctrl-C, or until `ticks` readings when set.
pub async fn vitals_monitor(ticks: Option<usize>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vitals>();
    let cancel_token = CancellationToken::new();
    let handle = tokio::spawn(ticker::run_vitals(
        ticker::VITALS_PERIOD,
        tx,
        cancel_token.clone(),
    ));

    println!(
        "{}",
        Paint::cyan(format!(
            "Monitor biométrico · {} · Ctrl-C para salir",
            Utc::now().format("%H:%M:%S")
        ))
    );

    let mut seen = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            vitals = rx.recv() => {
                let vitals = match vitals {
                    Some(vitals) => vitals,
                    None => break,
                };
                println!("{}", render_vitals(&vitals));
                seen += 1;
                if ticks.map(|e| return seen >= e).unwrap_or(false) {
                    break;
                }
            }
        }
    }

    cancel_token.cancel();
    handle.await??;
    return Ok(());
}

#[cfg(test)]
#[path = "library_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::FormError;

/// Category filter value that matches every resource.
pub const ALL_CATEGORIES: &str = "Todas";

pub const LIBRARY_CATEGORIES: [&str; 6] = ["Anatomía", "Cirugía", "Cardiología", "Dermatología", "Pediatría", "Radiología"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Pdf,
    Image,
}

impl ResourceKind {
    pub fn parse(text: &str) -> Option<ResourceKind> {
        return ResourceKind::iter().find(|e| return e.to_string() == text.to_lowercase());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub kind: ResourceKind,
    pub category: String,
    pub url: String,
    pub description: String,
}

impl Resource {
    /// Case-insensitive match on the title or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        return self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term);
    }
}

pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: ResourceKind,
    pub url: String,
}

/// Rewrites YouTube watch links into embeddable ones.
pub fn embed_url(kind: ResourceKind, url: &str) -> String {
    if kind == ResourceKind::Video && url.contains("youtube.com/watch?v=") {
        return url.replace("watch?v=", "embed/");
    }

    return url.to_string();
}

fn resource(id: &str, title: &str, kind: ResourceKind, category: &str, url: &str, description: &str) -> Resource {
    return Resource {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        category: category.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    };
}

pub struct Library {
    resources: Vec<Resource>,
}

impl Default for Library {
    fn default() -> Library {
        return Library {
            resources: vec![
                resource(
                    "v1",
                    "Anatomía Cardíaca 3D",
                    ResourceKind::Video,
                    "Anatomía",
                    "https://www.youtube.com/embed/j_nco2J7nVU",
                    "Exploración detallada de las válvulas y ventrículos.",
                ),
                resource(
                    "v2",
                    "Cirugía Laparoscópica: Fundamentos",
                    ResourceKind::Video,
                    "Cirugía",
                    "https://www.youtube.com/embed/w0fXjF5IqX8",
                    "Técnicas básicas de acceso e instrumentación.",
                ),
                resource(
                    "p1",
                    "Guía de Práctica Clínica: Hipertensión",
                    ResourceKind::Pdf,
                    "Cardiología",
                    "https://www.cenetec-difusion.com/CMGPC/GPC-IMSS-076-08/ER.pdf",
                    "Protocolo actualizado para el tratamiento de HTA.",
                ),
            ],
        };
    }
}

impl Library {
    /// Resources in `category` matching `term`. `ALL_CATEGORIES` disables
    /// the category filter.
    pub fn search(&self, term: &str, category: &str) -> Vec<&Resource> {
        return self
            .resources
            .iter()
            .filter(|e| return category == ALL_CATEGORIES || e.category == category)
            .filter(|e| return e.matches(term))
            .collect();
    }

    pub fn add(&mut self, id: String, draft: ResourceDraft) -> Result<&Resource, FormError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(FormError::Missing("title"));
        }

        let url = draft.url.trim();
        if url.is_empty() {
            return Err(FormError::Missing("url"));
        }

        if !LIBRARY_CATEGORIES.contains(&draft.category.as_str()) {
            return Err(FormError::Invalid {
                field: "category",
                value: draft.category,
            });
        }

        self.resources.push(Resource {
            id,
            title: title.to_string(),
            kind: draft.kind,
            category: draft.category,
            url: embed_url(draft.kind, url),
            description: draft.description.trim().to_string(),
        });

        return Ok(&self.resources[self.resources.len() - 1]);
    }

    pub fn len(&self) -> usize {
        return self.resources.len();
    }
}

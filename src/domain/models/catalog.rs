#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumIter, strum::Display)]
pub enum ProductCategory {
    Relajante,
    Respiratorio,
    Digestivo,
    #[serde(rename = "Inmunológico")]
    #[strum(serialize = "Inmunológico")]
    Inmunologico,
    Piel,
    #[serde(rename = "Oncológico")]
    #[strum(serialize = "Oncológico")]
    Oncologico,
    Otro,
}

impl ProductCategory {
    pub fn parse(text: &str) -> Option<ProductCategory> {
        return ProductCategory::iter()
            .find(|e| return e.to_string().to_lowercase() == text.to_lowercase());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalProduct {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub category: ProductCategory,
    pub description: String,
    pub benefits: Vec<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
}

impl NaturalProduct {
    /// Case-insensitive match on the name or any listed benefit.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        return self.name.to_lowercase().contains(&term)
            || self
                .benefits
                .iter()
                .any(|e| return e.to_lowercase().contains(&term));
    }
}

pub fn search<'a>(
    products: &'a [NaturalProduct],
    term: &str,
    category: Option<ProductCategory>,
) -> Vec<&'a NaturalProduct> {
    return products
        .iter()
        .filter(|e| return e.matches(term))
        .filter(|e| return category.map(|c| return e.category == c).unwrap_or(true))
        .collect();
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[NaturalProduct]) -> Vec<ProductCategory> {
    let mut res: Vec<ProductCategory> = vec![];
    for product in products {
        if !res.contains(&product.category) {
            res.push(product.category);
        }
    }

    return res;
}

fn product(
    id: &str,
    name: &str,
    scientific_name: &str,
    category: ProductCategory,
    description: &str,
    benefits: &[&str],
    preparation: &str,
) -> NaturalProduct {
    return NaturalProduct {
        id: id.to_string(),
        name: name.to_string(),
        scientific_name: scientific_name.to_string(),
        category,
        description: description.to_string(),
        benefits: benefits.iter().map(|e| return e.to_string()).collect(),
        image_url: "".to_string(),
        preparation: Some(preparation.to_string()),
    };
}

pub fn default_products() -> Vec<NaturalProduct> {
    return vec![
        product(
            "1",
            "Cannabis Medicinal",
            "Cannabis sativa L.",
            ProductCategory::Oncologico,
            "Planta con propiedades analgésicas y antieméticas. Actúa sobre el sistema endocannabinoide.",
            &[
                "Alivio del dolor crónico",
                "Reducción de náuseas (quimioterapia)",
                "Estimulación del apetito",
                "Propiedades neuroprotectoras",
            ],
            "Aceites sublinguales (ratios THC:CBD), vaporización de flor seca, cremas tópicas.",
        ),
        product(
            "2",
            "Eucalipto",
            "Eucalyptus globulus",
            ProductCategory::Respiratorio,
            "Árbol perenne cuyas hojas son ricas en cineol.",
            &[
                "Descongestionante natural",
                "Expectorante",
                "Antiséptico en vías aéreas",
                "Alivio de bronquitis",
            ],
            "Vahos, infusión de hojas, aceite esencial difusor.",
        ),
        product(
            "3",
            "Valeriana",
            "Valeriana officinalis",
            ProductCategory::Relajante,
            "Raíz utilizada para calmar el sistema nervioso.",
            &[
                "Inductor del sueño profundo",
                "Ansiolítico natural",
                "Relajante muscular",
                "Reductor de taquicardia nerviosa",
            ],
            "Infusión de la raíz, extracto líquido, cápsulas.",
        ),
        product(
            "4",
            "Jengibre",
            "Zingiber officinale",
            ProductCategory::Digestivo,
            "Rizoma con efectos antiinflamatorios y digestivos.",
            &[
                "Antiemético potente (náuseas)",
                "Antiinflamatorio sistémico",
                "Mejora la digestión",
                "Calienta el cuerpo",
            ],
            "Té de la raíz fresca, rallado en comidas, extracto seco.",
        ),
        product(
            "5",
            "Cúrcuma",
            "Curcuma longa",
            ProductCategory::Oncologico,
            "Su principio activo, la curcumina, es uno de los antiinflamatorios naturales más estudiados.",
            &[
                "Potente antiinflamatorio",
                "Antioxidante celular",
                "Apoyo hepático",
                "Coadyuvante en terapias oncológicas",
            ],
            "Leche dorada con pimienta negra, cápsulas de alta concentración.",
        ),
    ];
}

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn parse(text: String) -> Option<Language> {
        return Language::iter().find(|e| return e.to_string() == text);
    }

    /// BCP 47 tag handed to speech engines.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Es => return "es-ES",
            Language::En => return "en-US",
        }
    }

    pub fn welcome(&self) -> &'static str {
        match self {
            Language::Es => {
                return "Soy su asistente médico digital. Combino medicina natural, homeopática y alopática para orientarle en su caso.\n\n**¿En qué puedo asistirle hoy?**"
            }
            Language::En => {
                return "I am your digital medical assistant. I combine natural, homeopathic and allopathic medicine to guide you through your case.\n\n**How may I assist you today?**"
            }
        }
    }

    pub fn new_consultation(&self) -> &'static str {
        match self {
            Language::Es => return "Nueva Consulta",
            Language::En => return "New Consultation",
        }
    }

    pub fn voice_enabled(&self) -> &'static str {
        match self {
            Language::Es => return "Sistema de voz activado",
            Language::En => return "Voice system activated",
        }
    }

    pub fn thinking(&self) -> &'static str {
        match self {
            Language::Es => return "Analizando...",
            Language::En => return "Analyzing...",
        }
    }

    pub fn no_reply(&self) -> &'static str {
        match self {
            Language::Es => return "No se obtuvo respuesta. Puede intentarlo de nuevo.",
            Language::En => return "No reply was received. You can try again.",
        }
    }
}

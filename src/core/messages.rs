use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pt-br" | "pt_br" | "pt" => Ok(Locale::PtBr),
            other => Err(format!("unsupported locale: {} (expected en or pt-br)", other)),
        }
    }
}

/// Placeholder labels shown by the dependent controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub select_professional: &'static str,
    pub select_professional_first: &'static str,
    pub loading_services: &'static str,
    pub no_services: &'static str,
    pub select_service: &'static str,
    pub select_date_and_professional: &'static str,
    pub loading_slots: &'static str,
    pub no_slots: &'static str,
    pub select_time: &'static str,
    pub slots_error: &'static str,
}

impl Messages {
    pub fn english() -> Self {
        Self {
            select_professional: "select a professional",
            select_professional_first: "select a professional first",
            loading_services: "loading modules...",
            no_services: "no module registered for this professional",
            select_service: "select a module",
            select_date_and_professional: "select date and professional",
            loading_slots: "loading times...",
            no_slots: "no time available for this date/professional",
            select_time: "select a time",
            slots_error: "error loading times",
        }
    }

    pub fn portuguese() -> Self {
        Self {
            select_professional: "Selecione um profissional",
            select_professional_first: "Selecione primeiro um profissional",
            loading_services: "Carregando módulos...",
            no_services: "Nenhum módulo cadastrado para este profissional",
            select_service: "Selecione um módulo",
            select_date_and_professional: "Selecione a data e o profissional",
            loading_slots: "Carregando horários...",
            no_slots: "Nenhum horário disponível para esta data/profissional",
            select_time: "Selecione um horário",
            slots_error: "Erro ao carregar horários",
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::PtBr => Self::portuguese(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A service offered by a professional, as returned by the services endpoint.
///
/// The backend may send `id` either as a JSON string or as a number; both are
/// kept as the string the option value will carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOption {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl ServiceOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A bookable time string such as `"14:30"`.
pub type Slot = String;

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// One `(value, label)` entry of a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<ServiceOption> for SelectOption {
    fn from(service: ServiceOption) -> Self {
        Self::new(service.id, service.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlRole {
    Professional,
    Service,
    Time,
}

impl fmt::Display for ControlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlRole::Professional => "professional",
            ControlRole::Service => "service",
            ControlRole::Time => "time",
        };
        f.write_str(name)
    }
}

/// A select control: option 0 is always the placeholder (value `""`).
///
/// A disabled control never holds a selection other than the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawControl")]
pub struct Control {
    role: ControlRole,
    options: Vec<SelectOption>,
    selected: String,
    enabled: bool,
}

impl Control {
    pub fn new(role: ControlRole, placeholder: impl Into<String>) -> Self {
        Self {
            role,
            options: vec![SelectOption::placeholder(placeholder)],
            selected: String::new(),
            enabled: false,
        }
    }

    pub fn role(&self) -> ControlRole {
        self.role
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Options other than the placeholder.
    pub fn choices(&self) -> &[SelectOption] {
        self.options.get(1..).unwrap_or(&[])
    }

    pub fn placeholder(&self) -> &str {
        self.options.first().map_or("", |o| o.label.as_str())
    }

    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn contains(&self, value: &str) -> bool {
        self.choices().iter().any(|o| o.value == value)
    }

    /// Replace the option list with a lone placeholder and disable the control.
    pub fn reset(&mut self, placeholder: impl Into<String>) {
        self.options = vec![SelectOption::placeholder(placeholder)];
        self.selected.clear();
        self.enabled = false;
    }

    /// Replace the option list with a placeholder followed by `choices`.
    ///
    /// An empty `choices` leaves the control disabled.
    pub fn populate<I>(&mut self, placeholder: impl Into<String>, choices: I)
    where
        I: IntoIterator<Item = SelectOption>,
    {
        self.options = std::iter::once(SelectOption::placeholder(placeholder))
            .chain(choices)
            .collect();
        self.selected.clear();
        self.enabled = self.options.len() > 1;
    }

    /// Record a value the document already holds, without checking it against the options.
    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.selected = value.into();
    }

    pub(crate) fn enable(&mut self) {
        self.enabled = true;
    }

    /// User selection. `""` goes back to the placeholder.
    pub fn select(&mut self, value: &str) -> crate::utils::error::Result<()> {
        use crate::utils::error::CascadeError;

        if !self.enabled {
            return Err(CascadeError::SelectionRejected {
                control: self.role.to_string(),
                value: value.to_string(),
                reason: "control is disabled".to_string(),
            });
        }

        if !value.is_empty() && !self.contains(value) {
            return Err(CascadeError::SelectionRejected {
                control: self.role.to_string(),
                value: value.to_string(),
                reason: "value is not one of the offered options".to_string(),
            });
        }

        self.selected = value.to_string();
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawControl {
    role: ControlRole,
    options: Vec<SelectOption>,
    #[serde(default)]
    selected: String,
    enabled: bool,
}

impl TryFrom<RawControl> for Control {
    type Error = String;

    fn try_from(raw: RawControl) -> std::result::Result<Self, Self::Error> {
        match raw.options.first() {
            None => return Err(format!("{} control has no placeholder option", raw.role)),
            Some(first) if !first.is_placeholder() => {
                return Err(format!(
                    "{} control must start with a placeholder option",
                    raw.role
                ))
            }
            Some(_) => {}
        }

        if raw.options[1..].iter().any(SelectOption::is_placeholder) {
            return Err(format!("{} control has an empty option value", raw.role));
        }

        if !raw.selected.is_empty() {
            if !raw.enabled {
                return Err(format!("disabled {} control cannot hold a selection", raw.role));
            }
            // 專業人員欄位的值來自頁面本身，不一定在選項清單中
            if raw.role != ControlRole::Professional
                && !raw.options.iter().any(|o| o.value == raw.selected)
            {
                return Err(format!(
                    "{} control selection '{}' is not one of its options",
                    raw.role, raw.selected
                ));
            }
        }

        Ok(Self {
            role: raw.role,
            options: raw.options,
            selected: raw.selected,
            enabled: raw.enabled,
        })
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        writeln!(f, "{} [{}]", self.role, state)?;
        for option in &self.options {
            let marker = if option.value == self.selected { '*' } else { ' ' };
            if option.is_placeholder() {
                writeln!(f, "  {} ({})", marker, option.label)?;
            } else {
                writeln!(f, "  {} {} = {}", marker, option.value, option.label)?;
            }
        }
        Ok(())
    }
}

/// Current values of the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub professional_id: String,
    pub service_id: String,
    pub date_value: String,
    pub time_value: String,
}

/// A fully selected booking, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub professional_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
}

/// Serializable view of every control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub professional: Control,
    pub service: Control,
    pub date: String,
    pub time: Control,
}

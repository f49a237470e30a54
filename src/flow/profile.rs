//! Flow profiles
//!
//! A profile supplies everything deployment-specific about a flow: copy,
//! menus, the category list, the question order, contacts and the optional
//! multiple-choice fork. Profiles are TOML files; the default one is
//! compiled into the binary.

use std::collections::HashSet;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use super::action::MenuAction;
use super::step::Field;
use crate::utils::errors::{IntakeError, Result};
use crate::utils::helpers::normalize_whitespace;

const BUILTIN_PROFILE: &str = include_str!("../../profiles/netherbot.toml");

/// A complete flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FlowProfile {
    pub name: String,
    /// Whether the flow starts with the category submenu
    #[serde(default)]
    pub collect_category: bool,
    /// Contact shown by the `chat` menu entry
    pub chat_contact: Option<String>,
    /// Contact named under a single service description
    pub service_contact: Option<String>,
    /// Contacts listed in the closing message
    #[serde(default)]
    pub closing_contacts: Vec<String>,
    #[serde(default)]
    pub fun_facts: Vec<String>,
    pub texts: Texts,
    #[serde(default)]
    pub menu: Vec<MenuEntry>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub choice: Option<ChoiceConfig>,
}

/// Static copy. Every entry is HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct Texts {
    pub welcome: String,
    pub menu: String,
    pub idle: String,
    pub help: String,
    pub failure: String,
    #[serde(default = "default_category_prompt")]
    pub category_prompt: String,
    /// Shown above the first question; `{category}` is the chosen label
    #[serde(default = "default_category_selected")]
    pub category_selected: String,
    #[serde(default)]
    pub services_intro: String,
    /// Appended to a service description; `{name}`, `{title}`, `{telegram}`, `{calendly}`
    #[serde(default)]
    pub service_footer: String,
    #[serde(default)]
    pub chat_heading: String,
    #[serde(default)]
    pub chat_footer: String,
    /// `{name}`, `{summary}`, `{contacts}`, `{fun_fact}`
    pub closing: String,
    #[serde(default = "default_back_label")]
    pub back_label: String,
    #[serde(default = "default_learn_more_label")]
    pub learn_more_label: String,
}

fn default_category_prompt() -> String {
    "Which area is your inquiry about?".to_string()
}

fn default_category_selected() -> String {
    "You picked <b>{category}</b>.".to_string()
}

fn default_back_label() -> String {
    "⬅️ Back to Menu".to_string()
}

fn default_learn_more_label() -> String {
    "🔍 Learn More".to_string()
}

/// Main menu button: either a callback action or an external link
#[derive(Debug, Clone, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub action: Option<MenuAction>,
    pub url: Option<String>,
}

/// A service area, used both for the inquiry submenu and the services overview
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    /// HTML description shown for `service:<key>`
    #[serde(default)]
    pub description: String,
    pub learn_more: Option<String>,
}

impl Category {
    /// Button text: icon followed by the label
    pub fn button_label(&self) -> String {
        if self.icon.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.icon, self.label)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub field: Field,
    pub prompt: String,
    /// Echo of this answer shown above the next prompt
    pub echo: Option<EchoConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EchoConfig {
    /// `{echo}` is the (possibly paraphrased) answer
    pub template: String,
    pub paraphrase: Option<ParaphraseRequest>,
}

/// Instruction and request template sent to the paraphrase service
#[derive(Debug, Clone, Deserialize)]
pub struct ParaphraseRequest {
    pub instruction: String,
    /// `{text}` for echoes; `{name}` and `{details}` for summaries
    pub request: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryConfig {
    /// Fields listed in the bullet summary; all collected fields when unset
    pub fields: Option<Vec<Field>>,
    pub paraphrase: Option<ParaphraseRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub key: String,
    pub name: String,
    pub title: String,
    /// Telegram username without the leading `@`
    pub telegram: String,
    pub linkedin: Option<String>,
    pub calendly: Option<String>,
    #[serde(default = "default_calendly_label")]
    pub calendly_label: String,
}

fn default_calendly_label() -> String {
    "Schedule a 30-Minute One-on-One".to_string()
}

impl Contact {
    pub fn telegram_url(&self) -> String {
        format!("https://t.me/{}", self.telegram)
    }
}

/// Multiple-choice fork entered from the chat contact card
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceConfig {
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
    pub invalid: String,
    /// `{choice}` and `{fun_fact}`
    pub confirmation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceOption {
    pub token: String,
    pub label: String,
}

impl ChoiceConfig {
    /// Match a literal token; surrounding whitespace is ignored
    pub fn option(&self, input: &str) -> Option<&ChoiceOption> {
        let input = input.trim();
        self.options.iter().find(|o| o.token == input)
    }
}

impl FlowProfile {
    /// The profile compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_PROFILE)
    }

    /// Parse and validate a profile
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let profile: FlowProfile = toml::from_str(source)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load the profile at `path`, or the built-in one
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let profile = match path {
            Some(path) => {
                debug!(path = %path, "Loading flow profile from file");
                let source = tokio::fs::read_to_string(path).await?;
                Self::from_toml_str(&source)?
            }
            None => Self::builtin()?,
        };

        info!(
            profile = %profile.name,
            questions = profile.questions.len(),
            categories = profile.categories.len(),
            "Flow profile loaded"
        );
        Ok(profile)
    }

    /// Question fields in asking order
    pub fn question_fields(&self) -> Vec<Field> {
        self.questions.iter().map(|q| q.field).collect()
    }

    /// Every field a completed flow must have collected
    pub fn required_fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(self.questions.len() + 1);
        if self.collect_category {
            fields.push(Field::Category);
        }
        fields.extend(self.question_fields());
        fields
    }

    pub fn question(&self, field: Field) -> Option<&Question> {
        self.questions.iter().find(|q| q.field == field)
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn category_by_key(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Resolve typed text to a category.
    ///
    /// Exact key or label matches win (case-insensitive); otherwise the input
    /// must be a fragment of exactly one label.
    pub fn category_by_input(&self, input: &str) -> Option<&Category> {
        let needle = normalize_whitespace(input).to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .categories
            .iter()
            .find(|c| c.key == needle || c.label.to_lowercase() == needle)
        {
            return Some(exact);
        }

        if needle.chars().count() < 3 {
            return None;
        }

        let mut partial = self
            .categories
            .iter()
            .filter(|c| c.label.to_lowercase().contains(&needle));
        match (partial.next(), partial.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn contact(&self, key: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.key == key)
    }

    /// Fields listed in the bullet summary
    pub fn summary_fields(&self) -> Vec<Field> {
        match &self.summary.fields {
            Some(fields) => fields.clone(),
            None => self.required_fields(),
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("profile name is required"));
        }

        self.validate_questions()?;
        self.validate_categories()?;
        self.validate_contacts()?;
        self.validate_menu()?;

        if let Some(choice) = &self.choice {
            let mut tokens = HashSet::new();
            for option in &choice.options {
                if option.token.trim().is_empty() {
                    return Err(invalid("choice tokens must not be empty"));
                }
                if !tokens.insert(option.token.as_str()) {
                    return Err(invalid(format!("duplicate choice token '{}'", option.token)));
                }
            }
            if choice.options.is_empty() {
                return Err(invalid("choice fork needs at least one option"));
            }
        }

        if let Some(fields) = &self.summary.fields {
            let required = self.required_fields();
            if let Some(field) = fields.iter().find(|f| !required.contains(f)) {
                return Err(invalid(format!("summary lists uncollected field '{}'", field)));
            }
        }

        Ok(())
    }

    fn validate_questions(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(invalid("at least one question is required"));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.field == Field::Category {
                return Err(invalid("category is collected from the submenu, not as a question"));
            }
            if !seen.insert(question.field) {
                return Err(invalid(format!("duplicate question for '{}'", question.field)));
            }
            if question.prompt.trim().is_empty() {
                return Err(invalid(format!("empty prompt for '{}'", question.field)));
            }
        }

        Ok(())
    }

    fn validate_categories(&self) -> Result<()> {
        if self.collect_category && self.categories.is_empty() {
            return Err(invalid("a profile that collects a category must list categories"));
        }

        let key_pattern = Regex::new(r"^[a-z0-9_-]{1,32}$")
            .map_err(|e| IntakeError::Profile(e.to_string()))?;
        let mut keys = HashSet::new();
        for category in &self.categories {
            if !key_pattern.is_match(&category.key) {
                return Err(invalid(format!("invalid category key '{}'", category.key)));
            }
            if !keys.insert(category.key.as_str()) {
                return Err(invalid(format!("duplicate category key '{}'", category.key)));
            }
            if let Some(url) = &category.learn_more {
                check_url(url)?;
            }
        }

        Ok(())
    }

    fn validate_contacts(&self) -> Result<()> {
        for contact in &self.contacts {
            if let Some(url) = &contact.linkedin {
                check_url(url)?;
            }
            if let Some(url) = &contact.calendly {
                check_url(url)?;
            }
        }

        let referenced = self
            .chat_contact
            .iter()
            .chain(self.service_contact.iter())
            .chain(self.closing_contacts.iter());
        for key in referenced {
            if self.contact(key).is_none() {
                return Err(invalid(format!("unknown contact '{}'", key)));
            }
        }

        Ok(())
    }

    fn validate_menu(&self) -> Result<()> {
        for entry in &self.menu {
            match (&entry.action, &entry.url) {
                (Some(action), None) => match action {
                    MenuAction::Category(key) | MenuAction::Service(key) => {
                        if self.category_by_key(key).is_none() {
                            return Err(invalid(format!("menu entry references unknown category '{}'", key)));
                        }
                    }
                    _ => {}
                },
                (None, Some(url)) => check_url(url)?,
                _ => {
                    return Err(invalid(format!(
                        "menu entry '{}' needs exactly one of action or url",
                        entry.label
                    )))
                }
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> IntakeError {
    IntakeError::Profile(message.into())
}

fn check_url(raw: &str) -> Result<()> {
    url::Url::parse(raw)?;
    Ok(())
}

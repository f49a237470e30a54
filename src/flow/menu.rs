//! Menu and card rendering for a profile

use super::action::MenuAction;
use super::profile::{Contact, FlowProfile};
use super::reply::{Button, Reply};
use crate::utils::helpers::{escape_html, render_template};

/// Main menu keyboard, one entry per row
pub fn main_menu_keyboard(profile: &FlowProfile) -> Vec<Vec<Button>> {
    profile
        .menu
        .iter()
        .filter_map(|entry| match (&entry.action, &entry.url) {
            (Some(action), _) => Some(Button::callback(&entry.label, action.clone())),
            (None, Some(url)) => Some(Button::link(&entry.label, url)),
            (None, None) => None,
        })
        .map(|button| vec![button])
        .collect()
}

/// Main menu with the given text above it
pub fn main_menu(profile: &FlowProfile, text: &str) -> Reply {
    Reply::with_keyboard(text, main_menu_keyboard(profile))
}

fn back_row(profile: &FlowProfile) -> Vec<Button> {
    vec![Button::callback(&profile.texts.back_label, MenuAction::MainMenu)]
}

/// Category submenu for a new inquiry
pub fn category_menu(profile: &FlowProfile) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = profile
        .categories
        .iter()
        .map(|c| vec![Button::callback(c.button_label(), MenuAction::Category(c.key.clone()))])
        .collect();
    keyboard.push(back_row(profile));

    Reply::with_keyboard(&profile.texts.category_prompt, keyboard)
}

/// Services overview: description button and "learn more" link per row
pub fn services_overview(profile: &FlowProfile) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = profile
        .categories
        .iter()
        .map(|c| {
            let mut row = vec![Button::callback(c.button_label(), MenuAction::Service(c.key.clone()))];
            if let Some(url) = &c.learn_more {
                row.push(Button::link(&profile.texts.learn_more_label, url));
            }
            row
        })
        .collect();
    keyboard.push(back_row(profile));

    Reply::with_keyboard(&profile.texts.services_intro, keyboard)
}

/// Single service description with the service contact footer
pub fn service_details(profile: &FlowProfile, key: &str) -> Option<Reply> {
    let category = profile.category_by_key(key)?;
    let mut text = category.description.clone();

    if let Some(contact) = profile.service_contact.as_deref().and_then(|k| profile.contact(k)) {
        let name = escape_html(&contact.name);
        let title = escape_html(&contact.title);
        let telegram = telegram_link(contact);
        let calendly = contact.calendly.as_deref().map(calendly_link).unwrap_or_default();
        let footer = render_template(
            &profile.texts.service_footer,
            &[
                ("name", name.as_str()),
                ("title", title.as_str()),
                ("telegram", telegram.as_str()),
                ("calendly", calendly.as_str()),
            ],
        );
        if !footer.trim().is_empty() {
            text.push_str("\n\n");
            text.push_str(footer.trim());
        }
    }

    Some(Reply::text(text))
}

/// Contact card of the chat contact, with the choice prompt when configured
pub fn chat_card(profile: &FlowProfile) -> Reply {
    let mut sections = Vec::new();
    if !profile.texts.chat_heading.is_empty() {
        sections.push(profile.texts.chat_heading.clone());
    }
    if let Some(contact) = profile.chat_contact.as_deref().and_then(|k| profile.contact(k)) {
        sections.push(contact_card(contact));
    }
    if !profile.texts.chat_footer.is_empty() {
        sections.push(profile.texts.chat_footer.clone());
    }
    if let Some(choice) = &profile.choice {
        sections.push(choice.prompt.clone());
    }

    Reply::with_keyboard(sections.join("\n\n"), vec![back_row(profile)])
}

/// HTML contact card
pub fn contact_card(contact: &Contact) -> String {
    let mut lines = vec![
        format!("<b>Name</b>: {}", escape_html(&contact.name)),
        format!("<b>Position</b>: {}", escape_html(&contact.title)),
        format!("<b>Telegram</b>: {}", telegram_link(contact)),
    ];
    if let Some(url) = &contact.linkedin {
        lines.push(format!(
            "<b>LinkedIn</b>: <a href=\"{}\">{}</a>",
            escape_html(url),
            escape_html(&contact.name)
        ));
    }
    if let Some(url) = &contact.calendly {
        lines.push(format!(
            "<b>Calendly</b>: <a href=\"{}\">{}</a>",
            escape_html(url),
            escape_html(&contact.calendly_label)
        ));
    }
    lines.join("\n")
}

/// Cards of the closing contacts, blank line between each
pub fn closing_contacts(profile: &FlowProfile) -> String {
    profile
        .closing_contacts
        .iter()
        .filter_map(|key| profile.contact(key))
        .map(contact_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn telegram_link(contact: &Contact) -> String {
    format!(
        "<a href=\"{}\">@{}</a>",
        escape_html(&contact.telegram_url()),
        escape_html(&contact.telegram)
    )
}

fn calendly_link(url: &str) -> String {
    format!("<a href=\"{0}\">{0}</a>", escape_html(url))
}

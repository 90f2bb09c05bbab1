use wasm_bindgen::JsCast;
use web_sys::HtmlTemplateElement;

use crate::model::{Activity, Catalog};

pub const TEMPLATE_ID: &str = "activity-card-template";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// How activity cards are drawn. Picked once at startup from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Host ships a card template: full card with roster pills and remove controls.
    Template,
    /// No template: title, description, schedule and availability only.
    Minimal,
}

impl CardLayout {
    pub fn detect() -> Self {
        let has_template = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(TEMPLATE_ID))
            .is_some_and(|el| el.is_instance_of::<HtmlTemplateElement>());
        Self::from_capability(has_template)
    }

    pub fn from_capability(has_template: bool) -> Self {
        if has_template {
            CardLayout::Template
        } else {
            CardLayout::Minimal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Placeholder first, then one option per activity in catalog order.
pub fn select_options(catalog: &Catalog) -> Vec<SelectOption> {
    std::iter::once(SelectOption {
        value: String::new(),
        label: SELECT_PLACEHOLDER.to_string(),
    })
    .chain(catalog.iter().map(|a| SelectOption {
        value: a.name.clone(),
        label: a.name.clone(),
    }))
    .collect()
}

pub fn availability_text(activity: &Activity) -> String {
    format!("{} spots left", activity.spots_left())
}

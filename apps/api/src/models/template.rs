use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-selectable résumé template: author markup plus author stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: Uuid,
    pub name: String,
    /// Markup with `{{placeholder}}` tokens and at most one `{{#if}}` block.
    pub html_structure: String,
    pub css_styles: String,
    /// Listing flag only; rendering ignores it.
    pub is_active: bool,
}

impl TemplateRecord {
    pub fn has_markup(&self) -> bool {
        !self.html_structure.trim().is_empty()
    }
}

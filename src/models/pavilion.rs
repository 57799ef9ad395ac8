use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pavilion {
    pub id: i64,              // Stable identifier assigned by the store
    pub name: String,         // Display name
    #[serde(default)]
    pub description: String,  // Free-text description
    #[serde(default)]
    pub image_url: String,    // Image reference, rendered as-is
}

impl Pavilion {
    /// Path of the detail page for this pavilion.
    pub fn detail_path(&self) -> String {
        format!("/pavilion/{}", self.id)
    }
}

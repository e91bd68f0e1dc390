//! Notes owned by users.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::request::PageRequest;
use crate::store::schema::NOTES;
use crate::store::{from_row, to_row, DataStore, Filter, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: Option<String>,
}

/// Note fields submitted through the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: Option<String>,
}

impl NewNote {
    /// `None` when the title is missing or blank.
    pub fn from_form(req: &PageRequest) -> Option<Self> {
        let title = req.form_value("title").map(str::trim).filter(|t| !t.is_empty())?;
        let content = req
            .form_value("content")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Some(Self {
            title: title.to_string(),
            content,
        })
    }
}

pub async fn create_note(store: &dyn DataStore, user_id: &str, new: NewNote) -> Result<Note, StoreError> {
    let note = Note {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        title: new.title,
        content: new.content,
    };
    store.insert(NOTES, vec![to_row(&note)?]).await?;
    Ok(note)
}

pub async fn notes_for(store: &dyn DataStore, user_id: &str) -> Result<Vec<Note>, StoreError> {
    store
        .select(NOTES, &Filter::eq("userId", user_id))
        .await?
        .into_iter()
        .map(from_row)
        .collect()
}

//! # Word models
//!
//! [`WordEntry`] is what the UI renders: a saved vocabulary item keyed by the
//! user's word id. [`WordDraft`] is an unsaved item, as produced by AI
//! generation or suggestions and as sent on registration; it uses the
//! backend's camelCase field names.
//!
//! The `*Reply` types mirror the backend's response bodies and are converted
//! into [`WordEntry`] / [`WordDraft`] by the action wrappers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::WordForm;

/// A saved vocabulary item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub spelling: String,
    pub meaning: Option<String>,
    pub example_sentence: Option<String>,
    pub example_sentence_translation: Option<String>,
}

/// An unsaved vocabulary item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDraft {
    pub word: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meaning: String,
    #[serde(default)]
    pub example_sentence: Option<String>,
    #[serde(default)]
    pub example_sentence_translation: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl WordDraft {
    /// Copy the draft into a registration form, leaving missing fields empty.
    pub fn to_form(&self) -> WordForm {
        WordForm {
            word: self.word.clone(),
            meaning: self.meaning.clone(),
            example: self.example_sentence.clone().unwrap_or_default(),
            example_translation: self.example_sentence_translation.clone().unwrap_or_default(),
        }
    }
}

impl From<&WordForm> for WordDraft {
    fn from(form: &WordForm) -> Self {
        Self {
            word: form.word.trim().to_string(),
            meaning: form.meaning.trim().to_string(),
            example_sentence: Some(form.example.trim().to_string()),
            example_sentence_translation: Some(form.example_translation.trim().to_string()),
        }
    }
}

/// Reply of `POST /word/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReply {
    pub item: WordDraft,
}

/// Reply of `POST /word/suggest`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestReply {
    #[serde(default)]
    pub items: Vec<WordDraft>,
}

/// One row of `GET /words`.
#[derive(Debug, Clone, Deserialize)]
pub struct WordListItem {
    pub word_id: String,
    pub word: String,
    pub meaning: Option<String>,
    pub example_sentence: Option<String>,
    pub example_sentence_translation: Option<String>,
}

impl From<WordListItem> for WordEntry {
    fn from(item: WordListItem) -> Self {
        Self {
            id: item.word_id,
            spelling: item.word,
            meaning: item.meaning,
            example_sentence: item.example_sentence,
            example_sentence_translation: item.example_sentence_translation,
        }
    }
}

/// Reply of `GET /words`.
#[derive(Debug, Clone, Deserialize)]
pub struct WordListReply {
    pub word_list: Vec<WordListItem>,
}

/// Reply of `POST /word/detail`.
#[derive(Debug, Clone, Deserialize)]
pub struct WordDetailReply {
    pub spelling: String,
    pub meaning: Option<String>,
    pub example_sentence: Option<String>,
    pub example_sentence_translation: Option<String>,
}

impl WordDetailReply {
    pub fn into_entry(self, id: String) -> WordEntry {
        WordEntry {
            id,
            spelling: self.spelling,
            meaning: self.meaning,
            example_sentence: self.example_sentence,
            example_sentence_translation: self.example_sentence_translation,
        }
    }
}

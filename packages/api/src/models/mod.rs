//! Data models shared by the server functions and the UI.

mod user;
mod word;

pub use user::{SignedInUser, SigninReply};
pub use word::{
    GenerateReply, SuggestReply, WordDetailReply, WordDraft, WordEntry, WordListItem,
    WordListReply,
};

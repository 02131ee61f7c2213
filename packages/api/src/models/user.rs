use serde::{Deserialize, Serialize};

/// Reply of `POST /signin`.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninReply {
    pub access_token: String,
}

/// Reply of `GET /signed-in-check`: the backend's confirmation of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedInUser {
    pub user_id: String,
}

use serde::{Deserialize, Serialize};

pub type MemoId = i64;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Memo {
  pub id: MemoId,
  pub content: String,
  /// Tags the server pulled out of `content`; only sent back on create.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub hashtags: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub password: Option<String>
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CreateMemoPayload {
  pub content: String,
  pub password: String
}

#[derive(Deserialize, Serialize, Debug)]
pub struct DeleteMemoPayload {
  pub password: String
}

#[derive(Deserialize, Serialize, Debug)]
pub struct EditMemoPayload {
  pub content: String,
  pub password: String
}

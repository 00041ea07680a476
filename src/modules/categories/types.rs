use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Category name to the hashtags grouped under it, as derived by the server.
pub type CategoryMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CategoriesResponse {
  #[serde(default)]
  pub categories: CategoryMap
}

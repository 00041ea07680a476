use tracing::{debug, warn};

use crate::error::{MemoError, Result};
use crate::types::{decode, server_error, ApiClient};

use crate::modules::categories::types::*;
use crate::modules::memos::types::Memo;

pub async fn list_categories(client: &ApiClient) -> Result<CategoryMap> {
    let url = client.url(&["category"])?;
    debug!(%url, "GET categories");

    let response = client.http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    let body: CategoriesResponse = decode(response).await?;
    Ok(body.categories)
}

/// Any non-2xx answer means the category is unknown to the server.
pub async fn list_category_memos(client: &ApiClient, category: &str) -> Result<Vec<Memo>> {
    let url = client.url(&["category", category])?;
    debug!(%url, "GET category memos");

    let response = client.http.get(url).send().await?;
    if !response.status().is_success() {
        warn!(category, status = response.status().as_u16(), "category lookup failed");
        return Err(MemoError::UnknownCategory(category.to_string()));
    }

    decode(response).await
}

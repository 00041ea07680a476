use tracing::{debug, info};

use crate::error::Result;
use crate::types::{decode, server_error, ApiClient};

use crate::modules::memos::types::*;

pub async fn list_memos(client: &ApiClient) -> Result<Vec<Memo>> {
    let url = client.url(&["memos"])?;
    debug!(%url, "GET memos");

    let response = client.http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    decode(response).await
}

pub async fn create_memo(client: &ApiClient, content: &str, password: &str) -> Result<Memo> {
    let url = client.url(&["memos"])?;
    debug!(%url, "POST memo");

    let body = CreateMemoPayload {
        content: content.to_string(),
        password: client.encode_password(password),
    };

    let response = client.http.post(url).json(&body).send().await?;
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    let memo: Memo = decode(response).await?;
    info!(id = memo.id, "memo created");

    Ok(memo)
}

pub async fn delete_memo(client: &ApiClient, id: MemoId, password: &str) -> Result<()> {
    let url = client.url(&["memos", &id.to_string()])?;
    debug!(%url, "DELETE memo");

    let body = DeleteMemoPayload {
        password: client.encode_password(password),
    };

    let response = client.http.delete(url).json(&body).send().await?;
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    info!(id, "memo deleted");
    Ok(())
}

pub async fn edit_memo(client: &ApiClient, id: MemoId, content: &str, password: &str) -> Result<()> {
    let url = client.url(&["memos", &id.to_string()])?;
    debug!(%url, "PUT memo");

    let body = EditMemoPayload {
        content: content.to_string(),
        password: client.encode_password(password),
    };

    let response = client.http.put(url).json(&body).send().await?;
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    info!(id, "memo edited");
    Ok(())
}

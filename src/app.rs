use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, warn};

use crate::error::{MemoError, Result, EMPTY_FIELDS, EMPTY_PASSWORD};
use crate::modules::categories::{api as categories_api, types::CategoryMap};
use crate::modules::memos::{
    api as memos_api,
    types::{Memo, MemoId},
};
use crate::types::ApiClient;

/// Where blocking, user-facing messages go.
pub trait Alert {
    fn alert(&self, message: &str);
}

impl<T: Alert + ?Sized> Alert for &T {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Counts the alerts passed through, so a caller can tell whether a failure
/// has already reached the user.
pub struct Tracked<A> {
    inner: A,
    shown: AtomicUsize,
}

impl<A: Alert> Tracked<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            shown: AtomicUsize::new(0),
        }
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::Relaxed)
    }
}

impl<A: Alert> Alert for Tracked<A> {
    fn alert(&self, message: &str) {
        self.shown.fetch_add(1, Ordering::Relaxed);
        self.inner.alert(message);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoForm {
    pub content: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteModal {
    pub memo_id: MemoId,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditModal {
    pub memo_id: MemoId,
    pub content: String,
    pub password: String,
}

/// Everything the view renders. Flags are independent of each other.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub memos: Vec<Memo>,
    pub categories: CategoryMap,
    pub selected_category: Option<String>,
    pub category_memos: Vec<Memo>,
    pub form: MemoForm,
    pub delete_modal: Option<DeleteModal>,
    pub edit_modal: Option<EditModal>,
}

pub struct MemoApp<A: Alert> {
    client: ApiClient,
    alert: A,
    state: AppState,
}

impl<A: Alert> MemoApp<A> {
    pub fn new(client: ApiClient, alert: A) -> Self {
        Self {
            client,
            alert,
            state: AppState::default(),
        }
    }

    /// Resumes from state rendered earlier, e.g. against another client.
    pub fn with_state(client: ApiClient, alert: A, state: AppState) -> Self {
        Self {
            client,
            alert,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn alerts(&self) -> &A {
        &self.alert
    }

    /// Initial load: all memos plus the category map.
    pub async fn load(&mut self) -> Result<()> {
        self.fetch_memos().await?;
        self.fetch_categories().await
    }

    pub async fn fetch_memos(&mut self) -> Result<()> {
        self.state.memos = memos_api::list_memos(&self.client).await?;
        Ok(())
    }

    pub async fn fetch_categories(&mut self) -> Result<()> {
        self.state.categories = categories_api::list_categories(&self.client).await?;
        Ok(())
    }

    /// Shows the memos of `category`. An unknown category keeps whatever was
    /// shown before.
    pub async fn select_category(&mut self, category: &str) -> Result<()> {
        match categories_api::list_category_memos(&self.client, category).await {
            Ok(memos) => {
                self.state.category_memos = memos;
                self.state.selected_category = Some(category.to_string());
                Ok(())
            }
            Err(err) => {
                if let MemoError::UnknownCategory(_) = err {
                    self.alert.alert(&err.alert_text());
                }
                Err(err)
            }
        }
    }

    pub fn clear_category(&mut self) {
        self.state.selected_category = None;
        self.state.category_memos.clear();
    }

    // Memo form

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.state.form.content = content.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.state.form.password = password.into();
    }

    /// Sends the memo form. The form is cleared only when the server accepted
    /// the memo.
    pub async fn submit_memo(&mut self) -> Result<Memo> {
        let MemoForm { content, password } = self.state.form.clone();

        if content.is_empty() || password.is_empty() {
            return Err(self.reject(EMPTY_FIELDS));
        }

        let memo = match memos_api::create_memo(&self.client, &content, &password).await {
            Ok(memo) => memo,
            Err(err) => {
                let message = match &err {
                    MemoError::Server { message, .. } => format!("Save failed: {message}"),
                    _ => err.alert_text(),
                };
                self.alert.alert(&message);
                return Err(err);
            }
        };

        self.state.memos.push(memo.clone());
        self.state.form = MemoForm::default();

        self.refresh_categories().await;

        Ok(memo)
    }

    pub async fn create_memo(&mut self, content: &str, password: &str) -> Result<Memo> {
        self.set_content(content);
        self.set_password(password);
        self.submit_memo().await
    }

    // Delete modal

    pub fn open_delete(&mut self, memo_id: MemoId) {
        self.state.delete_modal = Some(DeleteModal {
            memo_id,
            password: String::new(),
        });
    }

    pub fn set_delete_password(&mut self, password: impl Into<String>) {
        if let Some(modal) = self.state.delete_modal.as_mut() {
            modal.password = password.into();
        }
    }

    pub fn cancel_delete(&mut self) {
        self.state.delete_modal = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(DeleteModal { memo_id, password }) = self.state.delete_modal.clone() else {
            return Err(MemoError::Validation("no memo selected for deletion".into()));
        };

        if password.is_empty() {
            return Err(self.reject(EMPTY_PASSWORD));
        }

        if let Err(err) = memos_api::delete_memo(&self.client, memo_id, &password).await {
            return Err(self.report(err));
        }

        self.state.memos.retain(|memo| memo.id != memo_id);
        self.state.category_memos.retain(|memo| memo.id != memo_id);
        self.state.delete_modal = None;

        self.refresh_all().await;
        Ok(())
    }

    pub async fn delete_memo(&mut self, memo_id: MemoId, password: &str) -> Result<()> {
        self.open_delete(memo_id);
        self.set_delete_password(password);
        self.confirm_delete().await
    }

    // Edit modal

    /// Opens the edit modal pre-filled with the memo's current content.
    pub fn open_edit(&mut self, memo_id: MemoId) -> Result<()> {
        let content = self
            .state
            .memos
            .iter()
            .chain(self.state.category_memos.iter())
            .find(|memo| memo.id == memo_id)
            .map(|memo| memo.content.clone());

        let Some(content) = content else {
            return Err(self.reject(&format!("Memo {memo_id} does not exist.")));
        };

        self.state.edit_modal = Some(EditModal {
            memo_id,
            content,
            password: String::new(),
        });
        Ok(())
    }

    pub fn set_edit_content(&mut self, content: impl Into<String>) {
        if let Some(modal) = self.state.edit_modal.as_mut() {
            modal.content = content.into();
        }
    }

    pub fn set_edit_password(&mut self, password: impl Into<String>) {
        if let Some(modal) = self.state.edit_modal.as_mut() {
            modal.password = password.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.state.edit_modal = None;
    }

    pub async fn confirm_edit(&mut self) -> Result<()> {
        let Some(EditModal {
            memo_id,
            content,
            password,
        }) = self.state.edit_modal.clone()
        else {
            return Err(MemoError::Validation("no memo selected for editing".into()));
        };

        if content.is_empty() || password.is_empty() {
            return Err(self.reject(EMPTY_FIELDS));
        }

        if let Err(err) = memos_api::edit_memo(&self.client, memo_id, &content, &password).await {
            return Err(self.report(err));
        }

        self.state.edit_modal = None;

        self.refresh_all().await;
        Ok(())
    }

    pub async fn edit_memo(&mut self, memo_id: MemoId, content: &str, password: &str) -> Result<()> {
        self.open_edit(memo_id)?;
        self.set_edit_content(content);
        self.set_edit_password(password);
        self.confirm_edit().await
    }

    fn reject(&self, message: &str) -> MemoError {
        self.alert.alert(message);
        MemoError::Validation(message.to_string())
    }

    fn report(&self, err: MemoError) -> MemoError {
        self.alert.alert(&err.alert_text());
        err
    }

    async fn refresh_all(&mut self) {
        if let Err(err) = self.fetch_memos().await {
            warn!(error = %err, "failed to refresh memos");
        }
        self.refresh_categories().await;
    }

    /// Re-reads the category map and the selected category's memos. The
    /// mutation that triggered this already succeeded, so failures are only
    /// logged. A selected category that no longer exists is dropped.
    async fn refresh_categories(&mut self) {
        if let Err(err) = self.fetch_categories().await {
            warn!(error = %err, "failed to refresh categories");
        }

        let Some(category) = self.state.selected_category.clone() else {
            return;
        };

        match categories_api::list_category_memos(&self.client, &category).await {
            Ok(memos) => self.state.category_memos = memos,
            Err(MemoError::UnknownCategory(_)) => {
                info!(%category, "selected category is gone");
                self.clear_category();
            }
            Err(err) => warn!(error = %err, %category, "failed to refresh category memos"),
        }
    }
}

use std::sync::Arc;

use tracker_client::StudentStore;
use tracker_core::form::{FormField, FormMode, StudentForm};
use tracker_core::routes::Route;
use tracker_core::StudentId;
use tracker_events::Notifier;

use super::{MSG_CREATED, MSG_OPERATION_FAILED, MSG_UPDATED};
use crate::error::{AppError, AppResult};

/// Create or edit page around a [`StudentForm`].
pub struct FormPage<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    form: StudentForm,
    loading: bool,
    error: Option<String>,
}

impl<S: StudentStore> FormPage<S> {
    pub fn create(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_form(store, notifier, StudentForm::create())
    }

    pub fn edit(store: Arc<S>, notifier: Arc<dyn Notifier>, id: impl Into<StudentId>) -> Self {
        Self::with_form(store, notifier, StudentForm::edit(id))
    }

    fn with_form(store: Arc<S>, notifier: Arc<dyn Notifier>, form: StudentForm) -> Self {
        Self {
            store,
            notifier,
            form,
            loading: false,
            error: None,
        }
    }

    /// Populate the inputs from the stored record (edit mode only).
    ///
    /// A failed load leaves the form empty.
    pub async fn load(&mut self) -> AppResult<()> {
        let FormMode::Edit(id) = self.form.mode().clone() else {
            return Ok(());
        };
        self.loading = true;
        let result = self.store.read(&id).await;
        self.loading = false;
        match result {
            Ok(record) => {
                self.form.populate(&record);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(student_id = %id, error = %e, "Failed to load student for editing");
                self.error = Some(e.to_string());
                self.notifier.notify_error(MSG_OPERATION_FAILED);
                Err(AppError::fetch(e))
            }
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate and persist.
    ///
    /// An invalid form issues no request. On success the caller should
    /// navigate to the returned route.
    pub async fn submit(&mut self) -> AppResult<Route> {
        let draft = self.form.submit()?;
        self.loading = true;
        let result = match self.form.mode() {
            FormMode::Create => self.store.create(&draft).await.map(|_| MSG_CREATED),
            FormMode::Edit(id) => self.store.update(id, &draft).await.map(|_| MSG_UPDATED),
        };
        self.loading = false;
        match result {
            Ok(message) => {
                self.notifier.notify_success(message);
                Ok(Route::List)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save student");
                self.error = Some(e.to_string());
                self.notifier.notify_error(MSG_OPERATION_FAILED);
                Err(AppError::mutation(e))
            }
        }
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        if self.form.is_edit() {
            "Edit Student"
        } else {
            "Add New Student"
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tracker_client::MemoryStudentStore;
    use tracker_core::{Grade, StudentDraft, StudentRecord};
    use tracker_events::ToastService;

    use super::*;

    fn fill(page: &mut FormPage<MemoryStudentStore>) {
        page.set(FormField::Name, "John Doe");
        page.set(FormField::Class, "10");
        page.set(FormField::Section, "A");
        page.set(FormField::Math, "95");
        page.set(FormField::Science, "90");
        page.set(FormField::English, "92");
    }

    #[tokio::test]
    async fn create_persists_and_returns_to_list() {
        let store = Arc::new(MemoryStudentStore::new());
        let toasts = Arc::new(ToastService::default());
        let mut page = FormPage::create(store.clone(), toasts.clone());
        fill(&mut page);
        assert_eq!(page.form().total(), 277);
        assert_eq!(page.form().grade(), Grade::APlus);

        assert_eq!(page.submit().await.unwrap(), Route::List);
        let saved = store.snapshot().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].total, 277);
        assert_eq!(toasts.active()[0].message, MSG_CREATED);
    }

    #[tokio::test]
    async fn invalid_form_makes_no_request() {
        let store = Arc::new(MemoryStudentStore::new());
        let toasts = Arc::new(ToastService::default());
        let mut page = FormPage::create(store.clone(), toasts.clone());
        page.set(FormField::Name, "J");

        let err = page.submit().await.unwrap_err();
        assert_matches!(err, AppError::Validation(_));
        assert!(page.form().is_field_invalid(FormField::Section));
        assert!(store.snapshot().await.is_empty());
        assert!(toasts.active().is_empty());
    }

    #[tokio::test]
    async fn edit_loads_then_updates() {
        let existing =
            StudentRecord::from_draft("5", StudentDraft::new("Jane Smith", 9, "B", 50, 50, 50));
        let store = Arc::new(MemoryStudentStore::with_records(vec![existing]));
        let toasts = Arc::new(ToastService::default());
        let mut page = FormPage::edit(store.clone(), toasts.clone(), "5");

        page.load().await.unwrap();
        assert_eq!(page.form().value(FormField::Name), "Jane Smith");
        assert_eq!(page.form().grade(), Grade::D);

        page.set(FormField::Math, "100");
        assert_eq!(page.form().total(), 200);
        page.submit().await.unwrap();

        assert_eq!(store.snapshot().await[0].math, 100);
        assert_eq!(toasts.active()[0].message, MSG_UPDATED);
    }

    #[tokio::test]
    async fn edit_of_missing_student_reports_not_found() {
        let store = Arc::new(MemoryStudentStore::new());
        let toasts = Arc::new(ToastService::default());
        let mut page = FormPage::edit(store, toasts.clone(), "42");
        assert_matches!(page.load().await, Err(AppError::NotFound(id)) if id == "42");
        assert_eq!(page.form().value(FormField::Name), "");
    }

    #[tokio::test]
    async fn failed_save_raises_error_toast() {
        let store = Arc::new(MemoryStudentStore::new());
        let toasts = Arc::new(ToastService::default());
        let mut page = FormPage::create(store.clone(), toasts.clone());
        fill(&mut page);
        store.set_failing(true);

        assert_matches!(page.submit().await, Err(AppError::MutationFailure(_)));
        assert_eq!(toasts.active()[0].message, MSG_OPERATION_FAILED);
    }
}

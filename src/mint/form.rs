//! Form controller: field values, inline errors, and the hand-off to the workflow.

use thiserror::Error;

use crate::mint::validation::{parse_form, FieldErrors, FormField, MintFormValues};
use crate::mint::workflow::{MintError, MintResponse, MintWorkflow};

#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failed; nothing was sent to the wallet.
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Mint(#[from] MintError),
}

/// Mint form state owned by the UI layer.
#[derive(Debug)]
pub struct MintForm {
    values: MintFormValues,
    field_errors: FieldErrors,
    workflow: MintWorkflow,
}

impl MintForm {
    pub fn new(workflow: MintWorkflow) -> Self {
        Self {
            values: MintFormValues::default(),
            field_errors: FieldErrors::new(),
            workflow,
        }
    }

    pub fn values(&self) -> &MintFormValues {
        &self.values
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// Update one field. Its inline error goes away until the next submit.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.field_errors.remove(&field);
    }

    pub fn workflow(&self) -> &MintWorkflow {
        &self.workflow
    }

    pub fn is_minting(&self) -> bool {
        self.workflow.is_minting()
    }

    /// Status panel line for the current workflow state.
    pub fn helper_text(&self) -> String {
        self.workflow.state().helper_text().to_string()
    }

    /// Validate, normalize and mint.
    ///
    /// Invalid input populates the field errors and stops. A successful mint
    /// resets the form; a failed one keeps the values so the user can retry.
    pub async fn submit(&mut self) -> Result<MintResponse, FormError> {
        let request = match parse_form(&self.values) {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "Form rejected");
                self.field_errors = errors.clone();
                return Err(FormError::Invalid(errors));
            }
        };
        self.field_errors.clear();

        let response = self.workflow.submit(&request).await?;

        self.values = MintFormValues::default();
        self.field_errors.clear();
        Ok(response)
    }
}

//! Contacts CSV import

use super::heading;
use crate::{
    api_client::ApiClient,
    components::{error_banner, import_results},
};
use tracing::{info, warn};
use voxdial_core::{BulkImportResult, utils::is_csv_file};

/// Path of the contacts page
pub const CONTACTS_PATH: &str = "/dashboard/contacts";

/// Shown when the chosen file is missing or not a CSV
pub const SELECT_CSV_MESSAGE: &str = "Please select a CSV file";

/// State of the upload panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing submitted yet
    Idle,
    /// The file was rejected locally or by the backend
    Failed(String),
    /// The backend processed the file
    Imported(BulkImportResult),
}

/// Check the file name, then send the file to the backend
///
/// Files without a `.csv` extension are rejected without contacting the
/// backend.
pub async fn upload(api: &ApiClient, file_name: Option<&str>, contents: Vec<u8>) -> UploadState {
    let Some(file_name) = file_name.filter(|name| is_csv_file(name)) else {
        return UploadState::Failed(SELECT_CSV_MESSAGE.to_string());
    };

    match api.upload_contacts_csv(file_name, contents).await {
        Ok(result) => {
            info!(
                file_name,
                imported = result.imported,
                failed = result.failed,
                "Contacts imported"
            );
            UploadState::Imported(result)
        }
        Err(e) => {
            warn!(file_name, error = %e, "Contacts import failed");
            UploadState::Failed(e.user_message())
        }
    }
}

/// Render the contacts page body
#[must_use]
pub fn render(state: &UploadState) -> String {
    let outcome = match state {
        UploadState::Idle => String::new(),
        UploadState::Failed(message) => error_banner::render(message, None),
        UploadState::Imported(result) => import_results::render(result),
    };

    format!(
        r#"{heading}
<section class="card">
<h2>Import contacts</h2>
<p>Upload a CSV file with a <code>phone_number</code> column. The optional columns <code>first_name</code>, <code>last_name</code> and <code>email</code> are imported when present.</p>
<form class="form upload-form" method="post" action="{CONTACTS_PATH}" enctype="multipart/form-data" data-busy-label="Uploading..." data-extension=".csv" data-extension-message="{SELECT_CSV_MESSAGE}">
<input type="file" name="file" accept=".csv,text/csv" required>
<p class="form-error" data-upload-error hidden></p>
<button class="btn btn-primary" type="submit">Upload CSV</button>
</form>
</section>
{outcome}"#,
        heading = heading("Contacts", None),
    )
}

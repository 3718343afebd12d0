//! Statement import page and endpoint.
//!
//! The backend owns all of the parsing; this module only gates the upload
//! (file extension and size) before forwarding the bytes as multipart form
//! data, and reports the backend's verdict. The import feature needs an
//! active subscription, so both handlers bounce unsubscribed users to the
//! upgrade page.

use axum::{
    Extension,
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::Alert,
    api::ApiClient,
    auth::{AccessToken, Claims},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner},
    navigation::NavBar,
    shared_templates::render,
};

/// The largest statement file the client will forward to the backend.
pub const MAX_IMPORT_BYTES: usize = 5 * 1024 * 1024;

/// The state needed for importing statements.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// An uploaded statement that passed the local checks.
struct StatementUpload {
    file_name: String,
    data: Vec<u8>,
}

/// Check the file's extension and size without touching the network.
fn validate_upload(file_name: &str, data: Vec<u8>) -> Result<StatementUpload, Error> {
    let has_importable_extension = file_name
        .rsplit_once('.')
        .is_some_and(|(_, extension)| {
            extension.eq_ignore_ascii_case("ofx") || extension.eq_ignore_ascii_case("csv")
        });

    if !has_importable_extension {
        return Err(Error::UnsupportedFileType(file_name.to_owned()));
    }

    if data.len() > MAX_IMPORT_BYTES {
        return Err(Error::FileTooLarge);
    }

    Ok(StatementUpload {
        file_name: file_name.to_owned(),
        data,
    })
}

async fn read_multipart_field(field: Field<'_>) -> Result<StatementUpload, Error> {
    let file_name = field
        .file_name()
        .ok_or_else(|| {
            Error::MultipartError("Could not get file name from multipart form field".to_owned())
        })?
        .to_owned();

    let data = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    validate_upload(&file_name, data.to_vec())
}

/// Route handler for uploading a statement file.
///
/// The file is checked locally (extension, size) and then forwarded to the
/// backend import endpoint, which parses it and creates the transactions.
pub async fn import_statement(
    State(state): State<ImportState>,
    Extension(token): Extension<AccessToken>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Response {
    if !claims.subscription {
        return Error::SubscriptionRequired.into_alert_response();
    }

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return Error::MultipartError("No file was uploaded".to_owned()).into_alert_response();
        }
        Err(error) => {
            tracing::error!("Could not read multipart form: {error}");
            return Error::MultipartError(error.to_string()).into_alert_response();
        }
    };

    let upload = match read_multipart_field(field).await {
        Ok(upload) => upload,
        Err(error) => return error.into_alert_response(),
    };

    match state
        .api
        .import_statement(&token, &upload.file_name, upload.data)
        .await
    {
        Ok(summary) => render(
            StatusCode::CREATED,
            Alert::Success {
                message: "Import completed successfully!".to_owned(),
                details: format!("Imported {} transactions.", summary.imported),
            }
            .into_html(),
        ),
        Err(error) => error.into_alert_response(),
    }
}

/// Route handler for the statement import page.
pub async fn get_import_page(Extension(claims): Extension<Claims>) -> Response {
    if !claims.subscription {
        return Redirect::to(endpoints::SUBSCRIBE_VIEW).into_response();
    }

    import_view().into_response()
}

fn import_form_view() -> Markup {
    let import_route = endpoints::IMPORT;
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(import_route)
            enctype="multipart/form-data"
            hx-disabled-elt="#file, #submit-button"
            hx-indicator="#indicator"
            hx-swap="none"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="file"
                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Choose a statement to upload"
                }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept=".ofx,.csv"
                    placeholder="file"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p
                {
                    "Export your bank statement as OFX or CSV and upload it
                    to automatically import your transactions. Files up to
                    5 MB are accepted."
                }
            }

             button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Upload Statement"
            }
        }
    }
}

fn import_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();
    let form = import_form_view();

    let content = html! {
        (nav_bar)

        div
            class="flex flex-col items-center px-6 py-8 mx-auto lg:py-0
            text-gray-900 dark:text-white"
        {
            div class="relative"
            {
                (form)
            }
        }
    };

    base("Import Transactions", &[], &content)
}

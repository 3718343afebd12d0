//! The HTTP client for the Zentavo backend API.
//!
//! Maps the backend's status codes onto [crate::Error] in one place so
//! every handler surfaces session expiry, subscription gating and backend
//! rejections the same way.

use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Error,
    api::models::{
        Category, CategoryPayload, CategorySummary, ImportSummary, MonthSummary, PaymentLink,
        PaymentMethodSummary, Transaction, TransactionType, TransactionUpdate, User,
    },
    auth::AccessToken,
    endpoints::backend,
};

/// Shown when the backend rejects a request without a readable message.
const GENERIC_REJECTION_MESSAGE: &str = "The server could not process the request.";

/// The response body of the log-in endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// The error body the backend attaches to 400 responses.
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// A thin, typed wrapper around the backend's REST API.
///
/// Cloning is cheap: the underlying [reqwest::Client] holds a shared
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`,
    /// e.g. `https://api.zentavo.app`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange an email/password pair for an access token.
    ///
    /// # Errors
    /// Returns [Error::InvalidCredentials] when the backend rejects the
    /// pair, rather than [Error::SessionExpired], so the log-in form can
    /// show an inline error instead of redirecting to itself.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<AccessToken, Error> {
        let response = self
            .http
            .post(self.url(backend::LOG_IN))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(connection_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidCredentials);
        }

        let response = check_status(response).await?;
        let TokenResponse { token } = read_json(response).await?;

        Ok(AccessToken::new(token))
    }

    /// Ask the backend to email password reset instructions.
    pub async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        let response = self
            .http
            .post(self.url(backend::FORGOT_PASSWORD))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(connection_error)?;

        check_status(response).await.map(|_| ())
    }

    /// Create a new user account.
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<(), Error> {
        let response = self
            .http
            .post(self.url(backend::CREATE_USER))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(connection_error)?;

        check_status(response).await.map(|_| ())
    }

    /// Get the user that owns `token`.
    pub async fn current_user(&self, token: &AccessToken) -> Result<User, Error> {
        self.get_json(token, backend::ME).await
    }

    /// List all of the user's categories.
    pub async fn categories(&self, token: &AccessToken) -> Result<Vec<Category>, Error> {
        self.get_json(token, backend::CATEGORIES).await
    }

    /// Create a category.
    pub async fn create_category(
        &self,
        token: &AccessToken,
        payload: &CategoryPayload,
    ) -> Result<Category, Error> {
        let response = self
            .http
            .post(self.url(backend::CATEGORIES))
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }

    /// Update the category with `category_id`.
    pub async fn update_category(
        &self,
        token: &AccessToken,
        category_id: i64,
        payload: &CategoryPayload,
    ) -> Result<Category, Error> {
        let response = self
            .http
            .put(self.url(&format!("/api/categories/{category_id}")))
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }

    /// Delete the category with `category_id`.
    pub async fn delete_category(
        &self,
        token: &AccessToken,
        category_id: i64,
    ) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.url(&format!("/api/categories/{category_id}")))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(connection_error)?;

        check_status(response).await.map(|_| ())
    }

    /// Get the transactions for `month` (1-12) of `year`.
    pub async fn transactions(
        &self,
        token: &AccessToken,
        month: u8,
        year: i32,
    ) -> Result<Vec<Transaction>, Error> {
        self.get_json(token, &format!("/api/transactions/{month}/{year}"))
            .await
    }

    /// Update the transaction with `transaction_id`.
    pub async fn update_transaction(
        &self,
        token: &AccessToken,
        transaction_id: i64,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .put(self.url(&format!("/api/transactions/{transaction_id}")))
            .bearer_auth(token.as_str())
            .json(update)
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }

    /// Upload a statement file for the backend to parse and import.
    ///
    /// The file has already passed the local extension and size checks;
    /// the backend does all of the parsing and answers 400 when the
    /// statement is malformed.
    pub async fn import_statement(
        &self,
        token: &AccessToken,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<ImportSummary, Error> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_owned())
            .mime_str("application/octet-stream")
            .map_err(|error| Error::MultipartError(error.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url(backend::IMPORT))
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }

    /// Totals per payment method for `month` of `year`.
    pub async fn payment_method_summary(
        &self,
        token: &AccessToken,
        month: u8,
        year: i32,
    ) -> Result<Vec<PaymentMethodSummary>, Error> {
        self.get_json(
            token,
            &format!("/api/transactions/dashboard/payment-methods/{month}/{year}"),
        )
        .await
    }

    /// Totals per category for `month` of `year`, restricted to
    /// `transaction_type`.
    pub async fn category_summary(
        &self,
        token: &AccessToken,
        month: u8,
        year: i32,
        transaction_type: TransactionType,
    ) -> Result<Vec<CategorySummary>, Error> {
        self.get_json(
            token,
            &format!(
                "/api/transactions/dashboard/categories/{month}/{year}/{}",
                transaction_type.as_str()
            ),
        )
        .await
    }

    /// Income/expense totals for the last six months.
    pub async fn last_six_months(&self, token: &AccessToken) -> Result<Vec<MonthSummary>, Error> {
        self.get_json(token, backend::LAST_SIX_MONTHS).await
    }

    /// Ask the payment service for an upgrade link.
    pub async fn create_payment_link(&self, token: &AccessToken) -> Result<PaymentLink, Error> {
        let response = self
            .http
            .post(self.url(backend::PAYMENT_LINK))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<T, Error> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(connection_error)?;

        read_json(check_status(response).await?).await
    }
}

/// Map the backend's error statuses onto [crate::Error].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(Error::SessionExpired),
        StatusCode::FORBIDDEN => Err(Error::SubscriptionRequired),
        StatusCode::NOT_FOUND => Err(Error::NotFound),
        StatusCode::BAD_REQUEST => {
            let message = response
                .json::<ApiMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| GENERIC_REJECTION_MESSAGE.to_owned());

            Err(Error::BackendRejected(message))
        }
        status => {
            tracing::error!("unexpected status {status} from the backend");
            Err(Error::UnexpectedResponse(status.as_u16()))
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status().as_u16();

    response.json().await.map_err(|error| {
        tracing::error!("could not decode the backend response body: {error}");
        Error::UnexpectedResponse(status)
    })
}

fn connection_error(error: reqwest::Error) -> Error {
    tracing::warn!("request to the backend failed: {error}");
    Error::ConnectionFailed
}

//! Alert fragments for displaying success and error messages to users.
//!
//! Every page rendered through [crate::html::base] has an empty
//! `#alert-container` element. Alerts render a replacement for it with
//! `hx-swap-oob` so htmx swaps them in regardless of the request's own
//! swap target.

use maud::{Markup, html};

const SUCCESS_STYLE: &str = "p-4 rounded-lg shadow-lg text-green-800 bg-green-50 \
    border border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_STYLE: &str = "p-4 rounded-lg shadow-lg text-red-800 bg-red-50 \
    border border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// A message to surface to the user after an htmx request.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation succeeded.
    Success {
        /// The headline, e.g. "Import completed successfully!".
        message: String,
        /// Supporting detail shown below the headline.
        details: String,
    },
    /// The operation failed.
    Error {
        /// The headline, e.g. "Import failed".
        message: String,
        /// Supporting detail shown below the headline.
        details: String,
    },
    /// The operation failed and one line says everything there is to say.
    ErrorSimple {
        /// The headline.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an out-of-band replacement for the page's
    /// alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, String::new()),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="text-sm font-medium" { (message) }

                            @if !details.is_empty() {
                                p class="mt-1 text-sm opacity-80" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            onclick="this.closest('#alert-container').remove()"
                            class="text-lg leading-none font-semibold opacity-60 hover:opacity-100"
                        {
                            "\u{00d7}"
                        }
                    }
                }
            }
        }
    }
}

//! The form markup shared by the category create and edit pages.

use maud::{Markup, html};

use crate::{
    api::TransactionType,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values to pre-fill the form with.
pub(super) struct CategoryFormValues<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub category_type: Option<TransactionType>,
}

impl Default for CategoryFormValues<'_> {
    fn default() -> Self {
        Self {
            name: "",
            color: "#3b82f6",
            category_type: None,
        }
    }
}

/// Render the category form.
///
/// Exactly one of `post_endpoint`/`put_endpoint` should be set; it decides
/// whether htmx submits the form as a create or an update.
pub(super) fn category_form_view(
    post_endpoint: Option<&str>,
    put_endpoint: Option<&str>,
    values: &CategoryFormValues,
    error_message: &str,
    submit_label: &str,
) -> Markup {
    html! {
        form
            hx-post=[post_endpoint]
            hx-put=[put_endpoint]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    required
                    autofocus
                    value=(values.name)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="color"
                    class=(FORM_LABEL_STYLE)
                {
                    "Color"
                }

                input
                    id="color"
                    type="color"
                    name="color"
                    value=(values.color)
                    class="h-10 w-20 cursor-pointer rounded border border-gray-300 dark:border-gray-600";
            }

            div
            {
                label
                    for="category_type"
                    class=(FORM_LABEL_STYLE)
                {
                    "Applies to"
                }

                select
                    id="category_type"
                    name="category_type"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[values.category_type.is_none()] {
                        "Income and expenses"
                    }
                    option
                        value="CASH_IN"
                        selected[values.category_type == Some(TransactionType::CashIn)]
                    {
                        "Income only"
                    }
                    option
                        value="CASH_OUT"
                        selected[values.category_type == Some(TransactionType::CashOut)]
                    {
                        "Expenses only"
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}

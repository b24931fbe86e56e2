//! The new bill page and the feedback the submission controller writes to it.

use std::cell::RefCell;

use maud::{Markup, html};

use crate::{
    file::FILE_FORMAT_ERROR_MESSAGE,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HIDDEN_CLASS, base,
    },
};

/// The expense types an employee can choose from.
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Where the submission controller shows its feedback.
pub trait NewBillView {
    /// Show the error next to the file input.
    fn show_file_error(&self, message: &str);

    /// Hide the error next to the file input.
    fn hide_file_error(&self);

    /// Show why the receipt upload failed.
    ///
    /// Shown next to the file input by default, since choosing another file
    /// is how the user recovers.
    fn show_upload_error(&self, message: &str) {
        self.show_file_error(message);
    }

    /// Show why the bill could not be sent.
    fn show_submit_error(&self, message: &str);

    /// Hide the error about sending the bill.
    fn hide_submit_error(&self);
}

impl<T: NewBillView + ?Sized> NewBillView for &T {
    fn show_file_error(&self, message: &str) {
        (**self).show_file_error(message)
    }

    fn hide_file_error(&self) {
        (**self).hide_file_error()
    }

    fn show_upload_error(&self, message: &str) {
        (**self).show_upload_error(message)
    }

    fn show_submit_error(&self, message: &str) {
        (**self).show_submit_error(message)
    }

    fn hide_submit_error(&self) {
        (**self).hide_submit_error()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Feedback {
    file_error: Option<String>,
    submit_error: Option<String>,
}

/// A [NewBillView] that renders the new bill page as HTML.
#[derive(Debug)]
pub struct HtmlNewBillView {
    feedback: RefCell<Feedback>,
}

impl Default for HtmlNewBillView {
    fn default() -> Self {
        Self {
            feedback: RefCell::new(Feedback {
                file_error: None,
                submit_error: None,
            }),
        }
    }
}

impl HtmlNewBillView {
    /// Create a view with no errors showing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the page with the feedback that is currently showing.
    pub fn render(&self) -> Markup {
        let feedback = self.feedback.borrow();

        new_bill_page(
            feedback.file_error.as_deref(),
            feedback.submit_error.as_deref(),
        )
    }
}

impl NewBillView for HtmlNewBillView {
    fn show_file_error(&self, message: &str) {
        self.feedback.borrow_mut().file_error = Some(message.to_owned());
    }

    fn hide_file_error(&self) {
        self.feedback.borrow_mut().file_error = None;
    }

    fn show_submit_error(&self, message: &str) {
        self.feedback.borrow_mut().submit_error = Some(message.to_owned());
    }

    fn hide_submit_error(&self) {
        self.feedback.borrow_mut().submit_error = None;
    }
}

/// The new bill form.
///
/// The file error paragraph is always rendered so it can be toggled; it
/// carries the `hidden` class while `file_error` is `None`.
pub fn new_bill_form(file_error: Option<&str>, submit_error: Option<&str>) -> Markup {
    let file_error_class = match file_error {
        Some(_) => FORM_ERROR_STYLE.to_owned(),
        None => format!("{FORM_ERROR_STYLE} {HIDDEN_CLASS}"),
    };

    html! {
        form
            data-testid="form-new-bill"
            enctype="multipart/form-data"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="expense-type" class=(FORM_LABEL_STYLE) { "Type de dépense" }
                select
                    id="expense-type"
                    name="type"
                    data-testid="expense-type"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for expense_type in EXPENSE_TYPES {
                        option { (expense_type) }
                    }
                }
            }

            div
            {
                label for="expense-name" class=(FORM_LABEL_STYLE) { "Nom de la dépense" }
                input
                    id="expense-name"
                    type="text"
                    name="name"
                    data-testid="expense-name"
                    placeholder="Vol Paris Londres"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="datepicker" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="datepicker"
                    type="date"
                    name="date"
                    data-testid="datepicker"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Montant TTC" }
                input
                    id="amount"
                    type="number"
                    name="amount"
                    data-testid="amount"
                    placeholder="348"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex gap-2"
            {
                div
                {
                    label for="vat" class=(FORM_LABEL_STYLE) { "TVA" }
                    input
                        id="vat"
                        type="number"
                        name="vat"
                        data-testid="vat"
                        placeholder="70"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="pct" class=(FORM_LABEL_STYLE) { "%" }
                    input
                        id="pct"
                        type="number"
                        name="pct"
                        data-testid="pct"
                        placeholder="20"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="commentary" class=(FORM_LABEL_STYLE) { "Commentaire" }
                textarea
                    id="commentary"
                    name="commentary"
                    data-testid="commentary"
                    rows="3"
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            div
            {
                label for="file" class=(FORM_LABEL_STYLE) { "Justificatif" }
                input
                    id="file"
                    type="file"
                    name="file"
                    data-testid="file"
                    accept=".jpg,.jpeg,.png"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p id="fileError" data-testid="fileError" class=(file_error_class)
                {
                    (file_error.unwrap_or(FILE_FORMAT_ERROR_MESSAGE))
                }
            }

            @if let Some(message) = submit_error {
                p data-testid="submit-error" class=(FORM_ERROR_STYLE) { (message) }
            }

            button type="submit" id="btn-send-bill" class=(BUTTON_PRIMARY_STYLE)
            {
                "Envoyer"
            }
        }
    }
}

/// The full new bill page.
pub fn new_bill_page(file_error: Option<&str>, submit_error: Option<&str>) -> Markup {
    let form = new_bill_form(file_error, submit_error);

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold" { "Envoyer une note de frais" }
            (form)
        }
    };

    base("Nouvelle note de frais", &content)
}

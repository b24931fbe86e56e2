use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};
use unicode_segmentation::UnicodeSegmentation;

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_ERROR_STYLE: &str = "text-red-500 text-base";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The class that hides an element until it is needed.
pub const HIDDEN_CLASS: &str = "hidden";

/// The max number of graphemes to display in table cells before truncating
/// and displaying ellipses.
const MAX_CELL_GRAPHEMES: usize = 32;

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Billed" }
                link href="/static/main.css" rel="stylesheet";
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// The page shown in place of a view whose data could not be loaded.
///
/// `message` is shown as is, e.g. "Erreur 404".
pub fn error_view(message: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div
                    data-testid="error-message"
                    class="mx-auto max-w-screen-sm text-center text-3xl font-bold
                        tracking-tight text-gray-900 dark:text-white"
                {
                    (message)
                }
            }
        }
    );

    base("Erreur", &content)
}

/// Format a whole amount with a thousands separator and a euro sign, e.g. "1 234 €".
///
/// `numfmt` formats through `f64`, so amounts beyond [crate::MAX_AMOUNT]
/// lose precision. Bills built with [crate::BillRecord::pending] never exceed it.
pub fn format_amount(amount: i64) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(' ')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    format!("{} €", formatter.fmt_string(amount))
}

/// Shorten `text` to fit in a table cell.
///
/// Returns the text to display, and the full text if it was truncated so it
/// can be shown as a tooltip.
pub fn truncate_for_cell(text: &str) -> (String, Option<&str>) {
    let length = text.graphemes(true).count();

    if length <= MAX_CELL_GRAPHEMES {
        (text.to_owned(), None)
    } else {
        let truncated: String = text.graphemes(true).take(MAX_CELL_GRAPHEMES - 3).collect();
        let truncated = truncated + "...";
        (truncated, Some(text))
    }
}

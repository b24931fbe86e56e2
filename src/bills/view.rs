use maud::{Markup, html};

use crate::{
    bill::BillRecord,
    bills::presenter::{BillList, BillListEntry},
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_amount, truncate_for_cell,
    },
};

/// Where the bills list, or the error that replaces it, is displayed.
pub trait BillsView {
    /// Replace what is displayed with `markup`.
    fn show(&self, markup: Markup);
}

impl<T: BillsView + ?Sized> BillsView for &T {
    fn show(&self, markup: Markup) {
        (**self).show(markup)
    }
}

/// The modal that displays a bill's receipt.
pub trait PreviewSurface {
    /// Open the modal with `markup` as its content.
    fn open(&self, markup: Markup);
}

impl<T: PreviewSurface + ?Sized> PreviewSurface for &T {
    fn open(&self, markup: Markup) {
        (**self).open(markup)
    }
}

/// The bills page with `bills` in list order.
pub fn bills_page(bills: &BillList<'_>) -> Markup {
    let table_row = |entry: BillListEntry<'_>| {
        let bill = entry.bill;
        let (name, full_name) = truncate_for_cell(&bill.name);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (bill.expense_type) }
                td class=(TABLE_CELL_STYLE) title=[full_name] { (name) }
                td class=(TABLE_CELL_STYLE) data-testid="date" { (bill.date) }
                td class=(TABLE_CELL_STYLE) { (format_amount(bill.amount)) }
                td class=(TABLE_CELL_STYLE)
                {
                    span
                        data-testid="status"
                        class={ "px-2 py-1 rounded text-xs font-medium " (entry.status.class) }
                    {
                        (entry.status.label)
                    }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    button
                        type="button"
                        data-testid="icon-eye"
                        data-bill-url=(bill.file_url)
                        aria-label="Voir le justificatif"
                        class="text-blue-600 hover:underline dark:text-blue-500"
                    {
                        "Voir"
                    }
                }
            }
        )
    };

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Mes notes de frais" }

                    button
                        type="button"
                        data-testid="btn-new-bill"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Nouvelle note de frais"
                    }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Nom" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Montant" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Statut" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody data-testid="tbody"
                    {
                        @for entry in bills.iter() {
                            (table_row(entry))
                        }

                        @if bills.is_empty() {
                            tr
                            {
                                td
                                    colspan="6"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "Aucune note de frais pour le moment."
                                }
                            }
                        }
                    }
                }
            }

            div id="modaleFile" class="hidden" {}
        }
    );

    base("Mes notes de frais", &content)
}

/// The receipt of `bill`, shown in the preview modal.
pub fn bill_preview(bill: &BillRecord) -> Markup {
    html!(
        div id="modaleFile" data-testid="modaleFile" role="dialog" aria-label="Justificatif"
        {
            h2 class="mb-4 text-lg font-bold" { "Justificatif" }

            div class="flex justify-center"
            {
                img src=(bill.file_url) alt="Bill" class="max-w-full";
            }
        }
    )
}

#[cfg(test)]
mod bills_view_tests {
    use scraper::{Html, Selector};

    use super::{bill_preview, bills_page};
    use crate::{
        bills::BillList,
        stores::memory::sample_bills,
        test_utils::{assert_valid_html, must_get_by_test_id, parse_html_str, select_all},
    };

    #[test]
    fn renders_a_row_per_bill() {
        let bills = sample_bills();
        let list = BillList::new(&bills);

        let html = parse_html_str(&bills_page(&list).into_string());

        assert_valid_html(&html);
        must_get_by_test_id(&html, "tbody");
        assert_eq!(select_all(&html, "[data-testid=tbody] tr").len(), 4);
        assert_eq!(select_all(&html, "[data-testid=icon-eye]").len(), 4);
    }

    #[test]
    fn renders_new_bill_button() {
        let html = parse_html_str(&bills_page(&BillList::new(&[])).into_string());

        let button = must_get_by_test_id(&html, "btn-new-bill");

        assert_eq!(
            button.text().collect::<String>().trim(),
            "Nouvelle note de frais"
        );
    }

    #[test]
    fn renders_empty_list_message() {
        let html = parse_html_str(&bills_page(&BillList::new(&[])).into_string());

        assert_valid_html(&html);
        assert!(select_all(&html, "[data-testid=icon-eye]").is_empty());
        let text = must_get_by_test_id(&html, "tbody").text().collect::<String>();
        assert!(text.contains("Aucune note de frais"), "got {text}");
    }

    #[test]
    fn renders_amount_status_and_receipt_link() {
        let bills = vec![sample_bills().remove(0)];
        let list = BillList::new(&bills);

        let html = parse_html_str(&bills_page(&list).into_string());

        let row = must_get_by_test_id(&html, "tbody")
            .text()
            .collect::<String>();
        assert!(row.contains("400 €"), "got {row}");
        assert!(row.contains("2004-04-04"), "got {row}");
        assert_eq!(
            must_get_by_test_id(&html, "status")
                .text()
                .collect::<String>()
                .trim(),
            "En attente"
        );
        assert_eq!(
            must_get_by_test_id(&html, "icon-eye")
                .value()
                .attr("data-bill-url"),
            Some(bills[0].file_url.as_str())
        );
    }

    #[test]
    fn truncates_long_names_with_full_name_as_title() {
        let mut bills = vec![sample_bills().remove(0)];
        bills[0].name = "Séminaire annuel de l'équipe commerciale à Lyon".to_owned();
        let list = BillList::new(&bills);

        let html = parse_html_str(&bills_page(&list).into_string());

        let cell = select_all(&html, "td[title]")
            .into_iter()
            .next()
            .expect("No truncated cell found");
        assert_eq!(cell.value().attr("title"), Some(bills[0].name.as_str()));
        assert!(cell.text().collect::<String>().ends_with("..."));
    }

    #[test]
    fn preview_shows_receipt_image() {
        let bill = sample_bills().remove(1);

        let html = Html::parse_fragment(&bill_preview(&bill).into_string());

        let image = html
            .select(&Selector::parse("img").unwrap())
            .next()
            .expect("No image found");
        assert_eq!(image.value().attr("alt"), Some("Bill"));
        assert_eq!(image.value().attr("src"), Some(bill.file_url.as_str()));
    }
}

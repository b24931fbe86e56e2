use std::cmp::Reverse;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    bill::{BillRecord, BillStatus},
    bills::view::{BillsView, PreviewSurface, bill_preview, bills_page},
    html::error_view,
    routing::{Navigator, Route},
    stores::BillStore,
};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// How a bill's status is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    /// The status in French, e.g. "En attente".
    pub label: &'static str,
    /// The CSS classes that color the badge.
    pub class: &'static str,
}

impl From<BillStatus> for StatusBadge {
    fn from(status: BillStatus) -> Self {
        let class = match status {
            BillStatus::Pending => "bg-yellow-100 text-yellow-800",
            BillStatus::Accepted => "bg-green-100 text-green-800",
            BillStatus::Refused => "bg-red-100 text-red-800",
        };

        Self {
            label: status.label(),
            class,
        }
    }
}

/// A bill as it appears in the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillListEntry<'a> {
    /// The bill being displayed.
    pub bill: &'a BillRecord,
    /// The bill's status badge.
    pub status: StatusBadge,
}

/// Bills in display order: newest first, with bills on the same day kept in
/// the order they were given.
///
/// Bills whose date is not a `YYYY-MM-DD` date are listed last.
#[derive(Debug, Clone)]
pub struct BillList<'a> {
    bills: &'a [BillRecord],
    order: Vec<usize>,
}

impl<'a> BillList<'a> {
    /// Sort `bills` for display.
    pub fn new(bills: &'a [BillRecord]) -> Self {
        let dates: Vec<Option<Date>> = bills
            .iter()
            .map(|bill| Date::parse(&bill.date, DATE_FORMAT).ok())
            .collect();

        let mut order: Vec<usize> = (0..bills.len()).collect();
        // Stable, and `None` sorts after every date once reversed.
        order.sort_by_key(|&index| Reverse(dates[index]));

        Self { bills, order }
    }

    /// The entries in display order. Each call starts from the first entry.
    pub fn iter(&self) -> impl Iterator<Item = BillListEntry<'a>> + '_ {
        self.order.iter().map(|&index| {
            let bill = &self.bills[index];

            BillListEntry {
                bill,
                status: StatusBadge::from(bill.status),
            }
        })
    }

    /// The number of bills in the list.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the list has no bills.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Displays the employee's bills and reacts to actions on the list.
pub struct BillsPresenter<V, M, N> {
    view: V,
    preview: M,
    navigator: N,
}

impl<V, M, N> BillsPresenter<V, M, N>
where
    V: BillsView,
    M: PreviewSurface,
    N: Navigator,
{
    /// Create a presenter that displays the list on `view` and receipts on `preview`.
    pub fn new(view: V, preview: M, navigator: N) -> Self {
        Self {
            view,
            preview,
            navigator,
        }
    }

    /// Sort `bills` newest first and display them.
    pub fn render<'a>(&self, bills: &'a [BillRecord]) -> BillList<'a> {
        let list = BillList::new(bills);
        self.view.show(bills_page(&list));
        tracing::debug!("Displayed {} bills", list.len());

        list
    }

    /// Open the receipt of the entry's bill in the preview modal.
    pub fn on_preview_requested(&self, entry: &BillListEntry<'_>) {
        self.preview.open(bill_preview(entry.bill));
    }

    /// Display the error's message in place of the list.
    pub fn on_list_fetch_failed(&self, error: &Error) {
        tracing::error!("Could not display bills: {error}");
        self.view.show(error_view(&error.user_message()));
    }

    /// Fetch the bills from `store` and display them, or the fetch error.
    ///
    /// Returns the number of bills displayed.
    ///
    /// # Errors
    /// Returns [Error::ListFetch] if the store could not list the bills.
    pub async fn load(&self, store: &impl BillStore) -> Result<usize, Error> {
        match store.list().await {
            Ok(bills) => Ok(self.render(&bills).len()),
            Err(error) => {
                let error = Error::ListFetch(error);
                self.on_list_fetch_failed(&error);

                Err(error)
            }
        }
    }

    /// Display the new bill page.
    pub fn on_new_bill_requested(&self) {
        self.navigator.navigate(Route::NewBill);
    }
}

#[cfg(test)]
mod bills_presenter_tests {
    use super::{BillList, BillsPresenter, StatusBadge};
    use crate::{
        Error,
        bill::{BillRecord, BillStatus},
        routing::Route,
        stores::{MemoryStore, StoreError, memory::sample_bills},
        test_utils::{
            RecordingNavigator, RecordingSurface, assert_valid_html, must_get_by_test_id,
            parse_html_str, select_all,
        },
    };

    fn bill(name: &str, date: &str) -> BillRecord {
        BillRecord {
            name: name.to_owned(),
            date: date.to_owned(),
            ..sample_bills().remove(0)
        }
    }

    fn names(list: &BillList<'_>) -> Vec<String> {
        list.iter().map(|entry| entry.bill.name.clone()).collect()
    }

    fn presenter<'a>(
        view: &'a RecordingSurface,
        preview: &'a RecordingSurface,
    ) -> BillsPresenter<&'a RecordingSurface, &'a RecordingSurface, RecordingNavigator> {
        BillsPresenter::new(view, preview, RecordingNavigator::new())
    }

    #[test]
    fn distinct_dates_are_listed_newest_first() {
        let bills = vec![
            bill("b", "2002-02-02"),
            bill("d", "2004-04-04"),
            bill("a", "2001-01-01"),
            bill("c", "2003-03-03"),
        ];

        let list = BillList::new(&bills);

        assert_eq!(names(&list), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn bills_on_the_same_day_keep_input_order() {
        let bills = vec![
            bill("test2", "2002-02-02"),
            bill("test1", "2003-03-03"),
            bill("encore", "2004-04-04"),
            bill("test3", "2003-03-03"),
        ];

        let list = BillList::new(&bills);

        assert_eq!(names(&list), vec!["encore", "test1", "test3", "test2"]);
    }

    #[test]
    fn dates_are_non_increasing_for_any_input_order() {
        let mut bills = vec![
            bill("a", "2021-12-31"),
            bill("b", "2022-01-01"),
            bill("c", "2021-12-31"),
            bill("d", "1999-06-15"),
            bill("e", "2022-01-01"),
            bill("f", "2020-02-29"),
        ];

        for _ in 0..bills.len() {
            bills.rotate_left(1);
            let list = BillList::new(&bills);

            let dates: Vec<&str> = list.iter().map(|entry| entry.bill.date.as_str()).collect();
            assert!(
                dates.windows(2).all(|pair| pair[0] >= pair[1]),
                "dates out of order: {dates:?}"
            );
        }
    }

    #[test]
    fn unparsable_dates_are_listed_last_in_input_order() {
        let bills = vec![
            bill("bad1", "hier"),
            bill("old", "2001-01-01"),
            bill("bad2", ""),
            bill("new", "2002-02-02"),
        ];

        let list = BillList::new(&bills);

        assert_eq!(names(&list), vec!["new", "old", "bad1", "bad2"]);
    }

    #[test]
    fn iterating_twice_yields_the_same_entries() {
        let bills = sample_bills();
        let list = BillList::new(&bills);

        let first: Vec<_> = list.iter().collect();
        let second: Vec<_> = list.iter().collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn entries_carry_status_badge() {
        let bills = sample_bills();
        let list = BillList::new(&bills);

        let labels: Vec<&str> = list.iter().map(|entry| entry.status.label).collect();

        assert_eq!(labels, vec!["En attente", "Refusé", "Accepté", "Accepté"]);
        assert_eq!(
            StatusBadge::from(BillStatus::Refused).class,
            "bg-red-100 text-red-800"
        );
    }

    #[test]
    fn render_displays_rows_in_list_order() {
        let view = RecordingSurface::new();
        let preview = RecordingSurface::new();
        let bills = vec![
            bill("b", "2002-02-02"),
            bill("d", "2004-04-04"),
            bill("a", "2001-01-01"),
            bill("c", "2003-03-03"),
        ];

        let list = presenter(&view, &preview).render(&bills);

        let html = parse_html_str(&view.last().expect("Nothing was displayed"));
        assert_valid_html(&html);
        let dates: Vec<String> = select_all(&html, "[data-testid=date]")
            .into_iter()
            .map(|cell| cell.text().collect())
            .collect();
        assert_eq!(
            dates,
            vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
        );
        assert_eq!(list.len(), 4);
        assert!(preview.shown().is_empty());
    }

    #[test]
    fn rendering_the_same_bills_twice_is_identical() {
        let view = RecordingSurface::new();
        let preview = RecordingSurface::new();
        let presenter = presenter(&view, &preview);
        let bills = sample_bills();

        presenter.render(&bills);
        presenter.render(&bills);

        let shown = view.shown();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0], shown[1]);
    }

    #[test]
    fn preview_opens_receipt() {
        let view = RecordingSurface::new();
        let preview = RecordingSurface::new();
        let presenter = presenter(&view, &preview);
        let bills = sample_bills();
        let list = presenter.render(&bills);
        let entry = list.iter().next().expect("List is empty");

        presenter.on_preview_requested(&entry);

        let html = parse_html_str(&preview.last().expect("Preview was not opened"));
        let image = select_all(&html, "img")
            .into_iter()
            .next()
            .expect("No image in preview");
        assert_eq!(image.value().attr("alt"), Some("Bill"));
        assert_eq!(
            image.value().attr("src"),
            Some("https://localhost:3456/images/facture-encore.jpg")
        );
        assert_eq!(view.shown().len(), 1);
    }

    #[test]
    fn fetch_failure_is_displayed_verbatim() {
        for message in ["Erreur 404", "Erreur 500"] {
            let view = RecordingSurface::new();
            let preview = RecordingSurface::new();

            presenter(&view, &preview)
                .on_list_fetch_failed(&Error::ListFetch(StoreError::new(message)));

            let html = parse_html_str(&view.last().expect("Nothing was displayed"));
            let text = must_get_by_test_id(&html, "error-message")
                .text()
                .collect::<String>();
            assert_eq!(text.trim(), message);
        }
    }

    #[tokio::test]
    async fn load_displays_fetched_bills() {
        let store = MemoryStore::with_bills(sample_bills());
        let view = RecordingSurface::new();
        let preview = RecordingSurface::new();

        let count = presenter(&view, &preview).load(&store).await;

        assert_eq!(count, Ok(4));
        let html = parse_html_str(&view.last().expect("Nothing was displayed"));
        must_get_by_test_id(&html, "tbody");
        assert_eq!(select_all(&html, "[data-testid=icon-eye]").len(), 4);
    }

    #[tokio::test]
    async fn load_displays_fetch_errors() {
        for message in ["Erreur 404", "Erreur 500"] {
            let store = MemoryStore::with_bills(sample_bills());
            store.fail_next_list(StoreError::new(message));
            let view = RecordingSurface::new();
            let preview = RecordingSurface::new();

            let result = presenter(&view, &preview).load(&store).await;

            assert_eq!(result, Err(Error::ListFetch(StoreError::new(message))));
            let html = parse_html_str(&view.last().expect("Nothing was displayed"));
            let text = must_get_by_test_id(&html, "error-message")
                .text()
                .collect::<String>();
            assert_eq!(text.trim(), message);
        }
    }

    #[test]
    fn new_bill_button_navigates_to_new_bill_page() {
        let view = RecordingSurface::new();
        let preview = RecordingSurface::new();
        let navigator = RecordingNavigator::new();
        let presenter = BillsPresenter::new(&view, &preview, navigator.clone());

        presenter.on_new_bill_requested();

        assert_eq!(navigator.visited(), vec![Route::NewBill]);
    }
}

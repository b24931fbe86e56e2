use scraper::{ElementRef, Html, Selector};

pub(crate) fn parse_html_str(text: &str) -> Html {
    Html::parse_document(text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
pub(crate) fn must_get_by_test_id<'a>(html: &'a Html, test_id: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("[data-testid=\"{test_id}\"]"))
        .expect("Could not parse test ID selector");

    html.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No element with data-testid=\"{test_id}\" found"))
}

#[track_caller]
pub(crate) fn select_all<'a>(html: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(selector).expect("Could not parse selector");

    html.select(&selector).collect()
}

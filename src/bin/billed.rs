use std::{cell::RefCell, fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use maud::Markup;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use billed::{
    BillsPresenter, BillsView, FileSelectionOutcome, HtmlNewBillView, LocalStorageSession,
    MemoryStorage, NewBillForm, PreviewSurface, Route, SelectedFile, SubmissionController,
    SubmitOutcome, UploadPolicy, User,
    stores::{MemoryStore, memory::sample_bills},
};

/// Submits one bill against an in-memory store and prints the resulting bills page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The email of the employee sending the bill.
    #[arg(long, default_value = "a@a")]
    email: String,

    /// File path to the receipt to upload.
    #[arg(long)]
    file: PathBuf,

    /// The MIME type of the receipt.
    #[arg(long, default_value = "image/jpeg")]
    content_type: String,

    /// The new bill form as an urlencoded body, e.g. "name=Vol&amount=348&date=2022-04-04".
    #[arg(long, default_value = "")]
    form: String,

    /// Only accept receipts whose name ends with an image extension.
    #[arg(long)]
    strict_extensions: bool,

    /// File path to write the bills page to. Printed to stdout if omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Keeps the last page shown so it can be written out once the run is over.
#[derive(Default)]
struct LastPage(RefCell<Option<Markup>>);

impl BillsView for LastPage {
    fn show(&self, markup: Markup) {
        self.0.replace(Some(markup));
    }
}

impl PreviewSurface for LastPage {
    fn open(&self, markup: Markup) {
        self.0.replace(Some(markup));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let form = match NewBillForm::from_urlencoded(&args.form) {
        Ok(form) => form,
        Err(error) => {
            tracing::error!("Could not parse the form \"{}\": {error}", args.form);
            return ExitCode::FAILURE;
        }
    };

    let bytes = match fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read {}: {error}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let session = LocalStorageSession::new(MemoryStorage::new());
    if let Err(error) = session.sign_in(&User::employee(&args.email)) {
        tracing::error!("Could not sign in {}: {error}", args.email);
        return ExitCode::FAILURE;
    }

    let policy = if args.strict_extensions {
        UploadPolicy::strict()
    } else {
        UploadPolicy::default()
    };

    let store = MemoryStore::with_bills(sample_bills());
    let new_bill_view = HtmlNewBillView::new();
    let navigated_to = RefCell::new(None);
    let navigator = |route: Route| {
        tracing::info!("Navigating to {route} ({})", route.path());
        navigated_to.replace(Some(route));
    };

    let controller = SubmissionController::new(&store, &session, &navigator, &new_bill_view)
        .with_policy(policy);

    let selection = controller
        .on_file_selected(SelectedFile::new(&file_name, &args.content_type, bytes))
        .await;

    let submitted = match selection {
        FileSelectionOutcome::Ready(_) => {
            controller.on_submit(&form).await == SubmitOutcome::Submitted
        }
        outcome => {
            tracing::warn!("The receipt was not uploaded: {outcome:?}");
            false
        }
    };

    let page = if *navigated_to.borrow() == Some(Route::Bills) {
        let surface = LastPage::default();
        let presenter = BillsPresenter::new(&surface, &surface, &navigator);

        match presenter.load(&store).await {
            Ok(count) => tracing::info!("Listed {count} bills"),
            Err(error) => tracing::error!("Could not list bills: {error}"),
        }

        surface.0.take()
    } else {
        Some(new_bill_view.render())
    };

    let html = page.map(Markup::into_string).unwrap_or_default();

    match &args.out {
        Some(path) => {
            if let Err(error) = fs::write(path, html) {
                tracing::error!("Could not write {}: {error}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => println!("{html}"),
    }

    if submitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}

//! An in-memory [BillStore] that stands in for the remote store in tests and demos.

use std::cell::{Cell, RefCell};

use crate::{
    bill::{BillRecord, BillStatus},
    file::FormData,
    stores::{BillStore, CreatedBill, StoreError, UpdateRequest},
};

/// The URL prefix for uploaded files.
pub const DEFAULT_FILE_BASE_URL: &str = "https://localhost:3456/images";

/// The key given to the first uploaded receipt.
const FIRST_KEY: u64 = 1234;

#[derive(Debug, Clone)]
struct StoredBill {
    key: String,
    /// `None` until the bill for an uploaded receipt is sent with an update.
    bill: Option<BillRecord>,
}

/// Keeps bills in memory.
///
/// Failures can be scripted with the `fail_next_*` methods; each scripted
/// failure is returned by the next matching call only.
#[derive(Debug)]
pub struct MemoryStore {
    bills: RefCell<Vec<StoredBill>>,
    file_base_url: String,
    next_key: Cell<u64>,
    create_calls: Cell<usize>,
    update_selectors: RefCell<Vec<String>>,
    create_failure: RefCell<Option<StoreError>>,
    update_failure: RefCell<Option<StoreError>>,
    list_failure: RefCell<Option<StoreError>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            bills: RefCell::new(Vec::new()),
            file_base_url: DEFAULT_FILE_BASE_URL.to_owned(),
            next_key: Cell::new(FIRST_KEY),
            create_calls: Cell::new(0),
            update_selectors: RefCell::new(Vec::new()),
            create_failure: RefCell::new(None),
            update_failure: RefCell::new(None),
            list_failure: RefCell::new(None),
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bills`.
    pub fn with_bills(bills: Vec<BillRecord>) -> Self {
        let store = Self::default();
        store.bills.replace(
            bills
                .into_iter()
                .enumerate()
                .map(|(index, bill)| StoredBill {
                    key: format!("seed-{index}"),
                    bill: Some(bill),
                })
                .collect(),
        );

        store
    }

    /// Make the next [BillStore::create] call fail with `error`.
    pub fn fail_next_create(&self, error: StoreError) {
        self.create_failure.replace(Some(error));
    }

    /// Make the next [BillStore::update] call fail with `error`.
    pub fn fail_next_update(&self, error: StoreError) {
        self.update_failure.replace(Some(error));
    }

    /// Make the next [BillStore::list] call fail with `error`.
    pub fn fail_next_list(&self, error: StoreError) {
        self.list_failure.replace(Some(error));
    }

    /// The number of times [BillStore::create] was called.
    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    /// The selectors of every [BillStore::update] call, in call order.
    pub fn update_selectors(&self) -> Vec<String> {
        self.update_selectors.borrow().clone()
    }

    /// The bill stored under `key`, if it has been sent.
    pub fn get(&self, key: &str) -> Option<BillRecord> {
        self.bills
            .borrow()
            .iter()
            .find(|stored| stored.key == key)
            .and_then(|stored| stored.bill.clone())
    }
}

impl BillStore for MemoryStore {
    async fn create(&self, payload: FormData) -> Result<CreatedBill, StoreError> {
        self.create_calls.set(self.create_calls.get() + 1);

        if let Some(error) = self.create_failure.take() {
            return Err(error);
        }

        let file = payload
            .file("file")
            .ok_or_else(|| StoreError::new("Erreur 400"))?;

        let key = self.next_key.get();
        self.next_key.set(key + 1);
        let key = key.to_string();
        let file_url = format!("{}/{}", self.file_base_url, file.name);

        tracing::debug!(
            "Stored receipt '{}' ({} bytes) for {:?} under key {key}",
            file.name,
            file.bytes.len(),
            payload.text("email"),
        );

        self.bills.borrow_mut().push(StoredBill {
            key: key.clone(),
            bill: None,
        });

        Ok(CreatedBill { file_url, key })
    }

    async fn update(&self, request: UpdateRequest) -> Result<(), StoreError> {
        self.update_selectors
            .borrow_mut()
            .push(request.selector.clone());

        if let Some(error) = self.update_failure.take() {
            return Err(error);
        }

        let bill: BillRecord = serde_json::from_str(&request.data).map_err(|error| {
            tracing::debug!("Rejected bill update with invalid JSON: {error}");
            StoreError::new("Erreur 400")
        })?;

        let mut bills = self.bills.borrow_mut();
        let stored = bills
            .iter_mut()
            .find(|stored| stored.key == request.selector)
            .ok_or_else(|| StoreError::new("Erreur 404"))?;
        stored.bill = Some(bill);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        if let Some(error) = self.list_failure.take() {
            return Err(error);
        }

        Ok(self
            .bills
            .borrow()
            .iter()
            .filter_map(|stored| stored.bill.clone())
            .collect())
    }
}

/// Four bills for the employee `a@a`, two of which share a date.
pub fn sample_bills() -> Vec<BillRecord> {
    vec![
        sample_bill("encore", "Hôtel et logement", "2004-04-04", 400, BillStatus::Pending),
        sample_bill("test1", "Services en ligne", "2003-03-03", 100, BillStatus::Refused),
        sample_bill("test3", "Services en ligne", "2003-03-03", 300, BillStatus::Accepted),
        sample_bill("test2", "Restaurants et bars", "2002-02-02", 200, BillStatus::Accepted),
    ]
}

fn sample_bill(
    name: &str,
    expense_type: &str,
    date: &str,
    amount: i64,
    status: BillStatus,
) -> BillRecord {
    BillRecord {
        email: "a@a".to_owned(),
        expense_type: expense_type.to_owned(),
        name: name.to_owned(),
        amount,
        date: date.to_owned(),
        vat: (amount / 5).to_string(),
        pct: 20,
        commentary: String::new(),
        file_url: format!("{DEFAULT_FILE_BASE_URL}/facture-{name}.jpg"),
        file_name: format!("facture-{name}.jpg"),
        status,
    }
}

//! # List Manager
//!
//! View state for the food list and its create/edit form.
//!
//! Every transition is a synchronous method, so the awkward interleavings
//! (a stale list response landing late, a second submit while one is in
//! flight) can be driven step by step. The async `refresh` / `submit` /
//! `delete_confirmed` drivers run one full round-trip against a [`FoodApi`].
//!
//! Two guards that the interactive flow depends on:
//! - a mutation guard: while one create/update/delete is outstanding,
//!   another cannot start;
//! - refresh sequencing: each list fetch carries a monotonically increasing
//!   token, and a completion older than the newest applied one is discarded.

use food_core::{FieldErrors, Food, FoodPatch, NewFood};
use serde_json::Value;

use crate::api::{ApiError, FoodApi};

/// Editable form fields, keyed the same way the server keys its errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Calories,
    Price,
    AvailableDate,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Calories => "calories",
            Field::Price => "price",
            Field::AvailableDate => "available_date",
        }
    }
}

/// What the user has typed so far. All raw strings, exactly as an input box
/// holds them; numbers are coerced at submit time. A present `id` means the
/// draft edits an existing record, an absent one means it creates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub calories: String,
    pub price: String,
    pub available_date: String,
}

impl Draft {
    fn from_food(food: &Food) -> Self {
        Self {
            id: Some(food.id),
            name: food.name.clone(),
            category: food.category.clone(),
            calories: food.calories.to_string(),
            price: format!("{:.2}", food.price),
            available_date: food.available_date.to_string(),
        }
    }

    /// Coerce the typed values into a request payload. Empty fields are
    /// omitted (create reports them as required, update leaves them
    /// untouched); a numeric field that does not parse is a local error.
    fn coerce(&self) -> Result<PendingSubmit, FieldErrors> {
        let mut errors = FieldErrors::new();

        let some = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());

        let calories = match self.calories.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.insert(
                        "calories".to_string(),
                        vec!["The calories field must be an integer.".to_string()],
                    );
                    None
                }
            },
        };
        let price = match self.price.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.insert(
                        "price".to_string(),
                        vec!["The price field must be a number.".to_string()],
                    );
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let name = some(&self.name).map(Value::from);
        let category = some(&self.category).map(Value::from);
        let available_date = some(&self.available_date).map(Value::from);
        let calories = calories.map(Value::from);
        let price = price.map(Value::from);

        match self.id {
            Some(id) => Ok(PendingSubmit::Update(
                id,
                FoodPatch {
                    name,
                    category,
                    calories,
                    price,
                    available_date,
                },
            )),
            None => Ok(PendingSubmit::Create(NewFood {
                name,
                category,
                calories,
                price,
                available_date,
            })),
        }
    }
}

/// A coerced submit, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSubmit {
    Create(NewFood),
    Update(i64, FoodPatch),
}

#[derive(Debug, Default)]
struct Form {
    draft: Draft,
    field_errors: FieldErrors,
}

#[derive(Debug, Default)]
pub struct ListManager {
    collection: Vec<Food>,
    loading: bool,
    form: Option<Form>,
    notice: Option<String>,
    refresh_seq: u64,
    applied_seq: u64,
    mutation_in_flight: bool,
    pending_delete: Option<i64>,
}

impl ListManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── View accessors ──────────────────────────────────────────

    pub fn collection(&self) -> &[Food] {
        &self.collection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.form
            .as_ref()
            .is_some_and(|form| form.draft.id.is_some())
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.form.as_ref().map(|form| &form.draft)
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.form.as_ref().map(|form| &form.field_errors)
    }

    /// The single non-field-specific failure notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn mutation_in_flight(&self) -> bool {
        self.mutation_in_flight
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    // ── Form transitions ────────────────────────────────────────

    /// Open an empty create form, dropping any previous draft and errors.
    ///
    /// Opening or closing a form also drops the generic failure notice: it
    /// reports on the previous interaction and does not outlive it.
    pub fn open_create(&mut self) {
        self.notice = None;
        self.form = Some(Form::default());
    }

    /// Open an edit form pre-filled with a copy of the record's fields.
    /// Drops the failure notice like [`Self::open_create`].
    pub fn open_edit(&mut self, food: &Food) {
        self.notice = None;
        self.form = Some(Form {
            draft: Draft::from_food(food),
            field_errors: FieldErrors::new(),
        });
    }

    pub fn close_form(&mut self) {
        self.notice = None;
        self.form = None;
    }

    /// Merge one typed value into the draft. Errors on that field are
    /// cleared right away; nothing is re-validated until the next submit.
    pub fn set_field(&mut self, field: Field, value: &str) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match field {
            Field::Name => form.draft.name = value.to_string(),
            Field::Category => form.draft.category = value.to_string(),
            Field::Calories => form.draft.calories = value.to_string(),
            Field::Price => form.draft.price = value.to_string(),
            Field::AvailableDate => form.draft.available_date = value.to_string(),
        }

        form.field_errors.remove(field.key());
    }

    // ── List refresh ────────────────────────────────────────────

    /// Start a list fetch and hand back its sequencing token.
    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_seq += 1;
        self.loading = true;
        self.refresh_seq
    }

    /// Apply a list result, unless a newer fetch already landed.
    pub fn finish_refresh(&mut self, token: u64, result: Result<Vec<Food>, ApiError>) {
        if token == self.refresh_seq {
            self.loading = false;
        }

        if token <= self.applied_seq {
            return;
        }

        match result {
            Ok(foods) => {
                self.applied_seq = token;
                self.collection = foods;
            }
            Err(error) => self.notice = Some(error.to_string()),
        }
    }

    // ── Submit ──────────────────────────────────────────────────

    /// Coerce the draft and claim the mutation guard. Returns `None` when
    /// no form is open, another mutation is outstanding, or a numeric field
    /// fails to coerce (which leaves a local error on that field).
    pub fn begin_submit(&mut self) -> Option<PendingSubmit> {
        if self.mutation_in_flight || self.form.is_none() {
            return None;
        }

        self.notice = None;
        let form = self.form.as_mut()?;
        form.field_errors.clear();

        match form.draft.coerce() {
            Ok(pending) => {
                self.mutation_in_flight = true;
                Some(pending)
            }
            Err(errors) => {
                form.field_errors = errors;
                None
            }
        }
    }

    /// Release the guard and fold the outcome back in. Returns true when
    /// the mutation succeeded and the collection should be re-fetched.
    pub fn finish_submit(&mut self, outcome: Result<Food, ApiError>) -> bool {
        self.mutation_in_flight = false;

        match outcome {
            Ok(_) => {
                self.form = None;
                true
            }
            Err(ApiError::Validation(errors)) => {
                if let Some(form) = self.form.as_mut() {
                    form.field_errors = errors;
                }
                false
            }
            Err(error) => {
                self.notice = Some(error.to_string());
                false
            }
        }
    }

    // ── Delete ──────────────────────────────────────────────────

    /// Stage a delete; nothing is dispatched until it is confirmed.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the staged delete and claim the mutation guard.
    pub fn begin_confirmed_delete(&mut self) -> Option<i64> {
        if self.mutation_in_flight {
            return None;
        }

        let id = self.pending_delete.take()?;
        self.notice = None;
        self.mutation_in_flight = true;
        Some(id)
    }

    /// Returns true when the delete succeeded and the collection should be
    /// re-fetched; a failure leaves the collection as it was.
    pub fn finish_delete(&mut self, outcome: Result<(), ApiError>) -> bool {
        self.mutation_in_flight = false;

        match outcome {
            Ok(()) => true,
            Err(error) => {
                self.notice = Some(error.to_string());
                false
            }
        }
    }

    // ── Async drivers ───────────────────────────────────────────

    /// Fetch the list and replace the collection. This is the only way the
    /// collection ever changes.
    pub async fn refresh<A: FoodApi + ?Sized>(&mut self, api: &A) {
        let token = self.begin_refresh();
        let result = api.list().await;
        self.finish_refresh(token, result);
    }

    /// Dispatch the open form as a create or update, then reconcile on
    /// success.
    pub async fn submit<A: FoodApi + ?Sized>(&mut self, api: &A) {
        let Some(pending) = self.begin_submit() else {
            return;
        };

        let outcome = match &pending {
            PendingSubmit::Create(food) => api.create(food).await,
            PendingSubmit::Update(id, patch) => api.update(*id, patch).await,
        };

        if self.finish_submit(outcome) {
            self.refresh(api).await;
        }
    }

    /// Dispatch the staged delete, then reconcile on success.
    pub async fn delete_confirmed<A: FoodApi + ?Sized>(&mut self, api: &A) {
        let Some(id) = self.begin_confirmed_delete() else {
            return;
        };

        if self.finish_delete(api.delete(id).await) {
            self.refresh(api).await;
        }
    }
}

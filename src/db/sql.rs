//! Positional-parameter clause builders.
//!
//! Both builders return a [`SqlFragment`]: clause text containing only fixed
//! column names and `$N` placeholders, plus the values bound to those
//! placeholders in order. Untrusted data only ever travels in `values`.

use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::db::error::RepoError;

/// Public field name -> storage column name, for fields whose names differ.
///
/// Fields missing from the map are used as the column name unchanged.
pub type FieldNameMap = &'static [(&'static str, &'static str)];

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i32),
    Text(String),
    /// Sent as text and cast back at the placeholder, so scale survives (`0.0` stays `0.0`)
    Decimal(Decimal),
}

impl BindValue {
    /// Cast appended to this value's placeholder
    fn cast(&self) -> &'static str {
        match self {
            BindValue::Decimal(_) => "::NUMERIC",
            BindValue::Int(_) | BindValue::Text(_) => "",
        }
    }
}

/// Clause text and the values for its placeholders; `values[N - 1]` binds `$N`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub values: Vec<BindValue>,
}

impl SqlFragment {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Placeholder index for the first parameter appended after this fragment
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` clause for a partial update.
///
/// `changes` is consumed in order, so the `N`th change becomes `column = $N`
/// and its value lands at `values[N - 1]`.
///
/// # Errors
/// - `RepoError::EmptyInput` when `changes` is empty
pub fn sql_for_partial_update(
    changes: Vec<(&'static str, BindValue)>,
    field_names: FieldNameMap,
) -> Result<SqlFragment, RepoError> {
    if changes.is_empty() {
        return Err(RepoError::EmptyInput);
    }

    let mut columns = Vec::with_capacity(changes.len());
    let mut values = Vec::with_capacity(changes.len());

    for (idx, (field, value)) in changes.into_iter().enumerate() {
        columns.push(format!(
            "{} = ${}{}",
            column_name(field, field_names),
            idx + 1,
            value.cast()
        ));
        values.push(value);
    }

    Ok(SqlFragment {
        clause: columns.join(", "),
        values,
    })
}

fn column_name(field: &'static str, field_names: FieldNameMap) -> &'static str {
    field_names
        .iter()
        .find(|(public, _)| *public == field)
        .map(|(_, column)| *column)
        .unwrap_or(field)
}

/// Accumulates conjunctive `WHERE` predicates, numbering placeholders from 1
#[derive(Debug, Default)]
pub struct FilterBuilder {
    predicates: Vec<String>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, column: &'static str, operator: &str, value: BindValue) {
        let cast = value.cast();
        self.values.push(value);
        self.predicates.push(format!(
            "{} {} ${}{}",
            column,
            operator,
            self.values.len(),
            cast
        ));
    }

    /// `column ILIKE $N`, bound to `%needle%` with LIKE wildcards in `needle` escaped
    pub fn contains_ci(&mut self, column: &'static str, needle: &str) -> &mut Self {
        let pattern = format!("%{}%", escape_like(needle));
        self.push(column, "ILIKE", BindValue::Text(pattern));
        self
    }

    /// `column >= $N`
    pub fn at_least(&mut self, column: &'static str, value: BindValue) -> &mut Self {
        self.push(column, ">=", value);
        self
    }

    /// `column > $N` (`$N::NUMERIC` for decimals)
    pub fn greater_than(&mut self, column: &'static str, value: BindValue) -> &mut Self {
        self.push(column, ">", value);
        self
    }

    /// Join the predicates with `AND`. Empty clause when nothing was added;
    /// callers omit the `WHERE` keyword in that case.
    pub fn build(self) -> SqlFragment {
        SqlFragment {
            clause: self.predicates.join(" AND "),
            values: self.values,
        }
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Bind `values` onto `query` in placeholder order
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v.as_str()),
            BindValue::Decimal(v) => query.bind(v.to_string()),
        };
    }
    query
}

//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the data-access capability handlers depend on:
//!   enumerate, find-by-predicate, get, add, update, remove.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Customer::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `update_customer` and `delete_customer` report `NotFound` when no row
//!   was affected.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::customer::{now_epoch_ms, Customer, CustomerId, CustomerValidationError};
use crate::uniqueness::CustomerFilter;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    date_of_birth,
    phone_number,
    created_at,
    updated_at
FROM customers";

const REQUIRED_CUSTOMER_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "date_of_birth",
    "phone_number",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CustomerValidationError),
    Db(DbError),
    NotFound(CustomerId),
    InvalidData(String),
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "customer not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted customer data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CustomerValidationError> for RepoError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for customer CRUD and predicate lookups.
pub trait CustomerRepository {
    /// Enumerates every stored customer.
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    /// Returns customers matching `filter`.
    fn find_customers(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>>;
    /// Gets one customer by id.
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Inserts one customer and returns its id.
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    /// Overwrites the mutable fields of an existing customer.
    fn update_customer(&self, customer: &Customer) -> RepoResult<()>;
    /// Removes one customer by id.
    fn delete_customer(&self, id: CustomerId) -> RepoResult<()>;

    /// Returns whether any customer matches `filter`.
    fn any_customer(&self, filter: &CustomerFilter) -> RepoResult<bool> {
        Ok(!self.find_customers(filter)?.is_empty())
    }
}

impl<R: CustomerRepository + ?Sized> CustomerRepository for &R {
    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        (**self).list_customers()
    }

    fn find_customers(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>> {
        (**self).find_customers(filter)
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        (**self).get_customer(id)
    }

    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        (**self).create_customer(customer)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        (**self).update_customer(customer)
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        (**self).delete_customer(id)
    }

    fn any_customer(&self, filter: &CustomerFilter) -> RepoResult<bool> {
        (**self).any_customer(filter)
    }
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` differs from
    ///   the latest migration.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `customers` schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        self.find_customers(&CustomerFilter::All)
    }

    fn find_customers(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>> {
        let (where_sql, bind_values) = filter_to_sql(filter);
        let sql = format!("{CUSTOMER_SELECT_SQL} WHERE {where_sql} ORDER BY created_at ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn any_customer(&self, filter: &CustomerFilter) -> RepoResult<bool> {
        let (where_sql, bind_values) = filter_to_sql(filter);
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM customers WHERE {where_sql});"),
            params_from_iter(bind_values),
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        customer.validate()?;

        self.conn.execute(
            "INSERT INTO customers (
                id,
                first_name,
                last_name,
                email,
                date_of_birth,
                phone_number,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                customer.id.to_string(),
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.email.as_str(),
                customer.date_of_birth,
                customer.phone_number.as_str(),
                customer.created_at,
                customer.updated_at,
            ],
        )?;

        Ok(customer.id)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        customer.validate()?;

        let changed = self.conn.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                date_of_birth = ?4,
                phone_number = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.email.as_str(),
                customer.date_of_birth,
                customer.phone_number.as_str(),
                now_epoch_ms(),
                customer.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(customer.id));
        }

        Ok(())
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM customers WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Translates a filter into a `WHERE` fragment plus positional binds.
///
/// SQLite `=` on TEXT uses BINARY collation, which keeps matching exact and
/// case-sensitive like `CustomerFilter::matches`.
fn filter_to_sql(filter: &CustomerFilter) -> (String, Vec<Value>) {
    let mut sql = String::from("1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    match filter {
        CustomerFilter::All => {}
        CustomerFilter::Email { email, .. } => {
            sql.push_str(" AND email = ?");
            bind_values.push(Value::Text(email.clone()));
        }
        CustomerFilter::Name {
            first_name,
            last_name,
            date_of_birth,
            ..
        } => {
            sql.push_str(" AND first_name = ? AND last_name = ? AND date_of_birth = ?");
            bind_values.push(Value::Text(first_name.clone()));
            bind_values.push(Value::Text(last_name.clone()));
            bind_values.push(Value::Text(date_of_birth.format("%Y-%m-%d").to_string()));
        }
    }

    if let Some(excluded) = filter.excluded_id() {
        sql.push_str(" AND id <> ?");
        bind_values.push(Value::Text(excluded.to_string()));
    }

    (sql, bind_values)
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in customers.id"))
    })?;

    let customer = Customer {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        date_of_birth: row.get("date_of_birth")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    customer.validate()?;
    Ok(customer)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "customers")? {
        return Err(RepoError::MissingRequiredTable("customers"));
    }

    for &column in REQUIRED_CUSTOMER_COLUMNS {
        if !table_has_column(conn, "customers", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "customers",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

use chrono::NaiveDate;
use customer_core::db::migrations::latest_version;
use customer_core::db::open_db_in_memory;
use customer_core::{
    Customer, CustomerFields, CustomerFilter, CustomerRepository, InMemoryCustomerRepository,
    RepoError, SqliteCustomerRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;
use uuid::Uuid;

fn fields(first: &str, last: &str, email: &str, dob: (i32, u32, u32)) -> CustomerFields {
    CustomerFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap(),
        phone_number: "+31201234567".to_string(),
    }
}

fn ada() -> Customer {
    Customer::new(fields("Ada", "Lovelace", "ada@example.com", (1815, 12, 10)))
}

fn alan() -> Customer {
    Customer::new(fields("Alan", "Turing", "alan@example.com", (1912, 6, 23)))
}

/// Runs the same repository contract against both implementations.
fn for_each_repo(check: impl Fn(&dyn CustomerRepository)) {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteCustomerRepository::try_new(&conn).unwrap();
    check(&sqlite);

    let memory = InMemoryCustomerRepository::new();
    check(&memory);
}

#[test]
fn create_and_get_roundtrip() {
    for_each_repo(|repo| {
        let customer = ada();
        let id = repo.create_customer(&customer).unwrap();
        assert_eq!(id, customer.id);

        let loaded = repo.get_customer(id).unwrap().unwrap();
        assert_eq!(loaded.first_name, "Ada");
        assert_eq!(loaded.last_name, "Lovelace");
        assert_eq!(loaded.email, "ada@example.com");
        assert_eq!(loaded.date_of_birth, customer.date_of_birth);
        assert_eq!(loaded.phone_number, "+31201234567");
        assert_eq!(loaded.created_at, customer.created_at);
    });
}

#[test]
fn get_missing_returns_none() {
    for_each_repo(|repo| {
        assert!(repo.get_customer(Uuid::new_v4()).unwrap().is_none());
    });
}

#[test]
fn list_returns_every_customer() {
    for_each_repo(|repo| {
        assert!(repo.list_customers().unwrap().is_empty());

        let first = ada();
        let second = alan();
        repo.create_customer(&first).unwrap();
        repo.create_customer(&second).unwrap();

        let ids: HashSet<_> = repo
            .list_customers()
            .unwrap()
            .into_iter()
            .map(|customer| customer.id)
            .collect();
        assert_eq!(ids, HashSet::from([first.id, second.id]));
    });
}

#[test]
fn update_existing_customer() {
    for_each_repo(|repo| {
        let mut customer = ada();
        repo.create_customer(&customer).unwrap();

        customer.apply(fields(
            "Augusta Ada",
            "King",
            "countess@example.com",
            (1815, 12, 10),
        ));
        repo.update_customer(&customer).unwrap();

        let loaded = repo.get_customer(customer.id).unwrap().unwrap();
        assert_eq!(loaded.first_name, "Augusta Ada");
        assert_eq!(loaded.last_name, "King");
        assert_eq!(loaded.email, "countess@example.com");
        assert!(loaded.updated_at >= loaded.created_at);
    });
}

#[test]
fn update_not_found_returns_not_found() {
    for_each_repo(|repo| {
        let customer = ada();
        let err = repo.update_customer(&customer).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id == customer.id));
    });
}

#[test]
fn delete_removes_customer_and_second_delete_is_not_found() {
    for_each_repo(|repo| {
        let customer = ada();
        repo.create_customer(&customer).unwrap();

        repo.delete_customer(customer.id).unwrap();
        assert!(repo.get_customer(customer.id).unwrap().is_none());

        let err = repo.delete_customer(customer.id).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id == customer.id));
    });
}

#[test]
fn find_by_email_and_name_with_exclusion() {
    for_each_repo(|repo| {
        let first = ada();
        let second = alan();
        repo.create_customer(&first).unwrap();
        repo.create_customer(&second).unwrap();

        let by_email = repo
            .find_customers(&CustomerFilter::email("ada@example.com"))
            .unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, first.id);

        assert!(repo
            .find_customers(&CustomerFilter::email("ada@example.com").excluding(first.id))
            .unwrap()
            .is_empty());

        let by_name = CustomerFilter::name("Alan", "Turing", second.date_of_birth);
        assert!(repo.any_customer(&by_name).unwrap());
        assert!(!repo.any_customer(&by_name.excluding(second.id)).unwrap());
    });
}

#[test]
fn email_lookup_is_case_sensitive() {
    for_each_repo(|repo| {
        repo.create_customer(&ada()).unwrap();

        assert!(repo
            .any_customer(&CustomerFilter::email("ada@example.com"))
            .unwrap());
        assert!(!repo
            .any_customer(&CustomerFilter::email("Ada@Example.com"))
            .unwrap());
    });
}

#[test]
fn empty_store_reports_no_matches() {
    for_each_repo(|repo| {
        assert!(!repo
            .any_customer(&CustomerFilter::email("ada@example.com"))
            .unwrap());
        assert!(!repo
            .any_customer(&CustomerFilter::name(
                "Ada",
                "Lovelace",
                NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()
            ))
            .unwrap());
    });
}

#[test]
fn in_memory_repository_rejects_duplicate_ids() {
    let customer = ada();
    let repo = InMemoryCustomerRepository::with_customers([customer.clone()]);
    assert_eq!(repo.len(), 1);

    let err = repo.create_customer(&customer).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(repo.len(), 1);
}

#[test]
fn sqlite_list_orders_by_creation_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let mut older = alan();
    older.created_at = 1_000;
    let mut newer = ada();
    newer.created_at = 2_000;
    repo.create_customer(&newer).unwrap();
    repo.create_customer(&older).unwrap();

    let listed = repo.list_customers().unwrap();
    assert_eq!(listed[0].id, older.id);
    assert_eq!(listed[1].id, newer.id);
}

#[test]
fn sqlite_read_rejects_invalid_persisted_id() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO customers (
            id, first_name, last_name, email, date_of_birth, phone_number, created_at, updated_at
        ) VALUES ('not-a-uuid', 'A', 'B', 'c@example.com', '2000-01-01', '1', 0, 0);",
        [],
    )
    .unwrap();

    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    let err = repo.list_customers().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_customers_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("customers"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE customers (
            id TEXT PRIMARY KEY NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            date_of_birth TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "customers",
            column: "phone_number"
        })
    ));
}

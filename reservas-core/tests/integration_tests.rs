//! Integration tests for reservas-core services
//!
//! These exercise the full context (directory, session, ledger, dashboard)
//! against both store backends, with a fixed clock.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use reservas_core::adapters::duckdb::DuckDbStore;
use reservas_core::config::Config;
use reservas_core::ports::{keys, FixedClock, KeyValueStore};
use reservas_core::services::{Dashboard, PasswordScheme};
use reservas_core::{
    Error, NewReservation, ReservasContext, ReservationPatch, ReservationStatus, Role,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn memory_context() -> ReservasContext {
    ReservasContext::in_memory(Arc::new(FixedClock(today())))
}

/// Context over a DuckDB file inside `temp_dir`
fn duckdb_context(temp_dir: &TempDir) -> ReservasContext {
    let store = DuckDbStore::open(&temp_dir.path().join("reservas.duckdb"))
        .expect("Failed to open store");
    ReservasContext::with_store(Config::default(), Arc::new(store), Arc::new(FixedClock(today())))
}

fn new_reservation(user_id: u64, service: &str, date: NaiveDate) -> NewReservation {
    NewReservation {
        user_id,
        service: service.to_string(),
        date,
        notes: String::new(),
    }
}

// ============================================================================
// End-to-end scenario
// ============================================================================

fn run_ana_scenario(ctx: &ReservasContext) {
    assert!(ctx.users.list_users().unwrap().is_empty());
    assert!(ctx.ledger.list_all().unwrap().is_empty());

    ctx.users
        .register("Ana", "ana@x.com", "p1", Role::Client)
        .unwrap();
    let ana = ctx.session.login(&ctx.users, "ana@x.com", "p1").unwrap();
    assert_eq!(ana.id, 1);

    ctx.ledger
        .create(new_reservation(1, "Corte", today()))
        .unwrap();
    let mine = ctx.ledger.list_for_user(1).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ReservationStatus::Pending);

    ctx.ledger
        .change_status(1, ReservationStatus::Cancelled)
        .unwrap();
    let mine = ctx.ledger.list_for_user(1).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ReservationStatus::Cancelled);
}

#[test]
fn test_end_to_end_in_memory() {
    run_ana_scenario(&memory_context());
}

#[test]
fn test_end_to_end_duckdb() {
    let temp_dir = TempDir::new().unwrap();
    run_ana_scenario(&duckdb_context(&temp_dir));
}

// ============================================================================
// Persistence
// ============================================================================

/// Everything written through one context is visible after reopening the file
#[test]
fn test_duckdb_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let ctx = duckdb_context(&temp_dir);
        ctx.default_role.set(Role::Operator).unwrap();
        let luis = ctx.self_register("Luis", "luis@x.com", "pw").unwrap();
        ctx.session.establish(&luis).unwrap();
        ctx.ledger
            .create(new_reservation(luis.id, "Consulta", today()))
            .unwrap();
    }

    let ctx = duckdb_context(&temp_dir);
    assert_eq!(ctx.default_role.get().unwrap(), Role::Operator);
    let current = ctx.current_user().unwrap();
    assert_eq!(current.name, "Luis");
    assert_eq!(current.role, Role::Operator);
    assert_eq!(ctx.ledger.list_for_user(current.id).unwrap().len(), 1);
}

/// Records use the documented keys and JSON field names
#[test]
fn test_persisted_layout() {
    let ctx = memory_context();
    let ana = ctx.users.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
    ctx.session.establish(&ana).unwrap();
    ctx.ledger
        .create(new_reservation(ana.id, "Corte", today()))
        .unwrap();

    let users: serde_json::Value =
        serde_json::from_str(&ctx.store.get(keys::USERS).unwrap().unwrap()).unwrap();
    assert_eq!(users[0]["email"], "ana@x.com");
    assert_eq!(users[0]["role"], "cliente");

    let reservations: serde_json::Value =
        serde_json::from_str(&ctx.store.get(keys::RESERVATIONS).unwrap().unwrap()).unwrap();
    assert_eq!(reservations[0]["userId"], 1);
    assert_eq!(reservations[0]["status"], "pendiente");
    assert_eq!(reservations[0]["date"], "2026-10-19");

    assert!(ctx.store.get(keys::CURRENT_SESSION).unwrap().is_some());
    ctx.session.clear().unwrap();
    assert!(ctx.store.get(keys::CURRENT_SESSION).unwrap().is_none());
}

/// Collections written by an older deployment load as-is
#[test]
fn test_reads_existing_records() {
    let ctx = memory_context();
    ctx.store
        .set(
            keys::USERS,
            r#"[{"id":5,"name":"Eva","email":"eva@x.com","password":"pw","role":"operador"}]"#,
        )
        .unwrap();
    ctx.store
        .set(
            keys::RESERVATIONS,
            r#"[{"id":9,"userId":5,"service":"Soporte","date":"2026-10-19","status":"confirmada","notes":"Reserva demo"}]"#,
        )
        .unwrap();

    let eva = ctx.users.authenticate("eva@x.com", "pw").unwrap();
    assert_eq!(eva.role, Role::Operator);
    let next = ctx.users.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
    assert_eq!(next.id, 6);

    let created = ctx
        .ledger
        .create(new_reservation(eva.id, "Consulta", today()))
        .unwrap();
    assert_eq!(created.id, 10);
}

// ============================================================================
// Testable properties
// ============================================================================

#[test]
fn test_update_leaves_other_records_untouched() {
    let ctx = memory_context();
    let a = ctx.ledger.create(new_reservation(1, "Corte", today())).unwrap();
    let b = ctx.ledger.create(new_reservation(2, "Tinte", today())).unwrap();

    ctx.ledger
        .update(a.id, &ReservationPatch::status(ReservationStatus::Confirmed))
        .unwrap();

    let all = ctx.ledger.list_all().unwrap();
    assert_eq!(all.len(), 2);
    let mut expected_a = a.clone();
    expected_a.status = ReservationStatus::Confirmed;
    assert_eq!(all[0], expected_a);
    assert_eq!(all[1], b);
}

#[test]
fn test_duplicate_email_keeps_collection_length() {
    let ctx = memory_context();
    ctx.users.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
    let result = ctx.users.register("Ana 2", "ana@x.com", "p9", Role::Client);

    assert!(matches!(result, Err(Error::DuplicateEmail(_))));
    assert_eq!(ctx.users.list_users().unwrap().len(), 1);
}

#[test]
fn test_validate_date_uses_calendar_days() {
    let ctx = memory_context();
    assert!(!ctx.ledger.validate_date(today().pred_opt().unwrap()));
    assert!(ctx.ledger.validate_date(today()));
    assert!(ctx.ledger.validate_date(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()));
}

#[test]
fn test_statistics_two_one_one() {
    let ctx = memory_context();
    for service in ["A", "B", "C", "D"] {
        ctx.ledger.create(new_reservation(1, service, today())).unwrap();
    }
    ctx.ledger.change_status(3, ReservationStatus::Confirmed).unwrap();
    ctx.ledger.change_status(4, ReservationStatus::Cancelled).unwrap();

    let stats = ctx.ledger.statistics(&ctx.ledger.list_all().unwrap());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.count(ReservationStatus::Pending), 2);
    assert_eq!(stats.count(ReservationStatus::Confirmed), 1);
    assert_eq!(stats.count(ReservationStatus::Cancelled), 1);
    assert_eq!(stats.percent(ReservationStatus::Pending), 50);
    assert_eq!(stats.percent(ReservationStatus::Confirmed), 25);
    assert_eq!(stats.percent(ReservationStatus::Cancelled), 25);
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn test_self_registration_uses_default_role() {
    let ctx = memory_context();
    assert!(!ctx.default_role.is_set().unwrap());
    let ana = ctx.self_register("Ana", "ana@x.com", "p1").unwrap();
    assert_eq!(ana.role, Role::Client);

    ctx.default_role.set(Role::Admin).unwrap();
    let luis = ctx.self_register("Luis", "luis@x.com", "p2").unwrap();
    assert_eq!(luis.role, Role::Admin);
}

/// The role picked at the first registration applies to that registration
/// and is not asked for again
#[test]
fn test_first_registration_role_choice_sticks() {
    let ctx = memory_context();
    assert!(!ctx.default_role.is_set().unwrap());
    assert!(Role::ALL.contains(&Role::default()));

    ctx.default_role.set(Role::Operator).unwrap();
    let first = ctx.self_register("Luis", "luis@x.com", "p1").unwrap();
    assert_eq!(first.role, Role::Operator);

    assert!(ctx.default_role.is_set().unwrap());
    let second = ctx.self_register("Eva", "eva@x.com", "p2").unwrap();
    assert_eq!(second.role, Role::Operator);
    assert_eq!(
        ctx.store.get(keys::DEFAULT_ROLE).unwrap().as_deref(),
        Some("operador")
    );
}

#[test]
fn test_demo_seed_then_role_views() {
    let ctx = memory_context();
    let summary = ctx.demo.seed().unwrap();
    assert_eq!(summary.users, 2);

    let admin = ctx.session.login(&ctx.users, "admin@demo", "admin123").unwrap();
    match ctx.dashboard.dashboard(&admin).unwrap() {
        Dashboard::Admin(overview) => {
            assert_eq!(overview.total_reservations, summary.reservations);
            assert_eq!(overview.total_users, 2);
            assert!(overview.rows.iter().all(|r| r.owner_name == "Operador Demo"));
        }
        other => panic!("unexpected view {:?}", other),
    }

    let operator = ctx.session.login(&ctx.users, "operador@demo", "operador123").unwrap();
    let expected_pending = ctx.ledger.list_pending_for_date(today()).unwrap();
    match ctx.dashboard.dashboard(&operator).unwrap() {
        Dashboard::Operator(agenda) => assert_eq!(agenda.pending, expected_pending),
        other => panic!("unexpected view {:?}", other),
    }
    assert_eq!(ctx.current_user().unwrap().email, "operador@demo");
}

#[test]
fn test_argon2_context() {
    let config = Config {
        password_scheme: PasswordScheme::Argon2,
        ..Config::default()
    };
    let ctx = ReservasContext::with_store(
        config,
        Arc::new(reservas_core::adapters::memory::MemoryStore::new()),
        Arc::new(FixedClock(today())),
    );

    ctx.users.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
    assert!(ctx.session.login(&ctx.users, "ana@x.com", "p1").is_ok());
    assert!(matches!(
        ctx.session.login(&ctx.users, "ana@x.com", "P1"),
        Err(Error::InvalidCredentials)
    ));
}

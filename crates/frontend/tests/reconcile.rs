mod common;

use common::FakeApi;
use contracts::domain::a005_production::{
    Production, FIELD_DATE, FIELD_MOU_FEE, FIELD_QUANTITY, FIELD_SITE, FIELD_TOTAL, FIELD_TRUCKS,
};
use contracts::domain::common::Resource;
use contracts::shared::record::{Record, RecordId};
use frontend::shared::api::ApiError;
use frontend::shared::store::{CommitAction, CommitOutcome, MutationKind, PendingMutation, RecordState};
use frontend::{ControllerError, ListController};
use serde_json::{json, Value};

/// Server row in wire form with consistent derived fields
fn production_row(id: i64, date: &str, site: &str, trucks: i64) -> Value {
    let mut record = Record::new();
    record.set("id", id);
    record.set(FIELD_DATE, date);
    record.set(FIELD_SITE, site);
    record.set(FIELD_TRUCKS, trucks);
    Production::derive(&mut record);
    Production::mapping().to_wire(&record).into()
}

async fn loaded() -> ListController<Production, FakeApi> {
    let api = FakeApi::with_rows(vec![
        production_row(1, "2024-01-05", "Obajana", 2),
        production_row(2, "2024-01-06", "Ewekoro", 4),
    ]);
    let mut list = ListController::new(api, 10);
    list.load().await.unwrap();
    list
}

#[tokio::test]
async fn derived_fields_follow_trucks() {
    let mut list = loaded().await;
    let id = RecordId::Int(1);
    list.begin_edit(&id).unwrap();

    for t in [0i64, 1, 7, 33, 250] {
        list.set_field(&id, FIELD_TRUCKS, json!(t)).unwrap();
        let record = list.store().get(&id).unwrap().record();
        let quantity = t as f64 * 30.0;
        let expected_total = quantity * 150.0 + quantity * 180.0 + (quantity * 150.0 + quantity * 180.0) * 0.05;
        assert_eq!(record.number(FIELD_QUANTITY), quantity);
        assert!((record.number(FIELD_TOTAL) - expected_total).abs() <= 1e-9);
    }
}

#[tokio::test]
async fn unchanged_save_makes_no_call() {
    let mut list = loaded().await;
    let id = RecordId::Int(1);
    list.begin_edit(&id).unwrap();
    list.set_field(&id, FIELD_TRUCKS, json!(5)).unwrap();
    list.set_field(&id, FIELD_TRUCKS, json!(2)).unwrap();

    assert_eq!(list.commit(&id, CommitAction::Save).unwrap(), CommitOutcome::Unchanged);
    assert!(list.store().pending().is_none());
    assert_eq!(list.api().calls(), vec!["GET api/production/"]);
}

#[tokio::test]
async fn decimal_strings_from_server_are_not_changes() {
    let api = FakeApi::with_rows(vec![json!({
        "id": 3, "date": "2024-02-01", "site": "Obajana", "trucks": 3,
        "quantity": "90.00", "federal_royalty": "13500.00", "state_haulage": "16200.00",
        "mou_fee": "1485.00", "total": "31185.00"
    })]);
    let mut list = ListController::<Production, _>::new(api, 10);
    list.load().await.unwrap();

    let id = RecordId::Int(3);
    list.begin_edit(&id).unwrap();
    list.set_field(&id, FIELD_SITE, json!("Other")).unwrap();
    list.set_field(&id, FIELD_SITE, json!("Obajana")).unwrap();

    assert_eq!(list.commit(&id, CommitAction::Save).unwrap(), CommitOutcome::Unchanged);
    assert_eq!(list.api().calls(), vec!["GET api/production/"]);
    assert_eq!(
        list.store().get(&id).unwrap().record().get(FIELD_TOTAL),
        Some(&json!("31185.00"))
    );
}

#[tokio::test]
async fn update_sends_wire_payload() {
    let mut list = loaded().await;
    let id = RecordId::Int(2);
    list.begin_edit(&id).unwrap();
    list.set_field(&id, FIELD_TRUCKS, json!(10)).unwrap();

    let outcome = list.commit(&id, CommitAction::Save).unwrap();
    assert!(matches!(
        outcome,
        CommitOutcome::AwaitingConfirmation(PendingMutation { kind: MutationKind::Update, .. })
    ));
    assert_eq!(list.confirm_pending().await.unwrap(), id);

    let server = list.api().row(2).unwrap();
    assert_eq!(server.get("trucks"), Some(&json!(10)));
    assert_eq!(server.get("quantity"), Some(&json!(300)));
    assert!(server.get(FIELD_TRUCKS).is_none());

    let row = list.store().get(&id).unwrap();
    assert_eq!(row.state(), RecordState::Reconciled);
    assert_eq!(row.record().get(FIELD_QUANTITY), Some(&json!(300)));
}

#[tokio::test]
async fn create_replaces_temporary_record() {
    let mut list = loaded().await;
    let temp = list.add_draft();
    list.set_field(&temp, FIELD_DATE, json!("2024-02-01")).unwrap();
    list.set_field(&temp, FIELD_SITE, json!("Mfamosing")).unwrap();
    list.set_field(&temp, FIELD_TRUCKS, json!(3)).unwrap();
    assert_eq!(list.store().len(), 3);

    assert!(matches!(
        list.commit(&temp, CommitAction::Save).unwrap(),
        CommitOutcome::AwaitingConfirmation(PendingMutation { kind: MutationKind::Create, .. })
    ));
    let new_id = list.confirm_pending().await.unwrap();
    assert_eq!(new_id, RecordId::Int(3));

    assert_eq!(list.store().len(), 3);
    assert!(list.store().get(&temp).is_none());
    let created = list.store().get(&new_id).unwrap();
    assert_eq!(created.state(), RecordState::Reconciled);
    assert_eq!(created.record().get(FIELD_SITE), Some(&json!("Mfamosing")));
    assert_eq!(created.record().get(FIELD_QUANTITY), Some(&json!(90)));
    assert_eq!(list.store().rows()[0].record().id(), Some(new_id));

    assert_eq!(list.api().calls().last().map(String::as_str), Some("POST api/production/"));
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let mut list = loaded().await;
    let id = RecordId::Int(1);
    list.begin_edit(&id).unwrap();
    list.set_field(&id, FIELD_TRUCKS, json!(9)).unwrap();
    list.commit(&id, CommitAction::Save).unwrap();

    list.api().fail_next(ApiError::Validation {
        status: 400,
        body: "{\"trucks\":[\"too many\"]}".into(),
    });
    let err = list.confirm_pending().await.unwrap_err();
    assert!(matches!(err, ControllerError::Api(ApiError::Validation { status: 400, .. })));

    let row = list.store().get(&id).unwrap();
    assert_eq!(row.state(), RecordState::SaveFailed);
    assert_eq!(row.record().get(FIELD_TRUCKS), Some(&json!(9)));
    assert!(row.last_error().unwrap_or_default().contains("400"));
    assert!(list.store().pending().is_none());
    assert_eq!(list.api().row(1).unwrap().get("trucks"), Some(&json!(2)));

    // retry goes through
    list.commit(&id, CommitAction::Save).unwrap();
    list.confirm_pending().await.unwrap();
    assert_eq!(list.store().state_of(&id), Some(RecordState::Reconciled));
    assert_eq!(list.api().row(1).unwrap().get("trucks"), Some(&json!(9)));
}

#[tokio::test]
async fn rejected_save_can_be_corrected() {
    let mut list = loaded().await;
    let id = RecordId::Int(2);
    list.begin_edit(&id).unwrap();
    list.set_field(&id, FIELD_TRUCKS, json!(400)).unwrap();
    list.commit(&id, CommitAction::Save).unwrap();
    list.api().fail_next(ApiError::Validation {
        status: 400,
        body: "{\"trucks\":[\"too many\"]}".into(),
    });
    assert!(list.confirm_pending().await.is_err());

    // correct the value without reopening the edit
    list.set_field(&id, FIELD_TRUCKS, json!(40)).unwrap();
    let row = list.store().get(&id).unwrap();
    assert_eq!(row.state(), RecordState::Editing);
    assert_eq!(row.last_error(), None);
    assert_eq!(row.record().number(FIELD_QUANTITY), 1200.0);

    list.commit(&id, CommitAction::Save).unwrap();
    list.confirm_pending().await.unwrap();
    assert_eq!(list.api().row(2).unwrap().get("trucks"), Some(&json!(40)));
    assert_eq!(
        list.api().calls(),
        vec!["GET api/production/", "PUT api/production/2", "PUT api/production/2"]
    );
}

#[tokio::test]
async fn delete_after_confirmation() {
    let mut list = loaded().await;
    let id = RecordId::Int(1);
    list.commit(&id, CommitAction::Delete).unwrap();

    // cancelling makes no call
    list.cancel_pending().unwrap();
    assert_eq!(list.store().state_of(&id), Some(RecordState::Clean));
    assert_eq!(list.api().calls().len(), 1);

    list.commit(&id, CommitAction::Delete).unwrap();
    list.confirm_pending().await.unwrap();
    assert!(list.store().get(&id).is_none());
    assert!(list.api().row(1).is_none());
    assert_eq!(list.api().calls().last().map(String::as_str), Some("DELETE api/production/1"));
}

#[tokio::test]
async fn second_commit_waits_for_first() {
    let mut list = loaded().await;
    list.commit(&RecordId::Int(1), CommitAction::Delete).unwrap();
    let err = list.commit(&RecordId::Int(2), CommitAction::Delete).unwrap_err();
    assert!(matches!(err, ControllerError::Store(_)));
}

#[tokio::test]
async fn mou_fee_is_five_percent() {
    let list = loaded().await;
    let record = list.store().get(&RecordId::Int(2)).unwrap().record();
    // 4 trucks: 120 t, royalty 18,000, haulage 21,600
    assert!((record.number(FIELD_MOU_FEE) - 1_980.0).abs() <= 1e-9);
}

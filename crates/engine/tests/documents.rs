use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};

use engine::{Collection, Document, Engine, EngineError};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    (engine, path)
}

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[tokio::test]
async fn insert_renders_store_fields() {
    let (engine, _db) = engine_with_db().await;

    let stored = engine
        .insert(
            Collection::Transactions,
            doc(json!({"id": "t1", "amount": 12.5, "type": "expense"})),
        )
        .await
        .unwrap();

    assert_eq!(stored["id"], "t1");
    assert_eq!(stored["amount"], 12.5);
    assert_eq!(stored["_id"], "1");
    assert!(stored["createdAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(stored["createdAt"], stored["updatedAt"]);
}

#[tokio::test]
async fn insert_ignores_client_supplied_store_fields() {
    let (engine, _db) = engine_with_db().await;

    let stored = engine
        .insert(
            Collection::Budgets,
            doc(json!({"id": "b1", "_id": "forged", "createdAt": "yesterday"})),
        )
        .await
        .unwrap();

    assert_ne!(stored["_id"], "forged");
    assert_ne!(stored["createdAt"], "yesterday");
}

#[tokio::test]
async fn find_all_keeps_insertion_order_per_collection() {
    let (engine, _db) = engine_with_db().await;
    for id in ["a", "b", "c"] {
        engine
            .insert(Collection::Transactions, doc(json!({"id": id})))
            .await
            .unwrap();
    }
    engine
        .insert(Collection::Budgets, doc(json!({"id": "x"})))
        .await
        .unwrap();

    let ids: Vec<_> = engine
        .find_all(Collection::Transactions)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(engine.find_all(Collection::Budgets).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_merges_and_refreshes_updated_at() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .insert(
            Collection::Budgets,
            doc(json!({"id": "b1", "category": "Rent", "amount": 900})),
        )
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = engine
        .update_by_id(Collection::Budgets, "b1", doc(json!({"amount": 950})))
        .await
        .unwrap();

    assert_eq!(updated["amount"], 950);
    assert_eq!(updated["category"], "Rent");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn update_can_change_the_id() {
    let (engine, _db) = engine_with_db().await;
    engine
        .insert(Collection::Transactions, doc(json!({"id": "old"})))
        .await
        .unwrap();

    engine
        .update_by_id(Collection::Transactions, "old", doc(json!({"id": "new"})))
        .await
        .unwrap();

    let all = engine.find_all(Collection::Transactions).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], "new");
    assert_eq!(
        engine.delete_by_id(Collection::Transactions, "old").await,
        Err(EngineError::KeyNotFound("old".to_string()))
    );
}

#[tokio::test]
async fn missing_ids_report_key_not_found() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine
            .update_by_id(Collection::Budgets, "nope", Document::new())
            .await,
        Err(EngineError::KeyNotFound("nope".to_string()))
    );
    assert_eq!(
        engine.delete_by_id(Collection::Budgets, "nope").await,
        Err(EngineError::KeyNotFound("nope".to_string()))
    );
}

#[tokio::test]
async fn delete_removes_first_match_only() {
    let (engine, _db) = engine_with_db().await;
    for amount in [1, 2] {
        engine
            .insert(Collection::Transactions, doc(json!({"id": "dup", "amount": amount})))
            .await
            .unwrap();
    }

    let removed = engine
        .delete_by_id(Collection::Transactions, "dup")
        .await
        .unwrap();
    assert_eq!(removed["amount"], 1);

    let left = engine.find_all(Collection::Transactions).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0]["amount"], 2);
}

#[tokio::test]
async fn documents_survive_reconnect() {
    let (engine, path) = engine_with_file_db().await;
    engine
        .insert(Collection::Budgets, doc(json!({"id": "b1", "amount": 100})))
        .await
        .unwrap();
    drop(engine);

    let url = format!("sqlite:{}?mode=rwc", path.display());
    let db = Database::connect(&url).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let budgets = engine.find_all(Collection::Budgets).await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["amount"], 100);

    drop(engine);
    let _ = std::fs::remove_file(path);
}

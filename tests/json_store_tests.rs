//! JSON file store: legacy migration and persistence across loads

use bartab::prelude::*;
use serde_json::{Value, json};
use std::path::Path;

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_legacy_menu_is_migrated_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_json(
        &path,
        &json!({
            "menu": [{"name": "Pils", "price": 2.5}, {"name": "Cola", "price": "2"}],
            "tabs": {"Alex": [{"name": "Pils", "price": "2.50"}]}
        }),
    );

    let store = JsonFileStore::new(&path);
    let state = store.load().await.unwrap();
    assert_eq!(state.categories().collect::<Vec<_>>(), vec!["Overig"]);
    assert_eq!(
        state.drinks("Overig"),
        &[Drink::new("Pils", 2.5), Drink::new("Cola", 2.0)]
    );
    assert_eq!(state.tab("Alex")[0].price, 2.5);

    // the document on disk now has the mapping shape
    let on_disk = read_json(&path);
    assert!(on_disk["menu"].is_object());
    assert_eq!(on_disk["menu"]["Overig"][1]["name"], "Cola");

    // and loading again sees it directly
    assert_eq!(store.load().await.unwrap(), state);
}

#[tokio::test]
async fn test_custom_legacy_category() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_json(&path, &json!({"menu": [{"name": "Pils", "price": 2.5}]}));

    let store = JsonFileStore::new(&path).with_legacy_category("Other");
    let state = store.load().await.unwrap();
    assert_eq!(state.drinks("Other").len(), 1);
    assert!(state.tabs.is_empty());
}

#[tokio::test]
async fn test_service_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let service = BarService::new(JsonFileStore::new(&path));
    service.add_category("Bier").await.unwrap();
    service
        .add_drink(Some("Bier"), "Pils", "2.50")
        .await
        .unwrap();
    let order = AddToTab::from_fields(None, Some("Alex"), "Pils", "2.50", Some("3")).unwrap();
    service.add_to_tab(&order).await.unwrap();
    service.add_customer("Sam").await.unwrap();

    // a fresh service over the same file sees everything
    let reopened = BarService::new(JsonFileStore::new(&path));
    let overview = reopened.tab_overview().await.unwrap();
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].name, "Alex");
    assert_eq!(overview[0].total, 7.5);
    assert_eq!(overview[1].name, "Sam");
    assert_eq!(overview[1].count, 0);

    let on_disk = read_json(&path);
    assert_eq!(
        on_disk,
        json!({
            "menu": {"Bier": [{"name": "Pils", "price": 2.5}]},
            "tabs": {
                "Alex": [
                    {"name": "Pils", "price": 2.5},
                    {"name": "Pils", "price": 2.5},
                    {"name": "Pils", "price": 2.5}
                ],
                "Sam": []
            }
        })
    );
}

#[tokio::test]
async fn test_corrupt_document_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_json(&path, &json!({"tabs": {"Alex": "three beers"}}));

    let service = BarService::new(JsonFileStore::new(&path));
    let err = service.snapshot().await.unwrap_err();
    assert!(matches!(
        err,
        BarTabError::Storage(StorageError::Corrupt(_))
    ));
    assert_eq!(err.error_code(), "STORAGE_ERROR");
}

#[tokio::test]
async fn test_revenue_report_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_json(
        &path,
        &json!({
            "menu": {},
            "tabs": {
                "Alex": [{"name": "Pils", "price": 2.5}],
                "Sam": [{"name": "Wijn", "price": 4}, {"name": "Wijn", "price": 4}],
                "Kim": []
            }
        }),
    );

    let summary = BarService::new(JsonFileStore::new(&path))
        .revenue_summary()
        .await
        .unwrap();

    let names: Vec<_> = summary.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Sam", "Alex", "Kim"]);
    assert_eq!(summary.grand_total, 10.5);

    let options = LayoutOptions {
        title: "Revenue per customer".to_string(),
        subtitle: None,
        currency_symbol: "EUR ".to_string(),
    };
    let pdf = render_revenue_pdf(&summary, &options).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

fn legacy_document() -> Value {
    json!({
        "menu": [{"name": "Pils", "price": 2.5}, {"name": "Cola", "price": "2"}],
        "tabs": {"Alex": [{"name": "Pils", "price": "2.50"}]}
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_and_a_write_on_a_legacy_file() {
    for _ in 0..20 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_json(&path, &legacy_document());

        let service = std::sync::Arc::new(BarService::new(JsonFileStore::new(&path)));
        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                if i == 3 {
                    let order =
                        AddToTab::from_fields(None, Some("Sam"), "Cola", "2", None).unwrap();
                    service.add_to_tab(&order).await.map(|_| ())
                } else {
                    service.snapshot().await.map(|_| ())
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // the write survives every migrating reader
        let state = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(state.tab("Sam"), &[LineItem::new("Cola", 2.0)]);
        assert_eq!(state.tab("Alex").len(), 1);
        assert!(read_json(&path)["menu"]["Overig"].is_array());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_always_see_a_complete_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_json(&path, &legacy_document());

    let service = std::sync::Arc::new(BarService::new(JsonFileStore::new(&path)));
    let mut handles = Vec::new();
    for i in 0..40 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                let order = AddToTab::from_fields(None, Some("Kim"), "Pils", "2.5", None).unwrap();
                service.add_to_tab(&order).await.map(|_| ())
            } else {
                service.tab_overview().await.map(|_| ())
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(state.tab("Kim").len(), 10);
}

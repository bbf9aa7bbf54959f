use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};
use velocity_zones::adapters::storage::{
    DatabaseDocument, JsonFileRepRepository, JsonFileStore, JsonFileZoneRepository,
    JsonStoreOptions, DB_FILE_NAME,
};
use velocity_zones::domain::model::{seed_zones, Rep, RepQuery, Zone};
use velocity_zones::domain::ports::{RepRepository, ZoneRepository};

async fn open(temp_dir: &TempDir) -> Result<Arc<JsonFileStore>> {
    Ok(JsonFileStore::open(temp_dir.path(), JsonStoreOptions::default()).await?)
}

#[tokio::test]
async fn test_seed_document_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    open(&temp_dir).await?;

    let raw = std::fs::read_to_string(temp_dir.path().join(DB_FILE_NAME))?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;

    assert_eq!(json["reps"], serde_json::json!([]));
    let zones = json["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 4);
    assert_eq!(zones[0]["id"], "zone-strength");
    assert_eq!(zones[0]["minVelocity"], 0.0);
    assert_eq!(zones[0]["maxVelocity"], 0.3);
    assert_eq!(zones[0]["description"], "Heavy resistance training zone");
    assert_eq!(zones[3]["id"], "zone-speed");
    Ok(())
}

#[tokio::test]
async fn test_reps_survive_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let rep = Rep::create("deadlift", 0.28, None)?;

    {
        let reps = JsonFileRepRepository::new(open(&temp_dir).await?);
        assert_ok!(reps.save(rep.clone()).await);
    }

    let reps = JsonFileRepRepository::new(open(&temp_dir).await?);
    let loaded = reps.find_by_id(rep.id()).await.unwrap().unwrap();
    assert_eq!(loaded, rep);
    assert_eq!(reps.find_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_save_is_upsert_by_id() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let reps = JsonFileRepRepository::new(open(&temp_dir).await?);

    let rep = Rep::create("squat", 0.5, None)?;
    assert_ok!(reps.save(rep.clone()).await);

    let mut extra = velocity_zones::domain::model::Metadata::new();
    extra.insert("rpe".to_string(), serde_json::json!(9));
    assert_ok!(reps.save(rep.update_metadata(extra)).await);

    let all = reps.find_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].metadata().unwrap()["rpe"], 9);
    Ok(())
}

#[tokio::test]
async fn test_loaded_reps_bypass_velocity_validation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = open(&temp_dir).await?;

    let mut document = DatabaseDocument::seeded();
    document.reps.push(Rep::from_persistence(
        "legacy",
        "squat",
        25.0,
        Utc::now(),
        None,
    ));
    assert_ok!(store.write(&document).await);

    let reps = JsonFileRepRepository::new(store);
    let legacy = reps.find_by_id("legacy").await.unwrap().unwrap();
    assert_eq!(legacy.velocity(), 25.0);
    assert_err!(legacy.velocity_value());
    Ok(())
}

#[tokio::test]
async fn test_query_uses_file_order_and_offset_before_limit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = open(&temp_dir).await?;
    let start = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

    // 檔案順序刻意不是時間順序
    let mut document = DatabaseDocument::seeded();
    for (i, minutes) in [30, 10, 20, 0, 40, 50].iter().enumerate() {
        document.reps.push(Rep::from_persistence(
            format!("r{}", i),
            "squat",
            0.5,
            start + Duration::minutes(*minutes),
            None,
        ));
    }
    assert_ok!(store.write(&document).await);

    let reps = JsonFileRepRepository::new(store);
    let query = RepQuery {
        start_date: Some(start + Duration::minutes(10)),
        offset: Some(1),
        limit: Some(2),
        ..Default::default()
    };
    let ids: Vec<String> = reps
        .find_by_query(&query)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect();

    assert_eq!(ids, vec!["r1", "r2"]);
    Ok(())
}

#[tokio::test]
async fn test_zone_repository() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let zones = JsonFileZoneRepository::new(open(&temp_dir).await?);

    assert_eq!(zones.find_all().await?, seed_zones());

    let added = Zone::create("Ballistic", 2.0, 4.0, "#aa00ff", None);
    assert_ok!(zones.save(added.clone()).await);
    assert_eq!(zones.find_by_id(added.id()).await.unwrap(), Some(added));

    let renamed = Zone::from_persistence("zone-speed", "Top Speed", 1.0, 2.0, "#4444ff", None);
    assert_ok!(zones.save(renamed).await);
    let all = zones.find_all().await?;
    assert_eq!(all.len(), 5);
    assert_eq!(all[3].name(), "Top Speed");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_saves_in_one_process_are_serialized() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let reps = Arc::new(JsonFileRepRepository::new(open(&temp_dir).await?));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let reps = Arc::clone(&reps);
            tokio::spawn(async move {
                let rep = Rep::create("clean", 1.1, None).unwrap();
                reps.save(rep).await.unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await?;
    }

    assert_eq!(reps.find_all().await?.len(), 16);
    Ok(())
}

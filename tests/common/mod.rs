//! Shared fixtures: a temporary SQLite database seeded with a small,
//! fixed dataset in January 2024.
//!
//! - professions: 1 Dentist, 2 Lawyer
//! - products: 10 Whitening Kit (profession 1)
//! - funnels: 100 Webinar (p1), 101 Quiz (p1), 102 Global Ads (global), 103 Lawyer Leads (p2)
//! - users: u1 Ana (client), u2 Bruno
//! - sessions: s1 google/Lisbon, s2 facebook/Porto
//! - events evt-01..evt-12 on 2024-01-DD 10:00:00, plus
//!   evt-13 at 2024-01-31 23:59:59 (no relations) and evt-14 at 2024-02-01 00:00:00

#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tempfile::TempDir;

use event_insight::config::{DatabaseConfig, init_config};
use event_insight::storage::SeaOrmStorage;
use migration::entities::{event, funnel, product, profession, session, user};

static INIT: Once = Once::new();

pub fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// 创建临时 SQLite 数据库的存储实例（已迁移，未填充数据）
pub async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("events.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

/// 创建并填充测试数据
pub async fn create_seeded_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    seed(storage.get_db()).await;
    (storage, dir)
}

pub async fn seed(db: &DatabaseConnection) {
    for (id, name, pixel) in [(1, "Dentist", Some("px-1")), (2, "Lawyer", None)] {
        profession::Entity::insert(profession::ActiveModel {
            profession_id: Set(id),
            profession_name: Set(name.to_string()),
            meta_pixel: Set(pixel.map(str::to_string)),
            meta_token: Set(None),
            created_at: Set(ts(2023, 12, id as u32, 9, 0, 0)),
        })
        .exec(db)
        .await
        .unwrap();
    }

    product::Entity::insert(product::ActiveModel {
        product_id: Set(10),
        product_name: Set("Whitening Kit".to_string()),
        profession_id: Set(Some(1)),
    })
    .exec(db)
    .await
    .unwrap();

    for (id, name, tag, global, profession_id) in [
        (100, "Webinar", Some("wb"), false, Some(1)),
        (101, "Quiz", Some("qz"), false, Some(1)),
        (102, "Global Ads", None, true, None),
        (103, "Lawyer Leads", Some("ll"), false, Some(2)),
    ] {
        funnel::Entity::insert(funnel::ActiveModel {
            funnel_id: Set(id),
            funnel_name: Set(name.to_string()),
            funnel_tag: Set(tag.map(str::to_string)),
            global: Set(global),
            profession_id: Set(profession_id),
            created_at: Set(ts(2023, 12, 10, 0, 0, (id - 100) as u32)),
        })
        .exec(db)
        .await
        .unwrap();
    }

    for (id, name, email, is_client) in [
        ("u1", "Ana", Some("ana@example.com"), true),
        ("u2", "Bruno", None, false),
    ] {
        user::Entity::insert(user::ActiveModel {
            user_id: Set(id.to_string()),
            fullname: Set(Some(name.to_string())),
            email: Set(email.map(str::to_string)),
            phone: Set(None),
            is_client: Set(is_client),
        })
        .exec(db)
        .await
        .unwrap();
    }

    for (id, source, city) in [("s1", "google", "Lisbon"), ("s2", "facebook", "Porto")] {
        session::Entity::insert(session::ActiveModel {
            session_id: Set(id.to_string()),
            utm_source: Set(Some(source.to_string())),
            utm_medium: Set(Some("cpc".to_string())),
            utm_campaign: Set(None),
            utm_content: Set(None),
            utm_term: Set(None),
            country: Set(Some("PT".to_string())),
            state: Set(None),
            city: Set(Some(city.to_string())),
        })
        .exec(db)
        .await
        .unwrap();
    }

    for i in 1..=12u32 {
        let funnel_id = match i {
            1..=5 => 100,
            6..=9 => 101,
            _ => 103,
        };
        let properties = match i {
            1 => Some(r#"{"amount": 49.9, "currency": "EUR"}"#.to_string()),
            2 => Some("not-json".to_string()),
            _ => None,
        };

        insert_event(
            db,
            event::ActiveModel {
                event_id: Set(format!("evt-{:02}", i)),
                event_name: Set(if i % 4 == 0 { "purchase" } else { "page_view" }.to_string()),
                pageview_id: Set(Some(format!("pv-{:02}", i))),
                session_id: Set(Some(if i <= 6 { "s1" } else { "s2" }.to_string())),
                event_time: Set(ts(2024, 1, i, 10, 0, 0)),
                user_id: Set(Some(if i % 2 == 1 { "u1" } else { "u2" }.to_string())),
                profession_id: Set(Some(if i <= 9 { 1 } else { 2 })),
                product_id: Set(if i % 3 == 0 { Some(10) } else { None }),
                funnel_id: Set(Some(funnel_id)),
                event_source: Set(Some("web".to_string())),
                event_type: Set(Some("track".to_string())),
                event_properties: Set(properties),
            },
        )
        .await;
    }

    insert_event(db, bare_event("evt-13", ts(2024, 1, 31, 23, 59, 59))).await;
    insert_event(db, bare_event("evt-14", ts(2024, 2, 1, 0, 0, 0))).await;
}

fn bare_event(id: &str, at: DateTime<Utc>) -> event::ActiveModel {
    event::ActiveModel {
        event_id: Set(id.to_string()),
        event_name: Set("page_view".to_string()),
        pageview_id: Set(None),
        session_id: Set(None),
        event_time: Set(at),
        user_id: Set(None),
        profession_id: Set(None),
        product_id: Set(None),
        funnel_id: Set(None),
        event_source: Set(None),
        event_type: Set(None),
        event_properties: Set(None),
    }
}

async fn insert_event(db: &DatabaseConnection, model: event::ActiveModel) {
    event::Entity::insert(model).exec(db).await.unwrap();
}

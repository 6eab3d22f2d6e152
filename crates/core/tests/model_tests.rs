// ═══════════════════════════════════════════════════════════════════
// Model Tests — Intensity, tiers, tiles, plans, UserData, StorageKey,
// Settings, serde shapes
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use savings_grid_core::models::account::Account;
use savings_grid_core::models::chart::SavingSource;
use savings_grid_core::models::denomination::{Intensity, IntensityTier, DENOMINATIONS};
use savings_grid_core::models::plan::{ExtraSaving, Plan};
use savings_grid_core::models::recommendation::{Recommendation, RecommendationRequest};
use savings_grid_core::models::settings::{Settings, DEFAULT_CURRENCY};
use savings_grid_core::models::tile::{Tile, TileDraft};
use savings_grid_core::models::user_data::{StorageKey, UserData, STORAGE_KEY_PREFIX};

fn sample_plan() -> Plan {
    let drafts = [
        TileDraft { day: 1, amount: 100.0 },
        TileDraft { day: 2, amount: 50.0 },
        TileDraft { day: 3, amount: 350.0 },
    ];
    Plan {
        id: Uuid::new_v4(),
        name: "Phone".into(),
        goal: 500.0,
        duration: 3,
        intensity: Intensity::new(4).unwrap(),
        start_date: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        tiles: drafts.into_iter().map(Tile::from_draft).collect(),
        extra_savings: vec![ExtraSaving {
            id: Uuid::new_v4(),
            amount: 25.0,
            date: Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
            description: "coins".into(),
        }],
        currency: "LKR".into(),
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Intensity
// ═══════════════════════════════════════════════════════════════════

mod intensity {
    use super::*;

    #[test]
    fn accepts_one_to_ten() {
        for level in Intensity::MIN..=Intensity::MAX {
            assert_eq!(Intensity::new(level).unwrap().level(), level);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Intensity::new(0).is_err());
        assert!(Intensity::new(11).is_err());
    }

    #[test]
    fn tiers() {
        let tier = |l| Intensity::new(l).unwrap().tier();
        assert_eq!(tier(1), IntensityTier::Low);
        assert_eq!(tier(3), IntensityTier::Low);
        assert_eq!(tier(4), IntensityTier::Medium);
        assert_eq!(tier(6), IntensityTier::Medium);
        assert_eq!(tier(7), IntensityTier::High);
        assert_eq!(tier(10), IntensityTier::High);
    }

    #[test]
    fn display() {
        assert_eq!(Intensity::new(7).unwrap().to_string(), "7");
        assert_eq!(IntensityTier::Medium.to_string(), "Medium");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Intensity::new(8).unwrap()).unwrap();
        assert_eq!(json, "8");
        let back: Intensity = serde_json::from_str("3").unwrap();
        assert_eq!(back.level(), 3);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Intensity>("0").is_err());
        assert!(serde_json::from_str::<Intensity>("42").is_err());
    }

    #[test]
    fn into_u8() {
        let raw: u8 = Intensity::new(9).unwrap().into();
        assert_eq!(raw, 9);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  IntensityTier bands
// ═══════════════════════════════════════════════════════════════════

mod tier_bands {
    use super::*;

    #[test]
    fn low_band() {
        assert!(IntensityTier::Low.admits(1.0));
        assert!(IntensityTier::Low.admits(100.0));
        assert!(!IntensityTier::Low.admits(500.0));
    }

    #[test]
    fn medium_band() {
        assert!(!IntensityTier::Medium.admits(5.0));
        assert!(IntensityTier::Medium.admits(10.0));
        assert!(IntensityTier::Medium.admits(1000.0));
        assert!(!IntensityTier::Medium.admits(2000.0));
    }

    #[test]
    fn high_band() {
        assert!(!IntensityTier::High.admits(50.0));
        assert!(IntensityTier::High.admits(100.0));
        assert!(IntensityTier::High.admits(5000.0));
    }

    #[test]
    fn master_list_is_ascending() {
        assert!(DENOMINATIONS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(DENOMINATIONS.len(), 11);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Tile / Plan / Account
// ═══════════════════════════════════════════════════════════════════

mod plan_tree {
    use super::*;

    #[test]
    fn tile_from_draft_starts_unsaved() {
        let a = Tile::from_draft(TileDraft { day: 4, amount: 20.0 });
        let b = Tile::from_draft(TileDraft { day: 4, amount: 20.0 });
        assert_eq!(a.day, 4);
        assert_eq!(a.amount, 20.0);
        assert!(!a.saved);
        assert!(a.saved_date.is_none());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn scheduled_total() {
        assert_eq!(sample_plan().scheduled_total(), 500.0);
    }

    #[test]
    fn tile_lookup() {
        let plan = sample_plan();
        let id = plan.tiles[1].id;
        assert_eq!(plan.tile(id).unwrap().amount, 50.0);
        assert!(plan.tile(Uuid::new_v4()).is_none());
    }

    #[test]
    fn account_plan_lookup() {
        let mut account = Account::new("Personal");
        let plan = sample_plan();
        let id = plan.id;
        account.plans.push(plan);
        assert_eq!(account.plan(id).unwrap().name, "Phone");
        assert!(account.plan(Uuid::new_v4()).is_none());
    }

    #[test]
    fn saving_source_display() {
        assert_eq!(SavingSource::Tile.to_string(), "Tile");
        assert_eq!(SavingSource::Extra.to_string(), "Extra");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  UserData / StorageKey
// ═══════════════════════════════════════════════════════════════════

mod user_data {
    use super::*;

    #[test]
    fn default_is_empty() {
        let data = UserData::default();
        assert!(data.accounts.is_empty());
        assert!(data.active_account_id.is_none());
        assert!(data.active_account().is_none());
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn active_account_follows_id() {
        let a = Account::new("A");
        let b = Account::new("B");
        let b_id = b.id;
        let data = UserData {
            accounts: vec![a, b],
            active_account_id: Some(b_id),
            ..UserData::default()
        };
        assert_eq!(data.active_account().unwrap().name, "B");
    }

    #[test]
    fn dangling_active_id_yields_none() {
        let data = UserData {
            accounts: vec![Account::new("A")],
            active_account_id: Some(Uuid::new_v4()),
            ..UserData::default()
        };
        assert!(data.active_account().is_none());
    }

    #[test]
    fn json_round_trip() {
        let mut account = Account::new("Personal");
        account.plans.push(sample_plan());
        let data = UserData {
            active_account_id: Some(account.id),
            accounts: vec![account],
            ..UserData::default()
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(serde_json::from_str::<UserData>(&json).unwrap(), data);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let data: UserData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, UserData::default());
    }

    #[test]
    fn user_keys() {
        assert_eq!(StorageKey::for_user(Some("abc")).as_str(), "budget-grid:data:abc");
        assert_eq!(StorageKey::for_user(Some("  abc ")).as_str(), "budget-grid:data:abc");
        assert!(StorageKey::for_user(Some("abc")).as_str().starts_with(STORAGE_KEY_PREFIX));
    }

    #[test]
    fn guest_key() {
        assert_eq!(StorageKey::guest().as_str(), "budget-grid:data:guest");
        assert_eq!(StorageKey::for_user(None), StorageKey::guest());
        assert_eq!(StorageKey::for_user(Some("   ")), StorageKey::guest());
        assert_eq!(StorageKey::guest().to_string(), "budget-grid:data:guest");
    }

    #[test]
    fn different_users_different_keys() {
        assert_ne!(StorageKey::for_user(Some("a")), StorageKey::for_user(Some("b")));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

#[allow(clippy::field_reassign_with_default)]
mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.currency, DEFAULT_CURRENCY);
        assert_eq!(s.currency, "LKR");
        assert!(s.advisor_endpoint.is_none());
        assert!(s.api_keys.is_empty());
    }

    #[test]
    fn missing_currency_defaults_to_lkr() {
        let s: Settings = serde_json::from_str(r#"{"api_keys": {"advisor": "k"}}"#).unwrap();
        assert_eq!(s.currency, "LKR");
        assert_eq!(s.api_keys.get("advisor"), Some(&"k".to_string()));
    }

    #[test]
    fn serde_roundtrip_bincode() {
        let mut s = Settings::default();
        s.currency = "EUR".into();
        s.advisor_endpoint = Some("https://advice.example/api".into());
        let bytes = bincode::serialize(&s).unwrap();
        assert_eq!(bincode::deserialize::<Settings>(&bytes).unwrap(), s);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Recommendation wire shape
// ═══════════════════════════════════════════════════════════════════

mod recommendation {
    use super::*;

    #[test]
    fn request_is_camel_case() {
        let json = serde_json::to_value(RecommendationRequest {
            goal_amount: 1000.0,
            duration_days: 20,
            savings_intensity: 3,
        })
        .unwrap();
        assert_eq!(json["goalAmount"], 1000.0);
        assert_eq!(json["durationDays"], 20);
        assert_eq!(json["savingsIntensity"], 3);
    }

    #[test]
    fn response_is_camel_case() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"dailySavingsRecommendation": 55.5, "explanation": "ok"}"#,
        )
        .unwrap();
        assert_eq!(rec.daily_savings_recommendation, 55.5);
        assert_eq!(rec.explanation, "ok");
    }
}

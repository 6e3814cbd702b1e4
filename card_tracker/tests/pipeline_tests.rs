//! End-to-end runs of the tracker against a mocked catalog

use card_tracker::api::CatalogClient;
use card_tracker::simulator::{fallback_sets, CardSimulator};
use card_tracker::{
    CardSearchService, CardTracker, Choice, SelectionPrompt, SortField, TrackerConfig,
};
use tcg_common::CardCatalogEntry;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn card_json(
    id: &str,
    name: &str,
    set_id: &str,
    set_name: &str,
    rarity: &str,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "number": "7",
        "rarity": rarity,
        "set": { "id": set_id, "name": set_name },
        "images": { "small": format!("https://images.example/{id}.png") }
    })
}

async fn mount_cards(server: &MockServer, name: &str, page_size: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", format!("name:\"{name}\"")))
        .and(query_param("pageSize", page_size))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(server)
        .await;
}

/// Picks a fixed candidate and answers manual searches from a script
struct ScriptedPrompt {
    pick: usize,
    manual: Vec<String>,
    asked: Vec<String>,
}

impl SelectionPrompt for ScriptedPrompt {
    fn choose(&mut self, query: &str, candidates: &[CardCatalogEntry]) -> Choice {
        self.asked.push(format!("{}:{}", query, candidates.len()));
        Choice::Pick(self.pick.min(candidates.len() - 1))
    }

    fn manual_query(&mut self, _original_name: &str) -> Option<String> {
        if self.manual.is_empty() {
            None
        } else {
            Some(self.manual.remove(0))
        }
    }
}

fn tracker_for(server: &MockServer) -> CardTracker {
    let config = TrackerConfig {
        api_base_url: server.uri(),
        seed: Some(11),
        load_demo: false,
        ..TrackerConfig::default()
    };
    let client = CatalogClient::with_base_url(&server.uri(), "").unwrap();
    let search = CardSearchService::with_client(
        client,
        CardSimulator::seeded(fallback_sets(), 11),
        config.page_size,
    );
    CardTracker::with_search(config, search)
}

#[tokio::test]
async fn test_upload_batch_against_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "base1", "name": "Base" },
                { "id": "swsh4", "name": "Vivid Voltage" }
            ]
        })))
        .mount(&server)
        .await;

    let pikachu = card_json("swsh4-25", "Pikachu", "swsh4", "Vivid Voltage", "Common");
    mount_cards(&server, "Pikachu", "1", serde_json::json!([pikachu])).await;

    let mut eevee = card_json("base1-51", "Eevee", "base1", "Base", "Common");
    eevee["tcgplayer"] = serde_json::json!({
        "prices": {
            "normal": { "market": 1.0 },
            "holofoil": { "market": 4.5 }
        }
    });
    mount_cards(&server, "Eevee", "10", serde_json::json!([eevee])).await;

    mount_cards(
        &server,
        "Mewtwo",
        "10",
        serde_json::json!([
            card_json("base1-10", "Mewtwo", "base1", "Base", "Rare Holo"),
            card_json("swsh4-70", "Mewtwo", "swsh4", "Vivid Voltage", "Rare"),
        ]),
    )
    .await;

    mount_cards(&server, "Missingno", "10", serde_json::json!([])).await;
    mount_cards(
        &server,
        "Ditto",
        "10",
        serde_json::json!([card_json("base1-3", "Ditto", "base1", "Base", "Rare")]),
    )
    .await;

    let mut tracker = tracker_for(&server);
    tracker.init().await;
    assert_eq!(tracker.sets().len(), 2);
    assert!(tracker.store().is_empty());

    let mut prompt = ScriptedPrompt {
        pick: 1,
        manual: vec!["  ".to_string(), "Ditto".to_string()],
        asked: Vec::new(),
    };
    let mut progress = Vec::new();
    let summary = tracker
        .upload(
            ["eevee-51.png", "mewtwo_card.jpg", "missingno.png"],
            &mut prompt,
            |p| progress.push((p.index, p.total, p.file_name.clone())),
        )
        .await;

    assert_eq!(
        progress,
        vec![
            (1, 3, "eevee-51.png".to_string()),
            (2, 3, "mewtwo_card.jpg".to_string()),
            (3, 3, "missingno.png".to_string()),
        ]
    );
    assert_eq!(summary.added.len(), 3);
    assert_eq!(summary.simulated, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.abandoned, 0);
    // A manual search always asks, even for one result
    assert_eq!(prompt.asked, vec!["Mewtwo:2", "Ditto:1"]);

    let entries = tracker.store().all();
    assert_eq!(entries[0].card_id, "base1-51");
    assert_eq!(entries[0].base_price, 4.5);
    assert_eq!(entries[0].origin_file, "eevee-51.png");

    assert_eq!(entries[1].card_id, "swsh4-70");
    assert_eq!(entries[1].set_name, "Vivid Voltage");

    assert_eq!(entries[2].card_id, "base1-3");
    assert!((3.0..=13.0).contains(&entries[2].base_price));
    // Large image falls back to the small one
    assert_eq!(entries[2].image_hi, entries[2].image);

    tracker.view_mut().set_set_filter("base1");
    tracker.sort_by(SortField::Name);
    let visible = tracker.visible();
    let names: Vec<&str> = visible.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ditto", "Eevee"]);
}

#[tokio::test]
async fn test_unreachable_catalog_falls_back_to_simulation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut tracker = tracker_for(&server);
    tracker.init().await;
    assert_eq!(tracker.sets().len(), 10);

    let mut prompt = ScriptedPrompt {
        pick: 0,
        manual: Vec::new(),
        asked: Vec::new(),
    };
    let summary = tracker
        .upload(["bulbasaur-1.png", "charizard.png"], &mut prompt, |_| {})
        .await;

    assert_eq!(summary.added.len(), 2);
    // Well-known names come back with a variant to choose from
    assert_eq!(prompt.asked, vec!["Charizard:2"]);

    let entries = tracker.store().all();
    assert_eq!(entries[0].name, "Bulbasaur");
    assert!(entries[0].card_id.starts_with("sim-"));
    assert!(entries[0].base_price > 0.0);
    assert_eq!(entries[1].name, "Charizard");
    assert!(tracker.sets().iter().any(|s| s.id == entries[0].set_id));
}

//! Tests for the disambiguation state machine.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::*;
use crate::search::CardSearchService;
use crate::simulator::{fallback_sets, CardSimulator};

fn card(id: &str, name: &str) -> CardCatalogEntry {
    serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
}

fn accepted(resolution: &Resolution) -> Option<&CardCatalogEntry> {
    match resolution {
        Resolution::Accepted { card, .. } => Some(card),
        _ => None,
    }
}

fn accepted_kind(resolution: &Resolution) -> Option<ResolutionKind> {
    match resolution {
        Resolution::Accepted { kind, .. } => Some(*kind),
        _ => None,
    }
}

/// Search backend answering from a fixed table
#[derive(Default)]
struct FakeSearch {
    results: HashMap<String, Vec<CardCatalogEntry>>,
    fail_on: Option<String>,
    queries: Vec<String>,
}

impl FakeSearch {
    fn with(mut self, query: &str, cards: Vec<CardCatalogEntry>) -> Self {
        self.results.insert(query.to_string(), cards);
        self
    }
}

impl CardSearch for FakeSearch {
    async fn search(&mut self, name: &str) -> Result<Vec<CardCatalogEntry>> {
        self.queries.push(name.to_string());
        if self.fail_on.as_deref() == Some(name) {
            return Err(TrackerError::Search("backend exploded".to_string()));
        }
        Ok(self.results.get(name).cloned().unwrap_or_default())
    }

    fn simulate_card(&mut self, name: &str) -> CardCatalogEntry {
        card("sim-1", name)
    }
}

/// Prompt replaying scripted answers; runs out as "closed dialog"
#[derive(Default)]
struct ScriptedPrompt {
    choices: VecDeque<Choice>,
    queries: VecDeque<Option<String>>,
    offered: Vec<usize>,
    empty_searches: Vec<String>,
}

impl SelectionPrompt for ScriptedPrompt {
    fn choose(&mut self, _query: &str, candidates: &[CardCatalogEntry]) -> Choice {
        self.offered.push(candidates.len());
        self.choices.pop_front().unwrap_or(Choice::Skip)
    }

    fn manual_query(&mut self, _original_name: &str) -> Option<String> {
        self.queries.pop_front().flatten()
    }

    fn no_results(&mut self, query: &str) {
        self.empty_searches.push(query.to_string());
    }
}

#[tokio::test]
async fn single_result_is_auto_accepted() {
    let mut search =
        FakeSearch::default().with("Charizard Vmax", vec![card("swsh1-20", "Charizard VMAX")]);
    let mut prompt = ScriptedPrompt::default();

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("charizard-vmax-20.png"))
        .await;

    assert_eq!(
        resolution,
        Resolution::Accepted {
            card: card("swsh1-20", "Charizard VMAX"),
            kind: ResolutionKind::Auto
        }
    );
    assert_eq!(search.queries, vec!["Charizard Vmax"]);
    assert!(prompt.offered.is_empty());
}

#[tokio::test]
async fn several_results_offer_all_candidates() {
    let mut search = FakeSearch::default().with(
        "Pikachu",
        vec![
            card("a", "Pikachu"),
            card("b", "Pikachu"),
            card("c", "Pikachu"),
        ],
    );
    let mut prompt = ScriptedPrompt {
        choices: VecDeque::from([Choice::Pick(1)]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("uploads/pikachu.jpg"))
        .await;

    assert_eq!(prompt.offered, vec![3]);
    assert_eq!(accepted(&resolution).map(|c| c.id.as_str()), Some("b"));
    assert_eq!(accepted_kind(&resolution), Some(ResolutionKind::Selected));
}

#[tokio::test]
async fn skip_creates_nothing() {
    let mut search =
        FakeSearch::default().with("Pikachu", vec![card("a", "Pikachu"), card("b", "Pikachu")]);
    let mut prompt = ScriptedPrompt {
        choices: VecDeque::from([Choice::Skip]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("pikachu.jpg"))
        .await;
    assert_eq!(resolution, Resolution::Skipped);
}

#[tokio::test]
async fn out_of_range_pick_is_a_skip() {
    let mut search =
        FakeSearch::default().with("Pikachu", vec![card("a", "Pikachu"), card("b", "Pikachu")]);
    let mut prompt = ScriptedPrompt {
        choices: VecDeque::from([Choice::Pick(7)]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("pikachu.jpg"))
        .await;
    assert_eq!(resolution, Resolution::Skipped);
}

#[tokio::test]
async fn no_results_enters_manual_search_until_found() {
    let mut search = FakeSearch::default().with("Mr Mime", vec![card("base2-6", "Mr. Mime")]);
    let mut prompt = ScriptedPrompt {
        queries: VecDeque::from([
            Some("   ".to_string()),
            Some("Mister Mime".to_string()),
            Some(" Mr Mime ".to_string()),
        ]),
        choices: VecDeque::from([Choice::Pick(0)]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("mime-scan.png"))
        .await;

    // Blank query is ignored, the miss is reported, the hit goes to selection
    assert_eq!(search.queries, vec!["Mime Scan", "Mister Mime", "Mr Mime"]);
    assert_eq!(prompt.empty_searches, vec!["Mister Mime"]);
    assert_eq!(prompt.offered, vec![1]);
    assert_eq!(
        accepted(&resolution).map(|c| c.id.as_str()),
        Some("base2-6")
    );
}

#[tokio::test]
async fn abandoning_manual_search_creates_nothing() {
    let mut search = FakeSearch::default();
    let mut prompt = ScriptedPrompt {
        queries: VecDeque::from([Some("Nothing".to_string()), None]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("blurry.png"))
        .await;
    assert_eq!(resolution, Resolution::Abandoned);
}

#[tokio::test]
async fn search_error_falls_back_to_simulated_card() {
    let mut search = FakeSearch {
        fail_on: Some("Mewtwo".to_string()),
        ..FakeSearch::default()
    };
    let mut prompt = ScriptedPrompt::default();

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("mewtwo-card.png"))
        .await;

    assert_eq!(
        resolution,
        Resolution::Accepted {
            card: card("sim-1", "Mewtwo"),
            kind: ResolutionKind::Simulated
        }
    );
}

#[tokio::test]
async fn error_during_manual_search_falls_back_too() {
    let mut search = FakeSearch {
        fail_on: Some("Boom".to_string()),
        ..FakeSearch::default()
    };
    let mut prompt = ScriptedPrompt {
        queries: VecDeque::from([Some("Boom".to_string())]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("eevee.png"))
        .await;
    assert_eq!(
        accepted(&resolution).map(|c| c.name.as_str()),
        Some("Eevee")
    );
}

#[tokio::test]
async fn path_without_file_name_is_simulated() {
    let mut search = FakeSearch::default();
    let mut prompt = ScriptedPrompt::default();

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("/"))
        .await;

    assert_eq!(accepted_kind(&resolution), Some(ResolutionKind::Simulated));
    assert!(search.queries.is_empty());
}

#[tokio::test]
async fn simulated_pikachu_offers_both_results_plus_skip() {
    let mut search = CardSearchService::offline(CardSimulator::seeded(fallback_sets(), 21));
    let mut prompt = ScriptedPrompt {
        choices: VecDeque::from([Choice::Skip]),
        ..ScriptedPrompt::default()
    };

    let resolution = DisambiguationFlow::new(&mut search, &mut prompt)
        .resolve(Path::new("pikachu.png"))
        .await;

    assert_eq!(prompt.offered, vec![2]);
    assert_eq!(resolution, Resolution::Skipped);
}

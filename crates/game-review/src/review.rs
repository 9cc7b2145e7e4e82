//! Glue between the evaluation fetcher and the game analyzer.

use chess_analysis::{GameAnalysis, GameAnalyzer, PositionEval};
use cloud_eval::{BatchReport, EvalFetcher, EvalService};

use crate::input::GameFile;

/// Fetches evaluations for every position, aligned by index.
///
/// Positions are sent in batches no larger than the fetcher accepts. The
/// rate-limit pause separates batches only when the previous one made a
/// request. Positions without an evaluation come back as `None`.
pub async fn fetch_evaluations<S: EvalService>(
    fetcher: &EvalFetcher<S>,
    positions: &[String],
    multi_pv: u8,
) -> anyhow::Result<Vec<Option<PositionEval>>> {
    let mut evaluations = Vec::with_capacity(positions.len());
    let mut requested = false;
    for chunk in positions.chunks(fetcher.max_batch()) {
        if requested {
            tokio::time::sleep(fetcher.rate_limit_delay()).await;
        }
        let report = fetcher.evaluate_batch(chunk, multi_pv).await?;
        requested = report.cached < report.count;
        evaluations.extend(aligned(&report));
    }

    let missing = evaluations.iter().filter(|e| e.is_none()).count();
    if missing > 0 {
        tracing::warn!(missing, total = positions.len(), "some positions have no evaluation");
    }
    Ok(evaluations)
}

fn aligned(report: &BatchReport) -> impl Iterator<Item = Option<PositionEval>> + '_ {
    report.evaluations.iter().map(|entry| entry.position_eval())
}

/// Evaluations for a game: taken from the file when present, fetched
/// otherwise, or left empty when offline.
pub async fn game_evaluations<S: EvalService>(
    game: &GameFile,
    fetcher: Option<&EvalFetcher<S>>,
    multi_pv: u8,
) -> anyhow::Result<Vec<Option<PositionEval>>> {
    if let Some(evaluations) = &game.evaluations {
        return Ok(evaluations.clone());
    }
    match fetcher {
        Some(fetcher) => fetch_evaluations(fetcher, game.positions_for_fetch()?, multi_pv).await,
        None => {
            tracing::info!("offline: moves will be left unclassified");
            Ok(Vec::new())
        }
    }
}

/// Runs the analyzer over a game and its evaluations.
pub fn analyze(
    analyzer: &GameAnalyzer<'_>,
    game: &GameFile,
    evaluations: &[Option<PositionEval>],
) -> anyhow::Result<GameAnalysis> {
    let analysis = analyzer.analyze(&game.moves, evaluations)?;
    tracing::info!(
        moves = analysis.total_moves,
        classified = analysis.stats.total(),
        opening = analysis.opening.as_ref().map(|o| o.name.as_str()),
        "game reviewed"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_analysis::MoveTier;
    use cloud_eval::{CloudEval, CloudPv, FetcherConfig, ServiceError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Knows every position except those containing "unknown"; scores
    /// positions by their trailing number.
    #[derive(Default)]
    struct FakeService {
        calls: AtomicUsize,
    }

    impl EvalService for FakeService {
        async fn cloud_eval(&self, fen: &str, _multi_pv: u8) -> Result<CloudEval, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if fen.contains("unknown") {
                return Err(ServiceError::NotFound);
            }
            let cp = fen
                .rsplit('-')
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(0);
            Ok(CloudEval {
                fen: fen.to_string(),
                knodes: 1,
                depth: 20,
                pvs: vec![CloudPv {
                    moves: "e2e4".to_string(),
                    cp: Some(cp),
                    mate: None,
                }],
            })
        }
    }

    fn game(positions: &[&str]) -> GameFile {
        GameFile::parse(&format!(
            r#"{{
                "moves": [
                    {{"san": "e4", "from": "e2", "to": "e4", "color": "w"}},
                    {{"san": "c5", "from": "c7", "to": "c5", "color": "b"}}
                ],
                "positions": {}
            }}"#,
            serde_json::to_string(positions).unwrap()
        ))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_then_analyze() {
        let fetcher = EvalFetcher::new(FakeService::default(), &FetcherConfig::default());
        let game = game(&["p-20", "p-15", "p-10"]);

        let evals = game_evaluations(&game, Some(&fetcher), 3).await.unwrap();
        assert_eq!(evals.len(), 3);
        assert!(evals.iter().all(Option::is_some));

        let analysis = analyze(&GameAnalyzer::default(), &game, &evals).unwrap();
        assert_eq!(analysis.total_moves, 2);
        assert_eq!(analysis.stats.total(), 2);
        assert_eq!(analysis.opening.unwrap().eco, "B20");
        // 1. e4 matches the top line
        assert_eq!(
            analysis.moves[0].classification.unwrap().tier,
            MoveTier::Best
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_positions_become_gaps() {
        let fetcher = EvalFetcher::new(FakeService::default(), &FetcherConfig::default());
        let game = game(&["p-20", "unknown", "p-10"]);

        let evals = game_evaluations(&game, Some(&fetcher), 3).await.unwrap();
        assert!(evals[1].is_none());

        let analysis = analyze(&GameAnalyzer::default(), &game, &evals).unwrap();
        assert_eq!(analysis.stats.total(), 0);
        assert_eq!(analysis.total_moves, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_game_is_fetched_in_batches() {
        let config = FetcherConfig {
            max_batch: 2,
            ..FetcherConfig::default()
        };
        let fetcher = EvalFetcher::new(FakeService::default(), &config);
        let positions: Vec<String> = (0..5).map(|i| format!("p-{i}")).collect();

        let evals = fetch_evaluations(&fetcher, &positions, 1).await.unwrap();
        assert_eq!(evals.len(), 5);
        assert_eq!(fetcher.service().calls.load(Ordering::SeqCst), 5);
        assert_eq!(evals[4].as_ref().unwrap().cp, Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_batches_are_not_rate_limited() {
        let config = FetcherConfig {
            max_batch: 1,
            ..FetcherConfig::default()
        };
        let fetcher = EvalFetcher::new(FakeService::default(), &config);
        let positions: Vec<String> = (0..4).map(|i| format!("p-{i}")).collect();

        let start = tokio::time::Instant::now();
        fetch_evaluations(&fetcher, &positions, 1).await.unwrap();
        // one pause between each of the four single-position batches
        assert!(start.elapsed() >= 3 * config.rate_limit_delay());

        let start = tokio::time::Instant::now();
        let evals = fetch_evaluations(&fetcher, &positions, 1).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(evals.iter().all(Option::is_some));
        assert_eq!(fetcher.service().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_offline_and_embedded_evaluations_skip_fetching() {
        let fetcher = EvalFetcher::new(FakeService::default(), &FetcherConfig::default());

        let offline = game(&[]);
        let evals = game_evaluations::<FakeService>(&offline, None, 3).await.unwrap();
        assert!(evals.is_empty());

        let mut embedded = game(&[]);
        embedded.evaluations = Some(vec![Some(PositionEval::centipawns(5)), None, None]);
        let evals = game_evaluations(&embedded, Some(&fetcher), 3).await.unwrap();
        assert_eq!(evals.len(), 3);
        assert_eq!(fetcher.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_positions_is_an_error() {
        let fetcher = EvalFetcher::new(FakeService::default(), &FetcherConfig::default());
        let game = game(&["p-1"]);
        assert!(game_evaluations(&game, Some(&fetcher), 3).await.is_err());
    }
}

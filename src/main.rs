//! Console demo for the adaptive matching dialogue.
//!
//! Wires the keyword extractor and the bundled demo catalog into the
//! orchestrator and drives a session from stdin. Console only; serving the
//! engine over a network is a deployment concern, not this binary's.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use policy_navigator::adapters::extractor::KeywordExtractor;
use policy_navigator::adapters::retriever::InMemoryCatalog;
use policy_navigator::adapters::store::FileSessionStore;
use policy_navigator::application::handlers::{AdvanceTurnCommand, AdvanceTurnHandler};
use policy_navigator::config::AppConfig;
use policy_navigator::domain::dialogue::{DialogueOrchestrator, TurnResult};
use policy_navigator::domain::foundation::SessionId;
use policy_navigator::domain::matching::{FinalRanker, HybridScorer};

const DEMO_CATALOG: &str = include_str!("../demos/catalog.yaml");

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let catalog = InMemoryCatalog::from_yaml(DEMO_CATALOG)?;
    let orchestrator = DialogueOrchestrator::new(
        Arc::new(KeywordExtractor::new()),
        Arc::new(catalog),
    )
    .with_scorer(HybridScorer::new(config.engine.hybrid_weights()))
    .with_stopping(config.engine.stopping_policy())
    .with_ranker(FinalRanker::new(config.engine.ranking_weights()));

    let store = FileSessionStore::new(&config.storage.session_dir);
    let handler = AdvanceTurnHandler::new(Arc::new(store), Arc::new(orchestrator));

    let session_id = SessionId::new();
    println!("Policy Navigator demo (session {})", session_id);
    println!("Describe what you're looking for, e.g. \"I'm a 29 year old founder in Seoul\".");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() || message == "quit" {
            break;
        }

        let result = handler
            .handle(AdvanceTurnCommand {
                session_id,
                message: message.to_string(),
            })
            .await?;

        match result.turn {
            TurnResult::Question(q) => {
                println!();
                println!(
                    "[{}/{}] {}",
                    q.progress.current_step, q.progress.max_steps, q.question
                );
                if !q.options.is_empty() {
                    println!("    options: {}", q.options.join(", "));
                }
                println!();
            }
            TurnResult::FinalResult(f) => {
                println!();
                println!(
                    "{} (quality {:?}, stopped: {})",
                    f.message, f.match_quality.grade, f.stop_reason
                );
                for (rank, item) in f.recommendations.iter().enumerate() {
                    println!(
                        "  {}. {} [{}] score {:.2} - {}",
                        rank + 1,
                        item.title,
                        item.id,
                        item.final_score,
                        item.justification
                    );
                }
                break;
            }
        }
    }

    Ok(())
}

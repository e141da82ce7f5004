//! Headless session runner (default binary).
//!
//! Plays one session with the greedy autoplay policy and prints the summary as JSON on
//! stdout. Configuration comes from `HONEY_MATCH_*` environment variables; the only
//! argument is an optional policy name (`greedy` or `first`).

use anyhow::{anyhow, Result};

use honey_match::engine::Policy;
use honey_match::runtime::{run_session, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let policy = match args.first() {
        Some(name) => {
            Policy::from_str(name).ok_or_else(|| anyhow!("unknown policy: {}", name))?
        }
        None => Policy::default(),
    };

    let config = RuntimeConfig::from_env();
    let summary = run_session(&config, policy).await?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

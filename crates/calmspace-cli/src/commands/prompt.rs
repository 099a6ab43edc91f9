use calmspace_core::crypto::OsRandom;
use calmspace_core::prompts::{daily_prompt, random_prompt};
use chrono::Local;

use crate::cli::PromptArgs;

/// Print today's writing prompt, or a random one.
pub fn handle_prompt(args: &PromptArgs) -> anyhow::Result<()> {
    let prompt = if args.random {
        random_prompt(&OsRandom)?
    } else {
        daily_prompt(Local::now().date_naive())
    };
    println!("{}", prompt);
    Ok(())
}

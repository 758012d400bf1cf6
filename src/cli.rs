use anyhow::{Context, Result};
use tracing::debug;

use discovery_cli::Invocation;

// Execute the parsed command
pub fn execute_command(invocation: &Invocation) -> Result<()> {
    if let Some(text) = invocation.help_text() {
        println!("{}", text.trim_end());
        return Ok(());
    }

    debug!(
        command = ?invocation.kind(),
        output = %invocation.output(),
        "request ready for transport"
    );

    // Output the assembled request as JSON
    let json = serde_json::to_string_pretty(invocation)
        .with_context(|| format!("failed to serialize {:?} request to JSON", invocation.kind()))?;
    println!("{json}");

    Ok(())
}

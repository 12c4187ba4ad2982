//! Schema command: JSON Schema of the `analyze --json` output.

use clap::Args;
use tracing::{debug, instrument};

use textlens_core::AnalysisResult;

/// Arguments for the `schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

/// Print the JSON Schema describing [`AnalysisResult`].
#[instrument(name = "cmd_schema", skip_all)]
pub fn cmd_schema(_args: SchemaArgs) -> anyhow::Result<()> {
    debug!("executing schema command");
    let schema = schemars::schema_for!(AnalysisResult);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_top_level_sections() {
        let schema = serde_json::to_value(schemars::schema_for!(AnalysisResult)).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("statistics").is_some());
        assert!(properties.get("readability").is_some());
        assert!(properties.get("keywords").is_some());
    }
}

//! Prompt templates for the report summary.
//!
//! The wording is locked: a clear role, a hard length limit, and a
//! requirement that every bullet carries a number from the data. Iterate
//! on the template here, test a few runs, then leave it alone so output
//! stays consistent across backends.

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a data analyst. Reply only in markdown. \
     Be concise. Use only numbers from the data. No filler.";

/// Builds the user prompt around the processed data block.
#[must_use]
pub fn build_user_prompt(data_block: &str) -> String {
    format!(
        "Using the state population data below, summarize it and give business \
         opportunities and risks, as a very short report in markdown.\n\
         \n\
         Requirements:\n\
         - One short paragraph (1-2 sentences) with key numbers (largest, total, spread).\n\
         - Then bulleted business opportunities, then bulleted risks; each bullet must \
         include a specific number from the data.\n\
         - Use markdown only (no intro text). Be concise; more data, fewer words.\n\
         \n\
         Data:\n\
         ---\n\
         {data_block}\n\
         ---"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_data_block_verbatim() {
        let prompt = build_user_prompt("Total: 5,762,913 across 2 geographies.");
        assert!(prompt.contains("Total: 5,762,913 across 2 geographies."));
    }

    #[test]
    fn states_format_requirements() {
        let prompt = build_user_prompt("data");
        assert!(prompt.contains("opportunities"));
        assert!(prompt.contains("risks"));
        assert!(prompt.contains("markdown"));
    }
}

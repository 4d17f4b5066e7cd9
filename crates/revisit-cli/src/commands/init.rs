//! The `revisit init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("revisit.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("bank.json"), SAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Edit revisit.toml to pick a preset");
    println!("  2. Run: revisit validate --bank bank.json");
    println!("  3. Run: revisit quiz --bank bank.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# revisit configuration

# classic, strict, paced, endless or drill
preset = "classic"

[session]
# review_threshold = 80.0
# wrong_answer_trigger = 5
# max_review_cycles = 3
# repeated_review_limit = 4
# cyclic = true

[export]
enabled = true
dir = "."
"#;

const SAMPLE_BANK: &str = r#"[
  [
    "Select two known Sci-Fi writers:",
    "A. Wolfgang Amadeus Mozart.",
    "B. Isaac Asimov.",
    "C. Arthur C. Clarke.",
    "D. Ludwig van Beethoven.",
    "Answer: B, C.",
    "Explanation",
    "Asimov and Clarke wrote science fiction; Mozart and Beethoven wrote music."
  ],
  [
    "Which planet is known as the",
    "Red Planet?",
    "A. Venus.",
    "B. Mars.",
    "C. Jupiter.",
    "Answer: B.",
    "Explanation",
    "Iron oxide on its surface gives Mars its colour."
  ],
  [
    "Which of these are prime numbers?",
    "A. 2.",
    "B. 9.",
    "C. 11.",
    "D. 15.",
    "Answer: A, C.",
    "Explanation",
    "9 and 15 are divisible by 3."
  ]
]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config: crate::config::RevisitConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.preset, Some(revisit_core::Preset::Classic));
        assert!(config.export.enabled);
    }

    #[test]
    fn sample_bank_is_valid() {
        let bank = revisit_core::parser::parse_bank_str(SAMPLE_BANK).unwrap();
        assert_eq!(bank.len(), 3);
        assert!(revisit_core::parser::validate_bank(&bank).is_empty());
    }
}

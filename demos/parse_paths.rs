//! Classifying spec keys and parsing output paths.
//!
//! Run with: cargo run --example parse_paths

use serde_json::json;
use shiftr_spec::{parse_dot_notation_rhs, parse_single_key, ShiftrSpec};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    for key in ["rating", "rating-*", "&(1,1)", "[2]", "@(2,foo.bar)", "\\@pants"] {
        let element = parse_single_key(key)?;
        println!("{:<14} -> {:<10} {}", key, element.kind().as_str(), element);
    }

    let path = parse_dot_notation_rhs("data[2].&(1,1)")?;
    let segments: Vec<String> = path.iter().map(|e| format!("{}({})", e.kind(), e)).collect();
    println!("\n{} -> {}", path, segments.join(" . "));

    // Invalid keys fail with the key and the broken rule
    if let Err(e) = parse_single_key("a&*b") {
        println!("\n{}", e);
    }

    let spec = ShiftrSpec::new(&json!({
        "rating": {
            "primary": { "value": "Rating" },
            "*": { "value": "SecondaryRatings.&1.Value" }
        }
    }))?;
    println!("\n{}", serde_json::to_string_pretty(&spec)?);

    Ok(())
}

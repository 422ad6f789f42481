//! Prints the `_search` request produced for a sample ELSEQL query.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example translate
//! ```

use elseql_search::translate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = r#"SELECT sku, price FACETS vendor FROM catalog.v2
        WHERE price >= 10 AND tags = "sale"
        ORDER BY price DESC LIMIT 0,25"#;

    let translated = translate(query, None, None)?;

    println!("POST /{}", translated.path());
    println!("{}", serde_json::to_string_pretty(&translated.body)?);

    Ok(())
}

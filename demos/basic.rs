use tag_similarity::{SimilarityConfig, SimilarityEngine};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // build the corpus: one call per document with its tag names
    let mut engine: SimilarityEngine = SimilarityEngine::new(SimilarityConfig {
        max_count: 3,
        min_score: 1e-4,
    });
    engine.add_doc("rust-intro".to_string(), &["rust", "programming", "tutorial"]);
    engine.add_doc("rust-async".to_string(), &["rust", "programming", "async"]);
    engine.add_doc("python-intro".to_string(), &["python", "programming", "tutorial"]);
    engine.add_doc("sourdough".to_string(), &["baking", "bread"]);
    engine.add_doc("rye-bread".to_string(), &["baking", "bread", "rye"]);
    engine.add_doc("untagged".to_string(), &[] as &[&str]);

    let report = engine.compute().expect("valid configuration");

    for (key, neighbors) in report.iter() {
        println!("{key}:");
        for neighbor in neighbors {
            println!("    {} ({:.4})", neighbor.key, neighbor.score);
        }
    }
    println!("documents with similar documents: {}", report.len());
}

//! Behavioural properties of the recursive chunker.

use docsplit_chunk::{chunk, Chunk, Metadata, RecursiveChunker, SeparatorSet};
use serde_json::json;

/// Twelve 100-character sentences in a single paragraph.
fn twelve_sentences() -> String {
    (1..=12)
        .map(|i| format!("Sentence {:02} {}. ", i, "a".repeat(86)))
        .collect()
}

fn sample_markdown() -> String {
    let mut doc = String::from("# Ledger API\n\nThe ledger records every movement of funds.\n");
    for section in ["Accounts", "Transfers", "Reconciliation", "Webhooks"] {
        doc.push_str(&format!("\n## {}\n\n", section));
        for i in 0..6 {
            doc.push_str(&format!(
                "{} paragraph {} explains how the {} flow behaves under load. ",
                section,
                i,
                section.to_lowercase()
            ));
            if i % 2 == 1 {
                doc.push_str("\n\n");
            }
        }
        doc.push_str("\n```\nPOST /v1/transfers\n{\"amount\": 100}\n```\n");
    }
    doc
}

fn url_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("url".to_string(), json!("x"));
    metadata
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunks = chunk("", 500, 0, &SeparatorSet::text(), &Metadata::new()).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn short_text_is_a_single_chunk() {
    let metadata = url_metadata();
    let chunks = chunk("short text", 500, 0, &SeparatorSet::text(), &metadata).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "short text");
    assert_eq!(chunks[0].metadata, metadata);
}

#[test]
fn paragraph_splits_into_three_chunks() {
    let text = twelve_sentences();
    assert_eq!(char_len(&text), 1200);

    let chunks = chunk(&text, 500, 0, &SeparatorSet::text(), &Metadata::new()).unwrap();

    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| char_len(&c.content) <= 500));
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn overlap_repeats_tail_of_previous_chunk() {
    let text = twelve_sentences();
    let chunks = chunk(&text, 500, 50, &SeparatorSet::text(), &Metadata::new()).unwrap();

    assert_eq!(chunks.len(), 3);
    for pair in chunks.windows(2) {
        let prev = &pair[0].content;
        let tail = &prev[prev.len() - 50..];
        assert!(pair[1].content.starts_with(tail));
        assert_eq!(pair[1].overlap_text(), tail);
    }
    assert!(chunks.iter().all(|c| char_len(&c.content) <= 500));
}

#[test]
fn invalid_configuration_fails_for_any_input() {
    for text in ["", "short text", "a much longer text with words"] {
        let seps = SeparatorSet::text();
        let metadata = Metadata::new();
        assert!(chunk(text, 0, 0, &seps, &metadata).is_err());
        assert!(chunk(text, 10, 10, &seps, &metadata).is_err());
        assert!(chunk(text, 10, 25, &seps, &metadata).is_err());
    }
}

#[test]
fn empty_separator_list_is_rejected_before_splitting() {
    let text = "word ".repeat(200);
    let err = chunk(&text, 100, 0, &SeparatorSet::new(Vec::<String>::new()), &Metadata::new())
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn leaves_reconstruct_input() {
    let texts = [
        sample_markdown(),
        twelve_sentences(),
        "no separators at all".repeat(20),
        "Ünïcödé ✓ text\n\nwith lines\nand wörds".to_string(),
    ];

    for seps in [SeparatorSet::text(), SeparatorSet::markdown()] {
        for max_size in [1, 7, 64, 300] {
            let chunker = RecursiveChunker::new(max_size, 0, seps.clone()).unwrap();
            for text in &texts {
                let joined: String = chunker.leaves(text).map(|leaf| leaf.text).collect();
                assert_eq!(&joined, text);
            }
        }
    }
}

#[test]
fn chunks_respect_size_bound() {
    let text = sample_markdown();
    for (max_size, overlap) in [(80, 0), (120, 20), (200, 60), (500, 100)] {
        let chunker = RecursiveChunker::new(max_size, overlap, SeparatorSet::markdown()).unwrap();
        for c in chunker.chunk_text(&text, &Metadata::new()) {
            assert!(
                char_len(&c.content) <= max_size,
                "chunk of {} chars exceeds {}",
                char_len(&c.content),
                max_size
            );
        }
    }
}

#[test]
fn overlap_is_bounded_and_cores_tile_the_text() {
    let text = sample_markdown();
    let overlap = 30;
    let chunker = RecursiveChunker::new(150, overlap, SeparatorSet::markdown()).unwrap();
    let chunks = chunker.chunk_text(&text, &Metadata::new());

    assert!(chunks.len() > 3);
    assert_eq!(chunks[0].overlap, 0);
    for pair in chunks.windows(2) {
        let shared = char_len(pair[1].overlap_text());
        assert!(shared <= overlap);
        assert!(shared <= char_len(&pair[0].content));
        assert!(pair[0].content.ends_with(pair[1].overlap_text()));
        assert_eq!(pair[0].end(), pair[1].start + pair[1].overlap);
    }

    let rebuilt: String = chunks.iter().map(Chunk::core).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn oversized_indivisible_unit_is_emitted_whole() {
    let run = "x".repeat(40);
    let text = format!("short words {} tail", run);
    let chunks = chunk(&text, 10, 0, &SeparatorSet::new(["\n\n", " "]), &Metadata::new()).unwrap();

    assert!(chunks.iter().any(|c| c.content.starts_with(&run)));
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn metadata_is_propagated_unmodified() {
    let mut metadata = url_metadata();
    metadata.insert("source".to_string(), json!({"bucket": "docs", "rev": 3}));

    let chunks = chunk(&sample_markdown(), 100, 10, &SeparatorSet::markdown(), &metadata).unwrap();
    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|c| c.metadata == metadata));
}

#[test]
fn chunking_is_deterministic() {
    let text = sample_markdown();
    let seps = SeparatorSet::markdown();
    let first = chunk(&text, 120, 15, &seps, &url_metadata()).unwrap();
    let second = chunk(&text, 120, 15, &seps, &url_metadata()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn chunker_is_shareable_across_threads() {
    let chunker = std::sync::Arc::new(
        RecursiveChunker::new(100, 10, SeparatorSet::markdown()).unwrap(),
    );
    let text = sample_markdown();
    let expected = chunker.chunk_text(&text, &Metadata::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let chunker = chunker.clone();
            let text = text.clone();
            std::thread::spawn(move || chunker.chunk_text(&text, &Metadata::new()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

use crate::chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, TextChunker};

#[test]
fn test_empty_document_produces_no_chunks() {
    let chunker = TextChunker::default();
    assert!(chunker.produce_chunks("").is_empty());
    assert!(chunker.produce_chunks("   \n\n  ").is_empty());
}

#[test]
fn test_small_document_single_chunk() {
    let chunker = TextChunker::default();
    let chunks = chunker.produce_chunks("a short document");
    assert_eq!(chunks, vec!["a short document".to_string()]);
}

#[test]
fn test_defaults() {
    let chunker = TextChunker::default();
    let document = "x".repeat(DEFAULT_CHUNK_SIZE / 2);
    assert_eq!(chunker.produce_chunks(&document).len(), 1);
    assert_eq!(DEFAULT_CHUNK_OVERLAP, 256);
}

#[test]
fn test_chunks_never_exceed_chunk_size() {
    let chunker = TextChunker::new(50, 10);
    let document = "the quick brown fox jumps over the lazy dog. ".repeat(20);
    let chunks = chunker.produce_chunks(&document);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.len() <= 50, "chunk too large: {}", chunk.len());
        assert!(document.contains(chunk.as_str()));
    }
}

#[test]
fn test_prefers_paragraph_breaks() {
    let chunker = TextChunker::new(40, 0);
    let document = "first paragraph body\n\nsecond paragraph body here";
    let chunks = chunker.produce_chunks(document);

    assert_eq!(chunks[0], "first paragraph body\n\n");
    assert!(chunks[1].starts_with("second paragraph"));
}

#[test]
fn test_overlap_repeats_tail_of_previous_chunk() {
    let chunker = TextChunker::new(30, 8);
    let document = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii";
    let chunks = chunker.produce_chunks(document);

    assert!(chunks.len() > 1);
    // 后一分片以前一分片的尾部内容开头
    for pair in chunks.windows(2) {
        let head = &pair[1][..8.min(pair[1].len())];
        assert!(pair[0].contains(head));
    }
    // 末分片必须收束在文档结尾
    assert!(document.ends_with(chunks.last().unwrap().as_str()));
}

#[test]
fn test_hard_cut_without_natural_breaks() {
    let chunker = TextChunker::new(10, 2);
    let document = "abcdefghijklmnopqrstuvwxyz";
    let chunks = chunker.produce_chunks(document);

    assert!(chunks.len() > 1);
    assert_eq!(chunks[0], "abcdefghij");
    for chunk in &chunks {
        assert!(chunk.len() <= 10);
    }
    assert!(document.ends_with(chunks.last().unwrap().as_str()));
}

#[test]
fn test_multibyte_text_is_split_on_char_boundaries() {
    let chunker = TextChunker::new(10, 2);
    let document = "中文字符需要按字符边界切分而不是字节边界".repeat(3);
    let chunks = chunker.produce_chunks(&document);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        // 能作为合法&str取出即说明边界正确，再确认确属原文
        assert!(document.contains(chunk.as_str()));
    }
}

#[test]
fn test_tiny_chunk_size_terminates_on_multibyte_text() {
    // 预算小于单个字符的编码宽度时依然前进、最终停机
    let chunker = TextChunker::new(1, 0);
    let document = "中文文本";
    let chunks = chunker.produce_chunks(document);

    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        assert!(document.contains(chunk.as_str()));
    }
    // 无重叠时分片依序拼接恰好还原原文
    assert_eq!(chunks.concat(), document);
}

#[test]
fn test_overlap_clamped_below_chunk_size() {
    // 重叠不小于分片大小时切分仍然前进、最终停机
    let chunker = TextChunker::new(10, 10);
    let document = "abcdefghij".repeat(5);
    let chunks = chunker.produce_chunks(&document);
    assert!(!chunks.is_empty());
}

// Integration tests for the StrBuilder public API
// Tests cover: appends, growth, replace, indexing, equality, pooling, properties

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chunkstr::{
    Append, BufferError, BuilderConfig, LINE_TERMINATOR, PoolConfig, SizeClassPool, StrBuilder,
};

fn std_hash(value: &StrBuilder) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Same text, spread over as many chunks as the config allows.
fn build_in_pieces(text: &str, piece: usize, config: BuilderConfig) -> StrBuilder {
    let mut sb = StrBuilder::unpooled(config);
    let mut rest = text;
    while !rest.is_empty() {
        let mut cut = piece.min(rest.len());
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (head, tail) = rest.split_at(cut);
        sb.append(head);
        rest = tail;
    }
    sb
}

// ============================================================================
// Construction and Basic Appends
// ============================================================================

#[test]
fn test_empty_builder() {
    let sb = StrBuilder::new();
    assert!(sb.is_empty());
    assert_eq!(sb.len(), 0);
    assert_eq!(sb.to_text(), "");
    assert_eq!(sb.chunks().count(), 0, "Fresh builder should have no chunks");
}

#[test]
fn test_from_text() {
    let sb = StrBuilder::from_text(Some("Hello"));
    assert_eq!(sb.len(), 5);
    assert_eq!(sb.to_text(), "Hello");
    assert!(StrBuilder::from_text(None).is_empty());
}

#[test]
fn test_mixed_primitive_appends() {
    let mut sb = StrBuilder::new();
    sb.append("PI=").append(3.14).append(true).append(i16::MAX);
    assert_eq!(sb.to_text(), "PI=3.14True32767");
}

#[test]
fn test_append_all_in_order() {
    let mut sb = StrBuilder::new();
    sb.append_all(&[&"x=", &-42i64, &' ', &false, &Some(7u8), &None::<&str>]);
    assert_eq!(sb.to_text(), "x=-42 False7");
}

#[test]
fn test_integer_boundaries() {
    let cases: Vec<(Box<dyn Append>, String)> = vec![
        (Box::new(0i32), "0".into()),
        (Box::new(-1i32), "-1".into()),
        (Box::new(9u8), "9".into()),
        (Box::new(10u8), "10".into()),
        (Box::new(i32::MIN), i32::MIN.to_string()),
        (Box::new(i64::MIN), i64::MIN.to_string()),
        (Box::new(u32::MAX), u32::MAX.to_string()),
        (Box::new(u64::MAX), u64::MAX.to_string()),
    ];
    for (value, expected) in cases {
        let mut sb = StrBuilder::new();
        sb.append(value);
        assert_eq!(sb.to_text(), expected);
        assert_eq!(sb.len(), expected.len());
    }
}

#[test]
fn test_append_line() {
    let mut sb = StrBuilder::new();
    sb.append_line_with("Hi").append_line();
    assert_eq!(sb.to_text(), format!("Hi{0}{0}", LINE_TERMINATOR));
}

#[test]
fn test_set_replaces_content() {
    let mut sb = StrBuilder::new();
    sb.append("Hello World");
    sb.set(12345);
    assert_eq!(sb, "12345");
    sb.set_all(&[&'a', &"b", &3]);
    assert_eq!(sb, "ab3");
}

#[test]
fn test_clear() {
    let mut sb = StrBuilder::with_capacity(4);
    sb.append("Hello World, this spans several chunks");
    assert!(sb.chunks().count() > 0);
    sb.clear();
    assert!(sb.is_empty());
    assert_eq!(sb.chunks().count(), 0);
    sb.append("again");
    assert_eq!(sb, "again");
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_large_appends_keep_length() {
    let mut sb = StrBuilder::new();
    sb.append("a".repeat(5000));
    sb.append("b".repeat(10000));
    sb.append("c".repeat(1000));
    assert_eq!(sb.len(), 16000);

    let text = sb.to_text();
    assert_eq!(&text[..5000], "a".repeat(5000));
    assert_eq!(&text[5000..15000], "b".repeat(10000));
    assert_eq!(&text[15000..], "c".repeat(1000));
}

#[test]
fn test_growth_is_capped() {
    let config = BuilderConfig::new(16, 100).unwrap();
    let mut sb = StrBuilder::unpooled(config);
    for _ in 0..1000 {
        sb.append("0123456789");
    }
    assert_eq!(sb.len(), 10_000);
    for chunk in sb.chunks() {
        assert!(
            chunk.storage_len() <= 100,
            "Growth step should not exceed the cap for small appends"
        );
    }
}

#[test]
fn test_chunks_tile_the_text() {
    let sb = build_in_pieces(&"xyz".repeat(100), 7, BuilderConfig::new(1, 5).unwrap());
    let mut expected_offset = 0;
    for chunk in sb.chunks() {
        assert_eq!(chunk.offset(), expected_offset);
        assert!(!chunk.is_empty(), "Sealed chunks should never be empty");
        expected_offset += chunk.len();
    }
    assert!(expected_offset <= sb.len());
}

// ============================================================================
// Replace
// ============================================================================

#[test]
fn test_replace_basic() {
    let mut sb = StrBuilder::from("ABCabcABCdefgABC");
    sb.replace("ABC", "123");
    assert_eq!(sb.to_text(), "123abc123defg123");
}

#[test]
fn test_replace_grows_text() {
    let mut sb = StrBuilder::from("ABCabcABCdefgABC");
    sb.replace("A", "123");
    assert_eq!(sb.to_text(), "123BCabc123BCdefg123BC");
}

#[test]
fn test_replace_noops() {
    let mut sb = StrBuilder::from("abc");
    sb.replace("", "x");
    sb.replace(None::<&str>, "x");
    sb.replace("z", "x");
    sb.replace("abcd", "x");
    assert_eq!(sb.to_text(), "abc");

    let mut empty = StrBuilder::new();
    empty.replace("a", "b");
    assert!(empty.is_empty());
}

#[test]
fn test_replace_to_empty() {
    let mut sb = StrBuilder::from("abc");
    sb.replace("abc", "");
    assert_eq!(sb.to_text(), "");
    assert_eq!(sb.chunks().count(), 0);
    sb.append("next");
    assert_eq!(sb, "next");
}

#[test]
fn test_replace_across_chunks() {
    let sb_text = "the quick brown fox jumps over the lazy dog";
    let mut sb = build_in_pieces(sb_text, 3, BuilderConfig::new(1, 3).unwrap());
    assert!(sb.chunks().count() > 5);
    sb.replace("the", "a");
    assert_eq!(sb.to_text(), "a quick brown fox jumps over a lazy dog");
    assert_eq!(sb.chunks().count(), 1);
}

#[test]
fn test_replace_chain() {
    let mut sb = StrBuilder::from("a,b,c");
    sb.replace(",", ", ").replace("b", "B");
    assert_eq!(sb, "a, B, c");
}

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn test_index_within_bounds() {
    let sb = build_in_pieces("Hello, world", 2, BuilderConfig::new(1, 2).unwrap());
    let bytes = b"Hello, world";
    for (i, &b) in bytes.iter().enumerate() {
        assert_eq!(sb[i], b);
    }
}

#[test]
fn test_index_out_of_bounds() {
    let sb = StrBuilder::from("abc");
    assert_eq!(
        sb.unit_at(3),
        Err(BufferError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(sb.get(100), None);
}

#[test]
#[should_panic(expected = "index out of range")]
fn test_index_panics_past_end() {
    let sb = StrBuilder::new();
    let _ = sb[0];
}

// ============================================================================
// Equality and Hashing
// ============================================================================

#[test]
fn test_equality() {
    let a = StrBuilder::from("Hello");
    let b = StrBuilder::from("Hello");
    let c = StrBuilder::from("hello");
    let d = StrBuilder::from("Hi");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_eq!(std_hash(&a), std_hash(&b));
}

// ============================================================================
// Pooling
// ============================================================================

#[test]
fn test_builders_recycle_through_private_pool() {
    let pool = Arc::new(SizeClassPool::with_config(PoolConfig::new(10, 16).unwrap()).unwrap());

    for round in 0..4 {
        let mut sb = StrBuilder::with_pool(BuilderConfig::default(), Arc::clone(&pool));
        for i in 0..100 {
            sb.append(i).append(' ');
        }
        assert!(sb.len() > 200);
        if round > 0 {
            assert!(pool.stats().hits > 0, "Later rounds should reuse arrays");
        }
    }
    assert!(pool.stats().cached > 0);
}

#[test]
fn test_unpooled_builder_has_no_pool() {
    let sb = StrBuilder::unpooled(BuilderConfig::default());
    assert!(sb.pool().is_none());
    assert!(StrBuilder::new().pool().is_some());
}

#[cfg(feature = "bytes")]
#[test]
fn test_to_bytes_snapshot() {
    let mut sb = StrBuilder::from("snap");
    let bytes = sb.to_bytes();
    sb.append("shot");
    assert_eq!(&bytes[..], b"snap");
}

// ============================================================================
// Properties
// ============================================================================

use proptest::prelude::*;

proptest! {
    #[test]
    fn test_length_is_sum_of_appends(
        parts in prop::collection::vec(".{0,40}", 0..30),
        capacity in 0usize..64
    ) {
        let mut sb = StrBuilder::with_capacity(capacity);
        let mut expected = String::new();
        for part in &parts {
            sb.append(part.as_str());
            expected.push_str(part);
        }
        prop_assert_eq!(sb.len(), expected.len());
        prop_assert_eq!(sb.to_text(), expected);
    }

    #[test]
    fn test_integers_match_std(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let mut sb = StrBuilder::new();
        let mut expected = String::new();
        for value in &values {
            sb.append(*value);
            expected.push_str(&value.to_string());
        }
        prop_assert_eq!(sb.to_text(), expected);
    }

    #[test]
    fn test_replace_matches_str_replace(
        text in "[ab ]{0,60}",
        old in "[ab]{1,3}",
        new in "[xy]{0,4}",
        piece in 1usize..8
    ) {
        let mut sb = build_in_pieces(&text, piece, BuilderConfig::new(1, 4).unwrap());
        sb.replace(old.as_str(), new.as_str());
        prop_assert_eq!(sb.to_text(), text.replace(&old, &new));
    }

    #[test]
    fn test_equality_ignores_chunking(
        text in ".{0,80}",
        piece_a in 1usize..10,
        piece_b in 1usize..10
    ) {
        let a = build_in_pieces(&text, piece_a, BuilderConfig::new(1, 3).unwrap());
        let b = build_in_pieces(&text, piece_b, BuilderConfig::new(8, 64).unwrap());
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(std_hash(&a), std_hash(&b));
    }

    #[test]
    fn test_index_matches_text(text in ".{1,60}", piece in 1usize..6) {
        let sb = build_in_pieces(&text, piece, BuilderConfig::new(1, 2).unwrap());
        for (i, b) in text.bytes().enumerate() {
            prop_assert_eq!(sb.unit_at(i), Ok(b));
        }
        let out_of_range = sb.unit_at(text.len()).is_err();
        prop_assert!(out_of_range);
    }
}

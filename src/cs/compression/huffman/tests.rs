use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cs::compression::huffman::{
    huffman_encode, pack, HuffmanArtifact, HuffmanCodec, HuffmanTree, Symbol,
};

const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', ' ', '\n', 'é', 'ß', '中', '😀', '\u{FFFF}',
];

fn random_text(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    // a skewed pick so some symbols are much more frequent than others
    (0..len)
        .map(|_| {
            let i = rng.gen_range(0..ALPHABET.len());
            let j = rng.gen_range(0..=i);
            ALPHABET[j]
        })
        .collect()
}

#[test]
fn test_random_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut codec = HuffmanCodec::new();
    for _ in 0..200 {
        let text = random_text(&mut rng, 300);
        let bits = codec.encode(&text).unwrap();
        assert_eq!(codec.decode(&bits, true).unwrap(), text);
    }
}

#[test]
fn test_random_packed_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut codec = HuffmanCodec::new();
    for _ in 0..200 {
        let text = random_text(&mut rng, 300);
        let bits = codec.encode(&text).unwrap();
        let packed = pack(&bits);
        assert_eq!(codec.decode_from_packed_bytes(&packed, bits.len()).unwrap(), text);
    }
}

#[test]
fn test_random_artifact_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut codec = HuffmanCodec::new();
    for _ in 0..50 {
        let text = random_text(&mut rng, 200);
        codec.encode(&text).unwrap();
        let bytes = codec.to_artifact().unwrap().to_bytes().unwrap();
        assert_eq!(HuffmanArtifact::from_bytes(&bytes).unwrap().decode().unwrap(), text);
    }
}

#[test]
fn test_codes_are_prefix_free() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let text = random_text(&mut rng, 500);
        let encoded = huffman_encode(&text).unwrap();
        assert!(encoded.codes.is_prefix_free());
        assert_eq!(encoded.codes.len(), encoded.frequencies.len());
    }
}

#[test]
fn test_tree_shape_invariants() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let text = random_text(&mut rng, 500);
        let encoded = huffman_encode(&text).unwrap();
        let distinct = encoded.frequencies.len();
        if distinct >= 2 {
            assert_eq!(encoded.tree.leaf_count(), distinct);
            assert_eq!(encoded.tree.internal_count(), distinct - 1);
        } else {
            assert!(encoded.tree.is_degenerate());
        }
        assert_eq!(encoded.bits.len(), encoded.tree.weighted_path_length());
    }
}

#[test]
fn test_rebuilt_tree_decodes_like_original() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let text = random_text(&mut rng, 200);
        let encoded = huffman_encode(&text).unwrap();
        let rebuilt = HuffmanTree::from_code_table(&encoded.codes).unwrap();
        assert_eq!(rebuilt.decode(&encoded.bits, true).unwrap(), text);
    }
}

#[test]
fn test_deterministic_encoding() {
    let text = "determinism: same input, same tree, same bits";
    let first = HuffmanCodec::new().encode(text).unwrap();
    let second = HuffmanCodec::new().encode(text).unwrap();
    assert_eq!(first, second);
    assert_eq!(huffman_encode(text).unwrap().codes, huffman_encode(text).unwrap().codes);
}

#[test]
fn test_single_repeated_symbol() {
    let mut codec = HuffmanCodec::new();
    let bits = codec.encode("aaaa").unwrap();
    let tree = codec.tree().unwrap();
    assert_eq!(tree.leaf_count(), 2);
    // four one-bit codes plus the end marker
    assert_eq!(bits.len(), 5);
    assert_eq!(codec.decode(&bits, true).unwrap(), "aaaa");
}

#[test]
fn test_empty_input_is_one_end_marker() {
    let encoded = huffman_encode("").unwrap();
    assert_eq!(encoded.frequencies.len(), 1);
    assert_eq!(encoded.frequencies.get(Symbol::EndMarker), Some(1));
    assert_eq!(encoded.bits.len(), 1);
    assert_eq!(encoded.tree.decode(&encoded.bits, true).unwrap(), "");
}

#[test]
fn test_skewed_input_compresses() {
    let mut codec = HuffmanCodec::new();
    let text = "aaaaaaaaaaaaaaaabbbbbbbbccccdde";
    let bits = codec.encode(text).unwrap();
    assert!(bits.len() < text.len() * 8);
    assert!(codec.statistics().space_saving_percent > 0.0);
}

#[test]
fn test_statistics_ratio_consistency() {
    let mut rng = StdRng::seed_from_u64(31337);
    let mut codec = HuffmanCodec::new();
    for _ in 0..50 {
        let text = random_text(&mut rng, 400);
        codec.encode(&text).unwrap();
        let stats = codec.statistics();
        if stats.is_empty() {
            continue;
        }
        assert_relative_eq!(
            stats.compression_ratio * stats.compressed_bits as f64,
            stats.original_bits as f64,
            max_relative = 1e-9
        );
    }
}

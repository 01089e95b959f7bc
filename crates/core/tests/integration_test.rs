//! Integration tests for the full codec pipeline.
//!
//! These tests drive the public API end to end: bytes -> frequencies ->
//! tree -> code table -> encode -> decode, checking that output matches
//! input and that the code tables keep their prefix-free guarantees.

use huffpress_core::{
    codec::{compress, decompress, round_trip},
    decoder::decode,
    encoder::encode,
    error::{Error, HuffmanError},
    CodeTable, FrequencyTable,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn table_for(data: &[u8]) -> CodeTable {
    CodeTable::from_frequencies(&FrequencyTable::from_bytes(data)).expect("table build failed")
}

/// Test the documented example: a:3 b:2 c:1 costs 9 bits.
#[test]
fn test_aaabbc_costs_nine_bits() {
    let data = b"aaabbc";
    let freqs = FrequencyTable::from_bytes(data);
    let table = CodeTable::from_frequencies(&freqs).unwrap();

    let mut lengths: Vec<usize> = table.iter().map(|(_, code)| code.len()).collect();
    lengths.sort_unstable();
    assert_eq!(lengths, vec![1, 2, 2]);
    assert_eq!(table.weighted_cost(&freqs), 9);

    let stream = encode(data, &table).unwrap();
    assert_eq!(stream.bit_len(), 9);
    assert_eq!(decode(&stream, &table).unwrap(), data);
}

/// Test that a single repeated byte costs one bit per byte.
#[test]
fn test_single_symbol_alphabet() {
    let compressed = compress(b"AAAA").unwrap();
    assert_eq!(compressed.table.len(), 1);
    assert_eq!(compressed.table.get(b'A').unwrap().to_string(), "0");
    assert_eq!(compressed.stream.bit_len(), 4);
    assert_eq!(decompress(&compressed).unwrap(), b"AAAA");
}

/// Test that the empty input stays empty in every representation.
#[test]
fn test_empty_input() {
    let compressed = compress(b"").unwrap();
    assert!(compressed.table.is_empty());
    assert!(compressed.stream.is_empty());
    assert!(decompress(&compressed).unwrap().is_empty());
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).cycle().take(256 * 10).collect();

    let result = round_trip(&input_data).expect("round trip failed");
    assert_eq!(result.decoded, input_data);
    assert_eq!(result.metrics.distinct_symbols, 256);
    // uniform distribution: no gain over 8 bits
    assert_eq!(result.metrics.encoded_bits, 8 * input_data.len() as u64);
}

/// Test with a large, skewed, seeded random input.
#[test]
fn test_large_skewed_data() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let input_data: Vec<u8> = (0..256 * 1024)
        .map(|_| {
            // geometric-ish: small values dominate
            let r: f64 = rng.gen();
            (r * r * r * 256.0) as u8
        })
        .collect();

    let result = round_trip(&input_data).expect("round trip failed");
    assert_eq!(result.decoded, input_data);
    assert!(result.metrics.compressed_bytes < input_data.len() as u64);
}

/// Test that a time series in CSV form compresses well.
#[test]
fn test_csv_time_series() {
    let mut csv = String::from("Time (s),T1,T2,Q1,Q2\n");
    for t in 0..2000 {
        let heater = if (t / 90) % 2 == 0 { 100 } else { 0 };
        csv.push_str(&format!("{},{:.2},{:.2},{},{}\n", t, 25.0 + (t % 90) as f64 * 0.1, 24.5, heater, 0));
    }

    let result = round_trip(csv.as_bytes()).unwrap();
    assert_eq!(result.decoded, csv.as_bytes());
    assert!(result.metrics.space_savings_percent() > 40.0);
}

/// Test that a table from one input cannot decode another input's stream.
#[test]
fn test_cross_table_decode_fails() {
    let table_a = table_for(b"aaaaaaaa");
    let stream_b = encode(b"abcabc", &table_for(b"abcabc")).unwrap();

    assert!(matches!(
        decode(&stream_b, &table_a),
        Err(Error::Huffman(HuffmanError::MalformedBitstream { .. }))
    ));

    assert!(matches!(
        encode(b"abcabc", &table_a),
        Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'b', position: 1 }))
    ));
}

#[quickcheck]
fn round_trip_any_bytes(data: Vec<u8>) -> bool {
    let table = table_for(&data);
    match encode(&data, &table).and_then(|stream| decode(&stream, &table)) {
        Ok(decoded) => decoded == data,
        Err(_) => false,
    }
}

#[quickcheck]
fn codes_are_prefix_free(data: Vec<u8>) -> TestResult {
    let table = table_for(&data);
    if table.len() < 2 {
        return TestResult::discard();
    }

    let codes: Vec<_> = table.iter().map(|(_, code)| code).collect();
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j && a.is_prefix_of(b) {
                return TestResult::failed();
            }
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn encoded_length_is_weighted_cost(data: Vec<u8>) -> bool {
    let freqs = FrequencyTable::from_bytes(&data);
    let table = CodeTable::from_frequencies(&freqs).unwrap();
    let stream = encode(&data, &table).unwrap();
    stream.bit_len() as u64 == table.weighted_cost(&freqs)
}

#[quickcheck]
fn never_worse_than_fixed_width(data: Vec<u8>) -> bool {
    // Optimal code is no longer than ceil(log2(alphabet)) bits per symbol
    let freqs = FrequencyTable::from_bytes(&data);
    let table = CodeTable::from_frequencies(&freqs).unwrap();
    let distinct = freqs.distinct().max(2);
    let fixed_width = usize::BITS - (distinct - 1).leading_zeros();
    table.weighted_cost(&freqs) <= data.len() as u64 * fixed_width as u64
}

/// Cost of an optimal prefix code by repeatedly merging the two lightest
/// weights of a sorted list. A lone symbol still needs one bit per byte.
fn merged_weight_cost(freqs: &FrequencyTable) -> u64 {
    let mut weights: Vec<u64> = freqs.iter().map(|(_, count)| count).collect();
    if weights.len() == 1 {
        return weights[0];
    }

    let mut cost = 0;
    while weights.len() > 1 {
        weights.sort_unstable_by(|a, b| b.cmp(a));
        let lightest = weights.pop().unwrap();
        let next = weights.pop().unwrap();
        cost += lightest + next;
        weights.push(lightest + next);
    }
    cost
}

#[quickcheck]
fn weighted_cost_is_optimal(data: Vec<u8>) -> bool {
    let freqs = FrequencyTable::from_bytes(&data);
    let table = CodeTable::from_frequencies(&freqs).unwrap();
    table.weighted_cost(&freqs) == merged_weight_cost(&freqs)
}

#[test]
fn test_weighted_cost_is_optimal_on_skewed_data() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..20 {
        let alphabet = rng.gen_range(2..=64u8);
        let data: Vec<u8> = (0..5_000)
            .map(|_| {
                let a = rng.gen_range(0..alphabet);
                let b = rng.gen_range(0..alphabet);
                a.min(b)
            })
            .collect();
        let freqs = FrequencyTable::from_bytes(&data);
        let table = CodeTable::from_frequencies(&freqs).unwrap();
        assert_eq!(table.weighted_cost(&freqs), merged_weight_cost(&freqs));
    }
}

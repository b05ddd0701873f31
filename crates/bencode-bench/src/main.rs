//! Benchmark for bencode serialization using city data.
//!
//! Reads a JSON array of city records (or generates one when no path is
//! given), builds a bencode document from it, and reports encode/decode
//! timings and sizes.

use std::borrow::Cow;
use std::fs;
use std::time::Instant;

use bencode::{DecodeOptions, Dictionary, Value};
use serde::Deserialize;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct City {
    id: u32,
    name: String,
    state_code: String,
    country_code: String,
    latitude: String,
    longitude: String,
    population: Option<i64>,
    timezone: Option<String>,
    translations: Option<std::collections::HashMap<String, String>>,
}

// =============================================================================
// DATA GENERATION
// =============================================================================

/// Generates `count` deterministic city records.
fn generate_cities(count: u32) -> Vec<City> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        // xorshift64
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    (0..count)
        .map(|id| {
            let r = next();
            let translations = if r % 3 == 0 {
                let mut t = std::collections::HashMap::new();
                t.insert("de".to_string(), format!("Stadt {}", id));
                t.insert("fr".to_string(), format!("Ville {}", id));
                Some(t)
            } else {
                None
            };
            City {
                id,
                name: format!("City {}", id),
                state_code: format!("S{}", r % 50),
                country_code: ["US", "DE", "FR", "JP", "BR"][(r % 5) as usize].to_string(),
                latitude: format!("{:.5}", (r % 180_000) as f64 / 1000.0 - 90.0),
                longitude: format!("{:.5}", (r % 360_000) as f64 / 1000.0 - 180.0),
                population: (r % 4 != 0).then_some((r % 10_000_000) as i64),
                timezone: (r % 2 == 0).then(|| "Europe/Berlin".to_string()),
                translations,
            }
        })
        .collect()
}

// =============================================================================
// CONVERSION
// =============================================================================

fn city_to_value(city: &City) -> Value<'_> {
    let mut dict = Dictionary::with_capacity(9);
    dict.insert(b"id".as_slice(), city.id);
    dict.insert(b"name".as_slice(), city.name.as_str());
    dict.insert(b"state".as_slice(), city.state_code.as_str());
    dict.insert(b"country".as_slice(), city.country_code.as_str());
    dict.insert(
        b"location".as_slice(),
        Value::List(vec![
            Value::string(&city.latitude),
            Value::string(&city.longitude),
        ]),
    );
    if let Some(population) = city.population {
        dict.insert(b"population".as_slice(), population);
    }
    if let Some(tz) = &city.timezone {
        dict.insert(b"timezone".as_slice(), tz.as_str());
    }
    if let Some(translations) = &city.translations {
        let names: Dictionary = translations
            .iter()
            .map(|(lang, name)| (Cow::Borrowed(lang.as_bytes()), Value::string(name)))
            .collect();
        dict.insert(b"translations".as_slice(), names);
    }
    Value::Dict(dict)
}

fn main() {
    let data_path = std::env::args().nth(1);

    let (cities, json_len) = match &data_path {
        Some(path) => {
            println!("Loading cities from {}...", path);
            let json_data = fs::read_to_string(path).expect("Failed to read cities JSON");
            let cities: Vec<City> = serde_json::from_str(&json_data).expect("Failed to parse JSON");
            (cities, json_data.len())
        }
        None => {
            println!("No data file given, generating 150000 cities...");
            let cities = generate_cities(150_000);
            (cities, 0)
        }
    };
    println!("Cities: {}", cities.len());

    // Build the document
    let build_start = Instant::now();
    let document = Value::List(cities.iter().map(city_to_value).collect());
    println!("Built value tree in {:?}", build_start.elapsed());

    // Benchmark encoding
    const ENCODE_ITERS: u32 = 10;
    let encode_start = Instant::now();
    let mut encoded = Vec::new();
    for _ in 0..ENCODE_ITERS {
        encoded = bencode::encode(&document);
    }
    let encode_time = encode_start.elapsed() / ENCODE_ITERS;

    println!(
        "\nEncode: {} bytes in {:?} (avg of {} iterations)",
        encoded.len(),
        encode_time,
        ENCODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );
    assert_eq!(encoded.len(), bencode::encoded_len(&document));

    // Canonical output is deterministic
    assert_eq!(encoded, bencode::encode(&document), "Encoding should be deterministic");

    // Benchmark decoding
    const DECODE_ITERS: u32 = 10;

    // Warmup
    for _ in 0..3 {
        let _ = bencode::decode(&encoded).expect("Failed to decode");
    }

    let decode_start = Instant::now();
    let mut decoded = None;
    for _ in 0..DECODE_ITERS {
        decoded = Some(bencode::decode(&encoded).expect("Failed to decode"));
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    let decoded = decoded.expect("decode loop ran at least once");

    println!(
        "\nDecode (zero-copy): {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );
    assert_eq!(decoded, document);

    // Strict decoding checks key order as well
    let strict_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        bencode::decode_with_options(&encoded, DecodeOptions::strict())
            .expect("Canonical output should pass strict decoding");
    }
    let strict_time = strict_start.elapsed() / DECODE_ITERS;

    println!("\nDecode (strict): {:?}", strict_time);
    println!(
        "  Overhead vs lenient: {:.1}%",
        100.0 * (strict_time.as_secs_f64() - decode_time.as_secs_f64()) / decode_time.as_secs_f64()
    );

    // Owned decoding
    let owned_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let owned = bencode::decode(&encoded).expect("Failed to decode").into_owned();
        assert_eq!(owned.as_list().map(|l| l.len()), Some(cities.len()));
    }
    let owned_time = owned_start.elapsed() / DECODE_ITERS;
    println!("\nDecode (owned): {:?}", owned_time);

    // Summary
    println!("\n=== Summary ===");
    println!("Cities: {}", cities.len());
    println!(
        "Bencode size: {} bytes ({:.1} MB)",
        encoded.len(),
        encoded.len() as f64 / 1_000_000.0
    );
    if json_len > 0 {
        println!(
            "JSON size: {} bytes ({:.1} MB)",
            json_len,
            json_len as f64 / 1_000_000.0
        );
        println!(
            "Size vs JSON: {:.1}%",
            100.0 * encoded.len() as f64 / json_len as f64
        );
    }
}

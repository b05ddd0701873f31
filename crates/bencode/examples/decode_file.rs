//! Simple decoder to inspect bencoded files such as `.torrent` metainfo.
//!
//! Usage: `decode_file <path> [--json]`

use std::fs;

use bencode::{Value, decode, is_canonical, to_json};

const PREVIEW_LEN: usize = 60;

fn format_bytes(b: &[u8]) -> String {
    match std::str::from_utf8(b) {
        Ok(s) => {
            let preview: String = s.chars().take(PREVIEW_LEN).collect();
            if s.chars().count() > PREVIEW_LEN {
                format!("\"{}...\" ({} bytes)", preview, b.len())
            } else {
                format!("\"{}\"", preview)
            }
        }
        Err(_) => format!("BYTES[{}]", b.len()),
    }
}

fn print_value(v: &Value<'_>, indent: usize, max_items: usize) {
    let pad = "  ".repeat(indent);
    match v {
        Value::Integer(i) => println!("{}{}", pad, i),
        Value::Bytes(b) => println!("{}{}", pad, format_bytes(b)),
        Value::List(items) => {
            println!("{}list ({} items)", pad, items.len());
            for item in items.iter().take(max_items) {
                print_value(item, indent + 1, max_items);
            }
            if items.len() > max_items {
                println!("{}  ... and {} more", pad, items.len() - max_items);
            }
        }
        Value::Dict(dict) => {
            println!("{}dict ({} keys)", pad, dict.len());
            for (key, value) in dict.sorted_entries() {
                match value {
                    Value::Integer(_) | Value::Bytes(_) => {
                        print!("{}  {} = ", pad, format_bytes(key));
                        print_value(value, 0, max_items);
                    }
                    _ => {
                        println!("{}  {}:", pad, format_bytes(key));
                        print_value(value, indent + 2, max_items);
                    }
                }
            }
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("usage: decode_file <path> [--json]");
    let as_json = args.any(|a| a == "--json");

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let value = match decode(&data) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Failed to decode: {} ({})", e, e.kind());
            std::process::exit(1);
        }
    };

    println!("Canonical: {}", is_canonical(&data));

    if as_json {
        let json = serde_json::to_string_pretty(&to_json(&value)).expect("Failed to render JSON");
        println!("{}", json);
        return;
    }

    println!("\n=== Tree ===");
    print_value(&value, 0, 10);
}

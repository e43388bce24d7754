use pretty_assertions::assert_eq;
use safelist_genhash::{
    load_safelist, process, read_safelist, run, write_safelist, Channel, Options, RunConfig,
};
use serde_json::{json, Value};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

const NET: &str = "qqqqqqqqqqqqqqqqqqqqqg==";

fn sample_document() -> Value {
    json!([
        {
            "name": "scanner",
            "type": "ip",
            "hash_key": 0,
            "comment": "sync: vuln scanner",
            "schema_version": 5,
            "ip": {"ip": "1.2.3.4", "network_uuid": {"Kind": 4, "Data": NET}, "src": true, "dst": true}
        },
        {
            "name": "already",
            "type": "useragent",
            "hash_key": 777,
            "comment": "",
            "schema_version": 5,
            "useragent": "curl/8.0"
        },
        {
            "name": "half pair",
            "type": "pair",
            "hash_key": 0,
            "comment": "Sync broken",
            "schema_version": 5,
            "pair": {
                "src": "1.1.1.1",
                "src_network_uuid": {"Kind": 4, "Data": "AQ=="},
                "dst": "",
                "dst_network_uuid": {"Kind": 4, "Data": "Ag=="}
            }
        },
        {
            "name": "blocks",
            "type": "cidr",
            "comment": "",
            "ranges": {
                "ranges": [{"start": 10, "end": 20}, {"start": 1, "end": 5}],
                "network_uuid": {"Kind": 4, "Data": NET},
                "src": false,
                "dst": false
            }
        }
    ])
}

fn file_config(dir: &std::path::Path, options: Options) -> (RunConfig, std::path::PathBuf) {
    let input = dir.join("safelist.json");
    fs::write(&input, sample_document().to_string()).unwrap();
    let output = dir.join("safelist-hashed.json");
    let config = RunConfig {
        source: Channel::File(input),
        sink: Channel::File(output.clone()),
        options,
    };
    (config, output)
}

// ── End to end ────────────────────────────────────────────────────

#[test]
fn hashes_file_to_file() {
    let dir = tempdir().unwrap();
    let (config, output) = file_config(dir.path(), Options::default());

    let summary = run(&config).unwrap();
    assert_eq!(summary.loaded, 4);
    assert_eq!(summary.written, 4);
    let batch = summary.batch.unwrap();
    assert_eq!(batch.hashed, 2);
    assert_eq!(batch.skipped, 1);
    assert_eq!(batch.already_keyed, 1);

    let written: Value = serde_json::from_slice(&fs::read(output).unwrap()).unwrap();
    let out = written.as_array().unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(out[0]["hash_key"], -2617423706357375387i64);
    assert_eq!(out[1]["hash_key"], 777);
    assert_eq!(out[2], sample_document()[2]);
    assert_eq!(out[3]["hash_key"], -4562722083111160083i64);
    assert_eq!(out[3]["schema_version"], 5);
}

#[test]
fn conflicting_record_is_kept_and_left_unkeyed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("mixed.json");
    let doc = json!([
        {"name": "good", "type": "useragent", "useragent": "curl/8.0", "schema_version": 5},
        {
            "name": "bad",
            "type": "ip",
            "schema_version": 5,
            "ip": {"ip": "1.2.3.4", "network_uuid": {"Kind": 4, "Data": NET}},
            "domain": "x.example"
        }
    ]);
    fs::write(&input, doc.to_string()).unwrap();
    let output = dir.path().join("mixed-hashed.json");
    let config = RunConfig {
        source: Channel::File(input),
        sink: Channel::File(output.clone()),
        options: Options::default(),
    };

    let summary = run(&config).unwrap();
    assert_eq!(summary.written, 2);
    assert_eq!(summary.batch.unwrap().skipped, 1);

    let written: Value = serde_json::from_slice(&fs::read(output).unwrap()).unwrap();
    assert_eq!(written[0]["name"], "good");
    assert_eq!(written[0]["hash_key"], -3433982134253334686i64);
    assert_eq!(written[1]["name"], "bad");
    assert_eq!(written[1]["hash_key"], 0);
    assert_eq!(written[1]["domain"], "x.example");
    assert_eq!(written[1]["ip"]["ip"], "1.2.3.4");
}

#[test]
fn compact_output_by_default() {
    let dir = tempdir().unwrap();
    let (config, output) = file_config(dir.path(), Options::default());
    run(&config).unwrap();
    let text = fs::read_to_string(output).unwrap();
    assert!(!text.contains('\n'));
}

#[test]
fn pretty_output_on_request() {
    let dir = tempdir().unwrap();
    let options = Options {
        pretty: true,
        ..Options::default()
    };
    let (config, output) = file_config(dir.path(), options);
    run(&config).unwrap();
    assert!(fs::read_to_string(output).unwrap().contains('\n'));
}

#[test]
fn missing_input_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.json");
    let config = RunConfig {
        source: Channel::File(dir.path().join("absent.json")),
        sink: Channel::File(output.clone()),
        options: Options::default(),
    };
    let err = run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
    assert!(!output.exists());
}

#[test]
fn malformed_json_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "[{\"type\": \"ip\",").unwrap();
    let output = dir.path().join("bad-hashed.json");
    let config = RunConfig {
        source: Channel::File(input),
        sink: Channel::File(output.clone()),
        options: Options::default(),
    };
    let err = run(&config).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Failed to parse safelist JSON"));
    assert_eq!(chain.matches("EOF while parsing").count(), 1, "{chain}");
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("safelist.json");
    fs::write(&input, "[]").unwrap();
    let config = RunConfig {
        source: Channel::File(input),
        sink: Channel::File(dir.path().join("missing-dir").join("out.json")),
        options: Options::default(),
    };
    assert!(run(&config).is_err());
}

#[test]
fn load_from_file_channel() {
    let dir = tempdir().unwrap();
    let (config, _) = file_config(dir.path(), Options::default());
    let entries = load_safelist(&config.source).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].schema_version, 0);
}

// ── Options ───────────────────────────────────────────────────────

#[test]
fn filter_then_hash() {
    let mut entries = read_safelist(Cursor::new(sample_document().to_string())).unwrap();
    let options = Options {
        filter: Some("SYNC".into()),
        ..Options::default()
    };
    let summary = process(&mut entries, &options).unwrap();
    assert_eq!(summary.filtered_out, 2);
    assert_eq!(summary.written, 2);
    assert_eq!(entries[0].name, "scanner");
    assert_eq!(entries[1].name, "half pair");
}

#[test]
fn strip_skips_hashing() {
    let mut entries = read_safelist(Cursor::new(sample_document().to_string())).unwrap();
    let options = Options {
        strip: true,
        ..Options::default()
    };
    let summary = process(&mut entries, &options).unwrap();
    assert_eq!(summary.stripped, 1);
    assert_eq!(summary.batch, None);
    assert!(entries.iter().all(|e| e.hash_key == 0));
}

#[test]
fn dedup_after_hashing() {
    let mut doc = sample_document();
    let copy = doc[0].clone();
    doc.as_array_mut().unwrap().push(copy);
    let mut entries = read_safelist(Cursor::new(doc.to_string())).unwrap();
    let options = Options {
        dedup: true,
        ..Options::default()
    };
    let summary = process(&mut entries, &options).unwrap();
    assert_eq!(summary.loaded, 5);
    assert_eq!(summary.deduplicated, 1);
    assert_eq!(entries.len(), 4);
}

#[test]
fn verify_rejects_tampered_keys() {
    let mut doc = sample_document();
    doc[1]["hash_key"] = json!(-3433982134253334686i64);
    let mut entries = read_safelist(Cursor::new(doc.to_string())).unwrap();
    let options = Options {
        verify: true,
        ..Options::default()
    };
    assert!(process(&mut entries, &options).is_ok());

    doc[1]["hash_key"] = json!(1);
    let mut entries = read_safelist(Cursor::new(doc.to_string())).unwrap();
    let err = process(&mut entries, &options).unwrap_err();
    assert!(err.to_string().contains("1 of 1 stored hash keys do not match"));
}

// ── Readers and writers ───────────────────────────────────────────

#[test]
fn write_then_read_preserves_entries() {
    let entries = read_safelist(Cursor::new(sample_document().to_string())).unwrap();
    let mut buf = Vec::new();
    write_safelist(&mut buf, &entries, false).unwrap();
    let back = read_safelist(Cursor::new(buf)).unwrap();
    assert_eq!(back, entries);
}

#[test]
fn empty_array_roundtrip() {
    let mut entries = read_safelist(Cursor::new("[]")).unwrap();
    let summary = process(&mut entries, &Options::default()).unwrap();
    assert_eq!(summary.written, 0);
    let mut buf = Vec::new();
    write_safelist(&mut buf, &entries, false).unwrap();
    assert_eq!(buf, b"[]");
}

//! # Oracle Attestation Codec Benchmarks
//!
//! | Path | Input |
//! |------|-------|
//! | Full attestation parse | Series payloads of growing size |
//! | Fast-path result parse | Same payloads |
//! | Argument list decode | 10 mixed values |
//! | Query hash | Fixed query components |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oracle_attestation_codec::{
    AttestationCodecApi, AttestationCodecService, AttestationPayload, CanonicalValue,
    DatapointRow, ResultPayload,
};
use std::time::Duration;

fn series_payload(rows: usize) -> AttestationPayload {
    AttestationPayload {
        version: 1,
        algorithm: 1,
        block_height: 19_000_000,
        data_provider: format!("0x{}", "11".repeat(20)),
        stream_id: "s".repeat(32),
        action_id: 1,
        arguments: vec![
            CanonicalValue::from("s".repeat(32)),
            CanonicalValue::Int64(1_700_000_000),
        ],
        result: ResultPayload::DatapointSeries(
            (0..rows)
                .map(|i| DatapointRow::new((1_700_000_000 + i * 86_400).to_string(), "1234.5678"))
                .collect(),
        ),
    }
}

fn bench_attestation_parse(c: &mut Criterion) {
    let svc = AttestationCodecService::default();
    let mut group = c.benchmark_group("attestation-parse");
    group.measurement_time(Duration::from_secs(5));

    for rows in [1usize, 100, 1_000, 10_000] {
        let bytes = svc
            .encode_attestation(&series_payload(rows))
            .unwrap_or_default();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("full", rows), &bytes, |b, bytes| {
            b.iter(|| black_box(svc.parse_attestation(bytes).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("fast", rows), &bytes, |b, bytes| {
            b.iter(|| black_box(svc.parse_attestation_result(bytes).is_ok()))
        });
    }
    group.finish();
}

fn bench_arguments(c: &mut Criterion) {
    let svc = AttestationCodecService::default();
    let values: Vec<CanonicalValue> = (0..10)
        .map(|i| match i % 3 {
            0 => CanonicalValue::Int64(i),
            1 => CanonicalValue::from(format!("arg-{i}")),
            _ => CanonicalValue::Bool(i % 2 == 0),
        })
        .collect();
    let blob = svc.encode_arguments(&values).unwrap_or_default();

    c.bench_function("arguments-decode-10", |b| {
        b.iter(|| black_box(svc.decode_arguments(&blob).is_ok()))
    });
}

fn bench_query_hash(c: &mut Criterion) {
    let svc = AttestationCodecService::default();
    let encoded = svc
        .encode_query_components(
            &format!("0x{}", "11".repeat(20)),
            &"s".repeat(32),
            "get_record",
            &[0xAB; 64],
        )
        .unwrap_or_default();
    let Ok(components) = svc.decode_query_components(&encoded) else {
        return;
    };

    c.bench_function("query-hash", |b| {
        b.iter(|| black_box(svc.query_hash(&components).is_ok()))
    });
}

criterion_group!(
    benches,
    bench_attestation_parse,
    bench_arguments,
    bench_query_hash
);
criterion_main!(benches);

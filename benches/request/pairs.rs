use criterion::{Criterion, Throughput};
use httpfetch::request::{BodyMap, parse_pairs};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// A full 16-pair input with random alphanumeric keys and values.
fn random_input() -> String {
    let mut rng = rand::thread_rng();
    let mut segments = Vec::new();
    for _ in 0..16 {
        let key: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let value: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        segments.push(format!("{key}:{value}"));
    }
    format!("{{{}}}", segments.join(","))
}

pub fn bench_parse_pairs(c: &mut Criterion) {
    let input = random_input();
    let mut group = c.benchmark_group("request");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("parse_pairs", |b| {
        b.iter(|| parse_pairs(&input).unwrap());
    });
    group.finish();
}

pub fn bench_body_to_json(c: &mut Criterion) {
    let input = random_input();
    let map = BodyMap::from_pairs(&parse_pairs(&input).unwrap());
    c.bench_function("body_to_json", |b| {
        b.iter(|| map.to_json().unwrap());
    });
}

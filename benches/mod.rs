use criterion::{criterion_group, criterion_main};

mod request;

criterion_group!(
    benches,
    request::pairs::bench_parse_pairs,
    request::pairs::bench_body_to_json
);
criterion_main!(benches);

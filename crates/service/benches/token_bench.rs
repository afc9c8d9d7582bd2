use criterion::{criterion_group, criterion_main, Criterion};

use service::auth::token::{TokenConfig, TokenService};

fn bench_tokens(c: &mut Criterion) {
    let svc = TokenService::new(&TokenConfig {
        secret: "0123456789abcdef0123456789abcdef".into(),
        access_ttl_hours: 1,
        refresh_ttl_hours: 24,
    });
    let pair = svc.issue_token(42).unwrap();

    c.bench_function("token_issue_pair", |b| {
        b.iter(|| svc.issue_token(42).unwrap());
    });

    c.bench_function("token_validate", |b| {
        b.iter(|| svc.validate_token(&pair.access_token).unwrap());
    });
}

criterion_group!(benches, bench_tokens);
criterion_main!(benches);

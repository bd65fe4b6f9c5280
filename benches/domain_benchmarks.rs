use criterion::{Criterion, black_box, criterion_group, criterion_main};
use customer_service::domain::{CreateCustomerRequest, TokenIssuer};
use customer_service::infra::JwtTokenIssuer;
use secrecy::SecretString;
use validator::Validate;

fn bench_validation(c: &mut Criterion) {
    let request = CreateCustomerRequest::new("Customer 1", "12345678900", "email@email.com");

    c.bench_function("validate_create_customer_request", |b| {
        b.iter(|| {
            let _ = black_box(&request).validate();
        })
    });
}

fn bench_token_signing(c: &mut Criterion) {
    let issuer = JwtTokenIssuer::new(
        SecretString::from("benchmark-secret".to_string()),
        "customer-service",
    );

    c.bench_function("sign_customer_token", |b| {
        b.iter(|| {
            let _ = issuer.generate_token(black_box(Some(42)));
        })
    });

    c.bench_function("sign_anonymous_token", |b| {
        b.iter(|| {
            let _ = issuer.generate_token(black_box(None));
        })
    });
}

criterion_group!(benches, bench_validation, bench_token_signing);
criterion_main!(benches);

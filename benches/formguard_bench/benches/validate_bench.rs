//! Validation overhead benchmarks
//!
//! Measures single validators, composite rules and whole-form passes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formguard_validate::prelude::*;
use formguard_validate::validators;

fn signup_form(values: FormValues) -> FormValidator<FormValues> {
    let mut form = FormValidator::new(values, NoopPresenter);
    form.add_rule("user", RuleSet::new().rule(username_rule()));
    form.add_rule("email", RuleSet::new().rule(RequiredRule::new()).rule(EmailRule));
    form.add_rule(
        "age",
        RuleSet::new()
            .rule(NumberRule::new())
            .rule(RangeRule::new(18.0, 65.0)),
    );
    form.add_rule("password", RuleSet::new().rule(password_rule()));
    form.add_rule("confirm", RuleSet::new().rule(MatchRule::field("password")));
    form
}

/// Benchmark the pure validators
fn bench_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("validators");

    group.bench_function("required", |b| {
        b.iter(|| validators::required(black_box("someone"), "Field"))
    });

    for email in ["someone@example.com", "not-an-email"] {
        group.bench_with_input(BenchmarkId::new("email", email), email, |b, email| {
            b.iter(|| validators::email(black_box(email)))
        });
    }

    group.bench_function("range", |b| {
        b.iter(|| validators::range(black_box("42.5"), 0.0, 100.0))
    });

    group.bench_function("url", |b| {
        b.iter(|| validators::url(black_box("https://example.com/path?q=1")))
    });

    group.finish();
}

/// Benchmark composite rules, which evaluate every sub-rule
fn bench_composites(c: &mut Criterion) {
    let mut group = c.benchmark_group("composites");
    let username = username_rule();

    for value in ["valid_user1", "a!"] {
        group.bench_with_input(BenchmarkId::new("username", value), value, |b, value| {
            b.iter(|| username.validate(black_box(value)))
        });
    }

    group.finish();
}

/// Benchmark full form passes
fn bench_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("form");

    let valid = FormValues::new()
        .with("user", "valid_user1")
        .with("email", "someone@example.com")
        .with("age", "42")
        .with("password", "hunter2")
        .with("confirm", "hunter2");
    let invalid = FormValues::new()
        .with("user", "a!")
        .with("email", "nope")
        .with("age", "abc")
        .with("password", "")
        .with("confirm", "x");

    let mut form = signup_form(valid);
    group.bench_function("validate_valid", |b| b.iter(|| black_box(form.validate())));

    let mut form = signup_form(invalid);
    group.bench_function("validate_invalid", |b| b.iter(|| black_box(form.validate())));

    let mut form = signup_form(FormValues::new().with("user", "valid_user1"));
    group.bench_function("validate_field", |b| {
        b.iter(|| black_box(form.validate_field(black_box("user"))))
    });

    group.finish();
}

criterion_group!(benches, bench_validators, bench_composites, bench_form);
criterion_main!(benches);

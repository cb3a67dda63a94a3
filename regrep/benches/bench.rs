use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regrep::Regex;

fn bench_literal_scan(c: &mut Criterion) {
    let regex = Regex::new("needle").unwrap();
    let line = b"hay hay hay hay hay hay hay hay hay hay needle hay hay";

    c.bench_function("literal_scan", |b| {
        b.iter(|| black_box(regex.find(black_box(line))))
    });
}

fn bench_character_classes(c: &mut Criterion) {
    let regex = Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    let line = b"let x = 42; function_name(); var123 + y";

    c.bench_function("char_class_scan", |b| {
        b.iter(|| black_box(regex.find_all(black_box(line))))
    });
}

fn bench_greedy_star(c: &mut Criterion) {
    let regex = Regex::new("a.*c").unwrap();
    let line = b"abcabcabcabcabcabcabcabcabcabc";

    c.bench_function("greedy_star", |b| {
        b.iter(|| black_box(regex.find(black_box(line))))
    });
}

fn bench_alternation(c: &mut Criterion) {
    let regex = Regex::new("(cat|dog|bird)+").unwrap();
    let line = b"catdogbirdcatdogbirdcatdogbird";

    c.bench_function("alternation", |b| {
        b.iter(|| black_box(regex.find(black_box(line))))
    });
}

fn bench_backreference(c: &mut Criterion) {
    let regex = Regex::new(r"(\w+) \1").unwrap();
    let line = b"one two two three four four five";

    c.bench_function("backreference", |b| {
        b.iter(|| black_box(regex.is_match(black_box(line))))
    });
}

fn bench_find_all_digits(c: &mut Criterion) {
    let regex = Regex::new(r"\d+").unwrap();
    let line = b"abc 123 def 456 ghi 789 jkl 012 mno 345 pqr 678 stu 901";

    c.bench_function("find_all_digits", |b| {
        b.iter(|| black_box(regex.find_all(black_box(line))))
    });
}

criterion_group!(
    benches,
    bench_literal_scan,
    bench_character_classes,
    bench_greedy_star,
    bench_alternation,
    bench_backreference,
    bench_find_all_digits,
);

criterion_main!(benches);

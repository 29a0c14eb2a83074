use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shortz_core::Codec;
use shortz_corpus::baseline::DictCodec;
use shortz_corpus::{Histogram, MapBuilder};

fn sample_text() -> String {
    let base = "request failed with connection timeout, retrying request \
with exponential backoff before the connection pool gives up entirely. ";
    let mut text = String::with_capacity(8 * 1024);
    while text.len() < 8 * 1024 {
        text.push_str(base);
    }
    text
}

fn bench_histogram(c: &mut Criterion) {
    let text = sample_text();
    c.bench_function("histogram_chars_8kb", |b| {
        b.iter(|| {
            let mut h = Histogram::new();
            h.add_chars(black_box(&text));
            black_box(h)
        })
    });
    c.bench_function("histogram_char_ngrams_8kb", |b| {
        b.iter(|| {
            let mut h = Histogram::new();
            h.add_char_ngrams(black_box(&text), 2, 4);
            black_box(h)
        })
    });
}

fn bench_codec_vs_baseline(c: &mut Criterion) {
    let text = sample_text();

    let mut h = Histogram::new();
    h.add_chars(&text);
    h.add_char_ngrams(&text, 2, 4);
    h.prune(8.0);
    let table = MapBuilder::shannon_fano().build(h).unwrap();
    let codec = Codec::new(&table).unwrap();

    let dict = DictCodec::train(&[&text]);

    let line = "request failed with connection timeout, retrying request";
    c.bench_function("bit_codec_compress_line", |b| {
        b.iter(|| black_box(codec.compress(black_box(line.as_bytes())).unwrap()))
    });
    c.bench_function("baseline_encode_line", |b| {
        b.iter(|| black_box(dict.encode(black_box(line))))
    });
}

criterion_group!(benches, bench_histogram, bench_codec_vs_baseline);
criterion_main!(benches);

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shortz_core::{huffman, shannon_fano, Codec, Ngram};

const CORPUS: &str = "the quick brown fox jumps over the lazy dog while \
packing boxes of assorted short strings for the compression benchmark \
suite that follows below in several repetitions of natural language";

fn corpus_ngrams() -> Vec<Ngram> {
    let mut counts: HashMap<char, f32> = HashMap::new();
    for c in CORPUS.chars() {
        *counts.entry(c).or_insert(0.0) += 1.0;
    }
    let mut ngrams: Vec<Ngram> = counts
        .into_iter()
        .map(|(c, w)| Ngram::new(c.to_string(), w))
        .collect();
    // Common digraphs as multi-byte tokens.
    for frag in ["th", "he", "in", "er", "the ", "ing"] {
        ngrams.push(Ngram::new(frag, 30.0));
    }
    ngrams.push(Ngram::stop(0.1));
    ngrams
}

fn bench_build_table(c: &mut Criterion) {
    let ngrams = corpus_ngrams();
    c.bench_function("build_table_shannon_fano", |b| {
        b.iter(|| black_box(shannon_fano::build_table(black_box(ngrams.clone()))))
    });
    c.bench_function("build_table_huffman", |b| {
        b.iter(|| black_box(huffman::build_table(black_box(ngrams.clone()))))
    });
}

fn bench_codec(c: &mut Criterion) {
    let table = shannon_fano::build_table(corpus_ngrams()).unwrap();
    let codec = Codec::new(&table).unwrap();

    let short = "the lazy dog";
    let line = CORPUS;
    c.bench_function("compress_short", |b| {
        b.iter(|| black_box(codec.compress(black_box(short.as_bytes())).unwrap()))
    });
    c.bench_function("compress_line", |b| {
        b.iter(|| black_box(codec.compress(black_box(line.as_bytes())).unwrap()))
    });

    let packed_short = codec.compress(short.as_bytes()).unwrap().bytes;
    let packed_line = codec.compress(line.as_bytes()).unwrap().bytes;
    c.bench_function("decompress_short", |b| {
        b.iter(|| black_box(codec.decompress(black_box(&packed_short)).unwrap()))
    });
    c.bench_function("decompress_line", |b| {
        b.iter(|| black_box(codec.decompress(black_box(&packed_line)).unwrap()))
    });
}

criterion_group!(benches, bench_build_table, bench_codec);
criterion_main!(benches);
